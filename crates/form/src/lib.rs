//! Registration form core.
//!
//! This crate owns everything about the RSVP / guest pass form that is not
//! drawing: the field record, the per-variant profile (options, messages and
//! copy), the pure validation pass and the small submit/confirm state machine
//! wrapped by [`RegistrationFormModel`].
//!
//! Layout:
//!   - `field`    : closed set of field identifiers, values and typed updates
//!   - `profile`  : variant presets, validation options, messages, UI copy
//!   - `validate` : pure rules producing a [`ValidationReport`]
//!   - `model`    : the mutable session state + intents / reducer entry point
//!   - `summary`  : derived read-only views (live summary, confirmation)
//!   - `errors`   : misuse errors of the dynamic field path
//!
//! The crate performs no I/O. A front end (see the `rsvp` crate) reads
//! [`FormSnapshot`]s and forwards user events as [`FormIntent`]s.
pub mod errors;
pub mod field;
pub mod model;
pub mod profile;
pub mod summary;
pub mod validate;

pub use errors::FieldError;
pub use field::{COMMENTS_MAX_LEN, FieldId, FieldUpdate, FieldValue, FormFields};
pub use model::{FormIntent, FormSnapshot, RegistrationFormModel, SubmitOutcome, Submission};
pub use profile::{
    Asset, EmailStrictness, FormCopy, FormOptions, FormProfile, FormVariant, Messages, PassOption,
    ValidationTiming,
};
pub use summary::{ConfirmationSummary, LiveSummary, SummaryRow};
pub use validate::{ValidationErrors, ValidationReport, validate, validate_field};
