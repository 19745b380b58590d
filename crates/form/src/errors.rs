use thiserror::Error;

use crate::field::FieldId;

/// Errors raised by the dynamic (`FieldId` + `FieldValue`) update path.
///
/// Validation failures are never reported through this type; they are data
/// returned in [`crate::ValidationErrors`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("field `{field}` expects a {expected} value")]
    TypeMismatch {
        field: FieldId,
        expected: &'static str,
    },

    #[error("unknown field key `{0}`")]
    UnknownField(String),
}
