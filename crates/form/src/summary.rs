//! Derived views of the record for the summary panel and the confirmation
//! dialog. Pure functions of the fields; nothing here is stored.

use serde::Serialize;

use crate::{field::FormFields, profile::FormProfile};

/// Placeholder shown for empty text in the live summary.
pub const EMPTY_PLACEHOLDER: &str = "...";
pub const TERMS_ACCEPTED: &str = "Aceptados";
pub const TERMS_PENDING: &str = "Pendientes";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryRow {
    pub heading: &'static str,
    pub value: String,
}

/// Live summary next to the form. Updates on every keystroke.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LiveSummary {
    pub title: &'static str,
    pub rows: Vec<SummaryRow>,
}

impl LiveSummary {
    pub fn from_fields(fields: &FormFields, profile: &FormProfile) -> Self {
        let or_placeholder = |s: &str| {
            if s.is_empty() {
                EMPTY_PLACEHOLDER.to_string()
            } else {
                s.to_string()
            }
        };
        let terms = if fields.accepted_terms {
            TERMS_ACCEPTED
        } else {
            TERMS_PENDING
        };

        Self {
            title: profile.copy.summary_title,
            rows: vec![
                SummaryRow {
                    heading: "Nombre",
                    value: or_placeholder(&fields.name),
                },
                SummaryRow {
                    heading: "Correo",
                    value: or_placeholder(&fields.email),
                },
                SummaryRow {
                    heading: profile.copy.summary_pass_heading,
                    value: or_placeholder(&fields.pass_type),
                },
                SummaryRow {
                    heading: "Términos",
                    value: terms.to_string(),
                },
            ],
        }
    }
}

/// Body of the confirmation dialog. Comments only appear when present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfirmationSummary {
    pub title: &'static str,
    pub body: &'static str,
    pub rows: Vec<SummaryRow>,
}

impl ConfirmationSummary {
    pub fn from_fields(fields: &FormFields, profile: &FormProfile) -> Self {
        let mut rows = vec![
            SummaryRow {
                heading: "Nombre",
                value: fields.name.clone(),
            },
            SummaryRow {
                heading: "Correo",
                value: fields.email.clone(),
            },
            SummaryRow {
                heading: "Tipo",
                value: fields.pass_type.clone(),
            },
        ];
        if !fields.comments.is_empty() {
            rows.push(SummaryRow {
                heading: profile.copy.modal_comments_heading,
                value: fields.comments.clone(),
            });
        }
        Self {
            title: profile.copy.modal_title,
            body: profile.copy.modal_body,
            rows,
        }
    }
}
