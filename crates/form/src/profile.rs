//! Variant profiles.
//!
//! The form exists in two near-identical flavours that differ in pass
//! options, e-mail strictness, submit gating, messages and copy. Instead of
//! duplicating logic per flavour, each [`FormVariant`] produces a
//! [`FormProfile`]: plain data consumed by validation and by the view.
//!
//! Options can be overridden independently of the variant (see
//! [`FormProfile::with_options`]), so e.g. a guest pass form can run with
//! strict e-mail checking.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::field::COMMENTS_MAX_LEN;

/// Which preset the session runs with.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum FormVariant {
    /// "Pase de Invitado": General / VIP, loose e-mail check.
    #[default]
    GuestPass,
    /// "Formulario de Registro" for the micro-workshop: strict e-mail check,
    /// submit disabled until the form is valid.
    Workshop,
}

/// E-mail format check applied after the "required" check.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum EmailStrictness {
    /// Must contain `@`.
    #[default]
    Loose,
    /// Must contain both `@` and `.`.
    Strict,
}

impl EmailStrictness {
    pub fn accepts(self, email: &str) -> bool {
        match self {
            EmailStrictness::Loose => email.contains('@'),
            EmailStrictness::Strict => email.contains('@') && email.contains('.'),
        }
    }
}

/// When field messages are recomputed.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ValidationTiming {
    /// Full pass on submit only; editing a field clears its message.
    #[default]
    OnSubmit,
    /// Additionally re-check the edited field on every change. Fields not
    /// yet touched stay unflagged until the first submit.
    OnChange,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormOptions {
    pub email_strictness: EmailStrictness,
    pub validation_timing: ValidationTiming,
    /// Disable the submit control while the form is invalid.
    pub gate_submit: bool,
}

/// Human-readable validation messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Messages {
    pub name_required: &'static str,
    pub email_required: &'static str,
    pub email_invalid: &'static str,
    pub pass_required: &'static str,
    pub terms_required: &'static str,
}

/// One selectable pass. `value` is what ends up in the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PassOption {
    pub value: &'static str,
    pub label: &'static str,
}

/// Opaque static resource referenced by the summary panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Asset {
    pub path: &'static str,
    pub alt: &'static str,
}

/// Fixed UI text for one variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormCopy {
    pub page_title: &'static str,
    pub form_title: &'static str,
    pub name_label: &'static str,
    pub name_placeholder: Option<&'static str>,
    pub email_label: &'static str,
    pub email_placeholder: Option<&'static str>,
    pub pass_label: &'static str,
    pub comments_label: &'static str,
    pub comments_placeholder: Option<&'static str>,
    pub terms_label: &'static str,
    pub submit_label: &'static str,
    pub summary_title: &'static str,
    pub summary_pass_heading: &'static str,
    pub modal_title: &'static str,
    pub modal_body: &'static str,
    pub modal_comments_heading: &'static str,
    pub close_label: &'static str,
    pub assets: Vec<Asset>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormProfile {
    pub variant: FormVariant,
    pub options: FormOptions,
    pub passes: [PassOption; 2],
    pub messages: Messages,
    pub copy: FormCopy,
}

const NAME_REQUIRED: &str = "El nombre es requerido.";
const EMAIL_REQUIRED: &str = "El correo es requerido.";
const TERMS_REQUIRED: &str = "Debe aceptar los términos y condiciones.";

impl FormVariant {
    pub fn profile(self) -> FormProfile {
        match self {
            FormVariant::GuestPass => FormProfile {
                variant: self,
                options: FormOptions {
                    email_strictness: EmailStrictness::Loose,
                    validation_timing: ValidationTiming::OnSubmit,
                    gate_submit: false,
                },
                passes: [
                    PassOption {
                        value: "General",
                        label: "General",
                    },
                    PassOption {
                        value: "VIP",
                        label: "VIP",
                    },
                ],
                messages: Messages {
                    name_required: NAME_REQUIRED,
                    email_required: EMAIL_REQUIRED,
                    email_invalid: "El correo no es válido (debe incluir @).",
                    pass_required: "Debe seleccionar un tipo de pase.",
                    terms_required: TERMS_REQUIRED,
                },
                copy: FormCopy {
                    page_title: "Evento de Bienvenida",
                    form_title: "Pase de Invitado",
                    name_label: "Nombre Completo",
                    name_placeholder: None,
                    email_label: "Correo Electrónico",
                    email_placeholder: None,
                    pass_label: "Tipo de Pase",
                    comments_label: "Comentarios (Opcional)",
                    comments_placeholder: None,
                    terms_label: "Acepto los términos y condiciones",
                    submit_label: "Generar Pase",
                    summary_title: "Resumen en Vivo",
                    summary_pass_heading: "Tipo de Pase",
                    modal_title: "Envío exitoso (simulado — sin back-end)",
                    modal_body: "¡Tu pase ha sido generado!",
                    modal_comments_heading: "Comentarios",
                    close_label: "Cerrar",
                    assets: vec![Asset {
                        path: "/bar.jpg",
                        alt: "Imagen de un bar",
                    }],
                },
            },
            FormVariant::Workshop => FormProfile {
                variant: self,
                options: FormOptions {
                    email_strictness: EmailStrictness::Strict,
                    validation_timing: ValidationTiming::OnSubmit,
                    gate_submit: true,
                },
                passes: [
                    PassOption {
                        value: "Estudiante",
                        label: "Estudiante (con credencial)",
                    },
                    PassOption {
                        value: "Profesional",
                        label: "Profesional / General",
                    },
                ],
                messages: Messages {
                    name_required: NAME_REQUIRED,
                    email_required: EMAIL_REQUIRED,
                    email_invalid: "El correo no es válido (ej: usuario@dominio.com).",
                    pass_required: "Debe seleccionar un tipo de asistencia.",
                    terms_required: TERMS_REQUIRED,
                },
                copy: FormCopy {
                    page_title: "Microtaller",
                    form_title: "Formulario de Registro",
                    name_label: "Nombre Completo",
                    name_placeholder: Some("Ej: Ada Lovelace"),
                    email_label: "Correo Electrónico",
                    email_placeholder: Some("Ej: ada@correo.com"),
                    pass_label: "Tipo de Asistencia",
                    comments_label: "Intereses (Opcional)",
                    comments_placeholder: Some("¿Qué temas te gustaría ver en el taller?"),
                    terms_label: "Acepto los términos y condiciones del evento.",
                    submit_label: "Registrarme en el Taller",
                    summary_title: "Resumen en Vivo",
                    summary_pass_heading: "Asistencia",
                    modal_title: "¡Registro exitoso! (Simulado)",
                    modal_body: "Tu lugar para el microtaller ha sido reservado.",
                    modal_comments_heading: "Intereses",
                    close_label: "Cerrar",
                    assets: vec![
                        Asset {
                            path: "/microtaller.webp",
                            alt: "Imagen del microtaller",
                        },
                        Asset {
                            path: "/truck-icon.webp",
                            alt: "Decoración de taller",
                        },
                    ],
                },
            },
        }
    }
}

impl Default for FormProfile {
    fn default() -> Self {
        FormVariant::default().profile()
    }
}

impl FormProfile {
    pub fn with_options(mut self, options: FormOptions) -> Self {
        self.options = options;
        self
    }

    /// Whether `value` names one of this profile's passes.
    pub fn is_pass(&self, value: &str) -> bool {
        self.passes.iter().any(|p| p.value == value)
    }

    pub fn pass_label(&self, value: &str) -> Option<&'static str> {
        self.passes.iter().find(|p| p.value == value).map(|p| p.label)
    }

    /// Counter text shown under the comments box, e.g. `"12 / 120"`. Counts
    /// UTF-16 code units, like the limit itself.
    pub fn comments_counter(&self, comments: &str) -> String {
        format!(
            "{} / {}",
            crate::field::utf16_len(comments),
            COMMENTS_MAX_LEN
        )
    }
}
