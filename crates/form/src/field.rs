use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::errors::FieldError;

/// Maximum length of the optional comments field, in UTF-16 code units (the
/// unit an HTML `maxLength` counts).
pub const COMMENTS_MAX_LEN: usize = 120;

/// Closed set of form fields.
///
/// Declaration order is the on-screen order and the iteration order of
/// [`crate::ValidationErrors`]. The string form (`Display` / `FromStr` /
/// serde) is the wire key of the field.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum FieldId {
    Name,
    Email,
    PassType,
    AcceptedTerms,
    Comments,
}

impl FieldId {
    /// Parse an external key (e.g. from a config file or a test fixture).
    pub fn parse(key: &str) -> Result<Self, FieldError> {
        FieldId::from_str(key).map_err(|_| FieldError::UnknownField(key.to_string()))
    }

    /// Wire key of this field.
    pub fn key(self) -> &'static str {
        self.into()
    }

    pub fn is_flag(self) -> bool {
        matches!(self, FieldId::AcceptedTerms)
    }

    /// Parse a raw `value` for this field: `true` / `false` for the flag,
    /// anything for text fields.
    pub fn parse_value(self, value: &str) -> Result<FieldValue, FieldError> {
        if !self.is_flag() {
            return Ok(FieldValue::Text(value.to_string()));
        }
        value
            .trim()
            .parse::<bool>()
            .map(FieldValue::Flag)
            .map_err(|_| FieldError::TypeMismatch {
                field: self,
                expected: "boolean",
            })
    }
}

/// Untyped field value as produced by a view layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Flag(value)
    }
}

/// Typed single-field replacement. One variant per [`FieldId`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum FieldUpdate {
    Name(String),
    Email(String),
    PassType(String),
    AcceptedTerms(bool),
    Comments(String),
}

impl FieldUpdate {
    pub fn field(&self) -> FieldId {
        match self {
            FieldUpdate::Name(_) => FieldId::Name,
            FieldUpdate::Email(_) => FieldId::Email,
            FieldUpdate::PassType(_) => FieldId::PassType,
            FieldUpdate::AcceptedTerms(_) => FieldId::AcceptedTerms,
            FieldUpdate::Comments(_) => FieldId::Comments,
        }
    }

    /// Build a typed update from a field id and an untyped value.
    pub fn from_value(field: FieldId, value: FieldValue) -> Result<Self, FieldError> {
        match (field, value) {
            (FieldId::AcceptedTerms, FieldValue::Flag(b)) => Ok(FieldUpdate::AcceptedTerms(b)),
            (FieldId::AcceptedTerms, FieldValue::Text(_)) => Err(FieldError::TypeMismatch {
                field,
                expected: "boolean",
            }),
            (_, FieldValue::Flag(_)) => Err(FieldError::TypeMismatch {
                field,
                expected: "text",
            }),
            (FieldId::Name, FieldValue::Text(s)) => Ok(FieldUpdate::Name(s)),
            (FieldId::Email, FieldValue::Text(s)) => Ok(FieldUpdate::Email(s)),
            (FieldId::PassType, FieldValue::Text(s)) => Ok(FieldUpdate::PassType(s)),
            (FieldId::Comments, FieldValue::Text(s)) => Ok(FieldUpdate::Comments(s)),
        }
    }
}

/// The record under edit.
///
/// Every field is always present; "unset" is the empty string (or `false`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormFields {
    pub name: String,
    pub email: String,
    pub pass_type: String,
    pub accepted_terms: bool,
    pub comments: String,
}

impl FormFields {
    /// Fresh default record. Each call returns a new value; the model resets
    /// to this on dismissal.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self, field: FieldId) -> FieldValue {
        match field {
            FieldId::Name => FieldValue::Text(self.name.clone()),
            FieldId::Email => FieldValue::Text(self.email.clone()),
            FieldId::PassType => FieldValue::Text(self.pass_type.clone()),
            FieldId::AcceptedTerms => FieldValue::Flag(self.accepted_terms),
            FieldId::Comments => FieldValue::Text(self.comments.clone()),
        }
    }

    /// Replace one field. Comments are clamped to [`COMMENTS_MAX_LEN`].
    pub fn apply(&mut self, update: FieldUpdate) -> FieldId {
        let field = update.field();
        match update {
            FieldUpdate::Name(v) => self.name = v,
            FieldUpdate::Email(v) => self.email = v,
            FieldUpdate::PassType(v) => self.pass_type = v,
            FieldUpdate::AcceptedTerms(v) => self.accepted_terms = v,
            FieldUpdate::Comments(v) => self.comments = clamp_comments(v),
        }
        field
    }
}

/// Truncate `value` to at most `max` UTF-16 code units. Never splits a
/// character: a surrogate pair that would straddle the limit is dropped whole.
pub fn clamp_utf16(mut value: String, max: usize) -> String {
    let mut units = 0;
    let cut = value.char_indices().find_map(|(idx, c)| {
        units += c.len_utf16();
        (units > max).then_some(idx)
    });
    if let Some(idx) = cut {
        value.truncate(idx);
    }
    value
}

pub fn clamp_comments(value: String) -> String {
    clamp_utf16(value, COMMENTS_MAX_LEN)
}

/// Length of `value` in UTF-16 code units, as shown by the counter.
pub fn utf16_len(value: &str) -> usize {
    value.encode_utf16().count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn wire_keys_are_camel_case() {
        let keys: Vec<&str> = FieldId::iter().map(FieldId::key).collect();
        assert_eq!(
            keys,
            vec!["name", "email", "passType", "acceptedTerms", "comments"]
        );
        assert_eq!(FieldId::parse("passType"), Ok(FieldId::PassType));
        assert_eq!(
            FieldId::parse("tipoPase"),
            Err(FieldError::UnknownField("tipoPase".into()))
        );
    }

    #[test]
    fn from_value_rejects_mismatched_types() {
        assert!(matches!(
            FieldUpdate::from_value(FieldId::AcceptedTerms, "yes".into()),
            Err(FieldError::TypeMismatch { expected: "boolean", .. })
        ));
        assert!(matches!(
            FieldUpdate::from_value(FieldId::Email, true.into()),
            Err(FieldError::TypeMismatch { expected: "text", .. })
        ));
        assert_eq!(
            FieldUpdate::from_value(FieldId::Comments, "hola".into()),
            Ok(FieldUpdate::Comments("hola".into()))
        );
    }

    #[test]
    fn comments_are_clamped_by_utf16_units() {
        let long = "ñ".repeat(COMMENTS_MAX_LEN + 10);
        let mut fields = FormFields::new();
        fields.apply(FieldUpdate::Comments(long));
        assert_eq!(utf16_len(&fields.comments), COMMENTS_MAX_LEN);
        assert_eq!(fields.comments.chars().count(), COMMENTS_MAX_LEN);

        let exact = "a".repeat(COMMENTS_MAX_LEN);
        assert_eq!(clamp_comments(exact.clone()), exact);
    }

    #[test]
    fn astral_characters_count_twice() {
        let mut fields = FormFields::new();
        fields.apply(FieldUpdate::Comments("😀".repeat(COMMENTS_MAX_LEN)));
        assert_eq!(utf16_len(&fields.comments), COMMENTS_MAX_LEN);
        assert_eq!(fields.comments.chars().count(), COMMENTS_MAX_LEN / 2);

        // a pair that would end at unit 121 is dropped whole
        let odd = format!("{}😀", "a".repeat(COMMENTS_MAX_LEN - 1));
        assert_eq!(clamp_comments(odd), "a".repeat(COMMENTS_MAX_LEN - 1));
    }

    #[test]
    fn parse_value_follows_the_field_type() {
        assert_eq!(FieldId::AcceptedTerms.parse_value(" true"), Ok(FieldValue::Flag(true)));
        assert_eq!(
            FieldId::Comments.parse_value("true"),
            Ok(FieldValue::Text("true".into()))
        );
        assert!(matches!(
            FieldId::AcceptedTerms.parse_value("sí"),
            Err(FieldError::TypeMismatch { expected: "boolean", .. })
        ));
    }

    #[test]
    fn defaults_are_fresh_values() {
        let mut a = FormFields::new();
        a.apply(FieldUpdate::Name("Ada".into()));
        let b = FormFields::new();
        assert_eq!(b.name, "");
        assert!(!b.accepted_terms);
    }

    #[test]
    fn update_serializes_with_field_tag() {
        let json = serde_json::to_value(FieldUpdate::AcceptedTerms(true)).unwrap();
        assert_eq!(json, serde_json::json!({"field": "acceptedTerms", "value": true}));
    }
}
