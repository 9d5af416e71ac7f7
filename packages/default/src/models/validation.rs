use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;

/// Key under which errors that belong to the whole record are collected.
pub const NON_FIELD_ERRORS: &str = "__all__";

pub const BLANK_MESSAGE: &str = "This field cannot be blank.";

/// Validation failures keyed by field name, in the order of the field names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(transparent)]
#[error("validation failed: {}", summarize(.0))]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

fn summarize(errors: &BTreeMap<String, Vec<String>>) -> String {
    errors
        .iter()
        .map(|(field, messages)| format!("{field}: {}", messages.join(" ")))
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn add_non_field(&mut self, message: impl Into<String>) {
        self.add(NON_FIELD_ERRORS, message);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn has(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Messages recorded for `field`, empty when the field passed.
    pub fn get(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

/// Record-level validation run before every write.
///
/// `clean_fields` checks each field on its own; `clean` then checks rules
/// spanning several fields. Both always run so the caller sees every problem
/// at once.
pub trait Validate {
    fn clean_fields(&self, errors: &mut ValidationErrors);

    fn clean(&self, _errors: &mut ValidationErrors) {}

    fn full_clean(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        self.clean_fields(&mut errors);
        self.clean(&mut errors);
        errors.into_result()
    }
}

/// Bounded text column that must not be blank.
#[derive(Debug, Clone, Copy)]
pub struct CharField {
    pub name: &'static str,
    pub max_length: usize,
}

impl CharField {
    pub const fn new(name: &'static str, max_length: usize) -> Self {
        Self { name, max_length }
    }

    /// Checks blankness and length. Returns `true` when the value is
    /// non-empty and further validators should run on it.
    pub fn check(&self, value: &str, errors: &mut ValidationErrors) -> bool {
        if value.is_empty() {
            errors.add(self.name, BLANK_MESSAGE);
            return false;
        }
        let len = value.chars().count();
        if len > self.max_length {
            errors.add(
                self.name,
                format!(
                    "Ensure this value has at most {} characters (it has {len}).",
                    self.max_length
                ),
            );
        }
        true
    }

    /// Same as [`CharField::check`] for nullable columns. `None` counts as blank.
    pub fn check_opt(&self, value: Option<&str>, errors: &mut ValidationErrors) -> bool {
        self.check(value.unwrap_or_default(), errors)
    }
}

/// Unbounded text column that must not be blank.
pub fn require_text(field: &str, value: &str, errors: &mut ValidationErrors) {
    if value.is_empty() {
        errors.add(field, BLANK_MESSAGE);
    }
}

/// Nullable column that is still required when validating.
pub fn require_present<T>(field: &str, value: &Option<T>, errors: &mut ValidationErrors) {
    if value.is_none() {
        errors.add(field, BLANK_MESSAGE);
    }
}

pub fn min_length(field: &str, value: &str, min: usize, errors: &mut ValidationErrors) {
    let len = value.chars().count();
    if len < min {
        errors.add(
            field,
            format!("Ensure this value has at least {min} characters (it has {len})."),
        );
    }
}

pub fn matches(field: &str, value: &str, regex: &Regex, message: &str, errors: &mut ValidationErrors) {
    if !regex.is_match(value) {
        errors.add(field, message);
    }
}

pub fn min_value(field: &str, value: i64, min: i64, errors: &mut ValidationErrors) {
    if value < min {
        errors.add(
            field,
            format!("Ensure this value is greater than or equal to {min}."),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TITLE: CharField = CharField::new("title", 5);

    #[test]
    fn empty_required_char_field_is_blank_error() {
        let mut errors = ValidationErrors::new();
        assert!(!TITLE.check("", &mut errors));
        assert_eq!(errors.get("title"), [BLANK_MESSAGE]);
    }

    #[test]
    fn missing_nullable_char_field_is_blank_error() {
        let mut errors = ValidationErrors::new();
        assert!(!TITLE.check_opt(None, &mut errors));
        assert_eq!(errors.get("title"), [BLANK_MESSAGE]);
    }

    #[test]
    fn max_length_counts_characters_not_bytes() {
        let mut errors = ValidationErrors::new();
        assert!(TITLE.check("ёжики", &mut errors));
        assert!(errors.is_empty());

        assert!(TITLE.check("ёжиков", &mut errors));
        assert_eq!(
            errors.get("title"),
            ["Ensure this value has at most 5 characters (it has 6)."]
        );
    }

    #[test]
    fn errors_serialize_as_field_map() {
        let mut errors = ValidationErrors::new();
        errors.add("price", "Enter not negative price");
        errors.add_non_field("whole record is wrong");

        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "__all__": ["whole record is wrong"],
                "price": ["Enter not negative price"],
            })
        );
        assert_eq!(
            errors.to_string(),
            "validation failed: __all__: whole record is wrong; price: Enter not negative price"
        );
    }

    #[test]
    fn min_value_rejects_negative() {
        let mut errors = ValidationErrors::new();
        min_value("object_id", -1, 0, &mut errors);
        min_value("other", 0, 0, &mut errors);
        assert_eq!(
            errors.get("object_id"),
            ["Ensure this value is greater than or equal to 0."]
        );
        assert!(!errors.has("other"));
    }
}
