use crate::models::Model;
use crate::models::validation::{CharField, Validate, ValidationErrors, matches};
use regex::Regex;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::sync::LazyLock;

const FIRST_NAME: CharField = CharField::new("first_name", 16);
const LAST_NAME: CharField = CharField::new("last_name", 24);

pub const SHORT_NAME_MESSAGE: &str = "Wrong name, you need more signs";

// At least four characters on one line, optionally followed by a single trailing newline.
static FIRST_NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^.{4,}\n?$").expect("static pattern is valid"));

#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Author {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
}

impl Model for Author {
    const TABLE: &'static str = "authors";
    const MODEL_NAME: &'static str = "author";
    const VERBOSE_NAME: &'static str = "author";
    const VERBOSE_NAME_PLURAL: &'static str = "authors";
    const FIELD_LABELS: &'static [(&'static str, &'static str)] =
        &[("first_name", "First Name"), ("last_name", "Last Name")];

    fn id(&self) -> i32 {
        self.id
    }
}

impl fmt::Display for Author {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.last_name, self.first_name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAuthor {
    pub first_name: String,
    pub last_name: String,
}

impl NewAuthor {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }
}

impl Validate for NewAuthor {
    fn clean_fields(&self, errors: &mut ValidationErrors) {
        if FIRST_NAME.check(&self.first_name, errors) {
            matches(
                FIRST_NAME.name,
                &self.first_name,
                &FIRST_NAME_PATTERN,
                SHORT_NAME_MESSAGE,
                errors,
            );
        }
        LAST_NAME.check(&self.last_name, errors);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_last_name_first() {
        let author = Author {
            id: 7,
            first_name: "Leo".to_string(),
            last_name: "Tolstoy".to_string(),
        };
        assert_eq!(author.to_string(), "Tolstoy Leo");
    }

    #[test]
    fn short_first_name_is_rejected() {
        let errors = NewAuthor::new("Leo", "Tolstoy").full_clean().unwrap_err();
        assert_eq!(errors.get("first_name"), [SHORT_NAME_MESSAGE]);

        assert!(NewAuthor::new("Lev", "Tolstoy").full_clean().is_err());
        assert!(NewAuthor::new("Fyodor", "Dostoevsky").full_clean().is_ok());
    }

    #[test]
    fn first_name_cannot_span_lines() {
        let errors = NewAuthor::new("ab\ncd", "Smith").full_clean().unwrap_err();
        assert_eq!(errors.get("first_name"), [SHORT_NAME_MESSAGE]);
    }

    #[test]
    fn first_name_may_end_with_one_newline() {
        assert!(NewAuthor::new("abcd\n", "Smith").full_clean().is_ok());
        assert!(NewAuthor::new("abcd\n\n", "Smith").full_clean().is_err());
        assert!(NewAuthor::new("abc\n", "Smith").full_clean().is_err());
    }
}
