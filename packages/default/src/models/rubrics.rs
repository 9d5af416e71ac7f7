use crate::models::Model;
use crate::models::validation::{CharField, Validate, ValidationErrors};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;

const NAME: CharField = CharField::new("name", 20);

#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Rubric {
    pub id: i32,
    pub name: String,
}

impl Model for Rubric {
    const TABLE: &'static str = "rubrics";
    const MODEL_NAME: &'static str = "rubric";
    const VERBOSE_NAME: &'static str = "Rubric";
    const VERBOSE_NAME_PLURAL: &'static str = "Rubrics";
    const FIELD_LABELS: &'static [(&'static str, &'static str)] = &[("name", "Name")];
    const ORDERING: &'static str = "name";

    fn id(&self) -> i32 {
        self.id
    }
}

impl fmt::Display for Rubric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewRubric {
    pub name: String,
}

impl NewRubric {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Validate for NewRubric {
    fn clean_fields(&self, errors: &mut ValidationErrors) {
        NAME.check(&self.name, errors);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_as_name() {
        let rubric = Rubric {
            id: 1,
            name: "Real estate".to_string(),
        };
        assert_eq!(rubric.to_string(), "Real estate");
    }

    #[test]
    fn name_longer_than_twenty_is_rejected() {
        let errors = NewRubric::new("x".repeat(21)).full_clean().unwrap_err();
        assert_eq!(
            errors.get("name"),
            ["Ensure this value has at most 20 characters (it has 21)."]
        );
        assert!(NewRubric::new("Transport").full_clean().is_ok());
    }
}
