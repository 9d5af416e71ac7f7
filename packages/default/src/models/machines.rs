use crate::models::Model;
use crate::models::validation::{CharField, Validate, ValidationErrors};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

const SPARE_NAME: CharField = CharField::new("name", 40);
const MACHINE_NAME: CharField = CharField::new("name", 30);

#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Spare {
    pub id: i32,
    pub name: String,
}

impl Model for Spare {
    const TABLE: &'static str = "spares";
    const MODEL_NAME: &'static str = "spare";
    const VERBOSE_NAME: &'static str = "spare";
    const VERBOSE_NAME_PLURAL: &'static str = "spares";

    fn id(&self) -> i32 {
        self.id
    }
}

/// A machine assembled from spares. The link rows are [`Kit`]s.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Machine {
    pub id: i32,
    pub name: String,
}

impl Model for Machine {
    const TABLE: &'static str = "machines";
    const MODEL_NAME: &'static str = "machine";
    const VERBOSE_NAME: &'static str = "machine";
    const VERBOSE_NAME_PLURAL: &'static str = "machines";

    fn id(&self) -> i32 {
        self.id
    }
}

/// How many of one spare go into one machine.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Kit {
    pub id: i32,
    pub machine_id: i32,
    pub spare_id: i32,
    pub count: i32,
}

impl Model for Kit {
    const TABLE: &'static str = "kits";
    const MODEL_NAME: &'static str = "kit";
    const VERBOSE_NAME: &'static str = "kit";
    const VERBOSE_NAME_PLURAL: &'static str = "kits";

    fn id(&self) -> i32 {
        self.id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSpare {
    pub name: String,
}

impl Validate for NewSpare {
    fn clean_fields(&self, errors: &mut ValidationErrors) {
        SPARE_NAME.check(&self.name, errors);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewMachine {
    pub name: String,
}

impl Validate for NewMachine {
    fn clean_fields(&self, errors: &mut ValidationErrors) {
        MACHINE_NAME.check(&self.name, errors);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::validation::BLANK_MESSAGE;

    #[test]
    fn machine_name_is_required() {
        let errors = NewMachine {
            name: String::new(),
        }
        .full_clean()
        .unwrap_err();
        assert_eq!(errors.get("name"), [BLANK_MESSAGE]);
    }

    #[test]
    fn spare_name_allows_forty_characters() {
        assert!(NewSpare { name: "s".repeat(40) }.full_clean().is_ok());
        assert!(NewSpare { name: "s".repeat(41) }.full_clean().is_err());
    }
}
