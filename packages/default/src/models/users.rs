use crate::models::Model;
use crate::models::validation::{CharField, Validate, ValidationErrors, require_present};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;

const CITY: CharField = CharField::new("city", 24);
const FIRST_NAME: CharField = CharField::new("first_name", 16);
const LAST_NAME: CharField = CharField::new("last_name", 24);
const ENG_WORD: CharField = CharField::new("eng_word", 24);
const RUS_WORD: CharField = CharField::new("rus_word", 24);

/// Renders a nullable value, spelling out a missing one as `None`.
struct OrNone<'a, T>(&'a Option<T>);

impl<T: fmt::Display> fmt::Display for OrNone<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(value) => fmt::Display::fmt(value, f),
            None => f.write_str("None"),
        }
    }
}

/// Extra profile details, owned one-to-one by a [`UserInfo`].
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct UserAddInfo {
    pub id: i32,
    pub city: String,
    pub old: Option<i32>,
    pub birthday: Option<NaiveDate>,
}

impl Model for UserAddInfo {
    const TABLE: &'static str = "user_add_infos";
    const MODEL_NAME: &'static str = "useraddinfo";
    const VERBOSE_NAME: &'static str = "user add info";
    const VERBOSE_NAME_PLURAL: &'static str = "user add infos";
    const FIELD_LABELS: &'static [(&'static str, &'static str)] = &[("city", "Address")];

    fn id(&self) -> i32 {
        self.id
    }
}

impl fmt::Display for UserAddInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} years old. {} {}",
            OrNone(&self.old),
            self.city,
            OrNone(&self.birthday)
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewUserAddInfo {
    pub city: String,
    #[serde(default)]
    pub old: Option<i32>,
    #[serde(default)]
    pub birthday: Option<NaiveDate>,
}

impl Validate for NewUserAddInfo {
    fn clean_fields(&self, errors: &mut ValidationErrors) {
        CITY.check(&self.city, errors);
        require_present("old", &self.old, errors);
        require_present("birthday", &self.birthday, errors);
    }
}

#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub add_info_id: Option<i32>,
}

impl Model for UserInfo {
    const TABLE: &'static str = "user_infos";
    const MODEL_NAME: &'static str = "userinfo";
    const VERBOSE_NAME: &'static str = "user info";
    const VERBOSE_NAME_PLURAL: &'static str = "user infos";
    const FIELD_LABELS: &'static [(&'static str, &'static str)] =
        &[("first_name", "First Name"), ("last_name", "Last Name")];

    fn id(&self) -> i32 {
        self.id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewUserInfo {
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub add_info_id: Option<i32>,
}

impl Validate for NewUserInfo {
    fn clean_fields(&self, errors: &mut ValidationErrors) {
        FIRST_NAME.check(&self.first_name, errors);
        LAST_NAME.check(&self.last_name, errors);
        require_present("add_info", &self.add_info_id, errors);
    }
}

/// A vocabulary entry with its translation.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Word {
    pub id: i32,
    pub eng_word: String,
    pub rus_word: Option<String>,
}

impl Model for Word {
    const TABLE: &'static str = "words";
    const MODEL_NAME: &'static str = "word";
    const VERBOSE_NAME: &'static str = "word";
    const VERBOSE_NAME_PLURAL: &'static str = "words";

    fn id(&self) -> i32 {
        self.id
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.eng_word, OrNone(&self.rus_word))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewWord {
    pub eng_word: String,
    #[serde(default)]
    pub rus_word: Option<String>,
}

impl NewWord {
    pub fn new(eng_word: impl Into<String>, rus_word: impl Into<String>) -> Self {
        Self {
            eng_word: eng_word.into(),
            rus_word: Some(rus_word.into()),
        }
    }
}

impl Validate for NewWord {
    fn clean_fields(&self, errors: &mut ValidationErrors) {
        ENG_WORD.check(&self.eng_word, errors);
        RUS_WORD.check_opt(self.rus_word.as_deref(), errors);
    }
}
