use crate::models::authors::Author;
use crate::models::bbs::Bb;
use crate::models::books::Book;
use crate::models::machines::{Kit, Machine, Spare};
use crate::models::movies::{Actor, Movie};
use crate::models::rubrics::Rubric;
use crate::models::users::{UserAddInfo, UserInfo, Word};
use crate::models::validation::{Validate, ValidationErrors, min_value, require_text};
use crate::models::Model;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Registry row identifying one model, referenced by generic relations.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct ContentType {
    pub id: i32,
    pub app_label: String,
    pub model: String,
}

/// A free-form note attached to any record through `(content_type, object_id)`.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Note {
    pub id: i32,
    pub content: String,
    pub content_type_id: i32,
    pub object_id: i32,
}

impl Model for Note {
    const TABLE: &'static str = "notes";
    const MODEL_NAME: &'static str = "note";
    const VERBOSE_NAME: &'static str = "note";
    const VERBOSE_NAME_PLURAL: &'static str = "notes";

    fn id(&self) -> i32 {
        self.id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewNote {
    pub content: String,
    pub content_type_id: i32,
    pub object_id: i32,
}

impl Validate for NewNote {
    fn clean_fields(&self, errors: &mut ValidationErrors) {
        require_text("content", &self.content, errors);
        min_value("object_id", i64::from(self.object_id), 0, errors);
    }
}

/// The record a note points at, resolved from its content type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "model", content = "object", rename_all = "lowercase")]
pub enum ContentObject {
    Rubric(Rubric),
    Bb(Bb),
    Author(Author),
    Book(Book),
    UserAddInfo(UserAddInfo),
    UserInfo(UserInfo),
    Word(Word),
    Movie(Movie),
    Actor(Actor),
    Spare(Spare),
    Machine(Machine),
    Kit(Kit),
    Note(Note),
}

impl ContentObject {
    pub fn model_name(&self) -> &'static str {
        match self {
            ContentObject::Rubric(_) => Rubric::MODEL_NAME,
            ContentObject::Bb(_) => Bb::MODEL_NAME,
            ContentObject::Author(_) => Author::MODEL_NAME,
            ContentObject::Book(_) => Book::MODEL_NAME,
            ContentObject::UserAddInfo(_) => UserAddInfo::MODEL_NAME,
            ContentObject::UserInfo(_) => UserInfo::MODEL_NAME,
            ContentObject::Word(_) => Word::MODEL_NAME,
            ContentObject::Movie(_) => Movie::MODEL_NAME,
            ContentObject::Actor(_) => Actor::MODEL_NAME,
            ContentObject::Spare(_) => Spare::MODEL_NAME,
            ContentObject::Machine(_) => Machine::MODEL_NAME,
            ContentObject::Kit(_) => Kit::MODEL_NAME,
            ContentObject::Note(_) => Note::MODEL_NAME,
        }
    }

    pub fn id(&self) -> i32 {
        match self {
            ContentObject::Rubric(m) => m.id,
            ContentObject::Bb(m) => m.id,
            ContentObject::Author(m) => m.id,
            ContentObject::Book(m) => m.id,
            ContentObject::UserAddInfo(m) => m.id,
            ContentObject::UserInfo(m) => m.id,
            ContentObject::Word(m) => m.id,
            ContentObject::Movie(m) => m.id,
            ContentObject::Actor(m) => m.id,
            ContentObject::Spare(m) => m.id,
            ContentObject::Machine(m) => m.id,
            ContentObject::Kit(m) => m.id,
            ContentObject::Note(m) => m.id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::validation::BLANK_MESSAGE;

    #[test]
    fn note_needs_content_and_non_negative_object_id() {
        let note = NewNote {
            content: String::new(),
            content_type_id: 1,
            object_id: -5,
        };
        let errors = note.full_clean().unwrap_err();
        assert_eq!(errors.get("content"), [BLANK_MESSAGE]);
        assert_eq!(
            errors.get("object_id"),
            ["Ensure this value is greater than or equal to 0."]
        );
    }

    #[test]
    fn content_object_serializes_with_model_tag() {
        let object = ContentObject::Rubric(Rubric {
            id: 4,
            name: "Cars".to_string(),
        });
        assert_eq!(object.model_name(), "rubric");
        assert_eq!(object.id(), 4);
        assert_eq!(
            serde_json::to_value(&object).unwrap(),
            serde_json::json!({"model": "rubric", "object": {"id": 4, "name": "Cars"}})
        );
    }

    #[test]
    fn serde_tags_match_registry_names() {
        let object = ContentObject::UserAddInfo(UserAddInfo {
            id: 1,
            city: "Odesa".to_string(),
            old: None,
            birthday: None,
        });
        let json = serde_json::to_value(&object).unwrap();
        assert_eq!(json["model"], object.model_name());
    }
}
