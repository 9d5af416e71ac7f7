use crate::models::Model;
use crate::models::validation::{CharField, Validate, ValidationErrors};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

const MOVIE_NAME: CharField = CharField::new("name", 24);
const ACTOR_NAME: CharField = CharField::new("name", 16);

#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Movie {
    pub id: i32,
    pub name: String,
}

impl Model for Movie {
    const TABLE: &'static str = "movies";
    const MODEL_NAME: &'static str = "movie";
    const VERBOSE_NAME: &'static str = "movie";
    const VERBOSE_NAME_PLURAL: &'static str = "movies";

    fn id(&self) -> i32 {
        self.id
    }
}

#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Actor {
    pub id: i32,
    pub name: String,
}

impl Model for Actor {
    const TABLE: &'static str = "actors";
    const MODEL_NAME: &'static str = "actor";
    const VERBOSE_NAME: &'static str = "actor";
    const VERBOSE_NAME_PLURAL: &'static str = "actors";

    fn id(&self) -> i32 {
        self.id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewMovie {
    pub name: String,
}

impl Validate for NewMovie {
    fn clean_fields(&self, errors: &mut ValidationErrors) {
        MOVIE_NAME.check(&self.name, errors);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewActor {
    pub name: String,
}

impl Validate for NewActor {
    fn clean_fields(&self, errors: &mut ValidationErrors) {
        ACTOR_NAME.check(&self.name, errors);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actor_names_are_shorter_than_movie_names() {
        let name = "Mastroianni Marcel".to_string();
        assert!(NewMovie { name: name.clone() }.full_clean().is_ok());
        assert!(NewActor { name }.full_clean().is_err());
    }
}
