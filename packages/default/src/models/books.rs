use crate::models::Model;
use crate::models::validation::{CharField, Validate, ValidationErrors, min_length};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

const NAME: CharField = CharField::new("name", 30);
const NAME_MIN_LENGTH: usize = 5;

/// Required sum of `pages` and `price` for a book to be accepted.
pub const PAGES_PLUS_PRICE: f64 = 100.0;

/// A book, ordered among the other books of its author.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Book {
    pub id: i32,
    pub name: String,
    pub pages: i32,
    pub price: Option<f64>,
    pub author_id: i32,
    #[sqlx(rename = "_order")]
    #[serde(skip)]
    pub order: i32,
}

impl Model for Book {
    const TABLE: &'static str = "books";
    const MODEL_NAME: &'static str = "book";
    const VERBOSE_NAME: &'static str = "book";
    const VERBOSE_NAME_PLURAL: &'static str = "books";
    const FIELD_LABELS: &'static [(&'static str, &'static str)] = &[("name", "Book name")];
    const ORDERING: &'static str = "_order, id";

    fn id(&self) -> i32 {
        self.id
    }
}

impl Book {
    pub fn absolute_url(&self) -> String {
        absolute_url(self.id)
    }
}

pub fn absolute_url(id: i32) -> String {
    format!("/bboard/book/{id}/")
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewBook {
    pub name: String,
    pub pages: i32,
    #[serde(default)]
    pub price: Option<f64>,
    pub author_id: i32,
}

impl NewBook {
    pub fn new(name: impl Into<String>, pages: i32, price: Option<f64>, author_id: i32) -> Self {
        Self {
            name: name.into(),
            pages,
            price,
            author_id,
        }
    }
}

impl Validate for NewBook {
    fn clean_fields(&self, errors: &mut ValidationErrors) {
        if NAME.check(&self.name, errors) {
            min_length(NAME.name, &self.name, NAME_MIN_LENGTH, errors);
        }
    }

    fn clean(&self, errors: &mut ValidationErrors) {
        if self.price.is_some_and(|price| price < 0.0) {
            errors.add("price", "Enter not negative price");
        }
        if self.pages < 0 {
            errors.add("pages", "Enter not negative pages");
        }
        // A missing price counts as zero.
        let total = self.price.unwrap_or_default() + f64::from(self.pages);
        if total != PAGES_PLUS_PRICE {
            errors.add_non_field("Error model, you need that page + price equals 100");
        }
    }
}
