pub mod authors;
pub mod bbs;
pub mod books;
pub mod config;
pub mod machines;
pub mod movies;
pub mod notes;
pub mod rubrics;
pub mod users;
pub mod validation;

use serde::Serialize;
use sqlx::FromRow;
use sqlx::postgres::PgRow;

/// Application label every content type is registered under.
pub const APP_LABEL: &str = "bboard";

/// A database-backed entity with its table metadata.
pub trait Model: for<'r> FromRow<'r, PgRow> + Send + Unpin {
    const TABLE: &'static str;
    /// Lowercase name used in the content type registry.
    const MODEL_NAME: &'static str;
    const VERBOSE_NAME: &'static str;
    const VERBOSE_NAME_PLURAL: &'static str;
    /// Human-readable labels for fields that declare one, as `(field, label)`.
    const FIELD_LABELS: &'static [(&'static str, &'static str)] = &[];
    /// SQL `ORDER BY` clause for default listings.
    const ORDERING: &'static str = "id";

    fn id(&self) -> i32;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelInfo {
    pub model: &'static str,
    pub table: &'static str,
    pub verbose_name: &'static str,
    pub verbose_name_plural: &'static str,
    pub field_labels: &'static [(&'static str, &'static str)],
}

impl ModelInfo {
    pub fn of<M: Model>() -> Self {
        Self {
            model: M::MODEL_NAME,
            table: M::TABLE,
            verbose_name: M::VERBOSE_NAME,
            verbose_name_plural: M::VERBOSE_NAME_PLURAL,
            field_labels: M::FIELD_LABELS,
        }
    }
}

/// Every model the content type registry knows about.
pub fn registered_models() -> Vec<ModelInfo> {
    vec![
        ModelInfo::of::<rubrics::Rubric>(),
        ModelInfo::of::<bbs::Bb>(),
        ModelInfo::of::<authors::Author>(),
        ModelInfo::of::<books::Book>(),
        ModelInfo::of::<users::UserAddInfo>(),
        ModelInfo::of::<users::UserInfo>(),
        ModelInfo::of::<users::Word>(),
        ModelInfo::of::<movies::Movie>(),
        ModelInfo::of::<movies::Actor>(),
        ModelInfo::of::<machines::Spare>(),
        ModelInfo::of::<machines::Machine>(),
        ModelInfo::of::<machines::Kit>(),
        ModelInfo::of::<notes::Note>(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn registered_models_have_unique_names_and_tables() {
        let models = registered_models();
        let names: HashSet<_> = models.iter().map(|m| m.model).collect();
        let tables: HashSet<_> = models.iter().map(|m| m.table).collect();
        assert_eq!(names.len(), models.len());
        assert_eq!(tables.len(), models.len());
    }

    #[test]
    fn ads_use_custom_verbose_names() {
        let bb = ModelInfo::of::<bbs::Bb>();
        assert_eq!(bb.verbose_name, "Ad");
        assert_eq!(bb.verbose_name_plural, "Ads");
        assert_eq!(bb.field_labels.len(), 5);
    }

    #[test]
    fn declared_field_labels_are_registered() {
        let books = ModelInfo::of::<books::Book>();
        assert_eq!(books.field_labels, [("name", "Book name")]);

        let add_info = ModelInfo::of::<users::UserAddInfo>();
        assert_eq!(add_info.field_labels, [("city", "Address")]);

        let authors = ModelInfo::of::<authors::Author>();
        assert!(authors.field_labels.contains(&("first_name", "First Name")));

        assert!(ModelInfo::of::<users::Word>().field_labels.is_empty());
    }
}
