use crate::models::validation::ValidationErrors;

/// Failures of model reads and writes.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    #[error("{model} matching id={id} does not exist")]
    NotFound { model: &'static str, id: i32 },

    #[error("cannot delete {model} id={id}: it is still referenced by a protected foreign key")]
    Protected { model: &'static str, id: i32 },

    #[error("{model} already exists: {detail}")]
    Unique { model: &'static str, detail: String },

    #[error("{model} refers to a missing or invalid record: {detail}")]
    Integrity { model: &'static str, detail: String },

    #[error("invalid order for author id={author_id}: {reason}")]
    InvalidOrder { author_id: i32, reason: String },

    #[error("unknown content type `{0}`")]
    UnknownContentType(String),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

pub type ModelResult<T> = Result<T, ModelError>;

impl ModelError {
    /// Classifies a failed insert or update of `model`.
    pub fn from_write(model: &'static str, err: sqlx::Error) -> Self {
        if let Some(db_err) = err.as_database_error() {
            let detail = db_err.message().to_string();
            if db_err.is_unique_violation() {
                return ModelError::Unique { model, detail };
            }
            if db_err.is_foreign_key_violation() || db_err.is_check_violation() {
                return ModelError::Integrity { model, detail };
            }
        }
        ModelError::Database(err)
    }

    /// Classifies a failed delete of `model` row `id`.
    pub fn from_delete(model: &'static str, id: i32, err: sqlx::Error) -> Self {
        let protected = err
            .as_database_error()
            .is_some_and(|db_err| db_err.is_foreign_key_violation());
        if protected {
            return ModelError::Protected { model, id };
        }
        ModelError::Database(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn protected_message_names_the_record() {
        let err = ModelError::Protected {
            model: "rubric",
            id: 3,
        };
        assert_eq!(
            err.to_string(),
            "cannot delete rubric id=3: it is still referenced by a protected foreign key"
        );
    }

    #[test]
    fn non_database_errors_pass_through() {
        let err = ModelError::from_delete("rubric", 1, sqlx::Error::RowNotFound);
        assert!(matches!(err, ModelError::Database(sqlx::Error::RowNotFound)));

        let err = ModelError::from_write("book", sqlx::Error::PoolTimedOut);
        assert!(matches!(err, ModelError::Database(sqlx::Error::PoolTimedOut)));
    }

    #[test]
    fn validation_errors_convert() {
        let mut errors = ValidationErrors::new();
        errors.add("title", "This field cannot be blank.");
        let err: ModelError = errors.into();
        assert_eq!(
            err.to_string(),
            "validation failed: title: This field cannot be blank."
        );
    }
}
