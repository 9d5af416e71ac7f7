use crate::error::{ModelError, ModelResult};
use crate::models::Model;
use crate::models::authors::{Author, NewAuthor};
use crate::models::validation::Validate;
use sqlx::PgPool;
use tracing::info;

pub async fn insert_author(pool: &PgPool, author: &NewAuthor) -> ModelResult<Author> {
    author.full_clean()?;
    let row = sqlx::query_as::<_, Author>(
        "INSERT INTO authors (first_name, last_name) VALUES ($1, $2) RETURNING *",
    )
    .bind(&author.first_name)
    .bind(&author.last_name)
    .fetch_one(pool)
    .await
    .map_err(|e| ModelError::from_write(Author::MODEL_NAME, e))?;

    info!("✅ inserted author: {}", row);
    Ok(row)
}

pub async fn update_author(pool: &PgPool, id: i32, author: &NewAuthor) -> ModelResult<Author> {
    author.full_clean()?;
    sqlx::query_as::<_, Author>(
        "UPDATE authors SET first_name = $2, last_name = $3 WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(&author.first_name)
    .bind(&author.last_name)
    .fetch_optional(pool)
    .await
    .map_err(|e| ModelError::from_write(Author::MODEL_NAME, e))?
    .ok_or(ModelError::NotFound {
        model: Author::MODEL_NAME,
        id,
    })
}
