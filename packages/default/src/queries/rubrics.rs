use crate::error::{ModelError, ModelResult};
use crate::models::Model;
use crate::models::bbs::Bb;
use crate::models::rubrics::{NewRubric, Rubric};
use crate::models::validation::Validate;
use sqlx::PgPool;
use tracing::info;

pub async fn insert_rubric(pool: &PgPool, rubric: &NewRubric) -> ModelResult<Rubric> {
    rubric.full_clean()?;
    let row = sqlx::query_as::<_, Rubric>("INSERT INTO rubrics (name) VALUES ($1) RETURNING *")
        .bind(&rubric.name)
        .fetch_one(pool)
        .await
        .map_err(|e| ModelError::from_write(Rubric::MODEL_NAME, e))?;

    info!("✅ inserted rubric: {}", row);
    Ok(row)
}

pub async fn update_rubric(pool: &PgPool, id: i32, rubric: &NewRubric) -> ModelResult<Rubric> {
    rubric.full_clean()?;
    sqlx::query_as::<_, Rubric>("UPDATE rubrics SET name = $2 WHERE id = $1 RETURNING *")
        .bind(id)
        .bind(&rubric.name)
        .fetch_optional(pool)
        .await
        .map_err(|e| ModelError::from_write(Rubric::MODEL_NAME, e))?
        .ok_or(ModelError::NotFound {
            model: Rubric::MODEL_NAME,
            id,
        })
}

pub async fn get_rubric_by_name(pool: &PgPool, name: &str) -> ModelResult<Option<Rubric>> {
    let rubric = sqlx::query_as::<_, Rubric>("SELECT * FROM rubrics WHERE name = $1")
        .bind(name)
        .fetch_optional(pool)
        .await?;
    Ok(rubric)
}

/// Ads filed under a rubric, newest first.
pub async fn list_bbs_for_rubric(pool: &PgPool, rubric_id: i32) -> ModelResult<Vec<Bb>> {
    let bbs = sqlx::query_as::<_, Bb>(
        "SELECT * FROM bbs WHERE rubric_id = $1 ORDER BY published DESC, id DESC",
    )
    .bind(rubric_id)
    .fetch_all(pool)
    .await?;
    Ok(bbs)
}
