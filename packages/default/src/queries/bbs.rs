use crate::error::{ModelError, ModelResult};
use crate::models::Model;
use crate::models::bbs::{Bb, BbKind, NewBb};
use crate::models::validation::Validate;
use sqlx::PgPool;
use tracing::info;

pub async fn insert_bb(pool: &PgPool, bb: &NewBb) -> ModelResult<Bb> {
    bb.full_clean()?;
    let row = sqlx::query_as::<_, Bb>(
        r#"
        INSERT INTO bbs (title, content, price, rubric_id, kind)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(&bb.title)
    .bind(&bb.content)
    .bind(bb.price)
    .bind(bb.rubric_id)
    .bind(bb.kind)
    .fetch_one(pool)
    .await
    .map_err(|e| ModelError::from_write(Bb::MODEL_NAME, e))?;

    info!("✅ inserted ad {}: {}", row.id, row.title);
    Ok(row)
}

/// Replaces the editable fields; `published` keeps its original value.
pub async fn update_bb(pool: &PgPool, id: i32, bb: &NewBb) -> ModelResult<Bb> {
    bb.full_clean()?;
    sqlx::query_as::<_, Bb>(
        r#"
        UPDATE bbs
        SET title = $2, content = $3, price = $4, rubric_id = $5, kind = $6
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(&bb.title)
    .bind(&bb.content)
    .bind(bb.price)
    .bind(bb.rubric_id)
    .bind(bb.kind)
    .fetch_optional(pool)
    .await
    .map_err(|e| ModelError::from_write(Bb::MODEL_NAME, e))?
    .ok_or(ModelError::NotFound {
        model: Bb::MODEL_NAME,
        id,
    })
}

pub async fn list_bbs(pool: &PgPool) -> ModelResult<Vec<Bb>> {
    crate::queries::common::list::<Bb>(pool).await
}

pub async fn list_bbs_by_kind(pool: &PgPool, kind: BbKind) -> ModelResult<Vec<Bb>> {
    let bbs = sqlx::query_as::<_, Bb>(
        "SELECT * FROM bbs WHERE kind = $1 ORDER BY published DESC, id DESC",
    )
    .bind(kind)
    .fetch_all(pool)
    .await?;
    Ok(bbs)
}
