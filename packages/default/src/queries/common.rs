use crate::error::{ModelError, ModelResult};
use crate::models::Model;
use sqlx::PgPool;
use tracing::{debug, info};

pub async fn get_by_id<M: Model>(pool: &PgPool, id: i32) -> ModelResult<M> {
    debug!("🔍 fetching {} id={}", M::MODEL_NAME, id);
    let sql = format!("SELECT * FROM {} WHERE id = $1", M::TABLE);
    sqlx::query_as::<_, M>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(ModelError::NotFound {
            model: M::MODEL_NAME,
            id,
        })
}

/// Like [`get_by_id`] but a missing row is `None` rather than an error.
pub async fn find_by_id<M: Model>(pool: &PgPool, id: i32) -> ModelResult<Option<M>> {
    match get_by_id::<M>(pool, id).await {
        Ok(row) => Ok(Some(row)),
        Err(ModelError::NotFound { .. }) => Ok(None),
        Err(e) => Err(e),
    }
}

/// All rows in the model's default ordering.
pub async fn list<M: Model>(pool: &PgPool) -> ModelResult<Vec<M>> {
    let sql = format!("SELECT * FROM {} ORDER BY {}", M::TABLE, M::ORDERING);
    let rows = sqlx::query_as::<_, M>(&sql).fetch_all(pool).await?;
    Ok(rows)
}

pub async fn count<M: Model>(pool: &PgPool) -> ModelResult<i64> {
    let sql = format!("SELECT COUNT(*) FROM {}", M::TABLE);
    let count: (i64,) = sqlx::query_as(&sql).fetch_one(pool).await?;
    Ok(count.0)
}

/// Deletes one row. Rows still referenced through a RESTRICT foreign key
/// fail with [`ModelError::Protected`]; CASCADE references go with it.
pub async fn delete<M: Model>(pool: &PgPool, id: i32) -> ModelResult<()> {
    let sql = format!("DELETE FROM {} WHERE id = $1", M::TABLE);
    let deleted = sqlx::query(&sql)
        .bind(id)
        .execute(pool)
        .await
        .map_err(|e| ModelError::from_delete(M::MODEL_NAME, id, e))?
        .rows_affected();

    if deleted == 0 {
        return Err(ModelError::NotFound {
            model: M::MODEL_NAME,
            id,
        });
    }

    info!("🗑️ deleted {} id={}", M::MODEL_NAME, id);
    Ok(())
}
