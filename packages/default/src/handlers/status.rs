use crate::handlers::state::AppState;
use crate::models::bbs::Bb;
use crate::models::books::Book;
use crate::models::rubrics::Rubric;
use crate::queries::common::count;
use axum::{extract::State, response::Json};
use serde_json::{Value, json};
use sqlx::PgPool;

pub async fn status(State(state): State<AppState>) -> Json<Value> {
    let db_status = match sqlx::query("SELECT 1 as health_check")
        .fetch_one(state.pool())
        .await
    {
        Ok(_) => "healthy",
        Err(_) => "unhealthy",
    };

    let (total_rubrics, total_ads, total_books) = get_basic_stats(state.pool()).await;

    Json(json!({
        "service": "bboard",
        "status": "running",
        "database": db_status,
        "stats": {
            "total_rubrics": total_rubrics,
            "total_ads": total_ads,
            "total_books": total_books
        },
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

async fn get_basic_stats(pool: &PgPool) -> (i64, i64, i64) {
    let rubrics = count::<Rubric>(pool).await.unwrap_or(0);
    let ads = count::<Bb>(pool).await.unwrap_or(0);
    let books = count::<Book>(pool).await.unwrap_or(0);
    (rubrics, ads, books)
}
