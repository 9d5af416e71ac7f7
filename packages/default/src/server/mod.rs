use crate::handlers::state::AppState;
use crate::handlers::{bbs, books, status::status};
use crate::models::config::BboardConfig;
use anyhow::Result;
use axum::Router;
use axum::routing::{get, post};
use tokio::net::TcpListener;
use tracing::info;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(status))
        .route("/bboard/", get(bbs::index).post(bbs::create))
        .route("/bboard/rubrics/", get(bbs::rubrics))
        .route("/bboard/rubric/{id}/", get(bbs::by_rubric))
        .route("/bboard/book/", post(books::create))
        .route("/bboard/book/{id}/", get(books::detail))
        .route("/bboard/author/{id}/books/", get(books::by_author))
        .with_state(state)
}

pub async fn serve(cfg: &BboardConfig, state: AppState) -> Result<()> {
    let server_cfg = cfg.server_config();
    info!("Starting bboard server...");
    info!("Host: {}", server_cfg.host);
    info!("Port: {}", server_cfg.port);

    let listener = TcpListener::bind(server_cfg.bind_address()).await?;
    axum::serve(listener, router(state)).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connect_lazy;
    use crate::models::config::DatabaseConfig;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{Value, json};
    use std::time::Duration;

    // Nothing listens on port 1, so every query fails fast.
    fn unreachable_state() -> AppState {
        let db = DatabaseConfig {
            host: "127.0.0.1".to_string(),
            port: 1,
            acquire_timeout: Duration::from_millis(300),
            ..DatabaseConfig::default()
        };
        AppState::new(connect_lazy(&db).unwrap())
    }

    #[tokio::test]
    async fn invalid_book_is_rejected_before_touching_database() {
        let server = TestServer::new(router(unreachable_state())).unwrap();

        let response = server
            .post("/bboard/book/")
            .json(&json!({"name": "Dune", "pages": 300, "price": 5.0, "author_id": 1}))
            .await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(
            body["errors"]["name"],
            json!(["Ensure this value has at least 5 characters (it has 4)."])
        );
        assert_eq!(
            body["errors"]["__all__"],
            json!(["Error model, you need that page + price equals 100"])
        );
    }

    #[tokio::test]
    async fn invalid_ad_reports_every_field() {
        let server = TestServer::new(router(unreachable_state())).unwrap();

        let response = server.post("/bboard/").json(&json!({"title": ""})).await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["errors"]["title"], json!(["This field cannot be blank."]));
        assert_eq!(body["errors"]["rubric"], json!(["This field cannot be blank."]));
    }

    #[tokio::test]
    async fn database_failures_are_hidden_behind_500() {
        let server = TestServer::new(router(unreachable_state())).unwrap();

        let response = server.get("/bboard/book/1/").await;

        assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = response.json();
        assert_eq!(body["error"], "internal server error");
    }

    #[tokio::test]
    async fn health_reports_unreachable_database() {
        let server = TestServer::new(router(unreachable_state())).unwrap();

        let response = server.get("/health").await;

        assert_eq!(response.status_code(), StatusCode::OK);
        let body: Value = response.json();
        assert_eq!(body["service"], "bboard");
        assert_eq!(body["database"], "unhealthy");
        assert_eq!(body["stats"]["total_books"], 0);
    }
}
