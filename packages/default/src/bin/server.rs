use bboard::{
    config::debug_print_config,
    db::{run_migrations, validate_db_connection},
    handlers::state::AppState,
    models::config::BboardConfig,
    server::serve,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env()) // uses RUST_LOG
        .init();

    // Load and validate config
    let cfg = BboardConfig::load()?;
    debug_print_config(&cfg);

    debug!("======== INITIALIZING DATABASE ========");
    let pool = cfg.db_pool().await?;
    validate_db_connection(&pool).await?;
    run_migrations(&pool).await?;

    serve(&cfg, AppState::new(pool)).await
}
