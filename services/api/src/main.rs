use anyhow::Result;
use std::sync::Arc;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use api::config::ServerConfig;
use api::jwt::{JwtConfig, TokenService};
use api::routes;
use api::state::AppState;
use api::stores::{PgTaskStore, PgUserStore};
use common::database::{DatabaseConfig, health_check, init_pool};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    info!("Starting API service");

    // Initialize database connection pool
    let db_config = DatabaseConfig::from_env()?;
    let pool = init_pool(&db_config).await?;

    // Check database connectivity
    if health_check(&pool).await? {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    sqlx::migrate!("./migrations").run(&pool).await?;
    info!("Database schema up to date");

    // Initialize token service and stores
    let jwt_config = JwtConfig::from_env()?;
    let tokens = TokenService::new(&jwt_config);

    let users = Arc::new(PgUserStore::new(pool.clone()));
    let tasks = Arc::new(PgTaskStore::new(pool));

    let app_state = AppState::new(users, tasks, tokens);

    // Start the web server
    let app = routes::create_router(app_state);

    let server_config = ServerConfig::from_env()?;
    let listener =
        tokio::net::TcpListener::bind(("0.0.0.0", server_config.port)).await?;
    info!("API service listening on 0.0.0.0:{}", server_config.port);

    axum::serve(listener, app).await?;

    Ok(())
}
