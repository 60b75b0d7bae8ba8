use std::sync::Arc;

use anyhow::Result;
use common::{
    database::{DatabaseConfig, health_check, init_pool},
    error::DatabaseError,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

use session_auth::{
    AppState,
    config::ServerConfig,
    repositories::{PgSessionRepository, PgUserRepository},
    routes,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Starting session authentication service");

    let server_config = ServerConfig::from_env()?;

    // Initialize database connection pool
    let db_config = DatabaseConfig::from_env()?;
    let pool = init_pool(&db_config).await?;

    // Check database connectivity
    if health_check(&pool).await? {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(|e| DatabaseError::Migration(e.to_string()))?;
    info!("Database migrations applied");

    let app_state = AppState::new(
        Arc::new(PgSessionRepository::new(pool.clone())),
        Arc::new(PgUserRepository::new(pool)),
        server_config.request_timeout(),
    );

    // Start the web server
    let app = routes::create_router(app_state);

    let address = server_config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!("Session authentication service listening on {}", address);

    axum::serve(listener, app).await?;

    Ok(())
}
