use migration::MigratorTrait;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

/// Fresh in-memory database with all migrations applied.
pub async fn setup_db() -> anyhow::Result<DatabaseConnection> {
    // Each in-memory connection is its own database, so keep exactly one.
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let db = Database::connect(options).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

/// Serves the full application on an ephemeral local port and returns its base URL.
#[allow(dead_code)]
pub async fn spawn_server(db: DatabaseConnection) -> anyhow::Result<String> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let address = listener.local_addr()?;
    let app = taskboard_server::web::create_app(db);
    tokio::spawn(async move {
        if let Err(err) = axum::serve(listener, app).await {
            tracing::error!("Test server stopped: {}", err);
        }
    });
    Ok(format!("http://{}", address))
}
