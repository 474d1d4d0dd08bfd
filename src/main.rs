use eventhorizon::{create_app, AppState, Settings};
use migration::{Migrator, MigratorTrait};
use sea_orm::Database;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load .env (if present) so DATABASE_URL from file is visible
    let _ = dotenvy::dotenv();

    let settings = Settings::from_env();
    let db = Database::connect(&settings.database_url).await?;
    Migrator::up(&db, None).await?;

    // Run our server
    let app = create_app(AppState { db });
    let listener = tokio::net::TcpListener::bind(&settings.bind_addr).await?;
    tracing::info!("Server running on http://{}", settings.bind_addr);
    axum::serve(listener, app).await?;
    Ok(())
}
