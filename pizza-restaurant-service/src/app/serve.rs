use pizza_restaurant_service::{app, config::Config, store::Database, AppState};
use tracing::info;

pub async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env();
    let db = Database::new(&config.database_url);
    db.migrate().await?;
    info!(database_url = db.url(), "migrations applied");

    let router = app(AppState::new(db));

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    info!("Pizza restaurant service listening on {}", listener.local_addr()?);

    axum::serve(listener, router).await?;

    Ok(())
}
