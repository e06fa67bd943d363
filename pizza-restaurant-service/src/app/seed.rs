use pizza_restaurant_service::{config::Config, seed::seed, store::Database};
use tracing::info;

pub async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env();
    let db = Database::new(&config.database_url);
    db.migrate().await?;

    let summary = db.run(seed).await?;

    info!(
        restaurants = summary.restaurants,
        pizzas = summary.pizzas,
        restaurant_pizzas = summary.restaurant_pizzas,
        "database seeded"
    );
    Ok(())
}
