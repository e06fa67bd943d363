use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

pub mod app;

#[derive(Parser)]
#[command(version, about = "Restaurants, pizzas and their prices over HTTP")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply migrations and serve the HTTP API
    Serve,
    /// Apply migrations and replace all rows with sample data
    Seed,
}

#[tokio::main]
pub async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match &cli.command {
        Commands::Serve => app::serve::main().await,
        Commands::Seed => app::seed::main().await,
    }
}
