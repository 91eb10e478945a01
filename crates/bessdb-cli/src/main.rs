use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod facilities;
mod map;
mod premises;

#[derive(Debug, Parser)]
#[command(name = "bessdb")]
#[command(about = "Certified-premises and health-facility directory tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Browse the certified-premises directory
    Premises(premises::PremisesArgs),
    /// Browse the health-facility directory
    Facilities(facilities::FacilitiesArgs),
    /// Geocode premises inside a viewport and print the resulting markers
    SearchArea(map::SearchAreaArgs),
    /// Resolve one premise by serial number and center on it
    Locate(map::LocateArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = bessdb_core::load_config_from_env()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Premises(args) => premises::run(args, &config).await,
        Commands::Facilities(args) => facilities::run(args, &config).await,
        Commands::SearchArea(args) => map::run_search_area(args, &config).await,
        Commands::Locate(args) => map::run_locate(args, &config).await,
    }
}
