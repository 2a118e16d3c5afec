use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{error, info};

use redlist_explorer::app::ports::CatalogClientPort;
use redlist_explorer::infra::{ReqwestCatalogClient, RngUniformSource};
use redlist_explorer::{logging, view, Config, Orchestrator, ViewLimit};

#[derive(Parser)]
#[command(name = "redlist_explorer")]
#[command(about = "Explore critically endangered species of a random catalog region")]
#[command(version = "0.1.0")]
struct Cli {
    /// Optional TOML config file (api_url, token, view_limit, timeout_secs)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level for this crate when RUST_LOG is unset
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Pick a random region and show its mammals and critically endangered species
    Explore {
        /// Overrides the configured view limit
        #[arg(long)]
        limit: Option<String>,
        /// Seed for region selection, for reproducible runs
        #[arg(long)]
        seed: Option<u64>,
        /// Print the snapshot as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// List every region in the catalog
    Regions,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();
    let _log_guard = logging::init_logging(&cli.log_level);

    let mut config = Config::load(cli.config.as_deref())?;
    info!(?config, "Loaded configuration");
    let client = ReqwestCatalogClient::new(&config)?;

    match cli.command.unwrap_or(Commands::Explore {
        limit: None,
        seed: None,
        json: false,
    }) {
        Commands::Explore { limit, seed, json } => {
            if limit.is_some() {
                config.view_limit = ViewLimit::parse(limit.as_deref());
            }
            let random = match seed {
                Some(seed) => RngUniformSource::seeded(seed),
                None => RngUniformSource::from_entropy(),
            };

            let mut orchestrator = Orchestrator::new(client, random, config.view_limit);
            let state = orchestrator.run().await;

            if json {
                println!("{}", serde_json::to_string_pretty(state)?);
            } else {
                print!("{}", view::render_text(state));
            }
        }
        Commands::Regions => match client.list_regions().await {
            Ok(regions) => {
                for region in regions {
                    println!("{}\t{}", region.identifier, region.name);
                }
            }
            Err(e) => {
                error!("Failed to list regions: {}", e);
                return Err(e.into());
            }
        },
    }

    Ok(())
}
