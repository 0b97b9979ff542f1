//! stormstat - displays stats about running Storm topologies.
//!
//! Reports cluster, topology, or component status at increasing
//! granularity by querying the Storm UI REST API.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::{debug, error};

use stormstat::config::Config;
use stormstat::report::{self, ReportMode};
use stormstat::ui::client::UiClient;
use stormstat::version;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(
    name = "stormstat",
    version = VERSION,
    about = "Displays stats about running Storm topologies",
    long_about = "Displays stats about running Storm topologies. With no topology name the \
                  report covers the whole cluster; --name narrows it to one topology, \
                  --components to one spout or bolt, and --all to every component."
)]
struct Cli {
    /// Environment name from the config file
    environment: String,

    /// Path to the JSON cluster config file
    #[arg(short = 'f', long, value_name = "FILE", default_value = "config.json")]
    config: PathBuf,

    /// Topology name
    #[arg(short, long)]
    name: Option<String>,

    /// Topology component (bolt/spout) name
    #[arg(short = 'c', long = "components")]
    component: Option<String>,

    /// All available stats
    #[arg(long)]
    all: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn", env = "STORMSTAT_LOG_LEVEL")]
    log_level: String,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_tracing(&cli.log_level) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = run(&cli).await {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing subscriber.
fn init_tracing(log_level: &str) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .map_err(|e| anyhow::anyhow!("Failed to initialize log filter: {}", e))?;

    fmt().with_env_filter(filter).with_target(false).init();

    Ok(())
}

/// Main application logic.
async fn run(cli: &Cli) -> Result<()> {
    let config = Config::load(&cli.config)?;
    let env = config.env(&cli.environment)?;

    println!("Storm version: {}", env.storm_version);
    version::ensure_supported(&env.storm_version)?;

    let client = UiClient::new(env)?;
    let mode = ReportMode::from_args(cli.name.as_deref(), cli.component.as_deref(), cli.all);
    debug!("Selected report mode: {:?}", mode);

    report::run_report(&client, &mode).await
}
