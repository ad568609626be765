mod events;
mod functions;
mod paths;
mod schema;
mod snapshot;
mod view;

use clap::{Args, Parser, Subcommand};
use hitlens_core::{Aggregator, AggregatorConfig};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(
    name = "hitlens",
    version,
    about = "Merged execution telemetry from native and browser debug backends",
    long_about = "Hitlens joins the native (server) and browser debug backends of a running \
                  application into one view: which functions exist in a file, how often each ran, \
                  and when scripts come and go. Backends are replayed from recorded JSON fixtures."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the remote paths a local file may be served under
    #[command(
        long_about = "Prints the five candidate remote spellings of a local path, in matching order. \
                            Duplicates are kept."
    )]
    Paths {
        /// Local file path as the editor sees it
        #[arg(value_name = "LOCAL_PATH")]
        local: String,
        /// Project root used to relativize the path
        #[arg(long, value_name = "DIR")]
        project_root: Option<PathBuf>,
    },
    /// Check whether a backend-reported path refers to a local file
    Matches {
        #[arg(value_name = "LOCAL_PATH")]
        local: String,
        #[arg(value_name = "REMOTE_PATH")]
        remote: String,
        #[arg(long, value_name = "DIR")]
        project_root: Option<PathBuf>,
    },
    /// List the functions both backends know in a script
    Functions {
        /// Script path as reported by the backends
        #[arg(value_name = "SCRIPT_PATH")]
        path: String,
        #[command(flatten)]
        backends: BackendArgs,
    },
    /// Poll hit counts from both backends and print the merged result
    #[command(
        long_about = "Polls both backends, merges their hit counts and prints the result as JSON. \
                            Prints \"no data\" when neither backend answered."
    )]
    Snapshot {
        #[command(flatten)]
        backends: BackendArgs,
        /// Number of polls to run
        #[arg(long, default_value_t = 1)]
        polls: u32,
        /// Delay between polls in milliseconds
        #[arg(long, default_value_t = 500)]
        interval_ms: u64,
        /// Render a table instead of JSON
        #[arg(long)]
        table: bool,
    },
    /// Initialize the backends and print relayed script lifecycle events
    Events {
        #[command(flatten)]
        backends: BackendArgs,
    },
    /// Print the JSON schema of backend fixture files
    Schema,
}

/// Where the backends' recorded state and the aggregator config come from.
#[derive(Args, Clone, Default)]
pub struct BackendArgs {
    /// Fixture replayed as the native backend. Omitted: never connects.
    #[arg(long, value_name = "FILE")]
    pub native: Option<PathBuf>,
    /// Fixture replayed as the browser backend. Omitted: never connects.
    #[arg(long, value_name = "FILE")]
    pub browser: Option<PathBuf>,
    /// Aggregator config (JSON). Defaults to ~/.hitlens/config.json
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl BackendArgs {
    pub fn build(&self) -> Result<Arc<Aggregator>, Box<dyn std::error::Error>> {
        let config_path = self.config.clone().unwrap_or_else(default_config_path);
        let config = AggregatorConfig::load_from(&config_path)?;
        let aggregator = hitlens_runtime::build_from_fixtures(
            config,
            self.native.as_deref(),
            self.browser.as_deref(),
        )?;
        Ok(aggregator)
    }
}

pub fn default_config_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".hitlens/config.json")
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let _guard = hitlens_runtime::init_logging("cli", false);

    let rt = tokio::runtime::Runtime::new()?;

    match cli.command {
        Commands::Paths {
            local,
            project_root,
        } => paths::candidates(&local, project_root),
        Commands::Matches {
            local,
            remote,
            project_root,
        } => paths::matches(&local, &remote, project_root),
        Commands::Functions { path, backends } => rt.block_on(functions::run(&path, &backends)),
        Commands::Snapshot {
            backends,
            polls,
            interval_ms,
            table,
        } => rt.block_on(snapshot::run(&backends, polls, interval_ms, table)),
        Commands::Events { backends } => rt.block_on(events::run(&backends)),
        Commands::Schema => schema::run(),
    }
}
