use crate::{
    config::Config,
    errors::AppError,
    types::{LogLevel, Network},
};
use clap::{CommandFactory, Parser};
use serde::Serialize;
use std::net::IpAddr;
use std::path::PathBuf;
use twelf::{Layer, config};

const ENV_PREFIX: &str = "INSIGHT_";

#[derive(Parser, Debug, Serialize, Clone)]
#[command(author,
          name = "insight-platform",
          bin_name = "insight-platform",
          version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_REVISION"), ")"),
          about,
          long_about = None)]
#[config]
pub struct Args {
    #[arg(long, default_value = "0.0.0.0")]
    pub server_address: IpAddr,

    #[arg(long, default_value = "3001")]
    pub server_port: u16,

    /// Path under which the address API is mounted
    #[arg(long, default_value = "/insight-api")]
    pub api_prefix: String,

    #[arg(long, default_value = "info")]
    pub log_level: LogLevel,

    #[arg(long, default_value = "mainnet")]
    pub network: Network,

    /// JSON-RPC endpoint of the indexing node
    #[arg(long)]
    pub node_endpoint: Option<String>,

    #[arg(long = "node-timeout-sec", default_value = "30")]
    pub node_timeout: u64,

    #[arg(long)]
    pub no_metrics: bool,

    /// Expose `GET /createaddress`, which asks the node wallet for a new address
    #[arg(long)]
    pub enable_wallet: bool,

    #[arg(long)]
    pub sentry_dsn: Option<String>,

    #[arg(long, help = "Path to an existing configuration file")]
    #[serde(skip_serializing)]
    pub config: Option<PathBuf>,
}

fn get_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("insight-platform").join("config.toml"))
}

impl Args {
    fn parse_args(config_path: Option<PathBuf>) -> Result<Args, AppError> {
        let matches = Self::command().get_matches();

        let mut config_layers = vec![
            Layer::Env(Some(String::from(ENV_PREFIX))),
            Layer::Clap(matches),
        ];

        if let Some(path) = config_path.as_ref().filter(|path| path.exists()) {
            config_layers.insert(0, Layer::Toml(path.clone()));
        }

        Self::with_layers(&config_layers).map_err(|e| match e {
            twelf::Error::Toml(_) => AppError::Server(format!(
                "Failed to parse config file '{}'",
                config_path
                    .as_ref()
                    .map(|path| path.to_string_lossy().to_string())
                    .unwrap_or_default()
            )),
            _ => AppError::Server(e.to_string()),
        })
    }

    /// Resolves the configuration from (in increasing priority) the TOML
    /// file, `INSIGHT_*` environment variables and command line flags.
    pub fn init() -> Result<Config, AppError> {
        let initial_args = Args::parse();

        let config_path = match initial_args.config {
            Some(path) if !path.exists() => {
                return Err(AppError::Server(format!(
                    "Config file '{}' does not exist",
                    path.to_string_lossy()
                )));
            },
            Some(path) => Some(path),
            None => get_config_path(),
        };

        let arguments = Args::parse_args(config_path)?;

        Config::from_args(arguments)
    }
}
