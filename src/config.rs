use crate::{cli::Args, errors::AppError, types::Network};
use std::net::IpAddr;
use std::time::Duration;
use tracing::Level;
use url::Url;

#[derive(Clone, Debug)]
pub struct Config {
    pub server_address: IpAddr,
    pub server_port: u16,
    /// Normalised: empty for the root, otherwise `/segment[/segment…]`.
    pub api_prefix: String,
    pub log_level: Level,
    pub network: Network,
    pub node: NodeConfig,
    pub no_metrics: bool,
    pub enable_wallet: bool,
    pub sentry_dsn: Option<String>,
}

#[derive(Clone, Debug)]
pub struct NodeConfig {
    pub endpoint: Url,
    pub request_timeout: Duration,
}

impl Config {
    pub fn from_args(args: Args) -> Result<Self, AppError> {
        let endpoint = args
            .node_endpoint
            .ok_or(AppError::Server("--node-endpoint must be set".into()))?;

        let endpoint = Url::parse(&endpoint)
            .map_err(|e| AppError::Server(format!("Invalid --node-endpoint '{endpoint}': {e}")))?;

        if args.node_timeout == 0 {
            return Err(AppError::Server(
                "--node-timeout-sec must be greater than 0".into(),
            ));
        }

        Ok(Config {
            server_address: args.server_address,
            server_port: args.server_port,
            api_prefix: normalize_api_prefix(&args.api_prefix)?,
            log_level: args.log_level.into(),
            network: args.network,
            node: NodeConfig {
                endpoint,
                request_timeout: Duration::from_secs(args.node_timeout),
            },
            no_metrics: args.no_metrics,
            enable_wallet: args.enable_wallet,
            sentry_dsn: args.sentry_dsn.filter(|dsn| !dsn.is_empty()),
        })
    }
}

pub fn normalize_api_prefix(prefix: &str) -> Result<String, AppError> {
    let trimmed = prefix.trim().trim_matches('/');

    if trimmed.is_empty() {
        return Ok(String::new());
    }

    if trimmed.contains(['{', '}', '*', '?', '#']) || trimmed.contains("//") {
        return Err(AppError::Server(format!("Invalid --api-prefix '{prefix}'")));
    }

    Ok(format!("/{trimmed}"))
}
