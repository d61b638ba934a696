use crate::errors::ApiError;
use axum::Json;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::Level;

pub type ApiResult<T> = Result<Json<T>, ApiError>;

#[derive(Debug, Clone, Copy, ValueEnum, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Mainnet,
    Testnet,
    Regtest,
}

/// Base58check version bytes accepted on a network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressVersions {
    pub pubkey_hash: u8,
    pub script_hash: u8,
}

impl Network {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mainnet => "mainnet",
            Self::Testnet => "testnet",
            Self::Regtest => "regtest",
        }
    }

    pub fn address_versions(&self) -> AddressVersions {
        match self {
            Self::Mainnet => AddressVersions {
                pubkey_hash: 30,
                script_hash: 10,
            },
            Self::Testnet | Self::Regtest => AddressVersions {
                pubkey_hash: 140,
                script_hash: 19,
            },
        }
    }
}

#[derive(Debug, Clone, ValueEnum, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
    Trace,
}

impl From<LogLevel> for Level {
    fn from(log_level: LogLevel) -> Self {
        match log_level {
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
            LogLevel::Trace => Level::TRACE,
        }
    }
}
