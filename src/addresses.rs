use crate::{errors::ApiError, types::Network};
use serde::Deserialize;
use thiserror::Error;

/// Version byte followed by a 20-byte hash.
const ADDRESS_PAYLOAD_LEN: usize = 21;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    #[error("Non-base58 or malformed address: {0}")]
    Base58(String),

    #[error("Address must decode to {expected} bytes, got {actual}")]
    Length { expected: usize, actual: usize },

    #[error("Address has mismatched network type.")]
    Network,
}

impl From<bs58::decode::Error> for AddressError {
    fn from(err: bs58::decode::Error) -> Self {
        AddressError::Base58(err.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressKind {
    PubkeyHash,
    ScriptHash,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    pub kind: AddressKind,
    pub hash: [u8; 20],
}

impl Address {
    pub fn parse(input: &str, network: &Network) -> Result<Self, AddressError> {
        let payload = bs58::decode(input).with_check(None).into_vec()?;

        if payload.len() != ADDRESS_PAYLOAD_LEN {
            return Err(AddressError::Length {
                expected: ADDRESS_PAYLOAD_LEN,
                actual: payload.len(),
            });
        }

        let versions = network.address_versions();
        let kind = match payload[0] {
            v if v == versions.pubkey_hash => AddressKind::PubkeyHash,
            v if v == versions.script_hash => AddressKind::ScriptHash,
            _ => return Err(AddressError::Network),
        };

        let mut hash = [0u8; 20];
        hash.copy_from_slice(&payload[1..]);

        Ok(Self { kind, hash })
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct AddressPath {
    pub addr: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct AddressesPath {
    pub addrs: String,
}

pub fn validate_single(address: &str, network: &Network) -> Result<String, ApiError> {
    Address::parse(address, network)
        .map(|_| address.to_string())
        .map_err(ApiError::invalid_address)
}

/// Fails with the missing-address error when the list is empty or starts
/// with an empty entry, otherwise on the first address that does not parse.
pub fn validate_many(addresses: Vec<String>, network: &Network) -> Result<Vec<String>, ApiError> {
    if addresses.first().map_or(true, |first| first.is_empty()) {
        return Err(ApiError::missing_address());
    }

    for address in &addresses {
        validate_single(address, network)?;
    }

    Ok(addresses)
}

/// Comma separated addresses, taken from the body when it carries any.
pub fn split_addresses(body: Option<&str>, path: Option<&str>) -> Vec<String> {
    body.filter(|addrs| !addrs.is_empty())
        .or(path)
        .map(|addrs| addrs.split(',').map(ToString::to_string).collect())
        .unwrap_or_default()
}
