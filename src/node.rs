pub mod rpc;

use crate::errors::NodeError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Address-indexed queries served by the backing node.
///
/// The node owns all chain state; implementations only transport queries
/// and decode replies. Errors carry the node's own code so callers can tell
/// "not found" (`-5`) apart from real failures.
#[async_trait]
pub trait Node: Send + Sync + 'static {
    async fn get_address_summary(
        &self,
        address: &str,
        options: &SummaryOptions,
    ) -> Result<RawSummary, NodeError>;

    async fn get_addresses_mempool_balance(
        &self,
        addresses: &[String],
    ) -> Result<MempoolBalance, NodeError>;

    async fn get_address_balance(
        &self,
        addresses: &[String],
        options: &BalanceOptions,
    ) -> Result<AddressBalance, NodeError>;

    async fn get_address_unspent_outputs(
        &self,
        addresses: &[String],
        options: &UtxoOptions,
    ) -> Result<Vec<RawUtxo>, NodeError>;

    async fn get_address_history(
        &self,
        addresses: &[String],
        options: &HistoryOptions,
    ) -> Result<HistoryPage, NodeError>;

    async fn list_unspent(
        &self,
        min_conf: i64,
        max_conf: i64,
        addresses: &[String],
    ) -> Result<Value, NodeError>;

    /// Wallet call; nodes without a wallet keep the default.
    async fn get_new_address(&self) -> Result<Value, NodeError> {
        Err(NodeError::new(-32601, "Method not found"))
    }

    /// Height of the current chain tip.
    async fn best_height(&self) -> Result<i64, NodeError>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryOptions {
    pub no_tx_list: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceOptions {
    pub without_cache: bool,
}

/// `query_mempool: None` leaves the node's default in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UtxoOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query_mempool: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryOptions {
    pub from: i64,
    pub to: i64,
}

/// Address summary as indexed by the node, amounts in satoshis.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSummary {
    pub balance: i64,
    pub total_received: i64,
    pub total_spent: i64,
    pub unconfirmed_balance: i64,
    #[serde(default)]
    pub unconfirmed_appearances: u64,
    #[serde(default)]
    pub appearances: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub txids: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MempoolBalance {
    pub unconfirmed_balance: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressBalance {
    pub balance: i64,
    #[serde(default)]
    pub immature: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawUtxo {
    pub address: String,
    pub txid: String,
    pub output_index: u32,
    pub script: String,
    pub satoshis: i64,
    #[serde(default)]
    pub height: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_stake: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryPage {
    pub total_count: i64,
    #[serde(default)]
    pub items: Vec<HistoryItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryItem {
    pub tx: RawTransaction,
}

/// Detailed transaction as returned by the node's history query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTransaction {
    pub hash: String,
    #[serde(default)]
    pub hex: String,
    pub version: u32,
    pub locktime: u32,
    #[serde(default)]
    pub coinbase: bool,
    #[serde(default)]
    pub inputs: Vec<RawInput>,
    #[serde(default)]
    pub outputs: Vec<RawOutput>,
    #[serde(default)]
    pub block_hash: Option<String>,
    #[serde(default)]
    pub height: Option<i64>,
    #[serde(default)]
    pub block_timestamp: Option<i64>,
    #[serde(default)]
    pub received_time: Option<i64>,
    #[serde(default)]
    pub input_satoshis: i64,
    #[serde(default)]
    pub output_satoshis: i64,
    #[serde(default)]
    pub fee_satoshis: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawInput {
    #[serde(default)]
    pub prev_tx_id: Option<String>,
    #[serde(default)]
    pub output_index: Option<u32>,
    pub sequence: u32,
    #[serde(default)]
    pub script: Option<String>,
    #[serde(default)]
    pub script_asm: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub satoshis: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawOutput {
    pub satoshis: i64,
    pub script: String,
    #[serde(default)]
    pub script_asm: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub spent_tx_id: Option<String>,
    #[serde(default)]
    pub spent_index: Option<u32>,
    #[serde(default)]
    pub spent_height: Option<i64>,
}
