use crate::{
    node::{AddressBalance, MempoolBalance, RawSummary, RawUtxo},
    transactions::Transaction,
};
use serde::{Deserialize, Serialize};

pub const SATOSHIS_PER_COIN: f64 = 100_000_000.0;

pub fn satoshis_to_coins(satoshis: i64) -> f64 {
    satoshis as f64 / SATOSHIS_PER_COIN
}

/// `GET /addr/{addr}` response.
///
/// The `*Apperances` spelling is what existing clients read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressSummary {
    pub addr_str: String,
    pub balance: f64,
    pub balance_sat: i64,
    pub total_received: f64,
    pub total_received_sat: i64,
    pub total_sent: f64,
    pub total_sent_sat: i64,
    pub unconfirmed_balance: f64,
    pub unconfirmed_balance_sat: i64,
    pub unconfirmed_tx_apperances: u64,
    pub tx_apperances: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transactions: Option<Vec<String>>,
}

impl AddressSummary {
    pub fn from_raw(address: &str, raw: RawSummary) -> Self {
        Self {
            addr_str: address.to_string(),
            balance: satoshis_to_coins(raw.balance),
            balance_sat: raw.balance,
            total_received: satoshis_to_coins(raw.total_received),
            total_received_sat: raw.total_received,
            total_sent: satoshis_to_coins(raw.total_spent),
            total_sent_sat: raw.total_spent,
            unconfirmed_balance: satoshis_to_coins(raw.unconfirmed_balance),
            unconfirmed_balance_sat: raw.unconfirmed_balance,
            unconfirmed_tx_apperances: raw.unconfirmed_appearances,
            tx_apperances: raw.appearances,
            transactions: raw.txids,
        }
    }
}

/// Scalar projections of [`AddressSummary`] served by their own routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryField {
    BalanceSat,
    TotalReceivedSat,
    TotalSentSat,
    UnconfirmedBalanceSat,
}

impl SummaryField {
    pub fn project(&self, summary: &AddressSummary) -> i64 {
        match self {
            Self::BalanceSat => summary.balance_sat,
            Self::TotalReceivedSat => summary.total_received_sat,
            Self::TotalSentSat => summary.total_sent_sat,
            Self::UnconfirmedBalanceSat => summary.unconfirmed_balance_sat,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UtxoView {
    pub address: String,
    pub txid: String,
    pub vout: u32,
    pub script_pub_key: String,
    pub amount: f64,
    pub satoshis: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_stake: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<i64>,
    pub confirmations: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ts: Option<i64>,
}

impl UtxoView {
    /// Unmined outputs (no height, or a height <= 0) have no confirmations.
    /// A zero timestamp is left out.
    pub fn from_raw(raw: RawUtxo, tip: i64) -> Self {
        let height = raw.height.filter(|height| *height > 0);

        Self {
            address: raw.address,
            txid: raw.txid,
            vout: raw.output_index,
            script_pub_key: raw.script,
            amount: satoshis_to_coins(raw.satoshis),
            satoshis: raw.satoshis,
            is_stake: raw.is_stake,
            height,
            confirmations: height.map_or(0, |height| tip - height + 1),
            ts: raw.timestamp.filter(|ts| *ts != 0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedHistory {
    pub total_items: i64,
    pub from: i64,
    pub to: i64,
    pub items: Vec<Transaction>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceSum {
    pub unconfirmed_balance: i64,
    pub balance: i64,
    pub immature: i64,
}

impl BalanceSum {
    pub fn merge(mempool: MempoolBalance, confirmed: AddressBalance) -> Self {
        Self {
            unconfirmed_balance: mempool.unconfirmed_balance,
            balance: confirmed.balance,
            immature: confirmed.immature,
        }
    }
}
