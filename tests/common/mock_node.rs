use async_trait::async_trait;
use insight_platform::{
    errors::NodeError,
    node::{
        AddressBalance, BalanceOptions, HistoryItem, HistoryOptions, HistoryPage, MempoolBalance,
        Node, RawInput, RawOutput, RawSummary, RawTransaction, RawUtxo, SummaryOptions,
        UtxoOptions,
    },
};
use serde_json::{Value, json};
use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

#[derive(Debug, Clone, PartialEq)]
pub enum NodeCall {
    Summary(String, SummaryOptions),
    MempoolBalance(Vec<String>),
    Balance(Vec<String>, BalanceOptions),
    Utxos(Vec<String>, UtxoOptions),
    History(Vec<String>, HistoryOptions),
    ListUnspent(i64, i64, Vec<String>),
    NewAddress,
    BestHeight,
}

pub struct MockState {
    pub summary: Result<RawSummary, NodeError>,
    pub mempool_balance: Result<MempoolBalance, NodeError>,
    pub balance: Result<AddressBalance, NodeError>,
    pub balance_delay: Option<Duration>,
    pub utxos: Result<Vec<RawUtxo>, NodeError>,
    pub history: Result<HistoryPage, NodeError>,
    pub unspent: Result<Value, NodeError>,
    pub new_address: Result<Value, NodeError>,
    pub height: Result<i64, NodeError>,
    pub calls: Vec<NodeCall>,
}

impl Default for MockState {
    fn default() -> Self {
        Self {
            summary: Ok(RawSummary::default()),
            mempool_balance: Ok(MempoolBalance::default()),
            balance: Ok(AddressBalance::default()),
            balance_delay: None,
            utxos: Ok(vec![]),
            history: Ok(HistoryPage::default()),
            unspent: Ok(json!([])),
            new_address: Err(NodeError::new(-32601, "Method not found")),
            height: Ok(100),
            calls: vec![],
        }
    }
}

/// In-memory [`Node`] with canned replies and a log of every call.
#[derive(Clone, Default)]
pub struct MockNode {
    state: Arc<Mutex<MockState>>,
}

impl MockNode {
    pub fn new() -> Self {
        Self::default()
    }

    fn update(self, f: impl FnOnce(&mut MockState)) -> Self {
        f(&mut self.state.lock().unwrap());
        self
    }

    pub fn with_summary(self, summary: Result<RawSummary, NodeError>) -> Self {
        self.update(|s| s.summary = summary)
    }

    pub fn with_mempool_balance(self, balance: Result<MempoolBalance, NodeError>) -> Self {
        self.update(|s| s.mempool_balance = balance)
    }

    pub fn with_balance(self, balance: Result<AddressBalance, NodeError>) -> Self {
        self.update(|s| s.balance = balance)
    }

    pub fn with_balance_delay(self, delay: Duration) -> Self {
        self.update(|s| s.balance_delay = Some(delay))
    }

    pub fn with_utxos(self, utxos: Result<Vec<RawUtxo>, NodeError>) -> Self {
        self.update(|s| s.utxos = utxos)
    }

    pub fn with_history(self, history: Result<HistoryPage, NodeError>) -> Self {
        self.update(|s| s.history = history)
    }

    pub fn with_unspent(self, unspent: Result<Value, NodeError>) -> Self {
        self.update(|s| s.unspent = unspent)
    }

    pub fn with_new_address(self, address: Result<Value, NodeError>) -> Self {
        self.update(|s| s.new_address = address)
    }

    pub fn with_height(self, height: Result<i64, NodeError>) -> Self {
        self.update(|s| s.height = height)
    }

    pub fn calls(&self) -> Vec<NodeCall> {
        self.state.lock().unwrap().calls.clone()
    }

    fn record<T: Clone>(&self, call: NodeCall, pick: impl FnOnce(&MockState) -> T) -> T {
        let mut state = self.state.lock().unwrap();
        state.calls.push(call);

        pick(&state)
    }
}

#[async_trait]
impl Node for MockNode {
    async fn get_address_summary(
        &self,
        address: &str,
        options: &SummaryOptions,
    ) -> Result<RawSummary, NodeError> {
        self.record(
            NodeCall::Summary(address.to_string(), options.clone()),
            |s| s.summary.clone(),
        )
    }

    async fn get_addresses_mempool_balance(
        &self,
        addresses: &[String],
    ) -> Result<MempoolBalance, NodeError> {
        self.record(NodeCall::MempoolBalance(addresses.to_vec()), |s| {
            s.mempool_balance.clone()
        })
    }

    async fn get_address_balance(
        &self,
        addresses: &[String],
        options: &BalanceOptions,
    ) -> Result<AddressBalance, NodeError> {
        let (balance, delay) = self.record(
            NodeCall::Balance(addresses.to_vec(), options.clone()),
            |s| (s.balance.clone(), s.balance_delay),
        );

        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        balance
    }

    async fn get_address_unspent_outputs(
        &self,
        addresses: &[String],
        options: &UtxoOptions,
    ) -> Result<Vec<RawUtxo>, NodeError> {
        self.record(NodeCall::Utxos(addresses.to_vec(), options.clone()), |s| {
            s.utxos.clone()
        })
    }

    async fn get_address_history(
        &self,
        addresses: &[String],
        options: &HistoryOptions,
    ) -> Result<HistoryPage, NodeError> {
        self.record(
            NodeCall::History(addresses.to_vec(), options.clone()),
            |s| s.history.clone(),
        )
    }

    async fn list_unspent(
        &self,
        min_conf: i64,
        max_conf: i64,
        addresses: &[String],
    ) -> Result<Value, NodeError> {
        self.record(
            NodeCall::ListUnspent(min_conf, max_conf, addresses.to_vec()),
            |s| s.unspent.clone(),
        )
    }

    async fn get_new_address(&self) -> Result<Value, NodeError> {
        self.record(NodeCall::NewAddress, |s| s.new_address.clone())
    }

    async fn best_height(&self) -> Result<i64, NodeError> {
        self.record(NodeCall::BestHeight, |s| s.height.clone())
    }
}

pub fn raw_utxo(address: &str, txid: &str, height: Option<i64>, satoshis: i64) -> RawUtxo {
    RawUtxo {
        address: address.to_string(),
        txid: txid.to_string(),
        output_index: 0,
        script: "76a914".to_string(),
        satoshis,
        height,
        is_stake: None,
        timestamp: None,
    }
}

/// Mined one-input, one-output transaction.
pub fn raw_tx(hash: &str, height: i64) -> RawTransaction {
    RawTransaction {
        hash: hash.to_string(),
        hex: "00".repeat(100),
        version: 1,
        locktime: 0,
        coinbase: false,
        inputs: vec![RawInput {
            prev_tx_id: Some("ff".repeat(32)),
            output_index: Some(0),
            sequence: 0xffff_ffff,
            script: Some("4830".to_string()),
            script_asm: Some("3045".to_string()),
            address: Some("DFrom".to_string()),
            satoshis: Some(200_000_000),
        }],
        outputs: vec![RawOutput {
            satoshis: 199_990_000,
            script: "76a914".to_string(),
            script_asm: Some("OP_DUP".to_string()),
            address: Some("DTo".to_string()),
            spent_tx_id: None,
            spent_index: None,
            spent_height: None,
        }],
        block_hash: Some("bb".repeat(32)),
        height: Some(height),
        block_timestamp: Some(1_600_000_000),
        received_time: None,
        input_satoshis: 200_000_000,
        output_satoshis: 199_990_000,
        fee_satoshis: 10_000,
    }
}

pub fn history(total_count: i64, txs: Vec<RawTransaction>) -> HistoryPage {
    HistoryPage {
        total_count,
        items: txs.into_iter().map(|tx| HistoryItem { tx }).collect(),
    }
}
