use super::{
    AddressBalance, BalanceOptions, HistoryOptions, HistoryPage, MempoolBalance, Node, RawSummary,
    RawUtxo, SummaryOptions, UtxoOptions,
};
use crate::{
    config::NodeConfig,
    errors::{AppError, NodeError},
};
use async_trait::async_trait;
use metrics::counter;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::{Value, json};
use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};
use tracing::{debug, error, warn};

#[derive(Serialize)]
struct RpcRequest<'a, P> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: P,
}

#[derive(Deserialize)]
struct RpcResponse<T> {
    result: Option<T>,
    error: Option<RpcErrorBody>,
}

#[derive(Deserialize)]
struct RpcErrorBody {
    code: i64,
    message: String,
}

/// JSON-RPC 2.0 client for the indexing node.
///
/// Every query is a `POST` of `{"method": <camelCase name>, "params": [...]}`
/// to the configured endpoint. Replies carrying an `error` object become
/// [`NodeError`]s with the node's code; transport and decoding failures
/// become code-less [`NodeError`]s.
#[derive(Clone)]
pub struct RpcNode {
    endpoint: Url,
    client: Client,
    next_id: Arc<AtomicU64>,
}

impl RpcNode {
    pub fn new(config: &NodeConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| AppError::Node(format!("failed to build client: {e}")))?;

        Ok(Self {
            endpoint: config.endpoint.clone(),
            client,
            next_id: Arc::new(AtomicU64::new(1)),
        })
    }

    pub async fn call<P, T>(&self, method: &'static str, params: P) -> Result<T, NodeError>
    where
        P: Serialize + Send,
        T: DeserializeOwned,
    {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let request = RpcRequest {
            jsonrpc: "2.0",
            id,
            method,
            params,
        };

        counter!("node_requests_total", "method" => method).increment(1);
        debug!(method, id, endpoint = %self.endpoint, "Node RPC call");

        let result = self.send(&request).await;

        if let Err(err) = &result {
            counter!("node_request_failures_total", "method" => method).increment(1);
            warn!(method, id, code = ?err.code, "Node RPC call failed: {}", err.message);
        }

        result
    }

    async fn send<P, T>(&self, request: &RpcRequest<'_, P>) -> Result<T, NodeError>
    where
        P: Serialize,
        T: DeserializeOwned,
    {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body_text = response.text().await?;

        let reply: RpcResponse<T> = serde_json::from_str(&body_text).map_err(|e| {
            error!(
                method = request.method,
                status = %status,
                response_body = %body_text,
                error = %e,
                "Node returned an unreadable response"
            );
            NodeError::from(e)
        })?;

        match reply {
            RpcResponse {
                error: Some(error), ..
            } => Err(NodeError::new(error.code, error.message)),
            RpcResponse {
                result: Some(result),
                ..
            } => Ok(result),
            RpcResponse { result: None, .. } => Ok(serde_json::from_value(Value::Null)?),
        }
    }
}

#[async_trait]
impl Node for RpcNode {
    async fn get_address_summary(
        &self,
        address: &str,
        options: &SummaryOptions,
    ) -> Result<RawSummary, NodeError> {
        self.call("getAddressSummary", json!([address, options]))
            .await
    }

    async fn get_addresses_mempool_balance(
        &self,
        addresses: &[String],
    ) -> Result<MempoolBalance, NodeError> {
        self.call("getAddressesMempoolBalance", json!([addresses, {}]))
            .await
    }

    async fn get_address_balance(
        &self,
        addresses: &[String],
        options: &BalanceOptions,
    ) -> Result<AddressBalance, NodeError> {
        self.call("getAddressBalance", json!([addresses, options]))
            .await
    }

    async fn get_address_unspent_outputs(
        &self,
        addresses: &[String],
        options: &UtxoOptions,
    ) -> Result<Vec<RawUtxo>, NodeError> {
        self.call("getAddressUnspentOutputs", json!([addresses, options]))
            .await
    }

    async fn get_address_history(
        &self,
        addresses: &[String],
        options: &HistoryOptions,
    ) -> Result<HistoryPage, NodeError> {
        self.call("getAddressHistory", json!([addresses, options]))
            .await
    }

    async fn list_unspent(
        &self,
        min_conf: i64,
        max_conf: i64,
        addresses: &[String],
    ) -> Result<Value, NodeError> {
        self.call("listUnspent", json!([min_conf, max_conf, addresses]))
            .await
    }

    async fn get_new_address(&self) -> Result<Value, NodeError> {
        self.call("getNewAddress", json!([])).await
    }

    async fn best_height(&self) -> Result<i64, NodeError> {
        self.call("getBestHeight", json!([])).await
    }
}
