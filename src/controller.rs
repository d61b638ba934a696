use crate::{
    errors::ApiError,
    models::{AddressSummary, BalanceSum, PagedHistory, SummaryField, UtxoView},
    node::{BalanceOptions, HistoryOptions, Node, RawUtxo, SummaryOptions, UtxoOptions},
    params::{ConfirmationBounds, HistoryWindow},
    tasks::TaskGroup,
    transactions::{TransactionTransformer, TransformOptions},
};
use serde_json::Value;
use std::{collections::HashSet, sync::Arc};
use tracing::debug;

/// Address queries behind the HTTP surface.
///
/// Inputs are expected to be validated already. Every operation is a thin
/// orchestration of [`Node`] calls plus reshaping into the public views.
#[derive(Clone)]
pub struct AddressController {
    node: Arc<dyn Node>,
    transformer: Arc<dyn TransactionTransformer>,
}

impl AddressController {
    pub fn new(node: Arc<dyn Node>, transformer: Arc<dyn TransactionTransformer>) -> Self {
        Self { node, transformer }
    }

    pub async fn get_address_summary(
        &self,
        address: &str,
        options: &SummaryOptions,
    ) -> Result<AddressSummary, ApiError> {
        let raw = self.node.get_address_summary(address, options).await?;

        Ok(AddressSummary::from_raw(address, raw))
    }

    /// One raw satoshi amount out of the default summary.
    pub async fn summary_field(&self, address: &str, field: SummaryField) -> Result<i64, ApiError> {
        let summary = self
            .get_address_summary(address, &SummaryOptions::default())
            .await?;

        Ok(field.project(&summary))
    }

    pub async fn balance_sum(&self, addresses: &[String]) -> Result<BalanceSum, ApiError> {
        let balance_options = BalanceOptions {
            without_cache: true,
        };

        let (mempool, confirmed) = tokio::try_join!(
            self.node.get_addresses_mempool_balance(addresses),
            self.node.get_address_balance(addresses, &balance_options),
        )?;

        Ok(BalanceSum::merge(mempool, confirmed))
    }

    pub async fn utxo(&self, address: &str) -> Result<Vec<UtxoView>, ApiError> {
        let utxos = self
            .node
            .get_address_unspent_outputs(&[address.to_string()], &UtxoOptions::default())
            .await?;

        self.transform_utxos(utxos).await
    }

    pub async fn utxo_without_mempool(
        &self,
        addresses: &[String],
    ) -> Result<Vec<UtxoView>, ApiError> {
        self.tolerant_utxos(addresses, false).await
    }

    pub async fn multi_utxo(&self, addresses: &[String]) -> Result<Vec<UtxoView>, ApiError> {
        self.tolerant_utxos(addresses, true).await
    }

    /// UTXO listing where an address unknown to the node is just empty.
    async fn tolerant_utxos(
        &self,
        addresses: &[String],
        query_mempool: bool,
    ) -> Result<Vec<UtxoView>, ApiError> {
        let options = UtxoOptions {
            query_mempool: Some(query_mempool),
        };

        match self
            .node
            .get_address_unspent_outputs(addresses, &options)
            .await
        {
            Ok(utxos) => self.transform_utxos(utxos).await,
            Err(err) if err.is_not_found() => {
                let count = addresses.len();
                debug!("No unspent outputs for {count} address(es): {err}");
                Ok(Vec::new())
            },
            Err(err) => Err(err.into()),
        }
    }

    async fn transform_utxos(&self, utxos: Vec<RawUtxo>) -> Result<Vec<UtxoView>, ApiError> {
        if utxos.is_empty() {
            return Ok(Vec::new());
        }

        let tip = self.node.best_height().await?;

        Ok(utxos
            .into_iter()
            .map(|utxo| UtxoView::from_raw(utxo, tip))
            .collect())
    }

    /// A page of history, each transaction reshaped in parallel.
    ///
    /// The chain tip is read once per page. Repeated txids keep only their
    /// first occurrence and `to` never exceeds the node's total item count.
    pub async fn multi_txs(
        &self,
        addresses: &[String],
        window: HistoryWindow,
        options: TransformOptions,
    ) -> Result<PagedHistory, ApiError> {
        let page = self
            .node
            .get_address_history(addresses, &HistoryOptions::from(window))
            .await?;

        let mut seen = HashSet::new();
        let txs: Vec<_> = page
            .items
            .into_iter()
            .map(|item| item.tx)
            .filter(|tx| seen.insert(tx.hash.clone()))
            .collect();

        let mut group = TaskGroup::new();

        if !txs.is_empty() {
            let tip = self.node.best_height().await?;

            for tx in txs {
                let transformer = self.transformer.clone();
                group.spawn(async move {
                    transformer.transform_transaction(tx, options, tip).await
                });
            }
        }

        let items = group.join().await?;

        Ok(PagedHistory {
            total_items: page.total_count,
            from: window.from,
            to: window.to.min(page.total_count),
            items,
        })
    }

    /// Node reply passed through untouched.
    pub async fn list_unspent(
        &self,
        addresses: &[String],
        bounds: ConfirmationBounds,
    ) -> Result<Value, ApiError> {
        Ok(self
            .node
            .list_unspent(bounds.min_conf, bounds.max_conf, addresses)
            .await?)
    }

    pub async fn create_address(&self) -> Result<Value, ApiError> {
        Ok(self.node.get_new_address().await?)
    }
}
