use crate::{
    errors::ApiError,
    models::satoshis_to_coins,
    node::{RawInput, RawOutput, RawTransaction},
    params::parse_flag,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// How much detail a transformed transaction carries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransformOptions {
    pub no_asm: bool,
    pub no_script_sig: bool,
    pub no_spent: bool,
}

impl TransformOptions {
    pub fn from_flags(
        no_asm: Option<&str>,
        no_script_sig: Option<&str>,
        no_spent: Option<&str>,
    ) -> Self {
        Self {
            no_asm: parse_flag(no_asm),
            no_script_sig: parse_flag(no_script_sig),
            no_spent: parse_flag(no_spent),
        }
    }
}

#[async_trait]
pub trait TransactionTransformer: Send + Sync + 'static {
    async fn transform_transaction(
        &self,
        tx: RawTransaction,
        options: TransformOptions,
        tip: i64,
    ) -> Result<Transaction, ApiError>;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub txid: String,
    pub version: u32,
    pub locktime: u32,
    pub vin: Vec<Input>,
    pub vout: Vec<Output>,
    pub blockhash: Option<String>,
    pub blockheight: i64,
    pub confirmations: i64,
    pub time: Option<i64>,
    pub blocktime: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_coin_base: Option<bool>,
    pub value_out: f64,
    pub size: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_in: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fees: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Input {
    Coinbase(CoinbaseInput),
    Regular(RegularInput),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinbaseInput {
    pub coinbase: String,
    pub sequence: u32,
    pub n: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegularInput {
    pub txid: String,
    pub vout: u32,
    pub sequence: u32,
    pub n: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script_sig: Option<Script>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub addr: Option<String>,
    pub value_sat: i64,
    pub value: f64,
    #[serde(rename = "doubleSpentTxID")]
    pub double_spent_tx_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Script {
    pub hex: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asm: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Output {
    /// Coin amount with exactly eight decimals.
    pub value: String,
    pub n: usize,
    pub script_pub_key: ScriptPubKey,
    #[serde(flatten)]
    pub spent: Option<SpentInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptPubKey {
    pub hex: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asm: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub addresses: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpentInfo {
    pub spent_tx_id: Option<String>,
    pub spent_index: Option<u32>,
    pub spent_height: Option<i64>,
}

/// Reshapes node transactions into the public explorer format.
#[derive(Debug, Clone, Copy, Default)]
pub struct InsightTransformer;

#[async_trait]
impl TransactionTransformer for InsightTransformer {
    async fn transform_transaction(
        &self,
        tx: RawTransaction,
        options: TransformOptions,
        tip: i64,
    ) -> Result<Transaction, ApiError> {
        transform(tx, options, tip)
    }
}

pub fn transform(
    tx: RawTransaction,
    options: TransformOptions,
    tip: i64,
) -> Result<Transaction, ApiError> {
    let vin = if tx.coinbase {
        let first = tx.inputs.first();

        vec![Input::Coinbase(CoinbaseInput {
            coinbase: first.and_then(|i| i.script.clone()).unwrap_or_default(),
            sequence: first.map(|i| i.sequence).unwrap_or_default(),
            n: 0,
        })]
    } else {
        tx.inputs
            .iter()
            .enumerate()
            .map(|(n, input)| transform_input(&tx.hash, n, input, options))
            .collect::<Result<Vec<_>, _>>()?
    };

    let vout = tx
        .outputs
        .iter()
        .enumerate()
        .map(|(n, output)| transform_output(&tx.hash, n, output, options))
        .collect::<Result<Vec<_>, _>>()?;

    let (blockheight, confirmations) = match tx.height {
        Some(height) if height >= 0 => (height, tip - height + 1),
        _ => (-1, 0),
    };

    let (value_in, fees) = if tx.coinbase {
        (None, None)
    } else {
        (
            Some(satoshis_to_coins(tx.input_satoshis)),
            Some(satoshis_to_coins(tx.fee_satoshis)),
        )
    };

    Ok(Transaction {
        txid: tx.hash,
        version: tx.version,
        locktime: tx.locktime,
        vin,
        vout,
        blockhash: tx.block_hash,
        blockheight,
        confirmations,
        time: tx.block_timestamp.or(tx.received_time),
        blocktime: tx.block_timestamp,
        is_coin_base: tx.coinbase.then_some(true),
        value_out: satoshis_to_coins(tx.output_satoshis),
        size: tx.hex.len() / 2,
        value_in,
        fees,
    })
}

fn transform_input(
    txid: &str,
    n: usize,
    input: &RawInput,
    options: TransformOptions,
) -> Result<Input, ApiError> {
    let (Some(prev_txid), Some(vout)) = (input.prev_tx_id.clone(), input.output_index) else {
        return Err(ApiError::transform(format!(
            "Input {n} of {txid} has no previous output"
        )));
    };

    let value_sat = input.satoshis.unwrap_or_default();
    if value_sat < 0 {
        return Err(ApiError::transform(format!(
            "Invalid amount in input {n} of {txid}"
        )));
    }

    let script_sig = (!options.no_script_sig).then(|| Script {
        hex: input.script.clone().unwrap_or_default(),
        asm: if options.no_asm {
            None
        } else {
            input.script_asm.clone()
        },
    });

    Ok(Input::Regular(RegularInput {
        txid: prev_txid,
        vout,
        sequence: input.sequence,
        n,
        script_sig,
        addr: input.address.clone(),
        value_sat,
        value: satoshis_to_coins(value_sat),
        double_spent_tx_id: None,
    }))
}

fn transform_output(
    txid: &str,
    n: usize,
    output: &RawOutput,
    options: TransformOptions,
) -> Result<Output, ApiError> {
    if output.satoshis < 0 {
        return Err(ApiError::transform(format!(
            "Invalid amount in output {n} of {txid}"
        )));
    }

    let spent = (!options.no_spent).then(|| SpentInfo {
        spent_tx_id: output.spent_tx_id.clone(),
        spent_index: output.spent_index,
        spent_height: output.spent_height,
    });

    Ok(Output {
        value: format!("{:.8}", satoshis_to_coins(output.satoshis)),
        n,
        script_pub_key: ScriptPubKey {
            hex: output.script.clone(),
            asm: if options.no_asm {
                None
            } else {
                output.script_asm.clone()
            },
            addresses: output.address.clone().map(|address| vec![address]),
        },
        spent,
    })
}
