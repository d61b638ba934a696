//! Request parameter resolution.
//!
//! Numeric parameters are read the lenient way the public API always has:
//! the leading integer of the string is used, anything after it ignored, and
//! a missing, unparseable or zero value falls through to the next source
//! (query string, then request body, then the default).

use crate::node::{HistoryOptions, SummaryOptions};
use serde::Deserialize;

pub const DEFAULT_HISTORY_PAGE_SIZE: i64 = 10;
pub const DEFAULT_MIN_CONF: i64 = 0;
pub const DEFAULT_MAX_CONF: i64 = 9_999_999;

/// A body field that may arrive as a JSON number or as a (form) string.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum ParamValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl ParamValue {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            Self::Float(value) if value.is_finite() => Some(value.trunc() as i64),
            Self::Float(_) => None,
            Self::Text(text) => parse_int(text),
        }
    }
}

/// Parses the leading decimal integer of `input`, skipping leading whitespace.
pub fn parse_int(input: &str) -> Option<i64> {
    let trimmed = input.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());

    if end == 0 {
        return None;
    }

    let magnitude: i64 = digits[..end].parse().ok()?;

    Some(if negative { -magnitude } else { magnitude })
}

/// `true` when the parameter parses to a non-zero integer.
pub fn parse_flag(param: Option<&str>) -> bool {
    param.and_then(parse_int).is_some_and(|value| value != 0)
}

pub fn resolve_int_param(query: Option<&str>, body: Option<&ParamValue>, default: i64) -> i64 {
    query
        .and_then(parse_int)
        .filter(|value| *value != 0)
        .or_else(|| {
            body.and_then(ParamValue::as_int)
                .filter(|value| *value != 0)
        })
        .unwrap_or(default)
}

/// Form or JSON body accepted by the multi-address endpoints.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct AddrsPayload {
    pub addrs: Option<String>,
    pub from: Option<ParamValue>,
    pub to: Option<ParamValue>,
    pub min_conf: Option<ParamValue>,
    pub max_conf: Option<ParamValue>,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct SummaryQuery {
    pub no_tx_list: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
}

impl SummaryQuery {
    /// The `from`/`to` window only applies when both bounds are given.
    pub fn options(&self) -> SummaryOptions {
        fn present(param: &Option<String>) -> Option<&str> {
            param.as_deref().filter(|p| !p.is_empty())
        }

        let window = match (present(&self.from), present(&self.to)) {
            (Some(from), Some(to)) => parse_int(from).zip(parse_int(to)),
            _ => None,
        };

        SummaryOptions {
            no_tx_list: parse_flag(self.no_tx_list.as_deref()),
            from: window.map(|(from, _)| from),
            to: window.map(|(_, to)| to),
        }
    }
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct HistoryQuery {
    pub from: Option<String>,
    pub to: Option<String>,
    pub no_asm: Option<String>,
    pub no_script_sig: Option<String>,
    pub no_spent: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryWindow {
    pub from: i64,
    pub to: i64,
}

impl HistoryWindow {
    pub fn resolve(query: &HistoryQuery, body: Option<&AddrsPayload>) -> Self {
        let from = resolve_int_param(
            query.from.as_deref(),
            body.and_then(|b| b.from.as_ref()),
            0,
        );
        let to = resolve_int_param(
            query.to.as_deref(),
            body.and_then(|b| b.to.as_ref()),
            from.saturating_add(DEFAULT_HISTORY_PAGE_SIZE),
        );

        Self { from, to }
    }
}

impl From<HistoryWindow> for HistoryOptions {
    fn from(window: HistoryWindow) -> Self {
        HistoryOptions {
            from: window.from,
            to: window.to,
        }
    }
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct UnspentQuery {
    pub min_conf: Option<String>,
    pub max_conf: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfirmationBounds {
    pub min_conf: i64,
    pub max_conf: i64,
}

impl ConfirmationBounds {
    pub fn resolve(query: &UnspentQuery, body: Option<&AddrsPayload>) -> Self {
        Self {
            min_conf: resolve_int_param(
                query.min_conf.as_deref(),
                body.and_then(|b| b.min_conf.as_ref()),
                DEFAULT_MIN_CONF,
            ),
            max_conf: resolve_int_param(
                query.max_conf.as_deref(),
                body.and_then(|b| b.max_conf.as_ref()),
                DEFAULT_MAX_CONF,
            ),
        }
    }
}
