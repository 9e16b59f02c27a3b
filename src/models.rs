//! Data model for trade imports.

use serde::{Deserialize, Serialize};

/// One validated row of trade data, ready for submission.
///
/// Field names serialize in camelCase (`tradeDate`, `netAmount`) to match the
/// trade-ingestion endpoint. `trade_date` is an ISO-8601 string by the time a
/// record is constructed; see [`workflow::normalize`](crate::workflow::normalize).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeRecord {
    pub symbol: String,
    pub quantity: f64,
    pub price: f64,
    pub trade_date: String,
    pub commission: f64,
    pub action: String,
    pub net_amount: f64,
}

/// Ordered set of [`TradeRecord`]s built from a single uploaded file,
/// submitted to the server as one JSON array.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TradeBatch {
    records: Vec<TradeRecord>,
}

impl TradeBatch {
    pub fn new(records: Vec<TradeRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[TradeRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Acknowledgment body returned by the trade-ingestion endpoint on success.
///
/// The service echoes the saved trades (or a summary); the SDK does not
/// constrain its shape.
pub type ServerAck = serde_json::Value;
