use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

/// One row from the `transactions` table, plus the decoded timestamp.
///
/// `gas_used` and `gas_price` are kept as the integer-as-string values the
/// remote service returns; `timestamp_ms` is retained alongside the decoded
/// `timestamp`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionRecord {
    pub digest: String,
    pub timestamp_ms: i64,
    pub timestamp: DateTime<Utc>,
    pub sender: String,
    pub gas_used: String,
    pub gas_price: String,
    /// None when the row carries neither `true` nor `false`.
    pub success: Option<bool>,
    pub effects_status: String,
    pub checkpoint_sequence_number: i64,
}

/// One row from the `objects` table with the balance parsed and scaled.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BalanceRecord {
    pub owner: String,
    pub coin_type: String,
    /// Raw smallest-unit amount as returned by the service.
    pub balance: String,
    pub object_id: String,
    pub balance_raw: i64,
    /// `balance_raw / 1e9`, float division (1 SUI = 10^9 MIST).
    pub balance_sui: f64,
}

/// Daily aggregate over the transactions table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub transaction_count: i64,
    pub unique_senders: i64,
    pub avg_gas_used: f64,
    pub successful_txns: i64,
    pub failed_txns: i64,
    /// None on days with zero transactions.
    pub success_rate_pct: Option<f64>,
}

/// Gas-usage bucket for the demo analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum GasBucket {
    Low,
    Medium,
    High,
}

impl GasBucket {
    pub fn label(self) -> &'static str {
        match self {
            GasBucket::Low => "Low",
            GasBucket::Medium => "Medium",
            GasBucket::High => "High",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GasBucketStats {
    pub bucket: GasBucket,
    pub count: u64,
    pub avg_gas: f64,
    pub success_rate: Option<f64>,
}
