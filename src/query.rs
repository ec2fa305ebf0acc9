//! Query construction for the remote tabular query service.
//!
//! Every user-supplied value travels as a named parameter; the SQL text only
//! ever contains the dataset identifier from configuration.

use chrono::{DateTime, Utc};
use serde::Serialize;

pub const SUI_COIN_TYPE: &str = "0x2::sui::SUI";

const MILLIS_PER_DAY: f64 = 86_400_000.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Query {
    pub sql: String,
    pub params: Vec<QueryParam>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryParam {
    pub name: String,
    #[serde(flatten)]
    pub value: ParamValue,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value")]
pub enum ParamValue {
    #[serde(rename = "INT64")]
    Int64(i64),
    #[serde(rename = "STRING")]
    String(String),
    #[serde(rename = "ARRAY<STRING>")]
    StringArray(Vec<String>),
}

impl QueryParam {
    fn int64(name: &str, value: i64) -> Self {
        Self {
            name: name.to_string(),
            value: ParamValue::Int64(value),
        }
    }

    fn string(name: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            value: ParamValue::String(value.to_string()),
        }
    }

    fn string_array(name: &str, values: &[String]) -> Self {
        Self {
            name: name.to_string(),
            value: ParamValue::StringArray(values.to_vec()),
        }
    }
}

/// Millisecond cutoff for a window of `days` back from `now`, floored.
///
/// Fractional `days` are allowed (0.04 is roughly an hour).
pub fn cutoff_timestamp_ms(now: DateTime<Utc>, days: f64) -> i64 {
    (now.timestamp_millis() as f64 - days * MILLIS_PER_DAY).floor() as i64
}

/// Recent transactions: fixed column set, window filter, newest first.
pub fn recent_transactions(dataset: &str, now: DateTime<Utc>, days: f64, limit: u32) -> Query {
    let sql = format!(
        "SELECT \
         transaction_digest, timestamp_ms, sender, gas_used, gas_price, \
         success, effects_status, checkpoint_sequence_number \
         FROM `{dataset}.transactions` \
         WHERE timestamp_ms >= @cutoff_ms \
         ORDER BY timestamp_ms DESC \
         LIMIT @row_limit"
    );
    Query {
        sql,
        params: vec![
            QueryParam::int64("cutoff_ms", cutoff_timestamp_ms(now, days)),
            QueryParam::int64("row_limit", i64::from(limit)),
        ],
    }
}

/// Wallet balances: either exactly the given owners, or the top holders of
/// the native coin. Balance is compared as INT64, not lexicographically.
pub fn wallet_balances(dataset: &str, addresses: Option<&[String]>, limit: u32) -> Query {
    let (where_clause, filter_param) = match addresses {
        Some(addrs) => (
            "WHERE owner IN UNNEST(@addresses)",
            QueryParam::string_array("addresses", addrs),
        ),
        None => (
            "WHERE coin_type = @coin_type",
            QueryParam::string("coin_type", SUI_COIN_TYPE),
        ),
    };
    let sql = format!(
        "SELECT owner, coin_type, balance, object_id \
         FROM `{dataset}.objects` \
         {where_clause} \
         ORDER BY CAST(balance AS INT64) DESC \
         LIMIT @row_limit"
    );
    Query {
        sql,
        params: vec![filter_param, QueryParam::int64("row_limit", i64::from(limit))],
    }
}

/// Per-day aggregates over the window, most recent date first.
pub fn transaction_summary(dataset: &str, now: DateTime<Utc>, days: f64) -> Query {
    let sql = format!(
        "SELECT \
         DATE(TIMESTAMP_MILLIS(timestamp_ms)) AS date, \
         COUNT(*) AS transaction_count, \
         COUNT(DISTINCT sender) AS unique_senders, \
         AVG(CAST(gas_used AS INT64)) AS avg_gas_used, \
         SUM(CASE WHEN success = true THEN 1 ELSE 0 END) AS successful_txns, \
         SUM(CASE WHEN success = false THEN 1 ELSE 0 END) AS failed_txns \
         FROM `{dataset}.transactions` \
         WHERE timestamp_ms >= @cutoff_ms \
         GROUP BY DATE(TIMESTAMP_MILLIS(timestamp_ms)) \
         ORDER BY date DESC"
    );
    Query {
        sql,
        params: vec![QueryParam::int64("cutoff_ms", cutoff_timestamp_ms(now, days))],
    }
}
