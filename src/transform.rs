//! Derived-column computation over raw result sets.
//!
//! Each function materializes one record shape from a columnar result and
//! appends its derived fields. No filtering, sorting, or dedup happens here;
//! row order is whatever the query guaranteed.

use chrono::{TimeZone, Utc};
use serde_json::Value;

use crate::models::{
    BalanceRecord, DailySummary, GasBucket, GasBucketStats, TransactionRecord,
};
use crate::table::{ResultSet, TableError};

/// 1 SUI = 10^9 MIST.
pub const MIST_PER_SUI: f64 = 1_000_000_000.0;

const GAS_LOW_CEILING: i64 = 1_000_000;
const GAS_MEDIUM_CEILING: i64 = 5_000_000;

pub fn transactions(rs: &ResultSet) -> Result<Vec<TransactionRecord>, TableError> {
    let digest = rs.column("transaction_digest")?;
    let timestamp_ms = rs.column("timestamp_ms")?;
    let sender = rs.column("sender")?;
    let gas_used = rs.column("gas_used")?;
    let gas_price = rs.column("gas_price")?;
    let success = rs.column("success")?;
    let effects_status = rs.column("effects_status")?;
    let checkpoint = rs.column("checkpoint_sequence_number")?;

    let mut out = Vec::with_capacity(rs.num_rows());
    for row in 0..rs.num_rows() {
        let ms = rs.i64_value(row, &timestamp_ms)?;
        let timestamp = Utc.timestamp_millis_opt(ms).single().ok_or_else(|| {
            TableError::TypeMismatch {
                column: "timestamp_ms".to_string(),
                row,
                expected: "epoch milliseconds",
                value: Value::from(ms),
            }
        })?;
        out.push(TransactionRecord {
            digest: rs.str_value(row, &digest)?.to_string(),
            timestamp_ms: ms,
            timestamp,
            sender: rs.str_value(row, &sender)?.to_string(),
            gas_used: rs.str_value(row, &gas_used)?.to_string(),
            gas_price: rs.str_value(row, &gas_price)?.to_string(),
            success: rs.opt_bool_value(row, &success)?,
            effects_status: rs.str_value(row, &effects_status)?.to_string(),
            checkpoint_sequence_number: rs.i64_value(row, &checkpoint)?,
        });
    }
    tracing::info!("materialized {} transaction rows", out.len());
    Ok(out)
}

pub fn balances(rs: &ResultSet) -> Result<Vec<BalanceRecord>, TableError> {
    let owner = rs.column("owner")?;
    let coin_type = rs.column("coin_type")?;
    let balance = rs.column("balance")?;
    let object_id = rs.column("object_id")?;

    let mut out = Vec::with_capacity(rs.num_rows());
    for row in 0..rs.num_rows() {
        let balance_str = rs.str_value(row, &balance)?.to_string();
        let balance_raw = rs.i64_value(row, &balance)?;
        out.push(BalanceRecord {
            owner: rs.str_value(row, &owner)?.to_string(),
            coin_type: rs.str_value(row, &coin_type)?.to_string(),
            balance: balance_str,
            object_id: rs.str_value(row, &object_id)?.to_string(),
            balance_raw,
            balance_sui: balance_raw as f64 / MIST_PER_SUI,
        });
    }
    tracing::info!("materialized {} balance rows", out.len());
    Ok(out)
}

pub fn daily_summaries(rs: &ResultSet) -> Result<Vec<DailySummary>, TableError> {
    let date = rs.column("date")?;
    let count = rs.column("transaction_count")?;
    let senders = rs.column("unique_senders")?;
    let avg_gas = rs.column("avg_gas_used")?;
    let successful = rs.column("successful_txns")?;
    let failed = rs.column("failed_txns")?;

    let mut out = Vec::with_capacity(rs.num_rows());
    for row in 0..rs.num_rows() {
        let transaction_count = rs.i64_value(row, &count)?;
        let successful_txns = rs.i64_value(row, &successful)?;
        out.push(DailySummary {
            date: rs.date_value(row, &date)?,
            transaction_count,
            unique_senders: rs.i64_value(row, &senders)?,
            avg_gas_used: rs.f64_value(row, &avg_gas)?,
            successful_txns,
            failed_txns: rs.i64_value(row, &failed)?,
            success_rate_pct: success_rate_pct(successful_txns, transaction_count),
        });
    }
    tracing::info!("materialized {} daily summary rows", out.len());
    Ok(out)
}

/// None when the day had no transactions at all.
pub fn success_rate_pct(successful: i64, total: i64) -> Option<f64> {
    if total == 0 {
        None
    } else {
        Some(successful as f64 / total as f64 * 100.0)
    }
}

/// Buckets transactions by gas usage and aggregates per bucket.
///
/// Only non-empty buckets are returned, ordered Low, Medium, High. The
/// success rate counts rows flagged `true` against all rows in the bucket.
pub fn bucket_gas_usage(
    txns: &[TransactionRecord],
) -> Result<Vec<GasBucketStats>, std::num::ParseIntError> {
    let mut gas_sums = [0i64; 3];
    let mut counts = [0u64; 3];
    let mut successes = [0u64; 3];

    for tx in txns {
        let gas: i64 = tx.gas_used.parse()?;
        let idx = match classify_gas(gas) {
            GasBucket::Low => 0,
            GasBucket::Medium => 1,
            GasBucket::High => 2,
        };
        gas_sums[idx] += gas;
        counts[idx] += 1;
        if tx.success == Some(true) {
            successes[idx] += 1;
        }
    }

    let buckets = [GasBucket::Low, GasBucket::Medium, GasBucket::High];
    Ok(buckets
        .into_iter()
        .enumerate()
        .filter(|&(idx, _)| counts[idx] > 0)
        .map(|(idx, bucket)| GasBucketStats {
            bucket,
            count: counts[idx],
            avg_gas: gas_sums[idx] as f64 / counts[idx] as f64,
            success_rate: Some(successes[idx] as f64 / counts[idx] as f64),
        })
        .collect())
}

fn classify_gas(gas: i64) -> GasBucket {
    if gas < GAS_LOW_CEILING {
        GasBucket::Low
    } else if gas < GAS_MEDIUM_CEILING {
        GasBucket::Medium
    } else {
        GasBucket::High
    }
}
