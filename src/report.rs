//! Plain-text rendering for the CLI commands.

use crate::models::{BalanceRecord, DailySummary, GasBucketStats, TransactionRecord};

pub fn print_transactions(txns: &[TransactionRecord]) {
    println!(
        "{:<16} {:<20} {:<16} {:>12} {:>8} {:<14}",
        "digest", "timestamp", "sender", "gas_used", "success", "status"
    );
    for tx in txns {
        println!(
            "{:<16} {:<20} {:<16} {:>12} {:>8} {:<14}",
            shorten(&tx.digest, 16),
            tx.timestamp.format("%Y-%m-%d %H:%M:%S"),
            shorten(&tx.sender, 16),
            tx.gas_used,
            flag(tx.success),
            tx.effects_status,
        );
    }

    let successful = txns.iter().filter(|t| t.success == Some(true)).count();
    let failed = txns.iter().filter(|t| t.success == Some(false)).count();
    println!();
    println!("total fetched: {}", txns.len());
    println!("successful: {successful}");
    println!("failed: {failed}");
}

pub fn print_balances(rows: &[BalanceRecord]) {
    println!(
        "{:<20} {:>18} {:<24}",
        "owner", "balance_sui", "coin_type"
    );
    for row in rows {
        println!(
            "{:<20} {:>18.4} {:<24}",
            shorten(&row.owner, 20),
            row.balance_sui,
            shorten(&row.coin_type, 24),
        );
    }

    let total: f64 = rows.iter().map(|r| r.balance_sui).sum();
    println!();
    println!("rows: {}, total: {:.2} SUI", rows.len(), total);
}

pub fn print_summaries(days: &[DailySummary]) {
    println!(
        "{:<12} {:>10} {:>10} {:>14} {:>10} {:>8} {:>10}",
        "date", "txns", "senders", "avg_gas", "ok", "failed", "ok_pct"
    );
    for day in days {
        println!(
            "{:<12} {:>10} {:>10} {:>14.1} {:>10} {:>8} {:>10}",
            day.date,
            day.transaction_count,
            day.unique_senders,
            day.avg_gas_used,
            day.successful_txns,
            day.failed_txns,
            day.success_rate_pct
                .map(|p| format!("{p:.2}%"))
                .unwrap_or_else(|| "-".to_string()),
        );
    }

    let total_txns: i64 = days.iter().map(|d| d.transaction_count).sum();
    let total_ok: i64 = days.iter().map(|d| d.successful_txns).sum();
    println!();
    println!("total transactions: {total_txns}");
    if !days.is_empty() {
        println!(
            "average daily transactions: {:.0}",
            total_txns as f64 / days.len() as f64
        );
    }
    if total_txns > 0 {
        println!(
            "overall success rate: {:.2}%",
            total_ok as f64 / total_txns as f64 * 100.0
        );
    }
}

pub fn print_gas_buckets(stats: &[GasBucketStats]) {
    println!(
        "{:<8} {:>8} {:>14} {:>14}",
        "bucket", "count", "avg_gas", "success_rate"
    );
    for s in stats {
        println!(
            "{:<8} {:>8} {:>14.1} {:>14}",
            s.bucket.label(),
            s.count,
            s.avg_gas,
            s.success_rate
                .map(|r| format!("{:.2}", r))
                .unwrap_or_else(|| "-".to_string()),
        );
    }
}

fn shorten(s: &str, max: usize) -> String {
    if s.len() <= max {
        s.to_string()
    } else {
        format!("{}..", &s[..max.saturating_sub(2)])
    }
}

fn flag(success: Option<bool>) -> &'static str {
    match success {
        Some(true) => "true",
        Some(false) => "false",
        None => "-",
    }
}
