//! The fetcher: builds a query, runs it remotely, materializes records.
//!
//! Every operation is a single linear pass with no state between calls; two
//! identical calls against an unchanged dataset return identical tables.

use chrono::Utc;

use crate::config::Config;
use crate::executor::{ExecutorError, QueryClient};
use crate::models::{BalanceRecord, DailySummary, TransactionRecord};
use crate::query;
use crate::table::TableError;
use crate::transform;

pub const DEFAULT_TX_DAYS: f64 = 7.0;
pub const DEFAULT_TX_LIMIT: u32 = 100;
pub const DEFAULT_BALANCE_LIMIT: u32 = 50;

pub struct SuiDataFetcher {
    client: QueryClient,
    dataset_id: String,
}

#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    #[error(transparent)]
    Executor(#[from] ExecutorError),
    #[error(transparent)]
    Table(#[from] TableError),
}

impl SuiDataFetcher {
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        let client = QueryClient::new(&config.query_url, &config.credentials)?;
        Ok(Self {
            client,
            dataset_id: config.dataset_id.clone(),
        })
    }

    pub fn dataset_id(&self) -> &str {
        &self.dataset_id
    }

    /// Transactions from the last `days` days, newest first, at most `limit`
    /// rows.
    pub async fn recent_transactions(
        &self,
        days: f64,
        limit: u32,
    ) -> Result<Vec<TransactionRecord>, FetchError> {
        tracing::info!("fetching recent transactions (last {days} days, limit {limit})");
        let q = query::recent_transactions(&self.dataset_id, Utc::now(), days, limit);
        let rs = self.client.execute(&q).await?;
        Ok(transform::transactions(&rs)?)
    }

    /// Balances for the given owners, or the top native-coin holders when no
    /// addresses are supplied. Highest balance first.
    pub async fn wallet_balances(
        &self,
        addresses: Option<&[String]>,
        limit: u32,
    ) -> Result<Vec<BalanceRecord>, FetchError> {
        match addresses {
            Some(addrs) => {
                tracing::info!("fetching balances for {} specific addresses", addrs.len())
            }
            None => tracing::info!("fetching top {limit} wallet balances"),
        }
        let q = query::wallet_balances(&self.dataset_id, addresses, limit);
        let rs = self.client.execute(&q).await?;
        Ok(transform::balances(&rs)?)
    }

    /// Daily activity aggregates over the last `days` days, most recent date
    /// first.
    pub async fn transaction_summary(&self, days: f64) -> Result<Vec<DailySummary>, FetchError> {
        tracing::info!("fetching transaction summary for last {days} days");
        let q = query::transaction_summary(&self.dataset_id, Utc::now(), days);
        let rs = self.client.execute(&q).await?;
        Ok(transform::daily_summaries(&rs)?)
    }
}
