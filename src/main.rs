use anyhow::Context;
use clap::Parser;

use suiscan::cli::{Cli, Commands};
use suiscan::client::{SuiDataFetcher, DEFAULT_BALANCE_LIMIT, DEFAULT_TX_DAYS};
use suiscan::config::Config;
use suiscan::report;
use suiscan::transform;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    let config = Config::from_env().context("failed to load configuration")?;
    let fetcher = SuiDataFetcher::new(&config).context("failed to create fetcher")?;
    tracing::info!("dataset: {}", fetcher.dataset_id());

    match cli.command {
        Commands::RecentTxns { days, limit } => {
            let txns = fetcher.recent_transactions(days, limit).await?;
            report::print_transactions(&txns);
        }
        Commands::Balances { addresses, limit } => {
            let rows = fetcher.wallet_balances(addresses.as_deref(), limit).await?;
            report::print_balances(&rows);
        }
        Commands::Summary { days } => {
            let days = fetcher.transaction_summary(days).await?;
            report::print_summaries(&days);
        }
        Commands::GasBuckets { days, limit } => {
            let txns = fetcher.recent_transactions(days, limit).await?;
            let stats = transform::bucket_gas_usage(&txns)
                .context("non-numeric gas_used in fetched transactions")?;
            report::print_gas_buckets(&stats);
        }
        Commands::Demo => run_demo(&fetcher).await,
    }

    Ok(())
}

/// Runs each fetch in turn; a failing step is reported and the session moves
/// on to the next independent one.
async fn run_demo(fetcher: &SuiDataFetcher) {
    println!("== recent transactions ==");
    let mut fetched = None;
    match fetcher.recent_transactions(DEFAULT_TX_DAYS, 20).await {
        Ok(txns) => {
            report::print_transactions(&txns);
            fetched = Some(txns);
        }
        Err(e) => eprintln!("error fetching transactions: {e}"),
    }

    println!("\n== top wallet balances ==");
    match fetcher.wallet_balances(None, DEFAULT_BALANCE_LIMIT).await {
        Ok(rows) => report::print_balances(&rows),
        Err(e) => eprintln!("error fetching wallet balances: {e}"),
    }

    println!("\n== daily summary ==");
    match fetcher.transaction_summary(DEFAULT_TX_DAYS).await {
        Ok(days) => report::print_summaries(&days),
        Err(e) => eprintln!("error fetching transaction summary: {e}"),
    }

    if let Some(txns) = fetched {
        println!("\n== gas usage buckets ==");
        match transform::bucket_gas_usage(&txns) {
            Ok(stats) => report::print_gas_buckets(&stats),
            Err(e) => eprintln!("error bucketing gas usage: {e}"),
        }
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();
}
