use clap::{Parser, Subcommand};

use crate::client::{DEFAULT_BALANCE_LIMIT, DEFAULT_TX_DAYS, DEFAULT_TX_LIMIT};

#[derive(Parser, Debug)]
#[command(name = "suiscan", version, about = "Sui blockchain data explorer")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch recent transactions, newest first
    RecentTxns {
        /// Days back from now; fractional values allowed
        #[arg(long, default_value_t = DEFAULT_TX_DAYS)]
        days: f64,
        #[arg(long, default_value_t = DEFAULT_TX_LIMIT)]
        limit: u32,
    },
    /// Fetch wallet balances, highest first
    Balances {
        /// Comma-separated owner addresses; top native-coin holders if omitted
        #[arg(long, value_delimiter = ',')]
        addresses: Option<Vec<String>>,
        #[arg(long, default_value_t = DEFAULT_BALANCE_LIMIT)]
        limit: u32,
    },
    /// Daily transaction activity summary
    Summary {
        #[arg(long, default_value_t = DEFAULT_TX_DAYS)]
        days: f64,
    },
    /// Bucket recent transactions by gas usage
    GasBuckets {
        #[arg(long, default_value_t = DEFAULT_TX_DAYS)]
        days: f64,
        #[arg(long, default_value_t = DEFAULT_TX_LIMIT)]
        limit: u32,
    },
    /// Run every fetch with defaults, continuing past failures
    Demo,
}
