pub mod cli;
pub mod client;
pub mod config;
pub mod executor;
pub mod models;
pub mod query;
pub mod report;
pub mod table;
pub mod transform;
