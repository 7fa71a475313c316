pub mod cli;
pub mod config;
pub mod cost;
pub mod error;
pub mod ingest;
pub mod logging;
pub mod output;
pub mod pricing;
pub mod query;
pub mod storage;
pub mod types;
