use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use apf::cli::{self, Cli, Command, FetchArgs};
use apf::config::{self, Config};
use apf::ingest::{self, IngestOptions};
use apf::pricing::{AwsPriceList, ProductFilters};
use apf::query;
use apf::storage::{MongoConnector, StoreConnector};
use apf::{logging, output};

async fn fetch(args: FetchArgs, config: &Config, mongo_uri: String) -> Result<()> {
    // Unset means the SDK's own default profile resolution.
    let profile = args.profile.clone().or_else(|| config.profile.clone());
    let region = args
        .region
        .clone()
        .or_else(|| config.region.clone())
        .unwrap_or_else(|| config::DEFAULT_API_REGION.to_string());
    let price_region = args
        .price_region
        .clone()
        .or_else(|| config.price_region.clone())
        .unwrap_or_else(|| config::DEFAULT_PRICE_REGION.to_string());

    let mut options = IngestOptions::new(ProductFilters::new(price_region));
    if let Some(deadline) = args
        .timeout_secs
        .map(std::time::Duration::from_secs)
        .or_else(|| config.timeout())
    {
        options.deadline = deadline;
    }
    if let Some(n) = args.max_in_flight.or(config.max_in_flight) {
        options.max_in_flight = n;
    }

    let source = AwsPriceList::connect(profile.as_deref(), &region).await;
    let connector = MongoConnector::new(mongo_uri);
    let services = args.services();

    let summary = ingest::ingest_all(Arc::new(source), Arc::new(connector), &services, &options)
        .await
        .context("Failed to fetch AWS Price List data")?;

    let total: usize = summary.ingested.iter().map(|(_, n)| n).sum();
    info!(
        services = summary.ingested.len(),
        records = total,
        "completed saving AWS Price List data to MongoDB"
    );
    Ok(())
}

async fn price(
    instance: cli::InstanceArgs,
    service: cli::PriceCommand,
    format: &cli::OutputFormat,
    mongo_uri: String,
) -> Result<()> {
    let query = service.into_query(instance);

    let store = MongoConnector::new(mongo_uri)
        .connect()
        .await
        .context("Failed to connect to MongoDB")?;
    let found = query::lookup(store.as_ref(), &query).await;
    store.close().await;
    let rows = found.context("Failed to find prices")?;

    if rows.is_empty() {
        eprintln!("No matching prices found.");
        return Ok(());
    }

    match format {
        cli::OutputFormat::Json => output::print_json(&rows)?,
        cli::OutputFormat::Table => output::print_table(query.service(), &rows),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_tracing("apf=info")?;

    let config = config::load_config();
    let mongo_uri = cli
        .mongo_uri
        .clone()
        .or_else(|| config.mongo_uri.clone())
        .unwrap_or_else(|| config::DEFAULT_MONGO_URI.to_string());

    match cli.command {
        Command::Fetch(args) => fetch(args, &config, mongo_uri).await,
        Command::Price { instance, service } => {
            price(instance, service, &cli.format, mongo_uri).await
        }
    }
}
