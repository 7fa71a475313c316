use tracing_subscriber::{fmt::SubscriberBuilder, EnvFilter};

/// Install the global subscriber. `RUST_LOG` overrides `default_filter`.
/// Logs go to stderr; stdout is reserved for results.
pub fn init_tracing(default_filter: &str) -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    SubscriberBuilder::default()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))
}
