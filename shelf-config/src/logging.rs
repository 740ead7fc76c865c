use tracing_subscriber::{
    EnvFilter, layer::SubscriberExt, util::SubscriberInitExt, util::TryInitError,
};

/// Install the global `tracing` subscriber.
///
/// `RUST_LOG` wins over `default_filter`, which normally comes from
/// [`ClientConfig::log_filter`](crate::ClientConfig::log_filter). Logs go to
/// stderr so command output stays clean on stdout.
pub fn init_tracing(default_filter: &str) -> Result<(), TryInitError> {
    tracing_subscriber::registry()
        .with(filter_for(default_filter))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
}

fn filter_for(default_filter: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new(crate::models::DEFAULT_LOG_FILTER))
}
