use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Install the global fmt subscriber. `RUST_LOG` overrides the default
/// `info` filter.
pub(crate) fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok(); // Already set in tests
}
