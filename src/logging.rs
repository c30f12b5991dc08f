use tracing_subscriber::EnvFilter;

/// Filter used when RUST_LOG is not set
const DEFAULT_FILTER: &str = "photo_gallery=info";

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the default filter. Calling this twice is
/// harmless; the second subscriber is ignored.
pub fn init() {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(DEFAULT_FILTER))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
