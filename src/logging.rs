//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

/// Filter used by `serve` when `RUST_LOG` is not set.
pub const SERVER_DEFAULT_FILTER: &str = "alemassas=info,tower_http=info";

/// Filter used by one-shot query commands when `RUST_LOG` is not set.
pub const CLI_DEFAULT_FILTER: &str = "alemassas=warn";

/// Install the global tracing subscriber.
///
/// `RUST_LOG` overrides `default_filter`. Output goes to stderr so JSON
/// written to stdout stays parseable. Calling this more than once is a
/// no-op.
pub fn init(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
