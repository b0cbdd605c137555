use std::io;

use tracing_subscriber::{EnvFilter, fmt};

const DEFAULT_FILTER: &str = "pajaros=info,tower_http=info";

/// Install the global tracing subscriber.
///
/// `RUST_LOG` overrides the default filter. Logs go to stderr so that
/// command output on stdout stays clean. Calling this twice is harmless.
pub fn init(json: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let builder = fmt().with_env_filter(filter).with_writer(io::stderr);
    let _ = if json {
        builder.json().try_init()
    } else {
        builder.compact().try_init()
    };
}
