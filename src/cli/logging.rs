//! Logging and tracing initialization.

use tracing_subscriber::{fmt, EnvFilter};

/// Filter used when `RUST_LOG` is unset
pub fn default_level(verbose: bool) -> &'static str {
    if verbose {
        "capcast=debug"
    } else {
        "warn"
    }
}

/// Install the stderr subscriber. `RUST_LOG` overrides the verbosity flag.
pub fn init_logging(verbose: bool) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level(verbose)));

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}
