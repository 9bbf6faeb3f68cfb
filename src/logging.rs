//! Diagnostic logging to stderr
//!
//! `RUST_LOG` overrides the default filter, e.g.
//! `RUST_LOG=profile_stats=debug,reqwest=debug`.

use tracing_subscriber::EnvFilter;

/// Install the global subscriber. Later calls are no-ops.
pub fn init(verbose: bool) {
    let default_directive = if verbose {
        "profile_stats=debug"
    } else {
        "profile_stats=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init();
}
