// src/logging.rs
// =============================================================================
// Sets up tracing output for the binary.
//
// Diagnostics go to stderr so that `--json` output on stdout stays clean.
// RUST_LOG wins when set; otherwise we log warnings, or everything from this
// crate down to debug with --verbose.
// =============================================================================

use tracing_subscriber::EnvFilter;

pub fn init_logging(verbose: bool) {
    let default_directive = if verbose {
        "warn,source_graph=debug"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    // try_init: a second call (e.g. from tests) is not an error worth crashing on
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
