//! CLI module - argument parsing and command dispatch

pub mod args;
pub mod commands;
pub mod helpers;

pub use args::{Cli, Commands, GlobalOpts, OutputFormat};

use tracing_subscriber::EnvFilter;

/// Install the stderr log subscriber
///
/// `STOCKROOM_LOG` takes an `EnvFilter` directive; otherwise the level
/// follows `--verbose`/`--quiet`.
pub fn init_logging(global: &GlobalOpts) {
    let default_level = if global.verbose {
        "debug"
    } else if global.quiet {
        "error"
    } else {
        "warn"
    };

    let filter = EnvFilter::try_from_env("STOCKROOM_LOG")
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    // A second install (e.g. from tests) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
