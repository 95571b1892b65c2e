//! The serin command-line front end.
//!
//! Loads C# sources from disk, runs the generator over them and reports
//! through the terminal emitter. The `serin` binary is a thin dispatcher over
//! [`commands`].
//!
//! # Debugging
//!
//! - `RUST_LOG=serin_gen=debug`: candidate selection, skipped fields,
//!   per-class summaries
//! - `RUST_LOG=serin_gen=trace`: deferred generic lineage, emission spans
//! - `SERIN_LOG_TREE=1`: render spans as an indented tree

pub mod commands;
mod discover;
mod error;

pub use discover::discover_sources;
pub use error::CliError;

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Does nothing unless `RUST_LOG` is set.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_err() {
            return;
        }
        let filter = EnvFilter::from_default_env();
        if std::env::var("SERIN_LOG_TREE").is_ok_and(|v| v == "1") {
            tracing_subscriber::registry()
                .with(tracing_tree::HierarchicalLayer::new(2).with_targets(true))
                .with(filter)
                .init();
        } else {
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_level(true)
                        .with_writer(std::io::stderr),
                )
                .with(filter)
                .init();
        }
    });
}
