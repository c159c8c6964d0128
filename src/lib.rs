//! Generates TypeScript declarations for a DevTools-style debugging protocol.
//!
//! The protocol description (JSON) is turned into one namespace and one
//! command-surface interface per domain, and merged into a hand-maintained
//! declaration template.

#![forbid(unsafe_code)]
#![deny(unused_must_use, dead_code, missing_debug_implementations)]
#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro
)]

use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

pub mod config;
pub mod error;
mod generator;
pub mod protocol;

pub use config::{Config, EmitConfig};
pub use error::{Error, Result};
pub use generator::{Outcome, check_typings, diff_documents, generate_typings};

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "CDP_TYPEGEN_LOG";

fn is_plain_level(value: &str) -> bool {
    matches!(
        value.to_ascii_lowercase().as_str(),
        "trace" | "debug" | "info" | "warn" | "error" | "off"
    )
}

/// Install the stderr log subscriber.
///
/// `CDP_TYPEGEN_LOG` takes a plain level ("debug") applied to `crates`, or a
/// full filter spec like "cdp_typegen=trace". Defaults to "info".
pub fn init_tracing(crates: &[&str]) {
    let for_crates = |level: &str| {
        crates
            .iter()
            .map(|name| format!("{name}={level}"))
            .collect::<Vec<_>>()
            .join(",")
    };

    let filter = match std::env::var(LOG_ENV) {
        Ok(level) if is_plain_level(&level) => for_crates(&level),
        Ok(spec) => spec,
        Err(_) => for_crates("info"),
    };

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_file(true)
        .with_filter(EnvFilter::new(filter));

    if tracing_subscriber::registry()
        .with(fmt_layer)
        .try_init()
        .is_err()
    {
        eprintln!("Warning: tracing subscriber already initialized");
    }
}
