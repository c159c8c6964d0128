//! Protocol description to TypeScript declaration generator.
//!
//! This module parses a DevTools-style protocol description and generates
//! TypeScript declarations merged into a hand-maintained template:
//! - One namespace per domain with parameter, object and event interfaces
//! - One command-surface interface per domain (commands and `on` overloads)
//! - One property per domain on the debugger class

mod emitter;
pub mod ir;
pub mod merge;
pub mod schema;

pub use emitter::{emit_fragments, generate};
