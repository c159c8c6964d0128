//! Common utilities for TypeScript declaration generation.
//!
//! This module provides shared helper functions used across codegen and emission.

/// Indentation unit (4 spaces per level).
pub const INDENT: &str = "    ";

/// Indentation prefix for the given nesting level.
pub fn indent(level: usize) -> String {
    INDENT.repeat(level)
}

/// Check if a property name must be quoted to be a valid key.
///
/// Returns true if the name:
/// - Is empty
/// - Doesn't start with a letter, underscore, or dollar sign
/// - Contains characters other than alphanumeric, underscore, or dollar sign
pub fn needs_quoting(name: &str) -> bool {
    name.is_empty()
        || !name
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        || !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Escape a string for use in JavaScript/TypeScript string literals.
/// Escapes backslashes and double quotes.
pub fn escape_js_string(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Quote a string if needed for use as a property key.
pub fn quote_if_needed(name: &str) -> String {
    if needs_quoting(name) {
        format!("\"{}\"", escape_js_string(name))
    } else {
        name.to_string()
    }
}

/// Capitalize the first letter of a string.
pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

/// Name of the parameters interface for a command: `enable` -> `IEnableParams`.
pub fn params_interface_name(command: &str) -> String {
    format!("I{}Params", capitalize_first(command))
}

/// Name of the payload interface for an event: `loadEventFired` -> `ILoadEventFiredEvent`.
pub fn event_interface_name(event: &str) -> String {
    format!("I{}Event", capitalize_first(event))
}

/// Name of the command-surface interface for a domain: `Network` -> `INetwork`.
pub fn surface_interface_name(domain: &str) -> String {
    format!("I{domain}")
}

/// Render a documentation block at the given level.
///
/// The description is reproduced line by line; the only escaping applied is
/// breaking up a comment terminator.
pub fn doc_block(doc: &str, level: usize) -> String {
    let prefix = indent(level);
    let mut output = format!("{prefix}/**\n");
    for line in doc.replace("*/", "*\\/").lines() {
        if line.is_empty() {
            output.push_str(&format!("{prefix} *\n"));
        } else {
            output.push_str(&format!("{prefix} * {line}\n"));
        }
    }
    output.push_str(&format!("{prefix} */\n"));
    output
}
