use std::fs;
use std::io::Write;
use std::path::Path;

use similar::{ChangeTag, TextDiff};
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::protocol;

/// What a generator run did to the output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The output was created or replaced.
    Written,
    /// The output already held the generated document.
    Unchanged,
}

/// Generate the typings described by `config` and write them to its output.
///
/// Nothing is written unless generation succeeds as a whole. The document is
/// written to a temporary file next to the output and then moved into place.
pub fn generate_typings(config: &Config) -> Result<Outcome> {
    let document = render(config)?;

    if fs::read_to_string(&config.output).is_ok_and(|existing| existing == document) {
        info!(output = %config.output.display(), "Typings are up to date.");
        return Ok(Outcome::Unchanged);
    }

    write_atomically(&config.output, &document)?;

    info!(
        output = %config.output.display(),
        bytes = document.len(),
        "Typings generated successfully."
    );
    Ok(Outcome::Written)
}

/// Generate the typings and compare them with the current output, without
/// writing anything. A stale or missing output is an [`Error::OutOfDate`]
/// carrying a line diff.
pub fn check_typings(config: &Config) -> Result<()> {
    let document = render(config)?;
    let existing = match fs::read_to_string(&config.output) {
        Ok(existing) => existing,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => String::new(),
        Err(source) => {
            return Err(Error::Read {
                path: config.output.clone(),
                source,
            });
        }
    };

    let label = config.output.display().to_string();
    match diff_documents(&label, &existing, &document) {
        None => {
            debug!(output = %label, "Typings match the generated document.");
            Ok(())
        }
        Some(diff) => Err(Error::OutOfDate {
            path: config.output.clone(),
            diff,
        }),
    }
}

fn render(config: &Config) -> Result<String> {
    let protocol_json = read(&config.protocol)?;
    let template = read(&config.template)?;

    debug!(
        protocol = %config.protocol.display(),
        template = %config.template.display(),
        protocol_len = protocol_json.len(),
        "Generating typings from protocol description."
    );

    protocol::generate(&protocol_json, &template, &config.emit)
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn write_atomically(path: &Path, contents: &str) -> Result<()> {
    let write_err = |source| Error::Write {
        path: path.to_path_buf(),
        source,
    };

    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).map_err(write_err)?;

    let mut file = NamedTempFile::new_in(parent).map_err(write_err)?;
    file.write_all(contents.as_bytes()).map_err(write_err)?;
    file.persist(path).map_err(|err| write_err(err.error))?;
    Ok(())
}

/// Line diff between the current and generated document, `None` when equal.
pub fn diff_documents(label: &str, current: &str, generated: &str) -> Option<String> {
    if current == generated {
        return None;
    }

    let diff = TextDiff::from_lines(current, generated);
    let mut output = String::new();

    output.push_str(&format!("--- {label} (current)\n"));
    output.push_str(&format!("+++ {label} (generated)\n"));

    for (idx, group) in diff.grouped_ops(3).iter().enumerate() {
        if idx > 0 {
            output.push_str("...\n");
        }
        for op in group {
            for change in diff.iter_changes(op) {
                let sign = match change.tag() {
                    ChangeTag::Delete => "-",
                    ChangeTag::Insert => "+",
                    ChangeTag::Equal => " ",
                };
                output.push_str(sign);
                output.push_str(change.value());
                if change.missing_newline() {
                    output.push('\n');
                }
            }
        }
    }

    Some(output)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_diff_of_equal_documents() {
        assert_eq!(diff_documents("a.d.ts", "x\n", "x\n"), None);
    }

    #[test]
    fn test_diff_marks_changed_lines() {
        let diff = diff_documents("a.d.ts", "one\ntwo\nthree\n", "one\n2\nthree").unwrap();
        assert!(diff.starts_with("--- a.d.ts (current)\n+++ a.d.ts (generated)\n"));
        assert!(diff.contains("-two\n"));
        assert!(diff.contains("+2\n"));
        assert!(diff.contains(" one\n"));
        // Missing trailing newline still ends the line
        assert!(diff.ends_with("+three\n"));
    }

    #[test]
    fn test_write_creates_parent_directories() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("typings/nested/out.d.ts");
        write_atomically(&path, "declare module \"x\" {}\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "declare module \"x\" {}\n");
    }
}
