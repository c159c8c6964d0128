//! Generator configuration, read from `typegen.toml`.
//!
//! Every key is optional; missing keys fall back to the layout of the
//! chrome-debug-protocol package (schema and template next to each other,
//! typings written under `typings/`).

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::protocol::ir::CodegenOptions;
use crate::protocol::merge::{LineEnding, MergeOptions};

/// Config filename looked up in the working directory.
pub const CONFIG_FILENAME: &str = "typegen.toml";

/// Boilerplate prepended to the generated document.
pub const DEFAULT_HEADER: &str = r#"// Type definitions for chrome-debug-protocol
// Project: https://github.com/DickvdBrink/chrome-debug-protocol
// Definitions by: Dick van den Brink <https://github.com/DickvdBrink>
// Definitions: https://github.com/borisyankov/DefinitelyTyped

/// <reference path="../node/node.d.ts" />
"#;

/// Input and output locations plus emission settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Protocol description (JSON)
    pub protocol: PathBuf,
    /// Hand-maintained declaration template
    pub template: PathBuf,
    /// Generated declaration file
    pub output: PathBuf,
    pub emit: EmitConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            protocol: PathBuf::from("protocol.json"),
            template: PathBuf::from("main.d.ts"),
            output: PathBuf::from("typings/chrome-debug-protocol/chrome-debug-protocol.d.ts"),
            emit: EmitConfig::default(),
        }
    }
}

/// Names used when emitting and merging declarations.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EmitConfig {
    /// Name the template's module declaration is rewritten to
    pub module_name: String,
    /// Internal module name used by the template
    pub namespace: String,
    /// Class that receives one property per domain
    pub class_name: String,
    /// Generic callback type declared by the template
    pub callback_type: String,
    /// Return type of the event subscription overloads
    pub emitter_type: String,
    pub header: String,
    pub line_ending: LineEnding,
}

impl Default for EmitConfig {
    fn default() -> Self {
        Self {
            module_name: "chrome-debug-protocol".into(),
            namespace: "Chrome".into(),
            class_name: "ChromeDebugger".into(),
            callback_type: "Callback".into(),
            emitter_type: "NodeJS.EventEmitter".into(),
            header: DEFAULT_HEADER.into(),
            line_ending: LineEnding::Auto,
        }
    }
}

impl EmitConfig {
    pub fn codegen_options(&self) -> CodegenOptions<'_> {
        CodegenOptions {
            callback_type: &self.callback_type,
            emitter_type: &self.emitter_type,
        }
    }

    pub fn merge_options(&self) -> MergeOptions<'_> {
        MergeOptions {
            namespace: &self.namespace,
            module_name: &self.module_name,
            class_name: &self.class_name,
            header: &self.header,
            line_ending: self.line_ending,
        }
    }
}

impl Config {
    /// Load the configuration.
    ///
    /// An explicit path must exist. Without one, `typegen.toml` in `cwd` is
    /// used when present, otherwise the defaults. Relative paths inside a
    /// config file are relative to the file's directory.
    pub fn load(explicit: Option<&Path>, cwd: &Path) -> Result<Self> {
        let path = match explicit {
            Some(path) => cwd.join(path),
            None => {
                let candidate = cwd.join(CONFIG_FILENAME);
                if !candidate.is_file() {
                    debug!(cwd = %cwd.display(), "No config file, using defaults.");
                    return Ok(Self::default().relative_to(cwd));
                }
                candidate
            }
        };

        let contents = fs::read_to_string(&path).map_err(|source| Error::Read {
            path: path.clone(),
            source,
        })?;
        let config = Self::from_toml(&contents, &path)?;
        let base = path.parent().unwrap_or(cwd);

        debug!(config_path = %path.display(), "Loaded generator config.");
        Ok(config.relative_to(base))
    }

    /// Parse a config document; `path` is only used for error messages.
    pub fn from_toml(contents: &str, path: &Path) -> Result<Self> {
        toml::from_str(contents).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Anchor relative paths at `base`.
    pub fn relative_to(mut self, base: &Path) -> Self {
        self.protocol = base.join(&self.protocol);
        self.template = base.join(&self.template);
        self.output = base.join(&self.output);
        self
    }
}
