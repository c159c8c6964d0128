//! cdp-typegen - TypeScript declaration generator binary
//!
//! Reads the protocol description and the declaration template named by
//! `typegen.toml` (or the flags below) and writes the merged typings.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing::debug;

use cdp_typegen::{Config, Error, Outcome};

#[derive(Parser, Debug)]
#[command(
    name = "cdp-typegen",
    version,
    about = "Generate TypeScript typings for the Chrome debugging protocol"
)]
struct Cli {
    #[command(flatten)]
    paths: PathArgs,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, Copy)]
enum Command {
    /// Generate the typings and write them to the output (default)
    Generate,
    /// Fail with a diff when the output is not what would be generated
    Check,
}

#[derive(Args, Debug, Clone, Default)]
struct PathArgs {
    /// Config file (defaults to ./typegen.toml when present)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Protocol description, overriding the config
    #[arg(long, global = true, value_name = "PATH")]
    protocol: Option<PathBuf>,
    /// Declaration template, overriding the config
    #[arg(long, global = true, value_name = "PATH")]
    template: Option<PathBuf>,
    /// Output file, overriding the config
    #[arg(long, global = true, value_name = "PATH")]
    output: Option<PathBuf>,
}

impl PathArgs {
    /// Load the config file and apply the path overrides on top.
    fn load(self) -> Result<Config, Error> {
        let cwd = std::env::current_dir().map_err(|source| Error::Read {
            path: PathBuf::from("."),
            source,
        })?;
        let mut config = Config::load(self.config.as_deref(), &cwd)?;

        if let Some(protocol) = self.protocol {
            config.protocol = cwd.join(protocol);
        }
        if let Some(template) = self.template {
            config.template = cwd.join(template);
        }
        if let Some(output) = self.output {
            config.output = cwd.join(output);
        }

        debug!(
            protocol = %config.protocol.display(),
            template = %config.template.display(),
            output = %config.output.display(),
            "Resolved generator paths."
        );
        Ok(config)
    }
}

fn run(cli: Cli) -> i32 {
    let config = match cli.paths.load() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error: {err}");
            return 1;
        }
    };

    match cli.command.unwrap_or(Command::Generate) {
        Command::Generate => match cdp_typegen::generate_typings(&config) {
            Ok(Outcome::Written) => {
                println!("wrote {}", config.output.display());
                0
            }
            Ok(Outcome::Unchanged) => {
                println!("{} is up to date", config.output.display());
                0
            }
            Err(err) => {
                eprintln!("Error: {err}");
                1
            }
        },
        Command::Check => match cdp_typegen::check_typings(&config) {
            Ok(()) => 0,
            Err(Error::OutOfDate { path, diff }) => {
                print!("{diff}");
                eprintln!("{} is out of date; run generate to refresh it", path.display());
                1
            }
            Err(err) => {
                eprintln!("Error: {err}");
                1
            }
        },
    }
}

fn main() {
    // The binary target is named cdp-typegen too, so one filter covers both crates
    cdp_typegen::init_tracing(&["cdp_typegen"]);

    let code = run(Cli::parse());
    std::process::exit(code);
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_generate_is_the_default() {
        let cli = Cli::try_parse_from(["cdp-typegen", "--output", "out.d.ts"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.paths.output, Some(PathBuf::from("out.d.ts")));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "cdp-typegen",
            "check",
            "--config",
            "gen/typegen.toml",
            "--protocol",
            "protocol.json",
        ])
        .unwrap();
        assert!(matches!(cli.command, Some(Command::Check)));
        assert_eq!(cli.paths.config, Some(PathBuf::from("gen/typegen.toml")));
        assert_eq!(cli.paths.protocol, Some(PathBuf::from("protocol.json")));
        assert_eq!(cli.paths.template, None);
    }
}
