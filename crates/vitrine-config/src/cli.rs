#![forbid(unsafe_code)]

//! Command-line argument parsing for the config generator.
//!
//! Parses args by hand; the only flags are an output path and the example
//! switch. `VITRINE_CONFIG_OUT` overrides the default output path.

use std::env;
use std::path::PathBuf;
use std::process;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment override for `--out`.
pub const OUT_VAR: &str = "VITRINE_CONFIG_OUT";

/// Output path when neither `--out` nor [`OUT_VAR`] is given.
pub const DEFAULT_OUT: &str = "config.js";

const HELP_TEXT: &str = "\
vitrine-config: generate the site's config.js from environment variables

USAGE:
    vitrine-config [OPTIONS]

OPTIONS:
    --out=PATH       Output file (default: config.js)
    --example        Write the placeholder template instead
    --help, -h       Show this help message
    --version, -V    Show version

ENVIRONMENT VARIABLES:
    GOOGLE_SCRIPT_URL        Apps Script web-app URL (required)
    VITE_GOOGLE_SCRIPT_URL   Fallback for GOOGLE_SCRIPT_URL
    GOOGLE_ANALYTICS_ID      Google Analytics ID (optional)
    FACEBOOK_PIXEL_ID        Facebook Pixel ID (optional)
    VITRINE_CONFIG_OUT       Override --out
    VITRINE_LOG              Log filter (default: info)";

/// Parsed command-line options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opts {
    /// Where to write.
    pub out: PathBuf,
    /// Write the placeholder template.
    pub example: bool,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            out: PathBuf::from(DEFAULT_OUT),
            example: false,
        }
    }
}

/// What the command line asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Generate with these options.
    Run(Opts),
    /// Print help.
    Help,
    /// Print the version.
    Version,
}

impl Opts {
    /// Parse the process arguments and environment, printing help, version
    /// or usage errors and exiting where appropriate.
    pub fn parse() -> Self {
        let args = env::args().skip(1);
        match Self::parse_from(args, env::var(OUT_VAR).ok()) {
            Ok(Action::Run(opts)) => opts,
            Ok(Action::Help) => {
                println!("{HELP_TEXT}");
                process::exit(0);
            }
            Ok(Action::Version) => {
                println!("vitrine-config {VERSION}");
                process::exit(0);
            }
            Err(msg) => {
                eprintln!("{msg}");
                eprintln!("Run with --help for usage information.");
                process::exit(2);
            }
        }
    }

    /// Parse `args` with `env_out` standing in for [`OUT_VAR`].
    ///
    /// Flags override the environment.
    ///
    /// # Errors
    ///
    /// A message naming the unknown or malformed argument.
    pub fn parse_from(
        args: impl IntoIterator<Item = String>,
        env_out: Option<String>,
    ) -> Result<Action, String> {
        let mut opts = Self::default();
        if let Some(val) = env_out
            && !val.trim().is_empty()
        {
            opts.out = PathBuf::from(val.trim());
        }

        for arg in args {
            match arg.as_str() {
                "--help" | "-h" => return Ok(Action::Help),
                "--version" | "-V" => return Ok(Action::Version),
                "--example" => opts.example = true,
                other => match other.strip_prefix("--out=") {
                    Some("") => return Err("Invalid --out value: empty path".to_owned()),
                    Some(val) => opts.out = PathBuf::from(val),
                    None => return Err(format!("Unknown argument: {other}")),
                },
            }
        }
        Ok(Action::Run(opts))
    }
}
