use std::path::PathBuf;

use clap::{error::ErrorKind, ArgAction, CommandFactory, Parser};

use crate::config::Mode;
use crate::error::FilterError;
use crate::pipeline::RunConfig;
use crate::table::parse_delimiter;

/// Select speaker-metadata rows that look rural or carry a regional accent.
#[derive(Debug, Parser)]
#[command(name = "filter_rural", version)]
pub struct Cli {
    /// Matching strategy.
    #[arg(long, value_enum, default_value = "keyword")]
    pub mode: Mode,

    /// YAML file overriding keywords, regex, and column names.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Input delimiter (tab, comma, or one character); defaults by file extension.
    #[arg(long, value_name = "DELIM")]
    pub delimiter: Option<String>,

    /// Increase logging verbosity (-v, -vv).
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,

    /// Header-bearing CSV or TSV file.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output CSV path. Required in regex mode; keyword mode writes to stdout without it.
    #[arg(value_name = "OUTPUT")]
    pub output: Option<PathBuf>,
}

/// Exit code for a failed parse: help and version are not failures, everything else is a usage error.
pub fn parse_error_exit_code(err: &clap::Error) -> i32 {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
        _ => 1,
    }
}

impl Cli {
    pub fn usage() -> String {
        Cli::command().render_usage().to_string()
    }

    /// Check mode-specific argument rules and build the pipeline settings.
    pub fn into_run_config(self) -> Result<RunConfig, FilterError> {
        if self.mode == Mode::Regex && self.output.is_none() {
            return Err(FilterError::Usage {
                message: "regex mode needs an OUTPUT path".to_string(),
                usage: Cli::usage(),
            });
        }
        let delimiter = self
            .delimiter
            .as_deref()
            .map(parse_delimiter)
            .transpose()?;
        Ok(RunConfig {
            mode: self.mode,
            input: self.input,
            output: self.output,
            delimiter,
            config: self.config,
        })
    }
}
