//! Run report rendering
//!
//! The outcome of a run is printed to stdout either as text for people
//! or as JSON for workflow steps that consume it.

mod json;
mod text;

pub use json::JsonFormatter;
pub use text::TextFormatter;

use crate::domain::RunOutcome;
use std::io::{IsTerminal, Write};

/// Report format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// How much of the outcome the text report shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Headline only
    Quiet,
    #[default]
    Normal,
    /// Adds per-package detail of grouped updates
    Verbose,
}

impl Verbosity {
    /// Verbosity selected by the `--verbose` / `--quiet` flags
    pub fn from_flags(verbose: bool, quiet: bool) -> Self {
        match (verbose, quiet) {
            (_, true) => Verbosity::Quiet,
            (true, false) => Verbosity::Verbose,
            (false, false) => Verbosity::Normal,
        }
    }
}

/// Report settings
#[derive(Debug, Clone, Default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub verbosity: Verbosity,
    /// Colorize the text report
    pub color: bool,
}

impl OutputConfig {
    /// Settings for the CLI flags; color only when stdout is a terminal and `NO_COLOR` is unset
    pub fn from_cli(json: bool, verbose: bool, quiet: bool) -> Self {
        let color = std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none();
        Self {
            format: if json {
                OutputFormat::Json
            } else {
                OutputFormat::Text
            },
            verbosity: Verbosity::from_flags(verbose, quiet),
            color,
        }
    }
}

/// Renders a run outcome
pub trait OutputFormatter {
    fn format(&self, outcome: &RunOutcome, writer: &mut dyn Write) -> std::io::Result<()>;
}

/// Formatter for `config`
pub fn create_formatter(config: OutputConfig) -> Box<dyn OutputFormatter> {
    match config.format {
        OutputFormat::Text => Box::new(TextFormatter::with_color(config.verbosity, config.color)),
        OutputFormat::Json => Box::new(JsonFormatter::new()),
    }
}
