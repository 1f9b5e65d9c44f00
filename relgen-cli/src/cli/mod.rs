//! Command-line interface for generating and checking relations.
//!
//! `generate` draws a random relation under property and size constraints;
//! `check` analyses a relation supplied on the command line or in a file.

mod commands;

pub use commands::{
    AnalysisArgs, CheckCommand, Cli, CliError, Command, ExecutionSummary, GenerateCommand,
    OutputFormat, Value, parse_pair, render_summary, run_cli,
};

#[cfg(test)]
mod test_helpers;
