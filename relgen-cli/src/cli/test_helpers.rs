//! Small helpers shared across CLI tests.

use std::{fs, io, path::PathBuf};

use clap::Parser;
use tempfile::TempDir;

use super::{Cli, CliError, ExecutionSummary, render_summary, run_cli};

pub(super) fn temp_dir() -> TempDir {
    match TempDir::new() {
        Ok(dir) => dir,
        Err(err) => panic!("failed to create temp dir: {err}"),
    }
}

pub(super) fn write_pairs_file(dir: &TempDir, name: &str, contents: &str) -> io::Result<PathBuf> {
    let path = dir.path().join(name);
    fs::write(&path, contents)?;
    Ok(path)
}

/// Parses `args` (without the binary name) and runs the resulting command.
pub(super) fn run_args(args: &[&str]) -> Result<ExecutionSummary, CliError> {
    let cli = match Cli::try_parse_from(std::iter::once("relgen").chain(args.iter().copied())) {
        Ok(cli) => cli,
        Err(err) => panic!("arguments {args:?} must parse: {err}"),
    };
    run_cli(cli)
}

pub(super) fn run_args_expecting_error(args: &[&str], panic_msg: &str) -> CliError {
    match run_args(args) {
        Ok(_) => panic!("{panic_msg}"),
        Err(err) => err,
    }
}

pub(super) fn render(summary: &ExecutionSummary) -> String {
    let mut buffer = Vec::new();
    if let Err(err) = render_summary(summary, &mut buffer) {
        panic!("rendering into memory must succeed: {err}");
    }
    match String::from_utf8(buffer) {
        Ok(text) => text,
        Err(err) => panic!("rendered output must be UTF-8: {err}"),
    }
}
