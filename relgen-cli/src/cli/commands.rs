//! Command implementations and argument parsing for the relgen CLI.

use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use clap::{Args, Parser, Subcommand, ValueEnum};
use rand::{SeedableRng, rngs::SmallRng};
use relgen_core::{
    DEFAULT_MAX_REJECTIONS, Pair, PropertyReport, RejectionStats, Relation, RelationBuilder,
    RelgenError, ReportOptions, Universe,
};
use serde::Serialize;
use thiserror::Error;
use tracing::{Span, field, info, instrument};

/// Element type used for universes given on the command line.
pub type Value = i64;

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(name = "relgen", about = "Generate and analyse random binary relations.")]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Draw a random relation satisfying the requested properties.
    Generate(GenerateCommand),
    /// Report the properties of a given relation.
    Check(CheckCommand),
}

/// Options accepted by the `generate` command.
#[derive(Debug, Args, Clone)]
pub struct GenerateCommand {
    /// Explicit universe elements, e.g. `--universe 1,2,3`.
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    pub universe: Option<Vec<Value>>,

    /// Number of universe elements; `0..n` unless a superset is given.
    #[arg(long)]
    pub universe_size: Option<usize>,

    /// Pool the universe is sampled from.
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    pub superset: Option<Vec<Value>>,

    /// Target number of pairs; overrides `--min-size` and `--max-size`.
    #[arg(long)]
    pub target_size: Option<usize>,

    /// Relative tolerance around the target size.
    #[arg(long, default_value_t = 0.0)]
    pub epsilon: f64,

    /// Minimum number of pairs.
    #[arg(long = "min-size")]
    pub min_size: Option<usize>,

    /// Maximum number of pairs.
    #[arg(long = "max-size")]
    pub max_size: Option<usize>,

    /// Comma-separated property specification, e.g. `reflexive,!symmetric`.
    #[arg(long, default_value = "")]
    pub properties: String,

    /// Rejected draws tolerated before giving up.
    #[arg(long, default_value_t = DEFAULT_MAX_REJECTIONS)]
    pub max_rejections: usize,

    /// Seed for reproducible output; drawn from entropy when omitted.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Keep pairs in draw order instead of sorting them.
    #[arg(long)]
    pub no_sort: bool,

    /// Append a property report.
    #[arg(long)]
    pub report: bool,

    /// Report and output options.
    #[command(flatten)]
    pub analysis: AnalysisArgs,
}

/// Options accepted by the `check` command.
#[derive(Debug, Args, Clone)]
pub struct CheckCommand {
    /// Universe elements; defaults to the elements occurring in the pairs.
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    pub universe: Option<Vec<Value>>,

    /// Pairs written as `a:b`, comma-separated.
    #[arg(
        long,
        value_delimiter = ',',
        value_parser = parse_pair,
        allow_hyphen_values = true,
        conflicts_with = "pairs_file",
    )]
    pub pairs: Vec<Pair<Value>>,

    /// File with one whitespace-separated `a b` pair per line.
    #[arg(long)]
    pub pairs_file: Option<PathBuf>,

    /// Report and output options.
    #[command(flatten)]
    pub analysis: AnalysisArgs,
}

/// Options shared by every command that prints a property report.
#[derive(Debug, Args, Clone, Default)]
pub struct AnalysisArgs {
    /// List pairs missing for failed reflexivity, symmetry or transitivity.
    #[arg(long)]
    pub missing: bool,

    /// List pairs conflicting with failed asymmetry, antisymmetry or
    /// irreflexivity.
    #[arg(long)]
    pub conflicts: bool,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

impl AnalysisArgs {
    const fn options(&self) -> ReportOptions {
        ReportOptions {
            include_missing: self.missing,
            include_conflicts: self.conflicts,
        }
    }
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Reading an input file failed.
    #[error("failed to read `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// A pairs file contained a malformed line.
    #[error("{path}:{line}: {reason}")]
    PairsFile {
        /// File being parsed.
        path: PathBuf,
        /// One-based line number.
        line: usize,
        /// What was wrong with the line.
        reason: String,
    },
    /// Generation or analysis failed.
    #[error(transparent)]
    Core(#[from] RelgenError),
}

/// Outcome of a CLI command, ready to be rendered.
#[derive(Debug, Clone, Serialize)]
pub struct ExecutionSummary {
    /// Seed used for generation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Universe the relation is defined over.
    pub universe: Universe<Value>,
    /// The generated or supplied relation.
    pub relation: Relation<Value>,
    /// Rejections recorded while generating.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<RejectionStats>,
    /// Property report, when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<PropertyReport<Value>>,
    /// How the summary should be rendered.
    #[serde(skip)]
    pub format: OutputFormat,
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when reading input, parsing or generation fails.
///
/// # Examples
/// ```
/// use clap::Parser;
/// use relgen_cli::cli::{Cli, run_cli};
///
/// let cli = Cli::parse_from([
///     "relgen", "generate", "--universe", "1,2,3", "--properties", "reflexive", "--seed", "7",
/// ]);
/// let summary = run_cli(cli)?;
/// assert_eq!(summary.seed, Some(7));
/// assert!(summary.relation.contains(&2, &2));
/// # Ok::<(), relgen_cli::cli::CliError>(())
/// ```
#[instrument(name = "cli.run", err, skip(cli), fields(command = field::Empty))]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    let span = Span::current();
    match cli.command {
        Command::Generate(command) => {
            span.record("command", "generate");
            run_generate(command)
        }
        Command::Check(command) => {
            span.record("command", "check");
            run_check(command)
        }
    }
}

#[instrument(
    name = "cli.generate",
    err,
    skip(command),
    fields(seed = field::Empty, properties = %command.properties),
)]
pub(super) fn run_generate(command: GenerateCommand) -> Result<ExecutionSummary, CliError> {
    let seed = command.seed.unwrap_or_else(|| {
        let drawn: u64 = rand::random();
        info!(seed = drawn, "no seed supplied; drew one from entropy");
        drawn
    });
    Span::current().record("seed", seed);

    let builder = configure_builder(&command);
    let mut rng = SmallRng::seed_from_u64(seed);
    let generated = builder.generate_with_report(&mut rng)?;
    info!(
        pairs = generated.relation.len(),
        size_rejections = generated.stats.size_rejections,
        property_rejections = generated.stats.property_rejections,
        "relation generated"
    );

    let analysis = &command.analysis;
    let report = (command.report || analysis.missing || analysis.conflicts).then(|| {
        PropertyReport::analyse(&generated.relation, &generated.universe, analysis.options())
    });
    Ok(ExecutionSummary {
        seed: Some(seed),
        universe: generated.universe,
        relation: generated.relation,
        stats: Some(generated.stats),
        report,
        format: analysis.format,
    })
}

fn configure_builder(command: &GenerateCommand) -> RelationBuilder<Value> {
    let mut builder = RelationBuilder::new()
        .with_properties(command.properties.as_str())
        .with_epsilon(command.epsilon)
        .with_max_rejections(command.max_rejections)
        .with_sort_result(!command.no_sort);
    if let Some(universe) = &command.universe {
        builder = builder.with_universe(universe.iter().copied());
    }
    if let Some(size) = command.universe_size {
        builder = builder.with_universe_size(size);
    }
    if let Some(superset) = &command.superset {
        builder = builder.with_universe_superset(superset.iter().copied());
    }
    if let Some(size) = command.target_size {
        builder = builder.with_target_size(size);
    }
    if let Some(size) = command.min_size {
        builder = builder.with_min_target_size(size);
    }
    if let Some(size) = command.max_size {
        builder = builder.with_max_target_size(size);
    }
    builder
}

#[instrument(
    name = "cli.check",
    err,
    skip(command),
    fields(source = field::Empty, pairs = field::Empty),
)]
pub(super) fn run_check(command: CheckCommand) -> Result<ExecutionSummary, CliError> {
    let CheckCommand {
        universe,
        pairs,
        pairs_file,
        analysis,
    } = command;
    let span = Span::current();
    let collected = match pairs_file {
        Some(path) => {
            span.record("source", field::display(path.display()));
            read_pairs_file(&path)?
        }
        None => {
            span.record("source", "arguments");
            pairs
        }
    };
    span.record("pairs", collected.len());

    let relation = Relation::from_pairs(collected);
    let universe = universe.map_or_else(|| relation.universe(), Universe::new);
    let report = PropertyReport::analyse(&relation, &universe, analysis.options());
    Ok(ExecutionSummary {
        seed: None,
        universe,
        relation,
        stats: None,
        report: Some(report),
        format: analysis.format,
    })
}

#[instrument(name = "cli.read_pairs_file", err)]
pub(super) fn read_pairs_file(path: &Path) -> Result<Vec<Pair<Value>>, CliError> {
    let contents = fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    contents
        .lines()
        .enumerate()
        .filter(|(_, line)| {
            let trimmed = line.trim();
            !trimmed.is_empty() && !trimmed.starts_with('#')
        })
        .map(|(index, line)| {
            parse_pair_line(line).map_err(|reason| CliError::PairsFile {
                path: path.to_path_buf(),
                line: index + 1,
                reason,
            })
        })
        .collect()
}

fn parse_pair_line(line: &str) -> Result<Pair<Value>, String> {
    let mut fields = line.split_whitespace();
    match (fields.next(), fields.next(), fields.next()) {
        (Some(a), Some(b), None) => Ok((parse_value(a)?, parse_value(b)?)),
        _ => Err(format!("expected two whitespace-separated elements, got `{}`", line.trim())),
    }
}

fn parse_value(raw: &str) -> Result<Value, String> {
    raw.trim()
        .parse()
        .map_err(|error| format!("invalid element `{raw}`: {error}"))
}

/// Parses a pair written as `a:b`.
///
/// # Errors
/// Returns a message when the separator is missing or an element is not an
/// integer.
///
/// # Examples
/// ```
/// use relgen_cli::cli::parse_pair;
///
/// assert_eq!(parse_pair("1:-2"), Ok((1, -2)));
/// assert!(parse_pair("1-2").is_err());
/// ```
pub fn parse_pair(raw: &str) -> Result<Pair<Value>, String> {
    let (a, b) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected `a:b`, got `{raw}`"))?;
    Ok((parse_value(a)?, parse_value(b)?))
}

/// Renders `summary` to `writer` in its requested format.
///
/// # Errors
/// Returns [`io::Error`] if writing or JSON encoding fails.
///
/// # Examples
/// ```
/// use clap::Parser;
/// use relgen_cli::cli::{Cli, render_summary, run_cli};
///
/// let cli = Cli::parse_from(["relgen", "check", "--pairs", "1:1,1:2"]);
/// let summary = run_cli(cli)?;
/// let mut buffer = Vec::new();
/// render_summary(&summary, &mut buffer)?;
/// let text = String::from_utf8(buffer)?;
/// assert!(text.contains("    Reflexive: No\n"));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    if summary.format == OutputFormat::Json {
        serde_json::to_writer_pretty(&mut writer, summary)?;
        return writeln!(writer);
    }

    if let Some(seed) = summary.seed {
        writeln!(writer, "seed: {seed}")?;
    }
    if let Some(stats) = summary.stats {
        writeln!(
            writer,
            "rejections: {} (size: {}, property: {})",
            stats.total(),
            stats.size_rejections,
            stats.property_rejections
        )?;
    }
    match &summary.report {
        Some(report) => write!(writer, "{report}"),
        None => {
            writeln!(writer, "universe: {:?}", summary.universe.elements())?;
            writeln!(writer, "relation: {:?}", summary.relation.pairs())
        }
    }
}
