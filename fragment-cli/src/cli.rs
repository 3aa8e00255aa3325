//! Argument parsing and command dispatch.

use std::io::Write;
use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use fragment_validator::{
    ChangeTypeSet, DEFAULT_FRAGMENT_DIR, DirSourceConfig, FragmentReport, TowncrierConfig,
    ValidationConfig, output, validate_dir,
};
use tracing::{debug, warn};

use crate::logging;
use crate::release::ReleasePlan;

#[derive(Debug, Parser)]
#[command(
    name = "fragments",
    version,
    about = "Check changelog fragments and prepare releases"
)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace). `RUST_LOG` overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Validate every fragment in the changelog directory
    Check(CheckArgs),
    /// Validate a release version and print the steps to publish it
    ReleasePlan(ReleasePlanArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
}

#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Towncrier configuration to read change types and the fragment directory from
    #[arg(long, default_value = "pyproject.toml")]
    pub config: PathBuf,

    /// Fragment directory (defaults to the towncrier `directory` setting, then `changelog.d`)
    #[arg(long)]
    pub dir: Option<PathBuf>,

    /// Allowed change type; repeat to allow several. Replaces the configured list.
    #[arg(long = "type", value_name = "TYPE")]
    pub types: Vec<String>,

    /// Extra file name to accept without validation (`.gitkeep` is always accepted)
    #[arg(long = "placeholder", value_name = "NAME")]
    pub placeholders: Vec<String>,

    /// Read fragments through symbolic links instead of rejecting them
    #[arg(long)]
    pub follow_links: bool,

    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

#[derive(Debug, Args)]
pub struct ReleasePlanArgs {
    /// Version to release, as X.Y.Z without a leading "v"
    pub version: String,

    /// Branch the release commit is pushed from
    #[arg(long, default_value = crate::release::DEFAULT_RELEASE_BRANCH)]
    pub branch: String,

    /// Upstream remote URL to add when the `upstream` remote is missing
    #[arg(long)]
    pub upstream_url: Option<String>,
}

/// Parse the process arguments, set up logging, and run the chosen command.
///
/// # Errors
///
/// Returns an error if the command fails, including when any fragment is invalid.
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    let stdout = std::io::stdout();
    run_with(cli, &mut stdout.lock())
}

/// Run an already-parsed command, writing its output to `out`.
///
/// # Errors
///
/// See [`run`].
pub fn run_with(cli: Cli, out: &mut dyn Write) -> anyhow::Result<()> {
    match cli.command {
        Command::Check(args) => check(&args, out),
        Command::ReleasePlan(args) => release_plan(args, out),
    }
}

fn check(args: &CheckArgs, out: &mut dyn Write) -> anyhow::Result<()> {
    let (source, config) = resolve_check_config(args)?;
    let report = validate_dir(&source, &config)?;

    match args.format {
        OutputFormat::Human => {
            output::write_human(&report, out)?;
            write_status(&report, out)?;
        }
        OutputFormat::Json => output::write_json(&report, out)?,
    }

    if !report.ok {
        anyhow::bail!(
            "Found errors in the {} directory. Check the report above for more information",
            source.dir.display()
        );
    }
    Ok(())
}

/// Combine CLI flags with the towncrier config.
///
/// The config file is only required when no `--type` was given; with explicit
/// types it is consulted for the fragment directory if it can be read.
fn resolve_check_config(args: &CheckArgs) -> anyhow::Result<(DirSourceConfig, ValidationConfig)> {
    let towncrier = if args.types.is_empty() {
        Some(TowncrierConfig::load(&args.config)?)
    } else if args.dir.is_none() {
        TowncrierConfig::load(&args.config)
            .inspect_err(|e| debug!("ignoring towncrier config: {e}"))
            .ok()
    } else {
        None
    };

    let dir = match (&args.dir, &towncrier) {
        (Some(dir), _) => dir.clone(),
        (None, Some(towncrier)) => towncrier.resolved_fragment_dir(),
        (None, None) => PathBuf::from(DEFAULT_FRAGMENT_DIR),
    };

    let change_types = if args.types.is_empty() {
        towncrier.map(|t| t.change_types).unwrap_or_default()
    } else {
        ChangeTypeSet::new(args.types.iter().cloned())
    };

    let mut config = ValidationConfig::with_change_types(change_types);
    config.placeholders.extend(args.placeholders.iter().cloned());

    let mut source = DirSourceConfig::new(dir);
    source.follow_links = args.follow_links;

    Ok((source, config))
}

fn write_status(report: &FragmentReport, out: &mut dyn Write) -> anyhow::Result<()> {
    let status = if report.ok {
        format!("All {} changelog fragments are valid", report.checked_files)
            .green()
            .bold()
    } else {
        format!(
            "{} of {} changelog fragments are invalid",
            report.failed_files, report.checked_files
        )
        .red()
        .bold()
    };
    writeln!(out, "{status}")?;
    Ok(())
}

fn release_plan(args: ReleasePlanArgs, out: &mut dyn Write) -> anyhow::Result<()> {
    let plan = ReleasePlan::new(args.version, args.branch, args.upstream_url)?;
    if !plan.is_default_branch() {
        warn!(branch = %plan.branch, "releasing from a branch other than the default one");
    }
    for line in plan.steps() {
        writeln!(out, "{line}")?;
    }
    Ok(())
}
