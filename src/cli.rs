use crate::routes::AllocationResponse;
use crate::server;
use clap::{Args, Parser, Subcommand, ValueEnum};
use mission_match::config::{allocation_from_env, allocation_from_file, AppConfig};
use mission_match::error::AppError;
use mission_match::telemetry;
use mission_match::workflows::allocation::{
    AllocationConfig, AllocationEngine, AllocationOutcome, CoveragePolicy, MatchMode,
    ScoringConfig, ScoringKey, Snapshot,
};
use mission_match::workflows::roster::{write_assignments, write_conflicts, RosterImporter};
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "mission-match",
    about = "Staff field missions with pilots and drones, highest priority first",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Allocate pilots and drones from CSV roster exports
    Allocate(AllocateArgs),
    /// List the recognised scoring keys with their defaults
    Keys,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

#[derive(Args, Debug)]
struct AllocateArgs {
    /// Pilot roster CSV
    #[arg(long)]
    pilots: PathBuf,
    /// Drone fleet CSV
    #[arg(long)]
    drones: PathBuf,
    /// Mission list CSV
    #[arg(long)]
    missions: PathBuf,
    /// JSON file with allocation settings (mode, coverage, track_overlap, scoring)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Match mode: strict or scored
    #[arg(long, value_parser = parse_mode)]
    mode: Option<MatchMode>,
    /// Capability coverage policy: subset or intersection
    #[arg(long, value_parser = parse_coverage)]
    coverage: Option<CoveragePolicy>,
    /// Let a resource serve several missions whose windows do not overlap
    #[arg(long)]
    track_overlap: bool,
    /// Override a scoring key, e.g. --set acceptance_threshold=-20
    #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_override)]
    overrides: Vec<(String, String)>,
    /// Output format written to stdout
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
    /// Also write assignments to this CSV file
    #[arg(long)]
    assignments_out: Option<PathBuf>,
    /// Also write conflicts to this CSV file
    #[arg(long)]
    conflicts_out: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Csv,
    Json,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Allocate(args) => run_allocate(args),
        Command::Keys => print_keys(),
    }
}

fn run_allocate(args: AllocateArgs) -> Result<(), AppError> {
    let app_config = AppConfig::load()?;
    telemetry::init(&app_config.telemetry)?;

    let config = resolve_allocation(&args, app_config.allocation)?;
    let snapshot = RosterImporter::snapshot_from_paths(&args.pilots, &args.drones, &args.missions)?;
    let outcome = AllocationEngine::new(config).run(&snapshot);

    info!(
        assignments = outcome.assignments.len(),
        conflicts = outcome.conflicts.len(),
        excluded = snapshot.excluded.len(),
        "allocation finished"
    );

    if let Some(path) = &args.assignments_out {
        write_assignments(File::create(path)?, &outcome.assignments)?;
    }
    if let Some(path) = &args.conflicts_out {
        write_conflicts(File::create(path)?, &outcome.conflicts)?;
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match args.format {
        OutputFormat::Table => render_table(&mut out, &snapshot, &outcome)?,
        OutputFormat::Csv => {
            write_assignments(&mut out, &outcome.assignments)?;
            writeln!(out)?;
            write_conflicts(&mut out, &outcome.conflicts)?;
        }
        OutputFormat::Json => {
            let response = AllocationResponse::new(snapshot, outcome);
            serde_json::to_writer_pretty(&mut out, &response).map_err(std::io::Error::from)?;
            writeln!(out)?;
        }
    }

    Ok(())
}

/// Settings are layered: config file (or environment), `MATCH_*` variables,
/// command-line flags, then `--set` overrides.
fn resolve_allocation(
    args: &AllocateArgs,
    from_env: AllocationConfig,
) -> Result<AllocationConfig, AppError> {
    let mut config = match &args.config {
        Some(path) => allocation_from_env(allocation_from_file(path)?)?,
        None => from_env,
    };

    if let Some(mode) = args.mode {
        config.mode = mode;
    }
    if let Some(coverage) = args.coverage {
        config.coverage = coverage;
    }
    if args.track_overlap {
        config.track_overlap = true;
    }
    for (key, value) in &args.overrides {
        config.scoring.apply(key, value)?;
    }

    Ok(config)
}

fn render_table<W: Write>(
    out: &mut W,
    snapshot: &Snapshot,
    outcome: &AllocationOutcome,
) -> std::io::Result<()> {
    writeln!(out, "Assignments ({})", outcome.assignments.len())?;
    for assignment in &outcome.assignments {
        writeln!(
            out,
            "  {:<12} pilot {:<10} drone {:<10} score {}",
            assignment.mission_id, assignment.pilot_id, assignment.drone_id, assignment.score
        )?;
        for violation in &assignment.violations {
            writeln!(out, "      tolerated {violation}")?;
        }
    }

    writeln!(out, "Conflicts ({})", outcome.conflicts.len())?;
    for conflict in &outcome.conflicts {
        writeln!(
            out,
            "  {:<12} {:<21} {}",
            conflict.mission_id,
            conflict.kind.label(),
            conflict.reasons
        )?;
    }

    if !snapshot.excluded.is_empty() {
        writeln!(out, "Excluded rows ({})", snapshot.excluded.len())?;
        for row in &snapshot.excluded {
            writeln!(
                out,
                "  {} row {} ({}): missing {}",
                row.collection,
                row.row,
                row.id.as_deref().unwrap_or("no id"),
                row.missing_field
            )?;
        }
    }

    Ok(())
}

fn print_keys() -> Result<(), AppError> {
    let defaults = ScoringConfig::default();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{:<30} {:>7}  {:<36} description", "key", "default", "env")?;
    for key in ScoringKey::all() {
        writeln!(
            out,
            "{:<30} {:>7}  {:<36} {}",
            key.name(),
            defaults.get(key),
            key.env_var(),
            key.description()
        )?;
    }
    Ok(())
}

fn parse_mode(raw: &str) -> Result<MatchMode, String> {
    MatchMode::parse(raw).ok_or_else(|| format!("unknown match mode '{raw}' (strict|scored)"))
}

fn parse_coverage(raw: &str) -> Result<CoveragePolicy, String> {
    CoveragePolicy::parse(raw)
        .ok_or_else(|| format!("unknown coverage policy '{raw}' (subset|intersection)"))
}

fn parse_override(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))?;
    Ok((key.trim().to_string(), value.trim().to_string()))
}
