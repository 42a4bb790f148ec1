use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::exit;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use school_core::cohort::Cohorts;
use school_core::plan::Plan;
use school_core::school::School;
use school_core::statistics::PlanStatistics;
use school_plan::config::{ExportFormat, PlanConfig};
use school_plan::export::write_exports;
use school_plan::report;
use school_plan::{load_schools, run_plan, RunOptions};

/// Config file picked up from the working directory when `--config` is absent.
const DEFAULT_CONFIG_FILE: &str = "school-plan.toml";

// ── CLI definition ─────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "school-plan",
    version,
    about = "Assign nearby alternative schools for mutual operation",
    long_about = "Builds a mutual operation plan: every school gets a ranked list of\n\
                  nearby schools with the same level and gender that can host its\n\
                  students when it cannot operate."
)]
struct Cli {
    /// TOML config file (defaults to ./school-plan.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the plan, print reports and write the enabled exports
    Run {
        #[command(flatten)]
        plan: PlanArgs,
        /// Output directory for exports
        #[arg(long)]
        output_dir: Option<PathBuf>,
        /// Export format; repeat to enable several (replaces the config list)
        #[arg(long = "format", value_enum)]
        formats: Vec<FormatArg>,
        /// Schools shown in the sample report
        #[arg(long)]
        sample_size: Option<usize>,
    },
    /// Build the plan and print the statistics report only
    Stats {
        #[command(flatten)]
        plan: PlanArgs,
    },
    /// Show the alternatives of one school, by identifier or exact name
    Lookup {
        #[command(flatten)]
        plan: PlanArgs,
        query: String,
    },
    /// Write a config file with default values
    InitConfig {
        #[arg(default_value = DEFAULT_CONFIG_FILE)]
        path: PathBuf,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Overrides shared by every command that builds a plan.
#[derive(Args)]
struct PlanArgs {
    /// School dataset (JSON array or TypeScript module exporting `schoolsData`)
    #[arg(short, long)]
    input: Option<PathBuf>,
    /// Maximum distance to an alternative, in kilometers
    #[arg(long)]
    max_distance_km: Option<f64>,
    /// Maximum alternatives per school
    #[arg(long)]
    max_alternatives: Option<usize>,
    /// Worker threads (defaults to one per core)
    #[arg(long)]
    threads: Option<usize>,
    /// Hide the progress bar
    #[arg(long)]
    no_progress: bool,
}

impl PlanArgs {
    fn apply(&self, config: &mut PlanConfig) {
        if let Some(input) = &self.input {
            config.input = input.clone();
        }
        if let Some(km) = self.max_distance_km {
            config.limits.max_distance_km = km;
        }
        if let Some(count) = self.max_alternatives {
            config.limits.max_alternatives = count;
        }
        if self.threads.is_some() {
            config.threads = self.threads;
        }
    }

    fn run_options(&self, config: &PlanConfig) -> RunOptions {
        RunOptions::default()
            .with_threads(config.threads)
            .with_progress(!self.no_progress)
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Json,
    Csv,
    #[value(name = "typescript", alias = "ts")]
    TypeScript,
    Statistics,
}

impl From<FormatArg> for ExportFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Json => Self::Json,
            FormatArg::Csv => Self::Csv,
            FormatArg::TypeScript => Self::TypeScript,
            FormatArg::Statistics => Self::Statistics,
        }
    }
}

// ── entry point ────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(error) = run(cli) {
        eprintln!("error: {error:#}");
        exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .target(env_logger::Target::Stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Run {
            plan,
            output_dir,
            formats,
            sample_size,
        } => {
            let mut config = resolve_config(cli.config.as_deref(), &plan)?;
            if let Some(dir) = output_dir {
                config.output_directory = dir;
            }
            if !formats.is_empty() {
                config.exports.formats = formats.into_iter().map(ExportFormat::from).collect();
            }
            if let Some(size) = sample_size {
                config.sample_size = size;
            }
            run_full(&config, &plan)
        }
        Commands::Stats { plan } => {
            let config = resolve_config(cli.config.as_deref(), &plan)?;
            let schools = load(&config)?;
            let built = build(&schools, &config, &plan)?;
            let stats = PlanStatistics::from_plan(&built);

            let mut out = io::stdout().lock();
            report::write_statistics_report(&mut out, &stats)?;
            Ok(())
        }
        Commands::Lookup { plan, query } => {
            let config = resolve_config(cli.config.as_deref(), &plan)?;
            let schools = load(&config)?;
            let built = build(&schools, &config, &plan)?;
            lookup(&built, &query)
        }
        Commands::InitConfig { path, force } => init_config(&path, force),
    }
}

// ── commands ───────────────────────────────────────────────────────

fn run_full(config: &PlanConfig, args: &PlanArgs) -> Result<()> {
    let schools = load(config)?;
    let plan = build(&schools, config, args)?;
    let stats = PlanStatistics::from_plan(&plan);

    let mut out = io::stdout().lock();
    let cohorts = Cohorts::group(schools.iter().filter(|s| s.is_eligible()));
    report::write_cohort_overview(&mut out, &cohorts)?;
    report::write_statistics_report(&mut out, &stats)?;
    report::write_sample_report(&mut out, &plan, config.sample_size)?;
    out.flush()?;

    let written = write_exports(&plan, &stats, config).context("writing exports")?;
    if !written.is_empty() {
        writeln!(out)?;
        writeln!(out, "Exports:")?;
        for path in &written {
            writeln!(out, "  - {}", path.display())?;
        }
    }
    Ok(())
}

fn lookup(plan: &Plan<'_>, query: &str) -> Result<()> {
    let query = query.trim();
    let matches: Vec<_> = plan
        .iter()
        .filter(|entry| entry.school.id == query || entry.school.name == query)
        .collect();
    if matches.is_empty() {
        bail!("no school with identifier or name `{query}` in the plan");
    }

    let mut out = io::stdout().lock();
    for entry in matches {
        report::write_school_alternatives(&mut out, entry)?;
    }
    Ok(())
}

fn init_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!("{} already exists; pass --force to overwrite", path.display());
    }
    PlanConfig::default()
        .save_to_file(path)
        .with_context(|| format!("writing default config to {}", path.display()))?;
    log::info!("Wrote default config to {}", path.display());
    Ok(())
}

// ── helpers ────────────────────────────────────────────────────────

fn resolve_config(explicit: Option<&Path>, args: &PlanArgs) -> Result<PlanConfig> {
    let mut config = match explicit {
        Some(path) => PlanConfig::load_from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
            log::debug!("Using {DEFAULT_CONFIG_FILE} from the working directory");
            PlanConfig::load_from_file(DEFAULT_CONFIG_FILE)
                .with_context(|| format!("loading config {DEFAULT_CONFIG_FILE}"))?
        }
        None => PlanConfig::default(),
    };
    args.apply(&mut config);
    Ok(config)
}

fn load(config: &PlanConfig) -> Result<Vec<School>> {
    let loaded = load_schools(&config.input)
        .with_context(|| format!("loading schools from {}", config.input.display()))?;
    if loaded.schools.is_empty() {
        log::warn!("No schools with usable coordinates in {}", config.input.display());
    }
    Ok(loaded.schools)
}

fn build<'a>(schools: &'a [School], config: &PlanConfig, args: &PlanArgs) -> Result<Plan<'a>> {
    log::info!(
        "Matching within {} km, up to {} alternatives per school",
        config.limits.max_distance_km,
        config.limits.max_alternatives
    );
    run_plan(schools, config.limits, &args.run_options(config)).context("building plan")
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use school_core::matching::MatchLimits;

    fn plan_args(argv: &[&str]) -> PlanArgs {
        let cli = Cli::try_parse_from(argv).expect("arguments parse");
        match cli.command {
            Commands::Stats { plan }
            | Commands::Lookup { plan, .. }
            | Commands::Run { plan, .. } => plan,
            Commands::InitConfig { .. } => panic!("command without plan arguments"),
        }
    }

    fn file_config() -> PlanConfig {
        PlanConfig {
            input: PathBuf::from("from-file.json"),
            threads: Some(8),
            limits: MatchLimits::new(7.5, 2),
            ..PlanConfig::default()
        }
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn flags_override_config_file_values() {
        let args = plan_args(&[
            "school-plan",
            "stats",
            "--input",
            "from-flag.ts",
            "--max-distance-km",
            "4.5",
            "--max-alternatives",
            "5",
            "--threads",
            "2",
        ]);
        let mut config = file_config();
        args.apply(&mut config);

        assert_eq!(config.input, PathBuf::from("from-flag.ts"));
        assert_eq!(config.limits, MatchLimits::new(4.5, 5));
        assert_eq!(config.threads, Some(2));
    }

    #[test]
    fn absent_flags_keep_config_file_values() {
        let args = plan_args(&["school-plan", "lookup", "1001", "--max-alternatives", "1"]);
        let mut config = file_config();
        args.apply(&mut config);

        assert_eq!(config.input, PathBuf::from("from-file.json"));
        assert_eq!(config.limits, MatchLimits::new(7.5, 1));
        assert_eq!(config.threads, Some(8));
        assert!(args.run_options(&config).show_progress);
    }
}
