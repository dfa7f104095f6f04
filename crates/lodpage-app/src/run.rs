use std::path::PathBuf;

use lodpage_build::{
    BuildError, BuildReport, HierarchicalPagingBuilder, LevelConfig, convert_models,
};
use lodpage_config::{BuildArgs, CliArgs, Command, ConvertArgs, Settings};
use lodpage_io::FsTileStore;

/// What a command produced.
#[derive(Clone, Debug, PartialEq)]
pub struct RunSummary {
    /// The root file written.
    pub root: PathBuf,
    /// Files written, root included.
    pub written: usize,
    /// Inputs or outputs skipped after a recoverable failure.
    pub failed: usize,
}

/// Load settings from `--settings` or the platform default location, then
/// apply command-line overrides.
///
/// Runs before logging is up, so problems go to stderr and defaults are used.
pub fn resolve_settings(args: &CliArgs) -> Settings {
    let path = match args.settings.clone() {
        Some(path) => Some(path),
        None => Settings::default_path().ok(),
    };

    let mut settings = match path {
        Some(path) => Settings::load_or_default(&path).unwrap_or_else(|e| {
            eprintln!("ignoring settings {}: {e}", path.display());
            Settings::default()
        }),
        None => Settings::default(),
    };
    settings.apply_cli_overrides(args);
    settings
}

/// Dispatch the parsed command.
pub fn run(args: &CliArgs, settings: &Settings) -> Result<RunSummary, BuildError> {
    match &args.command {
        Command::Convert(convert) => run_convert(convert),
        Command::Build(build) => run_build(build, settings),
    }
}

fn run_convert(args: &ConvertArgs) -> Result<RunSummary, BuildError> {
    let outcome = convert_models(
        &FsTileStore::new(),
        &args.models,
        &args.output,
        args.make_all_children_paged,
    )?;
    tracing::info!(
        paged_nodes = outcome.paged_nodes.len(),
        skipped_root = outcome.conversion.skipped_root,
        skipped_single = outcome.conversion.skipped_single,
        "conversion summary"
    );

    Ok(RunSummary {
        root: outcome.output,
        written: outcome.subgraphs.written.len() + 1,
        failed: outcome.unreadable.len() + outcome.subgraphs.failed.len(),
    })
}

fn run_build(args: &BuildArgs, settings: &Settings) -> Result<RunSummary, BuildError> {
    if args.config.is_none() && args.dir.is_none() {
        return Err(BuildError::MissingInput);
    }

    std::fs::create_dir_all(&args.output_dir).map_err(|source| BuildError::CreateOutputDir {
        path: args.output_dir.clone(),
        source,
    })?;

    let store = FsTileStore::new();
    let builder = HierarchicalPagingBuilder::new(&store, settings, &args.output_dir);
    let report = match (&args.config, &args.dir) {
        (Some(config), _) => builder.build(&LevelConfig::load(config)?)?,
        (None, Some(dir)) => builder.build_single_dir(dir)?,
        (None, None) => return Err(BuildError::MissingInput),
    };
    Ok(summarize(report))
}

fn summarize(report: BuildReport) -> RunSummary {
    for failure in &report.failed {
        tracing::warn!(path = %failure.path.display(), error = %failure.error, "skipped tile");
    }
    RunSummary {
        written: report.written.len(),
        failed: report.failed.len(),
        root: report.root,
    }
}
