//! Command-line argument parsing for lodpage.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::Settings;

/// Default output file of the `convert` command.
pub const DEFAULT_CONVERT_OUTPUT: &str = "output.ive";

/// lodpage command-line arguments.
///
/// CLI values override settings loaded from the settings file.
#[derive(Parser, Debug)]
#[command(
    name = "lodpage",
    about = "Creates a hierarchy of files for paging which can be later loaded by viewers."
)]
pub struct CliArgs {
    /// Path to a settings file (overrides the default location).
    #[arg(long, global = true)]
    pub settings: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// The two front-ends over the paging core.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Convert every LOD in the given models into paged LODs.
    Convert(ConvertArgs),
    /// Build a paging hierarchy from a level config or a single directory.
    Build(BuildArgs),
}

/// Arguments of the `convert` command.
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Output file; paged children are written next to it.
    #[arg(short = 'o', default_value = DEFAULT_CONVERT_OUTPUT)]
    pub output: PathBuf,

    /// Force all children of LOD to be written out as external paged children.
    #[arg(long = "make-all-children-paged", alias = "makeAllChildrenPaged")]
    pub make_all_children_paged: bool,

    /// Models to load. Several models are grouped under one root.
    pub models: Vec<PathBuf>,
}

/// Arguments of the `build` command.
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Output directory, created if absent.
    #[arg(short = 'o')]
    pub output_dir: PathBuf,

    /// Input directory for the single-level build.
    #[arg(long)]
    pub dir: Option<PathBuf>,

    /// Level config file for the hierarchical build. Takes priority over `--dir`.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Extension of written tiles, including the dot.
    #[arg(long)]
    pub output_ext: Option<String>,
}

impl Settings {
    /// Apply CLI overrides to loaded settings.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(ref level) = args.log_level {
            self.log.level = level.clone();
        }
        if let Command::Build(build) = &args.command
            && let Some(ref ext) = build.output_ext
        {
            self.output.output_ext = ext.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_defaults() {
        let args = CliArgs::try_parse_from(["lodpage", "convert", "a.ron"]).unwrap();
        let Command::Convert(convert) = args.command else {
            panic!("expected convert");
        };
        assert_eq!(convert.output, PathBuf::from(DEFAULT_CONVERT_OUTPUT));
        assert!(!convert.make_all_children_paged);
        assert_eq!(convert.models, vec![PathBuf::from("a.ron")]);
    }

    #[test]
    fn test_convert_legacy_flag_spelling() {
        let args = CliArgs::try_parse_from([
            "lodpage",
            "convert",
            "--makeAllChildrenPaged",
            "-o",
            "x.ive",
            "a.ron",
            "b.ron",
        ])
        .unwrap();
        let Command::Convert(convert) = args.command else {
            panic!("expected convert");
        };
        assert!(convert.make_all_children_paged);
        assert_eq!(convert.output, PathBuf::from("x.ive"));
        assert_eq!(convert.models.len(), 2);
    }

    #[test]
    fn test_build_requires_output_dir() {
        assert!(CliArgs::try_parse_from(["lodpage", "build", "--dir", "d"]).is_err());
    }

    #[test]
    fn test_unknown_option_is_error() {
        assert!(CliArgs::try_parse_from(["lodpage", "build", "-o", "out", "--bogus"]).is_err());
    }

    #[test]
    fn test_cli_override() {
        let mut settings = Settings::default();
        let args = CliArgs::try_parse_from([
            "lodpage",
            "--log-level",
            "debug",
            "build",
            "-o",
            "out",
            "--config",
            "levels.txt",
            "--output-ext",
            ".tile",
        ])
        .unwrap();
        settings.apply_cli_overrides(&args);
        assert_eq!(settings.log.level, "debug");
        assert_eq!(settings.output.output_ext, ".tile");
        // Non-overridden fields retain defaults
        assert_eq!(settings.output.root_name, "out");
        assert_eq!(settings.paging.dilation_factor, 1.5);
    }

    #[test]
    fn test_cli_no_override() {
        let original = Settings::default();
        let mut settings = Settings::default();
        let args = CliArgs::try_parse_from(["lodpage", "convert"]).unwrap();
        settings.apply_cli_overrides(&args);
        assert_eq!(settings, original);
    }
}
