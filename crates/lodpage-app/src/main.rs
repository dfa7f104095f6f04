//! The `lodpage` binary.

use std::process::ExitCode;

use clap::Parser;
use lodpage_config::CliArgs;

fn main() -> ExitCode {
    let args = match CliArgs::try_parse() {
        Ok(args) => args,
        Err(e) => {
            // Help and usage errors alike go to stdout and fail the run.
            println!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let settings = lodpage_app::resolve_settings(&args);
    lodpage_log::init_logging(&settings.log);

    match lodpage_app::run(&args, &settings) {
        Ok(summary) => {
            tracing::info!(
                written = summary.written,
                failed = summary.failed,
                "finished"
            );
            println!("done.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "run failed");
            println!("{e}");
            println!("failed..");
            ExitCode::FAILURE
        }
    }
}
