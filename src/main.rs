//! spicetify-apply - command line entry point.
//!
//! # Execution Flow
//!
//! 1. Parse arguments
//! 2. Initialize logging → `<config_dir>/logs/spicetify.<date>` plus console
//! 3. Load `config-xpui.yaml` (layered under `SPICETIFY__*` environment variables)
//! 4. Run the selected command through [`spicetify_apply::Pipeline`]
//!
//! Any fatal error (missing backup, declined confirmation, asset copy
//! failure) ends the process with a non-zero status. Per-item failures are
//! logged and do not change the exit status.

use clap::Parser;
use spicetify_apply::cli::{self, Cli};
use spicetify_apply::{APP_NAME, VERSION};
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = Cli::parse();

    let config_dir = match args.config_dir() {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    let _guard = match spicetify_apply::logging::setup_logging(
        &config_dir.join("logs"),
        "spicetify",
        args.debug,
        true,
    ) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    tracing::info!("Starting {} v{}", APP_NAME, VERSION);

    cli::exit_code(cli::run(&args, &config_dir))
}
