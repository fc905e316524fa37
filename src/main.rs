//! EasyTerm - a minimal terminal window with quick-action buttons
//!
//! Options come from `<config dir>/easyterm/config.toml` (or `--config`),
//! overridden by command line flags.

use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, error};

use easyterm::config::cli::CliArgs;
use easyterm::config::loader::ConfigLoader;
use easyterm::{resolve, LaunchMode, SessionConfiguration};

fn main() -> ExitCode {
    let args = CliArgs::parse();
    easyterm::init_logging(args.verbose);

    let config = match load_session(args) {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            eprintln!("easyterm: {}", e);
            return ExitCode::from(e.exit_code());
        }
    };
    debug!("Session configuration: {:?}", config);

    match easyterm::run(config, LaunchMode::Application) {
        Ok(state) => ExitCode::from(state.exit_code()),
        Err(e) => {
            error!("Application failed: {}", e);
            ExitCode::from(e.exit_code())
        }
    }
}

fn load_session(args: CliArgs) -> easyterm::Result<SessionConfiguration> {
    let file = ConfigLoader::load(args.config.as_deref())?;
    resolve(args.merge_over(file))
}
