use std::process::ExitCode;

use clap::Parser;
use log::error;
use nix::unistd::Uid;

use netsetup::{cli::Cli, config, provision};

const EXIT_NOT_ROOT: u8 = 1;
const EXIT_CONFIG_LOAD: u8 = 2;

fn setup_logging(args: &Cli) {
    env_logger::builder()
        .format_timestamp(None)
        .filter_level(args.verbosity)
        .init();
}

fn main() -> ExitCode {
    let args = Cli::parse();
    setup_logging(&args);

    if !Uid::effective().is_root() {
        error!("netsetup must be run as root");
        return ExitCode::from(EXIT_NOT_ROOT);
    }

    let setup = match config::load(&args.config) {
        Ok(setup) => setup,
        Err(e) => {
            error!("Failed to load network setup: {e:?}");
            return ExitCode::from(EXIT_CONFIG_LOAD);
        }
    };

    match provision(&setup, &args) {
        Ok(()) => {
            // Final confirmation of what was applied.
            println!("{setup:?}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e:?}");
            ExitCode::FAILURE
        }
    }
}
