pub mod cli;
pub mod config;
pub mod dependencies;
pub mod exe;
pub mod hostname;
pub mod interfaces;
pub mod netplan;

use std::path::Path;

use anyhow::Error;
use log::{info, warn};

use config::NetworkSetup;

pub(crate) mod crate_private {
    pub trait Sealed {}
}

/// Applies the desired network setup to this host: writes the netplan config
/// when `/etc/netplan` exists, falls back to an ifupdown bridge config
/// otherwise, then sets the hostname.
pub fn provision(setup: &NetworkSetup, args: &cli::Cli) -> Result<(), Error> {
    if Path::new(netplan::NETPLAN_DIR).is_dir() {
        netplan::write(&netplan::from_setup(setup))?;
        info!("Wrote netplan config to {}", netplan::NETPLAN_FILE);

        if args.apply {
            netplan::generate()?;
            netplan::apply()?;
        }
    } else {
        warn!(
            "'{}' does not exist, writing ifupdown config to {} instead",
            netplan::NETPLAN_DIR,
            interfaces::INTERFACES_FILE
        );
        interfaces::bridge_fallback(setup).write(interfaces::INTERFACES_FILE)?;

        if args.apply {
            warn!("--apply has no effect without netplan");
        }
    }

    if !args.skip_hostname {
        hostname::set(&setup.hostname)?;
    }

    Ok(())
}
