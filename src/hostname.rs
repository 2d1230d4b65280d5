use anyhow::{Context, Error};
use log::debug;

use crate::{dependencies::Dependency, exe::RunAndCheck};

/// Sets the machine hostname via `hostnamectl set-hostname`. A non-zero exit
/// from hostnamectl fails the run.
pub fn set(hostname: &str) -> Result<(), Error> {
    debug!("Setting hostname to '{hostname}'");
    Dependency::Hostnamectl
        .cmd()
        .arg("set-hostname")
        .arg(hostname)
        .run_and_check()
        .with_context(|| format!("Failed to set hostname to '{hostname}'"))
}
