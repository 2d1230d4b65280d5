use std::{fs, path::Path};

use anyhow::{Context, Error};
use log::info;
use serde::Deserialize;

/// Desired network state for this host, loaded once at startup and threaded
/// through the renderers.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NetworkSetup {
    /// Physical device to configure, e.g. `eno1`.
    pub interface: String,
    /// Static address in CIDR notation, e.g. `192.0.2.10/24`.
    pub address: String,
    /// Default gateway address.
    pub gateway: String,
    /// Nameserver addresses, in lookup order.
    pub dns: Vec<String>,
    /// Hostname to apply via hostnamectl.
    pub hostname: String,
}

/// Loads the network setup from a JSON file.
///
/// Any failure (missing file, invalid JSON, top-level value not an object,
/// missing or mis-typed keys) is returned to the caller, which decides how to
/// exit; nothing is written to disk before this succeeds.
pub fn load(path: impl AsRef<Path>) -> Result<NetworkSetup, Error> {
    let path = path.as_ref();
    info!("Loading network setup from '{}'", path.display());

    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file '{}'", path.display()))?;

    serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse config file '{}'", path.display()))
}
