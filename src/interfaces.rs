use std::{fs, path::Path};

use anyhow::{Context, Error};

use crate::config::NetworkSetup;

/// Path of the legacy ifupdown config file.
pub const INTERFACES_FILE: &str = "/etc/network/interfaces";

/// A representation of an `/etc/network/interfaces` file.
#[derive(Debug, Default, PartialEq)]
pub struct InterfacesFile {
    /// Interfaces to bring up at boot, one `auto` line each.
    pub auto: Vec<String>,
    /// Interface stanzas, rendered in order.
    pub interfaces: Vec<InterfaceStanza>,
}

/// A single `iface` stanza.
#[derive(Debug, PartialEq)]
pub struct InterfaceStanza {
    pub name: String,
    /// Addressing method (`loopback`, `manual`, `static`, ...). Rendered as
    /// `manual` when absent.
    pub method: Option<String>,
    pub params: Vec<(String, ParamValue)>,
}

/// Value of a stanza parameter. Lists are flattened to a single
/// space-joined line when rendered.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Single(String),
    List(Vec<String>),
}

impl ParamValue {
    fn render(&self) -> String {
        match self {
            ParamValue::Single(value) => value.clone(),
            ParamValue::List(values) => values.join(" "),
        }
    }
}

impl InterfaceStanza {
    pub fn new(name: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            method: Some(method.into()),
            params: Vec::new(),
        }
    }

    /// Adds a parameter line to this stanza.
    pub fn with_param(mut self, key: impl Into<String>, value: ParamValue) -> Self {
        self.params.push((key.into(), value));
        self
    }
}

impl InterfacesFile {
    /// Renders this file as a string: the `auto` lines, a blank line, then
    /// one stanza per interface, each followed by a blank line.
    pub fn render(&self) -> String {
        let mut lines = Vec::new();

        for name in &self.auto {
            lines.push(format!("auto {name}"));
        }
        lines.push(String::new());

        for stanza in &self.interfaces {
            lines.push(format!(
                "iface {} inet {}",
                stanza.name,
                stanza.method.as_deref().unwrap_or("manual")
            ));
            for (key, value) in &stanza.params {
                lines.push(format!("    {key} {}", value.render()));
            }
            lines.push(String::new());
        }

        lines.join("\n")
    }

    /// Writes this file to disk at `path`. The previous contents are
    /// overwritten in place.
    pub fn write(&self, path: impl AsRef<Path>) -> Result<(), Error> {
        fs::write(path.as_ref(), self.render().as_bytes())
            .with_context(|| format!("Failed to write {}", path.as_ref().display()))
    }
}

/// Builds the fallback configuration for hosts without netplan: loopback, the
/// physical port `eno1` left unaddressed, and a `vmbr0` bridge over it
/// carrying the configured static address and gateway.
pub fn bridge_fallback(setup: &NetworkSetup) -> InterfacesFile {
    InterfacesFile {
        auto: vec!["lo".into(), "vmbr0".into()],
        interfaces: vec![
            InterfaceStanza::new("lo", "loopback"),
            InterfaceStanza::new("eno1", "manual"),
            InterfaceStanza::new("vmbr0", "static")
                .with_param("address", ParamValue::Single(setup.address.clone()))
                .with_param("gateway", ParamValue::Single(setup.gateway.clone()))
                .with_param("bridge-ports", ParamValue::List(vec!["eno1".into()]))
                .with_param("bridge-stp", ParamValue::Single("off".into()))
                .with_param("bridge-fd", ParamValue::Single("0".into())),
        ],
    }
}
