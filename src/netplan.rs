use std::{collections::HashMap, fs};

use anyhow::{Context, Error};
use log::debug;
use netplan_types::{
    AddressMapping, CommonPropertiesAllDevices, EthernetConfig, NameserverConfig, NetworkConfig,
    Renderer, RoutingConfig,
};

use crate::{config::NetworkSetup, dependencies::Dependency, exe::RunAndCheck};

/// Directory scanned by netplan for configuration files. When it does not
/// exist the host is assumed to use ifupdown instead.
pub const NETPLAN_DIR: &str = "/etc/netplan";

/// Path of the netplan config file written by netsetup.
pub const NETPLAN_FILE: &str = "/etc/netplan/01-netcfg.yaml";

/// Builds the netplan network config for a single statically-addressed
/// ethernet device.
pub fn from_setup(setup: &NetworkSetup) -> NetworkConfig {
    let ethernet = EthernetConfig {
        common_all: Some(CommonPropertiesAllDevices {
            dhcp4: Some(false),
            accept_ra: Some(false),
            addresses: Some(vec![AddressMapping::Simple(setup.address.clone())]),
            nameservers: Some(NameserverConfig {
                addresses: Some(setup.dns.clone()),
                ..Default::default()
            }),
            routes: Some(vec![RoutingConfig {
                to: Some("default".into()),
                via: Some(setup.gateway.clone()),
                on_link: Some(true),
                ..Default::default()
            }]),
            ..Default::default()
        }),
        ..Default::default()
    };

    NetworkConfig {
        version: 2,
        renderer: Some(Renderer::Networkd),
        ethernets: Some(HashMap::from([(setup.interface.clone(), ethernet)])),
        ..Default::default()
    }
}

/// Renders the given network configuration as a netplan yaml string.
pub fn render(value: &NetworkConfig) -> Result<String, Error> {
    #[derive(serde::Serialize)]
    struct NetplanConfig<'a> {
        network: &'a NetworkConfig,
    }

    serde_yaml::to_string(&NetplanConfig { network: value })
        .context("Failed to render netplan yaml")
}

/// Writes the rendered netplan config to [`NETPLAN_FILE`].
pub fn write(value: &NetworkConfig) -> Result<(), Error> {
    debug!("Writing netplan config to {NETPLAN_FILE}");
    fs::write(NETPLAN_FILE, render(value)?)
        .with_context(|| format!("Failed to write netplan config to {NETPLAN_FILE}"))
}

/// Executes `netplan generate`.
pub fn generate() -> Result<(), Error> {
    debug!("Generating netplan config");
    Dependency::Netplan.cmd().arg("generate").run_and_check()?;
    Ok(())
}

/// Executes `netplan apply`.
pub fn apply() -> Result<(), Error> {
    debug!("Applying netplan config");
    Dependency::Netplan.cmd().arg("apply").run_and_check()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_setup() -> NetworkSetup {
        NetworkSetup {
            interface: "eno1".into(),
            address: "192.0.2.10/24".into(),
            gateway: "192.0.2.1".into(),
            dns: vec!["1.1.1.1".into(), "8.8.8.8".into()],
            hostname: "node01".into(),
        }
    }

    #[test]
    fn test_from_setup() {
        let setup = sample_setup();
        let netplan = from_setup(&setup);

        assert_eq!(netplan.version, 2);
        assert_eq!(netplan.renderer, Some(Renderer::Networkd));

        let ethernets = netplan.ethernets.as_ref().unwrap();
        assert_eq!(ethernets.len(), 1);

        let common = ethernets["eno1"].common_all.as_ref().unwrap();
        assert_eq!(common.dhcp4, Some(false));
        assert_eq!(common.accept_ra, Some(false));
        assert_eq!(
            common.addresses,
            Some(vec![AddressMapping::Simple("192.0.2.10/24".into())])
        );
        assert_eq!(
            common.nameservers.as_ref().unwrap().addresses,
            Some(vec!["1.1.1.1".into(), "8.8.8.8".into()])
        );

        let routes = common.routes.as_ref().unwrap();
        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].to.as_deref(), Some("default"));
        assert_eq!(routes[0].via.as_deref(), Some("192.0.2.1"));
        assert_eq!(routes[0].on_link, Some(true));
    }

    #[test]
    fn test_render() {
        let yaml = render(&from_setup(&sample_setup())).unwrap();

        assert!(yaml.starts_with("network:"));
        assert!(yaml.contains("version: 2"));
        assert!(yaml.contains("renderer: networkd"));
        assert!(yaml.contains("eno1:"));
        assert!(yaml.contains("dhcp4: false"));
        assert!(yaml.contains("accept-ra: false"));
        assert!(yaml.contains("- 192.0.2.10/24"));
        assert!(yaml.contains("- 1.1.1.1"));
        assert!(yaml.contains("- 8.8.8.8"));
        assert!(yaml.contains("to: default"));
        assert!(yaml.contains("via: 192.0.2.1"));
        assert!(yaml.contains("on-link: true"));
    }

    #[test]
    fn test_render_is_idempotent() {
        let setup = sample_setup();
        let first = render(&from_setup(&setup)).unwrap();
        let second = render(&from_setup(&setup)).unwrap();
        assert_eq!(first, second);
    }
}
