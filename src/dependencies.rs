use std::{path::PathBuf, process::Command};

use strum_macros::IntoStaticStr;

/// External binaries invoked at runtime.
#[derive(Debug, Clone, Copy, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum Dependency {
    Hostnamectl,
    Netplan,
}

impl std::fmt::Display for Dependency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.into())
    }
}

impl Dependency {
    /// Path for a dependency not reliably in $PATH.
    fn path_override(&self) -> Option<PathBuf> {
        Some(PathBuf::from(match self {
            Self::Netplan => "/usr/sbin/netplan",
            _ => return None,
        }))
    }

    pub fn name(&self) -> &'static str {
        self.into()
    }

    /// Converts the dependency to a new `std::process::Command`.
    pub fn cmd(&self) -> Command {
        match self.path_override() {
            Some(path) => Command::new(path),
            None => Command::new(self.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names() {
        assert_eq!(Dependency::Hostnamectl.name(), "hostnamectl");
        assert_eq!(Dependency::Netplan.name(), "netplan");
        assert_eq!(Dependency::Hostnamectl.to_string(), "hostnamectl");
    }

    #[test]
    fn test_cmd_program() {
        let cmd = Dependency::Hostnamectl.cmd();
        assert_eq!(cmd.get_program(), "hostnamectl");

        let cmd = Dependency::Netplan.cmd();
        assert_eq!(cmd.get_program(), "/usr/sbin/netplan");
    }
}
