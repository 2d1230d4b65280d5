use std::path::PathBuf;

use clap::Parser;
use log::LevelFilter;

#[derive(Parser, Debug)]
#[clap(version, about)]
pub struct Cli {
    /// Path of the JSON network setup file
    #[clap(index = 1, default_value = "config.json")]
    pub config: PathBuf,

    /// Run `netplan generate` and `netplan apply` after writing the config
    #[clap(long)]
    pub apply: bool,

    /// Do not set the hostname
    #[clap(long)]
    pub skip_hostname: bool,

    /// Logging verbosity [OFF, ERROR, WARN, INFO, DEBUG, TRACE]
    #[arg(short, long, default_value_t = LevelFilter::Info)]
    pub verbosity: LevelFilter,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["netsetup"]);
        assert_eq!(cli.config, PathBuf::from("config.json"));
        assert!(!cli.apply);
        assert!(!cli.skip_hostname);
        assert_eq!(cli.verbosity, LevelFilter::Info);
    }

    #[test]
    fn test_flags() {
        let cli = Cli::parse_from([
            "netsetup",
            "/tmp/net.json",
            "--apply",
            "--skip-hostname",
            "-v",
            "debug",
        ]);
        assert_eq!(cli.config, PathBuf::from("/tmp/net.json"));
        assert!(cli.apply);
        assert!(cli.skip_hostname);
        assert_eq!(cli.verbosity, LevelFilter::Debug);
    }
}
