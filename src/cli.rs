//! Command-line arguments.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::DEFAULT_CONFIG_FILE;

#[derive(Parser, Debug)]
#[command(name = "ipam-sync")]
#[command(about = "Copy Infoblox networks, VLANs and addresses into Device42")]
pub struct Cli {
    /// INI file with [infoblox] and [d42] sections.
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,
    /// Directory for cache files; overrides DATA_DIR from the config.
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch Infoblox networks into today's cache file and list them.
    Networks(NetworksArgs),
    /// Cache the used addresses of every cached network.
    Ips(CacheArgs),
    /// Cache the used addresses with a MAC address of every cached network.
    Devices(CacheArgs),
    /// Create or reuse a Device42 VLAN for every cached network.
    Vlans(CacheArgs),
    /// Create a Device42 subnet, linked to its VLAN, for every cached network.
    Subnets(CacheArgs),
    /// Print the service instance custom fields (saved DOQL query).
    CustomFields,
    /// Set one service instance custom field.
    SetCustomField(SetCustomFieldArgs),
    /// Print every Device42 service instance.
    ServiceInstances,
    /// Print every Device42 device.
    D42Devices,
}

#[derive(Args, Debug)]
pub struct NetworksArgs {
    /// Fetch from Infoblox even when today's cache exists.
    #[arg(long)]
    pub refresh: bool,
    /// Only this network view; overrides NETWORK_VIEW from the config.
    #[arg(long)]
    pub view: Option<String>,
}

#[derive(Args, Debug)]
pub struct CacheArgs {
    /// Networks cache file to read instead of today's.
    #[arg(long)]
    pub networks_cache: Option<PathBuf>,
    /// Use today's cache of this network view; overrides NETWORK_VIEW from the config.
    #[arg(long)]
    pub view: Option<String>,
}

#[derive(Args, Debug)]
pub struct SetCustomFieldArgs {
    /// Service instance id.
    #[arg(long)]
    pub id: u64,
    #[arg(long)]
    pub key: String,
    #[arg(long)]
    pub value: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_vlans_with_cache() {
        let cli = Cli::try_parse_from([
            "ipam-sync",
            "--config",
            "my.cfg",
            "vlans",
            "--networks-cache",
            "data/networks_cache_2024-01-01.json",
        ])
        .expect("Error parsing args");
        assert_eq!(cli.config, PathBuf::from("my.cfg"));
        match cli.command {
            Command::Vlans(args) => assert_eq!(
                args.networks_cache,
                Some(PathBuf::from("data/networks_cache_2024-01-01.json"))
            ),
            other => panic!("Expected vlans, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_defaults() {
        let cli = Cli::try_parse_from(["ipam-sync", "networks", "--refresh"]).unwrap();
        assert_eq!(cli.config, PathBuf::from(DEFAULT_CONFIG_FILE));
        assert!(cli.data_dir.is_none());
        assert!(matches!(cli.command, Command::Networks(NetworksArgs { refresh: true, view: None })));
    }

    #[test]
    fn test_parse_view_on_cache_commands() {
        let cli = Cli::try_parse_from(["ipam-sync", "subnets", "--view", "Lab"]).unwrap();
        match cli.command {
            Command::Subnets(args) => {
                assert_eq!(args.view.as_deref(), Some("Lab"));
                assert!(args.networks_cache.is_none());
            }
            other => panic!("Expected subnets, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_set_custom_field() {
        let cli = Cli::try_parse_from([
            "ipam-sync",
            "set-custom-field",
            "--id",
            "12",
            "--key",
            "custom_data",
            "--value",
            "{}",
        ])
        .unwrap();
        match cli.command {
            Command::SetCustomField(args) => {
                assert_eq!(args.id, 12);
                assert_eq!(args.key, "custom_data");
            }
            other => panic!("Expected set-custom-field, got {other:?}"),
        }
    }

    #[test]
    fn test_set_custom_field_requires_id() {
        assert!(Cli::try_parse_from(["ipam-sync", "set-custom-field", "--key", "k", "--value", "v"]).is_err());
    }
}
