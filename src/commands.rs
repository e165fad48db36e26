//! Subcommand drivers. `run` wires real HTTP clients from the settings.

use crate::cache::{
    address_cache_path, networks_cache_path, read_network_cache, write_json, AddressKind,
};
use crate::cli::{CacheArgs, Cli, Command, NetworksArgs, SetCustomFieldArgs};
use crate::config::Settings;
use crate::device42::D42Client;
use crate::http::{RestClient, Transport};
use crate::infoblox::InfobloxClient;
use crate::models::{CustomField, NetworkRecord};
use crate::output::{print_networks, print_summary};
use crate::processing::{select_networks, sync_subnets, sync_vlans, view_filter};
use colored::Colorize;
use serde::Serialize;
use std::error::Error;
use std::path::{Path, PathBuf};

pub fn run(cli: &Cli, settings: &Settings) -> Result<(), Box<dyn Error>> {
    let data_dir = cli
        .data_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from(&settings.sync.data_dir));
    log::info!("#Start {:?} data_dir={}", cli.command, data_dir.display());

    match &cli.command {
        Command::Networks(args) => networks(settings, &data_dir, args),
        Command::Ips(args) => addresses(settings, &data_dir, args, AddressKind::Ips),
        Command::Devices(args) => addresses(settings, &data_dir, args, AddressKind::Devices),
        Command::Vlans(args) => {
            let networks = load_networks(settings, &data_dir, args)?;
            let summary = sync_vlans(&mut d42_client(settings), &networks)?;
            print_summary("vlans", &summary);
            Ok(())
        }
        Command::Subnets(args) => {
            let networks = load_networks(settings, &data_dir, args)?;
            let summary = sync_subnets(&mut d42_client(settings), &networks)?;
            print_summary("subnets", &summary);
            Ok(())
        }
        Command::CustomFields => {
            print_json(&d42_client(settings).service_instance_custom_fields()?)
        }
        Command::SetCustomField(args) => set_custom_field(&mut d42_client(settings), args),
        Command::ServiceInstances => print_json(&d42_client(settings).all_service_instances()?),
        Command::D42Devices => print_json(&d42_client(settings).all_devices()?),
    }
}

/// The view given on the command line, else the configured one.
pub fn network_view(settings: &Settings, cli_view: Option<&str>) -> Option<String> {
    cli_view
        .map(str::to_string)
        .or_else(|| settings.sync.network_view.clone())
}

fn infoblox_client(settings: &Settings, view: Option<String>) -> InfobloxClient<RestClient> {
    InfobloxClient::new(RestClient::new(settings.infoblox.clone()), view)
}

fn d42_client(settings: &Settings) -> D42Client<RestClient> {
    D42Client::new(RestClient::new(settings.d42.clone()))
}

fn networks(settings: &Settings, data_dir: &Path, args: &NetworksArgs) -> Result<(), Box<dyn Error>> {
    let view = network_view(settings, args.view.as_deref());
    let cache_file = networks_cache_path(data_dir, &settings.sync.cache_timezone, view.as_deref())?;
    let mut infoblox = infoblox_client(settings, view);
    let exclude = &settings.sync.exclude_views;

    let networks = if args.refresh {
        let networks = fetch_networks(&mut infoblox, exclude)?;
        write_json(&cache_file, &networks)?;
        networks
    } else {
        read_network_cache(None, &cache_file, || fetch_networks(&mut infoblox, exclude))?
    };
    print_networks(&networks);
    log::info!("{} networks in {}", networks.len(), cache_file.display());
    Ok(())
}

fn load_networks(
    settings: &Settings,
    data_dir: &Path,
    args: &CacheArgs,
) -> Result<Vec<NetworkRecord>, Box<dyn Error>> {
    let view = network_view(settings, args.view.as_deref());
    let cache_file = networks_cache_path(data_dir, &settings.sync.cache_timezone, view.as_deref())?;
    read_network_cache(args.networks_cache.as_deref(), &cache_file, || {
        fetch_networks(&mut infoblox_client(settings, view), &settings.sync.exclude_views)
    })
}

fn addresses(
    settings: &Settings,
    data_dir: &Path,
    args: &CacheArgs,
    kind: AddressKind,
) -> Result<(), Box<dyn Error>> {
    let networks = load_networks(settings, data_dir, args)?;
    let mut infoblox = infoblox_client(settings, network_view(settings, args.view.as_deref()));
    let (written, failed) = cache_addresses(&mut infoblox, &networks, data_dir, kind)?;
    println!(
        "#{kind:?}# networks={} written={written} failed={}",
        networks.len(),
        if failed > 0 { failed.to_string().on_red().to_string() } else { failed.to_string() }
    );
    Ok(())
}

/// All Infoblox networks minus excluded views, sorted and de-duplicated.
pub fn fetch_networks<T: Transport>(
    infoblox: &mut InfobloxClient<T>,
    exclude_views: &str,
) -> Result<Vec<NetworkRecord>, Box<dyn Error>> {
    let exclude = view_filter(exclude_views)?;
    let networks = infoblox.networks()?;
    log::info!("Infoblox returned {} networks", networks.len());
    Ok(select_networks(networks, &exclude))
}

/// Write one address cache file per network. Returns (written, failed).
///
/// A failed network is logged and skipped.
pub fn cache_addresses<T: Transport>(
    infoblox: &mut InfobloxClient<T>,
    networks: &[NetworkRecord],
    data_dir: &Path,
    kind: AddressKind,
) -> Result<(usize, usize), Box<dyn Error>> {
    let mut written = 0;
    let mut failed = 0;
    for network in networks {
        let records = match kind {
            AddressKind::Ips => infoblox.used_addresses(network),
            AddressKind::Devices => infoblox.devices(network),
        };
        match records {
            Ok(records) => {
                let path = address_cache_path(data_dir, kind, &network.network);
                log::debug!("{} {} addresses -> {}", network.network, records.len(), path.display());
                write_json(&path, &records)?;
                written += 1;
            }
            Err(e) => {
                log::error!("{} {}: {e}", "Failed".on_red(), network.network);
                failed += 1;
            }
        }
    }
    Ok((written, failed))
}

pub fn set_custom_field<T: Transport>(
    d42: &mut D42Client<T>,
    args: &SetCustomFieldArgs,
) -> Result<(), Box<dyn Error>> {
    let field = CustomField {
        id: args.id,
        key: args.key.clone(),
        value: args.value.clone(),
    };
    let msg = d42.update_service_instance_custom_field(&field)?;
    log::info!("Set custom field id={} key={}: {msg}", field.id, field.key);
    println!("{msg}");
    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), Box<dyn Error>> {
    let json =
        serde_json::to_string_pretty(value).map_err(|e| format!("Error serializing JSON: {e}"))?;
    println!("{json}");
    Ok(())
}
