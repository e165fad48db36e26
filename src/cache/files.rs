//! Cache file naming and JSON read/write.

use crate::models::{Ipv4, NetworkRecord};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::path::{Path, PathBuf};

/// Which address list a per-network cache file holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressKind {
    /// Every used address.
    Ips,
    /// Used addresses that carry a MAC address.
    Devices,
}

impl AddressKind {
    fn dir_name(&self) -> &'static str {
        match self {
            AddressKind::Ips => "ips",
            AddressKind::Devices => "devices",
        }
    }
}

/// Today's networks cache file, dated in `timezone`.
///
/// A network view gets its own file, `networks_cache_<view>_<date>.json`.
pub fn networks_cache_path(
    data_dir: &Path,
    timezone: &str,
    view: Option<&str>,
) -> Result<PathBuf, Box<dyn Error>> {
    let tz: chrono_tz::Tz = timezone
        .parse()
        .map_err(|e| format!("Unknown cache timezone '{timezone}': {e}"))?;
    let date = chrono::Utc::now().with_timezone(&tz).format("%Y-%m-%d");
    let name = match view {
        Some(view) => format!("networks_cache_{}_{date}.json", file_safe(view)),
        None => format!("networks_cache_{date}.json"),
    };
    Ok(data_dir.join(name))
}

fn file_safe(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
        .collect()
}

pub fn address_cache_path(data_dir: &Path, kind: AddressKind, network: &Ipv4) -> PathBuf {
    data_dir
        .join(kind.dir_name())
        .join(format!("{}.json", network.file_stem()))
}

/// Read networks from the cache, or fetch and cache them.
///
/// # Arguments
/// * `cache_file` - Explicit cache file; must exist. Never fetched or overwritten.
/// * `default_file` - Dated cache file used when `cache_file` is None.
/// * `fetch` - Called when the default file is missing or unreadable.
pub fn read_network_cache<F>(
    cache_file: Option<&Path>,
    default_file: &Path,
    fetch: F,
) -> Result<Vec<NetworkRecord>, Box<dyn Error>>
where
    F: FnOnce() -> Result<Vec<NetworkRecord>, Box<dyn Error>>,
{
    if let Some(file) = cache_file {
        if !file.exists() {
            return Err(format!("Cache file does not exist: {}", file.display()).into());
        }
        log::info!("Using provided cache file: {}", file.display());
        return read_json(file);
    }

    match read_json(default_file) {
        Ok(networks) => Ok(networks),
        Err(e) => {
            log::warn!("Cache not usable {}: {e}", default_file.display());
            let networks = fetch()?;
            log::warn!(
                "Writing {} networks to cache file: {}",
                networks.len(),
                default_file.display()
            );
            write_json(default_file, &networks)?;
            Ok(networks)
        }
    }
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, Box<dyn Error>> {
    let json = std::fs::read_to_string(path)
        .map_err(|e| format!("Error reading {}: {e}", path.display()))?;
    log::info!("Reading from cache file: {}", path.display());
    let deserializer = &mut serde_json::Deserializer::from_str(&json);
    serde_path_to_error::deserialize(deserializer).map_err(|e| {
        format!(
            "Error parsing cache {}: path={} error={}",
            path.display(),
            e.path(),
            e.inner()
        )
        .into()
    })
}

/// Write `value` as pretty JSON, creating parent directories.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), Box<dyn Error>> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Error creating directory {}: {e}", parent.display()))?;
        }
    }
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Error serializing JSON for {}: {e}", path.display()))?;
    std::fs::write(path, json)
        .map_err(|e| format!("Error writing cache file {}: {e}", path.display()))?;
    log::debug!("Wrote {}", path.display());
    Ok(())
}
