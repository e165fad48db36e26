//! Settings and fixed limits.
//!
//! Settings come from an INI file with one section per remote system
//! (`[infoblox]`, `[d42]`) plus an optional `[sync]` section, overlaid by
//! `IPAM_SYNC_<SECTION>__<KEY>` environment variables, e.g. `IPAM_SYNC_D42__PASS`
//! (a `.env` file is loaded by `main`). Section names and keys are case-insensitive.

use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use std::error::Error;
use std::path::Path;

/// Infoblox rejects `_max_results` above this.
pub const MAX_RESULTS: u32 = 100;
/// Widest VLAN range ("low-high") that is expanded into discrete VLANs.
pub const MAX_VLAN_RANGE: u32 = 256;
/// Device42 VLAN names longer than this are truncated.
pub const VLAN_NAME_MAX_LEN: usize = 64;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
/// Page size for Device42 offset/limit collections.
pub const D42_PAGE_LIMIT: u32 = 1000;
pub const DEFAULT_CONFIG_FILE: &str = "infoblox_setup.cfg";
/// Network views matching this are left out unless configured otherwise.
pub const DEFAULT_EXCLUDE_VIEWS: &str = "(?i)voip";

/// Provenance marker written into the notes of every record we create.
pub const VLAN_NOTES: &str =
    "Warning This entry was automatically generated by a script that queries Infoblox! Use with caution";

/// Connection settings for one remote system.
#[derive(Deserialize, Debug, Clone)]
pub struct ClientConfig {
    /// Base URL, e.g. `https://gm.example.com/wapi/v2.10/`.
    pub host: String,
    pub user: String,
    pub pass: String,
    /// Skip TLS certificate verification.
    #[serde(default)]
    pub insecure: bool,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ClientConfig {
    pub fn new(host: &str, user: &str, pass: &str) -> ClientConfig {
        ClientConfig {
            host: host.to_string(),
            user: user.to_string(),
            pass: pass.to_string(),
            insecure: false,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Join the base URL and an endpoint path with exactly one `/`.
    pub fn url_for(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.host.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct SyncConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    #[serde(default)]
    pub network_view: Option<String>,
    /// Regex of network views to leave out of the networks cache.
    #[serde(default = "default_exclude_views")]
    pub exclude_views: String,
    /// IANA zone used to date-stamp cache file names.
    #[serde(default = "default_cache_timezone")]
    pub cache_timezone: String,
}

impl Default for SyncConfig {
    fn default() -> Self {
        SyncConfig {
            data_dir: default_data_dir(),
            network_view: None,
            exclude_views: default_exclude_views(),
            cache_timezone: default_cache_timezone(),
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct Settings {
    pub infoblox: ClientConfig,
    pub d42: ClientConfig,
    #[serde(default)]
    pub sync: SyncConfig,
}

impl Settings {
    /// Load settings from the INI file at `path`, then the environment.
    pub fn load(path: &Path) -> Result<Settings, Box<dyn Error>> {
        Self::load_with_env(path, environment())
    }

    fn load_with_env(path: &Path, env: Environment) -> Result<Settings, Box<dyn Error>> {
        if !path.exists() {
            return Err(format!("Config file does not exist: {}", path.display()).into());
        }
        log::info!("Reading config file: {}", path.display());
        let ini = std::fs::read_to_string(path)
            .map_err(|e| format!("Error reading config file {}: {e}", path.display()))?;

        let settings = Config::builder()
            .add_source(File::from_str(&lowercase_ini_keys(&ini), FileFormat::Ini))
            .add_source(env)
            .build()
            .map_err(|e| format!("Error building config from {}: {e}", path.display()))?;

        Self::from_config(settings)
    }

    /// Parse settings from INI text (no environment overlay).
    pub fn from_ini_str(ini: &str) -> Result<Settings, Box<dyn Error>> {
        let settings = Config::builder()
            .add_source(File::from_str(&lowercase_ini_keys(ini), FileFormat::Ini))
            .build()
            .map_err(|e| format!("Error building config: {e}"))?;
        Self::from_config(settings)
    }

    fn from_config(settings: Config) -> Result<Settings, Box<dyn Error>> {
        let settings: Settings = settings
            .try_deserialize()
            .map_err(|e| format!("Error reading settings: {e}"))?;
        log::debug!(
            "infoblox={} d42={} data_dir={}",
            settings.infoblox.host,
            settings.d42.host,
            settings.sync.data_dir
        );
        Ok(settings)
    }
}

/// `IPAM_SYNC_` prefix, `__` between section and key.
fn environment() -> Environment {
    Environment::with_prefix("IPAM_SYNC")
        .prefix_separator("_")
        .separator("__")
}

/// Lowercase section names and keys so the file matches the lowercased
/// environment keys. Values and comments are left alone.
fn lowercase_ini_keys(ini: &str) -> String {
    ini.lines()
        .map(|line| {
            let trimmed = line.trim_start();
            if trimmed.starts_with('[') {
                line.to_lowercase()
            } else if trimmed.starts_with(';') || trimmed.starts_with('#') {
                line.to_string()
            } else {
                match line.split_once('=') {
                    Some((key, value)) => format!("{}={value}", key.to_lowercase()),
                    None => line.to_string(),
                }
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_data_dir() -> String {
    "data".to_string()
}

fn default_exclude_views() -> String {
    DEFAULT_EXCLUDE_VIEWS.to_string()
}

fn default_cache_timezone() -> String {
    "UTC".to_string()
}
