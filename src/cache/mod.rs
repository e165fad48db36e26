//! On-disk JSON cache of Infoblox data.
//!
//! Networks are cached once per day in `<data_dir>/networks_cache_<YYYY-MM-DD>.json`.
//! Per-network address lists go to `<data_dir>/{ips,devices}/<addr>_to_<mask>.json`.

mod files;

pub use files::{
    address_cache_path, networks_cache_path, read_json, read_network_cache, write_json,
    AddressKind,
};
