//! Copy Infoblox IPAM data (networks, VLANs, addresses) into Device42.
//!
//! Fetching goes through the cursor [`infoblox::Paginator`]; VLANs are
//! reconciled by [`processing::resolve_vlan_id`] against any
//! [`processing::VlanStore`], usually the [`device42::D42Client`].

pub mod cache;
pub mod cli;
pub mod commands;
pub mod config;
pub mod device42;
pub mod http;
pub mod infoblox;
pub mod models;
pub mod output;
pub mod processing;

pub use config::Settings;
pub use device42::{D42Client, Device42Error};
pub use http::{ApiRequest, ApiResponse, Method, RestClient, Transport, TransportError};
pub use infoblox::{paginate, InfobloxClient, InfobloxError};
pub use models::{NetworkRecord, VlanRecord};
pub use processing::{resolve_vlan_id, sync_subnets, sync_vlans, SyncSummary, VlanStore};
