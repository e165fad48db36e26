//! Sync logic between Infoblox networks and Device42.
//!
//! - [`vlan`] - VLAN reconciliation for a single network
//! - [`filter`] - view exclusion and de-duplication of the network list
//! - [`sync`] - batch drivers with per-network failure isolation

mod filter;
mod sync;
mod vlan;

#[cfg(test)]
pub(crate) mod memory_store;

// Re-export public functions
pub use filter::{select_networks, view_filter};
pub use sync::{sync_subnets, sync_vlans, SyncSummary};
pub use vlan::{resolve_vlan_id, VlanResolution, VlanStore, DUPLICATE_NUMBER_WARNING};
