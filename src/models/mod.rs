//! Domain models for the Infoblox to Device42 sync.
//!
//! This module contains the core data structures used throughout the application:
//! - [`Ipv4`] - IPv4 network in CIDR notation
//! - [`NetworkRecord`] and [`Ipv4AddressRecord`] - Infoblox objects
//! - [`VlanDescriptor`] - parsed VLAN extended attribute
//! - [`VlanRecord`], [`SubnetRecord`], [`CustomField`] - Device42 payloads

pub mod de;
mod ipv4;
mod network;
mod subnet;
mod vlan;

// Re-export public types
pub use ipv4::{cut_addr, get_cidr_mask, Ipv4, MAX_LENGTH};
pub use network::{ExtAttr, Ipv4AddressRecord, NetworkRecord, EXTATTR_SITE, EXTATTR_VLAN};
pub use subnet::{CustomField, ServiceInstanceCustomField, SubnetRecord};
pub use vlan::{truncate_name, vlan_description, VlanDescriptor, VlanParseError, VlanRecord};
