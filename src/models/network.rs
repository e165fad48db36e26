//! Infoblox network and IPv4 address records.

use super::de::value_to_text;
use super::Ipv4;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Extended attribute key holding the VLAN descriptor.
pub const EXTATTR_VLAN: &str = "VLAN";
/// Extended attribute key holding the site name.
pub const EXTATTR_SITE: &str = "Site";

/// One extended attribute; Infoblox sends the value as a string or a number.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ExtAttr {
    pub value: Value,
}

impl ExtAttr {
    pub fn text(&self) -> String {
        value_to_text(&self.value)
    }
}

/// An Infoblox `network` object. Identity is the (CIDR, view) pair.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct NetworkRecord {
    #[serde(rename = "_ref")]
    pub reference: String,
    pub network: Ipv4,
    pub network_view: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extattrs: BTreeMap<String, ExtAttr>,
}

impl NetworkRecord {
    pub fn key(&self) -> (Ipv4, &str) {
        (self.network, &self.network_view)
    }

    /// Raw VLAN descriptor, if the network carries one.
    pub fn vlan_attr(&self) -> Option<String> {
        self.extattrs.get(EXTATTR_VLAN).map(ExtAttr::text)
    }

    pub fn site(&self) -> Option<String> {
        self.extattrs.get(EXTATTR_SITE).map(ExtAttr::text)
    }

    /// Copy of this network whose VLAN attribute is the single `number`.
    pub fn with_vlan(&self, number: u32) -> NetworkRecord {
        let mut network = self.clone();
        network.extattrs.insert(
            EXTATTR_VLAN.to_string(),
            ExtAttr {
                value: Value::String(number.to_string()),
            },
        );
        network
    }
}

/// An Infoblox `ipv4address` object.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Ipv4AddressRecord {
    #[serde(rename = "_ref")]
    pub reference: String,
    pub ip_address: String,
    #[serde(default)]
    pub is_conflict: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mac_address: Option<String>,
    #[serde(default)]
    pub names: Vec<String>,
    #[serde(default)]
    pub network: String,
    #[serde(default)]
    pub network_view: String,
    #[serde(default)]
    pub objects: Vec<String>,
    /// "USED" or "UNUSED".
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default)]
    pub usage: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discovered_data: Option<Value>,
}
