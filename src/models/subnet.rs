//! Device42 subnet and custom-field payloads.

use super::de::text_from_any;
use super::NetworkRecord;
use crate::config::VLAN_NOTES;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Body of `POST /api/1.0/subnets/`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SubnetRecord {
    /// Network address without the mask, e.g. "10.0.0.0".
    pub network: String,
    pub mask_bits: u8,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vlan_id: Option<u64>,
}

impl SubnetRecord {
    /// Subnet for an Infoblox network, named after its comment (or CIDR).
    pub fn for_network(network: &NetworkRecord, vlan_id: Option<u64>) -> SubnetRecord {
        let name = match network.comment.as_deref() {
            Some(comment) if !comment.trim().is_empty() => comment.to_string(),
            _ => network.network.to_string(),
        };
        let mut description = format!("Infoblox view {}", network.network_view);
        if let Some(site) = network.site() {
            description.push_str(&format!(", site {site}"));
        }
        SubnetRecord {
            network: network.network.lo().to_string(),
            mask_bits: network.network.mask,
            name,
            description,
            notes: VLAN_NOTES.to_string(),
            vlan_id,
        }
    }

    pub fn to_form(&self) -> Vec<(String, String)> {
        let mut form = vec![
            ("network".to_string(), self.network.clone()),
            ("mask_bits".to_string(), self.mask_bits.to_string()),
            ("name".to_string(), self.name.clone()),
            ("description".to_string(), self.description.clone()),
            ("notes".to_string(), self.notes.clone()),
        ];
        if let Some(vlan_id) = self.vlan_id {
            form.push(("vlan_id".to_string(), vlan_id.to_string()));
        }
        form
    }
}

/// Body of `PUT /api/1.0/custom_fields/serviceinstance/`.
///
/// `value` is always text; JSON payloads must be serialized by the caller.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CustomField {
    /// Id of the object the field belongs to.
    pub id: u64,
    pub key: String,
    pub value: String,
}

impl CustomField {
    pub fn to_form(&self) -> Vec<(String, String)> {
        vec![
            ("id".to_string(), self.id.to_string()),
            ("key".to_string(), self.key.clone()),
            ("value".to_string(), self.value.clone()),
        ]
    }
}

/// Row of the `get_service_instance_custom_fields` DOQL query.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ServiceInstanceCustomField {
    pub id: u64,
    #[serde(deserialize_with = "text_from_any")]
    pub key: String,
    #[serde(default, deserialize_with = "text_from_any")]
    pub value: String,
    #[serde(default)]
    pub serviceinstance_fk: Option<u64>,
    #[serde(default)]
    pub service_name: Option<String>,
    #[serde(default, deserialize_with = "text_from_any")]
    pub notes: String,
    /// Remaining DOQL columns (type, filterable, mandatory, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
