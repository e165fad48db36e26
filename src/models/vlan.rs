//! VLAN descriptors (Infoblox side) and VLAN records (Device42 side).

use super::de::{opt_id_from_any, text_from_any};
use super::{Ipv4, NetworkRecord};
use crate::config::{MAX_VLAN_RANGE, VLAN_NAME_MAX_LEN, VLAN_NOTES};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use thiserror::Error;

/// Parsed value of a network's VLAN extended attribute.
///
/// The attribute is free text in Infoblox: either one VLAN number or an
/// inclusive "low-high" range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VlanDescriptor {
    Single(u32),
    Range(u32, u32),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VlanParseError {
    #[error("Could not decipher the VLAN: {0}")]
    Malformed(String),
    #[error("VLAN range {raw} spans {width} VLANs, more than the limit of {limit}")]
    TooWide { raw: String, width: u64, limit: u32 },
}

impl VlanDescriptor {
    pub fn parse(raw: &str) -> Result<VlanDescriptor, VlanParseError> {
        let malformed = || VlanParseError::Malformed(raw.to_string());
        let parts = raw
            .split('-')
            .map(|part| part.trim().parse::<u32>())
            .collect::<Result<Vec<u32>, _>>()
            .map_err(|_| malformed())?;

        match parts.as_slice() {
            [number] => Ok(VlanDescriptor::Single(*number)),
            [low, high] if low <= high => {
                let width = u64::from(*high) - u64::from(*low) + 1;
                if width > u64::from(MAX_VLAN_RANGE) {
                    return Err(VlanParseError::TooWide {
                        raw: raw.to_string(),
                        width,
                        limit: MAX_VLAN_RANGE,
                    });
                }
                Ok(VlanDescriptor::Range(*low, *high))
            }
            _ => Err(malformed()),
        }
    }

    pub fn numbers(&self) -> RangeInclusive<u32> {
        match *self {
            VlanDescriptor::Single(n) => n..=n,
            VlanDescriptor::Range(low, high) => low..=high,
        }
    }
}

/// A Device42 VLAN as returned by `GET /api/1.0/vlans/` and sent on create.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct VlanRecord {
    #[serde(deserialize_with = "text_from_any")]
    pub number: String,
    #[serde(default, deserialize_with = "text_from_any")]
    pub name: String,
    #[serde(default, deserialize_with = "text_from_any")]
    pub description: String,
    #[serde(default, deserialize_with = "text_from_any")]
    pub notes: String,
    /// Assigned by Device42 once the VLAN exists.
    #[serde(
        default,
        deserialize_with = "opt_id_from_any",
        skip_serializing_if = "Option::is_none"
    )]
    pub vlan_id: Option<u64>,
}

impl VlanRecord {
    /// Candidate record for VLAN `number` on `network`.
    pub fn for_network(network: &NetworkRecord, number: u32) -> VlanRecord {
        VlanRecord {
            number: number.to_string(),
            name: truncate_name(network.comment.as_deref().unwrap_or(""), VLAN_NAME_MAX_LEN),
            description: vlan_description(&network.network),
            notes: VLAN_NOTES.to_string(),
            vlan_id: None,
        }
    }

    /// Same name and description; the fields a duplicate check compares.
    pub fn same_identity(&self, other: &VlanRecord) -> bool {
        self.name == other.name && self.description == other.description
    }

    pub fn to_form(&self) -> Vec<(String, String)> {
        vec![
            ("number".to_string(), self.number.clone()),
            ("name".to_string(), self.name.clone()),
            ("description".to_string(), self.description.clone()),
            ("notes".to_string(), self.notes.clone()),
        ]
    }
}

pub fn vlan_description(network: &Ipv4) -> String {
    format!("Vlan for subnetwork {network}")
}

/// Cut `name` to at most `max` characters.
pub fn truncate_name(name: &str, max: usize) -> String {
    name.chars().take(max).collect()
}
