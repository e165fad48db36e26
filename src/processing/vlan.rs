//! VLAN reconciliation: Infoblox VLAN attribute -> Device42 VLAN id.

use crate::device42::Device42Error;
use crate::models::{NetworkRecord, VlanDescriptor, VlanRecord};
use colored::Colorize;

/// Prepended to the notes of a VLAN created while Device42 already holds
/// several VLANs with the same number.
pub const DUPLICATE_NUMBER_WARNING: &str =
    "Warning: Two VLANS have the same number! This is likely a mistake";

/// Where VLAN records live. Implemented by the Device42 client.
pub trait VlanStore {
    /// Existing VLANs carrying `number`.
    fn vlans_by_number(&mut self, number: u32) -> Result<Vec<VlanRecord>, Device42Error>;
    /// Create `vlan` and return its assigned id.
    fn create_vlan(&mut self, vlan: &VlanRecord) -> Result<u64, Device42Error>;
}

/// Outcome of resolving one network's VLAN attribute.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VlanResolution {
    /// First resolved Device42 VLAN id.
    pub vlan_id: Option<u64>,
    /// Data-quality note; empty when there is nothing to report.
    pub warning: String,
    pub created: usize,
    pub reused: usize,
}

/// Resolve the Device42 VLAN id for `network`, creating VLANs as needed.
///
/// - no VLAN attribute: `(None, "")`
/// - malformed or oversized attribute: `(None, <warning>)`, nothing sent
/// - single number: reuse a VLAN with the same name and description, else create one
/// - range: every number in the range is resolved; the first id found is
///   returned with a multiple-VLAN warning
///
/// Device42 failures are returned as errors.
pub fn resolve_vlan_id<S: VlanStore + ?Sized>(
    store: &mut S,
    network: &NetworkRecord,
) -> Result<VlanResolution, Device42Error> {
    let raw = match network.vlan_attr() {
        Some(raw) => raw,
        None => return Ok(VlanResolution::default()),
    };

    let descriptor = match VlanDescriptor::parse(&raw) {
        Ok(descriptor) => descriptor,
        Err(e) => {
            log::warn!(
                "{warning} {network}: {e}",
                warning = "Warning".on_red(),
                network = network.network
            );
            return Ok(VlanResolution {
                warning: e.to_string(),
                ..Default::default()
            });
        }
    };

    match descriptor {
        VlanDescriptor::Single(number) => resolve_single(store, network, number),
        VlanDescriptor::Range(..) => {
            log::info!("{} has VLAN range {raw}, expanding", network.network);
            let mut resolution = VlanResolution {
                warning: format!("Multiple VLANs found for this entry: {raw}"),
                ..Default::default()
            };
            for number in descriptor.numbers() {
                let single = resolve_single(store, &network.with_vlan(number), number)?;
                resolution.vlan_id = resolution.vlan_id.or(single.vlan_id);
                resolution.created += single.created;
                resolution.reused += single.reused;
                if !single.warning.is_empty() {
                    resolution.warning.push_str(&format!("; VLAN {number}: {}", single.warning));
                }
            }
            Ok(resolution)
        }
    }
}

fn resolve_single<S: VlanStore + ?Sized>(
    store: &mut S,
    network: &NetworkRecord,
    number: u32,
) -> Result<VlanResolution, Device42Error> {
    let mut candidate = VlanRecord::for_network(network, number);
    let existing = store.vlans_by_number(number)?;

    if let Some(found) = existing.iter().find(|vlan| vlan.same_identity(&candidate)) {
        log::debug!(
            "Reusing vlan number={number} id={:?} for {}",
            found.vlan_id,
            network.network
        );
        return Ok(VlanResolution {
            vlan_id: found.vlan_id,
            reused: 1,
            ..Default::default()
        });
    }

    let mut warning = String::new();
    if existing.len() > 1 {
        log::warn!(
            "{} vlan number={number} already used {} times, creating another for {}",
            "Duplicate".on_red(),
            existing.len(),
            network.network
        );
        warning = DUPLICATE_NUMBER_WARNING.to_string();
        candidate.notes = format!("{DUPLICATE_NUMBER_WARNING}\n{}", candidate.notes);
    }

    let vlan_id = store.create_vlan(&candidate)?;
    Ok(VlanResolution {
        vlan_id: Some(vlan_id),
        warning,
        created: 1,
        reused: 0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::VLAN_NOTES;
    use crate::processing::memory_store::MemoryVlanStore;
    use serde_json::json;

    fn network(vlan: Option<&str>) -> NetworkRecord {
        let mut value = json!({
            "_ref": "network/abc",
            "network": "10.0.0.0/24",
            "network_view": "default",
            "comment": "Lab-VLAN"
        });
        if let Some(vlan) = vlan {
            value["extattrs"] = json!({"VLAN": {"value": vlan}});
        }
        serde_json::from_value(value).unwrap()
    }

    fn existing(number: &str, name: &str, description: &str, id: u64) -> VlanRecord {
        VlanRecord {
            number: number.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            notes: String::new(),
            vlan_id: Some(id),
        }
    }

    #[test]
    fn test_no_vlan_attribute() {
        let mut store = MemoryVlanStore::default();
        let resolution = resolve_vlan_id(&mut store, &network(None)).unwrap();
        assert_eq!(resolution, VlanResolution::default());
        assert_eq!(store.lookups, 0, "No remote call without a VLAN");
    }

    #[test]
    fn test_malformed_vlan() {
        let mut store = MemoryVlanStore::default();
        let resolution = resolve_vlan_id(&mut store, &network(Some("abc"))).unwrap();
        assert_eq!(resolution.vlan_id, None);
        assert_eq!(resolution.warning, "Could not decipher the VLAN: abc");
        assert_eq!(store.lookups, 0);
    }

    #[test]
    fn test_oversized_range_is_a_warning() {
        let mut store = MemoryVlanStore::default();
        let resolution = resolve_vlan_id(&mut store, &network(Some("1-4094"))).unwrap();
        assert_eq!(resolution.vlan_id, None);
        assert!(resolution.warning.contains("1-4094"), "{}", resolution.warning);
        assert_eq!(store.lookups, 0, "Oversized range is never expanded");
    }

    #[test]
    fn test_single_vlan_created() {
        let mut store = MemoryVlanStore::default();
        let resolution = resolve_vlan_id(&mut store, &network(Some("50"))).unwrap();
        assert_eq!(resolution.vlan_id, Some(1));
        assert_eq!(resolution.warning, "");
        assert_eq!(resolution.created, 1);

        let created = &store.created[0];
        assert_eq!(created.number, "50");
        assert_eq!(created.name, "Lab-VLAN");
        assert_eq!(created.description, "Vlan for subnetwork 10.0.0.0/24");
        assert_eq!(created.notes, VLAN_NOTES);
    }

    #[test]
    fn test_existing_match_is_reused() {
        let mut store = MemoryVlanStore::default();
        store.insert(existing("50", "Lab-VLAN", "Vlan for subnetwork 10.0.0.0/24", 77));
        let resolution = resolve_vlan_id(&mut store, &network(Some("50"))).unwrap();
        assert_eq!(resolution.vlan_id, Some(77));
        assert_eq!(resolution.warning, "");
        assert_eq!(resolution.reused, 1);
        assert!(store.created.is_empty());
    }

    #[test]
    fn test_resolve_twice_is_idempotent() {
        let mut store = MemoryVlanStore::default();
        let first = resolve_vlan_id(&mut store, &network(Some("50"))).unwrap();
        let second = resolve_vlan_id(&mut store, &network(Some("50"))).unwrap();
        assert_eq!(first.vlan_id, second.vlan_id);
        assert_eq!(store.created.len(), 1, "No duplicate VLAN created");
        assert_eq!(second.reused, 1);
    }

    #[test]
    fn test_single_existing_mismatch_has_no_warning() {
        let mut store = MemoryVlanStore::default();
        store.insert(existing("50", "Other", "Vlan for subnetwork 10.9.0.0/24", 5));
        let resolution = resolve_vlan_id(&mut store, &network(Some("50"))).unwrap();
        assert_eq!(resolution.vlan_id, Some(6));
        assert_eq!(resolution.warning, "");
        assert_eq!(store.created[0].notes, VLAN_NOTES);
    }

    #[test]
    fn test_duplicate_number_mismatch_warns() {
        let mut store = MemoryVlanStore::default();
        store.insert(existing("50", "A", "Vlan for subnetwork 10.1.0.0/24", 5));
        store.insert(existing("50", "B", "Vlan for subnetwork 10.2.0.0/24", 6));
        let resolution = resolve_vlan_id(&mut store, &network(Some("50"))).unwrap();
        assert_eq!(resolution.vlan_id, Some(7));
        assert_eq!(resolution.warning, DUPLICATE_NUMBER_WARNING);
        let notes = &store.created[0].notes;
        assert!(notes.starts_with(DUPLICATE_NUMBER_WARNING), "notes={notes}");
        assert!(notes.ends_with(VLAN_NOTES));
    }

    #[test]
    fn test_range_expands_every_number() {
        let mut store = MemoryVlanStore::default();
        store.insert(existing("11", "Lab-VLAN", "Vlan for subnetwork 10.0.0.0/24", 40));
        let resolution = resolve_vlan_id(&mut store, &network(Some("10-12"))).unwrap();

        assert_eq!(store.looked_up, vec![10, 11, 12]);
        assert_eq!(
            store.created.iter().map(|v| v.number.as_str()).collect::<Vec<_>>(),
            vec!["10", "12"]
        );
        assert_eq!(resolution.vlan_id, Some(41), "First non-null id (VLAN 10)");
        assert_eq!(resolution.created, 2);
        assert_eq!(resolution.reused, 1);
        assert!(resolution.warning.starts_with("Multiple VLANs found for this entry: 10-12"));
    }

    #[test]
    fn test_range_with_missing_ids_picks_first_known() {
        let mut store = MemoryVlanStore::default();
        let mut no_id = existing("20", "Lab-VLAN", "Vlan for subnetwork 10.0.0.0/24", 0);
        no_id.vlan_id = None;
        store.insert(no_id);
        store.insert(existing("21", "Lab-VLAN", "Vlan for subnetwork 10.0.0.0/24", 99));
        let resolution = resolve_vlan_id(&mut store, &network(Some("20-21"))).unwrap();
        assert_eq!(resolution.vlan_id, Some(99));
        assert!(store.created.is_empty());
    }

    #[test]
    fn test_store_error_propagates() {
        let mut store = MemoryVlanStore {
            fail_on: Some(11),
            ..Default::default()
        };
        let err = resolve_vlan_id(&mut store, &network(Some("10-12"))).unwrap_err();
        assert!(matches!(err, Device42Error::ReturnCode { .. }));
    }
}
