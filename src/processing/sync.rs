//! Batch drivers: run the VLAN reconciler (and subnet creation) over a network list.
//!
//! A failure on one network is logged and recorded, and the batch moves on.
//! License failures stop the batch since every further call would fail the same way.

use super::{resolve_vlan_id, VlanResolution, VlanStore};
use crate::device42::{D42Client, Device42Error};
use crate::http::Transport;
use crate::models::{NetworkRecord, SubnetRecord};
use colored::Colorize;

/// Counts and per-network notes from one sync run.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SyncSummary {
    pub processed: usize,
    pub vlans_created: usize,
    pub vlans_reused: usize,
    /// Networks without a usable VLAN attribute.
    pub skipped: usize,
    pub subnets_created: usize,
    /// (network, warning)
    pub warnings: Vec<(String, String)>,
    /// (network, error)
    pub failures: Vec<(String, String)>,
}

impl SyncSummary {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    fn record_resolution(&mut self, network: &NetworkRecord, resolution: &VlanResolution) {
        self.vlans_created += resolution.created;
        self.vlans_reused += resolution.reused;
        if resolution.created + resolution.reused == 0 {
            self.skipped += 1;
        }
        if !resolution.warning.is_empty() {
            self.warnings
                .push((network.network.to_string(), resolution.warning.clone()));
        }
    }

    fn record_failure(&mut self, network: &NetworkRecord, err: &Device42Error) {
        log::error!(
            "{} {} view={}: {err}",
            "Failed".on_red(),
            network.network,
            network.network_view
        );
        self.failures
            .push((network.network.to_string(), err.to_string()));
    }
}

/// Resolve (creating where needed) the VLANs of every network.
pub fn sync_vlans<S: VlanStore>(
    store: &mut S,
    networks: &[NetworkRecord],
) -> Result<SyncSummary, Device42Error> {
    let mut summary = SyncSummary::default();
    for network in networks {
        summary.processed += 1;
        match resolve_vlan_id(store, network) {
            Ok(resolution) => summary.record_resolution(network, &resolution),
            Err(e) if e.is_license_error() => return Err(e),
            Err(e) => summary.record_failure(network, &e),
        }
    }
    log::info!(
        "VLAN sync done: processed={} created={} reused={} skipped={} failed={}",
        summary.processed,
        summary.vlans_created,
        summary.vlans_reused,
        summary.skipped,
        summary.failures.len()
    );
    Ok(summary)
}

/// Create a Device42 subnet for every network, linked to its resolved VLAN.
pub fn sync_subnets<T: Transport>(
    client: &mut D42Client<T>,
    networks: &[NetworkRecord],
) -> Result<SyncSummary, Device42Error> {
    let mut summary = SyncSummary::default();
    for network in networks {
        summary.processed += 1;
        let resolution = match resolve_vlan_id(client, network) {
            Ok(resolution) => resolution,
            Err(e) if e.is_license_error() => return Err(e),
            Err(e) => {
                summary.record_failure(network, &e);
                continue;
            }
        };
        // VLANs created above exist whether or not the subnet create succeeds
        summary.record_resolution(network, &resolution);

        let mut subnet = SubnetRecord::for_network(network, resolution.vlan_id);
        if !resolution.warning.is_empty() {
            subnet.notes = format!("{}\n{}", resolution.warning, subnet.notes);
        }
        match client.create_subnet(&subnet) {
            Ok(_) => summary.subnets_created += 1,
            Err(e) if e.is_license_error() => return Err(e),
            Err(e) => summary.record_failure(network, &e),
        }
    }
    log::info!(
        "Subnet sync done: processed={} subnets={} failed={}",
        summary.processed,
        summary.subnets_created,
        summary.failures.len()
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::fake::FakeTransport;
    use crate::processing::memory_store::MemoryVlanStore;
    use serde_json::json;

    fn network(cidr: &str, vlan: Option<&str>) -> NetworkRecord {
        let mut value = json!({
            "_ref": format!("network/{cidr}"),
            "network": cidr,
            "network_view": "default",
            "comment": "Lab-VLAN"
        });
        if let Some(vlan) = vlan {
            value["extattrs"] = json!({"VLAN": {"value": vlan}});
        }
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_sync_vlans_counts() {
        let mut store = MemoryVlanStore::default();
        let networks = vec![
            network("10.0.0.0/24", Some("50")),
            network("10.0.1.0/24", None),
            network("10.0.2.0/24", Some("bogus")),
            network("10.0.3.0/24", Some("60-61")),
        ];
        let summary = sync_vlans(&mut store, &networks).unwrap();
        assert_eq!(summary.processed, 4);
        assert_eq!(summary.vlans_created, 3);
        assert_eq!(summary.skipped, 2);
        assert_eq!(summary.warnings.len(), 2, "{:?}", summary.warnings);
        assert!(summary.is_clean());
    }

    #[test]
    fn test_sync_vlans_isolates_failures() {
        let mut store = MemoryVlanStore {
            fail_on: Some(51),
            ..Default::default()
        };
        let networks = vec![
            network("10.0.0.0/24", Some("50")),
            network("10.0.1.0/24", Some("51")),
            network("10.0.2.0/24", Some("52")),
        ];
        let summary = sync_vlans(&mut store, &networks).unwrap();
        assert_eq!(summary.vlans_created, 2, "Networks after the failure still synced");
        assert_eq!(summary.failures.len(), 1);
        assert_eq!(summary.failures[0].0, "10.0.1.0/24");
        assert!(!summary.is_clean());
    }

    #[test]
    fn test_sync_vlans_stops_on_license_error() {
        let mut store = MemoryVlanStore {
            license_expired: true,
            ..Default::default()
        };
        let networks = vec![
            network("10.0.0.0/24", Some("50")),
            network("10.0.1.0/24", Some("51")),
        ];
        let err = sync_vlans(&mut store, &networks).unwrap_err();
        assert!(err.is_license_error());
        assert_eq!(store.lookups, 1, "Batch stopped at the first network");
    }

    #[test]
    fn test_sync_subnets_links_vlan() {
        let transport = FakeTransport::new()
            .reply_json(json!({"vlans": [], "total_count": 0}))
            .reply_json(json!({"code": 0, "msg": [17, "vlan added/updated"]}))
            .reply_json(json!({"code": 0, "msg": [301, "subnet added/updated"]}))
            .reply_json(json!({"code": 0, "msg": [302, "subnet added/updated"]}));
        let mut d42 = D42Client::new(transport);
        let networks = vec![
            network("10.0.0.0/24", Some("50")),
            network("10.0.1.0/24", None),
        ];
        let summary = sync_subnets(&mut d42, &networks).unwrap();
        assert_eq!(summary.subnets_created, 2);
        assert_eq!(summary.vlans_created, 1);

        let requests = &d42.transport().requests;
        assert_eq!(requests.len(), 4);
        assert_eq!(requests[2].path, "/api/1.0/subnets/");
        assert_eq!(requests[2].form_value("network"), Some("10.0.0.0"));
        assert_eq!(requests[2].form_value("mask_bits"), Some("24"));
        assert_eq!(requests[2].form_value("vlan_id"), Some("17"));
        assert_eq!(requests[3].form_value("vlan_id"), None);
    }

    #[test]
    fn test_sync_subnets_counts_vlan_when_subnet_fails() {
        let transport = FakeTransport::new()
            .reply_json(json!({"vlans": [], "total_count": 0}))
            .reply_json(json!({"code": 0, "msg": [17, "vlan added/updated"]}))
            .reply_json(json!({"code": 1, "msg": ["subnet", "overlaps"]}));
        let mut d42 = D42Client::new(transport);
        let summary = sync_subnets(&mut d42, &[network("10.0.0.0/24", Some("50"))]).unwrap();
        assert_eq!(summary.vlans_created, 1, "VLAN created before the subnet failed");
        assert_eq!(summary.subnets_created, 0);
        assert_eq!(summary.skipped, 0);
        assert_eq!(summary.failures.len(), 1);
        assert_eq!(summary.failures[0].0, "10.0.0.0/24");
    }

    #[test]
    fn test_sync_subnets_warning_lands_in_notes() {
        let transport = FakeTransport::new()
            .reply_json(json!({"code": 0, "msg": [5, "subnet added/updated"]}));
        let mut d42 = D42Client::new(transport);
        let summary = sync_subnets(&mut d42, &[network("10.0.0.0/24", Some("x"))]).unwrap();
        assert_eq!(summary.warnings.len(), 1);
        let notes = d42.transport().requests[0].form_value("notes").unwrap_or("");
        assert!(notes.starts_with("Could not decipher the VLAN: x"), "{notes}");
    }
}
