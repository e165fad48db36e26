//! Network list clean-up before a sync run.

use crate::models::NetworkRecord;
use regex::Regex;
use std::error::Error;

pub fn view_filter(pattern: &str) -> Result<Regex, Box<dyn Error>> {
    Regex::new(pattern).map_err(|e| format!("Invalid network view pattern '{pattern}': {e}").into())
}

/// Drop networks whose view matches `exclude`, then sort and de-duplicate by (CIDR, view).
pub fn select_networks(mut networks: Vec<NetworkRecord>, exclude: &Regex) -> Vec<NetworkRecord> {
    let before = networks.len();
    networks.retain(|n| !exclude.is_match(&n.network_view));
    let excluded = before - networks.len();

    // dedup needs sorted input
    networks.sort_by(|a, b| a.key().cmp(&b.key()));
    networks.dedup_by(|a, b| a.key() == b.key());

    log::info!(
        "Selected {} of {before} networks ({excluded} excluded by view '{}')",
        networks.len(),
        exclude.as_str()
    );
    networks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_EXCLUDE_VIEWS;
    use serde_json::json;

    fn network(cidr: &str, view: &str) -> NetworkRecord {
        serde_json::from_value(json!({
            "_ref": format!("network/{cidr}/{view}"),
            "network": cidr,
            "network_view": view,
        }))
        .unwrap()
    }

    #[test]
    fn test_select_networks_excludes_voip() {
        let exclude = view_filter(DEFAULT_EXCLUDE_VIEWS).unwrap();
        let selected = select_networks(
            vec![
                network("10.1.0.0/24", "default"),
                network("10.2.0.0/24", "VoIP-Phones"),
                network("10.3.0.0/24", "voip"),
            ],
            &exclude,
        );
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].network.to_string(), "10.1.0.0/24");
    }

    #[test]
    fn test_select_networks_sorted_and_unique() {
        let exclude = view_filter("^$nothing").unwrap();
        let selected = select_networks(
            vec![
                network("10.9.0.0/24", "default"),
                network("10.1.0.0/24", "default"),
                network("10.9.0.0/24", "default"),
                network("10.9.0.0/24", "lab"),
            ],
            &exclude,
        );
        let keys: Vec<String> = selected
            .iter()
            .map(|n| format!("{} {}", n.network, n.network_view))
            .collect();
        assert_eq!(
            keys,
            vec!["10.1.0.0/24 default", "10.9.0.0/24 default", "10.9.0.0/24 lab"]
        );
    }

    #[test]
    fn test_view_filter_invalid() {
        assert!(view_filter("(").is_err());
    }
}
