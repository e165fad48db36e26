//! Printable reports for network listings and sync runs.

use super::terminal::{count_cell, format_field};
use crate::models::NetworkRecord;
use crate::processing::SyncSummary;
use colored::Colorize;

/// One CSV-style row per network: cidr, view, vlan, comment.
pub fn network_rows(networks: &[NetworkRecord]) -> Vec<String> {
    let mut rows = vec![r#"  "network",      "view",   "vlan", "comment""#.to_string()];
    rows.extend(networks.iter().map(|n| {
        format!(
            "{},{},{},{}",
            format_field(n.network, 15),
            format_field(&n.network_view, 10),
            format_field(n.vlan_attr().unwrap_or_default(), 7),
            format_field(n.comment.as_deref().unwrap_or(""), 1),
        )
    }));
    rows
}

pub fn print_networks(networks: &[NetworkRecord]) {
    for row in network_rows(networks) {
        println!("{row}");
    }
}

pub fn summary_lines(title: &str, summary: &SyncSummary) -> Vec<String> {
    let mut lines = vec![format!(
        "#{title}# {} {} {} {} {} {}",
        count_cell("processed", summary.processed, false),
        count_cell("vlans_created", summary.vlans_created, false),
        count_cell("vlans_reused", summary.vlans_reused, false),
        count_cell("subnets_created", summary.subnets_created, false),
        count_cell("skipped", summary.skipped, false),
        count_cell("failed", summary.failures.len(), true),
    )];
    for (network, warning) in &summary.warnings {
        // warnings may span lines
        lines.push(format!(
            "  {} {network}: {}",
            "WARN".yellow(),
            warning.replace('\n', " | ")
        ));
    }
    for (network, error) in &summary.failures {
        lines.push(format!("  {} {network}: {error}", "FAIL".on_red()));
    }
    lines
}

pub fn print_summary(title: &str, summary: &SyncSummary) {
    for line in summary_lines(title, summary) {
        println!("{line}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::read_json;
    use std::path::Path;

    #[test]
    fn test_network_rows() {
        let networks: Vec<NetworkRecord> =
            read_json(Path::new("src/tests/test_data/networks_test_cache_01.json")).unwrap();
        let rows = network_rows(&networks);
        assert_eq!(rows.len(), networks.len() + 1, "Header plus one row per network");
        assert!(rows[1].contains("\"10.0.0.0/24\""), "{}", rows[1]);
        assert!(rows[1].contains("\"50\""));
        assert!(rows[1].ends_with("\"Lab-VLAN\""));
    }

    #[test]
    fn test_summary_lines() {
        colored::control::set_override(false);
        let summary = SyncSummary {
            processed: 3,
            vlans_created: 1,
            skipped: 1,
            warnings: vec![("10.0.3.0/24".to_string(), "a\nb".to_string())],
            failures: vec![("10.0.4.0/24".to_string(), "boom".to_string())],
            ..Default::default()
        };
        let lines = summary_lines("vlans", &summary);
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("#vlans# processed=3 vlans_created=1"), "{}", lines[0]);
        assert!(lines[0].ends_with("failed=1"));
        assert_eq!(lines[1], "  WARN 10.0.3.0/24: a | b");
        assert_eq!(lines[2], "  FAIL 10.0.4.0/24: boom");
    }
}
