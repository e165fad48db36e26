//! Terminal output for listings and sync reports.
//!
//! - [`summary`] - network listing and sync summary
//! - [`terminal`] - field formatting helpers

mod summary;
mod terminal;

pub use summary::{network_rows, print_networks, print_summary, summary_lines};
pub use terminal::{count_cell, format_field};
