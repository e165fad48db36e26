//! Terminal formatting helpers.

use colored::Colorize;

/// Format a value as a quoted, right-aligned field.
///
/// Values longer than `width` are returned quoted but unpadded.
pub fn format_field<T: ToString>(value: T, width: usize) -> String {
    let quoted = format!("\"{}\"", value.to_string());
    if quoted.len() >= width {
        quoted
    } else {
        format!("{quoted:>width$}")
    }
}

/// `label=count`, red when `count` is non-zero and `alarm` is set.
pub fn count_cell(label: &str, count: usize, alarm: bool) -> String {
    let cell = format!("{label}={count}");
    if alarm && count > 0 {
        cell.on_red().to_string()
    } else {
        cell
    }
}
