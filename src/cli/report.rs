// src/cli/report.rs

//! Human-readable sizes, ratios and durations for the console report.

use crate::files::{Operation, OperationStats};
use std::time::Duration;

const SIZE_UNITS: [&str; 6] = ["bytes", "Kb", "Mb", "Gb", "Tb", "Pt"];

/// Formats a byte count using the largest unit it exceeds, e.g. `"2.50 Kb"`.
pub fn format_size(bytes: u64) -> String {
    if bytes == 1 {
        return "1 byte".to_string();
    }
    for (power, unit) in SIZE_UNITS.iter().enumerate().rev() {
        let scale = 1024f64.powi(power as i32);
        if bytes as f64 > scale {
            return format!("{:.2} {}", bytes as f64 / scale, unit);
        }
    }
    format!("{} bytes", bytes)
}

/// Output size relative to input size, two decimals.
pub fn format_ratio(stats: &OperationStats) -> String {
    format!("{:.2}", stats.ratio_percent())
}

pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    if secs >= 60 {
        format!("{} minute(s) {} second(s)", secs / 60, secs % 60)
    } else if secs >= 1 {
        format!("{} second(s)", secs)
    } else {
        format!("{} millisecond(s)", elapsed.as_millis())
    }
}

/// The lines printed after a successful operation.
pub fn summary_lines(stats: &OperationStats) -> Vec<String> {
    let (verb, source, result) = match stats.operation {
        Operation::Archive => ("archiving", "unarchived", "archived"),
        Operation::Extract => ("unarchiving", "archived", "unarchived"),
    };
    vec![
        format!("- File size before {}: {}", verb, format_size(stats.input_bytes)),
        format!("- File size after {}: {}", verb, format_size(stats.output_bytes)),
        format!(
            "The {} file is {}% of the {} file",
            result,
            format_ratio(stats),
            source
        ),
        format!("This operation took {}", format_elapsed(stats.elapsed)),
    ]
}
