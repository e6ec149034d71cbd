//! Output file names for per-pattern charts.
//!
//! Names are `tiempo_patron_<safe>.png`, where `<safe>` keeps only
//! alphanumerics, spaces, underscores and hyphens from the pattern. Every
//! other character is dropped, so two patterns that differ only in dropped
//! characters (`"ab*"` and `"ab#"`) share a file and the later chart
//! overwrites the earlier one.

use std::path::{Path, PathBuf};

pub const FILE_PREFIX: &str = "tiempo_patron_";
pub const FILE_EXTENSION: &str = "png";

fn is_safe(c: char) -> bool {
    c.is_alphanumeric() || c == ' ' || c == '_' || c == '-'
}

/// The filesystem-safe part of a pattern.
pub fn sanitize(pattern: &str) -> String {
    pattern.chars().filter(|&c| is_safe(c)).collect()
}

/// File name of the chart for `pattern`.
pub fn chart_file_name(pattern: &str) -> String {
    format!("{}{}.{}", FILE_PREFIX, sanitize(pattern), FILE_EXTENSION)
}

/// Full output path of the chart for `pattern`.
pub fn chart_path(output_dir: &Path, pattern: &str) -> PathBuf {
    output_dir.join(chart_file_name(pattern))
}
