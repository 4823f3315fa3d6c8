//! Human-readable size formatting.

const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];
const CAP_UNIT: &str = "PB";

/// Format a byte count with 1024-based units and one decimal place.
///
/// Anything at or beyond 1024 TB is expressed in PB, however large.
pub fn format_bytes(bytes: u64) -> String {
    let mut size = bytes as f64;
    for unit in UNITS {
        if size < 1024.0 {
            return format!("{:.1} {}", size, unit);
        }
        size /= 1024.0;
    }
    format!("{:.1} {}", size, CAP_UNIT)
}

/// Format a size that may or may not be a raw byte count.
///
/// Integer text is treated as bytes; anything else is returned unchanged.
pub fn format_size(raw: &str) -> String {
    match raw.trim().parse::<u64>() {
        Ok(bytes) => format_bytes(bytes),
        Err(_) => raw.to_string(),
    }
}
