//! Human-readable rendering of file selections.

const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
const STEP: u64 = 1024;

/// Render a byte count in the largest unit whose scaled value is at least 1.
///
/// Whole bytes print without decimals, larger units with one decimal place.
/// Counts past the GB range stay in GB.
pub fn format_bytes(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut unit = 0;
    let mut threshold = STEP;
    while unit < UNITS.len() - 1 && bytes >= threshold {
        unit += 1;
        threshold = threshold.saturating_mul(STEP);
    }

    if unit == 0 {
        return format!("{} {}", bytes, UNITS[0]);
    }

    let scaled = bytes as f64 / (STEP as f64).powi(unit as i32);
    format!("{:.1} {}", scaled, UNITS[unit])
}

/// Status label text for a picked file.
pub fn selection_label(name: &str, size: u64) -> String {
    format!("Selected: {} • {}", name, format_bytes(size))
}
