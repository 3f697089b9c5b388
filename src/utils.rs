use std::time::Duration;

const SIZE_UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Binary-scaled size with two decimals, capped at terabytes.
pub fn format_bytes(bytes: u64) -> String {
    let (scaled, unit) = SIZE_UNITS[1..]
        .iter()
        .fold((bytes as f64, SIZE_UNITS[0]), |(size, unit), next| {
            if size >= 1024.0 { (size / 1024.0, *next) } else { (size, unit) }
        });
    format!("{scaled:.2} {unit}")
}

/// Space saved as a percentage of the original size. Negative when the
/// output grew.
pub fn compression_ratio(original: u64, compressed: u64) -> f64 {
    if original == 0 {
        return 0.0;
    }
    100.0 * (1.0 - compressed as f64 / original as f64)
}

pub fn millis(elapsed: Duration) -> f64 {
    elapsed.as_secs_f64() * 1e3
}
