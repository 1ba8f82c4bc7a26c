/// Human-readable byte sizes for resource cards and detail views.
pub fn format_bytes(bytes: Option<u64>) -> String {
    let bytes = match bytes {
        Some(0) | None => return "N/A".to_string(),
        Some(b) => b as f64,
    };
    const UNITS: [&str; 5] = ["Bytes", "KB", "MB", "GB", "TB"];
    let exponent = (bytes.log(1024.0).floor() as usize).min(UNITS.len() - 1);
    let value = bytes / 1024f64.powi(exponent as i32);
    let rounded = (value * 100.0).round() / 100.0;
    if rounded.fract() == 0.0 {
        format!("{} {}", rounded as u64, UNITS[exponent])
    } else {
        format!("{} {}", rounded, UNITS[exponent])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_or_zero_is_not_available() {
        assert_eq!(format_bytes(None), "N/A");
        assert_eq!(format_bytes(Some(0)), "N/A");
    }

    #[test]
    fn scales_through_units() {
        assert_eq!(format_bytes(Some(512)), "512 Bytes");
        assert_eq!(format_bytes(Some(1024)), "1 KB");
        assert_eq!(format_bytes(Some(1536)), "1.5 KB");
        assert_eq!(format_bytes(Some(1_200_000)), "1.14 MB");
        assert_eq!(format_bytes(Some(5_500_000)), "5.25 MB");
    }
}
