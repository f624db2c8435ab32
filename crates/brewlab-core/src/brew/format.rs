//! Time and ratio labels.

/// Formats a second count as zero-padded `MM:SS`. Negative input clamps to
/// `00:00`; minutes keep growing past 99 rather than wrapping.
///
/// ```rust
/// use brewlab_core::brew::format_seconds;
///
/// assert_eq!(format_seconds(125), "02:05");
/// assert_eq!(format_seconds(-5), "00:00");
/// ```
pub fn format_seconds(total_sec: i64) -> String {
    let safe_sec = total_sec.max(0);
    format!("{:02}:{:02}", safe_sec / 60, safe_sec % 60)
}

/// Labels a water/dose pair as `1:R` with one decimal, or `-` when the dose
/// is not positive.
///
/// ```rust
/// use brewlab_core::brew::to_ratio_label;
///
/// assert_eq!(to_ratio_label(500.0, 33.0), "1:15.2");
/// assert_eq!(to_ratio_label(500.0, 0.0), "-");
/// ```
pub fn to_ratio_label(water_grams: f64, dose_grams: f64) -> String {
    if dose_grams <= 0.0 {
        return "-".to_string();
    }
    format!("1:{:.1}", water_grams / dose_grams)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_seconds() {
        assert_eq!(format_seconds(0), "00:00");
        assert_eq!(format_seconds(59), "00:59");
        assert_eq!(format_seconds(60), "01:00");
        assert_eq!(format_seconds(125), "02:05");
        assert_eq!(format_seconds(6000), "100:00");
    }

    #[test]
    fn test_format_seconds_clamps_negative() {
        assert_eq!(format_seconds(-5), "00:00");
        assert_eq!(format_seconds(i64::MIN), "00:00");
    }

    #[test]
    fn test_ratio_label() {
        assert_eq!(to_ratio_label(350.0, 22.0), "1:15.9");
        assert_eq!(to_ratio_label(300.0, 20.0), "1:15.0");
        assert_eq!(to_ratio_label(300.0, -1.0), "-");
    }
}
