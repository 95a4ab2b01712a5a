//! Numeric helpers

/// Percentage change from `old` to `new`
///
/// Returns `None` when `old` is zero or either input is not finite.
///
/// # Example
/// ```rust,ignore
/// assert_eq!(percent_diff(80.0, 100.0), Some(25.0));
/// assert_eq!(percent_diff(100.0, 80.0), Some(-20.0));
/// ```
pub fn percent_diff(old: f64, new: f64) -> Option<f64> {
    if old == 0.0 || !old.is_finite() || !new.is_finite() {
        return None;
    }

    Some((new - old) / old * 100.0)
}

/// Format a percentage for display, e.g. `25%` or `-12.5%`
pub fn format_percent(value: f64) -> String {
    format!("{}%", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_diff() {
        assert_eq!(percent_diff(80.0, 100.0), Some(25.0));
        assert_eq!(percent_diff(100.0, 80.0), Some(-20.0));
        assert_eq!(percent_diff(-50.0, -25.0), Some(-50.0));
        assert_eq!(percent_diff(5.0, 5.0), Some(0.0));
        assert_eq!(percent_diff(0.0, 10.0), None);
        assert_eq!(percent_diff(f64::NAN, 10.0), None);
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(25.0), "25%");
        assert_eq!(format_percent(-12.5), "-12.5%");
    }
}
