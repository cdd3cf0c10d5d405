//! Display helpers shared by presentation layers.

/// `MM:SS` countdown display. Minutes are not wrapped at 60.
pub fn format_clock(total_secs: u64) -> String {
    format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
}

/// Compact session length, e.g. `25m 0s`.
pub fn format_duration(total_secs: u64) -> String {
    format!("{}m {}s", total_secs / 60, total_secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_pads_both_fields() {
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(65), "01:05");
        assert_eq!(format_clock(1500), "25:00");
        assert_eq!(format_clock(90 * 60), "90:00");
    }

    #[test]
    fn duration_shows_minutes_and_seconds() {
        assert_eq!(format_duration(300), "5m 0s");
        assert_eq!(format_duration(61), "1m 1s");
    }
}
