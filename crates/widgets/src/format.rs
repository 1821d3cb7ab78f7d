use chrono::TimeDelta;

/// Human-readable transfer rate from KB/s.
///
/// Below 1024 KB/s the value is shown in KB/s with one decimal, otherwise
/// in MB/s with two.
pub fn format_speed(kb_per_sec: f64) -> String {
    if kb_per_sec < 1024.0 {
        format!("{kb_per_sec:.1} KB/s")
    } else {
        format!("{:.2} MB/s", kb_per_sec / 1024.0)
    }
}

/// Compact uptime: `"2d 3h 4m"`, `"3h 4m"` or `"4m"`.
pub fn format_uptime(uptime: TimeDelta) -> String {
    let days = uptime.num_days();
    let hours = uptime.num_hours() % 24;
    let minutes = uptime.num_minutes() % 60;

    if days > 0 {
        format!("{days}d {hours}h {minutes}m")
    } else if hours > 0 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes}m")
    }
}

/// Placeholder shown for a readout that has not been reported yet.
pub const MISSING: &str = "-";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speed_in_kilobytes() {
        assert_eq!(format_speed(500.0), "500.0 KB/s");
        assert_eq!(format_speed(0.0), "0.0 KB/s");
        assert_eq!(format_speed(1023.9), "1023.9 KB/s");
    }

    #[test]
    fn speed_in_megabytes() {
        assert_eq!(format_speed(2048.0), "2.00 MB/s");
        assert_eq!(format_speed(1024.0), "1.00 MB/s");
    }

    #[test]
    fn uptime_with_days() {
        let t = TimeDelta::days(2) + TimeDelta::hours(3) + TimeDelta::minutes(4);
        assert_eq!(format_uptime(t), "2d 3h 4m");
    }

    #[test]
    fn uptime_with_hours() {
        assert_eq!(format_uptime(TimeDelta::minutes(65)), "1h 5m");
    }

    #[test]
    fn uptime_minutes_only() {
        assert_eq!(format_uptime(TimeDelta::seconds(59)), "0m");
        assert_eq!(format_uptime(TimeDelta::minutes(42)), "42m");
    }
}
