//! Display helpers for countdowns and workout totals.

/// `M:SS`, as shown on the countdown dial.
pub fn clock(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// `Xh Ym Zs`, dropping leading zero units. Negative spans read as `0s`.
pub fn duration(span: chrono::Duration) -> String {
    let total = span.num_seconds().max(0);
    let (hours, minutes, seconds) = (total / 3600, (total % 3600) / 60, total % 60);
    if hours > 0 {
        format!("{hours}h {minutes}m {seconds}s")
    } else if minutes > 0 {
        format!("{minutes}m {seconds}s")
    } else {
        format!("{seconds}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn clock_pads_seconds() {
        assert_eq!(clock(0), "0:00");
        assert_eq!(clock(5), "0:05");
        assert_eq!(clock(90), "1:30");
        assert_eq!(clock(180), "3:00");
    }

    #[test]
    fn duration_drops_empty_units() {
        assert_eq!(duration(Duration::seconds(42)), "42s");
        assert_eq!(duration(Duration::seconds(125)), "2m 5s");
        assert_eq!(duration(Duration::seconds(3725)), "1h 2m 5s");
        assert_eq!(duration(Duration::seconds(-3)), "0s");
    }
}
