use chrono::{DateTime, Local};
use guard_core::Sample;

/// Frame-rate style value with one decimal, e.g. `"24.7"`.
pub fn format_rate(value: f64) -> String {
    format!("{value:.1}")
}

/// Confidence with three decimals, e.g. `"0.873"`.
pub fn format_confidence(value: f64) -> String {
    format!("{value:.3}")
}

/// Inflow / outflow pair, e.g. `"3/1"`.
pub fn format_flow(inflow: u32, outflow: u32) -> String {
    format!("{inflow}/{outflow}")
}

/// Wall-clock label used on chart axes and tables.
pub fn format_clock(ts: &DateTime<Local>) -> String {
    ts.format("%H:%M:%S").to_string()
}

/// Full date-time label used in the sidebar.
pub fn format_datetime(ts: &DateTime<Local>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Average detections per minute across the history window.
///
/// Detections of the oldest sample happened before the window opened, so
/// only later samples count.  Returns 0 for fewer than two samples or a
/// zero-length window.
pub fn detections_per_minute(history: &[Sample]) -> f64 {
    let (Some(first), Some(last)) = (history.first(), history.last()) else {
        return 0.0;
    };
    let span = (last.timestamp - first.timestamp).num_milliseconds() as f64 / 60_000.0;
    if history.len() < 2 || span <= 0.0 {
        return 0.0;
    }

    let detections: u64 = history[1..]
        .iter()
        .map(|s| u64::from(s.new_detections))
        .sum();
    detections as f64 / span
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample(secs: i64, detections: u32) -> Sample {
        let mut s = Sample::empty(Local.timestamp_opt(secs, 0).unwrap());
        s.new_detections = detections;
        s
    }

    #[test]
    fn fixed_precision() {
        assert_eq!(format_rate(24.66), "24.7");
        assert_eq!(format_rate(8.5), "8.5");
        assert_eq!(format_confidence(0.8), "0.800");
        assert_eq!(format_flow(3, 1), "3/1");
    }

    #[test]
    fn rate_over_window() {
        let history = [sample(0, 100), sample(30, 5), sample(60, 7)];
        assert_eq!(detections_per_minute(&history), 12.0);
    }

    #[test]
    fn rate_degenerate_windows() {
        assert_eq!(detections_per_minute(&[]), 0.0);
        assert_eq!(detections_per_minute(&[sample(0, 9)]), 0.0);
        assert_eq!(detections_per_minute(&[sample(5, 1), sample(5, 1)]), 0.0);
    }
}
