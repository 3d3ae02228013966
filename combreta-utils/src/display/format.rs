//! Formatting helpers for durations, percentages and coverage bars

/// Compact elapsed time: `45s`, `1m 30s`, `1h 1m 5s` (zero seconds dropped past an hour)
pub fn format_duration(secs: u64) -> String {
    let (h, m, s) = (secs / 3600, (secs % 3600) / 60, secs % 60);
    match (h, m) {
        (0, 0) => format!("{}s", s),
        (0, _) => format!("{}m {}s", m, s),
        _ if s == 0 => format!("{}h {}m", h, m),
        _ => format!("{}h {}m {}s", h, m, s),
    }
}

/// `part / total` as a one-decimal percentage; an empty total is 0%
pub fn format_percent(part: usize, total: usize) -> String {
    if total == 0 {
        return "0.0%".to_string();
    }
    format!("{:.1}%", part as f64 * 100.0 / total as f64)
}

/// Text bar of `width` cells, filled in proportion to `count / total`
pub fn coverage_bar(count: usize, total: usize, width: usize) -> String {
    let filled = if total == 0 {
        0
    } else {
        (count.min(total) * width) / total
    };
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(45), "45s");
        assert_eq!(format_duration(90), "1m 30s");
        assert_eq!(format_duration(3665), "1h 1m 5s");
        assert_eq!(format_duration(3600), "1h 0m");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(15, 20), "75.0%");
        assert_eq!(format_percent(1, 3), "33.3%");
        assert_eq!(format_percent(0, 0), "0.0%");
    }

    #[test]
    fn test_coverage_bar() {
        assert_eq!(coverage_bar(10, 20, 10), "█████░░░░░");
        assert_eq!(coverage_bar(20, 20, 4), "████");
        assert_eq!(coverage_bar(0, 20, 4), "░░░░");
        assert_eq!(coverage_bar(3, 0, 3), "░░░");
        assert_eq!(coverage_bar(30, 20, 2), "██");
    }
}
