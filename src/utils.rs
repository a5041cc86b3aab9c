use std::time::{Duration, UNIX_EPOCH};
use unicode_width::UnicodeWidthChar;

const DATE_FORMAT_TODAY: &str = "Today %H:%M";
const DATE_FORMAT_YESTERDAY: &str = "Yesterday %H:%M";
const DATE_FORMAT_OTHER: &str = "%Y-%m-%d";

/// Truncate to at most `max_width` display columns, ending in "..." when cut.
pub fn truncate_string(s: &str, max_width: usize) -> String {
    let total: usize = s.chars().map(|c| c.width().unwrap_or(0)).sum();
    if total <= max_width {
        return s.to_string();
    }

    let budget = max_width.saturating_sub(3);
    let mut width = 0;
    let mut out = String::new();
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if width + w > budget {
            break;
        }
        width += w;
        out.push(c);
    }
    out.push_str("...");
    out
}

pub fn format_history_date(timestamp: u64) -> String {
    let time = UNIX_EPOCH + Duration::from_secs(timestamp);
    let datetime: chrono::DateTime<chrono::Local> = time.into();

    let today = chrono::Local::now();
    let date = datetime.date_naive();

    if date == today.date_naive() {
        datetime.format(DATE_FORMAT_TODAY).to_string()
    } else if date == today.date_naive() - chrono::Duration::days(1) {
        datetime.format(DATE_FORMAT_YESTERDAY).to_string()
    } else {
        datetime.format(DATE_FORMAT_OTHER).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_string_unchanged() {
        assert_eq!(truncate_string("Rust", 10), "Rust");
    }

    #[test]
    fn test_truncate_long_string() {
        assert_eq!(truncate_string("Interactive Quiz", 10), "Interac...");
    }

    #[test]
    fn test_truncate_counts_wide_characters() {
        let cut = truncate_string("日本語のクイズ", 8);
        assert_eq!(cut, "日本...");
    }

    #[test]
    fn test_format_history_date_today() {
        let now = chrono::Local::now().timestamp() as u64;
        assert!(format_history_date(now).starts_with("Today"));
    }

    #[test]
    fn test_format_history_date_old() {
        assert_eq!(format_history_date(86_400 * 365).len(), "1971-01-01".len());
    }
}
