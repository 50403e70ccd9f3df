//! Display helpers for submitted reports.

use chrono::{DateTime, Local, TimeZone, Utc};
use shared::models::{DeliverableStatus, TargetPriority};

/// Rows shown per list in the reports table.
pub const PREVIEW_LEN: usize = 2;

const DATE_FORMAT: &str = "%b %-d, %Y, %I:%M %p";
const MISSING_DATE: &str = "N/A";

/// First [`PREVIEW_LEN`] items plus how many were left out.
pub fn summarize<T>(items: &[T]) -> (&[T], usize) {
    let shown = items.len().min(PREVIEW_LEN);
    (&items[..shown], items.len() - shown)
}

/// `Jan 5, 2025, 02:30 PM` in the browser's time zone.
pub fn format_report_date(date: Option<&DateTime<Utc>>) -> String {
    format_report_date_in(date, &Local)
}

pub fn format_report_date_in<Tz>(date: Option<&DateTime<Utc>>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    match date {
        Some(date) => date.with_timezone(tz).format(DATE_FORMAT).to_string(),
        None => MISSING_DATE.to_string(),
    }
}

pub fn status_badge_class(status: DeliverableStatus) -> &'static str {
    match status {
        DeliverableStatus::Completed => "badge badge-success",
        DeliverableStatus::InProgress => "badge badge-info",
        DeliverableStatus::Pending => "badge badge-warning",
        DeliverableStatus::Cancelled => "badge badge-error",
        DeliverableStatus::Other => "badge badge-ghost",
    }
}

pub fn priority_badge_class(priority: TargetPriority) -> &'static str {
    match priority {
        TargetPriority::Low => "badge badge-ghost",
        TargetPriority::Medium => "badge badge-info",
        TargetPriority::High => "badge badge-warning",
        TargetPriority::Critical => "badge badge-error",
        TargetPriority::Other => "badge badge-outline",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;
    use test_case::test_case;

    #[test_case(0, 0, 0)]
    #[test_case(1, 1, 0)]
    #[test_case(2, 2, 0)]
    #[test_case(5, 2, 3)]
    fn summary_shows_at_most_two(len: usize, shown: usize, more: usize) {
        let items: Vec<usize> = (0..len).collect();
        let (preview, remaining) = summarize(&items);
        assert_eq!(preview.len(), shown);
        assert_eq!(remaining, more);
        assert_eq!(preview, &items[..shown]);
    }

    #[test]
    fn dates_render_in_the_given_zone() {
        let utc = FixedOffset::east_opt(0).unwrap();
        let date = Utc.with_ymd_and_hms(2025, 1, 5, 14, 30, 0).unwrap();
        assert_eq!(
            format_report_date_in(Some(&date), &utc),
            "Jan 5, 2025, 02:30 PM"
        );

        let minus_five = FixedOffset::west_opt(5 * 3600).unwrap();
        assert_eq!(
            format_report_date_in(Some(&date), &minus_five),
            "Jan 5, 2025, 09:30 AM"
        );
    }

    #[test]
    fn missing_date_is_not_available() {
        assert_eq!(format_report_date(None), "N/A");
    }

    #[test]
    fn unknown_values_still_get_a_badge() {
        assert!(status_badge_class(DeliverableStatus::Other).starts_with("badge"));
        assert!(priority_badge_class(TargetPriority::Other).starts_with("badge"));
    }
}
