//! Human relative-time display for publish dates.

use chrono::{DateTime, NaiveDate, Utc};

/// Renders the elapsed time between two instants as a coarse display
/// string. Months and years use fixed lengths (30 and 365 days); the
/// output is for display only, not calendar math.
pub fn relative_time(published: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - published).num_seconds();
    let minutes = seconds / 60;
    let hours = minutes / 60;
    let days = hours / 24;
    let weeks = days / 7;
    let months = days / 30;
    let years = days / 365;

    if years > 0 {
        return plural(years, "year");
    }
    if months > 0 {
        return plural(months, "month");
    }
    if weeks > 0 {
        return plural(weeks, "week");
    }
    if days > 0 {
        return plural(days, "day");
    }
    if hours > 0 {
        return plural(hours, "hour");
    }
    if minutes > 0 {
        return plural(minutes, "minute");
    }
    "just now".to_string()
}

fn plural(count: i64, unit: &str) -> String {
    if count > 1 {
        format!("{count} {unit}s ago")
    } else {
        format!("{count} {unit} ago")
    }
}

/// Parses the upstream publish date, which arrives either as a plain date
/// or as a full RFC 3339 timestamp.
pub fn parse_publish_date(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }
    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()?;
    Some(date.and_hms_opt(0, 0, 0)?.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-05-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn zero_elapsed_is_just_now() {
        assert_eq!(relative_time(now(), now()), "just now");
    }

    #[test]
    fn exact_hour_boundary() {
        let published = now() - Duration::seconds(3600);
        assert_eq!(relative_time(published, now()), "1 hour ago");
    }

    #[test]
    fn just_over_a_day() {
        let published = now() - Duration::seconds(90_000);
        assert_eq!(relative_time(published, now()), "1 day ago");
    }

    #[test]
    fn pluralizes_larger_units() {
        assert_eq!(
            relative_time(now() - Duration::days(21), now()),
            "3 weeks ago"
        );
        assert_eq!(
            relative_time(now() - Duration::days(800), now()),
            "2 years ago"
        );
    }

    #[test]
    fn future_dates_collapse_to_just_now() {
        let published = now() + Duration::days(3);
        assert_eq!(relative_time(published, now()), "just now");
    }

    #[test]
    fn parses_both_publish_date_shapes() {
        let plain = parse_publish_date("2019-10-01").unwrap();
        assert_eq!(plain.timestamp(), 1_569_888_000);

        let full = parse_publish_date("2019-10-01T00:00:00-07:00").unwrap();
        assert_eq!(full.timestamp(), 1_569_913_200);

        assert!(parse_publish_date("not a date").is_none());
    }
}
