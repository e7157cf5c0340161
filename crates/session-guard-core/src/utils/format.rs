use chrono::{DateTime, Utc};

const MINUTES_PER_HOUR: i64 = 60;
const MINUTES_PER_DAY: i64 = 24 * MINUTES_PER_HOUR;

/// Human-readable age of a timestamp relative to `now`, e.g. `5m ago`.
/// Hours and days are rounded to the nearest unit.
pub fn format_age(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let minutes = (now - then).num_minutes();
    match minutes {
        // Timestamps in the future (clock skew) also land here
        m if m < 1 => "just now".to_string(),
        m if m < MINUTES_PER_HOUR => format!("{}m ago", m),
        m if m < MINUTES_PER_DAY => {
            format!("{}h ago", (m + MINUTES_PER_HOUR / 2) / MINUTES_PER_HOUR)
        }
        m => format!("{}d ago", (m + MINUTES_PER_DAY / 2) / MINUTES_PER_DAY),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_format_age() {
        let now = Utc::now();
        assert_eq!(format_age(now, now), "just now");
        assert_eq!(format_age(now + Duration::minutes(5), now), "just now");
        assert_eq!(format_age(now - Duration::minutes(5), now), "5m ago");
        assert_eq!(format_age(now - Duration::minutes(90), now), "2h ago");
        assert_eq!(format_age(now - Duration::minutes(70), now), "1h ago");
        assert_eq!(format_age(now - Duration::hours(36), now), "2d ago");
        assert_eq!(format_age(now - Duration::hours(30), now), "1d ago");
    }

    #[test]
    fn test_format_age_unit_boundaries() {
        let now = Utc::now();
        assert_eq!(format_age(now - Duration::minutes(59), now), "59m ago");
        assert_eq!(format_age(now - Duration::minutes(60), now), "1h ago");
        // 23h40m rounds up but stays in hours
        assert_eq!(format_age(now - Duration::minutes(23 * 60 + 40), now), "24h ago");
        assert_eq!(format_age(now - Duration::hours(24), now), "1d ago");
    }
}
