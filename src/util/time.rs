use anyhow::{bail, Result};
use chrono::{DateTime, Duration, NaiveDate, Utc};

// Accepts a relative window ("12h", "2d"), a calendar date ("YYYY-MM-DD",
// midnight UTC) or an RFC3339 timestamp.
pub fn parse_window(s: &str, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Some(hours) = s.strip_suffix('h').and_then(|n| n.parse::<i64>().ok()) {
        if hours > 0 { return Some(now - Duration::hours(hours)); }
    }
    if let Some(days) = s.strip_suffix('d').and_then(|n| n.parse::<i64>().ok()) {
        if days > 0 { return Some(now - Duration::days(days)); }
    }
    if let Ok(day) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return day.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }
    DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.with_timezone(&Utc))
}

// --since flag: absent is fine, present but unparseable is an error.
pub fn parse_since_opt(since: Option<&str>) -> Result<Option<DateTime<Utc>>> {
    let Some(s) = since else { return Ok(None) };
    match parse_window(s, Utc::now()) {
        Some(ts) => Ok(Some(ts)),
        None => bail!("Unrecognized --since value: {} (try 12h, 2d, 2024-05-01 or RFC3339)", s),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> { Utc.with_ymd_and_hms(2024, 5, 10, 12, 0, 0).unwrap() }

    #[test]
    fn relative_windows() {
        assert_eq!(parse_window("2d", now()), Some(Utc.with_ymd_and_hms(2024, 5, 8, 12, 0, 0).unwrap()));
        assert_eq!(parse_window("6h", now()), Some(Utc.with_ymd_and_hms(2024, 5, 10, 6, 0, 0).unwrap()));
        assert_eq!(parse_window("0d", now()), None);
    }

    #[test]
    fn absolute_dates() {
        assert_eq!(parse_window("2024-05-01", now()), Some(Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap()));
        assert_eq!(
            parse_window("2024-05-01T08:30:00+02:00", now()),
            Some(Utc.with_ymd_and_hms(2024, 5, 1, 6, 30, 0).unwrap())
        );
    }

    #[test]
    fn since_flag() {
        assert!(parse_since_opt(None).unwrap().is_none());
        assert!(parse_since_opt(Some("yesterday")).is_err());
        assert!(parse_since_opt(Some("1d")).unwrap().is_some());
    }
}
