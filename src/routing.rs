/// Date routing
///
/// Maps a location such as `/day/2024-01-01` to the date the engine should
/// operate on. Anything that does not name a valid day resolves to today.

use chrono::{Local, NaiveDate};

/// Path prefix of the per-day route
pub const DAY_ROUTE_PREFIX: &str = "/day/";

/// Today's date in the local timezone
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parse a strict `YYYY-MM-DD` date string
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.len() != 10 {
        return None;
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Resolve a route path to a date
///
/// `/day/<date>` yields that date; the root path, unknown paths and
/// malformed dates all yield `today`.
pub fn date_from_path(path: &str, today: NaiveDate) -> NaiveDate {
    path.trim()
        .strip_prefix(DAY_ROUTE_PREFIX)
        .map(|segment| segment.trim_end_matches('/'))
        .and_then(parse_date)
        .unwrap_or(today)
}

/// Canonical route path for `date`
pub fn day_path(date: NaiveDate) -> String {
    format!("{}{}", DAY_ROUTE_PREFIX, date.format("%Y-%m-%d"))
}

/// Pick the cursor date from an optional date segment
///
/// Absent or malformed segments fall back to `today`; dates before
/// `min_date` are clamped to it.
pub fn resolve_cursor(segment: Option<&str>, today: NaiveDate, min_date: NaiveDate) -> NaiveDate {
    let date = segment.and_then(parse_date).unwrap_or(today);
    date.max(min_date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_day_route() {
        let today = date("2024-06-15");
        assert_eq!(date_from_path("/day/2024-01-01", today), date("2024-01-01"));
        assert_eq!(date_from_path("/day/2024-01-01/", today), date("2024-01-01"));
    }

    #[test]
    fn test_unknown_routes_fall_back_to_today() {
        let today = date("2024-06-15");
        assert_eq!(date_from_path("/", today), today);
        assert_eq!(date_from_path("/settings", today), today);
        assert_eq!(date_from_path("/day/2024-13-01", today), today);
        assert_eq!(date_from_path("/day/2024-1-1", today), today);
    }

    #[test]
    fn test_day_path_round_trips() {
        let day = date("2024-02-29");
        assert_eq!(day_path(day), "/day/2024-02-29");
        assert_eq!(date_from_path(&day_path(day), date("2000-01-01")), day);
    }

    #[test]
    fn test_resolve_cursor_clamps_to_min_date() {
        let today = date("2024-06-15");
        let min = date("2022-01-01");
        assert_eq!(resolve_cursor(None, today, min), today);
        assert_eq!(resolve_cursor(Some("2021-05-05"), today, min), min);
        assert_eq!(resolve_cursor(Some("garbage"), today, min), today);
        assert_eq!(resolve_cursor(Some("2023-03-03"), today, min), date("2023-03-03"));
    }
}
