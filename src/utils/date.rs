use chrono::{DateTime, NaiveDate, Utc};

use listenstats::error::AppError;

pub(crate) fn parse_date(s: &str) -> Result<NaiveDate, AppError> {
    let trimmed = s.trim();
    // Try YYYYMMDD
    if trimmed.len() == 8
        && let Ok(d) = NaiveDate::parse_from_str(trimmed, "%Y%m%d")
    {
        return Ok(d);
    }
    // Try YYYY-MM-DD
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map_err(|_| AppError::InvalidDate {
        input: s.to_string(),
    })
}

/// Parse a `--now` override: RFC 3339, or a bare date meaning midnight UTC
pub(crate) fn parse_instant(s: &str) -> Result<DateTime<Utc>, AppError> {
    let trimmed = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }
    parse_date(trimmed)
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| AppError::InvalidTimestamp {
            input: s.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_compact_date() {
        assert_eq!(
            parse_date("20240610").unwrap(),
            NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()
        );
    }

    #[test]
    fn parse_dashed_date() {
        assert_eq!(
            parse_date(" 2024-06-10 ").unwrap(),
            NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()
        );
    }

    #[test]
    fn parse_invalid_date() {
        let err = parse_date("June 10").unwrap_err();
        assert!(err.to_string().contains("June 10"));
    }

    #[test]
    fn parse_instant_rfc3339_converts_to_utc() {
        let dt = parse_instant("2024-06-10T12:00:00+02:00").unwrap();
        assert_eq!(dt.to_rfc3339(), "2024-06-10T10:00:00+00:00");
    }

    #[test]
    fn parse_instant_bare_date_is_midnight_utc() {
        let dt = parse_instant("2024-06-10").unwrap();
        assert_eq!(dt.to_rfc3339(), "2024-06-10T00:00:00+00:00");
    }

    #[test]
    fn parse_instant_rejects_garbage() {
        assert!(matches!(
            parse_instant("soon"),
            Err(AppError::InvalidTimestamp { .. })
        ));
    }
}
