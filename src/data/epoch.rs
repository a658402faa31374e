//! Timestamp normalization.

use chrono::NaiveDateTime;

/// Format of the timestamp column in CO-OPS CSV responses.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Parse a wall-clock timestamp and return seconds since the Unix epoch.
///
/// The reading is taken as UTC; requests always ask for `time_zone=gmt`.
pub fn normalize(raw: &str, pattern: &str) -> Result<i64, chrono::ParseError> {
    let naive = NaiveDateTime::parse_from_str(raw.trim(), pattern)?;
    Ok(naive.and_utc().timestamp())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_gmt_wall_clock() {
        assert_eq!(normalize("1970-01-01 00:06", TIMESTAMP_FORMAT).unwrap(), 360);
        assert_eq!(
            normalize("2012-01-01 00:00", TIMESTAMP_FORMAT).unwrap(),
            1_325_376_000
        );
    }

    #[test]
    fn rejects_non_matching_strings() {
        assert!(normalize("2012/01/01 00:00", TIMESTAMP_FORMAT).is_err());
        assert!(normalize("", TIMESTAMP_FORMAT).is_err());
        assert!(normalize("2012-01-01", TIMESTAMP_FORMAT).is_err());
    }
}
