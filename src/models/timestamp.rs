use chrono::{DateTime, Datelike, NaiveDateTime, Utc};
use thiserror::Error;

/// Years representable in every store column and wire format we use.
const YEAR_RANGE: std::ops::RangeInclusive<i32> = 1..=9999;

/// Naive layouts accepted in addition to RFC 3339; read as UTC.
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimestampError {
    #[error("Invalid timestamp '{input}': expected ISO-8601 or 'YYYY-MM-DD HH:MM:SS'")]
    Invalid { input: String },
}

/// Parse a meal `createdAt` value into an instant.
///
/// Accepted inputs:
/// - RFC 3339 with `Z` or a numeric offset (`2023-04-26T19:00:00-03:00`)
/// - ISO-8601 without offset (`2023-04-26T19:00:00`), read as UTC
/// - space separated (`2023-04-26 19:00:00`), read as UTC
///
/// Fractional seconds are allowed in every layout.
/// Years outside 0001..=9999 are rejected.
pub fn parse_timestamp(input: &str) -> Result<DateTime<Utc>, TimestampError> {
    let trimmed = input.trim();

    let parsed = DateTime::parse_from_rfc3339(trimmed)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NAIVE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
                .map(|naive| naive.and_utc())
        });

    parsed
        .filter(|dt| YEAR_RANGE.contains(&dt.year()))
        .ok_or_else(|| TimestampError::Invalid {
            input: input.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn expected() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2023, 4, 26, 19, 0, 0).unwrap()
    }

    #[test]
    fn space_separated_and_iso_agree() {
        assert_eq!(parse_timestamp("2023-04-26 19:00:00").unwrap(), expected());
        assert_eq!(parse_timestamp("2023-04-26T19:00:00").unwrap(), expected());
        assert_eq!(parse_timestamp("2023-04-26T19:00:00Z").unwrap(), expected());
        assert_eq!(parse_timestamp("2023-04-26T19:00:00.000Z").unwrap(), expected());
    }

    #[test]
    fn offsets_are_normalized_to_utc() {
        assert_eq!(
            parse_timestamp("2023-04-26T16:00:00-03:00").unwrap(),
            expected()
        );
    }

    #[test]
    fn fractional_seconds_are_kept() {
        let ts = parse_timestamp("2023-04-26 19:00:00.250").unwrap();
        assert_eq!(ts.timestamp_subsec_millis(), 250);
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        assert_eq!(parse_timestamp("  2023-04-26 19:00:00\n").unwrap(), expected());
    }

    #[test]
    fn rejects_years_outside_four_digits() {
        for input in [
            "+12023-04-26 19:00:00",
            "+12023-04-26T19:00:00",
            "-0001-04-26 19:00:00",
            "0000-04-26 19:00:00",
        ] {
            assert!(parse_timestamp(input).is_err(), "{input:?} should be rejected");
        }
        assert!(parse_timestamp("9999-12-31 23:59:59").is_ok());
        assert!(parse_timestamp("0001-01-01T00:00:00Z").is_ok());
    }

    #[test]
    fn rejects_other_shapes() {
        for input in ["", "yesterday", "2023-04-26", "26/04/2023 19:00:00", "2023-13-01 00:00:00"] {
            assert_eq!(
                parse_timestamp(input),
                Err(TimestampError::Invalid {
                    input: input.to_string()
                }),
                "{input:?} should be rejected"
            );
        }
    }
}
