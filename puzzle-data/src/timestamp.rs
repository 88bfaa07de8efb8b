//! Lenient timestamp parsing.
//!
//! Several textual layouts are accepted and all of them normalise to a
//! `DateTime<FixedOffset>`. Text without a zone designator is read as UTC.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Offset, Utc};

use crate::DecodeError;

#[derive(Debug, Clone, Copy)]
enum Zone {
    Optional,
    Required,
    Forbidden,
}

struct Pattern {
    name: &'static str,
    format: &'static str,
    zone: Zone,
}

// Order matters: the first pattern that consumes the whole input wins.
const DATE_TIME_PATTERNS: &[Pattern] = &[
    Pattern {
        name: "iso date-time",
        format: "%Y-%m-%dT%H:%M:%S%.f",
        zone: Zone::Optional,
    },
    Pattern {
        name: "iso date-time without seconds",
        format: "%Y-%m-%dT%H:%M",
        zone: Zone::Optional,
    },
    Pattern {
        name: "yyyy-MM-dd HH:mm:ss.SX",
        format: "%Y-%m-%d %H:%M:%S%.f",
        zone: Zone::Required,
    },
    Pattern {
        name: "yyyy-MM-dd HH:mm:ssX",
        format: "%Y-%m-%d %H:%M:%S",
        zone: Zone::Required,
    },
    Pattern {
        name: "yyyy-MM-dd HH:mm:ss",
        format: "%Y-%m-%d %H:%M:%S",
        zone: Zone::Forbidden,
    },
];

const TIME_PATTERNS: &[Pattern] = &[
    Pattern {
        name: "iso time",
        format: "%H:%M:%S%.f",
        zone: Zone::Optional,
    },
    Pattern {
        name: "iso time without seconds",
        format: "%H:%M",
        zone: Zone::Optional,
    },
];

/// Parse a date-time in any of the accepted layouts.
///
/// ISO 8601 date-times (with or without an offset, `Z` included) are tried
/// first, then the space separated `yyyy-MM-dd HH:mm:ss[.S][X]` forms.
pub fn parse_timestamp(text: &str) -> Result<DateTime<FixedOffset>, DecodeError> {
    parse_with(text, DATE_TIME_PATTERNS, |body, format| {
        NaiveDateTime::parse_from_str(body, format).ok()
    })
    .ok_or_else(|| DecodeError::type_mismatch(format!("unrecognised timestamp {:?}", text)))
}

/// Parse an ISO time of day, optionally with an offset.
///
/// The date is pinned to 2020-01-01; only the time and offset carry meaning.
pub fn parse_time_of_day(text: &str) -> Result<DateTime<FixedOffset>, DecodeError> {
    parse_with(text, TIME_PATTERNS, |body, format| {
        let time = NaiveTime::parse_from_str(body, format).ok()?;
        NaiveDate::from_ymd_opt(2020, 1, 1).map(|date| date.and_time(time))
    })
    .ok_or_else(|| DecodeError::type_mismatch(format!("unrecognised time of day {:?}", text)))
}

fn parse_with(
    text: &str,
    patterns: &[Pattern],
    naive: fn(&str, &str) -> Option<NaiveDateTime>,
) -> Option<DateTime<FixedOffset>> {
    let zoned = split_offset(text);
    patterns.iter().find_map(|pattern| {
        let (body, offset) = match (pattern.zone, zoned) {
            (Zone::Forbidden, _) | (Zone::Optional, None) => (text, Utc.fix()),
            (Zone::Required, None) => return None,
            (Zone::Required | Zone::Optional, Some(split)) => split,
        };
        let parsed = naive(body, pattern.format)?
            .and_local_timezone(offset)
            .single()?;
        tracing::trace!(pattern = pattern.name, input = text, "timestamp matched");
        Some(parsed)
    })
}

/// Split a trailing zone designator (`Z`, `+HH`, `+HHMM` or `+HH:MM`) off `text`.
fn split_offset(text: &str) -> Option<(&str, FixedOffset)> {
    if let Some(body) = text.strip_suffix(|c: char| c == 'Z' || c == 'z') {
        return Some((body, Utc.fix()));
    }

    let idx = text.rfind(|c: char| c == '+' || c == '-')?;
    let (body, zone) = text.split_at(idx);
    let digits = &zone[1..];
    if !digits.is_ascii() {
        return None;
    }
    let (hours, minutes) = match digits.len() {
        2 => (digits, "00"),
        4 => digits.split_at(2),
        5 if digits.as_bytes()[2] == b':' => (&digits[..2], &digits[3..]),
        _ => return None,
    };
    if !hours.bytes().chain(minutes.bytes()).all(|b| b.is_ascii_digit()) {
        return None;
    }

    let seconds = hours.parse::<i32>().ok()? * 3600 + minutes.parse::<i32>().ok()? * 60;
    let sign = if zone.starts_with('-') { -1 } else { 1 };
    FixedOffset::east_opt(sign * seconds).map(|offset| (body, offset))
}

/// Serde adapter for timestamp fields: decodes through [`parse_timestamp`],
/// encodes as RFC 3339.
///
/// ```ignore
/// #[serde(with = "puzzle_data::timestamp::flexible")]
/// pub generated_at: DateTime<FixedOffset>,
/// ```
pub mod flexible {
    use chrono::{DateTime, FixedOffset};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &DateTime<FixedOffset>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<FixedOffset>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        super::parse_timestamp(&text).map_err(serde::de::Error::custom)
    }
}

/// Like [`flexible`], for `Option<DateTime<FixedOffset>>` fields.
pub mod flexible_option {
    use chrono::{DateTime, FixedOffset};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(
        value: &Option<DateTime<FixedOffset>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(value) => super::flexible::serialize(value, serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<FixedOffset>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<String>::deserialize(deserializer)?
            .map(|text| super::parse_timestamp(&text).map_err(serde::de::Error::custom))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike, TimeZone, Timelike};
    use serde::{Deserialize, Serialize};

    use super::*;

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<FixedOffset> {
        Utc.fix().with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    #[test]
    fn iso_and_space_separated_forms_agree() {
        let iso = parse_timestamp("2023-05-01T10:00:00Z").unwrap();
        let spaced = parse_timestamp("2023-05-01 10:00:00.000Z").unwrap();
        assert_eq!(iso, spaced);
        assert_eq!(iso, utc(2023, 5, 1, 10, 0, 0));
    }

    #[test]
    fn accepts_every_date_time_layout() {
        let expected = utc(2023, 5, 1, 10, 0, 0);
        for text in [
            "2023-05-01T10:00:00",
            "2023-05-01T10:00:00.000",
            "2023-05-01T10:00",
            "2023-05-01T12:00:00+02:00",
            "2023-05-01T05:00:00-0500",
            "2023-05-01 10:00:00.5Z",
            "2023-05-01 11:00:00+01",
            "2023-05-01 10:00:00",
        ] {
            let parsed = parse_timestamp(text).unwrap_or_else(|e| panic!("{text}: {e}"));
            assert_eq!(
                parsed.with_nanosecond(0).unwrap(),
                expected,
                "{text} parsed as {parsed}"
            );
        }
    }

    #[test]
    fn keeps_the_offset_it_was_given() {
        let parsed = parse_timestamp("2023-05-01T12:00:00+02:00").unwrap();
        assert_eq!(parsed.offset().local_minus_utc(), 2 * 3600);
        assert_eq!(parsed.hour(), 12);
    }

    #[test]
    fn rejects_unrecognised_text() {
        for text in ["", "yesterday", "2023-05-01", "01/05/2023 10:00", "2023-05-01T25:00:00"] {
            let err = parse_timestamp(text).unwrap_err();
            assert!(err.is_type_mismatch(), "{text}: {err:?}");
        }
    }

    #[test]
    fn time_of_day_defaults_date() {
        let parsed = parse_time_of_day("14:30:00").unwrap();
        assert_eq!((parsed.year(), parsed.month(), parsed.day()), (2020, 1, 1));
        assert_eq!(
            parsed.time(),
            NaiveTime::from_hms_opt(14, 30, 0).unwrap()
        );
        assert_eq!(parsed.offset().local_minus_utc(), 0);
    }

    #[test]
    fn time_of_day_accepts_offsets() {
        let parsed = parse_time_of_day("08:15+05:30").unwrap();
        assert_eq!(parsed.offset().local_minus_utc(), 5 * 3600 + 30 * 60);
        assert_eq!(parsed.time(), NaiveTime::from_hms_opt(8, 15, 0).unwrap());
    }

    #[test]
    fn time_of_day_rejects_dates() {
        assert!(parse_time_of_day("2023-05-01T14:30:00").is_err());
        assert!(parse_time_of_day("half past two").is_err());
    }

    #[derive(Debug, Serialize, Deserialize)]
    struct Stamped {
        #[serde(with = "flexible")]
        at: DateTime<FixedOffset>,
        #[serde(default, with = "flexible_option")]
        until: Option<DateTime<FixedOffset>>,
    }

    #[test]
    fn serde_adapters_use_the_fallback_chain() {
        let stamped: Stamped =
            serde_json::from_str(r#"{"at":"2023-05-01 10:00:00","until":null}"#).unwrap();
        assert_eq!(stamped.at, utc(2023, 5, 1, 10, 0, 0));
        assert_eq!(stamped.until, None);

        let json = serde_json::to_string(&stamped).unwrap();
        assert_eq!(json, r#"{"at":"2023-05-01T10:00:00+00:00","until":null}"#);
    }

    #[test]
    fn serde_adapter_failures_are_type_mismatches() {
        let err: DecodeError = serde_json::from_str::<Stamped>(r#"{"at":"soon"}"#)
            .unwrap_err()
            .into();
        assert!(err.is_type_mismatch(), "{err:?}");
    }
}
