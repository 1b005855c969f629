//! Timestamp resolution for DTSTART, DTEND, DTSTAMP, CREATED and EXDATE values.
//!
//! TZID parameters are looked up in `chrono-tz` after normalization, so Windows
//! zone names and vendor-prefixed IDs found in exported feeds still resolve.

use chrono::{DateTime, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use icu::time::zone::WindowsParser;
use icu::time::zone::iana::IanaParserExtended;
use std::str::FromStr;

use super::LOG_TARGET;
use super::error::{ParseError, ParseResult};
use super::lexer::PropertyParams;

const DATE_FORMAT: &str = "%Y%m%d";
const DATE_TIME_FORMAT: &str = "%Y%m%dT%H%M%S";
const DATE_LEN: usize = 8;
const DATE_TIME_LEN: usize = 15;

/// Converts property values into absolute timestamps.
///
/// The resolver holds no mutable state, so one instance can be shared freely
/// between threads parsing different documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimestampResolver {
    /// Zone for date-only and zone-naive values.
    default_zone: Tz,
    /// Zone used when a TZID cannot be resolved. `None` makes that an error.
    unknown_timezone_fallback: Option<Tz>,
}

impl TimestampResolver {
    #[must_use]
    pub const fn new(default_zone: Tz) -> Self {
        Self {
            default_zone,
            unknown_timezone_fallback: None,
        }
    }

    #[must_use]
    pub const fn with_unknown_timezone_fallback(mut self, fallback: Option<Tz>) -> Self {
        self.unknown_timezone_fallback = fallback;
        self
    }

    #[must_use]
    pub const fn default_zone(&self) -> Tz {
        self.default_zone
    }

    /// ## Summary
    /// Resolves a property value into an absolute timestamp.
    ///
    /// - A trailing `Z` marks a UTC date-time.
    /// - A TZID parameter selects the zone for a `yyyyMMdd'T'HHmmss` value.
    /// - `VALUE=DATE` selects `yyyyMMdd`, midnight in the default zone.
    /// - Otherwise an 8 character value is a date and anything else a
    ///   zone-naive date-time in the default zone.
    ///
    /// ## Errors
    /// Returns `MalformedTimestamp` if the value does not have the selected
    /// shape, or `UnknownTimezone` if the TZID cannot be resolved and no
    /// fallback zone is configured.
    pub fn resolve(
        &self,
        value: &str,
        params: Option<PropertyParams<'_>>,
    ) -> ParseResult<DateTime<Utc>> {
        let value = value.trim();

        if let Some(utc) = value.strip_suffix('Z') {
            return parse_date_time(utc).map(|naive| naive.and_utc());
        }

        if let Some(tzid) = params.and_then(|p| p.tzid()) {
            let zone = self.resolve_zone(tzid)?;
            return parse_date_time(value).map(|naive| localize(naive, zone));
        }

        if params.is_some_and(|p| p.is_date()) || value.len() == DATE_LEN {
            return parse_date(value)
                .map(|date| localize(date.and_time(NaiveTime::MIN), self.default_zone));
        }

        parse_date_time(value).map(|naive| localize(naive, self.default_zone))
    }

    /// ## Summary
    /// Resolves a TZID parameter value to a `chrono_tz::Tz`.
    ///
    /// ## Errors
    /// Returns `UnknownTimezone` if the TZID is not a known zone and no
    /// fallback zone is configured.
    pub fn resolve_zone(&self, tzid: &str) -> ParseResult<Tz> {
        let normalized = normalize_tzid(tzid);
        match Tz::from_str(&normalized) {
            Ok(zone) => Ok(zone),
            Err(_e) => {
                let Some(fallback) = self.unknown_timezone_fallback else {
                    return Err(ParseError::unknown_timezone(tzid));
                };
                tracing::warn!(
                    target: LOG_TARGET,
                    tzid,
                    fallback = %fallback,
                    "Unknown timezone, using fallback"
                );
                Ok(fallback)
            }
        }
    }
}

impl Default for TimestampResolver {
    fn default() -> Self {
        Self::new(Tz::UTC)
    }
}

fn parse_date(value: &str) -> ParseResult<NaiveDate> {
    if value.len() != DATE_LEN || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseError::malformed_timestamp(value));
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|e| ParseError::malformed_timestamp(value).with_context(format!("'{value}': {e}")))
}

fn parse_date_time(value: &str) -> ParseResult<NaiveDateTime> {
    let shaped = value.len() == DATE_TIME_LEN
        && value.bytes().enumerate().all(|(i, b)| {
            if i == DATE_LEN {
                b == b'T'
            } else {
                b.is_ascii_digit()
            }
        });
    if !shaped {
        return Err(ParseError::malformed_timestamp(value));
    }
    NaiveDateTime::parse_from_str(value, DATE_TIME_FORMAT)
        .map_err(|e| ParseError::malformed_timestamp(value).with_context(format!("'{value}': {e}")))
}

/// Pins a wall-clock time to a zone.
///
/// Times inside a DST gap are shifted forward one hour; times inside a DST
/// fold take the earlier instant.
fn localize(local: NaiveDateTime, zone: Tz) -> DateTime<Utc> {
    match zone.from_local_datetime(&local) {
        LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => dt.with_timezone(&Utc),
        LocalResult::None => {
            let shifted = local + chrono::Duration::hours(1);
            match zone.from_local_datetime(&shifted) {
                LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => {
                    dt.with_timezone(&Utc)
                }
                LocalResult::None => {
                    tracing::warn!(
                        target: LOG_TARGET,
                        %local,
                        zone = %zone,
                        "Local time falls in a DST gap longer than an hour, reading it as UTC"
                    );
                    local.and_utc()
                }
            }
        }
    }
}

const VENDOR_PREFIXES: [&str; 2] = ["/mozilla.org/", "/softwarestudio.org/"];

/// Maps a TZID as written in a feed to the name `chrono-tz` knows it by.
///
/// Quotes and vendor prefixes are removed, Windows names (`Eastern Standard
/// Time`) become IANA names and IANA aliases (`Europe/Kiev`) become canonical.
/// Anything ICU does not recognize is returned as stripped.
fn normalize_tzid(tzid: &str) -> String {
    let unquoted = tzid.trim().trim_matches('"');
    let name = VENDOR_PREFIXES
        .iter()
        .find_map(|prefix| unquoted.strip_prefix(prefix))
        .unwrap_or(unquoted);

    let iana = IanaParserExtended::new();
    let canonical = WindowsParser::new().parse(name, None).map_or_else(
        || {
            let parsed = iana.parse(name);
            (parsed.time_zone != icu::time::TimeZone::UNKNOWN).then_some(parsed.canonical)
        },
        |zone| {
            iana.iter()
                .find(|entry| entry.time_zone == zone)
                .map(|entry| entry.canonical)
        },
    );

    canonical.map_or_else(|| name.to_string(), ToString::to_string)
}
