//! Event records extracted from VEVENT blocks.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// One parsed VEVENT block.
///
/// Every field is optional because calendar feeds routinely omit properties.
/// The raw block text is kept for diagnostics and is not serialized.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Event {
    /// The block text the record was built from (alarms removed).
    #[serde(skip)]
    pub raw: String,
    pub uid: Option<String>,
    /// Space-joined text of every SUMMARY line, in document order.
    pub summary: Option<String>,
    pub location: Option<String>,
    pub created: Option<DateTime<Utc>>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repeat: Option<Repeat>,
}

impl Event {
    /// Creates an empty record for the given block text.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            ..Self::default()
        }
    }

    /// Returns whether the event carries a recurrence rule.
    #[must_use]
    pub const fn is_repeating(&self) -> bool {
        self.repeat.is_some()
    }
}

/// Recurrence data of a repeating event.
///
/// The rule is kept as raw RRULE text; expanding it into occurrences is left
/// to the consumer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Repeat {
    rule: String,
    since: Option<DateTime<Utc>>,
    excludes: BTreeSet<DateTime<Utc>>,
}

impl Repeat {
    #[must_use]
    pub fn new(rule: impl Into<String>) -> Self {
        Self {
            rule: rule.into(),
            since: None,
            excludes: BTreeSet::new(),
        }
    }

    /// Raw RRULE value, e.g. `FREQ=WEEKLY;BYDAY=MO`.
    #[must_use]
    pub fn rule(&self) -> &str {
        &self.rule
    }

    /// The first occurrence; equals the owning event's start.
    #[must_use]
    pub const fn since(&self) -> Option<DateTime<Utc>> {
        self.since
    }

    /// Instants on which an occurrence is cancelled.
    #[must_use]
    pub const fn excludes(&self) -> &BTreeSet<DateTime<Utc>> {
        &self.excludes
    }

    pub fn add_exclude(&mut self, at: DateTime<Utc>) {
        self.excludes.insert(at);
    }

    #[must_use]
    pub fn is_excluded(&self, at: &DateTime<Utc>) -> bool {
        self.excludes.contains(at)
    }

    pub(crate) fn anchor(&mut self, since: Option<DateTime<Utc>>) {
        self.since = since;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn new_event_is_empty() {
        let event = Event::new("BEGIN:VEVENT\r\nEND:VEVENT");
        assert_eq!(event.raw, "BEGIN:VEVENT\r\nEND:VEVENT");
        assert!(event.uid.is_none());
        assert!(event.start.is_none());
        assert!(!event.is_repeating());
    }

    #[test]
    fn repeat_tracks_excludes() {
        let mut repeat = Repeat::new("FREQ=DAILY");
        let day = Utc.with_ymd_and_hms(2026, 1, 2, 9, 0, 0).unwrap();
        repeat.add_exclude(day);
        repeat.add_exclude(day);

        assert_eq!(repeat.rule(), "FREQ=DAILY");
        assert_eq!(repeat.excludes().len(), 1);
        assert!(repeat.is_excluded(&day));
        assert!(repeat.since().is_none());
    }

    #[test]
    fn serializes_without_raw_text() {
        let mut event = Event::new("BEGIN:VEVENT\r\nSECRET:1\r\nEND:VEVENT");
        event.uid = Some("abc".to_string());
        event.start = Some(Utc.with_ymd_and_hms(2026, 1, 2, 9, 0, 0).unwrap());

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["uid"], "abc");
        assert_eq!(json["start"], "2026-01-02T09:00:00Z");
        assert!(json.get("raw").is_none());
        assert!(json.get("repeat").is_none());
    }
}
