//! Reading complete calendar feeds.

use chrono::{DateTime, TimeZone, Timelike, Utc};

use super::fixtures::{FEED_WITH_BROKEN_EVENT, FEED_WITH_UNKNOWN_ZONE, GOOGLE_FEED};
use crate::ical::core::{ErrorPolicy, Event, ReaderConfig};
use crate::ical::parse::{ICalReader, ParseErrorKind};

fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
}

fn read(input: &str) -> Vec<Event> {
    ICalReader::new(input).events().unwrap().unwrap()
}

#[test]
fn google_feed_calendar_name() {
    let reader = ICalReader::new(GOOGLE_FEED);
    assert_eq!(reader.calendar_name().as_deref(), Some("Engineering"));
}

#[test]
fn google_feed_events_in_document_order() {
    let events = read(GOOGLE_FEED);
    let uids: Vec<_> = events.iter().filter_map(|e| e.uid.as_deref()).collect();
    assert_eq!(
        uids,
        vec![
            "weekly-sync@google.com",
            "offsite@google.com",
            "review@google.com"
        ]
    );
}

#[test]
fn google_feed_zoned_recurring_event() {
    let events = read(GOOGLE_FEED);
    let weekly = &events[0];

    assert_eq!(weekly.summary.as_deref(), Some("Weekly sync"));
    assert_eq!(weekly.location.as_deref(), Some("Room 3\\, Floor 2"));
    assert_eq!(weekly.start, Some(utc(2026, 1, 5, 10, 0)));
    assert_eq!(weekly.end, Some(utc(2026, 1, 5, 10, 30)));
    // CREATED overrides the earlier DTSTAMP
    assert_eq!(weekly.created, Some(utc(2025, 12, 1, 9, 0)));

    let repeat = weekly.repeat.as_ref().unwrap();
    assert_eq!(repeat.rule(), "FREQ=WEEKLY;BYDAY=MO");
    assert_eq!(repeat.since(), weekly.start);
    assert_eq!(repeat.excludes().len(), 3);
    assert!(repeat.is_excluded(&utc(2026, 1, 12, 10, 0)));
    assert!(repeat.is_excluded(&utc(2026, 1, 19, 10, 0)));
    // London is on BST by April
    assert!(repeat.is_excluded(&utc(2026, 4, 6, 9, 0)));
}

#[test]
fn google_feed_all_day_event() {
    let events = read(GOOGLE_FEED);
    let offsite = &events[1];

    assert_eq!(offsite.summary.as_deref(), Some("Team offsite"));
    assert_eq!(offsite.start, Some(utc(2026, 2, 14, 0, 0)));
    assert_eq!(offsite.end, Some(utc(2026, 2, 15, 0, 0)));
    assert_eq!(offsite.created, Some(utc(2026, 1, 1, 12, 0)));
    assert!(!offsite.is_repeating());
}

#[test]
fn google_feed_alarm_does_not_leak() {
    let events = read(GOOGLE_FEED);
    let review = &events[2];

    assert_eq!(review.summary.as_deref(), Some("Design review"));
    assert_eq!(review.start, Some(utc(2026, 3, 1, 15, 0)));
    assert!(!review.raw.contains("VALARM"));
    assert!(!review.raw.contains("Alarm subject"));
}

#[test]
fn all_day_events_follow_default_zone() {
    let config = ReaderConfig::default().with_default_zone(chrono_tz::America::Chicago);
    let events = ICalReader::with_config(GOOGLE_FEED, config)
        .events()
        .unwrap()
        .unwrap();

    let start = events[1].start.unwrap();
    let local = start.with_timezone(&chrono_tz::America::Chicago);
    assert_eq!((local.hour(), local.minute(), local.second()), (0, 0, 0));
    // Zoned and UTC values are unaffected by the default zone
    assert_eq!(events[0].start, Some(utc(2026, 1, 5, 10, 0)));
    assert_eq!(events[2].start, Some(utc(2026, 3, 1, 15, 0)));
}

#[test]
fn local_date_time_uses_default_zone() {
    let input = "BEGIN:VEVENT\nDTSTART:20240101T090000\nSUMMARY:Launch\nSUMMARY:meeting\nEND:VEVENT";
    let config = ReaderConfig::default().with_default_zone(chrono_tz::Asia::Tokyo);
    let events = ICalReader::with_config(input, config)
        .events()
        .unwrap()
        .unwrap();

    assert_eq!(events.len(), 1);
    assert_eq!(events[0].summary.as_deref(), Some("Launch meeting"));
    // Tokyo is UTC+9
    assert_eq!(events[0].start, Some(utc(2024, 1, 1, 0, 0)));
}

#[test_log::test]
fn broken_event_is_reported_and_skipped() {
    let events = read(FEED_WITH_BROKEN_EVENT);
    let uids: Vec<_> = events.iter().filter_map(|e| e.uid.as_deref()).collect();
    assert_eq!(uids, vec!["first@example.com", "last@example.com"]);
}

#[test]
fn broken_event_is_fatal_under_fatal_policy() {
    let err = ICalReader::new(FEED_WITH_BROKEN_EVENT)
        .with_error_policy(ErrorPolicy::Fatal)
        .events()
        .unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::ExclusionWithoutRule);
}

#[test]
fn broken_event_discards_document_under_return_null() {
    let result = ICalReader::new(FEED_WITH_BROKEN_EVENT)
        .with_error_policy(ErrorPolicy::ReturnNull)
        .events()
        .unwrap();
    assert!(result.is_none());
}

#[test]
fn unknown_zone_fails_block_by_default() {
    let events = read(FEED_WITH_UNKNOWN_ZONE);
    assert!(events.is_empty());

    let err = ICalReader::new(FEED_WITH_UNKNOWN_ZONE)
        .with_error_policy(ErrorPolicy::Fatal)
        .events()
        .unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::UnknownTimezone);
}

#[test_log::test]
fn unknown_zone_uses_configured_fallback() {
    let config = ReaderConfig {
        unknown_timezone_fallback: Some(chrono_tz::Europe::Paris),
        ..ReaderConfig::default()
    };
    let events = ICalReader::with_config(FEED_WITH_UNKNOWN_ZONE, config)
        .events()
        .unwrap()
        .unwrap();

    // Paris is UTC+1 in January
    assert_eq!(events[0].start, Some(utc(2026, 1, 10, 8, 0)));
}

#[test]
fn missing_calendar_name() {
    assert_eq!(ICalReader::new(FEED_WITH_BROKEN_EVENT).calendar_name(), None);
}
