//! iCalendar event extraction.
//!
//! ## Usage
//!
//! ```rust
//! use calstat_ical::ical::parse::ICalReader;
//!
//! let input = "\
//! BEGIN:VCALENDAR\r\n\
//! X-WR-CALNAME:Team\r\n\
//! BEGIN:VEVENT\r\n\
//! UID:standup@example.com\r\n\
//! DTSTART:20260105T093000Z\r\n\
//! SUMMARY:Standup\r\n\
//! RRULE:FREQ=DAILY;BYDAY=MO,TU,WE,TH,FR\r\n\
//! END:VEVENT\r\n\
//! END:VCALENDAR\r\n";
//!
//! let reader = ICalReader::new(input);
//! assert_eq!(reader.calendar_name().as_deref(), Some("Team"));
//!
//! let events = reader.events().unwrap().unwrap();
//! assert_eq!(events[0].summary.as_deref(), Some("Standup"));
//! assert!(events[0].is_repeating());
//! ```

mod calname;
mod error;
mod event;
mod lexer;
mod reader;
mod timestamp;

/// Tracing target for malformed-input diagnostics.
pub const LOG_TARGET: &str = "ical";

pub use calname::calendar_name;
pub use error::{ParseError, ParseErrorKind, ParseResult};
pub use event::{
    PROPERTY_HANDLERS, PropertyHandler, PropertyValue, parse_event, parse_lines, property_handler,
};
pub use lexer::{PropertyLine, PropertyParams, Token, compact_whitespace, tokenize, unfold};
pub use reader::ICalReader;
pub use timestamp::TimestampResolver;
