pub mod error;
pub mod ical;

pub use ical::{
    ErrorPolicy, Event, ICalReader, ParseError, ParseErrorKind, ParseResult, ReaderConfig, Repeat,
    calendar_name,
};
