//! Event extraction from iCalendar documents (RFC 5545 subset).
//!
//! Only VEVENT components are read. Alarms nested in events are dropped and
//! unrecognized properties are ignored.
//!
//! ## Submodules
//!
//! - [`core`] - Record types (`Event`, `Repeat`) and `ReaderConfig`
//! - [`parse`] - Tokenizer, timestamp resolver, block parser and `ICalReader`

pub mod core;
pub mod parse;

#[cfg(test)]
mod tests;

pub use self::core::{ErrorPolicy, Event, ReaderConfig, Repeat};
pub use parse::{ICalReader, ParseError, ParseErrorKind, ParseResult, calendar_name};
