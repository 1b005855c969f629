//! Document scanner.
//!
//! Finds the VEVENT blocks of a document, strips their alarms and hands each
//! block to the event parser under the reader's [`ErrorPolicy`].

use std::borrow::Cow;
use std::sync::LazyLock;

use calstat_core::types::ErrorPolicy;
use regex::Regex;

use super::LOG_TARGET;
use super::calname::calendar_name;
use super::error::ParseResult;
use super::event::parse_event;
use super::lexer::compact_whitespace;
use crate::ical::core::{Event, ReaderConfig};

#[expect(
    clippy::expect_used,
    reason = "Patterns are literals and are covered by the reader tests"
)]
static EVENT_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)BEGIN:VEVENT.+?END:VEVENT").expect("event block pattern compiles")
});

#[expect(
    clippy::expect_used,
    reason = "Patterns are literals and are covered by the reader tests"
)]
static ALARM_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)BEGIN:VALARM.+?END:VALARM").expect("alarm block pattern compiles")
});

/// Reads events out of one iCalendar document.
///
/// The reader borrows the document and owns a copy of its configuration, so
/// several readers can scan documents on different threads at once.
#[derive(Debug, Clone)]
pub struct ICalReader<'a> {
    ical: &'a str,
    config: ReaderConfig,
}

impl<'a> ICalReader<'a> {
    /// Creates a reader with the default configuration.
    #[must_use]
    pub fn new(ical: &'a str) -> Self {
        Self::with_config(ical, ReaderConfig::default())
    }

    #[must_use]
    pub const fn with_config(ical: &'a str, config: ReaderConfig) -> Self {
        Self { ical, config }
    }

    #[must_use]
    pub const fn with_error_policy(mut self, error_policy: ErrorPolicy) -> Self {
        self.config.error_policy = error_policy;
        self
    }

    pub const fn set_error_policy(&mut self, error_policy: ErrorPolicy) {
        self.config.error_policy = error_policy;
    }

    #[must_use]
    pub const fn error_policy(&self) -> ErrorPolicy {
        self.config.error_policy
    }

    #[must_use]
    pub const fn config(&self) -> &ReaderConfig {
        &self.config
    }

    /// Returns the calendar's display name (`X-WR-CALNAME`), if any.
    #[must_use]
    pub fn calendar_name(&self) -> Option<String> {
        calendar_name(self.ical)
    }

    /// Iterates the VEVENT blocks in document order, alarms removed.
    pub fn event_blocks(&self) -> impl Iterator<Item = Cow<'a, str>> + use<'a> {
        EVENT_BLOCK
            .find_iter(self.ical)
            .map(|m| ALARM_BLOCK.replace_all(m.as_str(), ""))
    }

    /// ## Summary
    /// Parses every VEVENT block of the document, in document order.
    ///
    /// Failed blocks are handled per the error policy:
    /// - `Report` logs the error with the compacted block and skips it.
    /// - `Ignore` skips it silently.
    /// - `ReturnNull` stops at the first failed block and returns `Ok(None)`.
    /// - `Fatal` stops at the first failed block and returns the error.
    ///
    /// ## Errors
    /// Returns the first block's error under the `Fatal` policy.
    #[tracing::instrument(
        skip(self),
        fields(input_len = self.ical.len(), policy = %self.config.error_policy)
    )]
    pub fn events(&self) -> ParseResult<Option<Vec<Event>>> {
        let resolver = self.config.resolver();
        let mut events = Vec::new();

        for block in self.event_blocks() {
            let err = match parse_event(&block, &resolver) {
                Ok(event) => {
                    events.push(event);
                    continue;
                }
                Err(err) => err,
            };

            match self.config.error_policy {
                ErrorPolicy::Report => {
                    tracing::error!(
                        target: LOG_TARGET,
                        error = %err,
                        block = %compact_whitespace(&block),
                        "Skipping malformed event"
                    );
                }
                ErrorPolicy::Ignore => {}
                ErrorPolicy::ReturnNull => {
                    tracing::debug!(
                        target: LOG_TARGET,
                        error = %err,
                        "Malformed event, discarding document"
                    );
                    return Ok(None);
                }
                ErrorPolicy::Fatal => return Err(err),
            }
        }

        tracing::debug!(target: LOG_TARGET, count = events.len(), "Scanned events");

        Ok(Some(events))
    }
}
