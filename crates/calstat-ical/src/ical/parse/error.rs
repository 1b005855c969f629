//! Event parse error types.

use std::fmt;

/// Result type for event parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// An error that aborted parsing of one event block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// The kind of error.
    pub kind: ParseErrorKind,
    /// Line inside the event block where the error occurred (1-based, 0 if unknown).
    pub line: usize,
    /// Additional context, usually the offending value.
    pub context: Option<String>,
}

impl ParseError {
    /// Creates a new parse error that is not yet bound to a line.
    #[must_use]
    pub fn new(kind: ParseErrorKind) -> Self {
        Self {
            kind,
            line: 0,
            context: None,
        }
    }

    /// Creates a malformed timestamp error for the given value.
    #[must_use]
    pub fn malformed_timestamp(value: &str) -> Self {
        Self::new(ParseErrorKind::MalformedTimestamp).with_context(format!("'{value}'"))
    }

    /// Creates an unknown timezone error for the given TZID.
    #[must_use]
    pub fn unknown_timezone(tzid: &str) -> Self {
        Self::new(ParseErrorKind::UnknownTimezone).with_context(format!("TZID '{tzid}'"))
    }

    /// Binds the error to a line of the event block.
    #[must_use]
    pub fn at_line(mut self, line: usize) -> Self {
        self.line = line;
        self
    }

    /// Attaches context to the error.
    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.line > 0 {
            write!(f, "line {}: ", self.line)?;
        }
        write!(f, "{}", self.kind)?;
        if let Some(context) = &self.context {
            write!(f, ": {context}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}

/// The kind of parse error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum ParseErrorKind {
    /// A date or date-time value does not have a recognized shape.
    #[error("malformed timestamp")]
    MalformedTimestamp,
    /// A TZID parameter does not name a known timezone.
    #[error("unknown timezone")]
    UnknownTimezone,
    /// An EXDATE line appeared before any RRULE line in the block.
    #[error("exclusion date without a recurrence rule")]
    ExclusionWithoutRule,
    /// An unlabeled line appeared with no previous property to continue.
    #[error("not a key/value line")]
    NotAKeyValueLine,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_without_line() {
        let err = ParseError::malformed_timestamp("2024");
        assert_eq!(err.to_string(), "malformed timestamp: '2024'");
    }

    #[test]
    fn display_with_line_and_context() {
        let err = ParseError::unknown_timezone("Mars/Olympus").at_line(4);
        assert_eq!(
            err.to_string(),
            "line 4: unknown timezone: TZID 'Mars/Olympus'"
        );
    }

    #[test]
    fn display_bare_kind() {
        let err = ParseError::new(ParseErrorKind::ExclusionWithoutRule);
        assert_eq!(err.to_string(), "exclusion date without a recurrence rule");
    }
}
