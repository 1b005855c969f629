//! Property line tokenizer for event blocks.
//!
//! Handles line unfolding and splits each logical line into key, parameter
//! string and value.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

#[expect(
    clippy::expect_used,
    reason = "Pattern is a literal and is covered by the tokenizer tests"
)]
static PROPERTY_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Z-]+);?([A-Z]+=[^:]*)?:(.*)").expect("property line pattern compiles")
});

/// One tokenized line of an event block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// Whitespace only.
    Blank,
    /// A `KEY[;PARAMS]:VALUE` line.
    Property(PropertyLine<'a>),
    /// A line that does not look like a property; carries the trimmed text.
    Continuation(&'a str),
}

/// A `KEY[;PARAMS]:VALUE` line split into its parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyLine<'a> {
    pub key: &'a str,
    pub params: Option<PropertyParams<'a>>,
    /// Raw value, untrimmed.
    pub value: &'a str,
}

/// The parameter section of a property line, e.g. `TZID=Europe/London`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyParams<'a>(&'a str);

impl<'a> PropertyParams<'a> {
    /// Wraps a raw parameter string. Blank strings yield `None`.
    #[must_use]
    pub fn new(raw: &'a str) -> Option<Self> {
        (!raw.trim().is_empty()).then_some(Self(raw))
    }

    #[must_use]
    pub fn as_str(&self) -> &'a str {
        self.0
    }

    /// Iterates `NAME=value` pairs in order of appearance.
    pub fn pairs(&self) -> impl Iterator<Item = (&'a str, &'a str)> + use<'a> {
        self.0.split(';').filter_map(|pair| {
            let (name, value) = pair.split_once('=')?;
            let value = value.trim();
            let value = value
                .strip_prefix('"')
                .and_then(|v| v.strip_suffix('"'))
                .unwrap_or(value);
            Some((name.trim(), value))
        })
    }

    /// Returns the value of the named parameter (case-insensitive name).
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&'a str> {
        self.pairs()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value)
            .filter(|value| !value.is_empty())
    }

    /// Returns the TZID parameter if present.
    #[must_use]
    pub fn tzid(&self) -> Option<&'a str> {
        self.get("TZID")
    }

    /// Whether the parameters mark the value as a pure date (`VALUE=DATE`).
    #[must_use]
    pub fn is_date(&self) -> bool {
        self.get("VALUE")
            .is_some_and(|value| value.eq_ignore_ascii_case("DATE"))
    }
}

/// Tokenizes a single logical line.
///
/// Lines that do not match `KEY[;PARAMS]:VALUE` come back as
/// [`Token::Continuation`] so the caller can keep the previous key.
#[must_use]
pub fn tokenize(line: &str) -> Token<'_> {
    if line.trim().is_empty() {
        return Token::Blank;
    }

    let Some(caps) = PROPERTY_LINE.captures(line) else {
        return Token::Continuation(line.trim());
    };

    match (caps.get(1), caps.get(3)) {
        (Some(key), Some(value)) => Token::Property(PropertyLine {
            key: key.as_str(),
            params: caps.get(2).and_then(|p| PropertyParams::new(p.as_str())),
            value: value.as_str(),
        }),
        _ => Token::Continuation(line.trim()),
    }
}

/// Unfolds content lines by removing a line break followed by a single
/// SPACE or HTAB (RFC 5545 §3.1).
///
/// Both CRLF and bare LF are recognized. Line breaks that are not folds are
/// kept as they are. Returns the input unchanged when nothing is folded.
#[must_use]
pub fn unfold(input: &str) -> Cow<'_, str> {
    if !input.contains("\n ") && !input.contains("\n\t") {
        return Cow::Borrowed(input);
    }

    let mut result = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(pos) = rest.find('\n') {
        let line = &rest[..pos];
        let after = &rest[pos + 1..];
        if after.starts_with([' ', '\t']) {
            // Fold: drop the line break and exactly one whitespace character
            result.push_str(line.strip_suffix('\r').unwrap_or(line));
            rest = &after[1..];
        } else {
            result.push_str(line);
            result.push('\n');
            rest = after;
        }
    }
    result.push_str(rest);

    Cow::Owned(result)
}

/// Collapses every whitespace run (including line breaks) into one space.
#[must_use]
pub fn compact_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
