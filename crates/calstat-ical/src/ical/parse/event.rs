//! Event block parser.
//!
//! Folds the lines of one VEVENT block into an [`Event`]. Each recognized
//! property key maps to a handler in [`PROPERTY_HANDLERS`]; unknown keys are
//! dropped.

use super::LOG_TARGET;
use super::error::{ParseError, ParseErrorKind, ParseResult};
use super::lexer::{PropertyParams, Token, compact_whitespace, tokenize, unfold};
use super::timestamp::TimestampResolver;
use crate::ical::core::{Event, Repeat};

/// A property value with the parameters of its line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyValue<'a> {
    /// Trimmed, never empty.
    pub value: &'a str,
    pub params: Option<PropertyParams<'a>>,
}

/// Applies one property to the record under construction.
pub type PropertyHandler =
    fn(Event, PropertyValue<'_>, &TimestampResolver) -> ParseResult<Event>;

/// Field assignment rules by property key.
pub const PROPERTY_HANDLERS: &[(&str, PropertyHandler)] = &[
    ("DTSTAMP", fill_created),
    ("DTSTART", set_start),
    ("DTEND", set_end),
    ("SUMMARY", append_summary),
    ("LOCATION", set_location),
    ("UID", set_uid),
    ("CREATED", set_created),
    ("RRULE", start_repeat),
    ("EXDATE", add_excludes),
];

/// Looks up the handler for a property key.
#[must_use]
pub fn property_handler(key: &str) -> Option<PropertyHandler> {
    PROPERTY_HANDLERS
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, handler)| *handler)
}

/// ## Summary
/// Parses one VEVENT block into an event record.
///
/// Folded lines are unfolded first. A line that does not look like a property
/// continues the previous property, so wrapped SUMMARY text is kept.
///
/// ## Errors
/// Returns the first error raised by a line; no partial record is produced.
pub fn parse_event(block: &str, resolver: &TimestampResolver) -> ParseResult<Event> {
    let unfolded = unfold(block);
    let lines: Vec<&str> = unfolded.lines().collect();
    parse_lines(block, &lines, resolver)
}

/// ## Summary
/// Folds already split lines into an event record.
///
/// `raw` is stored on the record for diagnostics.
///
/// ## Errors
/// Returns the first error raised by a line, bound to its 1-based index.
pub fn parse_lines(
    raw: &str,
    lines: &[&str],
    resolver: &TimestampResolver,
) -> ParseResult<Event> {
    let (_, mut event) = lines.iter().copied().enumerate().try_fold(
        (None, Event::new(raw)),
        |(key, event), (idx, line)| {
            apply_line(key, event, line, resolver).map_err(|e| e.at_line(idx + 1))
        },
    )?;

    // DTSTART may come after RRULE, so anchor once the block is done
    let start = event.start;
    if let Some(repeat) = event.repeat.as_mut() {
        repeat.anchor(start);
    }

    Ok(event)
}

fn apply_line<'a>(
    key: Option<&'a str>,
    event: Event,
    line: &'a str,
    resolver: &TimestampResolver,
) -> ParseResult<(Option<&'a str>, Event)> {
    let (key, property) = match tokenize(line) {
        Token::Blank => {
            tracing::debug!(
                target: LOG_TARGET,
                block = %compact_whitespace(&event.raw),
                "Odd blank line in event block"
            );
            return Ok((key, event));
        }
        Token::Property(prop) => (
            prop.key,
            PropertyValue {
                value: prop.value.trim(),
                params: prop.params,
            },
        ),
        Token::Continuation(text) => {
            let key = key.ok_or_else(|| {
                ParseError::new(ParseErrorKind::NotAKeyValueLine).with_context(text)
            })?;
            (
                key,
                PropertyValue {
                    value: text,
                    params: None,
                },
            )
        }
    };

    if property.value.is_empty() {
        return Ok((Some(key), event));
    }

    let event = match property_handler(key) {
        Some(handler) => handler(event, property, resolver)?,
        None => event,
    };

    Ok((Some(key), event))
}

/// DTSTAMP only fills `created` when nothing set it yet.
fn fill_created(
    mut event: Event,
    property: PropertyValue<'_>,
    resolver: &TimestampResolver,
) -> ParseResult<Event> {
    if event.created.is_none() {
        event.created = Some(resolver.resolve(property.value, property.params)?);
    }
    Ok(event)
}

/// CREATED always wins over DTSTAMP.
fn set_created(
    mut event: Event,
    property: PropertyValue<'_>,
    resolver: &TimestampResolver,
) -> ParseResult<Event> {
    event.created = Some(resolver.resolve(property.value, property.params)?);
    Ok(event)
}

fn set_start(
    mut event: Event,
    property: PropertyValue<'_>,
    resolver: &TimestampResolver,
) -> ParseResult<Event> {
    event.start = Some(resolver.resolve(property.value, property.params)?);
    Ok(event)
}

fn set_end(
    mut event: Event,
    property: PropertyValue<'_>,
    resolver: &TimestampResolver,
) -> ParseResult<Event> {
    event.end = Some(resolver.resolve(property.value, property.params)?);
    Ok(event)
}

fn append_summary(
    mut event: Event,
    property: PropertyValue<'_>,
    _resolver: &TimestampResolver,
) -> ParseResult<Event> {
    event.summary = Some(match event.summary.take() {
        Some(summary) => format!("{summary} {}", property.value),
        None => property.value.to_string(),
    });
    Ok(event)
}

fn set_location(
    mut event: Event,
    property: PropertyValue<'_>,
    _resolver: &TimestampResolver,
) -> ParseResult<Event> {
    event.location = Some(property.value.to_string());
    Ok(event)
}

fn set_uid(
    mut event: Event,
    property: PropertyValue<'_>,
    _resolver: &TimestampResolver,
) -> ParseResult<Event> {
    event.uid = Some(property.value.to_string());
    Ok(event)
}

/// A later RRULE replaces the earlier one, exclusions included.
fn start_repeat(
    mut event: Event,
    property: PropertyValue<'_>,
    _resolver: &TimestampResolver,
) -> ParseResult<Event> {
    event.repeat = Some(Repeat::new(property.value));
    Ok(event)
}

fn add_excludes(
    mut event: Event,
    property: PropertyValue<'_>,
    resolver: &TimestampResolver,
) -> ParseResult<Event> {
    for token in property.value.split(',').map(str::trim) {
        if token.is_empty() {
            continue;
        }
        let repeat = event.repeat.as_mut().ok_or_else(|| {
            ParseError::new(ParseErrorKind::ExclusionWithoutRule).with_context(token)
        })?;
        repeat.add_exclude(resolver.resolve(token, property.params)?);
    }
    Ok(event)
}
