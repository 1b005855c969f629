use anyhow::Result;
use calstat_ical::Event;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// ## Summary
/// Formats one event as a tab-separated row in the given display zone.
///
/// Columns: start, end, summary, location, recurrence rule, exclusion count.
#[must_use]
pub fn event_row(event: &Event, zone: Tz) -> String {
    let (rule, excludes) = event.repeat.as_ref().map_or(("-", 0), |repeat| {
        (repeat.rule(), repeat.excludes().len())
    });

    format!(
        "{}\t{}\t{}\t{}\t{}\t{}",
        format_time(event.start, zone),
        format_time(event.end, zone),
        event.summary.as_deref().unwrap_or("-"),
        event.location.as_deref().unwrap_or("-"),
        rule,
        excludes,
    )
}

/// ## Summary
/// Serializes one event as a single-line JSON object.
///
/// ## Errors
/// Returns an error if serialization fails.
pub fn event_json(event: &Event) -> Result<String> {
    Ok(serde_json::to_string(event)?)
}

fn format_time(time: Option<DateTime<Utc>>, zone: Tz) -> String {
    time.map_or_else(
        || "-".to_string(),
        |t| t.with_timezone(&zone).format(TIME_FORMAT).to_string(),
    )
}
