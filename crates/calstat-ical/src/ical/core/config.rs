//! Per-reader configuration.

use calstat_core::config::ReaderSettings;
use calstat_core::error::{CoreError, CoreResult};
use calstat_core::types::ErrorPolicy;
use chrono_tz::Tz;

use crate::error::IcalResult;
use crate::ical::parse::TimestampResolver;

/// Settings a reader applies to one scan.
///
/// Copied into each reader, never shared mutably.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReaderConfig {
    pub error_policy: ErrorPolicy,
    /// Zone for date-only and zone-naive values.
    pub default_zone: Tz,
    /// Zone used when a TZID cannot be resolved. `None` fails the block.
    pub unknown_timezone_fallback: Option<Tz>,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            error_policy: ErrorPolicy::default(),
            default_zone: Tz::UTC,
            unknown_timezone_fallback: None,
        }
    }
}

impl ReaderConfig {
    /// ## Summary
    /// Builds a reader configuration from loaded settings.
    ///
    /// ## Errors
    /// Returns an error if a configured timezone is not a known IANA zone.
    pub fn from_settings(settings: &ReaderSettings) -> IcalResult<Self> {
        let default_zone = parse_zone(&settings.default_timezone)?;
        let unknown_timezone_fallback = settings
            .unknown_timezone_fallback
            .as_deref()
            .map(parse_zone)
            .transpose()?;

        Ok(Self {
            error_policy: settings.error_policy,
            default_zone,
            unknown_timezone_fallback,
        })
    }

    #[must_use]
    pub const fn with_error_policy(mut self, error_policy: ErrorPolicy) -> Self {
        self.error_policy = error_policy;
        self
    }

    #[must_use]
    pub const fn with_default_zone(mut self, default_zone: Tz) -> Self {
        self.default_zone = default_zone;
        self
    }

    /// Returns the timestamp resolver for this configuration.
    #[must_use]
    pub const fn resolver(&self) -> TimestampResolver {
        TimestampResolver::new(self.default_zone)
            .with_unknown_timezone_fallback(self.unknown_timezone_fallback)
    }
}

fn parse_zone(name: &str) -> CoreResult<Tz> {
    name.trim().parse::<Tz>().map_err(|e| {
        CoreError::InvalidConfiguration(format!("unknown timezone '{name}': {e}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IcalError;

    fn settings(default_timezone: &str, fallback: Option<&str>) -> ReaderSettings {
        ReaderSettings {
            error_policy: ErrorPolicy::Fatal,
            default_timezone: default_timezone.to_string(),
            unknown_timezone_fallback: fallback.map(str::to_string),
        }
    }

    #[test]
    fn default_config() {
        let config = ReaderConfig::default();
        assert_eq!(config.error_policy, ErrorPolicy::Report);
        assert_eq!(config.default_zone, Tz::UTC);
        assert!(config.unknown_timezone_fallback.is_none());
    }

    #[test]
    fn from_settings_resolves_zones() {
        let config =
            ReaderConfig::from_settings(&settings("Europe/Paris", Some("UTC"))).unwrap();
        assert_eq!(config.error_policy, ErrorPolicy::Fatal);
        assert_eq!(config.default_zone, chrono_tz::Europe::Paris);
        assert_eq!(config.unknown_timezone_fallback, Some(Tz::UTC));
        assert_eq!(config.resolver().default_zone(), chrono_tz::Europe::Paris);
    }

    #[test]
    fn from_settings_rejects_unknown_zone() {
        let err = ReaderConfig::from_settings(&settings("Atlantis/Capital", None)).unwrap_err();
        assert!(matches!(
            err,
            IcalError::CoreError(CoreError::InvalidConfiguration(_))
        ));
        assert!(err.to_string().contains("Atlantis/Capital"));
    }

    #[test]
    fn from_settings_rejects_unknown_fallback() {
        assert!(ReaderConfig::from_settings(&settings("UTC", Some("Nowhere"))).is_err());
    }
}
