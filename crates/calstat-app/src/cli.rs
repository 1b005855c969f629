use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use calstat_core::config::ReaderSettings;
use calstat_core::types::ErrorPolicy;
use calstat_ical::ReaderConfig;
use chrono_tz::Tz;
use clap::Parser;

/// Print the events of an iCalendar file.
#[derive(Debug, Parser)]
#[command(name = "calstat", version, about)]
pub struct Cli {
    /// Calendar file to read, or `-` for stdin.
    pub input: PathBuf,

    /// What to do with events that fail to parse (report, ignore, return_null, fatal).
    #[arg(long)]
    pub policy: Option<ErrorPolicy>,

    /// IANA zone for date-only and zone-naive values.
    #[arg(long)]
    pub timezone: Option<Tz>,

    /// Print one JSON object per event instead of a table row.
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// ## Summary
    /// Builds the reader configuration from settings, with flags taking precedence.
    ///
    /// ## Errors
    /// Returns an error if a configured timezone is unknown.
    pub fn reader_config(&self, settings: &ReaderSettings) -> Result<ReaderConfig> {
        let mut config = ReaderConfig::from_settings(settings)?;
        if let Some(policy) = self.policy {
            config = config.with_error_policy(policy);
        }
        if let Some(zone) = self.timezone {
            config = config.with_default_zone(zone);
        }
        Ok(config)
    }

    /// ## Summary
    /// Reads the whole input document.
    ///
    /// ## Errors
    /// Returns an error if the file or stdin cannot be read as UTF-8.
    pub fn read_input(&self) -> Result<String> {
        if self.input.as_os_str() == "-" {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read calendar from stdin")?;
            return Ok(buf);
        }

        std::fs::read_to_string(&self.input)
            .with_context(|| format!("failed to read {}", self.input.display()))
    }
}
