use std::str::FromStr;

use serde::Deserialize;

use crate::error::CoreError;

/// How a reader reacts when a single event block fails to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorPolicy {
    /// Log the failure with the offending block and keep scanning.
    #[default]
    Report,
    /// Drop the block without logging and keep scanning.
    Ignore,
    /// Stop scanning and yield no result for the whole document.
    ReturnNull,
    /// Stop scanning and hand the error to the caller.
    Fatal,
}

impl ErrorPolicy {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Report => "report",
            Self::Ignore => "ignore",
            Self::ReturnNull => "return_null",
            Self::Fatal => "fatal",
        }
    }
}

impl std::fmt::Display for ErrorPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ErrorPolicy {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "report" => Ok(Self::Report),
            "ignore" => Ok(Self::Ignore),
            "return_null" => Ok(Self::ReturnNull),
            "fatal" => Ok(Self::Fatal),
            other => Err(CoreError::InvalidConfiguration(format!(
                "unknown error policy '{other}'"
            ))),
        }
    }
}
