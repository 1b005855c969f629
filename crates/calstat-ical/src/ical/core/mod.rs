//! Event record types and reader configuration.

mod config;
mod event;

pub use calstat_core::types::ErrorPolicy;
pub use config::ReaderConfig;
pub use event::{Event, Repeat};
