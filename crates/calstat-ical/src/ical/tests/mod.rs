//! Document-level tests for the event reader.

mod feed;
