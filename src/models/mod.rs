//! Data models for the UniNoter application.
//!
//! Field names are snake_case on the wire, matching what the web client sends and reads.

mod contribution;
mod invite;
mod summary;
mod topic;
mod user;

pub use contribution::*;
pub use invite::*;
pub use summary::*;
pub use topic::*;
pub use user::*;

use chrono::{DateTime, SecondsFormat, Utc};

/// Format a timestamp the way every record stores it: RFC 3339, UTC, nanoseconds.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

/// Current time as a record timestamp.
pub fn now_timestamp() -> String {
    format_timestamp(Utc::now())
}

/// Parse a stored timestamp, tolerating any RFC 3339 offset.
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
