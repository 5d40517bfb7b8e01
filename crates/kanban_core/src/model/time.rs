//! Timestamp representation shared by tasks and columns.
//!
//! # Invariants
//! - In-memory timestamps are UTC with millisecond precision, so a value
//!   survives a storage round-trip unchanged.
//! - Persisted form is ISO-8601 text: `YYYY-MM-DDTHH:MM:SS.mmmZ`.
//! - Only years `0000..=9999` are storable; wider years format with a sign
//!   prefix that RFC 3339 parsing rejects.

use chrono::{DateTime, Datelike, SecondsFormat, SubsecRound, Utc};

/// UTC point in time used by all board records.
pub type Timestamp = DateTime<Utc>;

/// Returns the current time truncated to storage precision.
pub fn now() -> Timestamp {
    normalize(Utc::now())
}

/// Truncates sub-millisecond precision that storage cannot represent.
pub fn normalize(value: Timestamp) -> Timestamp {
    value.trunc_subsecs(3)
}

/// Whether the timestamp formats to text that parses back.
pub fn is_storable(value: &Timestamp) -> bool {
    (0..=9999).contains(&value.year())
}

/// Formats a timestamp as canonical storage text.
pub fn format_timestamp(value: &Timestamp) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parses storage text back into a UTC timestamp.
///
/// Accepts any RFC 3339 offset; the result is converted to UTC.
pub fn parse_timestamp(value: &str) -> Result<Timestamp, chrono::ParseError> {
    DateTime::parse_from_rfc3339(value.trim()).map(|parsed| normalize(parsed.with_timezone(&Utc)))
}
