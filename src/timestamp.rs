//! Lenient timestamp (de)serialization.
//!
//! Clients written against the Columnist server disagree on how message
//! timestamps travel: RFC 3339 strings, offset-less ISO-8601 strings, or epoch
//! milliseconds. All three are accepted here and normalized to UTC; output is
//! always RFC 3339.
//!
//! Usage:
//! ```ignore
//! #[derive(Serialize, Deserialize)]
//! struct Record {
//!     #[serde(with = "crate::timestamp")]
//!     timestamp: DateTime<Utc>,
//! }
//! ```

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serializer, de};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTimestamp {
    Millis(i64),
    Text(String),
}

pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::AutoSi, true))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    match RawTimestamp::deserialize(deserializer)? {
        RawTimestamp::Millis(ms) => DateTime::<Utc>::from_timestamp_millis(ms)
            .ok_or_else(|| de::Error::custom(format!("timestamp out of range: {ms}"))),
        RawTimestamp::Text(s) => parse(&s).map_err(de::Error::custom),
    }
}

/// Parse an RFC 3339 or offset-less ISO-8601 string. Offset-less values are UTC.
pub fn parse(s: &str) -> Result<DateTime<Utc>, String> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    s.parse::<NaiveDateTime>()
        .map(|naive| naive.and_utc())
        .map_err(|e| format!("invalid timestamp '{s}': {e}"))
}
