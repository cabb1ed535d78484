//! Serde helpers for optional election boundaries.
//!
//! Boundary timestamps come straight from the server and are occasionally
//! null, empty, or in a format we do not understand. None of these should
//! make the whole election record unreadable, so anything that does not parse
//! becomes `None` and the phase derivation treats that boundary as absent.
//!
//! Use as `#[serde(default, with = "lenient_time")]`.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

pub fn serialize<S>(time: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    time.serialize(serializer)
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    Ok(parse(&raw))
}

/// Interpret a raw JSON value as an instant, if possible.
/// Strings are RFC 3339; integers are milliseconds since the Unix epoch.
pub fn parse(raw: &Value) -> Option<DateTime<Utc>> {
    let parsed = match raw {
        Value::Null => return None,
        Value::String(s) if s.trim().is_empty() => return None,
        Value::String(s) => DateTime::parse_from_rfc3339(s.trim())
            .ok()
            .map(|time| time.with_timezone(&Utc)),
        Value::Number(n) => n
            .as_i64()
            .and_then(|millis| Utc.timestamp_millis_opt(millis).single()),
        _ => None,
    };
    if parsed.is_none() {
        debug!("Ignoring unparsable timestamp {raw}");
    }
    parsed
}
