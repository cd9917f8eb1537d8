//! Timestamp value carrying an optional originating time zone.
//!
//! # Examples
//!
//! ```
//! use schema_temporal::{EncodeOptions, Position, TemporalValue, Zone};
//!
//! let value = TemporalValue::parse("2024-03-15T10:30:00.123+01:00").unwrap();
//! assert_eq!(value.to_string(), "2024-03-15T10:30:00.123+01:00");
//!
//! let options = EncodeOptions::new().with_zone_override(Zone::Utc);
//! let nested = value.encode(Position::Nested, &options);
//! assert_eq!(nested, "2024-03-15T09:30:00.123Z");
//! ```

use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use chrono::{DateTime, SecondsFormat, Timelike, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    encoder::{EncodeOptions, Position},
    error::{CodingPath, DecodeError},
    ldmodel::{LinkedDataTemporal, VALUE_ATTRIBUTE},
    zone::Zone,
};

// Byte indexes in `YYYY-MM-DDTHH:MM:SS.sss...`.
const TIME_SEPARATOR_INDEX: usize = 10;
const FRACTION_SEPARATOR_INDEX: usize = 19;

const DATE_STRING: &str = "an ISO-8601 date string";
const LINKED_DATA_OBJECT: &str = "a linked-data object with a string `value`";

/// An absolute instant plus the zone it should be rendered in.
///
/// Equality and hashing consider both the instant and the zone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TemporalValue {
    instant: DateTime<Utc>,
    zone: Option<Zone>,
}

impl TemporalValue {
    pub fn new(instant: DateTime<Utc>, zone: Option<Zone>) -> Self {
        Self { instant, zone }
    }

    pub fn now() -> Self {
        Self::new(Utc::now(), None)
    }

    /// Parses an internet date-time with fractional seconds,
    /// e.g. `2024-03-15T10:30:00.123Z`.
    ///
    /// The offset in the string becomes the value's zone; a zero offset
    /// becomes [`Zone::Utc`]. Returns `None` when `s` is not such a string.
    pub fn parse(s: &str) -> Option<Self> {
        if !has_internet_date_time_layout(s) {
            return None;
        }

        let parsed = DateTime::parse_from_rfc3339(s).ok()?;
        // chrono represents a leap second as nanoseconds past one billion.
        if parsed.nanosecond() >= 1_000_000_000 {
            return None;
        }
        tracing::trace!("parsed date string {s}");

        Some(Self {
            instant: parsed.with_timezone(&Utc),
            zone: Some(Zone::from(*parsed.offset())),
        })
    }

    pub fn instant(&self) -> DateTime<Utc> {
        self.instant
    }

    pub fn zone(&self) -> Option<Zone> {
        self.zone
    }

    /// Renders the instant with millisecond precision in the zone chosen
    /// by `options`, falling back to the value's zone and then UTC.
    pub fn to_iso8601(&self, options: &EncodeOptions) -> String {
        let zone = options.resolve_zone(self.zone);
        self.instant
            .with_timezone(&zone.offset_at(&self.instant))
            .to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    /// Encodes the value for `position`: a linked-data object at the
    /// document root, a bare string anywhere else.
    pub fn encode(&self, position: Position, options: &EncodeOptions) -> Value {
        let text = self.to_iso8601(options);
        match position {
            Position::Root => Value::from(LinkedDataTemporal::new(text)),
            Position::Nested => Value::String(text),
        }
    }

    /// Serializes the value as a complete linked-data document.
    pub fn to_document_string(&self, options: &EncodeOptions) -> serde_json::Result<String> {
        serde_json::to_string(&self.encode(Position::Root, options))
    }

    /// Decodes either a linked-data object or a bare date string.
    ///
    /// Any failure of the object form, including a malformed date inside a
    /// well-formed object, retries the node as a bare string. The caller
    /// sees the outcome of that second attempt.
    pub fn decode(node: &Value) -> Result<Self, DecodeError> {
        let path = CodingPath::root();
        match decode_linked_data(node, &path) {
            Ok(value) => Ok(value),
            Err(err) => {
                tracing::debug!(
                    path = %err.path(),
                    "linked-data decoding failed ({err}), retrying as bare string"
                );
                decode_bare(node, &path)
            }
        }
    }

    pub fn from_document_str(s: &str) -> Result<Self, DecodeError> {
        let node: Value = serde_json::from_str(s).map_err(|err| DecodeError::MalformedDocument {
            path: CodingPath::root(),
            message: err.to_string(),
        })?;
        Self::decode(&node)
    }
}

// chrono also accepts a space or lowercase `t` separator and a lowercase `z`.
fn has_internet_date_time_layout(s: &str) -> bool {
    let bytes = s.as_bytes();
    if bytes.get(TIME_SEPARATOR_INDEX) != Some(&b'T')
        || bytes.get(FRACTION_SEPARATOR_INDEX) != Some(&b'.')
    {
        return false;
    }

    if s.ends_with('Z') {
        return true;
    }
    match bytes.len().checked_sub(6).map(|start| &bytes[start..]) {
        Some([sign, h1, h2, b':', m1, m2]) => {
            matches!(*sign, b'+' | b'-')
                && [h1, h2, m1, m2].iter().all(|digit| digit.is_ascii_digit())
        }
        _ => false,
    }
}

fn decode_linked_data(node: &Value, path: &CodingPath) -> Result<TemporalValue, DecodeError> {
    let doc = LinkedDataTemporal::deserialize(node).map_err(|_| DecodeError::ShapeMismatch {
        path: path.clone(),
        expected: LINKED_DATA_OBJECT,
    })?;

    parse_at(&doc.value, &path.join(VALUE_ATTRIBUTE))
}

fn decode_bare(node: &Value, path: &CodingPath) -> Result<TemporalValue, DecodeError> {
    let text = node.as_str().ok_or_else(|| DecodeError::ShapeMismatch {
        path: path.clone(),
        expected: DATE_STRING,
    })?;

    parse_at(text, path)
}

fn parse_at(text: &str, path: &CodingPath) -> Result<TemporalValue, DecodeError> {
    TemporalValue::parse(text).ok_or_else(|| DecodeError::InvalidFormat {
        path: path.clone(),
        input: text.to_owned(),
    })
}

impl FromStr for TemporalValue {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_at(s, &CodingPath::root())
    }
}

impl Display for TemporalValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_iso8601(&EncodeOptions::default()))
    }
}

impl From<DateTime<Utc>> for TemporalValue {
    fn from(instant: DateTime<Utc>) -> Self {
        Self::new(instant, None)
    }
}

// Serde cannot tell whether it is writing the document root, so this
// always writes the nested form. Use `encode` for the linked-data form.
impl Serialize for TemporalValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

// The decoder only sees this node, so paths in the message start at `$`
// even when the value is a field; serde_json appends the line and column.
impl<'de> Deserialize<'de> for TemporalValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let node = Value::deserialize(deserializer)?;
        Self::decode(&node).map_err(serde::de::Error::custom)
    }
}
