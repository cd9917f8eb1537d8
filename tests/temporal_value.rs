use chrono::{TimeZone, Utc};
use schema_temporal::{DecodeError, EncodeOptions, Position, TemporalValue, Zone};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

const DOCUMENT: &str = include_str!("../test_resources/temporal_value_document.json");
const EVENT: &str = include_str!("../test_resources/event_with_nested_values.json");

#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
struct Event {
    name: String,
    start_date: TemporalValue,
    end_date: TemporalValue,
}

#[test]
fn test_decode_document_fixture() {
    let value = TemporalValue::from_document_str(DOCUMENT).unwrap();

    assert_eq!(value.instant().timestamp_millis(), 1_710_498_600_123);
    assert_eq!(value.zone(), Some(Zone::Utc));
}

#[test]
fn test_document_round_trip_keeps_instant() {
    let original = TemporalValue::new(
        Utc.with_ymd_and_hms(2023, 11, 5, 1, 30, 0).unwrap(),
        Some(Zone::Named(chrono_tz::America::New_York)),
    );

    for options in [
        EncodeOptions::default(),
        EncodeOptions::new().with_zone_override("+09:00".parse().unwrap()),
    ] {
        let text = original.to_document_string(&options).unwrap();
        let decoded = TemporalValue::from_document_str(&text).unwrap();
        assert_eq!(decoded.instant(), original.instant(), "{text}");
    }
}

#[test]
fn test_root_document_shape() {
    let value = TemporalValue::parse("2024-03-15T10:30:00.123Z").unwrap();
    let text = value.to_document_string(&EncodeOptions::default()).unwrap();

    let expected: Value = serde_json::from_str(DOCUMENT).unwrap();
    assert_eq!(serde_json::from_str::<Value>(&text).unwrap(), expected);
}

#[test]
fn test_nested_values_in_event_fixture() {
    let event: Event = serde_json::from_str(EVENT).unwrap();

    let start = Utc.with_ymd_and_hms(2024, 3, 15, 10, 30, 0).unwrap()
        + chrono::Duration::milliseconds(123);

    assert_eq!(event.start_date.instant(), start);
    assert_eq!(event.start_date.zone(), "+01:00".parse::<Zone>().ok());
    assert_eq!(event.end_date.zone(), Some(Zone::Utc));

    assert_eq!(
        serde_json::to_value(&event).unwrap(),
        serde_json::from_str::<Value>(EVENT).unwrap()
    );
}

#[test]
fn test_nested_field_never_wrapped() {
    let value = TemporalValue::parse("2024-01-01T00:00:00.000Z").unwrap();
    let options = EncodeOptions::new().with_zone_override(Zone::Named(chrono_tz::Europe::Paris));

    let payload = json!({ "createdAt": value.encode(Position::Nested, &options) });
    assert_eq!(payload, json!({ "createdAt": "2024-01-01T01:00:00.000+01:00" }));
}

#[test]
fn test_override_applies_to_root_document() {
    let value = TemporalValue::parse("2024-07-01T12:00:00.000+02:00").unwrap();
    let options = EncodeOptions::new().with_zone_override(Zone::Utc);

    assert_eq!(
        value.encode(Position::Root, &options),
        json!({
            "@context": "https://schema.org",
            "@type": "TemporalValue",
            "value": "2024-07-01T10:00:00.000Z"
        })
    );
}

#[test]
fn test_invalid_inputs_fail_everywhere() {
    assert_eq!(TemporalValue::parse("not-a-date"), None);
    assert!(matches!(
        TemporalValue::decode(&json!("not-a-date")),
        Err(DecodeError::InvalidFormat { .. })
    ));
    assert!(serde_json::from_str::<TemporalValue>("\"not-a-date\"").is_err());
    assert!(TemporalValue::from_document_str("{ not json").is_err());
}
