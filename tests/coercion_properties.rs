//! Cross-coercer properties: totality, absence rules, idempotence and
//! the documented parsing heuristics.

use chrono::{Datelike, Duration};
use pliant_json::{
    coerce_bool, coerce_currency, coerce_datetime, coerce_duration, coerce_f64, coerce_i64,
    coerce_list, coerce_list_required, coerce_map, coerce_num, coerce_phone, coerce_slug,
    coerce_string, coerce_uri, CurrencyValue, Num,
};
use serde_json::{json, Value};

/// Every shape a JSON value can take.
fn all_shapes() -> Vec<Value> {
    vec![
        json!(null),
        json!(true),
        json!(false),
        json!(0),
        json!(-17),
        json!(2.5),
        json!(""),
        json!("text"),
        json!([1, "two"]),
        json!({"k": "v"}),
    ]
}

#[test]
fn every_coercer_is_total() {
    // No input shape may panic; absence is the only failure mode.
    for value in all_shapes() {
        let _ = coerce_i64(&value);
        let _ = coerce_f64(&value);
        let _ = coerce_num(&value);
        let _ = coerce_bool(&value);
        let _ = coerce_string(&value);
        let _ = coerce_datetime(&value);
        let _ = coerce_duration(&value);
        let _ = coerce_uri(&value);
        let _ = coerce_phone(&value);
        let _ = coerce_slug(&value);
        let _ = coerce_currency(&value);
    }
}

#[test]
fn null_is_absent_everywhere() {
    let null = json!(null);
    assert_eq!(coerce_i64(&null), None);
    assert_eq!(coerce_f64(&null), None);
    assert_eq!(coerce_num(&null), None);
    assert_eq!(coerce_bool(&null), None);
    assert_eq!(coerce_string(&null), None);
    assert_eq!(coerce_datetime(&null), None);
    assert_eq!(coerce_duration(&null), None);
    assert_eq!(coerce_uri(&null), None);
    assert_eq!(coerce_phone(&null), None);
    assert_eq!(coerce_slug(&null), None);
    assert_eq!(coerce_currency(&null), None);
}

#[test]
fn empty_string_is_absent_for_value_coercers() {
    let empty = json!("");
    assert_eq!(coerce_i64(&empty), None);
    assert_eq!(coerce_f64(&empty), None);
    assert_eq!(coerce_num(&empty), None);
    assert_eq!(coerce_bool(&empty), None);
    assert_eq!(coerce_datetime(&empty), None);
    assert_eq!(coerce_duration(&empty), None);
    assert_eq!(coerce_uri(&empty), None);
    assert_eq!(coerce_phone(&empty), None);
    assert_eq!(coerce_slug(&empty), None);
    assert_eq!(coerce_currency(&empty), None);
}

#[test]
fn numeric_coercers_are_idempotent_on_typed_input() {
    assert_eq!(coerce_i64(&json!(5)), Some(5));
    assert_eq!(coerce_f64(&json!(5.5)), Some(5.5));
    assert_eq!(coerce_num(&json!(5)), Some(Num::Int(5)));
}

#[test]
fn string_int_round_trip() {
    for n in [0i64, 1, -1, 42, i64::MAX, i64::MIN] {
        let text = coerce_string(&json!(n)).unwrap();
        assert_eq!(coerce_i64(&json!(text)), Some(n), "round trip for {n}");
    }
}

#[test]
fn epoch_heuristic_boundary() {
    // One below the threshold: seconds, multiplied out to millis.
    let seconds_side = coerce_datetime(&json!(9_999_999_999i64)).unwrap();
    assert_eq!(seconds_side.timestamp_millis(), 9_999_999_999_000);

    // At the threshold: already millis, which lands in 1970.
    let millis_side = coerce_datetime(&json!(10_000_000_000i64)).unwrap();
    assert_eq!(millis_side.timestamp_millis(), 10_000_000_000);
    assert_eq!(millis_side.year(), 1970);
}

#[test]
fn datetime_string_forms_agree() {
    let iso = coerce_datetime(&json!("2022-01-01T00:00:00Z")).unwrap();
    let epoch_string = coerce_datetime(&json!("1640995200")).unwrap();
    let epoch_number = coerce_datetime(&json!(1_640_995_200i64)).unwrap();
    assert_eq!(iso, epoch_string);
    assert_eq!(iso, epoch_number);
}

#[test]
fn list_coercion_properties() {
    // Drops the unparseable middle element.
    assert_eq!(coerce_list(&json!([1, "a", 3]), coerce_i64), Some(vec![1, 3]));
    // Single-item promotion.
    assert_eq!(
        coerce_list(&json!("x"), coerce_string),
        Some(vec!["x".to_owned()])
    );
    // Null distinguishes the two variants.
    assert_eq!(coerce_list(&json!(null), coerce_i64), None);
    assert_eq!(coerce_list_required(&json!(null), coerce_i64), Vec::<i64>::new());
}

#[test]
fn map_coercion_drops_failed_entries() {
    let parsed = coerce_map(&json!({"a": "1", "b": "x", "c": "3"}), |k, v| {
        coerce_i64(v).map(|n| (k.to_owned(), n))
    })
    .unwrap();
    assert_eq!(parsed.len(), 2);
    assert_eq!(parsed["a"], 1);
    assert_eq!(parsed["c"], 3);
}

#[test]
fn phone_normalization() {
    assert_eq!(coerce_phone(&json!("(555) 123-4567")), Some("5551234567".into()));
    assert_eq!(coerce_phone(&json!("+1 555 123 4567")), Some("+15551234567".into()));
}

#[test]
fn slug_normalization() {
    assert_eq!(coerce_slug(&json!("Hello World! 123")), Some("hello-world-123".into()));
}

#[test]
fn currency_parsing() {
    assert_eq!(
        coerce_currency(&json!("$1,234.56")),
        Some(CurrencyValue::with_code(1234.56, "USD"))
    );
    assert_eq!(
        coerce_currency(&json!({"amount": 50.0, "currency": "GBP"})),
        Some(CurrencyValue::with_code(50.0, "GBP"))
    );
}

#[test]
fn duration_forms_agree() {
    let ninety = Duration::minutes(90);
    assert_eq!(coerce_duration(&json!("PT1H30M")), Some(ninety));
    assert_eq!(coerce_duration(&json!("1h 30m")), Some(ninety));
    assert_eq!(coerce_duration(&json!({"hours": 1, "minutes": 30})), Some(ninety));
    assert_eq!(coerce_duration(&json!(5000)), Some(Duration::milliseconds(5000)));
}

#[test]
fn uri_permissiveness_is_load_bearing() {
    // Deliberate, documented behavior: malformed URIs are percent-encoded
    // best-effort, never rejected. Changing this silently would break
    // consumers relying on lenient acceptance.
    assert_eq!(
        coerce_uri(&json!("not a uri")),
        Some("not%20a%20uri".to_owned())
    );
    assert_eq!(
        coerce_uri(&json!("https://example.com/x")),
        Some("https://example.com/x".to_owned())
    );
}
