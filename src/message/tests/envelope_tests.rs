//! Unit tests for the envelope accessor layer.

use crate::message::{
    domain::{Field, FieldForm, LongMessage, Message, ShortMessage},
    error::EnvelopeError,
};
use crate::route::RouteError;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

#[fixture]
fn long_message() -> Message {
    let mut message = Message::empty(FieldForm::Long);
    message.set_to("service:/");
    message.set_origin("client:/");
    message.set_body(json!({"key": "value"}));
    message
}

#[fixture]
fn short_message() -> Message {
    let mut message = Message::empty(FieldForm::Short);
    message.set_to("service:/");
    message.set_origin("client:/");
    message.set_body(json!({"key": "value"}));
    message
}

// ============================================================================
// Field-name transparency
// ============================================================================

#[rstest]
fn long_form_origin_is_readable_by_short_name(long_message: Message) {
    assert_eq!(long_message.get("frm"), Some(json!("client:/")));
    assert_eq!(long_message.get("from"), Some(json!("client:/")));
    assert_eq!(long_message.get("bdy"), Some(json!({"key": "value"})));
}

#[rstest]
fn short_form_origin_is_readable_by_long_name(short_message: Message) {
    assert_eq!(short_message.get("from"), Some(json!("client:/")));
    assert_eq!(short_message.get("body"), Some(json!({"key": "value"})));
    assert_eq!(short_message.origin(), Some("client:/"));
}

#[rstest]
fn writes_by_other_form_name_land_in_stored_slot(mut short_message: Message) {
    short_message
        .set("from", json!("other:/"))
        .expect("string value should be accepted");

    match &short_message {
        Message::Short(record) => assert_eq!(record.frm.as_deref(), Some("other:/")),
        Message::Long(_) => panic!("form must not change"),
    }
    assert!(!short_message.to_object().contains_key("from"));
}

#[rstest]
fn long_form_write_by_short_name_uses_long_key(mut long_message: Message) {
    long_message
        .set("ts", json!("2026-10-19T00:00:00.000Z"))
        .expect("string value should be accepted");

    let object = long_message.to_object();
    assert_eq!(object.get("timestamp"), Some(&json!("2026-10-19T00:00:00.000Z")));
    assert!(!object.contains_key("ts"));
}

#[rstest]
fn unshared_names_pass_through(mut long_message: Message) {
    long_message
        .set("mid", json!("abc"))
        .expect("string value should be accepted");
    long_message
        .set("trace", json!({"span": 1}))
        .expect("extra keys accept any value");

    assert_eq!(long_message.mid(), Some("abc"));
    assert_eq!(long_message.get("trace"), Some(json!({"span": 1})));
    assert_eq!(long_message.extra().len(), 1);
}

#[rstest]
fn string_fields_reject_non_string_values(mut long_message: Message) {
    let error = long_message
        .set("frm", json!(42))
        .expect_err("numbers cannot be routing strings");

    assert_eq!(error, EnvelopeError::ExpectedString { field: Field::From });
    assert_eq!(long_message.origin(), Some("client:/"));
}

#[rstest]
fn null_clears_semantic_fields(mut short_message: Message) {
    short_message
        .set("body", Value::Null)
        .expect("null should be accepted");
    short_message
        .set("from", Value::Null)
        .expect("null should be accepted");

    assert_eq!(short_message.body(), None);
    assert_eq!(short_message.origin(), None);
}

#[rstest]
fn remove_returns_previous_value(mut long_message: Message) {
    assert_eq!(long_message.remove("frm"), Some(json!("client:/")));
    assert_eq!(long_message.remove("frm"), None);
    assert_eq!(long_message.remove("bdy"), Some(json!({"key": "value"})));
    assert_eq!(long_message.body(), None);
}

#[rstest]
fn optional_fields_round_trip_through_setters() {
    let mut message = Message::empty(FieldForm::Short);
    message.set_rmid("parent");
    message.set_via("gateway:/");
    message.set_forward("node-7");

    assert_eq!(message.rmid(), Some("parent"));
    assert_eq!(message.via(), Some("gateway:/"));
    assert_eq!(message.forward(), Some("node-7"));
    assert_eq!(message.to_object().get("for"), Some(&json!("node-7")));
}

// ============================================================================
// Body and route helpers
// ============================================================================

#[rstest]
fn message_body_copies_payload(long_message: Message) {
    assert_eq!(long_message.message_body(), json!({"key": "value"}));
}

#[rstest]
#[case(None)]
#[case(Some(json!(0)))]
#[case(Some(json!("")))]
fn message_body_defaults_to_empty_object(#[case] body: Option<Value>) {
    let mut message = Message::empty(FieldForm::Long);
    if let Some(value) = body {
        message.set_body(value);
    }

    assert_eq!(message.message_body(), json!({}));
}

#[rstest]
fn parse_to_reads_destination() {
    let mut message = Message::empty(FieldForm::Short);
    message.set_to("node1@orders:[PUT]/v2/orders");

    let route = message.parse_to();
    assert!(route.is_ok());
    assert_eq!(route.instance, "node1");
    assert_eq!(route.service_name, "orders");
    assert_eq!(route.http_method.as_deref(), Some("put"));
    assert_eq!(route.api_route, "/v2/orders");
}

#[rstest]
fn parse_to_surfaces_route_errors() {
    let mut message = Message::empty(FieldForm::Long);
    message.set_to("orders:[PUT/v2");

    assert_eq!(
        message.parse_to().error,
        Some(RouteError::IllFormedHttpMethod)
    );
}

#[rstest]
fn parse_to_without_destination_is_empty_route() {
    let route = Message::default().parse_to();
    assert!(route.is_ok());
    assert_eq!(route.service_name, "");
    assert_eq!(route.api_route, "");
}

// ============================================================================
// Decoding
// ============================================================================

#[rstest]
fn from_json_detects_short_form() {
    let message = Message::from_json(
        r#"{"mid":"m1","ts":"2026-10-19T00:00:00.000Z","ver":"UMF/1.4.3","to":"svc:/","frm":"cli:/","bdy":{}}"#,
    )
    .expect("valid short-form envelope");

    assert_eq!(message.form(), FieldForm::Short);
    assert_eq!(message.origin(), Some("cli:/"));
    assert_eq!(message.timestamp(), Some("2026-10-19T00:00:00.000Z"));
}

#[rstest]
fn from_json_defaults_to_long_form() {
    let message = Message::from_json(r#"{"to":"svc:/","from":"cli:/","body":[1],"x":true}"#)
        .expect("valid long-form envelope");

    assert_eq!(message.form(), FieldForm::Long);
    assert_eq!(message.body(), Some(&json!([1])));
    assert_eq!(message.extra().get("x"), Some(&json!(true)));
}

#[rstest]
#[case("[1, 2]", EnvelopeError::NotAnObject)]
#[case(r#"{"to": 5}"#, EnvelopeError::ExpectedString { field: Field::To })]
#[case(r#"{"mid": "m1", "rmid": 7}"#, EnvelopeError::ExpectedString { field: Field::Rmid })]
#[case(r#"{"from": "a:/", "frm": "b:/"}"#, EnvelopeError::DuplicateField { field: Field::From })]
#[case(r#"{"body": 1, "bdy": 2}"#, EnvelopeError::DuplicateField { field: Field::Body })]
#[case(r#"{"timestamp": "t1", "ts": null}"#, EnvelopeError::DuplicateField { field: Field::Timestamp })]
fn from_json_rejects_bad_documents(#[case] json: &str, #[case] expected: EnvelopeError) {
    assert_eq!(Message::from_json(json), Err(expected));
}

#[rstest]
fn from_json_reports_syntax_errors() {
    let error = Message::from_json("{").expect_err("truncated JSON");
    assert!(matches!(error, EnvelopeError::Json(_)));
}

#[rstest]
fn serde_round_trip_preserves_form(short_message: Message) {
    let json = serde_json::to_string(&short_message).expect("serializable");
    let decoded: Message = serde_json::from_str(&json).expect("deserializable");

    assert_eq!(decoded, short_message);
}

#[rstest]
fn wire_records_convert_into_message() {
    let long: Message = LongMessage {
        to: Some("svc:/".to_owned()),
        ..LongMessage::default()
    }
    .into();
    let short: Message = ShortMessage::default().into();

    assert_eq!(long.form(), FieldForm::Long);
    assert_eq!(long.to(), Some("svc:/"));
    assert_eq!(short.form(), FieldForm::Short);
}

#[rstest]
fn long_record_rejects_both_origin_names() {
    let decoded = serde_json::from_str::<LongMessage>(r#"{"from":"a:/","frm":"b:/"}"#);

    let error = decoded.expect_err("origin named twice");
    assert!(error.to_string().contains("appears under both its long and short name"));
}

#[rstest]
fn long_record_stores_short_keys_in_long_slots() {
    let record: LongMessage =
        serde_json::from_str(r#"{"frm":"b:/","bdy":{"n":1},"x":true}"#).expect("decodable");

    assert_eq!(record.from.as_deref(), Some("b:/"));
    assert_eq!(record.body, Some(json!({"n": 1})));
    assert_eq!(record.extra.len(), 1);
    assert_eq!(record.extra.get("x"), Some(&json!(true)));

    let message = Message::from(record);
    let object = message.to_object();
    assert_eq!(object.get("from"), Some(&json!("b:/")));
    assert!(!object.contains_key("frm"));
    assert_eq!(message.get("frm"), Some(json!("b:/")));
}

#[rstest]
fn short_record_stores_long_keys_in_short_slots() {
    let record: ShortMessage =
        serde_json::from_str(r#"{"from":"a:/","timestamp":"t1"}"#).expect("decodable");

    assert_eq!(record.frm.as_deref(), Some("a:/"));
    assert_eq!(record.ts.as_deref(), Some("t1"));
    assert!(record.extra.is_empty());
}

#[rstest]
fn short_record_rejects_non_string_fields() {
    let decoded = serde_json::from_str::<ShortMessage>(r#"{"via": 5}"#);

    assert!(decoded.is_err());
}

#[rstest]
fn hand_built_record_extras_move_into_semantic_slots() {
    let mut extra = serde_json::Map::new();
    extra.insert("frm".to_owned(), json!("b:/"));
    extra.insert("to".to_owned(), json!("ignored:/"));
    extra.insert("trace".to_owned(), json!("t-1"));
    let record = LongMessage {
        to: Some("svc:/".to_owned()),
        extra,
        ..LongMessage::default()
    };

    let message = Message::from(record);

    assert_eq!(message.origin(), Some("b:/"));
    assert_eq!(message.to(), Some("svc:/"));
    assert_eq!(message.extra().len(), 1);
    assert_eq!(message.to_object().get("from"), Some(&json!("b:/")));
    assert!(!message.to_object().contains_key("frm"));
}

#[rstest]
fn merge_rejects_both_names_without_touching_envelope(mut long_message: Message) {
    let before = long_message.clone();
    let overrides = json!({"from": "a:/", "frm": "b:/"});
    let Value::Object(object) = overrides else {
        panic!("object literal");
    };

    assert_eq!(
        long_message.merge(object),
        Err(EnvelopeError::DuplicateField { field: Field::From })
    );
    assert_eq!(long_message, before);
}
