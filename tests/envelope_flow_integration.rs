//! Behavioural integration tests for envelope creation, conversion and
//! validation.
//!
//! These tests exercise the flow a sending service and a receiving service
//! go through: create, validate, convert across a short-form boundary, then
//! decode and route on the other side.

use std::sync::Arc;

use eyre::{Result, eyre};
use mockable::DefaultClock;
use serde_json::{Value, json};
use umf::{
    message::{
        adapters::UuidIdGenerator,
        domain::{FieldForm, Message},
        error::ValidationError,
        ports::validator::EnvelopeValidator,
        services::MessageFactory,
        validation::{DefaultEnvelopeValidator, validate_message},
    },
    route::parse_route,
};

fn factory() -> MessageFactory<UuidIdGenerator, DefaultClock> {
    MessageFactory::new(Arc::new(UuidIdGenerator), Arc::new(DefaultClock))
}

// ============================================================================
// Scenario: Freshly created envelope is not yet dispatchable
// ============================================================================

/// A factory envelope carries identity fields only, so validation fails
/// until the caller supplies routing fields and a payload.
#[test]
fn bare_envelope_is_rejected() -> Result<()> {
    // Arrange
    let validator = DefaultEnvelopeValidator::new();

    // Act
    let message = factory().create_message(Value::Null, FieldForm::Long)?;

    // Assert
    assert!(!validate_message(&message));
    let error = validator
        .validate(&message)
        .err()
        .ok_or_else(|| eyre!("bare envelope should fail validation"))?;
    assert_eq!(error.errors().map(<[ValidationError]>::len), Some(3));
    Ok(())
}

// ============================================================================
// Scenario: Envelope crosses a short-form boundary intact
// ============================================================================

/// A long-form request serialized in short form and decoded on the far side
/// keeps its populated fields and routes to the requested endpoint.
#[test]
fn envelope_survives_short_form_wire() -> Result<()> {
    // Arrange
    let request = factory().create_message(
        json!({
            "to": "fa1ae8d5-86fc-44af-aad8-cd2740aef041@test-service:[GET]/v1/somedata",
            "from": "client:/",
            "body": {"page": 2},
        }),
        FieldForm::Long,
    )?;
    assert!(validate_message(&request));

    // Act
    let wire = request.to_short().to_json();
    let received = Message::from_json(&wire)?;

    // Assert
    assert_eq!(received.form(), FieldForm::Short);
    assert_eq!(received.to_long(), request);
    assert!(validate_message(&received));

    let route = received.parse_to();
    assert!(route.is_ok());
    assert_eq!(route.instance, "fa1ae8d5-86fc-44af-aad8-cd2740aef041");
    assert_eq!(route.service_name, "test-service");
    assert_eq!(route.http_method.as_deref(), Some("get"));
    assert_eq!(route.api_route, "/v1/somedata");
    Ok(())
}

// ============================================================================
// Scenario: Receiver replies to the sender
// ============================================================================

/// The reply is addressed back to the request's origin and references the
/// request by `rmid`.
#[test]
fn reply_routes_back_to_sender() -> Result<()> {
    // Arrange
    let factory = factory();
    let request = factory.create_message_short(json!({
        "to": "orders:[POST]/v1/orders",
        "from": "node9-3@checkout:/callbacks",
        "body": {"sku": "A-1"},
    }))?;

    // Act
    let reply = factory.create_reply(
        &request,
        json!({"body": {"accepted": true}}),
        FieldForm::Short,
    )?;

    // Assert
    assert!(validate_message(&reply));
    assert_eq!(reply.rmid(), request.mid());

    let route = parse_route(reply.to().unwrap_or_default());
    assert_eq!(route.instance, "node9");
    assert_eq!(route.sub_id, "3");
    assert_eq!(route.service_name, "checkout");
    assert_eq!(route.api_route, "/callbacks");
    Ok(())
}

// ============================================================================
// Scenario: Receiver reads fields regardless of the sender's form
// ============================================================================

/// Code written against long names keeps working when the sender switched
/// to short form.
#[test]
fn receiver_reads_long_names_from_short_envelope() -> Result<()> {
    // Arrange
    let wire = r#"{"mid":"x1","ts":"2026-10-19T08:30:00.000Z","ver":"UMF/1.4.3","to":"svc:/","frm":"cli:/","bdy":{"n":1}}"#;

    // Act
    let received = Message::from_json(wire)?;

    // Assert
    assert_eq!(received.get("from"), Some(json!("cli:/")));
    assert_eq!(received.get("timestamp"), Some(json!("2026-10-19T08:30:00.000Z")));
    assert_eq!(received.message_body(), json!({"n": 1}));
    Ok(())
}
