//! Tests for error kind derivation.

use pretty_assertions::assert_eq;
use sift::{
    derive_error_kind, derive_error_kind_from_parts, ErrorKind, ProviderErrorBody,
    ProviderErrorEnvelope,
};

#[test]
fn structured_billing_error_always_wins() {
    let message =
        r#"{"type":"error","error":{"type":"billing_error","message":"402 payment required"}}"#;
    assert_eq!(derive_error_kind(message), ErrorKind::Billing);
}

#[test]
fn structured_code_cannot_be_bypassed_by_adversarial_text() {
    // The nested message is stuffed with vocabulary for every other kind; the
    // structured code must still decide.
    let message = r#"{"type":"error","error":{"type":"timeout_error","message":"402 payment required billing 429 rate limit unauthorized context length overloaded"}}"#;
    assert_eq!(derive_error_kind(message), ErrorKind::Timeout);
}

#[test]
fn pre_parsed_payload_dominates_the_raw_text() {
    let envelope = ProviderErrorEnvelope {
        event: "error".to_string(),
        error: ProviderErrorBody {
            code: "overloaded_error".to_string(),
            message: None,
        },
    };
    let kind = derive_error_kind_from_parts(Some(&envelope), "Error: 402 payment required");
    assert_eq!(kind, ErrorKind::Overloaded);
}

#[test]
fn rate_limit_from_plain_text() {
    assert_eq!(derive_error_kind("429 Too Many Requests"), ErrorKind::RateLimit);
    assert_eq!(
        derive_error_kind("rate limit exceeded, slow down"),
        ErrorKind::RateLimit
    );
}

#[test]
fn timeout_from_plain_text() {
    assert_eq!(derive_error_kind("Request timed out"), ErrorKind::Timeout);
    assert_eq!(derive_error_kind("deadline exceeded"), ErrorKind::Timeout);
}

#[test]
fn billing_from_plain_text() {
    assert_eq!(
        derive_error_kind("Error: 402 payment required"),
        ErrorKind::Billing
    );
}

#[test]
fn auth_from_plain_text() {
    assert_eq!(derive_error_kind("401 Unauthorized"), ErrorKind::Auth);
    assert_eq!(derive_error_kind("invalid api key provided"), ErrorKind::Auth);
}

#[test]
fn context_overflow_from_plain_text() {
    assert_eq!(
        derive_error_kind("context length exceeded"),
        ErrorKind::ContextOverflow
    );
    assert_eq!(
        derive_error_kind("prompt is too long for this model"),
        ErrorKind::ContextOverflow
    );
}

#[test]
fn overloaded_from_plain_text() {
    assert_eq!(derive_error_kind("529 upstream overloaded"), ErrorKind::Overloaded);
}

#[test]
fn format_from_plain_text() {
    assert_eq!(
        derive_error_kind("malformed response from provider"),
        ErrorKind::Format
    );
}

#[test]
fn unmatched_text_degrades_to_unknown() {
    assert_eq!(derive_error_kind("the tool exploded"), ErrorKind::Unknown);
}

#[test]
fn derivation_is_deterministic() {
    let samples = [
        "429 Too Many Requests",
        "Request timed out",
        "Error: 402 payment required",
        r#"{"type":"error","error":{"type":"billing_error","message":"x"}}"#,
        "",
    ];
    for message in samples {
        assert_eq!(derive_error_kind(message), derive_error_kind(message));
    }
}
