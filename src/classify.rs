//! Kind derivation for failed model and tool calls.
//!
//! A failure arrives either as a structured provider error envelope (a known,
//! authoritative category computed upstream) or as free text. The structured
//! category always wins; the ordered heuristic table below runs only when no
//! authoritative signal exists. Letting keyword matches override a structured
//! category is the regression this module exists to prevent.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::kind::ErrorKind;

/// Provider error envelope as it appears on the wire, e.g.
/// `{"type":"error","error":{"type":"billing_error","message":"402 payment required"}}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderErrorEnvelope {
    #[serde(rename = "type")]
    pub event: String,
    pub error: ProviderErrorBody,
}

/// Inner error body of a provider envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderErrorBody {
    #[serde(rename = "type")]
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Classify a raw failure message into exactly one [`ErrorKind`].
///
/// If the message parses as a provider error envelope whose code maps to a
/// known kind, that kind is returned without inspecting any text. Otherwise
/// the heuristic table scans the message (or the envelope's nested message,
/// when an envelope is present with an unrecognized code).
///
/// Pure and total: malformed or empty input degrades to
/// [`ErrorKind::Unknown`], never an error.
pub fn derive_error_kind(message: &str) -> ErrorKind {
    derive_error_kind_from_parts(parse_provider_error(message).as_ref(), message)
}

/// Classify from an already-parsed payload and the raw message.
///
/// The structured path and the heuristic path never mix: when `payload`
/// carries a known code, the text contributes nothing to the outcome.
pub fn derive_error_kind_from_parts(
    payload: Option<&ProviderErrorEnvelope>,
    message: &str,
) -> ErrorKind {
    let kind = match payload {
        Some(envelope) => match kind_from_provider_code(&envelope.error.code) {
            Some(kind) => kind,
            None => scan_text(envelope.error.message.as_deref().unwrap_or(message)),
        },
        None => scan_text(message),
    };
    tracing::debug!(%kind, "classified failure");
    kind
}

fn parse_provider_error(message: &str) -> Option<ProviderErrorEnvelope> {
    let envelope: ProviderErrorEnvelope = serde_json::from_str(message.trim()).ok()?;
    if envelope.event != "error" {
        return None;
    }
    Some(envelope)
}

/// Map a machine-readable provider error code to a kind.
///
/// Covers the Anthropic-style error vocabulary; unknown codes return `None`
/// so classification falls back to the nested message.
fn kind_from_provider_code(code: &str) -> Option<ErrorKind> {
    match code {
        "billing_error" => Some(ErrorKind::Billing),
        "rate_limit_error" => Some(ErrorKind::RateLimit),
        "overloaded_error" => Some(ErrorKind::Overloaded),
        "authentication_error" | "permission_error" => Some(ErrorKind::Auth),
        "timeout_error" | "request_timeout" => Some(ErrorKind::Timeout),
        "context_length_exceeded" => Some(ErrorKind::ContextOverflow),
        "invalid_image" | "image_too_large" => Some(ErrorKind::ImageSize),
        _ => None,
    }
}

// Ordered heuristic table. Message text can contain overlapping vocabulary
// ("payment" next to "timeout"), so the first match wins and the order below
// is a contract: timeout > rate limit > billing > auth > context overflow >
// overloaded > format.
const RULES: &[(&str, ErrorKind)] = &[
    (r"(?i)timed\s*out|timeout|deadline exceeded", ErrorKind::Timeout),
    (
        r"(?i)\b429\b|rate limit|too many requests",
        ErrorKind::RateLimit,
    ),
    (
        r"(?i)\b402\b|payment required|billing|insufficient credit|credit balance",
        ErrorKind::Billing,
    ),
    (
        r"(?i)\b40[13]\b|unauthorized|forbidden|invalid (?:api )?key|authentication failed",
        ErrorKind::Auth,
    ),
    (
        r"(?i)context (?:length|overflow|window)|maximum context|token limit|prompt is too long",
        ErrorKind::ContextOverflow,
    ),
    (
        r"(?i)\b(?:503|529)\b|overloaded|over capacity|at capacity",
        ErrorKind::Overloaded,
    ),
    (
        r"(?i)malformed|schema validation|invalid response format|unexpected response format",
        ErrorKind::Format,
    ),
];

fn rules() -> &'static [(Regex, ErrorKind)] {
    static COMPILED: OnceLock<Vec<(Regex, ErrorKind)>> = OnceLock::new();
    COMPILED.get_or_init(|| {
        RULES
            .iter()
            .map(|(pattern, kind)| {
                let regex = Regex::new(pattern).expect("heuristic pattern must compile");
                (regex, *kind)
            })
            .collect()
    })
}

/// Scan free text against the heuristic table, top to bottom.
pub(crate) fn scan_text(text: &str) -> ErrorKind {
    for (regex, kind) in rules() {
        if regex.is_match(text) {
            return *kind;
        }
    }
    ErrorKind::Unknown
}
