//! User-facing text sanitization.
//!
//! Raw provider error payloads are never shown to the end user. When text is
//! flagged as error context, the sanitizer replaces it wholesale with a
//! canonical message chosen from the classified [`ErrorKind`]; the raw text is
//! only consulted when no kind was supplied, and even then it is formatted,
//! not forwarded.

use std::sync::OnceLock;

use regex::Regex;

use crate::classify;
use crate::kind::ErrorKind;

/// Options controlling sanitization.
///
/// `error_kind` is only consulted when `error_context` is true. With
/// `error_context` false the input passes through untouched regardless of
/// kind.
#[derive(Debug, Clone, Copy, Default)]
pub struct SanitizeOptions {
    pub error_context: bool,
    pub error_kind: Option<ErrorKind>,
}

impl SanitizeOptions {
    /// Ordinary content: pass through untouched.
    pub fn passthrough() -> Self {
        Self::default()
    }

    /// Error context, with the classified kind when one exists.
    pub fn error(error_kind: Option<ErrorKind>) -> Self {
        Self {
            error_context: true,
            error_kind,
        }
    }
}

const MSG_BILLING: &str =
    "The LLM provider reported a billing error. Check your plan and billing details.";
const MSG_RATE_LIMIT: &str = "The LLM provider rate limit was hit. Wait a moment and try again.";
const MSG_OVERLOADED: &str = "The LLM provider is temporarily overloaded. Try again shortly.";
const MSG_TIMEOUT: &str = "LLM request timed out.";
const MSG_CONTEXT_OVERFLOW: &str =
    "Context overflow: the conversation no longer fits in the model context window.";
const MSG_ROLE_ORDERING: &str = "Message ordering conflict detected. Retry the request.";
const MSG_AUTH: &str = "Authentication with the LLM provider failed. Check your API credentials.";
const MSG_FORMAT: &str = "The LLM provider returned a malformed response.";
const MSG_IMAGE_SIZE: &str = "An attached image exceeds the size supported by the model.";
const MSG_GENERIC: &str = "LLM request failed.";

/// Canonical message for a kind. `Unknown` has none and falls through to the
/// heuristic formatting path.
fn canonical_message(kind: ErrorKind) -> Option<&'static str> {
    match kind {
        ErrorKind::Billing => Some(MSG_BILLING),
        ErrorKind::RateLimit => Some(MSG_RATE_LIMIT),
        ErrorKind::Overloaded => Some(MSG_OVERLOADED),
        ErrorKind::Timeout => Some(MSG_TIMEOUT),
        // Compaction failures surface to the user as a context overflow.
        ErrorKind::ContextOverflow | ErrorKind::CompactionFailure => Some(MSG_CONTEXT_OVERFLOW),
        ErrorKind::RoleOrdering => Some(MSG_ROLE_ORDERING),
        ErrorKind::Auth => Some(MSG_AUTH),
        ErrorKind::Format => Some(MSG_FORMAT),
        ErrorKind::ImageSize => Some(MSG_IMAGE_SIZE),
        ErrorKind::Unknown => None,
    }
}

/// Produce the exact string shown to the end user.
///
/// - `error_context` false: the input is returned unchanged.
/// - `error_context` true with a known kind: the kind's canonical message,
///   chosen solely from the kind. The text is never scanned, so adversarial
///   vocabulary in the raw payload cannot reclassify the failure.
/// - `error_context` true without a kind (or with `Unknown`): best-effort
///   formatting from the text itself. An HTTP-status-shaped message becomes a
///   generic status line rather than a kind message; otherwise the heuristic
///   table picks a canonical message; otherwise a generic fallback.
///
/// Never panics. Empty input in error context yields the generic fallback.
pub fn sanitize_user_facing_text(text: &str, options: &SanitizeOptions) -> String {
    if !options.error_context {
        return text.to_string();
    }
    if let Some(message) = options.error_kind.and_then(canonical_message) {
        return message.to_string();
    }
    format_error_fallback(text)
}

fn http_status_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\b([45]\d{2})\b").expect("status pattern must compile"))
}

/// Best-effort formatting when no structured kind exists. A bare status code
/// is reported as-is instead of being escalated to a kind message: without an
/// authoritative signal a tool's 402 must not read as an LLM billing error.
fn format_error_fallback(text: &str) -> String {
    if let Some(captures) = http_status_pattern().captures(text) {
        return format!("LLM request failed with status {}.", &captures[1]);
    }
    match canonical_message(classify::scan_text(text)) {
        Some(message) => message.to_string(),
        None => MSG_GENERIC.to_string(),
    }
}
