//! Run payload building.
//!
//! Reads a finished assistant turn and emits the display payloads the UI
//! layer renders. Classification and sanitization happen here, once per
//! failure event; the turn itself is read-only input owned by the runner.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::classify::derive_error_kind;
use crate::kind::ErrorKind;
use crate::sanitize::{sanitize_user_facing_text, SanitizeOptions};

/// Why the assistant turn ended.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum StopReason {
    Stop,
    Length,
    ToolCalls,
    ContentFilter,
    Error,
}

/// A finished assistant turn as reported by the runner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantTurn {
    pub provider: String,
    pub model: String,
    pub stop_reason: StopReason,
    /// Raw error message or provider error envelope, when the turn failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    /// Text blocks produced before the turn ended.
    #[serde(default)]
    pub texts: Vec<String>,
}

impl AssistantTurn {
    /// Whether the turn reached an errored terminal state.
    pub fn errored(&self) -> bool {
        self.stop_reason == StopReason::Error || self.error_message.is_some()
    }
}

/// A single display payload handed to the UI layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunPayload {
    pub text: String,
    pub is_error: bool,
    /// Present only on error payloads; absent when the turn succeeded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ErrorKind>,
}

/// Build the display payloads for a finished turn.
///
/// Assistant text becomes an ordinary payload. An errored terminal state
/// appends exactly one error payload carrying the derived [`ErrorKind`] and
/// the sanitized message. A turn that did not error never has a kind
/// attached.
pub fn build_run_payloads(turn: &AssistantTurn) -> Vec<RunPayload> {
    let mut payloads = Vec::new();

    let text = turn
        .texts
        .iter()
        .filter(|t| !t.is_empty())
        .cloned()
        .collect::<Vec<_>>()
        .join("\n\n");
    if !text.is_empty() {
        payloads.push(RunPayload {
            text,
            is_error: false,
            error_kind: None,
        });
    }

    if turn.errored() {
        let raw = turn.error_message.as_deref().unwrap_or_default();
        let kind = derive_error_kind(raw);
        tracing::debug!(
            provider = %turn.provider,
            model = %turn.model,
            %kind,
            "assistant turn failed"
        );
        payloads.push(RunPayload {
            text: sanitize_user_facing_text(raw, &SanitizeOptions::error(Some(kind))),
            is_error: true,
            error_kind: Some(kind),
        });
    }

    payloads
}
