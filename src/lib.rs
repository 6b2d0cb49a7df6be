//! Sift — failure triage for LLM agent runtimes.
//!
//! When an upstream model or tool call fails, the runtime needs two things:
//! a stable classification of the failure (for retry and failover policy)
//! and a safe message to show the end user (never the raw provider payload).
//! Sift provides both as pure, synchronous functions.
//!
//! # Quick Start
//!
//! ```
//! use sift::{derive_error_kind, sanitize_user_facing_text, ErrorKind, SanitizeOptions};
//!
//! let kind = derive_error_kind("429 Too Many Requests");
//! assert_eq!(kind, ErrorKind::RateLimit);
//!
//! let shown = sanitize_user_facing_text(
//!     "HTTP 429 from upstream: {\"retry_after\": 12}",
//!     &SanitizeOptions::error(Some(kind)),
//! );
//! assert!(shown.contains("rate limit"));
//! ```
//!
//! A structured provider error always beats keyword matching: if the raw
//! message carries a machine-readable error type, that type decides the
//! [`ErrorKind`] and the text is never scanned for vocabulary. Heuristics run
//! only when no authoritative signal exists.

pub mod classify;
pub mod kind;
pub mod payload;
pub mod sanitize;

pub use classify::{
    derive_error_kind, derive_error_kind_from_parts, ProviderErrorBody, ProviderErrorEnvelope,
};
pub use kind::{ErrorKind, FailoverReason};
pub use payload::{build_run_payloads, AssistantTurn, RunPayload, StopReason};
pub use sanitize::{sanitize_user_facing_text, SanitizeOptions};
