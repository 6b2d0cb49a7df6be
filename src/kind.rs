//! Failure classification enums.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Fine-grained classification of a single failure.
///
/// Exactly one kind is assigned per failure. `Unknown` is the fallback when
/// neither a structured provider error nor a text heuristic matches; it is
/// never inferred from partial evidence.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    Billing,
    RateLimit,
    Timeout,
    Auth,
    ContextOverflow,
    Overloaded,
    Format,
    CompactionFailure,
    RoleOrdering,
    ImageSize,
    Unknown,
}

impl ErrorKind {
    /// Whether a failure of this kind is worth retrying against the same
    /// provider. Everything else needs operator action or a model switch.
    pub fn is_retryable(self) -> bool {
        matches!(self, Self::RateLimit | Self::Timeout | Self::Overloaded)
    }
}

/// Coarse classification consumed by failover policy when deciding whether to
/// switch models or providers.
///
/// Adjacent to [`ErrorKind`] but deliberately not isomorphic: kinds like
/// `ContextOverflow`, `RoleOrdering`, and `CompactionFailure` have no failover
/// counterpart and must not be force-mapped. The mapping from status code,
/// kind, and provider identity to a reason lives with the failover policy,
/// not here.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FailoverReason {
    Auth,
    AuthPermanent,
    Format,
    RateLimit,
    Billing,
    Timeout,
    ModelNotFound,
    Unknown,
}
