//! Order lifecycle status and admin bulk actions.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle status of an order.
///
/// Orders are created in `Draft` by the remote authority. Only admin bulk
/// actions move them on, and only to `Approved` or `Denied` - both
/// terminal. The authority enforces the transitions; the engine never
/// second-guesses it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[default]
    Draft,
    Approved,
    Denied,
}

impl OrderStatus {
    /// Whether this order is still awaiting an admin decision.
    #[must_use]
    pub const fn is_draft(self) -> bool {
        matches!(self, Self::Draft)
    }

    /// Whether this status admits no further transitions.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Approved | Self::Denied)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Draft => "DRAFT",
            Self::Approved => "APPROVED",
            Self::Denied => "DENIED",
        };
        f.write_str(s)
    }
}

/// An admin bulk status transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderAction {
    /// `Draft` -> `Approved`.
    Approve,
    /// `Draft` -> `Denied`.
    Deny,
}

impl OrderAction {
    /// The status this action transitions an order into.
    #[must_use]
    pub const fn target(self) -> OrderStatus {
        match self {
            Self::Approve => OrderStatus::Approved,
            Self::Deny => OrderStatus::Denied,
        }
    }

    /// The path segment the remote authority expects in
    /// `PATCH /orders/admin/{id}/{action}`.
    #[must_use]
    pub const fn as_path_segment(self) -> &'static str {
        match self {
            Self::Approve => "APPROVED",
            Self::Deny => "DENIED",
        }
    }
}

impl fmt::Display for OrderAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_path_segment())
    }
}

impl std::str::FromStr for OrderAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "approve" | "approved" => Ok(Self::Approve),
            "deny" | "denied" => Ok(Self::Deny),
            other => Err(format!("invalid order action: {other}")),
        }
    }
}
