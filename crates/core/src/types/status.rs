//! Order status state machine.

use serde::{Deserialize, Serialize};

/// Order fulfillment status.
///
/// Statuses advance strictly forward, one step at a time:
/// `New -> InProcess -> Ready -> Delivered`. There is no skipping and no
/// reverse transition. `Delivered` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    New,
    InProcess,
    Ready,
    Delivered,
}

impl OrderStatus {
    /// The next status in the lifecycle, or `None` from [`Self::Delivered`].
    ///
    /// Asking for the successor of a terminal status is a defined no-op,
    /// not an error.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::New => Some(Self::InProcess),
            Self::InProcess => Some(Self::Ready),
            Self::Ready => Some(Self::Delivered),
            Self::Delivered => None,
        }
    }

    /// Whether no further transition exists.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Delivered)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::New => write!(f, "new"),
            Self::InProcess => write!(f, "in_process"),
            Self::Ready => write!(f, "ready"),
            Self::Delivered => write!(f, "delivered"),
        }
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(Self::New),
            "in_process" => Ok(Self::InProcess),
            "ready" => Ok(Self::Ready),
            "delivered" => Ok(Self::Delivered),
            _ => Err(format!("invalid order status: {s}")),
        }
    }
}
