//! Order lifecycle status.

use serde::{Deserialize, Serialize};

/// Error returned when a status string is not one of the four wire names.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid order status: {0}")]
pub struct ParseStatusError(pub String);

/// Order status.
///
/// Serialized with its wire name (`RECEIVED`, `IN_PROGRESS`, ...). The
/// Japanese display label is what operators see in the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Order taken, nothing done yet.
    #[default]
    Received,
    /// Being packed or waiting on stock.
    InProgress,
    /// Shipped.
    Completed,
    /// Cancelled before shipping.
    Cancelled,
}

impl OrderStatus {
    /// Every status, in display order.
    pub const ALL: [Self; 4] = [
        Self::Received,
        Self::InProgress,
        Self::Completed,
        Self::Cancelled,
    ];

    /// Wire name used in query strings and forms.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Received => "RECEIVED",
            Self::InProgress => "IN_PROGRESS",
            Self::Completed => "COMPLETED",
            Self::Cancelled => "CANCELLED",
        }
    }

    /// Operator-facing label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Received => "受付",
            Self::InProgress => "対応中",
            Self::Completed => "完了",
            Self::Cancelled => "キャンセル",
        }
    }

    /// CSS badge class for tables.
    #[must_use]
    pub const fn badge_class(self) -> &'static str {
        match self {
            Self::Received => "badge badge-received",
            Self::InProgress => "badge badge-progress",
            Self::Completed => "badge badge-success",
            Self::Cancelled => "badge badge-neutral",
        }
    }

    /// Chart colour for the status breakdown.
    #[must_use]
    pub const fn chart_color(self) -> &'static str {
        match self {
            Self::Received => "#F97316",
            Self::InProgress => "#EAB308",
            Self::Completed => "#22C55E",
            Self::Cancelled => "#9CA3AF",
        }
    }

    /// Whether the order still needs operator action.
    #[must_use]
    pub const fn is_pending(self) -> bool {
        matches!(self, Self::Received | Self::InProgress)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ParseStatusError(s.to_string()))
    }
}
