//! Tri-state stock verdicts and the justification that accompanies them.

use serde::{Deserialize, Serialize};

/// Whether the requested size variant appears purchasable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    InStock,
    OutOfStock,
    Unknown,
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::InStock => write!(f, "in stock"),
            Verdict::OutOfStock => write!(f, "out of stock"),
            Verdict::Unknown => write!(f, "unknown"),
        }
    }
}

/// Outcome of one availability check: the verdict plus the signal (or the
/// reason, for [`Verdict::Unknown`]) that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockCheck {
    pub verdict: Verdict,
    pub detail: String,
}

impl StockCheck {
    #[must_use]
    pub fn in_stock(detail: impl Into<String>) -> Self {
        Self {
            verdict: Verdict::InStock,
            detail: detail.into(),
        }
    }

    #[must_use]
    pub fn out_of_stock(detail: impl Into<String>) -> Self {
        Self {
            verdict: Verdict::OutOfStock,
            detail: detail.into(),
        }
    }

    #[must_use]
    pub fn unknown(reason: impl Into<String>) -> Self {
        Self {
            verdict: Verdict::Unknown,
            detail: reason.into(),
        }
    }

    /// Builds a decided check from a boolean stock signal.
    #[must_use]
    pub fn from_signal(in_stock: bool, detail: impl Into<String>) -> Self {
        if in_stock {
            Self::in_stock(detail)
        } else {
            Self::out_of_stock(detail)
        }
    }

    #[must_use]
    pub fn is_decided(&self) -> bool {
        self.verdict != Verdict::Unknown
    }
}
