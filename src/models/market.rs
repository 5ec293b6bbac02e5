use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Modal price this far above the reference counts as a rising market.
pub const TREND_UP_RATIO: f64 = 1.05;
pub const TREND_DOWN_RATIO: f64 = 0.95;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendKind {
    Up,
    Down,
    Stable,
}

impl TrendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrendKind::Up => "↑ Up",
            TrendKind::Down => "↓ Down",
            TrendKind::Stable => "→ Stable",
        }
    }

    /// Compare an observed mandi price against the reference price.
    pub fn from_prices(observed: f64, reference: f64) -> Self {
        if reference <= 0.0 {
            return TrendKind::Stable;
        }
        let ratio = observed / reference;
        if ratio >= TREND_UP_RATIO {
            TrendKind::Up
        } else if ratio <= TREND_DOWN_RATIO {
            TrendKind::Down
        } else {
            TrendKind::Stable
        }
    }
}

impl std::fmt::Display for TrendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSignal {
    pub candidate_id: String,
    pub trend_kind: TrendKind,
    /// Observed price minus the support/reference price, ₹ per quintal.
    pub margin_value: f64,
}

impl MarketSignal {
    pub fn new(candidate_id: impl Into<String>, trend_kind: TrendKind, margin_value: f64) -> Self {
        Self {
            candidate_id: candidate_id.into(),
            trend_kind,
            margin_value,
        }
    }
}

/// Signals keyed by candidate id. Missing entries are normal.
pub type MarketSignals = HashMap<String, MarketSignal>;
