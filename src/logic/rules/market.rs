use super::{ScoringContext, ScoringRule, PROFITABILITY_THRESHOLD};
use crate::models::{CandidateDefinition, ScoreFactor, TrendKind};

/// Rising mandi prices: +15. No signal for the candidate means no adjustment.
pub struct MarketTrendRule;

impl ScoringRule for MarketTrendRule {
    fn id(&self) -> &'static str {
        "market_trend"
    }

    fn name(&self) -> &'static str {
        "Market Trend"
    }

    fn evaluate(
        &self,
        ctx: &ScoringContext<'_>,
        candidate: &CandidateDefinition,
    ) -> Option<ScoreFactor> {
        let signal = ctx.market.get(&candidate.id)?;
        if signal.trend_kind != TrendKind::Up {
            return None;
        }
        Some(ScoreFactor::new(self.id(), 15.0, "Market trending up"))
    }
}

/// Healthy margin over the support price: +10.
pub struct ProfitabilityRule;

impl ScoringRule for ProfitabilityRule {
    fn id(&self) -> &'static str {
        "profitability"
    }

    fn name(&self) -> &'static str {
        "Profitability"
    }

    fn evaluate(
        &self,
        ctx: &ScoringContext<'_>,
        candidate: &CandidateDefinition,
    ) -> Option<ScoreFactor> {
        let signal = ctx.market.get(&candidate.id)?;
        if signal.margin_value <= PROFITABILITY_THRESHOLD {
            return None;
        }
        Some(ScoreFactor::new(
            self.id(),
            10.0,
            format!("High profitability (₹{:.0}/q margin)", signal.margin_value),
        ))
    }
}
