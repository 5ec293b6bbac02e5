pub mod engine;
pub mod market;
pub mod outlook_risk;
pub mod regional;
pub mod soil_match;
pub mod water_balance;

pub use engine::{CandidateEvaluation, ScoringEngine};

use crate::models::{
    CandidateDefinition, EnvironmentProfile, MarketSignals, ScoreFactor, SeasonalOutlook,
};

/// Every candidate starts here before any rule applies.
pub const BASE_SCORE: f64 = 60.0;

/// Candidates whose final score is at or below this are dropped.
pub const INCLUSION_THRESHOLD: f64 = 50.0;

/// Margin over support price (₹/quintal) that earns the profitability bonus.
pub const PROFITABILITY_THRESHOLD: f64 = 1000.0;

/// Everything a rule may look at besides the candidate itself.
#[derive(Debug, Clone, Copy)]
pub struct ScoringContext<'a> {
    pub profile: &'a EnvironmentProfile,
    pub outlook: Option<&'a SeasonalOutlook>,
    pub market: &'a MarketSignals,
}

impl<'a> ScoringContext<'a> {
    pub fn new(
        profile: &'a EnvironmentProfile,
        outlook: Option<&'a SeasonalOutlook>,
        market: &'a MarketSignals,
    ) -> Self {
        Self {
            profile,
            outlook,
            market,
        }
    }
}

/// Trait for crop suitability rules
pub trait ScoringRule: Send + Sync {
    /// Unique identifier for this rule
    fn id(&self) -> &'static str;

    /// Human-readable name
    fn name(&self) -> &'static str;

    /// Return a score adjustment if the rule applies to this candidate
    fn evaluate(
        &self,
        ctx: &ScoringContext<'_>,
        candidate: &CandidateDefinition,
    ) -> Option<ScoreFactor>;
}
