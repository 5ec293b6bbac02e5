use super::{
    market::{MarketTrendRule, ProfitabilityRule},
    outlook_risk::OutlookRiskRule,
    regional::{DistrictConfidenceRule, RegionalSpecialtyRule},
    soil_match::SoilMatchRule,
    water_balance::WaterBalanceRule,
    ScoringContext, ScoringRule, BASE_SCORE, INCLUSION_THRESHOLD,
};
use crate::models::{
    highest_impact_reasons, CandidateDefinition, Financials, ScoreFactor, ScoredCandidate, Season,
    DISPLAYED_REASONS,
};

/// Raw scoring result for one candidate, before the inclusion check.
#[derive(Debug, Clone)]
pub struct CandidateEvaluation<'a> {
    pub candidate: &'a CandidateDefinition,
    pub score: f64,
    /// Triggered rules in evaluation order.
    pub factors: Vec<ScoreFactor>,
}

impl CandidateEvaluation<'_> {
    pub fn is_vetoed(&self) -> bool {
        self.factors.iter().any(|f| f.veto)
    }

    /// Hard exclusion predicate: any veto, or a final score at or below the
    /// inclusion threshold.
    pub fn is_included(&self) -> bool {
        !self.is_vetoed() && self.score > INCLUSION_THRESHOLD
    }

    pub fn to_scored(&self) -> ScoredCandidate {
        let candidate = self.candidate;
        ScoredCandidate {
            candidate_id: candidate.id.clone(),
            display_name: candidate.display_name.clone(),
            localized_name: candidate.localized_name.clone(),
            category: candidate.category,
            water_requirement: candidate.water_requirement,
            duration_days: candidate.duration_days,
            score: self.score,
            reasons: highest_impact_reasons(&self.factors, DISPLAYED_REASONS),
            factors: self.factors.iter().map(|f| f.reason.clone()).collect(),
            financials: Financials::for_candidate(candidate),
        }
    }
}

/// Folds the ordered rule list over each candidate.
///
/// Scoring is a pure function of the context and candidate; the engine holds
/// no mutable state and can be shared across concurrent requests.
pub struct ScoringEngine {
    rules: Vec<Box<dyn ScoringRule>>,
}

impl ScoringEngine {
    pub fn new() -> Self {
        // Order matters: the outlook rule must follow the water balance.
        let rules: Vec<Box<dyn ScoringRule>> = vec![
            Box::new(SoilMatchRule),
            Box::new(WaterBalanceRule),
            Box::new(MarketTrendRule),
            Box::new(ProfitabilityRule),
            Box::new(OutlookRiskRule),
            Box::new(RegionalSpecialtyRule),
            Box::new(DistrictConfidenceRule),
        ];

        Self { rules }
    }

    pub fn evaluate<'a>(
        &self,
        ctx: &ScoringContext<'_>,
        candidate: &'a CandidateDefinition,
    ) -> CandidateEvaluation<'a> {
        let factors: Vec<ScoreFactor> = self
            .rules
            .iter()
            .filter_map(|rule| rule.evaluate(ctx, candidate))
            .collect();
        let score = BASE_SCORE + factors.iter().map(|f| f.delta).sum::<f64>();

        CandidateEvaluation {
            candidate,
            score,
            factors,
        }
    }

    /// Evaluate every in-season candidate, excluded ones included.
    pub fn evaluate_season<'a>(
        &self,
        ctx: &ScoringContext<'_>,
        season: Season,
        candidates: &'a [CandidateDefinition],
    ) -> Vec<CandidateEvaluation<'a>> {
        candidates
            .iter()
            .filter(|c| c.is_in_season(season))
            .map(|c| self.evaluate(ctx, c))
            .collect()
    }

    /// Surviving candidates, best first. Ties are broken by ascending
    /// candidate id.
    pub fn rank(
        &self,
        ctx: &ScoringContext<'_>,
        season: Season,
        candidates: &[CandidateDefinition],
    ) -> Vec<ScoredCandidate> {
        let mut survivors: Vec<CandidateEvaluation<'_>> = self
            .evaluate_season(ctx, season, candidates)
            .into_iter()
            .filter(|eval| {
                let included = eval.is_included();
                if !included {
                    tracing::debug!(
                        candidate = %eval.candidate.id,
                        score = eval.score,
                        vetoed = eval.is_vetoed(),
                        "Candidate excluded"
                    );
                }
                included
            })
            .collect();

        survivors.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| a.candidate.id.cmp(&b.candidate.id))
        });

        survivors.iter().map(CandidateEvaluation::to_scored).collect()
    }

    pub fn list_rules(&self) -> Vec<(&'static str, &'static str)> {
        self.rules.iter().map(|r| (r.id(), r.name())).collect()
    }
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self::new()
    }
}
