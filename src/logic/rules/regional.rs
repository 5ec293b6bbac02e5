use super::{ScoringContext, ScoringRule};
use crate::models::{CandidateDefinition, Granularity, ScoreFactor};

/// Curated regional favorites: +30. A bonus only, never a requirement.
pub struct RegionalSpecialtyRule;

impl ScoringRule for RegionalSpecialtyRule {
    fn id(&self) -> &'static str {
        "regional_specialty"
    }

    fn name(&self) -> &'static str {
        "Regional Specialty"
    }

    fn evaluate(
        &self,
        ctx: &ScoringContext<'_>,
        candidate: &CandidateDefinition,
    ) -> Option<ScoreFactor> {
        if !candidate.is_regional_specialty(&ctx.profile.region_id) {
            return None;
        }
        Some(ScoreFactor::new(
            self.id(),
            30.0,
            format!("Regional specialty of {}", ctx.profile.region_name),
        ))
    }
}

/// District-level data confirms the soil match: +10. Region and default
/// profiles never qualify.
pub struct DistrictConfidenceRule;

impl ScoringRule for DistrictConfidenceRule {
    fn id(&self) -> &'static str {
        "district_confidence"
    }

    fn name(&self) -> &'static str {
        "District Soil Confidence"
    }

    fn evaluate(
        &self,
        ctx: &ScoringContext<'_>,
        candidate: &CandidateDefinition,
    ) -> Option<ScoreFactor> {
        if ctx.profile.granularity != Granularity::District
            || !candidate.prefers_soil(ctx.profile.soil_class)
        {
            return None;
        }
        Some(ScoreFactor::new(
            self.id(),
            10.0,
            "District soil data confirms match",
        ))
    }
}
