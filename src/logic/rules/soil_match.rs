use super::{ScoringContext, ScoringRule};
use crate::models::{CandidateDefinition, ScoreFactor};

/// Soil compatibility: +20 when the location's soil is one the crop prefers.
pub struct SoilMatchRule;

impl ScoringRule for SoilMatchRule {
    fn id(&self) -> &'static str {
        "soil_match"
    }

    fn name(&self) -> &'static str {
        "Soil Compatibility"
    }

    fn evaluate(
        &self,
        ctx: &ScoringContext<'_>,
        candidate: &CandidateDefinition,
    ) -> Option<ScoreFactor> {
        let soil = ctx.profile.soil_class;
        if !candidate.prefers_soil(soil) {
            return None;
        }

        Some(ScoreFactor::new(
            self.id(),
            20.0,
            format!("Ideal for {} soil", soil),
        ))
    }
}
