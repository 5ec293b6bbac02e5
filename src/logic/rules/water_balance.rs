use super::{ScoringContext, ScoringRule};
use crate::models::{CandidateDefinition, Level, ScoreFactor, WaterRequirement};

/// Water balance rule - matches crop water demand against rainfall and
/// irrigation at the location.
///
/// High-demand crops:
/// - Ample irrigation or rainfall: +25
/// - Scarce irrigation and scarce rainfall: -50, veto
/// - Anything in between: -10
///
/// Low-demand crops:
/// - Scarce irrigation and scarce rainfall: +25
/// - Very high rainfall: -40, veto (rot risk)
///
/// Moderate-demand crops are unaffected.
pub struct WaterBalanceRule;

impl ScoringRule for WaterBalanceRule {
    fn id(&self) -> &'static str {
        "water_balance"
    }

    fn name(&self) -> &'static str {
        "Water Balance"
    }

    fn evaluate(
        &self,
        ctx: &ScoringContext<'_>,
        candidate: &CandidateDefinition,
    ) -> Option<ScoreFactor> {
        let rainfall = ctx.profile.rainfall_class;
        let irrigation = ctx.profile.irrigation_class;
        let dry = irrigation.is_scarce() && rainfall.is_scarce();

        match candidate.water_requirement {
            WaterRequirement::High => {
                if irrigation.is_ample() || rainfall.is_ample() {
                    Some(ScoreFactor::new(self.id(), 25.0, "Water requirement met"))
                } else if dry {
                    Some(ScoreFactor::veto(self.id(), -50.0, "Insufficient water"))
                } else {
                    Some(ScoreFactor::new(
                        self.id(),
                        -10.0,
                        "Limited water availability",
                    ))
                }
            }
            WaterRequirement::Low => {
                if dry {
                    Some(ScoreFactor::new(self.id(), 25.0, "Drought resistant"))
                } else if rainfall == Level::VeryHigh {
                    Some(ScoreFactor::veto(self.id(), -40.0, "Excess moisture risk"))
                } else {
                    None
                }
            }
            WaterRequirement::Moderate => None,
        }
    }
}
