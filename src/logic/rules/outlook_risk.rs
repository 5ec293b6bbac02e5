use super::{ScoringContext, ScoringRule};
use crate::models::{CandidateDefinition, RiskKind, ScoreFactor, WaterRequirement};

/// Outlook risk rule - applies the weather outlook after the water balance so
/// a forecast risk can cancel a favorable static climate.
///
/// - Heavy rain ahead for a low-water crop: -50, veto
/// - Heatwave ahead for a high-water crop without irrigation: -50, veto
/// - No risk: +5
///
/// Other risks (drought, cold snap) do not adjust the score. A missing
/// outlook is neutral.
pub struct OutlookRiskRule;

impl ScoringRule for OutlookRiskRule {
    fn id(&self) -> &'static str {
        "outlook_risk"
    }

    fn name(&self) -> &'static str {
        "Weather Outlook"
    }

    fn evaluate(
        &self,
        ctx: &ScoringContext<'_>,
        candidate: &CandidateDefinition,
    ) -> Option<ScoreFactor> {
        let outlook = ctx.outlook?;
        let water = candidate.water_requirement;

        match outlook.risk_kind {
            RiskKind::HighRainfall if water == WaterRequirement::Low => Some(ScoreFactor::veto(
                self.id(),
                -50.0,
                format!("Critical risk: {}", outlook.narrative),
            )),
            RiskKind::Heatwave
                if water == WaterRequirement::High
                    && ctx.profile.irrigation_class.is_scarce() =>
            {
                Some(ScoreFactor::veto(
                    self.id(),
                    -50.0,
                    "Critical risk: Heatwave predicted",
                ))
            }
            RiskKind::None => Some(ScoreFactor::new(
                self.id(),
                5.0,
                "Favorable weather outlook",
            )),
            _ => None,
        }
    }
}
