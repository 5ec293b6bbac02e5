use super::candidate::{CandidateDefinition, CropCategory, WaterRequirement};
use super::outlook::SeasonalOutlook;
use super::profile::Granularity;
use super::season::Season;
use serde::{Deserialize, Serialize};

/// Number of reasons shown alongside each recommendation.
pub const DISPLAYED_REASONS: usize = 2;

/// One triggered scoring rule: a signed adjustment plus its justification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreFactor {
    pub rule_id: String,
    pub delta: f64,
    pub reason: String,
    /// Hard exclusion, regardless of the final score.
    #[serde(default)]
    pub veto: bool,
}

impl ScoreFactor {
    pub fn new(rule_id: &str, delta: f64, reason: impl Into<String>) -> Self {
        Self {
            rule_id: rule_id.to_string(),
            delta,
            reason: reason.into(),
            veto: false,
        }
    }

    pub fn veto(rule_id: &str, delta: f64, reason: impl Into<String>) -> Self {
        Self {
            veto: true,
            ..Self::new(rule_id, delta, reason)
        }
    }
}

/// Pick the `limit` factors with the largest absolute impact. Equal impacts
/// keep rule order.
pub fn highest_impact_reasons(factors: &[ScoreFactor], limit: usize) -> Vec<String> {
    let mut ranked: Vec<&ScoreFactor> = factors.iter().collect();
    ranked.sort_by(|a, b| b.delta.abs().total_cmp(&a.delta.abs()));
    ranked
        .into_iter()
        .take(limit)
        .map(|f| f.reason.clone())
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Financials {
    /// Quintals per hectare.
    pub yield_per_area: f64,
    /// ₹ per hectare.
    pub profit_estimate: f64,
    /// ₹ per quintal.
    pub reference_price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub msp_price: Option<f64>,
}

impl Financials {
    pub fn for_candidate(candidate: &CandidateDefinition) -> Self {
        Self {
            yield_per_area: candidate.yield_per_area,
            profit_estimate: candidate.profit_estimate(),
            reference_price: candidate.reference_price,
            msp_price: candidate.msp_price,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCandidate {
    pub candidate_id: String,
    pub display_name: String,
    pub localized_name: String,
    pub category: CropCategory,
    pub water_requirement: WaterRequirement,
    pub duration_days: u32,
    pub score: f64,
    /// The highest-impact reasons, for display.
    pub reasons: Vec<String>,
    /// Every triggered rule reason, in rule order.
    pub factors: Vec<String>,
    pub financials: Financials,
}

/// Whether each enrichment source contributed live data to a report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichmentStatus {
    pub weather: bool,
    pub market: bool,
}

impl EnrichmentStatus {
    pub fn fully_enriched(&self) -> bool {
        self.weather && self.market
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationReport {
    pub location: String,
    pub region_id: String,
    pub region_name: String,
    pub granularity: Granularity,
    pub agro_zone: String,
    pub season: Season,
    pub outlook: SeasonalOutlook,
    pub enrichment: EnrichmentStatus,
    pub recommendations: Vec<ScoredCandidate>,
}

impl RecommendationReport {
    /// True when every candidate was excluded. This is a valid outcome.
    pub fn is_empty(&self) -> bool {
        self.recommendations.is_empty()
    }
}
