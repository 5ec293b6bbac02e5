//! Shared builders for scoring tests.

use crate::models::{
    CandidateDefinition, CropCategory, EnvironmentProfile, Granularity, Level, OutlookSource,
    RiskKind, SeasonTag, SeasonalOutlook, SoilClass, WaterRequirement,
};
use std::collections::HashSet;

pub(crate) fn profile(soil: SoilClass, rainfall: Level, irrigation: Level) -> EnvironmentProfile {
    EnvironmentProfile {
        soil_class: soil,
        rainfall_class: rainfall,
        irrigation_class: irrigation,
        region_id: "rajasthan".to_string(),
        region_name: "Rajasthan".to_string(),
        granularity: Granularity::Region,
        coordinates: None,
    }
}

pub(crate) fn district_profile(
    soil: SoilClass,
    rainfall: Level,
    irrigation: Level,
) -> EnvironmentProfile {
    EnvironmentProfile {
        granularity: Granularity::District,
        ..profile(soil, rainfall, irrigation)
    }
}

pub(crate) fn candidate(
    id: &str,
    water: WaterRequirement,
    soils: &[SoilClass],
) -> CandidateDefinition {
    CandidateDefinition {
        id: id.to_string(),
        display_name: id.to_string(),
        localized_name: id.to_string(),
        season_tag: SeasonTag::Rabi,
        category: CropCategory::Cereal,
        soil_affinity: soils.iter().copied().collect(),
        water_requirement: water,
        duration_days: 120,
        yield_per_area: 30.0,
        reference_price: 2000.0,
        msp_price: None,
        cultivation_cost: 20000.0,
        regional_affinity: HashSet::new(),
    }
}

pub(crate) fn regional_candidate(
    id: &str,
    water: WaterRequirement,
    soils: &[SoilClass],
    regions: &[&str],
) -> CandidateDefinition {
    CandidateDefinition {
        regional_affinity: regions.iter().map(|r| r.to_string()).collect(),
        ..candidate(id, water, soils)
    }
}

pub(crate) fn outlook(risk: RiskKind) -> SeasonalOutlook {
    SeasonalOutlook {
        risk_kind: risk,
        narrative: format!("{} expected", risk),
        max_temperature: None,
        cumulative_rainfall_mm: None,
        soil_moisture_fraction: None,
        source: OutlookSource::Live,
    }
}
