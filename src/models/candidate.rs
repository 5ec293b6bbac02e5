use super::profile::SoilClass;
use super::season::Season;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeasonTag {
    Rabi,
    Kharif,
    Zaid,
    YearRound,
}

impl SeasonTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            SeasonTag::Rabi => "Rabi",
            SeasonTag::Kharif => "Kharif",
            SeasonTag::Zaid => "Zaid",
            SeasonTag::YearRound => "Year-round",
        }
    }

    pub fn matches(&self, season: Season) -> bool {
        matches!(
            (self, season),
            (SeasonTag::YearRound, _)
                | (SeasonTag::Rabi, Season::Rabi)
                | (SeasonTag::Kharif, Season::Kharif)
                | (SeasonTag::Zaid, Season::Zaid)
        )
    }
}

impl std::fmt::Display for SeasonTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CropCategory {
    Cereal,
    Millet,
    Pulse,
    Oilseed,
    Vegetable,
    Fruit,
    Fiber,
    Spice,
    CashCrop,
    Plantation,
    Fodder,
}

impl CropCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            CropCategory::Cereal => "Cereal",
            CropCategory::Millet => "Millet",
            CropCategory::Pulse => "Pulse",
            CropCategory::Oilseed => "Oilseed",
            CropCategory::Vegetable => "Vegetable",
            CropCategory::Fruit => "Fruit",
            CropCategory::Fiber => "Fiber",
            CropCategory::Spice => "Spice",
            CropCategory::CashCrop => "Cash Crop",
            CropCategory::Plantation => "Plantation",
            CropCategory::Fodder => "Fodder",
        }
    }
}

impl std::fmt::Display for CropCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaterRequirement {
    Low,
    Moderate,
    High,
}

impl WaterRequirement {
    pub fn as_str(&self) -> &'static str {
        match self {
            WaterRequirement::Low => "Low",
            WaterRequirement::Moderate => "Moderate",
            WaterRequirement::High => "High",
        }
    }
}

impl std::fmt::Display for WaterRequirement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Static reference data for one crop. Loaded once, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateDefinition {
    pub id: String,
    pub display_name: String,
    pub localized_name: String,
    pub season_tag: SeasonTag,
    pub category: CropCategory,
    pub soil_affinity: HashSet<SoilClass>,
    pub water_requirement: WaterRequirement,
    pub duration_days: u32,
    /// Quintals per hectare.
    pub yield_per_area: f64,
    /// ₹ per quintal.
    pub reference_price: f64,
    #[serde(default)]
    pub msp_price: Option<f64>,
    /// ₹ per hectare.
    #[serde(default)]
    pub cultivation_cost: f64,
    #[serde(default)]
    pub regional_affinity: HashSet<String>,
}

impl CandidateDefinition {
    /// Season filter applied before scoring. Vegetables are short enough to
    /// fit the zaid window regardless of their tag.
    pub fn is_in_season(&self, season: Season) -> bool {
        self.season_tag.matches(season)
            || (season == Season::Zaid && self.category == CropCategory::Vegetable)
    }

    pub fn prefers_soil(&self, soil: SoilClass) -> bool {
        self.soil_affinity.contains(&soil)
    }

    pub fn is_regional_specialty(&self, region_id: &str) -> bool {
        self.regional_affinity.contains(region_id)
    }

    /// Higher of the market reference price and the minimum support price.
    pub fn effective_price(&self) -> f64 {
        self.msp_price
            .map_or(self.reference_price, |msp| msp.max(self.reference_price))
    }

    pub fn profit_estimate(&self) -> f64 {
        self.yield_per_area * self.effective_price() - self.cultivation_cost
    }
}
