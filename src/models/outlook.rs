use serde::{Deserialize, Serialize};

/// Heavy-rain threshold over the forecast window.
pub const HIGH_RAINFALL_MM: f64 = 50.0;
/// Dry-spell thresholds: almost no rain and parched topsoil.
pub const DROUGHT_RAINFALL_MM: f64 = 2.0;
pub const DROUGHT_SOIL_MOISTURE: f64 = 0.1;
/// Mean daily maximum above which the window is a heatwave.
pub const HEATWAVE_MAX_TEMP_C: f64 = 40.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskKind {
    None,
    HighRainfall,
    Drought,
    Heatwave,
    ColdSnap,
}

impl RiskKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskKind::None => "None",
            RiskKind::HighRainfall => "High Rainfall",
            RiskKind::Drought => "Drought",
            RiskKind::Heatwave => "Heatwave",
            RiskKind::ColdSnap => "Cold Snap",
        }
    }
}

impl std::fmt::Display for RiskKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutlookSource {
    /// Derived from a live forecast fetch.
    Live,
    /// Month-keyed fallback used when the live fetch failed.
    SeasonalHeuristic,
}

impl OutlookSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutlookSource::Live => "Live forecast",
            OutlookSource::SeasonalHeuristic => "Seasonal heuristic",
        }
    }
}

/// Short-to-medium range weather risk summary for a location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonalOutlook {
    pub risk_kind: RiskKind,
    pub narrative: String,
    /// Mean daily maximum temperature over the window, °C.
    pub max_temperature: Option<f64>,
    pub cumulative_rainfall_mm: Option<f64>,
    /// Topsoil volumetric moisture, m³/m³.
    pub soil_moisture_fraction: Option<f64>,
    pub source: OutlookSource,
}

impl SeasonalOutlook {
    /// Classify live forecast aggregates. The first matching risk wins:
    /// heavy rain, then drought, then heat. Drought needs a soil moisture
    /// reading.
    pub fn from_forecast(
        mean_max_temp_c: f64,
        cumulative_rainfall_mm: f64,
        soil_moisture_fraction: Option<f64>,
    ) -> Self {
        let (risk_kind, narrative) = if cumulative_rainfall_mm > HIGH_RAINFALL_MM {
            (
                RiskKind::HighRainfall,
                format!(
                    "Heavy rain alert ({:.0} mm expected)",
                    cumulative_rainfall_mm
                ),
            )
        } else if cumulative_rainfall_mm < DROUGHT_RAINFALL_MM
            && soil_moisture_fraction.is_some_and(|m| m < DROUGHT_SOIL_MOISTURE)
        {
            (RiskKind::Drought, "Severe dry spell".to_string())
        } else if mean_max_temp_c > HEATWAVE_MAX_TEMP_C {
            (
                RiskKind::Heatwave,
                format!("Heatwave alert ({:.1}°C)", mean_max_temp_c),
            )
        } else {
            (RiskKind::None, "Favorable conditions".to_string())
        };

        Self {
            risk_kind,
            narrative,
            max_temperature: Some(mean_max_temp_c),
            cumulative_rainfall_mm: Some(cumulative_rainfall_mm),
            soil_moisture_fraction,
            source: OutlookSource::Live,
        }
    }

    /// Static month-keyed outlook for when no live forecast is available.
    ///
    /// - Jun-Sep: monsoon, heavy rainfall expected
    /// - Oct-Jan: dry winter with cold waves
    /// - Feb-May: rising heat and dry spells
    pub fn seasonal_heuristic(month: u32) -> Self {
        let (risk_kind, narrative) = match month {
            6..=9 => (
                RiskKind::HighRainfall,
                "Heavy monsoon rains expected over the next 3 months",
            ),
            10..=12 | 1 => (
                RiskKind::ColdSnap,
                "Dry winter conditions with potential cold waves",
            ),
            _ => (
                RiskKind::Heatwave,
                "Rising temperatures and dry spell expected",
            ),
        };

        Self {
            risk_kind,
            narrative: narrative.to_string(),
            max_temperature: None,
            cumulative_rainfall_mm: None,
            soil_moisture_fraction: None,
            source: OutlookSource::SeasonalHeuristic,
        }
    }

    pub fn is_live(&self) -> bool {
        self.source == OutlookSource::Live
    }
}
