use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SoilClass {
    Alluvial,
    Black,
    Red,
    Sandy,
    Loamy,
    Clay,
    Laterite,
    Coastal,
    Calcareous,
    Terai,
    Forest,
}

impl SoilClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            SoilClass::Alluvial => "Alluvial",
            SoilClass::Black => "Black",
            SoilClass::Red => "Red",
            SoilClass::Sandy => "Sandy",
            SoilClass::Loamy => "Loamy",
            SoilClass::Clay => "Clay",
            SoilClass::Laterite => "Laterite",
            SoilClass::Coastal => "Coastal",
            SoilClass::Calcareous => "Calcareous",
            SoilClass::Terai => "Terai",
            SoilClass::Forest => "Forest",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "alluvial" => Some(SoilClass::Alluvial),
            "black" | "regur" | "black cotton" => Some(SoilClass::Black),
            "red" => Some(SoilClass::Red),
            "sandy" | "desert" => Some(SoilClass::Sandy),
            "loamy" | "loam" => Some(SoilClass::Loamy),
            "clay" => Some(SoilClass::Clay),
            "laterite" => Some(SoilClass::Laterite),
            "coastal" => Some(SoilClass::Coastal),
            "calcareous" => Some(SoilClass::Calcareous),
            "terai" => Some(SoilClass::Terai),
            "forest" | "mountain" => Some(SoilClass::Forest),
            _ => None,
        }
    }
}

/// Catalog files may use the common aliases ("regur", "loam", "desert").
impl<'de> Deserialize<'de> for SoilClass {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        SoilClass::from_str(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown soil class '{}'", raw)))
    }
}

impl std::fmt::Display for SoilClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Ordinal availability scale shared by rainfall and irrigation.
///
/// Variant order matters: comparisons such as `irrigation >= Level::High`
/// rely on the derived `Ord`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    VeryLow,
    Low,
    Medium,
    High,
    VeryHigh,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::VeryLow => "Very Low",
            Level::Low => "Low",
            Level::Medium => "Medium",
            Level::High => "High",
            Level::VeryHigh => "Very High",
        }
    }

    /// `Low` or drier.
    pub fn is_scarce(&self) -> bool {
        *self <= Level::Low
    }

    /// `High` or wetter.
    pub fn is_ample(&self) -> bool {
        *self >= Level::High
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which lookup table produced a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    District,
    Region,
    Default,
}

impl Granularity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::District => "District",
            Granularity::Region => "Region",
            Granularity::Default => "Default",
        }
    }
}

impl std::fmt::Display for Granularity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// Geographic centroid of India, used when nothing more precise is known.
    pub const NATIONAL_CENTROID: Coordinates = Coordinates {
        latitude: 20.5937,
        longitude: 78.9629,
    };

    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// Static agro-climatic characterization of a place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentProfile {
    pub soil_class: SoilClass,
    pub rainfall_class: Level,
    pub irrigation_class: Level,
    pub region_id: String,
    pub region_name: String,
    pub granularity: Granularity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
}

impl EnvironmentProfile {
    pub fn agro_zone(&self) -> String {
        format!("{} Soil / {} Rain", self.soil_class, self.rainfall_class)
    }

    /// Returns a copy with the irrigation class corrected from an observed
    /// topsoil moisture fraction (m³/m³). Wet soil counts as well irrigated,
    /// dry soil as poorly irrigated; anything in between leaves the static
    /// class alone.
    pub fn with_observed_soil_moisture(&self, moisture: f64) -> Self {
        let mut adjusted = self.clone();
        if moisture > 0.35 {
            adjusted.irrigation_class = Level::High;
        } else if moisture < 0.15 {
            adjusted.irrigation_class = Level::Low;
        }
        adjusted
    }
}
