use crate::models::{Coordinates, EnvironmentProfile, Granularity, Level, SoilClass};
use std::collections::HashMap;

/// A district with a granular agro-climatic profile.
struct DistrictEntry {
    names: &'static [&'static str],
    region_id: &'static str,
    soil: SoilClass,
    rainfall: Level,
    irrigation: Level,
    lat: f64,
    lon: f64,
}

/// A state-level profile, matched when the location mentions any alias.
struct RegionEntry {
    id: &'static str,
    name: &'static str,
    aliases: &'static [&'static str],
    soil: SoilClass,
    rainfall: Level,
    irrigation: Level,
    lat: f64,
    lon: f64,
}

use Level::{High, Low, Medium, VeryHigh, VeryLow};
use SoilClass::{Alluvial, Black, Calcareous, Coastal, Forest, Loamy, Red, Sandy, Terai};

macro_rules! district {
    ($names:expr, $region:expr, $soil:expr, $rain:expr, $irr:expr, $lat:expr, $lon:expr) => {
        DistrictEntry {
            names: $names,
            region_id: $region,
            soil: $soil,
            rainfall: $rain,
            irrigation: $irr,
            lat: $lat,
            lon: $lon,
        }
    };
}

macro_rules! region {
    ($id:expr, $name:expr, $soil:expr, $rain:expr, $irr:expr, $lat:expr, $lon:expr, $aliases:expr) => {
        RegionEntry {
            id: $id,
            name: $name,
            aliases: $aliases,
            soil: $soil,
            rainfall: $rain,
            irrigation: $irr,
            lat: $lat,
            lon: $lon,
        }
    };
}

#[rustfmt::skip]
const DISTRICTS: &[DistrictEntry] = &[
    // Maharashtra
    district!(&["pune"], "maharashtra", Black, Medium, High, 18.52, 73.86),
    district!(&["nashik", "nasik"], "maharashtra", Red, Medium, High, 19.99, 73.79),
    district!(&["nagpur"], "maharashtra", Black, High, Medium, 21.15, 79.09),
    district!(&["solapur"], "maharashtra", Black, Low, Low, 17.66, 75.91),
    district!(&["aurangabad", "chhatrapati sambhajinagar"], "maharashtra", Black, Low, Medium, 19.88, 75.34),
    district!(&["amravati"], "maharashtra", Black, Medium, Medium, 20.93, 77.75),
    district!(&["kolhapur"], "maharashtra", Red, High, High, 16.70, 74.24),
    district!(&["satara"], "maharashtra", Black, Medium, High, 17.68, 74.02),
    // Gujarat
    district!(&["ahmedabad"], "gujarat", Alluvial, Medium, High, 23.02, 72.57),
    district!(&["surat"], "gujarat", Black, High, High, 21.17, 72.83),
    district!(&["rajkot"], "gujarat", Black, Low, Medium, 22.30, 70.80),
    district!(&["kutch", "kachchh"], "gujarat", Sandy, VeryLow, Low, 23.73, 69.86),
    district!(&["vadodara", "baroda"], "gujarat", Loamy, Medium, High, 22.31, 73.18),
    district!(&["junagadh"], "gujarat", Calcareous, Medium, Medium, 21.52, 70.46),
    // Rajasthan
    district!(&["jodhpur"], "rajasthan", Sandy, VeryLow, Low, 26.24, 73.02),
    district!(&["udaipur"], "rajasthan", Red, Medium, Medium, 24.59, 73.71),
    district!(&["kota"], "rajasthan", Black, Medium, High, 25.21, 75.86),
    district!(&["bikaner"], "rajasthan", Sandy, VeryLow, Low, 28.02, 73.31),
    // Punjab / Haryana
    district!(&["ludhiana"], "punjab", Alluvial, Medium, VeryHigh, 30.90, 75.86),
    district!(&["amritsar"], "punjab", Alluvial, Medium, VeryHigh, 31.63, 74.87),
    district!(&["patiala"], "punjab", Loamy, Medium, High, 30.34, 76.39),
    district!(&["karnal"], "haryana", Alluvial, Medium, High, 29.69, 76.99),
    district!(&["hisar"], "haryana", Sandy, Low, Medium, 29.15, 75.72),
    // South
    district!(&["bangalore", "bengaluru"], "karnataka", Red, Medium, Medium, 12.97, 77.59),
    district!(&["mysore", "mysuru"], "karnataka", Red, Medium, High, 12.30, 76.64),
    district!(&["belgaum", "belagavi"], "karnataka", Black, High, Medium, 15.85, 74.50),
    district!(&["chennai"], "tamil_nadu", Coastal, High, Medium, 13.08, 80.27),
    district!(&["coimbatore"], "tamil_nadu", Red, Low, High, 11.02, 76.96),
    district!(&["madurai"], "tamil_nadu", Red, Low, High, 9.93, 78.12),
    district!(&["hyderabad"], "telangana", Red, Medium, Medium, 17.39, 78.49),
    district!(&["warangal"], "telangana", Black, Medium, High, 17.97, 79.59),
    // East
    district!(&["kolkata", "calcutta"], "bengal", Alluvial, VeryHigh, High, 22.57, 88.36),
    district!(&["siliguri"], "bengal", Terai, VeryHigh, High, 26.73, 88.40),
    district!(&["patna"], "bihar", Alluvial, Medium, High, 25.59, 85.14),
    district!(&["bhubaneswar"], "odisha", Red, High, Medium, 20.30, 85.82),
    district!(&["guwahati"], "assam", Alluvial, VeryHigh, Medium, 26.14, 91.74),
    // Central
    district!(&["bhopal"], "mp", Black, Medium, Medium, 23.26, 77.41),
    district!(&["indore"], "mp", Black, Medium, High, 22.72, 75.86),
    district!(&["jabalpur"], "mp", Sandy, High, Medium, 23.18, 79.99),
    district!(&["raipur"], "chhattisgarh", Red, High, Medium, 21.25, 81.63),
    // North
    district!(&["lucknow"], "up", Alluvial, Medium, High, 26.85, 80.95),
    district!(&["kanpur"], "up", Alluvial, Medium, High, 26.45, 80.33),
    district!(&["varanasi", "banaras"], "up", Alluvial, Medium, High, 25.32, 82.97),
    district!(&["dehradun"], "uttarakhand", Forest, High, Medium, 30.32, 78.03),
];

#[rustfmt::skip]
const REGIONS: &[RegionEntry] = &[
    region!("punjab", "Punjab", Alluvial, Medium, High, 30.90, 75.86,
        &["punjab", "ludhiana", "amritsar"]),
    region!("maharashtra", "Maharashtra", Black, Medium, Medium, 19.75, 75.71,
        &["maharashtra", "pune", "mumbai", "nagpur", "nashik"]),
    region!("rajasthan", "Rajasthan", Sandy, Low, Low, 26.91, 75.79,
        &["rajasthan", "jaipur", "jodhpur", "udaipur"]),
    region!("haryana", "Haryana", Alluvial, Low, High, 29.06, 76.09,
        &["haryana", "gurgaon", "gurugram", "hisar"]),
    region!("delhi", "Delhi", Alluvial, Low, High, 28.61, 77.21,
        &["delhi", "new delhi"]),
    region!("up", "Uttar Pradesh", Alluvial, Medium, High, 26.85, 80.95,
        &["up", "uttar pradesh", "lucknow", "kanpur"]),
    region!("mp", "Madhya Pradesh", Black, Medium, Medium, 23.26, 77.41,
        &["mp", "madhya pradesh", "bhopal", "indore"]),
    region!("gujarat", "Gujarat", Black, Low, Medium, 23.02, 72.57,
        &["gujarat", "ahmedabad", "surat", "vadodara", "rajkot"]),
    region!("karnataka", "Karnataka", Red, Medium, Medium, 12.97, 77.59,
        &["karnataka", "bangalore", "bengaluru", "mysore"]),
    region!("tamil_nadu", "Tamil Nadu", Red, Medium, High, 13.08, 80.27,
        &["tamil nadu", "chennai", "coimbatore"]),
    region!("telangana", "Telangana", Red, Medium, Medium, 17.39, 78.49,
        &["telangana", "hyderabad"]),
    region!("bengal", "West Bengal", Alluvial, High, High, 22.57, 88.36,
        &["west bengal", "bengal", "kolkata", "siliguri"]),
    region!("bihar", "Bihar", Alluvial, Medium, High, 25.59, 85.14,
        &["bihar", "patna"]),
    region!("assam", "Assam", Alluvial, High, Low, 26.14, 91.74,
        &["assam", "guwahati"]),
    region!("odisha", "Odisha", Red, High, Medium, 20.30, 85.82,
        &["odisha", "orissa", "bhubaneswar"]),
    region!("chhattisgarh", "Chhattisgarh", Red, High, Medium, 21.25, 81.63,
        &["chhattisgarh", "raipur"]),
    region!("uttarakhand", "Uttarakhand", Forest, High, Medium, 30.32, 78.03,
        &["uttarakhand", "dehradun"]),
];

pub const DEFAULT_REGION_ID: &str = "generic";

/// Resolves free-text locations to agro-climatic profiles.
///
/// Lookup order: exact district name, then any region alias appearing as a
/// whole word in the text, then a generic national profile. Unresolvable
/// input is a normal outcome and never an error.
pub struct LocationProfileResolver {
    districts: HashMap<&'static str, &'static DistrictEntry>,
    region_aliases: Vec<(String, &'static RegionEntry)>,
    region_names: HashMap<&'static str, &'static str>,
}

impl LocationProfileResolver {
    pub fn new() -> Self {
        let districts = DISTRICTS
            .iter()
            .flat_map(|d| d.names.iter().map(move |name| (*name, d)))
            .collect();

        // Longer aliases first so "west bengal" wins over "bengal".
        let mut region_aliases: Vec<(String, &'static RegionEntry)> = REGIONS
            .iter()
            .flat_map(|r| r.aliases.iter().map(move |alias| (format!(" {} ", alias), r)))
            .collect();
        region_aliases.sort_by_key(|(alias, _)| std::cmp::Reverse(alias.len()));

        let region_names = REGIONS.iter().map(|r| (r.id, r.name)).collect();

        Self {
            districts,
            region_aliases,
            region_names,
        }
    }

    pub fn resolve(
        &self,
        location_text: &str,
        coordinates: Option<Coordinates>,
    ) -> EnvironmentProfile {
        let normalized = normalize(location_text);

        let mut profile = self
            .match_district(&normalized)
            .or_else(|| self.match_region(&normalized))
            .unwrap_or_else(|| {
                tracing::debug!(
                    "No profile for '{}', using generic default",
                    location_text
                );
                Self::default_profile()
            });

        if coordinates.is_some() {
            profile.coordinates = coordinates;
        }
        profile
    }

    pub fn default_profile() -> EnvironmentProfile {
        EnvironmentProfile {
            soil_class: Loamy,
            rainfall_class: Medium,
            irrigation_class: Medium,
            region_id: DEFAULT_REGION_ID.to_string(),
            region_name: "India".to_string(),
            granularity: Granularity::Default,
            coordinates: None,
        }
    }

    /// Each comma-separated segment is tried as a district name, so
    /// "Ludhiana, Punjab" still resolves at district level.
    fn match_district(&self, normalized: &str) -> Option<EnvironmentProfile> {
        let district = normalized
            .split(',')
            .map(|segment| segment.split_whitespace().collect::<Vec<_>>().join(" "))
            .find_map(|segment| self.districts.get(segment.as_str()).copied())?;

        let region_name = self
            .region_names
            .get(district.region_id)
            .copied()
            .unwrap_or(district.region_id);

        Some(EnvironmentProfile {
            soil_class: district.soil,
            rainfall_class: district.rainfall,
            irrigation_class: district.irrigation,
            region_id: district.region_id.to_string(),
            region_name: region_name.to_string(),
            granularity: Granularity::District,
            coordinates: Some(Coordinates::new(district.lat, district.lon)),
        })
    }

    fn match_region(&self, normalized: &str) -> Option<EnvironmentProfile> {
        let padded = format!(
            " {} ",
            normalized
                .chars()
                .map(|c| if c.is_alphanumeric() { c } else { ' ' })
                .collect::<String>()
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ")
        );

        let (_, region) = self
            .region_aliases
            .iter()
            .find(|(alias, _)| padded.contains(alias.as_str()))?;

        Some(EnvironmentProfile {
            soil_class: region.soil,
            rainfall_class: region.rainfall,
            irrigation_class: region.irrigation,
            region_id: region.id.to_string(),
            region_name: region.name.to_string(),
            granularity: Granularity::Region,
            coordinates: Some(Coordinates::new(region.lat, region.lon)),
        })
    }
}

impl Default for LocationProfileResolver {
    fn default() -> Self {
        Self::new()
    }
}

fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}
