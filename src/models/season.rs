use serde::{Deserialize, Serialize};

/// Agricultural season buckets of the Indian cropping calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Season {
    /// Winter crop, sown Oct-Mar.
    Rabi,
    /// Monsoon crop, sown Jun-Sep.
    Kharif,
    /// Short summer crop between rabi harvest and monsoon, Apr-May.
    Zaid,
}

impl Season {
    pub fn as_str(&self) -> &'static str {
        match self {
            Season::Rabi => "Rabi (Winter)",
            Season::Kharif => "Kharif (Monsoon)",
            Season::Zaid => "Zaid (Summer)",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "rabi" | "winter" => Some(Season::Rabi),
            "kharif" | "monsoon" => Some(Season::Kharif),
            "zaid" | "summer" => Some(Season::Zaid),
            _ => None,
        }
    }
}

impl std::fmt::Display for Season {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
