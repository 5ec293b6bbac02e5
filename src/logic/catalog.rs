use crate::error::{AgroRankError, Result};
use crate::models::{CandidateDefinition, Season};
use std::collections::HashSet;
use std::path::Path;
use std::sync::{Arc, RwLock};

const BUILTIN_CATALOG: &str = include_str!("../../data/catalog.yaml");

/// Read-only table of every crop that can be recommended.
#[derive(Debug, Clone)]
pub struct CandidateCatalog {
    candidates: Vec<CandidateDefinition>,
}

impl CandidateCatalog {
    /// The catalog compiled into the binary.
    pub fn builtin() -> Result<Self> {
        Self::from_yaml(BUILTIN_CATALOG)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            AgroRankError::Config(format!("Failed to read catalog {:?}: {}", path, e))
        })?;
        let catalog = Self::from_yaml(&content)?;
        tracing::info!(
            "Loaded {} candidates from {}",
            catalog.len(),
            path.display()
        );
        Ok(catalog)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let candidates: Vec<CandidateDefinition> = serde_yaml::from_str(content)?;
        Self::new(candidates)
    }

    pub fn new(candidates: Vec<CandidateDefinition>) -> Result<Self> {
        let mut seen = HashSet::new();
        for candidate in &candidates {
            if candidate.id.trim().is_empty() {
                return Err(AgroRankError::InvalidData(
                    "candidate with empty id".into(),
                ));
            }
            if !seen.insert(candidate.id.as_str()) {
                return Err(AgroRankError::InvalidData(format!(
                    "duplicate candidate id '{}'",
                    candidate.id
                )));
            }
            if candidate.yield_per_area < 0.0 || candidate.reference_price < 0.0 {
                return Err(AgroRankError::InvalidData(format!(
                    "candidate '{}' has negative yield or price",
                    candidate.id
                )));
            }
        }
        Ok(Self { candidates })
    }

    pub fn candidates(&self) -> &[CandidateDefinition] {
        &self.candidates
    }

    pub fn get(&self, id: &str) -> Option<&CandidateDefinition> {
        self.candidates.iter().find(|c| c.id == id)
    }

    pub fn in_season(&self, season: Season) -> impl Iterator<Item = &CandidateDefinition> {
        self.candidates
            .iter()
            .filter(move |c| c.is_in_season(season))
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

/// Shared handle to the current catalog.
///
/// Readers take an `Arc` snapshot and keep it for the whole request;
/// `replace` swaps the pointer so in-flight readers never see a partially
/// updated table.
#[derive(Debug)]
pub struct CatalogHandle {
    current: RwLock<Arc<CandidateCatalog>>,
}

impl CatalogHandle {
    pub fn new(catalog: CandidateCatalog) -> Self {
        Self {
            current: RwLock::new(Arc::new(catalog)),
        }
    }

    pub fn snapshot(&self) -> Arc<CandidateCatalog> {
        self.current
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn replace(&self, catalog: CandidateCatalog) {
        let mut current = self
            .current
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *current = Arc::new(catalog);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SoilClass, WaterRequirement};

    #[test]
    fn builtin_catalog_parses() {
        let catalog = CandidateCatalog::builtin().unwrap();
        assert!(catalog.len() > 20);
        let wheat = catalog.get("wheat").unwrap();
        assert_eq!(wheat.water_requirement, WaterRequirement::High);
        assert!(wheat.is_regional_specialty("punjab"));
    }

    #[test]
    fn every_season_has_candidates() {
        let catalog = CandidateCatalog::builtin().unwrap();
        for season in [Season::Rabi, Season::Kharif, Season::Zaid] {
            assert!(catalog.in_season(season).count() > 0, "{:?}", season);
        }
    }

    #[test]
    fn year_round_candidates_in_every_season() {
        let catalog = CandidateCatalog::builtin().unwrap();
        for season in [Season::Rabi, Season::Kharif, Season::Zaid] {
            assert!(catalog.in_season(season).any(|c| c.id == "sugarcane"));
        }
    }

    #[test]
    fn duplicate_ids_rejected() {
        let yaml = r#"
- id: wheat
  display_name: Wheat
  localized_name: गेहूं
  season_tag: rabi
  category: cereal
  soil_affinity: [alluvial]
  water_requirement: high
  duration_days: 120
  yield_per_area: 45
  reference_price: 2500
- id: wheat
  display_name: Wheat again
  localized_name: गेहूं
  season_tag: rabi
  category: cereal
  soil_affinity: [alluvial]
  water_requirement: high
  duration_days: 120
  yield_per_area: 45
  reference_price: 2500
"#;
        let err = CandidateCatalog::from_yaml(yaml).unwrap_err();
        assert!(matches!(err, AgroRankError::InvalidData(_)));
    }

    #[test]
    fn soil_aliases_accepted_in_catalog_files() {
        let yaml = r#"
- id: cotton
  display_name: Cotton
  localized_name: कपास
  season_tag: kharif
  category: fiber
  soil_affinity: [regur, Loam]
  water_requirement: moderate
  duration_days: 160
  yield_per_area: 20
  reference_price: 6600
"#;
        let catalog = CandidateCatalog::from_yaml(yaml).unwrap();
        let cotton = catalog.get("cotton").unwrap();
        assert!(cotton.prefers_soil(SoilClass::Black));
        assert!(cotton.prefers_soil(SoilClass::Loamy));
    }

    #[test]
    fn unknown_soil_class_rejected() {
        let yaml = r#"
- id: cotton
  display_name: Cotton
  localized_name: कपास
  season_tag: kharif
  category: fiber
  soil_affinity: [dirt]
  water_requirement: moderate
  duration_days: 160
  yield_per_area: 20
  reference_price: 6600
"#;
        assert!(matches!(
            CandidateCatalog::from_yaml(yaml),
            Err(AgroRankError::Yaml(_))
        ));
    }

    #[test]
    fn malformed_yaml_is_an_error() {
        let err = CandidateCatalog::from_yaml("- id: [unclosed").unwrap_err();
        assert!(matches!(err, AgroRankError::Yaml(_)));
    }

    #[test]
    fn handle_swaps_without_disturbing_snapshots() {
        let handle = CatalogHandle::new(CandidateCatalog::builtin().unwrap());
        let before = handle.snapshot();
        let original_len = before.len();

        handle.replace(CandidateCatalog::new(Vec::new()).unwrap());

        assert_eq!(before.len(), original_len);
        assert!(handle.snapshot().is_empty());
    }
}
