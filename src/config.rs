use crate::error::{AgroRankError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const OPEN_METEO_URL: &str = "https://api.open-meteo.com/v1/forecast";
const AGMARKNET_URL: &str =
    "https://api.data.gov.in/resource/9ef84268-d588-465a-a308-a864a43d0070";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub weather: WeatherConfig,
    pub market: MarketConfig,
    pub recommendations: RecommendationConfig,
    /// YAML catalog replacing the built-in one.
    pub catalog_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WeatherConfig {
    pub enabled: bool,
    pub base_url: String,
    pub forecast_days: u32,
    pub timeout_secs: u64,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: OPEN_METEO_URL.into(),
            forecast_days: 7,
            timeout_secs: 4,
        }
    }
}

#[derive(Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MarketConfig {
    pub enabled: bool,
    pub base_url: String,
    pub api_key: String,
    pub timeout_secs: u64,
    pub record_limit: u32,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: AGMARKNET_URL.into(),
            api_key: String::new(),
            timeout_secs: 4,
            record_limit: 100,
        }
    }
}

impl std::fmt::Debug for MarketConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MarketConfig")
            .field("enabled", &self.enabled)
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .field("timeout_secs", &self.timeout_secs)
            .field("record_limit", &self.record_limit)
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RecommendationConfig {
    pub top_n: usize,
    pub adjust_irrigation_from_soil_moisture: bool,
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            top_n: 8,
            adjust_irrigation_from_soil_moisture: true,
        }
    }
}

impl Config {
    /// Load config from the override path or the standard locations.
    /// A missing file is not an error: every section has usable defaults.
    pub fn load(config_override: Option<PathBuf>) -> Result<Self> {
        let config_path = match config_override {
            Some(p) => {
                if !p.exists() {
                    return Err(AgroRankError::Config(format!(
                        "Config file not found at {:?}",
                        p
                    )));
                }
                p
            }
            None => match Self::find_config_path() {
                Some(p) => p,
                None => {
                    tracing::debug!("No config file found, using defaults");
                    return Ok(Self::default());
                }
            },
        };

        let config_str = std::fs::read_to_string(&config_path)
            .map_err(|e| AgroRankError::Config(format!("Failed to read config: {}", e)))?;

        let config = Self::from_yaml(&config_str)?;
        tracing::debug!(path = %config_path.display(), "Loaded config");
        Ok(config)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let yaml = Self::substitute_env_vars(yaml)?;
        let config: Config = serde_yaml::from_str(&yaml)
            .map_err(|e| AgroRankError::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.recommendations.top_n == 0 {
            return Err(AgroRankError::Config(
                "recommendations.top_n must be at least 1".into(),
            ));
        }
        if self.weather.forecast_days == 0 || self.weather.forecast_days > 16 {
            return Err(AgroRankError::Config(
                "weather.forecast_days must be between 1 and 16".into(),
            ));
        }
        if self.weather.timeout_secs == 0 || self.market.timeout_secs == 0 {
            return Err(AgroRankError::Config(
                "timeout_secs must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Search for config.yaml in standard locations.
    fn find_config_path() -> Option<PathBuf> {
        let local_config = PathBuf::from("config/config.yaml");
        if local_config.exists() {
            return Some(local_config);
        }

        dirs::config_dir()
            .map(|dir| dir.join("agrorank").join("config.yaml"))
            .filter(|p| p.exists())
    }

    /// Market enrichment needs an API key as well as the enabled flag.
    pub fn market_enabled(&self) -> bool {
        self.market.enabled && !self.market.api_key.is_empty()
    }

    fn substitute_env_vars(content: &str) -> Result<String> {
        let mut result = content.to_string();

        let re = regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
            .map_err(|e| AgroRankError::Config(format!("Invalid substitution pattern: {}", e)))?;

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let placeholder = &cap[0];
            match std::env::var(var_name) {
                Ok(value) => result = result.replace(placeholder, &value),
                // Unset variables become empty so optional keys stay optional.
                Err(_) => result = result.replace(placeholder, ""),
            }
        }

        Ok(result)
    }
}
