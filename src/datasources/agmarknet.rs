use super::MarketTrendProvider;
use crate::config::MarketConfig;
use crate::error::{AgroRankError, Result};
use crate::models::{CandidateDefinition, MarketSignal, MarketSignals, TrendKind};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

/// Client for the data.gov.in daily mandi price resource (Agmarknet).
pub struct AgmarknetClient {
    client: reqwest::Client,
    config: MarketConfig,
}

#[derive(Debug, Deserialize)]
struct AgmResponse {
    #[serde(default)]
    records: Vec<AgmRecord>,
}

#[derive(Debug, Deserialize)]
struct AgmRecord {
    commodity: String,
    #[serde(default, deserialize_with = "deserialize_price")]
    modal_price: Option<f64>,
}

/// Prices arrive as strings on some resources and numbers on others.
fn deserialize_price<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawPrice {
        Number(f64),
        Text(String),
    }

    Ok(match Option::<RawPrice>::deserialize(deserializer)? {
        Some(RawPrice::Number(n)) => Some(n),
        Some(RawPrice::Text(s)) => s.trim().replace(',', "").parse::<f64>().ok(),
        None => None,
    })
}

impl AgmarknetClient {
    pub fn new(config: MarketConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client, config })
    }

    fn records_url(&self, district: Option<&str>) -> Result<reqwest::Url> {
        let limit = self.config.record_limit.to_string();
        let mut params = vec![
            ("api-key", self.config.api_key.as_str()),
            ("format", "json"),
            ("limit", limit.as_str()),
        ];
        if let Some(district) = district {
            params.push(("filters[district]", district));
        }

        reqwest::Url::parse_with_params(&self.config.base_url, &params)
            .map_err(|e| AgroRankError::Config(format!("Invalid market base_url: {}", e)))
    }

    /// Fetch modal prices for the location's district and derive signals for
    /// the given candidates.
    pub async fn fetch_prices(
        &self,
        location: &str,
        candidates: &[CandidateDefinition],
    ) -> Result<MarketSignals> {
        let district = district_filter(location);
        let url = self.records_url(district.as_deref())?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| AgroRankError::DataSourceUnavailable(format!("Agmarknet: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(AgroRankError::DataSourceUnavailable(format!(
                "Agmarknet returned {}",
                status
            )));
        }

        let agm_response: AgmResponse = response.json().await.map_err(|e| {
            AgroRankError::DataSourceUnavailable(format!(
                "Failed to parse Agmarknet response: {}",
                e
            ))
        })?;

        let signals = signals_from_records(&agm_response.records, candidates);
        tracing::debug!(
            records = agm_response.records.len(),
            signals = signals.len(),
            "Market prices fetched"
        );
        Ok(signals)
    }

    /// Test connection to the price resource
    pub async fn test_connection(&self) -> Result<bool> {
        let url = self.records_url(None)?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| AgroRankError::DataSourceUnavailable(format!("Agmarknet: {}", e)))?;

        Ok(response.status().is_success())
    }
}

#[async_trait]
impl MarketTrendProvider for AgmarknetClient {
    async fn fetch_signals(
        &self,
        location: &str,
        candidates: &[CandidateDefinition],
    ) -> Result<MarketSignals> {
        self.fetch_prices(location, candidates).await
    }
}

/// First comma segment, title-cased the way the resource spells districts.
fn district_filter(location: &str) -> Option<String> {
    let segment = location.split(',').next()?.trim();
    if segment.is_empty() {
        return None;
    }

    let words: Vec<String> = segment
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect();
    Some(words.join(" "))
}

/// Commodity names carry variety suffixes, e.g. "Bengal Gram(Gram)(Whole)".
fn commodity_key(commodity: &str) -> String {
    commodity
        .split('(')
        .next()
        .unwrap_or_default()
        .trim()
        .to_lowercase()
}

fn matches_candidate(key: &str, candidate: &CandidateDefinition) -> bool {
    key == candidate.id.replace('_', " ") || key == candidate.display_name.to_lowercase()
}

fn signals_from_records(
    records: &[AgmRecord],
    candidates: &[CandidateDefinition],
) -> MarketSignals {
    let mut signals = MarketSignals::new();

    for record in records {
        let Some(modal) = record.modal_price.filter(|p| *p > 0.0) else {
            continue;
        };
        let key = commodity_key(&record.commodity);
        let Some(candidate) = candidates.iter().find(|c| matches_candidate(&key, c)) else {
            continue;
        };
        if signals.contains_key(&candidate.id) {
            continue;
        }

        let baseline = candidate.msp_price.unwrap_or(candidate.reference_price);
        let signal = MarketSignal::new(
            candidate.id.clone(),
            TrendKind::from_prices(modal, candidate.reference_price),
            modal - baseline,
        );
        signals.insert(candidate.id.clone(), signal);
    }

    signals
}
