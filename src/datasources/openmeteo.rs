use super::WeatherOutlookProvider;
use crate::config::WeatherConfig;
use crate::error::{AgroRankError, Result};
use crate::models::{Coordinates, SeasonalOutlook};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

pub struct OpenMeteoClient {
    client: reqwest::Client,
    config: WeatherConfig,
}

// Open-Meteo API response structures. Series entries are null for hours the
// model has not produced yet.
#[derive(Debug, Deserialize)]
struct OmForecastResponse {
    #[serde(default)]
    daily: Option<OmDaily>,
    #[serde(default)]
    hourly: Option<OmHourly>,
}

#[derive(Debug, Deserialize)]
struct OmDaily {
    #[serde(default)]
    temperature_2m_max: Vec<Option<f64>>,
    #[serde(default)]
    precipitation_sum: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
struct OmHourly {
    #[serde(default)]
    soil_moisture_0_to_1cm: Vec<Option<f64>>,
}

impl OpenMeteoClient {
    pub fn new(config: WeatherConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client, config })
    }

    fn forecast_url(&self, coordinates: Coordinates) -> String {
        format!(
            "{}?latitude={:.4}&longitude={:.4}&daily=temperature_2m_max,precipitation_sum&hourly=soil_moisture_0_to_1cm&timezone=auto&forecast_days={}",
            self.config.base_url,
            coordinates.latitude,
            coordinates.longitude,
            self.config.forecast_days
        )
    }

    /// Fetch the forecast window and classify it into a risk outlook.
    pub async fn fetch_forecast(&self, coordinates: Coordinates) -> Result<SeasonalOutlook> {
        let url = self.forecast_url(coordinates);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AgroRankError::DataSourceUnavailable(format!("Open-Meteo: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AgroRankError::DataSourceUnavailable(format!(
                "Open-Meteo returned {}: {}",
                status, body
            )));
        }

        let om_response: OmForecastResponse = response.json().await.map_err(|e| {
            AgroRankError::DataSourceUnavailable(format!(
                "Failed to parse Open-Meteo response: {}",
                e
            ))
        })?;

        let outlook = convert_response(om_response)?;
        tracing::debug!(
            risk = %outlook.risk_kind,
            lat = coordinates.latitude,
            lon = coordinates.longitude,
            "Weather outlook fetched"
        );
        Ok(outlook)
    }

    /// Test connection to the Open-Meteo API
    pub async fn test_connection(&self) -> Result<bool> {
        let url = self.forecast_url(Coordinates::NATIONAL_CENTROID);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AgroRankError::DataSourceUnavailable(format!("Open-Meteo: {}", e)))?;

        Ok(response.status().is_success())
    }
}

#[async_trait]
impl WeatherOutlookProvider for OpenMeteoClient {
    async fn fetch_outlook(&self, coordinates: Coordinates) -> Result<SeasonalOutlook> {
        self.fetch_forecast(coordinates).await
    }
}

fn convert_response(response: OmForecastResponse) -> Result<SeasonalOutlook> {
    let daily = response
        .daily
        .ok_or_else(|| AgroRankError::InvalidData("Open-Meteo response has no daily data".into()))?;

    let max_temps: Vec<f64> = daily.temperature_2m_max.into_iter().flatten().collect();
    if max_temps.is_empty() {
        return Err(AgroRankError::InvalidData(
            "Open-Meteo response has no temperature data".into(),
        ));
    }
    let mean_max_temp = max_temps.iter().sum::<f64>() / max_temps.len() as f64;

    let cumulative_rain: f64 = daily.precipitation_sum.into_iter().flatten().sum();

    // Current topsoil reading is the first non-null hour.
    let soil_moisture = response
        .hourly
        .and_then(|h| h.soil_moisture_0_to_1cm.into_iter().flatten().next());

    Ok(SeasonalOutlook::from_forecast(
        mean_max_temp,
        cumulative_rain,
        soil_moisture,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{OutlookSource, RiskKind};

    fn parse(json: &str) -> Result<SeasonalOutlook> {
        let response: OmForecastResponse = serde_json::from_str(json).unwrap();
        convert_response(response)
    }

    #[test]
    fn client_creation() {
        let client = OpenMeteoClient::new(WeatherConfig::default()).unwrap();
        let url = client.forecast_url(Coordinates::new(30.901, 75.8573));
        assert!(url.contains("latitude=30.9010"));
        assert!(url.contains("forecast_days=7"));
        assert!(url.contains("soil_moisture_0_to_1cm"));
    }

    #[test]
    fn monsoon_week_is_high_rainfall() {
        let outlook = parse(
            r#"{
                "daily": {
                    "time": ["2024-07-01", "2024-07-02", "2024-07-03"],
                    "temperature_2m_max": [31.2, 30.8, 29.9],
                    "precipitation_sum": [22.5, 40.1, 12.0]
                },
                "hourly": {"soil_moisture_0_to_1cm": [0.41, 0.42]}
            }"#,
        )
        .unwrap();

        assert_eq!(outlook.risk_kind, RiskKind::HighRainfall);
        assert_eq!(outlook.source, OutlookSource::Live);
        assert_eq!(outlook.soil_moisture_fraction, Some(0.41));
        assert!((outlook.cumulative_rainfall_mm.unwrap() - 74.6).abs() < 1e-9);
    }

    #[test]
    fn hot_dry_week_with_nulls() {
        let outlook = parse(
            r#"{
                "daily": {
                    "temperature_2m_max": [43.0, 44.0, null],
                    "precipitation_sum": [0.0, null, 0.0]
                },
                "hourly": {"soil_moisture_0_to_1cm": [null, 0.2]}
            }"#,
        )
        .unwrap();

        assert_eq!(outlook.risk_kind, RiskKind::Heatwave);
        assert_eq!(outlook.max_temperature, Some(43.5));
        assert_eq!(outlook.soil_moisture_fraction, Some(0.2));
    }

    #[test]
    fn missing_soil_series_never_signals_drought() {
        let outlook = parse(
            r#"{"daily": {"temperature_2m_max": [35.0], "precipitation_sum": [0.0]}}"#,
        )
        .unwrap();

        assert_eq!(outlook.risk_kind, RiskKind::None);
        assert!(outlook.soil_moisture_fraction.is_none());
    }

    #[test]
    fn empty_response_is_an_error() {
        assert!(matches!(parse("{}"), Err(AgroRankError::InvalidData(_))));
        assert!(matches!(
            parse(r#"{"daily": {"temperature_2m_max": [null]}}"#),
            Err(AgroRankError::InvalidData(_))
        ));
    }
}
