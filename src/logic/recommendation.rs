use super::catalog::{CandidateCatalog, CatalogHandle};
use super::location::LocationProfileResolver;
use super::rules::{ScoringContext, ScoringEngine};
use super::season::SeasonCalendar;
use crate::config::Config;
use crate::datasources::{MarketTrendProvider, WeatherOutlookProvider};
use crate::error::{AgroRankError, Result};
use crate::models::{
    CandidateDefinition, Coordinates, EnrichmentStatus, EnvironmentProfile, MarketSignals,
    RecommendationReport, Season, SeasonalOutlook,
};
use chrono::{Datelike, Local, NaiveDate};
use std::time::Duration;

const DEFAULT_TOP_N: usize = 8;
const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(4);
const MAX_LOCATION_LEN: usize = 200;

#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationRequest {
    pub location: String,
    pub coordinates: Option<Coordinates>,
    pub season_override: Option<Season>,
    pub top_n: usize,
    /// Date used for season and fallback outlook; today when unset.
    pub as_of: Option<NaiveDate>,
}

impl RecommendationRequest {
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            coordinates: None,
            season_override: None,
            top_n: DEFAULT_TOP_N,
            as_of: None,
        }
    }

    pub fn with_coordinates(mut self, latitude: f64, longitude: f64) -> Self {
        self.coordinates = Some(Coordinates::new(latitude, longitude));
        self
    }

    pub fn with_season(mut self, season: Season) -> Self {
        self.season_override = Some(season);
        self
    }

    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.as_of = Some(date);
        self
    }

    pub fn validate(&self) -> Result<()> {
        let location = self.location.trim();
        if location.is_empty() {
            return Err(AgroRankError::InvalidInput("location must not be empty".into()));
        }
        if location.chars().count() > MAX_LOCATION_LEN {
            return Err(AgroRankError::InvalidInput(format!(
                "location longer than {} characters",
                MAX_LOCATION_LEN
            )));
        }
        if let Some(coordinates) = self.coordinates {
            if !coordinates.is_valid() {
                return Err(AgroRankError::InvalidInput(format!(
                    "coordinates out of range: {}, {}",
                    coordinates.latitude, coordinates.longitude
                )));
            }
        }
        if self.top_n == 0 {
            return Err(AgroRankError::InvalidInput("top_n must be at least 1".into()));
        }
        Ok(())
    }
}

/// Orchestrates one recommendation request: profile and season resolution,
/// concurrent enrichment with fallbacks, then scoring.
///
/// Providers are optional. A missing provider behaves like one that always
/// fails, so the service works fully offline.
pub struct RecommendationService<W, M> {
    resolver: LocationProfileResolver,
    catalog: CatalogHandle,
    engine: ScoringEngine,
    weather: Option<W>,
    market: Option<M>,
    weather_timeout: Duration,
    market_timeout: Duration,
    adjust_irrigation: bool,
}

impl<W, M> RecommendationService<W, M>
where
    W: WeatherOutlookProvider,
    M: MarketTrendProvider,
{
    pub fn new(catalog: CandidateCatalog) -> Self {
        Self {
            resolver: LocationProfileResolver::new(),
            catalog: CatalogHandle::new(catalog),
            engine: ScoringEngine::new(),
            weather: None,
            market: None,
            weather_timeout: DEFAULT_FETCH_TIMEOUT,
            market_timeout: DEFAULT_FETCH_TIMEOUT,
            adjust_irrigation: true,
        }
    }

    pub fn from_config(
        config: &Config,
        catalog: CandidateCatalog,
        weather: Option<W>,
        market: Option<M>,
    ) -> Self {
        if weather.is_some() {
            tracing::info!("Weather outlook provider configured");
        } else {
            tracing::info!("Weather outlook disabled - using seasonal heuristic");
        }
        if market.is_some() {
            tracing::info!("Market price provider configured");
        } else {
            tracing::info!("Market prices disabled - market rules will not apply");
        }

        Self {
            weather,
            market,
            weather_timeout: Duration::from_secs(config.weather.timeout_secs),
            market_timeout: Duration::from_secs(config.market.timeout_secs),
            adjust_irrigation: config.recommendations.adjust_irrigation_from_soil_moisture,
            ..Self::new(catalog)
        }
    }

    pub fn with_weather(mut self, provider: W) -> Self {
        self.weather = Some(provider);
        self
    }

    pub fn with_market(mut self, provider: M) -> Self {
        self.market = Some(provider);
        self
    }

    pub fn with_timeouts(mut self, weather: Duration, market: Duration) -> Self {
        self.weather_timeout = weather;
        self.market_timeout = market;
        self
    }

    pub fn with_soil_moisture_adjustment(mut self, enabled: bool) -> Self {
        self.adjust_irrigation = enabled;
        self
    }

    pub fn catalog(&self) -> &CatalogHandle {
        &self.catalog
    }

    /// Rank candidates for the request. Only malformed input is an error;
    /// enrichment failures degrade to fallbacks and are reported through
    /// `EnrichmentStatus`.
    pub async fn get_recommendations(
        &self,
        request: &RecommendationRequest,
    ) -> Result<RecommendationReport> {
        request.validate()?;

        let today = request.as_of.unwrap_or_else(|| Local::now().date_naive());
        let profile = self.resolver.resolve(&request.location, request.coordinates);
        let season = request
            .season_override
            .unwrap_or_else(|| SeasonCalendar::resolve(today));
        let catalog = self.catalog.snapshot();
        let coordinates = profile
            .coordinates
            .unwrap_or(Coordinates::NATIONAL_CENTROID);

        let (live_outlook, live_market) = tokio::join!(
            self.live_outlook(coordinates),
            self.live_market(&request.location, catalog.candidates()),
        );

        let enrichment = EnrichmentStatus {
            weather: live_outlook.is_some(),
            market: live_market.is_some(),
        };
        let outlook =
            live_outlook.unwrap_or_else(|| SeasonalOutlook::seasonal_heuristic(today.month()));
        let market = live_market.unwrap_or_default();

        let scoring_profile = self.scoring_profile(&profile, &outlook);
        let ctx = ScoringContext::new(&scoring_profile, Some(&outlook), &market);

        let mut recommendations = self.engine.rank(&ctx, season, catalog.candidates());
        recommendations.truncate(request.top_n);

        if recommendations.is_empty() {
            tracing::info!(
                location = %request.location,
                season = %season,
                "No candidates survived scoring"
            );
        }

        Ok(RecommendationReport {
            location: request.location.trim().to_string(),
            region_id: profile.region_id.clone(),
            region_name: profile.region_name.clone(),
            granularity: profile.granularity,
            agro_zone: profile.agro_zone(),
            season,
            outlook,
            enrichment,
            recommendations,
        })
    }

    async fn live_outlook(&self, coordinates: Coordinates) -> Option<SeasonalOutlook> {
        let provider = self.weather.as_ref()?;

        let result = tokio::time::timeout(self.weather_timeout, provider.fetch_outlook(coordinates))
            .await
            .unwrap_or_else(|_| {
                Err(AgroRankError::Timeout(format!(
                    "weather outlook after {:?}",
                    self.weather_timeout
                )))
            });

        match result {
            Ok(outlook) => Some(outlook),
            Err(e) => {
                tracing::warn!("Weather outlook unavailable, using seasonal heuristic: {}", e);
                None
            }
        }
    }

    async fn live_market(
        &self,
        location: &str,
        candidates: &[CandidateDefinition],
    ) -> Option<MarketSignals> {
        let provider = self.market.as_ref()?;

        let result = tokio::time::timeout(
            self.market_timeout,
            provider.fetch_signals(location, candidates),
        )
        .await
        .unwrap_or_else(|_| {
            Err(AgroRankError::Timeout(format!(
                "market signals after {:?}",
                self.market_timeout
            )))
        });

        match result {
            Ok(signals) => Some(signals),
            Err(e) => {
                tracing::warn!("Market signals unavailable, scoring without them: {}", e);
                None
            }
        }
    }

    /// Live soil moisture overrides the static irrigation class.
    fn scoring_profile(
        &self,
        profile: &EnvironmentProfile,
        outlook: &SeasonalOutlook,
    ) -> EnvironmentProfile {
        match outlook.soil_moisture_fraction {
            Some(moisture) if self.adjust_irrigation && outlook.is_live() => {
                let adjusted = profile.with_observed_soil_moisture(moisture);
                if adjusted.irrigation_class != profile.irrigation_class {
                    tracing::debug!(
                        from = %profile.irrigation_class,
                        to = %adjusted.irrigation_class,
                        moisture,
                        "Irrigation class adjusted from soil moisture"
                    );
                }
                adjusted
            }
            _ => profile.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::fixtures::outlook;
    use crate::models::{
        Granularity, MarketSignal, OutlookSource, RiskKind, TrendKind, WaterRequirement,
    };
    use async_trait::async_trait;

    enum FakeWeather {
        Fixed(SeasonalOutlook),
        Failing,
        Slow,
    }

    #[async_trait]
    impl WeatherOutlookProvider for FakeWeather {
        async fn fetch_outlook(&self, _coordinates: Coordinates) -> Result<SeasonalOutlook> {
            match self {
                FakeWeather::Fixed(outlook) => Ok(outlook.clone()),
                FakeWeather::Failing => Err(AgroRankError::DataSourceUnavailable(
                    "weather down".into(),
                )),
                FakeWeather::Slow => {
                    tokio::time::sleep(Duration::from_secs(30)).await;
                    Ok(outlook(RiskKind::None))
                }
            }
        }
    }

    enum FakeMarket {
        Fixed(MarketSignals),
        Failing,
        Slow,
    }

    #[async_trait]
    impl MarketTrendProvider for FakeMarket {
        async fn fetch_signals(
            &self,
            _location: &str,
            _candidates: &[CandidateDefinition],
        ) -> Result<MarketSignals> {
            match self {
                FakeMarket::Fixed(signals) => Ok(signals.clone()),
                FakeMarket::Failing => {
                    Err(AgroRankError::DataSourceUnavailable("market down".into()))
                }
                FakeMarket::Slow => {
                    tokio::time::sleep(Duration::from_secs(30)).await;
                    Ok(MarketSignals::new())
                }
            }
        }
    }

    type TestService = RecommendationService<FakeWeather, FakeMarket>;

    fn offline_service() -> TestService {
        TestService::new(CandidateCatalog::builtin().unwrap())
    }

    fn november() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 11, 15).unwrap()
    }

    fn ids(report: &RecommendationReport) -> Vec<&str> {
        report
            .recommendations
            .iter()
            .map(|c| c.candidate_id.as_str())
            .collect()
    }

    #[tokio::test]
    async fn dry_region_prefers_drought_tolerant_crops() {
        let service = offline_service();
        let request = RecommendationRequest::new("Jaipur")
            .with_season(Season::Rabi)
            .with_date(november());

        let report = service.get_recommendations(&request).await.unwrap();

        assert_eq!(report.region_id, "rajasthan");
        assert_eq!(report.granularity, Granularity::Region);
        assert!(ids(&report).iter().take(3).any(|id| *id == "mustard"));
        assert!(!ids(&report).contains(&"wheat"));
        assert!(report
            .recommendations
            .iter()
            .all(|c| c.water_requirement != WaterRequirement::High));
    }

    #[tokio::test]
    async fn irrigated_district_ranks_wheat_high() {
        let service = offline_service();
        let request = RecommendationRequest::new("Ludhiana")
            .with_season(Season::Rabi)
            .with_date(november());

        let report = service.get_recommendations(&request).await.unwrap();
        assert_eq!(report.granularity, Granularity::District);

        let position = ids(&report).iter().position(|id| *id == "wheat").unwrap();
        assert!(position < 3);
        let wheat = &report.recommendations[position];
        assert!(wheat
            .reasons
            .iter()
            .any(|r| r == "Water requirement met"));
    }

    #[tokio::test]
    async fn failed_enrichment_still_ranks() {
        let service = offline_service()
            .with_weather(FakeWeather::Failing)
            .with_market(FakeMarket::Failing);
        let request = RecommendationRequest::new("Jaipur").with_date(november());

        let report = service.get_recommendations(&request).await.unwrap();

        assert!(!report.is_empty());
        assert_eq!(report.enrichment, EnrichmentStatus::default());
        assert_eq!(report.outlook.source, OutlookSource::SeasonalHeuristic);
        assert_eq!(report.outlook.risk_kind, RiskKind::ColdSnap);
        assert!(report
            .recommendations
            .iter()
            .all(|c| !c.factors.iter().any(|f| f.contains("Market"))));
    }

    #[tokio::test]
    async fn slow_enrichment_times_out_to_fallback() {
        let service = offline_service()
            .with_weather(FakeWeather::Slow)
            .with_market(FakeMarket::Slow)
            .with_timeouts(Duration::from_millis(50), Duration::from_millis(50));
        let request = RecommendationRequest::new("Ludhiana").with_date(november());

        let started = std::time::Instant::now();
        let report = service.get_recommendations(&request).await.unwrap();

        // Both fetches run concurrently under their own timeouts.
        assert!(started.elapsed() < Duration::from_secs(5));
        assert!(!report.enrichment.weather);
        assert!(!report.enrichment.market);
        assert!(!report.is_empty());
    }

    #[tokio::test]
    async fn live_enrichment_is_applied() {
        let mut signals = MarketSignals::new();
        signals.insert(
            "mustard".into(),
            MarketSignal::new("mustard", TrendKind::Up, 1200.0),
        );
        let service = offline_service()
            .with_weather(FakeWeather::Fixed(outlook(RiskKind::None)))
            .with_market(FakeMarket::Fixed(signals));
        let request = RecommendationRequest::new("Jaipur")
            .with_season(Season::Rabi)
            .with_date(november());

        let report = service.get_recommendations(&request).await.unwrap();

        assert!(report.enrichment.fully_enriched());
        assert_eq!(ids(&report)[0], "mustard");
        let mustard = &report.recommendations[0];
        // 60 + 20 soil + 25 drought + 15 trend + 10 margin + 5 outlook + 30 regional
        assert_eq!(mustard.score, 165.0);
        assert!(mustard.factors.iter().any(|f| f == "Market trending up"));
    }

    #[tokio::test]
    async fn heavy_rain_outlook_vetoes_dry_crops() {
        let service =
            offline_service().with_weather(FakeWeather::Fixed(outlook(RiskKind::HighRainfall)));
        let request = RecommendationRequest::new("Jaipur")
            .with_season(Season::Rabi)
            .with_date(november());

        let report = service.get_recommendations(&request).await.unwrap();

        // Every low-water rabi crop is vetoed despite regional bonuses.
        assert!(!ids(&report).contains(&"mustard"));
        assert!(!ids(&report).contains(&"gram"));
    }

    #[tokio::test]
    async fn wet_soil_upgrades_irrigation() {
        let wet = SeasonalOutlook::from_forecast(25.0, 10.0, Some(0.4));
        let service = offline_service().with_weather(FakeWeather::Fixed(wet.clone()));
        let request = RecommendationRequest::new("Jaipur")
            .with_season(Season::Rabi)
            .with_date(november());

        let report = service.get_recommendations(&request).await.unwrap();
        assert!(ids(&report).contains(&"wheat"));

        let unadjusted = offline_service()
            .with_weather(FakeWeather::Fixed(wet))
            .with_soil_moisture_adjustment(false);
        let report = unadjusted.get_recommendations(&request).await.unwrap();
        assert!(!ids(&report).contains(&"wheat"));
    }

    #[tokio::test]
    async fn unknown_location_uses_default_profile() {
        let service = offline_service();
        let request = RecommendationRequest::new("Atlantis")
            .with_season(Season::Kharif)
            .with_date(november());

        let report = service.get_recommendations(&request).await.unwrap();
        assert_eq!(report.granularity, Granularity::Default);
        assert!(!report.is_empty());
    }

    #[tokio::test]
    async fn season_follows_calendar_without_override() {
        let service = offline_service();
        let request = RecommendationRequest::new("Ludhiana")
            .with_date(NaiveDate::from_ymd_opt(2024, 7, 10).unwrap());

        let report = service.get_recommendations(&request).await.unwrap();
        assert_eq!(report.season, Season::Kharif);
        assert_eq!(report.outlook.risk_kind, RiskKind::HighRainfall);
    }

    #[tokio::test]
    async fn top_n_limits_results() {
        let service = offline_service();
        let request = RecommendationRequest::new("Ludhiana")
            .with_season(Season::Rabi)
            .with_date(november())
            .with_top_n(2);

        let report = service.get_recommendations(&request).await.unwrap();
        assert_eq!(report.recommendations.len(), 2);
        assert_eq!(ids(&report), vec!["sugarcane", "wheat"]);
    }

    #[tokio::test]
    async fn identical_requests_give_identical_reports() {
        let service = offline_service();
        let request = RecommendationRequest::new("Ludhiana, Punjab")
            .with_season(Season::Rabi)
            .with_date(november());

        let first = service.get_recommendations(&request).await.unwrap();
        let second = service.get_recommendations(&request).await.unwrap();
        assert_eq!(first.recommendations, second.recommendations);
    }

    #[tokio::test]
    async fn catalog_swap_affects_later_requests() {
        let service = offline_service();
        let request = RecommendationRequest::new("Jaipur")
            .with_season(Season::Rabi)
            .with_date(november());

        let only_barley: Vec<CandidateDefinition> = CandidateCatalog::builtin()
            .unwrap()
            .candidates()
            .iter()
            .filter(|c| c.id == "barley")
            .cloned()
            .collect();
        service
            .catalog()
            .replace(CandidateCatalog::new(only_barley).unwrap());

        let report = service.get_recommendations(&request).await.unwrap();
        assert_eq!(ids(&report), vec!["barley"]);
    }

    #[tokio::test]
    async fn all_candidates_vetoed_gives_empty_report() {
        let service =
            offline_service().with_weather(FakeWeather::Fixed(outlook(RiskKind::Heatwave)));
        let thirsty: Vec<CandidateDefinition> = CandidateCatalog::builtin()
            .unwrap()
            .candidates()
            .iter()
            .filter(|c| c.water_requirement == WaterRequirement::High)
            .cloned()
            .collect();
        assert!(thirsty.iter().any(|c| c.is_in_season(Season::Rabi)));
        service
            .catalog()
            .replace(CandidateCatalog::new(thirsty).unwrap());

        let request = RecommendationRequest::new("Jaipur")
            .with_season(Season::Rabi)
            .with_date(november());
        let report = service.get_recommendations(&request).await.unwrap();

        assert!(report.is_empty());
        assert!(report.enrichment.weather);
        assert!(!report.enrichment.market);
        assert_eq!(report.outlook.risk_kind, RiskKind::Heatwave);
        assert_eq!(report.region_id, "rajasthan");
    }

    #[tokio::test]
    async fn long_non_ascii_location_accepted() {
        let service = offline_service();
        let location = "ग्राम पंचायत रामपुरा, तहसील सांगानेर, ".repeat(4);
        assert!(location.len() > MAX_LOCATION_LEN);
        assert!(location.chars().count() <= MAX_LOCATION_LEN);

        let request = RecommendationRequest::new(location)
            .with_season(Season::Rabi)
            .with_date(november());
        let report = service.get_recommendations(&request).await.unwrap();
        assert_eq!(report.granularity, Granularity::Default);

        let too_long = RecommendationRequest::new("ग".repeat(MAX_LOCATION_LEN + 1));
        assert!(matches!(
            too_long.validate(),
            Err(AgroRankError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn malformed_input_rejected() {
        let service = offline_service();

        for request in [
            RecommendationRequest::new("   "),
            RecommendationRequest::new("Jaipur").with_top_n(0),
            RecommendationRequest::new("Jaipur").with_coordinates(f64::NAN, 75.0),
            RecommendationRequest::new("Jaipur").with_coordinates(95.0, 75.0),
        ] {
            let err = service.get_recommendations(&request).await.unwrap_err();
            assert!(matches!(err, AgroRankError::InvalidInput(_)));
        }
    }

    #[tokio::test]
    async fn report_serializes_to_json() {
        let service = offline_service();
        let request = RecommendationRequest::new("Ludhiana")
            .with_season(Season::Rabi)
            .with_date(november());

        let report = service.get_recommendations(&request).await.unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["season"], "rabi");
        assert_eq!(json["region_id"], "punjab");
        assert!(!json["recommendations"].as_array().unwrap().is_empty());
    }
}
