pub mod agmarknet;
pub mod openmeteo;

pub use agmarknet::AgmarknetClient;
pub use openmeteo::OpenMeteoClient;

use crate::error::Result;
use crate::models::{CandidateDefinition, Coordinates, MarketSignals, SeasonalOutlook};
use async_trait::async_trait;

/// Source of short-range weather risk for a point.
#[async_trait]
pub trait WeatherOutlookProvider: Send + Sync {
    async fn fetch_outlook(&self, coordinates: Coordinates) -> Result<SeasonalOutlook>;
}

/// Source of mandi price signals. Candidates without a quote are simply
/// absent from the returned map.
#[async_trait]
pub trait MarketTrendProvider: Send + Sync {
    async fn fetch_signals(
        &self,
        location: &str,
        candidates: &[CandidateDefinition],
    ) -> Result<MarketSignals>;
}
