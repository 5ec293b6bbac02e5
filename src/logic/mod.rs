pub mod catalog;
pub mod location;
pub mod recommendation;
pub mod rules;
pub mod season;

#[cfg(test)]
pub(crate) mod fixtures;

pub use catalog::{CandidateCatalog, CatalogHandle};
pub use location::LocationProfileResolver;
pub use recommendation::{RecommendationRequest, RecommendationService};
pub use rules::{ScoringContext, ScoringEngine};
pub use season::SeasonCalendar;
