//! Plans minimal-movement trips with an LLM and turns the tagged itinerary
//! text it returns into a structured, editable plan.
//!
//! ```
//! use lazy_wander::{parse_itinerary, GrammarVersion, GroundingLink};
//!
//! let text = "[TITLE] Test Trip\n[STARS] 4\n[DAY 1]\n[PLACE] Cafe A\n[DESC] Nice view";
//! let links = vec![GroundingLink::new("Cafe A", "https://maps/a")];
//! let itinerary = parse_itinerary(text, &links, GrammarVersion::Extended);
//!
//! assert_eq!(itinerary.title, "Test Trip");
//! assert_eq!(itinerary.days[0].activities[0].desc, "Nice view");
//! ```

pub mod builder;
pub mod config;
pub mod edit;
pub mod error;
pub mod grammar;
pub mod model;
pub mod parser;
pub mod planner;
pub mod providers;
pub mod request;
pub mod stats;
pub mod storage;

pub use builder::{ProviderKind, TravelPlannerBuilder};
pub use config::AppConfig;
pub use error::{EditError, PlannerError, ProviderError, StorageError};
pub use grammar::GrammarVersion;
pub use model::{
    Activity, ActivityId, Coordinates, Day, ExtendedMetrics, GroundingLink, Metrics,
    ParsedItinerary, RawModelResponse,
};
pub use parser::{parse_itinerary, parse_response};
pub use planner::{TravelPlan, TravelPlanner};
pub use request::TravelRequest;
pub use stats::recompute_derived_stats;
pub use storage::{SavedTravel, SavedTravelStore};

/// Plan a trip with the provider and grammar from `lazy-wander.toml` and the
/// environment.
pub async fn plan_trip(request: &TravelRequest) -> Result<TravelPlan, PlannerError> {
    let config = AppConfig::load()?;
    TravelPlanner::from_config(config)?.plan(request).await
}
