use crate::config::AppConfig;
use crate::error::PlannerError;
use crate::grammar::GrammarVersion;
use crate::model::{ParsedItinerary, RawModelResponse};
use crate::parser::parse_response;
use crate::providers::{build_prompt_request, ItineraryProvider};
use crate::request::TravelRequest;
use log::{info, warn};
use tokio::sync::watch;

/// A generated plan: the raw response and the itinerary parsed from it.
#[derive(Debug, Clone)]
pub struct TravelPlan {
    pub raw: RawModelResponse,
    pub itinerary: ParsedItinerary,
    pub grammar: GrammarVersion,
}

/// Hands out increasing request sequence numbers.
///
/// Issuing a new ticket makes every older ticket stale; holders of a stale
/// ticket are woken so they can abandon their request.
#[derive(Debug)]
pub struct RequestTracker {
    latest: watch::Sender<u64>,
}

#[derive(Debug)]
pub struct RequestTicket {
    pub sequence: u64,
    receiver: watch::Receiver<u64>,
}

impl RequestTracker {
    pub fn new() -> Self {
        let (latest, _) = watch::channel(0);
        RequestTracker { latest }
    }

    pub fn issue(&self) -> RequestTicket {
        let mut sequence = 0;
        self.latest.send_modify(|latest| {
            *latest += 1;
            sequence = *latest;
        });
        RequestTicket {
            sequence,
            receiver: self.latest.subscribe(),
        }
    }

    pub fn is_current(&self, sequence: u64) -> bool {
        *self.latest.borrow() == sequence
    }
}

impl Default for RequestTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestTicket {
    /// Resolves once a newer ticket has been issued.
    pub async fn superseded(&mut self) {
        loop {
            if self.receiver.changed().await.is_err() {
                // Tracker gone; nothing can supersede us any more
                std::future::pending::<()>().await;
            }
            if *self.receiver.borrow() != self.sequence {
                return;
            }
        }
    }
}

/// Turns travel requests into parsed itineraries.
pub struct TravelPlanner {
    provider: Box<dyn ItineraryProvider>,
    grammar: GrammarVersion,
    tracker: RequestTracker,
}

impl TravelPlanner {
    pub fn new(provider: Box<dyn ItineraryProvider>, grammar: GrammarVersion) -> Self {
        TravelPlanner {
            provider,
            grammar,
            tracker: RequestTracker::new(),
        }
    }

    /// Creates a new builder for configuring a planner
    pub fn builder() -> crate::builder::TravelPlannerBuilder {
        crate::builder::TravelPlannerBuilder::default()
    }

    /// Planner for the configured default provider
    pub fn from_config(config: AppConfig) -> Result<Self, PlannerError> {
        Self::builder().config(config).build()
    }

    pub fn grammar(&self) -> GrammarVersion {
        self.grammar
    }

    pub fn provider_name(&self) -> &str {
        self.provider.provider_name()
    }

    /// Generate and parse an itinerary.
    ///
    /// Starting another `plan` call on the same planner cancels this one,
    /// which then returns [`PlannerError::Superseded`]; a response that
    /// arrives for a stale request is discarded the same way.
    pub async fn plan(&self, request: &TravelRequest) -> Result<TravelPlan, PlannerError> {
        let mut ticket = self.tracker.issue();
        let sequence = ticket.sequence;
        let prompt = build_prompt_request(request, self.grammar);

        info!(
            "Request #{}: planning {} with {} ({} grammar)",
            sequence,
            request.region.as_str(),
            self.provider.provider_name(),
            self.grammar
        );

        let raw = tokio::select! {
            result = self.provider.generate(&prompt) => result?,
            _ = ticket.superseded() => {
                warn!("Request #{} cancelled by a newer request", sequence);
                return Err(PlannerError::Superseded { sequence });
            }
        };

        if !self.tracker.is_current(sequence) {
            warn!("Discarding stale response for request #{}", sequence);
            return Err(PlannerError::Superseded { sequence });
        }

        let foreign = self.grammar.foreign_tags(&raw.text);
        if !foreign.is_empty() {
            warn!(
                "Response uses tags outside the {} grammar ({}); defaults will be used",
                self.grammar,
                foreign.join(", ")
            );
        }

        let itinerary = parse_response(&raw, self.grammar);
        Ok(TravelPlan {
            raw,
            itinerary,
            grammar: self.grammar,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracker_sequences() {
        let tracker = RequestTracker::new();
        let first = tracker.issue();
        assert_eq!(first.sequence, 1);
        assert!(tracker.is_current(1));

        let second = tracker.issue();
        assert_eq!(second.sequence, 2);
        assert!(!tracker.is_current(first.sequence));
        assert!(tracker.is_current(second.sequence));
    }

    #[tokio::test]
    async fn test_ticket_woken_by_newer_request() {
        let tracker = RequestTracker::new();
        let mut first = tracker.issue();
        let _second = tracker.issue();
        // Resolves immediately because a newer ticket exists
        first.superseded().await;
    }
}
