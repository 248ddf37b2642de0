use crate::model::{Metrics, ParsedItinerary};
use log::debug;

/// Rescale step and movement counts after activities were added or removed.
///
/// The model reports steps and movements for the plan it wrote. After edits
/// these are scaled linearly by the ratio of the current activity count to
/// the count they were computed for. This is an estimate, not a route
/// simulation. Stars and the indoor share are left alone, as are lazy-score
/// itineraries and itineraries whose basis is zero.
pub fn recompute_derived_stats(itinerary: &ParsedItinerary) -> ParsedItinerary {
    let mut updated = itinerary.clone();
    let current = itinerary.activity_count();

    if let Metrics::Extended(ref mut metrics) = updated.metrics {
        let basis = metrics.basis_activities;
        if basis == 0 || current == basis {
            return updated;
        }

        let ratio = current as f64 / basis as f64;
        metrics.steps = (metrics.steps as f64 * ratio).round() as u32;
        metrics.movements = (metrics.movements as f64 * ratio).round() as u32;
        metrics.basis_activities = current;

        debug!(
            "Rescaled stats from {} to {} activities: {} steps, {} movements",
            basis, current, metrics.steps, metrics.movements
        );
    }

    updated
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::GrammarVersion;
    use crate::parser::parse_itinerary;

    const TEXT: &str = "[STARS] 4\n[STEPS] 6000\n[MOVEMENTS] 4\n[INDOOR] 80\n\
                        [DAY 1]\n[PLACE] Cafe A\n[PLACE] Museum B\n[PLACE] Mall C\n[PLACE] Hotel D\n";

    fn extended(itinerary: &ParsedItinerary) -> crate::model::ExtendedMetrics {
        match itinerary.metrics {
            Metrics::Extended(m) => m,
            other => panic!("Expected extended metrics, got {:?}", other),
        }
    }

    #[test]
    fn test_unchanged_when_nothing_edited() {
        let itinerary = parse_itinerary(TEXT, &[], GrammarVersion::Extended);
        assert_eq!(recompute_derived_stats(&itinerary), itinerary);
    }

    #[test]
    fn test_scales_down_after_removal() {
        let mut itinerary = parse_itinerary(TEXT, &[], GrammarVersion::Extended);
        itinerary.days[0].activities.truncate(2);

        let updated = recompute_derived_stats(&itinerary);
        let m = extended(&updated);
        assert_eq!(m.steps, 3000);
        assert_eq!(m.movements, 2);
        assert_eq!(m.basis_activities, 2);
        assert_eq!(m.stars, 4);
        assert_eq!(m.indoor, 80);
    }

    #[test]
    fn test_scales_up_and_rounds() {
        let mut itinerary = parse_itinerary(TEXT, &[], GrammarVersion::Extended);
        let extra = itinerary.days[0].activities[0].clone();
        itinerary.days[0].activities.push(extra);

        let m = extended(&recompute_derived_stats(&itinerary));
        assert_eq!(m.steps, 7500);
        assert_eq!(m.movements, 5);
        assert_eq!(m.basis_activities, 5);
    }

    #[test]
    fn test_repeated_recompute_is_stable() {
        let mut itinerary = parse_itinerary(TEXT, &[], GrammarVersion::Extended);
        itinerary.days[0].activities.pop();
        let once = recompute_derived_stats(&itinerary);
        assert_eq!(recompute_derived_stats(&once), once);
    }

    #[test]
    fn test_lazy_metrics_untouched() {
        let text = "[DIFFICULTY] 90\n[DAY 1]\n[PLACE] Cafe A\n[PLACE] Museum B\n";
        let mut itinerary = parse_itinerary(text, &[], GrammarVersion::Lazy);
        itinerary.days[0].activities.pop();
        let updated = recompute_derived_stats(&itinerary);
        assert_eq!(updated.metrics, Metrics::Lazy { difficulty: 90 });
    }

    #[test]
    fn test_zero_basis_untouched() {
        let mut itinerary = parse_itinerary("[STEPS] 100", &[], GrammarVersion::Extended);
        let source = parse_itinerary("[DAY 1]\n[PLACE] Cafe A\n", &[], GrammarVersion::Extended);
        itinerary.days = source.days;
        assert_eq!(extended(&recompute_derived_stats(&itinerary)).steps, 100);
    }
}
