use crate::grammar::GrammarVersion;
use crate::providers::PromptRequest;
use crate::request::TravelRequest;
use std::fmt::Write;

/// Persona and routing rules shared by every request.
///
/// The text is loaded from `prompt.txt` at compile time so it can be edited
/// without dealing with Rust string syntax.
pub const GUIDE_PERSONA_PROMPT: &str = include_str!("prompt.txt");

/// Build the system instruction for a request.
pub fn build_system_instruction(request: &TravelRequest, grammar: GrammarVersion) -> String {
    let mut out = String::from(GUIDE_PERSONA_PROMPT);

    let _ = writeln!(
        out,
        "\nUser laziness: {} (level {} of 5)",
        request.laziness_label(),
        request.laziness()
    );

    out.push_str("\nHard constraints:\n");
    let _ = writeln!(out, "- Party: {}", request.participants.label());
    let _ = writeln!(out, "- Schedule: {}", request.duration.label());
    let _ = writeln!(
        out,
        "- Budget: {} (covers the whole schedule, food and admission)",
        request.budget.label()
    );
    if request.include_food {
        out.push_str(
            "- Food: slot the most famous, proven restaurants of the area into the middle of the day.\n",
        );
    } else {
        out.push_str(
            "- Food: a quick bite is preferred, so mention well-placed cafes or convenience stores instead of restaurants.\n",
        );
    }
    let _ = writeln!(out, "- Transport: {}", request.transport.label());
    if request.is_public_transport() {
        out.push_str(
            "- Public transport mode: only recommend places within a 5 minute (300 m) walk of a subway exit. Name the station and exit number.\n",
        );
    } else {
        out.push_str(
            "- Car mode: prefer places with very convenient parking or valet service.\n",
        );
    }

    out.push_str("\nAnswer strictly in the following marker format:\n");
    out.push_str(&format_instructions(request, grammar));
    out
}

fn format_instructions(request: &TravelRequest, grammar: GrammarVersion) -> String {
    let tip = if request.is_public_transport() {
        "the route from the nearest station or stop with the least walking"
    } else {
        "where to park, or a valet tip"
    };

    let mut out = String::from("[TITLE] trip title\n");
    match grammar {
        GrammarVersion::Lazy => {
            out.push_str("[DIFFICULTY] 1-100 (laziness score: higher means less movement)\n");
        }
        GrammarVersion::Extended => {
            out.push_str("[STARS] 1-5 (laziness stars: more stars means less movement)\n");
            out.push_str("[STEPS] estimated total steps\n");
            out.push_str("[MOVEMENTS] number of moves between places\n");
            out.push_str("[INDOOR] share of indoor time in percent (0-100)\n");
        }
    }
    out.push_str("[COMMENT] a one-line verdict on the whole trip\n\n");
    out.push_str("[DAY 1]\n[PLACE] place name\n");
    if grammar == GrammarVersion::Extended {
        out.push_str("[LATLNG] latitude, longitude\n");
    }
    out.push_str("[DESC] why this place suits a lazy person\n");
    let _ = writeln!(out, "[TIP] {}", tip);
    if grammar == GrammarVersion::Lazy {
        out.push_str("[PHOTO] 1-5 (photo spot score)\n");
    }
    out.push_str("\n[PLACE] ... (repeat for the next place)\n");
    out
}

/// Build the user prompt restating the preferences.
pub fn build_user_prompt(request: &TravelRequest) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Region: {}", request.region.label());
    let _ = writeln!(out, "Party: {}", request.participants.label());
    let _ = writeln!(out, "Schedule: {}", request.duration.label());
    let _ = writeln!(out, "Style: {}", request.style.label());
    let _ = writeln!(out, "Budget: {}", request.budget.label());
    let _ = writeln!(out, "Transport: {}", request.transport.label());
    let _ = writeln!(
        out,
        "Include restaurants: {}",
        if request.include_food { "yes" } else { "no" }
    );
    let _ = writeln!(out, "Laziness: {}", request.laziness_label());
    if let Some(location) = request.location {
        let _ = writeln!(
            out,
            "Current location: latitude {}, longitude {}",
            location.latitude, location.longitude
        );
    }
    out.push_str("\nPlan the shortest possible route through real places that fits these conditions.");
    out
}

/// Everything a provider needs for one generation call.
pub fn build_prompt_request(request: &TravelRequest, grammar: GrammarVersion) -> PromptRequest {
    PromptRequest {
        system_instruction: build_system_instruction(request, grammar),
        prompt: build_user_prompt(request),
        location: request.location,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::{LatLng, TransportMode};

    #[test]
    fn test_prompt_is_embedded() {
        assert!(!GUIDE_PERSONA_PROMPT.is_empty());
        assert!(GUIDE_PERSONA_PROMPT.contains("Google Maps"));
    }

    #[test]
    fn test_system_instruction_follows_grammar() {
        let request = TravelRequest::default();

        let extended = build_system_instruction(&request, GrammarVersion::Extended);
        assert!(extended.contains("[STARS]"));
        assert!(extended.contains("[LATLNG]"));
        assert!(!extended.contains("[DIFFICULTY]"));
        assert!(!extended.contains("[PHOTO]"));

        let lazy = build_system_instruction(&request, GrammarVersion::Lazy);
        assert!(lazy.contains("[DIFFICULTY]"));
        assert!(lazy.contains("[PHOTO]"));
        assert!(!lazy.contains("[STEPS]"));
    }

    #[test]
    fn test_system_instruction_transport_rules() {
        let public = build_system_instruction(&TravelRequest::default(), GrammarVersion::Lazy);
        assert!(public.contains("subway exit"));

        let car = TravelRequest {
            transport: TransportMode::Car,
            ..Default::default()
        };
        let car_prompt = build_system_instruction(&car, GrammarVersion::Lazy);
        assert!(car_prompt.contains("valet"));
        assert!(!car_prompt.contains("subway exit"));
    }

    #[test]
    fn test_user_prompt_location() {
        let request = TravelRequest::default();
        assert!(!build_user_prompt(&request).contains("Current location"));

        let located = TravelRequest {
            location: Some(LatLng {
                latitude: 37.5,
                longitude: 127.0,
            }),
            ..Default::default()
        };
        let prompt = build_prompt_request(&located, GrammarVersion::Extended);
        assert!(prompt.prompt.contains("latitude 37.5, longitude 127"));
        assert_eq!(prompt.location, located.location);
    }
}
