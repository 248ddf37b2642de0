//! Parser for the tagged itinerary text produced by the model.
//!
//! The model is asked to answer in a line-oriented tag format:
//!
//! ```text
//! [TITLE] Two days glued to Seoul Station
//! [STARS] 4
//! [COMMENT] You will barely notice you left the house.
//! [DAY 1]
//! [PLACE] Cafe A
//! [LATLNG] 37.55, 126.97
//! [DESC] Nice view
//! [TIP] Sit by the window
//! ```
//!
//! Parsing never fails. Missing or malformed tags fall back to defaults, and
//! place blocks without a usable name are dropped along with days that end up
//! empty.

mod links;
mod sanitize;

pub use links::resolve_map_link;
pub use sanitize::sanitize;

use crate::grammar::GrammarVersion;
use crate::model::{
    Activity, ActivityId, Coordinates, Day, ExtendedMetrics, GroundingLink, Metrics,
    ParsedItinerary, RawModelResponse,
};
use log::debug;
use regex::Regex;
use std::sync::LazyLock;

pub const DEFAULT_TITLE: &str = "Untitled Journey";
pub const DEFAULT_COMMENT: &str = "A hassle, but this one is worth getting off the couch for.";
pub const DEFAULT_DIFFICULTY: u8 = 80;
pub const DEFAULT_STARS: u8 = 5;
pub const DEFAULT_STEPS: u32 = 4000;
pub const DEFAULT_MOVEMENTS: u32 = 3;
pub const DEFAULT_INDOOR: u8 = 70;
pub const DEFAULT_PHOTO: u8 = 3;

/// Place names shorter than this (in characters) are treated as noise.
const MIN_NAME_CHARS: usize = 2;

const PLACE_MARKER: &str = "[PLACE]";

macro_rules! tag_regex {
    ($name:ident, $pattern:expr) => {
        static $name: LazyLock<Regex> =
            LazyLock::new(|| Regex::new($pattern).expect("valid regex"));
    };
}

tag_regex!(TITLE, r"\[TITLE\]\s*(.*)");
tag_regex!(COMMENT, r"\[COMMENT\]\s*(.*)");
tag_regex!(DIFFICULTY, r"\[DIFFICULTY\]\s*(\d+)");
tag_regex!(STARS, r"\[STARS\]\s*(\d+)");
tag_regex!(STEPS, r"\[STEPS\]\s*(\d+)");
tag_regex!(MOVEMENTS, r"\[MOVEMENTS\]\s*(\d+)");
tag_regex!(INDOOR, r"\[INDOOR\]\s*(\d+)");
tag_regex!(PHOTO, r"\[PHOTO\]\s*(\d+)");
tag_regex!(LATLNG, r"\[LATLNG\]\s*([\d.-]+)\s*,\s*([\d.-]+)");
tag_regex!(DAY_HEADER, r"\[DAY\s*(\d+)\]");
tag_regex!(BRACKETED, r"\[.*\]");

/// Parse a model response against the given grammar.
pub fn parse_response(response: &RawModelResponse, grammar: GrammarVersion) -> ParsedItinerary {
    parse_itinerary(&response.text, &response.links, grammar)
}

/// Turn tagged model text into an itinerary, matching places against `links`.
pub fn parse_itinerary(
    text: &str,
    links: &[GroundingLink],
    grammar: GrammarVersion,
) -> ParsedItinerary {
    let clean = sanitize(text);

    let title = line_value(&TITLE, &clean).unwrap_or_else(|| DEFAULT_TITLE.to_string());
    let comment = line_value(&COMMENT, &clean).unwrap_or_else(|| DEFAULT_COMMENT.to_string());

    let days: Vec<Day> = split_days(&clean)
        .into_iter()
        .filter_map(|(day, content)| {
            let activities: Vec<Activity> = place_blocks(content)
                .filter_map(|block| parse_place(block, links, grammar))
                .collect();

            if activities.is_empty() {
                debug!("Dropping day {} with no usable places", day);
                None
            } else {
                Some(Day {
                    day: day.to_string(),
                    activities,
                })
            }
        })
        .collect();

    let activity_total = days.iter().map(|d| d.activities.len()).sum();
    let metrics = parse_metrics(&clean, grammar, activity_total);

    debug!(
        "Parsed '{}' ({} grammar): {} days, {} activities",
        title,
        grammar,
        days.len(),
        activity_total
    );

    ParsedItinerary {
        title,
        metrics,
        comment,
        days,
    }
}

fn parse_metrics(text: &str, grammar: GrammarVersion, activity_total: usize) -> Metrics {
    match grammar {
        GrammarVersion::Lazy => Metrics::Lazy {
            difficulty: number(&DIFFICULTY, text, DEFAULT_DIFFICULTY as u32).min(100) as u8,
        },
        GrammarVersion::Extended => Metrics::Extended(ExtendedMetrics {
            stars: number(&STARS, text, DEFAULT_STARS as u32).clamp(1, 5) as u8,
            steps: number(&STEPS, text, DEFAULT_STEPS),
            movements: number(&MOVEMENTS, text, DEFAULT_MOVEMENTS),
            indoor: number(&INDOOR, text, DEFAULT_INDOOR as u32).min(100) as u8,
            basis_activities: activity_total,
        }),
    }
}

/// Split on `[DAY n]` headers, yielding `(n, content)` pairs. Text before the
/// first header is ignored.
fn split_days(text: &str) -> Vec<(&str, &str)> {
    let headers: Vec<_> = DAY_HEADER.captures_iter(text).collect();

    headers
        .iter()
        .enumerate()
        .filter_map(|(i, caps)| {
            let whole = caps.get(0)?;
            let number = caps.get(1)?.as_str();
            let end = headers
                .get(i + 1)
                .and_then(|next| next.get(0))
                .map_or(text.len(), |m| m.start());
            Some((number, &text[whole.end()..end]))
        })
        .collect()
}

/// Place blocks of one day; the text before the first `[PLACE]` is dropped.
fn place_blocks(day_content: &str) -> impl Iterator<Item = &str> {
    day_content.split(PLACE_MARKER).skip(1)
}

fn parse_place(
    block: &str,
    links: &[GroundingLink],
    grammar: GrammarVersion,
) -> Option<Activity> {
    let trimmed = block.trim();
    if trimmed.is_empty() {
        return None;
    }

    let first_line = trimmed.lines().next().unwrap_or_default();
    let name = BRACKETED.replace_all(first_line, "").trim().to_string();
    if name.chars().count() < MIN_NAME_CHARS {
        debug!("Skipping place block with unusable name: {:?}", first_line);
        return None;
    }

    let (coordinates, photo) = match grammar {
        GrammarVersion::Extended => (coordinates(block), None),
        GrammarVersion::Lazy => (
            None,
            Some(number(&PHOTO, block, DEFAULT_PHOTO as u32).clamp(1, 5) as u8),
        ),
    };

    Some(Activity {
        id: ActivityId::new(),
        desc: block_value(block, "DESC"),
        tip: block_value(block, "TIP"),
        map_link: resolve_map_link(&name, links),
        name,
        coordinates,
        photo,
    })
}

/// First `[TAG] value` match, trimmed; `None` when absent or blank.
fn line_value(re: &Regex, text: &str) -> Option<String> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .filter(|v| !v.is_empty())
        .map(String::from)
}

fn number(re: &Regex, text: &str, default: u32) -> u32 {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(default)
}

/// Value of a multi-line tag: everything after `[TAG]` up to the next `[` or
/// the end of the block, trimmed.
fn block_value(block: &str, tag: &str) -> String {
    let marker = format!("[{}]", tag);
    block
        .find(&marker)
        .map(|pos| {
            let rest = &block[pos + marker.len()..];
            let end = rest.find('[').unwrap_or(rest.len());
            rest[..end].trim().to_string()
        })
        .unwrap_or_default()
}

fn coordinates(block: &str) -> Option<Coordinates> {
    LATLNG.captures(block).map(|caps| Coordinates {
        lat: caps[1].to_string(),
        lng: caps[2].to_string(),
    })
}
