use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// A (title, uri) pair returned by the map-retrieval tool of the AI service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundingLink {
    pub title: String,
    pub uri: String,
}

impl GroundingLink {
    pub fn new(title: impl Into<String>, uri: impl Into<String>) -> Self {
        GroundingLink {
            title: title.into(),
            uri: uri.into(),
        }
    }
}

/// Text and grounding links exactly as the AI service returned them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawModelResponse {
    pub text: String,
    #[serde(default)]
    pub links: Vec<GroundingLink>,
}

/// Opaque per-activity identifier used only for list-key stability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivityId(Uuid);

impl ActivityId {
    pub fn new() -> Self {
        ActivityId(Uuid::new_v4())
    }
}

impl Default for ActivityId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ActivityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Short form is enough for a list key
        write!(f, "{}", &self.0.simple().to_string()[..9])
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: String,
    pub lng: String,
}

/// One visitable place within a day.
///
/// Equality ignores `id`: two parses of the same text compare equal even
/// though every activity receives a fresh identifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
    #[serde(skip)]
    pub id: ActivityId,
    pub name: String,
    pub desc: String,
    pub tip: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub map_link: Option<GroundingLink>,
}

impl PartialEq for Activity {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.desc == other.desc
            && self.tip == other.tip
            && self.coordinates == other.coordinates
            && self.photo == other.photo
            && self.map_link == other.map_link
    }
}

impl Eq for Activity {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Day {
    /// Day numeral as written by the model; display only
    pub day: String,
    pub activities: Vec<Activity>,
}

/// Step and movement figures of the extended grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtendedMetrics {
    /// 1-5, higher is lazier
    pub stars: u8,
    pub steps: u32,
    pub movements: u32,
    /// Share of indoor time, 0-100
    pub indoor: u8,
    /// Activity count that `steps` and `movements` describe
    pub basis_activities: usize,
}

/// Overall ease metric. The shape is fixed by the grammar version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum Metrics {
    /// Lazy score 0-100, higher means less movement
    Lazy { difficulty: u8 },
    Extended(ExtendedMetrics),
}

impl Metrics {
    /// The metric folded onto a 0-100 scale, used as a summary when saving.
    pub fn lazy_score(&self) -> u8 {
        match self {
            Metrics::Lazy { difficulty } => *difficulty,
            Metrics::Extended(m) => m.stars.saturating_mul(20),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedItinerary {
    pub title: String,
    pub metrics: Metrics,
    pub comment: String,
    pub days: Vec<Day>,
}

impl ParsedItinerary {
    pub fn activity_count(&self) -> usize {
        self.days.iter().map(|d| d.activities.len()).sum()
    }
}
