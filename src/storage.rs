//! Saved itineraries, kept as a JSON array in a single file.
//!
//! Only the raw model text, its links and some metadata are stored. Opening a
//! saved travel re-runs the parser, so the stored format does not depend on
//! the shape of [`ParsedItinerary`].

use crate::error::StorageError;
use crate::grammar::GrammarVersion;
use crate::model::{GroundingLink, ParsedItinerary};
use crate::parser::parse_itinerary;
use crate::planner::TravelPlan;
use crate::request::Region;
use chrono::{DateTime, Utc};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedTravel {
    pub id: String,
    pub title: String,
    /// Raw model text, before parsing
    pub content: String,
    #[serde(default)]
    pub links: Vec<GroundingLink>,
    pub saved_at: DateTime<Utc>,
    pub region: Region,
    #[serde(default)]
    pub grammar: GrammarVersion,
    pub total_difficulty: u8,
}

impl SavedTravel {
    pub fn from_plan(plan: &TravelPlan, region: Region) -> Self {
        SavedTravel {
            id: Uuid::new_v4().simple().to_string(),
            title: plan.itinerary.title.clone(),
            content: plan.raw.text.clone(),
            links: plan.raw.links.clone(),
            saved_at: Utc::now(),
            region,
            grammar: plan.grammar,
            total_difficulty: plan.itinerary.metrics.lazy_score(),
        }
    }

    /// Parse the stored text again.
    pub fn restore(&self) -> ParsedItinerary {
        parse_itinerary(&self.content, &self.links, self.grammar)
    }
}

pub struct SavedTravelStore {
    path: PathBuf,
}

impl SavedTravelStore {
    pub fn open(path: impl AsRef<Path>) -> Self {
        SavedTravelStore {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All saved travels, newest first.
    ///
    /// A missing file is an empty store. An unreadable or corrupt file is
    /// logged and also treated as empty.
    pub fn list(&self) -> Vec<SavedTravel> {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                warn!("Could not read {}: {}", self.path.display(), e);
                return Vec::new();
            }
        };

        serde_json::from_str(&data).unwrap_or_else(|e| {
            warn!("Ignoring corrupt saved travels in {}: {}", self.path.display(), e);
            Vec::new()
        })
    }

    pub fn get(&self, id: &str) -> Option<SavedTravel> {
        self.list().into_iter().find(|t| t.id == id)
    }

    /// Save a plan at the front of the list.
    pub fn save(&self, plan: &TravelPlan, region: Region) -> Result<SavedTravel, StorageError> {
        let saved = SavedTravel::from_plan(plan, region);
        let mut travels = self.list();
        travels.insert(0, saved.clone());
        self.write(&travels)?;
        debug!("Saved '{}' as {}", saved.title, saved.id);
        Ok(saved)
    }

    /// Delete a saved travel; returns whether anything was removed.
    pub fn delete(&self, id: &str) -> Result<bool, StorageError> {
        let mut travels = self.list();
        let before = travels.len();
        travels.retain(|t| t.id != id);
        if travels.len() == before {
            return Ok(false);
        }
        self.write(&travels)?;
        Ok(true)
    }

    fn write(&self, travels: &[SavedTravel]) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(travels)?;
        fs::write(&self.path, json).map_err(|source| StorageError::Io {
            path: self.path.display().to_string(),
            source,
        })
    }
}
