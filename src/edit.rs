//! Edits applied to a copy of a parsed itinerary: reordering, removing and
//! inserting activities within a day.

use crate::error::EditError;
use crate::model::{Activity, ActivityId, Coordinates, Day, GroundingLink, ParsedItinerary};

impl Activity {
    /// Build an activity for a place picked by the user, linked to a map
    /// search on its coordinates.
    pub fn from_place(
        name: impl Into<String>,
        desc: impl Into<String>,
        tip: impl Into<String>,
        lat: impl Into<String>,
        lng: impl Into<String>,
    ) -> Self {
        let name = name.into();
        let coordinates = Coordinates {
            lat: lat.into(),
            lng: lng.into(),
        };
        let uri = format!(
            "https://www.google.com/maps/search/?api=1&query={},{}",
            coordinates.lat, coordinates.lng
        );

        Activity {
            id: ActivityId::new(),
            map_link: Some(GroundingLink::new(name.clone(), uri)),
            name,
            desc: desc.into(),
            tip: tip.into(),
            coordinates: Some(coordinates),
            photo: None,
        }
    }
}

impl ParsedItinerary {
    fn day_mut(&mut self, day_idx: usize) -> Result<&mut Day, EditError> {
        self.days
            .get_mut(day_idx)
            .ok_or(EditError::DayOutOfRange(day_idx))
    }

    /// Move an activity to another position within the same day.
    pub fn move_activity(&mut self, day_idx: usize, from: usize, to: usize) -> Result<(), EditError> {
        let day = self.day_mut(day_idx)?;
        let len = day.activities.len();
        for index in [from, to] {
            if index >= len {
                return Err(EditError::ActivityOutOfRange {
                    day: day_idx,
                    index,
                });
            }
        }

        let activity = day.activities.remove(from);
        day.activities.insert(to, activity);
        Ok(())
    }

    /// Remove an activity. The day is kept even if it becomes empty.
    pub fn remove_activity(&mut self, day_idx: usize, index: usize) -> Result<Activity, EditError> {
        let day = self.day_mut(day_idx)?;
        if index >= day.activities.len() {
            return Err(EditError::ActivityOutOfRange {
                day: day_idx,
                index,
            });
        }
        Ok(day.activities.remove(index))
    }

    /// Insert an activity right after `after_idx`.
    pub fn insert_activity(
        &mut self,
        day_idx: usize,
        after_idx: usize,
        activity: Activity,
    ) -> Result<(), EditError> {
        let day = self.day_mut(day_idx)?;
        if after_idx >= day.activities.len() {
            return Err(EditError::ActivityOutOfRange {
                day: day_idx,
                index: after_idx,
            });
        }
        day.activities.insert(after_idx + 1, activity);
        Ok(())
    }
}
