//! Recurring weekly availability of a practitioner.
//!
//! Availability is a set of (weekday, slot) keys plus an "always available"
//! override. The override supersedes the set without touching it: while it is
//! on, edits are ignored, and switching it off shows the previous selection.

use std::collections::HashSet;

use chrono::Weekday;
use korvo_shared::{AvailabilitySlot, AvailabilitySnapshot};
use thiserror::Error;
use tracing::{debug, info};

use super::date_utils::{day_index, weekday_from_index, WEEK_ORDER};
use super::time_slots::{time_slots, TimeSlot, TimeSlotParseError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AvailabilityKey {
    pub day: Weekday,
    pub time: TimeSlot,
}

impl AvailabilityKey {
    pub fn new(day: Weekday, time: TimeSlot) -> Self {
        Self { day, time }
    }

    fn sort_key(&self) -> (u8, TimeSlot) {
        (day_index(self.day), self.time)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AvailabilityError {
    #[error("Day index {0} is outside 0-6")]
    InvalidDay(u8),
    #[error(transparent)]
    InvalidTime(#[from] TimeSlotParseError),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AvailabilityModel {
    selected: HashSet<AvailabilityKey>,
    always_available: bool,
}

impl AvailabilityModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip one key in or out of the selection.
    ///
    /// Returns whether anything changed; always `false` while the override is on.
    pub fn toggle(&mut self, day: Weekday, time: TimeSlot) -> bool {
        if self.always_available {
            debug!("Ignoring toggle of {:?} {} while always available", day, time);
            return false;
        }

        let key = AvailabilityKey::new(day, time);
        if !self.selected.remove(&key) {
            self.selected.insert(key);
        }
        true
    }

    /// Select every slot of a weekday, returning how many were newly added
    pub fn select_day(&mut self, day: Weekday) -> usize {
        if self.always_available {
            return 0;
        }
        time_slots()
            .iter()
            .filter(|time| self.selected.insert(AvailabilityKey::new(day, **time)))
            .count()
    }

    /// Deselect every slot of a weekday, returning how many were removed
    pub fn clear_day(&mut self, day: Weekday) -> usize {
        if self.always_available {
            return 0;
        }
        let before = self.selected.len();
        self.selected.retain(|key| key.day != day);
        before - self.selected.len()
    }

    /// Clear the selection and switch the override off
    pub fn reset(&mut self) {
        self.selected.clear();
        self.always_available = false;
    }

    pub fn set_always_available(&mut self, always_available: bool) {
        if self.always_available != always_available {
            info!("Always available set to {}", always_available);
        }
        self.always_available = always_available;
    }

    pub fn is_always_available(&self) -> bool {
        self.always_available
    }

    /// Explicit membership, ignoring the override
    pub fn is_selected(&self, day: Weekday, time: TimeSlot) -> bool {
        self.selected.contains(&AvailabilityKey::new(day, time))
    }

    pub fn is_available(&self, day: Weekday, time: TimeSlot) -> bool {
        self.always_available || self.is_selected(day, time)
    }

    /// Explicit selection ordered by weekday (Monday first) then slot
    pub fn selected(&self) -> Vec<AvailabilityKey> {
        let mut keys: Vec<AvailabilityKey> = self.selected.iter().copied().collect();
        keys.sort_by_key(AvailabilityKey::sort_key);
        keys
    }

    pub fn selected_set(&self) -> &HashSet<AvailabilityKey> {
        &self.selected
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Number of selected slots per weekday, Monday first
    pub fn slots_per_day(&self) -> [usize; 7] {
        let mut counts = [0; 7];
        for key in &self.selected {
            counts[day_index(key.day) as usize] += 1;
        }
        counts
    }

    pub fn snapshot(&self) -> AvailabilitySnapshot {
        AvailabilitySnapshot {
            always_available: self.always_available,
            slots: self
                .selected()
                .into_iter()
                .map(|key| AvailabilitySlot {
                    day: day_index(key.day),
                    time: key.time.label(),
                })
                .collect(),
        }
    }

    /// Rebuild a model from a saved snapshot; any malformed entry rejects the whole snapshot
    pub fn from_snapshot(snapshot: &AvailabilitySnapshot) -> Result<Self, AvailabilityError> {
        let selected = snapshot
            .slots
            .iter()
            .map(|slot| -> Result<AvailabilityKey, AvailabilityError> {
                let day = weekday_from_index(slot.day).ok_or(AvailabilityError::InvalidDay(slot.day))?;
                let time = TimeSlot::parse(&slot.time)?;
                Ok(AvailabilityKey::new(day, time))
            })
            .collect::<Result<HashSet<_>, _>>()?;

        Ok(Self {
            selected,
            always_available: snapshot.always_available,
        })
    }

    /// Weekdays with at least one selected slot
    pub fn active_days(&self) -> Vec<Weekday> {
        WEEK_ORDER
            .iter()
            .copied()
            .filter(|day| self.selected.iter().any(|key| key.day == *day))
            .collect()
    }
}
