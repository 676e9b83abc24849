//! Half-hour slots of the consulting day.
//!
//! The operating day runs from 07:00 through 06:00 the following morning, so
//! the grid has 47 rows. Appointment times are stored as these labels and the
//! week view relies on the exact sequence to line them up.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

pub const SLOT_MINUTES: u16 = 30;
pub const SLOT_COUNT: usize = 47;
const DAY_START_MINUTES: u16 = 7 * 60;
const MINUTES_PER_DAY: u16 = 24 * 60;

/// A half-hour aligned time of day, displayed as `HH:MM`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeSlot {
    minutes: u16,
}

/// Every slot of the operating day in display order
pub const TIME_SLOTS: [TimeSlot; SLOT_COUNT] = build_time_slots();

const fn build_time_slots() -> [TimeSlot; SLOT_COUNT] {
    let mut slots = [TimeSlot { minutes: 0 }; SLOT_COUNT];
    let mut i = 0;
    while i < SLOT_COUNT {
        slots[i] = TimeSlot {
            minutes: (DAY_START_MINUTES + i as u16 * SLOT_MINUTES) % MINUTES_PER_DAY,
        };
        i += 1;
    }
    slots
}

pub fn time_slots() -> &'static [TimeSlot] {
    &TIME_SLOTS
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeSlotParseError {
    #[error("'{0}' is not an HH:MM time")]
    Malformed(String),
    #[error("'{0}' is not on a half-hour boundary")]
    NotHalfHour(String),
    #[error("'{0}' is outside the 07:00-06:00 operating day")]
    OutsideOperatingDay(String),
}

impl TimeSlot {
    pub fn parse(label: &str) -> Result<Self, TimeSlotParseError> {
        let malformed = || TimeSlotParseError::Malformed(label.to_string());

        let (hours, minutes) = label.split_once(':').ok_or_else(malformed)?;
        let two_digits = |part: &str| part.len() == 2 && part.bytes().all(|b| b.is_ascii_digit());
        if !two_digits(hours) || !two_digits(minutes) {
            return Err(malformed());
        }
        let hours: u16 = hours.parse().map_err(|_| malformed())?;
        let minutes: u16 = minutes.parse().map_err(|_| malformed())?;
        if hours >= 24 || minutes >= 60 {
            return Err(malformed());
        }
        if minutes % SLOT_MINUTES != 0 {
            return Err(TimeSlotParseError::NotHalfHour(label.to_string()));
        }

        let slot = TimeSlot { minutes: hours * 60 + minutes };
        if slot.position().is_none() {
            return Err(TimeSlotParseError::OutsideOperatingDay(label.to_string()));
        }
        Ok(slot)
    }

    pub fn is_slot_label(label: &str) -> bool {
        Self::parse(label).is_ok()
    }

    pub fn minutes_from_midnight(&self) -> u16 {
        self.minutes
    }

    /// Minutes elapsed since the operating day opened at 07:00
    pub fn minutes_into_day(&self) -> u16 {
        (self.minutes + MINUTES_PER_DAY - DAY_START_MINUTES) % MINUTES_PER_DAY
    }

    /// Row of this slot in [`TIME_SLOTS`]
    pub fn position(&self) -> Option<usize> {
        let index = (self.minutes_into_day() / SLOT_MINUTES) as usize;
        (self.minutes % SLOT_MINUTES == 0 && index < SLOT_COUNT).then_some(index)
    }

    pub fn label(&self) -> String {
        self.to_string()
    }
}

/// Slots order by their place in the operating day, so 00:30 sorts after 23:30
impl Ord for TimeSlot {
    fn cmp(&self, other: &Self) -> Ordering {
        self.minutes_into_day().cmp(&other.minutes_into_day())
    }
}

impl PartialOrd for TimeSlot {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.minutes / 60, self.minutes % 60)
    }
}

impl FromStr for TimeSlot {
    type Err = TimeSlotParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Position of a stored time label in the operating day, `None` for unknown labels
pub fn slot_index(label: &str) -> Option<usize> {
    TimeSlot::parse(label).ok().and_then(|slot| slot.position())
}
