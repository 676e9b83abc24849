use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::date_utils::parse_iso_date;
use crate::domain::forms::FormSubmission;
use crate::domain::time_slots::{TimeSlot, TimeSlotParseError};

/// Where an event takes place. Each variant carries exactly the fields that
/// make sense for it, so an offline event cannot have a meeting link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "channel", rename_all = "lowercase")]
pub enum EventChannel {
    Online {
        platform: String,
        meeting_link: Option<String>,
    },
    Offline {
        location: String,
    },
    Hybrid {
        platform: String,
        meeting_link: Option<String>,
        location: String,
    },
}

impl EventChannel {
    pub fn kind(&self) -> &'static str {
        match self {
            EventChannel::Online { .. } => "online",
            EventChannel::Offline { .. } => "offline",
            EventChannel::Hybrid { .. } => "hybrid",
        }
    }

    pub fn location(&self) -> Option<&str> {
        match self {
            EventChannel::Online { .. } => None,
            EventChannel::Offline { location } | EventChannel::Hybrid { location, .. } => {
                Some(location.as_str())
            }
        }
    }

    pub fn platform(&self) -> Option<&str> {
        match self {
            EventChannel::Offline { .. } => None,
            EventChannel::Online { platform, .. } | EventChannel::Hybrid { platform, .. } => {
                Some(platform.as_str())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    /// ISO date (YYYY-MM-DD)
    pub date: String,
    /// Slot label (HH:MM)
    pub time: String,
    pub capacity: u32,
    #[serde(flatten)]
    pub channel: EventChannel,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EventValidationError {
    #[error("Missing field: {0}")]
    MissingField(&'static str),
    #[error("Unknown channel: {0}")]
    UnknownChannel(String),
    #[error("Capacity must be a whole number of at least 1")]
    InvalidCapacity,
    #[error("Invalid date '{0}'. Expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error(transparent)]
    InvalidTime(#[from] TimeSlotParseError),
}

impl Event {
    pub fn generate_id() -> String {
        format!("event::{}", uuid::Uuid::new_v4())
    }

    /// Build an event from a submitted event form
    pub fn from_submission(id: String, submission: &FormSubmission) -> Result<Self, EventValidationError> {
        let required = |field: &'static str| {
            submission
                .non_empty(field)
                .map(str::to_string)
                .ok_or(EventValidationError::MissingField(field))
        };

        let channel = match required("channel")?.as_str() {
            "online" => EventChannel::Online {
                platform: required("platform")?,
                meeting_link: submission.non_empty("meeting_link").map(str::to_string),
            },
            "offline" => EventChannel::Offline {
                location: required("location")?,
            },
            "hybrid" => EventChannel::Hybrid {
                platform: required("platform")?,
                meeting_link: submission.non_empty("meeting_link").map(str::to_string),
                location: required("location")?,
            },
            other => return Err(EventValidationError::UnknownChannel(other.to_string())),
        };

        let capacity = required("capacity")?
            .parse::<u32>()
            .ok()
            .filter(|capacity| *capacity >= 1)
            .ok_or(EventValidationError::InvalidCapacity)?;

        let event = Event {
            id,
            title: required("title")?,
            description: submission.non_empty("description").map(str::to_string),
            date: required("date")?,
            time: required("time")?,
            capacity,
            channel,
        };
        event.validate()?;
        Ok(event)
    }

    /// Date and time must place on the calendar grid exactly as stored
    pub fn validate(&self) -> Result<(), EventValidationError> {
        parse_iso_date(&self.date).ok_or_else(|| EventValidationError::InvalidDate(self.date.clone()))?;
        TimeSlot::parse(&self.time)?;
        if self.capacity == 0 {
            return Err(EventValidationError::InvalidCapacity);
        }
        Ok(())
    }
}
