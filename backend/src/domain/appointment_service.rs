use std::sync::Arc;

use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use korvo_shared::{
    Appointment, AppointmentStatus, CalendarConfig, ConflictPolicy, CreateAppointmentRequest,
    UpdateAppointmentRequest,
};
use thiserror::Error;
use tracing::{info, warn};

use super::date_utils::{parse_iso_date, to_iso};
use super::time_slots::{TimeSlot, TimeSlotParseError, SLOT_MINUTES};
use crate::storage::AppointmentStorage;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AppointmentError {
    #[error("Title cannot be empty")]
    EmptyTitle,
    #[error("Title is too long ({actual} characters). Maximum is {max}.")]
    TitleTooLong { max: usize, actual: usize },
    #[error("Invalid date '{0}'. Expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error(transparent)]
    InvalidTime(#[from] TimeSlotParseError),
    #[error("Duration must be a positive multiple of 30 minutes, got {0}")]
    InvalidDuration(u32),
    #[error("Overlaps appointment {existing_id} on {date} at {time}")]
    Conflict {
        existing_id: String,
        date: String,
        time: String,
    },
    #[error("Appointment not found: {0}")]
    NotFound(String),
}

/// Minutes since the common era for the start of an appointment, plus its length.
/// Dates and times are taken literally, so "2024-06-28 01:00" is the early
/// morning of the 28th.
fn time_range(date: NaiveDate, time: TimeSlot, duration: u32) -> (i64, i64) {
    let start = i64::from(date.num_days_from_ce()) * 24 * 60 + i64::from(time.minutes_from_midnight());
    (start, start + i64::from(duration))
}

fn overlaps(a: (i64, i64), b: (i64, i64)) -> bool {
    a.0 < b.1 && b.0 < a.1
}

/// Field rules every stored appointment must satisfy
pub fn validate_appointment(appointment: &Appointment, config: &CalendarConfig) -> Result<(), AppointmentError> {
    let title_len = appointment.title.chars().count();
    if title_len == 0 {
        return Err(AppointmentError::EmptyTitle);
    }
    if title_len > config.max_title_length {
        return Err(AppointmentError::TitleTooLong {
            max: config.max_title_length,
            actual: title_len,
        });
    }

    parse_iso_date(&appointment.date).ok_or_else(|| AppointmentError::InvalidDate(appointment.date.clone()))?;
    TimeSlot::parse(&appointment.time)?;

    if appointment.duration == 0 || appointment.duration % u32::from(SLOT_MINUTES) != 0 {
        return Err(AppointmentError::InvalidDuration(appointment.duration));
    }
    Ok(())
}

/// Service for booking and editing appointments
pub struct AppointmentService<S: AppointmentStorage> {
    storage: Arc<S>,
    config: CalendarConfig,
}

impl<S: AppointmentStorage> AppointmentService<S> {
    pub fn new(storage: Arc<S>) -> Self {
        Self::with_config(storage, CalendarConfig::default())
    }

    pub fn with_config(storage: Arc<S>, config: CalendarConfig) -> Self {
        Self { storage, config }
    }

    pub fn create_appointment(&self, request: CreateAppointmentRequest) -> Result<Appointment> {
        info!("Booking appointment: title={}, date={} {}", request.title, request.date, request.time);

        let appointment = Appointment {
            id: uuid::Uuid::new_v4().to_string(),
            title: request.title.trim().to_string(),
            date: request.date,
            time: request.time,
            duration: request.duration,
            appointment_type: request.appointment_type,
            status: request.status.unwrap_or(AppointmentStatus::Pending),
        };

        self.validate(&appointment)?;
        self.check_conflicts(&appointment)?;
        self.storage.store_appointment(&appointment)?;

        info!("Booked appointment {}", appointment.id);
        Ok(appointment)
    }

    pub fn get_appointment(&self, appointment_id: &str) -> Result<Option<Appointment>> {
        let appointment = self.storage.get_appointment(appointment_id)?;
        if appointment.is_none() {
            warn!("Appointment not found: {}", appointment_id);
        }
        Ok(appointment)
    }

    pub fn list_appointments(&self) -> Result<Vec<Appointment>> {
        self.storage.list_appointments()
    }

    pub fn list_appointments_on(&self, date: NaiveDate) -> Result<Vec<Appointment>> {
        self.storage.list_appointments_on(&to_iso(date))
    }

    /// Appointments dated within `from..=to`; records with unparseable dates are skipped
    pub fn list_appointments_in_range(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<Appointment>> {
        Ok(self
            .storage
            .list_appointments()?
            .into_iter()
            .filter(|appointment| {
                parse_iso_date(&appointment.date)
                    .map(|date| from <= date && date <= to)
                    .unwrap_or(false)
            })
            .collect())
    }

    pub fn update_appointment(&self, appointment_id: &str, request: UpdateAppointmentRequest) -> Result<Appointment> {
        let mut appointment = self
            .storage
            .get_appointment(appointment_id)?
            .ok_or_else(|| AppointmentError::NotFound(appointment_id.to_string()))?;

        if let Some(title) = request.title {
            appointment.title = title.trim().to_string();
        }
        if let Some(date) = request.date {
            appointment.date = date;
        }
        if let Some(time) = request.time {
            appointment.time = time;
        }
        if let Some(duration) = request.duration {
            appointment.duration = duration;
        }
        if let Some(appointment_type) = request.appointment_type {
            appointment.appointment_type = appointment_type;
        }
        if let Some(status) = request.status {
            appointment.status = status;
        }

        self.validate(&appointment)?;
        self.check_conflicts(&appointment)?;
        self.storage.update_appointment(&appointment)?;

        info!("Updated appointment {}", appointment.id);
        Ok(appointment)
    }

    pub fn set_status(&self, appointment_id: &str, status: AppointmentStatus) -> Result<Appointment> {
        self.update_appointment(
            appointment_id,
            UpdateAppointmentRequest {
                status: Some(status),
                ..UpdateAppointmentRequest::default()
            },
        )
    }

    pub fn delete_appointment(&self, appointment_id: &str) -> Result<bool> {
        let deleted = self.storage.delete_appointment(appointment_id)?;
        if !deleted {
            warn!("Nothing to delete for appointment {}", appointment_id);
        }
        Ok(deleted)
    }

    fn validate(&self, appointment: &Appointment) -> Result<(), AppointmentError> {
        validate_appointment(appointment, &self.config)
    }

    fn check_conflicts(&self, candidate: &Appointment) -> Result<()> {
        if self.config.conflict_policy == ConflictPolicy::Allow {
            return Ok(());
        }

        let (Some(date), Ok(time)) = (parse_iso_date(&candidate.date), TimeSlot::parse(&candidate.time)) else {
            return Ok(());
        };
        let range = time_range(date, time, candidate.duration);

        for existing in self.storage.list_appointments()? {
            if existing.id == candidate.id {
                continue;
            }
            let (Some(other_date), Ok(other_time)) = (parse_iso_date(&existing.date), TimeSlot::parse(&existing.time)) else {
                continue;
            };
            if overlaps(range, time_range(other_date, other_time, existing.duration)) {
                warn!("Rejecting {} {}: overlaps appointment {}", candidate.date, candidate.time, existing.id);
                return Err(AppointmentError::Conflict {
                    existing_id: existing.id,
                    date: existing.date,
                    time: existing.time,
                }
                .into());
            }
        }
        Ok(())
    }
}
