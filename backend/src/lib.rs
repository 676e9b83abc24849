//! # Korvo Backend
//!
//! Non-UI core of the Korvo practitioner dashboard: the calendar grid, the
//! half-hour slot table, recurring availability, appointment placement and
//! the forms behind the create/edit dialogs.
//!
//! ## Architecture
//!
//! ```text
//! UI Layer (any frontend)
//!     ↓
//! AppState (this module)
//!     ↓
//! Domain Layer (calendar, availability, navigation, services)
//!     ↓
//! Storage Layer (traits + in-memory store)
//! ```
//!
//! Everything here is synchronous and deterministic given a cursor date and
//! a "today" date; the host owns the event loop.

pub mod domain;
pub mod session;
pub mod storage;

use std::sync::Arc;

use anyhow::Result;
use korvo_shared::{CalendarConfig, CalendarView};
use tracing::info;

use crate::domain::{
    AppointmentService, AvailabilityModel, CalendarNavigator, CalendarService, EventService,
};
use crate::session::Session;
use crate::storage::{mock_data, AppointmentRepository, EventRepository, InMemoryConnection};

pub use session::{SessionError, SessionState};

/// Main application state that holds all services and per-user view state
pub struct AppState {
    pub calendar_service: CalendarService,
    pub appointment_service: AppointmentService<AppointmentRepository>,
    pub event_service: EventService<EventRepository>,
    pub navigator: CalendarNavigator,
    pub availability: AvailabilityModel,
    pub session: Session,
}

impl AppState {
    /// Render the current view from stored appointments and availability
    pub fn render_calendar(&self) -> Result<CalendarView> {
        let appointments = self.appointment_service.list_appointments()?;
        Ok(self
            .calendar_service
            .render(self.navigator.state(), &appointments, &self.availability))
    }
}

/// Initialize the backend with all required services
pub fn initialize_backend(config: CalendarConfig) -> Result<AppState> {
    info!("Setting up in-memory store");
    let connection = InMemoryConnection::new();
    mock_data::seed(&connection)?;

    info!("Setting up domain model");
    let calendar_service = CalendarService::with_config(config.clone());
    let appointment_service = AppointmentService::with_config(
        Arc::new(AppointmentRepository::new(connection.clone())),
        config,
    );
    let event_service = EventService::new(Arc::new(EventRepository::new(connection)));
    let navigator = CalendarNavigator::new(calendar_service.initial_state());

    info!("Setting up application state");
    Ok(AppState {
        calendar_service,
        appointment_service,
        event_service,
        navigator,
        availability: AvailabilityModel::new(),
        session: Session::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use korvo_shared::{AppointmentStatus, ViewMode};

    #[test]
    fn test_initialize_backend_seeds_fixtures() {
        let state = initialize_backend(CalendarConfig::default()).unwrap();

        assert_eq!(
            state.appointment_service.list_appointments().unwrap().len(),
            mock_data::mock_appointments().len()
        );
        assert_eq!(state.event_service.list_events().unwrap().len(), 2);
        assert!(!state.session.is_authenticated());
        assert_eq!(state.navigator.view_mode(), ViewMode::Week);
    }

    #[test]
    fn test_seeded_appointments_are_editable() {
        let state = initialize_backend(CalendarConfig::default()).unwrap();

        for record in state.appointment_service.list_appointments().unwrap() {
            let updated = state
                .appointment_service
                .set_status(&record.id, AppointmentStatus::Confirmed)
                .unwrap();
            assert_eq!(updated.duration, record.duration);
        }
    }

    #[test]
    fn test_render_calendar_follows_navigator() {
        let mut state = initialize_backend(CalendarConfig::default()).unwrap();
        state.navigator.jump_to(NaiveDate::from_ymd_opt(2024, 6, 28).unwrap());

        match state.render_calendar().unwrap() {
            CalendarView::Week(week) => {
                let cell = week.cell(NaiveDate::from_ymd_opt(2024, 6, 28).unwrap(), "20:00").unwrap();
                assert_eq!(cell.appointments.len(), 1);
            }
            other => panic!("expected week view, got {:?}", other),
        }

        state.navigator.set_view_mode(ViewMode::Month);
        assert!(matches!(state.render_calendar().unwrap(), CalendarView::Month(_)));
    }
}
