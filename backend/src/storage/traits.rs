//! # Storage Traits
//!
//! CRUD contracts the domain services depend on. The dashboard currently runs
//! on the in-memory implementation seeded with mock data; a persistent backend
//! only has to implement these traits.

use anyhow::Result;
use korvo_shared::Appointment;

use crate::domain::models::Event;

/// Trait defining the interface for appointment storage operations
pub trait AppointmentStorage: Send + Sync {
    /// Store a new appointment; fails if the ID is already taken
    fn store_appointment(&self, appointment: &Appointment) -> Result<()>;

    fn get_appointment(&self, appointment_id: &str) -> Result<Option<Appointment>>;

    /// All appointments ordered by date, then by slot within the operating day
    fn list_appointments(&self) -> Result<Vec<Appointment>>;

    /// Appointments stored under an exact ISO date
    fn list_appointments_on(&self, date: &str) -> Result<Vec<Appointment>>;

    /// Replace an existing appointment; fails if it does not exist
    fn update_appointment(&self, appointment: &Appointment) -> Result<()>;

    /// Returns true if the appointment was found and deleted
    fn delete_appointment(&self, appointment_id: &str) -> Result<bool>;
}

/// Trait defining the interface for event storage operations
pub trait EventStorage: Send + Sync {
    fn store_event(&self, event: &Event) -> Result<()>;

    fn get_event(&self, event_id: &str) -> Result<Option<Event>>;

    /// All events ordered by date and start time
    fn list_events(&self) -> Result<Vec<Event>>;

    fn update_event(&self, event: &Event) -> Result<()>;

    fn delete_event(&self, event_id: &str) -> Result<bool>;
}
