//! # Domain Module
//!
//! Business logic of the Korvo dashboard, independent of any UI framework or
//! storage mechanism.
//!
//! ## Module Organization
//!
//! - **date_utils**: month/week grids, week alignment and date formatting
//! - **time_slots**: the fixed 07:00-06:00 half-hour enumeration
//! - **availability**: recurring weekly availability with the always-available override
//! - **placement**: hash index joining appointments to calendar cells
//! - **navigation**: cursor paging for the week and month layouts
//! - **calendar**: month and week render models
//! - **appointment_service**: booking CRUD and the double-booking rule
//! - **forms**: schema-driven form state shared by every create/edit dialog
//! - **event_service**: events built from the event form
//! - **models**: domain records that are not plain DTOs
//!
//! ## Rules
//!
//! - Calendar weeks start on Monday; Sunday is the last column
//! - Placement is exact string equality on ISO date and slot label
//! - Toggling availability under the override never changes the selection
//! - Navigation never produces an invalid date

pub mod appointment_service;
pub mod availability;
pub mod calendar;
pub mod date_utils;
pub mod event_service;
pub mod forms;
pub mod models;
pub mod navigation;
pub mod placement;
pub mod time_slots;

pub use appointment_service::{AppointmentError, AppointmentService};
pub use availability::{AvailabilityError, AvailabilityKey, AvailabilityModel};
pub use calendar::CalendarService;
pub use event_service::EventService;
pub use navigation::CalendarNavigator;
pub use placement::AppointmentIndex;
pub use time_slots::{time_slots, TimeSlot, TimeSlotParseError};
