//! # Storage Module
//!
//! Handles data access for the Korvo dashboard.
//!
//! Domain services depend on the traits in [`traits`], never on a concrete
//! store. The only implementation today is the in-memory one in [`memory`],
//! seeded from [`mock_data`]; a persistent store can be substituted without
//! touching calendar or view logic.

pub mod memory;
pub mod mock_data;
pub mod traits;

pub use memory::{AppointmentRepository, EventRepository, InMemoryConnection};
pub use traits::{AppointmentStorage, EventStorage};
