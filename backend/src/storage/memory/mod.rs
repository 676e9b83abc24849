//! In-memory storage used while the dashboard runs on mock data.

pub mod appointment_repository;
pub mod connection;
pub mod event_repository;

pub use appointment_repository::AppointmentRepository;
pub use connection::InMemoryConnection;
pub use event_repository::EventRepository;
