//! Fixture records the dashboard ships with until a real backend exists.

use anyhow::Result;
use korvo_shared::{Appointment, AppointmentStatus, AppointmentType};
use tracing::info;

use super::memory::{AppointmentRepository, EventRepository, InMemoryConnection};
use super::traits::{AppointmentStorage, EventStorage};
use crate::domain::models::{Event, EventChannel};

fn appointment(
    id: &str,
    title: &str,
    date: &str,
    time: &str,
    duration: u32,
    appointment_type: AppointmentType,
    status: AppointmentStatus,
) -> Appointment {
    Appointment {
        id: id.to_string(),
        title: title.to_string(),
        date: date.to_string(),
        time: time.to_string(),
        duration,
        appointment_type,
        status,
    }
}

pub fn mock_appointments() -> Vec<Appointment> {
    use AppointmentStatus::*;
    use AppointmentType::*;

    vec![
        appointment("1", "Individual Therapy - Ayse K.", "2024-06-24", "10:00", 60, OneToOne, Confirmed),
        appointment("2", "Career Coaching - Mehmet Y.", "2024-06-25", "14:30", 60, OneToOne, Pending),
        appointment("3", "Group Therapy Session", "2024-06-28", "20:00", 90, Group, Confirmed),
        appointment("4", "Nutrition Consultation - Elif D.", "2024-06-27", "09:00", 30, OneToOne, Confirmed),
        appointment("5", "Late Night Check-in - Can B.", "2024-06-29", "00:30", 30, OneToOne, Pending),
        appointment("6", "Couples Counseling", "2024-07-02", "18:00", 60, OneToOne, Confirmed),
    ]
}

pub fn mock_events() -> Vec<Event> {
    vec![
        Event {
            id: "event::1".to_string(),
            title: "Mindfulness Workshop".to_string(),
            description: Some("Introduction to daily mindfulness practice".to_string()),
            date: "2024-07-05".to_string(),
            time: "19:00".to_string(),
            capacity: 25,
            channel: EventChannel::Online {
                platform: "zoom".to_string(),
                meeting_link: Some("https://zoom.us/j/123456789".to_string()),
            },
        },
        Event {
            id: "event::2".to_string(),
            title: "Stress Management Seminar".to_string(),
            description: None,
            date: "2024-07-12".to_string(),
            time: "14:00".to_string(),
            capacity: 40,
            channel: EventChannel::Hybrid {
                platform: "google-meet".to_string(),
                meeting_link: None,
                location: "Kadikoy Community Center".to_string(),
            },
        },
    ]
}

/// Load the fixtures into a connection
pub fn seed(connection: &InMemoryConnection) -> Result<()> {
    let appointments = AppointmentRepository::new(connection.clone());
    for record in mock_appointments() {
        appointments.store_appointment(&record)?;
    }

    let events = EventRepository::new(connection.clone());
    for record in mock_events() {
        events.store_event(&record)?;
    }

    info!("Seeded mock data");
    Ok(())
}
