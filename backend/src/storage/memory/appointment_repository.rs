use anyhow::{bail, Result};
use korvo_shared::Appointment;
use tracing::{debug, info};

use super::connection::InMemoryConnection;
use crate::domain::time_slots::slot_index;
use crate::storage::AppointmentStorage;

/// Appointment table backed by [`InMemoryConnection`]
#[derive(Debug, Clone)]
pub struct AppointmentRepository {
    connection: InMemoryConnection,
}

impl AppointmentRepository {
    pub fn new(connection: InMemoryConnection) -> Self {
        Self { connection }
    }
}

/// Chronological order: date string, slot position, then ID for stability
pub(crate) fn sort_chronologically(appointments: &mut [Appointment]) {
    appointments.sort_by(|a, b| {
        a.date
            .cmp(&b.date)
            .then_with(|| slot_index(&a.time).unwrap_or(usize::MAX).cmp(&slot_index(&b.time).unwrap_or(usize::MAX)))
            .then_with(|| a.id.cmp(&b.id))
    });
}

impl AppointmentStorage for AppointmentRepository {
    fn store_appointment(&self, appointment: &Appointment) -> Result<()> {
        let mut table = self.connection.appointments_mut()?;
        if table.contains_key(&appointment.id) {
            bail!("Appointment with ID {} already exists", appointment.id);
        }
        table.insert(appointment.id.clone(), appointment.clone());
        info!("Stored appointment {} on {} {}", appointment.id, appointment.date, appointment.time);
        Ok(())
    }

    fn get_appointment(&self, appointment_id: &str) -> Result<Option<Appointment>> {
        Ok(self.connection.appointments()?.get(appointment_id).cloned())
    }

    fn list_appointments(&self) -> Result<Vec<Appointment>> {
        let mut appointments: Vec<Appointment> = self.connection.appointments()?.values().cloned().collect();
        sort_chronologically(&mut appointments);
        debug!("Listed {} appointments", appointments.len());
        Ok(appointments)
    }

    fn list_appointments_on(&self, date: &str) -> Result<Vec<Appointment>> {
        let mut appointments: Vec<Appointment> = self
            .connection
            .appointments()?
            .values()
            .filter(|appointment| appointment.date == date)
            .cloned()
            .collect();
        sort_chronologically(&mut appointments);
        Ok(appointments)
    }

    fn update_appointment(&self, appointment: &Appointment) -> Result<()> {
        let mut table = self.connection.appointments_mut()?;
        match table.get_mut(&appointment.id) {
            Some(stored) => {
                *stored = appointment.clone();
                info!("Updated appointment {}", appointment.id);
                Ok(())
            }
            None => bail!("Appointment {} not found", appointment.id),
        }
    }

    fn delete_appointment(&self, appointment_id: &str) -> Result<bool> {
        let removed = self.connection.appointments_mut()?.remove(appointment_id).is_some();
        if removed {
            info!("Deleted appointment {}", appointment_id);
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use korvo_shared::{AppointmentStatus, AppointmentType};

    fn appointment(id: &str, date: &str, time: &str) -> Appointment {
        Appointment {
            id: id.to_string(),
            title: "Consultation".to_string(),
            date: date.to_string(),
            time: time.to_string(),
            duration: 60,
            appointment_type: AppointmentType::OneToOne,
            status: AppointmentStatus::Pending,
        }
    }

    fn setup_test() -> AppointmentRepository {
        AppointmentRepository::new(InMemoryConnection::new())
    }

    #[test]
    fn test_store_and_get() {
        let repo = setup_test();
        let stored = appointment("a1", "2024-06-28", "20:00");
        repo.store_appointment(&stored).unwrap();

        assert_eq!(repo.get_appointment("a1").unwrap(), Some(stored));
        assert_eq!(repo.get_appointment("missing").unwrap(), None);
    }

    #[test]
    fn test_duplicate_id_is_rejected() {
        let repo = setup_test();
        repo.store_appointment(&appointment("a1", "2024-06-28", "20:00")).unwrap();
        assert!(repo.store_appointment(&appointment("a1", "2024-06-29", "10:00")).is_err());
    }

    #[test]
    fn test_list_is_chronological() {
        let repo = setup_test();
        repo.store_appointment(&appointment("late", "2024-06-28", "01:00")).unwrap();
        repo.store_appointment(&appointment("next-day", "2024-06-29", "07:00")).unwrap();
        repo.store_appointment(&appointment("early", "2024-06-28", "07:00")).unwrap();

        let ids: Vec<String> = repo.list_appointments().unwrap().into_iter().map(|a| a.id).collect();
        assert_eq!(ids, vec!["early", "late", "next-day"]);

        let on_day: Vec<String> = repo
            .list_appointments_on("2024-06-28")
            .unwrap()
            .into_iter()
            .map(|a| a.id)
            .collect();
        assert_eq!(on_day, vec!["early", "late"]);
    }

    #[test]
    fn test_update_and_delete() {
        let repo = setup_test();
        let mut stored = appointment("a1", "2024-06-28", "20:00");
        repo.store_appointment(&stored).unwrap();

        stored.status = AppointmentStatus::Confirmed;
        repo.update_appointment(&stored).unwrap();
        assert_eq!(
            repo.get_appointment("a1").unwrap().map(|a| a.status),
            Some(AppointmentStatus::Confirmed)
        );

        assert!(repo.update_appointment(&appointment("ghost", "2024-06-28", "20:00")).is_err());

        assert!(repo.delete_appointment("a1").unwrap());
        assert!(!repo.delete_appointment("a1").unwrap());
        assert!(repo.list_appointments().unwrap().is_empty());
    }

    #[test]
    fn test_repositories_share_connection() {
        let connection = InMemoryConnection::new();
        let writer = AppointmentRepository::new(connection.clone());
        let reader = AppointmentRepository::new(connection);

        writer.store_appointment(&appointment("a1", "2024-06-28", "20:00")).unwrap();
        assert_eq!(reader.list_appointments().unwrap().len(), 1);
    }
}
