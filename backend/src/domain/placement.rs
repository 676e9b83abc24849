//! Placement of appointments onto calendar cells.
//!
//! A cell matches an appointment when the stored `date` equals the cell's ISO
//! date and, for week cells, the stored `time` equals the slot label. The index
//! is built once per render so each cell lookup is a hash probe instead of a
//! scan over every appointment. Placement never filters overlaps.

use std::collections::HashMap;

use chrono::NaiveDate;
use korvo_shared::Appointment;

use super::date_utils::to_iso;
use super::time_slots::{slot_index, TimeSlot};

#[derive(Debug, Default)]
pub struct AppointmentIndex<'a> {
    by_date: HashMap<&'a str, HashMap<&'a str, Vec<&'a Appointment>>>,
}

impl<'a> AppointmentIndex<'a> {
    pub fn build(appointments: &'a [Appointment]) -> Self {
        let mut by_date: HashMap<&'a str, HashMap<&'a str, Vec<&'a Appointment>>> = HashMap::new();

        for appointment in appointments {
            by_date
                .entry(appointment.date.as_str())
                .or_default()
                .entry(appointment.time.as_str())
                .or_default()
                .push(appointment);
        }

        Self { by_date }
    }

    /// Appointments for a month cell, ordered by slot then input order.
    /// Times that are not slot labels sort after the operating day.
    pub fn for_day(&self, date: NaiveDate) -> Vec<&'a Appointment> {
        let Some(by_time) = self.by_date.get(to_iso(date).as_str()) else {
            return Vec::new();
        };

        let mut times: Vec<&&'a str> = by_time.keys().collect();
        times.sort_by_key(|time| (slot_index(time).unwrap_or(usize::MAX), **time));

        times
            .into_iter()
            .flat_map(|time| by_time[*time].iter().copied())
            .collect()
    }

    /// Appointments for a week cell, in input order
    pub fn for_cell(&self, date: NaiveDate, time: TimeSlot) -> Vec<&'a Appointment> {
        self.by_date
            .get(to_iso(date).as_str())
            .and_then(|by_time| by_time.get(time.label().as_str()))
            .cloned()
            .unwrap_or_default()
    }

    pub fn count_for_day(&self, date: NaiveDate) -> usize {
        self.by_date
            .get(to_iso(date).as_str())
            .map(|by_time| by_time.values().map(Vec::len).sum())
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.by_date.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use korvo_shared::{AppointmentStatus, AppointmentType};

    fn appointment(id: &str, date: &str, time: &str) -> Appointment {
        Appointment {
            id: id.to_string(),
            title: format!("Session {}", id),
            date: date.to_string(),
            time: time.to_string(),
            duration: 60,
            appointment_type: AppointmentType::OneToOne,
            status: AppointmentStatus::Confirmed,
        }
    }

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn slot(label: &str) -> TimeSlot {
        TimeSlot::parse(label).unwrap()
    }

    #[test]
    fn test_empty_cell_yields_empty_list() {
        let appointments = vec![appointment("1", "2024-06-28", "20:00")];
        let index = AppointmentIndex::build(&appointments);

        assert!(index.for_cell(date(2024, 6, 28), slot("20:30")).is_empty());
        assert!(index.for_cell(date(2024, 6, 27), slot("20:00")).is_empty());
        assert!(index.for_day(date(2024, 6, 29)).is_empty());
        assert_eq!(index.count_for_day(date(2024, 6, 29)), 0);
    }

    #[test]
    fn test_single_match_returns_only_that_appointment() {
        let appointments = vec![
            appointment("1", "2024-06-28", "20:00"),
            appointment("2", "2024-06-28", "09:00"),
            appointment("3", "2024-06-27", "20:00"),
        ];
        let index = AppointmentIndex::build(&appointments);

        let placed = index.for_cell(date(2024, 6, 28), slot("20:00"));
        assert_eq!(placed.len(), 1);
        assert_eq!(placed[0].id, "1");
    }

    #[test]
    fn test_for_day_orders_by_operating_day() {
        let appointments = vec![
            appointment("late", "2024-06-28", "01:00"),
            appointment("evening", "2024-06-28", "20:00"),
            appointment("morning", "2024-06-28", "07:30"),
            appointment("odd", "2024-06-28", "12:15"),
        ];
        let index = AppointmentIndex::build(&appointments);

        let ids: Vec<&str> = index
            .for_day(date(2024, 6, 28))
            .iter()
            .map(|a| a.id.as_str())
            .collect();
        assert_eq!(ids, vec!["morning", "evening", "late", "odd"]);
        assert_eq!(index.count_for_day(date(2024, 6, 28)), 4);
    }

    #[test]
    fn test_overlapping_bookings_are_all_placed() {
        let appointments = vec![
            appointment("a", "2024-06-28", "20:00"),
            appointment("b", "2024-06-28", "20:00"),
        ];
        let index = AppointmentIndex::build(&appointments);

        let ids: Vec<&str> = index
            .for_cell(date(2024, 6, 28), slot("20:00"))
            .iter()
            .map(|a| a.id.as_str())
            .collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn test_matching_is_exact_on_date_string() {
        let appointments = vec![appointment("1", "2024-6-28", "20:00")];
        let index = AppointmentIndex::build(&appointments);

        assert!(!index.is_empty());
        assert!(index.for_cell(date(2024, 6, 28), slot("20:00")).is_empty());
    }
}
