//! Calendar domain logic for the Korvo dashboard.
//!
//! Builds the month and week render models from the cursor date, the stored
//! appointments and the practitioner's availability. The UI only draws what
//! comes out of here; all date arithmetic and placement happens in this layer.

use chrono::{Datelike, Local, NaiveDate};
use korvo_shared::{
    Appointment, CalendarConfig, CalendarView, CalendarViewState, CurrentDateResponse, MonthCell,
    MonthView, ViewMode, WeekCell, WeekColumn, WeekRow, WeekView,
};
use tracing::{debug, info};

use super::availability::AvailabilityModel;
use super::date_utils::{
    current_date, day_index, format_month_title, format_week_range, month_grid, week_days,
    weekday_short_name, WEEK_ORDER,
};
use super::placement::AppointmentIndex;
use super::time_slots::time_slots;

/// Calendar service that handles all calendar-related view logic
#[derive(Debug, Clone, Default)]
pub struct CalendarService {
    config: CalendarConfig,
}

impl CalendarService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: CalendarConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CalendarConfig {
        &self.config
    }

    /// Initial view state: today in the configured layout
    pub fn initial_state(&self) -> CalendarViewState {
        CalendarViewState::new(Local::now().date_naive(), self.config.default_view_mode)
    }

    /// Render whichever layout `state` selects, relative to the local date
    pub fn render(
        &self,
        state: CalendarViewState,
        appointments: &[Appointment],
        availability: &AvailabilityModel,
    ) -> CalendarView {
        let today = Local::now().date_naive();
        match state.view_mode {
            ViewMode::Week => {
                CalendarView::Week(self.render_week(state.cursor, appointments, availability, today))
            }
            ViewMode::Month => CalendarView::Month(self.render_month(state.cursor, appointments, today)),
        }
    }

    /// Generate the month containing `cursor` with appointments placed per day
    pub fn render_month(
        &self,
        cursor: NaiveDate,
        appointments: &[Appointment],
        today: NaiveDate,
    ) -> MonthView {
        let index = AppointmentIndex::build(appointments);
        let grid = month_grid(cursor);

        debug!(
            "Generating month {}/{} with {} cells",
            cursor.month(),
            cursor.year(),
            grid.len()
        );

        let cells: Vec<MonthCell> = grid
            .into_iter()
            .map(|cell| match cell {
                None => MonthCell::Padding,
                Some(date) => MonthCell::Day {
                    date,
                    is_today: date == today,
                    appointments: index.for_day(date).into_iter().cloned().collect(),
                },
            })
            .collect();

        let placed: usize = cells.iter().map(|cell| cell.appointments().len()).sum();
        info!("🗓️ Rendered month {} with {} appointments", format_month_title(cursor), placed);

        MonthView {
            year: cursor.year(),
            month: cursor.month(),
            title: format_month_title(cursor),
            weekday_headers: WEEK_ORDER
                .iter()
                .map(|day| weekday_short_name(*day).to_string())
                .collect(),
            cells,
        }
    }

    /// Generate the Monday-first week containing `cursor`: seven columns
    /// against every slot of the operating day
    pub fn render_week(
        &self,
        cursor: NaiveDate,
        appointments: &[Appointment],
        availability: &AvailabilityModel,
        today: NaiveDate,
    ) -> WeekView {
        let index = AppointmentIndex::build(appointments);
        let days = week_days(cursor);

        let columns = days
            .iter()
            .map(|date| WeekColumn {
                date: *date,
                day_index: day_index(date.weekday()),
                label: format!("{} {}", weekday_short_name(date.weekday()), date.day()),
                is_today: *date == today,
            })
            .collect();

        let rows: Vec<WeekRow> = time_slots()
            .iter()
            .map(|slot| WeekRow {
                time: slot.label(),
                cells: days
                    .iter()
                    .map(|date| WeekCell {
                        date: *date,
                        time: slot.label(),
                        available: availability.is_available(date.weekday(), *slot),
                        appointments: index.for_cell(*date, *slot).into_iter().cloned().collect(),
                    })
                    .collect(),
            })
            .collect();

        let placed: usize = rows
            .iter()
            .flat_map(|row| row.cells.iter())
            .map(|cell| cell.appointments.len())
            .sum();
        info!("🗓️ Rendered week {} with {} appointments", format_week_range(cursor), placed);

        WeekView {
            title: format_week_range(cursor),
            columns,
            rows,
        }
    }

    /// Get current date information
    pub fn get_current_date(&self) -> CurrentDateResponse {
        current_date()
    }
}
