use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A booked session as seen by the dashboard.
///
/// `date` is an ISO calendar date (`YYYY-MM-DD`) and `time` a half-hour slot
/// label (`HH:MM`). Grid placement matches both by exact string equality.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: String,
    pub title: String,
    pub date: String,
    pub time: String,
    /// Length of the session in minutes
    pub duration: u32,
    #[serde(rename = "type")]
    pub appointment_type: AppointmentType,
    pub status: AppointmentStatus,
}

/// Whether the session is held with one client or a group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AppointmentType {
    #[serde(rename = "1-1")]
    OneToOne,
    #[serde(rename = "group")]
    Group,
}

impl fmt::Display for AppointmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentType::OneToOne => write!(f, "1-1"),
            AppointmentType::Group => write!(f, "group"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Confirmed,
    Pending,
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentStatus::Confirmed => write!(f, "confirmed"),
            AppointmentStatus::Pending => write!(f, "pending"),
        }
    }
}

/// Request for booking a new appointment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateAppointmentRequest {
    pub title: String,
    pub date: String,
    pub time: String,
    pub duration: u32,
    #[serde(rename = "type")]
    pub appointment_type: AppointmentType,
    /// Defaults to pending when not provided
    pub status: Option<AppointmentStatus>,
}

/// Partial update of an existing appointment; `None` keeps the stored value
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateAppointmentRequest {
    pub title: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub duration: Option<u32>,
    #[serde(rename = "type")]
    pub appointment_type: Option<AppointmentType>,
    pub status: Option<AppointmentStatus>,
}

/// Which calendar layout is visible
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    Week,
    Month,
}

impl Default for ViewMode {
    fn default() -> Self {
        ViewMode::Week
    }
}

/// The date anchoring the visible calendar plus the active layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarViewState {
    pub cursor: NaiveDate,
    pub view_mode: ViewMode,
}

impl CalendarViewState {
    pub fn new(cursor: NaiveDate, view_mode: ViewMode) -> Self {
        Self { cursor, view_mode }
    }
}

impl Default for CalendarViewState {
    fn default() -> Self {
        Self {
            cursor: chrono::Local::now().date_naive(),
            view_mode: ViewMode::default(),
        }
    }
}

/// A single cell of the month grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MonthCell {
    /// Empty cell before the first day so that it lines up under its weekday
    Padding,
    Day {
        date: NaiveDate,
        is_today: bool,
        appointments: Vec<Appointment>,
    },
}

impl MonthCell {
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            MonthCell::Padding => None,
            MonthCell::Day { date, .. } => Some(*date),
        }
    }

    pub fn appointments(&self) -> &[Appointment] {
        match self {
            MonthCell::Padding => &[],
            MonthCell::Day { appointments, .. } => appointments,
        }
    }
}

/// Month layout: Monday-first weekday headers followed by left-padded day cells
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthView {
    pub year: i32,
    pub month: u32,
    pub title: String,
    pub weekday_headers: Vec<String>,
    pub cells: Vec<MonthCell>,
}

/// Column header of the week view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekColumn {
    pub date: NaiveDate,
    /// 0 = Monday ... 6 = Sunday
    pub day_index: u8,
    pub label: String,
    pub is_today: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekCell {
    pub date: NaiveDate,
    pub time: String,
    /// Whether the practitioner's recurring availability covers this half hour
    pub available: bool,
    pub appointments: Vec<Appointment>,
}

/// One half-hour row of the week view, one cell per column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekRow {
    pub time: String,
    pub cells: Vec<WeekCell>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekView {
    pub title: String,
    pub columns: Vec<WeekColumn>,
    pub rows: Vec<WeekRow>,
}

impl WeekView {
    /// Looks up the cell for a column date and slot label
    pub fn cell(&self, date: NaiveDate, time: &str) -> Option<&WeekCell> {
        self.rows
            .iter()
            .find(|row| row.time == time)
            .and_then(|row| row.cells.iter().find(|cell| cell.date == date))
    }
}

/// Render model handed to the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum CalendarView {
    Week(WeekView),
    Month(MonthView),
}

/// A recurring weekly half hour marked as available
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AvailabilitySlot {
    /// 0 = Monday ... 6 = Sunday
    pub day: u8,
    pub time: String,
}

/// Saved state of the availability settings screen
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AvailabilitySnapshot {
    pub always_available: bool,
    pub slots: Vec<AvailabilitySlot>,
}

/// Current date information for the calendar header
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CurrentDateResponse {
    pub month: u32,
    pub year: i32,
    pub day: u32,
    pub formatted_date: String,
    /// ISO date string (YYYY-MM-DD)
    pub iso_date: String,
}

/// How appointment creation treats bookings that share calendar time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictPolicy {
    /// Accept overlapping bookings; the grid shows all of them in the cell
    Allow,
    /// Refuse a booking whose time range intersects an existing one on the same date
    RejectOverlapping,
}

/// Configuration for calendar and booking behaviour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarConfig {
    pub conflict_policy: ConflictPolicy,
    pub max_title_length: usize,
    pub default_view_mode: ViewMode,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            conflict_policy: ConflictPolicy::RejectOverlapping,
            max_title_length: 120,
            default_view_mode: ViewMode::Week,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_appointment() -> Appointment {
        Appointment {
            id: "1".to_string(),
            title: "Group Therapy".to_string(),
            date: "2024-06-28".to_string(),
            time: "20:00".to_string(),
            duration: 90,
            appointment_type: AppointmentType::Group,
            status: AppointmentStatus::Confirmed,
        }
    }

    #[test]
    fn test_appointment_uses_dashboard_field_names() {
        let json = serde_json::to_value(sample_appointment()).unwrap();

        assert_eq!(json["type"], "group");
        assert_eq!(json["status"], "confirmed");
        assert_eq!(json["date"], "2024-06-28");
    }

    #[test]
    fn test_appointment_type_parses_one_to_one_label() {
        let parsed: AppointmentType = serde_json::from_str("\"1-1\"").unwrap();
        assert_eq!(parsed, AppointmentType::OneToOne);
        assert_eq!(parsed.to_string(), "1-1");
    }

    #[test]
    fn test_month_cell_accessors() {
        assert_eq!(MonthCell::Padding.date(), None);
        assert!(MonthCell::Padding.appointments().is_empty());

        let date = NaiveDate::from_ymd_opt(2024, 6, 28).unwrap();
        let cell = MonthCell::Day {
            date,
            is_today: false,
            appointments: vec![sample_appointment()],
        };
        assert_eq!(cell.date(), Some(date));
        assert_eq!(cell.appointments().len(), 1);
    }

    #[test]
    fn test_calendar_config_defaults() {
        let config = CalendarConfig::default();
        assert_eq!(config.conflict_policy, ConflictPolicy::RejectOverlapping);
        assert_eq!(config.default_view_mode, ViewMode::Week);
    }
}
