//! Cursor movement for the calendar views.

use chrono::{Duration, Local, Months, NaiveDate};
use korvo_shared::{CalendarViewState, ViewMode};
use tracing::{info, warn};

/// Shift a date by whole months, pinning the day to the target month's end
/// (January 31 + 1 month is the last day of February).
///
/// `None` only when the result would leave chrono's supported range.
pub fn shift_months(date: NaiveDate, delta: i32) -> Option<NaiveDate> {
    let months = Months::new(delta.unsigned_abs());
    if delta >= 0 {
        date.checked_add_months(months)
    } else {
        date.checked_sub_months(months)
    }
}

pub fn shift_weeks(date: NaiveDate, delta: i32) -> Option<NaiveDate> {
    date.checked_add_signed(Duration::days(i64::from(delta) * 7))
}

/// Owns the visible calendar state and moves it in response to user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarNavigator {
    state: CalendarViewState,
}

impl CalendarNavigator {
    pub fn new(state: CalendarViewState) -> Self {
        Self { state }
    }

    pub fn starting_today(view_mode: ViewMode) -> Self {
        Self::new(CalendarViewState::new(Local::now().date_naive(), view_mode))
    }

    pub fn state(&self) -> CalendarViewState {
        self.state
    }

    pub fn cursor(&self) -> NaiveDate {
        self.state.cursor
    }

    pub fn view_mode(&self) -> ViewMode {
        self.state.view_mode
    }

    /// Switch layouts without moving the cursor
    pub fn set_view_mode(&mut self, view_mode: ViewMode) {
        self.state.view_mode = view_mode;
    }

    pub fn navigate_month(&mut self, delta: i32) -> NaiveDate {
        match shift_months(self.state.cursor, delta) {
            Some(cursor) => {
                self.state.cursor = cursor;
                info!("📅 Navigated {} month(s) to {}", delta, cursor);
            }
            None => warn!("Cannot move {} month(s) from {}", delta, self.state.cursor),
        }
        self.state.cursor
    }

    pub fn navigate_week(&mut self, delta: i32) -> NaiveDate {
        match shift_weeks(self.state.cursor, delta) {
            Some(cursor) => {
                self.state.cursor = cursor;
                info!("📅 Navigated {} week(s) to {}", delta, cursor);
            }
            None => warn!("Cannot move {} week(s) from {}", delta, self.state.cursor),
        }
        self.state.cursor
    }

    /// Page by one unit of the current layout
    pub fn navigate(&mut self, delta: i32) -> NaiveDate {
        match self.state.view_mode {
            ViewMode::Week => self.navigate_week(delta),
            ViewMode::Month => self.navigate_month(delta),
        }
    }

    pub fn jump_to(&mut self, date: NaiveDate) {
        self.state.cursor = date;
    }

    pub fn jump_to_today(&mut self) -> NaiveDate {
        self.jump_to(Local::now().date_naive());
        self.state.cursor
    }
}

impl Default for CalendarNavigator {
    fn default() -> Self {
        Self::new(CalendarViewState::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn navigator(cursor: NaiveDate, view_mode: ViewMode) -> CalendarNavigator {
        CalendarNavigator::new(CalendarViewState::new(cursor, view_mode))
    }

    #[test]
    fn test_month_end_is_pinned_not_overflowed() {
        let mut nav = navigator(date(2024, 1, 31), ViewMode::Month);
        assert_eq!(nav.navigate_month(1), date(2024, 2, 29));

        let mut nav = navigator(date(2023, 1, 31), ViewMode::Month);
        assert_eq!(nav.navigate_month(1), date(2023, 2, 28));

        let mut nav = navigator(date(2024, 3, 31), ViewMode::Month);
        assert_eq!(nav.navigate_month(-1), date(2024, 2, 29));
    }

    #[test]
    fn test_twelve_months_return_to_same_month() {
        let start = date(2024, 1, 31);
        let mut nav = navigator(start, ViewMode::Month);
        for _ in 0..12 {
            nav.navigate_month(1);
        }
        assert_eq!(nav.cursor().month(), start.month());
        assert_eq!(nav.cursor().year(), start.year() + 1);

        for _ in 0..12 {
            nav.navigate_month(-1);
        }
        assert_eq!(nav.cursor().month(), 1);
        assert_eq!(nav.cursor().year(), 2024);
    }

    #[test]
    fn test_year_rollover() {
        let mut nav = navigator(date(2024, 12, 15), ViewMode::Month);
        assert_eq!(nav.navigate_month(1), date(2025, 1, 15));
        assert_eq!(nav.navigate_month(-1), date(2024, 12, 15));

        let mut nav = navigator(date(2025, 1, 15), ViewMode::Month);
        assert_eq!(nav.navigate_month(-1), date(2024, 12, 15));
    }

    #[test]
    fn test_navigate_week_moves_seven_days() {
        let mut nav = navigator(date(2024, 6, 28), ViewMode::Week);
        assert_eq!(nav.navigate_week(1), date(2024, 7, 5));
        assert_eq!(nav.navigate_week(-2), date(2024, 6, 21));
    }

    #[test]
    fn test_navigate_dispatches_on_view_mode() {
        let mut nav = navigator(date(2024, 6, 28), ViewMode::Week);
        assert_eq!(nav.navigate(1), date(2024, 7, 5));

        nav.set_view_mode(ViewMode::Month);
        assert_eq!(nav.navigate(1), date(2024, 8, 5));
    }

    #[test]
    fn test_switching_modes_preserves_cursor() {
        let mut nav = navigator(date(2024, 6, 28), ViewMode::Week);
        nav.set_view_mode(ViewMode::Month);
        assert_eq!(nav.cursor(), date(2024, 6, 28));
        nav.set_view_mode(ViewMode::Week);
        assert_eq!(nav.state(), CalendarViewState::new(date(2024, 6, 28), ViewMode::Week));
    }

    #[test]
    fn test_jump_to_today_preserves_mode() {
        let mut nav = navigator(date(2001, 1, 1), ViewMode::Month);
        let before = Local::now().date_naive();
        let cursor = nav.jump_to_today();
        let after = Local::now().date_naive();

        assert!(cursor == before || cursor == after);
        assert_eq!(nav.view_mode(), ViewMode::Month);
    }

    #[test]
    fn test_out_of_range_navigation_keeps_cursor() {
        let mut nav = navigator(NaiveDate::MAX, ViewMode::Month);
        assert_eq!(nav.navigate_month(1), NaiveDate::MAX);
        assert_eq!(nav.navigate_week(1), NaiveDate::MAX);

        let mut nav = navigator(NaiveDate::MIN, ViewMode::Week);
        assert_eq!(nav.navigate(-1), NaiveDate::MIN);
    }
}
