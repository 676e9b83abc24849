use chrono::{NaiveDate, Weekday};
use korvo_backend::domain::date_utils::format_week_range;
use korvo_backend::domain::TimeSlot;
use korvo_backend::initialize_backend;
use korvo_shared::{
    AppointmentType, CalendarConfig, CalendarView, CreateAppointmentRequest, MonthCell, ViewMode,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn slot(label: &str) -> TimeSlot {
    TimeSlot::parse(label).unwrap()
}

#[test]
fn june_2024_group_session_lands_in_both_layouts() {
    let state = initialize_backend(CalendarConfig::default()).unwrap();
    let appointments = state.appointment_service.list_appointments().unwrap();
    let today = date(2024, 6, 20);

    let week = state
        .calendar_service
        .render_week(date(2024, 6, 28), &appointments, &state.availability, today);
    assert_eq!(week.title, "24 - 30 June 2024");
    assert_eq!(week.columns.len(), 7);
    assert_eq!(week.rows.len(), 47);
    let cell = week.cell(date(2024, 6, 28), "20:00").unwrap();
    assert_eq!(cell.appointments.len(), 1);
    assert_eq!(cell.appointments[0].title, "Group Therapy Session");
    assert_eq!(cell.appointments[0].appointment_type, AppointmentType::Group);
    assert!(week.cell(date(2024, 6, 28), "20:30").unwrap().appointments.is_empty());

    let month = state.calendar_service.render_month(date(2024, 6, 28), &appointments, today);
    assert_eq!(month.title, "June 2024");
    // June 1st 2024 is a Saturday: five padding cells in a Monday-first grid
    assert!(month.cells[..5].iter().all(|c| matches!(c, MonthCell::Padding)));
    let june_28 = month.cells.iter().find(|c| c.date() == Some(date(2024, 6, 28))).unwrap();
    assert_eq!(june_28.appointments().len(), 1);
}

#[test]
fn navigation_drives_rendered_week() {
    let mut state = initialize_backend(CalendarConfig::default()).unwrap();
    state.navigator.jump_to(date(2024, 6, 28));

    state.navigator.navigate(1);
    assert_eq!(state.navigator.cursor(), date(2024, 7, 5));
    match state.render_calendar().unwrap() {
        CalendarView::Week(week) => {
            assert_eq!(week.title, format_week_range(date(2024, 7, 5)));
            let cell = week.cell(date(2024, 7, 2), "18:00").unwrap();
            assert_eq!(cell.appointments[0].title, "Couples Counseling");
        }
        other => panic!("expected week view, got {:?}", other),
    }

    state.navigator.set_view_mode(ViewMode::Month);
    state.navigator.jump_to(date(2024, 1, 31));
    assert_eq!(state.navigator.navigate(1), date(2024, 2, 29));
    assert_eq!(state.navigator.navigate(-1), date(2024, 1, 29));
}

#[test]
fn availability_override_reaches_week_cells() {
    let mut state = initialize_backend(CalendarConfig::default()).unwrap();
    state.navigator.jump_to(date(2024, 6, 24));

    assert!(state.availability.toggle(Weekday::Mon, slot("09:00")));
    let week = match state.render_calendar().unwrap() {
        CalendarView::Week(week) => week,
        other => panic!("expected week view, got {:?}", other),
    };
    assert!(week.cell(date(2024, 6, 24), "09:00").unwrap().available);
    assert!(!week.cell(date(2024, 6, 25), "09:00").unwrap().available);

    state.availability.set_always_available(true);
    assert!(!state.availability.toggle(Weekday::Mon, slot("09:00")));
    let week = match state.render_calendar().unwrap() {
        CalendarView::Week(week) => week,
        other => panic!("expected week view, got {:?}", other),
    };
    assert!(week.rows.iter().all(|row| row.cells.iter().all(|cell| cell.available)));

    state.availability.set_always_available(false);
    assert!(state.availability.is_selected(Weekday::Mon, slot("09:00")));
    assert_eq!(state.availability.len(), 1);
}

#[test]
fn conflicting_booking_is_rejected_by_default() {
    let state = initialize_backend(CalendarConfig::default()).unwrap();

    let request = CreateAppointmentRequest {
        title: "Overlapping Intake".to_string(),
        date: "2024-06-28".to_string(),
        time: "21:00".to_string(),
        duration: 30,
        appointment_type: AppointmentType::OneToOne,
        status: None,
    };
    assert!(state.appointment_service.create_appointment(request.clone()).is_err());

    let free = CreateAppointmentRequest { time: "21:30".to_string(), ..request };
    let created = state.appointment_service.create_appointment(free).unwrap();
    assert_eq!(created.time, "21:30");
}
