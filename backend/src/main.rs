use anyhow::{Context, Result};
use chrono::NaiveDate;
use korvo_backend::domain::date_utils::parse_iso_date;
use korvo_backend::initialize_backend;
use korvo_shared::{CalendarConfig, ViewMode};
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEMO_USER: &str = "expert@korvo.app";

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut state = initialize_backend(CalendarConfig::default())?;
    state.session.login(DEMO_USER)?;
    let user = state.session.require_authenticated()?.to_string();
    info!("Rendering calendar for {}", user);

    let cursor = match std::env::args().nth(1) {
        Some(arg) => parse_iso_date(&arg).with_context(|| format!("Invalid cursor date '{}'", arg))?,
        None => first_appointment_date(&state)?,
    };
    state.navigator.jump_to(cursor);

    for mode in [ViewMode::Week, ViewMode::Month] {
        state.navigator.set_view_mode(mode);
        let view = state.render_calendar()?;
        println!("{}", serde_json::to_string_pretty(&view)?);
    }

    state.session.logout();
    Ok(())
}

fn first_appointment_date(state: &korvo_backend::AppState) -> Result<NaiveDate> {
    let appointments = state.appointment_service.list_appointments()?;
    let first = appointments.first().context("No appointments to show")?;
    parse_iso_date(&first.date).with_context(|| format!("Stored date '{}' is not ISO", first.date))
}
