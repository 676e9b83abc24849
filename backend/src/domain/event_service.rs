use std::sync::Arc;

use anyhow::{anyhow, Result};
use tracing::{info, warn};

use super::forms::{event_form_schema, FormAction, FormOutcome, FormSchema, FormState, FormSubmission};
use super::models::{Event, EventChannel};
use crate::storage::EventStorage;

/// Service for the events section: form-driven creation plus CRUD
pub struct EventService<S: EventStorage> {
    storage: Arc<S>,
    schema: FormSchema,
}

impl<S: EventStorage> EventService<S> {
    pub fn new(storage: Arc<S>) -> Self {
        Self {
            storage,
            schema: event_form_schema(),
        }
    }

    pub fn form_schema(&self) -> &FormSchema {
        &self.schema
    }

    /// Fresh state for the create dialog
    pub fn new_form(&self) -> FormState {
        FormState::new(&self.schema)
    }

    /// Form state pre-filled from a stored event, for the edit dialog
    pub fn edit_form(&self, event: &Event) -> Result<FormState> {
        let mut state = self.new_form();
        let mut fields = vec![
            ("title", event.title.clone()),
            ("description", event.description.clone().unwrap_or_default()),
            ("channel", event.channel.kind().to_string()),
            ("date", event.date.clone()),
            ("time", event.time.clone()),
            ("capacity", event.capacity.to_string()),
        ];
        if let Some(platform) = event.channel.platform() {
            fields.push(("platform", platform.to_string()));
        }
        if let Some(location) = event.channel.location() {
            fields.push(("location", location.to_string()));
        }
        if let EventChannel::Online { meeting_link: Some(link), .. }
        | EventChannel::Hybrid { meeting_link: Some(link), .. } = &event.channel
        {
            fields.push(("meeting_link", link.clone()));
        }

        for (field, value) in fields {
            state.apply(&self.schema, FormAction::Set { field: field.to_string(), value })?;
        }
        Ok(state)
    }

    /// Validate the form and store the resulting event
    pub fn submit_new(&self, state: &mut FormState) -> Result<Event> {
        let submission = self.submit(state)?;
        let event = Event::from_submission(Event::generate_id(), &submission)?;
        self.storage.store_event(&event)?;
        info!("Created {} event {}", event.channel.kind(), event.id);
        Ok(event)
    }

    /// Validate the form and replace the stored event
    pub fn submit_edit(&self, event_id: &str, state: &mut FormState) -> Result<Event> {
        if self.storage.get_event(event_id)?.is_none() {
            return Err(anyhow!("Event not found: {}", event_id));
        }
        let submission = self.submit(state)?;
        let event = Event::from_submission(event_id.to_string(), &submission)?;
        self.storage.update_event(&event)?;
        Ok(event)
    }

    pub fn get_event(&self, event_id: &str) -> Result<Option<Event>> {
        self.storage.get_event(event_id)
    }

    pub fn list_events(&self) -> Result<Vec<Event>> {
        self.storage.list_events()
    }

    pub fn delete_event(&self, event_id: &str) -> Result<bool> {
        let deleted = self.storage.delete_event(event_id)?;
        if !deleted {
            warn!("Event not found: {}", event_id);
        }
        Ok(deleted)
    }

    fn submit(&self, state: &mut FormState) -> Result<FormSubmission> {
        match state.apply(&self.schema, FormAction::Submit)? {
            FormOutcome::Submitted(submission) => Ok(submission),
            FormOutcome::Invalid(errors) => {
                let fields: Vec<&str> = errors.keys().map(String::as_str).collect();
                Err(anyhow!("Event form has invalid fields: {}", fields.join(", ")))
            }
            FormOutcome::Updated => Err(anyhow!("Event form was not submitted")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{EventRepository, InMemoryConnection};

    fn setup_test() -> EventService<EventRepository> {
        EventService::new(Arc::new(EventRepository::new(InMemoryConnection::new())))
    }

    fn fill(service: &EventService<EventRepository>, state: &mut FormState, pairs: &[(&str, &str)]) {
        for (field, value) in pairs {
            state.apply(service.form_schema(), FormAction::set(field, value)).unwrap();
        }
    }

    #[test]
    fn test_submit_new_offline_event() {
        let service = setup_test();
        let mut state = service.new_form();
        fill(
            &service,
            &mut state,
            &[
                ("title", "Art Therapy Circle"),
                ("channel", "offline"),
                ("location", "Moda Studio"),
                ("date", "2024-07-10"),
                ("time", "18:30"),
                ("capacity", "8"),
            ],
        );

        let event = service.submit_new(&mut state).unwrap();
        assert_eq!(event.channel, EventChannel::Offline { location: "Moda Studio".to_string() });
        assert_eq!(service.list_events().unwrap(), vec![event]);
    }

    #[test]
    fn test_invalid_form_is_not_stored() {
        let service = setup_test();
        let mut state = service.new_form();
        fill(&service, &mut state, &[("title", "No platform"), ("date", "2024-07-10"), ("time", "18:30")]);

        let err = service.submit_new(&mut state).unwrap_err();
        assert!(err.to_string().contains("platform"));
        assert!(state.errors().contains_key("platform"));
        assert!(service.list_events().unwrap().is_empty());
    }

    #[test]
    fn test_edit_round_trip() {
        let service = setup_test();
        let mut state = service.new_form();
        fill(
            &service,
            &mut state,
            &[
                ("title", "Webinar"),
                ("platform", "zoom"),
                ("meeting_link", "https://zoom.us/j/1"),
                ("date", "2024-07-10"),
                ("time", "19:00"),
            ],
        );
        let event = service.submit_new(&mut state).unwrap();

        let mut edit = service.edit_form(&event).unwrap();
        assert_eq!(edit.value("meeting_link"), Some("https://zoom.us/j/1"));

        fill(&service, &mut edit, &[("channel", "hybrid"), ("location", "Besiktas")]);
        let updated = service.submit_edit(&event.id, &mut edit).unwrap();

        assert_eq!(updated.id, event.id);
        assert_eq!(updated.channel.location(), Some("Besiktas"));
        assert_eq!(updated.channel.platform(), Some("zoom"));
        assert_eq!(service.get_event(&event.id).unwrap(), Some(updated));

        assert!(service.delete_event(&event.id).unwrap());
        assert!(service.submit_edit(&event.id, &mut edit).is_err());
    }
}
