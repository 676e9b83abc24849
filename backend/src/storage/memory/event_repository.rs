use anyhow::{bail, Result};
use tracing::info;

use super::connection::InMemoryConnection;
use crate::domain::models::Event;
use crate::domain::time_slots::slot_index;
use crate::storage::EventStorage;

/// Event table backed by [`InMemoryConnection`]
#[derive(Debug, Clone)]
pub struct EventRepository {
    connection: InMemoryConnection,
}

impl EventRepository {
    pub fn new(connection: InMemoryConnection) -> Self {
        Self { connection }
    }
}

impl EventStorage for EventRepository {
    fn store_event(&self, event: &Event) -> Result<()> {
        let mut table = self.connection.events_mut()?;
        if table.contains_key(&event.id) {
            bail!("Event with ID {} already exists", event.id);
        }
        table.insert(event.id.clone(), event.clone());
        info!("Stored {} event {}", event.channel.kind(), event.id);
        Ok(())
    }

    fn get_event(&self, event_id: &str) -> Result<Option<Event>> {
        Ok(self.connection.events()?.get(event_id).cloned())
    }

    fn list_events(&self) -> Result<Vec<Event>> {
        let mut events: Vec<Event> = self.connection.events()?.values().cloned().collect();
        events.sort_by(|a, b| {
            a.date
                .cmp(&b.date)
                .then_with(|| {
                    let a_slot = slot_index(&a.time).unwrap_or(usize::MAX);
                    a_slot.cmp(&slot_index(&b.time).unwrap_or(usize::MAX))
                })
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(events)
    }

    fn update_event(&self, event: &Event) -> Result<()> {
        let mut table = self.connection.events_mut()?;
        match table.get_mut(&event.id) {
            Some(stored) => {
                *stored = event.clone();
                info!("Updated event {}", event.id);
                Ok(())
            }
            None => bail!("Event {} not found", event.id),
        }
    }

    fn delete_event(&self, event_id: &str) -> Result<bool> {
        Ok(self.connection.events_mut()?.remove(event_id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::EventChannel;

    fn event(id: &str, date: &str, time: &str) -> Event {
        Event {
            id: id.to_string(),
            title: "Workshop".to_string(),
            description: None,
            date: date.to_string(),
            time: time.to_string(),
            capacity: 20,
            channel: EventChannel::Offline {
                location: "Studio".to_string(),
            },
        }
    }

    #[test]
    fn test_event_crud() {
        let repo = EventRepository::new(InMemoryConnection::new());
        repo.store_event(&event("e2", "2024-07-01", "10:00")).unwrap();
        repo.store_event(&event("e1", "2024-06-28", "20:00")).unwrap();
        assert!(repo.store_event(&event("e1", "2024-06-28", "20:00")).is_err());

        let ids: Vec<String> = repo.list_events().unwrap().into_iter().map(|e| e.id).collect();
        assert_eq!(ids, vec!["e1", "e2"]);

        let mut updated = event("e1", "2024-06-28", "20:00");
        updated.capacity = 5;
        repo.update_event(&updated).unwrap();
        assert_eq!(repo.get_event("e1").unwrap().map(|e| e.capacity), Some(5));

        assert!(repo.delete_event("e1").unwrap());
        assert!(repo.get_event("e1").unwrap().is_none());
        assert!(repo.update_event(&updated).is_err());
    }
}
