use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use anyhow::{anyhow, Result};
use korvo_shared::Appointment;

use crate::domain::models::Event;

/// Shared in-memory tables. Clones share the same data, so every repository
/// built from one connection sees the same records.
#[derive(Debug, Clone, Default)]
pub struct InMemoryConnection {
    appointments: Arc<RwLock<HashMap<String, Appointment>>>,
    events: Arc<RwLock<HashMap<String, Event>>>,
}

impl InMemoryConnection {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn appointments(&self) -> Result<RwLockReadGuard<'_, HashMap<String, Appointment>>> {
        self.appointments
            .read()
            .map_err(|_| anyhow!("Appointment table lock poisoned"))
    }

    pub(crate) fn appointments_mut(&self) -> Result<RwLockWriteGuard<'_, HashMap<String, Appointment>>> {
        self.appointments
            .write()
            .map_err(|_| anyhow!("Appointment table lock poisoned"))
    }

    pub(crate) fn events(&self) -> Result<RwLockReadGuard<'_, HashMap<String, Event>>> {
        self.events.read().map_err(|_| anyhow!("Event table lock poisoned"))
    }

    pub(crate) fn events_mut(&self) -> Result<RwLockWriteGuard<'_, HashMap<String, Event>>> {
        self.events.write().map_err(|_| anyhow!("Event table lock poisoned"))
    }
}
