//! Event registry port and application service.

use std::sync::Arc;

use async_trait::async_trait;

use portaria_core::{AppError, AppResult};
use portaria_domain::{Event, EventId, NewEvent};

/// Repository port for event persistence.
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Inserts an event and returns it with its assigned identifier.
    async fn create(&self, event: &NewEvent) -> AppResult<Event>;

    /// Lists all events ordered by start time ascending.
    async fn list(&self) -> AppResult<Vec<Event>>;

    /// Finds one event by identifier.
    async fn find(&self, event_id: EventId) -> AppResult<Option<Event>>;

    /// Deletes one event. Returns `false` when no row matched.
    async fn delete(&self, event_id: EventId) -> AppResult<bool>;
}

/// Plain CRUD over event records.
#[derive(Clone)]
pub struct EventService {
    repository: Arc<dyn EventRepository>,
}

impl EventService {
    /// Creates the service over the event repository.
    #[must_use]
    pub fn new(repository: Arc<dyn EventRepository>) -> Self {
        Self { repository }
    }

    /// Creates a new event from validated input.
    pub async fn create(&self, event: NewEvent) -> AppResult<Event> {
        self.repository.create(&event).await
    }

    /// Lists all events, soonest start first.
    pub async fn list(&self) -> AppResult<Vec<Event>> {
        self.repository.list().await
    }

    /// Returns one event or `NotFound`.
    pub async fn get(&self, event_id: EventId) -> AppResult<Event> {
        self.repository
            .find(event_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("evento {event_id} não encontrado")))
    }

    /// Deletes one event; `NotFound` when the identifier matches nothing.
    pub async fn delete(&self, event_id: EventId) -> AppResult<()> {
        if self.repository.delete(event_id).await? {
            Ok(())
        } else {
            Err(AppError::NotFound(format!(
                "evento {event_id} não encontrado"
            )))
        }
    }
}
