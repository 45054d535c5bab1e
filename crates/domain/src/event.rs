//! Event registry types.

use std::fmt::{Display, Formatter};

use chrono::{DateTime, Utc};
use portaria_core::{AppResult, NonEmptyString};
use serde::{Deserialize, Serialize};

/// Unique identifier for an event record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventId(i64);

impl EventId {
    /// Wraps a database-assigned identifier.
    #[must_use]
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw identifier value.
    #[must_use]
    pub fn as_i64(self) -> i64 {
        self.0
    }
}

impl Display for EventId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// A stored event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Assigned identifier.
    pub id: EventId,
    /// Event name.
    pub name: String,
    /// Scheduled start.
    pub starts_at: DateTime<Utc>,
    /// Scheduled end.
    pub ends_at: DateTime<Utc>,
    /// Venue, if provided.
    pub location: Option<String>,
    /// Free-text description, if provided.
    pub description: Option<String>,
}

/// Validated input for event creation. Name, start and end are required;
/// location and description are optional and carry no further rules.
#[derive(Debug, Clone)]
pub struct NewEvent {
    /// Event name.
    pub name: NonEmptyString,
    /// Scheduled start.
    pub starts_at: DateTime<Utc>,
    /// Scheduled end.
    pub ends_at: DateTime<Utc>,
    /// Venue, if provided.
    pub location: Option<String>,
    /// Free-text description, if provided.
    pub description: Option<String>,
}

impl NewEvent {
    /// Validates the required fields of an event submission.
    pub fn new(
        name: impl Into<String>,
        starts_at: DateTime<Utc>,
        ends_at: DateTime<Utc>,
        location: Option<String>,
        description: Option<String>,
    ) -> AppResult<Self> {
        Ok(Self {
            name: NonEmptyString::new(name)?,
            starts_at,
            ends_at,
            location: location.filter(|value| !value.trim().is_empty()),
            description: description.filter(|value| !value.trim().is_empty()),
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::NewEvent;

    #[test]
    fn rejects_blank_name() {
        let now = Utc::now();
        assert!(NewEvent::new("  ", now, now, None, None).is_err());
    }

    #[test]
    fn blank_optional_fields_become_none() {
        let now = Utc::now();
        let event = NewEvent::new("Show", now, now, Some("  ".to_owned()), None);
        assert!(event.is_ok_and(|e| e.location.is_none()));
    }
}
