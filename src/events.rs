use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{CalculationResult, LoanInput, SessionId};

/// all events that can be emitted by a form session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    CalculationPerformed {
        session_id: SessionId,
        input: LoanInput,
        result: CalculationResult,
        timestamp: DateTime<Utc>,
    },
    CalculationRejected {
        session_id: SessionId,
        reason: String,
        timestamp: DateTime<Utc>,
    },
    FormCleared {
        session_id: SessionId,
        had_result: bool,
        timestamp: DateTime<Utc>,
    },
}

/// event store for collecting events during a session
#[derive(Debug, Default)]
pub struct EventStore {
    events: Vec<Event>,
}

impl EventStore {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn emit(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
