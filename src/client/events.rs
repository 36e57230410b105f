//! Post-write change notifications.
//!
//! Listeners are registered on a `DatabaseClient` instance and run
//! synchronously, in registration order, after a write succeeds. Events carry
//! the inputs of the triggering call, not driver-confirmed row counts.

use std::sync::{Arc, Mutex};

use serde::Serialize;

use crate::db::Record;
use crate::queries::Predicate;

/// A successful write.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "lowercase")]
pub enum ChangeEvent {
    Saved {
        table: String,
        record: Record,
    },
    Updated {
        table: String,
        filter: Vec<Predicate>,
        update: Record,
    },
    Deleted {
        table: String,
        filter: Vec<Predicate>,
    },
}

impl ChangeEvent {
    pub fn table(&self) -> &str {
        match self {
            Self::Saved { table, .. } | Self::Updated { table, .. } | Self::Deleted { table, .. } => {
                table
            }
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Saved { .. } => "saved",
            Self::Updated { .. } => "updated",
            Self::Deleted { .. } => "deleted",
        }
    }
}

/// Observer of successful writes.
pub trait ChangeListener: Send + Sync {
    fn on_change(&self, event: &ChangeEvent);
}

impl<F> ChangeListener for F
where
    F: Fn(&ChangeEvent) + Send + Sync,
{
    fn on_change(&self, event: &ChangeEvent) {
        self(event)
    }
}

/// Listener that keeps every event it receives.
///
/// Clones share the same buffer, so one clone can be registered while the
/// other is kept for inspection.
#[derive(Debug, Clone, Default)]
pub struct RecordingListener {
    events: Arc<Mutex<Vec<ChangeEvent>>>,
}

impl RecordingListener {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events received so far.
    pub fn events(&self) -> Vec<ChangeEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }
}

impl ChangeListener for RecordingListener {
    fn on_change(&self, event: &ChangeEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn deleted() -> ChangeEvent {
        ChangeEvent::Deleted {
            table: "users".to_string(),
            filter: vec![Predicate::equals("id", "1")],
        }
    }

    #[test]
    fn test_event_accessors() {
        let event = deleted();
        assert_eq!(event.table(), "users");
        assert_eq!(event.kind(), "deleted");
    }

    #[test]
    fn test_closure_listener() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let listener = move |_: &ChangeEvent| {
            counter.fetch_add(1, Ordering::SeqCst);
        };

        listener.on_change(&deleted());
        listener.on_change(&deleted());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_recording_listener_clones_share_buffer() {
        let recorder = RecordingListener::new();
        let registered = recorder.clone();
        registered.on_change(&deleted());
        assert_eq!(recorder.events(), vec![deleted()]);
    }

    #[test]
    fn test_event_serialization() {
        let event = ChangeEvent::Saved {
            table: "users".to_string(),
            record: json!({"id": "1"}).as_object().unwrap().clone(),
        };
        assert_eq!(
            serde_json::to_value(&event).unwrap(),
            json!({"event": "saved", "table": "users", "record": {"id": "1"}})
        );
    }
}
