//! Lifecycle event dispatch
//!
//! Four hook points bracket suite and case execution. Listeners are invoked
//! in registration order, each awaited to completion before the next starts;
//! the first listener error stops the emission and propagates to the caller.
//! How that error is handled differs per hook kind and is the suite
//! executor's concern, not the dispatcher's.

#![allow(dead_code)]

use std::fmt;

use anyhow::Result;
use async_trait::async_trait;
use thiserror::Error;
use tracing::info;

use crate::models::SuiteRunRecord;

/// The four lifecycle hook kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    BeforeSuite,
    BeforeCase,
    AfterCase,
    AfterSuite,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventKind::BeforeSuite => write!(f, "before-suite"),
            EventKind::BeforeCase => write!(f, "before-case"),
            EventKind::AfterCase => write!(f, "after-case"),
            EventKind::AfterSuite => write!(f, "after-suite"),
        }
    }
}

/// Read-only view of the run handed to listeners.
///
/// `case_index` identifies the case in flight for the per-case hooks and is
/// `None` for the suite-level hooks.
pub struct EventPayload<'a> {
    pub suite_id: &'a str,
    pub suite_name: &'a str,
    pub case_index: Option<usize>,
    pub runner: &'a SuiteRunRecord,
}

/// A lifecycle observer. Constructed fresh for each suite run from the
/// injected listener source.
#[async_trait]
pub trait LifecycleListener: Send + Sync {
    async fn on_event(&self, kind: EventKind, payload: &EventPayload<'_>) -> Result<()>;

    fn name(&self) -> &str {
        "listener"
    }
}

/// A listener failure, tagged with the hook kind it interrupted.
#[derive(Debug, Error)]
#[error("{kind} listener '{listener}' failed: {source}")]
pub struct HookError {
    pub kind: EventKind,
    pub listener: String,
    #[source]
    pub source: anyhow::Error,
}

/// Ordered multi-listener dispatcher for one suite run.
#[derive(Default)]
pub struct EventManager {
    listeners: Vec<Box<dyn LifecycleListener>>,
}

impl EventManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, listener: Box<dyn LifecycleListener>) {
        self.listeners.push(listener);
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Invoke every listener for `kind` in registration order. Each is
    /// awaited fully before the next starts; the first error short-circuits
    /// and later listeners are not invoked.
    pub async fn emit(
        &self,
        kind: EventKind,
        payload: &EventPayload<'_>,
    ) -> Result<(), HookError> {
        for listener in &self.listeners {
            if let Err(source) = listener.on_event(kind, payload).await {
                return Err(HookError {
                    kind,
                    listener: listener.name().to_string(),
                    source,
                });
            }
        }
        Ok(())
    }
}

/// Shipping listener that traces every hook emission.
pub struct LoggingListener {
    target: &'static str,
}

impl LoggingListener {
    pub fn new(target: &'static str) -> Self {
        Self { target }
    }
}

#[async_trait]
impl LifecycleListener for LoggingListener {
    async fn on_event(&self, kind: EventKind, payload: &EventPayload<'_>) -> Result<()> {
        match payload.case_index {
            Some(index) => {
                let case = payload.runner.cases.get(index);
                info!(
                    "[{}] {} hook: suite '{}' case #{} ({})",
                    self.target,
                    kind,
                    payload.suite_name,
                    index + 1,
                    case.map(|c| c.case_name.as_str()).unwrap_or("?"),
                );
            }
            None => info!(
                "[{}] {} hook: suite '{}'",
                self.target, kind, payload.suite_name
            ),
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "logging"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TestSuiteDefinition;
    use anyhow::anyhow;
    use std::sync::{Arc, Mutex};

    struct RecordingListener {
        id: &'static str,
        seen: Arc<Mutex<Vec<String>>>,
        fail_on: Option<EventKind>,
    }

    #[async_trait]
    impl LifecycleListener for RecordingListener {
        async fn on_event(&self, kind: EventKind, _payload: &EventPayload<'_>) -> Result<()> {
            self.seen.lock().unwrap().push(format!("{}:{kind}", self.id));
            if self.fail_on == Some(kind) {
                return Err(anyhow!("listener {} rejected {kind}", self.id));
            }
            Ok(())
        }

        fn name(&self) -> &str {
            self.id
        }
    }

    fn empty_record() -> SuiteRunRecord {
        SuiteRunRecord::new(&TestSuiteDefinition::new("s1", "Sample"))
    }

    #[tokio::test]
    async fn listeners_run_in_registration_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut manager = EventManager::new();
        for id in ["a", "b", "c"] {
            manager.register(Box::new(RecordingListener {
                id,
                seen: seen.clone(),
                fail_on: None,
            }));
        }

        let record = empty_record();
        let payload = EventPayload {
            suite_id: "s1",
            suite_name: "Sample",
            case_index: None,
            runner: &record,
        };
        manager.emit(EventKind::BeforeSuite, &payload).await.unwrap();

        assert_eq!(
            *seen.lock().unwrap(),
            vec!["a:before-suite", "b:before-suite", "c:before-suite"]
        );
    }

    #[tokio::test]
    async fn first_failure_short_circuits() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut manager = EventManager::new();
        manager.register(Box::new(RecordingListener {
            id: "a",
            seen: seen.clone(),
            fail_on: None,
        }));
        manager.register(Box::new(RecordingListener {
            id: "b",
            seen: seen.clone(),
            fail_on: Some(EventKind::AfterCase),
        }));
        manager.register(Box::new(RecordingListener {
            id: "c",
            seen: seen.clone(),
            fail_on: None,
        }));

        let record = empty_record();
        let payload = EventPayload {
            suite_id: "s1",
            suite_name: "Sample",
            case_index: Some(0),
            runner: &record,
        };
        let err = manager
            .emit(EventKind::AfterCase, &payload)
            .await
            .unwrap_err();

        assert_eq!(err.kind, EventKind::AfterCase);
        assert_eq!(err.listener, "b");
        // Listener c never ran.
        assert_eq!(*seen.lock().unwrap(), vec!["a:after-case", "b:after-case"]);
    }
}
