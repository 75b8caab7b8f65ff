//! Suite and listener sources
//!
//! The orchestrator never resolves filesystem or module-system specifics
//! itself: suites and listeners arrive through these injected traits. The
//! registry implementations back the built-in CLI; deployments that load
//! definitions from elsewhere implement the same traits.

use std::sync::Arc;

use anyhow::{bail, Result};

use crate::events::LifecycleListener;
use crate::models::TestSuiteDefinition;

/// Given a locator pattern, produce suite definitions.
pub trait SuiteSource: Send + Sync {
    fn load(&self, pattern: &str) -> Result<Vec<Arc<TestSuiteDefinition>>>;
}

/// Produces a fresh listener set for each suite run.
pub trait ListenerSource: Send + Sync {
    fn instantiate(&self) -> Vec<Box<dyn LifecycleListener>>;
}

/// In-memory suite source matching suites by id pattern.
#[derive(Default)]
pub struct SuiteRegistry {
    suites: Vec<Arc<TestSuiteDefinition>>,
}

impl SuiteRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, suite: TestSuiteDefinition) {
        self.suites.push(Arc::new(suite));
    }

    pub fn suites(&self) -> &[Arc<TestSuiteDefinition>] {
        &self.suites
    }
}

impl SuiteSource for SuiteRegistry {
    fn load(&self, pattern: &str) -> Result<Vec<Arc<TestSuiteDefinition>>> {
        let matched: Vec<_> = self
            .suites
            .iter()
            .filter(|s| pattern_matches(pattern, &s.id))
            .cloned()
            .collect();
        if matched.is_empty() {
            bail!("no suites matched pattern '{pattern}'");
        }
        Ok(matched)
    }
}

/// Listener constructor invoked once per suite run.
pub type ListenerCtor = Arc<dyn Fn() -> Box<dyn LifecycleListener> + Send + Sync>;

/// In-memory listener source holding constructors.
#[derive(Default)]
pub struct ListenerRegistry {
    ctors: Vec<ListenerCtor>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<F>(&mut self, ctor: F)
    where
        F: Fn() -> Box<dyn LifecycleListener> + Send + Sync + 'static,
    {
        self.ctors.push(Arc::new(ctor));
    }
}

impl ListenerSource for ListenerRegistry {
    fn instantiate(&self) -> Vec<Box<dyn LifecycleListener>> {
        self.ctors.iter().map(|ctor| ctor()).collect()
    }
}

/// Match a suite id against a locator pattern: `*` matches everything, a
/// trailing `*` matches by prefix, anything else matches exactly.
fn pattern_matches(pattern: &str, id: &str) -> bool {
    if pattern == "*" {
        return true;
    }
    match pattern.strip_suffix('*') {
        Some(prefix) => id.starts_with(prefix),
        None => id == pattern,
    }
}
