//! Test suite and test case definitions
//!
//! Immutable definitions produced by a suite source; one definition can back
//! any number of runs.

#![allow(dead_code)]

use std::fmt;
use std::sync::Arc;

use anyhow::Result;
use futures::future::BoxFuture;

use crate::driver::Driver;

/// Boxed asynchronous test body, bound to a driver handle for its run.
pub type CaseAction =
    Arc<dyn for<'a> Fn(&'a mut dyn Driver) -> BoxFuture<'a, Result<()>> + Send + Sync>;

/// Wrap a closure as a [`CaseAction`].
pub fn case_action<F>(f: F) -> CaseAction
where
    F: for<'a> Fn(&'a mut dyn Driver) -> BoxFuture<'a, Result<()>> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// A single executable test case bound to a suite.
#[derive(Clone)]
pub struct TestCaseDefinition {
    pub id: String,
    pub name: String,
    pub enabled: bool,
    pub action: CaseAction,
}

impl TestCaseDefinition {
    pub fn new(id: impl Into<String>, name: impl Into<String>, action: CaseAction) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            enabled: true,
            action,
        }
    }

    /// Mark the case disabled; a disabled case is recorded as skipped and
    /// never acquires a driver.
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

impl fmt::Debug for TestCaseDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestCaseDefinition")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("enabled", &self.enabled)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for TestCaseDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

/// An ordered collection of test cases sharing one lifecycle run.
#[derive(Clone, Debug)]
pub struct TestSuiteDefinition {
    pub id: String,
    pub name: String,
    pub cases: Vec<TestCaseDefinition>,
}

impl TestSuiteDefinition {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            cases: Vec::new(),
        }
    }

    pub fn with_case(mut self, case: TestCaseDefinition) -> Self {
        self.cases.push(case);
        self
    }

    pub fn case_count(&self) -> usize {
        self.cases.len()
    }

    pub fn enabled_count(&self) -> usize {
        self.cases.iter().filter(|c| c.enabled).count()
    }
}

impl fmt::Display for TestSuiteDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {} cases)", self.name, self.id, self.cases.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop_action() -> CaseAction {
        case_action(|_driver| Box::pin(async { Ok(()) }))
    }

    #[test]
    fn case_enabled_by_default() {
        let case = TestCaseDefinition::new("c1", "First case", noop_action());
        assert!(case.enabled);
        assert!(!case.clone().disabled().enabled);
    }

    #[test]
    fn suite_builder_collects_cases() {
        let suite = TestSuiteDefinition::new("s1", "Smoke")
            .with_case(TestCaseDefinition::new("c1", "One", noop_action()))
            .with_case(TestCaseDefinition::new("c2", "Two", noop_action()).disabled());

        assert_eq!(suite.case_count(), 2);
        assert_eq!(suite.enabled_count(), 1);
    }

    #[test]
    fn display_formats() {
        let suite = TestSuiteDefinition::new("s1", "Smoke");
        assert_eq!(suite.to_string(), "Smoke (s1, 0 cases)");
    }
}
