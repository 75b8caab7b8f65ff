//! Run records for suite execution
//!
//! Mutable per-run state: one record per suite run, one per test case,
//! index-aligned with the suite definition. Records are mutated only by the
//! suite executor and read-only to lifecycle listeners.

#![allow(dead_code)]

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

use super::suite::TestSuiteDefinition;

/// Status of a single test case run.
///
/// `Pending -> Running -> {Passed, Failed}`, with `Skipped` reachable
/// directly from `Pending` for disabled cases.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseStatus {
    Pending,
    Running,
    Passed,
    Failed,
    Skipped,
}

impl CaseStatus {
    pub fn symbol(&self) -> &'static str {
        match self {
            CaseStatus::Pending => "·",
            CaseStatus::Running => "…",
            CaseStatus::Passed => "✓",
            CaseStatus::Failed => "✗",
            CaseStatus::Skipped => "○",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            CaseStatus::Passed | CaseStatus::Failed | CaseStatus::Skipped
        )
    }
}

impl fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaseStatus::Pending => write!(f, "PENDING"),
            CaseStatus::Running => write!(f, "RUNNING"),
            CaseStatus::Passed => write!(f, "PASS"),
            CaseStatus::Failed => write!(f, "FAIL"),
            CaseStatus::Skipped => write!(f, "SKIP"),
        }
    }
}

/// Status of one suite run. `Failed` is sticky: once set it is never
/// reverted to `Passed`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SuiteStatus {
    NotStarted,
    Running,
    Passed,
    Failed,
}

impl fmt::Display for SuiteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SuiteStatus::NotStarted => write!(f, "NOT_STARTED"),
            SuiteStatus::Running => write!(f, "RUNNING"),
            SuiteStatus::Passed => write!(f, "PASS"),
            SuiteStatus::Failed => write!(f, "FAIL"),
        }
    }
}

/// Execution record for one test case within one suite run.
#[derive(Clone, Debug, Serialize)]
pub struct TestCaseRunRecord {
    pub case_id: String,
    pub case_name: String,
    pub status: CaseStatus,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
    pub duration_ms: u64,
    pub failure_message: Option<String>,
    pub screenshot: Option<PathBuf>,
}

impl TestCaseRunRecord {
    pub fn pending(case_id: impl Into<String>, case_name: impl Into<String>) -> Self {
        Self {
            case_id: case_id.into(),
            case_name: case_name.into(),
            status: CaseStatus::Pending,
            started_at: None,
            finished_at: None,
            duration_ms: 0,
            failure_message: None,
            screenshot: None,
        }
    }

    pub fn mark_running(&mut self) {
        self.status = CaseStatus::Running;
        self.started_at = Some(Utc::now());
    }

    pub fn mark_passed(&mut self) {
        self.status = CaseStatus::Passed;
        self.finish();
    }

    pub fn mark_failed(&mut self, message: impl Into<String>) {
        self.status = CaseStatus::Failed;
        self.failure_message = Some(message.into());
        self.finish();
    }

    pub fn mark_skipped(&mut self) {
        self.status = CaseStatus::Skipped;
    }

    /// Force a zero duration; used when a before-case hook fails and the
    /// body never ran.
    pub fn force_zero_duration(&mut self) {
        self.finished_at = self.started_at;
        self.duration_ms = 0;
    }

    fn finish(&mut self) {
        let now = Utc::now();
        self.finished_at = Some(now);
        if let Some(start) = self.started_at {
            self.duration_ms = (now - start).num_milliseconds().max(0) as u64;
        }
    }
}

impl fmt::Display for TestCaseRunRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} [{}ms]",
            self.status.symbol(),
            self.case_name,
            self.duration_ms
        )?;
        if let Some(msg) = &self.failure_message {
            write!(f, " - {msg}")?;
        }
        Ok(())
    }
}

/// Execution record for one suite run ("the runner").
///
/// Case records are index-aligned with the definition's cases.
#[derive(Clone, Debug, Serialize)]
pub struct SuiteRunRecord {
    pub suite_id: String,
    pub suite_name: String,
    pub status: SuiteStatus,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
    pub duration_ms: u64,
    pub cases: Vec<TestCaseRunRecord>,
}

impl SuiteRunRecord {
    /// Create a fresh record for one run of `suite`, all cases pending.
    pub fn new(suite: &TestSuiteDefinition) -> Self {
        Self {
            suite_id: suite.id.clone(),
            suite_name: suite.name.clone(),
            status: SuiteStatus::NotStarted,
            started_at: None,
            finished_at: None,
            duration_ms: 0,
            cases: suite
                .cases
                .iter()
                .map(|c| TestCaseRunRecord::pending(&c.id, &c.name))
                .collect(),
        }
    }

    pub fn mark_running(&mut self) {
        self.status = SuiteStatus::Running;
        self.started_at = Some(Utc::now());
    }

    pub fn mark_failed(&mut self) {
        self.status = SuiteStatus::Failed;
    }

    /// Resolve the terminal status: a run that was never failed passes.
    pub fn settle(&mut self) {
        if self.status == SuiteStatus::Running {
            self.status = SuiteStatus::Passed;
        }
    }

    /// Record end time and total duration.
    pub fn finalize(&mut self) {
        let now = Utc::now();
        self.finished_at = Some(now);
        if let Some(start) = self.started_at {
            self.duration_ms = (now - start).num_milliseconds().max(0) as u64;
        }
    }

    pub fn passed(&self) -> usize {
        self.count(CaseStatus::Passed)
    }

    pub fn failed(&self) -> usize {
        self.count(CaseStatus::Failed)
    }

    pub fn skipped(&self) -> usize {
        self.count(CaseStatus::Skipped)
    }

    pub fn pass_rate(&self) -> f64 {
        if self.cases.is_empty() {
            0.0
        } else {
            (self.passed() as f64 / self.cases.len() as f64) * 100.0
        }
    }

    fn count(&self, status: CaseStatus) -> usize {
        self.cases.iter().filter(|c| c.status == status).count()
    }
}

impl fmt::Display for SuiteRunRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} - {}", self.suite_name, self.status)?;
        for case in &self.cases {
            writeln!(f, "  {case}")?;
        }
        write!(
            f,
            "Total: {} | Pass: {} | Fail: {} | Skip: {} | {}ms",
            self.cases.len(),
            self.passed(),
            self.failed(),
            self.skipped(),
            self.duration_ms
        )
    }
}
