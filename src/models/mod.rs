//! Data models for suite execution
//!
//! Immutable suite/case definitions and the mutable per-run records.

mod run_record;
mod suite;

pub use run_record::{CaseStatus, SuiteRunRecord, SuiteStatus, TestCaseRunRecord};
pub use suite::{case_action, CaseAction, TestCaseDefinition, TestSuiteDefinition};
