//! Suite executor
//!
//! Drives one suite run through its lifecycle: before-suite hook, ordered
//! test cases with per-case isolation, after-suite hook, timing
//! finalization.
//!
//! Failure policy per hook kind:
//! - before-suite: abort the run, mark it failed, skip the after-suite hook;
//! - before-case: skip the body, force a zero duration, still emit
//!   after-case;
//! - after-case / after-suite: log only, recorded statuses stay untouched.
//!
//! A test-body failure is terminal at the case level: it marks the case and
//! the run failed and never propagates further. Driver acquisition errors
//! are the one thing that escapes; the batch scheduler logs them.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use tracing::{debug, error, info, warn};

use crate::config::RunConfig;
use crate::driver::{DriverFactory, DriverGuard};
use crate::events::{EventKind, EventManager, EventPayload, HookError};
use crate::models::{SuiteRunRecord, TestCaseDefinition, TestSuiteDefinition};
use crate::utils::screenshot_name;

/// Executes one suite run against one driver factory and one fresh set of
/// listeners.
pub struct SuiteExecutor {
    suite: Arc<TestSuiteDefinition>,
    events: EventManager,
    driver_factory: Arc<dyn DriverFactory>,
    screenshot_dir: PathBuf,
}

impl SuiteExecutor {
    pub fn new(
        suite: Arc<TestSuiteDefinition>,
        events: EventManager,
        driver_factory: Arc<dyn DriverFactory>,
        config: &RunConfig,
    ) -> Self {
        Self {
            suite,
            events,
            driver_factory,
            screenshot_dir: config.log_dir.clone(),
        }
    }

    /// Run the suite to completion and return its record.
    ///
    /// Hook and test-body failures are absorbed into the record; only driver
    /// acquisition errors escape.
    pub async fn run(self) -> Result<SuiteRunRecord> {
        let mut record = SuiteRunRecord::new(&self.suite);
        record.mark_running();
        info!("Starting suite '{}'", self.suite.name);

        if let Err(e) = self.emit(EventKind::BeforeSuite, &record, None).await {
            error!("Suite '{}' aborted: {e}", self.suite.name);
            record.mark_failed();
            record.finalize();
            // The one path that elides the after-suite hook.
            return Ok(record);
        }

        for (index, case) in self.suite.cases.iter().enumerate() {
            self.run_case(index, case, &mut record).await?;
        }

        record.settle();
        record.finalize();
        if let Err(e) = self.emit(EventKind::AfterSuite, &record, None).await {
            warn!("after-suite hook failed for '{}': {e}", self.suite.name);
        }

        info!(
            "Suite '{}' finished: {} - Pass: {}/{} ({:.1}%) in {}ms",
            self.suite.name,
            record.status,
            record.passed(),
            record.cases.len(),
            record.pass_rate(),
            record.duration_ms
        );
        Ok(record)
    }

    /// Run one test case, isolating hook and body failures so siblings are
    /// unaffected. `index` addresses the case's record and is surfaced to
    /// listeners through the event payload.
    async fn run_case(
        &self,
        index: usize,
        case: &TestCaseDefinition,
        record: &mut SuiteRunRecord,
    ) -> Result<()> {
        if !case.enabled {
            debug!("Skipping disabled case '{}'", case.name);
            record.cases[index].mark_skipped();
            return Ok(());
        }

        let mut guard = DriverGuard::acquire(self.driver_factory.as_ref()).await?;
        record.cases[index].mark_running();

        match self.emit(EventKind::BeforeCase, record, Some(index)).await {
            Err(e) => {
                warn!("before-case hook failed for '{}': {e}", case.name);
                record.cases[index].failure_message = Some(e.to_string());
                record.cases[index].force_zero_duration();
                if let Err(e) = guard.release().await {
                    warn!("driver release failed for '{}': {e:#}", case.name);
                }
            }
            Ok(()) => {
                match (case.action)(guard.driver_mut()).await {
                    Ok(()) => {
                        record.cases[index].mark_passed();
                        info!("  ✓ {}", case.name);
                    }
                    Err(e) => {
                        error!("  ✗ {}: {e:#}", case.name);
                        record.cases[index].mark_failed(format!("{e:#}"));
                        record.mark_failed();

                        let path = self.screenshot_dir.join(screenshot_name());
                        match guard.driver_mut().capture_screenshot(&path).await {
                            Ok(written) => record.cases[index].screenshot = Some(written),
                            Err(e) => {
                                warn!("screenshot capture failed for '{}': {e:#}", case.name)
                            }
                        }
                    }
                }
            }
        }

        if let Err(e) = self.emit(EventKind::AfterCase, record, Some(index)).await {
            warn!("after-case hook failed for '{}': {e}", case.name);
        }
        // No-op when the before-case failure path already released.
        if let Err(e) = guard.release().await {
            warn!("driver release failed for '{}': {e:#}", case.name);
        }
        Ok(())
    }

    async fn emit(
        &self,
        kind: EventKind,
        record: &SuiteRunRecord,
        case_index: Option<usize>,
    ) -> Result<(), HookError> {
        let payload = EventPayload {
            suite_id: &self.suite.id,
            suite_name: &self.suite.name,
            case_index,
            runner: record,
        };
        self.events.emit(kind, &payload).await
    }
}
