//! Batch scheduler
//!
//! Partitions suite executions into consecutive batches of bounded width and
//! drives each batch to completion before starting the next. A rejected
//! member is logged and does not cancel its batch-mates or stop the
//! scheduler; every settled outcome is kept, in input order.
//!
//! Concurrency is cooperative interleaving within one runtime: batches are
//! driven with `join_all`, nothing is spawned and nothing is cancelled or
//! timed out at this layer.

#![allow(dead_code)]

use anyhow::Result;
use futures::future::{join_all, BoxFuture};
use tracing::{debug, error, info};

use crate::config::RunConfig;
use crate::models::SuiteRunRecord;

use super::suite::SuiteExecutor;

/// A deferred suite execution.
pub type SuiteThunk = Box<dyn FnOnce() -> BoxFuture<'static, Result<SuiteRunRecord>> + Send>;

/// Runs suite executions in fixed-width concurrent batches.
pub struct BatchScheduler {
    width: usize,
}

impl BatchScheduler {
    /// Create a scheduler with the given batch width. A width of zero is
    /// clamped to 1.
    pub fn new(width: usize) -> Self {
        Self {
            width: width.max(1),
        }
    }

    pub fn from_config(config: &RunConfig) -> Self {
        Self::new(config.parallel_execution)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Drive every thunk to a terminal outcome.
    ///
    /// Thunks are taken in order, `width` at a time; a batch must fully
    /// settle before the next starts. Rejections are logged and returned
    /// alongside the successful records.
    pub async fn run(&self, thunks: Vec<SuiteThunk>) -> Vec<Result<SuiteRunRecord>> {
        let total = thunks.len();
        let batches = total.div_ceil(self.width);
        info!(
            "Scheduling {total} suite(s) in {batches} batch(es), width {}",
            self.width
        );

        let mut outcomes = Vec::with_capacity(total);
        let mut pending = thunks.into_iter();
        let mut batch_no = 0usize;

        loop {
            let batch: Vec<SuiteThunk> = pending.by_ref().take(self.width).collect();
            if batch.is_empty() {
                break;
            }
            batch_no += 1;
            debug!("Batch {batch_no}/{batches}: {} suite(s)", batch.len());

            let settled = join_all(batch.into_iter().map(|thunk| thunk())).await;
            for outcome in &settled {
                if let Err(e) = outcome {
                    error!("Suite execution rejected: {e:#}");
                }
            }
            outcomes.extend(settled);
        }

        outcomes
    }

    /// Convenience wrapper: box executors into thunks and run them.
    pub async fn run_executors(
        &self,
        executors: Vec<SuiteExecutor>,
    ) -> Vec<Result<SuiteRunRecord>> {
        let thunks: Vec<SuiteThunk> = executors
            .into_iter()
            .map(|executor| {
                Box::new(move || -> BoxFuture<'static, Result<SuiteRunRecord>> {
                    Box::pin(executor.run())
                }) as SuiteThunk
            })
            .collect();
        self.run(thunks).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TestSuiteDefinition;
    use anyhow::anyhow;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    /// Thunk that records batch ordering through a shared log.
    fn tracking_thunk(
        id: usize,
        log: Arc<Mutex<Vec<String>>>,
        fail: bool,
    ) -> SuiteThunk {
        Box::new(move || -> BoxFuture<'static, Result<SuiteRunRecord>> {
            Box::pin(async move {
                log.lock().unwrap().push(format!("start {id}"));
                // Yield so batch-mates interleave.
                tokio::time::sleep(Duration::from_millis(5)).await;
                log.lock().unwrap().push(format!("end {id}"));
                if fail {
                    Err(anyhow!("suite {id} exploded"))
                } else {
                    Ok(SuiteRunRecord::new(&TestSuiteDefinition::new(
                        format!("s{id}"),
                        format!("Suite {id}"),
                    )))
                }
            })
        })
    }

    #[tokio::test]
    async fn batches_respect_width_and_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let thunks = (1..=5)
            .map(|id| tracking_thunk(id, log.clone(), false))
            .collect();

        let outcomes = BatchScheduler::new(2).run(thunks).await;
        assert_eq!(outcomes.len(), 5);
        assert!(outcomes.iter().all(|o| o.is_ok()));

        let log = log.lock().unwrap();
        let position = |entry: &str| log.iter().position(|l| l == entry).unwrap();
        // ceil(5/2) = 3 batches: [1,2], [3,4], [5]. Nothing in a later batch
        // starts before everything in the earlier batch has ended.
        assert!(position("start 3") > position("end 1"));
        assert!(position("start 3") > position("end 2"));
        assert!(position("start 5") > position("end 3"));
        assert!(position("start 5") > position("end 4"));
        // Batch-mates both start before either ends.
        assert!(position("start 2") < position("end 1"));
    }

    #[tokio::test]
    async fn rejected_member_does_not_stop_the_scheduler() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let thunks = vec![
            tracking_thunk(1, log.clone(), false),
            tracking_thunk(2, log.clone(), true),
            tracking_thunk(3, log.clone(), false),
        ];

        let outcomes = BatchScheduler::new(2).run(thunks).await;

        assert_eq!(outcomes.len(), 3);
        assert!(outcomes[0].is_ok());
        assert!(outcomes[1].is_err());
        assert!(outcomes[2].is_ok());
        // Suite 3 (second batch) still ran after suite 2's rejection.
        assert!(log.lock().unwrap().contains(&"end 3".to_string()));
    }

    #[tokio::test]
    async fn zero_width_is_clamped() {
        let scheduler = BatchScheduler::new(0);
        assert_eq!(scheduler.width(), 1);

        let log = Arc::new(Mutex::new(Vec::new()));
        let thunks = (1..=2)
            .map(|id| tracking_thunk(id, log.clone(), false))
            .collect();
        let outcomes = scheduler.run(thunks).await;
        assert_eq!(outcomes.len(), 2);

        // Width 1 serializes: suite 2 starts only after suite 1 ends.
        let log = log.lock().unwrap();
        let position = |entry: &str| log.iter().position(|l| l == entry).unwrap();
        assert!(position("start 2") > position("end 1"));
    }

    #[tokio::test]
    async fn empty_input_yields_no_outcomes() {
        let outcomes = BatchScheduler::new(4).run(Vec::new()).await;
        assert!(outcomes.is_empty());
    }

    #[tokio::test]
    async fn failing_suite_does_not_touch_its_neighbours() {
        use crate::config::RunConfig;
        use crate::driver::SimulatedDriverFactory;
        use crate::events::EventManager;
        use crate::executor::SuiteExecutor;
        use crate::models::{case_action, SuiteStatus, TestCaseDefinition};
        use anyhow::bail;

        let dir = tempfile::tempdir().unwrap();
        let config = RunConfig {
            log_dir: dir.path().to_path_buf(),
            ..Default::default()
        };
        let factory = Arc::new(SimulatedDriverFactory::new());

        let make_suite = |id: &str, fail: bool| {
            let case = if fail {
                TestCaseDefinition::new(
                    "c1",
                    "only case",
                    case_action(|_driver| Box::pin(async { bail!("broken") })),
                )
            } else {
                TestCaseDefinition::new(
                    "c1",
                    "only case",
                    case_action(|_driver| Box::pin(async { Ok(()) })),
                )
            };
            TestSuiteDefinition::new(id, id.to_uppercase()).with_case(case)
        };

        let executors = vec![
            SuiteExecutor::new(
                Arc::new(make_suite("s1", false)),
                EventManager::new(),
                factory.clone(),
                &config,
            ),
            SuiteExecutor::new(
                Arc::new(make_suite("s2", true)),
                EventManager::new(),
                factory.clone(),
                &config,
            ),
            SuiteExecutor::new(
                Arc::new(make_suite("s3", false)),
                EventManager::new(),
                factory,
                &config,
            ),
        ];

        // 3 suites at width 2: batches of sizes [2, 1].
        let outcomes = BatchScheduler::new(2).run_executors(executors).await;
        assert_eq!(outcomes.len(), 3);

        let statuses: Vec<SuiteStatus> = outcomes
            .iter()
            .map(|o| o.as_ref().unwrap().status)
            .collect();
        assert_eq!(
            statuses,
            vec![SuiteStatus::Passed, SuiteStatus::Failed, SuiteStatus::Passed]
        );
    }
}
