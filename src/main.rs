//! ui-runner - UI test-suite execution orchestrator
//!
//! Runs independently defined UI test suites against an automation-driver
//! abstraction, in bounded-width concurrent batches, with lifecycle hooks
//! for external listeners and per-case failure isolation.
//!
//! ## Usage
//!
//! ```bash
//! # Run every registered suite, two at a time
//! ui-runner test-suite '*' --width 2
//!
//! # Run the login suites on Android with a config file
//! ui-runner test-suite 'login-*' --platform android --config run.yaml
//!
//! # List registered suites
//! ui-runner list --detailed
//! ```

use std::sync::Arc;

use anyhow::{anyhow, Result};
use clap::Parser;
use tracing::info;

mod cli;
mod config;
mod driver;
mod events;
mod executor;
mod loader;
mod models;
mod output;
mod suites;
mod utils;

use cli::Args;
use config::{Platform, RunConfig};
use driver::DriverFactory;
use events::{EventManager, LoggingListener};
use executor::{BatchScheduler, SuiteExecutor};
use loader::{ListenerRegistry, ListenerSource, SuiteSource};
use models::SuiteStatus;
use output::{format_duration_ms, OutputFormat, ResultFormatter};
use utils::{init_logger, LogLevel, Timer};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let level = if args.verbose {
        LogLevel::Debug
    } else {
        LogLevel::Info
    };

    match args.command {
        cli::Command::TestSuite(test_args) => {
            run_suites(test_args, level).await?;
        }
        cli::Command::List(list_args) => {
            list_suites(list_args);
        }
    }

    Ok(())
}

async fn run_suites(args: cli::TestSuiteArgs, level: LogLevel) -> Result<()> {
    let platform = Platform::from_str(&args.platform)
        .ok_or_else(|| anyhow!("Unknown platform: {}", args.platform))?;
    init_logger(level, platform);

    let config = match &args.config {
        Some(path) => RunConfig::load(path)?,
        None => RunConfig::default(),
    }
    .with_platform(platform);

    let format = OutputFormat::from_str(&args.format)
        .ok_or_else(|| anyhow!("Unknown output format: {}", args.format))?;

    let registry = suites::builtin_registry();
    let selected = registry.load(&args.pattern)?;

    let mut listeners = ListenerRegistry::new();
    let target = platform.log_target();
    listeners.register(move || Box::new(LoggingListener::new(target)));

    // Batch width is a single top-level scheduling parameter: the resolved
    // config's value, or the CLI override.
    let width = args.width.unwrap_or(config.parallel_execution);

    info!(
        "Running {} suite(s) on {} (width {width})",
        selected.len(),
        platform
    );

    let factory: Arc<dyn DriverFactory> = Arc::new(suites::demo_driver_factory());

    let mut executors = Vec::with_capacity(selected.len());
    for suite in selected {
        let mut events = EventManager::new();
        for listener in listeners.instantiate() {
            events.register(listener);
        }
        executors.push(SuiteExecutor::new(suite, events, factory.clone(), &config));
    }

    let timer = Timer::start("run");
    let outcomes = BatchScheduler::new(width).run_executors(executors).await;

    let formatter = ResultFormatter::new(format);
    let mut failed = 0usize;
    for outcome in &outcomes {
        match outcome {
            Ok(record) => {
                if record.status == SuiteStatus::Failed {
                    failed += 1;
                }
                println!("{}", formatter.format_record(record));
            }
            // Rejections were already logged by the scheduler.
            Err(_) => failed += 1,
        }
    }

    info!(
        "All batches settled in {} - {}/{} suite(s) failed",
        format_duration_ms(timer.elapsed_ms()),
        failed,
        outcomes.len()
    );

    // Suite and case failures are observational (logs, screenshots,
    // records); they do not set the process exit status.
    Ok(())
}

fn list_suites(args: cli::ListArgs) {
    let registry = suites::builtin_registry();

    println!("Registered suites:");
    for suite in registry.suites() {
        println!("  {} - {}", suite.id, suite.name);
        if args.detailed {
            for case in &suite.cases {
                let marker = if case.enabled { " " } else { " (disabled)" };
                println!("    {} - {}{}", case.id, case.name, marker);
            }
        }
    }

    println!("\nPlatforms:");
    for platform in Platform::all() {
        println!("  {} - {}", platform.log_target(), platform.name());
    }
}
