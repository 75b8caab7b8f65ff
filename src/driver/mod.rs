//! Automation driver abstraction
//!
//! One driver handle is bound to one test case's execution: started before
//! use, destroyed exactly once after, regardless of outcome.

mod guard;
mod simulated;

use std::path::{Path, PathBuf};

use anyhow::Result;
use async_trait::async_trait;

pub use guard::DriverGuard;
pub use simulated::{SimulatedDriver, SimulatedDriverFactory};

/// One automation session. Implementations wrap a browser or device
/// connection; this crate ships [`SimulatedDriver`] for local runs and tests.
#[async_trait]
pub trait Driver: Send {
    /// Start the session. Must be called before any action.
    async fn start(&mut self) -> Result<()>;

    /// Tear the session down. Called exactly once per handle by the guard.
    async fn destroy(&mut self) -> Result<()>;

    /// Navigate to a page or screen.
    async fn navigate(&mut self, target: &str) -> Result<()>;

    /// Click the element matching `selector`.
    async fn click(&mut self, selector: &str) -> Result<()>;

    /// Read the text content of the element matching `selector`.
    async fn read_text(&mut self, selector: &str) -> Result<String>;

    /// Capture a screenshot to `path`, returning the written path.
    async fn capture_screenshot(&mut self, path: &Path) -> Result<PathBuf>;
}

/// Produces one driver handle per enabled test case.
#[async_trait]
pub trait DriverFactory: Send + Sync {
    async fn create(&self) -> Result<Box<dyn Driver>>;
}
