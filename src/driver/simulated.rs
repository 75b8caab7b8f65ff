//! Simulated driver
//!
//! In-process stand-in for a real browser/device session. Used by the
//! built-in demo suites and by unit tests; real deployments inject their own
//! [`Driver`](super::Driver) implementation through the factory trait.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use async_trait::async_trait;
use tracing::debug;

use super::{Driver, DriverFactory};

/// Minimal PNG header so simulated screenshots are recognizable artifacts.
const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

/// A fake automation session backed by an in-memory page model.
pub struct SimulatedDriver {
    started: bool,
    page: Option<String>,
    elements: HashMap<String, String>,
}

impl SimulatedDriver {
    pub fn new(elements: HashMap<String, String>) -> Self {
        Self {
            started: false,
            page: None,
            elements,
        }
    }

    fn ensure_started(&self) -> Result<()> {
        if !self.started {
            bail!("driver session not started");
        }
        Ok(())
    }
}

#[async_trait]
impl Driver for SimulatedDriver {
    async fn start(&mut self) -> Result<()> {
        if self.started {
            bail!("driver session already started");
        }
        self.started = true;
        debug!("simulated driver session started");
        Ok(())
    }

    async fn destroy(&mut self) -> Result<()> {
        self.ensure_started()?;
        self.started = false;
        self.page = None;
        debug!("simulated driver session destroyed");
        Ok(())
    }

    async fn navigate(&mut self, target: &str) -> Result<()> {
        self.ensure_started()?;
        self.page = Some(target.to_string());
        debug!("navigated to '{target}'");
        Ok(())
    }

    async fn click(&mut self, selector: &str) -> Result<()> {
        self.ensure_started()?;
        if self.page.is_none() {
            bail!("no page loaded, cannot click '{selector}'");
        }
        debug!("clicked '{selector}'");
        Ok(())
    }

    async fn read_text(&mut self, selector: &str) -> Result<String> {
        self.ensure_started()?;
        match self.elements.get(selector) {
            Some(text) => Ok(text.clone()),
            None => bail!("element '{selector}' not found"),
        }
    }

    async fn capture_screenshot(&mut self, path: &Path) -> Result<PathBuf> {
        self.ensure_started()?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(path, PNG_MAGIC).await?;
        debug!("screenshot written to {}", path.display());
        Ok(path.to_path_buf())
    }
}

/// Factory producing [`SimulatedDriver`] sessions seeded with a shared page
/// model.
#[derive(Clone, Default)]
pub struct SimulatedDriverFactory {
    elements: HashMap<String, String>,
}

impl SimulatedDriverFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an element visible to every created session.
    pub fn with_element(mut self, selector: impl Into<String>, text: impl Into<String>) -> Self {
        self.elements.insert(selector.into(), text.into());
        self
    }
}

#[async_trait]
impl DriverFactory for SimulatedDriverFactory {
    async fn create(&self) -> Result<Box<dyn Driver>> {
        Ok(Box::new(SimulatedDriver::new(self.elements.clone())))
    }
}
