//! Driver lifecycle guard
//!
//! Brackets one test case's driver usage: acquire + start on entry, destroy
//! on every exit path. Release is idempotent so error-handling paths may
//! release a handle that the shared cleanup releases again.

#![allow(dead_code)]

use anyhow::{Context, Result};
use tracing::debug;

use super::{Driver, DriverFactory};

/// Owns one started driver handle and guarantees it is destroyed at most
/// once.
pub struct DriverGuard {
    driver: Box<dyn Driver>,
    released: bool,
}

impl DriverGuard {
    /// Create and start a driver handle from `factory`.
    pub async fn acquire(factory: &dyn DriverFactory) -> Result<Self> {
        let mut driver = factory
            .create()
            .await
            .context("driver factory failed to create a session")?;
        driver
            .start()
            .await
            .context("driver session failed to start")?;
        Ok(Self {
            driver,
            released: false,
        })
    }

    /// Access the underlying driver. Callers must not use the handle after
    /// [`release`](Self::release).
    pub fn driver_mut(&mut self) -> &mut dyn Driver {
        self.driver.as_mut()
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    /// Destroy the handle. A second call on a released handle is a no-op
    /// and returns `Ok`.
    pub async fn release(&mut self) -> Result<()> {
        if self.released {
            debug!("driver already released, ignoring");
            return Ok(());
        }
        self.released = true;
        self.driver
            .destroy()
            .await
            .context("driver session failed to shut down")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::SimulatedDriverFactory;

    #[tokio::test]
    async fn acquire_starts_the_driver() {
        let factory = SimulatedDriverFactory::new();
        let mut guard = DriverGuard::acquire(&factory).await.unwrap();
        assert!(!guard.is_released());
        // A started driver accepts actions.
        guard.driver_mut().navigate("home").await.unwrap();
        guard.release().await.unwrap();
    }

    #[tokio::test]
    async fn release_is_idempotent() {
        let factory = SimulatedDriverFactory::new();
        let mut guard = DriverGuard::acquire(&factory).await.unwrap();

        guard.release().await.unwrap();
        assert!(guard.is_released());

        // Second release must not error and must not change state.
        guard.release().await.unwrap();
        assert!(guard.is_released());
    }
}
