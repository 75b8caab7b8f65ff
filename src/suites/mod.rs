//! Built-in demo suites
//!
//! Runnable suite definitions against the simulated driver, registered with
//! the default suite registry. They exercise the orchestrator end to end;
//! real deployments register their own definitions through
//! [`SuiteSource`](crate::loader::SuiteSource).

use anyhow::ensure;

use crate::driver::SimulatedDriverFactory;
use crate::loader::SuiteRegistry;
use crate::models::{case_action, TestCaseDefinition, TestSuiteDefinition};

/// Driver factory seeded with the page model the demo suites expect.
pub fn demo_driver_factory() -> SimulatedDriverFactory {
    SimulatedDriverFactory::new()
        .with_element("#title", "Welcome back")
        .with_element("#cart-count", "0")
        .with_element("#status", "ready")
}

/// Registry holding the built-in demo suites.
pub fn builtin_registry() -> SuiteRegistry {
    let mut registry = SuiteRegistry::new();
    registry.register(login_suite());
    registry.register(navigation_suite());
    registry.register(checkout_suite());
    registry
}

fn login_suite() -> TestSuiteDefinition {
    TestSuiteDefinition::new("login-flow", "Login flow")
        .with_case(TestCaseDefinition::new(
            "login-page-loads",
            "Login page loads",
            case_action(|driver| {
                Box::pin(async move {
                    driver.navigate("/login").await?;
                    let title = driver.read_text("#title").await?;
                    ensure!(title.contains("Welcome"), "unexpected title: {title}");
                    Ok(())
                })
            }),
        ))
        .with_case(TestCaseDefinition::new(
            "submit-credentials",
            "Submit credentials",
            case_action(|driver| {
                Box::pin(async move {
                    driver.navigate("/login").await?;
                    driver.click("#username").await?;
                    driver.click("#password").await?;
                    driver.click("#submit").await?;
                    Ok(())
                })
            }),
        ))
}

fn navigation_suite() -> TestSuiteDefinition {
    TestSuiteDefinition::new("navigation", "Top-level navigation")
        .with_case(TestCaseDefinition::new(
            "open-dashboard",
            "Open dashboard",
            case_action(|driver| {
                Box::pin(async move {
                    driver.navigate("/dashboard").await?;
                    let status = driver.read_text("#status").await?;
                    ensure!(status == "ready", "dashboard not ready: {status}");
                    Ok(())
                })
            }),
        ))
        .with_case(TestCaseDefinition::new(
            "open-settings",
            "Open settings",
            case_action(|driver| {
                Box::pin(async move {
                    driver.navigate("/settings").await?;
                    driver.click("#save").await?;
                    Ok(())
                })
            }),
        ))
}

fn checkout_suite() -> TestSuiteDefinition {
    TestSuiteDefinition::new("checkout", "Checkout")
        .with_case(TestCaseDefinition::new(
            "empty-cart",
            "Empty cart shows zero items",
            case_action(|driver| {
                Box::pin(async move {
                    driver.navigate("/cart").await?;
                    let count = driver.read_text("#cart-count").await?;
                    ensure!(count == "0", "cart not empty: {count}");
                    Ok(())
                })
            }),
        ))
        // Pending a payment sandbox to run against.
        .with_case(
            TestCaseDefinition::new(
                "pay-with-card",
                "Pay with card",
                case_action(|driver| {
                    Box::pin(async move {
                        driver.navigate("/checkout").await?;
                        driver.click("#pay").await?;
                        Ok(())
                    })
                }),
            )
            .disabled(),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::SuiteSource;

    #[test]
    fn registry_holds_demo_suites() {
        let registry = builtin_registry();
        assert_eq!(registry.suites().len(), 3);
        assert_eq!(registry.load("login-*").unwrap().len(), 1);
    }

    #[test]
    fn checkout_payment_case_is_disabled() {
        let suite = checkout_suite();
        assert_eq!(suite.enabled_count(), suite.case_count() - 1);
    }
}
