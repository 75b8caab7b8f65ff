//! Shared utilities
//!
//! Timing helpers, logging setup, and artifact naming.

mod logger;
mod timer;

pub use logger::{init_logger, LogLevel};
pub use timer::Timer;

use chrono::Utc;

/// File name for a failure screenshot: millisecond timestamp plus `.png`.
pub fn screenshot_name() -> String {
    format!("{}.png", Utc::now().timestamp_millis())
}
