//! Suite execution engine
//!
//! The per-suite lifecycle executor and the bounded-width batch scheduler
//! that drives many suite runs to completion.

mod scheduler;
mod suite;

pub use scheduler::{BatchScheduler, SuiteThunk};
pub use suite::SuiteExecutor;
