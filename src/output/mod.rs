//! Output formatters for run records
//!
//! Table and JSON rendering of suite run records, plus human-readable
//! duration formatting.

#![allow(dead_code)]

use crate::models::{CaseStatus, SuiteRunRecord, SuiteStatus};

/// Output format options
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    JsonPretty,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "table" => Some(OutputFormat::Table),
            "json" => Some(OutputFormat::Json),
            "json-pretty" | "jsonpretty" => Some(OutputFormat::JsonPretty),
            _ => None,
        }
    }
}

/// Run record formatter
pub struct ResultFormatter {
    format: OutputFormat,
    colorize: bool,
}

impl ResultFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            colorize: true,
        }
    }

    pub fn no_color(mut self) -> Self {
        self.colorize = false;
        self
    }

    /// Format one suite's run record.
    pub fn format_record(&self, record: &SuiteRunRecord) -> String {
        match self.format {
            OutputFormat::Table => self.format_record_table(record),
            OutputFormat::Json => serde_json::to_string(record).unwrap_or_default(),
            OutputFormat::JsonPretty => serde_json::to_string_pretty(record).unwrap_or_default(),
        }
    }

    fn format_record_table(&self, record: &SuiteRunRecord) -> String {
        let mut output = String::new();

        output.push_str("\n╔══════════════════════════════════════════════════════════════╗\n");
        output.push_str(&format!(
            "║  {:48} {:>10}  ║\n",
            truncate(&record.suite_name, 48),
            self.suite_status_cell(record.status)
        ));
        output.push_str("╠══════════════════════════════════════════════════════════════╣\n");

        for case in &record.cases {
            output.push_str(&format!(
                "║  {:38} {:>10} [{:>8}]  ║\n",
                truncate(&case.case_name, 38),
                self.case_status_cell(case.status),
                format_duration_ms(case.duration_ms)
            ));
        }

        output.push_str("╠══════════════════════════════════════════════════════════════╣\n");
        output.push_str(&format!(
            "║  Pass: {:3}  Fail: {:3}  Skip: {:3}  Rate: {:5.1}%  {:>10}  ║\n",
            record.passed(),
            record.failed(),
            record.skipped(),
            record.pass_rate(),
            format_duration_ms(record.duration_ms)
        ));
        output.push_str("╚══════════════════════════════════════════════════════════════╝");
        output
    }

    fn case_status_cell(&self, status: CaseStatus) -> String {
        let text = format!("{} {status}", status.symbol());
        if !self.colorize {
            return text;
        }
        match status {
            CaseStatus::Passed => format!("\x1b[32m{text}\x1b[0m"),
            CaseStatus::Failed => format!("\x1b[31m{text}\x1b[0m"),
            CaseStatus::Skipped => format!("\x1b[33m{text}\x1b[0m"),
            CaseStatus::Pending | CaseStatus::Running => text,
        }
    }

    fn suite_status_cell(&self, status: SuiteStatus) -> String {
        let text = status.to_string();
        if !self.colorize {
            return text;
        }
        match status {
            SuiteStatus::Passed => format!("\x1b[32m{text}\x1b[0m"),
            SuiteStatus::Failed => format!("\x1b[31m{text}\x1b[0m"),
            SuiteStatus::NotStarted | SuiteStatus::Running => text,
        }
    }
}

/// Render a millisecond duration for humans: `980ms`, `2.4s`, `3m 05s`.
pub fn format_duration_ms(ms: u64) -> String {
    if ms < 1_000 {
        format!("{ms}ms")
    } else if ms < 60_000 {
        format!("{:.1}s", ms as f64 / 1_000.0)
    } else {
        let minutes = ms / 60_000;
        let seconds = (ms % 60_000) / 1_000;
        format!("{minutes}m {seconds:02}s")
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}
