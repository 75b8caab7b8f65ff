//! CLI argument parsing
//!
//! Defines command-line interface using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// UI test-suite execution orchestrator
#[derive(Parser, Debug)]
#[command(name = "ui-runner")]
#[command(author = "hephaex@gmail.com")]
#[command(version = "0.1.0")]
#[command(about = "Run UI test suites in bounded concurrent batches")]
#[command(long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the suites matching a pattern
    TestSuite(TestSuiteArgs),

    /// List registered suites and their cases
    List(ListArgs),
}

/// Arguments for the test-suite command
#[derive(Parser, Debug)]
pub struct TestSuiteArgs {
    /// Pattern selecting suite definitions (`*` and trailing-`*` prefixes)
    pub pattern: String,

    /// Target platform (desktop, web-lite, android, ios)
    #[arg(short, long, default_value = "desktop")]
    pub platform: String,

    /// Configuration file (YAML or JSON)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format (table, json, json-pretty)
    #[arg(short, long, default_value = "table")]
    pub format: String,

    /// Override the configured batch width
    #[arg(short, long)]
    pub width: Option<usize>,
}

/// Arguments for the list command
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Show individual test cases
    #[arg(short, long)]
    pub detailed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_test_suite_command() {
        let args = Args::parse_from([
            "ui-runner",
            "test-suite",
            "login-*",
            "--platform",
            "android",
            "--width",
            "3",
        ]);
        match args.command {
            Command::TestSuite(test_args) => {
                assert_eq!(test_args.pattern, "login-*");
                assert_eq!(test_args.platform, "android");
                assert_eq!(test_args.width, Some(3));
                assert_eq!(test_args.format, "table");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_list_command() {
        let args = Args::parse_from(["ui-runner", "list", "--detailed"]);
        match args.command {
            Command::List(list_args) => assert!(list_args.detailed),
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
