//! Run configuration
//!
//! Loading and validation of the run configuration file (YAML or JSON) and
//! the target-platform selector.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Target platform for a run.
///
/// All variants currently resolve to the same configuration shape; they
/// select the logger namespace and are placeholders for platform-specific
/// driver wiring.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Platform {
    #[default]
    Desktop,
    WebLite,
    Android,
    Ios,
}

impl Platform {
    pub fn name(&self) -> &'static str {
        match self {
            Platform::Desktop => "Desktop",
            Platform::WebLite => "Web Lite",
            Platform::Android => "Android",
            Platform::Ios => "iOS",
        }
    }

    /// Keyword used as the logger namespace for this platform.
    pub fn log_target(&self) -> &'static str {
        match self {
            Platform::Desktop => "desktop",
            Platform::WebLite => "web-lite",
            Platform::Android => "android",
            Platform::Ios => "ios",
        }
    }

    pub fn from_str(s: &str) -> Option<Platform> {
        match s.to_lowercase().as_str() {
            "desktop" => Some(Platform::Desktop),
            "web-lite" | "weblite" | "web" => Some(Platform::WebLite),
            "android" => Some(Platform::Android),
            "ios" => Some(Platform::Ios),
            _ => None,
        }
    }

    pub fn all() -> Vec<Platform> {
        vec![
            Platform::Desktop,
            Platform::WebLite,
            Platform::Android,
            Platform::Ios,
        ]
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Configuration for one orchestrator invocation.
///
/// `parallel_execution` is the batch width handed to the scheduler: the
/// maximum number of suites run concurrently in one batch.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunConfig {
    #[serde(default = "default_parallel")]
    pub parallel_execution: usize,

    #[serde(default)]
    pub platform: Platform,

    /// Directory for logs and failure screenshots.
    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,
}

fn default_parallel() -> usize {
    1
}

fn default_log_dir() -> PathBuf {
    PathBuf::from("./logs")
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            parallel_execution: default_parallel(),
            platform: Platform::default(),
            log_dir: default_log_dir(),
        }
    }
}

impl RunConfig {
    /// Load configuration from a YAML or JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = if is_yaml_file(path) {
            serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse YAML config: {}", path.display()))?
        } else {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))?
        };

        config.validate()?;
        Ok(config)
    }

    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.parallel_execution == 0 {
            bail!("parallel_execution must be at least 1");
        }
        Ok(())
    }
}

fn is_yaml_file(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn platform_from_str() {
        assert_eq!(Platform::from_str("desktop"), Some(Platform::Desktop));
        assert_eq!(Platform::from_str("WEB-LITE"), Some(Platform::WebLite));
        assert_eq!(Platform::from_str("windows"), None);
    }

    #[test]
    fn defaults_are_valid() {
        let config = RunConfig::default();
        assert_eq!(config.parallel_execution, 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_width_rejected() {
        let config = RunConfig {
            parallel_execution: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn load_yaml_config() {
        let mut file = tempfile::Builder::new()
            .suffix(".yaml")
            .tempfile()
            .unwrap();
        writeln!(file, "parallel_execution: 4\nplatform: android").unwrap();

        let config = RunConfig::load(file.path()).unwrap();
        assert_eq!(config.parallel_execution, 4);
        assert_eq!(config.platform, Platform::Android);
        assert_eq!(config.log_dir, PathBuf::from("./logs"));
    }

    #[test]
    fn load_json_config() {
        let mut file = tempfile::Builder::new()
            .suffix(".json")
            .tempfile()
            .unwrap();
        writeln!(file, "{{\"parallel_execution\": 2}}").unwrap();

        let config = RunConfig::load(file.path()).unwrap();
        assert_eq!(config.parallel_execution, 2);
        assert_eq!(config.platform, Platform::Desktop);
    }

    #[test]
    fn invalid_file_reports_path() {
        let err = RunConfig::load("/nonexistent/config.yaml").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/config.yaml"));
    }
}
