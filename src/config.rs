use std::path::{Path, PathBuf};
use std::time::Duration;

use eyre::Result;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::{DEFAULT_MODEL, LanguagePreferences, ProcessingOptions, SummaryType, Task};

/// Which collaborator implementation serves requests
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// InnerTube captions and LLM HTTP APIs
    #[default]
    Native,
    /// Shell out to the summarizer command-line program
    Cli,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub backend: Option<Backend>,
    pub listen: Option<String>,
    pub detect_language: bool,
    pub defaults: Defaults,
    pub cli: CliConfig,
    pub timeouts: Timeouts,
}

/// Defaults applied to requests that leave an option unset
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Defaults {
    pub languages: Vec<String>,
    pub model: String,
    pub summary_type: SummaryType,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            languages: LanguagePreferences::default().codes().to_vec(),
            model: DEFAULT_MODEL.to_string(),
            summary_type: SummaryType::default(),
        }
    }
}

/// Per-request overrides; `None` and empty values fall back to `Defaults`
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub languages: Vec<String>,
    pub model: Option<String>,
    pub summary_type: Option<SummaryType>,
    pub show_transcript: bool,
}

impl Defaults {
    pub fn options(&self, overrides: Overrides) -> ProcessingOptions {
        let languages = if overrides.languages.iter().any(|l| !l.trim().is_empty()) {
            LanguagePreferences::new(&overrides.languages)
        } else {
            LanguagePreferences::new(&self.languages)
        };

        ProcessingOptions {
            languages,
            model: overrides
                .model
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| self.model.clone()),
            summary_type: overrides.summary_type.unwrap_or(self.summary_type),
            show_transcript: overrides.show_transcript,
            task: Task::Summary,
        }
    }

    pub fn transcript_options(&self, languages: Vec<String>) -> ProcessingOptions {
        let options = self.options(Overrides {
            languages,
            ..Overrides::default()
        });
        ProcessingOptions::transcript_only(options.languages)
    }
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CliConfig {
    pub program: Option<String>,
    pub args: Vec<String>,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
#[serde(default)]
pub struct Timeouts {
    pub list_secs: u64,
    pub fetch_secs: u64,
    pub detect_secs: u64,
    pub summarize_secs: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            list_secs: 30,
            fetch_secs: 60,
            detect_secs: 30,
            summarize_secs: 300,
        }
    }
}

impl Timeouts {
    pub fn list(&self) -> Duration {
        Duration::from_secs(self.list_secs)
    }

    pub fn fetch(&self) -> Duration {
        Duration::from_secs(self.fetch_secs)
    }

    pub fn detect(&self) -> Duration {
        Duration::from_secs(self.detect_secs)
    }

    pub fn summarize(&self) -> Duration {
        Duration::from_secs(self.summarize_secs)
    }
}

impl Config {
    /// Load config from ~/.config/ytsum/config.toml if it exists
    pub fn load() -> Result<Self> {
        Self::load_from(&config_path())
    }

    /// Defaults when `path` is absent; unreadable or malformed files are errors
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            debug!("Loading config from {}", path.display());
            let content = std::fs::read_to_string(path)?;
            let config: Config = toml::from_str(&content)
                .map_err(|e| eyre::eyre!("invalid config {}: {e}", path.display()))?;
            Ok(config)
        } else {
            debug!("No config file found at {}", path.display());
            Ok(Config::default())
        }
    }
}

pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from(".config"))
        .join("ytsum")
        .join("config.toml")
}
