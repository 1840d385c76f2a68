use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::errors::ConfigError;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and resolving directory settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Folder walked for caption files
    #[serde(default = "default_subtitles_dir")]
    pub subtitles_dir: PathBuf,

    /// Folder receiving one hook file per caption file
    #[serde(default = "default_hooks_dir")]
    pub hooks_dir: PathBuf,

    /// Caption file extensions, without the dot
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Language suffixes dropped from file stems when matching titles
    #[serde(default = "default_language_suffixes")]
    pub language_suffixes: Vec<String>,

    /// Leave existing hook files untouched
    #[serde(default)]
    pub skip_existing: bool,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Log level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_subtitles_dir() -> PathBuf {
    PathBuf::from("youtube_subs")
}

fn default_hooks_dir() -> PathBuf {
    PathBuf::from("hooks")
}

fn default_extensions() -> Vec<String> {
    vec!["vtt".to_string()]
}

fn default_language_suffixes() -> Vec<String> {
    vec!["en".to_string()]
}

impl Config {
    /// Load a configuration file, or the defaults when it does not exist
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;
        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Resolve relative directories against `base`
    pub fn resolve_dirs(&mut self, base: &Path) {
        if self.subtitles_dir.is_relative() {
            self.subtitles_dir = base.join(&self.subtitles_dir);
        }
        if self.hooks_dir.is_relative() {
            self.hooks_dir = base.join(&self.hooks_dir);
        }
    }

    // @validates: Settings that would make a run meaningless
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.extensions.iter().all(|ext| ext.trim_start_matches('.').trim().is_empty()) {
            return Err(ConfigError::NoExtensions);
        }

        if self.subtitles_dir.as_os_str().is_empty() {
            return Err(ConfigError::EmptyDirectory("subtitles_dir"));
        }

        if self.hooks_dir.as_os_str().is_empty() {
            return Err(ConfigError::EmptyDirectory("hooks_dir"));
        }

        if self.subtitles_dir == self.hooks_dir {
            return Err(ConfigError::SameDirectories(self.hooks_dir.display().to_string()));
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Self {
            subtitles_dir: default_subtitles_dir(),
            hooks_dir: default_hooks_dir(),
            extensions: default_extensions(),
            language_suffixes: default_language_suffixes(),
            skip_existing: false,
            log_level: LogLevel::default(),
        }
    }
}
