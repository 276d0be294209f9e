use crate::models::options::{Mode, ProcessOptions};
use anyhow::{Context, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// File names searched for, nearest directory first
pub const CONFIG_FILE_NAMES: &[&str] = &[".decomment.toml", "decomment.toml"];

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    /// Settings that apply to every processed file
    #[serde(default)]
    pub global: GlobalConfig,
}

/// Global configuration settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GlobalConfig {
    /// `strip` or `extract`
    #[serde(default)]
    pub mode: Mode,

    /// Replace stripped comments with the line breaks they contained
    #[serde(default = "default_true")]
    pub preserve_line_numbers: bool,

    /// Treat `/** */` comments like any other comment
    #[serde(default = "default_true")]
    pub include_doc_comments: bool,

    /// Keep TODO and FIXME comments when stripping
    #[serde(default = "default_false")]
    pub preserve_todo: bool,

    /// Regular expressions for comments to keep when stripping
    #[serde(default)]
    pub preserve_patterns: Vec<String>,

    /// Write `<file>.bak` before modifying a file
    #[serde(default = "default_false")]
    pub backup: bool,

    /// Process files with unknown extensions
    #[serde(default = "default_false")]
    pub force: bool,

    /// Whether to respect .gitignore files
    #[serde(default = "default_true")]
    pub respect_gitignore: bool,

    /// Worker threads, 0 for one per CPU
    #[serde(default)]
    pub threads: usize,
}

/// Effective settings for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub process: ProcessOptions,
    pub backup: bool,
    pub force: bool,
    pub respect_gitignore: bool,
    pub threads: usize,
}

// Default value helpers
fn default_true() -> bool {
    true
}
fn default_false() -> bool {
    false
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            mode: Mode::Strip,
            preserve_line_numbers: true,
            include_doc_comments: true,
            preserve_todo: false,
            preserve_patterns: Vec::new(),
            backup: false,
            force: false,
            respect_gitignore: true,
            threads: 0,
        }
    }
}

impl GlobalConfig {
    pub fn process_options(&self) -> ProcessOptions {
        ProcessOptions {
            mode: self.mode,
            preserve_line_numbers: self.preserve_line_numbers,
            include_doc_comments: self.include_doc_comments,
            preserve_todo: self.preserve_todo,
            preserve_patterns: self.preserve_patterns.clone(),
        }
    }

    pub fn resolve(&self) -> ResolvedConfig {
        let threads = if self.threads == 0 {
            num_cpus::get()
        } else {
            self.threads
        };

        ResolvedConfig {
            process: self.process_options(),
            backup: self.backup,
            force: self.force,
            respect_gitignore: self.respect_gitignore,
            threads,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config = Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;

        config
            .validate()
            .with_context(|| format!("Invalid configuration in: {}", path.as_ref().display()))?;

        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.global.preserve_patterns {
            Regex::new(pattern).with_context(|| format!("Invalid preserve pattern: {pattern}"))?;
        }

        Ok(())
    }

    /// Merge this config with another, giving precedence to the other config
    pub fn merge_with(&self, other: &Config) -> Config {
        let mut merged = other.clone();

        // Preserve patterns accumulate
        let mut patterns = self.global.preserve_patterns.clone();
        patterns.extend(other.global.preserve_patterns.iter().cloned());
        patterns.sort();
        patterns.dedup();
        merged.global.preserve_patterns = patterns;

        merged
    }

    /// Find the nearest config file in `start` or one of its ancestors
    pub fn find_project_config(start: &Path) -> Option<PathBuf> {
        start.ancestors().find_map(|dir| {
            CONFIG_FILE_NAMES
                .iter()
                .map(|name| dir.join(name))
                .find(|candidate| candidate.is_file())
        })
    }

    /// Get the global configuration file path
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("decomment").join("config.toml"))
    }

    /// Load the effective configuration.
    ///
    /// An explicit path is used on its own. Otherwise the global config (if
    /// any) is overlaid with the nearest project config (if any).
    pub fn load(explicit: Option<&Path>, start: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            debug!(path = %path.display(), "loading explicit config");
            return Self::from_file(path);
        }

        let mut config = Config::default();

        if let Some(global_path) = Self::global_config_path().filter(|path| path.is_file()) {
            debug!(path = %global_path.display(), "loading global config");
            config = config.merge_with(&Self::from_file(&global_path)?);
        }

        if let Some(project_path) = Self::find_project_config(start) {
            debug!(path = %project_path.display(), "loading project config");
            config = config.merge_with(&Self::from_file(&project_path)?);
        }

        Ok(config)
    }

    /// Create a template configuration
    pub fn template() -> String {
        r#"# decomment configuration

[global]
mode = "strip"                 # "strip" or "extract"
preserve_line_numbers = true   # Replace removed comments with their line breaks
include_doc_comments = true    # Strip/extract /** */ comments too
preserve_todo = false          # Keep TODO and FIXME comments
preserve_patterns = [          # Regular expressions for comments to keep
    "~keep",
    "@license",
]
backup = false                 # Write <file>.bak before modifying
force = false                  # Process files with unknown extensions
respect_gitignore = true       # Skip files ignored by .gitignore
threads = 0                    # 0 = one per CPU
"#
        .to_string()
    }
}
