//! Configuration file parsing for .gosentry.toml

use crate::finding::RuleKind;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// File name looked up in the scan root and its ancestors
pub const CONFIG_FILE_NAME: &str = ".gosentry.toml";

/// Main configuration structure for .gosentry.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GosentryConfig {
    #[serde(default)]
    pub rules: RulesConfig,

    #[serde(default)]
    pub credentials: CredentialsConfig,

    #[serde(default)]
    pub ignore: IgnoreConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

/// Enable/disable individual rules
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RulesConfig {
    #[serde(default = "default_true")]
    pub naming: bool,

    #[serde(default = "default_true")]
    pub imports: bool,

    #[serde(default = "default_true")]
    pub credentials: bool,

    #[serde(default = "default_true")]
    pub sql_injection: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialsConfig {
    /// Case-sensitive substrings that mark a string literal as a credential
    #[serde(default = "default_credential_keywords")]
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IgnoreConfig {
    /// Paths to ignore (gitignore-style, `dir/` for whole directories)
    #[serde(default = "default_ignore_paths")]
    pub paths: Vec<String>,

    /// File-name globs that are never analyzed
    #[serde(default = "default_ignore_files")]
    pub files: Vec<String>,

    /// Finding IDs to suppress
    #[serde(default)]
    pub findings: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Default output format
    #[serde(default = "default_format")]
    pub format: String,

    /// Enable color output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Print the import list of every file
    #[serde(default = "default_true")]
    pub show_imports: bool,
}

// Default functions
fn default_true() -> bool {
    true
}

fn default_credential_keywords() -> Vec<String> {
    vec!["password".to_string(), "secret".to_string()]
}

fn default_ignore_paths() -> Vec<String> {
    vec![
        "vendor/".to_string(),
        "testdata/".to_string(),
        ".git/".to_string(),
    ]
}

fn default_ignore_files() -> Vec<String> {
    vec!["*_test.go".to_string()]
}

fn default_format() -> String {
    "terminal".to_string()
}

impl Default for GosentryConfig {
    fn default() -> Self {
        Self {
            rules: RulesConfig::default(),
            credentials: CredentialsConfig::default(),
            ignore: IgnoreConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            naming: true,
            imports: true,
            credentials: true,
            sql_injection: true,
        }
    }
}

impl Default for CredentialsConfig {
    fn default() -> Self {
        Self {
            keywords: default_credential_keywords(),
        }
    }
}

impl Default for IgnoreConfig {
    fn default() -> Self {
        Self {
            paths: default_ignore_paths(),
            files: default_ignore_files(),
            findings: Vec::new(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            color: true,
            show_imports: true,
        }
    }
}

impl IgnoreConfig {
    /// Entries of `findings` whose prefix names no rule (e.g. `SEC-001`)
    pub fn unknown_finding_ids(&self) -> Vec<&str> {
        self.findings
            .iter()
            .map(String::as_str)
            .filter(|id| {
                let prefix = id.split('-').next().unwrap_or("");
                RuleKind::from_prefix(prefix).is_none()
            })
            .collect()
    }
}

impl GosentryConfig {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: GosentryConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Find and load .gosentry.toml from the given directory or its ancestors
    pub fn find_and_load(start_dir: &Path) -> Result<Self> {
        let mut current = start_dir;

        loop {
            let config_path = current.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                log::debug!("loading config from {}", config_path.display());
                return Self::from_file(&config_path);
            }

            match current.parent() {
                Some(parent) => current = parent,
                None => break,
            }
        }

        // No config found, use defaults
        Ok(Self::default())
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }
}
