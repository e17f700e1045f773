//! Configuration for the migration fixer.
//!
//! Values come from an optional TOML file (default `.dev/migration-fixer.toml`),
//! falling back to built-in defaults for anything not set:
//!
//! ```toml
//! [migrations]
//! root = "prisma/migrations"
//! target_name = "20250124020000_add_produtos_intencoes_loja"
//! forbidden_chars = ["$"]
//! bad_tokens = ["date"]
//! ```
//!
//! Command-line overrides are applied on top by the binary.

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Default location of the config file, relative to the working directory
pub const DEFAULT_CONFIG_PATH: &str = ".dev/migration-fixer.toml";

// =============================================================================
// File Format
// =============================================================================

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ConfigFile {
    migrations: FixerConfig,
}

// =============================================================================
// Fixer Configuration
// =============================================================================

/// Where to look for misnamed migrations and what to rename them to
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct FixerConfig {
    /// Migrations root directory
    #[serde(default = "default_root")]
    pub root: PathBuf,
    /// Canonical name a misnamed directory is renamed to
    #[serde(default = "default_target_name")]
    pub target_name: String,
    /// Any of these characters in a directory name marks it as misnamed
    #[serde(default = "default_forbidden_chars")]
    pub forbidden_chars: Vec<char>,
    /// Case-insensitive substrings that mark a directory name as misnamed
    #[serde(default = "default_bad_tokens")]
    pub bad_tokens: Vec<String>,
}

impl Default for FixerConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            target_name: default_target_name(),
            forbidden_chars: default_forbidden_chars(),
            bad_tokens: default_bad_tokens(),
        }
    }
}

fn default_root() -> PathBuf {
    PathBuf::from("prisma/migrations")
}

fn default_target_name() -> String {
    "20250124020000_add_produtos_intencoes_loja".to_string()
}

fn default_forbidden_chars() -> Vec<char> {
    vec!['$']
}

fn default_bad_tokens() -> Vec<String> {
    vec!["date".to_string()]
}

impl FixerConfig {
    /// Load configuration from `path`, returning defaults if the file is absent
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        let file: ConfigFile = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        file.migrations
            .validate()
            .with_context(|| format!("Invalid config in {}", path.display()))?;

        Ok(file.migrations)
    }

    /// Apply command-line overrides
    pub fn with_overrides(mut self, root: Option<PathBuf>, target_name: Option<String>) -> Self {
        if let Some(root) = root {
            self.root = root;
        }
        if let Some(target_name) = target_name {
            self.target_name = target_name;
        }
        self
    }

    /// Check that the target name can be joined onto the root as a single entry
    pub fn validate(&self) -> Result<()> {
        if self.target_name.is_empty() {
            return Err(anyhow!("target_name must not be empty"));
        }
        if self.target_name.contains('/') || self.target_name.contains('\\') {
            return Err(anyhow!(
                "target_name must be a single directory name, got '{}'",
                self.target_name
            ));
        }
        if self.target_name == "." || self.target_name == ".." {
            return Err(anyhow!("target_name must not be '{}'", self.target_name));
        }
        Ok(())
    }

    /// Full path of the canonical target directory
    pub fn target_path(&self) -> PathBuf {
        self.root.join(&self.target_name)
    }
}

// =============================================================================
// Tests
// =============================================================================
