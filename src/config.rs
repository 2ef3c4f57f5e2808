//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/forestgen/forestgen.toml`
//! 3. Explicit config: `--config <FILE>`
//! 4. Environment variables: `FORESTGEN_*` prefix
//!
//! Command line flags are applied on top by the CLI layer.

use std::path::{Path, PathBuf};

use clap::ValueEnum;
use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::{ApplicationError, IoResultExt, DEFAULT_SEED};
use crate::domain::label::DEFAULT_PREFIX;
use crate::domain::{NodeLabeler, OwnershipFormat};

/// Unified configuration for forestgen.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Seed for the ownership sampler (default: 0)
    pub seed: u64,
    /// Single-character node label prefix (default: 'C')
    pub prefix: char,
    /// Ownership rendering (default: fixed)
    pub format: OwnershipFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            prefix: DEFAULT_PREFIX,
            format: OwnershipFormat::default(),
        }
    }
}

/// Raw settings for intermediate parsing (`None` → not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub seed: Option<u64>,
    pub prefix: Option<char>,
    pub format: Option<OwnershipFormat>,
}

/// Get the XDG config directory for forestgen.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "forestgen").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("forestgen.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            seed: overlay.seed.unwrap_or(self.seed),
            prefix: overlay.prefix.unwrap_or(self.prefix),
            format: overlay.format.unwrap_or(self.format),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `explicit` - Optional config file given on the command line; must exist
    pub fn load(explicit: Option<&Path>) -> Result<Self, ApplicationError> {
        Self::load_layers(global_config_path().as_deref(), explicit)
    }

    /// Layered load with the global config location passed in.
    ///
    /// A missing global file is skipped; a missing explicit file is an error.
    pub fn load_layers(
        global: Option<&Path>,
        explicit: Option<&Path>,
    ) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global {
            if global_path.exists() {
                debug!("loading global config: {}", global_path.display());
                current = current.merge_with(&load_raw_settings(global_path)?);
            }
        }

        if let Some(path) = explicit {
            debug!("loading explicit config: {}", path.display());
            current = current.merge_with(&load_raw_settings(path)?);
        }

        current = Self::apply_env_overrides(current)?;
        current.validate()?;
        Ok(current)
    }

    /// Apply FORESTGEN_* environment variables as explicit overrides.
    fn apply_env_overrides(settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(Environment::with_prefix("FORESTGEN"))
            .build()
            .map_err(config_err)?;
        Self::apply_overrides(settings, &config)
    }

    /// Replace fields present in `config`; absent keys keep their value.
    fn apply_overrides(mut settings: Self, config: &Config) -> Result<Self, ApplicationError> {
        match config.get::<u64>("seed") {
            Ok(val) => settings.seed = val,
            Err(ConfigError::NotFound(_)) => {}
            Err(e) => return Err(config_err(e)),
        }
        match config.get_string("prefix") {
            Ok(val) => {
                let mut chars = val.chars();
                settings.prefix = match (chars.next(), chars.next()) {
                    (Some(c), None) => c,
                    _ => {
                        return Err(ApplicationError::Config {
                            message: format!(
                                "FORESTGEN_PREFIX must be a single character: {val:?}"
                            ),
                        })
                    }
                };
            }
            Err(ConfigError::NotFound(_)) => {}
            Err(e) => return Err(config_err(e)),
        }
        match config.get_string("format") {
            Ok(val) => {
                settings.format =
                    OwnershipFormat::from_str(&val, true).map_err(|_| ApplicationError::Config {
                        message: format!(
                            "FORESTGEN_FORMAT must be 'fixed' or 'shortest': {val:?}"
                        ),
                    })?;
            }
            Err(ConfigError::NotFound(_)) => {}
            Err(e) => return Err(config_err(e)),
        }

        Ok(settings)
    }

    /// Reject settings that cannot produce a valid file.
    pub fn validate(&self) -> Result<(), ApplicationError> {
        NodeLabeler::new(self.prefix)?;
        Ok(())
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# forestgen configuration
#
# Locations (by precedence, lowest to highest):
#   Global:   ~/.config/forestgen/forestgen.toml
#   Explicit: forestgen --config <FILE>
#   Env:      FORESTGEN_SEED, FORESTGEN_PREFIX, FORESTGEN_FORMAT
#   Flags:    --seed, --prefix, --format

# Seed for ownership sampling; same seed and shape give identical files
# seed = 0

# Node label prefix (single character, not a comma, quote or whitespace)
# prefix = "C"

# Ownership rendering: "fixed" (0.5000) or "shortest" (0.5)
# format = "fixed"
"#
        .to_string()
    }

    /// Write the template to `path`, creating parent directories.
    ///
    /// Refuses to overwrite an existing file.
    pub fn write_template(path: &Path) -> Result<(), ApplicationError> {
        if path.exists() {
            return Err(ApplicationError::Config {
                message: format!("config already exists: {}", path.display()),
            });
        }
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_path_context("create config dir", parent)?;
        }
        std::fs::write(path, Self::template()).with_path_context("write config", path)?;
        debug!("wrote config template: {}", path.display());
        Ok(())
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
