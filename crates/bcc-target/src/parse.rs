//! TOML parsing, serialization and templates for `bcc.toml` config files.
//!
//! A config file describes one [`CompilerConfig`] before resolution. The
//! resolved target and architecture are never stored; they are recomputed by
//! `initialize` each time the file is loaded.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::CompilerConfig;
use crate::error::{Result, TargetError};
use crate::features::split_features;
use crate::options::{CodeModel, OptimizationLevel, RelocationModel, TargetOptions};

/// Conventional file name for a driver configuration.
pub const CONFIG_FILE_NAME: &str = "bcc.toml";

/// On-disk form of a [`CompilerConfig`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ConfigFile {
    /// Target triple (required).
    pub triple: String,
    /// Target CPU; omitted means the triple's default.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub cpu: String,
    /// Feature toggles, each prefixed with '+' or '-'.
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub code_model: CodeModel,
    #[serde(default)]
    pub optimization_level: OptimizationLevel,
    #[serde(default)]
    pub relocation_model: RelocationModel,
    #[serde(default)]
    pub target_options: TargetOptions,
}

impl ConfigFile {
    /// Build an unresolved configuration from the file contents.
    pub fn into_config(self) -> CompilerConfig {
        let mut config = CompilerConfig::new(self.triple);
        config.set_cpu(self.cpu);
        config.set_features(&self.features);
        config.set_code_model(self.code_model);
        config.set_optimization_level(self.optimization_level);
        config.set_relocation_model(self.relocation_model);
        *config.target_options_mut() = self.target_options;
        config
    }

    /// Capture the settable fields of a configuration.
    ///
    /// `features` is rebuilt by splitting the joined feature string on commas,
    /// so an entry that itself contained a comma comes back as several entries.
    /// The feature string of the round-tripped config is unchanged.
    pub fn from_config(config: &CompilerConfig) -> Self {
        Self {
            triple: config.triple().to_string(),
            cpu: config.cpu().to_string(),
            features: split_features(config.feature_string())
                .into_iter()
                .map(str::to_string)
                .collect(),
            code_model: config.code_model(),
            optimization_level: config.optimization_level(),
            relocation_model: config.relocation_model(),
            target_options: config.target_options().clone(),
        }
    }
}

/// Load a config file from disk.
pub fn load_config_toml(path: &Path) -> Result<ConfigFile> {
    if !path.exists() {
        return Err(TargetError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let content = std::fs::read_to_string(path)?;
    parse_config_toml(&content)
}

/// Parse a config file from a TOML string.
pub fn parse_config_toml(toml_str: &str) -> Result<ConfigFile> {
    let file: ConfigFile = toml::from_str(toml_str)?;
    Ok(file)
}

/// Serialize a config file to pretty TOML.
pub fn config_to_toml(file: &ConfigFile) -> Result<String> {
    let toml_str = toml::to_string_pretty(file)?;
    Ok(toml_str)
}

/// Generate a starter config for `triple` with every knob at its default.
pub fn generate_template(triple: &str) -> Result<String> {
    let file = ConfigFile::from_config(&CompilerConfig::new(triple));
    config_to_toml(&file)
}
