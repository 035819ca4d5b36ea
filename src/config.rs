//! Configuration management for the scaffold generator
//!
//! Supports loading configuration from:
//! - Default values
//! - Config file (scaffold.toml)
//! - Environment variables (SCAFFOLD__*)
//!
//! ## Example config file (scaffold.toml):
//! ```toml
//! [generator]
//! locale = "auto"
//! scaffolds = ["kurse", "teilnehmer"]
//!
//! [output]
//! dir = "./app"
//! write_manifest = true
//! ```

use config_crate::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::locale::LocaleSetting;

/// Main configuration for the scaffold generator
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScaffoldConfig {
    /// Generator settings
    #[serde(default)]
    pub generator: GeneratorConfig,

    /// Output settings
    #[serde(default)]
    pub output: OutputConfig,
}

/// Generator configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// UI language, or `auto` to detect it from the metadata
    #[serde(default)]
    pub locale: LocaleSetting,

    /// Entities that get a full page and dialog
    #[serde(default)]
    pub scaffolds: Vec<String>,
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Root the generated `src/` tree is written under
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,

    /// Write `scaffold.sha256` next to the sources
    #[serde(default = "default_true")]
    pub write_manifest: bool,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_true() -> bool {
    true
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            write_manifest: true,
        }
    }
}

impl ScaffoldConfig {
    /// Load configuration from default locations
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration, layering an explicit file over the defaults
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        let config_locations = ["scaffold.toml", ".scaffold.toml", "config/scaffold.toml"];
        for location in config_locations {
            builder = builder.add_source(File::with_name(location).required(false));
        }

        // XDG config directory
        if let Some(config_dir) = directories::ProjectDirs::from("dev", "entity-scaffold", "scaffold") {
            let xdg_config = config_dir.config_dir().join("scaffold.toml");
            if xdg_config.exists() {
                builder = builder.add_source(File::from(xdg_config).required(false));
            }
        }

        if let Some(path) = config_path {
            builder = builder.add_source(File::from(path).required(true));
        }

        // SCAFFOLD__GENERATOR__LOCALE=de
        builder = builder.add_source(
            Environment::with_prefix("SCAFFOLD")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("generator.scaffolds"),
        );

        builder.build()?.try_deserialize()
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        std::fs::write(path, self.to_toml()?)
    }

    /// Configuration as pretty TOML
    pub fn to_toml(&self) -> std::io::Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ScaffoldConfig::default();
        assert_eq!(config.generator.locale, LocaleSetting::Auto);
        assert!(config.generator.scaffolds.is_empty());
        assert!(config.output.write_manifest);
    }

    #[test]
    fn test_serialize_config() {
        let toml_str = ScaffoldConfig::default().to_toml().unwrap();
        assert!(toml_str.contains("[generator]"));
        assert!(toml_str.contains("[output]"));
        assert!(toml_str.contains("locale = \"auto\""));
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(
            &path,
            "[generator]\nlocale = \"de\"\nscaffolds = [\"kurse\"]\n\n[output]\nwrite_manifest = false\n",
        )
        .unwrap();

        let config = ScaffoldConfig::load_from(Some(&path)).unwrap();
        assert_eq!(config.generator.locale, LocaleSetting::De);
        assert_eq!(config.generator.scaffolds, vec!["kurse".to_string()]);
        assert!(!config.output.write_manifest);
    }

    #[test]
    fn test_save_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("saved.toml");
        let mut config = ScaffoldConfig::default();
        config.generator.scaffolds = vec!["raeume".into()];
        config.save(&path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let back: ScaffoldConfig = toml::from_str(&contents).unwrap();
        assert_eq!(back, config);
    }
}
