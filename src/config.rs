//! Configuration management for the `yaif` command-line tool
//!
//! This is tool configuration, separate from the `[config]` block inside a
//! schema file. Supports loading from:
//! - Default values
//! - Config file (yaif.toml)
//! - Environment variables (YAIF__*)
//!
//! ## Example config file (yaif.toml):
//! ```toml
//! [generate]
//! target = "typescript"
//! output_dir = "generated"
//!
//! [check]
//! summary = true
//! ```

use std::path::{Path, PathBuf};

use config_crate::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

use crate::generator::Target;

/// Main configuration for the tool
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolConfig {
    /// Generation settings
    #[serde(default)]
    pub generate: GenerateConfig,

    /// Check settings
    #[serde(default)]
    pub check: CheckConfig,
}

/// Generation configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerateConfig {
    /// Target used when none is given on the command line
    #[serde(default)]
    pub target: Target,

    /// Directory for generated files when no explicit output path is given.
    /// Unset means print to stdout.
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
}

/// Check configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckConfig {
    /// Print the per-entity summary after a successful parse
    #[serde(default = "default_true")]
    pub summary: bool,
}

fn default_true() -> bool {
    true
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self { summary: true }
    }
}

impl ToolConfig {
    /// Load configuration from default locations
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration, adding a required file on top of the defaults
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        for location in ["yaif.toml", ".yaif.toml", "config/yaif.toml"] {
            builder = builder.add_source(File::with_name(location).required(false));
        }

        // XDG config directory
        if let Some(dirs) = directories::ProjectDirs::from("dev", "yaif", "yaif") {
            let xdg_config = dirs.config_dir().join("yaif.toml");
            if xdg_config.exists() {
                tracing::debug!(path = %xdg_config.display(), "using user config");
                builder = builder.add_source(File::from(xdg_config).required(false));
            }
        }

        if let Some(path) = config_path {
            builder = builder.add_source(File::from(path).required(true));
        }

        // YAIF__GENERATE__TARGET=typescript
        builder = builder.add_source(
            Environment::with_prefix("YAIF")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, content)
    }

    /// Where generated output for `schema_path` should go, if not stdout
    pub fn output_path(&self, schema_path: &Path, target: Target) -> Option<PathBuf> {
        let dir = self.generate.output_dir.as_ref()?;
        let stem = schema_path.file_stem()?.to_string_lossy();
        Some(dir.join(format!("{stem}{}", target.extension())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Loading reads the process environment
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_default_config() {
        let config = ToolConfig::default();
        assert_eq!(config.generate.target, Target::Python);
        assert!(config.generate.output_dir.is_none());
        assert!(config.check.summary);
    }

    #[test]
    fn test_serialize_config() {
        let config = ToolConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[generate]"));
        assert!(toml_str.contains("target = \"python\""));
        assert!(toml_str.contains("[check]"));
    }

    #[test]
    fn test_load_from_file() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tool.toml");
        std::fs::write(
            &path,
            "[generate]\ntarget = \"jsonschema\"\noutput_dir = \"out\"\n\n[check]\nsummary = false\n",
        )
        .unwrap();

        let config = ToolConfig::load_from(Some(&path)).unwrap();
        assert_eq!(config.generate.target, Target::Jsonschema);
        assert_eq!(config.generate.output_dir, Some(PathBuf::from("out")));
        assert!(!config.check.summary);
    }

    #[test]
    fn test_save_round_trip() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("saved.toml");
        let mut config = ToolConfig::default();
        config.generate.target = Target::Typescript;
        config.save(&path).unwrap();

        let loaded = ToolConfig::load_from(Some(&path)).unwrap();
        assert_eq!(loaded.generate.target, Target::Typescript);
    }

    #[test]
    fn test_env_override() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tool.toml");
        std::fs::write(&path, "[generate]\ntarget = \"jsonschema\"\n\n[check]\nsummary = false\n")
            .unwrap();

        std::env::set_var("YAIF__GENERATE__TARGET", "typescript");
        std::env::set_var("YAIF__GENERATE__OUTPUT_DIR", "gen");
        let loaded = ToolConfig::load_from(Some(&path));
        std::env::remove_var("YAIF__GENERATE__TARGET");
        std::env::remove_var("YAIF__GENERATE__OUTPUT_DIR");

        let config = loaded.unwrap();
        assert_eq!(config.generate.target, Target::Typescript);
        assert_eq!(config.generate.output_dir, Some(PathBuf::from("gen")));
        assert!(!config.check.summary);
    }

    #[test]
    fn test_output_path() {
        let mut config = ToolConfig::default();
        assert_eq!(config.output_path(Path::new("shop.yaif"), Target::Python), None);

        config.generate.output_dir = Some(PathBuf::from("gen"));
        assert_eq!(
            config.output_path(Path::new("models/shop.yaif"), Target::Typescript),
            Some(PathBuf::from("gen/shop.ts"))
        );
    }
}
