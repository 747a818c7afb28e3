/// Service configuration.
///
/// Loaded from a TOML file (`hazmap.toml` by default) with every key
/// optional — a missing file or empty table yields the built-in
/// defaults. Two environment overrides are honored, typically supplied
/// via `.env`: `HAZMAP_CONFIG` picks the config file and
/// `HAZMAP_DATA_FILE` replaces the input path.

use std::env;
use std::error::Error;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::datasets;
use crate::model::InvalidRecordPolicy;

/// Default config file path, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "hazmap.toml";

/// Environment variable naming an alternate config file.
pub const CONFIG_PATH_ENV: &str = "HAZMAP_CONFIG";

/// Environment variable overriding `input.data_file`.
pub const DATA_FILE_ENV: &str = "HAZMAP_DATA_FILE";

// ---------------------------------------------------------------------------
// Configuration tables
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub input: InputConfig,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
    pub datasets: DatasetsConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Path to the merged record JSON file.
    pub data_file: String,
    /// What to do with structurally invalid records.
    pub on_invalid: InvalidRecordPolicy,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            data_file: "data/merged_data.json".to_string(),
            on_invalid: InvalidRecordPolicy::Fail,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory receiving the rendered map pages.
    pub directory: String,
    /// Delete and recreate the directory before rendering.
    pub clean: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: "output_data".to_string(),
            clean: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Minimum level: "debug", "info", "warning", or "error".
    pub level: String,
    /// Optional log file (appended).
    pub file: Option<String>,
    /// Include timestamps in console output.
    pub timestamps: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
            timestamps: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatasetsConfig {
    /// Registry keys to render, in order. Defaults to every registered
    /// dataset.
    pub enabled: Vec<String>,
}

impl Default for DatasetsConfig {
    fn default() -> Self {
        Self {
            enabled: datasets::all_dataset_keys()
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Parses the config file at `path`.
pub fn load_config(path: &Path) -> Result<Config, Box<dyn Error>> {
    let text = fs::read_to_string(path)
        .map_err(|e| format!("failed to read config '{}': {}", path.display(), e))?;
    let config: Config = toml::from_str(&text)
        .map_err(|e| format!("failed to parse config '{}': {}", path.display(), e))?;
    Ok(config)
}

/// Loads the config file if it exists; falls back to defaults when it
/// does not. The boolean reports whether a file was actually loaded so
/// the caller can log the fallback once the logger is up. A file that
/// exists but fails to parse is an error, not a fallback.
pub fn load_or_default(path: &Path) -> Result<(Config, bool), Box<dyn Error>> {
    if path.exists() {
        Ok((load_config(path)?, true))
    } else {
        Ok((Config::default(), false))
    }
}

impl Config {
    /// Applies process-environment overrides on top of the file values.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(data_file) = env::var(DATA_FILE_ENV) {
            if !data_file.is_empty() {
                self.input.data_file = data_file;
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_enable_every_registered_dataset() {
        let config = Config::default();
        assert_eq!(config.datasets.enabled, datasets::all_dataset_keys());
        assert_eq!(config.input.on_invalid, InvalidRecordPolicy::Fail);
        assert_eq!(config.output.directory, "output_data");
        assert!(config.output.clean);
    }

    #[test]
    fn test_empty_toml_yields_defaults() {
        let config: Config = toml::from_str("").expect("empty config should parse");
        assert_eq!(config.input.data_file, "data/merged_data.json");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_full_toml_round_trip() {
        let config: Config = toml::from_str(
            r#"
            [input]
            data_file = "fixtures/quakes.json"
            on_invalid = "skip"

            [output]
            directory = "maps"
            clean = false

            [logging]
            level = "debug"
            file = "hazmap.log"
            timestamps = true

            [datasets]
            enabled = ["temperature"]
            "#,
        )
        .expect("full config should parse");

        assert_eq!(config.input.data_file, "fixtures/quakes.json");
        assert_eq!(config.input.on_invalid, InvalidRecordPolicy::Skip);
        assert_eq!(config.output.directory, "maps");
        assert!(!config.output.clean);
        assert_eq!(config.logging.file.as_deref(), Some("hazmap.log"));
        assert_eq!(config.datasets.enabled, vec!["temperature"]);
    }

    #[test]
    fn test_partial_table_keeps_other_defaults() {
        let config: Config = toml::from_str(
            r#"
            [input]
            on_invalid = "skip"
            "#,
        )
        .unwrap();
        assert_eq!(config.input.on_invalid, InvalidRecordPolicy::Skip);
        // The sibling key and other tables fall back to defaults.
        assert_eq!(config.input.data_file, "data/merged_data.json");
        assert!(config.output.clean);
    }

    #[test]
    fn test_unknown_on_invalid_value_is_rejected() {
        let result: Result<Config, _> = toml::from_str(
            r#"
            [input]
            on_invalid = "ignore"
            "#,
        );
        assert!(result.is_err(), "'ignore' is not a valid policy");
    }

    #[test]
    fn test_load_or_default_falls_back_when_file_is_absent() {
        let path = Path::new("/nonexistent/hazmap/config.toml");
        let (config, loaded) = load_or_default(path).expect("absent file is not an error");
        assert!(!loaded);
        assert_eq!(config.output.directory, "output_data");
    }
}
