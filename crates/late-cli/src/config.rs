// crates/late-cli/src/config.rs
//
// Runtime configuration for the Late Staking CLI.
// Loaded from a TOML file or populated with sensible defaults.

use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

use crate::output::OutputFormat;

/// Runtime configuration for the CLI.
#[derive(Debug, Clone, Deserialize)]
pub struct CliConfig {
    /// Directory for the RocksDB account store.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Log level used when RUST_LOG is not set: "trace", "debug", "info",
    /// "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Account store for `simulate`: "memory" or "rocksdb".
    #[serde(default = "default_backend")]
    pub backend: String,

    /// Default output format: "table" or "json".
    #[serde(default = "default_output")]
    pub output: String,
}

fn default_data_dir() -> String {
    "~/.late-staking/data".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_backend() -> String {
    "memory".to_string()
}

fn default_output() -> String {
    "table".to_string()
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
            backend: default_backend(),
            output: default_output(),
        }
    }
}

impl CliConfig {
    /// Load configuration from a TOML file at the given path.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = fs::read_to_string(expand_tilde(path))?;
        let config: CliConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load the file if it exists, otherwise fall back to defaults. A file
    /// that exists but does not parse is still an error.
    pub fn load_or_default(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        if expand_tilde(path).exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// The data directory with `~` expanded.
    pub fn data_path(&self) -> PathBuf {
        expand_tilde(&self.data_dir)
    }

    pub fn output_format(&self) -> Result<OutputFormat, Box<dyn std::error::Error>> {
        Ok(self.output.parse::<OutputFormat>()?)
    }
}

/// Expand a leading `~` to the user's home directory. Paths without one, or
/// systems without a home directory, are returned unchanged.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    } else if path == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CliConfig::default();
        assert_eq!(config.backend, "memory");
        assert_eq!(config.log_level, "info");
        assert_eq!(config.output_format().unwrap(), OutputFormat::Table);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: CliConfig = toml::from_str("backend = \"rocksdb\"\noutput = \"json\"").unwrap();
        assert_eq!(config.backend, "rocksdb");
        assert_eq!(config.output_format().unwrap(), OutputFormat::Json);
        assert_eq!(config.data_dir, "~/.late-staking/data");
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = CliConfig::load_or_default("/nonexistent/late-staking/config.toml").unwrap();
        assert_eq!(config.backend, "memory");
    }

    #[test]
    fn test_expand_tilde() {
        assert_eq!(expand_tilde("/tmp/x"), PathBuf::from("/tmp/x"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_tilde("~/data"), home.join("data"));
        }
    }
}
