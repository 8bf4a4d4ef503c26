#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Dashboard configuration.
//!
//! Settings come from an optional TOML file in which every key may be
//! omitted, followed by environment overrides:
//!
//! | Variable | Overrides |
//! | --- | --- |
//! | `MALARIA_DATA_DIR` | `data.dir` |
//! | `BIND_ADDR` | `server.bind_addr` |
//! | `PORT` | `server.port` |

use std::path::{Path, PathBuf};

use malaria_dash_dataset::DatasetPaths;
use malaria_dash_dataset_models::DatasetKind;
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("Failed to read config file {}: {source}", .path.display())]
    Io {
        /// Path of the config file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML for [`DashboardConfig`].
    #[error("Invalid config: {0}")]
    Toml(#[from] toml::de::Error),

    /// An environment override could not be parsed.
    #[error("Invalid value '{value}' for environment variable {name}")]
    InvalidEnv {
        /// Variable name.
        name: &'static str,
        /// Raw value.
        value: String,
    },
}

/// Complete dashboard configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub data: DataConfig,
    pub analysis: AnalysisConfig,
    pub server: ServerConfig,
}

/// Where the three CSV files live.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Directory the file names below are resolved against.
    pub dir: PathBuf,
    pub mortality: String,
    pub age_deaths: String,
    pub incidence: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("data"),
            mortality: DatasetKind::Mortality.default_file_name().to_string(),
            age_deaths: DatasetKind::AgeDeaths.default_file_name().to_string(),
            incidence: DatasetKind::Incidence.default_file_name().to_string(),
        }
    }
}

impl DataConfig {
    /// Resolved paths of the three dataset files.
    #[must_use]
    pub fn paths(&self) -> DatasetPaths {
        DatasetPaths {
            mortality: self.dir.join(&self.mortality),
            age_deaths: self.dir.join(&self.age_deaths),
            incidence: self.dir.join(&self.incidence),
        }
    }
}

/// Parameters of the derived series.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Year whose incidence ranking fixes the top-N set.
    pub reference_year: i32,
    /// Number of entities in the top-N set.
    pub top_n: usize,
    /// Year the map shows before the user moves the slider.
    pub default_year: i32,
    /// Upper bound of the incidence bar charts' value axis.
    pub incidence_axis_max: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            reference_year: malaria_dash_analytics::DEFAULT_REFERENCE_YEAR,
            top_n: malaria_dash_analytics::DEFAULT_TOP_N,
            default_year: 2016,
            incidence_axis_max: malaria_dash_chart::DEFAULT_INCIDENCE_AXIS_MAX,
        }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub port: u16,
    /// Directory holding the dashboard page.
    pub static_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1".to_string(),
            port: 8080,
            static_dir: PathBuf::from("app"),
        }
    }
}

impl DashboardConfig {
    /// Parses a TOML document. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Toml`] if the document is malformed.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::de::from_str(s)?)
    }

    /// Reads the config file at `path` (or starts from defaults when `None`)
    /// and applies environment overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed, or an
    /// environment override is invalid.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => {
                log::info!("Reading config from {}", path.display());
                let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })?;
                Self::from_toml_str(&contents)?
            }
            None => Self::default(),
        };

        config.apply_overrides(|name| std::env::var(name).ok())?;

        Ok(config)
    }

    /// Applies overrides looked up through `lookup` (normally the process
    /// environment).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEnv`] if `PORT` is not a valid port.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup("MALARIA_DATA_DIR") {
            self.data.dir = PathBuf::from(dir);
        }
        if let Some(addr) = lookup("BIND_ADDR") {
            self.server.bind_addr = addr;
        }
        if let Some(port) = lookup("PORT") {
            self.server.port = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidEnv {
                    name: "PORT",
                    value: port.clone(),
                })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_default() {
        let config = DashboardConfig::from_toml_str("").unwrap();
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.analysis.reference_year, 2000);
        assert_eq!(config.analysis.top_n, 10);
        assert_eq!(config.analysis.default_year, 2016);
        assert!((config.analysis.incidence_axis_max - 800.0).abs() < f64::EPSILON);
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn default_paths_point_into_data_dir() {
        let paths = DashboardConfig::default().data.paths();
        assert_eq!(paths.mortality, PathBuf::from("data/malaria_deaths.csv"));
        assert_eq!(paths.age_deaths, PathBuf::from("data/malaria_deaths_age.csv"));
        assert_eq!(paths.incidence, PathBuf::from("data/malaria_inc.csv"));
    }

    #[test]
    fn partial_document_keeps_other_defaults() {
        let config = DashboardConfig::from_toml_str(
            r#"
[data]
dir = "/srv/malaria"

[analysis]
top_n = 5

[server]
port = 9000
"#,
        )
        .unwrap();
        assert_eq!(config.data.dir, PathBuf::from("/srv/malaria"));
        assert_eq!(config.data.incidence, "malaria_inc.csv");
        assert_eq!(config.analysis.top_n, 5);
        assert_eq!(config.analysis.reference_year, 2000);
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.bind_addr, "127.0.0.1");
    }

    #[test]
    fn malformed_document_fails() {
        assert!(matches!(
            DashboardConfig::from_toml_str("[server]\nport = \"eighty\""),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn env_overrides_apply() {
        let mut config = DashboardConfig::default();
        config
            .apply_overrides(|name| match name {
                "MALARIA_DATA_DIR" => Some("/tmp/in".to_string()),
                "BIND_ADDR" => Some("0.0.0.0".to_string()),
                "PORT" => Some("3000".to_string()),
                _ => None,
            })
            .unwrap();
        assert_eq!(config.data.dir, PathBuf::from("/tmp/in"));
        assert_eq!(config.server.bind_addr, "0.0.0.0");
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn invalid_port_override_fails() {
        let mut config = DashboardConfig::default();
        let err = config
            .apply_overrides(|name| (name == "PORT").then(|| "http".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnv { name: "PORT", .. }));
    }

    #[test]
    fn missing_file_fails() {
        let err = DashboardConfig::load(Some(Path::new("/nonexistent/dash.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
