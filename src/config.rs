use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::chart::spec::ChartProfile;

/// Optional override file, looked up in the working directory.
pub const CONFIG_FILE: &str = "eda.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("reading {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("parsing {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

// ---------------------------------------------------------------------------
// Run configuration
// ---------------------------------------------------------------------------

/// Everything a run needs. The input file and output directory are fixed
/// conventions; the remaining fields may be overridden from [`CONFIG_FILE`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Input CSV.
    #[serde(skip)]
    pub input: PathBuf,
    /// Directory the chart images are written to.
    #[serde(skip)]
    pub output_dir: PathBuf,
    /// Chart set to render.
    pub profile: ChartProfile,
    /// Pixels per inch of figure size.
    pub dpi: u32,
    /// Rows printed in the console preview.
    pub preview_rows: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: PathBuf::from("laptop_prices.csv"),
            output_dir: PathBuf::from("visualizations"),
            profile: ChartProfile::Full,
            dpi: 300,
            preview_rows: 5,
        }
    }
}

impl Config {
    /// Load [`CONFIG_FILE`] from `dir` if present, defaults otherwise.
    pub fn load(dir: &Path) -> Result<Self, ConfigError> {
        let path = dir.join(CONFIG_FILE);
        if !path.exists() {
            log::debug!("no {CONFIG_FILE}, using defaults");
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        let config = Self::from_json(&text).map_err(|e| match e {
            ConfigError::Parse { source, .. } => ConfigError::Parse { path, source },
            other => other,
        })?;
        log::info!("loaded configuration from {CONFIG_FILE}");
        Ok(config)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(text).map_err(|source| ConfigError::Parse {
            path: PathBuf::from(CONFIG_FILE),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.dpi == 0 {
            return Err(ConfigError::Invalid("dpi must be positive".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_the_fixed_conventions() {
        let config = Config::default();
        assert_eq!(config.input, PathBuf::from("laptop_prices.csv"));
        assert_eq!(config.output_dir, PathBuf::from("visualizations"));
        assert_eq!(config.profile, ChartProfile::Full);
        assert_eq!(config.dpi, 300);
        assert_eq!(config.preview_rows, 5);
    }

    #[test]
    fn partial_json_keeps_other_defaults() {
        let config = Config::from_json(r#"{ "profile": "reduced", "dpi": 100 }"#).unwrap();
        assert_eq!(config.profile, ChartProfile::Reduced);
        assert_eq!(config.dpi, 100);
        assert_eq!(config.output_dir, PathBuf::from("visualizations"));
    }

    #[test]
    fn unknown_fields_and_zero_dpi_are_rejected() {
        assert!(matches!(
            Config::from_json(r#"{ "colour": "blue" }"#),
            Err(ConfigError::Parse { .. })
        ));
        assert!(matches!(
            Config::from_json(r#"{ "dpi": 0 }"#),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn input_and_output_dir_are_not_configurable() {
        for json in [
            r#"{ "input": "other.csv" }"#,
            r#"{ "output_dir": "charts" }"#,
        ] {
            assert!(
                matches!(Config::from_json(json), Err(ConfigError::Parse { .. })),
                "{json} should be rejected"
            );
        }
    }

    #[test]
    fn load_without_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(Config::load(dir.path()).unwrap(), Config::default());
    }

    #[test]
    fn load_reads_file_from_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE),
            r#"{ "profile": "reduced", "preview_rows": 10 }"#,
        )
        .unwrap();

        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.profile, ChartProfile::Reduced);
        assert_eq!(config.preview_rows, 10);
        assert_eq!(config.input, PathBuf::from("laptop_prices.csv"));
    }

    #[test]
    fn load_reports_bad_json_with_path() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "{ not json").unwrap();

        let err = Config::load(dir.path()).unwrap_err();
        match err {
            ConfigError::Parse { path, .. } => assert_eq!(path, dir.path().join(CONFIG_FILE)),
            other => panic!("unexpected error: {other}"),
        }
    }
}
