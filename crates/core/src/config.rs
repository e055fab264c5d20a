use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Resolved locations and OCR settings for one run. The pipeline and mapper
/// receive these injected; no core logic hardcodes a path.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Route-sheet template the mapper fills in.
    pub template_path: PathBuf,
    /// Directory finished route sheets are written to.
    pub output_dir: PathBuf,
    /// Directory for diagnostics snapshots (raw OCR text, record JSON).
    pub data_dir: PathBuf,
    /// Tesseract language code.
    pub ocr_language: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            template_path: PathBuf::from("assets/RouteSheetTemplateV2.xlsx"),
            output_dir: PathBuf::from("output"),
            data_dir: PathBuf::from("data"),
            ocr_language: "eng".to_string(),
        }
    }
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&raw)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_relative_paths() {
        let config = Config::default();
        assert!(config.template_path.is_relative());
        assert_eq!(config.ocr_language, "eng");
    }

    #[test]
    fn partial_toml_falls_back_to_defaults() {
        let config: Config = toml::from_str(r#"output_dir = "sheets""#).unwrap();
        assert_eq!(config.output_dir, PathBuf::from("sheets"));
        assert_eq!(config.data_dir, PathBuf::from("data"));
    }

    #[test]
    fn full_toml_round_trips() {
        let config = Config {
            template_path: PathBuf::from("/srv/templates/route.xlsx"),
            output_dir: PathBuf::from("/srv/out"),
            data_dir: PathBuf::from("/srv/data"),
            ocr_language: "eng".to_string(),
        };
        let raw = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&raw).unwrap();
        assert_eq!(parsed.template_path, config.template_path);
        assert_eq!(parsed.output_dir, config.output_dir);
    }
}
