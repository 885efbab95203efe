//! Configuration management for lanewatch
//!
//! Config stored at: ~/.config/lanewatch/config.json

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use lanewatch_domain::service::DEFAULT_MATCH_THRESHOLD;
use lanewatch_types::{ConfigError, OutputFormat, Result};

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Reference route master (TOML)
    #[serde(default)]
    pub routes_file: Option<PathBuf>,

    /// Curated location reference list (CSV)
    #[serde(default)]
    pub locations_file: Option<PathBuf>,

    /// Telemetry dropdown city list (CSV)
    #[serde(default)]
    pub cities_file: Option<PathBuf>,

    /// Telemetry dropdown landmark list (CSV)
    #[serde(default)]
    pub landmarks_file: Option<PathBuf>,

    /// Live-telemetry position snapshot (JSON)
    #[serde(default)]
    pub telemetry_file: Option<PathBuf>,

    /// Aggregate snapshot output override
    #[serde(default)]
    pub snapshot_file: Option<PathBuf>,

    /// Route candidate store override
    #[serde(default)]
    pub candidates_file: Option<PathBuf>,

    /// Acceptance threshold for the fuzzy location matcher
    #[serde(default = "default_match_threshold")]
    pub match_threshold: f64,

    /// Default output format (json, table)
    #[serde(default = "default_output_format")]
    pub output_format: OutputFormat,
}

fn default_match_threshold() -> f64 {
    DEFAULT_MATCH_THRESHOLD
}

fn default_output_format() -> OutputFormat {
    OutputFormat::Table
}

impl Default for Config {
    fn default() -> Self {
        Self {
            routes_file: None,
            locations_file: None,
            cities_file: None,
            landmarks_file: None,
            telemetry_file: None,
            snapshot_file: None,
            candidates_file: None,
            match_threshold: default_match_threshold(),
            output_format: default_output_format(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or(ConfigError::NotFound)?
            .join("lanewatch");
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Get the data directory path
    pub fn data_dir() -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .ok_or(ConfigError::NotFound)?
            .join("lanewatch");
        Ok(data_dir)
    }

    /// Aggregate snapshot path: override, or the default data location
    pub fn snapshot_path(&self) -> Result<PathBuf> {
        if let Some(ref path) = self.snapshot_file {
            return Ok(path.clone());
        }
        Ok(Self::data_dir()?.join("snapshot.json"))
    }

    /// Route candidate store path: override, or the default data location
    pub fn candidates_path(&self) -> Result<PathBuf> {
        if let Some(ref path) = self.candidates_file {
            return Ok(path.clone());
        }
        Ok(Self::data_dir()?.join("candidates.json"))
    }

    /// Load config from file, or create default
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;

        // Ensure directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, content)?;
        Ok(())
    }
}

impl std::fmt::Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fn path_or_unset(p: &Option<PathBuf>) -> String {
            p.as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(not set)".to_string())
        }

        writeln!(f, "Lanewatch Configuration")?;
        writeln!(f, "=======================")?;
        writeln!(f)?;
        writeln!(f, "Routes file:     {}", path_or_unset(&self.routes_file))?;
        writeln!(f, "Locations file:  {}", path_or_unset(&self.locations_file))?;
        writeln!(f, "Cities file:     {}", path_or_unset(&self.cities_file))?;
        writeln!(f, "Landmarks file:  {}", path_or_unset(&self.landmarks_file))?;
        writeln!(f, "Telemetry file:  {}", path_or_unset(&self.telemetry_file))?;
        writeln!(
            f,
            "Snapshot file:   {}",
            self.snapshot_path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|_| "(error)".to_string())
        )?;
        writeln!(
            f,
            "Candidates file: {}",
            self.candidates_path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|_| "(error)".to_string())
        )?;
        writeln!(f, "Match threshold: {}", self.match_threshold)?;
        writeln!(f, "Output format:   {}", self.output_format)?;

        if let Ok(path) = Self::config_path() {
            writeln!(f)?;
            writeln!(f, "Config file:     {}", path.display())?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.routes_file.is_none());
        assert!((config.match_threshold - 0.9).abs() < 1e-9);
        assert_eq!(config.output_format, OutputFormat::Table);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: Config = serde_json::from_str(r#"{"match_threshold": 0.8}"#).unwrap();
        assert!((config.match_threshold - 0.8).abs() < 1e-9);
        assert_eq!(config.output_format, OutputFormat::Table);
        assert!(config.telemetry_file.is_none());
    }

    #[test]
    fn test_display_shows_unset_paths() {
        let text = Config::default().to_string();
        assert!(text.contains("Routes file:     (not set)"));
        assert!(text.contains("Match threshold: 0.9"));
    }
}
