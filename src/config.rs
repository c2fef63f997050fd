use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::models::LocationRecord;

/// Settings for the booking search flow
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Route the form navigates to on submit
    pub results_route: String,
    /// chrono format used for dates in the query string
    pub date_format: String,
    /// Simulated latency of the static location directory, in milliseconds
    pub search_latency_ms: u64,
    /// Options offered in the location input before the user types
    pub default_locations: Vec<LocationRecord>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            results_route: "/search".to_string(),
            date_format: "%d-%m-%Y".to_string(),
            search_latency_ms: 0,
            default_locations: vec![
                LocationRecord::new("new-york", "New York"),
                LocationRecord::new("barcelona", "Barcelona"),
                LocationRecord::new("los-angeles", "Los Angeles"),
            ],
        }
    }
}

impl Settings {
    /// Load settings from a JSON file; missing keys fall back to defaults
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {}", path.display()))?;
        Self::from_json_str(&raw)
            .with_context(|| format!("Failed to parse settings in {}", path.display()))
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).context("Invalid settings JSON")
    }

    pub fn search_latency(&self) -> Duration {
        Duration::from_millis(self.search_latency_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let settings = Settings::from_json_str(r#"{ "search_latency_ms": 600 }"#).unwrap();

        assert_eq!(settings.search_latency(), Duration::from_millis(600));
        assert_eq!(settings.results_route, "/search");
        assert_eq!(settings.default_locations.len(), 3);
    }

    #[test]
    fn loads_settings_file() {
        let file_name = format!("booking-settings-{}.json", std::process::id());
        let path = std::env::temp_dir().join(file_name);
        let json = r#"{
            "results_route": "/rooms",
            "default_locations": [{ "value": "seoul", "label": "Seoul" }]
        }"#;
        std::fs::write(&path, json).unwrap();

        let settings = Settings::from_json_file(&path);
        std::fs::remove_file(&path).unwrap();
        let settings = settings.unwrap();

        assert_eq!(settings.results_route, "/rooms");
        assert_eq!(settings.default_locations, vec![LocationRecord::new("seoul", "Seoul")]);
        assert_eq!(settings.date_format, "%d-%m-%Y");
    }

    #[test]
    fn missing_settings_file_names_the_path() {
        let path = std::env::temp_dir().join("booking-settings-does-not-exist.json");
        let err = Settings::from_json_file(&path).unwrap_err();
        assert!(err.to_string().contains("booking-settings-does-not-exist.json"));
    }

    #[test]
    fn rejects_invalid_json() {
        assert!(Settings::from_json_str("{ results_route: ").is_err());
    }
}
