// File: ./src/config.rs
// Handles configuration loading and defaults.
use crate::context::AppContext;
use crate::model::title::{DEFAULT_ELEARNING_VENUE, DEFAULT_LECTURE_MARKER};
use anyhow::{Error, Result};
use chrono::Duration;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

// Module list from the portal's "modules registered" page.
const DEFAULT_COURSES: &[(&str, &str)] = &[
    ("IT1111", "APPLIED MATHEMATICS IN COMPUTING"),
    ("IT1112", "BUSINESS INNOVATION & ENTERPRISE"),
    ("IT1113", "NETWORK TECHNOLOGIES"),
    ("IT1114", "PROGRAMMING"),
    ("IT1115", "UX DESIGN IN WEB DEVELOPMENT"),
    ("IT-DIT", "DIT PERSONAL MENTOR CONTACT TIME"),
];

fn default_tolerance() -> u32 {
    10
}
fn default_courses() -> BTreeMap<String, String> {
    DEFAULT_COURSES
        .iter()
        .map(|(code, name)| (code.to_string(), name.to_string()))
        .collect()
}
fn default_elearning_venue() -> String {
    DEFAULT_ELEARNING_VENUE.to_string()
}
fn default_lecture_marker() -> String {
    DEFAULT_LECTURE_MARKER.to_string()
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct Config {
    /// Gap, in minutes, between two sessions that are fused together.
    #[serde(default = "default_tolerance")]
    pub adjacency_tolerance_mins: u32,

    #[serde(default = "default_elearning_venue")]
    pub elearning_venue: String,

    #[serde(default = "default_lecture_marker")]
    pub lecture_marker: String,

    /// Course code -> full name.
    #[serde(default = "default_courses")]
    pub courses: BTreeMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            adjacency_tolerance_mins: default_tolerance(),
            elearning_venue: default_elearning_venue(),
            lecture_marker: default_lecture_marker(),
            courses: default_courses(),
        }
    }
}

impl Config {
    pub fn tolerance(&self) -> Duration {
        Duration::minutes(i64::from(self.adjacency_tolerance_mins))
    }

    /// Load the configuration file found through the context.
    pub fn load(ctx: &dyn AppContext) -> Result<Self> {
        let path = ctx.get_config_file_path()?;
        Self::load_from_path(&path)
    }

    /// Load a configuration file from an explicit path.
    /// Returns a contextualized error if reading or parsing fails.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(anyhow::anyhow!(
                "Config file not found: '{}'",
                path.display()
            ));
        }

        let contents = fs::read_to_string(path).map_err(|e| {
            anyhow::anyhow!("Failed to read config file '{}': {}", path.display(), e)
        })?;

        let config: Config = toml::from_str(&contents).map_err(|e| {
            anyhow::anyhow!("Failed to parse config file '{}': {}", path.display(), e)
        })?;

        log::debug!(
            "Loaded config from '{}' ({} courses)",
            path.display(),
            config.courses.len()
        );
        Ok(config)
    }

    /// Like `load`, but a missing file yields the defaults.
    pub fn load_or_default(ctx: &dyn AppContext) -> Result<Self> {
        match Self::load(ctx) {
            Ok(config) => Ok(config),
            Err(e) if Self::is_missing_config_error(&e) => {
                log::debug!("No config file, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e),
        }
    }

    /// Helper to detect whether an anyhow::Error indicates that the config file was missing.
    pub fn is_missing_config_error(err: &Error) -> bool {
        if err.to_string().contains("Config file not found") {
            return true;
        }

        for cause in err.chain() {
            if let Some(io_err) = cause.downcast_ref::<std::io::Error>()
                && io_err.kind() == std::io::ErrorKind::NotFound
            {
                return true;
            }
        }

        false
    }
}
