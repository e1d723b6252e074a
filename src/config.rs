//! Configuration file support.
//!
//! The classifier's marker lists are a maintained policy, not logic, so they
//! live in configuration. A configured list replaces the built-in default
//! outright; there is no merging.
//!
//! # Configuration File Format
//!
//! ```toml
//! [classifier]
//! industry_markers = ["pharma", "biotech", " inc"]
//! academic_markers = ["university", "institute"]
//!
//! [http]
//! timeout_secs = 30
//! ```

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Classifier marker lists
    #[serde(default)]
    pub classifier: ClassifierConfig,

    /// HTTP settings
    #[serde(default)]
    pub http: HttpConfig,
}

/// Marker lists driving the affiliation heuristic.
///
/// Markers are matched case-insensitively as substrings of the affiliation
/// text. Entries with a leading space (like `" inc"`) are deliberate: they
/// avoid matching inside words such as "Princeton".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Substrings indicating a commercial (pharma/biotech) affiliation
    #[serde(default = "default_industry_markers")]
    pub industry_markers: Vec<String>,

    /// Substrings indicating a non-commercial (university/institute) affiliation
    #[serde(default = "default_academic_markers")]
    pub academic_markers: Vec<String>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            industry_markers: default_industry_markers(),
            academic_markers: default_academic_markers(),
        }
    }
}

/// HTTP configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_industry_markers() -> Vec<String> {
    [
        "pharma",
        "pharmaceutical",
        "biotech",
        "bioscience",
        "therapeutics",
        "diagnostics",
        "genomics",
        " inc",
        "inc.",
        " ltd",
        "ltd.",
        " llc",
        " gmbh",
        " corp",
        " plc",
        "co., ltd",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_academic_markers() -> Vec<String> {
    [
        "university",
        "univ.",
        "college",
        "institute",
        "institut",
        "hospital",
        "school",
        "faculty",
        "department",
        "center",
        "centre",
        "academy",
        "clinic",
        "ministry",
        "foundation",
        "research council",
        "cnrs",
        "inserm",
        "veterans affairs",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> anyhow::Result<Config> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    toml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Find a config file in the default locations.
///
/// Checked in order: `./pharma-papers.toml`, then
/// `$XDG_CONFIG_HOME/pharma-papers/config.toml`.
pub fn find_config_file() -> Option<PathBuf> {
    let mut candidates = vec![PathBuf::from("pharma-papers.toml")];
    if let Some(config_dir) = dirs::config_dir() {
        candidates.push(config_dir.join("pharma-papers").join("config.toml"));
    }
    candidates.into_iter().find(|p| p.is_file())
}
