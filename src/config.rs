//! Application configuration.
//!
//! The configuration is loaded from a JSON file at
//! `$XDG_CONFIG_HOME/hyprshift/config.json`.  Every section is optional —
//! a minimal `{}` file is valid and all sections fall back to their
//! compiled-in defaults.
//!
//! # Example
//!
//! ```json
//! {
//!   "cycle": {
//!     "fractions": [0.5, 0.6667, 0.3333],
//!     "tolerance_px": 8
//!   },
//!   "socket": { "path": "/tmp/hyprshift.sock" }
//! }
//! ```

use crate::geometry;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Size-cycle settings for the edge actions.
    #[serde(default)]
    pub cycle: CycleConfig,

    /// Action socket settings.
    #[serde(default)]
    pub socket: SocketConfig,
}

/// Size-cycle settings for the edge actions.
///
/// `fractions` lists the sizes (as fractions of the display's usable width
/// or height) that repeated presses of the same edge action cycle through.
/// `tolerance_px` is how far, in pixels, a window may drift from an exact
/// step before it no longer counts as being at that step.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CycleConfig {
    pub fractions: Vec<f64>,
    pub tolerance_px: i32,
}

impl Default for CycleConfig {
    fn default() -> Self {
        Self {
            fractions: geometry::SIZE_CYCLE.to_vec(),
            tolerance_px: geometry::SNAP_TOLERANCE,
        }
    }
}

/// Action socket settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SocketConfig {
    /// Socket path override.  `None` uses
    /// `$XDG_RUNTIME_DIR/hyprshift.sock`.
    pub path: Option<String>,
}

impl Config {
    /// Load configuration from a JSON file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError(format!("failed to read {}: {}", path.display(), e)))?;
        let config: Self = serde_json::from_str(&contents)
            .map_err(|e| ConfigError(format!("failed to parse {}: {}", path.display(), e)))?;
        Ok(config)
    }
}

/// Error from loading or parsing a configuration file.
#[derive(Debug, thiserror::Error)]
#[error("config error: {0}")]
pub struct ConfigError(String);
