// Data-driven guide configuration.
//
// Tunables for the navigation loop live in `GuideConfig`, loaded from JSON at
// startup and never mutated afterwards. Every field has a default, so a
// config file only needs the values it changes (or can be omitted entirely).
//
// See also: `guide.rs` which reads these values, `definition.rs` for the
// per-floor graph file (scale and image size live there, not here).

use crate::error::{NavError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuideConfig {
    /// Ground-plane distance (meters) below which the current waypoint counts
    /// as reached.
    pub proximity_threshold: f64,
    /// Height (meters) of the waypoint marker above the floor. Only affects
    /// emitted positions; proximity ignores height.
    pub waypoint_height: f64,
    /// Floor-plan size in pixels to use when the graph file has no `map_size`.
    pub fallback_map_size: Option<(f64, f64)>,
    /// Forward status strings to the speech sink.
    pub speak_status: bool,
}

impl Default for GuideConfig {
    fn default() -> Self {
        Self {
            proximity_threshold: 1.0,
            waypoint_height: 0.2,
            fallback_map_size: None,
            speak_status: true,
        }
    }
}

impl GuideConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the navigator cannot work with: the threshold must be
    /// finite and positive, the marker height finite.
    pub fn validate(&self) -> Result<()> {
        let threshold = self.proximity_threshold;
        if !(threshold.is_finite() && threshold > 0.0) {
            return Err(NavError::InvalidDefinition(format!(
                "proximity_threshold must be positive, got {threshold}"
            )));
        }
        if !self.waypoint_height.is_finite() {
            return Err(NavError::InvalidDefinition(format!(
                "waypoint_height must be finite, got {}",
                self.waypoint_height
            )));
        }
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| NavError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }
}
