//! Engine tunables.

use crate::error::EngineResult;
use serde::{Deserialize, Serialize};

/// Default number of undo entries kept before the oldest is evicted.
pub const DEFAULT_HISTORY_LIMIT: usize = 50;
/// Default offset applied to pasted and duplicated elements.
pub const DEFAULT_PASTE_OFFSET: f64 = 20.0;
/// Default distance between the top edge of a bounding box and its rotate handle.
pub const DEFAULT_ROTATE_HANDLE_OFFSET: f64 = 20.0;
/// Size assumed for elements without an explicit width and height.
pub const DEFAULT_ELEMENT_SIZE: f64 = 50.0;
/// Default hit-test threshold in world units.
pub const DEFAULT_HIT_TOLERANCE: f64 = 5.0;

/// Configuration shared by the engine components.
///
/// Every field has a default, so a host can deserialize a partial JSON
/// object and only override what it cares about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Maximum undo stack depth.
    pub history_limit: usize,
    /// Offset applied on both axes to pasted/duplicated elements.
    pub paste_offset: f64,
    /// Rotate handle distance above the bounding box.
    pub rotate_handle_offset: f64,
    /// Fallback element size used by distance queries.
    pub default_element_size: f64,
    /// Default threshold for point hit-testing.
    pub hit_tolerance: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            history_limit: DEFAULT_HISTORY_LIMIT,
            paste_offset: DEFAULT_PASTE_OFFSET,
            rotate_handle_offset: DEFAULT_ROTATE_HANDLE_OFFSET,
            default_element_size: DEFAULT_ELEMENT_SIZE,
            hit_tolerance: DEFAULT_HIT_TOLERANCE,
        }
    }
}

impl EngineConfig {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> EngineResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> EngineResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.history_limit, 50);
        assert!((config.paste_offset - 20.0).abs() < f64::EPSILON);
        assert!((config.rotate_handle_offset - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_partial_json() {
        let config = EngineConfig::from_json(r#"{ "history_limit": 5 }"#).unwrap();
        assert_eq!(config.history_limit, 5);
        assert!((config.default_element_size - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_invalid_json() {
        assert!(EngineConfig::from_json("not json").is_err());
    }
}
