//! Harness configuration, loadable from a JSON file.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::engine::StrategyKind;
use crate::render::RenderConfig;

/// Everything the viewer needs to set up a session. All fields have
/// defaults, so a config file only states what it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    /// Declared (layout) surface size in logical units.
    pub logical_width: f32,
    pub logical_height: f32,

    /// Forced pixel-density factor. `None` reads it from the display at
    /// startup, falling back to 1.0 when it cannot be determined.
    pub scale_override: Option<f32>,

    /// Strategy the first engine is built as.
    pub start_strategy: StrategyKind,

    pub render: RenderConfig,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            logical_width: 800.0,
            logical_height: 520.0,
            scale_override: None,
            start_strategy: StrategyKind::RouletteWheel,
            render: RenderConfig::default(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config file: {0}")]
    Parse(#[from] serde_json::Error),
}

impl HarnessConfig {
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_files_keep_defaults_elsewhere() {
        let cfg: HarnessConfig =
            serde_json::from_str(r#"{"start_strategy": "rank", "scale_override": 2.0}"#).unwrap();

        assert_eq!(cfg.start_strategy, StrategyKind::Rank);
        assert_eq!(cfg.scale_override, Some(2.0));
        assert_eq!(cfg.logical_width, 800.0);
        assert_eq!(cfg.render, RenderConfig::default());
    }

    #[test]
    fn render_palette_is_overridable() {
        let cfg: HarnessConfig = serde_json::from_str(
            r#"{"render": {"agent_size_frac": 0.02,
                           "agent_color": {"r": 1.0, "g": 1.0, "b": 1.0, "a": 1.0}}}"#,
        )
        .unwrap();

        assert_eq!(cfg.render.agent_size_frac, 0.02);
        assert_eq!(cfg.render.agent_color.r, 1.0);
        // Untouched palette entries stay at their defaults.
        assert_eq!(cfg.render.food_color, RenderConfig::default().food_color);
    }

    #[test]
    fn defaults_round_trip_through_json() {
        let cfg = HarnessConfig::default();
        let json = serde_json::to_string(&cfg).unwrap();
        let back: HarnessConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cfg);
    }
}
