//! Engine capability surface and the snapshot model it exposes.
//!
//! Coordinate conventions (shared with the renderer):
//! - agent and food positions are normalized to `[0, 1]` on both axes
//! - `heading` is in radians; `0.0` points along the glyph "up" axis and the
//!   tip of an agent glyph sits at `(x - sin(h), y + cos(h))` scaled by size

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One agent as read out of the engine. Valid for the lifetime of the
/// snapshot it came from; the next `step()` invalidates it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AgentState {
    pub x: f32,
    pub y: f32,
    pub heading: f32,
}

/// One food item (stationary resource) as read out of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FoodState {
    pub x: f32,
    pub y: f32,
}

/// Immutable read of the full engine state at one instant.
///
/// Produced fresh by every [`Engine::world`] call; the renderer never
/// mutates it and never holds it across frames.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub agents: Vec<AgentState>,
    pub foods: Vec<FoodState>,
}

/// The narrow interface the harness drives an engine through.
///
/// Implementations are interchangeable strategy variants; exactly one
/// instance is live at a time and the [`StrategyController`] owns it.
/// All three calls are bounded and non-blocking; `world` must not mutate
/// engine state and is safe to call any number of times between `step`
/// and `train` calls.
///
/// [`StrategyController`]: crate::controller::StrategyController
pub trait Engine {
    /// Read the current world state.
    fn world(&self) -> WorldSnapshot;

    /// Advance the simulation by exactly one discrete tick.
    fn step(&mut self);

    /// Run one full training iteration (internally many steps) and return
    /// a human-readable summary of the result.
    fn train(&mut self) -> String;
}

/// The closed set of selection-strategy variants an engine can be built as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    RouletteWheel,
    Rank,
}

impl StrategyKind {
    /// Every variant, in UI presentation order.
    pub const ALL: [StrategyKind; 2] = [StrategyKind::RouletteWheel, StrategyKind::Rank];

    /// Canonical machine name, stable across config files and logs.
    pub fn name(self) -> &'static str {
        match self {
            StrategyKind::RouletteWheel => "roulettewheel",
            StrategyKind::Rank => "rank",
        }
    }

    /// Human-facing button label.
    pub fn label(self) -> &'static str {
        match self {
            StrategyKind::RouletteWheel => "Roulette wheel",
            StrategyKind::Rank => "Rank",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A strategy name outside the closed set.
///
/// The viewer builds its buttons from [`StrategyKind::ALL`], so this can
/// only surface from config files or command-line input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown strategy '{0}' (expected one of: roulettewheel, rank)")]
pub struct UnknownStrategy(pub String);

impl FromStr for StrategyKind {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "roulettewheel" => Ok(StrategyKind::RouletteWheel),
            "rank" => Ok(StrategyKind::Rank),
            other => Err(UnknownStrategy(other.to_string())),
        }
    }
}
