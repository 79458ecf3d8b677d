//! Visualization and training-control harness for an evolutionary
//! simulation engine.
//!
//! The engine itself (movement, neural decision-making, selection math) is
//! an external collaborator behind the [`engine::Engine`] trait; this crate
//! owns everything around it: the density-corrected drawing surface, the
//! glyph renderer with off-surface culling, the clear/query/advance frame
//! cycle, strategy hot-swapping, and the append-only training log.

pub mod config;
pub mod controller;
pub mod engine;
pub mod event_log;
pub mod frame;
pub mod render;
pub mod surface;
pub mod training;

pub use config::HarnessConfig;
pub use controller::StrategyController;
pub use engine::{AgentState, Engine, FoodState, StrategyKind, WorldSnapshot};
pub use event_log::EventLog;
pub use frame::{run_frame, FrameReport};
pub use render::{Canvas, Color, RenderConfig, Renderer};
pub use surface::Viewport;
