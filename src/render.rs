//! Glyph rendering over an explicit drawing context.
//!
//! All coordinates here are physical pixels; callers project normalized
//! world coordinates first (see [`crate::surface::Viewport`]). Agents are
//! triangles whose tip points along their heading, foods are circles, and
//! both are culled when their margin would overflow the surface edge:
//! - tip at `(x - sin(h) * size, y + cos(h) * size)`
//! - base vertices at `h + tau/3` and `h + 2*tau/3`, distance `size * 1.5`

use std::f32::consts::TAU;

use serde::{Deserialize, Serialize};

/// Straight-alpha RGBA color, components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

/// Drawing surface the renderer issues primitives against.
///
/// Kept deliberately tiny: one implementation wraps the real backend, and
/// tests record calls instead of drawing.
pub trait Canvas {
    /// Surface size in physical pixels.
    fn size(&self) -> (f32, f32);

    fn clear(&mut self, color: Color);

    fn fill_triangle(&mut self, a: (f32, f32), b: (f32, f32), c: (f32, f32), color: Color);

    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: Color);
}

/// Render knobs. Colors only need to keep agents and foods visually
/// distinct; the defaults can be overridden from the config file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub background: Color,
    pub agent_color: Color,
    pub food_color: Color,

    /// Agent glyph size as a fraction of surface width. Food radius is
    /// half of the resulting size.
    pub agent_size_frac: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            background: Color::new(0.10, 0.10, 0.12, 1.0),
            agent_color: Color::new(0.95, 0.45, 0.35, 1.0),
            food_color: Color::new(0.55, 0.65, 0.90, 1.0),
            agent_size_frac: 0.01,
        }
    }
}

/// True when a glyph of the given margin would overflow the surface.
pub fn culled(x: f32, y: f32, margin: f32, width: f32, height: f32) -> bool {
    x - margin < 0.0 || x + margin > width || y - margin < 0.0 || y + margin > height
}

/// Vertices of an agent glyph: tip first, then the two base corners.
pub fn triangle_points(x: f32, y: f32, size: f32, heading: f32) -> [(f32, f32); 3] {
    let vertex = |angle: f32, dist: f32| (x - angle.sin() * dist, y + angle.cos() * dist);

    [
        vertex(heading, size),
        vertex(heading + TAU / 3.0, size * 1.5),
        vertex(heading + 2.0 * TAU / 3.0, size * 1.5),
    ]
}

/// Draws the two glyph kinds onto a [`Canvas`].
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Draw one agent glyph. Returns `false` when the draw was culled.
    ///
    /// The culling margin is twice the glyph size, an edge-overflow guard
    /// rather than a tight bound on the triangle.
    pub fn draw_agent(
        &self,
        canvas: &mut dyn Canvas,
        x: f32,
        y: f32,
        size: f32,
        heading: f32,
    ) -> bool {
        let (w, h) = canvas.size();
        if culled(x, y, size * 2.0, w, h) {
            return false;
        }

        let [tip, left, right] = triangle_points(x, y, size, heading);
        canvas.fill_triangle(tip, left, right, self.config.agent_color);
        true
    }

    /// Draw one food glyph. Returns `false` when the draw was culled.
    pub fn draw_food(&self, canvas: &mut dyn Canvas, x: f32, y: f32, radius: f32) -> bool {
        let (w, h) = canvas.size();
        if culled(x, y, radius * 2.0, w, h) {
            return false;
        }

        canvas.fill_circle(x, y, radius, self.config.food_color);
        true
    }
}
