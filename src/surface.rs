//! Density-corrected drawing surface geometry.
//!
//! A [`Viewport`] separates the surface's *displayed* size (logical units,
//! what layout sees) from its *backing* size (physical pixels, what the
//! renderer draws into). On a display with pixel density `scale`, one
//! logical unit covers `scale` physical pixels on each axis, so the backing
//! buffer is allocated at `logical * scale` and shown at `logical`.

/// Surface geometry, computed once at startup before any drawing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    logical_width: f32,
    logical_height: f32,
    scale: f32,
}

impl Viewport {
    /// Build a viewport for a surface declared at `logical_width x
    /// logical_height` on a display with pixel density `scale`.
    ///
    /// The density factor is expected to be finite and at least 1.0; any
    /// other reading counts as "unknown" and falls back to 1.0.
    pub fn new(logical_width: f32, logical_height: f32, scale: f32) -> Self {
        let scale = if scale.is_finite() && scale >= 1.0 {
            scale
        } else {
            1.0
        };

        Self {
            logical_width,
            logical_height,
            scale,
        }
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Displayed (layout) size, unchanged from what was declared.
    pub fn logical_size(&self) -> (f32, f32) {
        (self.logical_width, self.logical_height)
    }

    /// Backing-buffer size in physical pixels.
    pub fn physical_size(&self) -> (f32, f32) {
        (
            self.logical_width * self.scale,
            self.logical_height * self.scale,
        )
    }

    /// Map normalized world coordinates onto the backing buffer.
    ///
    /// Exact multiplication: no clamping, no offset. Coordinates outside
    /// `[0, 1]` project outside the surface and are left for culling.
    pub fn project(&self, x01: f32, y01: f32) -> (f32, f32) {
        let (w, h) = self.physical_size();
        (x01 * w, y01 * h)
    }
}
