//! One iteration of the steady-state frame cycle.
//!
//! Per frame: clear the surface, snapshot the world, advance the engine by
//! one tick, then draw the snapshot. The snapshot is taken *before* the
//! tick, so what appears on screen is always the state the tick started
//! from. The enclosing loop lives in the viewer and yields to the display
//! once per iteration; engine swaps therefore only ever land between
//! frames, never inside one.

use crate::engine::{Engine, WorldSnapshot};
use crate::render::{Canvas, Renderer};

/// What one frame put on the surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameReport {
    pub agents: usize,
    pub foods: usize,
    pub culled: usize,
}

/// Draw a snapshot onto the canvas: normalized coordinates scale to the
/// surface size, agents at the configured fraction of surface width, foods
/// at half that.
pub fn draw_world(canvas: &mut dyn Canvas, renderer: &Renderer, world: &WorldSnapshot) -> FrameReport {
    let (width, height) = canvas.size();
    let agent_size = renderer.config().agent_size_frac * width;
    let food_radius = agent_size / 2.0;

    let mut report = FrameReport {
        agents: world.agents.len(),
        foods: world.foods.len(),
        culled: 0,
    };

    for agent in &world.agents {
        let drawn = renderer.draw_agent(
            canvas,
            agent.x * width,
            agent.y * height,
            agent_size,
            agent.heading,
        );
        if !drawn {
            report.culled += 1;
        }
    }

    for food in &world.foods {
        if !renderer.draw_food(canvas, food.x * width, food.y * height, food_radius) {
            report.culled += 1;
        }
    }

    report
}

/// Run one frame: clear, snapshot, advance, draw.
pub fn run_frame(
    canvas: &mut dyn Canvas,
    renderer: &Renderer,
    engine: &mut dyn Engine,
) -> FrameReport {
    canvas.clear(renderer.config().background);

    let world = engine.world();
    engine.step();

    let report = draw_world(canvas, renderer, &world);
    tracing::trace!(
        agents = report.agents,
        foods = report.foods,
        culled = report.culled,
        "frame"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{AgentState, FoodState};
    use crate::render::{Color, RenderConfig};

    struct CountingCanvas {
        width: f32,
        height: f32,
        cleared: usize,
        triangles: Vec<[(f32, f32); 3]>,
        circles: Vec<(f32, f32, f32)>,
    }

    impl CountingCanvas {
        fn new(width: f32, height: f32) -> Self {
            Self {
                width,
                height,
                cleared: 0,
                triangles: Vec::new(),
                circles: Vec::new(),
            }
        }
    }

    impl Canvas for CountingCanvas {
        fn size(&self) -> (f32, f32) {
            (self.width, self.height)
        }

        fn clear(&mut self, _color: Color) {
            self.cleared += 1;
        }

        fn fill_triangle(&mut self, a: (f32, f32), b: (f32, f32), c: (f32, f32), _color: Color) {
            self.triangles.push([a, b, c]);
        }

        fn fill_circle(&mut self, x: f32, y: f32, radius: f32, _color: Color) {
            self.circles.push((x, y, radius));
        }
    }

    /// Engine whose snapshot encodes how many ticks it has taken, so the
    /// draw path reveals which side of `step()` the snapshot came from.
    struct TickProbe {
        ticks: u32,
    }

    impl Engine for TickProbe {
        fn world(&self) -> WorldSnapshot {
            WorldSnapshot {
                agents: vec![AgentState {
                    x: 0.5,
                    y: 0.5,
                    heading: self.ticks as f32,
                }],
                foods: vec![FoodState { x: 0.5, y: 0.5 }],
            }
        }

        fn step(&mut self) {
            self.ticks += 1;
        }

        fn train(&mut self) -> String {
            unreachable!("frame loop never trains")
        }
    }

    #[test]
    fn frame_draws_the_pre_step_snapshot() {
        let renderer = Renderer::default();
        let mut canvas = CountingCanvas::new(800.0, 600.0);
        let mut engine = TickProbe { ticks: 0 };

        run_frame(&mut canvas, &renderer, &mut engine);

        // The engine advanced, but the drawn glyph still has heading 0.0:
        // the tick-0 snapshot, taken before step().
        assert_eq!(engine.ticks, 1);
        let [tip, _, _] = canvas.triangles[0];
        let size = renderer.config().agent_size_frac * 800.0;
        assert_eq!(tip, (400.0, 300.0 + size));
    }

    #[test]
    fn frame_clears_before_drawing() {
        let renderer = Renderer::default();
        let mut canvas = CountingCanvas::new(800.0, 600.0);
        let mut engine = TickProbe { ticks: 0 };

        for _ in 0..3 {
            run_frame(&mut canvas, &renderer, &mut engine);
        }
        assert_eq!(canvas.cleared, 3);
        assert_eq!(canvas.triangles.len(), 3);
    }

    #[test]
    fn world_coordinates_scale_to_surface_size() {
        let renderer = Renderer::default();
        let mut canvas = CountingCanvas::new(1600.0, 1200.0);
        let world = WorldSnapshot {
            agents: vec![],
            foods: vec![FoodState { x: 0.25, y: 0.75 }],
        };

        let report = draw_world(&mut canvas, &renderer, &world);

        assert_eq!(report.foods, 1);
        assert_eq!(report.culled, 0);
        let (x, y, radius) = canvas.circles[0];
        assert_eq!((x, y), (400.0, 900.0));
        assert_eq!(radius, 0.01 * 1600.0 / 2.0);
    }

    #[test]
    fn edge_glyphs_are_counted_as_culled() {
        let renderer = Renderer::new(RenderConfig::default());
        let mut canvas = CountingCanvas::new(800.0, 600.0);
        let world = WorldSnapshot {
            agents: vec![
                AgentState {
                    x: 0.0,
                    y: 0.0,
                    heading: 0.0,
                },
                AgentState {
                    x: 0.5,
                    y: 0.5,
                    heading: 0.0,
                },
            ],
            foods: vec![FoodState { x: 1.0, y: 1.0 }],
        };

        let report = draw_world(&mut canvas, &renderer, &world);

        assert_eq!(report.agents, 2);
        assert_eq!(report.culled, 2);
        assert_eq!(canvas.triangles.len(), 1);
        assert!(canvas.circles.is_empty());
    }
}
