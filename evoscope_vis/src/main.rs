//! Desktop viewer: density-corrected world surface, training controls,
//! and the session log panel.

use std::env;
use std::path::PathBuf;

use evoscope::config::ConfigError;
use evoscope::engine::StrategyKind;
use evoscope::frame::run_frame;
use evoscope::render::{Canvas, Color as SurfaceColor};
use evoscope::training::{train_bulk, train_once};
use evoscope::{EventLog, HarnessConfig, Renderer, StrategyController, Viewport};
use macroquad::miniquad;
use macroquad::prelude::*;

mod demo;

// Space reserved above the world surface for buttons, status and the log.
const TOP_UI_H: f32 = 200.0;
const UI_MARGIN: f32 = 12.0;
const UI_GAP: f32 = 6.0;
const BTN_H: f32 = 28.0;
const BTN_FONT_SIZE: f32 = 18.0;

const LOG_FONT_SIZE: u16 = 16;
const LOG_LINE_H: f32 = 18.0;

// The window is sized for the default config; the surface blit follows
// whatever logical size the loaded config declares.
const DEFAULT_LOGICAL_W: f32 = 800.0;
const DEFAULT_LOGICAL_H: f32 = 520.0;

fn window_conf() -> Conf {
    Conf {
        window_title: "evoscope_vis".to_owned(),
        window_width: DEFAULT_LOGICAL_W as i32,
        window_height: (DEFAULT_LOGICAL_H + TOP_UI_H) as i32,
        high_dpi: true,
        ..Default::default()
    }
}

/// Overrides gathered from the environment and command line. The config
/// file (if any) is loaded first; these win over it.
#[derive(Debug, Default)]
struct AppOptions {
    config_path: Option<PathBuf>,
    scale: Option<f32>,
    strategy: Option<StrategyKind>,
}

impl AppOptions {
    fn from_env_and_args() -> Self {
        let mut opts = Self::default();

        if let Ok(v) = env::var("EVOSCOPE_CONFIG") {
            opts.config_path = Some(PathBuf::from(v));
        }
        if let Ok(v) = env::var("EVOSCOPE_SCALE") {
            opts.scale = v.parse::<f32>().ok();
        }
        if let Ok(v) = env::var("EVOSCOPE_STRATEGY") {
            opts.strategy = parse_strategy(&v);
        }

        let mut args = env::args().skip(1);
        while let Some(a) = args.next() {
            match a.as_str() {
                "--config" => {
                    if let Some(v) = args.next() {
                        opts.config_path = Some(PathBuf::from(v));
                    }
                }
                "--scale" => {
                    if let Some(v) = args.next() {
                        opts.scale = v.parse::<f32>().ok();
                    }
                }
                "--strategy" => {
                    if let Some(v) = args.next() {
                        opts.strategy = parse_strategy(&v);
                    }
                }
                _ => {}
            }
        }

        opts
    }

    fn resolve(&self) -> Result<HarnessConfig, ConfigError> {
        let mut config = match &self.config_path {
            Some(path) => HarnessConfig::from_json_file(path)?,
            None => HarnessConfig::default(),
        };

        if let Some(scale) = self.scale {
            config.scale_override = Some(scale);
        }
        if let Some(strategy) = self.strategy {
            config.start_strategy = strategy;
        }

        Ok(config)
    }
}

fn parse_strategy(raw: &str) -> Option<StrategyKind> {
    match raw.parse::<StrategyKind>() {
        Ok(kind) => Some(kind),
        Err(err) => {
            tracing::warn!(error = %err, "ignoring strategy override");
            None
        }
    }
}

/// World-surface drawing context: forwards primitives to whatever camera
/// is current (the offscreen render target during a frame).
struct SurfaceCanvas {
    width: f32,
    height: f32,
}

impl Canvas for SurfaceCanvas {
    fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    fn clear(&mut self, color: SurfaceColor) {
        clear_background(mq_color(color));
    }

    fn fill_triangle(
        &mut self,
        a: (f32, f32),
        b: (f32, f32),
        c: (f32, f32),
        color: SurfaceColor,
    ) {
        draw_triangle(
            vec2(a.0, a.1),
            vec2(b.0, b.1),
            vec2(c.0, c.1),
            mq_color(color),
        );
    }

    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: SurfaceColor) {
        draw_circle(x, y, radius, mq_color(color));
    }
}

fn mq_color(c: SurfaceColor) -> Color {
    Color::new(c.r, c.g, c.b, c.a)
}

fn draw_panel(rect: Rect) {
    draw_rectangle(
        rect.x,
        rect.y,
        rect.w,
        rect.h,
        Color::new(0.10, 0.10, 0.12, 0.88),
    );
    draw_rectangle_lines(
        rect.x,
        rect.y,
        rect.w,
        rect.h,
        1.0,
        Color::new(0.28, 0.28, 0.30, 1.0),
    );
}

fn button(rect: Rect, label: &str, active: bool) -> bool {
    let (mx, my) = mouse_position();
    let hovered = rect.contains(vec2(mx, my));
    let clicked = hovered && is_mouse_button_pressed(MouseButton::Left);

    let bg = if active {
        Color::new(0.20, 0.45, 0.22, 1.0)
    } else if hovered {
        Color::new(0.25, 0.25, 0.25, 1.0)
    } else {
        Color::new(0.18, 0.18, 0.18, 1.0)
    };

    draw_rectangle(rect.x, rect.y, rect.w, rect.h, bg);
    draw_rectangle_lines(rect.x, rect.y, rect.w, rect.h, 1.0, GRAY);
    draw_text(
        label,
        rect.x + 10.0,
        rect.y + rect.h * 0.72,
        BTN_FONT_SIZE,
        WHITE,
    );

    clicked
}

fn wrap_text_to_width(text: &str, max_w: f32, font_size: u16) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    let mut cur = String::new();

    for word in text.split_whitespace() {
        let cand = if cur.is_empty() {
            word.to_string()
        } else {
            format!("{cur} {word}")
        };

        if measure_text(&cand, None, font_size, 1.0).width <= max_w {
            cur = cand;
        } else {
            if !cur.is_empty() {
                out.push(cur.clone());
            }
            cur = word.to_string();
        }
    }

    if !cur.is_empty() {
        out.push(cur);
    }
    out
}

/// Render the log tail into `rect`, newest entry anchored at the bottom.
/// Entries are wrapped; whatever fits above the newest line is shown.
fn draw_log_panel(log: &EventLog, rect: Rect) {
    draw_panel(rect);

    let max_w = (rect.w - 2.0 * UI_GAP).max(1.0);
    let capacity = ((rect.h - 2.0 * UI_GAP) / LOG_LINE_H).floor() as usize;
    if capacity == 0 {
        return;
    }

    let mut lines: Vec<String> = Vec::with_capacity(capacity);
    'fill: for entry in log.entries().iter().rev() {
        for seg in wrap_text_to_width(entry, max_w, LOG_FONT_SIZE).into_iter().rev() {
            lines.push(seg);
            if lines.len() == capacity {
                break 'fill;
            }
        }
    }
    lines.reverse();

    let mut y = rect.y + UI_GAP + LOG_FONT_SIZE as f32;
    for line in &lines {
        draw_text(line, rect.x + UI_GAP, y, LOG_FONT_SIZE as f32, WHITE);
        y += LOG_LINE_H;
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    tracing_subscriber::fmt::init();

    let opts = AppOptions::from_env_and_args();
    let config = match opts.resolve() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!(error = %err, "could not load config");
            return;
        }
    };

    // Surface setup happens once, before any drawing: the backing buffer
    // is allocated at logical size times the display's pixel density and
    // blitted back at logical size.
    let scale = config
        .scale_override
        .unwrap_or_else(|| miniquad::window::dpi_scale());
    let viewport = Viewport::new(config.logical_width, config.logical_height, scale);
    let (physical_w, physical_h) = viewport.physical_size();
    let (logical_w, logical_h) = viewport.logical_size();
    tracing::info!(
        logical_w,
        logical_h,
        scale = viewport.scale(),
        "surface sized"
    );

    let surface = render_target(physical_w as u32, physical_h as u32);
    surface.texture.set_filter(FilterMode::Linear);
    let mut world_camera = Camera2D::from_display_rect(Rect::new(0.0, 0.0, physical_w, physical_h));
    world_camera.render_target = Some(surface.clone());

    let renderer = Renderer::new(config.render);
    let mut canvas = SurfaceCanvas {
        width: physical_w,
        height: physical_h,
    };

    let mut log = EventLog::new();
    let mut controller =
        StrategyController::new(demo::engine_factory(), config.start_strategy, &mut log);
    let mut trained: u64 = 0;

    loop {
        // One frame of the simulation into the offscreen surface. The
        // controls below run after this, so a strategy swap or training
        // burst always lands between frames, never inside one.
        set_camera(&world_camera);
        let report = run_frame(&mut canvas, &renderer, controller.engine_mut());
        set_default_camera();

        clear_background(Color::new(0.06, 0.06, 0.07, 1.0));
        draw_texture_ex(
            &surface.texture,
            0.0,
            TOP_UI_H,
            WHITE,
            DrawTextureParams {
                dest_size: Some(vec2(logical_w, logical_h)),
                ..Default::default()
            },
        );

        // Training controls.
        let mut x = UI_MARGIN;
        let y = UI_MARGIN;
        if button(Rect::new(x, y, 70.0, BTN_H), "Train", false) {
            train_once(controller.engine_mut(), &mut log);
            trained += 1;
        }
        x += 70.0 + UI_GAP;
        for (label, w, n) in [("Train x10", 100.0, 10u32), ("Train x100", 110.0, 100)] {
            if button(Rect::new(x, y, w, BTN_H), label, false) {
                train_bulk(controller.engine_mut(), &mut log, n);
                trained += u64::from(n);
            }
            x += w + UI_GAP;
        }
        if button(Rect::new(x, y, 70.0, BTN_H), "Reset", false) {
            controller.reset(&mut log);
        }

        // Strategy row: one button per variant, current one highlighted.
        let mut x = UI_MARGIN;
        let y = UI_MARGIN + BTN_H + UI_GAP;
        for kind in StrategyKind::ALL {
            let w = 10.0 + measure_text(kind.label(), None, BTN_FONT_SIZE as u16, 1.0).width + 10.0;
            if button(Rect::new(x, y, w, BTN_H), kind.label(), controller.selected() == kind) {
                controller.select(kind, &mut log);
            }
            x += w + UI_GAP;
        }

        let status_y = y + BTN_H + UI_GAP + 14.0;
        draw_text(
            &format!(
                "strategy={} agents={} foods={} culled={} trained={} fps={}",
                controller.selected(),
                report.agents,
                report.foods,
                report.culled,
                trained,
                get_fps()
            ),
            UI_MARGIN,
            status_y,
            18.0,
            LIGHTGRAY,
        );

        let log_top = status_y + 8.0;
        draw_log_panel(
            &log,
            Rect::new(
                UI_MARGIN,
                log_top,
                screen_width() - 2.0 * UI_MARGIN,
                TOP_UI_H - log_top - UI_MARGIN,
            ),
        );

        next_frame().await;
    }
}
