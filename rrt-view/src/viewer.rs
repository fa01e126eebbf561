//! Interactive RRT build viewer built with eframe/egui.
//!
//! This module defines [`Viewer`], which owns a finished planner build and
//! implements [`eframe::App`] to play its build trace back chain by chain.

use eframe::App;
use glam::Vec2;
use rand::Rng;
use rrt_core::{Config, Configuration, SeededPlanner};

/// Main application state for the viewer.
///
/// [`Viewer`] glues together:
/// - The planner core: [`SeededPlanner`] and the [`Config`] it was built from.
/// - Playback state (how many chains are revealed, timing).
/// - Camera state (pan/zoom) and eframe/egui callbacks.
///
/// The whole tree is built up front; playback only controls how many
/// chains of the build trace are drawn.
///
/// ### Fields
/// - `cfg` - Parameters of the current build; edited in the side panel and
///   applied on rebuild.
/// - `seed` - Seed used for the current build, shown and editable in the UI.
/// - `planner` - The finished build (tree and trace).
///
/// - `shown` - Number of trace chains currently revealed.
/// - `running` - Whether playback is auto-advancing.
/// - `zoom` - Zoom factor for world-to-screen coordinate mapping.
/// - `pan` - Screen-space pan offset in pixels.
///
/// - `step_interval` - Target time between revealed chains (seconds).
/// - `last_step_time` - Time stamp of the last reveal (egui time).
/// - `error` - Message from the last failed rebuild, if any.
pub struct Viewer {
    cfg: Config,
    seed: u64,
    planner: SeededPlanner,

    shown: usize,
    running: bool,
    zoom: f32,
    pan: egui::Vec2,

    step_interval: f64,
    last_step_time: f64,
    error: Option<String>,
}

/// Projects the first two coordinates onto the viewing plane.
///
/// One-dimensional configurations are drawn on `y = 0`.
fn to_world(c: &Configuration) -> Vec2 {
    let values = c.values();
    let x = values.first().copied().unwrap_or(0.0);
    let y = values.get(1).copied().unwrap_or(0.0);
    Vec2::new(x as f32, y as f32)
}

fn build(cfg: &Config) -> rrt_core::Result<SeededPlanner> {
    let mut planner = SeededPlanner::from_config(cfg)?;
    planner.build(cfg.iterations, cfg.step)?;
    Ok(planner)
}

impl Viewer {
    /// Builds the tree described by `cfg` and starts paused with nothing revealed.
    pub fn new(cfg: Config) -> rrt_core::Result<Self> {
        let planner = build(&cfg)?;
        let seed = planner.seed().unwrap_or_default();

        Ok(Self {
            cfg,
            seed,
            planner,
            shown: 0,
            running: false,
            zoom: 15.0,
            pan: egui::vec2(0.0, 0.0),
            step_interval: 0.1,
            last_step_time: 0.0,
            error: None,
        })
    }

    /// Rebuilds the tree with the current config and `seed`.
    ///
    /// On failure the previous build stays on screen and the error is kept
    /// for display.
    fn rebuild(&mut self) {
        let mut cfg = self.cfg.clone();
        cfg.rng_seed = Some(self.seed);

        match build(&cfg) {
            Ok(planner) => {
                self.planner = planner;
                self.cfg = cfg;
                self.shown = 0;
                self.running = false;
                self.error = None;
            }
            Err(e) => {
                log::error!("rebuild failed: {e}");
                self.error = Some(e.to_string());
            }
        }
    }

    /// Rebuilds with a freshly drawn seed.
    fn reseed(&mut self) {
        self.seed = rand::rng().random();
        self.rebuild();
    }

    /// Reveals the next chain; stops playback once the trace is exhausted.
    fn advance(&mut self) {
        if self.shown < self.planner.trace().len() {
            self.shown += 1;
        } else {
            self.running = false;
        }
    }

    fn revealed_vertices(&self) -> usize {
        1 + self.planner.trace().chains()[..self.shown]
            .iter()
            .map(|c| c.len())
            .sum::<usize>()
    }

    /// Converts a world-space position to screen-space.
    ///
    /// The y-axis is flipped so that positive y goes up in world space.
    fn world_to_screen(&self, p: Vec2, rect: egui::Rect) -> egui::Pos2 {
        let center = rect.center();
        egui::pos2(
            center.x + p.x * self.zoom + self.pan.x,
            center.y - p.y * self.zoom + self.pan.y,
        )
    }

    /// Inverse of [`Viewer::world_to_screen`].
    fn screen_to_world(&self, p: egui::Pos2, rect: egui::Rect) -> Vec2 {
        let center = rect.center();
        let x = (p.x - center.x - self.pan.x) / self.zoom;
        let y = (center.y - p.y + self.pan.y) / self.zoom;
        Vec2::new(x, y)
    }

    fn labeled_drag_f64(
        ui: &mut egui::Ui,
        label: &str,
        value: &mut f64,
        range: std::ops::RangeInclusive<f64>,
        speed: f64,
    ) {
        ui.horizontal(|ui| {
            ui.label(label);
            ui.add(egui::DragValue::new(value).range(range).speed(speed));
        });
    }

    /// Builds the top panel UI (playback controls, zoom).
    fn ui_top_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui
                    .button(if self.running { "⏸ Pause" } else { "▶ Play" })
                    .clicked()
                {
                    self.running = !self.running;
                }

                ui.add(
                    egui::DragValue::new(&mut self.step_interval)
                        .prefix("dt target = ")
                        .range(0.01..=1.0)
                        .speed(0.01),
                );

                if ui.button("Step").clicked() {
                    self.advance();
                }

                if ui.button("Show all").clicked() {
                    self.shown = self.planner.trace().len();
                }

                if ui.button("Rewind").clicked() {
                    self.shown = 0;
                }

                ui.separator();
                ui.add(egui::Slider::new(&mut self.zoom, 0.5..=100.0).text("Zoom"));
            });
        });
    }

    /// Builds the bottom status bar.
    fn ui_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(format!("seed = {}", self.seed));
                ui.separator();
                ui.label(format!(
                    "vertices = {} / {}",
                    self.revealed_vertices(),
                    self.planner.tree().len()
                ));
                ui.label(format!(
                    "iteration = {} / {}",
                    self.shown,
                    self.planner.trace().len()
                ));
                if let Some(err) = &self.error {
                    ui.separator();
                    ui.colored_label(egui::Color32::RED, err);
                }
            });
        });
    }

    /// Builds the right-hand panel for build parameters.
    fn ui_config_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::right("config_panel")
            .resizable(true)
            .default_width(220.0)
            .show(ctx, |ui| {
                ui.heading("Config");

                ui.separator();
                ui.label("Steering");
                Self::labeled_drag_f64(ui, "step:", &mut self.cfg.step, 0.01..=50.0, 0.05);
                Self::labeled_drag_f64(
                    ui,
                    "stop_threshold:",
                    &mut self.cfg.stop_threshold,
                    0.01..=50.0,
                    0.05,
                );

                ui.separator();
                ui.label("Build");
                ui.horizontal(|ui| {
                    ui.label("iterations:");
                    ui.add(
                        egui::DragValue::new(&mut self.cfg.iterations)
                            .range(0..=10_000)
                            .speed(1.0),
                    );
                });
                ui.horizontal(|ui| {
                    ui.label("seed:");
                    ui.add(egui::DragValue::new(&mut self.seed).speed(1.0));
                });

                ui.separator();
                ui.label("Bounds");
                for (dim, bound) in self.cfg.bounds.iter_mut().enumerate() {
                    ui.horizontal(|ui| {
                        ui.label(format!("[{dim}]"));
                        ui.add(egui::DragValue::new(&mut bound[0]).speed(0.5));
                        ui.add(egui::DragValue::new(&mut bound[1]).speed(0.5));
                    });
                }

                ui.separator();
                if ui.button("Rebuild").clicked() {
                    self.rebuild();
                }
                if ui.button("Rebuild with new seed").clicked() {
                    self.reseed();
                }
                if ui.button("Reset cfg to default").clicked() {
                    self.cfg = Config::default();
                }
            });
    }

    /// Builds the central panel where the bounds and revealed chains are drawn.
    fn ui_central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let response = ui.allocate_response(ui.available_size(), egui::Sense::drag());
            let rect = response.rect;
            let painter = ui.painter_at(rect);

            // Pan with drag.
            if response.dragged() {
                self.pan += response.drag_delta();
            }

            // Zoom around the mouse cursor.
            let scroll = ui.ctx().input(|i| i.raw_scroll_delta.y);
            if scroll != 0.0 {
                let pointer_screen = response.hover_pos().unwrap_or(rect.center());
                let world_before = self.screen_to_world(pointer_screen, rect);

                let factor = (1.0 + scroll * 0.001).clamp(0.5, 2.0);
                self.zoom = (self.zoom * factor).clamp(0.5, 100.0);

                let screen_after = self.world_to_screen(world_before, rect);
                self.pan += pointer_screen - screen_after;
            }

            // Sampling bounds.
            let bounds = self.planner.space().bounds();
            let [x0, x1] = bounds[0];
            let [y0, y1] = bounds.get(1).copied().unwrap_or([0.0, 0.0]);
            let corners = [
                Vec2::new(x0 as f32, y0 as f32),
                Vec2::new(x1 as f32, y0 as f32),
                Vec2::new(x1 as f32, y1 as f32),
                Vec2::new(x0 as f32, y1 as f32),
            ];
            let outline: Vec<egui::Pos2> = corners
                .iter()
                .map(|&p| self.world_to_screen(p, rect))
                .collect();
            painter.add(egui::Shape::closed_line(
                outline,
                egui::Stroke::new(1.0, egui::Color32::GRAY),
            ));

            // Root.
            let root = self.world_to_screen(to_world(self.planner.tree().root()), rect);
            painter.circle_filled(root, 4.0, egui::Color32::GREEN);

            // Revealed chains, the most recent one highlighted.
            let tree = self.planner.tree();
            let chains = &self.planner.trace().chains()[..self.shown];
            for (i, chain) in chains.iter().enumerate() {
                let latest = i + 1 == chains.len();
                let (edge, dot) = if latest {
                    (egui::Color32::RED, egui::Color32::RED)
                } else {
                    (egui::Color32::LIGHT_GREEN, egui::Color32::LIGHT_BLUE)
                };

                let Ok(anchor) = tree.config(chain.anchor) else {
                    continue;
                };
                let mut prev = self.world_to_screen(to_world(anchor), rect);
                for c in &chain.configs {
                    let p = self.world_to_screen(to_world(c), rect);
                    painter.line_segment([prev, p], egui::Stroke::new(1.0, edge));
                    painter.circle_filled(p, 2.0, dot);
                    prev = p;
                }
            }

            // Auto-advance playback if requested.
            if self.running {
                let now = ctx.input(|i| i.time);
                if now - self.last_step_time >= self.step_interval {
                    self.advance();
                    self.last_step_time = now;
                }

                ctx.request_repaint();
            }
        });
    }
}

impl App for Viewer {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ui_top_panel(ctx);
        self.ui_status_bar(ctx);
        self.ui_config_panel(ctx);
        self.ui_central_panel(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_rect() -> egui::Rect {
        egui::Rect::from_min_size(egui::Pos2::new(0.0, 0.0), egui::vec2(800.0, 600.0))
    }

    fn seeded_cfg(seed: u64) -> Config {
        Config {
            rng_seed: Some(seed),
            iterations: 20,
            ..Config::default()
        }
    }

    #[test]
    fn world_to_screen_and_back_is_roundtrip() {
        let mut viewer = Viewer::new(seeded_cfg(1)).unwrap();
        viewer.zoom = 2.0;
        viewer.pan = egui::vec2(15.0, -7.0);
        let rect = test_rect();

        let eps = 1e-4;
        for p in [
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, -5.0),
            Vec2::new(-3.5, 8.25),
        ] {
            let back = viewer.screen_to_world(viewer.world_to_screen(p, rect), rect);
            assert!(
                (back.x - p.x).abs() < eps && (back.y - p.y).abs() < eps,
                "roundtrip mismatch: p={:?}, back={:?}",
                p,
                back
            );
        }
    }

    #[test]
    fn projection_uses_first_two_coordinates() {
        assert_eq!(
            to_world(&Configuration::new(vec![1.0, 2.0, 3.0])),
            Vec2::new(1.0, 2.0)
        );
        assert_eq!(to_world(&Configuration::new(vec![4.0])), Vec2::new(4.0, 0.0));
    }

    #[test]
    fn new_viewer_starts_paused_with_nothing_revealed() {
        let viewer = Viewer::new(seeded_cfg(3)).unwrap();
        assert_eq!(viewer.seed, 3);
        assert_eq!(viewer.shown, 0);
        assert!(!viewer.running);
        assert_eq!(viewer.planner.trace().len(), 20);
        assert_eq!(viewer.revealed_vertices(), 1);
    }

    #[test]
    fn advance_reveals_chains_and_stops_at_end() {
        let mut viewer = Viewer::new(seeded_cfg(5)).unwrap();
        viewer.running = true;

        for expected in 1..=20 {
            viewer.advance();
            assert_eq!(viewer.shown, expected);
        }
        assert!(viewer.running);
        assert_eq!(viewer.revealed_vertices(), viewer.planner.tree().len());

        viewer.advance();
        assert_eq!(viewer.shown, 20);
        assert!(!viewer.running);
    }

    #[test]
    fn rebuild_with_same_seed_reproduces_trace() {
        let mut viewer = Viewer::new(seeded_cfg(8)).unwrap();
        let before = viewer.planner.trace().clone();
        viewer.shown = 4;

        viewer.rebuild();

        assert_eq!(viewer.planner.trace(), &before);
        assert_eq!(viewer.shown, 0);
        assert!(viewer.error.is_none());
    }

    #[test]
    fn failed_rebuild_keeps_previous_build() {
        let mut viewer = Viewer::new(seeded_cfg(8)).unwrap();
        let before = viewer.planner.trace().clone();

        viewer.cfg.step = viewer.cfg.stop_threshold;
        viewer.rebuild();

        assert!(viewer.error.is_some());
        assert_eq!(viewer.planner.trace(), &before);
    }
}
