// ui.rs - Input handling, frame pacing and drawing for the Life window

use eframe::egui;
use egui::{Key, PointerButton, Pos2, Vec2};
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

use life_core::{GameState, GridError, Step, PATTERNS};

use crate::painter::PainterCanvas;
use crate::LifeApp;

/// What a key press asks the controller to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Reset,
    Pause,
    Quit,
    Random,
    Pattern(usize),
}

pub fn command_for(key: Key) -> Option<Command> {
    let command = match key {
        Key::S      => Command::Start,
        Key::R      => Command::Reset,
        Key::P      => Command::Pause,
        Key::Escape => Command::Quit,
        Key::N      => Command::Random,
        Key::Num1   => Command::Pattern(0),
        Key::Num2   => Command::Pattern(1),
        Key::Num3   => Command::Pattern(2),
        Key::Num4   => Command::Pattern(3),
        Key::Num5   => Command::Pattern(4),
        Key::Num6   => Command::Pattern(5),
        _ => return None,
    };
    Some(command)
}

impl LifeApp {
    /// Carries out every command except `Quit`, which needs the window.
    pub fn apply(&mut self, command: Command) {
        debug!(?command, "key command");
        match command {
            Command::Start => self.grid.start(),
            Command::Reset => self.grid.reset(),
            Command::Pause => self.grid.pause(),
            Command::Quit  => {}
            Command::Random => {
                self.random_seed = self.random_seed.wrapping_add(1);
                let loaded = self.grid.apply_random(self.random_seed);
                self.report_load(loaded);
            }
            Command::Pattern(index) => match PATTERNS.get(index) {
                Some(pattern) => {
                    let loaded = self.grid.apply_pattern(pattern);
                    self.report_load(loaded);
                }
                None => warn!(index, "no pattern bound to this key"),
            },
        }
    }

    /// Loads are refused while the grid runs; the grid already logged why.
    fn report_load(&self, loaded: Result<(), GridError>) {
        match loaded {
            Ok(()) | Err(GridError::Locked(_)) => {}
            Err(err) => error!(%err, "pattern load failed"),
        }
    }

    /// Primary button brings the cell under `pixel` alive, secondary kills it.
    /// `pixel` is relative to the grid's top-left corner.
    pub fn click(&mut self, button: PointerButton, pixel: Vec2) {
        let (px, py) = (pixel.x.floor() as i32, pixel.y.floor() as i32);
        let Some(cell) = self.grid.tile_at_pixel_mut(px, py) else {
            return;
        };
        match button {
            PointerButton::Primary   => cell.live(),
            PointerButton::Secondary => cell.kill(),
            _ => {}
        }
    }

    pub fn tick_interval(&self) -> Duration {
        self.config.tick_interval(self.grid.state())
    }

    /// Advances the grid one generation if it is running.
    pub fn tick(&mut self) {
        let step = match &self.runtime {
            Some(runtime) => match self.grid.update_concurrent(runtime) {
                Ok(step) => step,
                Err(err) => {
                    error!(%err, "concurrent step failed");
                    self.grid.pause();
                    return;
                }
            },
            None => self.grid.update(),
        };

        if step == Step::Cycled && self.config.pause_on_cycle {
            info!(generation = self.grid.generation(), "pattern repeats, pausing");
            self.grid.pause();
        }
    }

    fn handle_input(&mut self, ctx: &egui::Context, origin: Pos2) {
        let (commands, presses) = ctx.input(|i| {
            let commands: Vec<Command> = i.events.iter().filter_map(|event| match event {
                egui::Event::Key { key, pressed: true, repeat: false, .. } => command_for(*key),
                _ => None,
            }).collect();

            let presses: Vec<(PointerButton, Pos2)> = i.events.iter().filter_map(|event| match event {
                egui::Event::PointerButton { pos, button, pressed: true, .. } => Some((*button, *pos)),
                _ => None,
            }).collect();

            (commands, presses)
        });

        for command in commands {
            if command == Command::Quit {
                info!("quit requested");
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            } else {
                self.apply(command);
            }
        }
        for (button, pos) in presses {
            self.click(button, pos - origin);
        }
    }
}

impl eframe::App for LifeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(format!("State: {}", self.grid.state()));
                ui.separator();
                ui.label(format!("Generation: {}", self.grid.generation()));
                ui.separator();
                ui.label(format!("Live cells: {}", self.grid.population()));
                ui.separator();
                ui.label(match self.grid.state() {
                    GameState::Running => "P pause · R reset · Esc quit",
                    _ => "S start · R reset · 1-6 patterns · N random · Esc quit",
                });
            });
        });

        egui::CentralPanel::default().frame(egui::Frame::none()).show(ctx, |ui| {
            let size = Vec2::new(self.grid.pixel_width() as f32, self.grid.pixel_height() as f32);
            let (response, painter) = ui.allocate_painter(size, egui::Sense::click());
            let origin = response.rect.min;

            self.handle_input(ctx, origin);

            // Tick after input so a start or pause takes effect this frame.
            if self.last_tick.elapsed() >= self.tick_interval() {
                self.tick();
                self.last_tick = Instant::now();
            }

            self.grid.render(&mut PainterCanvas::new(&painter, origin));
        });

        ctx.request_repaint_after(self.tick_interval().saturating_sub(self.last_tick.elapsed()));
    }
}
