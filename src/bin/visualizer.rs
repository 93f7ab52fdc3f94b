// src/bin/visualizer.rs

use eframe::egui;
use egui::{Color32, FontId, Frame, RichText};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints};
use hypers_drive::autopilot::{Autopilot, FRAME_RATE};
use hypers_drive::utils::{commify, format_speed};
use hypers_drive::{
    Direction, GameSession, Instruction, MemoryHighScoreStore, ObstaclePlacement, Phase, Settings,
};
use std::collections::VecDeque;
use std::time::{Duration, Instant};

const FEED_LENGTH: usize = 14;

/// Watches the autopilot play, plotting the market and every gap it was handed.
struct VisualizerApp {
    settings: Settings,
    seed: u64,
    session: GameSession,
    autopilot: Autopilot,

    // --- Market history, one point per tick ---
    liquidity: Vec<[f64; 2]>,
    longs: Vec<[f64; 2]>,
    shorts: Vec<[f64; 2]>,
    volume: Vec<[f64; 2]>,
    last_recorded_tick: u64,

    placements: Vec<ObstaclePlacement>,
    feed: VecDeque<String>,

    high_scores: MemoryHighScoreStore,
    best: u64,

    is_playing: bool,
    last_update: Instant,
}

impl eframe::App for VisualizerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let frame_time = Duration::from_secs_f64(1.0 / FRAME_RATE);
        if self.is_playing && self.last_update.elapsed() >= frame_time {
            self.step();
            self.last_update = Instant::now();
        }
        ctx.request_repaint();

        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Hypers Drive Market Monitor");
                ui.add_space(20.0);
                if ui.button(if self.is_playing { "⏸ Pause" } else { "▶ Play" }).clicked() {
                    self.is_playing = !self.is_playing;
                    self.last_update = Instant::now();
                }
                if ui.button("▶+ New Run").clicked() {
                    self.seed += 1;
                    self.start_new_run();
                    self.is_playing = true;
                }
                ui.label("Seed:");
                ui.add_enabled(!self.is_playing, egui::DragValue::new(&mut self.seed));
            });
        });

        egui::SidePanel::right("session").min_width(240.0).show(ctx, |ui| {
            let mono = FontId::monospace(14.0);
            let storage = self.session.storage();
            egui::Grid::new("session_grid").num_columns(2).spacing([20.0, 2.0]).show(ui, |ui| {
                let rows = [
                    ("Phase:", format!("{:?}", self.session.phase())),
                    ("Mode:", format!("{:?}", self.session.flight().mode())),
                    ("Ticks:", self.session.ticks().to_string()),
                    ("Liquidity:", commify(storage.liquidity(), 2)),
                    ("Volume:", commify(storage.total_volume(), 2)),
                    ("Score:", commify(storage.score(), 2)),
                    ("Speed:", format_speed(self.session.flight().player_speed())),
                    ("Top speed:", format_speed(storage.top_speed())),
                    ("High score:", commify(self.best, 2)),
                ];
                for (label, value) in rows {
                    ui.label(RichText::new(label).strong());
                    ui.label(RichText::new(value).font(mono.clone()));
                    ui.end_row();
                }
            });
            ui.separator();
            ui.heading("Event feed");
            for message in &self.feed {
                ui.label(RichText::new(message).font(mono.clone()));
            }
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let half = ui.available_height() / 2.0 - 8.0;
            Frame::dark_canvas(ui.style()).show(ui, |ui| {
                Plot::new("market_plot")
                    .height(half)
                    .legend(Legend::default())
                    .show(ui, |plot_ui| {
                        for (points, name, color) in [
                            (&self.liquidity, "Liquidity", Color32::LIGHT_BLUE),
                            (&self.longs, "Longs", Color32::LIGHT_GREEN),
                            (&self.shorts, "Shorts", Color32::LIGHT_RED),
                            (&self.volume, "Volume", Color32::GOLD),
                        ] {
                            plot_ui.line(
                                Line::new(PlotPoints::from(points.clone()))
                                    .color(color)
                                    .name(name),
                            );
                        }
                    });
            });
            ui.add_space(4.0);
            Frame::dark_canvas(ui.style()).show(ui, |ui| {
                let height = self.settings.playfield_height;
                let bars: Vec<Bar> = self
                    .placements
                    .iter()
                    .map(|p| {
                        // Plot y grows upward; the playfield's grows downward.
                        let color = match p.direction {
                            Direction::Long => Color32::LIGHT_GREEN,
                            Direction::Short => Color32::LIGHT_RED,
                        };
                        Bar::new(p.sequence as f64, p.gap_size)
                            .base_offset(height - p.bottom_bar_top())
                            .width(0.8)
                            .fill(color)
                    })
                    .collect();
                Plot::new("gap_plot")
                    .height(ui.available_height())
                    .include_y(0.0)
                    .include_y(height)
                    .show(ui, |plot_ui| {
                        plot_ui.bar_chart(BarChart::new(bars).name("Gaps"));
                    });
            });
        });
    }
}

impl VisualizerApp {
    fn new(settings: Settings, seed: u64) -> Result<Self, hypers_drive::ConfigError> {
        let session = GameSession::new(settings.clone(), seed)?;
        let autopilot = Autopilot::new(&settings);
        let mut app = Self {
            settings,
            seed,
            session,
            autopilot,
            liquidity: Vec::new(),
            longs: Vec::new(),
            shorts: Vec::new(),
            volume: Vec::new(),
            last_recorded_tick: 0,
            placements: Vec::new(),
            feed: VecDeque::with_capacity(FEED_LENGTH),
            high_scores: MemoryHighScoreStore::default(),
            best: 0,
            is_playing: false,
            last_update: Instant::now(),
        };
        app.start_new_run();
        Ok(app)
    }

    fn start_new_run(&mut self) {
        match GameSession::new(self.settings.clone(), self.seed) {
            Ok(session) => self.session = session,
            Err(e) => {
                log::error!("cannot start a run: {}", e);
                return;
            }
        }
        self.autopilot = Autopilot::new(&self.settings);
        self.liquidity.clear();
        self.longs.clear();
        self.shorts.clear();
        self.volume.clear();
        self.last_recorded_tick = 0;
        self.placements.clear();
        self.feed.clear();

        self.session.start();
        self.session.drain_instructions();
        self.record_point();
    }

    fn step(&mut self) {
        let instructions = self.autopilot.step(&mut self.session, 1.0 / FRAME_RATE);
        for instruction in instructions {
            match instruction {
                Instruction::SpawnBars(placement) => self.placements.push(placement),
                Instruction::AppendFeed(message) => {
                    self.feed.push_front(message);
                    self.feed.truncate(FEED_LENGTH);
                }
                _ => {}
            }
        }
        if self.session.ticks() > self.last_recorded_tick {
            self.last_recorded_tick = self.session.ticks();
            self.record_point();
        }
        if let Phase::Ended(outcome) = self.session.phase() {
            self.is_playing = false;
            match self.session.record_high_score(&self.high_scores) {
                Ok(best) => self.best = best,
                Err(e) => log::error!("could not record high score: {}", e),
            }
            log::info!("run with seed {} ended: {:?}", self.seed, outcome);
        }
    }

    fn record_point(&mut self) {
        let x = self.session.ticks() as f64;
        let storage = self.session.storage();
        self.liquidity.push([x, storage.liquidity() as f64]);
        self.longs.push([x, storage.longs_volume() as f64]);
        self.shorts.push([x, storage.shorts_volume() as f64]);
        self.volume.push([x, storage.total_volume() as f64]);
    }
}

fn main() -> Result<(), eframe::Error> {
    env_logger::init();

    let app_state = match VisualizerApp::new(Settings::default(), 42) {
        Ok(app) => app,
        Err(e) => {
            log::error!("invalid default settings: {}", e);
            std::process::exit(1);
        }
    };

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 760.0])
            .with_title("Hypers Drive Market Monitor"),
        ..Default::default()
    };

    eframe::run_native(
        "Hypers Drive Market Monitor",
        native_options,
        Box::new(|_cc| Box::new(app_state)),
    )
}
