// src/bin/headless.rs
//
// Plays seeded sessions with the autopilot and logs how they went.
//
//   headless [runs] [seed] [settings.json] [high_score.json]
//
// Set RUST_LOG=debug to see every market event.

use hypers_drive::autopilot;
use hypers_drive::{
    GameSession, HighScoreStore, JsonFileHighScoreStore, MemoryHighScoreStore, Settings,
};
use log::{error, info};
use std::env;
use std::fs;
use std::process::ExitCode;

const MAX_SECONDS_PER_RUN: f64 = 120.0;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().skip(1).collect();
    let runs: u64 = args.first().and_then(|a| a.parse().ok()).unwrap_or(5);
    let seed: u64 = args.get(1).and_then(|a| a.parse().ok()).unwrap_or(42);

    let settings = match args.get(2) {
        Some(path) => match fs::read_to_string(path)
            .map_err(|e| e.to_string())
            .and_then(|json| Settings::from_json(&json).map_err(|e| e.to_string()))
        {
            Ok(settings) => settings,
            Err(e) => {
                error!("could not load settings from {}: {}", path, e);
                return ExitCode::FAILURE;
            }
        },
        None => Settings::default(),
    };

    let store: Box<dyn HighScoreStore> = match args.get(3) {
        Some(path) => Box::new(JsonFileHighScoreStore::new(path)),
        None => Box::new(MemoryHighScoreStore::default()),
    };

    for run in 0..runs {
        let mut session = match GameSession::new(settings.clone(), seed + run) {
            Ok(session) => session,
            Err(e) => {
                error!("invalid settings: {}", e);
                return ExitCode::FAILURE;
            }
        };

        autopilot::play(&mut session, MAX_SECONDS_PER_RUN);

        let Some(summary) = session.summary() else {
            info!("run {} timed out after {}s", run, MAX_SECONDS_PER_RUN);
            continue;
        };
        let best = match session.record_high_score(&*store) {
            Ok(best) => best,
            Err(e) => {
                error!("could not record high score: {}", e);
                return ExitCode::FAILURE;
            }
        };
        info!("run {}: {:?} (high score {})", run, summary.outcome, best);
        match serde_json::to_string(&summary) {
            Ok(json) => println!("{}", json),
            Err(e) => error!("could not serialize summary: {}", e),
        }
    }
    ExitCode::SUCCESS
}
