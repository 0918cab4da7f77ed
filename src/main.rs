//! Rock Drift entry point
//!
//! Headless demo: the autopilot flies one run at the fixed timestep until
//! the ship is out of lives or a time limit passes, then the score is
//! recorded. A windowed host would drive the same `Session` from its own
//! input, audio and draw callbacks.
//!
//! Usage: `rock-drift [seed] [low|medium|high]`

use std::path::Path;

use rock_drift::audio::AudioManager;
use rock_drift::consts::SIM_DT;
use rock_drift::persistence::FileScoreStore;
use rock_drift::renderer::build_draw_list;
use rock_drift::sim::TickInput;
use rock_drift::{Phase, QualityPreset, Session, Settings};

/// Longest demo run (ten minutes of game time)
const DEMO_TICK_LIMIT: u64 = 60 * 60 * 10;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut settings = Settings::load(Path::new(Settings::FILE_NAME));

    let seed = args
        .first()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or_else(rand::random);
    if let Some(arg) = args.get(1) {
        match QualityPreset::parse(arg) {
            Some(preset) => settings.quality = preset,
            None => log::warn!("Unknown quality preset {:?}, keeping {}", arg, settings.quality.as_str()),
        }
    }
    log::info!("Seed {}, {} quality", seed, settings.quality.as_str());

    let store = FileScoreStore::new(settings.high_score_path.clone());
    let mut session = Session::new(seed, settings, store, AudioManager::default());
    log::info!(
        "High score to beat: {} ({})",
        session.high_score(),
        session.high_score_store().path().display()
    );

    session.start();
    let input = TickInput {
        autopilot: true,
        ..Default::default()
    };

    let mut level = session.state.level;
    while session.phase() == Phase::Playing && session.state.time_ticks < DEMO_TICK_LIMIT {
        session.advance(SIM_DT, &input);

        if session.state.level != level {
            level = session.state.level;
            let frame = build_draw_list(&session.state, session.settings());
            log::info!(
                "Reached level {} (score {}, {} line / {} triangle vertices on screen)",
                level,
                session.state.score,
                frame.lines.len(),
                frame.triangles.len()
            );
        }
    }

    if session.phase() == Phase::Playing {
        log::info!("Demo time limit reached");
        session.end_run();
    }
    log::info!(
        "Demo over: score {}, level {}, lives {}, best {}",
        session.state.score,
        session.state.level,
        session.state.lives.max(0),
        session.high_score()
    );
    session.quit();
}
