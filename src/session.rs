//! Session flow: main menu, play, game over
//!
//! Owns the simulation state, the seeded RNG, the high score and the audio
//! manager, and drives the fixed-timestep loop from variable frame deltas.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::audio::AudioManager;
use crate::consts::*;
use crate::highscores::HighScore;
use crate::persistence::ScoreStore;
use crate::settings::Settings;
use crate::sim::{Bounds, GameState, TickInput, tick};

/// Which screen the session is on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Title screen, waiting for start
    Menu,
    /// Active gameplay
    Playing,
    /// Run ended, final score shown
    GameOver,
}

pub struct Session<S: ScoreStore> {
    pub state: GameState,
    phase: Phase,
    rng: Pcg32,
    high_score: HighScore<S>,
    audio: AudioManager,
    settings: Settings,
    /// Unsimulated time carried between frames (seconds)
    accumulator: f32,
    running: bool,
}

impl<S: ScoreStore> Session<S> {
    pub fn new(seed: u64, settings: Settings, store: S, mut audio: AudioManager) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut state = GameState::new(Bounds::default(), &mut rng);
        state.particles.set_max_particles(settings.max_particles());

        audio.apply_settings(&settings);

        log::info!("Session created (seed {})", seed);
        Self {
            state,
            phase: Phase::Menu,
            rng,
            high_score: HighScore::load(store),
            audio,
            settings,
            accumulator: 0.0,
            running: true,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn high_score(&self) -> u64 {
        self.high_score.best()
    }

    pub fn high_score_store(&self) -> &S {
        self.high_score.store()
    }

    /// False once quit was requested
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Menu -> Playing
    pub fn start(&mut self) {
        if self.phase == Phase::Menu {
            self.begin_run();
        }
    }

    /// GameOver -> Playing
    pub fn restart(&mut self) {
        if self.phase == Phase::GameOver {
            self.begin_run();
        }
    }

    /// GameOver -> Menu
    pub fn to_menu(&mut self) {
        if self.phase == Phase::GameOver {
            self.phase = Phase::Menu;
        }
    }

    pub fn quit(&mut self) {
        log::info!("Quit requested");
        self.running = false;
    }

    /// Stop the current run early; the score so far still counts toward the best
    pub fn end_run(&mut self) {
        if self.phase == Phase::Playing {
            log::info!("Run ended early");
            self.finish_run();
        }
    }

    /// Reinitialize the whole simulation
    pub fn reset(&mut self) {
        self.state.reset(&mut self.rng);
        self.accumulator = 0.0;
    }

    fn begin_run(&mut self) {
        self.reset();
        self.phase = Phase::Playing;
    }

    /// Feed a frame delta; runs as many fixed ticks as fit (capped).
    /// One-shot inputs only apply to the first tick. Returns ticks run.
    pub fn advance(&mut self, dt: f32, input: &TickInput) -> u32 {
        if self.phase != Phase::Playing || !self.running {
            self.accumulator = 0.0;
            return 0;
        }

        let dt = dt.min(MAX_FRAME_DT);
        self.accumulator += dt;

        let mut input = input.clone();
        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.step(&input);
            self.accumulator -= SIM_DT;
            substeps += 1;

            // Clear one-shot inputs after processing
            input.fire = false;

            if self.phase != Phase::Playing {
                self.accumulator = 0.0;
                break;
            }
        }
        substeps
    }

    /// Run exactly one tick of play
    pub fn step(&mut self, input: &TickInput) {
        if self.phase != Phase::Playing {
            return;
        }
        tick(&mut self.state, input, &mut self.rng);

        let events = self.state.drain_events();
        self.audio.handle_events(&events);

        if self.state.is_game_over() {
            self.finish_run();
        }
    }

    fn finish_run(&mut self) {
        let score = self.state.score;
        self.phase = Phase::GameOver;
        if self.high_score.record(score) {
            log::info!("New high score: {}", score);
        }
        log::info!(
            "Final score {} (level {}, best {})",
            score,
            self.state.level,
            self.high_score.best()
        );
    }
}
