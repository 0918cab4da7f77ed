//! Sound cue dispatch
//!
//! The simulation only raises [`GameEvent`]s; this module turns the audible
//! ones into [`SoundEffect`] cues and hands them to a backend. Playback is
//! fire-and-forget: a backend that cannot play simply drops the cue.

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Player fired
    Shoot,
    /// Engine running
    Thrust,
    /// Asteroid, saucer or ship destroyed
    Explosion,
}

impl SoundEffect {
    /// Cue for an event, if it makes a sound
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Shoot => Some(SoundEffect::Shoot),
            GameEvent::Thrust => Some(SoundEffect::Thrust),
            GameEvent::Explosion { .. } => Some(SoundEffect::Explosion),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SoundEffect::Shoot => "shoot",
            SoundEffect::Thrust => "thrust",
            SoundEffect::Explosion => "explosion",
        }
    }
}

/// Something that can play a cue at a volume
pub trait AudioBackend {
    fn play(&mut self, effect: SoundEffect, volume: f32);
}

/// Backend that only logs cues (headless runs)
#[derive(Debug, Default)]
pub struct LogBackend;

impl AudioBackend for LogBackend {
    fn play(&mut self, effect: SoundEffect, volume: f32) {
        log::debug!("sfx {} @ {:.2}", effect.as_str(), volume);
    }
}

/// Audio manager for the game
pub struct AudioManager {
    backend: Box<dyn AudioBackend>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new(Box::new(LogBackend))
    }
}

impl AudioManager {
    pub fn new(backend: Box<dyn AudioBackend>) -> Self {
        Self {
            backend,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Take volume and mute from settings
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.set_master_volume(settings.master_volume);
        self.set_sfx_volume(settings.sfx_volume);
        self.set_muted(settings.muted);
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Get effective volume
    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        self.backend.play(effect, vol);
    }

    /// Play the cues for a tick's events
    pub fn handle_events(&mut self, events: &[GameEvent]) {
        for effect in events.iter().filter_map(SoundEffect::for_event) {
            self.play(effect);
        }
    }
}
