//! Audio cues using HTML media elements
//!
//! Three sampled sounds: jump, crash, and a looping music track. Browsers
//! reject `play()` until the first user gesture, so every call is
//! best-effort and retried on the next frame.

use web_sys::HtmlAudioElement;

use crate::assets::AssetManifest;
use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Character left the ground
    Jump,
    /// Character hit an obstacle
    Crash,
}

/// Audio manager for the game
pub struct AudioManager {
    jump: Option<HtmlAudioElement>,
    crash: Option<HtmlAudioElement>,
    music: Option<HtmlAudioElement>,
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
}

fn open(path: &str) -> Option<HtmlAudioElement> {
    match HtmlAudioElement::new_with_src(path) {
        Ok(el) => Some(el),
        Err(e) => {
            log::warn!("Failed to create audio element for {}: {:?}", path, e);
            None
        }
    }
}

impl AudioManager {
    pub fn new(manifest: &AssetManifest, settings: &Settings) -> Self {
        let music = open(&manifest.music);
        if let Some(music) = &music {
            music.set_loop(true);
        }
        let mut manager = Self {
            jump: open(&manifest.jump_sound),
            crash: open(&manifest.crash_sound),
            music,
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,
        };
        manager.apply_settings(settings);
        manager
    }

    pub fn apply_settings(&mut self, settings: &Settings) {
        self.master_volume = settings.master_volume.clamp(0.0, 1.0);
        self.sfx_volume = settings.sfx_volume.clamp(0.0, 1.0);
        self.music_volume = settings.music_volume.clamp(0.0, 1.0);
        self.muted = settings.muted;
        if let Some(music) = &self.music {
            music.set_volume(self.volume_for(self.music_volume) as f64);
        }
    }

    fn volume_for(&self, channel: f32) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * channel
        }
    }

    /// Start the music if it isn't already playing
    pub fn ensure_music(&self) {
        if self.muted {
            return;
        }
        if let Some(music) = &self.music {
            if music.paused() {
                let _ = music.play();
            }
        }
    }

    pub fn stop_music(&self) {
        if let Some(music) = &self.music {
            let _ = music.pause();
            music.set_current_time(0.0);
        }
    }

    /// Play a sound effect from the start, cutting off any previous play
    pub fn play(&self, effect: SoundEffect) {
        let vol = self.volume_for(self.sfx_volume);
        if vol <= 0.0 {
            return;
        }
        let el = match effect {
            SoundEffect::Jump => &self.jump,
            SoundEffect::Crash => &self.crash,
        };
        let Some(el) = el else { return };
        el.set_volume(vol as f64);
        el.set_current_time(0.0);
        let _ = el.play();
    }

    /// Play whatever cues a step produced
    pub fn handle_events(&self, events: &[GameEvent]) {
        for event in events {
            match event {
                GameEvent::Jumped => self.play(SoundEffect::Jump),
                GameEvent::Collision { .. } => self.play(SoundEffect::Crash),
                _ => {}
            }
        }
    }
}
