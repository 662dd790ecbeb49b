//! Audio sink
//!
//! The simulation asks for sounds by name and never waits on the answer. A
//! missing asset or dead backend is logged and otherwise ignored.

use thiserror::Error;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Player fired
    PlayerShoot,
    /// Fighter fired at the player
    EnemyShoot,
    /// Player bullet struck an enemy
    Hit,
    /// Enemy or player destroyed
    Explode,
    /// Boss charging its beam (repeats every tick while charging)
    Charging,
    /// Boss beam pulse
    FiringBeam,
    /// Boss final blast
    BlowUp,
    /// Power-up collected
    PowerUp,
    /// Player ship jumping in
    Takeoff,
}

impl SoundEffect {
    /// Asset file name
    pub fn file_name(&self) -> &'static str {
        match self {
            SoundEffect::PlayerShoot => "shoot.wav",
            SoundEffect::EnemyShoot => "enemy_shoot.wav",
            SoundEffect::Hit => "hit.wav",
            SoundEffect::Explode => "explode.wav",
            SoundEffect::Charging => "charging.wav",
            SoundEffect::FiringBeam => "firing_beam.wav",
            SoundEffect::BlowUp => "blow_up.wav",
            SoundEffect::PowerUp => "powerup.wav",
            SoundEffect::Takeoff => "takeoff.wav",
        }
    }
}

/// Background tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MusicTrack {
    /// Regular stage music
    Stage,
    /// Boss encounter
    Boss,
    /// Run lost
    Death,
}

impl MusicTrack {
    pub fn file_name(&self) -> &'static str {
        match self {
            MusicTrack::Stage => "saturns_folly.ogg",
            MusicTrack::Boss => "deadly_opposition.ogg",
            MusicTrack::Death => "music/death.ogg",
        }
    }
}

/// Audio backend failures
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("audio asset not found: {0}")]
    MissingAsset(String),
    #[error("audio backend unavailable: {0}")]
    Unavailable(String),
}

/// Fire-and-forget playback backend
pub trait AudioSink {
    fn play_effect(&mut self, name: &str, volume: f32) -> Result<(), AudioError>;
    fn play_track(&mut self, name: &str, volume: f32) -> Result<(), AudioError>;
}

/// Backend that only logs what would be played
#[derive(Debug, Default)]
pub struct LogAudio;

impl AudioSink for LogAudio {
    fn play_effect(&mut self, name: &str, volume: f32) -> Result<(), AudioError> {
        log::trace!("sfx {name} @ {volume:.2}");
        Ok(())
    }

    fn play_track(&mut self, name: &str, volume: f32) -> Result<(), AudioError> {
        log::debug!("music {name} @ {volume:.2}");
        Ok(())
    }
}

/// Audio manager for the game
pub struct AudioManager {
    sink: Option<Box<dyn AudioSink>>,
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
    failures: u32,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new(Box::new(LogAudio))
    }
}

impl AudioManager {
    pub fn new(sink: Box<dyn AudioSink>) -> Self {
        Self {
            sink: Some(sink),
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,
            failures: 0,
        }
    }

    /// Manager with no backend; every call is a no-op
    pub fn silent() -> Self {
        Self {
            sink: None,
            ..Self::default()
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Set music volume (0.0 - 1.0)
    pub fn set_music_volume(&mut self, vol: f32) {
        self.music_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Backend calls that failed so far
    pub fn failures(&self) -> u32 {
        self.failures
    }

    fn effective_volume(&self, channel: f32) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * channel
        }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume(self.sfx_volume);
        if vol <= 0.0 {
            return;
        }
        let Some(sink) = self.sink.as_mut() else { return };
        if let Err(err) = sink.play_effect(effect.file_name(), vol) {
            self.failures += 1;
            log::warn!("Sound {:?} skipped: {err}", effect);
        }
    }

    /// Switch background music
    pub fn play_music(&mut self, track: MusicTrack) {
        let vol = self.effective_volume(self.music_volume);
        let Some(sink) = self.sink.as_mut() else { return };
        if let Err(err) = sink.play_track(track.file_name(), vol) {
            self.failures += 1;
            log::warn!("Track {:?} skipped: {err}", track);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Recording {
        played: Rc<RefCell<Vec<String>>>,
        fail: bool,
    }

    impl AudioSink for Recording {
        fn play_effect(&mut self, name: &str, _volume: f32) -> Result<(), AudioError> {
            if self.fail {
                return Err(AudioError::MissingAsset(name.to_string()));
            }
            self.played.borrow_mut().push(name.to_string());
            Ok(())
        }

        fn play_track(&mut self, name: &str, _volume: f32) -> Result<(), AudioError> {
            self.played.borrow_mut().push(name.to_string());
            Ok(())
        }
    }

    #[test]
    fn test_plays_by_file_name() {
        let played = Rc::new(RefCell::new(Vec::new()));
        let mut audio = AudioManager::new(Box::new(Recording {
            played: played.clone(),
            fail: false,
        }));
        audio.play(SoundEffect::Explode);
        audio.play_music(MusicTrack::Boss);
        assert_eq!(*played.borrow(), vec!["explode.wav", "deadly_opposition.ogg"]);
    }

    #[test]
    fn test_muted_skips_effects() {
        let played = Rc::new(RefCell::new(Vec::new()));
        let mut audio = AudioManager::new(Box::new(Recording {
            played: played.clone(),
            fail: false,
        }));
        audio.set_muted(true);
        audio.play(SoundEffect::Hit);
        assert!(played.borrow().is_empty());
    }

    #[test]
    fn test_missing_asset_is_not_fatal() {
        let mut audio = AudioManager::new(Box::new(Recording {
            played: Rc::new(RefCell::new(Vec::new())),
            fail: true,
        }));
        audio.play(SoundEffect::Hit);
        audio.play(SoundEffect::Hit);
        assert_eq!(audio.failures(), 2);
    }
}
