//! Fixed-rate game loop
//!
//! Polls input, ticks the sim, forwards queued events to audio and the
//! renderer, then sleeps until the next tick is due. Collaborator failures
//! are logged and never stop or skip a tick.

use std::time::{Duration, Instant};

use crate::audio::AudioManager;
use crate::consts::TICKS_PER_SECOND;
use crate::platform::InputSource;
use crate::renderer::{Frame, RenderSink};
use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase, GameState, TickInput, tick};

/// Wall-clock length of one tick
pub const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICKS_PER_SECOND as u64);

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Cruiser destroyed and the ship flew off
    Victory,
    /// Lives ran out
    GameOver,
    /// Quit intent
    Quit,
    /// Tick budget used up with the run still going
    TimedOut,
}

pub struct Runner<I: InputSource, R: RenderSink> {
    pub state: GameState,
    input: I,
    audio: AudioManager,
    renderer: R,
    pacing: bool,
    input_errors: u32,
    render_errors: u32,
}

impl<I: InputSource, R: RenderSink> Runner<I, R> {
    pub fn new(state: GameState, input: I, audio: AudioManager, renderer: R) -> Self {
        Self {
            state,
            input,
            audio,
            renderer,
            pacing: false,
            input_errors: 0,
            render_errors: 0,
        }
    }

    /// Apply user preferences to audio and frame pacing
    pub fn with_settings(mut self, settings: &Settings) -> Self {
        self.audio.set_master_volume(settings.master_volume);
        self.audio.set_sfx_volume(settings.sfx_volume);
        self.audio.set_music_volume(settings.music_volume);
        self.audio.set_muted(settings.muted);
        self.pacing = settings.frame_pacing;
        self
    }

    pub fn set_pacing(&mut self, pacing: bool) {
        self.pacing = pacing;
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn audio(&self) -> &AudioManager {
        &self.audio
    }

    pub fn input_errors(&self) -> u32 {
        self.input_errors
    }

    pub fn render_errors(&self) -> u32 {
        self.render_errors
    }

    /// One full tick: input, sim, events, draw
    pub fn step(&mut self) {
        let input = match self.input.poll() {
            Ok(input) => input,
            Err(err) => {
                self.input_errors += 1;
                log::warn!("Input dropped for tick {}: {err}", self.state.time_ticks);
                TickInput::default()
            }
        };

        tick(&mut self.state, &input);

        for event in self.state.drain_events() {
            self.dispatch(event);
        }

        let frame = Frame::capture(&self.state);
        if let Err(err) = self.renderer.draw_frame(&frame) {
            self.render_errors += 1;
            log::warn!("Frame {} not drawn: {err}", frame.tick);
        }
    }

    fn dispatch(&mut self, event: GameEvent) {
        match event {
            GameEvent::Sound(effect) => self.audio.play(effect),
            GameEvent::Music(track) => self.audio.play_music(track),
            GameEvent::HitFlash { rect } => {
                if let Err(err) = self.renderer.flash(rect) {
                    self.render_errors += 1;
                    log::warn!("Hit flash skipped: {err}");
                }
            }
            GameEvent::Explosion { pos, size } => {
                log::trace!("{size:?} explosion at {pos}");
            }
            GameEvent::BossSpawned
            | GameEvent::BossDefeated
            | GameEvent::PlayerDied { .. }
            | GameEvent::GameOver => {
                log::debug!("{event:?}");
            }
        }
    }

    /// Run until the sim stops or `max_ticks` have passed
    pub fn run(&mut self, max_ticks: u64) -> RunOutcome {
        let mut next_tick_time = Instant::now();
        let mut ticks = 0;

        while self.state.running && ticks < max_ticks {
            self.step();
            ticks += 1;

            if self.pacing {
                next_tick_time += TICK_DURATION;
                let now = Instant::now();
                if next_tick_time > now {
                    std::thread::sleep(next_tick_time - now);
                } else if now - next_tick_time > TICK_DURATION * 2 {
                    // Too far behind, don't try to catch up
                    next_tick_time = now;
                }
            }
        }

        self.outcome()
    }

    pub fn outcome(&self) -> RunOutcome {
        if self.state.running {
            RunOutcome::TimedOut
        } else if self.state.phase == GamePhase::GameOver {
            RunOutcome::GameOver
        } else if self.state.boss_defeated {
            RunOutcome::Victory
        } else {
            RunOutcome::Quit
        }
    }
}
