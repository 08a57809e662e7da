//! Worker animation state machine.

use std::time::Instant;

use rand::Rng;

use super::state::{ScreenBounds, WorkerState};
use super::{Placement, Playback};
use crate::params::AnimationConfig;

/// Lifecycle of the animation loop
#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    /// No tick has run yet
    Uninitialized,

    /// Startup done; state advances every tick
    Running(WorkerState),
}

/// Drives one worker's flash timer, audio health check and bounce physics
pub struct Animator<P, R> {
    phase: Phase,
    config: AnimationConfig,
    audio: P,
    rng: R,
}

impl<P: Playback, R: Rng> Animator<P, R> {
    /// Create an animator that starts on its first tick
    pub fn new(config: AnimationConfig, audio: P, rng: R) -> Self {
        Self {
            phase: Phase::Uninitialized,
            config,
            audio,
            rng,
        }
    }

    /// Create an animator already in the running phase with a given state
    pub fn with_state(config: AnimationConfig, audio: P, rng: R, state: WorkerState) -> Self {
        Self {
            phase: Phase::Running(state),
            config,
            audio,
            rng,
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// Current state, if startup has happened
    pub fn state(&self) -> Option<&WorkerState> {
        match &self.phase {
            Phase::Uninitialized => None,
            Phase::Running(state) => Some(state),
        }
    }

    pub fn audio(&self) -> &P {
        &self.audio
    }

    pub fn audio_mut(&mut self) -> &mut P {
        &mut self.audio
    }

    /// Advance one frame.
    ///
    /// The first call performs startup: random placement and velocity, then
    /// audio from the start of the clip. Every call then runs the flash
    /// timer, restarts audio if it has stopped, steps the physics and moves
    /// the window.
    pub fn tick<W: Placement + ?Sized>(&mut self, now: Instant, bounds: ScreenBounds, window: &mut W) {
        if let Phase::Uninitialized = self.phase {
            self.start(now, bounds);
        }

        let Phase::Running(state) = &mut self.phase else {
            return;
        };

        state.update_flash(now, self.config.flash_interval);

        if !self.audio.is_playing() {
            log::warn!("audio stopped, restarting");
            self.audio.rewind();
            self.audio.play();
        }

        state.step(bounds);
        window.place(state.position);
    }

    fn start(&mut self, now: Instant, bounds: ScreenBounds) {
        let state = WorkerState::random(&mut self.rng, bounds, self.config.max_speed_px, now);
        log::info!(
            "worker started at ({:.0}, {:.0}) moving ({:.2}, {:.2}) px/tick",
            state.position.x,
            state.position.y,
            state.velocity.x,
            state.velocity.y
        );

        self.audio.rewind();
        self.audio.play();
        self.phase = Phase::Running(state);
    }
}
