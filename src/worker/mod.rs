//! Worker: one bouncing, flashing window with a self-healing audio loop.
//!
//! The worker owns its state outright; the window system and the audio
//! session are reached only through the [`Placement`] and [`Playback`]
//! traits so the loop can run against fakes in tests.

mod animator;
mod state;

use glam::DVec2;

pub use animator::{Animator, Phase};
pub use state::{reflect, ScreenBounds, WorkerState};

/// Looping audio session as seen by the animation loop
pub trait Playback {
    /// Whether samples are currently being played
    fn is_playing(&self) -> bool;

    /// Move the read position back to the start of the clip
    fn rewind(&mut self);

    /// Start (or resume) playback from the current read position
    fn play(&mut self);
}

/// Moves the worker window on screen
pub trait Placement {
    fn place(&mut self, position: DVec2);
}
