//! Clip decoding and looping playback.
//!
//! Decodes the embedded WAV clip once at startup, adapts it to the output
//! device, and plays it through a cpal stream controlled by the worker's
//! per-tick health check.

mod clip;
mod player;

// Re-export public types
pub use clip::{decode_wav, Clip};
pub use player::{LoopingPlayer, PlaybackCursor};
