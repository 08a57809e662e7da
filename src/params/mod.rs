//! Parameter definitions with physical units and documented semantics.
//!
//! Every constant the program runs with lives here:
//! - Units (pixels, milliseconds, Hz, points)
//! - Documented ranges and meanings
//! - No runtime overrides (no flags, files or environment)

mod animation;
mod audio;
mod launch;
mod text;
mod window;

// Re-export all types
pub use animation::AnimationConfig;
pub use audio::AudioConfig;
pub use launch::LaunchConfig;
pub use text::TextConfig;
pub use window::WindowConfig;
