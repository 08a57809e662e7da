//! Worker animation timing and motion parameters.

use std::time::Duration;

/// Flash timer and bounce physics parameters
#[derive(Debug, Clone)]
pub struct AnimationConfig {
    /// Time between black/white fill toggles
    pub flash_interval: Duration,

    /// Upper bound of the per-axis speed (pixels per tick)
    /// Each axis is drawn uniformly from [-max_speed, max_speed)
    pub max_speed_px: f64,

    /// Frame callback rate (Hz)
    /// 60 Hz matches the refresh rate the velocity range was tuned for
    pub frame_rate_hz: u32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            flash_interval: Duration::from_millis(300),
            max_speed_px: 2.0,
            frame_rate_hz: 60,
        }
    }
}

impl AnimationConfig {
    /// Duration of one frame at the configured rate
    pub fn frame_period(&self) -> Duration {
        Duration::from_secs(1) / self.frame_rate_hz.max(1)
    }
}
