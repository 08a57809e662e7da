//! Audio and asset configuration.

/// Audio clip playback and asset names
#[derive(Debug, Clone)]
pub struct AudioConfig {
    /// Logical name of the looping audio clip
    pub clip_name: &'static str,

    /// Logical name of the message font
    pub font_name: &'static str,

    /// Preferred output sample rate (Hz)
    /// Used when the device accepts it; otherwise the device default rate wins
    pub sample_rate_hz: u32,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            clip_name: "sound.wav",
            font_name: "DejaVuSans.ttf",
            sample_rate_hz: 44100,
        }
    }
}
