//! Looping clip player on a cpal output stream.
//!
//! The stream itself never loops: when the cursor reaches the end of the
//! clip it stops and outputs silence until the animation loop notices and
//! restarts it through [`Playback`].

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, Sample, SizedSample};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::clip::Clip;
use crate::error::AudioError;
use crate::worker::Playback;

/// Read position into a clip, shared with the audio callback
#[derive(Debug)]
pub struct PlaybackCursor {
    clip: Clip,
    position: usize,
    playing: bool,
}

impl PlaybackCursor {
    /// Stopped cursor at the start of the clip
    pub fn new(clip: Clip) -> Self {
        Self {
            clip,
            position: 0,
            playing: false,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Current read position (interleaved sample index)
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn rewind(&mut self) {
        self.position = 0;
    }

    pub fn play(&mut self) {
        self.playing = !self.clip.samples.is_empty();
    }

    /// Fill an interleaved output buffer
    ///
    /// Copies from the read position while playing; the rest is silence.
    /// Reaching the end of the clip stops playback.
    pub fn fill(&mut self, out: &mut [f32]) {
        let mut written = 0;
        if self.playing {
            let remaining = &self.clip.samples[self.position.min(self.clip.samples.len())..];
            written = remaining.len().min(out.len());
            out[..written].copy_from_slice(&remaining[..written]);
            self.position += written;

            if self.position >= self.clip.samples.len() {
                self.playing = false;
            }
        }
        out[written..].fill(0.0);
    }
}

/// Audio output session playing one clip
pub struct LoopingPlayer {
    cursor: Arc<Mutex<PlaybackCursor>>,

    /// Audio output stream (kept alive)
    _stream: cpal::Stream,
}

impl LoopingPlayer {
    /// Open the default output device and prepare the clip for it
    ///
    /// The stream runs from here on but stays silent until [`Playback::play`].
    pub fn open(clip: &Clip, preferred_rate_hz: u32) -> Result<Self, AudioError> {
        let host = cpal::default_host();
        let device = host.default_output_device().ok_or(AudioError::NoDevice)?;
        let supported = pick_config(&device, preferred_rate_hz)?;

        log::info!(
            "Audio: {} @ {}Hz, {} channels",
            device.name().unwrap_or_else(|_| "Unknown".to_string()),
            supported.sample_rate().0,
            supported.channels()
        );

        let adapted = clip.adapt(supported.sample_rate().0, supported.channels());
        let cursor = Arc::new(Mutex::new(PlaybackCursor::new(adapted)));

        let format = supported.sample_format();
        let config: cpal::StreamConfig = supported.into();
        let stream = match format {
            cpal::SampleFormat::F32 => build_stream::<f32>(&device, &config, &cursor)?,
            cpal::SampleFormat::I16 => build_stream::<i16>(&device, &config, &cursor)?,
            cpal::SampleFormat::U16 => build_stream::<u16>(&device, &config, &cursor)?,
            cpal::SampleFormat::I32 => build_stream::<i32>(&device, &config, &cursor)?,
            other => {
                return Err(AudioError::device(format!(
                    "unsupported sample format {other:?}"
                )))
            }
        };

        stream.play().map_err(AudioError::device)?;

        Ok(Self {
            cursor,
            _stream: stream,
        })
    }

    fn cursor(&self) -> MutexGuard<'_, PlaybackCursor> {
        lock(&self.cursor)
    }
}

impl Playback for LoopingPlayer {
    fn is_playing(&self) -> bool {
        self.cursor().is_playing()
    }

    fn rewind(&mut self) {
        self.cursor().rewind();
    }

    fn play(&mut self) {
        self.cursor().play();
    }
}

/// Prefer the configured rate in the device's default channel layout and
/// sample format; fall back to the device default.
fn pick_config(
    device: &cpal::Device,
    preferred_rate_hz: u32,
) -> Result<cpal::SupportedStreamConfig, AudioError> {
    let default = device.default_output_config().map_err(AudioError::device)?;
    let rate = cpal::SampleRate(preferred_rate_hz);

    let preferred = device.supported_output_configs().ok().and_then(|mut ranges| {
        ranges.find(|range| {
            range.channels() == default.channels()
                && range.sample_format() == default.sample_format()
                && range.min_sample_rate() <= rate
                && rate <= range.max_sample_rate()
        })
    });

    Ok(preferred
        .map(|range| range.with_sample_rate(rate))
        .unwrap_or(default))
}

fn build_stream<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    cursor: &Arc<Mutex<PlaybackCursor>>,
) -> Result<cpal::Stream, AudioError>
where
    T: SizedSample + FromSample<f32>,
{
    let cursor = Arc::clone(cursor);
    let mut scratch: Vec<f32> = Vec::new();

    device
        .build_output_stream(
            config,
            move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
                scratch.resize(data.len(), 0.0);
                lock(&cursor).fill(&mut scratch);
                for (out, sample) in data.iter_mut().zip(&scratch) {
                    *out = T::from_sample(*sample);
                }
            },
            |err| log::error!("Audio stream error: {}", err),
            None,
        )
        .map_err(AudioError::device)
}

fn lock(cursor: &Mutex<PlaybackCursor>) -> MutexGuard<'_, PlaybackCursor> {
    cursor.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clip(len: usize) -> Clip {
        Clip {
            samples: (1..=len).map(|i| i as f32 / 10.0).collect(),
            channels: 1,
            sample_rate: 44100,
        }
    }

    #[test]
    fn test_stopped_cursor_outputs_silence() {
        let mut cursor = PlaybackCursor::new(clip(4));
        let mut out = [1.0; 3];
        cursor.fill(&mut out);

        assert_eq!(out, [0.0; 3]);
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn test_playback_runs_to_end_then_stops() {
        let mut cursor = PlaybackCursor::new(clip(5));
        cursor.play();

        let mut out = [0.0; 3];
        cursor.fill(&mut out);
        assert_eq!(out, [0.1, 0.2, 0.3]);
        assert!(cursor.is_playing());

        cursor.fill(&mut out);
        assert_eq!(out, [0.4, 0.5, 0.0]);
        assert!(!cursor.is_playing());

        // Does not loop on its own
        cursor.fill(&mut out);
        assert_eq!(out, [0.0; 3]);
    }

    #[test]
    fn test_rewind_and_play_restarts_from_start() {
        let mut cursor = PlaybackCursor::new(clip(2));
        cursor.play();
        let mut out = [0.0; 4];
        cursor.fill(&mut out);
        assert!(!cursor.is_playing());

        cursor.rewind();
        cursor.play();
        cursor.fill(&mut out);
        assert_eq!(out, [0.1, 0.2, 0.0, 0.0]);
    }

    #[test]
    fn test_play_without_rewind_keeps_position() {
        let mut cursor = PlaybackCursor::new(clip(6));
        cursor.play();
        let mut out = [0.0; 2];
        cursor.fill(&mut out);

        cursor.play();
        assert_eq!(cursor.position(), 2);
        cursor.fill(&mut out);
        assert_eq!(out, [0.3, 0.4]);
    }

    #[test]
    fn test_empty_clip_never_plays() {
        let mut cursor = PlaybackCursor::new(clip(0));
        cursor.play();
        assert!(!cursor.is_playing());
    }
}
