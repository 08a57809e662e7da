//! WAV decoding and output-format adaptation.

use std::io::Cursor;

use crate::error::AudioError;

/// Decoded PCM clip, interleaved `f32` samples in `[-1, 1]`
#[derive(Debug, Clone, PartialEq)]
pub struct Clip {
    pub samples: Vec<f32>,
    pub channels: u16,
    pub sample_rate: u32,
}

impl Clip {
    /// Number of frames (samples per channel)
    pub fn frames(&self) -> usize {
        self.samples.len() / self.channels.max(1) as usize
    }

    /// Convert to the output device's channel count and sample rate
    ///
    /// Channels are duplicated or averaged down; the rate is changed by
    /// linear interpolation between neighbouring frames.
    pub fn adapt(&self, sample_rate: u32, channels: u16) -> Clip {
        let remixed = self.remix(channels);
        remixed.resample(sample_rate)
    }

    fn remix(&self, channels: u16) -> Clip {
        let from = self.channels.max(1) as usize;
        let to = channels.max(1) as usize;
        if from == to {
            return self.clone();
        }

        let mut samples = Vec::with_capacity(self.frames() * to);
        for frame in self.samples.chunks_exact(from) {
            if to == 1 {
                samples.push(frame.iter().sum::<f32>() / from as f32);
            } else {
                samples.extend((0..to).map(|ch| frame[ch % from]));
            }
        }

        Clip {
            samples,
            channels: to as u16,
            sample_rate: self.sample_rate,
        }
    }

    fn resample(&self, sample_rate: u32) -> Clip {
        if sample_rate == self.sample_rate || self.sample_rate == 0 || self.frames() == 0 {
            return Clip {
                sample_rate: if self.sample_rate == 0 { sample_rate } else { self.sample_rate },
                ..self.clone()
            };
        }

        let channels = self.channels.max(1) as usize;
        let frames_in = self.frames();
        let ratio = self.sample_rate as f64 / sample_rate as f64;
        let frames_out = ((frames_in as f64) / ratio).round().max(1.0) as usize;

        let mut samples = Vec::with_capacity(frames_out * channels);
        for i in 0..frames_out {
            let src = i as f64 * ratio;
            let index = (src.floor() as usize).min(frames_in - 1);
            let next = (index + 1).min(frames_in - 1);
            let t = (src - index as f64) as f32;

            for ch in 0..channels {
                let a = self.samples[index * channels + ch];
                let b = self.samples[next * channels + ch];
                samples.push(a + (b - a) * t);
            }
        }

        Clip {
            samples,
            channels: self.channels,
            sample_rate,
        }
    }
}

/// Decode an in-memory WAV file
pub fn decode_wav(bytes: &[u8]) -> Result<Clip, AudioError> {
    let mut reader = hound::WavReader::new(Cursor::new(bytes))?;
    let spec = reader.spec();

    if spec.channels == 0 {
        return Err(AudioError::Format("zero channels".to_string()));
    }

    let samples: Vec<f32> = match spec.sample_format {
        hound::SampleFormat::Float => reader.samples::<f32>().collect::<Result<_, _>>()?,
        hound::SampleFormat::Int => {
            if !(1..=32).contains(&spec.bits_per_sample) {
                return Err(AudioError::Format(format!(
                    "{} bits per sample",
                    spec.bits_per_sample
                )));
            }
            let scale = (1u64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 / scale))
                .collect::<Result<_, _>>()?
        }
    };

    if samples.is_empty() {
        return Err(AudioError::Format("clip has no samples".to_string()));
    }

    Ok(Clip {
        samples,
        channels: spec.channels,
        sample_rate: spec.sample_rate,
    })
}
