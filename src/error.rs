//! Error types for controller and worker.
//!
//! Every error here is local to one process: nothing crosses from a worker
//! back to the controller.

use std::io;

/// Asset lookup failure
#[derive(thiserror::Error, Debug)]
pub enum AssetError {
    #[error("asset not found: {0}")]
    NotFound(String),

    #[error("asset is empty: {0}")]
    Empty(String),
}

/// Audio decode or device failure
#[derive(thiserror::Error, Debug)]
pub enum AudioError {
    #[error("failed to decode WAV clip: {0}")]
    Decode(#[from] hound::Error),

    #[error("unsupported WAV format: {0}")]
    Format(String),

    #[error("no audio output device found")]
    NoDevice,

    #[error("audio device error: {0}")]
    Device(String),
}

impl AudioError {
    pub fn device(msg: impl ToString) -> Self {
        Self::Device(msg.to_string())
    }
}

/// Font parse failure
#[derive(thiserror::Error, Debug)]
pub enum TextError {
    #[error("failed to parse font: {0}")]
    Font(#[from] ab_glyph::InvalidFont),
}

/// GPU presenter setup failure
#[derive(thiserror::Error, Debug)]
pub enum RenderError {
    #[error("failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("failed to find suitable GPU adapter")]
    NoAdapter,

    #[error("surface reports no supported format")]
    NoSurfaceFormat,

    #[error("failed to request device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
}

/// Fatal worker startup failure; ends the worker process only
#[derive(thiserror::Error, Debug)]
pub enum WorkerError {
    #[error(transparent)]
    Asset(#[from] AssetError),

    #[error(transparent)]
    Audio(#[from] AudioError),

    #[error(transparent)]
    Text(#[from] TextError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("window system error: {0}")]
    Window(String),
}

impl WorkerError {
    pub fn window(msg: impl ToString) -> Self {
        Self::Window(msg.to_string())
    }
}

/// Failure to create one worker process; logged, never retried
#[derive(thiserror::Error, Debug)]
#[error("failed to launch worker {index}: {source}")]
pub struct SpawnError {
    /// One-based launch attempt number
    pub index: usize,
    #[source]
    pub source: io::Error,
}
