//! Flashbounce - launches a swarm of bouncing, flashing, singing windows
//!
//! Without flags this process is the controller: it re-launches its own
//! executable with `--child` on a fixed schedule and exits. With `--child`
//! it is a worker: one small undecorated window bouncing around the
//! monitor, flashing black and white while looping a sound clip.

use std::process::ExitCode;
use std::sync::Arc;
use std::time::{Duration, Instant};

use clap::Parser;
use image::RgbaImage;
use rand::rngs::StdRng;
use rand::SeedableRng;
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use flashbounce::assets::Assets;
use flashbounce::audio::{decode_wav, LoopingPlayer};
use flashbounce::canvas;
use flashbounce::cli::{Args, Mode};
use flashbounce::controller::{Controller, ProcessSpawner, ThreadSleeper};
use flashbounce::error::WorkerError;
use flashbounce::host::{self, MonitorCache, WindowPlacement};
use flashbounce::params::*;
use flashbounce::rendering::Presenter;
use flashbounce::text::TextMask;
use flashbounce::worker::Animator;

/// Worker application state
struct WorkerApp {
    // Window and rendering
    window: Option<Arc<Window>>,
    presenter: Option<Presenter>,
    window_config: WindowConfig,

    // Animation and audio
    animator: Animator<LoopingPlayer, StdRng>,
    monitor: MonitorCache,

    // Frame composition
    text: TextMask,
    text_origin: (i32, i32),
    frame: RgbaImage,

    // Frame pacing
    frame_period: Duration,
    next_frame: Instant,

    // Startup failure raised inside the event loop
    fatal: Option<WorkerError>,
}

impl WorkerApp {
    fn new(
        window_config: WindowConfig,
        animation: &AnimationConfig,
        text_config: &TextConfig,
        text: TextMask,
        animator: Animator<LoopingPlayer, StdRng>,
    ) -> Self {
        let frame = RgbaImage::new(window_config.width, window_config.height);
        let text_origin = text_config.origin(window_config.width, window_config.height);

        Self {
            window: None,
            presenter: None,
            window_config,
            animator,
            monitor: MonitorCache::default(),
            text,
            text_origin,
            frame,
            frame_period: animation.frame_period(),
            next_frame: Instant::now(),
            fatal: None,
        }
    }

    fn open_window(&mut self, event_loop: &ActiveEventLoop) -> Result<(), WorkerError> {
        let attributes = host::window_attributes(&self.window_config);
        let window = Arc::new(
            event_loop
                .create_window(attributes)
                .map_err(WorkerError::window)?,
        );

        let frame_size = (self.window_config.width, self.window_config.height);
        let presenter = pollster::block_on(Presenter::new(Arc::clone(&window), frame_size))?;

        self.window = Some(window);
        self.presenter = Some(presenter);
        Ok(())
    }

    /// Advance the animation and move the window
    ///
    /// Uses the last known monitor area when the window system reports none;
    /// until a first area is known the tick is skipped, so startup waits for
    /// real bounds.
    fn tick(&mut self, window: &Window) {
        let reported = host::screen_bounds(window);
        let Some((bounds, origin)) = self.monitor.resolve(reported) else {
            log::debug!("no monitor information yet, holding the worker");
            return;
        };

        let mut placement = WindowPlacement::new(window, origin);
        self.animator.tick(Instant::now(), bounds, &mut placement);
    }

    /// One frame: tick the animation, compose, present
    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(window) = self.window.clone() else {
            return;
        };

        self.tick(&window);

        canvas::render(
            self.animator.state(),
            &self.text,
            self.text_origin,
            &mut self.frame,
        );

        let Some(presenter) = self.presenter.as_mut() else {
            return;
        };
        match presenter.present(&self.frame) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => presenter.reconfigure(),
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("GPU out of memory");
                event_loop.exit();
            }
            Err(e) => log::warn!("Render error: {:?}", e),
        }
    }
}

impl ApplicationHandler for WorkerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return; // Already initialized
        }

        if let Err(err) = self.open_window(event_loop) {
            self.fatal = Some(err);
            event_loop.exit();
            return;
        }

        // Place the hidden window before it first appears
        if let Some(window) = self.window.clone() {
            self.tick(&window);
            window.set_visible(true);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                if let Some(presenter) = self.presenter.as_mut() {
                    presenter.resize(size.width, size.height);
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();
        if now >= self.next_frame {
            if let Some(window) = &self.window {
                window.request_redraw();
            }
            // Skip missed frames instead of bursting to catch up
            self.next_frame = (self.next_frame + self.frame_period).max(now);
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(self.next_frame));
    }
}

fn run_controller() -> ExitCode {
    let config = LaunchConfig::default();

    let spawner = match ProcessSpawner::current_exe(config.worker_flag) {
        Ok(spawner) => spawner,
        Err(err) => {
            log::error!("Couldn't locate own executable: {err}");
            return ExitCode::FAILURE;
        }
    };

    log::info!(
        "Launching {} windows, one every {:?}",
        config.worker_count,
        config.launch_interval
    );
    let controller = Controller::from_config(spawner, ThreadSleeper, &config);
    controller.launch(config.worker_count, config.launch_interval);

    ExitCode::SUCCESS
}

fn run_worker() -> Result<(), WorkerError> {
    let window_config = WindowConfig::default();
    let animation = AnimationConfig::default();
    let text_config = TextConfig::default();
    let audio_config = AudioConfig::default();

    log::warn!("This program shows rapid flashing and plays sound.");
    log::warn!("Photosensitive people may be harmed. Do not run this around others.");

    // Assets load synchronously, before the event loop
    let assets = Assets::embedded();
    let clip = decode_wav(assets.load(audio_config.clip_name)?)?;
    let text = TextMask::rasterize(assets.load(audio_config.font_name)?, &text_config)?;
    let player = LoopingPlayer::open(&clip, audio_config.sample_rate_hz)?;

    let animator = Animator::new(animation.clone(), player, StdRng::from_entropy());
    let mut app = WorkerApp::new(window_config, &animation, &text_config, text, animator);

    let event_loop = EventLoop::new().map_err(WorkerError::window)?;
    event_loop
        .run_app(&mut app)
        .map_err(WorkerError::window)?;

    match app.fatal.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

fn main() -> ExitCode {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args = Args::parse();
    match args.mode() {
        Mode::Controller => run_controller(),
        Mode::Worker => match run_worker() {
            Ok(()) => {
                log::info!("Exiting.");
                ExitCode::SUCCESS
            }
            Err(err) => {
                log::error!("{err}");
                ExitCode::FAILURE
            }
        },
    }
}
