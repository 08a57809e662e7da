//! Controller: staggered, fire-and-forget launching of worker processes.
//!
//! Each launch runs on its own short-lived thread so a slow or failing spawn
//! never delays the fixed inter-launch sleep. Those threads are never joined
//! and launched workers are never tracked: the controller has no say over a
//! worker once it is started.

use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::error::SpawnError;
use crate::params::LaunchConfig;

/// Starts one worker process
pub trait Spawner: Send + Sync + 'static {
    /// `index` is the one-based launch attempt number
    fn spawn(&self, index: usize) -> Result<(), SpawnError>;
}

/// Blocking delay between launches
pub trait Sleeper {
    fn sleep(&self, duration: Duration);
}

/// Real-time sleeps on the calling thread
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        thread::sleep(duration);
    }
}

/// Re-executes a program with the worker flag
#[derive(Debug, Clone)]
pub struct ProcessSpawner {
    program: PathBuf,
    worker_flag: String,
}

impl ProcessSpawner {
    pub fn new(program: impl Into<PathBuf>, worker_flag: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            worker_flag: worker_flag.into(),
        }
    }

    /// Spawner for the currently running executable
    pub fn current_exe(worker_flag: impl Into<String>) -> std::io::Result<Self> {
        Ok(Self::new(std::env::current_exe()?, worker_flag))
    }
}

impl Spawner for ProcessSpawner {
    fn spawn(&self, index: usize) -> Result<(), SpawnError> {
        // Dropping the Child neither waits for nor kills the process
        Command::new(&self.program)
            .arg(&self.worker_flag)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .spawn()
            .map(drop)
            .map_err(|source| SpawnError { index, source })
    }
}

/// Issues worker launches on a fixed schedule
pub struct Controller<S, C> {
    spawner: Arc<S>,
    sleeper: C,
    grace_period: Duration,
}

impl<S: Spawner, C: Sleeper> Controller<S, C> {
    pub fn new(spawner: S, sleeper: C, grace_period: Duration) -> Self {
        Self {
            spawner: Arc::new(spawner),
            sleeper,
            grace_period,
        }
    }

    /// Controller for a launch schedule
    pub fn from_config(spawner: S, sleeper: C, config: &LaunchConfig) -> Self {
        Self::new(spawner, sleeper, config.grace_period)
    }

    /// Launch `count` workers, sleeping `interval` after each launch, then
    /// wait out the grace period.
    ///
    /// Returns the number of launch attempts issued, which is always `count`:
    /// failures are logged by the launching thread and never stop the loop.
    pub fn launch(&self, count: usize, interval: Duration) -> usize {
        for i in 0..count {
            let index = i + 1;
            let spawner = Arc::clone(&self.spawner);

            let task = thread::Builder::new()
                .name(format!("launch-{index}"))
                .spawn(move || match spawner.spawn(index) {
                    Ok(()) => log::info!("launched worker {index}/{count}"),
                    Err(err) => log::error!("{err}"),
                });

            // Thread exhaustion: fall back to launching inline
            if let Err(err) = task {
                log::warn!("no launch thread for worker {index} ({err}), launching inline");
                if let Err(err) = self.spawner.spawn(index) {
                    log::error!("{err}");
                }
            }

            self.sleeper.sleep(interval);
        }

        self.sleeper.sleep(self.grace_period);
        log::info!("launch finished, exiting");
        count
    }
}
