//! Command-line argument parsing.

use clap::Parser;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "flashbounce")]
#[command(about = "Launches a swarm of bouncing, flashing windows", long_about = None)]
pub struct Args {
    /// Run as a single worker window instead of the launcher
    #[arg(long)]
    pub child: bool,
}

/// Which role this process plays
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Controller,
    Worker,
}

impl Args {
    pub fn mode(&self) -> Mode {
        if self.child {
            Mode::Worker
        } else {
            Mode::Controller
        }
    }
}
