//! Controller launch schedule.

use std::time::Duration;

/// Staggered launch schedule for worker processes
#[derive(Debug, Clone)]
pub struct LaunchConfig {
    /// Number of worker processes to launch
    pub worker_count: usize,

    /// Delay between consecutive launches
    pub launch_interval: Duration,

    /// Wait after the last launch before the controller exits
    pub grace_period: Duration,

    /// Command-line flag that puts the executable in worker mode
    pub worker_flag: &'static str,
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            worker_count: 50,
            launch_interval: Duration::from_secs(2),
            grace_period: Duration::from_secs(5),
            worker_flag: "--child",
        }
    }
}

impl LaunchConfig {
    /// Total time the controller spends before exiting
    pub fn total_duration(&self) -> Duration {
        self.launch_interval * self.worker_count as u32 + self.grace_period
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_schedule_duration() {
        // 50 launches × 2s + 5s grace
        let config = LaunchConfig::default();
        assert_eq!(config.total_duration(), Duration::from_secs(105));
    }
}
