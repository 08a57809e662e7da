//! Per-worker animation state and screen-space bounce physics.

use std::time::{Duration, Instant};

use glam::DVec2;
use rand::Rng;

/// Monitor and window extents in screen pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenBounds {
    pub monitor: DVec2,
    pub window: DVec2,
}

impl ScreenBounds {
    pub fn new(monitor: DVec2, window: DVec2) -> Self {
        Self { monitor, window }
    }

    /// Largest valid top-left coordinate on each axis
    ///
    /// Zero when the window does not fit on the monitor.
    pub fn max_position(&self) -> DVec2 {
        (self.monitor - self.window).max(DVec2::ZERO)
    }
}

/// Worker animation state, owned by exactly one worker process
#[derive(Debug, Clone, PartialEq)]
pub struct WorkerState {
    /// Window top-left in screen coordinates (pixels)
    pub position: DVec2,

    /// Pixels per tick; only the signs ever change
    pub velocity: DVec2,

    /// Current fill phase: white when on, black when off
    pub flash_on: bool,

    /// Time of the last flash toggle (or of startup)
    pub last_flash: Instant,
}

impl WorkerState {
    /// Random placement within the bounds and random velocity per axis
    ///
    /// Each velocity axis is drawn independently from `[-max_speed, max_speed)`.
    pub fn random<R: Rng + ?Sized>(
        rng: &mut R,
        bounds: ScreenBounds,
        max_speed: f64,
        now: Instant,
    ) -> Self {
        let max = bounds.max_position();
        let position = DVec2::new(rng.gen_range(0.0..=max.x), rng.gen_range(0.0..=max.y));

        let velocity = if max_speed > 0.0 {
            DVec2::new(
                rng.gen_range(-max_speed..max_speed),
                rng.gen_range(-max_speed..max_speed),
            )
        } else {
            DVec2::ZERO
        };

        Self {
            position,
            velocity,
            flash_on: false,
            last_flash: now,
        }
    }

    /// Toggle the flash phase if at least `interval` has passed since the
    /// last toggle. Returns whether a toggle happened.
    ///
    /// Level check against elapsed time: a late tick still toggles only once.
    pub fn update_flash(&mut self, now: Instant, interval: Duration) -> bool {
        if now.saturating_duration_since(self.last_flash) >= interval {
            self.flash_on = !self.flash_on;
            self.last_flash = now;
            true
        } else {
            false
        }
    }

    /// One physics step: reflect on any axis sitting on or past a boundary,
    /// then advance by the velocity.
    ///
    /// Position is never clamped, so the window may sit up to one step
    /// outside the bounds before it heads back in.
    pub fn step(&mut self, bounds: ScreenBounds) {
        self.velocity = reflect(self.position, self.velocity, bounds.max_position());
        self.position += self.velocity;
    }
}

/// Negate each velocity axis that points out through the boundary it sits
/// on or past: `<= 0` moving negative, or `>= max` moving positive
///
/// An axis already heading back inside is left alone.
pub fn reflect(position: DVec2, velocity: DVec2, max: DVec2) -> DVec2 {
    let flip = |p: f64, v: f64, limit: f64| {
        if (p <= 0.0 && v < 0.0) || (p >= limit && v > 0.0) {
            -v
        } else {
            v
        }
    };
    DVec2::new(
        flip(position.x, velocity.x, max.x),
        flip(position.y, velocity.y, max.y),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn bounds() -> ScreenBounds {
        ScreenBounds::new(DVec2::new(1920.0, 1080.0), DVec2::new(300.0, 300.0))
    }

    fn state_at(position: DVec2, velocity: DVec2) -> WorkerState {
        WorkerState {
            position,
            velocity,
            flash_on: false,
            last_flash: Instant::now(),
        }
    }

    #[test]
    fn test_max_position() {
        assert_eq!(bounds().max_position(), DVec2::new(1620.0, 780.0));

        // Window larger than monitor pins to the origin
        let tiny = ScreenBounds::new(DVec2::new(200.0, 200.0), DVec2::new(300.0, 300.0));
        assert_eq!(tiny.max_position(), DVec2::ZERO);
    }

    #[test]
    fn test_random_state_within_ranges() {
        let mut rng = StdRng::seed_from_u64(7);
        let now = Instant::now();

        for _ in 0..500 {
            let state = WorkerState::random(&mut rng, bounds(), 2.0, now);
            let max = bounds().max_position();

            assert!(state.position.x >= 0.0 && state.position.x <= max.x);
            assert!(state.position.y >= 0.0 && state.position.y <= max.y);
            assert!(state.velocity.x >= -2.0 && state.velocity.x < 2.0);
            assert!(state.velocity.y >= -2.0 && state.velocity.y < 2.0);
            assert!(!state.flash_on);
            assert_eq!(state.last_flash, now);
        }
    }

    #[test]
    fn test_random_state_zero_speed() {
        let mut rng = StdRng::seed_from_u64(1);
        let state = WorkerState::random(&mut rng, bounds(), 0.0, Instant::now());
        assert_eq!(state.velocity, DVec2::ZERO);
    }

    #[test]
    fn test_corner_reflection_does_not_clamp() {
        let mut state = state_at(DVec2::ZERO, DVec2::new(-1.0, -1.0));
        state.step(bounds());

        assert_eq!(state.velocity, DVec2::new(1.0, 1.0));
        assert_eq!(state.position, DVec2::new(1.0, 1.0));
    }

    #[test]
    fn test_far_edge_reflection() {
        let max = bounds().max_position();
        let mut state = state_at(DVec2::new(max.x, 400.0), DVec2::new(1.5, 0.5));
        state.step(bounds());

        assert_eq!(state.velocity, DVec2::new(-1.5, 0.5));
        assert_eq!(state.position, DVec2::new(max.x - 1.5, 400.5));
    }

    #[test]
    fn test_inward_velocity_on_near_edge_is_kept() {
        let mut state = state_at(DVec2::new(0.0, 400.0), DVec2::new(1.0, 0.0));
        state.step(bounds());

        assert_eq!(state.velocity, DVec2::new(1.0, 0.0));
        assert_eq!(state.position, DVec2::new(1.0, 400.0));
    }

    #[test]
    fn test_inward_velocity_on_far_edge_is_kept() {
        let max = bounds().max_position();
        let mut state = state_at(DVec2::new(max.x, max.y), DVec2::new(-1.0, -0.5));
        state.step(bounds());

        assert_eq!(state.velocity, DVec2::new(-1.0, -0.5));
        assert_eq!(state.position, DVec2::new(max.x - 1.0, max.y - 0.5));
    }

    #[test]
    fn test_window_leaves_the_wall_it_starts_on() {
        let mut state = state_at(DVec2::new(0.0, 400.0), DVec2::new(1.0, 0.0));
        for _ in 0..8 {
            state.step(bounds());
        }

        assert_eq!(state.velocity.x, 1.0);
        assert_eq!(state.position.x, 8.0);
    }

    #[test]
    fn test_overshoot_is_not_clamped() {
        // Interior position lands past the edge; reflection happens next step
        let mut state = state_at(DVec2::new(0.5, 100.0), DVec2::new(-1.25, 0.0));
        state.step(bounds());
        assert_eq!(state.position.x, -0.75);
        assert_eq!(state.velocity.x, -1.25);

        state.step(bounds());
        assert_eq!(state.velocity.x, 1.25);
        assert_eq!(state.position.x, 0.5);
    }

    #[test]
    fn test_speed_invariant_across_reflections() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut state = WorkerState::random(&mut rng, bounds(), 2.0, Instant::now());
        let speed = state.velocity.abs();

        for _ in 0..20_000 {
            state.step(bounds());
            assert_eq!(state.velocity.abs(), speed);
        }
    }

    #[test]
    fn test_velocity_points_inward_after_reflection() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut state = WorkerState::random(&mut rng, bounds(), 2.0, Instant::now());
        let max = bounds().max_position();
        let speed = state.velocity.abs();

        for _ in 0..20_000 {
            let position = state.position;
            let before = state.velocity;
            state.step(bounds());

            if state.velocity.x != before.x {
                if position.x <= 0.0 {
                    assert!(state.velocity.x > 0.0);
                } else {
                    assert!(position.x >= max.x && state.velocity.x < 0.0);
                }
            }
            if state.velocity.y != before.y {
                if position.y <= 0.0 {
                    assert!(state.velocity.y > 0.0);
                } else {
                    assert!(position.y >= max.y && state.velocity.y < 0.0);
                }
            }

            // At most one step outside the bounds
            assert!(state.position.x >= -speed.x && state.position.x <= max.x + speed.x);
            assert!(state.position.y >= -speed.y && state.position.y <= max.y + speed.y);
        }
    }

    #[test]
    fn test_flash_toggles_once_per_interval() {
        let start = Instant::now();
        let interval = Duration::from_millis(300);
        let mut state = state_at(DVec2::ZERO, DVec2::ZERO);
        state.last_flash = start;

        assert!(!state.update_flash(start + Duration::from_millis(299), interval));
        assert!(state.update_flash(start + Duration::from_millis(300), interval));
        assert!(state.flash_on);
        assert_eq!(state.last_flash, start + Duration::from_millis(300));
    }

    #[test]
    fn test_late_tick_toggles_only_once() {
        let start = Instant::now();
        let interval = Duration::from_millis(300);
        let mut state = state_at(DVec2::ZERO, DVec2::ZERO);
        state.last_flash = start;

        // Three intervals elapsed, one toggle
        assert!(state.update_flash(start + Duration::from_millis(950), interval));
        assert!(state.flash_on);
        assert!(!state.update_flash(start + Duration::from_millis(951), interval));
        assert!(state.flash_on);
    }

    #[test]
    fn test_flash_count_under_steady_ticks() {
        let start = Instant::now();
        let interval = Duration::from_millis(300);
        let frame = Duration::from_micros(16_667);
        let mut state = state_at(DVec2::ZERO, DVec2::ZERO);
        state.last_flash = start;

        // 30 seconds at 60 Hz
        let mut toggles = 0;
        for tick in 1..=1800u32 {
            if state.update_flash(start + frame * tick, interval) {
                toggles += 1;
            }
        }

        // Each toggle waits for the first frame at or past the interval (~18 frames),
        // so the count is close to T / interval rounded down by frame quantization.
        let frames_per_toggle = (interval.as_secs_f64() / frame.as_secs_f64()).ceil();
        let expected = (1800.0 / frames_per_toggle).floor() as i32;
        assert!((toggles - expected).abs() <= 1, "toggles={toggles} expected={expected}");
    }
}
