//! Fixed-timestep frame clock.
//!
//! Simulation runs at a fixed 60 Hz regardless of how fast frames arrive.
//! An accumulator converts variable frame times into zero or more fixed
//! steps, and leftover time becomes an interpolation alpha for rendering.

use std::time::Instant;

use tracing::warn;

/// Fixed simulation timestep in seconds (60 Hz).
pub const FIXED_DT: f64 = 1.0 / 60.0;

/// Frame times above this are clamped so a long stall produces slowdown
/// instead of an unbounded burst of catch-up steps.
pub const MAX_FRAME_TIME: f64 = 0.25;

/// Accumulator-based frame clock.
///
/// Call [`tick`](Self::tick) once per frame. `update_fn(dt, sim_time)` runs
/// at the fixed rate; `render_fn(alpha)` runs once per frame with the
/// leftover fraction in `[0.0, 1.0)`.
pub struct FrameClock {
    previous: Instant,
    accumulator: f64,
    sim_time: f64,
    frames: u64,
    ticks: u64,
}

impl FrameClock {
    /// A clock starting from the current instant.
    pub fn new() -> Self {
        Self {
            previous: Instant::now(),
            accumulator: 0.0,
            sim_time: 0.0,
            frames: 0,
            ticks: 0,
        }
    }

    /// Run one frame against wall-clock time.
    pub fn tick(&mut self, update_fn: impl FnMut(f64, f64), render_fn: impl FnMut(f64)) {
        let now = Instant::now();
        let frame_time = now.duration_since(self.previous).as_secs_f64();
        self.previous = now;
        self.advance(frame_time, update_fn, render_fn);
    }

    /// Advance by an explicit frame time. Shared by [`tick`](Self::tick)
    /// and the tests.
    fn advance(
        &mut self,
        frame_time: f64,
        mut update_fn: impl FnMut(f64, f64),
        mut render_fn: impl FnMut(f64),
    ) {
        let frame_time = if frame_time > MAX_FRAME_TIME {
            warn!(
                "frame took {:.0}ms, clamping to {:.0}ms",
                frame_time * 1000.0,
                MAX_FRAME_TIME * 1000.0
            );
            MAX_FRAME_TIME
        } else {
            frame_time
        };

        self.accumulator += frame_time;

        while self.accumulator >= FIXED_DT {
            update_fn(FIXED_DT, self.sim_time);
            self.sim_time += FIXED_DT;
            self.accumulator -= FIXED_DT;
            self.ticks += 1;
        }

        render_fn(self.alpha());
        self.frames += 1;
    }

    /// Leftover accumulator as a fraction of one fixed step.
    pub fn alpha(&self) -> f64 {
        if self.accumulator > 0.0 {
            self.accumulator / FIXED_DT
        } else {
            0.0
        }
    }

    /// Frames rendered so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Fixed simulation steps executed so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Total simulated time in seconds.
    pub fn sim_time(&self) -> f64 {
        self.sim_time
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clock() -> FrameClock {
        FrameClock::new()
    }

    #[test]
    fn test_one_fixed_step_per_exact_frame() {
        let mut c = clock();
        let mut updates = 0u32;
        c.advance(FIXED_DT, |_, _| updates += 1, |_| {});
        assert_eq!(updates, 1);
        assert!(c.accumulator.abs() < 1e-12);
    }

    #[test]
    fn test_long_frame_runs_several_steps() {
        let mut c = clock();
        let mut updates = 0u32;
        c.advance(3.0 * FIXED_DT, |_, _| updates += 1, |_| {});
        assert_eq!(updates, 3);
        assert!((c.sim_time - 3.0 * FIXED_DT).abs() < 1e-12);
    }

    #[test]
    fn test_short_frame_renders_without_update() {
        let mut c = clock();
        let mut updates = 0u32;
        let mut rendered = false;
        c.advance(0.5 * FIXED_DT, |_, _| updates += 1, |_| rendered = true);
        assert_eq!(updates, 0);
        assert!(rendered);
    }

    #[test]
    fn test_alpha_is_leftover_fraction() {
        let mut c = clock();
        let mut alpha = 0.0;
        c.advance(0.25 * FIXED_DT, |_, _| {}, |a| alpha = a);
        assert!((alpha - 0.25).abs() < 1e-10);
        assert!((0.0..1.0).contains(&alpha));
    }

    #[test]
    fn test_stall_is_clamped() {
        let mut c = clock();
        let mut updates = 0u32;
        c.advance(2.0, |_, _| updates += 1, |_| {});
        let max = (MAX_FRAME_TIME / FIXED_DT).ceil() as u32;
        assert!(updates > 0);
        assert!(updates <= max, "expected at most {max} steps, got {updates}");
    }

    #[test]
    fn test_sim_time_tracks_tick_count() {
        let mut c = clock();
        for _ in 0..10 {
            c.advance(FIXED_DT * 1.7, |_, _| {}, |_| {});
        }
        let expected = c.ticks as f64 * FIXED_DT;
        assert!((c.sim_time - expected).abs() < 1e-10);
        assert_eq!(c.frames, 10);
    }

    #[test]
    fn test_zero_frame_time_is_a_noop_update() {
        let mut c = clock();
        let mut updates = 0u32;
        let mut alpha = 1.0;
        c.advance(0.0, |_, _| updates += 1, |a| alpha = a);
        assert_eq!(updates, 0);
        assert!(alpha.abs() < 1e-12);
    }

    #[test]
    fn test_identical_frame_sequences_are_deterministic() {
        let frame_times = [0.017, 0.015, 0.020, 0.016, 0.033, 0.008, 0.018];
        let mut a = clock();
        let mut b = clock();
        for &ft in &frame_times {
            a.advance(ft, |_, _| {}, |_| {});
            b.advance(ft, |_, _| {}, |_| {});
        }
        assert_eq!(a.ticks, b.ticks);
        assert!((a.sim_time - b.sim_time).abs() < 1e-15);
    }
}
