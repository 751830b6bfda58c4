use std::time::Duration;

use lumen_motion::{AnimationClock, MonotonicTime, TimeSource};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameTime {
    /// Seconds since the clock started. Never reset, never decreasing.
    pub elapsed: f64,

    /// Seconds since the previous tick, clamped.
    pub dt: f32,

    /// Frame counter, starting at 0.
    pub frame_index: u64,
}

/// Per-window frame clock built on an [`AnimationClock`].
///
/// `elapsed` is reported unclamped so periodic animation stays phase-correct
/// after a stall; only `dt` is clamped.
#[derive(Debug, Clone)]
pub struct FrameClock<S: TimeSource = MonotonicTime> {
    clock: AnimationClock<S>,
    last_elapsed: Duration,
    frame_index: u64,
    dt_min: Duration,
    dt_max: Duration,
}

impl FrameClock<MonotonicTime> {
    /// Starts a clock with default clamps (0.1 ms .. 250 ms).
    pub fn new() -> Self {
        Self::with_source(MonotonicTime)
    }
}

impl Default for FrameClock<MonotonicTime> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: TimeSource> FrameClock<S> {
    pub fn with_source(source: S) -> Self {
        Self::with_clamps(source, Duration::from_micros(100), Duration::from_millis(250))
    }

    pub fn with_clamps(source: S, dt_min: Duration, dt_max: Duration) -> Self {
        debug_assert!(dt_min <= dt_max);
        Self {
            clock: AnimationClock::start_with(source),
            last_elapsed: Duration::ZERO,
            frame_index: 0,
            dt_min,
            dt_max,
        }
    }

    /// Elapsed time of the last tick, without advancing.
    pub fn elapsed(&self) -> f64 {
        self.clock.elapsed_duration().as_secs_f64()
    }

    /// Advances the clock and returns a new `FrameTime`.
    pub fn tick(&mut self) -> FrameTime {
        let elapsed = self.clock.elapsed();
        let now = self.clock.elapsed_duration();

        let dt = now
            .saturating_sub(self.last_elapsed)
            .clamp(self.dt_min, self.dt_max);
        self.last_elapsed = now;

        let ft = FrameTime {
            elapsed,
            dt: dt.as_secs_f32(),
            frame_index: self.frame_index,
        };

        self.frame_index = self.frame_index.wrapping_add(1);
        ft
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_motion::ManualTime;

    #[test]
    fn first_tick_reports_zero_elapsed_and_min_dt() {
        let time = ManualTime::new();
        let mut clock = FrameClock::with_source(time);
        let ft = clock.tick();
        assert_eq!(ft.elapsed, 0.0);
        assert_eq!(ft.frame_index, 0);
        assert!((ft.dt - 0.0001).abs() < 1e-6);
    }

    #[test]
    fn frame_index_increments() {
        let mut clock = FrameClock::with_source(ManualTime::new());
        assert_eq!(clock.tick().frame_index, 0);
        assert_eq!(clock.tick().frame_index, 1);
        assert_eq!(clock.tick().frame_index, 2);
    }

    #[test]
    fn stall_clamps_dt_but_not_elapsed() {
        let time = ManualTime::new();
        let mut clock = FrameClock::with_source(time.clone());
        clock.tick();

        time.advance_secs(3.0);
        let ft = clock.tick();

        assert!((ft.dt - 0.25).abs() < 1e-6);
        assert!((ft.elapsed - 3.0).abs() < 1e-9);
        assert_eq!(clock.elapsed(), ft.elapsed);
    }

    #[test]
    fn regular_frames_report_true_dt() {
        let time = ManualTime::new();
        let mut clock = FrameClock::with_source(time.clone());
        clock.tick();

        time.advance(Duration::from_millis(16));
        let ft = clock.tick();
        assert!((ft.dt - 0.016).abs() < 1e-6);
    }
}
