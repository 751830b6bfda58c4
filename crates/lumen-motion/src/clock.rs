use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Source of monotonic timestamps.
pub trait TimeSource {
    fn now(&self) -> Instant;
}

/// Default source backed by `Instant::now`.
#[derive(Debug, Copy, Clone, Default)]
pub struct MonotonicTime;

impl TimeSource for MonotonicTime {
    #[inline]
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Hand-driven time source for simulations and tests.
///
/// Clones share the same offset, so a handle kept outside the clock can
/// advance time seen by the clock.
#[derive(Debug, Clone)]
pub struct ManualTime {
    base: Instant,
    offset: Rc<Cell<Duration>>,
}

impl ManualTime {
    pub fn new() -> Self {
        Self {
            base: Instant::now(),
            offset: Rc::new(Cell::new(Duration::ZERO)),
        }
    }

    /// Moves time forward by `by`.
    pub fn advance(&self, by: Duration) {
        self.offset.set(self.offset.get() + by);
    }

    /// Moves time forward by `secs` seconds.
    pub fn advance_secs(&self, secs: f64) {
        self.advance(Duration::from_secs_f64(secs.max(0.0)));
    }

    /// Rewinds the offset. Clocks reading this source must not go backward.
    pub fn rewind(&self, by: Duration) {
        self.offset.set(self.offset.get().saturating_sub(by));
    }
}

impl Default for ManualTime {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for ManualTime {
    #[inline]
    fn now(&self) -> Instant {
        self.base + self.offset.get()
    }
}

/// Elapsed-time clock for periodic animation.
///
/// The origin is captured once by `start` and never reset. Each call to
/// [`elapsed`](Self::elapsed) samples the source and records the sample, so
/// the reported value is non-decreasing even if the source misbehaves.
#[derive(Debug, Clone)]
pub struct AnimationClock<S: TimeSource = MonotonicTime> {
    source: S,
    origin: Instant,
    now: Instant,
}

impl AnimationClock<MonotonicTime> {
    /// Starts a clock on the process monotonic time source.
    pub fn start() -> Self {
        Self::start_with(MonotonicTime)
    }
}

impl Default for AnimationClock<MonotonicTime> {
    fn default() -> Self {
        Self::start()
    }
}

impl<S: TimeSource> AnimationClock<S> {
    /// Starts a clock on a caller-provided time source.
    pub fn start_with(source: S) -> Self {
        let origin = source.now();
        Self {
            source,
            origin,
            now: origin,
        }
    }

    /// Samples the time source and returns seconds since the origin.
    pub fn elapsed(&mut self) -> f64 {
        let sampled = self.source.now();
        if sampled > self.now {
            self.now = sampled;
        }
        self.elapsed_duration().as_secs_f64()
    }

    /// Time since the origin as of the last sample, without resampling.
    #[inline]
    pub fn elapsed_duration(&self) -> Duration {
        self.now.saturating_duration_since(self.origin)
    }

    /// Instant captured by `start`.
    #[inline]
    pub fn origin(&self) -> Instant {
        self.origin
    }

    /// Instant of the last sample.
    #[inline]
    pub fn now(&self) -> Instant {
        self.now
    }
}
