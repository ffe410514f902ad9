//! Session time accounting.
//!
//! The core never reads the wall clock. The driver samples a [`TimeProvider`]
//! through a [`FrameTimer`] and feeds the resulting frame delta into the
//! [`SessionClock`], which only accumulates while running.

use std::cell::Cell;
use std::time::Instant;

/// Abstraction over time sources.
pub trait TimeProvider {
    /// Current time in microseconds from an arbitrary epoch.
    fn now_us(&self) -> i64;
}

impl<T: TimeProvider + ?Sized> TimeProvider for &T {
    fn now_us(&self) -> i64 {
        (**self).now_us()
    }
}

/// Monotonic provider backed by `Instant`.
pub struct SystemTimeProvider {
    start: Instant,
}

impl SystemTimeProvider {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemTimeProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeProvider for SystemTimeProvider {
    fn now_us(&self) -> i64 {
        self.start.elapsed().as_micros() as i64
    }
}

/// Manually driven provider for deterministic tests.
#[derive(Default)]
pub struct MockTimeProvider {
    current_us: Cell<i64>,
}

impl MockTimeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_time(&self, us: i64) {
        self.current_us.set(us);
    }

    pub fn advance(&self, delta_us: i64) {
        self.current_us.set(self.current_us.get() + delta_us);
    }

    pub fn advance_ms(&self, delta_ms: f64) {
        self.advance((delta_ms * 1000.0) as i64);
    }
}

impl TimeProvider for MockTimeProvider {
    fn now_us(&self) -> i64 {
        self.current_us.get()
    }
}

/// Turns successive provider samples into frame deltas.
pub struct FrameTimer<P: TimeProvider> {
    provider: P,
    last_us: Option<i64>,
}

impl<P: TimeProvider> FrameTimer<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            last_us: None,
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Milliseconds since the previous sample. The first sample yields 0,
    /// and a provider going backwards yields 0.
    pub fn sample(&mut self) -> f64 {
        let now = self.provider.now_us();
        let dt = match self.last_us {
            Some(last) => (now - last).max(0) as f64 / 1000.0,
            None => 0.0,
        };
        self.last_us = Some(now);
        dt
    }
}

/// Elapsed session time excluding paused spans.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SessionClock {
    elapsed_ms: f64,
    running: bool,
}

impl SessionClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from zero.
    pub fn start(&mut self) {
        self.elapsed_ms = 0.0;
        self.running = true;
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    pub fn resume(&mut self) {
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.elapsed_ms = 0.0;
        self.running = false;
    }

    /// Accumulates a frame delta and returns the part actually applied.
    pub fn advance(&mut self, dt_ms: f64) -> f64 {
        if !self.running || !dt_ms.is_finite() || dt_ms <= 0.0 {
            return 0.0;
        }
        self.elapsed_ms += dt_ms;
        dt_ms
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_time_provider_advance() {
        let tp = MockTimeProvider::new();
        assert_eq!(tp.now_us(), 0);
        tp.advance(1_000_000);
        assert_eq!(tp.now_us(), 1_000_000);
        tp.advance_ms(1.5);
        assert_eq!(tp.now_us(), 1_001_500);
    }

    #[test]
    fn frame_timer_reports_deltas() {
        let mut timer = FrameTimer::new(MockTimeProvider::new());
        assert_eq!(timer.sample(), 0.0);

        timer.provider().advance(16_000);
        assert_eq!(timer.sample(), 16.0);

        timer.provider().set_time(0);
        assert_eq!(timer.sample(), 0.0);
    }

    #[test]
    fn pause_excludes_time() {
        let provider = MockTimeProvider::new();
        let mut timer = FrameTimer::new(&provider);
        let mut clock = SessionClock::new();
        clock.start();
        timer.sample();

        provider.advance_ms(1000.0);
        clock.advance(timer.sample());
        clock.pause();

        provider.advance_ms(5000.0);
        clock.advance(timer.sample());
        assert_eq!(clock.elapsed_ms(), 1000.0);

        clock.resume();
        provider.advance_ms(250.0);
        clock.advance(timer.sample());
        assert_eq!(clock.elapsed_ms(), 1250.0);
    }

    #[test]
    fn stopped_clock_ignores_deltas() {
        let mut clock = SessionClock::new();
        assert_eq!(clock.advance(10.0), 0.0);
        clock.start();
        assert_eq!(clock.advance(-3.0), 0.0);
        assert_eq!(clock.advance(10.0), 10.0);
        clock.stop();
        assert_eq!(clock.elapsed_ms(), 0.0);
    }
}
