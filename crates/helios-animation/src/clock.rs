//! Shared elapsed-time source for clock-driven rotation.

use std::time::Instant;

/// Seconds since some fixed origin. Read once per tick.
pub trait Clock {
    fn elapsed(&self) -> f32;
}

/// Wall-clock time since construction.
#[derive(Clone, Copy, Debug)]
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn elapsed(&self) -> f32 {
        self.start.elapsed().as_secs_f32()
    }
}

/// A clock that only moves when told to.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ManualClock {
    elapsed: f32,
}

impl ManualClock {
    pub fn new(elapsed: f32) -> Self {
        Self { elapsed }
    }

    pub fn advance(&mut self, seconds: f32) {
        self.elapsed += seconds;
    }

    pub fn set(&mut self, elapsed: f32) {
        self.elapsed = elapsed;
    }
}

impl Clock for ManualClock {
    fn elapsed(&self) -> f32 {
        self.elapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_is_frozen_until_advanced() {
        let mut clock = ManualClock::new(2.0);
        assert_eq!(clock.elapsed(), 2.0);
        assert_eq!(clock.elapsed(), 2.0);
        clock.advance(0.5);
        assert_eq!(clock.elapsed(), 2.5);
        clock.set(0.0);
        assert_eq!(clock.elapsed(), 0.0);
    }

    #[test]
    fn test_system_clock_is_monotonic() {
        let clock = SystemClock::new();
        let a = clock.elapsed();
        let b = clock.elapsed();
        assert!(b >= a);
        assert!(a >= 0.0);
    }
}
