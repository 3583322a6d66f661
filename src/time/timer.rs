#[cfg(test)]
use std::cell::Cell;
#[cfg(test)]
use std::rc::Rc;

/// Source of wall-clock milliseconds.
pub trait Clock {
    fn now(&self) -> u128;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> u128 {
        crate::now!()
    }
}

/// Clock which only moves when told to. Clones share the same time.
#[cfg(test)]
#[derive(Debug, Default, Clone)]
pub struct ManualClock {
    millis: Rc<Cell<u128>>,
}

#[cfg(test)]
impl ManualClock {
    pub fn at(millis: u128) -> Self {
        Self {
            millis: Rc::new(Cell::new(millis)),
        }
    }

    pub fn advance(&self, millis: u128) {
        self.millis.set(self.millis.get() + millis);
    }

    pub fn set(&self, millis: u128) {
        self.millis.set(millis);
    }
}

#[cfg(test)]
impl Clock for ManualClock {
    fn now(&self) -> u128 {
        self.millis.get()
    }
}

/// Measures the time between a start point and now for one suite or spec.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Timer {
    start_time: Option<u128>,
}

impl Timer {
    pub const NOT_STARTED: i64 = -1;

    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn start(self) -> Self {
        self.start_with(&SystemClock)
    }

    pub fn start_with(mut self, clock: &dyn Clock) -> Self {
        self.start_time = Some(clock.now());
        self
    }

    #[inline]
    pub fn elapsed(&self) -> i64 {
        self.elapsed_with(&SystemClock)
    }

    /// Milliseconds since `start`, or [`Timer::NOT_STARTED`] if the timer was never started.
    pub fn elapsed_with(&self, clock: &dyn Clock) -> i64 {
        match self.start_time {
            Some(start) => clock.now().saturating_sub(start) as i64,
            None => Self::NOT_STARTED,
        }
    }

    pub fn is_started(&self) -> bool {
        self.start_time.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elapsed_of_not_started_timer() {
        let timer = Timer::new();

        assert!(!timer.is_started());
        assert_eq!(timer.elapsed(), -1);
        assert_eq!(timer.elapsed_with(&ManualClock::at(500)), -1);
    }

    #[test]
    fn test_elapsed_follows_clock() {
        let clock = ManualClock::at(1_000);
        let timer = Timer::new().start_with(&clock);
        assert_eq!(timer.elapsed_with(&clock), 0);

        clock.advance(250);
        assert_eq!(timer.elapsed_with(&clock), 250);

        clock.advance(5);
        assert_eq!(timer.elapsed_with(&clock), 255);
    }

    #[test]
    fn test_clock_moved_backwards_never_goes_negative() {
        let clock = ManualClock::at(1_000);
        let timer = Timer::new().start_with(&clock);
        clock.set(900);

        assert_eq!(timer.elapsed_with(&clock), 0);
    }

    #[test]
    fn test_system_timer_is_non_negative() {
        let timer = Timer::new().start();

        assert!(timer.is_started());
        assert!(timer.elapsed() >= 0);
    }

    #[test]
    fn test_manual_clock_clones_share_time() {
        let clock = ManualClock::default();
        let other = clock.clone();
        other.advance(42);

        assert_eq!(clock.now(), 42);
    }
}
