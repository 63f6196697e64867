//! Auto-advance timer
//!
//! Two states: `Idle` (nothing scheduled) and `Running` (next tick due at a fixed
//! instant). The clock is injected so tests can move time by hand.

use std::time::{Duration, Instant};

pub trait Clock {
    fn now(&self) -> Instant;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerState {
    Idle,
    Running { next_due: Instant },
}

#[derive(Debug)]
pub struct AutoAdvance {
    period: Duration,
    state: TimerState,
}

impl AutoAdvance {
    pub fn new(period: Duration) -> Self {
        Self { period, state: TimerState::Idle }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    #[cfg(test)]
    pub fn is_running(&self) -> bool {
        matches!(self.state, TimerState::Running { .. })
    }

    pub fn start(&mut self, now: Instant) {
        self.state = TimerState::Running { next_due: now + self.period };
    }

    pub fn stop(&mut self) {
        self.state = TimerState::Idle;
    }

    /// Stop-then-start. Safe to call in any state; never leaves two schedules alive.
    pub fn restart(&mut self, now: Instant) {
        self.stop();
        self.start(now);
    }

    /// Returns true when a tick is due. Fires at most once per call and reschedules a
    /// full period from `now`, so a stalled frame loop never replays missed ticks.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.state {
            TimerState::Running { next_due } if now >= next_due => {
                self.state = TimerState::Running { next_due: now + self.period };
                true
            }
            _ => false,
        }
    }

    pub fn time_until_next(&self, now: Instant) -> Option<Duration> {
        match self.state {
            TimerState::Running { next_due } => Some(next_due.saturating_duration_since(now)),
            TimerState::Idle => None,
        }
    }
}

/// Hand-driven clock for tests. Clones share the same time.
#[cfg(test)]
#[derive(Debug, Clone)]
pub struct ManualClock {
    origin: Instant,
    offset: std::rc::Rc<std::cell::Cell<Duration>>,
}

#[cfg(test)]
impl ManualClock {
    pub fn new() -> Self {
        Self { origin: Instant::now(), offset: Default::default() }
    }

    pub fn advance(&self, by: Duration) {
        self.offset.set(self.offset.get() + by);
    }
}

#[cfg(test)]
impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.origin + self.offset.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PERIOD: Duration = Duration::from_millis(5000);

    #[test]
    fn idle_never_fires() {
        let clock = ManualClock::new();
        let mut timer = AutoAdvance::new(PERIOD);
        clock.advance(PERIOD * 3);
        assert!(!timer.poll(clock.now()));
        assert_eq!(timer.time_until_next(clock.now()), None);
    }

    #[test]
    fn fires_once_per_period() {
        let clock = ManualClock::new();
        let mut timer = AutoAdvance::new(PERIOD);
        timer.start(clock.now());

        clock.advance(PERIOD - Duration::from_millis(1));
        assert!(!timer.poll(clock.now()));
        clock.advance(Duration::from_millis(1));
        assert!(timer.poll(clock.now()));
        assert!(!timer.poll(clock.now()));

        clock.advance(PERIOD);
        assert!(timer.poll(clock.now()));
    }

    #[test]
    fn long_stall_fires_once() {
        let clock = ManualClock::new();
        let mut timer = AutoAdvance::new(PERIOD);
        timer.start(clock.now());
        clock.advance(PERIOD * 4);
        assert!(timer.poll(clock.now()));
        assert!(!timer.poll(clock.now()));
        assert_eq!(timer.time_until_next(clock.now()), Some(PERIOD));
    }

    #[test]
    fn restart_resets_elapsed_time() {
        let clock = ManualClock::new();
        let mut timer = AutoAdvance::new(PERIOD);
        timer.start(clock.now());
        clock.advance(Duration::from_millis(4000));
        timer.restart(clock.now());

        clock.advance(Duration::from_millis(4999));
        assert!(!timer.poll(clock.now()));
        clock.advance(Duration::from_millis(1));
        assert!(timer.poll(clock.now()));
    }

    #[test]
    fn stop_cancels() {
        let clock = ManualClock::new();
        let mut timer = AutoAdvance::new(PERIOD);
        timer.start(clock.now());
        timer.stop();
        timer.stop();
        assert!(!timer.is_running());
        clock.advance(PERIOD * 2);
        assert!(!timer.poll(clock.now()));
    }
}
