//! Fixed-rate tick scheduling
//!
//! Deadlines advance by exactly one period. A tick that overruns by more
//! than a period skips the missed deadlines instead of replaying them.

use std::thread;
use std::time::{Duration, Instant};

pub struct FixedTicker {
    period: Duration,
    next: Instant,
    pub ticks: u64,
    pub skipped: u64,
}

impl FixedTicker {
    pub fn new(period: Duration) -> Self {
        Self::starting_at(period, Instant::now())
    }

    pub fn starting_at(period: Duration, start: Instant) -> Self {
        Self {
            period,
            next: start + period,
            ticks: 0,
            skipped: 0,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Returns the remaining wait while the next deadline is ahead of `now`,
    /// or `None` once a due deadline has been consumed.
    pub fn poll(&mut self, now: Instant) -> Option<Duration> {
        if now < self.next {
            return Some(self.next - now);
        }
        let late = now - self.next;
        let missed = (late.as_nanos() / self.period.as_nanos().max(1)) as u64;
        if missed > 0 {
            self.skipped += missed;
            log::debug!("Tick overran, skipping {} deadline(s)", missed);
        }
        self.next += self.period * (missed as u32 + 1);
        self.ticks += 1;
        None
    }

    /// Block until the next deadline
    pub fn wait(&mut self) {
        while let Some(wait) = self.poll(Instant::now()) {
            thread::sleep(wait);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PERIOD: Duration = Duration::from_millis(16);

    #[test]
    fn test_waits_for_deadline() {
        let start = Instant::now();
        let mut ticker = FixedTicker::starting_at(PERIOD, start);
        assert_eq!(ticker.period(), PERIOD);
        assert_eq!(ticker.poll(start), Some(PERIOD));
        assert_eq!(ticker.poll(start + PERIOD), None);
        assert_eq!(ticker.ticks, 1);
        assert!(ticker.poll(start + PERIOD).is_some());
    }

    #[test]
    fn test_overrun_skips_instead_of_queueing() {
        let start = Instant::now();
        let mut ticker = FixedTicker::starting_at(PERIOD, start);
        // Wake up 3.5 periods late: one tick runs, the rest are dropped
        assert_eq!(ticker.poll(start + PERIOD * 4 + PERIOD / 2), None);
        assert_eq!(ticker.skipped, 3);
        assert!(ticker.poll(start + PERIOD * 4 + PERIOD / 2).is_some());
        assert_eq!(ticker.poll(start + PERIOD * 5), None);
        assert_eq!(ticker.ticks, 2);
    }
}
