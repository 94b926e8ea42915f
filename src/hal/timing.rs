//! Bounded hardware waits
//!
//! Every synchronization point in bring-up (LP-11, PHTW acknowledge,
//! calibration ready, power-on-reset, stop state) goes through
//! [`wait_until`], so no sequence can block forever.

use embedded_hal::delay::DelayNs;

use crate::error::{Result, WaitPoint};

/// Attempt budget and inter-attempt sleep for one wait point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PollConfig {
    /// Number of times the condition is evaluated
    pub attempts: u32,
    /// Sleep after a failed evaluation, in microseconds
    pub interval_min_us: u32,
    /// Longest acceptable sleep; the gate never sleeps longer than this
    pub interval_max_us: u32,
}

impl PollConfig {
    /// Create a poll budget
    pub const fn new(attempts: u32, interval_min_us: u32, interval_max_us: u32) -> Self {
        Self {
            attempts,
            interval_min_us,
            interval_max_us,
        }
    }

    /// Worst-case time spent sleeping before a timeout is reported
    pub const fn max_wait_us(&self) -> u64 {
        self.attempts as u64 * self.interval_max_us as u64
    }

    fn sleep_us(&self) -> u32 {
        self.interval_min_us.min(self.interval_max_us)
    }
}

/// Evaluate `ready` until it returns `true` or the budget is exhausted.
///
/// The condition is checked first, so an already-ready device costs no
/// sleep. On exhaustion returns [`Error::Timeout`](crate::Error::Timeout)
/// carrying `point`.
pub fn wait_until<D, F>(delay: &mut D, poll: PollConfig, point: WaitPoint, mut ready: F) -> Result<()>
where
    D: DelayNs,
    F: FnMut() -> bool,
{
    for _ in 0..poll.attempts {
        if ready() {
            return Ok(());
        }
        delay.delay_us(poll.sleep_us());
    }

    Err(point.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::test_utils::MockDelay;

    const POLL: PollConfig = PollConfig::new(10, 1_000, 2_000);

    #[test]
    fn ready_immediately_does_not_sleep() {
        let mut delay = MockDelay::new();
        let result = wait_until(&mut delay, POLL, WaitPoint::Lp11, || true);

        assert!(result.is_ok());
        assert_eq!(delay.total_ns(), 0);
    }

    #[test]
    fn ready_after_some_attempts() {
        let mut delay = MockDelay::new();
        let mut calls = 0;
        let result = wait_until(&mut delay, POLL, WaitPoint::Lp11, || {
            calls += 1;
            calls == 4
        });

        assert!(result.is_ok());
        assert_eq!(calls, 4);
        assert_eq!(delay.total_us(), 3_000);
    }

    #[test]
    fn never_ready_times_out_with_wait_point() {
        let mut delay = MockDelay::new();
        let mut calls = 0;
        let result = wait_until(&mut delay, POLL, WaitPoint::Calibration, || {
            calls += 1;
            false
        });

        assert_eq!(result, Err(Error::Timeout(WaitPoint::Calibration)));
        assert_eq!(calls, 10);
        assert!(delay.total_us() <= POLL.max_wait_us());
    }

    #[test]
    fn zero_attempts_times_out_without_evaluating() {
        let mut delay = MockDelay::new();
        let poll = PollConfig::new(0, 1_000, 2_000);
        let result = wait_until(&mut delay, poll, WaitPoint::StopState, || true);
        assert_eq!(result, Err(Error::Timeout(WaitPoint::StopState)));
    }
}
