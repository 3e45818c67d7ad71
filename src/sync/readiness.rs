//! Bounded predicate polling.

use std::num::NonZeroU32;
use std::time::Duration;

/// One render-frame at 60 Hz: the natural recheck cadence for "has that
/// node appeared yet".
pub const FRAME: Duration = Duration::from_millis(16);

/// Default evaluation budget (~4 s at frame cadence).
const DEFAULT_MAX_ATTEMPTS: u32 = 256;

/// Outcome of a readiness wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    /// The predicate held.
    Ready,
    /// The attempt budget ran out before the predicate held.
    GaveUp,
}

/// Recheck cadence and budget for [`await_ready`].
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Pause between evaluations.
    pub interval: Duration,
    /// Total evaluation budget. `None` polls until the predicate holds.
    pub max_attempts: Option<NonZeroU32>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            interval: FRAME,
            max_attempts: NonZeroU32::new(DEFAULT_MAX_ATTEMPTS),
        }
    }
}

impl RetryPolicy {
    /// Bounded policy with an explicit budget.
    pub fn bounded(interval: Duration, max_attempts: NonZeroU32) -> Self {
        Self {
            interval,
            max_attempts: Some(max_attempts),
        }
    }

    /// Poll forever. Only for dependencies guaranteed to appear.
    pub fn unbounded(interval: Duration) -> Self {
        Self {
            interval,
            max_attempts: None,
        }
    }
}

/// Re-evaluate `predicate` on the policy's cadence until it holds or the
/// budget is spent.
///
/// The first evaluation happens immediately; an already-satisfied predicate
/// never yields to the scheduler. Gives up cleanly - no panic, no leaked
/// timer.
pub async fn await_ready(mut predicate: impl FnMut() -> bool, policy: RetryPolicy) -> Readiness {
    let mut attempts: u32 = 0;
    loop {
        if predicate() {
            return Readiness::Ready;
        }
        attempts += 1;
        if let Some(max) = policy.max_attempts
            && attempts >= max.get()
        {
            return Readiness::GaveUp;
        }
        tokio::time::sleep(policy.interval).await;
    }
}
