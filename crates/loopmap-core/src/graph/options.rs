/// Cancellation and deadline controls for cycle enumeration.
///
/// Enumeration is exponential in the worst case, so callers that cannot
/// afford an unbounded run pass an [`EnumerateOptions`] to
/// [`super::enumerate_cycles_with`]. When a run is interrupted every cycle
/// found so far is discarded; callers never observe a partial prefix of the
/// canonical ordering.
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// How many search steps pass between two clock reads.
const DEADLINE_POLL_INTERVAL: u32 = 1024;

/// A cloneable flag that asks a running enumeration to stop.
///
/// All clones share the same flag; cancelling any clone cancels them all.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Creates a token in the not-cancelled state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Returns `true` once [`CancelToken::cancel`] has been called.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Optional limits applied to an enumeration run.
///
/// The default value imposes no limits.
#[derive(Debug, Clone, Default)]
pub struct EnumerateOptions {
    /// Abort once this instant has passed.
    pub deadline: Option<Instant>,
    /// Abort once this token is cancelled.
    pub cancel: Option<CancelToken>,
}

impl EnumerateOptions {
    /// Sets a deadline `timeout` from now.
    #[must_use]
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// Sets an absolute deadline.
    #[must_use]
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Attaches a cancellation token.
    #[must_use]
    pub fn with_cancel(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }
}

/// Reasons an enumeration run stopped before completing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum EnumerateError {
    /// The attached [`CancelToken`] was cancelled.
    #[error("cycle enumeration was cancelled")]
    Cancelled,
    /// The configured deadline passed.
    #[error("cycle enumeration exceeded its deadline")]
    DeadlineExceeded,
}

/// Per-search poller built from [`EnumerateOptions`].
///
/// Each search owns its own interrupt so the step counter needs no
/// synchronisation; the token itself is shared.
#[derive(Debug)]
pub(crate) struct Interrupt<'a> {
    options: &'a EnumerateOptions,
    steps: u32,
}

impl<'a> Interrupt<'a> {
    pub(crate) fn new(options: &'a EnumerateOptions) -> Self {
        Self { options, steps: 0 }
    }

    /// Checks the token every call and the clock every
    /// [`DEADLINE_POLL_INTERVAL`] calls.
    pub(crate) fn check(&mut self) -> Result<(), EnumerateError> {
        if let Some(token) = &self.options.cancel {
            if token.is_cancelled() {
                return Err(EnumerateError::Cancelled);
            }
        }
        if let Some(deadline) = self.options.deadline {
            if self.steps == 0 && Instant::now() >= deadline {
                return Err(EnumerateError::DeadlineExceeded);
            }
            self.steps = (self.steps + 1) % DEADLINE_POLL_INTERVAL;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_cancellation() {
        let token = CancelToken::new();
        let clone = token.clone();
        assert!(!clone.is_cancelled());
        token.cancel();
        assert!(clone.is_cancelled());
    }

    #[test]
    fn default_options_never_interrupt() {
        let options = EnumerateOptions::default();
        let mut interrupt = Interrupt::new(&options);
        for _ in 0..5000 {
            assert_eq!(interrupt.check(), Ok(()));
        }
    }

    #[test]
    fn past_deadline_interrupts_on_first_check() {
        let options = EnumerateOptions::default().with_deadline(Instant::now());
        let mut interrupt = Interrupt::new(&options);
        assert_eq!(interrupt.check(), Err(EnumerateError::DeadlineExceeded));
    }

    #[test]
    fn cancelled_token_wins_over_deadline() {
        let token = CancelToken::new();
        token.cancel();
        let options = EnumerateOptions::default()
            .with_deadline(Instant::now())
            .with_cancel(token);
        let mut interrupt = Interrupt::new(&options);
        assert_eq!(interrupt.check(), Err(EnumerateError::Cancelled));
    }

    #[test]
    fn error_messages_are_distinct() {
        assert_ne!(
            EnumerateError::Cancelled.to_string(),
            EnumerateError::DeadlineExceeded.to_string()
        );
    }
}
