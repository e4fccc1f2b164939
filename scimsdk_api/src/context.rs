//! Caller-supplied cancellation context threaded through every request.

use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::TransportError;

/// Deadline and cancellation signal for one or more API calls.
///
/// Cloning a context shares its cancellation token, so cancelling any clone
/// cancels them all. A context with neither a deadline nor a cancelled token
/// never interrupts a request.
#[derive(Clone, Debug, Default)]
pub struct Context {
    deadline: Option<Instant>,
    token: CancellationToken,
}

impl Context {
    /// A context that is never cancelled and has no deadline.
    pub fn background() -> Self {
        Self::default()
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self::with_deadline(Instant::now() + timeout)
    }

    pub fn with_deadline(deadline: Instant) -> Self {
        Self {
            deadline: Some(deadline),
            token: CancellationToken::new(),
        }
    }

    /// Builds a context that is cancelled through the given token.
    pub fn with_cancellation(token: CancellationToken) -> Self {
        Self {
            deadline: None,
            token,
        }
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// The reason this context is done, or `None` while it is still live.
    ///
    /// Cancellation reports the same error as an expired deadline.
    pub fn err(&self) -> Option<TransportError> {
        let expired = self
            .deadline
            .is_some_and(|deadline| Instant::now() >= deadline);
        if self.token.is_cancelled() || expired {
            return Some(TransportError::DeadlineExceeded);
        }
        None
    }

    /// Resolves once the context is cancelled or its deadline passes.
    pub async fn done(&self) -> TransportError {
        match self.deadline {
            Some(deadline) => tokio::select! {
                _ = self.token.cancelled() => {}
                _ = tokio::time::sleep_until(deadline) => {}
            },
            None => self.token.cancelled().await,
        }
        TransportError::DeadlineExceeded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn background_is_live() {
        assert!(Context::background().err().is_none());
    }

    #[tokio::test]
    async fn zero_timeout_is_already_expired() {
        let ctx = Context::with_timeout(Duration::ZERO);
        assert!(matches!(ctx.err(), Some(TransportError::DeadlineExceeded)));
    }

    #[test]
    fn cancel_is_shared_between_clones() {
        let ctx = Context::background();
        let clone = ctx.clone();
        clone.cancel();
        assert!(matches!(ctx.err(), Some(TransportError::DeadlineExceeded)));
    }

    #[tokio::test]
    async fn cancel_reads_as_deadline_exceeded() {
        let ctx = Context::with_timeout(Duration::from_secs(60));
        ctx.cancel();
        assert_eq!(ctx.done().await.to_string(), "context deadline exceeded");
    }

    #[tokio::test(start_paused = true)]
    async fn done_fires_at_deadline() {
        let ctx = Context::with_timeout(Duration::from_secs(5));
        assert!(ctx.err().is_none());
        let reason = ctx.done().await;
        assert!(matches!(reason, TransportError::DeadlineExceeded));
        assert!(ctx.err().is_some());
    }
}
