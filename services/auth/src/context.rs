//! Per-request cancellation and deadline propagation
//!
//! Every repository call receives the `RequestContext` of the request that
//! triggered it. A tripped context makes the in-flight call fail with a
//! `ContextError` instead of completing.

use std::{future::Future, time::Duration};

use thiserror::Error;
use tokio::{sync::watch, time::Instant};

/// Why a context stopped accepting work
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ContextError {
    #[error("request was cancelled")]
    Cancelled,

    #[error("request deadline exceeded")]
    DeadlineExceeded,
}

/// Deadline and cancellation signal carried through a single request
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    deadline: Option<Instant>,
    cancelled: Option<watch::Receiver<bool>>,
}

/// Trips the cancellation signal of the context it was created with
#[derive(Debug)]
pub struct CancelHandle {
    sender: watch::Sender<bool>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.sender.send_replace(true);
    }
}

impl RequestContext {
    /// A context that is never cancelled and has no deadline
    pub fn background() -> Self {
        Self::default()
    }

    /// Bound the context by `timeout` from now, keeping an earlier deadline
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// Bound the context by `deadline`, keeping an earlier deadline
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(match self.deadline {
            Some(existing) => existing.min(deadline),
            None => deadline,
        });
        self
    }

    /// Attach a fresh cancellation signal and return the handle that trips it
    pub fn with_cancellation(mut self) -> (Self, CancelHandle) {
        let (sender, receiver) = watch::channel(false);
        self.cancelled = Some(receiver);
        (self, CancelHandle { sender })
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
            .as_ref()
            .is_some_and(|receiver| *receiver.borrow())
    }

    /// Report a context that has already been cancelled or run out of time
    pub fn check(&self) -> Result<(), ContextError> {
        if self.is_cancelled() {
            return Err(ContextError::Cancelled);
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Err(ContextError::DeadlineExceeded),
            _ => Ok(()),
        }
    }

    /// Drive `operation` to completion unless the context trips first.
    ///
    /// Cancellation wins over the deadline, and both win over an operation
    /// that is ready on the same poll.
    pub async fn run<F, T, E>(&self, operation: F) -> Result<T, E>
    where
        F: Future<Output = Result<T, E>>,
        E: From<ContextError>,
    {
        self.check()?;

        tokio::select! {
            biased;
            _ = self.cancellation() => Err(ContextError::Cancelled.into()),
            _ = self.expiry() => Err(ContextError::DeadlineExceeded.into()),
            result = operation => result,
        }
    }

    async fn cancellation(&self) {
        let Some(mut receiver) = self.cancelled.clone() else {
            return std::future::pending().await;
        };
        loop {
            if *receiver.borrow_and_update() {
                return;
            }
            // A dropped handle can no longer cancel.
            if receiver.changed().await.is_err() {
                return std::future::pending().await;
            }
        }
    }

    async fn expiry(&self) {
        match self.deadline {
            Some(deadline) => tokio::time::sleep_until(deadline).await,
            None => std::future::pending().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    enum TestError {
        Context(ContextError),
    }

    impl From<ContextError> for TestError {
        fn from(err: ContextError) -> Self {
            TestError::Context(err)
        }
    }

    async fn slow_value() -> Result<u32, TestError> {
        tokio::time::sleep(Duration::from_secs(5)).await;
        Ok(7)
    }

    #[tokio::test]
    async fn test_background_context_runs_operation() {
        let ctx = RequestContext::background();
        let result: Result<u32, TestError> = ctx.run(async { Ok(1) }).await;
        assert_eq!(result, Ok(1));
        assert!(ctx.check().is_ok());
    }

    #[tokio::test]
    async fn test_deadline_interrupts_slow_operation() {
        let ctx = RequestContext::background().with_timeout(Duration::from_millis(20));
        let started = std::time::Instant::now();

        let result = ctx.run(slow_value()).await;

        assert_eq!(result, Err(TestError::Context(ContextError::DeadlineExceeded)));
        assert!(started.elapsed() < Duration::from_secs(1));
    }

    #[tokio::test]
    async fn test_cancellation_interrupts_in_flight_operation() {
        let (ctx, handle) = RequestContext::background().with_cancellation();

        let task = tokio::spawn(async move { ctx.run(slow_value()).await });
        tokio::time::sleep(Duration::from_millis(10)).await;
        handle.cancel();

        let result = task.await.unwrap();
        assert_eq!(result, Err(TestError::Context(ContextError::Cancelled)));
    }

    #[tokio::test]
    async fn test_already_cancelled_context_rejects_ready_operation() {
        let (ctx, handle) = RequestContext::background().with_cancellation();
        handle.cancel();

        let result: Result<u32, TestError> = ctx.run(async { Ok(1) }).await;
        assert_eq!(result, Err(TestError::Context(ContextError::Cancelled)));
        assert_eq!(ctx.check(), Err(ContextError::Cancelled));
    }

    #[tokio::test]
    async fn test_dropped_handle_never_cancels() {
        let (ctx, handle) = RequestContext::background().with_cancellation();
        drop(handle);

        let result: Result<u32, TestError> = ctx.run(async { Ok(3) }).await;
        assert_eq!(result, Ok(3));
    }

    #[tokio::test]
    async fn test_earlier_deadline_is_kept() {
        let soon = Instant::now() + Duration::from_millis(5);
        let ctx = RequestContext::background()
            .with_deadline(soon)
            .with_timeout(Duration::from_secs(60));
        assert_eq!(ctx.deadline(), Some(soon));
    }
}
