//! Per-call execution context: an optional deadline and cancellation signal.

use std::future::{self, Future};
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::Instant;

/// Why a context stopped a call.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextError {
    #[error("context deadline exceeded")]
    DeadlineExceeded,
    #[error("context canceled")]
    Cancelled,
}

/// Deadline and cancellation carrier passed to [`crate::Client::generate`].
///
/// Contexts are cheap to clone; clones share the same cancellation signal.
/// Dropping the future returned by `generate` also abandons the call.
#[derive(Debug, Clone, Default)]
pub struct Context {
    deadline: Option<Instant>,
    cancel: Option<watch::Receiver<bool>>,
}

/// Cancels every [`Context`] created from the same [`Context::with_cancel`] call.
#[derive(Debug)]
pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }
}

impl Context {
    /// A context with no deadline that is never cancelled.
    pub fn background() -> Self {
        Self::default()
    }

    pub fn with_deadline(deadline: Instant) -> Self {
        Self {
            deadline: Some(deadline),
            cancel: None,
        }
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self::with_deadline(Instant::now() + timeout)
    }

    /// A cancellable context with no deadline.
    pub fn with_cancel() -> (Self, CancelHandle) {
        let (tx, rx) = watch::channel(false);
        let ctx = Self {
            deadline: None,
            cancel: Some(rx),
        };
        (ctx, CancelHandle { tx })
    }

    /// Returns a copy of this context whose deadline is `deadline`, or the
    /// existing deadline if that is earlier.
    pub fn deadline_at(&self, deadline: Instant) -> Self {
        let deadline = match self.deadline {
            Some(existing) if existing < deadline => existing,
            _ => deadline,
        };
        Self {
            deadline: Some(deadline),
            cancel: self.cancel.clone(),
        }
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// The reason this context is done, if it already is.
    pub fn err(&self) -> Option<ContextError> {
        if self.cancel.as_ref().is_some_and(|rx| *rx.borrow()) {
            return Some(ContextError::Cancelled);
        }
        if self.deadline.is_some_and(|d| Instant::now() >= d) {
            return Some(ContextError::DeadlineExceeded);
        }
        None
    }

    /// Resolves once the context is cancelled or its deadline passes.
    /// Pends forever for a background context.
    pub async fn done(&self) -> ContextError {
        tokio::select! {
            _ = sleep_until(self.deadline) => ContextError::DeadlineExceeded,
            _ = wait_cancelled(self.cancel.clone()) => ContextError::Cancelled,
        }
    }

    /// Runs `fut` until it completes or the context is done.
    pub(crate) async fn run<F: Future>(&self, fut: F) -> Result<F::Output, ContextError> {
        if let Some(err) = self.err() {
            return Err(err);
        }
        tokio::select! {
            biased;
            err = self.done() => Err(err),
            out = fut => Ok(out),
        }
    }
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => future::pending().await,
    }
}

async fn wait_cancelled(rx: Option<watch::Receiver<bool>>) {
    let Some(mut rx) = rx else {
        return future::pending().await;
    };
    // A dropped handle can no longer cancel.
    if rx.wait_for(|cancelled| *cancelled).await.is_err() {
        future::pending::<()>().await;
    }
}
