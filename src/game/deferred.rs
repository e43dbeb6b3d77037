//! Single-resolution signals for user-paced prompts.
//!
//! [`Deferred`] is the resolving half kept by a presenter; [`Completion`] is
//! the awaitable half handed to the narrative script. A deferred goes
//! `Pending -> Resolved` once; a second `resolve` is refused.

use futures_channel::oneshot;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use crate::error::{NetRunnerError, Result};

pub struct Deferred<T> {
    tx: Option<oneshot::Sender<T>>,
}

pub struct Completion<T> {
    rx: oneshot::Receiver<T>,
}

/// Create a linked pending pair.
pub fn deferred<T>() -> (Deferred<T>, Completion<T>) {
    let (tx, rx) = oneshot::channel();
    (Deferred { tx: Some(tx) }, Completion { rx })
}

impl<T> Deferred<T> {
    pub fn is_resolved(&self) -> bool {
        self.tx.is_none()
    }

    /// Resolve with `value`. Fails with `AlreadyResolved` on the second call.
    ///
    /// A completion nobody listens to anymore still counts as resolved.
    pub fn resolve(&mut self, value: T) -> Result<()> {
        let Some(tx) = self.tx.take() else {
            tracing::error!("Deferred signal resolved twice");
            return Err(NetRunnerError::AlreadyResolved);
        };
        if tx.send(value).is_err() {
            tracing::debug!("Completion dropped before resolution");
        }
        Ok(())
    }
}

impl<T> Completion<T> {
    /// Non-blocking check: `Some` once resolved. The value can be taken once.
    pub fn try_take(&mut self) -> Result<Option<T>> {
        self.rx.try_recv().map_err(|_| NetRunnerError::Abandoned)
    }
}

impl<T> Future for Completion<T> {
    type Output = Result<T>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.rx)
            .poll(cx)
            .map(|r| r.map_err(|_| NetRunnerError::Abandoned))
    }
}
