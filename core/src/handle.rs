//! Single-valued asynchronous handle returned by every `BeerClient` operation.
//!
//! # Design
//! The operation runs as its own tokio task, so invoking it never blocks the
//! caller and issuing several operations lets them proceed concurrently with
//! no ordering between them. The handle resolves to exactly one
//! `Result<T, ApiError>`.
//!
//! `cancel` consumes the handle and aborts the task, which drops the
//! in-flight transport future. Because the handle is gone, no outcome can be
//! observed for it afterwards. Dropping an unresolved handle cancels it the
//! same way.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::task::JoinHandle;

use crate::error::ApiError;

pub struct OperationHandle<T> {
    state: State<T>,
}

enum State<T> {
    /// Resolved without spawning, e.g. a caller error caught while building.
    Ready(Option<Result<T, ApiError>>),
    Running(JoinHandle<Result<T, ApiError>>),
}

// The result is only ever moved out, never pinned in place.
impl<T> Unpin for OperationHandle<T> {}

impl<T: Send + 'static> OperationHandle<T> {
    /// Run `future` on the current tokio runtime.
    ///
    /// Outside a runtime the handle resolves to `ApiError::InvalidInput`
    /// instead of panicking.
    pub fn spawn<F>(future: F) -> Self
    where
        F: Future<Output = Result<T, ApiError>> + Send + 'static,
    {
        match tokio::runtime::Handle::try_current() {
            Ok(runtime) => Self {
                state: State::Running(runtime.spawn(future)),
            },
            Err(e) => Self::ready(Err(ApiError::InvalidInput(format!(
                "beer operations must be invoked inside a tokio runtime: {e}"
            )))),
        }
    }
}

impl<T> OperationHandle<T> {
    pub fn ready(result: Result<T, ApiError>) -> Self {
        Self {
            state: State::Ready(Some(result)),
        }
    }

    /// Abort the operation. A no-op if it already completed.
    pub fn cancel(self) {
        if let State::Running(task) = &self.state {
            task.abort();
        }
    }

    /// Whether the outcome is available without waiting.
    pub fn is_finished(&self) -> bool {
        match &self.state {
            State::Ready(_) => true,
            State::Running(task) => task.is_finished(),
        }
    }
}

impl<T> Drop for OperationHandle<T> {
    fn drop(&mut self) {
        if let State::Running(task) = &self.state {
            task.abort();
        }
    }
}

impl<T> Future for OperationHandle<T> {
    type Output = Result<T, ApiError>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        match &mut this.state {
            State::Ready(result) => match result.take() {
                Some(result) => Poll::Ready(result),
                None => Poll::Ready(Err(ApiError::InvalidInput(
                    "operation handle polled after it resolved".to_string(),
                ))),
            },
            State::Running(task) => {
                let joined = match Pin::new(task).poll(cx) {
                    Poll::Pending => return Poll::Pending,
                    Poll::Ready(joined) => joined,
                };
                this.state = State::Ready(None);
                match joined {
                    Ok(result) => Poll::Ready(result),
                    Err(join_err) if join_err.is_panic() => {
                        std::panic::resume_unwind(join_err.into_panic())
                    }
                    // Only reachable when the runtime shuts down underneath us.
                    Err(join_err) => Poll::Ready(Err(ApiError::Transport(format!(
                        "operation aborted: {join_err}"
                    )))),
                }
            }
        }
    }
}
