//! Deadline-bounded execution of detection and decode attempts
//!
//! An attempt is spawned as its own task and raced against a timer. When the
//! timer wins, the caller moves on immediately. With [`AbandonPolicy::Detach`]
//! the losing task keeps running in the background and its result is dropped
//! when it finishes; [`AbandonPolicy::Abort`] cancels it at its next await
//! point instead. Either way the caller observes the same outcome.

use std::any::Any;
use std::future::Future;
use std::time::Duration;

use tokio::task::JoinError;

/// What to do with an attempt that missed its deadline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AbandonPolicy {
    /// Let the task run to completion and discard its result
    #[default]
    Detach,
    /// Cancel the task cooperatively
    Abort,
}

/// Result of a bounded attempt
#[derive(Debug)]
pub enum Bounded<T> {
    /// The attempt finished within its deadline
    Completed(T),
    /// The deadline elapsed first
    Expired,
    /// The attempt panicked or was cancelled; the message describes why
    Crashed(String),
}

impl<T> Bounded<T> {
    /// The completed value, if any
    pub fn completed(self) -> Option<T> {
        match self {
            Bounded::Completed(value) => Some(value),
            _ => None,
        }
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "attempt panicked".to_string()
    }
}

fn describe_join_error(err: JoinError) -> String {
    if err.is_panic() {
        panic_message(err.into_panic())
    } else {
        "attempt was cancelled".to_string()
    }
}

/// Run `operation` with a deadline.
///
/// Must be called from within a tokio runtime.
pub async fn run_bounded<F>(
    operation: F,
    deadline: Duration,
    policy: AbandonPolicy,
) -> Bounded<F::Output>
where
    F: Future + Send + 'static,
    F::Output: Send + 'static,
{
    let mut handle = tokio::spawn(operation);
    match tokio::time::timeout(deadline, &mut handle).await {
        Ok(Ok(value)) => Bounded::Completed(value),
        Ok(Err(err)) => Bounded::Crashed(describe_join_error(err)),
        Err(_) => {
            if policy == AbandonPolicy::Abort {
                handle.abort();
            }
            Bounded::Expired
        }
    }
}
