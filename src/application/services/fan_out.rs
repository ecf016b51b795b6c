//! # Fan-Out
//!
//! Runs N independent fallible futures concurrently and collects N keyed
//! outcomes.
//!
//! Every future is spawned on its own tokio task under its own timeout. A
//! task that fails, times out or panics only affects its own outcome; the
//! caller always gets one entry per submitted key once every task settled.

use futures::future::join_all;
use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::future::Future;
use std::time::Duration;
use tokio::task::JoinError;
use tokio::time::timeout;

/// Why a task did not produce a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchFailure<E> {
    /// The future resolved to an error.
    Failed(E),
    /// The future did not resolve within its timeout.
    TimedOut(Duration),
    /// The task panicked or was aborted.
    Panicked(String),
}

impl<E: fmt::Display> fmt::Display for DispatchFailure<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Failed(e) => write!(f, "{}", e),
            Self::TimedOut(after) => write!(f, "timed out after {} ms", after.as_millis()),
            Self::Panicked(message) => write!(f, "task panicked: {}", message),
        }
    }
}

/// Outcome of one task.
pub type DispatchOutcome<T, E> = Result<T, DispatchFailure<E>>;

/// One unit of work for [`dispatch_all`].
pub struct FanOutTask<K, F> {
    key: K,
    timeout: Duration,
    future: F,
}

impl<K, F> FanOutTask<K, F> {
    /// Creates a task.
    #[must_use]
    pub fn new(key: K, timeout: Duration, future: F) -> Self {
        Self {
            key,
            timeout,
            future,
        }
    }
}

impl<K: fmt::Debug, F> fmt::Debug for FanOutTask<K, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FanOutTask")
            .field("key", &self.key)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

/// Spawns every task and waits for all of them.
///
/// Keys must be unique; a repeated key keeps the outcome of the last task
/// submitted under it.
///
/// # Examples
///
/// ```
/// use osago_quotes::application::services::fan_out::{dispatch_all, FanOutTask};
/// use std::time::Duration;
///
/// # tokio_test::block_on(async {
/// let tasks = ["a", "b"].map(|key| {
///     FanOutTask::new(key, Duration::from_secs(1), async move {
///         if key == "a" { Ok(1) } else { Err("down".to_string()) }
///     })
/// });
/// let outcomes = dispatch_all(tasks).await;
/// assert_eq!(outcomes["a"], Ok(1));
/// assert!(outcomes["b"].is_err());
/// # });
/// ```
pub async fn dispatch_all<K, T, E, F>(
    tasks: impl IntoIterator<Item = FanOutTask<K, F>>,
) -> BTreeMap<K, DispatchOutcome<T, E>>
where
    K: Ord,
    T: Send + 'static,
    E: Send + 'static,
    F: Future<Output = Result<T, E>> + Send + 'static,
{
    let (keys, handles): (Vec<K>, Vec<_>) = tasks
        .into_iter()
        .map(|task| {
            let limit = task.timeout;
            let handle = tokio::spawn(timeout(limit, task.future));
            (task.key, (limit, handle))
        })
        .unzip();

    let settled = join_all(handles.into_iter().map(|(limit, handle)| async move {
        match handle.await {
            Ok(Ok(Ok(value))) => Ok(value),
            Ok(Ok(Err(e))) => Err(DispatchFailure::Failed(e)),
            Ok(Err(_elapsed)) => Err(DispatchFailure::TimedOut(limit)),
            Err(join_error) => Err(DispatchFailure::Panicked(describe(join_error))),
        }
    }))
    .await;

    keys.into_iter().zip(settled).collect()
}

fn describe(error: JoinError) -> String {
    if error.is_cancelled() {
        return "task was cancelled".to_string();
    }
    match error.try_into_panic() {
        Ok(payload) => panic_message(payload.as_ref()),
        Err(other) => other.to_string(),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio_test::assert_ok;

    const SECOND: Duration = Duration::from_secs(1);

    type BoxedTask = std::pin::Pin<Box<dyn Future<Output = Result<u32, String>> + Send>>;

    fn boxed(f: impl Future<Output = Result<u32, String>> + Send + 'static) -> BoxedTask {
        Box::pin(f)
    }

    #[tokio::test]
    async fn every_key_gets_an_outcome() {
        let tasks =
            (0..5u32).map(|i| FanOutTask::new(i, SECOND, async move { Ok::<_, String>(i * 10) }));
        let outcomes = dispatch_all(tasks).await;
        assert_eq!(outcomes.len(), 5);
        for (key, outcome) in outcomes {
            assert_eq!(assert_ok!(outcome), key * 10);
        }
    }

    #[tokio::test]
    async fn empty_input_yields_empty_map() {
        let tasks: Vec<FanOutTask<u8, BoxedTask>> = Vec::new();
        assert!(dispatch_all(tasks).await.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn slow_task_times_out_alone() {
        let tasks = vec![
            FanOutTask::new("fast", SECOND, boxed(async { Ok(1) })),
            FanOutTask::new(
                "slow",
                SECOND,
                boxed(async {
                    tokio::time::sleep(Duration::from_secs(60)).await;
                    Ok(2)
                }),
            ),
        ];
        let outcomes = dispatch_all(tasks).await;
        assert_eq!(outcomes["fast"], Ok(1));
        assert_eq!(outcomes["slow"], Err(DispatchFailure::TimedOut(SECOND)));
    }

    #[tokio::test(start_paused = true)]
    async fn timeouts_are_per_task() {
        let started = tokio::time::Instant::now();
        let tasks = vec![
            FanOutTask::new(
                "short",
                Duration::from_secs(2),
                boxed(async {
                    tokio::time::sleep(Duration::from_secs(3)).await;
                    Ok(1)
                }),
            ),
            FanOutTask::new(
                "long",
                Duration::from_secs(10),
                boxed(async {
                    tokio::time::sleep(Duration::from_secs(3)).await;
                    Ok(2)
                }),
            ),
        ];
        let outcomes = dispatch_all(tasks).await;
        assert!(matches!(outcomes["short"], Err(DispatchFailure::TimedOut(_))));
        assert_eq!(outcomes["long"], Ok(2));
        // Concurrent: total wall time is the longest task, not the sum.
        assert!(started.elapsed() < Duration::from_secs(4));
    }

    #[tokio::test]
    async fn panic_is_contained() {
        let tasks = vec![
            FanOutTask::new("ok", SECOND, boxed(async { Ok(7) })),
            FanOutTask::new(
                "boom",
                SECOND,
                boxed(async {
                    let reply: Option<u32> = None;
                    match reply {
                        Some(value) => Ok(value),
                        None => panic!("partner adapter exploded"),
                    }
                }),
            ),
        ];
        let outcomes = dispatch_all(tasks).await;
        assert_eq!(outcomes["ok"], Ok(7));
        assert_eq!(
            outcomes["boom"],
            Err(DispatchFailure::Panicked("partner adapter exploded".to_string()))
        );
    }

    #[tokio::test]
    async fn errors_are_kept_verbatim() {
        let calls = Arc::new(AtomicUsize::new(0));
        let tasks = ["a", "b", "c"].map(|key| {
            let calls = calls.clone();
            FanOutTask::new(key, SECOND, async move {
                calls.fetch_add(1, Ordering::SeqCst);
                if key == "b" {
                    Err(format!("{key} refused"))
                } else {
                    Ok(1u32)
                }
            })
        });
        let outcomes = dispatch_all(tasks).await;
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(outcomes["b"], Err(DispatchFailure::Failed("b refused".to_string())));
        assert_eq!(outcomes["b"].as_ref().unwrap_err().to_string(), "b refused");
    }
}
