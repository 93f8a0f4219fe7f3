//! A small non-reentrant periodic job runner, used by both the bundle loop
//! and the expiry loop. The host node's async-runtime and stop-handler
//! crates wrap background tasks with cooperative shutdown via
//! `tokio_util::sync::CancellationToken`; this module follows the same
//! shape for a single named job.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// A running periodic job. Dropping the handle does not stop the job; call
/// [`JobHandle::shutdown`] to do that.
pub struct JobHandle {
    name: &'static str,
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl JobHandle {
    /// Signal the job to stop and wait for its current tick to finish.
    pub async fn shutdown(self) {
        self.cancel.cancel();
        if let Err(err) = self.task.await {
            tracing::warn!(job = self.name, error = %err, "periodic job task panicked");
        }
    }
}

/// Spawn `tick` to run every `interval`, never letting two invocations of
/// the same job overlap. A job failing mid-tick does not stop the loop;
/// the next tick starts fresh on the next interval boundary regardless of
/// how long the previous tick took.
pub fn spawn<F, Fut>(name: &'static str, interval: Duration, tick: F) -> JobHandle
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    let cancel = CancellationToken::new();
    let guard = Arc::new(Mutex::new(()));

    let task_cancel = cancel.clone();
    let task = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            tokio::select! {
                _ = task_cancel.cancelled() => {
                    tracing::debug!(job = name, "periodic job shutting down");
                    break;
                }
                _ = ticker.tick() => {
                    let _reentrancy_guard = guard.lock().await;
                    tracing::debug!(job = name, "periodic job tick starting");
                    tick().await;
                    tracing::debug!(job = name, "periodic job tick finished");
                }
            }
        }
    });

    JobHandle { name, cancel, task }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test(start_paused = true)]
    async fn runs_on_every_interval_tick() {
        let count = Arc::new(AtomicUsize::new(0));
        let counted = count.clone();
        let handle = spawn("test-job", Duration::from_millis(10), move || {
            let counted = counted.clone();
            async move {
                counted.fetch_add(1, Ordering::SeqCst);
            }
        });

        tokio::time::advance(Duration::from_millis(35)).await;
        tokio::task::yield_now().await;

        handle.shutdown().await;
        assert!(count.load(Ordering::SeqCst) >= 3);
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_stops_future_ticks() {
        let count = Arc::new(AtomicUsize::new(0));
        let counted = count.clone();
        let handle = spawn("test-job", Duration::from_millis(10), move || {
            let counted = counted.clone();
            async move {
                counted.fetch_add(1, Ordering::SeqCst);
            }
        });

        tokio::time::advance(Duration::from_millis(15)).await;
        tokio::task::yield_now().await;
        handle.shutdown().await;
        let after_shutdown = count.load(Ordering::SeqCst);

        tokio::time::advance(Duration::from_millis(100)).await;
        assert_eq!(count.load(Ordering::SeqCst), after_shutdown);
    }
}
