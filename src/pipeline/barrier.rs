// src/pipeline/barrier.rs
// =============================================================================
// A one-shot countdown barrier for async tasks (a "wait group").
//
// How it works:
// 1. Created with the number of tasks we are about to spawn (N)
// 2. Each task holds a CompletionGuard; dropping it records one arrival
// 3. wait() resolves once N arrivals have been recorded
//
// Using Drop for the arrival means a task reports exactly once whatever
// happens to it: returns normally, hits an error, panics, or gets aborted
// while parked on a semaphore. There is no separate "done" message that
// could be sent twice or forgotten.
//
// The wait side uses tokio::sync::Notify. A waiter registers interest
// *before* checking the counter, so an arrival landing between the check
// and the await still wakes it.
// =============================================================================

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

#[derive(Debug)]
pub struct CompletionBarrier {
    expected: usize,
    completed: AtomicUsize,
    releases: AtomicUsize,
    notify: Notify,
}

impl CompletionBarrier {
    /// A barrier that releases after `expected` arrivals.
    ///
    /// With `expected == 0` it is released from the start.
    pub fn new(expected: usize) -> Self {
        Self {
            expected,
            completed: AtomicUsize::new(0),
            releases: AtomicUsize::new(usize::from(expected == 0)),
            notify: Notify::new(),
        }
    }

    /// Hands out a guard that arrives when dropped.
    pub fn guard(self: &Arc<Self>) -> CompletionGuard {
        CompletionGuard {
            barrier: Arc::clone(self),
        }
    }

    /// Records one completion. Returns true for the arrival that released
    /// the barrier.
    pub fn arrive(&self) -> bool {
        let now = self.completed.fetch_add(1, Ordering::AcqRel) + 1;

        if now > self.expected {
            tracing::error!(
                expected = self.expected,
                arrived = now,
                "completion barrier received more arrivals than tasks"
            );
            return false;
        }

        if now == self.expected {
            self.releases.fetch_add(1, Ordering::AcqRel);
            self.notify.notify_waiters();
            return true;
        }

        false
    }

    pub fn expected(&self) -> usize {
        self.expected
    }

    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::Acquire)
    }

    /// How many times the barrier has released. Never more than 1.
    pub fn releases(&self) -> usize {
        self.releases.load(Ordering::Acquire)
    }

    pub fn is_released(&self) -> bool {
        self.completed() >= self.expected
    }

    /// Waits until every expected task has arrived.
    pub async fn wait(&self) {
        loop {
            let notified = self.notify.notified();
            tokio::pin!(notified);
            // Register before checking so notify_waiters() can't slip past us.
            notified.as_mut().enable();

            if self.is_released() {
                return;
            }
            notified.await;
        }
    }
}

/// Arrives at its barrier exactly once, when dropped.
#[derive(Debug)]
pub struct CompletionGuard {
    barrier: Arc<CompletionBarrier>,
}

impl Drop for CompletionGuard {
    fn drop(&mut self) {
        self.barrier.arrive();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_zero_expected_is_released() {
        let barrier = CompletionBarrier::new(0);
        assert!(barrier.is_released());
        barrier.wait().await;
        assert_eq!(barrier.releases(), 1);
    }

    #[tokio::test]
    async fn test_releases_only_on_last_arrival() {
        let barrier = CompletionBarrier::new(3);
        assert!(!barrier.arrive());
        assert!(!barrier.arrive());
        assert!(!barrier.is_released());
        assert!(barrier.arrive());
        assert!(barrier.is_released());
        assert_eq!(barrier.releases(), 1);
    }

    #[tokio::test]
    async fn test_wait_does_not_release_early() {
        let barrier = Arc::new(CompletionBarrier::new(2));
        let _first = barrier.guard();
        let second = barrier.guard();
        drop(second);

        let waited = tokio::time::timeout(Duration::from_millis(50), barrier.wait()).await;
        assert!(waited.is_err(), "barrier released with one task outstanding");
        assert_eq!(barrier.completed(), 1);
    }

    #[tokio::test]
    async fn test_guard_arrives_on_panic() {
        let barrier = Arc::new(CompletionBarrier::new(1));
        let guard = barrier.guard();
        let handle = tokio::spawn(async move {
            let _guard = guard;
            panic!("fetch task blew up");
        });
        assert!(handle.await.unwrap_err().is_panic());

        barrier.wait().await;
        assert_eq!(barrier.completed(), 1);
    }

    #[tokio::test]
    async fn test_guard_arrives_on_abort() {
        let barrier = Arc::new(CompletionBarrier::new(1));
        let guard = barrier.guard();
        let handle = tokio::spawn(async move {
            let _guard = guard;
            tokio::time::sleep(Duration::from_secs(3600)).await;
        });
        handle.abort();
        let _ = handle.await;

        barrier.wait().await;
        assert_eq!(barrier.releases(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_many_tasks_release_exactly_once() {
        let n = 200;
        let barrier = Arc::new(CompletionBarrier::new(n));

        for i in 0..n {
            let guard = barrier.guard();
            tokio::spawn(async move {
                let _guard = guard;
                // Finish in a scrambled order.
                tokio::time::sleep(Duration::from_millis((i * 7 % 13) as u64)).await;
            });
        }

        barrier.wait().await;
        assert_eq!(barrier.completed(), n);
        assert_eq!(barrier.releases(), 1);
    }

    #[test]
    fn test_extra_arrival_does_not_release_twice() {
        let barrier = CompletionBarrier::new(1);
        assert!(barrier.arrive());
        assert!(!barrier.arrive());
        assert_eq!(barrier.releases(), 1);
    }
}
