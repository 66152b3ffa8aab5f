use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;

/// Last-write-wins debouncer: at most one pending task, and scheduling a new
/// one aborts the previous before it fires.
#[derive(Debug)]
pub struct Debouncer {
    window: Duration,
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    /// Runs `task` once the window elapses without another `schedule`.
    /// Returns true when a pending task was superseded.
    pub fn schedule<F>(&mut self, task: F) -> bool
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let window = self.window;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(window).await;
            task.await;
        });
        match self.pending.replace(handle) {
            Some(previous) if !previous.is_finished() => {
                previous.abort();
                true
            }
            _ => false,
        }
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;

    const WINDOW: Duration = Duration::from_millis(150);

    fn record(calls: &Arc<AtomicUsize>, last: &Arc<AtomicUsize>, value: usize) -> impl Future<Output = ()> {
        let (calls, last) = (calls.clone(), last.clone());
        async move {
            calls.fetch_add(1, Ordering::SeqCst);
            last.store(value, Ordering::SeqCst);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_only_the_last_task_fires() {
        let calls = Arc::new(AtomicUsize::new(0));
        let last = Arc::new(AtomicUsize::new(0));
        let mut debouncer = Debouncer::new(WINDOW);

        assert!(!debouncer.schedule(record(&calls, &last, 1)));
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(debouncer.schedule(record(&calls, &last, 2)));
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(debouncer.schedule(record(&calls, &last, 3)));
        assert!(debouncer.is_pending());

        tokio::time::sleep(WINDOW * 2).await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(last.load(Ordering::SeqCst), 3);
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_nothing_fires_inside_the_window() {
        let calls = Arc::new(AtomicUsize::new(0));
        let last = Arc::new(AtomicUsize::new(0));
        let mut debouncer = Debouncer::new(WINDOW);
        debouncer.schedule(record(&calls, &last, 7));
        tokio::time::sleep(WINDOW / 2).await;
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        tokio::time::sleep(WINDOW).await;
        assert_eq!(last.load(Ordering::SeqCst), 7);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_and_drop_abort_pending_task() {
        let calls = Arc::new(AtomicUsize::new(0));
        let last = Arc::new(AtomicUsize::new(0));
        let mut debouncer = Debouncer::new(WINDOW);
        debouncer.schedule(record(&calls, &last, 1));
        debouncer.cancel();
        assert!(!debouncer.is_pending());

        let mut dropped = Debouncer::new(WINDOW);
        dropped.schedule(record(&calls, &last, 2));
        drop(dropped);

        tokio::time::sleep(WINDOW * 2).await;
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_schedule_after_fire_does_not_report_supersede() {
        let calls = Arc::new(AtomicUsize::new(0));
        let last = Arc::new(AtomicUsize::new(0));
        let mut debouncer = Debouncer::new(WINDOW);
        debouncer.schedule(record(&calls, &last, 1));
        tokio::time::sleep(WINDOW * 2).await;
        assert!(!debouncer.schedule(record(&calls, &last, 2)));
        tokio::time::sleep(WINDOW * 2).await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
