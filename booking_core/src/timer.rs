//! # One-Shot Timers
//!
//! A delayed callback whose handle owns the pending work. Dropping the
//! handle (or calling [`OneShot::cancel`]) guarantees the callback never
//! runs, so a torn-down screen is never called back.
//!
//! Requires a Tokio runtime.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

/// Handle to a callback scheduled to run once after a delay
#[derive(Debug)]
pub struct OneShot {
    handle: Option<JoinHandle<()>>,
    fired: Arc<AtomicBool>,
}

impl OneShot {
    /// Schedule `callback` to run once after `delay`
    pub fn schedule<F>(delay: Duration, callback: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        let fired = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&fired);
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // No await point past here, so an abort cannot split the two
            callback();
            flag.store(true, Ordering::SeqCst);
        });

        OneShot {
            handle: Some(handle),
            fired,
        }
    }

    /// Whether the callback has run
    pub fn has_fired(&self) -> bool {
        self.fired.load(Ordering::SeqCst)
    }

    /// Whether the callback is still waiting to run
    pub fn is_pending(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Cancel the callback if it has not run yet
    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            if !handle.is_finished() {
                tracing::debug!("cancelling pending one-shot timer");
            }
            handle.abort();
        }
    }

    /// Wait for the timer to finish. Returns `true` if the callback ran.
    pub async fn wait(mut self) -> bool {
        if let Some(handle) = self.handle.take() {
            // An aborted or panicked task is reported as not fired
            let _ = handle.await;
        }
        self.has_fired()
    }
}

impl Drop for OneShot {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    fn counter() -> (Arc<AtomicUsize>, impl FnOnce() + Send + 'static) {
        let count = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&count);
        (count, move || {
            c.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[tokio::test(start_paused = true)]
    async fn test_fires_once_after_delay() {
        let (count, callback) = counter();
        let timer = OneShot::schedule(Duration::from_secs(2), callback);

        tokio::time::sleep(Duration::from_millis(1999)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);
        assert!(timer.is_pending());

        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert!(timer.has_fired());

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels() {
        let (count, callback) = counter();
        let timer = OneShot::schedule(Duration::from_secs(2), callback);
        tokio::time::sleep(Duration::from_secs(1)).await;
        drop(timer);

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_then_wait_reports_not_fired() {
        let (count, callback) = counter();
        let mut timer = OneShot::schedule(Duration::from_millis(250), callback);
        timer.cancel();
        assert!(!timer.is_pending());
        assert!(!timer.wait().await);
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_reports_fired() {
        let (count, callback) = counter();
        let timer = OneShot::schedule(Duration::from_millis(500), callback);
        assert!(timer.wait().await);
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }
}
