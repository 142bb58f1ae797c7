//! Trailing-edge debouncer on top of tokio timers.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::sleep;

/// Quiet period the search box waits for before querying.
pub const DEFAULT_DEBOUNCE_WINDOW: Duration = Duration::from_millis(800);

/// Emits the most recently pushed value once no new value has arrived for the
/// configured window.
///
/// At most one timer is pending: every [`push`](Self::push) cancels it and
/// starts a new one. Dropping the debouncer cancels the pending emission.
pub struct Debouncer<T> {
    window: Duration,
    sender: mpsc::UnboundedSender<T>,
    pending: Option<JoinHandle<()>>,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Creates a debouncer and the receiver its emissions are delivered to.
    pub fn new(window: Duration) -> (Self, mpsc::UnboundedReceiver<T>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let debouncer = Self {
            window,
            sender,
            pending: None,
        };
        (debouncer, receiver)
    }

    /// Records a new value and restarts the window. Must be called from
    /// within a tokio runtime.
    pub fn push(&mut self, value: T) {
        if self.cancel() {
            log::debug!("Superseded pending emission");
        }

        let sender = self.sender.clone();
        let window = self.window;
        self.pending = Some(tokio::spawn(async move {
            sleep(window).await;
            if sender.send(value).is_err() {
                log::debug!("Debounced value dropped: receiver closed");
            }
        }));
    }

    /// Cancels the pending emission, returning `true` if one was still waiting.
    pub fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some(handle) if !handle.is_finished() => {
                handle.abort();
                true
            }
            _ => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use tokio::time::Instant;

    use super::*;

    const WINDOW: Duration = Duration::from_millis(800);

    #[tokio::test(start_paused = true)]
    async fn burst_emits_only_the_last_value() {
        let (mut debouncer, mut rx) = Debouncer::new(WINDOW);

        for text in ["a", "al", "ali", "alic"] {
            debouncer.push(text.to_string());
            sleep(Duration::from_millis(200)).await;
        }
        let last_push = Instant::now();
        debouncer.push("alice".to_string());

        assert_eq!(rx.recv().await.as_deref(), Some("alice"));
        assert!(last_push.elapsed() >= WINDOW);

        sleep(WINDOW * 3).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn spaced_events_emit_each_value() {
        let (mut debouncer, mut rx) = Debouncer::new(WINDOW);

        debouncer.push("bob".to_string());
        sleep(WINDOW + Duration::from_millis(100)).await;
        debouncer.push("carol".to_string());

        assert_eq!(rx.recv().await.as_deref(), Some("bob"));
        assert_eq!(rx.recv().await.as_deref(), Some("carol"));
    }

    #[tokio::test(start_paused = true)]
    async fn nothing_is_emitted_before_the_window_elapses() {
        let (mut debouncer, mut rx) = Debouncer::new(WINDOW);

        debouncer.push(1);
        sleep(WINDOW - Duration::from_millis(1)).await;

        assert!(debouncer.is_pending());
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn drop_cancels_the_pending_emission() {
        let (mut debouncer, mut rx) = Debouncer::new(WINDOW);

        debouncer.push(42);
        drop(debouncer);

        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_reports_whether_an_emission_was_pending() {
        let (mut debouncer, mut rx) = Debouncer::new(WINDOW);

        assert!(!debouncer.cancel());
        debouncer.push(7);
        assert!(debouncer.cancel());

        sleep(WINDOW * 2).await;
        assert!(rx.try_recv().is_err());
    }
}
