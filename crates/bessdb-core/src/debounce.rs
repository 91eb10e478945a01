//! Debounced input values.
//!
//! Search boxes re-filter on every keystroke; the debouncer holds the latest
//! value until the input has been quiet for the configured delay. Consumers
//! should treat settling as eventually consistent, not synchronous.

use std::future::pending;
use std::time::Duration;

use tokio::time::Instant;

/// Holds the most recent pushed value and the instant it settles.
///
/// Each [`Debouncer::push`] replaces the pending value and restarts the
/// delay; [`Debouncer::settled`] resolves once the delay has elapsed with no
/// further pushes. Designed for `tokio::select!` loops: dropping an
/// unresolved `settled` future loses nothing.
#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<T>,
    deadline: Option<Instant>,
}

impl<T> Debouncer<T> {
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
            deadline: None,
        }
    }

    /// Replaces the pending value and restarts the delay.
    pub fn push(&mut self, value: T) {
        self.pending = Some(value);
        self.deadline = Some(Instant::now() + self.delay);
    }

    /// Whether a pushed value is waiting to settle.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Resolves with the latest pushed value once the delay has elapsed.
    /// Pends forever when nothing has been pushed.
    pub async fn settled(&mut self) -> T {
        loop {
            match self.deadline {
                Some(deadline) => {
                    tokio::time::sleep_until(deadline).await;
                    self.deadline = None;
                    if let Some(value) = self.pending.take() {
                        return value;
                    }
                }
                None => pending::<()>().await,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn settles_with_the_latest_value() {
        let mut debouncer = Debouncer::new(Duration::from_millis(300));
        debouncer.push("nasi");
        debouncer.push("nasi kandar");
        assert_eq!(debouncer.settled().await, "nasi kandar");
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn does_not_settle_before_the_delay() {
        let mut debouncer = Debouncer::new(Duration::from_millis(300));
        debouncer.push("kopi");
        let before = Instant::now();
        let _ = debouncer.settled().await;
        assert!(before.elapsed() >= Duration::from_millis(300));
    }

    #[tokio::test(start_paused = true)]
    async fn push_restarts_the_delay() {
        let mut debouncer = Debouncer::new(Duration::from_millis(300));
        debouncer.push("a");
        tokio::time::advance(Duration::from_millis(200)).await;
        debouncer.push("ab");
        let before = Instant::now();
        assert_eq!(debouncer.settled().await, "ab");
        assert!(before.elapsed() >= Duration::from_millis(300));
    }
}
