//! Debounced delivery of the latest input.
//!
//! Each [`Debouncer::push`] schedules a deferred delivery of that value after
//! the quiet period and cancels whatever delivery was still pending. Only a
//! value that stays unchallenged for the whole quiet period reaches the
//! receiver (last write wins, nothing is queued).

use log::trace;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::{CancellationToken, DropGuard};

/// Quiet period before QR auto-regeneration.
pub const QR_QUIET_PERIOD: Duration = Duration::from_millis(500);

pub struct Debouncer<T> {
    quiet: Duration,
    tx: mpsc::UnboundedSender<T>,
    // Dropping the guard cancels the pending delivery.
    pending: Option<DropGuard>,
}

impl<T> Debouncer<T>
where
    T: Send + 'static,
{
    /// Creates a debouncer and the receiver settled values arrive on.
    ///
    /// Must be called inside a tokio runtime before the first `push`.
    pub fn new(quiet: Duration) -> (Self, mpsc::UnboundedReceiver<T>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                quiet,
                tx,
                pending: None,
            },
            rx,
        )
    }

    pub fn quiet_period(&self) -> Duration {
        self.quiet
    }

    /// Supersedes any pending value with `value`.
    pub fn push(&mut self, value: T) {
        self.cancel();

        let token = CancellationToken::new();
        let child = token.clone();
        let tx = self.tx.clone();
        let quiet = self.quiet;
        tokio::spawn(async move {
            tokio::select! {
                () = child.cancelled() => {
                    trace!("event=debounce module=debounce status=cancelled");
                }
                () = tokio::time::sleep(quiet) => {
                    let _ = tx.send(value);
                }
            }
        });
        self.pending = Some(token.drop_guard());
    }

    /// Drops the pending value, if any.
    pub fn cancel(&mut self) {
        self.pending.take();
    }
}
