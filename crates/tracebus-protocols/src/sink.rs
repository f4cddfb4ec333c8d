//! Producer side of a command execution stream.

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Channel capacity of an execution stream.
///
/// tokio has no zero-capacity channel; one slot is the closest to a
/// rendezvous handoff and still gives per-message backpressure.
pub const EXECUTE_CHANNEL_CAPACITY: usize = 1;

/// Where a [`TraceHandler`](crate::TraceHandler) writes command output.
///
/// Dropping the sink closes the stream. Every `send` also observes the
/// execution's cancellation token, so a handler that stops once `send`
/// returns `false` never outlives its consumer. The stream ends once every
/// clone of the sink is dropped.
#[derive(Debug, Clone)]
pub struct MessageSink {
    tx: mpsc::Sender<String>,
    cancel: CancellationToken,
}

impl MessageSink {
    pub fn new(tx: mpsc::Sender<String>, cancel: CancellationToken) -> Self {
        Self { tx, cancel }
    }

    /// Create a sink together with the receiving end of its channel.
    pub fn channel(cancel: CancellationToken) -> (Self, mpsc::Receiver<String>) {
        let (tx, rx) = mpsc::channel(EXECUTE_CHANNEL_CAPACITY);
        (Self::new(tx, cancel), rx)
    }

    /// Emit one message, waiting until the consumer has room for it.
    ///
    /// Returns `false` if the execution was cancelled or the consumer is
    /// gone; the message is discarded in that case.
    pub async fn send(&self, message: impl Into<String>) -> bool {
        if self.cancel.is_cancelled() {
            return false;
        }

        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => false,
            sent = self.tx.send(message.into()) => sent.is_ok(),
        }
    }

    /// Whether the consumer no longer wants output.
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled() || self.tx.is_closed()
    }

    /// Resolves once the execution is cancelled or the consumer goes away.
    pub async fn cancelled(&self) {
        tokio::select! {
            _ = self.cancel.cancelled() => {}
            _ = self.tx.closed() => {}
        }
    }
}

#[cfg(test)]
#[path = "sink_tests.rs"]
mod tests;
