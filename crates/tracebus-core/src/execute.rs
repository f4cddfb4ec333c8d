//! Command execution bridge.
//!
//! `Tracer::execute` hands a fresh channel to the handler, runs the handler
//! on its own task and returns the receiving end immediately. The bridge
//! does no buffering beyond the one-slot channel, no batching and no timeout.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::{FutureExt, Stream};
use tokio::sync::mpsc;
use tokio_util::sync::{CancellationToken, DropGuard};
use tracing::{debug, error, warn, Instrument};

use tracebus_protocols::error::TracingError;
use tracebus_protocols::MessageSink;

use crate::tracer::Tracer;

/// Consumer side of a running command.
///
/// Yields each message the handler emits, then `None` once the handler has
/// finished. Dropping the stream cancels the execution.
pub struct ExecutionStream {
    rx: mpsc::Receiver<String>,
    _guard: DropGuard,
}

impl ExecutionStream {
    fn new(rx: mpsc::Receiver<String>, cancel: CancellationToken) -> Self {
        Self {
            rx,
            _guard: cancel.drop_guard(),
        }
    }

    /// Wait for the next message; `None` means the execution has finished.
    pub async fn next_message(&mut self) -> Option<String> {
        self.rx.recv().await
    }

    /// Drain the stream until the handler finishes.
    pub async fn collect_all(mut self) -> Vec<String> {
        let mut messages = Vec::new();
        while let Some(message) = self.rx.recv().await {
            messages.push(message);
        }
        messages
    }
}

impl Stream for ExecutionStream {
    type Item = String;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.rx.poll_recv(cx)
    }
}

impl Tracer {
    /// Start `command` on the resource registered under `(resource_type, name)`.
    ///
    /// Returns as soon as the handler task is spawned. Cancelling `cancel`
    /// (or dropping the returned stream) makes the handler's sink refuse
    /// further messages. A handler that panics ends the stream with a final
    /// `execution failed: ...` message. Must be called from within a Tokio
    /// runtime.
    ///
    /// # Errors
    ///
    /// Fails with a not-found error, before anything is spawned, if the
    /// resource is not registered.
    pub fn execute(
        &self,
        resource_type: &str,
        name: &str,
        command: &str,
        args: &[String],
        cancel: CancellationToken,
    ) -> Result<ExecutionStream, TracingError> {
        let handler = self.handler(resource_type, name)?;
        let (sink, rx) = MessageSink::channel(cancel.clone());
        let failure_sink = sink.clone();

        let command = command.to_string();
        let args = args.to_vec();
        let token = cancel.clone();
        let span = tracing::debug_span!("execute", resource_type, name, command = %command);

        tokio::spawn(
            async move {
                debug!(?args, "Execution started");
                let outcome = AssertUnwindSafe(handler.execute(&command, &args, sink))
                    .catch_unwind()
                    .await;

                if let Err(payload) = outcome {
                    let reason = panic_message(payload.as_ref());
                    error!(%reason, "Handler panicked during execution");
                    failure_sink
                        .send(format!("execution failed: {}", reason))
                        .await;
                } else if token.is_cancelled() {
                    warn!("Execution finished after cancellation");
                } else {
                    debug!("Execution finished");
                }
            }
            .instrument(span),
        );

        Ok(ExecutionStream::new(rx, cancel))
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "handler panicked".to_string()
    }
}

#[cfg(test)]
#[path = "execute_tests.rs"]
mod tests;
