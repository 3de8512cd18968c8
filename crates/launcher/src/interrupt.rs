//! Ctrl-C listening for launched chains.
//!
//! The listener is registered before any child is spawned, so an interrupt
//! that arrives while the chain is starting, or that also ends the children,
//! is still seen.

use std::future::poll_fn;
use std::io;
use std::task::{Context, Poll};

#[cfg(unix)]
type InterruptStream = tokio::signal::unix::Signal;

#[cfg(windows)]
type InterruptStream = tokio::signal::windows::CtrlC;

#[cfg(unix)]
fn register() -> io::Result<InterruptStream> {
    use tokio::signal::unix::{signal, SignalKind};
    signal(SignalKind::interrupt())
}

#[cfg(windows)]
fn register() -> io::Result<InterruptStream> {
    tokio::signal::windows::ctrl_c()
}

/// Remembers whether the user interrupted the run.
pub(crate) struct InterruptListener {
    stream: Option<InterruptStream>,
    received: bool,
}

impl InterruptListener {
    /// Must be called from within a tokio runtime.
    pub(crate) fn arm() -> Self {
        let stream = match register() {
            Ok(stream) => Some(stream),
            Err(e) => {
                tracing::warn!(error = %e, "Cannot listen for interrupts");
                None
            }
        };
        Self {
            stream,
            received: false,
        }
    }

    fn poll_interrupt(&mut self, cx: &mut Context<'_>) -> Poll<()> {
        if self.received {
            return Poll::Ready(());
        }
        let Some(stream) = self.stream.as_mut() else {
            return Poll::Pending;
        };
        match stream.poll_recv(cx) {
            Poll::Ready(Some(())) => {
                self.received = true;
                Poll::Ready(())
            }
            // The signal driver went away; no interrupt can arrive any more.
            Poll::Ready(None) => {
                self.stream = None;
                Poll::Pending
            }
            Poll::Pending => Poll::Pending,
        }
    }

    /// Completes once an interrupt arrives. Never completes if listening
    /// could not be set up.
    pub(crate) async fn recv(&mut self) {
        poll_fn(|cx| self.poll_interrupt(cx)).await
    }

    /// Whether an interrupt has arrived so far, without waiting for one.
    pub(crate) async fn received(&mut self) -> bool {
        // Give the signal driver a turn to deliver a pending notification.
        tokio::task::yield_now().await;
        poll_fn(|cx| Poll::Ready(self.poll_interrupt(cx).is_ready())).await
    }
}
