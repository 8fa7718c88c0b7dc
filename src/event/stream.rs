//! Per-object async event stream.

use tokio::sync::mpsc::error::TryRecvError;
use tokio::sync::mpsc::UnboundedReceiver;

use super::router::Event;

/// The consumer half of an object's event subscription.
///
/// Events are delivered here as an asynchronous hop: dispatch enqueues and
/// returns immediately, the subscriber observes the event on its next
/// `recv`. When the object is destroyed the producer side closes; `recv`
/// drains anything already queued (safe id-valued copies) and then returns
/// `None`, exactly once, forever after.
#[derive(Debug)]
pub struct EventStream {
    rx: UnboundedReceiver<Event>,
}

impl EventStream {
    pub(crate) fn new(rx: UnboundedReceiver<Event>) -> Self {
        Self { rx }
    }

    /// Wait for the next event. `None` once the stream is closed and drained.
    pub async fn recv(&mut self) -> Option<Event> {
        self.rx.recv().await
    }

    /// Non-blocking receive for synchronous loops and tests.
    pub fn try_recv(&mut self) -> Option<Event> {
        match self.rx.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    /// Whether the producer side has closed (the object was destroyed or the
    /// subscription was replaced). Queued events may still be pending.
    pub fn is_closed(&self) -> bool {
        self.rx.is_closed()
    }

    /// Drain everything currently queued without waiting.
    pub fn drain(&mut self) -> Vec<Event> {
        let mut out = Vec::new();
        while let Ok(event) = self.rx.try_recv() {
            out.push(event);
        }
        out
    }
}
