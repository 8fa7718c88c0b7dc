//! Event dispatch: synchronous handlers, bubbling, stream hand-off.
//!
//! The router owns two side tables keyed by [`ObjId`]: synchronous handler
//! lists and async stream senders. Dispatch delivers to the target, then
//! climbs the tree while the just-delivered-to object carries
//! `EVENT_BUBBLE`. `target` stays the origin; `current_target` follows the
//! climb. The side tables never hold owning references into the object
//! arena, so destruction order can never dangle.

use slotmap::SecondaryMap;
use tokio::sync::mpsc;
use tracing::trace;

use super::code::EventCode;
use super::stream::EventStream;
use crate::obj::{ObjFlags, ObjId, ObjTree};

/// A transient event value.
///
/// Carries arena ids, not references: an `Event` held across the async hop
/// stays valid after the target is destroyed — resolving the ids simply
/// yields nothing. No delivery can observe freed state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event {
    /// What happened.
    pub code: EventCode,
    /// The object the event was generated for.
    pub target: ObjId,
    /// The object currently being delivered to (changes while bubbling).
    pub current_target: ObjId,
}

/// Handler verdict: keep bubbling or stop after the current object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Flow {
    #[default]
    Continue,
    Stop,
}

type Handler = Box<dyn FnMut(&Event) -> Flow>;

/// Routes events through the object tree.
pub struct EventRouter {
    handlers: SecondaryMap<ObjId, Vec<Handler>>,
    streams: SecondaryMap<ObjId, mpsc::UnboundedSender<Event>>,
}

impl EventRouter {
    /// Create an empty router.
    pub fn new() -> Self {
        Self {
            handlers: SecondaryMap::new(),
            streams: SecondaryMap::new(),
        }
    }

    /// Register a synchronous handler for an object.
    ///
    /// Handlers run inside dispatch, in registration order, before the
    /// stream hand-off.
    pub fn add_handler(&mut self, id: ObjId, handler: impl FnMut(&Event) -> Flow + 'static) {
        self.handlers
            .entry(id)
            .expect("handler target has been destroyed")
            .or_default()
            .push(Box::new(handler));
    }

    /// Open the async event stream for an object.
    ///
    /// One stream per object: subscribing again closes the previous
    /// subscription's producer side.
    pub fn subscribe(&mut self, id: ObjId) -> EventStream {
        let (tx, rx) = mpsc::unbounded_channel();
        // Replacing the sender drops (closes) any previous subscription.
        self.streams.insert(id, tx);
        EventStream::new(rx)
    }

    /// Whether an object currently has a live stream subscription.
    pub fn has_subscriber(&self, id: ObjId) -> bool {
        self.streams.get(id).is_some_and(|tx| !tx.is_closed())
    }

    /// Dispatch an event generated for `target`.
    ///
    /// Synchronous handlers run immediately; stream delivery is an async
    /// hop (enqueue now, subscriber observes later), so subscriber code
    /// never runs reentrantly inside dispatch. Returns the number of
    /// objects the event was delivered to.
    pub fn dispatch(&mut self, tree: &ObjTree, target: ObjId, code: EventCode) -> usize {
        if !tree.contains(target) {
            return 0;
        }
        trace!(?code, ?target, "dispatch");

        let mut delivered = 0;
        let mut current = target;
        loop {
            let event = Event {
                code,
                target,
                current_target: current,
            };
            let flow = self.deliver(&event);
            delivered += 1;

            if flow == Flow::Stop {
                break;
            }
            // Bubble while the object just delivered to requests it.
            let bubbles = tree
                .get(current)
                .is_some_and(|d| d.flags.contains(ObjFlags::EVENT_BUBBLE));
            match tree.parent(current).filter(|_| bubbles) {
                Some(parent) => current = parent,
                None => break,
            }
        }
        delivered
    }

    /// Deliver one event to one object: handlers, then the stream.
    fn deliver(&mut self, event: &Event) -> Flow {
        let mut flow = Flow::Continue;
        if let Some(handlers) = self.handlers.get_mut(event.current_target) {
            for handler in handlers.iter_mut() {
                if handler(event) == Flow::Stop {
                    flow = Flow::Stop;
                }
            }
        }
        // A closed or absent stream is not an error; the send is best-effort
        // and never blocks.
        if let Some(tx) = self.streams.get(event.current_target) {
            let _ = tx.send(*event);
        }
        flow
    }

    /// Tear down an object's routing state.
    ///
    /// Dropping the sender closes the stream exactly once; events already
    /// queued remain receivable by the subscriber.
    pub fn close(&mut self, id: ObjId) {
        self.handlers.remove(id);
        self.streams.remove(id);
    }
}

impl Default for EventRouter {
    fn default() -> Self {
        Self::new()
    }
}
