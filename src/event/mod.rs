//! Event system: codes, dispatch with bubbling, per-object async streams.

pub mod code;
pub mod router;
pub mod stream;

pub use code::EventCode;
pub use router::{Event, EventRouter, Flow};
pub use stream::EventStream;
