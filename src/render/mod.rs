//! Rendering: frame buffer, dirty-rect tracking, painting, refresh pipeline.

pub mod buffer;
pub mod invalidate;
pub mod painter;
pub mod pipeline;

pub use buffer::FrameBuffer;
pub use invalidate::InvalidationQueue;
pub use painter::Painter;
pub use pipeline::{FlushTarget, RenderPipeline};
