//! Layout: taffy integration and style-to-layout resolution.

pub mod engine;
pub mod resolve;

pub use engine::LayoutEngine;
