//! # ember-ui
//!
//! A retained-mode GUI engine for embedded targets: a widget tree with
//! sparse shared styles, bubbling event dispatch with per-object async
//! streams, taffy-powered flex/grid layout, and a dirty-rectangle render
//! pipeline flushing to a pluggable display driver.
//!
//! ## Core Systems
//!
//! - **[`obj`]** — Slotmap-backed object arena: flags, states, tree operations
//! - **[`style`]** — Sparse property store, shared styles, (part, state) selectors
//! - **[`event`]** — Event codes, bubbling dispatch, async event streams
//! - **[`layout`]** — Taffy-powered flexbox/grid layout from style properties
//! - **[`render`]** — Framebuffer, dirty-rect invalidation, painter, flush seam
//! - **[`theme`]** — Callback-driven default styling applied at creation
//! - **[`display`]** — Display resolution, background, screens, flush target
//! - **[`ui`]** — The engine context tying everything together, tick/refresh loop
//! - **[`widgets`]** — Typed widgets: Button, ButtonMatrix, Label, Slider,
//!   Arc, Bar, Roller, Dropdown, TextArea, Image, Line, flex/grid containers
//! - **[`geometry`]** — Point, Size, Rect primitives
//! - **[`color`]** — RGB color and opacity blending
//! - **[`font`]** — Font registry and the built-in bitmap font

// Foundation
pub mod color;
pub mod font;
pub mod geometry;

// Core systems
pub mod event;
pub mod layout;
pub mod obj;
pub mod style;

// Rendering
pub mod render;

// Engine surface
pub mod display;
pub mod theme;
pub mod ui;
pub mod widgets;

pub use color::{Color, Opacity};
pub use event::{Event, EventCode, EventStream, Flow};
pub use geometry::{Point, Rect, Size};
pub use obj::{ObjFlags, ObjId, State};
pub use render::{FlushTarget, FrameBuffer};
pub use style::{Part, Selector, StyleId, StyleProp, StyleValue};
pub use ui::{NullTarget, Ui, UiConfig};
