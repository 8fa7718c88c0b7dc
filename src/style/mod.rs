//! Style system: sparse property stores, shared style registry,
//! (part, state) selectors, and effective-value resolution.

pub mod prop;
pub mod resolve;
pub mod selector;
pub mod sheet;

pub use prop::{
    Coord, FlexAlign, FlexFlow, GridAlign, LayoutKind, StyleProp, StyleValue, TextAlignKind,
    TrackSize, ValueKind,
};
pub use resolve::{resolve_prop, ResolvedPart};
pub use selector::{Part, Selector};
pub use sheet::{Style, StyleError, StyleId, StyleRegistry};
