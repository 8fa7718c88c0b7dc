//! Node types: ObjId, WidgetKind, ObjData.

use std::any::Any;

use slotmap::new_key_type;

use super::flags::{ObjFlags, State};
use crate::geometry::Rect;
use crate::style::{Selector, Style, StyleId};

new_key_type! {
    /// Unique identifier for an object. Copy, lightweight (u64), generational:
    /// stale ids never resolve to a reused slot.
    pub struct ObjId;
}

/// Runtime widget type of an object.
///
/// Themes and the painter branch on this; per-widget state lives behind the
/// node's `widget_state` and is downcast by the typed handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetKind {
    Screen,
    Container,
    Button,
    ButtonMatrix,
    Label,
    Slider,
    Arc,
    Bar,
    Roller,
    Dropdown,
    TextArea,
    Image,
    Line,
}

/// A style attached to an object under a selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleEntry {
    pub style: StyleId,
    pub selector: Selector,
}

/// Data associated with a single object.
pub struct ObjData {
    /// Runtime widget type.
    pub kind: WidgetKind,
    /// Behavioral flags.
    pub flags: ObjFlags,
    /// Transient interaction state.
    pub state: State,
    /// Shared styles attached to this object, in attach order.
    pub styles: Vec<StyleEntry>,
    /// Per-object local style overrides (highest priority, main part).
    pub local: Style,
    /// Absolute layout rect from the last layout pass.
    pub rect: Rect,
    /// Widget-private state, downcast by the typed widget handle.
    pub widget_state: Option<Box<dyn Any>>,
    /// Caller-owned payload.
    pub user_data: Option<Box<dyn Any>>,
}

impl ObjData {
    /// Create node data for a widget kind with default flags and state.
    pub fn new(kind: WidgetKind) -> Self {
        Self {
            kind,
            flags: ObjFlags::empty(),
            state: State::DEFAULT,
            styles: Vec::new(),
            local: Style::new(),
            rect: Rect::default(),
            widget_state: None,
            user_data: None,
        }
    }

    /// Set initial flags (builder).
    pub fn with_flags(mut self, flags: ObjFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Attach widget-private state (builder).
    pub fn with_widget_state<T: Any>(mut self, state: T) -> Self {
        self.widget_state = Some(Box::new(state));
        self
    }

    /// Borrow the widget-private state as a concrete type.
    pub fn widget_state<T: Any>(&self) -> Option<&T> {
        self.widget_state.as_deref().and_then(|s| s.downcast_ref())
    }

    /// Mutably borrow the widget-private state as a concrete type.
    pub fn widget_state_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.widget_state.as_deref_mut().and_then(|s| s.downcast_mut())
    }

    /// Whether the object is hidden (flag, not style visibility).
    pub fn is_hidden(&self) -> bool {
        self.flags.contains(ObjFlags::HIDDEN)
    }
}

impl std::fmt::Debug for ObjData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjData")
            .field("kind", &self.kind)
            .field("flags", &self.flags)
            .field("state", &self.state)
            .field("styles", &self.styles.len())
            .field("rect", &self.rect)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_defaults() {
        let data = ObjData::new(WidgetKind::Button);
        assert_eq!(data.kind, WidgetKind::Button);
        assert_eq!(data.flags, ObjFlags::empty());
        assert_eq!(data.state, State::DEFAULT);
        assert!(data.styles.is_empty());
        assert!(data.widget_state.is_none());
        assert!(data.user_data.is_none());
    }

    #[test]
    fn builder_flags() {
        let data = ObjData::new(WidgetKind::Container)
            .with_flags(ObjFlags::CLICKABLE | ObjFlags::SCROLLABLE);
        assert!(data.flags.contains(ObjFlags::CLICKABLE));
        assert!(!data.is_hidden());
    }

    #[test]
    fn widget_state_roundtrip() {
        struct SliderState {
            value: i32,
        }
        let mut data =
            ObjData::new(WidgetKind::Slider).with_widget_state(SliderState { value: 42 });
        assert_eq!(data.widget_state::<SliderState>().unwrap().value, 42);
        data.widget_state_mut::<SliderState>().unwrap().value = 7;
        assert_eq!(data.widget_state::<SliderState>().unwrap().value, 7);
    }

    #[test]
    fn widget_state_wrong_type() {
        let data = ObjData::new(WidgetKind::Slider).with_widget_state(5i32);
        assert!(data.widget_state::<String>().is_none());
    }

    #[test]
    fn obj_id_is_copy() {
        fn assert_copy<T: Copy>() {}
        assert_copy::<ObjId>();
    }
}
