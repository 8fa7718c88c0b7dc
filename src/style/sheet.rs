//! Sparse style store and the shared style registry.
//!
//! A [`Style`] is a sparse `StyleProp -> StyleValue` map. Styles meant to be
//! shared between objects live in the [`StyleRegistry`] and are referenced by
//! [`StyleId`]; the registry tracks attach counts so a style detached from
//! one object survives while other owners remain.

use slotmap::{new_key_type, SlotMap};

use super::prop::{FlexAlign, FlexFlow, GridAlign, LayoutKind, StyleProp, StyleValue, TrackSize};

new_key_type! {
    /// Handle to a style in the [`StyleRegistry`].
    pub struct StyleId;
}

/// Errors from style operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StyleError {
    #[error("value kind {got:?} does not match property kind {expected:?}")]
    KindMismatch {
        expected: super::prop::ValueKind,
        got: super::prop::ValueKind,
    },
}

/// A sparse set of style property overrides.
///
/// Properties not present are "unset": resolution falls through to other
/// attached styles and finally to engine defaults. Insertion order is not
/// significant; a property occurs at most once.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Style {
    props: Vec<(StyleProp, StyleValue)>,
}

impl Style {
    /// Create an empty style.
    pub fn new() -> Self {
        Self { props: Vec::new() }
    }

    /// Generic keyed lookup.
    pub fn get(&self, prop: StyleProp) -> Option<&StyleValue> {
        self.props.iter().find(|(p, _)| *p == prop).map(|(_, v)| v)
    }

    /// Generic keyed store. Replaces any existing value for the key.
    ///
    /// # Panics
    ///
    /// Panics if the value kind does not match the property's declared kind;
    /// the typed accessors make this unreachable in well-formed code.
    pub fn set(&mut self, prop: StyleProp, value: StyleValue) {
        assert_eq!(
            value.kind(),
            prop.kind(),
            "style value kind must match property kind"
        );
        if let Some(slot) = self.props.iter_mut().find(|(p, _)| *p == prop) {
            slot.1 = value;
        } else {
            self.props.push((prop, value));
        }
    }

    /// Fallible variant of [`set`](Self::set) for table-driven callers.
    pub fn try_set(&mut self, prop: StyleProp, value: StyleValue) -> Result<(), StyleError> {
        if value.kind() != prop.kind() {
            return Err(StyleError::KindMismatch {
                expected: prop.kind(),
                got: value.kind(),
            });
        }
        self.set(prop, value);
        Ok(())
    }

    /// Remove a property. Returns the previous value if one was set.
    pub fn remove(&mut self, prop: StyleProp) -> Option<StyleValue> {
        let idx = self.props.iter().position(|(p, _)| *p == prop)?;
        Some(self.props.swap_remove(idx).1)
    }

    /// Whether a property is set.
    pub fn has(&self, prop: StyleProp) -> bool {
        self.get(prop).is_some()
    }

    /// Number of set properties.
    pub fn len(&self) -> usize {
        self.props.len()
    }

    /// Whether no properties are set.
    pub fn is_empty(&self) -> bool {
        self.props.is_empty()
    }

    /// Iterate over set properties.
    pub fn iter(&self) -> impl Iterator<Item = (StyleProp, &StyleValue)> {
        self.props.iter().map(|(p, v)| (*p, v))
    }

    // ── Enum-valued and list-valued accessors (not macro-generated) ──

    pub(crate) fn layout_from_raw(v: i32) -> LayoutKind {
        match v {
            1 => LayoutKind::Flex,
            2 => LayoutKind::Grid,
            _ => LayoutKind::None,
        }
    }

    /// Layout algorithm for a container.
    pub fn layout(&self) -> Option<LayoutKind> {
        self.layout_raw().map(Self::layout_from_raw)
    }

    pub fn set_layout(&mut self, kind: LayoutKind) -> &mut Self {
        self.set_layout_raw(kind as i32)
    }

    pub(crate) fn flex_flow_from_raw(v: i32) -> FlexFlow {
        match v {
            1 => FlexFlow::Column,
            2 => FlexFlow::RowWrap,
            3 => FlexFlow::ColumnWrap,
            4 => FlexFlow::RowReverse,
            5 => FlexFlow::ColumnReverse,
            _ => FlexFlow::Row,
        }
    }

    /// Flex flow direction.
    pub fn flex_flow(&self) -> Option<FlexFlow> {
        self.flex_flow_raw().map(Self::flex_flow_from_raw)
    }

    pub fn set_flex_flow(&mut self, flow: FlexFlow) -> &mut Self {
        self.set_flex_flow_raw(flow as i32)
    }

    pub(crate) fn flex_align_from_raw(v: i32) -> FlexAlign {
        match v {
            1 => FlexAlign::End,
            2 => FlexAlign::Center,
            3 => FlexAlign::SpaceBetween,
            4 => FlexAlign::SpaceAround,
            5 => FlexAlign::SpaceEvenly,
            _ => FlexAlign::Start,
        }
    }

    /// Placement of children along the flex main axis.
    pub fn flex_main_place(&self) -> Option<FlexAlign> {
        self.flex_main_place_raw().map(Self::flex_align_from_raw)
    }

    pub fn set_flex_main_place(&mut self, align: FlexAlign) -> &mut Self {
        self.set_flex_main_place_raw(align as i32)
    }

    /// Placement of children along the flex cross axis.
    pub fn flex_cross_place(&self) -> Option<FlexAlign> {
        self.flex_cross_place_raw().map(Self::flex_align_from_raw)
    }

    pub fn set_flex_cross_place(&mut self, align: FlexAlign) -> &mut Self {
        self.set_flex_cross_place_raw(align as i32)
    }

    pub(crate) fn grid_align_from_raw(v: i32) -> GridAlign {
        match v {
            1 => GridAlign::Start,
            2 => GridAlign::Center,
            3 => GridAlign::End,
            _ => GridAlign::Stretch,
        }
    }

    /// Alignment of this object inside its grid cell, x axis.
    pub fn grid_cell_x_align(&self) -> Option<GridAlign> {
        self.grid_cell_x_align_raw().map(Self::grid_align_from_raw)
    }

    pub fn set_grid_cell_x_align(&mut self, align: GridAlign) -> &mut Self {
        self.set_grid_cell_x_align_raw(align as i32)
    }

    /// Alignment of this object inside its grid cell, y axis.
    pub fn grid_cell_y_align(&self) -> Option<GridAlign> {
        self.grid_cell_y_align_raw().map(Self::grid_align_from_raw)
    }

    pub fn set_grid_cell_y_align(&mut self, align: GridAlign) -> &mut Self {
        self.set_grid_cell_y_align_raw(align as i32)
    }

    /// Grid row track template.
    pub fn grid_rows(&self) -> Option<&[TrackSize]> {
        match self.get(StyleProp::GridRows) {
            Some(StyleValue::Tracks(t)) => Some(t),
            _ => None,
        }
    }

    pub fn set_grid_rows(&mut self, tracks: Vec<TrackSize>) -> &mut Self {
        self.set(StyleProp::GridRows, StyleValue::Tracks(tracks));
        self
    }

    /// Grid column track template.
    pub fn grid_cols(&self) -> Option<&[TrackSize]> {
        match self.get(StyleProp::GridCols) {
            Some(StyleValue::Tracks(t)) => Some(t),
            _ => None,
        }
    }

    pub fn set_grid_cols(&mut self, tracks: Vec<TrackSize>) -> &mut Self {
        self.set(StyleProp::GridCols, StyleValue::Tracks(tracks));
        self
    }
}

/// A registered style plus its attach bookkeeping.
#[derive(Debug)]
struct StyleRec {
    style: Style,
    attach_count: u32,
}

/// Registry of shared styles.
///
/// Styles are created here and referenced by id from any number of objects.
/// The registry does not know which objects attach a style — only how many
/// attachments exist, which is what destruction safety needs.
#[derive(Debug, Default)]
pub struct StyleRegistry {
    styles: SlotMap<StyleId, StyleRec>,
}

impl StyleRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            styles: SlotMap::with_key(),
        }
    }

    /// Register a style, returning its shared id.
    pub fn create(&mut self, style: Style) -> StyleId {
        self.styles.insert(StyleRec {
            style,
            attach_count: 0,
        })
    }

    /// Borrow a style. `None` for stale ids.
    pub fn get(&self, id: StyleId) -> Option<&Style> {
        self.styles.get(id).map(|rec| &rec.style)
    }

    /// Mutably borrow a style. `None` for stale ids.
    ///
    /// Callers are responsible for invalidating objects that reference the
    /// style (the `Ui` wrapper does this).
    pub fn get_mut(&mut self, id: StyleId) -> Option<&mut Style> {
        self.styles.get_mut(id).map(|rec| &mut rec.style)
    }

    /// Record one attachment.
    pub(crate) fn attach(&mut self, id: StyleId) {
        if let Some(rec) = self.styles.get_mut(id) {
            rec.attach_count += 1;
        }
    }

    /// Record one detachment.
    pub(crate) fn detach(&mut self, id: StyleId) {
        if let Some(rec) = self.styles.get_mut(id) {
            rec.attach_count = rec.attach_count.saturating_sub(1);
        }
    }

    /// Number of live attachments of a style.
    pub fn attach_count(&self, id: StyleId) -> u32 {
        self.styles.get(id).map_or(0, |rec| rec.attach_count)
    }

    /// Destroy a style.
    ///
    /// # Panics
    ///
    /// Panics if the style is still attached anywhere; destroying a resident
    /// style is a caller bug.
    pub fn destroy(&mut self, id: StyleId) {
        if let Some(rec) = self.styles.get(id) {
            assert_eq!(
                rec.attach_count, 0,
                "cannot destroy a style that is still attached"
            );
            self.styles.remove(id);
        }
    }

    /// Whether the registry contains a style with the given id.
    pub fn contains(&self, id: StyleId) -> bool {
        self.styles.contains_key(id)
    }

    /// Number of registered styles.
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }
}
