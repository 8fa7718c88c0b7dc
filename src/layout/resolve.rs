//! Effective style -> taffy Style conversion.
//!
//! Bridges the engine's style model ([`Coord`], [`TrackSize`], flex and grid
//! properties) to taffy's layout types. Each object's layout inputs are
//! resolved through the style table (local style, then attached styles) and
//! mapped onto a [`taffy::Style`] for the layout pass.

use taffy::prelude::*;

use crate::obj::{ObjData, ObjFlags};
use crate::style::prop::{Coord, FlexAlign, FlexFlow, LayoutKind, StyleProp, StyleValue, TrackSize};
use crate::style::resolve::resolve_prop;
use crate::style::selector::Part;
use crate::style::sheet::{Style as EngineStyle, StyleRegistry};

fn int_prop(data: &ObjData, reg: &StyleRegistry, prop: StyleProp) -> Option<i32> {
    match resolve_prop(data, reg, Part::Main, prop) {
        Some(StyleValue::Int(v)) => Some(v),
        _ => None,
    }
}

fn coord_prop(data: &ObjData, reg: &StyleRegistry, prop: StyleProp) -> Option<Coord> {
    match resolve_prop(data, reg, Part::Main, prop) {
        Some(StyleValue::Coord(v)) => Some(v),
        _ => None,
    }
}

fn tracks_prop(data: &ObjData, reg: &StyleRegistry, prop: StyleProp) -> Option<Vec<TrackSize>> {
    match resolve_prop(data, reg, Part::Main, prop) {
        Some(StyleValue::Tracks(v)) => Some(v),
        _ => None,
    }
}

/// The layout algorithm an object applies to its children.
pub fn container_layout(data: &ObjData, reg: &StyleRegistry) -> LayoutKind {
    int_prop(data, reg, StyleProp::Layout)
        .map(EngineStyle::layout_from_raw)
        .unwrap_or_default()
}

/// Convert a [`Coord`] to a taffy [`Dimension`] for sizing contexts.
///
/// `Content` maps to auto: taffy sizes the node from its children, which is
/// the fit-content behavior the style model asks for.
pub fn coord_to_dimension(coord: Coord) -> Dimension {
    match coord {
        Coord::Px(v) => Dimension::from_length(v as f32),
        Coord::Percent(v) => Dimension::from_percent(v as f32 / 100.0),
        Coord::Content => Dimension::AUTO,
    }
}

/// Convert a [`Coord`] to a [`LengthPercentageAuto`] for inset contexts.
pub fn coord_to_lpa(coord: Coord) -> LengthPercentageAuto {
    match coord {
        Coord::Px(v) => LengthPercentageAuto::from_length(v as f32),
        Coord::Percent(v) => LengthPercentageAuto::from_percent(v as f32 / 100.0),
        Coord::Content => LengthPercentageAuto::AUTO,
    }
}

fn flex_align_to_justify(align: FlexAlign) -> JustifyContent {
    match align {
        FlexAlign::Start => JustifyContent::FlexStart,
        FlexAlign::End => JustifyContent::FlexEnd,
        FlexAlign::Center => JustifyContent::Center,
        FlexAlign::SpaceBetween => JustifyContent::SpaceBetween,
        FlexAlign::SpaceAround => JustifyContent::SpaceAround,
        FlexAlign::SpaceEvenly => JustifyContent::SpaceEvenly,
    }
}

fn flex_align_to_items(align: FlexAlign) -> AlignItems {
    match align {
        FlexAlign::End => AlignItems::FlexEnd,
        FlexAlign::Center => AlignItems::Center,
        // The distribute variants only make sense on the main axis.
        _ => AlignItems::FlexStart,
    }
}

fn grid_align_to_items(align: crate::style::prop::GridAlign) -> AlignItems {
    use crate::style::prop::GridAlign;
    match align {
        GridAlign::Stretch => AlignItems::Stretch,
        GridAlign::Start => AlignItems::Start,
        GridAlign::Center => AlignItems::Center,
        GridAlign::End => AlignItems::End,
    }
}

/// Resolve one object's layout inputs into a [`taffy::Style`].
///
/// `parent_layout` is the layout algorithm of the object's parent, `None`
/// for screens. Children of a `LayoutKind::None` parent are positioned
/// absolutely from their `x`/`y` style coordinates; flagged floating or
/// layout-ignoring objects get the same treatment inside managed layouts.
pub fn resolve_node_style(
    data: &ObjData,
    reg: &StyleRegistry,
    parent_layout: Option<LayoutKind>,
) -> taffy::Style {
    let mut style = taffy::Style::default();

    if data.is_hidden() {
        style.display = Display::None;
        return style;
    }

    // What this object does to its children.
    match container_layout(data, reg) {
        LayoutKind::None => style.display = Display::Block,
        LayoutKind::Flex => {
            style.display = Display::Flex;
            let flow = int_prop(data, reg, StyleProp::FlexFlowProp)
                .map(EngineStyle::flex_flow_from_raw)
                .unwrap_or_default();
            style.flex_direction = match flow {
                FlexFlow::Row | FlexFlow::RowWrap => FlexDirection::Row,
                FlexFlow::Column | FlexFlow::ColumnWrap => FlexDirection::Column,
                FlexFlow::RowReverse => FlexDirection::RowReverse,
                FlexFlow::ColumnReverse => FlexDirection::ColumnReverse,
            };
            style.flex_wrap = match flow {
                FlexFlow::RowWrap | FlexFlow::ColumnWrap => FlexWrap::Wrap,
                _ => FlexWrap::NoWrap,
            };
            if let Some(v) = int_prop(data, reg, StyleProp::FlexMainPlace) {
                style.justify_content =
                    Some(flex_align_to_justify(EngineStyle::flex_align_from_raw(v)));
            }
            if let Some(v) = int_prop(data, reg, StyleProp::FlexCrossPlace) {
                style.align_items = Some(flex_align_to_items(EngineStyle::flex_align_from_raw(v)));
            }
        }
        LayoutKind::Grid => {
            style.display = Display::Grid;
            if let Some(tracks) = tracks_prop(data, reg, StyleProp::GridRows) {
                style.grid_template_rows = tracks
                    .iter()
                    .map(|t| match t {
                        TrackSize::Px(v) => length(*v as f32),
                        TrackSize::Fr(v) => fr(*v as f32),
                        TrackSize::Content => auto(),
                    })
                    .collect();
            }
            if let Some(tracks) = tracks_prop(data, reg, StyleProp::GridCols) {
                style.grid_template_columns = tracks
                    .iter()
                    .map(|t| match t {
                        TrackSize::Px(v) => length(*v as f32),
                        TrackSize::Fr(v) => fr(*v as f32),
                        TrackSize::Content => auto(),
                    })
                    .collect();
            }
        }
    }

    // Sizing.
    if let Some(w) = coord_prop(data, reg, StyleProp::Width) {
        style.size.width = coord_to_dimension(w);
    }
    if let Some(h) = coord_prop(data, reg, StyleProp::Height) {
        style.size.height = coord_to_dimension(h);
    }
    if let Some(w) = coord_prop(data, reg, StyleProp::MinWidth) {
        style.min_size.width = coord_to_dimension(w);
    }
    if let Some(h) = coord_prop(data, reg, StyleProp::MinHeight) {
        style.min_size.height = coord_to_dimension(h);
    }
    if let Some(w) = coord_prop(data, reg, StyleProp::MaxWidth) {
        style.max_size.width = coord_to_dimension(w);
    }
    if let Some(h) = coord_prop(data, reg, StyleProp::MaxHeight) {
        style.max_size.height = coord_to_dimension(h);
    }

    // Padding and track gaps.
    style.padding = taffy::geometry::Rect {
        top: LengthPercentage::from_length(
            int_prop(data, reg, StyleProp::PadTop).unwrap_or(0) as f32
        ),
        bottom: LengthPercentage::from_length(
            int_prop(data, reg, StyleProp::PadBottom).unwrap_or(0) as f32,
        ),
        left: LengthPercentage::from_length(
            int_prop(data, reg, StyleProp::PadLeft).unwrap_or(0) as f32,
        ),
        right: LengthPercentage::from_length(
            int_prop(data, reg, StyleProp::PadRight).unwrap_or(0) as f32,
        ),
    };
    style.gap = taffy::geometry::Size {
        width: LengthPercentage::from_length(
            int_prop(data, reg, StyleProp::PadColumn).unwrap_or(0) as f32,
        ),
        height: LengthPercentage::from_length(
            int_prop(data, reg, StyleProp::PadRow).unwrap_or(0) as f32,
        ),
    };

    // How this object behaves inside its parent.
    let manually_positioned = matches!(parent_layout, Some(LayoutKind::None));
    let floating = data
        .flags
        .intersects(ObjFlags::FLOATING | ObjFlags::IGNORE_LAYOUT);
    if parent_layout.is_some() && (manually_positioned || floating) {
        style.position = Position::Absolute;
        style.inset = taffy::geometry::Rect {
            left: coord_to_lpa(coord_prop(data, reg, StyleProp::X).unwrap_or(Coord::Px(0))),
            top: coord_to_lpa(coord_prop(data, reg, StyleProp::Y).unwrap_or(Coord::Px(0))),
            right: LengthPercentageAuto::AUTO,
            bottom: LengthPercentageAuto::AUTO,
        };
    }

    if let Some(grow) = int_prop(data, reg, StyleProp::FlexGrow) {
        style.flex_grow = grow as f32;
    }

    if matches!(parent_layout, Some(LayoutKind::Grid)) {
        if let Some(col) = int_prop(data, reg, StyleProp::GridCellColPos) {
            let cols = int_prop(data, reg, StyleProp::GridCellColSpan).unwrap_or(1);
            style.grid_column = taffy::geometry::Line {
                start: line(col as i16 + 1),
                end: span(cols.max(1) as u16),
            };
        }
        if let Some(row) = int_prop(data, reg, StyleProp::GridCellRowPos) {
            let rows = int_prop(data, reg, StyleProp::GridCellRowSpan).unwrap_or(1);
            style.grid_row = taffy::geometry::Line {
                start: line(row as i16 + 1),
                end: span(rows.max(1) as u16),
            };
        }
        if let Some(v) = int_prop(data, reg, StyleProp::GridCellXAlign) {
            style.justify_self = Some(grid_align_to_items(EngineStyle::grid_align_from_raw(v)));
        }
        if let Some(v) = int_prop(data, reg, StyleProp::GridCellYAlign) {
            style.align_self = Some(grid_align_to_items(EngineStyle::grid_align_from_raw(v)));
        }
    }

    style
}
