//! Style property keys and typed values.
//!
//! Every visual property is a [`StyleProp`] key with a declared [`ValueKind`].
//! The whole surface is driven from one `style_props!` table: the enum, the
//! kind lookup, and the typed accessor pairs on [`Style`](super::Style) are
//! all generated from it, so adding a property is a one-line change.

use crate::color::{Color, Opacity};
use crate::font::FontId;

/// A size or position coordinate in a style value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coord {
    /// Absolute pixels.
    Px(i32),
    /// Percentage of the parent dimension.
    Percent(i16),
    /// Size to fit content.
    Content,
}

impl Coord {
    pub const fn px(v: i32) -> Self {
        Coord::Px(v)
    }

    pub const fn percent(v: i16) -> Self {
        Coord::Percent(v)
    }
}

/// A grid track sizing function.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrackSize {
    /// Fixed pixel track.
    Px(i32),
    /// Fractional free-space unit.
    Fr(u16),
    /// Size the track to its content.
    Content,
}

/// Layout algorithm selected for a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutKind {
    /// Children are positioned manually (x/y coordinates).
    #[default]
    None,
    Flex,
    Grid,
}

/// Flex main-axis direction and wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlexFlow {
    #[default]
    Row,
    Column,
    RowWrap,
    ColumnWrap,
    RowReverse,
    ColumnReverse,
}

/// Placement of flex items along an axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlexAlign {
    #[default]
    Start,
    End,
    Center,
    SpaceBetween,
    SpaceAround,
    SpaceEvenly,
}

/// Alignment of an object within its grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GridAlign {
    #[default]
    Stretch,
    Start,
    Center,
    End,
}

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlignKind {
    #[default]
    Left,
    Center,
    Right,
}

/// The runtime kind of a style value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Int,
    Coord,
    Color,
    Opa,
    Bool,
    Font,
    Tracks,
}

/// A typed style value.
///
/// Enumerated properties (layout kind, flex flow, alignment) are carried as
/// `Int` with conversion handled by the typed accessors, keeping the value
/// union small.
#[derive(Debug, Clone, PartialEq)]
pub enum StyleValue {
    Int(i32),
    Coord(Coord),
    Color(Color),
    Opa(Opacity),
    Bool(bool),
    Font(FontId),
    Tracks(Vec<TrackSize>),
}

impl StyleValue {
    /// The kind of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            StyleValue::Int(_) => ValueKind::Int,
            StyleValue::Coord(_) => ValueKind::Coord,
            StyleValue::Color(_) => ValueKind::Color,
            StyleValue::Opa(_) => ValueKind::Opa,
            StyleValue::Bool(_) => ValueKind::Bool,
            StyleValue::Font(_) => ValueKind::Font,
            StyleValue::Tracks(_) => ValueKind::Tracks,
        }
    }
}

macro_rules! style_props {
    (
        auto { $( $variant:ident => $kind:ident, $ty:ty, $getter:ident, $setter:ident; )* }
        manual { $( $mvariant:ident => $mkind:ident; )* }
    ) => {
        /// Enumeration of all style property keys.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum StyleProp {
            $( $variant, )*
            $( $mvariant, )*
        }

        impl StyleProp {
            /// Every property key, for table-driven iteration.
            pub const ALL: &'static [StyleProp] = &[
                $( StyleProp::$variant, )*
                $( StyleProp::$mvariant, )*
            ];

            /// The value kind this property carries.
            pub fn kind(self) -> ValueKind {
                match self {
                    $( StyleProp::$variant => ValueKind::$kind, )*
                    $( StyleProp::$mvariant => ValueKind::$mkind, )*
                }
            }
        }

        impl super::sheet::Style {
            $(
                /// Typed getter generated from the property table.
                pub fn $getter(&self) -> Option<$ty> {
                    match self.get(StyleProp::$variant) {
                        Some(StyleValue::$kind(v)) => Some(*v),
                        _ => None,
                    }
                }

                /// Typed setter generated from the property table.
                pub fn $setter(&mut self, value: $ty) -> &mut Self {
                    self.set(StyleProp::$variant, StyleValue::$kind(value));
                    self
                }
            )*
        }
    };
}

style_props! {
    auto {
    // Sizing and position
    Width        => Coord, Coord,   width,          set_width;
    Height       => Coord, Coord,   height,         set_height;
    MinWidth     => Coord, Coord,   min_width,      set_min_width;
    MaxWidth     => Coord, Coord,   max_width,      set_max_width;
    MinHeight    => Coord, Coord,   min_height,     set_min_height;
    MaxHeight    => Coord, Coord,   max_height,     set_max_height;
    X            => Coord, Coord,   x,              set_x;
    Y            => Coord, Coord,   y,              set_y;
    // Padding and gaps
    PadTop       => Int,   i32,     pad_top,        set_pad_top;
    PadBottom    => Int,   i32,     pad_bottom,     set_pad_bottom;
    PadLeft      => Int,   i32,     pad_left,       set_pad_left;
    PadRight     => Int,   i32,     pad_right,      set_pad_right;
    PadRow       => Int,   i32,     pad_row,        set_pad_row;
    PadColumn    => Int,   i32,     pad_column,     set_pad_column;
    // Background
    BgColor      => Color, Color,   bg_color,       set_bg_color;
    BgOpa        => Opa,   Opacity, bg_opa,         set_bg_opa;
    // Border
    BorderColor  => Color, Color,   border_color,   set_border_color;
    BorderOpa    => Opa,   Opacity, border_opa,     set_border_opa;
    BorderWidth  => Int,   i32,     border_width,   set_border_width;
    // Outline
    OutlineColor => Color, Color,   outline_color,  set_outline_color;
    OutlineOpa   => Opa,   Opacity, outline_opa,    set_outline_opa;
    OutlineWidth => Int,   i32,     outline_width,  set_outline_width;
    OutlinePad   => Int,   i32,     outline_pad,    set_outline_pad;
    // Text
    TextColor    => Color, Color,   text_color,     set_text_color;
    TextOpa      => Opa,   Opacity, text_opa,       set_text_opa;
    TextFont     => Font,  FontId,  text_font,      set_text_font;
    TextLetterSpace => Int, i32,    text_letter_space, set_text_letter_space;
    TextLineSpace => Int,  i32,     text_line_space, set_text_line_space;
    // Line
    LineWidth    => Int,   i32,     line_width,     set_line_width;
    LineColor    => Color, Color,   line_color,     set_line_color;
    LineOpa      => Opa,   Opacity, line_opa,       set_line_opa;
    LineRounded  => Bool,  bool,    line_rounded,   set_line_rounded;
    // Arc
    ArcWidth     => Int,   i32,     arc_width,      set_arc_width;
    ArcColor     => Color, Color,   arc_color,      set_arc_color;
    ArcOpa       => Opa,   Opacity, arc_opa,        set_arc_opa;
    ArcRounded   => Bool,  bool,    arc_rounded,    set_arc_rounded;
    // Misc
    Radius       => Int,   i32,     radius,         set_radius;
    ClipCorner   => Bool,  bool,    clip_corner,    set_clip_corner;
    Opa          => Opa,   Opacity, opa,            set_opa;
    // Layout controls (enum-valued, carried as Int)
    Layout       => Int,   i32,     layout_raw,     set_layout_raw;
    FlexFlowProp => Int,   i32,     flex_flow_raw,  set_flex_flow_raw;
    FlexGrow     => Int,   i32,     flex_grow,      set_flex_grow;
    FlexMainPlace  => Int, i32,     flex_main_place_raw,  set_flex_main_place_raw;
    FlexCrossPlace => Int, i32,     flex_cross_place_raw, set_flex_cross_place_raw;
    // Grid child placement
    GridCellColPos  => Int, i32,    grid_cell_col_pos,  set_grid_cell_col_pos;
    GridCellColSpan => Int, i32,    grid_cell_col_span, set_grid_cell_col_span;
    GridCellRowPos  => Int, i32,    grid_cell_row_pos,  set_grid_cell_row_pos;
    GridCellRowSpan => Int, i32,    grid_cell_row_span, set_grid_cell_row_span;
    GridCellXAlign  => Int, i32,    grid_cell_x_align_raw, set_grid_cell_x_align_raw;
    GridCellYAlign  => Int, i32,    grid_cell_y_align_raw, set_grid_cell_y_align_raw;
    }
    manual {
    // Grid container templates: list-valued, accessors written by hand
    // on `Style` (borrowing getters do not fit the generated shape).
    GridRows => Tracks;
    GridCols => Tracks;
    }
}
