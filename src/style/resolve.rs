//! Effective style resolution.
//!
//! The effective value of a property on an object part is decided by, in
//! order of priority: the object's local style (main part only), then the
//! attached shared styles whose selector matches the object's current state
//! (higher state specificity wins, attach order breaks ties). Theme styles
//! are ordinary attachments made at creation time, so they participate here
//! without special casing. Anything still unset falls back to the engine
//! defaults baked into [`ResolvedPart`].

use crate::color::{Color, Opacity};
use crate::font::FontId;
use crate::obj::ObjData;

use super::prop::{StyleProp, StyleValue};
use super::selector::Part;
use super::sheet::StyleRegistry;

/// Resolve the effective value of `prop` for one part of an object.
///
/// Returns `None` when nothing attached to the object sets the property;
/// the caller supplies the default.
pub fn resolve_prop(
    data: &ObjData,
    registry: &StyleRegistry,
    part: Part,
    prop: StyleProp,
) -> Option<StyleValue> {
    // Local overrides win outright on the main part.
    if part == Part::Main {
        if let Some(v) = data.local.get(prop) {
            return Some(v.clone());
        }
    }

    // Among attached styles: best (specificity, attach order) match.
    let mut best: Option<(u32, usize, &StyleValue)> = None;
    for (order, entry) in data.styles.iter().enumerate() {
        if entry.selector.part != part || !entry.selector.matches(data.state) {
            continue;
        }
        let Some(style) = registry.get(entry.style) else {
            continue;
        };
        let Some(value) = style.get(prop) else {
            continue;
        };
        let key = (entry.selector.specificity(), order);
        if best.map_or(true, |(s, o, _)| key >= (s, o)) {
            best = Some((key.0, key.1, value));
        }
    }
    best.map(|(_, _, v)| v.clone())
}

/// The paint-relevant properties of one object part, fully defaulted.
///
/// Gathered once per object per paint pass so the painter never consults
/// the registry mid-stroke.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedPart {
    pub bg_color: Color,
    pub bg_opa: Opacity,
    pub border_color: Color,
    pub border_opa: Opacity,
    pub border_width: i32,
    pub outline_color: Color,
    pub outline_opa: Opacity,
    pub outline_width: i32,
    pub radius: i32,
    pub text_color: Color,
    pub text_opa: Opacity,
    pub text_font: FontId,
    pub line_color: Color,
    pub line_opa: Opacity,
    pub line_width: i32,
    pub arc_color: Color,
    pub arc_opa: Opacity,
    pub arc_width: i32,
    pub opa: Opacity,
    pub pad_top: i32,
    pub pad_bottom: i32,
    pub pad_left: i32,
    pub pad_right: i32,
}

impl ResolvedPart {
    /// Resolve every paint property of `part` with engine defaults.
    pub fn resolve(
        data: &ObjData,
        registry: &StyleRegistry,
        default_font: FontId,
        part: Part,
    ) -> Self {
        let int = |prop: StyleProp, dflt: i32| -> i32 {
            match resolve_prop(data, registry, part, prop) {
                Some(StyleValue::Int(v)) => v,
                _ => dflt,
            }
        };
        let color = |prop: StyleProp, dflt: Color| -> Color {
            match resolve_prop(data, registry, part, prop) {
                Some(StyleValue::Color(v)) => v,
                _ => dflt,
            }
        };
        let opa = |prop: StyleProp, dflt: Opacity| -> Opacity {
            match resolve_prop(data, registry, part, prop) {
                Some(StyleValue::Opa(v)) => v,
                _ => dflt,
            }
        };
        let font = match resolve_prop(data, registry, part, StyleProp::TextFont) {
            Some(StyleValue::Font(v)) => v,
            _ => default_font,
        };

        Self {
            bg_color: color(StyleProp::BgColor, Color::WHITE),
            bg_opa: opa(StyleProp::BgOpa, Opacity::TRANSPARENT),
            border_color: color(StyleProp::BorderColor, Color::BLACK),
            border_opa: opa(StyleProp::BorderOpa, Opacity::COVER),
            border_width: int(StyleProp::BorderWidth, 0),
            outline_color: color(StyleProp::OutlineColor, Color::BLACK),
            outline_opa: opa(StyleProp::OutlineOpa, Opacity::COVER),
            outline_width: int(StyleProp::OutlineWidth, 0),
            radius: int(StyleProp::Radius, 0),
            text_color: color(StyleProp::TextColor, Color::BLACK),
            text_opa: opa(StyleProp::TextOpa, Opacity::COVER),
            text_font: font,
            line_color: color(StyleProp::LineColor, Color::BLACK),
            line_opa: opa(StyleProp::LineOpa, Opacity::COVER),
            line_width: int(StyleProp::LineWidth, 1),
            arc_color: color(StyleProp::ArcColor, Color::rgb(0xc0, 0xc0, 0xc0)),
            arc_opa: opa(StyleProp::ArcOpa, Opacity::COVER),
            arc_width: int(StyleProp::ArcWidth, 6),
            opa: opa(StyleProp::Opa, Opacity::COVER),
            pad_top: int(StyleProp::PadTop, 0),
            pad_bottom: int(StyleProp::PadBottom, 0),
            pad_left: int(StyleProp::PadLeft, 0),
            pad_right: int(StyleProp::PadRight, 0),
        }
    }
}
