//! Themes: shared styles applied to objects at creation.
//!
//! A theme owns a set of registered styles and an apply callback that maps a
//! widget kind to the (style, selector) pairs new objects of that kind get
//! attached. Theme styles are ordinary shared styles: resolution treats them
//! like any other attachment, and later attachments override them.

use crate::color::{Color, Opacity};
use crate::font::{FontId, FontRegistry};
use crate::obj::{State, WidgetKind};
use crate::style::prop::Coord;
use crate::style::selector::{Part, Selector};
use crate::style::sheet::{Style, StyleId, StyleRegistry};

type ApplyFn = Box<dyn Fn(WidgetKind) -> Vec<(StyleId, Selector)>>;

/// A style theme.
pub struct Theme {
    pub primary: Color,
    pub secondary: Color,
    pub font_small: FontId,
    pub font_normal: FontId,
    pub font_large: FontId,
    apply: ApplyFn,
}

impl Theme {
    /// Build a theme from palette, fonts, and an apply callback.
    pub fn new(
        primary: Color,
        secondary: Color,
        fonts: (FontId, FontId, FontId),
        apply: impl Fn(WidgetKind) -> Vec<(StyleId, Selector)> + 'static,
    ) -> Self {
        Self {
            primary,
            secondary,
            font_small: fonts.0,
            font_normal: fonts.1,
            font_large: fonts.2,
            apply: Box::new(apply),
        }
    }

    /// The (style, selector) pairs to attach to a freshly created object.
    pub fn styles_for(&self, kind: WidgetKind) -> Vec<(StyleId, Selector)> {
        (self.apply)(kind)
    }

    /// The built-in light theme.
    ///
    /// Registers its shared styles into `styles` once; the returned theme
    /// hands out the same ids for every object it decorates.
    pub fn light(styles: &mut StyleRegistry, fonts: &FontRegistry) -> Self {
        let primary = Color::hex(0x2196f3);
        let secondary = Color::hex(0xff9800);
        let surface = Color::WHITE;
        let outline_gray = Color::hex(0xbdbdbd);
        let track_gray = Color::hex(0xe0e0e0);
        let on_primary = Color::WHITE;
        let ink = Color::hex(0x212121);

        let mut screen = Style::new();
        screen
            .set_bg_color(Color::hex(0xf5f5f5))
            .set_bg_opa(Opacity::COVER)
            .set_text_color(ink);
        let screen = styles.create(screen);

        let mut button = Style::new();
        button
            .set_bg_color(primary)
            .set_bg_opa(Opacity::COVER)
            .set_radius(4)
            .set_pad_left(8)
            .set_pad_right(8)
            .set_pad_top(4)
            .set_pad_bottom(4)
            .set_text_color(on_primary)
            .set_width(Coord::Content)
            .set_height(Coord::Content);
        let button = styles.create(button);

        let mut button_pressed = Style::new();
        button_pressed.set_bg_color(primary.mix(Color::BLACK, 48));
        let button_pressed = styles.create(button_pressed);

        let mut track = Style::new();
        track
            .set_bg_color(track_gray)
            .set_bg_opa(Opacity::COVER)
            .set_radius(6);
        let track = styles.create(track);

        let mut indicator = Style::new();
        indicator
            .set_bg_color(primary)
            .set_bg_opa(Opacity::COVER)
            .set_radius(6);
        let indicator = styles.create(indicator);

        let mut knob = Style::new();
        knob.set_bg_color(primary)
            .set_bg_opa(Opacity::COVER)
            .set_radius(16);
        let knob = styles.create(knob);

        let mut arc_track = Style::new();
        arc_track.set_arc_color(track_gray).set_arc_width(8);
        let arc_track = styles.create(arc_track);

        let mut arc_indicator = Style::new();
        arc_indicator.set_arc_color(primary).set_arc_width(8);
        let arc_indicator = styles.create(arc_indicator);

        let mut field = Style::new();
        field
            .set_bg_color(surface)
            .set_bg_opa(Opacity::COVER)
            .set_border_color(outline_gray)
            .set_border_width(1)
            .set_radius(4)
            .set_pad_left(4)
            .set_pad_right(4)
            .set_pad_top(4)
            .set_pad_bottom(4)
            .set_text_color(ink);
        let field = styles.create(field);

        let mut field_focused = Style::new();
        field_focused.set_border_color(primary);
        let field_focused = styles.create(field_focused);

        let mut matrix_cell = Style::new();
        matrix_cell
            .set_bg_color(surface)
            .set_bg_opa(Opacity::COVER)
            .set_border_color(outline_gray)
            .set_border_width(1)
            .set_radius(2)
            .set_text_color(ink);
        let matrix_cell = styles.create(matrix_cell);

        let mut selected = Style::new();
        selected
            .set_bg_color(primary)
            .set_bg_opa(Opacity::COVER)
            .set_text_color(on_primary);
        let selected = styles.create(selected);

        let font = fonts.default_font();
        Theme::new(primary, secondary, (font, font, font), move |kind| {
            let default = Selector::default();
            match kind {
                WidgetKind::Screen => vec![(screen, default)],
                WidgetKind::Button => vec![
                    (button, default),
                    (button_pressed, Selector::state(State::PRESSED)),
                ],
                WidgetKind::Slider => vec![
                    (track, default),
                    (indicator, Selector::part(Part::Indicator)),
                    (knob, Selector::part(Part::Knob)),
                ],
                WidgetKind::Bar => vec![
                    (track, default),
                    (indicator, Selector::part(Part::Indicator)),
                ],
                WidgetKind::Arc => vec![
                    (arc_track, default),
                    (arc_indicator, Selector::part(Part::Indicator)),
                ],
                WidgetKind::ButtonMatrix => vec![
                    (field, default),
                    (matrix_cell, Selector::part(Part::Items)),
                    (selected, Selector::part(Part::Selected)),
                ],
                WidgetKind::Roller | WidgetKind::Dropdown => vec![
                    (field, default),
                    (selected, Selector::part(Part::Selected)),
                ],
                WidgetKind::TextArea => vec![
                    (field, default),
                    (field_focused, Selector::state(State::FOCUSED)),
                ],
                WidgetKind::Container
                | WidgetKind::Label
                | WidgetKind::Image
                | WidgetKind::Line => Vec::new(),
            }
        })
    }
}

impl std::fmt::Debug for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Theme")
            .field("primary", &self.primary)
            .field("secondary", &self.secondary)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn light_theme() -> (Theme, StyleRegistry) {
        let mut styles = StyleRegistry::new();
        let fonts = FontRegistry::new();
        let theme = Theme::light(&mut styles, &fonts);
        (theme, styles)
    }

    #[test]
    fn light_registers_styles() {
        let (_theme, styles) = light_theme();
        assert!(styles.len() > 5);
    }

    #[test]
    fn button_gets_pressed_variant() {
        let (theme, styles) = light_theme();
        let entries = theme.styles_for(WidgetKind::Button);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].1, Selector::default());
        assert_eq!(entries[1].1, Selector::state(State::PRESSED));
        // The pressed style only overrides the background color.
        let pressed = styles.get(entries[1].0).unwrap();
        assert!(pressed.bg_color().is_some());
        assert!(pressed.radius().is_none());
    }

    #[test]
    fn slider_styles_cover_all_parts() {
        let (theme, _styles) = light_theme();
        let parts: Vec<Part> = theme
            .styles_for(WidgetKind::Slider)
            .iter()
            .map(|(_, sel)| sel.part)
            .collect();
        assert_eq!(parts, vec![Part::Main, Part::Indicator, Part::Knob]);
    }

    #[test]
    fn plain_widgets_get_nothing() {
        let (theme, _styles) = light_theme();
        assert!(theme.styles_for(WidgetKind::Label).is_empty());
        assert!(theme.styles_for(WidgetKind::Container).is_empty());
    }

    #[test]
    fn shared_ids_are_reused_across_kinds() {
        let (theme, _styles) = light_theme();
        let slider = theme.styles_for(WidgetKind::Slider);
        let bar = theme.styles_for(WidgetKind::Bar);
        // Slider and bar share the same track and indicator styles.
        assert_eq!(slider[0].0, bar[0].0);
        assert_eq!(slider[1].0, bar[1].0);
    }
}
