//! The refresh pipeline: layout, damage, paint, flush.
//!
//! A refresh runs in four phases. If the tree or any layout-relevant style
//! changed, the layout engine recomputes and every moved or resized object
//! invalidates its old and new rects (raising `SizeChanged` where the size
//! part changed). The damaged regions are then drained from the
//! [`InvalidationQueue`], each is repainted by walking the visible tree in
//! document order, and each finished region is handed to the [`FlushTarget`].

use tracing::debug;

use crate::color::{Color, Opacity};
use crate::event::{EventCode, EventRouter};
use crate::font::FontRegistry;
use crate::geometry::{Point, Rect};
use crate::layout::LayoutEngine;
use crate::obj::{ObjData, ObjId, ObjTree, State, WidgetKind};
use crate::style::prop::{StyleProp, StyleValue, TextAlignKind};
use crate::style::resolve::{resolve_prop, ResolvedPart};
use crate::style::selector::Part;
use crate::style::sheet::StyleRegistry;
use crate::widgets::arc::ArcState;
use crate::widgets::bar::BarState;
use crate::widgets::button_matrix::{ButtonCtrl, ButtonMatrixState};
use crate::widgets::dropdown::DropdownState;
use crate::widgets::image::{ImageSource, ImageState};
use crate::widgets::label::LabelState;
use crate::widgets::line::LineState;
use crate::widgets::roller::RollerState;
use crate::widgets::slider::SliderState;
use crate::widgets::textarea::TextAreaState;

use super::buffer::FrameBuffer;
use super::invalidate::InvalidationQueue;
use super::painter::Painter;

/// Receives finished frame regions.
///
/// The engine does not own a display device; the embedder implements this
/// to copy damaged regions out of the frame buffer to the real surface.
pub trait FlushTarget {
    fn flush(&mut self, area: Rect, frame: &FrameBuffer);
}

/// Owns the frame buffer, the layout engine, and the damage queue.
pub struct RenderPipeline {
    layout: LayoutEngine,
    dirty: InvalidationQueue,
    frame: FrameBuffer,
    layout_dirty: bool,
}

impl RenderPipeline {
    /// Create a pipeline with a frame buffer of the given resolution.
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            layout: LayoutEngine::new(),
            dirty: InvalidationQueue::new(),
            frame: FrameBuffer::new(width, height, Color::BLACK),
            layout_dirty: true,
        }
    }

    /// The composited frame.
    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    /// Request a layout pass on the next refresh.
    pub fn mark_layout_dirty(&mut self) {
        self.layout_dirty = true;
    }

    /// Queue a damaged region.
    pub fn invalidate(&mut self, rect: Rect) {
        self.dirty.add(rect, self.frame.bounds());
    }

    /// Queue the whole display.
    pub fn invalidate_all(&mut self) {
        self.dirty.add_all(self.frame.bounds());
    }

    /// Whether the next refresh has work to do.
    pub fn has_work(&self) -> bool {
        self.layout_dirty || !self.dirty.is_empty()
    }

    /// Run one refresh for the active screen.
    ///
    /// Returns the number of regions flushed; zero when nothing was damaged.
    #[allow(clippy::too_many_arguments)]
    pub fn refresh(
        &mut self,
        objs: &mut ObjTree,
        registry: &StyleRegistry,
        fonts: &FontRegistry,
        router: &mut EventRouter,
        screen: ObjId,
        bg_color: Color,
        bg_opa: Opacity,
        target: &mut dyn FlushTarget,
    ) -> usize {
        if self.layout_dirty {
            self.relayout(objs, registry, router, screen);
            self.layout_dirty = false;
        }
        if self.dirty.is_empty() {
            return 0;
        }

        // Document-order paint list, skipping hidden subtrees whole. Each
        // entry carries the object's painted extent: outlines, the slider
        // knob, and an open dropdown list all draw outside the layout rect,
        // so culling against the rect alone would skip objects whose
        // out-of-rect pixels fall inside the damaged region.
        let mut order = Vec::new();
        let mut stack = vec![screen];
        while let Some(id) = stack.pop() {
            let Some(data) = objs.get(id) else {
                continue;
            };
            if data.is_hidden() {
                continue;
            }
            order.push((id, painted_extent(data, registry, fonts)));
            for &child in objs.children(id).iter().rev() {
                stack.push(child);
            }
        }

        let regions = self.dirty.take();
        debug!(count = regions.len(), "refresh");
        for &region in &regions {
            let mut painter = Painter::new(&mut self.frame, region);
            painter.fill_rect(region, bg_color, bg_opa);
            for &(id, extent) in &order {
                let Some(data) = objs.get(id) else {
                    continue;
                };
                if extent.intersects(region) {
                    paint_object(&mut painter, data, registry, fonts);
                }
            }
            target.flush(region, &self.frame);
        }
        regions.len()
    }

    /// Recompute layout and damage every object whose rect changed.
    fn relayout(
        &mut self,
        objs: &mut ObjTree,
        registry: &StyleRegistry,
        router: &mut EventRouter,
        screen: ObjId,
    ) {
        self.layout.sync_tree(objs, registry, screen);
        self.layout
            .compute(self.frame.width() as f32, self.frame.height() as f32);

        let rects = self.layout.absolute_rects(objs, screen);
        let mut resized = Vec::new();
        for (id, new_rect) in rects {
            let Some(data) = objs.get_mut(id) else {
                continue;
            };
            if data.rect == new_rect {
                continue;
            }
            self.dirty.add(data.rect, self.frame.bounds());
            self.dirty.add(new_rect, self.frame.bounds());
            if data.rect.size() != new_rect.size() {
                resized.push(id);
            }
            data.rect = new_rect;
        }
        for id in resized {
            router.dispatch(objs, id, EventCode::SizeChanged);
        }
    }
}

fn int_prop(data: &ObjData, reg: &StyleRegistry, prop: StyleProp) -> i32 {
    match resolve_prop(data, reg, Part::Main, prop) {
        Some(StyleValue::Int(v)) => v,
        _ => 0,
    }
}

/// The full area an object's paint may touch.
///
/// Starts from the layout rect and grows by everything drawn outside it:
/// the outline ring, the slider knob overhang at the track ends, and the
/// option list of an open dropdown. Must stay in step with `paint_object`.
fn painted_extent(data: &ObjData, reg: &StyleRegistry, fonts: &FontRegistry) -> Rect {
    let main = ResolvedPart::resolve(data, reg, fonts.default_font(), Part::Main);
    let mut extent = data.rect;
    if main.outline_width > 0 {
        let pad = int_prop(data, reg, StyleProp::OutlinePad);
        extent = extent.inset(-(main.outline_width + pad));
    }
    match data.kind {
        WidgetKind::Slider => {
            let side = data.rect.height;
            extent = extent.union(Rect::new(
                data.rect.x - side / 2,
                data.rect.y,
                data.rect.width + side,
                data.rect.height,
            ));
        }
        WidgetKind::Dropdown => {
            if let Some(state) = data.widget_state::<DropdownState>() {
                if state.open {
                    let row_h = fonts.get(main.text_font).line_height();
                    extent = extent.union(Rect::new(
                        data.rect.x,
                        data.rect.bottom(),
                        data.rect.width,
                        row_h * state.options.len() as i32 + main.pad_top + main.pad_bottom,
                    ));
                }
            }
        }
        _ => {}
    }
    extent
}

/// Paint one object: common box decoration, then the widget body.
fn paint_object(p: &mut Painter<'_>, data: &ObjData, reg: &StyleRegistry, fonts: &FontRegistry) {
    let main = ResolvedPart::resolve(data, reg, fonts.default_font(), Part::Main);
    let opa = main.opa;
    if opa.is_transparent() {
        return;
    }
    let rect = data.rect;

    if !main.bg_opa.is_transparent() {
        p.fill_rect_rounded(rect, main.radius, main.bg_color, main.bg_opa.scaled_by(opa));
    }
    if main.border_width > 0 {
        p.draw_border(
            rect,
            main.border_width,
            main.border_color,
            main.border_opa.scaled_by(opa),
        );
    }
    if main.outline_width > 0 {
        let pad = int_prop(data, reg, StyleProp::OutlinePad);
        p.draw_outline(
            rect,
            main.outline_width,
            pad,
            main.outline_color,
            main.outline_opa.scaled_by(opa),
        );
    }

    match data.kind {
        WidgetKind::Screen | WidgetKind::Container | WidgetKind::Button => {}
        WidgetKind::ButtonMatrix => paint_button_matrix(p, data, reg, fonts, &main),
        WidgetKind::Label => paint_label(p, data, reg, fonts, &main),
        WidgetKind::Slider => paint_track(p, data, reg, fonts, &main, true),
        WidgetKind::Bar => paint_track(p, data, reg, fonts, &main, false),
        WidgetKind::Arc => paint_arc(p, data, reg, fonts, &main),
        WidgetKind::Roller => paint_roller(p, data, reg, fonts, &main),
        WidgetKind::Dropdown => paint_dropdown(p, data, reg, fonts, &main),
        WidgetKind::TextArea => paint_textarea(p, data, reg, fonts, &main),
        WidgetKind::Image => paint_image(p, data, &main),
        WidgetKind::Line => paint_line(p, data, &main),
    }
}

/// The content box: the layout rect shrunk by the resolved paddings.
fn content_rect(rect: Rect, main: &ResolvedPart) -> Rect {
    Rect::new(
        rect.x + main.pad_left,
        rect.y + main.pad_top,
        rect.width - main.pad_left - main.pad_right,
        rect.height - main.pad_top - main.pad_bottom,
    )
}

fn paint_label(
    p: &mut Painter<'_>,
    data: &ObjData,
    reg: &StyleRegistry,
    fonts: &FontRegistry,
    main: &ResolvedPart,
) {
    let Some(state) = data.widget_state::<LabelState>() else {
        return;
    };
    let font = fonts.get(main.text_font);
    let letter_space = int_prop(data, reg, StyleProp::TextLetterSpace);
    let line_space = int_prop(data, reg, StyleProp::TextLineSpace);
    let content = content_rect(data.rect, main);
    let color = main.text_color;
    let opa = main.text_opa.scaled_by(main.opa);

    let mut y = content.y;
    for line in state.text.split('\n') {
        let width = font.text_width(line);
        let x = match state.align {
            TextAlignKind::Left => content.x,
            TextAlignKind::Center => content.x + (content.width - width) / 2,
            TextAlignKind::Right => content.right() - width,
        };
        p.draw_text(Point::new(x, y), line, font, color, opa, letter_space);
        y += font.line_height() + line_space;
    }
}

/// The matrix splits its content box into equal-height rows; within a row,
/// cells take width proportional to their width units. Checked and selected
/// cells use the `Selected` part, the rest the `Items` part.
fn paint_button_matrix(
    p: &mut Painter<'_>,
    data: &ObjData,
    reg: &StyleRegistry,
    fonts: &FontRegistry,
    main: &ResolvedPart,
) {
    let Some(state) = data.widget_state::<ButtonMatrixState>() else {
        return;
    };
    if state.rows.is_empty() {
        return;
    }
    let content = content_rect(data.rect, main);
    let gap_x = int_prop(data, reg, StyleProp::PadColumn);
    let gap_y = int_prop(data, reg, StyleProp::PadRow);
    let row_count = state.rows.len() as i32;
    let row_h = (content.height - gap_y * (row_count - 1)) / row_count;
    if row_h <= 0 {
        return;
    }
    let items = ResolvedPart::resolve(data, reg, fonts.default_font(), Part::Items);
    let checked = ResolvedPart::resolve(data, reg, fonts.default_font(), Part::Selected);
    let font = fonts.get(items.text_font);
    let opa = main.opa;

    let mut id: u16 = 0;
    for (r, row) in state.rows.iter().enumerate() {
        let y = content.y + r as i32 * (row_h + gap_y);
        let units = row.iter().map(|b| b.width as i32).sum::<i32>().max(1);
        let avail = content.width - gap_x * (row.len() as i32 - 1).max(0);
        let mut used = 0i32;
        for (c, btn) in row.iter().enumerate() {
            let x0 = avail * used / units;
            used += btn.width as i32;
            let x1 = avail * used / units;
            let cell = Rect::new(content.x + x0 + gap_x * c as i32, y, x1 - x0, row_h);
            let flat = id;
            id += 1;
            if btn.ctrl.contains(ButtonCtrl::HIDDEN) {
                continue;
            }
            let part = if btn.ctrl.contains(ButtonCtrl::CHECKED) || state.selected == Some(flat)
            {
                &checked
            } else {
                &items
            };
            if !part.bg_opa.is_transparent() {
                p.fill_rect_rounded(cell, part.radius, part.bg_color, part.bg_opa.scaled_by(opa));
            }
            if part.border_width > 0 {
                p.draw_border(
                    cell,
                    part.border_width,
                    part.border_color,
                    part.border_opa.scaled_by(opa),
                );
            }
            let tx = cell.x + (cell.width - font.text_width(&btn.text)) / 2;
            let ty = cell.y + (cell.height - font.line_height()) / 2;
            p.draw_text(
                Point::new(tx, ty),
                &btn.text,
                font,
                part.text_color,
                part.text_opa.scaled_by(opa),
                0,
            );
        }
    }
}

/// Slider and bar share a horizontal track with a filled indicator; the
/// slider adds a knob.
fn paint_track(
    p: &mut Painter<'_>,
    data: &ObjData,
    reg: &StyleRegistry,
    fonts: &FontRegistry,
    main: &ResolvedPart,
    with_knob: bool,
) {
    let (value, min, max) = if with_knob {
        match data.widget_state::<SliderState>() {
            Some(s) => (s.value, s.min, s.max),
            None => return,
        }
    } else {
        match data.widget_state::<BarState>() {
            Some(s) => (s.value, s.min, s.max),
            None => return,
        }
    };
    let rect = data.rect;
    let span = (max - min).max(1);
    let frac_num = (value - min).clamp(0, span);

    let indicator = ResolvedPart::resolve(data, reg, fonts.default_font(), Part::Indicator);
    let fill_width = (rect.width as i64 * frac_num as i64 / span as i64) as i32;
    if fill_width > 0 && !indicator.bg_opa.is_transparent() {
        p.fill_rect_rounded(
            Rect::new(rect.x, rect.y, fill_width, rect.height),
            indicator.radius,
            indicator.bg_color,
            indicator.bg_opa.scaled_by(main.opa),
        );
    }

    if with_knob {
        let knob = ResolvedPart::resolve(data, reg, fonts.default_font(), Part::Knob);
        if !knob.bg_opa.is_transparent() {
            let side = rect.height;
            let center_x = rect.x + fill_width;
            let knob_rect = Rect::new(center_x - side / 2, rect.y, side, side);
            p.fill_rect_rounded(
                knob_rect,
                knob.radius.max(side / 2),
                knob.bg_color,
                knob.bg_opa.scaled_by(main.opa),
            );
        }
    }
}

fn paint_arc(
    p: &mut Painter<'_>,
    data: &ObjData,
    reg: &StyleRegistry,
    fonts: &FontRegistry,
    main: &ResolvedPart,
) {
    let Some(state) = data.widget_state::<ArcState>() else {
        return;
    };
    let rect = data.rect;
    let center = Point::new(rect.x + rect.width / 2, rect.y + rect.height / 2);
    let radius = (rect.width.min(rect.height)) / 2;

    // Background band over the full sweep.
    p.draw_arc(
        center,
        radius,
        main.arc_width,
        state.start_angle,
        state.end_angle,
        main.arc_color,
        main.arc_opa.scaled_by(main.opa),
    );

    // Indicator band up to the current value.
    let span = (state.max - state.min).max(1);
    let frac = (state.value - state.min).clamp(0, span);
    let sweep = {
        let mut s = state.end_angle - state.start_angle;
        if s <= 0 {
            s += 360;
        }
        s
    };
    let value_angle = state.start_angle + (sweep as i64 * frac as i64 / span as i64) as i32;
    if value_angle != state.start_angle {
        let indicator = ResolvedPart::resolve(data, reg, fonts.default_font(), Part::Indicator);
        p.draw_arc(
            center,
            radius,
            indicator.arc_width,
            state.start_angle,
            value_angle,
            indicator.arc_color,
            indicator.arc_opa.scaled_by(main.opa),
        );
    }
}

fn paint_roller(
    p: &mut Painter<'_>,
    data: &ObjData,
    reg: &StyleRegistry,
    fonts: &FontRegistry,
    main: &ResolvedPart,
) {
    let Some(state) = data.widget_state::<RollerState>() else {
        return;
    };
    if state.options.is_empty() {
        return;
    }
    let font = fonts.get(main.text_font);
    let line_space = int_prop(data, reg, StyleProp::TextLineSpace);
    let row_h = font.line_height() + line_space;
    let content = content_rect(data.rect, main);
    let opa = main.opa;

    // The selected option sits on the middle visible row.
    let mid_row = state.visible_rows as i32 / 2;
    let selected_y = content.y + mid_row * row_h;
    let selected = ResolvedPart::resolve(data, reg, fonts.default_font(), Part::Selected);
    if !selected.bg_opa.is_transparent() {
        p.fill_rect(
            Rect::new(content.x, selected_y, content.width, row_h),
            selected.bg_color,
            selected.bg_opa.scaled_by(opa),
        );
    }

    for row in 0..state.visible_rows as i32 {
        let index = state.selected as i32 + row - mid_row;
        if index < 0 || index >= state.options.len() as i32 {
            continue;
        }
        let text = &state.options[index as usize];
        let part = if row == mid_row { &selected } else { main };
        let x = content.x + (content.width - font.text_width(text)) / 2;
        p.draw_text(
            Point::new(x, content.y + row * row_h),
            text,
            font,
            part.text_color,
            part.text_opa.scaled_by(opa),
            0,
        );
    }
}

fn paint_dropdown(
    p: &mut Painter<'_>,
    data: &ObjData,
    reg: &StyleRegistry,
    fonts: &FontRegistry,
    main: &ResolvedPart,
) {
    let Some(state) = data.widget_state::<DropdownState>() else {
        return;
    };
    let font = fonts.get(main.text_font);
    let content = content_rect(data.rect, main);
    let opa = main.opa;
    let text_opa = main.text_opa.scaled_by(opa);

    if let Some(text) = state.options.get(state.selected) {
        p.draw_text(
            Point::new(content.x, content.y),
            text,
            font,
            main.text_color,
            text_opa,
            0,
        );
    }
    // Direction marker on the right edge.
    let marker = if state.open { "^" } else { "v" };
    p.draw_text(
        Point::new(content.right() - font.text_width(marker), content.y),
        marker,
        font,
        main.text_color,
        text_opa,
        0,
    );

    if state.open {
        let row_h = font.line_height();
        let list = Rect::new(
            data.rect.x,
            data.rect.bottom(),
            data.rect.width,
            row_h * state.options.len() as i32 + main.pad_top + main.pad_bottom,
        );
        p.fill_rect(list, main.bg_color, main.bg_opa.scaled_by(opa));
        p.draw_border(list, 1, main.border_color, main.border_opa.scaled_by(opa));
        let selected = ResolvedPart::resolve(data, reg, fonts.default_font(), Part::Selected);
        for (i, option) in state.options.iter().enumerate() {
            let y = list.y + main.pad_top + i as i32 * row_h;
            let part = if i == state.selected { &selected } else { main };
            if i == state.selected && !selected.bg_opa.is_transparent() {
                p.fill_rect(
                    Rect::new(list.x, y, list.width, row_h),
                    selected.bg_color,
                    selected.bg_opa.scaled_by(opa),
                );
            }
            p.draw_text(
                Point::new(content.x, y),
                option,
                font,
                part.text_color,
                part.text_opa.scaled_by(opa),
                0,
            );
        }
    }
}

fn paint_textarea(
    p: &mut Painter<'_>,
    data: &ObjData,
    reg: &StyleRegistry,
    fonts: &FontRegistry,
    main: &ResolvedPart,
) {
    let Some(state) = data.widget_state::<TextAreaState>() else {
        return;
    };
    let font = fonts.get(main.text_font);
    let line_space = int_prop(data, reg, StyleProp::TextLineSpace);
    let content = content_rect(data.rect, main);
    let opa = main.opa;

    if state.text.is_empty() && !state.placeholder.is_empty() {
        let muted = main.text_color.mix(main.bg_color, 128);
        p.draw_text(
            Point::new(content.x, content.y),
            &state.placeholder,
            font,
            muted,
            main.text_opa.scaled_by(opa),
            0,
        );
    } else {
        let mut y = content.y;
        for line in state.text.split('\n') {
            p.draw_text(
                Point::new(content.x, y),
                line,
                font,
                main.text_color,
                main.text_opa.scaled_by(opa),
                0,
            );
            y += font.line_height() + line_space;
        }
    }

    if data.state.contains(State::FOCUSED) {
        let (line, col) = cursor_position(&state.text, state.cursor);
        let cx = content.x + col * font.advance();
        let cy = content.y + line * (font.line_height() + line_space);
        p.fill_rect(
            Rect::new(cx, cy, 1, font.glyph_height),
            main.text_color,
            main.text_opa.scaled_by(opa),
        );
    }
}

/// Line and column of a char index within multi-line text.
fn cursor_position(text: &str, cursor: usize) -> (i32, i32) {
    let mut line = 0;
    let mut col = 0;
    for (i, ch) in text.chars().enumerate() {
        if i >= cursor {
            break;
        }
        if ch == '\n' {
            line += 1;
            col = 0;
        } else {
            col += 1;
        }
    }
    (line, col)
}

fn paint_image(p: &mut Painter<'_>, data: &ObjData, main: &ResolvedPart) {
    let Some(state) = data.widget_state::<ImageState>() else {
        return;
    };
    match &state.source {
        ImageSource::Raw {
            width,
            height,
            pixels,
        } => {
            let rect = data.rect;
            for y in 0..*height {
                for x in 0..*width {
                    let Some(&color) = pixels.get((y * width + x) as usize) else {
                        continue;
                    };
                    p.fill_rect(
                        Rect::new(rect.x + x, rect.y + y, 1, 1),
                        color,
                        main.opa,
                    );
                }
            }
        }
        ImageSource::External(_) => unimplemented!("external image decoding"),
    }
}

fn paint_line(p: &mut Painter<'_>, data: &ObjData, main: &ResolvedPart) {
    let Some(state) = data.widget_state::<LineState>() else {
        return;
    };
    let origin = data.rect.origin();
    let points: Vec<Point> = state
        .points
        .iter()
        .map(|pt| pt.offset(origin.x, origin.y))
        .collect();
    p.draw_polyline(
        &points,
        main.line_width,
        main.line_color,
        main.line_opa.scaled_by(main.opa),
    );
}
