//! Integration tests for ember-ui.
//!
//! These exercise the public API from outside the crate: object identity,
//! event routing, style lifecycle, layout, and the refresh pipeline working
//! together through the `Ui` context.

use ember_ui::style::prop::{Coord, FlexFlow, TrackSize};
use ember_ui::style::Style;
use ember_ui::widgets::{self, Widget};
use ember_ui::{
    Color, EventCode, Flow, NullTarget, ObjFlags, Opacity, Rect, Selector, State, Ui, UiConfig,
};

fn ui() -> Ui {
    Ui::new(UiConfig::default())
}

// ---------------------------------------------------------------------------
// Object identity
// ---------------------------------------------------------------------------

#[test]
fn stale_ids_never_resolve_after_reuse() {
    let mut ui = ui();
    let screen = ui.screen();

    let first = ui.create_object(ember_ui::obj::WidgetKind::Container, screen);
    ui.destroy(first);

    // Create many objects so the slot is certainly reused.
    for _ in 0..32 {
        ui.create_object(ember_ui::obj::WidgetKind::Container, screen);
    }

    assert!(ui.try_obj(first).is_none());
    assert_eq!(ui.send_event(first, EventCode::Clicked), 0);
    ui.destroy(first); // still a no-op
}

#[test]
fn destroy_removes_whole_subtree() {
    let mut ui = ui();
    let screen = ui.screen();
    let panel = widgets::Container::create(&mut ui, screen);
    let button = widgets::Button::create(&mut ui, panel.id(), "OK");
    let label = button.label();

    ui.destroy(panel.id());
    assert!(!ui.contains(panel.id()));
    assert!(!ui.contains(button.id()));
    assert!(!ui.contains(label.id()));
    assert!(ui.contains(screen));
}

// ---------------------------------------------------------------------------
// Event routing
// ---------------------------------------------------------------------------

#[test]
fn bubbling_keeps_target_while_current_target_climbs() {
    let mut ui = ui();
    let screen = ui.screen();
    let panel = widgets::Container::create(&mut ui, screen);
    let button = widgets::Button::create(&mut ui, panel.id(), "OK");
    ui.add_flags(button.id(), ObjFlags::EVENT_BUBBLE);
    ui.add_flags(panel.id(), ObjFlags::EVENT_BUBBLE);

    let mut at_panel = ui.events(panel.id());
    let mut at_screen = ui.events(screen);

    let delivered = ui.send_event(button.id(), EventCode::Clicked);
    assert_eq!(delivered, 3);

    let seen = at_panel.drain();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].target, button.id());
    assert_eq!(seen[0].current_target, panel.id());

    let seen = at_screen.drain();
    assert_eq!(seen[0].target, button.id());
    assert_eq!(seen[0].current_target, screen);
}

#[test]
fn handler_stop_halts_the_climb() {
    let mut ui = ui();
    let screen = ui.screen();
    let panel = widgets::Container::create(&mut ui, screen);
    let inner = widgets::Container::create(&mut ui, panel.id());
    ui.add_flags(inner.id(), ObjFlags::EVENT_BUBBLE);
    ui.add_flags(panel.id(), ObjFlags::EVENT_BUBBLE);

    ui.on_event(inner.id(), |_| Flow::Stop);
    let mut at_panel = ui.events(panel.id());

    assert_eq!(ui.send_event(inner.id(), EventCode::Pressed), 1);
    assert!(at_panel.drain().is_empty());
}

#[test]
fn stream_closes_exactly_once_and_keeps_queued_events() {
    let mut ui = ui();
    let screen = ui.screen();
    let button = widgets::Button::create(&mut ui, screen, "OK");
    let mut stream = ui.events(button.id());

    ui.send_event(button.id(), EventCode::Clicked);
    ui.destroy(button.id());

    assert!(stream.is_closed());
    let events = stream.drain();
    assert_eq!(events[0].code, EventCode::Clicked);
    assert!(events.iter().any(|e| e.code == EventCode::Destroyed));

    // Everything the stream delivered is an id-valued copy; resolving the
    // target of a post-destruction event simply yields nothing.
    assert!(ui.try_obj(events[0].target).is_none());
}

#[tokio::test]
async fn async_recv_sees_events_then_none() {
    let mut ui = ui();
    let screen = ui.screen();
    let slider = widgets::Slider::create(&mut ui, screen);
    let mut stream = ui.events(slider.id());

    slider.set_value(&mut ui, 30);
    ui.destroy(slider.id());

    let mut codes = Vec::new();
    while let Some(event) = stream.recv().await {
        codes.push(event.code);
    }
    assert!(codes.contains(&EventCode::ValueChanged));
    assert_eq!(codes.last(), Some(&EventCode::Destroyed));
    // The closed stream stays closed.
    assert!(stream.recv().await.is_none());
}

// ---------------------------------------------------------------------------
// Style lifecycle
// ---------------------------------------------------------------------------

#[test]
fn style_attach_detach_is_idempotent() {
    let mut ui = ui();
    let screen = ui.screen();
    let panel = widgets::Container::create(&mut ui, screen);

    let mut style = Style::new();
    style.set_bg_color(Color::hex(0x334455));
    let style = ui.create_style(style);

    ui.add_style(panel.id(), style, Selector::default());
    ui.add_style(panel.id(), style, Selector::default());
    assert_eq!(ui.styles().attach_count(style), 1);

    ui.remove_style(panel.id(), style, Selector::default());
    ui.remove_style(panel.id(), style, Selector::default());
    assert_eq!(ui.styles().attach_count(style), 0);

    // Once fully detached the style can be destroyed.
    ui.destroy_style(style);
}

#[test]
fn pressed_state_switches_resolved_background() {
    let mut ui = ui();
    let screen = ui.screen();
    let button = widgets::Button::create(&mut ui, screen, "OK");

    let normal = resolved_bg(&ui, button.id());
    ui.add_state(button.id(), State::PRESSED);
    let pressed = resolved_bg(&ui, button.id());
    assert_ne!(normal, pressed);

    ui.clear_state(button.id(), State::PRESSED);
    assert_eq!(resolved_bg(&ui, button.id()), normal);
}

fn resolved_bg(ui: &Ui, id: ember_ui::ObjId) -> Color {
    use ember_ui::style::resolve::resolve_prop;
    use ember_ui::{Part, StyleProp, StyleValue};
    match resolve_prop(ui.obj(id), ui.styles(), Part::Main, StyleProp::BgColor) {
        Some(StyleValue::Color(c)) => c,
        _ => Color::WHITE,
    }
}

#[test]
fn shared_style_edit_reaches_every_attachment() {
    let mut ui = ui();
    let screen = ui.screen();
    let a = widgets::Container::create(&mut ui, screen);
    let b = widgets::Container::create(&mut ui, screen);

    let style = ui.create_style(Style::new());
    ui.add_style(a.id(), style, Selector::default());
    ui.add_style(b.id(), style, Selector::default());

    ui.update_style(style, |s| {
        s.set_bg_color(Color::hex(0xabcdef));
    });
    assert_eq!(resolved_bg(&ui, a.id()), Color::hex(0xabcdef));
    assert_eq!(resolved_bg(&ui, b.id()), Color::hex(0xabcdef));
}

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

#[test]
fn flex_row_places_children_side_by_side() {
    let mut ui = ui();
    let screen = ui.screen();
    let row = widgets::Container::create(&mut ui, screen);
    ui.set_size(row.id(), Coord::px(300), Coord::px(40));
    row.set_flex(&mut ui, FlexFlow::Row);

    let a = widgets::Container::create(&mut ui, row.id());
    ui.set_size(a.id(), Coord::px(100), Coord::px(40));
    let b = widgets::Container::create(&mut ui, row.id());
    ui.set_size(b.id(), Coord::px(100), Coord::px(40));

    let mut sink = NullTarget;
    ui.refresh(&mut sink);
    assert_eq!(ui.obj(a.id()).rect, Rect::new(0, 0, 100, 40));
    assert_eq!(ui.obj(b.id()).rect, Rect::new(100, 0, 100, 40));
}

#[test]
fn grid_tracks_and_placement() {
    let mut ui = ui();
    let screen = ui.screen();
    let grid = widgets::Container::create(&mut ui, screen);
    ui.set_size(grid.id(), Coord::px(200), Coord::px(100));
    grid.set_grid(
        &mut ui,
        vec![TrackSize::Px(50), TrackSize::Fr(1)],
        vec![TrackSize::Fr(1), TrackSize::Fr(1)],
    );

    let cell = widgets::Container::create(&mut ui, grid.id());
    widgets::container::set_grid_cell(&mut ui, cell.id(), 1, 1, 1, 1);

    let mut sink = NullTarget;
    ui.refresh(&mut sink);
    let rect = ui.obj(cell.id()).rect;
    assert_eq!(rect, Rect::new(50, 50, 150, 50));
}

#[test]
fn hidden_objects_leave_the_flow() {
    let mut ui = ui();
    let screen = ui.screen();
    let col = widgets::Container::create(&mut ui, screen);
    ui.set_size(col.id(), Coord::px(100), Coord::px(100));
    col.set_flex(&mut ui, FlexFlow::Column);

    let a = widgets::Container::create(&mut ui, col.id());
    ui.set_size(a.id(), Coord::px(100), Coord::px(30));
    let b = widgets::Container::create(&mut ui, col.id());
    ui.set_size(b.id(), Coord::px(100), Coord::px(30));

    let mut sink = NullTarget;
    ui.refresh(&mut sink);
    assert_eq!(ui.obj(b.id()).rect.y, 30);

    ui.add_flags(a.id(), ObjFlags::HIDDEN);
    ui.refresh(&mut sink);
    assert_eq!(ui.obj(b.id()).rect.y, 0);
}

#[test]
fn resize_raises_size_changed() {
    let mut ui = ui();
    let screen = ui.screen();
    let panel = widgets::Container::create(&mut ui, screen);
    ui.set_size(panel.id(), Coord::px(50), Coord::px(50));

    let mut sink = NullTarget;
    ui.refresh(&mut sink);
    let mut stream = ui.events(panel.id());

    ui.set_size(panel.id(), Coord::px(80), Coord::px(50));
    ui.refresh(&mut sink);
    assert!(stream
        .drain()
        .iter()
        .any(|e| e.code == EventCode::SizeChanged));
    assert_eq!(ui.obj(panel.id()).rect.width, 80);
}

// ---------------------------------------------------------------------------
// Refresh pipeline
// ---------------------------------------------------------------------------

struct Recording {
    areas: Vec<Rect>,
}

impl ember_ui::FlushTarget for Recording {
    fn flush(&mut self, area: Rect, _frame: &ember_ui::FrameBuffer) {
        self.areas.push(area);
    }
}

#[test]
fn refresh_flushes_only_damaged_regions() {
    let mut ui = ui();
    let screen = ui.screen();
    let panel = widgets::Container::create(&mut ui, screen);
    ui.set_size(panel.id(), Coord::px(20), Coord::px(20));
    ui.set_pos(panel.id(), 40, 40);
    ui.modify_local(panel.id(), |s| {
        s.set_bg_color(Color::hex(0xff0000)).set_bg_opa(Opacity::COVER);
    });

    let mut out = Recording { areas: Vec::new() };
    // First refresh paints the whole display.
    ui.refresh(&mut out);
    assert_eq!(out.areas, vec![Rect::new(0, 0, 320, 240)]);

    // A localized change flushes only the damaged area.
    out.areas.clear();
    ui.invalidate_obj(panel.id());
    let flushed = ui.refresh(&mut out);
    assert_eq!(flushed, 1);
    assert_eq!(out.areas, vec![Rect::new(40, 40, 20, 20)]);
}

#[test]
fn clean_refresh_is_a_noop() {
    let mut ui = ui();
    let mut sink = NullTarget;
    assert!(ui.refresh(&mut sink) > 0);
    assert_eq!(ui.refresh(&mut sink), 0);
    assert_eq!(ui.refresh(&mut sink), 0);
}

#[test]
fn screen_switch_repaints_everything() {
    let mut ui = ui();
    let mut sink = NullTarget;
    ui.refresh(&mut sink);

    let second = ui.create_screen();
    ui.modify_local(second, |s| {
        s.set_bg_color(Color::hex(0x003366)).set_bg_opa(Opacity::COVER);
    });
    ui.load_screen(second);

    let mut out = Recording { areas: Vec::new() };
    ui.refresh(&mut out);
    assert_eq!(out.areas, vec![Rect::new(0, 0, 320, 240)]);
}

// ---------------------------------------------------------------------------
// Widgets end to end
// ---------------------------------------------------------------------------

#[test]
fn slider_paint_reflects_value() {
    let mut ui = ui();
    let screen = ui.screen();
    let slider = widgets::Slider::create(&mut ui, screen);
    ui.set_pos(slider.id(), 10, 10);
    slider.set_value(&mut ui, 50);

    let mut sink = NullTarget;
    ui.refresh(&mut sink);
    assert_eq!(ui.obj(slider.id()).rect, Rect::new(10, 10, 160, 8));
    assert_eq!(slider.value(&ui), 50);
}

#[test]
fn textarea_editing_round_trip() {
    let mut ui = ui();
    let screen = ui.screen();
    let ta = widgets::TextArea::create(&mut ui, screen);
    ui.set_size(ta.id(), Coord::px(120), Coord::px(20));

    ta.insert_str(&mut ui, "hello");
    ta.delete_char(&mut ui);
    ta.insert_char(&mut ui, '!');
    assert_eq!(ta.text(&ui), "hell!");

    ui.add_state(ta.id(), State::FOCUSED);
    let mut sink = NullTarget;
    ui.refresh(&mut sink);
}

#[test]
fn run_loop_quits() {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .unwrap();
    runtime.block_on(async {
        let mut ui = Ui::new(UiConfig {
            tick_ms: 1,
            ..UiConfig::default()
        });
        ui.quit();
        let mut sink = NullTarget;
        ui.run(&mut sink).await;
        assert_eq!(ui.ticks(), 0);
    });
}
