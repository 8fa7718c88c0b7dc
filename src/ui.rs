//! The engine context: owns the tree, styles, events, and the pipeline.
//!
//! [`Ui`] is the single entry point. All mutation goes through it so the
//! bookkeeping that keeps the subsystems consistent (damage tracking, layout
//! dirtiness, event emission, style attach counts) happens in one place.
//! Mutators assert on stale ids; read accessors have `try_` variants that
//! return `None` instead.

use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tracing::info;

use crate::display::Display;
use crate::event::{Event, EventCode, EventRouter, EventStream, Flow};
use crate::font::{Font, FontId, FontRegistry};
use crate::geometry::Rect;
use crate::obj::node::StyleEntry;
use crate::obj::{ObjData, ObjFlags, ObjId, ObjTree, State, WidgetKind};
use crate::render::{FlushTarget, RenderPipeline};
use crate::style::prop::{Coord, StyleProp, StyleValue};
use crate::style::resolve::{resolve_prop, ResolvedPart};
use crate::style::selector::{Part, Selector};
use crate::style::sheet::{Style, StyleId, StyleRegistry};
use crate::theme::Theme;

/// Engine configuration.
#[derive(Debug, Clone)]
pub struct UiConfig {
    /// Display width in pixels.
    pub width: i32,
    /// Display height in pixels.
    pub height: i32,
    /// Tick period of the run loop in milliseconds.
    pub tick_ms: u64,
    /// Refresh rate of the run loop.
    pub fps: u32,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            width: 320,
            height: 240,
            tick_ms: 5,
            fps: 60,
        }
    }
}

/// The engine context.
///
/// Construction registers the built-in theme and creates one screen, which
/// is loaded as the active screen immediately.
pub struct Ui {
    objs: ObjTree,
    styles: StyleRegistry,
    fonts: FontRegistry,
    router: EventRouter,
    pipeline: RenderPipeline,
    display: Display,
    theme: Theme,
    config: UiConfig,
    ticks: u64,
    quit: bool,
}

impl Ui {
    /// Create an engine context with a fresh active screen.
    pub fn new(config: UiConfig) -> Self {
        assert!(config.fps > 0, "refresh rate must be positive");
        let mut styles = StyleRegistry::new();
        let fonts = FontRegistry::new();
        let theme = Theme::light(&mut styles, &fonts);
        let mut ui = Self {
            objs: ObjTree::new(),
            styles,
            fonts,
            router: EventRouter::new(),
            pipeline: RenderPipeline::new(config.width, config.height),
            display: Display::new(config.width, config.height),
            theme,
            config,
            ticks: 0,
            quit: false,
        };
        let screen = ui.create_screen();
        ui.load_screen(screen);
        info!(
            width = ui.config.width,
            height = ui.config.height,
            "engine initialized"
        );
        ui
    }

    // --- object lifecycle -------------------------------------------------

    /// Create a parentless screen object.
    ///
    /// The screen is sized to the display and becomes paintable once loaded
    /// with [`load_screen`](Self::load_screen).
    pub fn create_screen(&mut self) -> ObjId {
        let bounds = self.display.bounds();
        let mut data = ObjData::new(WidgetKind::Screen);
        data.local
            .set_width(Coord::px(bounds.width))
            .set_height(Coord::px(bounds.height));
        self.insert_object(None, data)
    }

    /// Make `screen` the active screen and repaint everything.
    pub fn load_screen(&mut self, screen: ObjId) {
        let data = self.obj(screen);
        assert!(
            data.kind == WidgetKind::Screen && self.objs.parent(screen).is_none(),
            "only a parentless screen object can be loaded"
        );
        self.display.set_active(screen);
        self.pipeline.mark_layout_dirty();
        self.pipeline.invalidate_all();
    }

    /// The active screen.
    pub fn screen(&self) -> ObjId {
        self.display
            .active_screen()
            .expect("a screen is always loaded after construction")
    }

    /// Create a plain object of `kind` under `parent`.
    pub fn create_object(&mut self, kind: WidgetKind, parent: ObjId) -> ObjId {
        self.insert_object(Some(parent), ObjData::new(kind))
    }

    /// Insert prepared node data, applying the theme and raising lifecycle
    /// events.
    pub(crate) fn insert_object(&mut self, parent: Option<ObjId>, mut data: ObjData) -> ObjId {
        for (style, selector) in self.theme.styles_for(data.kind) {
            self.styles.attach(style);
            data.styles.push(StyleEntry { style, selector });
        }
        let id = match parent {
            Some(p) => self.objs.insert_child(p, data),
            None => self.objs.insert(data),
        };
        self.router.dispatch(&self.objs, id, EventCode::Created);
        if let Some(p) = parent {
            self.router.dispatch(&self.objs, p, EventCode::ChildChanged);
        }
        self.pipeline.mark_layout_dirty();
        id
    }

    /// Destroy an object and its whole subtree.
    ///
    /// Every object in the subtree receives a final `Destroyed` event, its
    /// style attachments are released, and its event stream is closed
    /// (already queued events stay deliverable). Destroying a stale id is a
    /// no-op.
    pub fn destroy(&mut self, id: ObjId) {
        if !self.objs.contains(id) {
            return;
        }
        let parent = self.objs.parent(id);
        let subtree = self.objs.collect_subtree(id);

        // Final event first, while the objects still resolve.
        for &obj in &subtree {
            self.router.dispatch(&self.objs, obj, EventCode::Destroyed);
        }
        for &obj in &subtree {
            if let Some(data) = self.objs.get(obj) {
                let rect = data.rect;
                let entries = data.styles.clone();
                for entry in entries {
                    self.styles.detach(entry.style);
                }
                self.pipeline.invalidate(rect);
            }
            self.router.close(obj);
        }
        self.objs.remove(id);
        if let Some(p) = parent {
            self.router.dispatch(&self.objs, p, EventCode::ChildChanged);
        }
        self.pipeline.mark_layout_dirty();
    }

    /// Move an object under a new parent.
    pub fn reparent(&mut self, id: ObjId, new_parent: ObjId) {
        let old_parent = self.objs.parent(id);
        self.objs.reparent(id, new_parent);
        if let Some(p) = old_parent {
            self.router.dispatch(&self.objs, p, EventCode::ChildChanged);
        }
        self.router
            .dispatch(&self.objs, new_parent, EventCode::ChildChanged);
        self.pipeline.mark_layout_dirty();
    }

    // --- accessors --------------------------------------------------------

    /// Borrow an object's data.
    ///
    /// # Panics
    ///
    /// Panics on stale ids; use [`try_obj`](Self::try_obj) for fallible
    /// lookup.
    pub fn obj(&self, id: ObjId) -> &ObjData {
        self.try_obj(id).expect("object has been destroyed")
    }

    /// Mutably borrow an object's data.
    ///
    /// The caller is responsible for damage: call
    /// [`invalidate_obj`](Self::invalidate_obj) (and
    /// [`mark_layout_dirty`](Self::mark_layout_dirty) for layout-affecting
    /// changes) after mutating.
    pub fn obj_mut(&mut self, id: ObjId) -> &mut ObjData {
        self.objs.get_mut(id).expect("object has been destroyed")
    }

    /// Fallible object lookup. `None` for stale ids.
    pub fn try_obj(&self, id: ObjId) -> Option<&ObjData> {
        self.objs.get(id)
    }

    pub fn contains(&self, id: ObjId) -> bool {
        self.objs.contains(id)
    }

    pub fn parent(&self, id: ObjId) -> Option<ObjId> {
        self.objs.parent(id)
    }

    pub fn children(&self, id: ObjId) -> &[ObjId] {
        self.objs.children(id)
    }

    pub fn display(&self) -> &Display {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut Display {
        &mut self.display
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn fonts(&self) -> &FontRegistry {
        &self.fonts
    }

    /// Register an additional font.
    pub fn register_font(&mut self, font: Font) -> FontId {
        self.fonts.register(font)
    }

    // --- flags and state --------------------------------------------------

    /// Set behavioral flags.
    pub fn add_flags(&mut self, id: ObjId, flags: ObjFlags) {
        let data = self.objs.get_mut(id).expect("object has been destroyed");
        data.flags |= flags;
        let rect = data.rect;
        self.pipeline.invalidate(rect);
        self.pipeline.mark_layout_dirty();
    }

    /// Clear behavioral flags.
    pub fn clear_flags(&mut self, id: ObjId, flags: ObjFlags) {
        let data = self.objs.get_mut(id).expect("object has been destroyed");
        data.flags &= !flags;
        let rect = data.rect;
        self.pipeline.invalidate(rect);
        self.pipeline.mark_layout_dirty();
    }

    /// Enter interaction states (e.g. pressed, focused).
    pub fn add_state(&mut self, id: ObjId, state: State) {
        self.update_state(id, |s| s | state);
    }

    /// Leave interaction states.
    pub fn clear_state(&mut self, id: ObjId, state: State) {
        self.update_state(id, |s| s & !state);
    }

    fn update_state(&mut self, id: ObjId, f: impl FnOnce(State) -> State) {
        let data = self.objs.get_mut(id).expect("object has been destroyed");
        let new = f(data.state);
        if new == data.state {
            return;
        }
        data.state = new;
        let rect = data.rect;
        // State changes can flip which style selectors match.
        self.router
            .dispatch(&self.objs, id, EventCode::StateChanged);
        self.pipeline.invalidate(rect);
    }

    // --- styles -----------------------------------------------------------

    /// Register a shared style.
    pub fn create_style(&mut self, style: Style) -> StyleId {
        self.styles.create(style)
    }

    /// Attach a shared style to an object under a selector.
    ///
    /// Attaching the same (style, selector) pair twice is a no-op.
    pub fn add_style(&mut self, id: ObjId, style: StyleId, selector: Selector) {
        assert!(self.styles.contains(style), "style has been destroyed");
        let data = self.objs.get_mut(id).expect("object has been destroyed");
        let entry = StyleEntry { style, selector };
        if data.styles.contains(&entry) {
            return;
        }
        data.styles.push(entry);
        let rect = data.rect;
        self.styles.attach(style);
        self.router
            .dispatch(&self.objs, id, EventCode::StyleChanged);
        self.pipeline.invalidate(rect);
        self.pipeline.mark_layout_dirty();
    }

    /// Detach a shared style from an object.
    ///
    /// Removing a pair that is not attached is a no-op; the style itself
    /// survives for its other owners.
    pub fn remove_style(&mut self, id: ObjId, style: StyleId, selector: Selector) {
        let data = self.objs.get_mut(id).expect("object has been destroyed");
        let entry = StyleEntry { style, selector };
        let Some(idx) = data.styles.iter().position(|e| *e == entry) else {
            return;
        };
        data.styles.remove(idx);
        let rect = data.rect;
        self.styles.detach(style);
        self.router
            .dispatch(&self.objs, id, EventCode::StyleChanged);
        self.pipeline.invalidate(rect);
        self.pipeline.mark_layout_dirty();
    }

    /// Destroy a shared style.
    ///
    /// # Panics
    ///
    /// Panics while the style is still attached to any object.
    pub fn destroy_style(&mut self, style: StyleId) {
        self.styles.destroy(style);
    }

    /// Edit a shared style in place.
    ///
    /// Every object attaching the style may be affected, so the whole
    /// display is damaged.
    pub fn update_style(&mut self, style: StyleId, f: impl FnOnce(&mut Style)) {
        let s = self.styles.get_mut(style).expect("style has been destroyed");
        f(s);
        self.pipeline.invalidate_all();
        self.pipeline.mark_layout_dirty();
    }

    /// Shared style registry (read access).
    pub fn styles(&self) -> &StyleRegistry {
        &self.styles
    }

    /// Edit an object's local style overrides.
    pub fn modify_local(&mut self, id: ObjId, f: impl FnOnce(&mut Style)) {
        let data = self.objs.get_mut(id).expect("object has been destroyed");
        f(&mut data.local);
        let rect = data.rect;
        self.router
            .dispatch(&self.objs, id, EventCode::StyleChanged);
        self.pipeline.invalidate(rect);
        self.pipeline.mark_layout_dirty();
    }

    /// Set an object's size via local style coords.
    pub fn set_size(&mut self, id: ObjId, width: Coord, height: Coord) {
        self.modify_local(id, |s| {
            s.set_width(width).set_height(height);
        });
    }

    /// Position an object in pixels (parents without a layout only).
    pub fn set_pos(&mut self, id: ObjId, x: i32, y: i32) {
        self.modify_local(id, |s| {
            s.set_x(Coord::px(x)).set_y(Coord::px(y));
        });
    }

    // --- events -----------------------------------------------------------

    /// Register a synchronous event handler on an object.
    pub fn on_event(&mut self, id: ObjId, handler: impl FnMut(&Event) -> Flow + 'static) {
        assert!(self.objs.contains(id), "object has been destroyed");
        self.router.add_handler(id, handler);
    }

    /// Open the object's async event stream.
    pub fn events(&mut self, id: ObjId) -> EventStream {
        assert!(self.objs.contains(id), "object has been destroyed");
        self.router.subscribe(id)
    }

    /// Inject an event for an object. Returns the number of objects it was
    /// delivered to (bubbling included).
    pub fn send_event(&mut self, id: ObjId, code: EventCode) -> usize {
        self.router.dispatch(&self.objs, id, code)
    }

    // --- damage and refresh -----------------------------------------------

    /// Damage an object's painted area, outline included.
    pub fn invalidate_obj(&mut self, id: ObjId) {
        let Some(data) = self.objs.get(id) else {
            return;
        };
        let main = ResolvedPart::resolve(data, &self.styles, self.fonts.default_font(), Part::Main);
        let grow = if main.outline_width > 0 {
            let pad = match resolve_prop(data, &self.styles, Part::Main, StyleProp::OutlinePad) {
                Some(StyleValue::Int(v)) => v,
                _ => 0,
            };
            main.outline_width + pad
        } else {
            0
        };
        self.pipeline.invalidate(data.rect.inset(-grow));
    }

    /// Damage the whole display.
    pub fn invalidate_all(&mut self) {
        self.pipeline.invalidate_all();
    }

    /// Request a layout pass on the next refresh.
    pub fn mark_layout_dirty(&mut self) {
        self.pipeline.mark_layout_dirty();
    }

    /// Advance the engine clock.
    pub fn tick(&mut self, ms: u64) {
        self.ticks += ms;
    }

    /// Milliseconds elapsed on the engine clock.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Run one refresh: layout if needed, repaint damage, flush regions.
    pub fn refresh(&mut self, target: &mut dyn FlushTarget) -> usize {
        let Some(screen) = self.display.active_screen() else {
            return 0;
        };
        if !self.objs.contains(screen) {
            return 0;
        }
        self.pipeline.refresh(
            &mut self.objs,
            &self.styles,
            &self.fonts,
            &mut self.router,
            screen,
            self.display.bg_color,
            self.display.bg_opa,
            target,
        )
    }

    /// Ask the run loop to stop after the current iteration.
    pub fn quit(&mut self) {
        self.quit = true;
    }

    /// Drive the engine until [`quit`](Self::quit) is called.
    ///
    /// Two timers: the tick timer advances the engine clock every
    /// `tick_ms`, the frame timer refreshes at the configured rate. Missed
    /// deadlines are skipped, not replayed.
    pub async fn run(&mut self, target: &mut dyn FlushTarget) {
        let mut tick = tokio::time::interval(Duration::from_millis(self.config.tick_ms));
        let mut frame =
            tokio::time::interval(Duration::from_millis(1000 / u64::from(self.config.fps)));
        tick.set_missed_tick_behavior(MissedTickBehavior::Skip);
        frame.set_missed_tick_behavior(MissedTickBehavior::Skip);

        while !self.quit {
            tokio::select! {
                _ = tick.tick() => self.tick(self.config.tick_ms),
                _ = frame.tick() => {
                    self.refresh(target);
                }
            }
        }
        info!("run loop stopped");
    }
}

impl Default for Ui {
    fn default() -> Self {
        Self::new(UiConfig::default())
    }
}

/// A flush target that discards every region; for headless use and tests.
#[derive(Debug, Default)]
pub struct NullTarget;

impl FlushTarget for NullTarget {
    fn flush(&mut self, _area: Rect, _frame: &crate::render::FrameBuffer) {}
}
