//! Bar widget: a non-interactive progress track.

use crate::event::EventCode;
use crate::obj::{ObjData, ObjId, WidgetKind};
use crate::style::prop::Coord;
use crate::ui::Ui;

use super::Widget;

/// Widget-private state of a bar.
#[derive(Debug, Clone)]
pub struct BarState {
    pub value: i32,
    pub min: i32,
    pub max: i32,
}

impl Default for BarState {
    fn default() -> Self {
        Self {
            value: 0,
            min: 0,
            max: 100,
        }
    }
}

/// A progress bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bar {
    id: ObjId,
}

impl Bar {
    /// Create a bar under `parent` with the default 0..=100 range.
    pub fn create(ui: &mut Ui, parent: ObjId) -> Self {
        let mut data = ObjData::new(WidgetKind::Bar).with_widget_state(BarState::default());
        data.local
            .set_width(Coord::px(160))
            .set_height(Coord::px(8));
        Self {
            id: ui.insert_object(Some(parent), data),
        }
    }

    /// Wrap an existing bar object.
    pub fn from_id(id: ObjId) -> Self {
        Self { id }
    }

    /// Set the value, clamped to the range.
    pub fn set_value(&self, ui: &mut Ui, value: i32) {
        let state = self.state_mut(ui);
        let clamped = value.clamp(state.min, state.max);
        if clamped == state.value {
            return;
        }
        state.value = clamped;
        ui.invalidate_obj(self.id);
        ui.send_event(self.id, EventCode::ValueChanged);
    }

    /// Change the range, re-clamping the current value.
    pub fn set_range(&self, ui: &mut Ui, min: i32, max: i32) {
        assert!(min < max, "bar range must be non-empty");
        let state = self.state_mut(ui);
        state.min = min;
        state.max = max;
        state.value = state.value.clamp(min, max);
        ui.invalidate_obj(self.id);
    }

    pub fn value(&self, ui: &Ui) -> i32 {
        self.state(ui).value
    }

    fn state<'a>(&self, ui: &'a Ui) -> &'a BarState {
        ui.obj(self.id)
            .widget_state::<BarState>()
            .expect("bar state missing")
    }

    fn state_mut<'a>(&self, ui: &'a mut Ui) -> &'a mut BarState {
        ui.obj_mut(self.id)
            .widget_state_mut::<BarState>()
            .expect("bar state missing")
    }
}

impl Widget for Bar {
    fn id(&self) -> ObjId {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::UiConfig;

    #[test]
    fn value_updates_within_range() {
        let mut ui = Ui::new(UiConfig::default());
        let screen = ui.screen();
        let bar = Bar::create(&mut ui, screen);
        bar.set_value(&mut ui, 40);
        assert_eq!(bar.value(&ui), 40);
        bar.set_value(&mut ui, -5);
        assert_eq!(bar.value(&ui), 0);
    }

    #[test]
    fn value_change_raises_event() {
        let mut ui = Ui::new(UiConfig::default());
        let screen = ui.screen();
        let bar = Bar::create(&mut ui, screen);
        let mut events = ui.events(bar.id());
        bar.set_value(&mut ui, 10);
        assert!(events
            .drain()
            .iter()
            .any(|e| e.code == EventCode::ValueChanged));
    }
}
