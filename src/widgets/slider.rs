//! Slider widget: a horizontal track with a draggable knob.

use crate::event::EventCode;
use crate::obj::{ObjData, ObjFlags, ObjId, WidgetKind};
use crate::style::prop::Coord;
use crate::ui::Ui;

use super::Widget;

/// Widget-private state of a slider.
#[derive(Debug, Clone)]
pub struct SliderState {
    pub value: i32,
    pub min: i32,
    pub max: i32,
}

impl Default for SliderState {
    fn default() -> Self {
        Self {
            value: 0,
            min: 0,
            max: 100,
        }
    }
}

/// A value slider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slider {
    id: ObjId,
}

impl Slider {
    /// Create a slider under `parent` with the default 0..=100 range.
    pub fn create(ui: &mut Ui, parent: ObjId) -> Self {
        let mut data =
            ObjData::new(WidgetKind::Slider).with_widget_state(SliderState::default());
        data.flags |= ObjFlags::CLICKABLE;
        data.local
            .set_width(Coord::px(160))
            .set_height(Coord::px(8));
        Self {
            id: ui.insert_object(Some(parent), data),
        }
    }

    /// Wrap an existing slider object.
    pub fn from_id(id: ObjId) -> Self {
        Self { id }
    }

    /// Set the value, clamped to the range. Raises `ValueChanged` when the
    /// clamped value differs from the current one.
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
        assert!(min < max, "slider range must be non-empty");
        let state = self.state_mut(ui);
        state.min = min;
        state.max = max;
        let clamped = state.value.clamp(min, max);
        let changed = clamped != state.value;
        state.value = clamped;
        ui.invalidate_obj(self.id);
        if changed {
            ui.send_event(self.id, EventCode::ValueChanged);
        }
    }

    pub fn value(&self, ui: &Ui) -> i32 {
        self.state(ui).value
    }

    pub fn range(&self, ui: &Ui) -> (i32, i32) {
        let s = self.state(ui);
        (s.min, s.max)
    }

    fn state<'a>(&self, ui: &'a Ui) -> &'a SliderState {
        ui.obj(self.id)
            .widget_state::<SliderState>()
            .expect("slider state missing")
    }

    fn state_mut<'a>(&self, ui: &'a mut Ui) -> &'a mut SliderState {
        ui.obj_mut(self.id)
            .widget_state_mut::<SliderState>()
            .expect("slider state missing")
    }
}

impl Widget for Slider {
    fn id(&self) -> ObjId {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::UiConfig;

    #[test]
    fn defaults() {
        let mut ui = Ui::new(UiConfig::default());
        let screen = ui.screen();
        let slider = Slider::create(&mut ui, screen);
        assert_eq!(slider.value(&ui), 0);
        assert_eq!(slider.range(&ui), (0, 100));
    }

    #[test]
    fn set_value_clamps_and_notifies() {
        let mut ui = Ui::new(UiConfig::default());
        let screen = ui.screen();
        let slider = Slider::create(&mut ui, screen);
        let mut events = ui.events(slider.id());

        slider.set_value(&mut ui, 250);
        assert_eq!(slider.value(&ui), 100);
        assert!(events
            .drain()
            .iter()
            .any(|e| e.code == EventCode::ValueChanged));

        // Setting the same clamped value again is silent.
        slider.set_value(&mut ui, 100);
        assert!(events.drain().is_empty());
    }

    #[test]
    fn set_range_reclamps() {
        let mut ui = Ui::new(UiConfig::default());
        let screen = ui.screen();
        let slider = Slider::create(&mut ui, screen);
        slider.set_value(&mut ui, 80);
        slider.set_range(&mut ui, 0, 50);
        assert_eq!(slider.value(&ui), 50);
    }

    #[test]
    #[should_panic(expected = "range must be non-empty")]
    fn empty_range_panics() {
        let mut ui = Ui::new(UiConfig::default());
        let screen = ui.screen();
        let slider = Slider::create(&mut ui, screen);
        slider.set_range(&mut ui, 10, 10);
    }
}
