//! Arc widget: a circular value indicator.
//!
//! Angles are degrees, measured clockwise with 0 at 3 o'clock (screen
//! coordinates grow downward). The default sweep runs 135..45, the familiar
//! open-bottom gauge shape.

use crate::event::EventCode;
use crate::obj::{ObjData, ObjFlags, ObjId, WidgetKind};
use crate::style::prop::Coord;
use crate::ui::Ui;

use super::Widget;

/// Widget-private state of an arc.
#[derive(Debug, Clone)]
pub struct ArcState {
    pub value: i32,
    pub min: i32,
    pub max: i32,
    /// Sweep start in degrees.
    pub start_angle: i32,
    /// Sweep end in degrees; an end at or before the start wraps past 360.
    pub end_angle: i32,
}

impl Default for ArcState {
    fn default() -> Self {
        Self {
            value: 0,
            min: 0,
            max: 100,
            start_angle: 135,
            end_angle: 45,
        }
    }
}

/// A circular gauge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arc {
    id: ObjId,
}

impl Arc {
    /// Create an arc under `parent` with the default range and sweep.
    pub fn create(ui: &mut Ui, parent: ObjId) -> Self {
        let mut data = ObjData::new(WidgetKind::Arc).with_widget_state(ArcState::default());
        data.flags |= ObjFlags::CLICKABLE;
        data.local
            .set_width(Coord::px(80))
            .set_height(Coord::px(80));
        Self {
            id: ui.insert_object(Some(parent), data),
        }
    }

    /// Wrap an existing arc object.
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
        assert!(min < max, "arc range must be non-empty");
        let state = self.state_mut(ui);
        state.min = min;
        state.max = max;
        state.value = state.value.clamp(min, max);
        ui.invalidate_obj(self.id);
    }

    /// Change the background sweep.
    pub fn set_angles(&self, ui: &mut Ui, start: i32, end: i32) {
        let state = self.state_mut(ui);
        state.start_angle = start.rem_euclid(360);
        state.end_angle = end.rem_euclid(360);
        ui.invalidate_obj(self.id);
    }

    pub fn value(&self, ui: &Ui) -> i32 {
        self.state(ui).value
    }

    pub fn angles(&self, ui: &Ui) -> (i32, i32) {
        let s = self.state(ui);
        (s.start_angle, s.end_angle)
    }

    fn state<'a>(&self, ui: &'a Ui) -> &'a ArcState {
        ui.obj(self.id)
            .widget_state::<ArcState>()
            .expect("arc state missing")
    }

    fn state_mut<'a>(&self, ui: &'a mut Ui) -> &'a mut ArcState {
        ui.obj_mut(self.id)
            .widget_state_mut::<ArcState>()
            .expect("arc state missing")
    }
}

impl Widget for Arc {
    fn id(&self) -> ObjId {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::UiConfig;

    #[test]
    fn default_sweep_is_open_bottom() {
        let mut ui = Ui::new(UiConfig::default());
        let screen = ui.screen();
        let arc = Arc::create(&mut ui, screen);
        assert_eq!(arc.angles(&ui), (135, 45));
        assert_eq!(arc.value(&ui), 0);
    }

    #[test]
    fn set_value_clamps() {
        let mut ui = Ui::new(UiConfig::default());
        let screen = ui.screen();
        let arc = Arc::create(&mut ui, screen);
        let mut events = ui.events(arc.id());
        arc.set_value(&mut ui, 120);
        assert_eq!(arc.value(&ui), 100);
        assert!(events
            .drain()
            .iter()
            .any(|e| e.code == EventCode::ValueChanged));
    }

    #[test]
    fn angles_normalize() {
        let mut ui = Ui::new(UiConfig::default());
        let screen = ui.screen();
        let arc = Arc::create(&mut ui, screen);
        arc.set_angles(&mut ui, -90, 450);
        assert_eq!(arc.angles(&ui), (270, 90));
    }
}
