//! Dropdown widget: a closed selector that opens an option list.

use crate::event::EventCode;
use crate::obj::{ObjData, ObjFlags, ObjId, WidgetKind};
use crate::ui::Ui;

use super::Widget;

/// Widget-private state of a dropdown.
#[derive(Debug, Clone, Default)]
pub struct DropdownState {
    pub options: Vec<String>,
    pub selected: usize,
    /// Whether the option list is currently unfolded.
    pub open: bool,
}

/// A dropdown selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dropdown {
    id: ObjId,
}

impl Dropdown {
    /// Create a dropdown under `parent` with the given options.
    pub fn create(ui: &mut Ui, parent: ObjId, options: Vec<String>) -> Self {
        let mut data = ObjData::new(WidgetKind::Dropdown).with_widget_state(DropdownState {
            options,
            ..DropdownState::default()
        });
        data.flags |= ObjFlags::CLICKABLE;
        Self {
            id: ui.insert_object(Some(parent), data),
        }
    }

    /// Wrap an existing dropdown object.
    pub fn from_id(id: ObjId) -> Self {
        Self { id }
    }

    /// Unfold the option list.
    ///
    /// The list paints below the widget's own rect, so opening damages the
    /// whole display rather than tracking the overlay area.
    pub fn open(&self, ui: &mut Ui) {
        if !self.set_open(ui, true) {
            return;
        }
        ui.invalidate_all();
    }

    /// Fold the option list away.
    pub fn close(&self, ui: &mut Ui) {
        if !self.set_open(ui, false) {
            return;
        }
        ui.invalidate_all();
        ui.send_event(self.id, EventCode::Cancel);
    }

    /// Select an option by index and close the list.
    ///
    /// # Panics
    ///
    /// Panics when the index is out of bounds.
    pub fn set_selected(&self, ui: &mut Ui, index: usize) {
        let state = self.state_mut(ui);
        assert!(index < state.options.len(), "option index out of bounds");
        let changed = index != state.selected;
        state.selected = index;
        let was_open = state.open;
        state.open = false;
        if was_open {
            ui.invalidate_all();
        } else {
            ui.invalidate_obj(self.id);
        }
        if changed {
            ui.send_event(self.id, EventCode::ValueChanged);
        }
    }

    pub fn is_open(&self, ui: &Ui) -> bool {
        self.state(ui).open
    }

    pub fn selected(&self, ui: &Ui) -> usize {
        self.state(ui).selected
    }

    /// The selected option text, if any options exist.
    pub fn selected_text<'a>(&self, ui: &'a Ui) -> Option<&'a str> {
        let s = self.state(ui);
        s.options.get(s.selected).map(String::as_str)
    }

    /// Flip the open flag; false when it already had the requested value.
    fn set_open(&self, ui: &mut Ui, open: bool) -> bool {
        let state = self.state_mut(ui);
        if state.open == open {
            return false;
        }
        state.open = open;
        true
    }

    fn state<'a>(&self, ui: &'a Ui) -> &'a DropdownState {
        ui.obj(self.id)
            .widget_state::<DropdownState>()
            .expect("dropdown state missing")
    }

    fn state_mut<'a>(&self, ui: &'a mut Ui) -> &'a mut DropdownState {
        ui.obj_mut(self.id)
            .widget_state_mut::<DropdownState>()
            .expect("dropdown state missing")
    }
}

impl Widget for Dropdown {
    fn id(&self) -> ObjId {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::UiConfig;

    fn options() -> Vec<String> {
        vec!["small".into(), "medium".into(), "large".into()]
    }

    #[test]
    fn starts_closed_on_first_option() {
        let mut ui = Ui::new(UiConfig::default());
        let screen = ui.screen();
        let dd = Dropdown::create(&mut ui, screen, options());
        assert!(!dd.is_open(&ui));
        assert_eq!(dd.selected_text(&ui), Some("small"));
    }

    #[test]
    fn open_close_cycle() {
        let mut ui = Ui::new(UiConfig::default());
        let screen = ui.screen();
        let dd = Dropdown::create(&mut ui, screen, options());
        let mut events = ui.events(dd.id());

        dd.open(&mut ui);
        assert!(dd.is_open(&ui));
        // Opening twice is a no-op.
        dd.open(&mut ui);

        dd.close(&mut ui);
        assert!(!dd.is_open(&ui));
        assert!(events.drain().iter().any(|e| e.code == EventCode::Cancel));
    }

    #[test]
    fn selecting_closes_and_notifies() {
        let mut ui = Ui::new(UiConfig::default());
        let screen = ui.screen();
        let dd = Dropdown::create(&mut ui, screen, options());
        let mut events = ui.events(dd.id());

        dd.open(&mut ui);
        dd.set_selected(&mut ui, 2);
        assert!(!dd.is_open(&ui));
        assert_eq!(dd.selected_text(&ui), Some("large"));
        assert!(events
            .drain()
            .iter()
            .any(|e| e.code == EventCode::ValueChanged));

        // Re-selecting the same option closes silently.
        dd.open(&mut ui);
        events.drain();
        dd.set_selected(&mut ui, 2);
        assert!(events.drain().iter().all(|e| e.code != EventCode::ValueChanged));
    }
}
