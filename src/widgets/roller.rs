//! Roller widget: a vertically scrolling option picker.

use crate::event::EventCode;
use crate::obj::{ObjData, ObjFlags, ObjId, WidgetKind};
use crate::ui::Ui;

use super::Widget;

/// Widget-private state of a roller.
#[derive(Debug, Clone)]
pub struct RollerState {
    pub options: Vec<String>,
    /// Index of the selected option, centered on the middle visible row.
    pub selected: usize,
    pub visible_rows: u16,
}

impl Default for RollerState {
    fn default() -> Self {
        Self {
            options: Vec::new(),
            selected: 0,
            visible_rows: 3,
        }
    }
}

/// An option roller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Roller {
    id: ObjId,
}

impl Roller {
    /// Create a roller under `parent` with the given options.
    pub fn create(ui: &mut Ui, parent: ObjId, options: Vec<String>) -> Self {
        let mut data = ObjData::new(WidgetKind::Roller).with_widget_state(RollerState {
            options,
            ..RollerState::default()
        });
        data.flags |= ObjFlags::CLICKABLE | ObjFlags::SCROLLABLE;
        Self {
            id: ui.insert_object(Some(parent), data),
        }
    }

    /// Wrap an existing roller object.
    pub fn from_id(id: ObjId) -> Self {
        Self { id }
    }

    /// Select an option by index.
    ///
    /// # Panics
    ///
    /// Panics when the index is out of bounds.
    pub fn set_selected(&self, ui: &mut Ui, index: usize) {
        let state = self.state_mut(ui);
        assert!(index < state.options.len(), "option index out of bounds");
        if index == state.selected {
            return;
        }
        state.selected = index;
        ui.invalidate_obj(self.id);
        ui.send_event(self.id, EventCode::ValueChanged);
    }

    /// Replace the option list, resetting the selection to the first entry.
    pub fn set_options(&self, ui: &mut Ui, options: Vec<String>) {
        let state = self.state_mut(ui);
        state.options = options;
        state.selected = 0;
        ui.invalidate_obj(self.id);
    }

    /// How many rows are visible at once.
    pub fn set_visible_rows(&self, ui: &mut Ui, rows: u16) {
        assert!(rows > 0, "a roller shows at least one row");
        self.state_mut(ui).visible_rows = rows;
        ui.invalidate_obj(self.id);
        ui.mark_layout_dirty();
    }

    pub fn selected(&self, ui: &Ui) -> usize {
        self.state(ui).selected
    }

    /// The selected option text, if any options exist.
    pub fn selected_text<'a>(&self, ui: &'a Ui) -> Option<&'a str> {
        let s = self.state(ui);
        s.options.get(s.selected).map(String::as_str)
    }

    fn state<'a>(&self, ui: &'a Ui) -> &'a RollerState {
        ui.obj(self.id)
            .widget_state::<RollerState>()
            .expect("roller state missing")
    }

    fn state_mut<'a>(&self, ui: &'a mut Ui) -> &'a mut RollerState {
        ui.obj_mut(self.id)
            .widget_state_mut::<RollerState>()
            .expect("roller state missing")
    }
}

impl Widget for Roller {
    fn id(&self) -> ObjId {
        self.id
    }
}
