//! Button matrix widget: a grid of lightweight text buttons on one object.
//!
//! Buttons are not tree objects; they are cells of the matrix, identified by
//! a flat id counted across rows. Rows share the object's height equally and
//! cells split each row's width by their relative width units.

use bitflags::bitflags;

use crate::event::EventCode;
use crate::obj::{ObjData, ObjFlags, ObjId, WidgetKind};
use crate::ui::Ui;

use super::Widget;

bitflags! {
    /// Per-button behavior bits.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ButtonCtrl: u8 {
        /// Not drawn; the cell keeps its place in the row.
        const HIDDEN    = 1 << 0;
        /// Ignores toggling.
        const DISABLED  = 1 << 1;
        /// Click toggles CHECKED.
        const CHECKABLE = 1 << 2;
        const CHECKED   = 1 << 3;
    }
}

/// One cell of the matrix.
#[derive(Debug, Clone)]
pub struct MatrixButton {
    pub text: String,
    /// Relative width in units within the row.
    pub width: u8,
    pub ctrl: ButtonCtrl,
}

impl MatrixButton {
    fn new(text: String) -> Self {
        Self {
            text,
            width: 1,
            ctrl: ButtonCtrl::empty(),
        }
    }
}

/// Widget-private state of a button matrix.
#[derive(Debug, Clone, Default)]
pub struct ButtonMatrixState {
    /// Buttons grouped by row. Flat ids count left to right, top to bottom.
    pub rows: Vec<Vec<MatrixButton>>,
    pub selected: Option<u16>,
    /// Checking one button unchecks every other.
    pub one_checked: bool,
}

impl ButtonMatrixState {
    pub fn button(&self, id: u16) -> Option<&MatrixButton> {
        self.rows.iter().flatten().nth(id as usize)
    }

    fn button_mut(&mut self, id: u16) -> Option<&mut MatrixButton> {
        self.rows.iter_mut().flatten().nth(id as usize)
    }

    pub fn button_count(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }
}

/// A grid of text buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonMatrix {
    id: ObjId,
}

impl ButtonMatrix {
    /// Create a button matrix under `parent` from rows of button texts.
    pub fn create(ui: &mut Ui, parent: ObjId, map: Vec<Vec<String>>) -> Self {
        let rows = map
            .into_iter()
            .map(|row| row.into_iter().map(MatrixButton::new).collect())
            .collect();
        let mut data = ObjData::new(WidgetKind::ButtonMatrix).with_widget_state(
            ButtonMatrixState {
                rows,
                ..ButtonMatrixState::default()
            },
        );
        data.flags |= ObjFlags::CLICKABLE;
        Self {
            id: ui.insert_object(Some(parent), data),
        }
    }

    /// Wrap an existing button matrix object.
    pub fn from_id(id: ObjId) -> Self {
        Self { id }
    }

    /// Replace the whole map, clearing the selection and every control bit.
    pub fn set_map(&self, ui: &mut Ui, map: Vec<Vec<String>>) {
        let state = self.state_mut(ui);
        state.rows = map
            .into_iter()
            .map(|row| row.into_iter().map(MatrixButton::new).collect())
            .collect();
        state.selected = None;
        ui.invalidate_obj(self.id);
    }

    pub fn button_count(&self, ui: &Ui) -> usize {
        self.state(ui).button_count()
    }

    /// Select a button by flat id.
    ///
    /// # Panics
    ///
    /// Panics when the id is out of bounds.
    pub fn select(&self, ui: &mut Ui, id: u16) {
        let state = self.state_mut(ui);
        assert!(
            (id as usize) < state.button_count(),
            "button id out of bounds"
        );
        if state.selected == Some(id) {
            return;
        }
        state.selected = Some(id);
        ui.invalidate_obj(self.id);
        ui.send_event(self.id, EventCode::ValueChanged);
    }

    pub fn clear_selection(&self, ui: &mut Ui) {
        let state = self.state_mut(ui);
        if state.selected.take().is_some() {
            ui.invalidate_obj(self.id);
        }
    }

    pub fn selected(&self, ui: &Ui) -> Option<u16> {
        self.state(ui).selected
    }

    /// The selected button's text, if a selection exists.
    pub fn selected_text<'a>(&self, ui: &'a Ui) -> Option<&'a str> {
        let state = self.state(ui);
        let id = state.selected?;
        state.button(id).map(|b| b.text.as_str())
    }

    /// A button's text by flat id, or `None` for an absent id.
    pub fn button_text<'a>(&self, ui: &'a Ui, id: u16) -> Option<&'a str> {
        self.state(ui).button(id).map(|b| b.text.as_str())
    }

    /// Set a button's relative width units within its row.
    ///
    /// # Panics
    ///
    /// Panics when the id is out of bounds or the width is zero.
    pub fn set_button_width(&self, ui: &mut Ui, id: u16, width: u8) {
        assert!(width > 0, "button width must be at least one unit");
        let state = self.state_mut(ui);
        state
            .button_mut(id)
            .expect("button id out of bounds")
            .width = width;
        ui.invalidate_obj(self.id);
    }

    /// Set control bits on one button.
    pub fn set_ctrl(&self, ui: &mut Ui, id: u16, ctrl: ButtonCtrl) {
        let state = self.state_mut(ui);
        state
            .button_mut(id)
            .expect("button id out of bounds")
            .ctrl |= ctrl;
        if ctrl.contains(ButtonCtrl::CHECKED) && state.one_checked {
            self.uncheck_others(state, id);
        }
        ui.invalidate_obj(self.id);
    }

    /// Clear control bits on one button.
    pub fn clear_ctrl(&self, ui: &mut Ui, id: u16, ctrl: ButtonCtrl) {
        self.state_mut(ui)
            .button_mut(id)
            .expect("button id out of bounds")
            .ctrl -= ctrl;
        ui.invalidate_obj(self.id);
    }

    /// Set control bits on every button.
    pub fn set_ctrl_all(&self, ui: &mut Ui, ctrl: ButtonCtrl) {
        for btn in self.state_mut(ui).rows.iter_mut().flatten() {
            btn.ctrl |= ctrl;
        }
        ui.invalidate_obj(self.id);
    }

    /// Clear control bits on every button.
    pub fn clear_ctrl_all(&self, ui: &mut Ui, ctrl: ButtonCtrl) {
        for btn in self.state_mut(ui).rows.iter_mut().flatten() {
            btn.ctrl -= ctrl;
        }
        ui.invalidate_obj(self.id);
    }

    /// Whether a button has all of the given bits. `false` for absent ids.
    pub fn has_ctrl(&self, ui: &Ui, id: u16, ctrl: ButtonCtrl) -> bool {
        self.state(ui)
            .button(id)
            .is_some_and(|b| b.ctrl.contains(ctrl))
    }

    /// Toggle a checkable button, honoring one-checked mode.
    ///
    /// No-op for disabled or non-checkable buttons.
    ///
    /// # Panics
    ///
    /// Panics when the id is out of bounds.
    pub fn toggle(&self, ui: &mut Ui, id: u16) {
        let state = self.state_mut(ui);
        let btn = state.button_mut(id).expect("button id out of bounds");
        if btn.ctrl.contains(ButtonCtrl::DISABLED) || !btn.ctrl.contains(ButtonCtrl::CHECKABLE) {
            return;
        }
        btn.ctrl.toggle(ButtonCtrl::CHECKED);
        let now_checked = btn.ctrl.contains(ButtonCtrl::CHECKED);
        if now_checked && state.one_checked {
            self.uncheck_others(state, id);
        }
        ui.invalidate_obj(self.id);
        ui.send_event(self.id, EventCode::ValueChanged);
    }

    /// Allow at most one checked button. Enabling keeps only the first.
    pub fn set_one_checked(&self, ui: &mut Ui, on: bool) {
        let state = self.state_mut(ui);
        state.one_checked = on;
        if on {
            let mut seen = false;
            for btn in state.rows.iter_mut().flatten() {
                if btn.ctrl.contains(ButtonCtrl::CHECKED) {
                    if seen {
                        btn.ctrl -= ButtonCtrl::CHECKED;
                    }
                    seen = true;
                }
            }
        }
        ui.invalidate_obj(self.id);
    }

    pub fn one_checked(&self, ui: &Ui) -> bool {
        self.state(ui).one_checked
    }

    fn uncheck_others(&self, state: &mut ButtonMatrixState, keep: u16) {
        for (i, btn) in state.rows.iter_mut().flatten().enumerate() {
            if i != keep as usize {
                btn.ctrl -= ButtonCtrl::CHECKED;
            }
        }
    }

    fn state<'a>(&self, ui: &'a Ui) -> &'a ButtonMatrixState {
        ui.obj(self.id)
            .widget_state::<ButtonMatrixState>()
            .expect("button matrix state missing")
    }

    fn state_mut<'a>(&self, ui: &'a mut Ui) -> &'a mut ButtonMatrixState {
        ui.obj_mut(self.id)
            .widget_state_mut::<ButtonMatrixState>()
            .expect("button matrix state missing")
    }
}

impl Widget for ButtonMatrix {
    fn id(&self) -> ObjId {
        self.id
    }
}
