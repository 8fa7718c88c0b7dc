//! Label widget: one or more lines of styled text.

use crate::obj::{ObjData, ObjId, WidgetKind};
use crate::style::prop::TextAlignKind;
use crate::ui::Ui;

use super::Widget;

/// Widget-private state of a label.
#[derive(Debug, Clone, Default)]
pub struct LabelState {
    /// Text content; `\n` separates lines.
    pub text: String,
    /// Horizontal alignment of each line within the content box.
    pub align: TextAlignKind,
}

/// A text label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Label {
    id: ObjId,
}

impl Label {
    /// Create a label under `parent` with initial text.
    pub fn create(ui: &mut Ui, parent: ObjId, text: impl Into<String>) -> Self {
        let data = ObjData::new(WidgetKind::Label).with_widget_state(LabelState {
            text: text.into(),
            align: TextAlignKind::default(),
        });
        Self {
            id: ui.insert_object(Some(parent), data),
        }
    }

    /// Wrap an existing label object.
    pub fn from_id(id: ObjId) -> Self {
        Self { id }
    }

    /// Replace the label text.
    pub fn set_text(&self, ui: &mut Ui, text: impl Into<String>) {
        self.state_mut(ui).text = text.into();
        ui.invalidate_obj(self.id);
        ui.mark_layout_dirty();
    }

    /// The current text.
    pub fn text<'a>(&self, ui: &'a Ui) -> &'a str {
        &self.state(ui).text
    }

    /// Set the horizontal alignment of the text.
    pub fn set_align(&self, ui: &mut Ui, align: TextAlignKind) {
        self.state_mut(ui).align = align;
        ui.invalidate_obj(self.id);
    }

    fn state<'a>(&self, ui: &'a Ui) -> &'a LabelState {
        ui.obj(self.id)
            .widget_state::<LabelState>()
            .expect("label state missing")
    }

    fn state_mut<'a>(&self, ui: &'a mut Ui) -> &'a mut LabelState {
        ui.obj_mut(self.id)
            .widget_state_mut::<LabelState>()
            .expect("label state missing")
    }
}

impl Widget for Label {
    fn id(&self) -> ObjId {
        self.id
    }
}
