//! Button widget: a clickable box, usually carrying a label child.

use crate::obj::{ObjData, ObjFlags, ObjId, WidgetKind};
use crate::ui::Ui;

use super::label::Label;
use super::Widget;

/// A clickable button.
///
/// The button itself is just a decorated, clickable box; the caption is a
/// regular [`Label`] child so it participates in layout and styling like
/// any other object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Button {
    id: ObjId,
    label: ObjId,
}

impl Button {
    /// Create a button under `parent` with a caption label.
    pub fn create(ui: &mut Ui, parent: ObjId, text: impl Into<String>) -> Self {
        let data = ObjData::new(WidgetKind::Button).with_flags(ObjFlags::CLICKABLE);
        let id = ui.insert_object(Some(parent), data);
        let label = Label::create(ui, id, text);
        // Clicks on the caption reach the button.
        ui.add_flags(label.id(), ObjFlags::EVENT_BUBBLE);
        Self {
            id,
            label: label.id(),
        }
    }

    /// The caption label handle.
    pub fn label(&self) -> Label {
        Label::from_id(self.label)
    }

    /// Replace the caption text.
    pub fn set_text(&self, ui: &mut Ui, text: impl Into<String>) {
        self.label().set_text(ui, text);
    }
}

impl Widget for Button {
    fn id(&self) -> ObjId {
        self.id
    }
}
