//! Text area widget: editable text with a cursor.
//!
//! The cursor is a char index into the text. Editing operations raise
//! `Insert`/`Delete` followed by `ValueChanged`; the caret only paints
//! while the object carries the focused state.

use crate::event::EventCode;
use crate::obj::{ObjData, ObjFlags, ObjId, WidgetKind};
use crate::ui::Ui;

use super::Widget;

/// Widget-private state of a text area.
#[derive(Debug, Clone, Default)]
pub struct TextAreaState {
    pub text: String,
    /// Caret position as a char index, 0..=char count.
    pub cursor: usize,
    /// Shown muted while the text is empty.
    pub placeholder: String,
    /// Reject newline input.
    pub one_line: bool,
}

/// An editable text field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextArea {
    id: ObjId,
}

impl TextArea {
    /// Create an empty text area under `parent`.
    pub fn create(ui: &mut Ui, parent: ObjId) -> Self {
        let mut data =
            ObjData::new(WidgetKind::TextArea).with_widget_state(TextAreaState::default());
        data.flags |= ObjFlags::CLICKABLE;
        Self {
            id: ui.insert_object(Some(parent), data),
        }
    }

    /// Wrap an existing text area object.
    pub fn from_id(id: ObjId) -> Self {
        Self { id }
    }

    /// Insert a character at the cursor.
    ///
    /// Newlines are dropped in one-line mode.
    pub fn insert_char(&self, ui: &mut Ui, ch: char) {
        let state = self.state_mut(ui);
        if ch == '\n' && state.one_line {
            return;
        }
        let at = byte_index(&state.text, state.cursor);
        state.text.insert(at, ch);
        state.cursor += 1;
        ui.invalidate_obj(self.id);
        ui.send_event(self.id, EventCode::Insert);
        ui.send_event(self.id, EventCode::ValueChanged);
    }

    /// Insert a string at the cursor.
    pub fn insert_str(&self, ui: &mut Ui, text: &str) {
        if text.is_empty() {
            return;
        }
        let state = self.state_mut(ui);
        let filtered: String = if state.one_line {
            text.chars().filter(|&c| c != '\n').collect()
        } else {
            text.to_owned()
        };
        if filtered.is_empty() {
            return;
        }
        let at = byte_index(&state.text, state.cursor);
        state.text.insert_str(at, &filtered);
        state.cursor += filtered.chars().count();
        ui.invalidate_obj(self.id);
        ui.send_event(self.id, EventCode::Insert);
        ui.send_event(self.id, EventCode::ValueChanged);
    }

    /// Delete the character before the cursor (backspace). No-op at the
    /// start of the text.
    pub fn delete_char(&self, ui: &mut Ui) {
        let state = self.state_mut(ui);
        if state.cursor == 0 {
            return;
        }
        let at = byte_index(&state.text, state.cursor - 1);
        state.text.remove(at);
        state.cursor -= 1;
        ui.invalidate_obj(self.id);
        ui.send_event(self.id, EventCode::Delete);
        ui.send_event(self.id, EventCode::ValueChanged);
    }

    /// Replace the whole text, placing the cursor at the end.
    pub fn set_text(&self, ui: &mut Ui, text: impl Into<String>) {
        let state = self.state_mut(ui);
        state.text = text.into();
        state.cursor = state.text.chars().count();
        ui.invalidate_obj(self.id);
        ui.send_event(self.id, EventCode::ValueChanged);
    }

    /// Move the cursor, clamped to the text length.
    pub fn set_cursor(&self, ui: &mut Ui, cursor: usize) {
        let state = self.state_mut(ui);
        state.cursor = cursor.min(state.text.chars().count());
        ui.invalidate_obj(self.id);
    }

    /// Text shown muted while the field is empty.
    pub fn set_placeholder(&self, ui: &mut Ui, text: impl Into<String>) {
        self.state_mut(ui).placeholder = text.into();
        ui.invalidate_obj(self.id);
    }

    /// Restrict input to a single line.
    pub fn set_one_line(&self, ui: &mut Ui, one_line: bool) {
        self.state_mut(ui).one_line = one_line;
    }

    pub fn text<'a>(&self, ui: &'a Ui) -> &'a str {
        &self.state(ui).text
    }

    pub fn cursor(&self, ui: &Ui) -> usize {
        self.state(ui).cursor
    }

    fn state<'a>(&self, ui: &'a Ui) -> &'a TextAreaState {
        ui.obj(self.id)
            .widget_state::<TextAreaState>()
            .expect("text area state missing")
    }

    fn state_mut<'a>(&self, ui: &'a mut Ui) -> &'a mut TextAreaState {
        ui.obj_mut(self.id)
            .widget_state_mut::<TextAreaState>()
            .expect("text area state missing")
    }
}

impl Widget for TextArea {
    fn id(&self) -> ObjId {
        self.id
    }
}

/// Byte offset of the `cursor`-th char; the text length when past the end.
fn byte_index(text: &str, cursor: usize) -> usize {
    text.char_indices()
        .nth(cursor)
        .map(|(i, _)| i)
        .unwrap_or(text.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::UiConfig;

    fn fixture() -> (Ui, TextArea) {
        let mut ui = Ui::new(UiConfig::default());
        let screen = ui.screen();
        let ta = TextArea::create(&mut ui, screen);
        (ui, ta)
    }

    #[test]
    fn typing_inserts_at_cursor() {
        let (mut ui, ta) = fixture();
        ta.insert_char(&mut ui, 'a');
        ta.insert_char(&mut ui, 'c');
        ta.set_cursor(&mut ui, 1);
        ta.insert_char(&mut ui, 'b');
        assert_eq!(ta.text(&ui), "abc");
        assert_eq!(ta.cursor(&ui), 2);
    }

    #[test]
    fn backspace_removes_before_cursor() {
        let (mut ui, ta) = fixture();
        ta.set_text(&mut ui, "abc");
        ta.delete_char(&mut ui);
        assert_eq!(ta.text(&ui), "ab");
        assert_eq!(ta.cursor(&ui), 2);

        ta.set_cursor(&mut ui, 0);
        ta.delete_char(&mut ui);
        assert_eq!(ta.text(&ui), "ab");
    }

    #[test]
    fn edits_raise_events_in_order() {
        let (mut ui, ta) = fixture();
        let mut events = ui.events(ta.id());
        ta.insert_char(&mut ui, 'x');
        let codes: Vec<_> = events.drain().iter().map(|e| e.code).collect();
        assert_eq!(codes, vec![EventCode::Insert, EventCode::ValueChanged]);

        ta.delete_char(&mut ui);
        let codes: Vec<_> = events.drain().iter().map(|e| e.code).collect();
        assert_eq!(codes, vec![EventCode::Delete, EventCode::ValueChanged]);
    }

    #[test]
    fn one_line_rejects_newlines() {
        let (mut ui, ta) = fixture();
        ta.set_one_line(&mut ui, true);
        ta.insert_str(&mut ui, "ab\ncd");
        ta.insert_char(&mut ui, '\n');
        assert_eq!(ta.text(&ui), "abcd");
    }

    #[test]
    fn multibyte_text_keeps_char_indexing() {
        let (mut ui, ta) = fixture();
        ta.insert_str(&mut ui, "héllo");
        assert_eq!(ta.cursor(&ui), 5);
        ta.set_cursor(&mut ui, 2);
        ta.delete_char(&mut ui);
        assert_eq!(ta.text(&ui), "hllo");
    }

    #[test]
    fn set_text_moves_cursor_to_end() {
        let (mut ui, ta) = fixture();
        ta.set_text(&mut ui, "hello");
        assert_eq!(ta.cursor(&ui), 5);
    }
}
