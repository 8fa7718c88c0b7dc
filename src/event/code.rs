//! Event code enumeration.

/// What happened to an object.
///
/// Input codes are injected by the embedder (hit-testing lives outside the
/// engine); lifecycle codes are raised by the engine itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventCode {
    // Input
    Pressed,
    Pressing,
    PressLost,
    ShortClicked,
    LongPressed,
    LongPressedRepeat,
    Clicked,
    Released,
    ScrollBegin,
    Scroll,
    ScrollEnd,
    // Value / editing
    ValueChanged,
    Insert,
    Delete,
    Ready,
    Cancel,
    // Focus
    FocusGained,
    FocusLost,
    // Lifecycle (engine-raised)
    Created,
    Destroyed,
    StateChanged,
    StyleChanged,
    SizeChanged,
    ChildChanged,
}

impl EventCode {
    /// Whether this code is raised by the engine rather than injected input.
    pub fn is_lifecycle(self) -> bool {
        matches!(
            self,
            EventCode::Created
                | EventCode::Destroyed
                | EventCode::StateChanged
                | EventCode::StyleChanged
                | EventCode::SizeChanged
                | EventCode::ChildChanged
        )
    }
}
