//! Object flag and state bitsets.

use bitflags::bitflags;

bitflags! {
    /// Behavioral flags on an object.
    ///
    /// Flags configure how an object participates in input, layout, and
    /// event propagation. They are orthogonal to [`State`], which tracks
    /// transient interaction status.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ObjFlags: u32 {
        /// Skipped by painting and layout.
        const HIDDEN        = 1 << 0;
        /// Accepts press/click events.
        const CLICKABLE     = 1 << 1;
        /// Toggles CHECKED state on click.
        const CHECKABLE     = 1 << 2;
        /// Content may scroll.
        const SCROLLABLE    = 1 << 3;
        /// Events delivered to this object continue to its parent.
        const EVENT_BUBBLE  = 1 << 4;
        /// Keep PRESSED while the press is held, even off-object.
        const PRESS_LOCK    = 1 << 5;
        /// Positioned outside the parent's layout flow.
        const FLOATING      = 1 << 6;
        /// Present in the tree but ignored by the layout engine.
        const IGNORE_LAYOUT = 1 << 7;
    }
}

bitflags! {
    /// Transient interaction state of an object.
    ///
    /// The empty set is the default state. Style selectors filter on these
    /// bits, so state changes trigger a style refresh.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct State: u16 {
        const CHECKED  = 1 << 0;
        const FOCUSED  = 1 << 1;
        const PRESSED  = 1 << 2;
        const EDITED   = 1 << 3;
        const HOVERED  = 1 << 4;
        const DISABLED = 1 << 5;
        const SCROLLED = 1 << 6;
    }
}

impl State {
    /// The default (no bits set) state.
    pub const DEFAULT: State = State::empty();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_default_empty() {
        assert_eq!(ObjFlags::default(), ObjFlags::empty());
    }

    #[test]
    fn flags_set_and_test() {
        let mut f = ObjFlags::CLICKABLE;
        f |= ObjFlags::EVENT_BUBBLE;
        assert!(f.contains(ObjFlags::CLICKABLE));
        assert!(f.contains(ObjFlags::EVENT_BUBBLE));
        assert!(!f.contains(ObjFlags::HIDDEN));
        f.remove(ObjFlags::CLICKABLE);
        assert!(!f.contains(ObjFlags::CLICKABLE));
    }

    #[test]
    fn state_default_is_empty() {
        assert_eq!(State::DEFAULT, State::empty());
        assert!(State::DEFAULT.is_empty());
    }

    #[test]
    fn state_subset() {
        let s = State::PRESSED | State::FOCUSED;
        assert!(s.contains(State::PRESSED));
        assert!(!State::PRESSED.contains(s));
    }
}
