//! (part, state) style selectors.

use crate::obj::State;

/// The part of a widget a style applies to.
///
/// Simple widgets only use `Main`; composite widgets (slider, bar, arc,
/// roller, dropdown) style their sub-parts independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Part {
    #[default]
    Main,
    Indicator,
    Knob,
    Selected,
    Items,
    Scrollbar,
}

/// Selects when an attached style applies: a part plus a state filter.
///
/// A selector matches an object when the object's state contains every bit
/// in the filter; the empty (default) filter matches any state. Among
/// matching entries, more state bits means more specific.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selector {
    pub part: Part,
    pub state: State,
}

impl Selector {
    /// Selector for a part in the default state.
    pub fn part(part: Part) -> Self {
        Self {
            part,
            state: State::DEFAULT,
        }
    }

    /// Selector for the main part under a state filter.
    pub fn state(state: State) -> Self {
        Self {
            part: Part::Main,
            state,
        }
    }

    /// Full (part, state) selector.
    pub fn new(part: Part, state: State) -> Self {
        Self { part, state }
    }

    /// Whether this selector applies to an object in `state`.
    pub fn matches(self, state: State) -> bool {
        state.contains(self.state)
    }

    /// Specificity: the number of state bits the filter requires.
    pub fn specificity(self) -> u32 {
        self.state.bits().count_ones()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_selector() {
        let sel = Selector::default();
        assert_eq!(sel.part, Part::Main);
        assert_eq!(sel.state, State::DEFAULT);
        assert_eq!(sel.specificity(), 0);
    }

    #[test]
    fn default_matches_any_state() {
        let sel = Selector::default();
        assert!(sel.matches(State::DEFAULT));
        assert!(sel.matches(State::PRESSED | State::FOCUSED));
    }

    #[test]
    fn state_filter_is_subset_match() {
        let sel = Selector::state(State::PRESSED);
        assert!(!sel.matches(State::DEFAULT));
        assert!(sel.matches(State::PRESSED));
        assert!(sel.matches(State::PRESSED | State::CHECKED));

        let both = Selector::state(State::PRESSED | State::CHECKED);
        assert!(!both.matches(State::PRESSED));
        assert!(both.matches(State::PRESSED | State::CHECKED));
    }

    #[test]
    fn specificity_counts_bits() {
        assert_eq!(Selector::state(State::PRESSED).specificity(), 1);
        assert_eq!(
            Selector::state(State::PRESSED | State::FOCUSED).specificity(),
            2
        );
    }

    #[test]
    fn part_selector() {
        let sel = Selector::part(Part::Knob);
        assert_eq!(sel.part, Part::Knob);
        assert!(sel.matches(State::DEFAULT));
    }
}
