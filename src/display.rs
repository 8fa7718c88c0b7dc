//! Display state: resolution, background, active screen.

use crate::color::{Color, Opacity};
use crate::geometry::{Rect, Size};
use crate::obj::ObjId;

/// The output surface the engine renders for.
///
/// One display, fixed resolution. Exactly one screen object is active at a
/// time; painting always starts from it. The display background shows
/// through wherever the active screen's own background is transparent.
#[derive(Debug)]
pub struct Display {
    resolution: Size,
    pub bg_color: Color,
    pub bg_opa: Opacity,
    active: Option<ObjId>,
}

impl Display {
    /// Create a display with the given resolution.
    pub fn new(width: i32, height: i32) -> Self {
        assert!(width > 0 && height > 0, "display resolution must not be empty");
        Self {
            resolution: Size::new(width, height),
            bg_color: Color::BLACK,
            bg_opa: Opacity::COVER,
            active: None,
        }
    }

    pub fn resolution(&self) -> Size {
        self.resolution
    }

    /// The full display rect at the origin.
    pub fn bounds(&self) -> Rect {
        Rect::sized(self.resolution.width, self.resolution.height)
    }

    /// The currently active screen, if one has been loaded.
    pub fn active_screen(&self) -> Option<ObjId> {
        self.active
    }

    pub(crate) fn set_active(&mut self, screen: ObjId) {
        self.active = Some(screen);
    }
}
