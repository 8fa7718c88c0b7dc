//! Line widget: a polyline drawn with the line style properties.

use crate::geometry::Point;
use crate::obj::{ObjData, ObjId, WidgetKind};
use crate::style::prop::Coord;
use crate::ui::Ui;

use super::Widget;

/// Widget-private state of a line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineState {
    /// Vertices relative to the widget's own origin.
    pub points: Vec<Point>,
}

/// A polyline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line {
    id: ObjId,
}

impl Line {
    /// Create a line under `parent`, sized to the points' bounding box.
    pub fn create(ui: &mut Ui, parent: ObjId, points: Vec<Point>) -> Self {
        let (w, h) = bounding_size(&points);
        let data = ObjData::new(WidgetKind::Line).with_widget_state(LineState { points });
        let id = ui.insert_object(Some(parent), data);
        ui.set_size(id, Coord::px(w), Coord::px(h));
        Self { id }
    }

    /// Wrap an existing line object.
    pub fn from_id(id: ObjId) -> Self {
        Self { id }
    }

    /// Replace the vertices, resizing to the new bounding box.
    pub fn set_points(&self, ui: &mut Ui, points: Vec<Point>) {
        let (w, h) = bounding_size(&points);
        ui.obj_mut(self.id)
            .widget_state_mut::<LineState>()
            .expect("line state missing")
            .points = points;
        ui.set_size(self.id, Coord::px(w), Coord::px(h));
        ui.invalidate_obj(self.id);
    }

    pub fn points<'a>(&self, ui: &'a Ui) -> &'a [Point] {
        &ui.obj(self.id)
            .widget_state::<LineState>()
            .expect("line state missing")
            .points
    }
}

impl Widget for Line {
    fn id(&self) -> ObjId {
        self.id
    }
}

/// Smallest size containing every vertex (vertices are origin-relative).
fn bounding_size(points: &[Point]) -> (i32, i32) {
    let w = points.iter().map(|p| p.x).max().unwrap_or(0) + 1;
    let h = points.iter().map(|p| p.y).max().unwrap_or(0) + 1;
    (w.max(1), h.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::UiConfig;

    #[test]
    fn create_sizes_to_bounding_box() {
        let mut ui = Ui::new(UiConfig::default());
        let screen = ui.screen();
        let line = Line::create(
            &mut ui,
            screen,
            vec![Point::new(0, 10), Point::new(30, 0), Point::new(15, 20)],
        );
        let local = &ui.obj(line.id()).local;
        assert_eq!(local.width(), Some(Coord::px(31)));
        assert_eq!(local.height(), Some(Coord::px(21)));
        assert_eq!(line.points(&ui).len(), 3);
    }

    #[test]
    fn set_points_replaces_and_resizes() {
        let mut ui = Ui::new(UiConfig::default());
        let screen = ui.screen();
        let line = Line::create(&mut ui, screen, vec![Point::new(0, 0), Point::new(5, 5)]);
        line.set_points(&mut ui, vec![Point::new(0, 0), Point::new(50, 2)]);
        assert_eq!(ui.obj(line.id()).local.width(), Some(Coord::px(51)));
    }

    #[test]
    fn empty_line_is_one_pixel() {
        assert_eq!(bounding_size(&[]), (1, 1));
    }
}
