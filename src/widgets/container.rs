//! Container widget: a plain box that lays out its children.

use crate::obj::{ObjId, WidgetKind};
use crate::style::prop::{FlexAlign, FlexFlow, GridAlign, LayoutKind, TrackSize};
use crate::ui::Ui;

use super::Widget;

/// A layout container.
///
/// Containers have no body of their own beyond the common box decoration;
/// their job is arranging children. The layout algorithm is a style
/// property, so it can also come from a shared style or a theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Container {
    id: ObjId,
}

impl Container {
    /// Create a container under `parent`.
    pub fn create(ui: &mut Ui, parent: ObjId) -> Self {
        Self {
            id: ui.create_object(WidgetKind::Container, parent),
        }
    }

    /// Wrap an existing container object.
    pub fn from_id(id: ObjId) -> Self {
        Self { id }
    }

    /// Lay out children with the flex algorithm.
    pub fn set_flex(&self, ui: &mut Ui, flow: FlexFlow) {
        ui.modify_local(self.id, |s| {
            s.set_layout(LayoutKind::Flex).set_flex_flow(flow);
        });
    }

    /// Placement of children along the flex axes.
    pub fn set_flex_align(&self, ui: &mut Ui, main: FlexAlign, cross: FlexAlign) {
        ui.modify_local(self.id, |s| {
            s.set_flex_main_place(main).set_flex_cross_place(cross);
        });
    }

    /// Lay out children on a grid with the given track templates.
    pub fn set_grid(&self, ui: &mut Ui, cols: Vec<TrackSize>, rows: Vec<TrackSize>) {
        ui.modify_local(self.id, |s| {
            s.set_layout(LayoutKind::Grid)
                .set_grid_cols(cols)
                .set_grid_rows(rows);
        });
    }

    /// Switch back to manual (x/y) positioning.
    pub fn clear_layout(&self, ui: &mut Ui) {
        ui.modify_local(self.id, |s| {
            s.set_layout(LayoutKind::None);
        });
    }
}

impl Widget for Container {
    fn id(&self) -> ObjId {
        self.id
    }
}

/// Place an object into a cell of its grid-layout parent.
///
/// Positions are zero-based track indices; spans are at least 1.
pub fn set_grid_cell(
    ui: &mut Ui,
    obj: ObjId,
    col: i32,
    col_span: i32,
    row: i32,
    row_span: i32,
) {
    ui.modify_local(obj, |s| {
        s.set_grid_cell_col_pos(col)
            .set_grid_cell_col_span(col_span)
            .set_grid_cell_row_pos(row)
            .set_grid_cell_row_span(row_span);
    });
}

/// Align an object within its grid cell.
pub fn set_grid_align(ui: &mut Ui, obj: ObjId, x: GridAlign, y: GridAlign) {
    ui.modify_local(obj, |s| {
        s.set_grid_cell_x_align(x).set_grid_cell_y_align(y);
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::prop::Coord;
    use crate::ui::{NullTarget, UiConfig};

    #[test]
    fn create_inserts_under_parent() {
        let mut ui = Ui::new(UiConfig::default());
        let screen = ui.screen();
        let panel = Container::create(&mut ui, screen);
        assert_eq!(ui.parent(panel.id()), Some(screen));
        assert_eq!(ui.obj(panel.id()).kind, WidgetKind::Container);
    }

    #[test]
    fn set_flex_writes_layout_props() {
        let mut ui = Ui::new(UiConfig::default());
        let screen = ui.screen();
        let panel = Container::create(&mut ui, screen);
        panel.set_flex(&mut ui, FlexFlow::Column);
        let local = &ui.obj(panel.id()).local;
        assert_eq!(local.layout(), Some(LayoutKind::Flex));
        assert_eq!(local.flex_flow(), Some(FlexFlow::Column));
    }

    #[test]
    fn flex_column_positions_children() {
        let mut ui = Ui::new(UiConfig::default());
        let screen = ui.screen();
        let panel = Container::create(&mut ui, screen);
        ui.set_size(panel.id(), Coord::px(100), Coord::px(100));
        panel.set_flex(&mut ui, FlexFlow::Column);

        let a = Container::create(&mut ui, panel.id());
        ui.set_size(a.id(), Coord::px(100), Coord::px(30));
        let b = Container::create(&mut ui, panel.id());
        ui.set_size(b.id(), Coord::px(100), Coord::px(30));

        let mut sink = NullTarget;
        ui.refresh(&mut sink);
        assert_eq!(ui.obj(a.id()).rect.y, 0);
        assert_eq!(ui.obj(b.id()).rect.y, 30);
    }

    #[test]
    fn grid_cell_places_child() {
        let mut ui = Ui::new(UiConfig::default());
        let screen = ui.screen();
        let panel = Container::create(&mut ui, screen);
        ui.set_size(panel.id(), Coord::px(200), Coord::px(100));
        panel.set_grid(
            &mut ui,
            vec![TrackSize::Px(100), TrackSize::Fr(1)],
            vec![TrackSize::Fr(1)],
        );

        let cell = Container::create(&mut ui, panel.id());
        set_grid_cell(&mut ui, cell.id(), 1, 1, 0, 1);

        let mut sink = NullTarget;
        ui.refresh(&mut sink);
        assert_eq!(ui.obj(cell.id()).rect.x, 100);
    }
}
