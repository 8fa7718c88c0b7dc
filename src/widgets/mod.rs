//! Built-in widgets: typed handles over tree objects.
//!
//! A widget handle is a `Copy` wrapper around an [`ObjId`] with methods for
//! the widget's operations. Handles borrow the [`Ui`](crate::ui::Ui) per
//! call instead of holding it, so any number of handles can coexist. The
//! widget-private state lives on the node (`ObjData::widget_state`) and is
//! downcast by the handle; the painter reads the same state.

pub mod arc;
pub mod bar;
pub mod button;
pub mod button_matrix;
pub mod container;
pub mod dropdown;
pub mod image;
pub mod label;
pub mod line;
pub mod roller;
pub mod slider;
pub mod textarea;

pub use arc::Arc;
pub use bar::Bar;
pub use button::Button;
pub use button_matrix::{ButtonCtrl, ButtonMatrix};
pub use container::Container;
pub use dropdown::Dropdown;
pub use image::Image;
pub use label::Label;
pub use line::Line;
pub use roller::Roller;
pub use slider::Slider;
pub use textarea::TextArea;

use crate::obj::ObjId;

/// Common surface of typed widget handles.
pub trait Widget {
    /// The underlying tree object.
    fn id(&self) -> ObjId;
}
