//! Image widget: blits pixel data into its rect.

use crate::color::Color;
use crate::obj::{ObjData, ObjId, WidgetKind};
use crate::style::prop::Coord;
use crate::ui::Ui;

use super::Widget;

/// Where an image's pixels come from.
#[derive(Debug, Clone, PartialEq)]
pub enum ImageSource {
    /// Decoded pixel data, row-major.
    Raw {
        width: i32,
        height: i32,
        pixels: Vec<Color>,
    },
    /// A path or URI to decode at paint time (not handled yet).
    External(String),
}

impl ImageSource {
    /// Intrinsic size, when known without decoding.
    pub fn size(&self) -> Option<(i32, i32)> {
        match self {
            ImageSource::Raw { width, height, .. } => Some((*width, *height)),
            ImageSource::External(_) => None,
        }
    }
}

/// Widget-private state of an image.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageState {
    pub source: ImageSource,
}

/// An image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Image {
    id: ObjId,
}

impl Image {
    /// Create an image under `parent`, sized to the source when possible.
    pub fn create(ui: &mut Ui, parent: ObjId, source: ImageSource) -> Self {
        if let ImageSource::Raw {
            width,
            height,
            ref pixels,
        } = source
        {
            assert_eq!(
                pixels.len(),
                (width * height) as usize,
                "pixel count must match the declared size"
            );
        }
        let size = source.size();
        let mut data = ObjData::new(WidgetKind::Image).with_widget_state(ImageState { source });
        if let Some((w, h)) = size {
            data.local.set_width(Coord::px(w)).set_height(Coord::px(h));
        }
        Self {
            id: ui.insert_object(Some(parent), data),
        }
    }

    /// Wrap an existing image object.
    pub fn from_id(id: ObjId) -> Self {
        Self { id }
    }

    /// Replace the pixel source, resizing to the new intrinsic size.
    pub fn set_source(&self, ui: &mut Ui, source: ImageSource) {
        let size = source.size();
        self.state_mut(ui).source = source;
        if let Some((w, h)) = size {
            ui.set_size(self.id, Coord::px(w), Coord::px(h));
        }
        ui.invalidate_obj(self.id);
    }

    pub fn source<'a>(&self, ui: &'a Ui) -> &'a ImageSource {
        &self.state(ui).source
    }

    fn state<'a>(&self, ui: &'a Ui) -> &'a ImageState {
        ui.obj(self.id)
            .widget_state::<ImageState>()
            .expect("image state missing")
    }

    fn state_mut<'a>(&self, ui: &'a mut Ui) -> &'a mut ImageState {
        ui.obj_mut(self.id)
            .widget_state_mut::<ImageState>()
            .expect("image state missing")
    }
}

impl Widget for Image {
    fn id(&self) -> ObjId {
        self.id
    }
}
