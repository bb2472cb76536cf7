use crate::animation::stage::ShapeLevel;
use crate::foundation::core::{Rect, Rgba8};

/// Drawing primitive the clock face renders through.
pub trait DrawSurface {
    /// Clear the whole surface to `color`.
    fn fill_background(&mut self, color: Rgba8);

    /// Draw the shape for `level` inside the device-pixel cell `frame`.
    fn draw_shape(&mut self, frame: Rect, level: ShapeLevel, color: Rgba8);
}

/// One recorded draw call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DrawCall {
    /// [`DrawSurface::fill_background`].
    Background(Rgba8),
    /// [`DrawSurface::draw_shape`].
    Shape {
        /// Cell frame.
        frame: Rect,
        /// Shape level.
        level: ShapeLevel,
        /// Stroke color.
        color: Rgba8,
    },
}

/// Surface that only records calls, for inspection and tests.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    calls: Vec<DrawCall>,
}

impl RecordingSurface {
    /// Empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Calls in submission order.
    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Shape calls drawn in `color`.
    pub fn shapes_in(&self, color: Rgba8) -> impl Iterator<Item = (Rect, ShapeLevel)> + '_ {
        self.calls.iter().filter_map(move |c| match *c {
            DrawCall::Shape {
                frame,
                level,
                color: c,
            } if c == color => Some((frame, level)),
            _ => None,
        })
    }

    /// Forget everything recorded so far.
    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl DrawSurface for RecordingSurface {
    fn fill_background(&mut self, color: Rgba8) {
        self.calls.push(DrawCall::Background(color));
    }

    fn draw_shape(&mut self, frame: Rect, level: ShapeLevel, color: Rgba8) {
        self.calls.push(DrawCall::Shape {
            frame,
            level,
            color,
        });
    }
}
