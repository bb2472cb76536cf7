//! Pixel geometry of the three cell shapes.
//!
//! Shapes are unions of axis-aligned blocks inside the cell frame, so they
//! stay crisp at any integer cell size.

use crate::animation::stage::ShapeLevel;
use crate::foundation::core::Rect;

const OUTER: i32 = 1;

fn block(frame: Rect, rows: (i32, i32), cols: (i32, i32)) -> Option<Rect> {
    let ((r0, r1), (c0, c1)) = (rows, cols);
    (r0 <= r1 && c0 <= c1).then(|| {
        Rect::new(
            frame.x0 + f64::from(c0),
            frame.y0 + f64::from(r0),
            frame.x0 + f64::from(c1 + 1),
            frame.y0 + f64::from(r1 + 1),
        )
    })
}

/// Blocks that make up `level` inside a square cell `frame`.
///
/// * `Full` is the cell inset by one pixel.
/// * `Compact` is `Full` with its four corner pixels knocked out.
/// * `Core` is a centered 4x4 dot (2x2 below 8 px, 1x1 below 6 px).
pub fn shape_rects(frame: Rect, level: ShapeLevel) -> Vec<Rect> {
    let size = frame.width().min(frame.height()).floor() as i32;
    let last = size - OUTER - 1;
    let blocks = match level {
        ShapeLevel::Full => vec![block(frame, (OUTER, last), (OUTER, last))],
        ShapeLevel::Compact => vec![
            block(frame, (OUTER + 1, last - 1), (OUTER, last)),
            block(frame, (OUTER, OUTER), (OUTER + 1, last - 1)),
            block(frame, (last, last), (OUTER + 1, last - 1)),
        ],
        ShapeLevel::Core => {
            let core = match size {
                8.. => 4,
                6..=7 => 2,
                _ => 1,
            };
            let start = (size - core) / 2;
            vec![block(
                frame,
                (start, start + core - 1),
                (start, start + core - 1),
            )]
        }
    };
    blocks.into_iter().flatten().collect()
}

#[cfg(test)]
#[path = "../../tests/unit/render/shape.rs"]
mod tests;
