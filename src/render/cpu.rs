use crate::animation::stage::ShapeLevel;
use crate::foundation::core::{Rect, Rgba8};
use crate::foundation::error::{GridClockError, GridClockResult};
use crate::render::shape::shape_rects;
use crate::render::surface::DrawSurface;

/// Rendered frame in RGBA8.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRgba {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Row-major RGBA bytes.
    pub data: Vec<u8>,
    /// `true` when color channels are premultiplied by alpha.
    pub premultiplied: bool,
}

/// CPU raster surface backed by `vello_cpu`.
///
/// One surface draws one frame: record draw calls, then call
/// [`CpuSurface::into_frame`].
pub struct CpuSurface {
    width: u16,
    height: u16,
    ctx: vello_cpu::RenderContext,
}

impl CpuSurface {
    /// Allocate a `width x height` surface.
    pub fn new(width: u32, height: u32) -> GridClockResult<Self> {
        if width == 0 || height == 0 {
            return Err(GridClockError::render("surface size must be non-zero"));
        }
        let width: u16 = width
            .try_into()
            .map_err(|_| GridClockError::render("surface width exceeds u16"))?;
        let height: u16 = height
            .try_into()
            .map_err(|_| GridClockError::render("surface height exceeds u16"))?;
        Ok(Self {
            width,
            height,
            ctx: vello_cpu::RenderContext::new(width, height),
        })
    }

    /// Surface size in pixels.
    pub fn size(&self) -> (u32, u32) {
        (u32::from(self.width), u32::from(self.height))
    }

    fn fill(&mut self, rect: Rect, color: Rgba8) {
        self.ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
            color.r, color.g, color.b, color.a,
        ));
        self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            rect.x0, rect.y0, rect.x1, rect.y1,
        ));
    }

    /// Rasterize everything drawn so far.
    pub fn into_frame(mut self) -> FrameRgba {
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut pixmap);
        FrameRgba {
            width: u32::from(self.width),
            height: u32::from(self.height),
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        }
    }
}

impl DrawSurface for CpuSurface {
    fn fill_background(&mut self, color: Rgba8) {
        let (w, h) = self.size();
        self.fill(Rect::new(0.0, 0.0, f64::from(w), f64::from(h)), color);
    }

    fn draw_shape(&mut self, frame: Rect, level: ShapeLevel, color: Rgba8) {
        for rect in shape_rects(frame, level) {
            self.fill(rect, color);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
