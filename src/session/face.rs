use crate::animation::stage::{ShapeLevel, color_stage, shape_level_for_progress};
use crate::config::{ClockConfig, ResolvedTiming};
use crate::engine::background::{BackgroundEngine, PassPhase, ProgressSource};
use crate::engine::reveal::GlyphRevealEngine;
use crate::foundation::error::GridClockResult;
use crate::foundation::math::Rng64;
use crate::glyph::display::{DisplayValue, SlotLayout};
use crate::glyph::font::GlyphFont;
use crate::layout::grid::GridGeometry;
use crate::render::cpu::{CpuSurface, FrameRgba};
use crate::render::palette::Palette;
use crate::render::surface::DrawSurface;

/// One drawable clock: the background engine, the glyph overlay, the value on
/// show and the generator that draws each pass's choreography.
///
/// Ticking order within a frame is fixed: the background steps first, then the
/// glyph overlay reads the freshly stepped progress.
#[derive(Clone, Debug)]
pub struct ClockFace {
    geometry: GridGeometry,
    background: BackgroundEngine,
    reveal: GlyphRevealEngine,
    palette: Palette,
    display: DisplayValue,
    rng: Rng64,
}

impl ClockFace {
    /// Build a face for `geometry` drawing glyphs from `font`.
    ///
    /// Fails when the digit region does not fit the grid or the cell block
    /// cannot be allocated. No pass runs until [`ClockFace::reset_and_start`].
    pub fn new(
        geometry: GridGeometry,
        font: GlyphFont,
        config: &ClockConfig,
        rng: Rng64,
    ) -> GridClockResult<Self> {
        font.validate()?;
        let region = geometry.digit_region(&font)?;
        let timing = config.timing.resolve(geometry.cell_count());
        let background = BackgroundEngine::new(geometry, region, timing)?;
        let layout = SlotLayout::new(geometry.digit_origin(), &font);
        let reveal = GlyphRevealEngine::new(font, layout, &timing);
        tracing::debug!(
            cols = geometry.cols(),
            rows = geometry.rows(),
            scale = timing.scale,
            "clock face created"
        );
        Ok(Self {
            geometry,
            background,
            reveal,
            palette: Palette::for_theme(config.theme),
            display: DisplayValue::default(),
            rng,
        })
    }

    /// Begin a fresh reveal pass for the current display value.
    #[tracing::instrument(level = "debug", skip(self), fields(display = ?self.display.slots()))]
    pub fn reset_and_start(&mut self) {
        let mask =
            self.reveal
                .layout()
                .digit_mask(&self.display, self.reveal.font(), &self.geometry);
        self.background.reset(&mask, &mut self.rng);
        self.reveal.reset(&self.display);
        if !self.background.animation_enabled() {
            self.background.finish_instantly();
            self.reveal.finish_instantly();
        }
    }

    /// Advance one frame. Returns `true` once both the background and the
    /// glyph reveal are complete.
    pub fn tick(&mut self) -> bool {
        let background_done = self.background.step();
        let glyphs_done = self.reveal.step(&self.background);
        background_done && glyphs_done
    }

    /// Toggle animation. Disabling jumps straight to the fully revealed
    /// frame; enabling starts a new pass.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.background.set_enabled(enabled);
        if enabled {
            self.reset_and_start();
        } else {
            self.reveal.finish_instantly();
        }
    }

    /// Show `value`. Restarts the pass and returns `true` only when the value
    /// (digits, blanks or hour format) differs from the one on show.
    pub fn set_display(&mut self, value: DisplayValue) -> bool {
        if value == self.display {
            return false;
        }
        self.display = value;
        self.reset_and_start();
        true
    }

    /// Replay the reveal for the value already on show.
    pub fn replay(&mut self) {
        self.reset_and_start();
    }

    /// Eased background progress of cell `(col, row)`.
    pub fn cell_progress(&self, col: i32, row: i32) -> Option<f32> {
        self.background.cell_progress(col, row)
    }

    /// Draw the current frame: fill, resting grid dots, animated background
    /// cells, then the glyph overlay.
    pub fn render<S: DrawSurface + ?Sized>(&self, surface: &mut S) {
        let palette = &self.palette;
        let high_end = self.background.timing().high_end;
        surface.fill_background(palette.background_fill);

        let cells = self.background.cells();
        for idx in 0..cells.len() {
            let at = self.geometry.coord(idx);
            surface.draw_shape(
                self.geometry.cell_frame(at.col, at.row),
                ShapeLevel::Core,
                palette.grid_stroke,
            );
        }
        for (idx, cell) in cells.iter().enumerate() {
            let at = self.geometry.coord(idx);
            let Some(progress) = self.background.cell_progress(at.col, at.row) else {
                continue;
            };
            let Some(level) = shape_level_for_progress(progress, high_end) else {
                continue;
            };
            let stage = color_stage(progress, cell.is_digit());
            let color = palette.stage_color(stage, cell.is_digit());
            surface.draw_shape(self.geometry.cell_frame(at.col, at.row), level, color);
        }

        for px in self.reveal.all_pixels() {
            if let Some(level) = px.state().level() {
                let cell = px.cell();
                surface.draw_shape(
                    self.geometry.cell_frame(cell.col, cell.row),
                    level,
                    palette.digit_stroke,
                );
            }
        }
    }

    /// Render the current frame on a fresh CPU surface sized to the grid.
    pub fn render_frame(&self) -> GridClockResult<FrameRgba> {
        let (width, height) = self.geometry.pixel_size();
        let mut surface = CpuSurface::new(width, height)?;
        self.render(&mut surface);
        Ok(surface.into_frame())
    }

    /// Pass phase of the background engine.
    pub fn phase(&self) -> PassPhase {
        self.background.phase()
    }

    /// Animation master switch.
    pub fn is_enabled(&self) -> bool {
        self.background.animation_enabled()
    }

    /// Value on show.
    pub fn display(&self) -> &DisplayValue {
        &self.display
    }

    /// Resolved timing for this grid.
    pub fn timing(&self) -> &ResolvedTiming {
        self.background.timing()
    }

    /// Grid layout.
    pub fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }

    /// Background engine, read-only.
    pub fn background(&self) -> &BackgroundEngine {
        &self.background
    }

    /// Glyph overlay, read-only.
    pub fn reveal(&self) -> &GlyphRevealEngine {
        &self.reveal
    }

    /// Colors used by [`ClockFace::render`].
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Replace the palette.
    pub fn set_palette(&mut self, palette: Palette) {
        self.palette = palette;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/face.rs"]
mod tests;
