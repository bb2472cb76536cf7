//! Glyph overlay reveal.
//!
//! Every lit glyph pixel owns a [`PixelReveal`]. Unpinned pixels latch the
//! highest shape level seen during a pass; pinned pixels mirror whether their
//! background cell currently shows anything. The engine only reads progress
//! through [`ProgressSource`].

use crate::animation::stage::ShapeLevel;
use crate::config::ResolvedTiming;
use crate::engine::background::ProgressSource;
use crate::foundation::core::CellCoord;
use crate::glyph::display::{DisplayValue, SLOT_COUNT, SlotLayout};
use crate::glyph::font::{GlyphFont, GlyphId};

/// One-way shape latch. Starts empty and can only move towards
/// [`ShapeLevel::Full`] until the pass is reset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Latch(Option<ShapeLevel>);

impl Latch {
    /// Latched level, `None` before the pixel was first seen.
    pub fn level(self) -> Option<ShapeLevel> {
        self.0
    }

    fn raise(&mut self, target: ShapeLevel) {
        if self.0.is_none_or(|cur| target > cur) {
            self.0 = Some(target);
        }
    }

    fn saturate(&mut self) {
        self.0 = Some(ShapeLevel::Full);
    }
}

/// Reveal state of one lit glyph pixel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PixelReveal {
    /// Grows through core, compact and full, never shrinking within a pass.
    Latch(Latch),
    /// Appears as a core dot while its cell has progress.
    Pinned(bool),
}

impl PixelReveal {
    fn fresh(pinned: bool) -> Self {
        if pinned {
            Self::Pinned(false)
        } else {
            Self::Latch(Latch::default())
        }
    }

    /// Shape to draw, `None` when the pixel is not revealed.
    pub fn level(self) -> Option<ShapeLevel> {
        match self {
            Self::Latch(latch) => latch.level(),
            Self::Pinned(on) => on.then_some(ShapeLevel::Core),
        }
    }

    /// Pixel reached its terminal state.
    pub fn is_done(self) -> bool {
        match self {
            Self::Latch(latch) => latch.level() == Some(ShapeLevel::Full),
            Self::Pinned(on) => on,
        }
    }

    fn finish(&mut self) {
        match self {
            Self::Latch(latch) => latch.saturate(),
            Self::Pinned(on) => *on = true,
        }
    }
}

/// A lit glyph pixel bound to its grid cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RevealPixel {
    row: usize,
    col: usize,
    cell: CellCoord,
    state: PixelReveal,
}

impl RevealPixel {
    /// Row inside the glyph.
    pub fn row(&self) -> usize {
        self.row
    }

    /// Column inside the glyph.
    pub fn col(&self) -> usize {
        self.col
    }

    /// Grid cell the pixel is drawn in.
    pub fn cell(&self) -> CellCoord {
        self.cell
    }

    /// Current reveal state.
    pub fn state(&self) -> PixelReveal {
        self.state
    }
}

/// Per-slot reveal phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SlotStatus {
    /// No glyph assigned.
    Blank,
    /// At least one pixel has not reached its terminal state.
    Revealing,
    /// Every pixel is terminal.
    Done,
}

fn target_level(progress: f32, compact: f32, full: f32) -> ShapeLevel {
    if progress < compact {
        ShapeLevel::Core
    } else if progress < full {
        ShapeLevel::Compact
    } else {
        ShapeLevel::Full
    }
}

#[derive(Clone, Debug, Default)]
struct SlotReveal {
    glyph: Option<GlyphId>,
    pixels: Vec<RevealPixel>,
}

impl SlotReveal {
    fn is_done(&self) -> bool {
        self.pixels.iter().all(|px| px.state.is_done())
    }
}

/// Tracks reveal levels for the five glyph slots.
#[derive(Clone, Debug)]
pub struct GlyphRevealEngine {
    font: GlyphFont,
    layout: SlotLayout,
    compact_threshold: f32,
    full_threshold: f32,
    slots: [SlotReveal; SLOT_COUNT],
    complete: bool,
}

impl GlyphRevealEngine {
    /// Engine for `font` laid out by `layout`, using the glyph thresholds of
    /// `timing`. Starts with every slot blank.
    pub fn new(font: GlyphFont, layout: SlotLayout, timing: &ResolvedTiming) -> Self {
        Self {
            font,
            layout,
            compact_threshold: timing.digit_compact_threshold,
            full_threshold: timing.digit_full_threshold,
            slots: Default::default(),
            complete: false,
        }
    }

    /// Start a new pass for `display`: every pixel goes back to unrevealed.
    pub fn reset(&mut self, display: &DisplayValue) {
        for slot in &mut self.slots {
            slot.glyph = None;
            slot.pixels.clear();
        }
        for px in self.layout.placed_pixels(display, &self.font) {
            self.slots[px.slot].pixels.push(RevealPixel {
                row: px.row,
                col: px.col,
                cell: px.cell,
                state: PixelReveal::fresh(px.pinned),
            });
        }
        for (idx, slot) in self.slots.iter_mut().enumerate() {
            slot.glyph = display.slot(idx);
        }
        self.complete = false;
    }

    /// Shape a progress value maps to on the glyph overlay.
    pub fn target_level(&self, progress: f32) -> ShapeLevel {
        target_level(progress, self.compact_threshold, self.full_threshold)
    }

    /// Poll `source` for every lit pixel. Returns `true` once every displayed
    /// slot is done; from then on the reveal is frozen until the next reset.
    pub fn step(&mut self, source: &impl ProgressSource) -> bool {
        if self.complete {
            return true;
        }
        let (compact, full) = (self.compact_threshold, self.full_threshold);
        let mut all_done = true;
        for slot in &mut self.slots {
            if slot.glyph.is_none() {
                continue;
            }
            for px in &mut slot.pixels {
                let progress = source.cell_progress(px.cell.col, px.cell.row);
                match &mut px.state {
                    PixelReveal::Pinned(on) => *on = progress.is_some(),
                    PixelReveal::Latch(latch) => {
                        if let Some(p) = progress {
                            latch.raise(target_level(p, compact, full));
                        }
                    }
                }
            }
            all_done &= slot.is_done();
        }
        self.complete = all_done;
        if all_done {
            tracing::debug!("glyph reveal complete");
        }
        all_done
    }

    /// Jump every pixel to its terminal state.
    pub fn finish_instantly(&mut self) {
        for slot in &mut self.slots {
            for px in &mut slot.pixels {
                px.state.finish();
            }
        }
        self.complete = true;
    }

    /// Every displayed slot is done.
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Phase of `slot`; out-of-range slots read as blank.
    pub fn slot_status(&self, slot: usize) -> SlotStatus {
        match self.slots.get(slot) {
            Some(s) if s.glyph.is_some() => {
                if s.is_done() {
                    SlotStatus::Done
                } else {
                    SlotStatus::Revealing
                }
            }
            _ => SlotStatus::Blank,
        }
    }

    /// Lit pixels of `slot` with their reveal state.
    pub fn pixels(&self, slot: usize) -> &[RevealPixel] {
        self.slots.get(slot).map_or(&[], |s| s.pixels.as_slice())
    }

    /// Reveal state of glyph pixel `(row, col)` in `slot`, `None` when that
    /// pixel is not lit.
    pub fn pixel(&self, slot: usize, row: usize, col: usize) -> Option<PixelReveal> {
        self.pixels(slot)
            .iter()
            .find(|px| px.row == row && px.col == col)
            .map(|px| px.state)
    }

    /// All lit pixels across slots.
    pub fn all_pixels(&self) -> impl Iterator<Item = &RevealPixel> + '_ {
        self.slots.iter().flat_map(|s| s.pixels.iter())
    }

    /// Font the slots are drawn with.
    pub fn font(&self) -> &GlyphFont {
        &self.font
    }

    /// Slot placement.
    pub fn layout(&self) -> &SlotLayout {
        &self.layout
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/reveal.rs"]
mod tests;
