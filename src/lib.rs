//! gridclock renders a time display as a grid of small animated cells.
//!
//! Most cells are decorative background; a subset forms the pixels of the
//! glyphs (four digits and a colon). Every time the value changes, the grid
//! replays a staggered reveal: cells wake up in a randomized order, grow
//! through three shapes, and glyph pixels latch at their largest shape until
//! the next change.
//!
//! # Pipeline overview
//!
//! 1. **Layout**: [`GridGeometry`] and [`GlyphFont`] fix the grid and where the
//!    glyph slots sit ([`SlotLayout`]).
//! 2. **Background**: [`BackgroundEngine`] steps per-cell timers and answers
//!    [`ProgressSource::cell_progress`] queries.
//! 3. **Reveal**: [`GlyphRevealEngine`] polls that progress for glyph pixels and
//!    keeps one [`PixelReveal`] per pixel.
//! 4. **Render**: [`ClockFace::render`] draws both layers through a
//!    [`DrawSurface`]; [`CpuSurface`] rasterizes to RGBA8.
//!
//! [`FrameDriver`] ties a [`ClockFace`] to a [`FrameTimer`] and keeps at most
//! one frame callback pending.
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: every pass draws from an owned, seedable [`Rng64`].
//! - **Single-threaded**: all mutation happens in `tick`/reset calls made by
//!   the host; reads between ticks see a stable frame.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod config;
mod engine;
mod foundation;
mod glyph;
mod layout;
mod render;
mod session;

pub use animation::ease::Ease;
pub use animation::stage::{
    COMPACT_SHAPE_BELOW, ColorStage, FULL_SHAPE_BELOW, HighEndCutoff, ShapeLevel,
    VANISH_CORE_BELOW, color_stage, shape_level_for_progress,
};
pub use config::{ClockConfig, ResolvedTiming, TimingConfig};
pub use engine::background::{BackgroundCell, BackgroundEngine, PassPhase, ProgressSource};
pub use engine::reveal::{GlyphRevealEngine, Latch, PixelReveal, RevealPixel, SlotStatus};
pub use foundation::core::{CellCoord, Rect, Rgba8};
pub use foundation::error::{GridClockError, GridClockResult};
pub use foundation::math::Rng64;
pub use glyph::display::{COLON_SLOT, DisplayValue, HourFormat, PlacedPixel, SLOT_COUNT, SlotLayout};
pub use glyph::font::{GlyphBitmap, GlyphFont, GlyphId, GlyphPixel, glyph_pixel};
pub use layout::grid::{
    DigitRegion, GridGeometry, MAX_CELL_SIZE, MAX_GRID_COLS, MAX_GRID_ROWS, MIN_CELL_SIZE,
};
pub use render::cpu::{CpuSurface, FrameRgba};
pub use render::palette::{Palette, Theme};
pub use render::shape::shape_rects;
pub use render::surface::{DrawCall, DrawSurface, RecordingSurface};
pub use session::driver::{FrameDriver, TimerOutcome};
pub use session::face::ClockFace;
pub use session::timer::{FrameTimer, ManualTimer, TimerHandle};
