use std::str::FromStr;

use crate::foundation::core::CellCoord;
use crate::foundation::error::{GridClockError, GridClockResult};
use crate::glyph::font::{GlyphFont, GlyphId};
use crate::layout::grid::GridGeometry;

/// Number of glyph slots: two hour digits, the colon, two minute digits.
pub const SLOT_COUNT: usize = 5;
/// Slot index of the colon.
pub const COLON_SLOT: usize = 2;

/// Hour format the display value was produced with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HourFormat {
    /// 00-23 hours.
    #[default]
    TwentyFourHour,
    /// 1-12 hours, leading zero suppressed.
    TwelveHour,
}

/// What the face shows: up to five glyph slots, each possibly blank.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct DisplayValue {
    slots: [Option<GlyphId>; SLOT_COUNT],
    format: HourFormat,
}

impl DisplayValue {
    /// Build from raw slots.
    pub fn new(slots: [Option<GlyphId>; SLOT_COUNT]) -> Self {
        Self {
            slots,
            format: HourFormat::default(),
        }
    }

    /// Four digits around a colon; `None` digits are blank slots.
    pub fn from_digits(digits: [Option<u8>; 4]) -> GridClockResult<Self> {
        let mut slots = [None; SLOT_COUNT];
        for (i, d) in digits.into_iter().enumerate() {
            let slot = if i < 2 { i } else { i + 1 };
            slots[slot] = match d {
                Some(v) => Some(GlyphId::digit(v).ok_or_else(|| {
                    GridClockError::validation(format!("digit {v} is out of range"))
                })?),
                None => None,
            };
        }
        slots[COLON_SLOT] = Some(GlyphId::COLON);
        Ok(Self::new(slots))
    }

    /// Tag the value with the hour format it was produced in.
    pub fn with_format(mut self, format: HourFormat) -> Self {
        self.format = format;
        self
    }

    /// Glyph in `slot`, or `None` for a blank or out-of-range slot.
    pub fn slot(&self, slot: usize) -> Option<GlyphId> {
        self.slots.get(slot).copied().flatten()
    }

    /// All slots in order.
    pub fn slots(&self) -> &[Option<GlyphId>; SLOT_COUNT] {
        &self.slots
    }

    /// Hour format tag.
    pub fn format(&self) -> HourFormat {
        self.format
    }
}

/// Parses `"HH:MM"`; a space in a digit position is a blank slot
/// (`" 9:05"`), and a space in place of the colon hides it.
impl FromStr for DisplayValue {
    type Err = GridClockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s.chars().collect();
        if chars.len() != SLOT_COUNT {
            return Err(GridClockError::validation(format!(
                "display value '{s}' must look like HH:MM"
            )));
        }
        let mut slots = [None; SLOT_COUNT];
        for (i, c) in chars.into_iter().enumerate() {
            slots[i] = match (i, c) {
                (_, ' ') => None,
                (COLON_SLOT, ':') => Some(GlyphId::COLON),
                (COLON_SLOT, other) => {
                    return Err(GridClockError::validation(format!(
                        "expected ':' at position 2, got '{other}'"
                    )));
                }
                (_, d) => {
                    let v = d.to_digit(10).ok_or_else(|| {
                        GridClockError::validation(format!("'{d}' is not a digit"))
                    })?;
                    GlyphId::digit(v as u8)
                }
            };
        }
        Ok(Self::new(slots))
    }
}

/// A lit glyph pixel placed on the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlacedPixel {
    /// Slot index.
    pub slot: usize,
    /// Row inside the glyph.
    pub row: usize,
    /// Column inside the glyph.
    pub col: usize,
    /// Absolute grid cell.
    pub cell: CellCoord,
    /// Pinned pixel flag.
    pub pinned: bool,
}

/// Maps glyph slots onto grid columns for one font and digit origin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SlotLayout {
    origin: CellCoord,
    slot_cols: [i32; SLOT_COUNT],
}

impl SlotLayout {
    /// Lay out the five slots left to right starting at `origin`.
    pub fn new(origin: CellCoord, font: &GlyphFont) -> Self {
        let mut slot_cols = [0; SLOT_COUNT];
        let mut col = origin.col;
        for (slot, out) in slot_cols.iter_mut().enumerate() {
            *out = col;
            let width = if slot == COLON_SLOT {
                font.colon_width()
            } else {
                font.digit_width()
            };
            col += (width + font.gap()) as i32;
        }
        Self { origin, slot_cols }
    }

    /// Grid cell of the top-left pixel of `slot`.
    pub fn slot_origin(&self, slot: usize) -> Option<CellCoord> {
        self.slot_cols
            .get(slot)
            .map(|&col| CellCoord::new(col, self.origin.row))
    }

    /// Every lit pixel of the displayed glyphs with its grid cell.
    pub fn placed_pixels(&self, display: &DisplayValue, font: &GlyphFont) -> Vec<PlacedPixel> {
        let mut out = Vec::new();
        for (slot, id) in display.slots().iter().enumerate() {
            let Some(id) = id else {
                continue;
            };
            let base = CellCoord::new(self.slot_cols[slot], self.origin.row);
            for (row, col, pinned) in font.glyph(*id).lit_pixels() {
                out.push(PlacedPixel {
                    slot,
                    row,
                    col,
                    cell: CellCoord::new(base.col + col as i32, base.row + row as i32),
                    pinned,
                });
            }
        }
        out
    }

    /// Row-major mask of grid cells covered by a lit glyph pixel.
    pub fn digit_mask(
        &self,
        display: &DisplayValue,
        font: &GlyphFont,
        geometry: &GridGeometry,
    ) -> Vec<bool> {
        let mut mask = vec![false; geometry.cell_count()];
        for px in self.placed_pixels(display, font) {
            if let Some(idx) = geometry.index(px.cell.col, px.cell.row) {
                mask[idx] = true;
            }
        }
        mask
    }
}

#[cfg(test)]
#[path = "../../tests/unit/glyph/display.rs"]
mod tests;
