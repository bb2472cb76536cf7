use crate::foundation::error::{GridClockError, GridClockResult};

/// Identifier of a glyph in a [`GlyphFont`]: digits `0..=9` and the colon.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct GlyphId(u8);

impl GlyphId {
    /// The colon separator.
    pub const COLON: Self = Self(10);

    /// Glyph for a decimal digit, or `None` above 9.
    pub fn digit(value: u8) -> Option<Self> {
        (value <= 9).then_some(Self(value))
    }

    /// Table index inside a font.
    pub fn index(self) -> usize {
        usize::from(self.0)
    }

    /// `true` for the colon glyph.
    pub fn is_colon(self) -> bool {
        self == Self::COLON
    }
}

/// Bit-mask bitmap of one glyph.
///
/// Bit `width - 1 - col` of `rows[row]` is the pixel at `(row, col)`; `pins`
/// uses the same layout and marks pixels that appear instantly.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GlyphBitmap {
    /// Width in cells (1..=8).
    pub width: u8,
    /// One mask per row.
    pub rows: Vec<u8>,
    /// Pinned pixels, one mask per row.
    #[serde(default)]
    pub pins: Vec<u8>,
}

/// Lookup result for one glyph pixel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GlyphPixel {
    /// Pixel is part of the glyph.
    pub lit: bool,
    /// Pixel is drawn as soon as its cell shows progress.
    pub pinned: bool,
}

/// Query one pixel of `glyph`. Out-of-range positions are unlit.
pub fn glyph_pixel(glyph: &GlyphBitmap, row: usize, col: usize) -> GlyphPixel {
    if col >= usize::from(glyph.width) || col >= 8 {
        return GlyphPixel::default();
    }
    let bit = 1u8 << (usize::from(glyph.width) - 1 - col);
    let lit = glyph.rows.get(row).is_some_and(|m| m & bit != 0);
    let pinned = lit && glyph.pins.get(row).is_some_and(|m| m & bit != 0);
    GlyphPixel { lit, pinned }
}

impl GlyphBitmap {
    /// Height in cells.
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Iterate lit pixels as `(row, col, pinned)`.
    pub fn lit_pixels(&self) -> impl Iterator<Item = (usize, usize, bool)> + '_ {
        (0..self.height()).flat_map(move |row| {
            (0..usize::from(self.width)).filter_map(move |col| {
                let px = glyph_pixel(self, row, col);
                px.lit.then_some((row, col, px.pinned))
            })
        })
    }
}

/// Complete glyph set: ten digits plus the colon, sharing one height.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GlyphFont {
    digit_width: u8,
    colon_width: u8,
    height: u8,
    gap: u8,
    glyphs: Vec<GlyphBitmap>,
}

const GLYPH_COUNT: usize = 11;

impl GlyphFont {
    /// Build and validate a font from its eleven glyphs (digits 0-9, colon).
    pub fn new(gap: u8, glyphs: Vec<GlyphBitmap>) -> GridClockResult<Self> {
        if glyphs.len() != GLYPH_COUNT {
            return Err(GridClockError::validation(format!(
                "font needs {GLYPH_COUNT} glyphs, got {}",
                glyphs.len()
            )));
        }
        let digit_width = glyphs[0].width;
        let colon_width = glyphs[GlyphId::COLON.index()].width;
        let height = glyphs[0].rows.len();
        let font = Self {
            digit_width,
            colon_width,
            height: u8::try_from(height)
                .map_err(|_| GridClockError::validation("glyph height exceeds 255"))?,
            gap,
            glyphs,
        };
        font.validate()?;
        Ok(font)
    }

    /// Parse a font from JSON and validate it.
    pub fn from_json_str(json: &str) -> GridClockResult<Self> {
        let font: Self = serde_json::from_str(json)?;
        font.validate()?;
        Ok(font)
    }

    /// Check glyph count, widths, heights and pin masks.
    pub fn validate(&self) -> GridClockResult<()> {
        if self.glyphs.len() != GLYPH_COUNT {
            return Err(GridClockError::validation(format!(
                "font needs {GLYPH_COUNT} glyphs, got {}",
                self.glyphs.len()
            )));
        }
        if self.height == 0 {
            return Err(GridClockError::validation("glyph height must be > 0"));
        }
        for (i, g) in self.glyphs.iter().enumerate() {
            let expected = if i == GlyphId::COLON.index() {
                self.colon_width
            } else {
                self.digit_width
            };
            if g.width == 0 || g.width > 8 || g.width != expected {
                return Err(GridClockError::validation(format!(
                    "glyph {i} has width {}, expected {expected} (1..=8)",
                    g.width
                )));
            }
            if g.rows.len() != usize::from(self.height) {
                return Err(GridClockError::validation(format!(
                    "glyph {i} has {} rows, expected {}",
                    g.rows.len(),
                    self.height
                )));
            }
            if !g.pins.is_empty() && g.pins.len() != g.rows.len() {
                return Err(GridClockError::validation(format!(
                    "glyph {i} pin mask has {} rows, expected {}",
                    g.pins.len(),
                    g.rows.len()
                )));
            }
        }
        Ok(())
    }

    /// Bitmap for `id`.
    pub fn glyph(&self, id: GlyphId) -> &GlyphBitmap {
        &self.glyphs[id.index()]
    }

    /// Width of a digit glyph in cells.
    pub fn digit_width(&self) -> u32 {
        u32::from(self.digit_width)
    }

    /// Width of the colon glyph in cells.
    pub fn colon_width(&self) -> u32 {
        u32::from(self.colon_width)
    }

    /// Shared glyph height in cells.
    pub fn height(&self) -> u32 {
        u32::from(self.height)
    }

    /// Empty columns between adjacent slots.
    pub fn gap(&self) -> u32 {
        u32::from(self.gap)
    }

    /// Columns covered by four digits, the colon and the four gaps.
    pub fn span_cols(&self) -> u32 {
        self.digit_width() * 4 + self.colon_width() + self.gap() * 4
    }

    /// Built-in 4x9 digit face with a 2-wide colon.
    pub fn builtin() -> Self {
        let g = |width: u8, rows: [u8; 9], pins: [u8; 9]| GlyphBitmap {
            width,
            rows: rows.to_vec(),
            pins: pins.to_vec(),
        };
        const NO_PINS: [u8; 9] = [0; 9];
        let glyphs = vec![
            g(4, [6, 9, 9, 9, 9, 9, 9, 9, 6], NO_PINS),
            g(4, [2, 6, 10, 2, 2, 2, 2, 2, 7], [0, 0, 8, 0, 0, 0, 0, 0, 0]),
            g(4, [6, 9, 1, 1, 2, 4, 8, 8, 15], [0, 0, 0, 0, 2, 4, 0, 0, 0]),
            g(4, [14, 1, 1, 1, 6, 1, 1, 1, 14], NO_PINS),
            g(4, [9, 9, 9, 9, 15, 1, 1, 1, 1], NO_PINS),
            g(4, [15, 8, 8, 14, 1, 1, 1, 9, 6], NO_PINS),
            g(4, [6, 8, 8, 14, 9, 9, 9, 9, 6], NO_PINS),
            g(4, [15, 1, 1, 2, 2, 4, 4, 4, 4], [0, 0, 0, 2, 2, 0, 0, 0, 0]),
            g(4, [6, 9, 9, 9, 6, 9, 9, 9, 6], NO_PINS),
            g(4, [6, 9, 9, 9, 7, 1, 1, 1, 6], NO_PINS),
            g(2, [0, 0, 3, 3, 0, 3, 3, 0, 0], NO_PINS),
        ];
        Self {
            digit_width: 4,
            colon_width: 2,
            height: 9,
            gap: 1,
            glyphs,
        }
    }
}

impl Default for GlyphFont {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/glyph/font.rs"]
mod tests;
