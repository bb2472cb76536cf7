use crate::foundation::core::{CellCoord, Rect};
use crate::foundation::error::{GridClockError, GridClockResult};
use crate::glyph::font::GlyphFont;

/// Hard column capacity of a grid.
pub const MAX_GRID_COLS: u32 = 35;
/// Hard row capacity of a grid.
pub const MAX_GRID_ROWS: u32 = 40;
/// Smallest cell edge, in device pixels, that can still show three shape sizes.
pub const MIN_CELL_SIZE: u32 = 5;
/// Largest cell edge, in device pixels. A full-capacity grid stays inside a
/// `u16` raster surface.
pub const MAX_CELL_SIZE: u32 = 256;

/// Layout snapshot of the dot grid, fixed for a display session.
///
/// Deserialization goes through [`GridGeometry::new`], so a loaded geometry is
/// held to the same bounds as a constructed one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "RawGridGeometry")]
pub struct GridGeometry {
    cols: u32,
    rows: u32,
    digit_origin: CellCoord,
    cell_size: u32,
    offset_x: i32,
    offset_y: i32,
}

#[derive(serde::Deserialize)]
struct RawGridGeometry {
    cols: u32,
    rows: u32,
    digit_origin: CellCoord,
    cell_size: u32,
    #[serde(default)]
    offset_x: i32,
    #[serde(default)]
    offset_y: i32,
}

impl TryFrom<RawGridGeometry> for GridGeometry {
    type Error = GridClockError;

    fn try_from(raw: RawGridGeometry) -> GridClockResult<Self> {
        Ok(Self::new(raw.cols, raw.rows, raw.digit_origin, raw.cell_size)?
            .with_offset(raw.offset_x, raw.offset_y))
    }
}

fn check_cell_size(cell_size: u32) -> GridClockResult<()> {
    if cell_size < MIN_CELL_SIZE {
        return Err(GridClockError::layout(format!(
            "cell size {cell_size} is below the minimum of {MIN_CELL_SIZE}"
        )));
    }
    if cell_size > MAX_CELL_SIZE {
        return Err(GridClockError::layout(format!(
            "cell size {cell_size} is above the maximum of {MAX_CELL_SIZE}"
        )));
    }
    Ok(())
}

/// The cell rectangle reserved for the glyph slots.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DigitRegion {
    /// Top-left cell of the first slot.
    pub origin: CellCoord,
    /// Columns spanned by all slots including gaps.
    pub span_cols: u32,
    /// Glyph height in cells.
    pub height: u32,
}

impl DigitRegion {
    /// Geometric center as fractional `(col, row)`.
    pub fn center(&self) -> (f32, f32) {
        (
            self.origin.col as f32 + (self.span_cols as f32 - 1.0) / 2.0,
            self.origin.row as f32 + (self.height as f32 - 1.0) / 2.0,
        )
    }
}

impl GridGeometry {
    /// Create a validated grid of `cols x rows` cells of `cell_size` pixels.
    pub fn new(
        cols: u32,
        rows: u32,
        digit_origin: CellCoord,
        cell_size: u32,
    ) -> GridClockResult<Self> {
        if cols == 0 || rows == 0 {
            return Err(GridClockError::layout("grid must have at least one cell"));
        }
        if cols > MAX_GRID_COLS || rows > MAX_GRID_ROWS {
            return Err(GridClockError::layout(format!(
                "grid {cols}x{rows} exceeds capacity {MAX_GRID_COLS}x{MAX_GRID_ROWS}"
            )));
        }
        check_cell_size(cell_size)?;
        if digit_origin.col < 0 || digit_origin.row < 0 {
            return Err(GridClockError::layout("digit origin must be non-negative"));
        }
        Ok(Self {
            cols,
            rows,
            digit_origin,
            cell_size,
            offset_x: 0,
            offset_y: 0,
        })
    }

    /// Fit the largest grid of `cell_size` cells into `width x height` pixels,
    /// centering both the grid and the digit region.
    pub fn fit(width: u32, height: u32, cell_size: u32, font: &GlyphFont) -> GridClockResult<Self> {
        check_cell_size(cell_size)?;
        let min_cols = font.span_cols();
        let min_rows = font.height();
        let cols = (width / cell_size).clamp(min_cols, MAX_GRID_COLS.max(min_cols));
        let rows = (height / cell_size).clamp(min_rows, MAX_GRID_ROWS.max(min_rows));

        let digit_origin = CellCoord::new(
            ((cols - min_cols) / 2) as i32,
            ((rows - min_rows) / 2) as i32,
        );
        let mut geometry = Self::new(cols, rows, digit_origin, cell_size)?;
        geometry.offset_x = ((i64::from(width) - i64::from(cols * cell_size)) / 2).max(0) as i32;
        geometry.offset_y = ((i64::from(height) - i64::from(rows * cell_size)) / 2).max(0) as i32;
        Ok(geometry)
    }

    /// Shift the whole grid by a pixel offset.
    pub fn with_offset(mut self, offset_x: i32, offset_y: i32) -> Self {
        self.offset_x = offset_x;
        self.offset_y = offset_y;
        self
    }

    /// Number of columns.
    pub fn cols(&self) -> u32 {
        self.cols
    }

    /// Number of rows.
    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Total cell count.
    pub fn cell_count(&self) -> usize {
        (self.cols * self.rows) as usize
    }

    /// Top-left cell of the digit region.
    pub fn digit_origin(&self) -> CellCoord {
        self.digit_origin
    }

    /// Cell edge in device pixels.
    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }

    /// Pixel size of the area the grid needs, offsets included.
    ///
    /// Saturates at `u32::MAX`; such sizes are rejected by the raster surface.
    pub fn pixel_size(&self) -> (u32, u32) {
        let extent = |offset: i32, cells: u32| {
            let px = 2 * u64::from(offset.max(0).unsigned_abs())
                + u64::from(cells) * u64::from(self.cell_size);
            u32::try_from(px).unwrap_or(u32::MAX)
        };
        (
            extent(self.offset_x, self.cols),
            extent(self.offset_y, self.rows),
        )
    }

    /// `true` when `(col, row)` is inside `[0, cols) x [0, rows)`.
    pub fn contains(&self, col: i32, row: i32) -> bool {
        col >= 0 && row >= 0 && (col as u32) < self.cols && (row as u32) < self.rows
    }

    /// Row-major index of `(col, row)`, or `None` when out of range.
    pub fn index(&self, col: i32, row: i32) -> Option<usize> {
        self.contains(col, row)
            .then(|| (row as usize) * (self.cols as usize) + (col as usize))
    }

    /// Inverse of [`GridGeometry::index`].
    pub fn coord(&self, index: usize) -> CellCoord {
        let cols = self.cols as usize;
        CellCoord::new((index % cols) as i32, (index / cols) as i32)
    }

    /// Device-pixel frame of a cell.
    pub fn cell_frame(&self, col: i32, row: i32) -> Rect {
        let size = f64::from(self.cell_size);
        let x = f64::from(self.offset_x) + f64::from(col) * size;
        let y = f64::from(self.offset_y) + f64::from(row) * size;
        Rect::new(x, y, x + size, y + size)
    }

    /// Digit region for `font`, validated against the grid bounds.
    pub fn digit_region(&self, font: &GlyphFont) -> GridClockResult<DigitRegion> {
        let region = DigitRegion {
            origin: self.digit_origin,
            span_cols: font.span_cols(),
            height: font.height(),
        };
        let end_col = i64::from(region.origin.col) + i64::from(region.span_cols);
        let end_row = i64::from(region.origin.row) + i64::from(region.height);
        if end_col > i64::from(self.cols) || end_row > i64::from(self.rows) {
            return Err(GridClockError::layout(format!(
                "digit region {}x{} at ({}, {}) does not fit a {}x{} grid",
                region.span_cols,
                region.height,
                region.origin.col,
                region.origin.row,
                self.cols,
                self.rows
            )));
        }
        Ok(region)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/grid.rs"]
mod tests;
