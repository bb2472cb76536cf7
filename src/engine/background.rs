//! Staggered background grid animation.
//!
//! A pass runs in three phases: an intro delay where nothing moves, an
//! activation sweep that widens the stagger window from `stagger_min` to
//! `stagger_max`, and per-cell growth. A cell only accumulates time once its
//! stagger delay falls inside the window, and it reports progress only after
//! its own delay has elapsed.

use crate::config::ResolvedTiming;
use crate::foundation::error::{GridClockError, GridClockResult};
use crate::foundation::math::Rng64;
use crate::layout::grid::{DigitRegion, GridGeometry};

/// Read-only per-cell progress query, the seam between the two engines.
pub trait ProgressSource {
    /// Eased progress of cell `(col, row)` in `[0, 1]`, or `None` when the
    /// cell shows nothing right now (including out-of-range coordinates).
    fn cell_progress(&self, col: i32, row: i32) -> Option<f32>;
}

/// Animation state of one grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BackgroundCell {
    active: bool,
    is_digit: bool,
    start_delay_ms: i32,
    elapsed_ms: i32,
    complete: bool,
}

impl BackgroundCell {
    const INACTIVE: Self = Self {
        active: false,
        is_digit: false,
        start_delay_ms: 0,
        elapsed_ms: 0,
        complete: true,
    };

    /// Cell takes part in the current pass.
    pub fn active(&self) -> bool {
        self.active
    }

    /// Cell sits under a lit glyph pixel.
    pub fn is_digit(&self) -> bool {
        self.is_digit
    }

    /// Random stagger drawn for this pass.
    pub fn start_delay_ms(&self) -> i32 {
        self.start_delay_ms
    }

    /// Time accumulated since the cell became eligible.
    pub fn elapsed_ms(&self) -> i32 {
        self.elapsed_ms
    }

    /// Cell finished its growth (always true for inactive cells).
    pub fn complete(&self) -> bool {
        self.complete
    }
}

/// Pass-level phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PassPhase {
    /// No pass has been started.
    Idle,
    /// Waiting out the intro delay.
    Intro,
    /// Activation sweep and cell growth in progress.
    Sweeping,
    /// Every active cell is complete.
    Complete,
}

/// Owns the grid of [`BackgroundCell`]s and advances them one frame at a time.
#[derive(Clone, Debug)]
pub struct BackgroundEngine {
    geometry: GridGeometry,
    region: DigitRegion,
    timing: ResolvedTiming,
    cells: Vec<BackgroundCell>,
    started: bool,
    intro_complete: bool,
    intro_elapsed_ms: i32,
    activation_window_ms: i32,
    activation_ratio: f32,
    animation_complete: bool,
    animation_enabled: bool,
}

impl BackgroundEngine {
    /// Allocate the cell block for `geometry`.
    ///
    /// Fails without leaving a usable engine when the cell block cannot be
    /// allocated.
    pub fn new(
        geometry: GridGeometry,
        region: DigitRegion,
        timing: ResolvedTiming,
    ) -> GridClockResult<Self> {
        let count = geometry.cell_count();
        let mut cells = Vec::new();
        cells.try_reserve_exact(count).map_err(|e| {
            GridClockError::Other(anyhow::anyhow!("allocate {count} background cells: {e}"))
        })?;
        cells.resize(count, BackgroundCell::INACTIVE);
        Ok(Self {
            geometry,
            region,
            timing,
            cells,
            started: false,
            intro_complete: false,
            intro_elapsed_ms: 0,
            activation_window_ms: timing.stagger_min_ms,
            activation_ratio: 0.0,
            animation_complete: false,
            animation_enabled: true,
        })
    }

    /// Digit-proximity bias in `[0, 1]`: 1 near the region center, fading to
    /// 0 one half-span (plus a cell) away; columns weigh 1.0, rows 0.8.
    pub fn proximity_bias(&self, col: i32, row: i32) -> f32 {
        let (col_center, row_center) = self.region.center();
        let col_half = self.region.span_cols as f32 / 2.0;
        let row_half = self.region.height as f32 / 2.0;

        let col_dist = (col as f32 - col_center).abs() / (col_half + 1.0);
        let row_dist = (row as f32 - row_center).abs() / (row_half + 1.0);

        let mut bias = 0.0;
        if col_dist < 1.0 {
            bias += 1.0 - col_dist;
        }
        if row_dist < 1.0 {
            bias += (1.0 - row_dist) * 0.8;
        }
        (bias / 1.8f32).clamp(0.0, 1.0)
    }

    /// Activation chance (percent) of a decorative cell.
    pub fn activation_percent(&self, col: i32, row: i32) -> u32 {
        let bonus = self.proximity_bias(col, row) * self.timing.proximity_bonus_percent as f32;
        (self.timing.active_percent + bonus as u32).min(100)
    }

    /// Start a fresh pass: choose active cells, draw new staggers, zero timers.
    ///
    /// `digit_mask` is row-major over the grid; missing entries count as
    /// non-digit cells.
    #[tracing::instrument(level = "debug", skip(self, digit_mask, rng))]
    pub fn reset(&mut self, digit_mask: &[bool], rng: &mut Rng64) {
        let (min, max) = (self.timing.stagger_min_ms, self.timing.stagger_max_ms);
        for idx in 0..self.cells.len() {
            let at = self.geometry.coord(idx);
            let is_digit = digit_mask.get(idx).copied().unwrap_or(false);
            let active = is_digit || rng.roll_percent(self.activation_percent(at.col, at.row));
            self.cells[idx] = if active {
                BackgroundCell {
                    active: true,
                    is_digit,
                    start_delay_ms: rng.range_i32(min, max),
                    elapsed_ms: 0,
                    complete: false,
                }
            } else {
                BackgroundCell {
                    is_digit,
                    ..BackgroundCell::INACTIVE
                }
            };
        }
        self.started = true;
        self.intro_complete = false;
        self.intro_elapsed_ms = 0;
        self.activation_window_ms = min;
        self.activation_ratio = 0.0;
        self.animation_complete = false;
        tracing::debug!(
            active = self.active_count(),
            cells = self.cells.len(),
            "background pass reset"
        );
    }

    /// Advance one frame. Returns `true` once the whole pass is complete.
    pub fn step(&mut self) -> bool {
        if !self.animation_enabled || !self.started {
            return true;
        }
        let frame = self.timing.frame_ms;

        if !self.intro_complete {
            self.intro_elapsed_ms = self.intro_elapsed_ms.saturating_add(frame);
            if self.intro_elapsed_ms < self.timing.intro_delay_ms {
                return false;
            }
            self.intro_complete = true;
            self.activation_window_ms = self.timing.stagger_min_ms;
            tracing::debug!(elapsed_ms = self.intro_elapsed_ms, "intro complete");
        }

        self.advance_activation_window();

        let window = self.activation_window_ms;
        let anim = self.timing.cell_anim_ms;
        let mut all_complete = true;
        for cell in self.cells.iter_mut().filter(|c| c.active) {
            if cell.start_delay_ms > window {
                all_complete = false;
                continue;
            }
            let max_elapsed = cell.start_delay_ms.saturating_add(anim);
            if cell.complete && cell.elapsed_ms >= max_elapsed {
                continue;
            }
            all_complete = false;
            cell.elapsed_ms = cell.elapsed_ms.saturating_add(frame);
            if cell.elapsed_ms >= max_elapsed {
                cell.elapsed_ms = max_elapsed;
                cell.complete = true;
            }
        }

        if all_complete && !self.animation_complete {
            self.animation_complete = true;
            tracing::debug!("background pass complete");
        }
        self.animation_complete
    }

    fn advance_activation_window(&mut self) {
        let (min, max) = (self.timing.stagger_min_ms, self.timing.stagger_max_ms);
        if self.timing.activation_duration_ms <= 0 {
            self.activation_ratio = 1.0;
            self.activation_window_ms = max;
            return;
        }
        if self.activation_ratio >= 1.0 {
            return;
        }
        self.activation_ratio +=
            self.timing.frame_ms as f32 / self.timing.activation_duration_ms as f32;
        self.activation_ratio = self.activation_ratio.min(1.0);
        let eased = self.timing.ease.apply(self.activation_ratio);
        self.activation_window_ms = min + ((max - min) as f32 * eased) as i32;
    }

    /// Jump every active cell to its end state and freeze the pass.
    pub fn finish_instantly(&mut self) {
        let anim = self.timing.cell_anim_ms;
        for cell in self.cells.iter_mut().filter(|c| c.active) {
            cell.elapsed_ms = cell.start_delay_ms.saturating_add(anim);
            cell.complete = true;
        }
        self.started = true;
        self.intro_complete = true;
        self.intro_elapsed_ms = self.intro_elapsed_ms.max(self.timing.intro_delay_ms);
        self.activation_ratio = 1.0;
        self.activation_window_ms = self.timing.stagger_max_ms;
        self.animation_complete = true;
    }

    /// Master switch. Disabling finishes the pass instantly; enabling only
    /// re-arms stepping, callers start a new pass themselves.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.animation_enabled = enabled;
        if !enabled {
            self.finish_instantly();
        }
        tracing::debug!(enabled, "background animation toggled");
    }

    fn progress_of(&self, cell: &BackgroundCell) -> Option<f32> {
        if !self.intro_complete || !cell.active || cell.start_delay_ms > self.activation_window_ms
        {
            return None;
        }
        let local = cell.elapsed_ms - cell.start_delay_ms;
        if local <= 0 && !cell.complete {
            return None;
        }
        let total = self.timing.cell_anim_ms;
        let local = local.clamp(0, total);
        Some(self.timing.ease.apply(local as f32 / total as f32))
    }

    /// State of cell `(col, row)`, or `None` when out of range.
    pub fn cell(&self, col: i32, row: i32) -> Option<&BackgroundCell> {
        self.geometry.index(col, row).map(|idx| &self.cells[idx])
    }

    /// Row-major cell slice.
    pub fn cells(&self) -> &[BackgroundCell] {
        &self.cells
    }

    /// Number of active cells in the current pass.
    pub fn active_count(&self) -> usize {
        self.cells.iter().filter(|c| c.active).count()
    }

    /// Current pass phase.
    pub fn phase(&self) -> PassPhase {
        if !self.started {
            PassPhase::Idle
        } else if !self.intro_complete {
            PassPhase::Intro
        } else if !self.animation_complete {
            PassPhase::Sweeping
        } else {
            PassPhase::Complete
        }
    }

    /// Intro delay has elapsed.
    pub fn intro_complete(&self) -> bool {
        self.intro_complete
    }

    /// Stagger threshold below which cells may run.
    pub fn activation_window_ms(&self) -> i32 {
        self.activation_window_ms
    }

    /// Linear progress of the activation sweep in `[0, 1]`.
    pub fn activation_ratio(&self) -> f32 {
        self.activation_ratio
    }

    /// Every active cell has completed.
    pub fn animation_complete(&self) -> bool {
        self.animation_complete
    }

    /// Master switch state.
    pub fn animation_enabled(&self) -> bool {
        self.animation_enabled
    }

    /// Timing the engine runs on.
    pub fn timing(&self) -> &ResolvedTiming {
        &self.timing
    }

    /// Grid layout.
    pub fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }
}

impl ProgressSource for BackgroundEngine {
    fn cell_progress(&self, col: i32, row: i32) -> Option<f32> {
        let idx = self.geometry.index(col, row)?;
        self.progress_of(&self.cells[idx])
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/background.rs"]
mod tests;
