//! Tuned timing constants and their per-grid resolution.

use std::path::Path;

use crate::animation::ease::Ease;
use crate::animation::stage::HighEndCutoff;
use crate::foundation::error::{GridClockError, GridClockResult};
use crate::render::palette::Theme;

/// Timing and activation tuning for one reveal pass.
///
/// Millisecond values describe the reference grid; [`TimingConfig::resolve`]
/// scales them to the actual grid so passes take a similar wall-clock time at
/// any resolution.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Frame period of the tick timer.
    pub frame_ms: u32,
    /// Per-cell growth duration.
    pub cell_anim_ms: u32,
    /// Lower bound of the random per-cell stagger.
    pub stagger_min_ms: u32,
    /// Upper bound of the random per-cell stagger.
    pub stagger_max_ms: u32,
    /// Duration of the activation sweep from `stagger_min_ms` to `stagger_max_ms`.
    pub activation_duration_ms: u32,
    /// Quiet period before anything animates.
    pub intro_delay_ms: u32,
    /// Base chance (percent) that a decorative cell takes part.
    pub active_percent: u32,
    /// Extra percentage points at the center of the digit region.
    pub proximity_bonus_percent: u32,
    /// Glyph progress below which a pixel is a core dot.
    pub digit_compact_threshold: f32,
    /// Glyph progress below which a pixel is compact; at or above it is full.
    pub digit_full_threshold: f32,
    /// Reference grid columns for duration scaling.
    pub reference_cols: u32,
    /// Reference grid rows for duration scaling.
    pub reference_rows: u32,
    /// Scale durations by `reference_cells / current_cells`.
    pub scale_with_grid: bool,
    /// Whether background cells vanish or hold a dot at the end.
    pub high_end: HighEndCutoff,
    /// Easing used for the sweep and per-cell progress.
    pub ease: Ease,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            frame_ms: 16,
            cell_anim_ms: 1300,
            stagger_min_ms: 0,
            stagger_max_ms: 420,
            activation_duration_ms: 520,
            intro_delay_ms: 120,
            active_percent: 18,
            proximity_bonus_percent: 32,
            digit_compact_threshold: 0.15,
            digit_full_threshold: 0.45,
            reference_cols: 25,
            reference_rows: 28,
            scale_with_grid: true,
            high_end: HighEndCutoff::Hold,
            ease: Ease::OutCubic,
        }
    }
}

/// Normalized, grid-scaled timing the engines run on.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ResolvedTiming {
    /// Frame period (never scaled, at least 1).
    pub frame_ms: i32,
    /// Per-cell growth duration (at least 1).
    pub cell_anim_ms: i32,
    /// Stagger lower bound.
    pub stagger_min_ms: i32,
    /// Stagger upper bound, never below the lower bound.
    pub stagger_max_ms: i32,
    /// Activation sweep duration; zero opens the window immediately.
    pub activation_duration_ms: i32,
    /// Intro delay.
    pub intro_delay_ms: i32,
    /// Base activation percent, capped at 100.
    pub active_percent: u32,
    /// Proximity bonus, capped at 100.
    pub proximity_bonus_percent: u32,
    /// Compact threshold in `[0, 1]`.
    pub digit_compact_threshold: f32,
    /// Full threshold in `[compact, 1]`.
    pub digit_full_threshold: f32,
    /// High-end shape behavior.
    pub high_end: HighEndCutoff,
    /// Progress easing.
    pub ease: Ease,
    /// Scale factor that was applied.
    pub scale: f32,
}

fn scaled_ms(scale: f32, base: u32) -> i32 {
    if base == 0 {
        return 0;
    }
    let scaled = base as f32 * scale;
    if scaled < 1.0 {
        return 1;
    }
    scaled.round().min(i32::MAX as f32) as i32
}

fn unit(v: f32) -> f32 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

impl TimingConfig {
    /// Duration scale for a grid of `cell_count` cells.
    pub fn scale_for(&self, cell_count: usize) -> f32 {
        if !self.scale_with_grid {
            return 1.0;
        }
        let reference = (self.reference_cols as f32) * (self.reference_rows as f32);
        let current = cell_count as f32;
        if reference <= 0.0 || current <= 0.0 {
            return 1.0;
        }
        reference / current
    }

    /// Normalize and scale for a grid of `cell_count` cells.
    ///
    /// Inconsistent tuning is repaired rather than rejected: the stagger
    /// maximum is raised to the minimum, thresholds are clamped and ordered.
    pub fn resolve(&self, cell_count: usize) -> ResolvedTiming {
        let scale = self.scale_for(cell_count);
        let stagger_min_ms = scaled_ms(scale, self.stagger_min_ms);
        let stagger_max_ms = scaled_ms(scale, self.stagger_max_ms).max(stagger_min_ms);
        let compact = unit(self.digit_compact_threshold);
        let full = unit(self.digit_full_threshold).max(compact);
        ResolvedTiming {
            frame_ms: self.frame_ms.clamp(1, i32::MAX as u32) as i32,
            cell_anim_ms: scaled_ms(scale, self.cell_anim_ms).max(1),
            stagger_min_ms,
            stagger_max_ms,
            activation_duration_ms: scaled_ms(scale, self.activation_duration_ms),
            intro_delay_ms: scaled_ms(scale, self.intro_delay_ms),
            active_percent: self.active_percent.min(100),
            proximity_bonus_percent: self.proximity_bonus_percent.min(100),
            digit_compact_threshold: compact,
            digit_full_threshold: full,
            high_end: self.high_end,
            ease: self.ease,
            scale,
        }
    }
}

impl ResolvedTiming {
    /// Upper bound on ticks one pass needs before `tick()` reports completion.
    pub fn max_pass_ticks(&self) -> u32 {
        let total = i64::from(self.intro_delay_ms)
            + i64::from(self.activation_duration_ms)
            + i64::from(self.stagger_max_ms)
            + i64::from(self.cell_anim_ms);
        let frame = i64::from(self.frame_ms);
        // Intro tick rounding, sweep rounding and the final confirming tick.
        (total / frame + 4).min(i64::from(u32::MAX)) as u32
    }
}

/// Host-level configuration file: timing plus theme.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ClockConfig {
    /// Timing tuning.
    pub timing: TimingConfig,
    /// Color theme.
    pub theme: Theme,
}

impl ClockConfig {
    /// Parse from a JSON string.
    pub fn from_json_str(json: &str) -> GridClockResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON file.
    pub fn from_path(path: &Path) -> GridClockResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            GridClockError::config(format!("read config '{}': {e}", path.display()))
        })?;
        Self::from_json_str(&text)
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
