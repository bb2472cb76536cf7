//! Progress to shape/color staging shared by the background grid and glyph overlay.

/// Upper bound of the "largest shape" band.
pub const FULL_SHAPE_BELOW: f32 = 0.28;
/// Upper bound of the "medium shape" band.
pub const COMPACT_SHAPE_BELOW: f32 = 0.6;
/// Upper bound of the "core dot" band when cells vanish before the end.
pub const VANISH_CORE_BELOW: f32 = 0.92;

/// Visual size of a drawn cell.
///
/// Ordered so that `Core < Compact < Full`.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ShapeLevel {
    /// Smallest centered dot.
    Core,
    /// Rounded square.
    Compact,
    /// Largest inset square.
    Full,
}

impl ShapeLevel {
    /// Numeric level: 0 = core, 1 = compact, 2 = full.
    pub fn index(self) -> u8 {
        match self {
            Self::Core => 0,
            Self::Compact => 1,
            Self::Full => 2,
        }
    }
}

/// How a cell's shape ends once progress nears 1.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HighEndCutoff {
    /// Cells disappear at progress `>= 0.92`.
    Vanish,
    /// Cells stay at the core dot through progress `1.0`.
    #[default]
    Hold,
}

/// Map eased progress to a shape: grow large first, then shrink to a dot.
pub fn shape_level_for_progress(progress: f32, cutoff: HighEndCutoff) -> Option<ShapeLevel> {
    if progress.is_nan() || progress <= 0.0 {
        return None;
    }
    if progress < FULL_SHAPE_BELOW {
        return Some(ShapeLevel::Full);
    }
    if progress < COMPACT_SHAPE_BELOW {
        return Some(ShapeLevel::Compact);
    }
    let in_core = match cutoff {
        HighEndCutoff::Vanish => progress < VANISH_CORE_BELOW,
        HighEndCutoff::Hold => progress <= 1.0,
    };
    in_core.then_some(ShapeLevel::Core)
}

/// Palette intensity stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ColorStage {
    /// Darkest stage.
    Dim,
    /// Middle stage.
    Mid,
    /// Brightest stage.
    Bright,
}

fn stage_in_thirds(phase: f32) -> ColorStage {
    if phase < 1.0 / 3.0 {
        ColorStage::Dim
    } else if phase < 2.0 / 3.0 {
        ColorStage::Mid
    } else {
        ColorStage::Bright
    }
}

/// Color stage for a cell at `progress`.
///
/// Glyph cells settle monotonically (dim, mid, bright); background cells pulse
/// up across the first half and back down across the second.
pub fn color_stage(progress: f32, is_digit: bool) -> ColorStage {
    let progress = if progress.is_nan() {
        0.0
    } else {
        progress.clamp(0.0, 1.0)
    };
    if is_digit {
        return stage_in_thirds(progress);
    }
    if progress < 0.5 {
        return stage_in_thirds(progress / 0.5);
    }
    match stage_in_thirds((progress - 0.5) / 0.5) {
        ColorStage::Dim => ColorStage::Bright,
        ColorStage::Mid => ColorStage::Mid,
        ColorStage::Bright => ColorStage::Dim,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/stage.rs"]
mod tests;
