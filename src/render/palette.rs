use crate::animation::stage::ColorStage;
use crate::foundation::core::Rgba8;

/// Named color theme.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    /// Light strokes on black.
    #[default]
    Dark,
    /// Dark strokes on white.
    Light,
}

/// Colors used by one rendered frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Palette {
    /// Surface fill.
    pub background_fill: Rgba8,
    /// Resting grid dots.
    pub grid_stroke: Rgba8,
    /// Revealed glyph pixels.
    pub digit_stroke: Rgba8,
    /// Background progress colors of glyph cells, dim to bright.
    pub digit_stages: [Rgba8; 3],
    /// Background progress colors of decorative cells, dim to bright.
    pub background_stages: [Rgba8; 3],
}

impl Palette {
    /// Palette for `theme`.
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self::dark(),
            Theme::Light => Self::light(),
        }
    }

    /// White on black.
    pub fn dark() -> Self {
        Self {
            background_fill: Rgba8::BLACK,
            grid_stroke: Rgba8::gray(0x55),
            digit_stroke: Rgba8::WHITE,
            digit_stages: [Rgba8::gray(0x55), Rgba8::gray(0xAA), Rgba8::WHITE],
            background_stages: [Rgba8::gray(0x55), Rgba8::gray(0xAA), Rgba8::WHITE],
        }
    }

    /// Black on white.
    pub fn light() -> Self {
        Self {
            background_fill: Rgba8::WHITE,
            grid_stroke: Rgba8::gray(0x55),
            digit_stroke: Rgba8::BLACK,
            digit_stages: [Rgba8::gray(0xAA), Rgba8::gray(0x66), Rgba8::BLACK],
            background_stages: [Rgba8::gray(0x55), Rgba8::gray(0x55), Rgba8::WHITE],
        }
    }

    /// Color of a background cell at `stage`.
    pub fn stage_color(&self, stage: ColorStage, is_digit: bool) -> Rgba8 {
        let idx = match stage {
            ColorStage::Dim => 0,
            ColorStage::Mid => 1,
            ColorStage::Bright => 2,
        };
        if is_digit {
            self.digit_stages[idx]
        } else {
            self.background_stages[idx]
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::dark()
    }
}
