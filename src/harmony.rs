//! Harmony rings: colors derived from one base color by hue rotation and
//! lightness offsets.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::color::{Color, normalize_hue};
use crate::error::{PaletteError, Result};

pub const MIN_RING_COUNT: usize = 3;
pub const MAX_RING_COUNT: usize = 12;

const MIN_LIGHTNESS: f32 = 10.0;
const MAX_LIGHTNESS: f32 = 90.0;

/// Total lightness span of a complementary ring.
const COMPLEMENTARY_SPREAD: f32 = 60.0;
/// Analogous hue offsets run from `-ANALOGOUS_SPREAD` to `+ANALOGOUS_SPREAD`.
const ANALOGOUS_SPREAD: f32 = 30.0;
const ANALOGOUS_LIGHTNESS_STEP: f32 = 10.0;
/// Lightness spread across the bands of a cyclic ring, applied around `-BAND_OFFSET`.
const BAND_SPREAD: f32 = 40.0;
const BAND_OFFSET: f32 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HarmonyMode {
    Complementary,
    Analogous,
    Triadic,
    Tetradic,
    SplitComplementary,
}

impl HarmonyMode {
    pub const ALL: [HarmonyMode; 5] = [
        HarmonyMode::Complementary,
        HarmonyMode::Analogous,
        HarmonyMode::Triadic,
        HarmonyMode::Tetradic,
        HarmonyMode::SplitComplementary,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HarmonyMode::Complementary => "complementary",
            HarmonyMode::Analogous => "analogous",
            HarmonyMode::Triadic => "triadic",
            HarmonyMode::Tetradic => "tetradic",
            HarmonyMode::SplitComplementary => "split-complementary",
        }
    }

    /// `(hue offset°, lightness offset%)` for ring member `index` of `count`.
    fn offsets(&self, index: usize, count: usize) -> (f32, f32) {
        // position along the ring in [0, 1]; a lone member sits in the middle
        let t = if count > 1 {
            index as f32 / (count - 1) as f32
        } else {
            0.5
        };

        match self {
            HarmonyMode::Complementary => (180.0, COMPLEMENTARY_SPREAD * (t - 0.5)),
            HarmonyMode::Analogous => {
                let lightness = if index % 2 == 0 {
                    ANALOGOUS_LIGHTNESS_STEP
                } else {
                    -ANALOGOUS_LIGHTNESS_STEP
                };
                (ANALOGOUS_SPREAD * (2.0 * t - 1.0), lightness)
            }
            HarmonyMode::Triadic => banded(&[0.0, 120.0, 240.0], index, count),
            HarmonyMode::Tetradic => banded(&[0.0, 90.0, 180.0, 270.0], index, count),
            HarmonyMode::SplitComplementary => banded(&[0.0, 150.0, 210.0], index, count),
        }
    }
}

/// Hue cycles through `cycle` by index; lightness steps once per full cycle.
fn banded(cycle: &[f32], index: usize, count: usize) -> (f32, f32) {
    let band = index / cycle.len();
    let bands = count.div_ceil(cycle.len());
    let lightness = BAND_SPREAD * band as f32 / bands as f32 - BAND_OFFSET;
    (cycle[index % cycle.len()], lightness)
}

impl fmt::Display for HarmonyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HarmonyMode {
    type Err = PaletteError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "complementary" => Ok(HarmonyMode::Complementary),
            "analogous" => Ok(HarmonyMode::Analogous),
            "triadic" => Ok(HarmonyMode::Triadic),
            "tetradic" => Ok(HarmonyMode::Tetradic),
            "split-complementary" | "splitcomplementary" => Ok(HarmonyMode::SplitComplementary),
            _ => Err(PaletteError::UnknownHarmonyMode(s.to_string())),
        }
    }
}

/// Check a ring count at an API boundary.
pub fn validate_ring_count(ring_count: usize) -> Result<usize> {
    if (MIN_RING_COUNT..=MAX_RING_COUNT).contains(&ring_count) {
        Ok(ring_count)
    } else {
        Err(PaletteError::InvalidRingCount(ring_count))
    }
}

/// Expand `base` into `ring_count` related colors.
///
/// Saturation is carried over from the base; lightness is clamped to
/// `[10, 90]`. Each member's HSL is re-derived from its rounded RGB, so
/// the target hue holds only up to that rounding: dark or low-chroma members
/// can land a degree or more off (`#001122` complements to `#331a00`, hue 31
/// rather than 30). `ring_count` is expected in `3..=12`; callers validate it.
pub fn generate_harmony_ring(base: &Color, ring_count: usize, mode: HarmonyMode) -> Vec<Color> {
    let hue = base.hue() as f32;
    let saturation = base.saturation() as f32;
    let lightness = base.lightness() as f32;

    (0..ring_count)
        .map(|index| {
            let (hue_offset, lightness_offset) = mode.offsets(index, ring_count);
            Color::from_hsl(
                normalize_hue(hue + hue_offset),
                saturation,
                (lightness + lightness_offset).clamp(MIN_LIGHTNESS, MAX_LIGHTNESS),
            )
        })
        .collect()
}
