//! Color-space conversions and the [`Color`] value returned by the engine.
//!
//! RGB is the source of truth: HSL and hex are always derived from it, so a
//! `Color` can only be built from RGB (or a hex string that parses to RGB).

use std::fmt;
use std::str::FromStr;

use palette::{FromColor, Hsl, IntoColor, Srgb};
use serde::Serialize;

use crate::error::{PaletteError, Result};

/// An RGB triple as used during clustering.
pub type Rgb = [u8; 3];

/// Neutral gray used whenever the engine has no pixel data to work from.
pub const NEUTRAL_GRAY: Rgb = [128, 128, 128];

/// Pixel coordinate in image space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Position {
    pub x: u32,
    pub y: u32,
}

impl Position {
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// A palette entry: RGB channels plus the derived HSL and hex forms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Color {
    r: u8,
    g: u8,
    b: u8,
    h: u16,
    s: u8,
    l: u8,
    hex: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    position: Option<Position>,
}

impl Color {
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        let (h, s, l) = rgb_to_hsl(r, g, b);
        Self {
            r,
            g,
            b,
            h,
            s,
            l,
            hex: rgb_to_hex(r, g, b),
            position: None,
        }
    }

    /// Build a color from HSL (hue in degrees, saturation and lightness in
    /// percent). The stored HSL is re-derived from the rounded RGB result.
    pub fn from_hsl(h: f32, s: f32, l: f32) -> Self {
        let (r, g, b) = hsl_to_rgb(h, s, l);
        Self::from_rgb(r, g, b)
    }

    /// Parse `#rrggbb` or `rrggbb` (either case).
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.trim().trim_start_matches('#');
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(PaletteError::InvalidHex(hex.to_string()));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|_| PaletteError::InvalidHex(hex.to_string()))
        };
        Ok(Self::from_rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    pub fn red(&self) -> u8 {
        self.r
    }

    pub fn green(&self) -> u8 {
        self.g
    }

    pub fn blue(&self) -> u8 {
        self.b
    }

    /// Hue in whole degrees, `0..360`.
    pub fn hue(&self) -> u16 {
        self.h
    }

    /// Saturation in whole percent.
    pub fn saturation(&self) -> u8 {
        self.s
    }

    /// Lightness in whole percent.
    pub fn lightness(&self) -> u8 {
        self.l
    }

    pub fn hex(&self) -> &str {
        &self.hex
    }

    pub fn position(&self) -> Option<Position> {
        self.position
    }

    pub fn rgb(&self) -> Rgb {
        [self.r, self.g, self.b]
    }

    /// Euclidean distance to `other` over the three RGB channels.
    pub fn distance(&self, other: &Color) -> f64 {
        rgb_distance(self.rgb(), other.rgb())
    }
}

impl From<Rgb> for Color {
    fn from([r, g, b]: Rgb) -> Self {
        Self::from_rgb(r, g, b)
    }
}

impl From<Srgb<u8>> for Color {
    fn from(c: Srgb<u8>) -> Self {
        Self::from_rgb(c.red, c.green, c.blue)
    }
}

impl FromStr for Color {
    type Err = PaletteError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex)
    }
}

/// Convert 8-bit RGB to HSL as `(hue°, saturation%, lightness%)`, each rounded.
///
/// Achromatic input (all channels equal) yields hue 0 and saturation 0.
///
/// Rounding to whole degrees and percent makes the round trip through
/// [`hsl_to_rgb`] lossy: grays come back within one step, chromatic colors
/// can be off by two or three per channel (`(255, 2, 0)` returns as
/// `(255, 0, 0)`).
pub fn rgb_to_hsl(r: u8, g: u8, b: u8) -> (u16, u8, u8) {
    let rgb: Srgb<f32> = Srgb::new(r, g, b).into_format();
    let hsl: Hsl = rgb.into_color();
    let lightness = (hsl.lightness * 100.0).round() as u8;

    if r == g && g == b {
        return (0, 0, lightness);
    }

    let hue = hsl.hue.into_positive_degrees().round() as u16 % 360;
    let saturation = (hsl.saturation * 100.0).round() as u8;
    (hue, saturation, lightness)
}

/// Convert HSL (hue in degrees, saturation and lightness in percent) to 8-bit RGB.
///
/// Hue may be any value and is wrapped into `[0, 360)`; saturation and
/// lightness are clamped to `[0, 100]`. See [`rgb_to_hsl`] for round-trip
/// precision.
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> (u8, u8, u8) {
    let hsl: Hsl = Hsl::new(
        normalize_hue(h),
        (s / 100.0).clamp(0.0, 1.0),
        (l / 100.0).clamp(0.0, 1.0),
    );
    let rgb: Srgb = Srgb::from_color(hsl);
    let rgb: Srgb<u8> = rgb.into_format();
    (rgb.red, rgb.green, rgb.blue)
}

/// Lowercase `#rrggbb`.
pub fn rgb_to_hex(r: u8, g: u8, b: u8) -> String {
    format!("#{r:02x}{g:02x}{b:02x}")
}

/// Wrap any hue into `[0, 360)`.
pub fn normalize_hue(h: f32) -> f32 {
    let wrapped = h.rem_euclid(360.0);
    // rem_euclid can land on 360.0 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

pub(crate) fn rgb_distance_sq(a: Rgb, b: Rgb) -> u32 {
    a.iter()
        .zip(b.iter())
        .map(|(&x, &y)| {
            let d = x as i32 - y as i32;
            (d * d) as u32
        })
        .sum()
}

pub fn rgb_distance(a: Rgb, b: Rgb) -> f64 {
    (rgb_distance_sq(a, b) as f64).sqrt()
}
