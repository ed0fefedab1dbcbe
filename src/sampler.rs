//! Pixel buffer access and strided sampling.

use image::RgbaImage;
use tracing::debug;

use crate::color::{Position, Rgb};
use crate::config::ExtractionConfig;
use crate::error::{PaletteError, Result};

/// Borrowed view over decoded RGBA8 pixel data, row-major.
#[derive(Debug, Clone, Copy)]
pub struct PixelBuffer<'a> {
    width: u32,
    height: u32,
    data: &'a [u8],
}

impl<'a> PixelBuffer<'a> {
    /// Wrap raw RGBA bytes. `data` must hold exactly `width * height * 4` bytes.
    pub fn new(width: u32, height: u32, data: &'a [u8]) -> Result<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(4));
        match expected {
            Some(expected) if expected == data.len() => Ok(Self {
                width,
                height,
                data,
            }),
            _ => Err(PaletteError::BufferSize {
                width,
                height,
                expected: expected.unwrap_or(usize::MAX),
                actual: data.len(),
            }),
        }
    }

    pub fn empty() -> Self {
        Self {
            width: 0,
            height: 0,
            data: &[],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// RGBA at `(x, y)`. Caller guarantees the coordinate is in bounds.
    fn rgba(&self, x: u32, y: u32) -> [u8; 4] {
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        [
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        ]
    }

    /// Image center, or the origin for an empty image.
    pub fn midpoint(&self) -> Position {
        if self.is_empty() {
            Position::new(0, 0)
        } else {
            Position::new(self.width / 2, self.height / 2)
        }
    }
}

impl<'a> From<&'a RgbaImage> for PixelBuffer<'a> {
    fn from(img: &'a RgbaImage) -> Self {
        Self {
            width: img.width(),
            height: img.height(),
            data: img.as_raw(),
        }
    }
}

/// A sampled pixel and where it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pixel {
    pub rgb: Rgb,
    pub position: Position,
}

/// Largest stride `<= config.sample_stride` that still yields at least
/// `config.min_samples` pixels; 1 for images too small to reach it.
pub fn effective_stride(width: u32, height: u32, config: &ExtractionConfig) -> u32 {
    let max_stride = config.sample_stride.max(1);
    (1..=max_stride)
        .rev()
        .find(|&s| {
            let count = width.div_ceil(s) as usize * height.div_ceil(s) as usize;
            count >= config.min_samples
        })
        .unwrap_or(1)
}

/// Sample every `stride`-th pixel along both axes, row by row.
pub fn sample_pixels(buffer: &PixelBuffer<'_>, config: &ExtractionConfig) -> Vec<Pixel> {
    if buffer.is_empty() {
        return Vec::new();
    }

    let stride = effective_stride(buffer.width, buffer.height, config);
    let mut pixels = Vec::with_capacity(
        buffer.width.div_ceil(stride) as usize * buffer.height.div_ceil(stride) as usize,
    );

    for y in (0..buffer.height).step_by(stride as usize) {
        for x in (0..buffer.width).step_by(stride as usize) {
            let [r, g, b, a] = buffer.rgba(x, y);
            if config.skip_transparent && a == 0 {
                continue;
            }
            pixels.push(Pixel {
                rgb: [r, g, b],
                position: Position::new(x, y),
            });
        }
    }

    debug!(
        width = buffer.width,
        height = buffer.height,
        stride,
        samples = pixels.len(),
        "sampled pixel buffer"
    );
    pixels
}
