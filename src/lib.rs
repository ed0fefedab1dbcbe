//! palette_harmony: dominant-color extraction and harmony palettes
//!
//! Decoded RGBA pixels go in, a small set of visually distinct dominant
//! colors comes out, and each of those can be expanded into a ring of
//! harmonically related colors.
//!
//! ```
//! use palette_harmony::{generate_harmony_ring, HarmonyMode, PaletteExtractor, PixelBuffer};
//!
//! let data = [255u8, 0, 0, 255].repeat(16);
//! let buffer = PixelBuffer::new(4, 4, &data)?;
//!
//! let colors = PaletteExtractor::new().with_seed(1).extract(&buffer, 1);
//! assert_eq!(colors[0].hex(), "#ff0000");
//!
//! let ring = generate_harmony_ring(&colors[0], 3, HarmonyMode::Complementary);
//! assert!(ring.iter().all(|c| c.hue() == 180));
//! # Ok::<(), palette_harmony::PaletteError>(())
//! ```
//!
//! # Pipeline
//!
//! ```text
//! PixelBuffer ──sample──> Pixels ──seed──> centroids ──k-means──> centroids
//!     ──enforce distance──> colors ──resolve positions──> Vec<Color>
//! ```
//!
//! Seeding and empty-cluster recovery are random. Use
//! [`PaletteExtractor::with_seed`] or [`PaletteExtractor::extract_with_rng`]
//! when output has to be reproducible.

pub mod color;
pub mod config;
pub mod distinct;
pub mod error;
pub mod extract;
pub mod harmony;
pub mod kmeans;
pub mod position;
pub mod sampler;
pub mod wasm;

pub use color::{Color, Position, hsl_to_rgb, rgb_to_hex, rgb_to_hsl};
pub use config::ExtractionConfig;
pub use error::{PaletteError, Result};
pub use extract::{Palette, PaletteExtractor, build_palette, extract_dominant_colors};
pub use harmony::{HarmonyMode, generate_harmony_ring, validate_ring_count};
pub use sampler::PixelBuffer;
