//! End-to-end pipeline: sample, seed, cluster, separate, anchor, then
//! optionally expand every base color into a harmony ring.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::debug;

use crate::color::{Color, NEUTRAL_GRAY, Position};
use crate::config::ExtractionConfig;
use crate::distinct::enforce_distinct;
use crate::harmony::{HarmonyMode, generate_harmony_ring};
use crate::kmeans::cluster;
use crate::position::resolve_positions;
use crate::sampler::{PixelBuffer, sample_pixels};

/// Dominant-color extractor.
///
/// Without a seed every run draws fresh randomness for centroid seeding, so
/// repeated runs on the same image may differ. [`with_seed`](Self::with_seed)
/// makes the output reproducible.
#[derive(Debug, Clone, Default)]
pub struct PaletteExtractor {
    config: ExtractionConfig,
    seed: Option<u64>,
}

impl PaletteExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: ExtractionConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Extract exactly `k` dominant colors, each tagged with a representative
    /// source position.
    pub fn extract(&self, buffer: &PixelBuffer<'_>, k: usize) -> Vec<Color> {
        match self.seed {
            Some(seed) => self.extract_with_rng(buffer, k, &mut StdRng::seed_from_u64(seed)),
            None => self.extract_with_rng(buffer, k, &mut rand::rng()),
        }
    }

    /// [`extract`](Self::extract) with a caller-supplied random source.
    pub fn extract_with_rng<R: Rng + ?Sized>(
        &self,
        buffer: &PixelBuffer<'_>,
        k: usize,
        rng: &mut R,
    ) -> Vec<Color> {
        let pixels = sample_pixels(buffer, &self.config);
        if pixels.is_empty() {
            debug!(k, "no samples, returning neutral fallback");
            return neutral_fallback(k, buffer.midpoint());
        }

        let clustering = cluster(
            &pixels,
            k,
            self.config.iterations,
            self.config.seed_trials,
            rng,
        );
        let colors = enforce_distinct(&clustering.centroids, &pixels, &self.config);
        let positions = resolve_positions(
            &colors,
            &clustering,
            &pixels,
            buffer.width(),
            buffer.height(),
        );

        debug!(k, samples = pixels.len(), "extracted dominant colors");
        colors
            .into_iter()
            .zip(positions)
            .map(|(rgb, position)| Color::from(rgb).with_position(position))
            .collect()
    }

    /// Extract `k` base colors and expand each into a harmony ring.
    pub fn build_palette(
        &self,
        buffer: &PixelBuffer<'_>,
        k: usize,
        ring_count: usize,
        mode: HarmonyMode,
    ) -> Palette {
        Palette::new(self.extract(buffer, k), ring_count, mode)
    }
}

/// `k` neutral grays anchored at `position`.
fn neutral_fallback(k: usize, position: Position) -> Vec<Color> {
    vec![Color::from(NEUTRAL_GRAY).with_position(position); k]
}

/// Extract `k` dominant colors with default settings and unseeded randomness.
pub fn extract_dominant_colors(buffer: &PixelBuffer<'_>, k: usize) -> Vec<Color> {
    PaletteExtractor::new().extract(buffer, k)
}

/// Base colors in extraction order, followed by each base color's ring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Palette {
    mode: HarmonyMode,
    ring_count: usize,
    base_count: usize,
    colors: Vec<Color>,
}

impl Palette {
    pub fn new(bases: Vec<Color>, ring_count: usize, mode: HarmonyMode) -> Self {
        let base_count = bases.len();
        let mut colors = Vec::with_capacity(base_count * (ring_count + 1));
        let rings: Vec<Color> = bases
            .iter()
            .flat_map(|base| generate_harmony_ring(base, ring_count, mode))
            .collect();
        colors.extend(bases);
        colors.extend(rings);

        Self {
            mode,
            ring_count,
            base_count,
            colors,
        }
    }

    pub fn mode(&self) -> HarmonyMode {
        self.mode
    }

    pub fn ring_count(&self) -> usize {
        self.ring_count
    }

    pub fn bases(&self) -> &[Color] {
        &self.colors[..self.base_count]
    }

    /// One slice per base color, in base order.
    pub fn rings(&self) -> impl Iterator<Item = &[Color]> {
        self.colors[self.base_count..].chunks(self.ring_count.max(1))
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Color> {
        self.colors.iter()
    }
}

impl<'a> IntoIterator for &'a Palette {
    type Item = &'a Color;
    type IntoIter = std::slice::Iter<'a, Color>;

    fn into_iter(self) -> Self::IntoIter {
        self.colors.iter()
    }
}

/// Expand already-extracted base colors into a full palette.
pub fn build_palette(bases: &[Color], ring_count: usize, mode: HarmonyMode) -> Palette {
    Palette::new(bases.to_vec(), ring_count, mode)
}
