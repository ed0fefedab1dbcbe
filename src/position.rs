//! Representative source coordinates for extracted colors.

use crate::color::{Position, Rgb, rgb_distance_sq};
use crate::kmeans::Clustering;
use crate::sampler::Pixel;

/// Evenly spaced spot across the image width, on the horizontal midline.
pub fn fallback_position(index: usize, count: usize, width: u32, height: u32) -> Position {
    let x = (index as u64 + 1) * width as u64 / (count as u64 + 1);
    Position::new(x as u32, height / 2)
}

/// For each color, the position of the closest sample among the members of
/// the cluster with the same index. Clusters without members fall back to
/// [`fallback_position`].
pub fn resolve_positions(
    colors: &[Rgb],
    clustering: &Clustering,
    pixels: &[Pixel],
    width: u32,
    height: u32,
) -> Vec<Position> {
    colors
        .iter()
        .enumerate()
        .map(|(idx, &rgb)| {
            clustering
                .members(idx)
                .map(|member| &pixels[member])
                // min_by_key keeps the first of equal minima
                .min_by_key(|pixel| rgb_distance_sq(pixel.rgb, rgb))
                .map(|pixel| pixel.position)
                .unwrap_or_else(|| fallback_position(idx, colors.len(), width, height))
        })
        .collect()
}
