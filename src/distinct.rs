//! Post-clustering pass that keeps returned colors visually apart.

use std::collections::HashMap;

use tracing::debug;

use crate::color::{Rgb, rgb_distance};
use crate::config::ExtractionConfig;
use crate::sampler::Pixel;

/// Distinct colors among every `step`-th sample of the first `limit`
/// samples, most frequent first. Equal counts keep first-seen order.
pub fn frequency_table(pixels: &[Pixel], step: usize, limit: usize) -> Vec<Rgb> {
    let mut counts: HashMap<Rgb, usize> = HashMap::new();
    let mut order: Vec<Rgb> = Vec::new();

    for pixel in pixels[..limit.min(pixels.len())].iter().step_by(step.max(1)) {
        let count = counts.entry(pixel.rgb).or_insert_with(|| {
            order.push(pixel.rgb);
            0
        });
        *count += 1;
    }

    order.sort_by_key(|rgb| std::cmp::Reverse(counts[rgb]));
    order
}

fn is_distinct(rgb: Rgb, accepted: &[Rgb], min_distance: f64) -> bool {
    accepted
        .iter()
        .all(|&other| rgb_distance(rgb, other) >= min_distance)
}

/// Raise every channel by `step` until the color clears `min_distance` from
/// all accepted colors or can no longer move.
fn nudge(rgb: Rgb, accepted: &[Rgb], step: u8, min_distance: f64) -> Rgb {
    let mut current = rgb;
    loop {
        let next = current.map(|c| c.saturating_add(step));
        if next == current {
            return current;
        }
        current = next;
        if is_distinct(current, accepted, min_distance) {
            return current;
        }
    }
}

/// Walk `centroids` in order, replacing any that sit within
/// `config.min_distance` of an earlier accepted color.
///
/// Replacements come from the sample frequency table; when nothing there is
/// far enough away the centroid is nudged brighter instead.
pub fn enforce_distinct(centroids: &[Rgb], pixels: &[Pixel], config: &ExtractionConfig) -> Vec<Rgb> {
    let threshold = config.min_distance;
    let mut table: Option<Vec<Rgb>> = None;
    let mut accepted: Vec<Rgb> = Vec::with_capacity(centroids.len());

    for (idx, &centroid) in centroids.iter().enumerate() {
        if is_distinct(centroid, &accepted, threshold) {
            accepted.push(centroid);
            continue;
        }

        let candidates = table.get_or_insert_with(|| {
            frequency_table(pixels, config.frequency_step, config.frequency_limit)
        });
        let replacement = candidates
            .iter()
            .copied()
            .find(|&candidate| is_distinct(candidate, &accepted, threshold));

        let chosen = match replacement {
            Some(rgb) => {
                debug!(idx, ?centroid, replacement = ?rgb, "replaced near-duplicate centroid");
                rgb
            }
            None => {
                let nudged = nudge(centroid, &accepted, config.nudge, threshold);
                debug!(idx, ?centroid, ?nudged, "nudged near-duplicate centroid");
                nudged
            }
        };
        accepted.push(chosen);
    }

    accepted
}
