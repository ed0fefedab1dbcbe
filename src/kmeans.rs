//! Farthest-point seeding and fixed-iteration k-means over RGB samples.

use rand::Rng;
use tracing::trace;

use crate::color::{Rgb, rgb_distance_sq};
use crate::sampler::Pixel;

/// Final centroids plus the cluster index each sample received in the last
/// assignment pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clustering {
    pub centroids: Vec<Rgb>,
    pub assignments: Vec<usize>,
}

impl Clustering {
    /// Indices of samples assigned to `cluster`.
    pub fn members(&self, cluster: usize) -> impl Iterator<Item = usize> + '_ {
        self.assignments
            .iter()
            .enumerate()
            .filter(move |&(_, &c)| c == cluster)
            .map(|(i, _)| i)
    }
}

/// Pick `k` well-separated starting centroids.
///
/// The first is a uniformly random sample. Every further centroid is the best
/// of `trials` random candidates, scored by distance to its nearest
/// already-chosen centroid.
pub fn seed_centroids<R: Rng + ?Sized>(
    pixels: &[Pixel],
    k: usize,
    trials: usize,
    rng: &mut R,
) -> Vec<Rgb> {
    if pixels.is_empty() || k == 0 {
        return Vec::new();
    }

    let mut centroids = Vec::with_capacity(k);
    centroids.push(pixels[rng.random_range(0..pixels.len())].rgb);

    while centroids.len() < k {
        let mut best = pixels[rng.random_range(0..pixels.len())].rgb;
        let mut best_score = min_distance_sq(best, &centroids);

        for _ in 1..trials.max(1) {
            let candidate = pixels[rng.random_range(0..pixels.len())].rgb;
            let score = min_distance_sq(candidate, &centroids);
            if score > best_score {
                best = candidate;
                best_score = score;
            }
        }
        centroids.push(best);
    }

    centroids
}

fn min_distance_sq(rgb: Rgb, centroids: &[Rgb]) -> u32 {
    centroids
        .iter()
        .map(|&c| rgb_distance_sq(rgb, c))
        .min()
        .unwrap_or(u32::MAX)
}

/// Index of the closest centroid; the lowest index wins ties.
pub fn nearest_centroid(rgb: Rgb, centroids: &[Rgb]) -> usize {
    let mut best_idx = 0;
    let mut best_dist = u32::MAX;
    for (idx, &c) in centroids.iter().enumerate() {
        let dist = rgb_distance_sq(rgb, c);
        if dist < best_dist {
            best_dist = dist;
            best_idx = idx;
        }
    }
    best_idx
}

/// Run `iterations` rounds of assignment and mean update.
///
/// There is no convergence check. A cluster left without members is
/// reseeded from a random sample so that exactly `k` centroids survive.
pub fn cluster<R: Rng + ?Sized>(
    pixels: &[Pixel],
    k: usize,
    iterations: usize,
    seed_trials: usize,
    rng: &mut R,
) -> Clustering {
    let mut centroids = seed_centroids(pixels, k, seed_trials, rng);
    let mut assignments = vec![0usize; pixels.len()];

    if centroids.is_empty() {
        return Clustering {
            centroids,
            assignments,
        };
    }

    for iteration in 0..iterations {
        for (slot, pixel) in assignments.iter_mut().zip(pixels) {
            *slot = nearest_centroid(pixel.rgb, &centroids);
        }

        let mut sums = vec![[0u64; 3]; k];
        let mut counts = vec![0u64; k];
        for (&cluster, pixel) in assignments.iter().zip(pixels) {
            for (sum, &channel) in sums[cluster].iter_mut().zip(pixel.rgb.iter()) {
                *sum += channel as u64;
            }
            counts[cluster] += 1;
        }

        let mut reseeded = 0;
        for (idx, centroid) in centroids.iter_mut().enumerate() {
            let count = counts[idx];
            if count == 0 {
                *centroid = pixels[rng.random_range(0..pixels.len())].rgb;
                reseeded += 1;
            } else {
                // rounded mean, half up
                *centroid = sums[idx].map(|sum| ((sum + count / 2) / count) as u8);
            }
        }

        if reseeded > 0 {
            trace!(iteration, reseeded, "reseeded empty clusters");
        }
    }

    Clustering {
        centroids,
        assignments,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Position;
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn pixels(colors: &[Rgb]) -> Vec<Pixel> {
        colors
            .iter()
            .enumerate()
            .map(|(i, &rgb)| Pixel {
                rgb,
                position: Position::new(i as u32, 0),
            })
            .collect()
    }

    #[test]
    fn test_nearest_centroid_prefers_lowest_index_on_tie() {
        let centroids = [[0, 0, 0], [20, 0, 0], [0, 0, 0]];
        assert_eq!(nearest_centroid([10, 0, 0], &centroids), 0);
        assert_eq!(nearest_centroid([0, 0, 0], &centroids), 0);
        assert_eq!(nearest_centroid([19, 0, 0], &centroids), 1);
    }

    #[test]
    fn test_seed_returns_k_sampled_colors() {
        let samples = pixels(&[[10, 10, 10], [200, 0, 0], [0, 200, 0], [0, 0, 200]]);
        let mut rng = StdRng::seed_from_u64(7);
        let seeds = seed_centroids(&samples, 3, 50, &mut rng);
        assert_eq!(seeds.len(), 3);
        for seed in &seeds {
            assert!(samples.iter().any(|p| p.rgb == *seed));
        }
    }

    #[test]
    fn test_seed_spreads_over_distinct_colors() {
        let mut colors = vec![[255, 0, 0]; 50];
        colors.extend(vec![[0, 0, 255]; 50]);
        let samples = pixels(&colors);
        let mut rng = StdRng::seed_from_u64(42);
        let mut seeds = seed_centroids(&samples, 2, 50, &mut rng);
        seeds.sort();
        assert_eq!(seeds, vec![[0, 0, 255], [255, 0, 0]]);
    }

    #[test]
    fn test_seed_handles_degenerate_input() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(seed_centroids(&[], 3, 50, &mut rng).is_empty());
        let samples = pixels(&[[1, 2, 3]]);
        assert!(seed_centroids(&samples, 0, 50, &mut rng).is_empty());
        // more clusters than samples still yields k seeds
        assert_eq!(seed_centroids(&samples, 4, 50, &mut rng), vec![[1, 2, 3]; 4]);
    }

    #[test]
    fn test_cluster_homogeneous_groups_exactly() {
        let mut colors = vec![[255, 0, 0]; 8];
        colors.extend(vec![[0, 0, 255]; 8]);
        let samples = pixels(&colors);
        let mut rng = StdRng::seed_from_u64(3);
        let clustering = cluster(&samples, 2, 15, 50, &mut rng);

        let mut centroids = clustering.centroids.clone();
        centroids.sort();
        assert_eq!(centroids, vec![[0, 0, 255], [255, 0, 0]]);

        let red_cluster = clustering.assignments[0];
        assert!(clustering.assignments[..8].iter().all(|&c| c == red_cluster));
        assert!(clustering.assignments[8..].iter().all(|&c| c != red_cluster));
        assert_eq!(clustering.members(red_cluster).count(), 8);
    }

    #[test]
    fn test_cluster_mean_is_rounded() {
        let samples = pixels(&[[10, 0, 0], [11, 0, 0], [250, 250, 250]]);
        let mut rng = StdRng::seed_from_u64(11);
        let clustering = cluster(&samples, 2, 15, 50, &mut rng);
        let mut centroids = clustering.centroids;
        centroids.sort();
        // (10 + 11) / 2 = 10.5 rounds up
        assert_eq!(centroids, vec![[11, 0, 0], [250, 250, 250]]);
    }

    #[test]
    fn test_cluster_keeps_k_centroids_when_clusters_empty() {
        let samples = pixels(&[[50, 50, 50]; 5]);
        let mut rng = StdRng::seed_from_u64(5);
        let clustering = cluster(&samples, 3, 15, 50, &mut rng);
        assert_eq!(clustering.centroids, vec![[50, 50, 50]; 3]);
        assert_eq!(clustering.assignments, vec![0; 5]);
    }

    #[test]
    fn test_cluster_is_reproducible_with_seed() {
        let colors: Vec<Rgb> = (0..60u8).map(|i| [i * 4, 255 - i * 4, i]).collect();
        let samples = pixels(&colors);
        let a = cluster(&samples, 4, 15, 50, &mut StdRng::seed_from_u64(99));
        let b = cluster(&samples, 4, 15, 50, &mut StdRng::seed_from_u64(99));
        assert_eq!(a, b);
    }
}
