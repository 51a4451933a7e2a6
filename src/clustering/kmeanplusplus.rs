use crate::clustering::SeedSelector;
use crate::distances::squared_euclidean_with_norms;
use crate::{memory::*, Dataset, InitError};
use rand::distributions::WeightedIndex;
use rand::prelude::*;
use rayon::prelude::*;

/// Greedy K-Means++ seeding.
///
/// ## Description
/// The first center is drawn uniformly from all samples. Every following step draws a couple of candidates,
/// each with a probability proportional to its squared distance to the nearest already selected center.
/// Of those candidates, the one that reduces the total squared distance (potential) the most is kept.
/// This leads to centers, that are spread over the whole dataset.
///
/// With `local_trials == Some(1)`, this degrades to the classic (non-greedy) K-Means++. `Some(0)` is treated
/// like `Some(1)`.
/// (see: Arthur & Vassilvitskii, "k-means++: the advantages of careful seeding")
#[derive(Clone, Copy, Debug, Default)]
pub struct KMeansPlusPlus;

impl KMeansPlusPlus {
    /// Default amount of candidates per selection step: `2 + floor(ln(k))`
    pub fn default_local_trials(k: usize) -> usize {
        2 + (k as f64).ln().floor() as usize
    }
}

impl<T: Primitive> SeedSelector<T> for KMeansPlusPlus {
    fn select(&self, dataset: &Dataset<T>, k: usize, squared_norms: &[T], local_trials: Option<usize>, rnd: &mut dyn RngCore) -> Result<Vec<usize>, InitError> {
        dataset.check_cluster_count(k)?;
        if squared_norms.len() != dataset.sample_cnt {
            return Err(InitError::ShapeMismatch { expected: dataset.sample_cnt, actual: squared_norms.len() });
        }
        let local_trials = local_trials.unwrap_or_else(|| Self::default_local_trials(k)).max(1);
        let mut selected = Vec::with_capacity(k);
        let mut is_selected = vec![false; dataset.sample_cnt];

        // Randomly select first center
        let first_idx = rnd.gen_range(0..dataset.sample_cnt);
        selected.push(first_idx);
        is_selected[first_idx] = true;
        let mut closest_distances = distances_to(dataset, squared_norms, first_idx);
        let mut potential: T = closest_distances.iter().cloned().sum();

        while selected.len() < k {
            let candidates: Vec<usize> = match WeightedIndex::new(closest_distances.iter().cloned()) {
                Ok(weights) => (0..local_trials).map(|_| weights.sample(&mut *rnd)).collect(),
                // Every remaining sample coincides with a selected center -> fall back to uniform choice
                Err(_) => (0..dataset.sample_cnt)
                    .filter(|&i| !is_selected[i])
                    .choose(&mut *rnd)
                    .into_iter()
                    .collect(),
            };

            // Keep the candidate, that reduces the potential the most
            let mut best: Option<(usize, T, Vec<T>)> = None;
            for candidate in candidates.into_iter().filter(|&c| !is_selected[c]) {
                let candidate_distances: Vec<T> = distances_to(dataset, squared_norms, candidate)
                    .into_iter()
                    .zip(closest_distances.iter().cloned())
                    .map(|(d, closest)| d.min(closest))
                    .collect();
                let candidate_potential: T = candidate_distances.iter().cloned().sum();
                if best.as_ref().map_or(true, |(_, p, _)| candidate_potential < *p) {
                    best = Some((candidate, candidate_potential, candidate_distances));
                }
            }

            // All candidates were already selected (only possible for duplicate samples)
            let (best_idx, best_potential, best_distances) = match best {
                Some(best) => best,
                None => continue
            };
            selected.push(best_idx);
            is_selected[best_idx] = true;
            closest_distances = best_distances;
            potential = best_potential;
        }
        log::trace!("k-means++ selected {:?} (potential: {})", selected, potential);
        Ok(selected)
    }
}

/// Squared distance of every sample to the sample `idx`.
fn distances_to<T: Primitive>(dataset: &Dataset<T>, squared_norms: &[T], idx: usize) -> Vec<T> {
    let center = dataset.sample(idx);
    let center_norm = squared_norms[idx];
    dataset.samples.par_chunks_exact(dataset.sample_dims)
        .zip(squared_norms.par_iter().cloned())
        .map(|(s, s_norm)| squared_euclidean_with_norms(s, s_norm, center, center_norm))
        .collect()
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::helpers::testing::*;

    #[test]
    fn default_local_trials() {
        assert_eq!(KMeansPlusPlus::default_local_trials(1), 2);
        assert_eq!(KMeansPlusPlus::default_local_trials(4), 3);
        assert_eq!(KMeansPlusPlus::default_local_trials(8), 4);
    }

    #[test]
    fn selects_distinct_samples_spread_over_clusters() {
        let (dataset, labels) = four_corners::<f64>(7);
        let norms = dataset.squared_norms();
        let mut rnd = StdRng::seed_from_u64(1337);
        let selected = KMeansPlusPlus.select(&dataset, 4, &norms, None, &mut rnd).unwrap();

        assert_eq!(selected.len(), 4);
        let mut selected_clusters: Vec<usize> = selected.iter().map(|&i| labels[i]).collect();
        selected_clusters.sort_unstable();
        assert_eq!(selected_clusters, vec![0, 1, 2, 3]);
    }

    #[test]
    fn duplicate_samples() {
        // only two distinct points, but four selections requested
        let dataset = Dataset::new(vec![1.0f32, 1.0, 1.0, 1.0, 5.0, 5.0, 5.0, 5.0], 4, 2).unwrap();
        let norms = dataset.squared_norms();
        let mut rnd = StdRng::seed_from_u64(3);
        let mut selected = KMeansPlusPlus.select(&dataset, 4, &norms, Some(1), &mut rnd).unwrap();
        selected.sort_unstable();
        assert_eq!(selected, vec![0, 1, 2, 3]);
    }

    #[test]
    fn deterministic_for_seed() {
        let (dataset, _) = four_corners::<f32>(11);
        let norms = dataset.squared_norms();
        let a = KMeansPlusPlus.select(&dataset, 3, &norms, None, &mut StdRng::seed_from_u64(5)).unwrap();
        let b = KMeansPlusPlus.select(&dataset, 3, &norms, None, &mut StdRng::seed_from_u64(5)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn zero_local_trials() {
        let (dataset, _) = four_corners::<f64>(5);
        let norms = dataset.squared_norms();
        let zero = KMeansPlusPlus.select(&dataset, 4, &norms, Some(0), &mut StdRng::seed_from_u64(2)).unwrap();
        let one = KMeansPlusPlus.select(&dataset, 4, &norms, Some(1), &mut StdRng::seed_from_u64(2)).unwrap();
        assert_eq!(zero, one);
    }

    #[test]
    fn invalid_arguments() {
        let dataset = Dataset::new(vec![0.0f32, 1.0, 2.0], 3, 1).unwrap();
        let norms = dataset.squared_norms();
        let mut rnd = StdRng::seed_from_u64(0);
        assert_eq!(KMeansPlusPlus.select(&dataset, 0, &norms, None, &mut rnd), Err(InitError::InvalidClusterCount { k: 0, sample_cnt: 3 }));
        assert_eq!(KMeansPlusPlus.select(&dataset, 4, &norms, None, &mut rnd), Err(InitError::InvalidClusterCount { k: 4, sample_cnt: 3 }));
        assert_eq!(KMeansPlusPlus.select(&dataset, 2, &norms[..2], None, &mut rnd), Err(InitError::ShapeMismatch { expected: 3, actual: 2 }));
    }
}
