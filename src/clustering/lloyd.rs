use crate::clustering::HardClusterer;
use crate::distances::squared_euclidean;
use crate::responsibility::check_selection;
use crate::{memory::*, Dataset, InitConfig, InitError};
use rayon::prelude::*;
use std::ops::DerefMut;

/// Plain k-Means clustering (Lloyd's algorithm).
///
/// The centroids are seeded with the [`crate::SeedSelector`] of the running configuration. Afterwards, the
/// clusterer alternates between assigning every sample to its nearest centroid, and moving every centroid
/// into the mean of its assigned samples. This is repeated, until the configured [`crate::AbortStrategy`]
/// decides that the inertia does not improve enough anymore, or **max_iter** is reached.
///
/// Each finished iteration is reported to the `iteration_done` callback of the configuration.
#[derive(Clone, Copy, Debug, Default)]
pub struct Lloyd;

/// Working state of one Lloyd run.
struct LloydState<T: Primitive> {
    k: usize,
    centroids: Vec<T>,
    centroid_frequency: Vec<usize>,
    assignments: Vec<usize>,
    centroid_distances: Vec<T>
}
impl<T: Primitive> LloydState<T> {
    fn new(dataset: &Dataset<T>, k: usize, seeds: &[usize]) -> Self {
        let centroids = seeds.iter().flat_map(|&s| dataset.sample(s).iter().cloned()).collect();
        Self {
            k,
            centroids,
            centroid_frequency: vec![0usize; k],
            assignments: vec![0usize; dataset.sample_cnt],
            centroid_distances: vec![T::infinity(); dataset.sample_cnt]
        }
    }

    /// Assign every sample to its nearest centroid. Returns the new inertia.
    fn update_cluster_assignments(&mut self, dataset: &Dataset<T>) -> T {
        let centroids = &self.centroids;
        dataset.samples.par_chunks_exact(dataset.sample_dims)
            .zip(self.assignments.par_iter_mut())
            .zip(self.centroid_distances.par_iter_mut())
            .for_each(|((s, assignment), centroid_dist)| {
                let (best_idx, best_dist) = centroids.chunks_exact(dataset.sample_dims)
                    .map(|c| squared_euclidean(s, c))
                    .enumerate()
                    .fold((0, T::infinity()), |best, (ci, d)| if d < best.1 { (ci, d) } else { best });
                *assignment = best_idx;
                *centroid_dist = best_dist;
            });
        // sequential sum keeps the result independent of the thread count
        self.centroid_distances.iter().cloned().sum()
    }

    /// Count samples per centroid. Returns the amount of centroids with at least one sample.
    fn update_cluster_frequencies(&mut self) -> usize {
        self.centroid_frequency.iter_mut().for_each(|v| *v = 0);
        let mut used_centroids_cnt = 0;
        for &centroid_id in self.assignments.iter() {
            if self.centroid_frequency[centroid_id] == 0 {
                used_centroids_cnt += 1;
            }
            self.centroid_frequency[centroid_id] += 1;
        }
        used_centroids_cnt
    }

    /// Move every centroid into the mean of its samples.
    /// Empty clusters take over the sample farthest away from its centroid, whose cluster has more than one sample.
    fn update_centroids(&mut self, dataset: &Dataset<T>) {
        let dims = dataset.sample_dims;
        if self.update_cluster_frequencies() != self.k {
            let mut distance_sorted_samples: Vec<usize> = (0..dataset.sample_cnt).collect();
            let distances = &self.centroid_distances;
            distance_sorted_samples.sort_by(|&i1, &i2| distances[i1].partial_cmp(&distances[i2]).unwrap_or(std::cmp::Ordering::Equal));

            for empty_id in 0..self.k {
                if self.centroid_frequency[empty_id] != 0 {
                    continue;
                }
                let donor = distance_sorted_samples.iter().rev().cloned()
                    .find(|&s| self.centroid_frequency[self.assignments[s]] > 1);
                if let Some(sample_id) = donor {
                    let prev_centroid_id = self.assignments[sample_id];
                    self.centroid_frequency[prev_centroid_id] -= 1;
                    self.centroid_frequency[empty_id] += 1;
                    self.assignments[sample_id] = empty_id;
                    self.centroid_distances[sample_id] = T::zero();
                }
            }
        }

        let mut sums = vec![T::zero(); self.k * dims];
        dataset.samples().zip(self.assignments.iter().cloned())
            .for_each(|(s, centroid_id)| {
                sums.iter_mut().skip(centroid_id * dims).take(dims)
                    .zip(s.iter())
                    .for_each(|(cv, sv)| *cv += sv);
            });
        self.centroids.chunks_exact_mut(dims)
            .zip(sums.chunks_exact(dims))
            .zip(self.centroid_frequency.iter().cloned())
            .filter(|(_, freq)| *freq > 0)
            .for_each(|((c, sum), freq)| {
                let freq = T::from_usize(freq);
                c.iter_mut().zip(sum.iter().cloned()).for_each(|(cv, sv)| *cv = sv / freq);
            });
    }
}

impl<T: Primitive> HardClusterer<T> for Lloyd {
    fn assign(&self, dataset: &Dataset<T>, k: usize, max_iter: usize, config: &InitConfig<'_, T>) -> Result<Vec<usize>, InitError> {
        dataset.check_cluster_count(k)?;

        let squared_norms = dataset.squared_norms();
        let seeds = config.seed_selector.select(dataset, k, &squared_norms, None, config.rnd.borrow_mut().deref_mut())?;
        check_selection(&seeds, dataset.sample_cnt, k)?;
        let mut state = LloydState::new(dataset, k, &seeds);
        let mut abort_strategy = config.abort_strategy.create_logic();

        for i in 1..=max_iter {
            let inertia = state.update_cluster_assignments(dataset);
            state.update_centroids(dataset);

            log::trace!("lloyd iteration {} - inertia: {:.4}", i, inertia);
            (config.iteration_done)(i, inertia);
            if !abort_strategy.next(inertia) {
                log::debug!("lloyd converged after {} iterations (inertia: {:.4})", i, inertia);
                break;
            }
        }

        state.update_cluster_assignments(dataset);
        Ok(state.assignments)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::helpers::testing::*;
    use rand::prelude::*;
    use std::cell::Cell;

    #[test]
    fn separates_four_corners() {
        let (dataset, labels) = four_corners::<f64>(21);
        let conf = InitConfig::build().random_generator(StdRng::seed_from_u64(1)).build();
        let assignments = Lloyd.assign(&dataset, 4, 100, &conf).unwrap();

        // same partition as the generating labels (up to renumbering)
        let mut mapping = [usize::MAX; 4];
        for (&should, &actual) in labels.iter().zip(assignments.iter()) {
            if mapping[should] == usize::MAX {
                mapping[should] = actual;
            }
            assert_eq!(mapping[should], actual);
        }
        let mut used = mapping.to_vec();
        used.sort_unstable();
        assert_eq!(used, vec![0, 1, 2, 3]);
    }

    #[test]
    fn reports_iterations() {
        let (dataset, _) = four_corners::<f32>(2);
        let iterations = Cell::new(0);
        let last_inertia = Cell::new(f32::INFINITY);
        let on_iteration = |nr: usize, inertia: f32| {
            iterations.set(nr);
            last_inertia.set(inertia);
        };
        let conf = InitConfig::<f32>::build()
            .random_generator(StdRng::seed_from_u64(9))
            .iteration_done(&on_iteration)
            .build();
        Lloyd.assign(&dataset, 4, 50, &conf).unwrap();
        assert!(iterations.get() >= 2 && iterations.get() <= 50);
        assert!(last_inertia.get().is_finite());
    }

    #[test]
    fn max_iter_limits_iterations() {
        let (dataset, _) = four_corners::<f64>(4);
        let iterations = Cell::new(0);
        let on_iteration = |nr: usize, _: f64| iterations.set(nr);
        let conf = InitConfig::<f64>::build()
            .random_generator(StdRng::seed_from_u64(9))
            .abort_strategy(crate::AbortStrategy::NoImprovementForXIterations { x: 1000, threshold: 0.0, abort_on_negative: false })
            .iteration_done(&on_iteration)
            .build();
        Lloyd.assign(&dataset, 4, 3, &conf).unwrap();
        assert_eq!(iterations.get(), 3);
    }

    #[test]
    fn invalid_cluster_count() {
        let dataset = Dataset::new(vec![0.0f64, 1.0, 2.0], 3, 1).unwrap();
        let conf = InitConfig::<f64>::build().random_generator(StdRng::seed_from_u64(1)).build();
        assert_eq!(Lloyd.assign(&dataset, 0, 10, &conf), Err(InitError::InvalidClusterCount { k: 0, sample_cnt: 3 }));
        assert_eq!(Lloyd.assign(&dataset, 4, 10, &conf), Err(InitError::InvalidClusterCount { k: 4, sample_cnt: 3 }));
    }

    #[test]
    fn empty_cluster_handling() {
        let dataset = Dataset::new(vec![1.0, 0.0, 2.0, 0.0, 3.0, 0.0], 3, 2).unwrap();
        let mut state = LloydState::new(&dataset, 2, &[1, 0]);
        // move second centroid far away, so it ends up empty
        state.centroids[2] = 1337.0;
        state.update_cluster_assignments(&dataset);
        assert_eq!(&state.assignments, &[0, 0, 0]);
        state.update_centroids(&dataset);

        assert_eq!(&state.centroid_frequency, &[2, 1]);
        assert_eq!(&state.assignments[..2], &[0, 0]);
        assert_eq!(state.assignments[2], 1);
        assert_eq!(&state.centroids, &[1.5, 0.0, 3.0, 0.0]);
    }
}
