use crate::clustering::{HardClusterer, KMeansPlusPlus, Lloyd, SeedSelector};
use crate::responsibility::Responsibilities;
use crate::{distances, memory::*, AbortStrategy, InitError, Strategy};
use rand::prelude::*;
use rayon::prelude::*;
use std::cell::RefCell;

pub type ResponsibilitiesDoneCallbackFn<'a, T> = &'a dyn Fn(&Responsibilities<T>);
pub type IterationDoneCallbackFn<'a, T> = &'a dyn Fn(usize, T);

/// This is a structure holding the configuration of an initial-means calculation, such as the random number
/// generator to use, the collaborators used by the clustering based strategies, and a couple of callbacks,
/// that can be set to get status information from a running calculation.
///
/// For a more detailed information about all possible options, have a look at [`InitConfigBuilder`].
pub struct InitConfig<'a, T: Primitive> {
    /// Callback that is called, once a strategy produced its responsibility matrix (before the means are calculated)
    pub(crate) responsibilities_done: ResponsibilitiesDoneCallbackFn<'a, T>,
    /// Callback that is called after each iteration of the hard clusterer
    /// ## Arguments
    /// - **iteration_id**: Number of the finished iteration
    /// - **inertia**: Sum of squared sample-to-centroid distances after this iteration
    pub(crate) iteration_done: IterationDoneCallbackFn<'a, T>,
    /// Random number generator to use
    pub(crate) rnd: Box<RefCell<dyn RngCore>>,
    /// Abort-strategy of the hard clusterer
    pub(crate) abort_strategy: AbortStrategy<T>,
    /// Routine used by [`Strategy::HardClustering`]
    pub(crate) hard_clusterer: &'a dyn HardClusterer<T>,
    /// Routine used by [`Strategy::SeededDistance`] (and to seed the default hard clusterer)
    pub(crate) seed_selector: &'a dyn SeedSelector<T>
}
impl<'a, T: Primitive> Default for InitConfig<'a, T> {
    fn default() -> Self {
        Self {
            responsibilities_done: &|_| {},
            iteration_done: &|_, _| {},
            rnd: Box::new(RefCell::new(rand::thread_rng())),
            abort_strategy: AbortStrategy::default(),
            hard_clusterer: &Lloyd,
            seed_selector: &KMeansPlusPlus
        }
    }
}
impl<'a, T: Primitive> InitConfig<'a, T> {
    /// Use the [`InitConfigBuilder`] to build a [`InitConfig`] instance.
    pub fn build() -> InitConfigBuilder<'a, T> {
        InitConfigBuilder { config: InitConfig::default() }
    }
}
impl<'a, T: Primitive> std::fmt::Debug for InitConfig<'a, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InitConfig").field("abort_strategy", &self.abort_strategy).finish_non_exhaustive()
    }
}

pub struct InitConfigBuilder<'a, T: Primitive> {
    config: InitConfig<'a, T>
}
impl<'a, T: Primitive> InitConfigBuilder<'a, T> {
    /// Set the callback that should be called with the responsibility matrix, before the means are calculated from it.
    pub fn responsibilities_done(mut self, responsibilities_done: ResponsibilitiesDoneCallbackFn<'a, T>) -> Self {
        self.config.responsibilities_done = responsibilities_done; self
    }
    /// Set the callback that should be called after each iteration of the hard clusterer.
    pub fn iteration_done(mut self, iteration_done: IterationDoneCallbackFn<'a, T>) -> Self {
        self.config.iteration_done = iteration_done; self
    }
    /// Set the random number generator that should be used.
    /// Use a seeded generator for deterministically repeatable results.
    pub fn random_generator<R: RngCore + 'static>(mut self, rnd: R) -> Self {
        self.config.rnd = Box::new(RefCell::new(rnd)); self
    }
    /// Set the abort-strategy of the hard clusterer. For more information, see documentation of [`AbortStrategy`].
    /// ## Default
    /// [`AbortStrategy::NoImprovement`] `{ threshold: 0.0005 }`
    pub fn abort_strategy(mut self, abort_strategy: AbortStrategy<T>) -> Self {
        self.config.abort_strategy = abort_strategy; self
    }
    /// Replace the routine behind [`Strategy::HardClustering`].
    /// ## Default
    /// [`Lloyd`]
    pub fn hard_clusterer(mut self, hard_clusterer: &'a dyn HardClusterer<T>) -> Self {
        self.config.hard_clusterer = hard_clusterer; self
    }
    /// Replace the routine behind [`Strategy::SeededDistance`].
    /// ## Default
    /// [`KMeansPlusPlus`]
    pub fn seed_selector(mut self, seed_selector: &'a dyn SeedSelector<T>) -> Self {
        self.config.seed_selector = seed_selector; self
    }
    /// Return the internally built configuration structure.
    pub fn build(self) -> InitConfig<'a, T> { self.config }
}


/// Result of an initial-means calculation.
///
/// ## Fields
/// - **k**: The amount of clusters that were requested
/// - **means**: Initial cluster means [row-major] = [<mean0>,<mean1>,<mean2>,...]
/// - **cluster_weights**: Total responsibility of every cluster (the denominators, before epsilon was added)
#[derive(Clone, Debug, PartialEq)]
pub struct InitialMeans<T: Primitive> {
    pub k: usize,
    pub means: Vec<T>,
    pub cluster_weights: Vec<T>,

    pub(crate) sample_dims: usize
}
impl<T: Primitive> InitialMeans<T> {
    pub fn k(&self) -> usize { self.k }
    pub fn sample_dims(&self) -> usize { self.sample_dims }
    /// `(k, sample_dims)`
    pub fn shape(&self) -> (usize, usize) { (self.k, self.sample_dims) }

    /// Mean of the given cluster.
    pub fn mean(&self, cluster: usize) -> &[T] {
        &self.means[cluster * self.sample_dims..(cluster + 1) * self.sample_dims]
    }
    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        self.means.chunks_exact(self.sample_dims)
    }

    /// Label every sample of the dataset with its nearest mean.
    ///
    /// Fails with [`InitError::ShapeMismatch`], if the samples do not have the dimensions of the means.
    pub fn predict(&self, dataset: &Dataset<T>) -> Result<Vec<usize>, InitError> {
        if self.sample_dims != dataset.sample_dims {
            return Err(InitError::ShapeMismatch { expected: self.sample_dims, actual: dataset.sample_dims });
        }
        let labels: Vec<usize> = dataset.samples.par_chunks_exact(dataset.sample_dims)
            .map(|s| {
                self.rows()
                    .map(|m| distances::squared_euclidean(s, m))
                    .enumerate()
                    .fold((0, T::infinity()), |best, (mi, d)| if d < best.1 { (mi, d) } else { best })
                    .0
            })
            .collect();
        Ok(labels)
    }
}


/// Entrypoint of this crate's API-Surface.
///
/// Create an instance of this struct, giving the samples you want to operate on. The primitive type
/// of the passed samples array will be the type used internaly for all calculations, as well as the result
/// as stored in the returned [`InitialMeans`] structure. A dataset is never mutated after construction, so
/// it can be shared between multiple (parallel) calculations.
///
/// ## Supported initialization strategies
/// See [`Strategy`].
#[derive(Clone, Debug, PartialEq)]
pub struct Dataset<T: Primitive> {
    pub(crate) sample_cnt: usize,
    pub(crate) sample_dims: usize,
    pub(crate) samples: Vec<T>
}
impl<T: Primitive> Dataset<T> {
    /// Create a new instance of the [`Dataset`] structure.
    ///
    /// ## Arguments
    /// - **samples**: Vector of samples [row-major] = [<sample0>,<sample1>,<sample2>,...]
    /// - **sample_cnt**: Amount of samples, contained in the passed **samples** vector
    /// - **sample_dims**: Amount of dimensions each sample from the **sample** vector has
    pub fn new(samples: Vec<T>, sample_cnt: usize, sample_dims: usize) -> Result<Self, InitError> {
        if sample_cnt == 0 || sample_dims == 0 {
            return Err(InitError::EmptyDataset);
        }
        if samples.len() != sample_cnt * sample_dims {
            return Err(InitError::ShapeMismatch { expected: sample_cnt * sample_dims, actual: samples.len() });
        }
        Ok(Self { sample_cnt, sample_dims, samples })
    }

    /// Create a dataset from fixed-size points, e.g. `[[x0, y0], [x1, y1], ...]`.
    pub fn from_points<const D: usize>(points: &[[T; D]]) -> Result<Self, InitError> {
        Self::new(points.iter().flat_map(|p| p.iter().cloned()).collect(), points.len(), D)
    }

    pub fn sample_cnt(&self) -> usize { self.sample_cnt }
    pub fn sample_dims(&self) -> usize { self.sample_dims }

    pub fn sample(&self, idx: usize) -> &[T] {
        &self.samples[idx * self.sample_dims..(idx + 1) * self.sample_dims]
    }
    pub fn samples(&self) -> impl Iterator<Item = &[T]> {
        self.samples.chunks_exact(self.sample_dims)
    }

    /// Squared euclidean norm of every sample.
    pub fn squared_norms(&self) -> Vec<T> {
        self.samples.par_chunks_exact(self.sample_dims)
            .map(distances::squared_norm)
            .collect()
    }

    /// Fails with [`InitError::InvalidClusterCount`], unless `1 <= k <= sample_cnt`.
    pub(crate) fn check_cluster_count(&self, k: usize) -> Result<(), InitError> {
        if k == 0 || k > self.sample_cnt {
            return Err(InitError::InvalidClusterCount { k, sample_cnt: self.sample_cnt });
        }
        Ok(())
    }

    /// Calculate the responsibility matrix of the given strategy, without turning it into means.
    ///
    /// ## Arguments
    /// - **k**: Amount of clusters (`1 <= k <= sample_cnt`)
    /// - **strategy**: Initialization strategy to use
    /// - **config**: [`InitConfig`] instance, containing the random generator, collaborators and callbacks
    pub fn responsibilities(&self, k: usize, strategy: &Strategy, config: &InitConfig<'_, T>) -> Result<Responsibilities<T>, InitError> {
        self.check_cluster_count(k)?;
        let res = match *strategy {
            Strategy::HardClustering { max_iter } => crate::inits::hardclustering::calculate(self, k, max_iter, config)?,
            Strategy::SeededDistance { local_trials } => crate::inits::seededdistance::calculate(self, k, local_trials, config)?,
            Strategy::RandomPoints => crate::inits::randompoints::calculate(self, k, config)?,
            Strategy::UniformRandomWeights => crate::inits::uniformweights::calculate(self, k, config)
        };
        debug_assert_eq!((res.sample_cnt(), res.k()), (self.sample_cnt, k));
        Ok(res)
    }

    /// Calculate the initial means of **k** clusters, using the given initialization strategy.
    ///
    /// ## Arguments
    /// - **k**: Amount of clusters (`1 <= k <= sample_cnt`)
    /// - **strategy**: Initialization strategy to use
    /// - **config**: [`InitConfig`] instance, containing the random generator, collaborators and callbacks
    ///
    /// ## Returns
    /// Instance of [`InitialMeans`] with shape `(k, sample_dims)`.
    ///
    /// ## Example
    /// ```rust
    /// use gmm_init::*;
    /// use rand::prelude::*;
    ///
    /// let dataset = Dataset::from_points(&[[0.0f64, 0.0], [0.5, 0.0], [10.0, 10.0], [10.5, 10.0]]).unwrap();
    /// let conf = InitConfig::build().random_generator(StdRng::seed_from_u64(42)).build();
    /// let means = dataset.initial_means(2, &Strategy::SeededDistance { local_trials: None }, &conf).unwrap();
    /// assert_eq!(means.shape(), (2, 2));
    /// ```
    pub fn initial_means(&self, k: usize, strategy: &Strategy, config: &InitConfig<'_, T>) -> Result<InitialMeans<T>, InitError> {
        log::debug!("initializing {} means with strategy '{}' ({} samples, {} dims)", k, strategy, self.sample_cnt, self.sample_dims);
        let res = self.responsibilities(k, strategy, config)?;
        (config.responsibilities_done)(&res);
        let means = res.weighted_means(self)?;
        log::debug!("strategy '{}' finished, cluster weights: {:?}", strategy, means.cluster_weights);
        Ok(means)
    }
}


/// Compute the initial means of **cluster_count** clusters, for the strategy with the given name.
///
/// This is a shorthand for parsing the [`Strategy`], building an [`InitConfig`] with a seeded [`StdRng`]
/// (or the thread-local generator, when no seed is given) and calling [`Dataset::initial_means`].
///
/// ## Errors
/// - [`InitError::UnsupportedStrategy`] if **strategy** is not a known strategy name or alias
/// - [`InitError::InvalidClusterCount`] if **cluster_count** is 0 or larger than the amount of samples
pub fn compute_initial_means<T: Primitive>(dataset: &Dataset<T>, strategy: &str, cluster_count: usize, rng_seed: Option<u64>) -> Result<InitialMeans<T>, InitError> {
    let strategy: Strategy = strategy.parse()?;
    let config = match rng_seed {
        Some(seed) => InitConfig::build().random_generator(StdRng::seed_from_u64(seed)).build(),
        None => InitConfig::default()
    };
    dataset.initial_means(cluster_count, &strategy, &config)
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::helpers::testing::*;
    use std::cell::Cell;

    #[test]
    fn dataset_construction() {
        assert_eq!(Dataset::new(vec![1.0f64, 2.0, 3.0], 2, 2), Err(InitError::ShapeMismatch { expected: 4, actual: 3 }));
        assert_eq!(Dataset::<f32>::new(vec![], 0, 2), Err(InitError::EmptyDataset));
        assert_eq!(Dataset::<f32>::new(vec![], 3, 0), Err(InitError::EmptyDataset));

        let dataset = Dataset::from_points(&[[1.0f32, 2.0], [3.0, 4.0]]).unwrap();
        assert_eq!(dataset.sample_cnt(), 2);
        assert_eq!(dataset.sample_dims(), 2);
        assert_eq!(dataset.sample(1), &[3.0, 4.0]);
        assert_eq!(dataset.squared_norms(), vec![5.0, 25.0]);
    }

    #[test] fn shape_for_all_strategies_f32() { shape_for_all_strategies::<f32>(); }
    #[test] fn shape_for_all_strategies_f64() { shape_for_all_strategies::<f64>(); }

    fn shape_for_all_strategies<T: Primitive>() {
        let (dataset, _) = four_corners::<T>(17);
        for strategy in Strategy::all().iter() {
            for k in [1, 2, 4, 7].iter().cloned() {
                let means = compute_initial_means(&dataset, strategy.alias(), k, Some(3)).unwrap();
                assert_eq!(means.shape(), (k, 2));
                assert_eq!(means.means.len(), k * 2);
                assert_eq!(means.rows().count(), k);
                assert!(means.means.iter().all(|v| v.is_finite()));
            }
        }
    }

    #[test]
    fn deterministic_for_same_seed() {
        let (dataset, _) = four_corners::<f64>(23);
        for strategy in Strategy::all().iter() {
            let a = compute_initial_means(&dataset, strategy.name(), 4, Some(1234)).unwrap();
            let b = compute_initial_means(&dataset, strategy.name(), 4, Some(1234)).unwrap();
            assert_eq!(a, b, "strategy {} is not deterministic", strategy);
        }
    }

    #[test]
    fn unsupported_strategy() {
        let (dataset, _) = four_corners::<f64>(1);
        assert_eq!(
            compute_initial_means(&dataset, "bogus", 4, Some(1)),
            Err(InitError::UnsupportedStrategy("bogus".to_owned()))
        );
    }

    #[test]
    fn invalid_cluster_count() {
        let dataset = Dataset::from_points(&[[0.0f64, 0.0], [1.0, 1.0], [2.0, 2.0]]).unwrap();
        for strategy in Strategy::all().iter() {
            assert_eq!(compute_initial_means(&dataset, strategy.name(), 4, Some(1)),
                Err(InitError::InvalidClusterCount { k: 4, sample_cnt: 3 }));
            assert_eq!(compute_initial_means(&dataset, strategy.name(), 0, Some(1)),
                Err(InitError::InvalidClusterCount { k: 0, sample_cnt: 3 }));
        }
    }

    #[test]
    fn hard_clustering_finds_corners() {
        let (dataset, _) = four_corners::<f64>(42);
        let means = compute_initial_means(&dataset, "kmeans", 4, Some(0)).unwrap();
        // jitter is 0.1, means of 50 samples are far closer than that
        assert_means_match_centers(&CORNERS, &means, 0.1);
        assert_eq!(means.cluster_weights, vec![50.0; 4]);
    }

    #[test]
    fn random_points_are_the_selected_samples() {
        let (dataset, _) = four_corners::<f64>(8);
        let means = compute_initial_means(&dataset, "rand_data", 4, Some(42)).unwrap();
        let selected = rand::seq::index::sample(&mut StdRng::seed_from_u64(42), dataset.sample_cnt(), 4).into_vec();
        for (cluster, &sample) in selected.iter().enumerate() {
            for (mv, sv) in means.mean(cluster).iter().zip(dataset.sample(sample).iter()) {
                assert_approx_eq!(*mv, *sv, 1e-12);
            }
        }
    }

    #[test]
    fn responsibilities_done_sees_the_matrix() {
        let (dataset, _) = four_corners::<f64>(8);
        let seen = Cell::new((0, 0));
        let on_res = |res: &Responsibilities<f64>| seen.set((res.sample_cnt(), res.k()));
        let conf = InitConfig::<f64>::build()
            .random_generator(StdRng::seed_from_u64(5))
            .responsibilities_done(&on_res)
            .build();
        dataset.initial_means(3, &Strategy::UniformRandomWeights, &conf).unwrap();
        assert_eq!(seen.get(), (200, 3));
    }

    #[test]
    fn predict_nearest_mean() {
        let (dataset, labels) = four_corners::<f64>(30);
        let means = compute_initial_means(&dataset, "hard-clustering", 4, Some(30)).unwrap();
        let predicted = means.predict(&dataset).unwrap();
        let mut mapping = [usize::MAX; 4];
        for (&should, &actual) in labels.iter().zip(predicted.iter()) {
            if mapping[should] == usize::MAX {
                mapping[should] = actual;
            }
            assert_eq!(mapping[should], actual);
        }

        let flat = Dataset::new(vec![0.0f64, 1.0, 2.0], 3, 1).unwrap();
        assert_eq!(means.predict(&flat), Err(InitError::ShapeMismatch { expected: 2, actual: 1 }));
    }

    #[test]
    fn without_seed() {
        let (dataset, _) = four_corners::<f32>(3);
        let means = compute_initial_means(&dataset, "random", 2, None).unwrap();
        assert_eq!(means.shape(), (2, 2));
    }
}
