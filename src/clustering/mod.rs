//! Collaborators of the initialization strategies.
//!
//! [`crate::Strategy::HardClustering`] and [`crate::Strategy::SeededDistance`] delegate the actual work to a
//! [`HardClusterer`] and a [`SeedSelector`] respectively. Both can be replaced through the
//! [`crate::InitConfigBuilder`]; the defaults are [`Lloyd`] and [`KMeansPlusPlus`].

mod kmeanplusplus;
mod lloyd;

pub use kmeanplusplus::KMeansPlusPlus;
pub use lloyd::Lloyd;

use crate::{memory::Primitive, Dataset, InitConfig, InitError};
use rand::RngCore;

/// Routine, that assigns every sample of a dataset to exactly one of k clusters.
pub trait HardClusterer<T: Primitive> {
    /// ## Arguments
    /// - **dataset**: Samples to cluster
    /// - **k**: Amount of clusters (`1 <= k <= sample_cnt`)
    /// - **max_iter**: Iteration limit, for iterative algorithms
    /// - **config**: Configuration of the running initialization (random generator, callbacks, ...)
    ///
    /// ## Returns
    /// One label in `0..k` per sample, or the error that stopped the clustering.
    fn assign(&self, dataset: &Dataset<T>, k: usize, max_iter: usize, config: &InitConfig<'_, T>) -> Result<Vec<usize>, InitError>;
}

/// Routine, that selects k samples of a dataset as cluster centers.
pub trait SeedSelector<T: Primitive> {
    /// ## Arguments
    /// - **dataset**: Samples to select from
    /// - **k**: Amount of samples to select (`1 <= k <= sample_cnt`)
    /// - **squared_norms**: Precomputed squared norm of every sample (see [`Dataset::squared_norms`])
    /// - **local_trials**: Candidates to evaluate per selection step (`None` lets the selector decide)
    /// - **rnd**: Random number generator to draw from
    ///
    /// ## Returns
    /// k distinct sample indices, in selection order.
    fn select(&self, dataset: &Dataset<T>, k: usize, squared_norms: &[T], local_trials: Option<usize>, rnd: &mut dyn RngCore) -> Result<Vec<usize>, InitError>;
}
