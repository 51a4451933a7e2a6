//! Synthetic datasets: isotropic gaussian blobs around a set of centers.

use crate::{memory::*, Dataset, InitError};
use rand::prelude::*;
use rand_distr::StandardNormal;

/// Draw **n_centers** centers of **dims** dimensions uniformly from the box `[low, high)` in every dimension.
pub fn random_centers<T: Primitive>(n_centers: usize, dims: usize, (low, high): (T, T), rnd: &mut dyn RngCore) -> Vec<Vec<T>> {
    (0..n_centers)
        .map(|_| (0..dims).map(|_| rnd.gen_range(low..high)).collect())
        .collect()
}

/// Generate gaussian blobs.
///
/// ## Arguments
/// - **samples_per_center**: Amount of samples drawn around every center
/// - **centers**: Centers of the blobs, all with the same amount of dimensions
/// - **cluster_std**: Standard deviation of the blobs (same in every dimension)
/// - **rnd**: Random number generator to draw from
///
/// ## Returns
/// The (shuffled) dataset, and the index of the center each sample was drawn around.
pub fn make_blobs<T: Primitive>(samples_per_center: usize, centers: &[Vec<T>], cluster_std: T, rnd: &mut dyn RngCore) -> Result<(Dataset<T>, Vec<usize>), InitError> {
    let dims = centers.first().map_or(0, |c| c.len());
    if let Some(c) = centers.iter().find(|c| c.len() != dims) {
        return Err(InitError::ShapeMismatch { expected: dims, actual: c.len() });
    }

    let mut order: Vec<usize> = (0..centers.len() * samples_per_center).collect();
    order.shuffle(&mut *rnd);

    let mut samples = vec![T::zero(); order.len() * dims];
    let mut labels = vec![0usize; order.len()];
    for (i, &slot) in order.iter().enumerate() {
        let center_id = i / samples_per_center;
        labels[slot] = center_id;
        samples.iter_mut().skip(slot * dims).take(dims)
            .zip(centers[center_id].iter().cloned())
            .for_each(|(sv, cv)| {
                let noise: f64 = rnd.sample(StandardNormal);
                *sv = cv + cluster_std * T::from_f64(noise);
            });
    }

    let dataset = Dataset::new(samples, order.len(), dims)?;
    Ok((dataset, labels))
}
