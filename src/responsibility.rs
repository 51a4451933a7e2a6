use crate::{memory::*, Dataset, InitError, InitialMeans};

/// Responsibility matrix: how strongly each sample belongs to each of the k clusters.
///
/// Stored row-major, one row per sample: `[<sample0: r0,r1,..,rk>, <sample1: ...>, ...]`.
/// All entries are non-negative. Only the matrices produced by [`crate::Strategy::UniformRandomWeights`]
/// have rows summing up to 1, all other strategies produce one-hot columns or rows.
#[derive(Clone, Debug, PartialEq)]
pub struct Responsibilities<T: Primitive> {
    pub(crate) sample_cnt: usize,
    pub(crate) k: usize,
    pub(crate) values: Vec<T>
}
impl<T: Primitive> Responsibilities<T> {
    /// All-zero responsibility matrix.
    pub fn zeros(sample_cnt: usize, k: usize) -> Self {
        Self { sample_cnt, k, values: vec![T::zero(); sample_cnt * k] }
    }

    /// Hard assignment: sample `i` gets responsibility 1 for cluster `labels[i]` and 0 everywhere else.
    pub fn from_labels(labels: &[usize], k: usize) -> Result<Self, InitError> {
        let mut res = Self::zeros(labels.len(), k);
        for (sample, &label) in labels.iter().enumerate() {
            if label >= k {
                return Err(InitError::InvalidAssignment { sample, label, k });
            }
            res.set(sample, label, T::one());
        }
        Ok(res)
    }

    /// Selection: the c-th selected sample gets responsibility 1 for cluster c. All other entries are 0.
    ///
    /// The selection has to consist of exactly k distinct indices into `0..sample_cnt`.
    pub fn from_selection(selection: &[usize], sample_cnt: usize, k: usize) -> Result<Self, InitError> {
        check_selection(selection, sample_cnt, k)?;
        let mut res = Self::zeros(sample_cnt, k);
        selection.iter().cloned().enumerate()
            .for_each(|(cluster, sample)| res.set(sample, cluster, T::one()));
        Ok(res)
    }

    pub fn sample_cnt(&self) -> usize { self.sample_cnt }
    pub fn k(&self) -> usize { self.k }

    #[inline(always)]
    pub fn get(&self, sample: usize, cluster: usize) -> T {
        self.values[sample * self.k + cluster]
    }
    #[inline(always)]
    pub(crate) fn set(&mut self, sample: usize, cluster: usize, value: T) {
        self.values[sample * self.k + cluster] = value;
    }

    /// Responsibilities of one sample for all k clusters.
    pub fn row(&self, sample: usize) -> &[T] {
        &self.values[sample * self.k..(sample + 1) * self.k]
    }
    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        self.values.chunks_exact(self.k)
    }

    /// Total responsibility per cluster (column sums).
    pub fn cluster_weights(&self) -> Vec<T> {
        let mut weights = vec![T::zero(); self.k];
        self.rows().for_each(|row| {
            weights.iter_mut().zip(row.iter()).for_each(|(w, r)| *w += r);
        });
        weights
    }

    /// Responsibility-weighted mean of the dataset for every cluster:
    /// `mean_k = sum_i(r[i,k] * x_i) / (sum_i(r[i,k]) + eps)`
    ///
    /// `eps` ([`Primitive::responsibility_epsilon`]) keeps the means finite for clusters without any responsibility
    /// (those end up at the origin).
    ///
    /// Fails with [`InitError::ShapeMismatch`], if the matrix does not have one row per sample of the dataset.
    pub fn weighted_means(&self, dataset: &Dataset<T>) -> Result<InitialMeans<T>, InitError> {
        if self.sample_cnt != dataset.sample_cnt {
            return Err(InitError::ShapeMismatch { expected: dataset.sample_cnt, actual: self.sample_cnt });
        }
        let dims = dataset.sample_dims;
        let mut means = vec![T::zero(); self.k * dims];

        // Sum all samples into their clusters, scaled by the responsibility
        dataset.samples().zip(self.rows()).for_each(|(sample, row)| {
            row.iter().cloned().enumerate()
                .filter(|(_, r)| *r != T::zero())
                .for_each(|(cluster, r)| {
                    means.iter_mut().skip(cluster * dims).take(dims)
                        .zip(sample.iter().cloned())
                        .for_each(|(mv, sv)| *mv += r * sv);
                });
        });

        let cluster_weights = self.cluster_weights();
        let eps = T::responsibility_epsilon();
        means.chunks_exact_mut(dims)
            .zip(cluster_weights.iter().cloned())
            .for_each(|(mean, weight)| {
                let denominator = weight + eps;
                mean.iter_mut().for_each(|mv| *mv /= denominator);
            });

        Ok(InitialMeans { k: self.k, sample_dims: dims, means, cluster_weights })
    }
}

/// A selection has to consist of exactly k distinct indices into `0..sample_cnt`.
/// `actual` of the error is the length of the valid prefix.
pub(crate) fn check_selection(selection: &[usize], sample_cnt: usize, k: usize) -> Result<(), InitError> {
    let mut taken = vec![false; sample_cnt];
    let valid = selection.iter().take_while(|&&idx| {
        let ok = idx < sample_cnt && !taken[idx];
        if ok { taken[idx] = true; }
        ok
    }).count();
    if valid != k || selection.len() != k {
        return Err(InitError::InvalidSelection { expected: k, actual: valid });
    }
    Ok(())
}
