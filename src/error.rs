use thiserror::Error;

/// Errors that can occur while computing initial means.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InitError {
    /// The given strategy name does not match any known initialization strategy.
    #[error("unsupported initialization strategy '{0}'")]
    UnsupportedStrategy(String),

    /// Requested cluster count is zero, or larger than the amount of samples.
    #[error("invalid cluster count {k} for a dataset with {sample_cnt} samples")]
    InvalidClusterCount { k: usize, sample_cnt: usize },

    /// The sample buffer does not match the given dataset shape.
    #[error("sample buffer holds {actual} values, but shape requires {expected}")]
    ShapeMismatch { expected: usize, actual: usize },

    /// Dataset without samples or without dimensions.
    #[error("dataset must contain at least one sample with at least one dimension")]
    EmptyDataset,

    /// A hard clusterer produced a label outside of `0..k`.
    #[error("hard clusterer assigned label {label} to sample {sample}, but only {k} clusters exist")]
    InvalidAssignment { sample: usize, label: usize, k: usize },

    /// A hard clusterer did not produce exactly one label per sample.
    #[error("hard clusterer returned {actual} labels for {expected} samples")]
    InvalidAssignmentCount { expected: usize, actual: usize },

    /// A seed selector did not return `expected` distinct, in-range sample indices.
    #[error("seed selector returned an invalid selection ({actual} valid distinct indices, expected {expected})")]
    InvalidSelection { expected: usize, actual: usize },
}
