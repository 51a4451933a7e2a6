use crate::InitError;
use std::{fmt, str::FromStr};

/// Default iteration limit of [`Strategy::HardClustering`], when created from its name.
pub const DEFAULT_MAX_ITER: usize = 300;

/// Initialization strategies, that turn a dataset into the responsibility matrix, from which the initial
/// means are calculated.
///
/// Each strategy can be parsed from its canonical name, or from the short alias it is commonly known by:
///
/// | Strategy | Name | Alias |
/// |---|---|---|
/// | [`Strategy::HardClustering`] | `hard-clustering` | `kmeans` |
/// | [`Strategy::SeededDistance`] | `seeded-distance` | `k-means++` |
/// | [`Strategy::RandomPoints`] | `random-points` | `rand_data` |
/// | [`Strategy::UniformRandomWeights`] | `uniform-random-weights` | `random` |
///
/// ## Example
/// ```rust
/// use gmm_init::*;
///
/// let strategy: Strategy = "k-means++".parse().unwrap();
/// assert_eq!(strategy, Strategy::SeededDistance { local_trials: None });
/// assert!(matches!("bogus".parse::<Strategy>(), Err(InitError::UnsupportedStrategy(_))));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strategy {
    /// Run the configured [`crate::HardClusterer`] and assign each sample to exactly one cluster.
    /// Most expensive, but the resulting means are close to a converged solution.
    /// ## Fields
    /// - **max_iter**: Iteration limit handed to the clusterer
    HardClustering { max_iter: usize },
    /// Select k samples with the configured [`crate::SeedSelector`] (k-means++ by default), which favors samples
    /// far away from the already selected ones. The c-th selected sample belongs to cluster c.
    /// ## Fields
    /// - **local_trials**: Candidates drawn per selection step (`None` = `2 + ln(k)`). The default selector
    ///   treats `Some(0)` like `Some(1)`, since at least one candidate is needed per step.
    SeededDistance { local_trials: Option<usize> },
    /// Select k distinct samples uniformly at random. The c-th selected sample belongs to cluster c.
    RandomPoints,
    /// Give every sample a uniformly drawn weight per cluster, normalized so that each sample's weights sum to 1.
    UniformRandomWeights
}
impl Strategy {
    /// All strategies with their default parameters. The hard-clustering strategy comes first, so
    /// it can serve as the reference the others are compared against.
    pub fn all() -> [Strategy; 4] {
        [
            Strategy::HardClustering { max_iter: DEFAULT_MAX_ITER },
            Strategy::RandomPoints,
            Strategy::SeededDistance { local_trials: None },
            Strategy::UniformRandomWeights
        ]
    }

    /// Canonical name of this strategy.
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::HardClustering { .. } => "hard-clustering",
            Strategy::SeededDistance { .. } => "seeded-distance",
            Strategy::RandomPoints => "random-points",
            Strategy::UniformRandomWeights => "uniform-random-weights"
        }
    }

    /// Short alias of this strategy.
    pub fn alias(&self) -> &'static str {
        match self {
            Strategy::HardClustering { .. } => "kmeans",
            Strategy::SeededDistance { .. } => "k-means++",
            Strategy::RandomPoints => "rand_data",
            Strategy::UniformRandomWeights => "random"
        }
    }
}

impl FromStr for Strategy {
    type Err = InitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hard-clustering" | "kmeans" => Ok(Strategy::HardClustering { max_iter: DEFAULT_MAX_ITER }),
            "seeded-distance" | "k-means++" => Ok(Strategy::SeededDistance { local_trials: None }),
            "random-points" | "rand_data" => Ok(Strategy::RandomPoints),
            "uniform-random-weights" | "random" => Ok(Strategy::UniformRandomWeights),
            other => Err(InitError::UnsupportedStrategy(other.to_owned()))
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
