//! # gmm_init - API documentation
//!
//! gmm_init is a small rust library that calculates the initial means, used to warm-start the fitting of a
//! gaussian mixture model (GMM).
//!
//! ## How it works
//! Every initialization strategy first produces a responsibility matrix, which describes how strongly each
//! sample belongs to each of the k clusters. The initial means are then calculated as the
//! responsibility-weighted means of the samples:
//! `mean_k = sum_i(r[i,k] * x_i) / (sum_i(r[i,k]) + eps)`
//!
//! ## Supported initialization strategies
//! - Hard clustering (`kmeans`): k-Means clustering, one-hot responsibilities
//! - Seeded distance (`k-means++`): k samples selected with k-Means++, one-hot responsibilities
//! - Random points (`rand_data`): k samples selected uniformly, one-hot responsibilities
//! - Uniform random weights (`random`): random soft responsibilities, normalized per sample
//!
//! For details, see [`Strategy`].
//!
//! ## Supported primitive types
//! - [`f32`]
//! - [`f64`]
//!
//! ## Example
//! ```rust
//! use gmm_init::*;
//! use rand::prelude::*;
//!
//! fn main() {
//!     let mut rnd = StdRng::seed_from_u64(0);
//!     let centers = datasets::random_centers(4, 2, (-10.0f64, 10.0), &mut rnd);
//!     let (dataset, _) = datasets::make_blobs(1000, &centers, 0.6, &mut rnd).unwrap();
//!
//!     for strategy in ["kmeans", "rand_data", "k-means++", "random"].iter() {
//!         let means = compute_initial_means(&dataset, strategy, 4, Some(1234)).unwrap();
//!         println!("{}: {:?}", strategy, means.means);
//!     }
//! }
//! ```
//!
//! ## Example (using the configuration and status callbacks)
//! ```rust
//! use gmm_init::*;
//! use rand::prelude::*;
//!
//! fn main() {
//!     let mut rnd = StdRng::seed_from_u64(0);
//!     let centers = datasets::random_centers(4, 2, (-10.0f64, 10.0), &mut rnd);
//!     let (dataset, _) = datasets::make_blobs(1000, &centers, 0.6, &mut rnd).unwrap();
//!
//!     let conf = InitConfig::<f64>::build()
//!         .random_generator(StdRng::seed_from_u64(1234))
//!         .abort_strategy(AbortStrategy::NoImprovement { threshold: 1e-9 })
//!         .iteration_done(&|nr, inertia| println!("Iteration {} - Inertia: {:.2}", nr, inertia))
//!         .responsibilities_done(&|res| println!("Cluster weights: {:?}", res.cluster_weights()))
//!         .build();
//!
//!     let means = dataset.initial_means(4, &Strategy::HardClustering { max_iter: 300 }, &conf).unwrap();
//!     println!("Means: {:?}", means.means);
//! }
//! ```
//!
//! ## Short API-Overview / Description
//! Entry-point of the library is the [`Dataset`] struct, which takes ownership of the samples. Calling
//! [`Dataset::initial_means`] does not mutate it, so multiple calculations can run in parallel; each of them
//! gets its own random number generator through its [`InitConfig`]. [`compute_initial_means`] is a shorthand,
//! that takes the strategy by name and an optional seed.
//!
//! The clustering based strategies delegate to a [`HardClusterer`] and a [`SeedSelector`], which can be
//! replaced through the [`InitConfigBuilder`].

#[macro_use] mod helpers;
mod memory;
mod error;
mod api;
mod strategy;
mod responsibility;
mod distances;
mod inits;
mod clustering;
mod abort_strategy;
pub mod datasets;

pub use abort_strategy::AbortStrategy;
pub use api::{compute_initial_means, Dataset, InitConfig, InitConfigBuilder, InitialMeans};
pub use clustering::{HardClusterer, KMeansPlusPlus, Lloyd, SeedSelector};
pub use distances::{squared_euclidean, squared_norm};
pub use error::InitError;
pub use memory::Primitive;
pub use responsibility::Responsibilities;
pub use strategy::{Strategy, DEFAULT_MAX_ITER};
