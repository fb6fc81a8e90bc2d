//! Generational evolutionary optimizer for continuous objectives.
//!
//! Searches a real-valued landscape with a population of candidate
//! solutions evolved through fitness-proportional selection, hypersphere
//! crossover, and Gaussian mutation:
//!
//! - **[`ga`]**: the optimization loop, its operators, run configuration,
//!   generation logging, and batch execution.
//! - **[`objectives`]**: reference objectives (two-peak saddle, inverted
//!   sphere) for experiments and benchmarks.
//! - **[`random`]**: run-scoped random streams. No operator touches a
//!   global generator, so seeded runs are reproducible and concurrent runs
//!   are independent.
//!
//! # Example
//!
//! ```
//! use u_evolve::ga::{GaConfig, GaRunner};
//! use u_evolve::objectives::Saddle;
//!
//! let config = GaConfig::default()
//!     .with_max_generations(200)
//!     .with_seed(42);
//! let result = GaRunner::run(&Saddle::default().with_dimensionality(2), &config).unwrap();
//! assert!(result.best_fitness > 0.0);
//! ```

pub mod error;
pub mod ga;
pub mod objectives;
pub mod random;

pub use error::{GaError, Result};
