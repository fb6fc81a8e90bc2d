//! Genetic Algorithm for continuous objectives.
//!
//! A generational GA over fixed-length `f64` gene vectors. Each generation
//! replaces the whole population:
//!
//! 1. **Selection**: roulette wheel over L1-normalized fitness, one parent
//!    pair per individual
//! 2. **Crossover**: hypersphere blend `x + t·(y − x)`, `t ~ N(0.5, 0.25)`
//! 3. **Mutation**: additive `N(0, σ)` noise on a random subset of offspring
//!
//! The objective is maximized. Users plug in any [`Objective`], including
//! plain closures.
//!
//! # Key Types
//!
//! - [`GaConfig`]: Run parameters (population size, generations, mutation, init)
//! - [`GaRunner`]: Executes the evolutionary loop
//! - [`GaResult`]: Best fitness, best genes, and history of a run
//! - [`GenerationLog`]: In-memory audit trail with CSV persistence
//! - [`BatchRunner`]: Repeated independent runs with a save cadence
//!
//! # Submodules
//!
//! - [`operators`]: Hypersphere crossover and Gaussian mutation
//! - [`selection`]: Roulette wheel selection and [`MatingPool`]
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - Eiben & Smith (2015), *Introduction to Evolutionary Computing*, ch. 4

mod batch;
mod config;
pub mod operators;
mod population;
mod record;
mod runner;
pub mod selection;
mod types;

pub use batch::{BatchConfig, BatchRun, BatchRunner};
pub use config::{GaConfig, LogConfig, DEFAULT_LOG_PATH};
pub use population::{initialize_population, Population};
pub use record::{GenerationLog, GenerationRecord};
pub use runner::{GaResult, GaRun, GaRunner, GenerationObserver, NoObserver, RunState};
pub use selection::{roulette_selection, MatingPool};
pub use types::{evaluate_population, Objective, WithArity};
