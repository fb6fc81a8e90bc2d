//! Repeated independent runs.
//!
//! [`BatchRunner`] repeats an experiment `runs` times. Every run gets its
//! own generator (seeded by the run-id-th draw from the batch seed) and its own
//! log, so runs are reproducible individually and never share mutable
//! state. With the `parallel` feature the runs execute on rayon's pool and
//! produce the same results as a sequential batch.

use super::config::GaConfig;
use super::record::GenerationLog;
use super::runner::{GaResult, GaRunner, NoObserver};
use super::types::Objective;
use crate::error::{GaError, Result};
use crate::random::{child_seeds, create_rng};
use std::path::PathBuf;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Batch parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchConfig {
    /// Number of independent runs.
    pub runs: usize,

    /// Persist the log of every `save_frequency`-th run (run ids 0, k, 2k, …).
    ///
    /// Only effective when logging is enabled in the run config.
    pub save_frequency: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            runs: 1,
            save_frequency: 100,
        }
    }
}

impl BatchConfig {
    pub fn with_runs(mut self, runs: usize) -> Self {
        self.runs = runs;
        self
    }

    pub fn with_save_frequency(mut self, k: usize) -> Self {
        self.save_frequency = k;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.runs == 0 {
            return Err(GaError::InvalidConfig("runs must be at least 1".into()));
        }
        if self.save_frequency == 0 {
            return Err(GaError::InvalidConfig("save_frequency must be at least 1".into()));
        }
        Ok(())
    }

    /// Whether run `run_id` persists its log.
    pub fn saves(&self, run_id: usize) -> bool {
        run_id % self.save_frequency == 0
    }
}

/// Outcome of one run in a batch.
#[derive(Debug, Clone)]
pub struct BatchRun {
    pub run_id: usize,

    /// Seed of this run's generator.
    pub seed: u64,

    pub result: GaResult,

    /// Where the generation log was written, if it was.
    pub log_path: Option<PathBuf>,
}

/// Executes a batch of independent GA runs.
pub struct BatchRunner;

impl BatchRunner {
    /// Runs the batch. The first failing run aborts the batch.
    pub fn run<O: Objective + ?Sized>(
        objective: &O,
        config: &GaConfig,
        batch: &BatchConfig,
    ) -> Result<Vec<BatchRun>> {
        batch.validate()?;
        config.validate_for(objective.dimensionality())?;

        let base_seed = config.seed.unwrap_or_else(rand::random);
        log::info!("starting batch of {} runs (base seed {base_seed})", batch.runs);
        let seeds = child_seeds(base_seed, batch.runs);

        #[cfg(feature = "parallel")]
        let runs = (0..batch.runs)
            .into_par_iter()
            .map(|run_id| run_one(objective, config, batch, run_id, seeds[run_id]))
            .collect::<Result<Vec<_>>>();

        #[cfg(not(feature = "parallel"))]
        let runs = (0..batch.runs)
            .map(|run_id| run_one(objective, config, batch, run_id, seeds[run_id]))
            .collect::<Result<Vec<_>>>();

        runs
    }
}

fn run_one<O: Objective + ?Sized>(
    objective: &O,
    config: &GaConfig,
    batch: &BatchConfig,
    run_id: usize,
    seed: u64,
) -> Result<BatchRun> {
    let mut rng = create_rng(seed);

    let (result, log_path) = if config.log.enabled && batch.saves(run_id) {
        let mut log = GenerationLog::new();
        let result = GaRunner::run_with_observer(objective, config, &mut rng, &mut log)?;
        let path = config.log.path_for_run(run_id);
        log.write_csv(&path)?;
        (result, Some(path))
    } else {
        let result = GaRunner::run_with_observer(objective, config, &mut rng, &mut NoObserver)?;
        (result, None)
    };

    log::debug!("run {run_id}: best fitness {:.6}", result.best_fitness);
    Ok(BatchRun {
        run_id,
        seed,
        result,
        log_path,
    })
}
