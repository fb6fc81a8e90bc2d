//! Fitness-proportional (roulette wheel) selection.
//!
//! Fitness values are L1-normalized into selection probabilities and
//! sampled through their cumulative distribution. Selection is with
//! replacement, so a strong individual can appear in many pairs.
//!
//! # References
//!
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and
//!   Machine Learning*, ch. 1
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"

use super::population::Population;
use super::types::{evaluate_population, Objective};
use crate::error::{GaError, Result};
use rand::Rng;

/// Parent pairs chosen for crossover, as indices into the population they
/// were drawn from. Each pair produces exactly one offspring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatingPool {
    pairs: Vec<(usize, usize)>,
}

impl MatingPool {
    pub fn new(pairs: Vec<(usize, usize)>) -> Self {
        Self { pairs }
    }

    /// Number of pairs (= number of offspring crossover will produce).
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn pairs(&self) -> &[(usize, usize)] {
        &self.pairs
    }

    pub fn iter(&self) -> std::slice::Iter<'_, (usize, usize)> {
        self.pairs.iter()
    }
}

/// Checks that `fitness` defines a probability distribution and returns
/// its cumulative sum after L1 normalization.
///
/// # Errors
/// - [`GaError::NonFiniteFitness`] for NaN or infinite values
/// - [`GaError::NegativeFitness`] for values below zero
/// - [`GaError::ZeroFitnessSum`] when every value is zero
pub fn cumulative_probabilities(fitness: &[f64]) -> Result<Vec<f64>> {
    if fitness.is_empty() {
        return Err(GaError::InvalidConfig("cannot select from empty population".into()));
    }

    for (index, &value) in fitness.iter().enumerate() {
        if !value.is_finite() {
            return Err(GaError::NonFiniteFitness { index, value });
        }
        if value < 0.0 {
            return Err(GaError::NegativeFitness { index, value });
        }
    }

    let total: f64 = fitness.iter().sum();
    if total <= 0.0 {
        return Err(GaError::ZeroFitnessSum);
    }
    // Finite terms can still overflow when summed.
    if !total.is_finite() {
        return Err(GaError::NonFiniteFitness {
            index: fitness.len() - 1,
            value: total,
        });
    }

    let mut cumulative = 0.0;
    Ok(fitness
        .iter()
        .map(|&f| {
            cumulative += f / total;
            cumulative
        })
        .collect())
}

/// Maps a uniform draw in `[0, 1)` to the first index whose cumulative
/// probability strictly exceeds it.
///
/// Rounding can leave the last cumulative value a hair below 1.0; a draw
/// that lands above it goes to the last individual with non-zero
/// probability, never to a zero-fitness one.
fn pick(cumulative: &[f64], draw: f64) -> usize {
    let idx = cumulative.partition_point(|&c| c <= draw);
    if idx < cumulative.len() {
        return idx;
    }
    last_positive(cumulative)
}

fn last_positive(cumulative: &[f64]) -> usize {
    (0..cumulative.len())
        .rev()
        .find(|&i| {
            let prev = if i == 0 { 0.0 } else { cumulative[i - 1] };
            cumulative[i] > prev
        })
        .unwrap_or(cumulative.len() - 1)
}

/// Draws `2 * n_pairs` parents from precomputed fitness values and pairs
/// the draws sequentially.
pub fn roulette_from_fitness<R: Rng>(fitness: &[f64], n_pairs: usize, rng: &mut R) -> Result<MatingPool> {
    let cumulative = cumulative_probabilities(fitness)?;

    let pairs = (0..n_pairs)
        .map(|_| {
            let a = pick(&cumulative, rng.random::<f64>());
            let b = pick(&cumulative, rng.random::<f64>());
            (a, b)
        })
        .collect();

    Ok(MatingPool::new(pairs))
}

/// Evaluates the population and draws one parent pair per individual.
pub fn roulette_selection<O, R>(population: &Population, objective: &O, rng: &mut R) -> Result<MatingPool>
where
    O: Objective + ?Sized,
    R: Rng,
{
    let fitness = evaluate_population(objective, population);
    roulette_from_fitness(&fitness, population.len(), rng)
}
