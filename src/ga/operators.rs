//! Real-valued genetic operators.
//!
//! Crossover and mutation operators for floating-point gene vectors, in a
//! per-individual form and a whole-population form over [`Population`].
//!
//! # Crossover Operators
//!
//! - [`hypersphere_crossover`]: blend two parents along the segment joining
//!   them with a Gaussian factor `t ~ N(0.5, 0.25)`; `t` is unbounded, so
//!   offspring may land beyond either parent
//!
//! # Mutation Operators
//!
//! - [`gaussian_mutation`]: add `N(0, std)` noise to every gene
//! - [`gaussian_standard_mutation`]: add `strength · N(0, 1)` noise to every gene
//!
//! # References
//!
//! - Wright (1991), "Genetic Algorithms for Real Parameter Optimization"
//! - Mühlenbein & Schlierkamp-Voosen (1993), "Predictive Models for the
//!   Breeder Genetic Algorithm" (intermediate/line recombination)

use super::population::Population;
use super::selection::MatingPool;
use rand::Rng;
use rand_distr::StandardNormal;

/// Mean of the crossover blend factor.
pub const BLEND_MEAN: f64 = 0.5;

/// Standard deviation of the crossover blend factor.
pub const BLEND_STD: f64 = 0.25;

// ============================================================================
// Crossover operators
// ============================================================================

/// Point at fraction `t` along the vector from `x` to `y`: `x + t·(y − x)`.
///
/// Returns `x` exactly at `t = 0` and `y` exactly at `t = 1`.
///
/// # Panics
/// Panics if the parents have different lengths.
pub fn blend(x: &[f64], y: &[f64], t: f64) -> Vec<f64> {
    assert_eq!(x.len(), y.len(), "parents must have equal length");
    // `a + (b - a)` can round away from `b`.
    x.iter()
        .zip(y)
        .map(|(&a, &b)| if t == 1.0 { b } else { a + t * (b - a) })
        .collect()
}

/// Draws a blend factor from `N(0.5, 0.25)`.
pub fn sample_blend_factor<R: Rng>(rng: &mut R) -> f64 {
    let z: f64 = rng.sample(StandardNormal);
    BLEND_MEAN + BLEND_STD * z
}

/// Hypersphere crossover of one parent pair.
///
/// # Panics
/// Panics if the parents have different lengths.
pub fn hypersphere_crossover<R: Rng>(x: &[f64], y: &[f64], rng: &mut R) -> Vec<f64> {
    let t = sample_blend_factor(rng);
    blend(x, y, t)
}

/// Applies hypersphere crossover to every pair in the mating pool.
///
/// Each pair draws its own blend factor. The result holds exactly
/// `pool.len()` offspring with the parents' dimensionality.
///
/// # Panics
/// Panics if a pair references an index outside `parents`.
pub fn crossover_population<R: Rng>(parents: &Population, pool: &MatingPool, rng: &mut R) -> Population {
    crossover_population_with(parents, pool, || sample_blend_factor(rng))
}

/// Batch crossover with caller-supplied blend factors, one call per pair.
pub fn crossover_population_with<F>(parents: &Population, pool: &MatingPool, mut next_t: F) -> Population
where
    F: FnMut() -> f64,
{
    let dim = parents.dimensionality();
    let mut genes = Vec::with_capacity(pool.len() * dim);
    for &(a, b) in pool.iter() {
        let t = next_t();
        genes.extend(blend(parents.individual(a), parents.individual(b), t));
    }
    Population::from_flat(genes, dim).expect("offspring rows share the parents' dimensionality")
}

// ============================================================================
// Mutation operators
// ============================================================================

/// Adds independent `N(0, std)` noise to every gene in place.
///
/// `std == 0` leaves the genes bit-for-bit unchanged.
pub fn gaussian_mutation<R: Rng>(genes: &mut [f64], std: f64, rng: &mut R) {
    if std == 0.0 {
        return;
    }
    for g in genes.iter_mut() {
        let z: f64 = rng.sample(StandardNormal);
        *g += std * z;
    }
}

/// Adds `strength · N(0, 1)` noise to every gene in place.
///
/// Same distribution as [`gaussian_mutation`] with `std = strength`, but
/// always consumes one normal sample per gene, even at zero strength.
pub fn gaussian_standard_mutation<R: Rng>(genes: &mut [f64], strength: f64, rng: &mut R) {
    for g in genes.iter_mut() {
        let z: f64 = rng.sample(StandardNormal);
        *g += strength * z;
    }
}

/// Number of mutation draws for a generation: `round(rate × population_size)`.
pub fn mutation_count(rate: f64, population_size: usize) -> usize {
    (rate * population_size as f64).round() as usize
}

/// Picks which offspring to mutate.
///
/// Draws [`mutation_count`] indices uniformly **with replacement**, so the
/// mutated fraction only approximates `rate` and an individual can be
/// listed more than once.
pub fn mutation_subset<R: Rng>(rate: f64, population_size: usize, rng: &mut R) -> Vec<usize> {
    if population_size == 0 {
        return Vec::new();
    }
    (0..mutation_count(rate, population_size))
        .map(|_| rng.random_range(0..population_size))
        .collect()
}

/// Applies [`gaussian_mutation`] to each listed individual.
///
/// Duplicated indices are mutated once per occurrence.
///
/// # Panics
/// Panics if an index is out of range.
pub fn mutate_population<R: Rng>(population: &mut Population, indices: &[usize], std: f64, rng: &mut R) {
    for &i in indices {
        gaussian_mutation(population.individual_mut(i), std, rng);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    // ---- Crossover ----

    #[test]
    fn test_blend_endpoints() {
        let x = [0.3, -1.7, 12.25];
        let y = [5.1, 0.0, -3.3];
        assert_eq!(blend(&x, &y, 0.0), x.to_vec());
        assert_eq!(blend(&x, &y, 1.0), y.to_vec());
    }

    #[test]
    fn test_blend_midpoint() {
        assert_eq!(blend(&[0.0], &[2.0], 0.5), vec![1.0]);
    }

    #[test]
    fn test_blend_extrapolates() {
        assert_eq!(blend(&[0.0], &[2.0], 1.5), vec![3.0]);
        assert_eq!(blend(&[0.0], &[2.0], -0.5), vec![-1.0]);
    }

    #[test]
    #[should_panic(expected = "parents must have equal length")]
    fn test_blend_length_mismatch_panics() {
        blend(&[0.0, 1.0], &[0.0], 0.5);
    }

    #[test]
    fn test_blend_factor_distribution() {
        let mut rng = create_rng(42);
        let n = 20_000;
        let samples: Vec<f64> = (0..n).map(|_| sample_blend_factor(&mut rng)).collect();
        let mean = samples.iter().sum::<f64>() / n as f64;
        let var = samples.iter().map(|t| (t - mean).powi(2)).sum::<f64>() / n as f64;
        assert!((mean - 0.5).abs() < 0.01, "mean {mean}");
        assert!((var.sqrt() - 0.25).abs() < 0.01, "std {}", var.sqrt());
        assert!(samples.iter().any(|&t| !(0.0..=1.0).contains(&t)), "t should be unbounded");
    }

    #[test]
    fn test_identical_parents_give_identical_child() {
        let mut rng = create_rng(3);
        let p = [1.25, -4.0];
        for _ in 0..50 {
            assert_eq!(hypersphere_crossover(&p, &p, &mut rng), p.to_vec());
        }
    }

    #[test]
    fn test_child_lies_on_parent_line() {
        let mut rng = create_rng(11);
        let x = [0.0, 0.0];
        let y = [2.0, 4.0];
        for _ in 0..100 {
            let c = hypersphere_crossover(&x, &y, &mut rng);
            assert!((c[1] - 2.0 * c[0]).abs() < 1e-12);
        }
    }

    #[test]
    fn test_batch_crossover_forced_midpoint() {
        let parents = Population::from_rows(&[vec![0.0], vec![2.0]]).unwrap();
        let pool = MatingPool::new(vec![(0, 1), (1, 0)]);
        let offspring = crossover_population_with(&parents, &pool, || 0.5);
        assert_eq!(offspring.to_rows(), vec![vec![1.0], vec![1.0]]);
    }

    #[test]
    fn test_batch_crossover_size_and_shape() {
        let mut rng = create_rng(42);
        let parents = Population::from_rows(&[vec![0.0, 1.0], vec![2.0, 3.0], vec![4.0, 5.0]]).unwrap();
        let pool = MatingPool::new(vec![(0, 1), (1, 2), (2, 0), (0, 0), (2, 2)]);
        let offspring = crossover_population(&parents, &pool, &mut rng);
        assert_eq!(offspring.len(), 5);
        assert_eq!(offspring.dimensionality(), 2);
        assert_eq!(offspring.individual(3), &[0.0, 1.0]);
        assert_eq!(offspring.individual(4), &[4.0, 5.0]);
    }

    #[test]
    fn test_batch_crossover_draws_independent_factors() {
        let mut rng = create_rng(5);
        let parents = Population::from_rows(&[vec![0.0], vec![1.0]]).unwrap();
        let pool = MatingPool::new(vec![(0, 1); 8]);
        let offspring = crossover_population(&parents, &pool, &mut rng);
        let first = offspring.individual(0)[0];
        assert!(offspring.iter().any(|c| c[0] != first));
    }

    // ---- Mutation ----

    #[test]
    fn test_zero_std_mutation_is_noop() {
        let mut rng = create_rng(42);
        let original = vec![0.1, -2.5, 1e9];
        let mut genes = original.clone();
        gaussian_mutation(&mut genes, 0.0, &mut rng);
        assert_eq!(genes, original);

        let mut pop = Population::from_rows(&[original.clone(), original.clone()]).unwrap();
        mutate_population(&mut pop, &[0, 1, 1], 0.0, &mut rng);
        assert_eq!(pop.to_rows(), vec![original.clone(), original]);
    }

    #[test]
    fn test_zero_strength_standard_mutation_is_noop() {
        let mut rng = create_rng(42);
        let mut genes = vec![3.0, 4.0];
        gaussian_standard_mutation(&mut genes, 0.0, &mut rng);
        assert_eq!(genes, vec![3.0, 4.0]);
    }

    #[test]
    fn test_mutation_noise_scale() {
        let mut rng = create_rng(8);
        let mut genes = vec![0.0; 20_000];
        gaussian_mutation(&mut genes, 0.3, &mut rng);
        let n = genes.len() as f64;
        let mean = genes.iter().sum::<f64>() / n;
        let std = (genes.iter().map(|g| (g - mean).powi(2)).sum::<f64>() / n).sqrt();
        assert!(mean.abs() < 0.01, "mean {mean}");
        assert!((std - 0.3).abs() < 0.01, "std {std}");
    }

    #[test]
    fn test_mutate_population_touches_only_listed_rows() {
        let mut rng = create_rng(42);
        let mut pop = Population::from_flat(vec![0.0; 8], 2).unwrap();
        mutate_population(&mut pop, &[2], 1.0, &mut rng);
        assert_eq!(pop.individual(0), &[0.0, 0.0]);
        assert_eq!(pop.individual(1), &[0.0, 0.0]);
        assert_ne!(pop.individual(2), &[0.0, 0.0]);
        assert_eq!(pop.individual(3), &[0.0, 0.0]);
    }

    #[test]
    fn test_mutation_count_rounds() {
        assert_eq!(mutation_count(0.8, 10), 8);
        assert_eq!(mutation_count(0.25, 10), 3); // 2.5 rounds away from zero
        assert_eq!(mutation_count(0.0, 10), 0);
        assert_eq!(mutation_count(1.0, 7), 7);
        assert_eq!(mutation_count(0.5, 1), 1);
    }

    #[test]
    fn test_mutation_subset_with_replacement() {
        let mut rng = create_rng(42);
        let mut saw_duplicate = false;
        for _ in 0..200 {
            let subset = mutation_subset(1.0, 5, &mut rng);
            assert_eq!(subset.len(), 5);
            assert!(subset.iter().all(|&i| i < 5));
            let mut sorted = subset.clone();
            sorted.sort_unstable();
            sorted.dedup();
            if sorted.len() < subset.len() {
                saw_duplicate = true;
            }
        }
        assert!(saw_duplicate, "indices are drawn with replacement");
    }

    #[test]
    fn test_mutation_subset_zero_rate() {
        let mut rng = create_rng(42);
        assert!(mutation_subset(0.0, 10, &mut rng).is_empty());
        assert!(mutation_subset(0.5, 0, &mut rng).is_empty());
    }
}
