//! Population container and initializer.
//!
//! A [`Population`] is a contiguous, row-major buffer of individuals with a
//! fixed dimensionality. Rows are index-stable for the lifetime of the
//! population; each generation builds a new one rather than editing the old.

use crate::error::{GaError, Result};
use rand::Rng;

/// A fixed-size set of real-valued individuals stored in one buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct Population {
    genes: Vec<f64>,
    dimensionality: usize,
}

impl Population {
    /// Builds a population from a flat row-major buffer.
    ///
    /// Fails if `dimensionality` is zero or does not divide the buffer.
    pub fn from_flat(genes: Vec<f64>, dimensionality: usize) -> Result<Self> {
        if dimensionality == 0 {
            return Err(GaError::InvalidConfig("dimensionality must be at least 1".into()));
        }
        if genes.len() % dimensionality != 0 {
            return Err(GaError::InvalidConfig(format!(
                "buffer of {} genes is not a whole number of {}-gene individuals",
                genes.len(),
                dimensionality
            )));
        }
        Ok(Self { genes, dimensionality })
    }

    /// Builds a population from individual rows of equal length.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self> {
        let dimensionality = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
        let mut genes = Vec::with_capacity(rows.len() * dimensionality);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != dimensionality {
                return Err(GaError::InvalidConfig(format!(
                    "row {i} has {} genes, expected {dimensionality}",
                    row.len()
                )));
            }
            genes.extend_from_slice(row);
        }
        Self::from_flat(genes, dimensionality)
    }

    /// Number of individuals.
    pub fn len(&self) -> usize {
        self.genes.len() / self.dimensionality
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Number of genes per individual.
    pub fn dimensionality(&self) -> usize {
        self.dimensionality
    }

    /// Genes of individual `index`.
    ///
    /// # Panics
    /// Panics if `index >= self.len()`.
    pub fn individual(&self, index: usize) -> &[f64] {
        let start = index * self.dimensionality;
        &self.genes[start..start + self.dimensionality]
    }

    /// Mutable genes of individual `index`.
    ///
    /// # Panics
    /// Panics if `index >= self.len()`.
    pub fn individual_mut(&mut self, index: usize) -> &mut [f64] {
        let start = index * self.dimensionality;
        &mut self.genes[start..start + self.dimensionality]
    }

    /// Iterates over individuals in index order.
    pub fn iter(&self) -> std::slice::ChunksExact<'_, f64> {
        self.genes.chunks_exact(self.dimensionality)
    }

    /// The whole row-major buffer.
    pub fn as_flat(&self) -> &[f64] {
        &self.genes
    }

    /// Copies the individuals out as owned rows.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.iter().map(<[f64]>::to_vec).collect()
    }
}

/// Samples the starting population.
///
/// Each gene is `center + u` with `u` drawn independently from `U[0, std)`.
/// With `std == 0` every gene equals `center` exactly.
///
/// # Errors
/// [`GaError::InvalidConfig`] if `size` or `dimensionality` is zero, or if
/// `std` is negative or not finite.
pub fn initialize_population<R: Rng>(
    center: f64,
    std: f64,
    size: usize,
    dimensionality: usize,
    rng: &mut R,
) -> Result<Population> {
    if size == 0 {
        return Err(GaError::InvalidConfig("population size must be at least 1".into()));
    }
    if dimensionality == 0 {
        return Err(GaError::InvalidConfig("dimensionality must be at least 1".into()));
    }
    if !(std.is_finite() && std >= 0.0) {
        return Err(GaError::InvalidConfig(format!(
            "initialization spread must be finite and non-negative, got {std}"
        )));
    }

    let genes = (0..size * dimensionality)
        .map(|_| center + rng.random::<f64>() * std)
        .collect();
    Population::from_flat(genes, dimensionality)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;
    use proptest::prelude::*;

    #[test]
    fn test_zero_spread_is_center() {
        let mut rng = create_rng(42);
        let pop = initialize_population(1.5, 0.0, 6, 3, &mut rng).unwrap();
        assert_eq!(pop.len(), 6);
        assert_eq!(pop.dimensionality(), 3);
        assert!(pop.as_flat().iter().all(|&g| g == 1.5));
    }

    #[test]
    fn test_genes_within_half_open_range() {
        let mut rng = create_rng(7);
        let pop = initialize_population(-1.0, 0.2, 200, 2, &mut rng).unwrap();
        for &g in pop.as_flat() {
            assert!((-1.0..-0.8).contains(&g), "gene {g} outside [-1.0, -0.8)");
        }
    }

    #[test]
    fn test_initializer_rejects_empty_shapes() {
        let mut rng = create_rng(42);
        assert!(initialize_population(0.0, 1.0, 0, 2, &mut rng).is_err());
        assert!(initialize_population(0.0, 1.0, 4, 0, &mut rng).is_err());
        assert!(initialize_population(0.0, -1.0, 4, 2, &mut rng).is_err());
        assert!(initialize_population(0.0, f64::NAN, 4, 2, &mut rng).is_err());
    }

    #[test]
    fn test_from_rows_and_back() {
        let rows = vec![vec![0.0, 1.0], vec![2.0, 3.0]];
        let pop = Population::from_rows(&rows).unwrap();
        assert_eq!(pop.individual(1), &[2.0, 3.0]);
        assert_eq!(pop.to_rows(), rows);
    }

    #[test]
    fn test_from_rows_rejects_ragged() {
        let rows = vec![vec![0.0, 1.0], vec![2.0]];
        assert!(Population::from_rows(&rows).is_err());
    }

    #[test]
    fn test_from_flat_rejects_partial_row() {
        assert!(Population::from_flat(vec![0.0; 5], 2).is_err());
        assert!(Population::from_flat(vec![0.0; 4], 0).is_err());
    }

    #[test]
    fn test_individual_mut() {
        let mut pop = Population::from_flat(vec![0.0; 4], 2).unwrap();
        pop.individual_mut(1)[0] = 9.0;
        assert_eq!(pop.as_flat(), &[0.0, 0.0, 9.0, 0.0]);
    }

    proptest! {
        #[test]
        fn prop_initializer_shape(
            size in 1usize..40,
            dim in 1usize..6,
            center in -10.0f64..10.0,
            std in 0.0f64..5.0,
            seed in any::<u64>(),
        ) {
            let mut rng = create_rng(seed);
            let pop = initialize_population(center, std, size, dim, &mut rng).unwrap();
            prop_assert_eq!(pop.len(), size);
            prop_assert_eq!(pop.iter().count(), size);
            for &g in pop.as_flat() {
                prop_assert!(g >= center);
                prop_assert!(g <= center + std);
            }
        }
    }
}
