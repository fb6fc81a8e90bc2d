//! Reference objectives for experiments and benchmarks.
//!
//! All are maximized and non-negative, so they can be fed to roulette
//! selection directly.

use crate::ga::Objective;

/// Two Gaussian peaks: a unit peak at the origin and a peak of height 2
/// centered at `(r, r, …, r)`.
///
/// `f(x) = exp(-5 Σ xᵢ²) + 2 exp(-5 Σ (xᵢ - r)²)`
///
/// Defined for any dimensionality; [`Saddle::with_dimensionality`] pins
/// the arity so mismatched runs are rejected up front.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Saddle {
    /// Distance parameter between the two peaks.
    pub radius: f64,
    dimensionality: Option<usize>,
}

impl Default for Saddle {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl Saddle {
    pub fn new(radius: f64) -> Self {
        Self {
            radius,
            dimensionality: None,
        }
    }

    pub fn with_dimensionality(mut self, dim: usize) -> Self {
        self.dimensionality = Some(dim);
        self
    }
}

impl Objective for Saddle {
    fn evaluate(&self, genes: &[f64]) -> f64 {
        let near: f64 = genes.iter().map(|x| x * x).sum();
        let far: f64 = genes.iter().map(|x| (x - self.radius).powi(2)).sum();
        (-5.0 * near).exp() + 2.0 * (-5.0 * far).exp()
    }

    fn dimensionality(&self) -> Option<usize> {
        self.dimensionality
    }
}

/// Sphere turned into a bounded maximization problem:
/// `f(x) = 1 / (1 + Σ xᵢ²)`, peaking at 1 at the origin.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InvertedSphere;

impl Objective for InvertedSphere {
    fn evaluate(&self, genes: &[f64]) -> f64 {
        1.0 / (1.0 + genes.iter().map(|x| x * x).sum::<f64>())
    }
}
