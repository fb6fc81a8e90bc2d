//! Core trait definitions for the GA framework.
//!
//! [`Objective`] is the contract between the evolutionary loop and the
//! landscape being searched. The loop only ever asks it for one number per
//! individual.

use super::population::Population;

/// A real-valued objective over fixed-length gene vectors.
///
/// Higher fitness is better (maximization). Minimization objectives must be
/// negated by the caller.
///
/// The objective must be pure and total over the search domain, and roulette
/// selection additionally requires non-negative values.
///
/// Any `Fn(&[f64]) -> f64 + Send + Sync` closure is an objective with no
/// declared arity:
///
/// ```
/// use u_evolve::ga::Objective;
///
/// let f = |x: &[f64]| x.iter().map(|v| v * v).sum::<f64>();
/// assert_eq!(f.evaluate(&[1.0, 2.0]), 5.0);
/// assert_eq!(f.dimensionality(), None);
/// ```
pub trait Objective: Send + Sync {
    /// Evaluates one individual.
    fn evaluate(&self, genes: &[f64]) -> f64;

    /// Expected input length, if the objective has a fixed arity.
    ///
    /// When `Some`, the runner rejects configurations whose dimensionality
    /// differs before any generation runs.
    fn dimensionality(&self) -> Option<usize> {
        None
    }
}

impl<F> Objective for F
where
    F: Fn(&[f64]) -> f64 + Send + Sync,
{
    fn evaluate(&self, genes: &[f64]) -> f64 {
        self(genes)
    }
}

/// Wraps an objective with an explicit arity.
///
/// ```
/// use u_evolve::ga::{Objective, WithArity};
///
/// let f = WithArity::new(1, |x: &[f64]| x[0]);
/// assert_eq!(f.dimensionality(), Some(1));
/// ```
#[derive(Debug, Clone)]
pub struct WithArity<F> {
    arity: usize,
    f: F,
}

impl<F> WithArity<F> {
    pub fn new(arity: usize, f: F) -> Self {
        Self { arity, f }
    }
}

impl<F> Objective for WithArity<F>
where
    F: Fn(&[f64]) -> f64 + Send + Sync,
{
    fn evaluate(&self, genes: &[f64]) -> f64 {
        (self.f)(genes)
    }

    fn dimensionality(&self) -> Option<usize> {
        Some(self.arity)
    }
}

/// Evaluates the objective over every individual, in population order.
pub fn evaluate_population<O: Objective + ?Sized>(objective: &O, population: &Population) -> Vec<f64> {
    population.iter().map(|genes| objective.evaluate(genes)).collect()
}
