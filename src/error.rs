//! Error taxonomy for optimization runs.
//!
//! Every error is fatal to the run that produced it. Variants are split by
//! the invariant they report so callers can tell a bad configuration apart
//! from a fitness vector that made selection undefined.

/// Errors produced while configuring, running, or logging an optimization.
#[derive(Debug, thiserror::Error)]
pub enum GaError {
    /// A run parameter is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The configured dimensionality differs from the objective's arity.
    #[error("dimensionality mismatch: objective expects {expected} genes, configured {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// The objective returned NaN or an infinity.
    #[error("selection undefined: fitness of individual {index} is not finite ({value})")]
    NonFiniteFitness { index: usize, value: f64 },

    /// A negative fitness breaks the probability interpretation of roulette selection.
    #[error("selection undefined: fitness of individual {index} is negative ({value})")]
    NegativeFitness { index: usize, value: f64 },

    /// All fitness values are zero, so probability normalization failed.
    #[error("selection undefined: probability normalization failed, fitness sums to zero")]
    ZeroFitnessSum,

    #[error("log I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("log serialization failed: {0}")]
    Csv(#[from] csv::Error),

    /// A persisted log row could not be mapped back to a record.
    #[error("malformed generation record: {0}")]
    MalformedRecord(String),
}

impl GaError {
    /// Returns `true` for the errors that mean roulette selection had no
    /// valid probability distribution to sample from.
    pub fn is_selection_undefined(&self) -> bool {
        matches!(
            self,
            GaError::NonFiniteFitness { .. } | GaError::NegativeFitness { .. } | GaError::ZeroFitnessSum
        )
    }
}

/// Shorthand result type.
pub type Result<T> = std::result::Result<T, GaError>;
