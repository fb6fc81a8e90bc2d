//! GA configuration.
//!
//! [`GaConfig`] holds the immutable run parameters for one optimization
//! run; [`LogConfig`] controls the optional generation audit trail.

use crate::error::{GaError, Result};
use std::path::PathBuf;

/// Default log destination. `{}` is replaced with the run id.
pub const DEFAULT_LOG_PATH: &str = "./logs/solution_logs_at_run_{}.csv";

/// Whether and where to persist generation records.
#[derive(Debug, Clone, PartialEq)]
pub struct LogConfig {
    /// Record every individual of every generation.
    pub enabled: bool,

    /// CSV destination. May contain `{}` as a run-id placeholder.
    pub path: PathBuf,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            path: PathBuf::from(DEFAULT_LOG_PATH),
        }
    }
}

impl LogConfig {
    /// The destination for run `run_id`, with `{}` substituted.
    pub fn path_for_run(&self, run_id: usize) -> PathBuf {
        let template = self.path.to_string_lossy();
        if template.contains("{}") {
            PathBuf::from(template.replace("{}", &run_id.to_string()))
        } else {
            self.path.clone()
        }
    }
}

/// Run parameters for the evolutionary optimizer.
///
/// # Defaults
///
/// ```
/// use u_evolve::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 10);
/// assert_eq!(config.max_generations, 10_000);
/// assert_eq!(config.dimensionality, 2);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_evolve::ga::GaConfig;
///
/// let config = GaConfig::default()
///     .with_population_size(20)
///     .with_max_generations(500)
///     .with_mutation_rate(0.2)
///     .with_mutation_std(0.1)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GaConfig {
    /// Number of individuals in every generation.
    pub population_size: usize,

    /// Number of generations to run. There is no early stopping.
    pub max_generations: usize,

    /// Fraction of offspring drawn for mutation each generation (0.0–1.0).
    ///
    /// Indices are drawn with replacement, so the mutated fraction is only
    /// approximately this value.
    pub mutation_rate: f64,

    /// Standard deviation of the Gaussian mutation noise.
    pub mutation_std: f64,

    /// Point around which the initial population is sampled.
    pub init_center: f64,

    /// Width of the uniform offset `[0, init_std)` added to `init_center`.
    pub init_std: f64,

    /// Genes per individual. Must match the objective's arity.
    pub dimensionality: usize,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,

    /// Generation audit trail.
    pub log: LogConfig,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 10,
            max_generations: 10_000,
            mutation_rate: 0.8,
            mutation_std: 0.3,
            init_center: 0.0,
            init_std: 0.2,
            dimensionality: 2,
            seed: None,
            log: LogConfig::default(),
        }
    }
}

impl GaConfig {
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the mutation rate, clamped to `[0, 1]`.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    pub fn with_mutation_std(mut self, std: f64) -> Self {
        self.mutation_std = std;
        self
    }

    /// Sets the initialization center and spread.
    pub fn with_init(mut self, center: f64, std: f64) -> Self {
        self.init_center = center;
        self.init_std = std;
        self
    }

    pub fn with_dimensionality(mut self, dim: usize) -> Self {
        self.dimensionality = dim;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enables the generation audit trail, persisted to `path`.
    pub fn with_logging(mut self, path: impl Into<PathBuf>) -> Self {
        self.log = LogConfig {
            enabled: true,
            path: path.into(),
        };
        self
    }

    pub fn without_logging(mut self) -> Self {
        self.log.enabled = false;
        self
    }

    /// Preset for quick experiments: 100 generations, light mutation.
    pub fn quick() -> Self {
        Self {
            max_generations: 100,
            mutation_rate: 0.2,
            mutation_std: 0.2,
            ..Self::default()
        }
    }

    /// Validates the configuration.
    ///
    /// Returns [`GaError::InvalidConfig`] naming the first violated invariant.
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(GaError::InvalidConfig("population_size must be at least 1".into()));
        }
        if self.max_generations == 0 {
            return Err(GaError::InvalidConfig("max_generations must be at least 1".into()));
        }
        if self.dimensionality == 0 {
            return Err(GaError::InvalidConfig("dimensionality must be at least 1".into()));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(GaError::InvalidConfig(format!(
                "mutation_rate must be in [0, 1], got {}",
                self.mutation_rate
            )));
        }
        check_spread("mutation_std", self.mutation_std)?;
        check_spread("init_std", self.init_std)?;
        if !self.init_center.is_finite() {
            return Err(GaError::InvalidConfig(format!(
                "init_center must be finite, got {}",
                self.init_center
            )));
        }
        Ok(())
    }

    /// Validates the configuration against an objective's declared arity.
    pub fn validate_for(&self, objective_arity: Option<usize>) -> Result<()> {
        self.validate()?;
        match objective_arity {
            Some(expected) if expected != self.dimensionality => Err(GaError::DimensionMismatch {
                expected,
                actual: self.dimensionality,
            }),
            _ => Ok(()),
        }
    }
}

fn check_spread(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(GaError::InvalidConfig(format!(
            "{name} must be finite and non-negative, got {value}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GaConfig::default();
        assert_eq!(config.population_size, 10);
        assert_eq!(config.max_generations, 10_000);
        assert!((config.mutation_rate - 0.8).abs() < 1e-12);
        assert!((config.mutation_std - 0.3).abs() < 1e-12);
        assert_eq!(config.init_center, 0.0);
        assert!((config.init_std - 0.2).abs() < 1e-12);
        assert_eq!(config.dimensionality, 2);
        assert!(config.seed.is_none());
        assert!(!config.log.enabled);
    }

    #[test]
    fn test_builder_pattern() {
        let config = GaConfig::default()
            .with_population_size(4)
            .with_max_generations(5)
            .with_mutation_rate(0.5)
            .with_mutation_std(0.1)
            .with_init(1.0, 0.0)
            .with_dimensionality(1)
            .with_seed(7)
            .with_logging("out.csv");

        assert_eq!(config.population_size, 4);
        assert_eq!(config.max_generations, 5);
        assert!((config.mutation_rate - 0.5).abs() < 1e-12);
        assert!((config.mutation_std - 0.1).abs() < 1e-12);
        assert_eq!(config.init_center, 1.0);
        assert_eq!(config.init_std, 0.0);
        assert_eq!(config.dimensionality, 1);
        assert_eq!(config.seed, Some(7));
        assert!(config.log.enabled);
        assert_eq!(config.log.path, PathBuf::from("out.csv"));
        assert!(!config.without_logging().log.enabled);
    }

    #[test]
    fn test_validate_ok() {
        assert!(GaConfig::default().validate().is_ok());
        assert!(GaConfig::quick().validate().is_ok());
    }

    #[test]
    fn test_validate_zero_sizes() {
        assert!(GaConfig::default().with_population_size(0).validate().is_err());
        assert!(GaConfig::default().with_max_generations(0).validate().is_err());
        assert!(GaConfig::default().with_dimensionality(0).validate().is_err());
    }

    #[test]
    fn test_validate_rate_out_of_range() {
        let mut config = GaConfig::default();
        config.mutation_rate = 1.5;
        assert!(config.validate().is_err());
        config.mutation_rate = -0.1;
        assert!(config.validate().is_err());
        config.mutation_rate = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_clamp_rate() {
        assert_eq!(GaConfig::default().with_mutation_rate(2.0).mutation_rate, 1.0);
        assert_eq!(GaConfig::default().with_mutation_rate(-1.0).mutation_rate, 0.0);
    }

    #[test]
    fn test_validate_spreads() {
        assert!(GaConfig::default().with_mutation_std(-0.1).validate().is_err());
        assert!(GaConfig::default().with_init(0.0, f64::INFINITY).validate().is_err());
        assert!(GaConfig::default().with_init(f64::NAN, 0.1).validate().is_err());
        assert!(GaConfig::default().with_mutation_std(0.0).with_init(0.0, 0.0).validate().is_ok());
    }

    #[test]
    fn test_validate_for_arity() {
        let config = GaConfig::default().with_dimensionality(2);
        assert!(config.validate_for(None).is_ok());
        assert!(config.validate_for(Some(2)).is_ok());
        let err = config.validate_for(Some(3)).unwrap_err();
        assert!(matches!(err, GaError::DimensionMismatch { expected: 3, actual: 2 }));
    }

    #[test]
    fn test_log_path_template() {
        let log = LogConfig::default();
        assert_eq!(
            log.path_for_run(3),
            PathBuf::from("./logs/solution_logs_at_run_3.csv")
        );
        let fixed = LogConfig {
            enabled: true,
            path: PathBuf::from("run.csv"),
        };
        assert_eq!(fixed.path_for_run(9), PathBuf::from("run.csv"));
    }
}
