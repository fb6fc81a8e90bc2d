//! GA evolutionary loop execution.
//!
//! [`GaRunner`] orchestrates the complete evolutionary process:
//! initialization → evaluation → selection → crossover → mutation → repeat.
//!
//! The population is replaced wholesale every generation and the loop
//! always runs the configured number of generations.

use super::config::GaConfig;
use super::operators::{crossover_population, mutate_population, mutation_subset};
use super::population::{initialize_population, Population};
use super::record::GenerationLog;
use super::selection::roulette_from_fitness;
use super::types::{evaluate_population, Objective};
use crate::error::Result;
use crate::random::rng_from_option;
use rand::Rng;

/// Receives every generation's population and fitness before selection.
pub trait GenerationObserver {
    fn on_generation(&mut self, generation: usize, population: &Population, fitness: &[f64]);
}

/// Observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoObserver;

impl GenerationObserver for NoObserver {
    fn on_generation(&mut self, _generation: usize, _population: &Population, _fitness: &[f64]) {}
}

/// Lifecycle of a single run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// Population sampled, no generation run yet.
    Initialized,
    /// Generation `generation` is next to execute.
    Running { generation: usize },
    /// All generations done.
    Terminated,
}

/// Result of a GA optimization run.
#[derive(Debug, Clone)]
pub struct GaResult {
    /// Highest fitness in the final population.
    pub best_fitness: f64,

    /// Genes of the individual that achieved `best_fitness`.
    pub best_genes: Vec<f64>,

    /// Total number of generations executed.
    pub generations: usize,

    /// Best fitness of each evaluated population: one entry per generation,
    /// plus the final population.
    pub fitness_history: Vec<f64>,

    /// The final population.
    pub population: Population,
}

/// Executes the GA evolutionary loop.
///
/// # Usage
///
/// ```
/// use u_evolve::ga::{GaConfig, GaRunner};
///
/// let objective = |x: &[f64]| 1.0 / (1.0 + x.iter().map(|v| v * v).sum::<f64>());
/// let config = GaConfig::default()
///     .with_max_generations(50)
///     .with_seed(42);
/// let result = GaRunner::run(&objective, &config).unwrap();
/// assert!(result.best_fitness > 0.0);
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs the GA with a generator seeded from `config.seed`.
    ///
    /// When `config.log.enabled`, every generation is recorded and written
    /// as CSV to `config.log.path_for_run(0)` after the last generation.
    pub fn run<O: Objective + ?Sized>(objective: &O, config: &GaConfig) -> Result<GaResult> {
        let mut rng = rng_from_option(config.seed);
        if !config.log.enabled {
            return Self::run_with_observer(objective, config, &mut rng, &mut NoObserver);
        }

        let mut log = GenerationLog::new();
        let result = Self::run_with_observer(objective, config, &mut rng, &mut log)?;
        log.write_csv(config.log.path_for_run(0))?;
        Ok(result)
    }

    /// Runs the GA with a caller-owned generator and observer.
    ///
    /// If `config.log.enabled`, the observer receives the population and
    /// fitness of every generation (indices `0..max_generations`) before
    /// selection; otherwise it is never called. Nothing is written to disk.
    pub fn run_with_observer<O, R, B>(
        objective: &O,
        config: &GaConfig,
        rng: &mut R,
        observer: &mut B,
    ) -> Result<GaResult>
    where
        O: Objective + ?Sized,
        R: Rng,
        B: GenerationObserver + ?Sized,
    {
        let mut run = GaRun::new(objective, config, rng)?;
        while run.step(observer)? {}
        Ok(run.finish())
    }
}

/// A single run, advanced one generation at a time.
///
/// ```
/// use u_evolve::ga::{GaConfig, GaRun, NoObserver, RunState};
/// use u_evolve::random::create_rng;
///
/// let f = |x: &[f64]| x[0].abs();
/// let config = GaConfig::default().with_dimensionality(1).with_max_generations(2);
/// let mut rng = create_rng(1);
/// let mut run = GaRun::new(&f, &config, &mut rng).unwrap();
/// assert_eq!(run.state(), RunState::Initialized);
/// run.step(&mut NoObserver).unwrap();
/// assert_eq!(run.state(), RunState::Running { generation: 1 });
/// ```
pub struct GaRun<'a, O: ?Sized, R> {
    objective: &'a O,
    config: &'a GaConfig,
    rng: &'a mut R,
    population: Population,
    state: RunState,
    fitness_history: Vec<f64>,
}

impl<'a, O, R> GaRun<'a, O, R>
where
    O: Objective + ?Sized,
    R: Rng,
{
    /// Validates the configuration against the objective and samples the
    /// initial population.
    pub fn new(objective: &'a O, config: &'a GaConfig, rng: &'a mut R) -> Result<Self> {
        config.validate_for(objective.dimensionality())?;

        let population = initialize_population(
            config.init_center,
            config.init_std,
            config.population_size,
            config.dimensionality,
            rng,
        )?;

        log::info!(
            "starting GA: {} individuals x {} genes, {} generations",
            config.population_size,
            config.dimensionality,
            config.max_generations
        );

        Ok(Self {
            objective,
            config,
            rng,
            population,
            state: RunState::Initialized,
            fitness_history: Vec::with_capacity(config.max_generations + 1),
        })
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    /// Executes one generation. Returns `Ok(false)` once terminated.
    ///
    /// The observer is only notified when logging is enabled.
    pub fn step<B: GenerationObserver + ?Sized>(&mut self, observer: &mut B) -> Result<bool> {
        let generation = match self.state {
            RunState::Initialized => 0,
            RunState::Running { generation } => generation,
            RunState::Terminated => return Ok(false),
        };

        let n = self.config.population_size;
        let fitness = evaluate_population(self.objective, &self.population);
        self.fitness_history.push(max_fitness(&fitness).1);
        if self.config.log.enabled {
            observer.on_generation(generation, &self.population, &fitness);
        }

        let pool = roulette_from_fitness(&fitness, n, self.rng)?;
        let mut offspring = crossover_population(&self.population, &pool, self.rng);
        let to_mutate = mutation_subset(self.config.mutation_rate, n, self.rng);
        mutate_population(&mut offspring, &to_mutate, self.config.mutation_std, self.rng);

        debug_assert_eq!(offspring.len(), n);
        self.population = offspring;

        let next = generation + 1;
        if next % 1000 == 0 {
            log::debug!(
                "generation {next}/{}: best fitness {:.6}",
                self.config.max_generations,
                self.fitness_history[generation]
            );
        }
        self.state = if next >= self.config.max_generations {
            RunState::Terminated
        } else {
            RunState::Running { generation: next }
        };
        Ok(self.state != RunState::Terminated)
    }

    /// Evaluates the final population and returns the result.
    ///
    /// May be called before termination to inspect the current population.
    pub fn finish(mut self) -> GaResult {
        let fitness = evaluate_population(self.objective, &self.population);
        let (best_idx, best_fitness) = max_fitness(&fitness);
        self.fitness_history.push(best_fitness);

        let generations = match self.state {
            RunState::Initialized => 0,
            RunState::Running { generation } => generation,
            RunState::Terminated => self.config.max_generations,
        };
        log::info!("GA finished after {generations} generations: best fitness {best_fitness:.6}");

        GaResult {
            best_fitness,
            best_genes: self.population.individual(best_idx).to_vec(),
            generations,
            fitness_history: self.fitness_history,
            population: self.population,
        }
    }
}

/// Index and value of the highest fitness. NaN values never win.
fn max_fitness(fitness: &[f64]) -> (usize, f64) {
    fitness
        .iter()
        .copied()
        .enumerate()
        .fold((0, f64::NEG_INFINITY), |best, (i, f)| if f > best.1 { (i, f) } else { best })
}

// ============================================================================
// Tests
// ============================================================================
