//! u-evolve: run the GA on a reference objective from the command line.
//!
//! Progress is reported through `log`; set `RUST_LOG=info` (or `debug`)
//! to see it. Generation logs are CSV files with columns
//! `x,y,value,generation`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use u_evolve::ga::{BatchConfig, BatchRunner, GaConfig, LogConfig, DEFAULT_LOG_PATH};
use u_evolve::objectives::{InvertedSphere, Saddle};
use u_evolve::{GaError, Result};

#[derive(Parser)]
#[command(name = "u-evolve")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Number of individuals per generation
    #[arg(long, default_value_t = 10)]
    population_size: usize,

    /// Number of generations per run
    #[arg(long, default_value_t = 10_000)]
    generations: usize,

    /// Fraction of offspring mutated each generation
    #[arg(long, default_value_t = 0.8)]
    mutation_rate: f64,

    /// Standard deviation of the mutation noise
    #[arg(long, default_value_t = 0.3)]
    mutation_std: f64,

    /// Point around which the initial population is sampled
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    center: f64,

    /// Spread of the initial population
    #[arg(long, default_value_t = 0.2)]
    deviation: f64,

    /// Genes per individual
    #[arg(long, default_value_t = 2)]
    dimensionality: usize,

    /// Number of independent runs
    #[arg(long, default_value_t = 1)]
    runs: usize,

    /// Persist the log of every N-th run
    #[arg(long, default_value_t = 100)]
    save_frequency: usize,

    /// Log destination; `{}` is replaced with the run id
    #[arg(long, value_name = "FILE", default_value = DEFAULT_LOG_PATH)]
    log_path: PathBuf,

    /// Do not write generation logs
    #[arg(long)]
    no_log: bool,

    /// Random seed for the whole batch
    #[arg(long)]
    seed: Option<u64>,

    /// Objective to maximize
    #[arg(long, value_enum, default_value_t = ObjectiveKind::Saddle)]
    objective: ObjectiveKind,

    /// Peak distance of the saddle objective
    #[arg(long, default_value_t = 1.0)]
    radius: f64,
}

#[derive(Clone, Copy, ValueEnum)]
enum ObjectiveKind {
    /// Two Gaussian peaks at the origin and at (r, …, r)
    Saddle,
    /// 1 / (1 + |x|²)
    Sphere,
}

impl Cli {
    fn ga_config(&self) -> GaConfig {
        GaConfig {
            population_size: self.population_size,
            max_generations: self.generations,
            mutation_rate: self.mutation_rate,
            mutation_std: self.mutation_std,
            init_center: self.center,
            init_std: self.deviation,
            dimensionality: self.dimensionality,
            seed: self.seed,
            log: LogConfig {
                enabled: !self.no_log,
                path: self.log_path.clone(),
            },
        }
    }

    fn batch_config(&self) -> BatchConfig {
        BatchConfig::default()
            .with_runs(self.runs)
            .with_save_frequency(self.save_frequency)
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = cli.ga_config();
    let batch = cli.batch_config();

    let runs = match cli.objective {
        ObjectiveKind::Saddle => {
            let objective = Saddle::new(cli.radius).with_dimensionality(cli.dimensionality);
            BatchRunner::run(&objective, &config, &batch)?
        }
        ObjectiveKind::Sphere => BatchRunner::run(&InvertedSphere, &config, &batch)?,
    };

    let best = runs
        .iter()
        .max_by(|a, b| a.result.best_fitness.total_cmp(&b.result.best_fitness))
        .ok_or_else(|| GaError::InvalidConfig("batch produced no runs".into()))?;

    for run in &runs {
        match &run.log_path {
            Some(path) => println!(
                "run {}: best fitness {:.6} (log: {})",
                run.run_id,
                run.result.best_fitness,
                path.display()
            ),
            None => println!("run {}: best fitness {:.6}", run.run_id, run.result.best_fitness),
        }
    }
    println!(
        "best over {} runs: {:.6} at {:?}",
        runs.len(),
        best.result.best_fitness,
        best.result.best_genes
    );
    Ok(())
}
