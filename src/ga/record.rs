//! Generation audit trail.
//!
//! [`GenerationLog`] accumulates one [`GenerationRecord`] per individual per
//! generation in memory and persists them as CSV in a single pass.
//!
//! # File format
//!
//! Columns `x,y,value,generation`: `x` is the first gene, `y` the second
//! (empty for 1-D runs), `value` the fitness, `generation` the index.
//! Runs with more than two genes append `x2, x3, …` after `generation`,
//! so 2-D files keep the plain four-column layout visualizers expect.
//! Floats are written in shortest round-trip form.

use super::population::Population;
use super::runner::GenerationObserver;
use crate::error::{GaError, Result};
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::Path;

/// One individual as seen in one generation.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRecord {
    pub generation: usize,
    pub genes: Vec<f64>,
    pub fitness: f64,
}

/// In-memory, append-only collection of generation records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationLog {
    records: Vec<GenerationRecord>,
}

impl GenerationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one record per individual of `population`.
    ///
    /// # Panics
    /// Panics if `fitness` and `population` differ in length.
    pub fn push_generation(&mut self, generation: usize, population: &Population, fitness: &[f64]) {
        assert_eq!(population.len(), fitness.len(), "one fitness value per individual");
        self.records.reserve(population.len());
        for (genes, &fitness) in population.iter().zip(fitness) {
            self.records.push(GenerationRecord {
                generation,
                genes: genes.to_vec(),
                fitness,
            });
        }
    }

    pub fn records(&self) -> &[GenerationRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn into_records(self) -> Vec<GenerationRecord> {
        self.records
    }

    /// Writes the log as CSV to `path`, creating parent directories.
    pub fn write_csv(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        let file = fs::File::create(path)?;
        self.to_writer(io::BufWriter::new(file))?;
        log::info!("wrote {} generation records to {}", self.len(), path.display());
        Ok(())
    }

    /// Writes the log as CSV to any writer.
    pub fn to_writer<W: io::Write>(&self, writer: W) -> Result<()> {
        let extra = self
            .records
            .iter()
            .map(|r| r.genes.len().saturating_sub(2))
            .max()
            .unwrap_or(0);

        let mut wtr = csv::Writer::from_writer(writer);

        let mut header = vec!["x".to_string(), "y".into(), "value".into(), "generation".into()];
        header.extend((0..extra).map(|i| format!("x{}", i + 2)));
        wtr.write_record(&header)?;

        let mut row: Vec<String> = Vec::with_capacity(header.len());
        for record in &self.records {
            row.clear();
            let gene = |i: usize| record.genes.get(i).map(f64::to_string).unwrap_or_default();
            row.push(gene(0));
            row.push(gene(1));
            row.push(record.fitness.to_string());
            row.push(record.generation.to_string());
            row.extend((0..extra).map(|i| gene(i + 2)));
            wtr.write_record(&row)?;
        }
        wtr.flush()?;
        Ok(())
    }

    /// Reads a log previously written by [`write_csv`](Self::write_csv).
    pub fn read_csv(path: impl AsRef<Path>) -> Result<Self> {
        let file = fs::File::open(path)?;
        Self::from_reader(io::BufReader::new(file))
    }

    /// Reads a CSV log from any reader.
    pub fn from_reader<R: io::Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::Reader::from_reader(reader);
        let headers = rdr.headers()?.clone();

        // Extra gene columns in x2, x3, … order.
        let mut extra: Vec<(usize, usize)> = headers
            .iter()
            .enumerate()
            .filter_map(|(col, name)| {
                let n = name.strip_prefix('x')?.parse::<usize>().ok()?;
                (n >= 2).then_some((n, col))
            })
            .collect();
        extra.sort_unstable();

        let mut records = Vec::new();
        for (line, row) in rdr.records().enumerate() {
            let row = row?;
            let fixed: CsvRow = row.deserialize(Some(&headers))?;

            let mut genes = vec![fixed.x];
            if let Some(y) = fixed.y {
                genes.push(y);
            }
            for &(n, col) in &extra {
                let field = row.get(col).unwrap_or("");
                if field.is_empty() {
                    continue;
                }
                if genes.len() != n {
                    return Err(GaError::MalformedRecord(format!(
                        "row {}: gene x{n} present without the genes before it",
                        line + 1
                    )));
                }
                let value = field.parse::<f64>().map_err(|e| {
                    GaError::MalformedRecord(format!("row {}: column x{n}: {e}", line + 1))
                })?;
                genes.push(value);
            }

            records.push(GenerationRecord {
                generation: fixed.generation,
                genes,
                fitness: fixed.value,
            });
        }
        Ok(Self { records })
    }
}

impl GenerationObserver for GenerationLog {
    fn on_generation(&mut self, generation: usize, population: &Population, fitness: &[f64]) {
        self.push_generation(generation, population, fitness);
    }
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    x: f64,
    y: Option<f64>,
    value: f64,
    generation: usize,
}
