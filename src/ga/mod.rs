pub mod crossover;
pub mod mutation;
pub mod runner;
pub mod selection;

pub use runner::{Engine, GaResult, GenerationStats, ProgressCallback};

use crate::fitness::Evaluator;
use crate::schedule::Population;
use rayon::prelude::*;

/// Fitness for every schedule in the population. Evaluation is pure and
/// cross-schedule independent; results come back in population order so
/// the run stays deterministic.
pub fn evaluate_population(evaluator: &Evaluator, population: &Population) -> Vec<f32> {
    population
        .par_iter()
        .map(|s| evaluator.evaluate(s))
        .collect()
}
