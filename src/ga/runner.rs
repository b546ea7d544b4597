use super::{crossover, evaluate_population, mutation, selection};
use crate::config::GaParams;
use crate::error::SfResult;
use crate::fitness::Evaluator;
use crate::schedule::Schedule;
use serde::Serialize;
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationStats {
    pub generation: usize,
    pub best: f32,
    pub avg: f32,
    pub worst: f32,
    /// Change of the average vs the previous generation, in percent of the
    /// previous average's magnitude. 0.0 for generation 0.
    pub improvement_percent: f32,
    /// The (possibly adapted) mutation rate in effect when this generation
    /// was evaluated. On a halving generation the successors are bred with
    /// the halved rate.
    pub mutation_rate: f32,
}

impl GenerationStats {
    pub fn from_fitnesses(
        generation: usize,
        fitnesses: &[f32],
        prev_avg: Option<f32>,
        mutation_rate: f32,
    ) -> Self {
        let best = fitnesses.iter().fold(f32::NEG_INFINITY, |a, &b| a.max(b));
        let worst = fitnesses.iter().fold(f32::INFINITY, |a, &b| a.min(b));
        let avg = fitnesses.iter().sum::<f32>() / fitnesses.len() as f32;

        let improvement_percent = match prev_avg {
            None => 0.0,
            // A near-zero previous average makes the ratio meaningless;
            // report a large value so the run is not declared converged.
            Some(prev) if prev.abs() < 1e-9 => 100.0,
            Some(prev) => (avg - prev) / prev.abs() * 100.0,
        };

        Self {
            generation,
            best,
            avg,
            worst,
            improvement_percent,
            mutation_rate,
        }
    }
}

pub struct GaResult {
    pub best_schedule: Schedule,
    pub best_fitness: f32,
    pub history: Vec<GenerationStats>,
}

/// Receives per-generation updates. Returning false aborts the search.
pub trait ProgressCallback: Send + Sync {
    fn on_generation(&self, stats: &GenerationStats) -> bool;
}

impl<F> ProgressCallback for F
where
    F: Fn(&GenerationStats) -> bool + Send + Sync,
{
    fn on_generation(&self, stats: &GenerationStats) -> bool {
        self(stats)
    }
}

/// Stopping policy: always run `min_generations`, never exceed
/// `max_generations`, and otherwise stop as soon as a single generation's
/// improvement falls below the threshold. A lone bad generation is enough;
/// no smoothing window is applied.
pub fn should_stop(params: &GaParams, generation: usize, improvement_percent: f32) -> bool {
    if generation + 1 >= params.max_generations {
        return true;
    }
    if generation < params.min_generations {
        return false;
    }
    if generation == 0 {
        // No prior generation to compare against.
        return false;
    }
    improvement_percent < params.improvement_threshold
}

pub struct Engine {
    evaluator: Arc<Evaluator>,
    params: GaParams,
}

impl Engine {
    pub fn new(evaluator: Arc<Evaluator>, params: GaParams) -> SfResult<Self> {
        params.validate()?;
        Ok(Self { evaluator, params })
    }

    pub fn params(&self) -> &GaParams {
        &self.params
    }

    /// Runs the full evolve loop. One seeded RNG drives initialization,
    /// selection, crossover, and mutation; fitness evaluation never touches
    /// it, so the run is reproducible bit-for-bit for a given seed.
    pub fn run<CB: ProgressCallback>(&self, seed: Option<u64>, callback: &CB) -> GaResult {
        let mut rng = match seed {
            Some(s) => fastrand::Rng::with_seed(s),
            None => fastrand::Rng::new(),
        };

        let catalog = &self.evaluator.catalog;
        let mut population =
            mutation::initialize_population(catalog, self.params.population_size, &mut rng);
        let mut fitnesses = evaluate_population(&self.evaluator, &population);

        let mut history: Vec<GenerationStats> = Vec::new();
        let mut rate = self.params.mutation_rate;
        let mut avg_at_last_check: Option<f32> = None;

        for generation in 0..self.params.max_generations {
            let prev_avg = history.last().map(|s| s.avg);
            let stats =
                GenerationStats::from_fitnesses(generation, &fitnesses, prev_avg, rate);
            history.push(stats.clone());

            let keep_going = callback.on_generation(&stats);

            // Adaptive mutation: halve the rate while the average keeps
            // improving between checks.
            let interval = self.params.mutation_halve_interval;
            if interval > 0 && generation > 0 && generation % interval == 0 {
                if let Some(prev) = avg_at_last_check {
                    if stats.avg > prev && rate > self.params.min_mutation_rate {
                        rate = (rate / 2.0).max(self.params.min_mutation_rate);
                        debug!("mutation rate halved to {:.4}", rate);
                    }
                }
                avg_at_last_check = Some(stats.avg);
            }

            if !keep_going {
                debug!("aborted by callback at generation {}", generation);
                break;
            }
            if should_stop(&self.params, generation, stats.improvement_percent) {
                debug!(
                    "converged at generation {} (improvement {:+.2}%)",
                    generation, stats.improvement_percent
                );
                break;
            }

            // Breed the replacement population, then swap wholesale.
            let cdf = selection::build_selection_cdf(&fitnesses);
            let mut next = Vec::with_capacity(self.params.population_size);
            while next.len() < self.params.population_size {
                let (pa, pb) = selection::select_parents(&population, &cdf, &mut rng);
                let mut child = crossover::crossover_uniform(pa, pb, &mut rng);
                mutation::mutate(&mut child, rate, catalog, &mut rng);
                debug_assert!(child.is_valid(catalog));
                next.push(child);
            }
            population = next;
            fitnesses = evaluate_population(&self.evaluator, &population);
        }

        // Best of the final generation. No elitism: this may score below an
        // earlier generation's best.
        let best_index = fitnesses
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.partial_cmp(b.1).unwrap_or(Ordering::Equal))
            .map(|(i, _)| i)
            .unwrap_or(0);

        GaResult {
            best_schedule: population[best_index].clone(),
            best_fitness: fitnesses[best_index],
            history,
        }
    }
}
