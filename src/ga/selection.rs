use crate::schedule::{Population, Schedule};
use fastrand::Rng;

/// Softmax over fitness values, shifted by the maximum for numerical
/// stability. The shift also makes the distribution invariant under adding
/// a constant to every fitness.
pub fn softmax(fitnesses: &[f32]) -> Vec<f32> {
    if fitnesses.is_empty() {
        return Vec::new();
    }
    let max_f = fitnesses.iter().fold(f32::NEG_INFINITY, |a, &b| a.max(b));
    let exps: Vec<f32> = fitnesses.iter().map(|f| (f - max_f).exp()).collect();
    let total: f32 = exps.iter().sum();
    if total <= 0.0 || !total.is_finite() {
        let n = fitnesses.len();
        return vec![1.0 / n as f32; n];
    }
    exps.iter().map(|e| e / total).collect()
}

/// CDF over the softmax probabilities. Allows O(n) sampling with a single
/// draw. The last entry is clamped to exactly 1.0.
pub fn build_selection_cdf(fitnesses: &[f32]) -> Vec<f32> {
    let probs = softmax(fitnesses);
    let mut cdf = Vec::with_capacity(probs.len());
    let mut cumulative = 0.0f32;
    for p in probs {
        cumulative += p;
        cdf.push(cumulative);
    }
    if let Some(last) = cdf.last_mut() {
        *last = 1.0;
    }
    cdf
}

pub fn sample_index(cdf: &[f32], rng: &mut Rng) -> usize {
    let r = rng.f32();
    cdf.iter()
        .position(|&threshold| r <= threshold)
        .unwrap_or(cdf.len().saturating_sub(1))
}

/// Two independent draws, with replacement. The same schedule may come
/// back as both parents.
pub fn select_parents<'a>(
    population: &'a Population,
    cdf: &[f32],
    rng: &mut Rng,
) -> (&'a Schedule, &'a Schedule) {
    let a = sample_index(cdf, rng);
    let b = sample_index(cdf, rng);
    (&population[a], &population[b])
}
