use crate::error::{SchedForgeError, SfResult};
use clap::Args;
use serde::{Deserialize, Serialize};
use std::fs;

#[derive(Args, Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[command(flatten)]
    pub ga: GaParams,
    #[command(flatten)]
    pub weights: FitnessWeights,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GaParams {
    #[arg(long, default_value_t = 300)]
    pub population_size: usize,

    #[arg(long, default_value_t = 0.01)]
    pub mutation_rate: f32,

    #[arg(long, default_value_t = 100)]
    pub min_generations: usize,

    #[arg(long, default_value_t = 500)]
    pub max_generations: usize,

    /// Stop once the per-generation average improvement falls below this percentage.
    #[arg(long, default_value_t = 1.0)]
    pub improvement_threshold: f32,

    /// Halve the mutation rate every N generations while the average improves.
    /// 0 disables adaptive mutation.
    #[arg(long, default_value_t = 10)]
    pub mutation_halve_interval: usize,

    #[arg(long, default_value_t = 0.001)]
    pub min_mutation_rate: f32,
}

impl Default for GaParams {
    fn default() -> Self {
        Self {
            population_size: 300,
            mutation_rate: 0.01,
            min_generations: 100,
            max_generations: 500,
            improvement_threshold: 1.0,
            mutation_halve_interval: 10,
            min_mutation_rate: 0.001,
        }
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FitnessWeights {
    // === ROOM ===
    #[arg(long, default_value_t = 0.5)]
    pub penalty_room_conflict: f32,
    #[arg(long, default_value_t = 0.5)]
    pub penalty_room_too_small: f32,
    #[arg(long, default_value_t = 0.4)]
    pub penalty_room_oversize_wide: f32,
    #[arg(long, default_value_t = 0.2)]
    pub penalty_room_oversize_loose: f32,
    #[arg(long, default_value_t = 0.3)]
    pub bonus_room_fit: f32,
    #[arg(long, default_value_t = 3.0)]
    pub oversize_wide_ratio: f32,
    #[arg(long, default_value_t = 1.5)]
    pub oversize_loose_ratio: f32,

    // === FACILITATOR PREFERENCE ===
    #[arg(long, default_value_t = 0.5)]
    pub bonus_preferred_facilitator: f32,
    #[arg(long, default_value_t = 0.2)]
    pub bonus_listed_facilitator: f32,
    #[arg(long, default_value_t = 0.1)]
    pub penalty_unlisted_facilitator: f32,

    // === FACILITATOR LOAD ===
    #[arg(long, default_value_t = 0.2)]
    pub bonus_single_booking: f32,
    #[arg(long, default_value_t = 0.2)]
    pub penalty_double_booking: f32,
    #[arg(long, default_value_t = 0.5)]
    pub penalty_overload: f32,
    #[arg(long, default_value_t = 0.4)]
    pub penalty_underload: f32,

    // === PAIRED ACTIVITIES ===
    #[arg(long, default_value_t = 0.5)]
    pub bonus_section_spread: f32,
    #[arg(long, default_value_t = 4)]
    pub section_spread_gap: usize,
    #[arg(long, default_value_t = 0.5)]
    pub penalty_section_same_slot: f32,
    #[arg(long, default_value_t = 0.25)]
    pub penalty_cross_same_slot: f32,
    #[arg(long, default_value_t = 0.5)]
    pub bonus_cross_consecutive: f32,
    #[arg(long, default_value_t = 0.4)]
    pub penalty_cross_building_split: f32,
    #[arg(long, default_value_t = 0.25)]
    pub bonus_cross_one_gap: f32,

    // === OPTIONAL EXTENSIONS ===
    #[arg(long, default_value_t = false)]
    pub time_preferences: bool,
    #[arg(long, default_value_t = false)]
    pub equipment: bool,
    #[arg(long, default_value_t = 0.2)]
    pub bonus_equipment_full: f32,
    #[arg(long, default_value_t = 0.1)]
    pub penalty_equipment_partial: f32,
    #[arg(long, default_value_t = 0.3)]
    pub penalty_equipment_none: f32,
}

impl Default for FitnessWeights {
    fn default() -> Self {
        Self {
            penalty_room_conflict: 0.5,
            penalty_room_too_small: 0.5,
            penalty_room_oversize_wide: 0.4,
            penalty_room_oversize_loose: 0.2,
            bonus_room_fit: 0.3,
            oversize_wide_ratio: 3.0,
            oversize_loose_ratio: 1.5,
            bonus_preferred_facilitator: 0.5,
            bonus_listed_facilitator: 0.2,
            penalty_unlisted_facilitator: 0.1,
            bonus_single_booking: 0.2,
            penalty_double_booking: 0.2,
            penalty_overload: 0.5,
            penalty_underload: 0.4,
            bonus_section_spread: 0.5,
            section_spread_gap: 4,
            penalty_section_same_slot: 0.5,
            penalty_cross_same_slot: 0.25,
            bonus_cross_consecutive: 0.5,
            penalty_cross_building_split: 0.4,
            bonus_cross_one_gap: 0.25,
            time_preferences: false,
            equipment: false,
            bonus_equipment_full: 0.2,
            penalty_equipment_partial: 0.1,
            penalty_equipment_none: 0.3,
        }
    }
}

impl FitnessWeights {
    /// Loads a weight profile from JSON. Missing fields keep their defaults.
    pub fn load_from_file(path: &str) -> SfResult<Self> {
        let content = fs::read_to_string(path)?;
        let weights = serde_json::from_str(&content)?;
        Ok(weights)
    }
}

impl GaParams {
    pub fn validate(&self) -> SfResult<()> {
        if self.population_size == 0 {
            return Err(SchedForgeError::Config(
                "population_size must be greater than 0".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(SchedForgeError::Config(format!(
                "mutation_rate must be in [0, 1], got {}",
                self.mutation_rate
            )));
        }
        if self.min_generations > self.max_generations {
            return Err(SchedForgeError::Config(format!(
                "min_generations ({}) exceeds max_generations ({})",
                self.min_generations, self.max_generations
            )));
        }
        if self.improvement_threshold < 0.0 {
            return Err(SchedForgeError::Config(
                "improvement_threshold must be non-negative".to_string(),
            ));
        }
        if self.min_mutation_rate < 0.0 || self.min_mutation_rate > self.mutation_rate {
            return Err(SchedForgeError::Config(format!(
                "min_mutation_rate ({}) must be in [0, mutation_rate]",
                self.min_mutation_rate
            )));
        }
        Ok(())
    }
}

impl Config {
    pub fn validate(&self) -> SfResult<()> {
        self.ga.validate()
    }
}
