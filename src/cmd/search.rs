use crate::reports::{self, ScheduleOrder};
use clap::Args;
use schedforge::config::Config;
use schedforge::error::SfResult;
use schedforge::fitness::Evaluator;
use schedforge::ga::{Engine, GenerationStats};
use std::fs;
use std::sync::Arc;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct SearchArgs {
    #[command(flatten)]
    pub config: Config,

    #[arg(short = 'S', long)]
    pub seed: Option<u64>,

    #[arg(long, default_value = "time")]
    pub order_by: ScheduleOrder,

    /// Write the per-generation history to this CSV file.
    #[arg(long)]
    pub history_out: Option<String>,

    /// Write the best schedule (named form) to this JSON file.
    #[arg(long)]
    pub best_out: Option<String>,
}

pub fn run(args: SearchArgs, evaluator: Arc<Evaluator>) -> SfResult<()> {
    let engine = Engine::new(evaluator.clone(), args.config.ga.clone())?;

    info!(
        "🧬 Evolving: population {} | mutation {:.4} | generations {}..{}",
        engine.params().population_size,
        engine.params().mutation_rate,
        engine.params().min_generations,
        engine.params().max_generations,
    );

    let result = engine.run(args.seed, &|stats: &GenerationStats| {
        if stats.generation % 10 == 0 {
            info!(
                "Gen {:4} | best={:.3} avg={:.3} worst={:.3} | improv={:+.2}% | rate={:.4}",
                stats.generation,
                stats.best,
                stats.avg,
                stats.worst,
                stats.improvement_percent,
                stats.mutation_rate
            );
        }
        true
    });

    info!(
        "🏆 Best fitness {:.3} after {} generations",
        result.best_fitness,
        result.history.len()
    );

    reports::print_schedule_table(&result.best_schedule, &evaluator.catalog, args.order_by);
    let breakdown = evaluator.evaluate_detailed(&result.best_schedule);
    reports::print_breakdown_table(&breakdown);

    if let Some(path) = &args.history_out {
        reports::write_history_csv(path, &result.history)?;
        info!("📈 History written to {}", path);
    }
    if let Some(path) = &args.best_out {
        let named = result.best_schedule.to_named(&evaluator.catalog);
        fs::write(path, serde_json::to_string_pretty(&named)?)?;
        info!("💾 Best schedule written to {}", path);
    }

    Ok(())
}
