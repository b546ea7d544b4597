use crate::reports::{self, ScheduleOrder};
use clap::Args;
use schedforge::config::Config;
use schedforge::error::SfResult;
use schedforge::fitness::Evaluator;
use schedforge::schedule::{NamedAssignment, Schedule};
use std::collections::BTreeMap;
use std::fs;
use std::sync::Arc;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub config: Config,

    /// Path to a schedule JSON in named form (activity -> room/time/facilitator).
    #[arg(long)]
    pub schedule: String,

    #[arg(long, default_value = "activity")]
    pub order_by: ScheduleOrder,
}

pub fn run(args: ValidateArgs, evaluator: Arc<Evaluator>) -> SfResult<()> {
    let content = fs::read_to_string(&args.schedule)?;
    let named: BTreeMap<String, NamedAssignment> = serde_json::from_str(&content)?;
    let schedule = Schedule::from_named(&named, &evaluator.catalog)?;

    let breakdown = evaluator.evaluate_detailed(&schedule);
    info!("Schedule scores {:.3}", breakdown.total);

    reports::print_schedule_table(&schedule, &evaluator.catalog, args.order_by);
    reports::print_breakdown_table(&breakdown);
    Ok(())
}
