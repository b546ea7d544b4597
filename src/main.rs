use clap::{Parser, Subcommand};
use schedforge::catalog::Catalog;
use schedforge::config::{Config, FitnessWeights};
use schedforge::fitness::Evaluator;
use std::process;
use std::sync::Arc;
use tracing::{error, info};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Catalog JSON; absent means the built-in SLA dataset.
    #[arg(global = true, short, long)]
    catalog: Option<String>,

    /// Weight profile JSON; replaces the CLI weight flags wholesale.
    #[arg(global = true, long)]
    weights: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    Search(cmd::search::SearchArgs),
    Validate(cmd::validate::ValidateArgs),
}

fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    info!("🚀 Initializing SchedForge...");

    let catalog = match &cli.catalog {
        Some(path) => Catalog::load_from_file(path).unwrap_or_else(|e| {
            error!("{}", e);
            process::exit(1);
        }),
        None => {
            info!("📚 Using built-in SLA catalog");
            Catalog::sla()
        }
    };

    let mut config: Config = match &cli.command {
        Commands::Search(args) => args.config.clone(),
        Commands::Validate(args) => args.config.clone(),
    };

    if let Some(path) = &cli.weights {
        info!("⚖️  Loading weight profile: {}", path);
        config.weights = FitnessWeights::load_from_file(path).unwrap_or_else(|e| {
            error!("{}", e);
            process::exit(1);
        });
    }

    if let Err(e) = config.validate() {
        error!("{}", e);
        process::exit(1);
    }

    let evaluator = match Evaluator::new(Arc::new(catalog), config.weights.clone()) {
        Ok(ev) => Arc::new(ev),
        Err(e) => {
            error!("❌ {}", e);
            process::exit(1);
        }
    };

    let outcome = match cli.command {
        Commands::Search(mut args) => {
            args.config = config;
            cmd::search::run(args, evaluator)
        }
        Commands::Validate(args) => cmd::validate::run(args, evaluator),
    };

    if let Err(e) = outcome {
        error!("{}", e);
        process::exit(1);
    }
}
