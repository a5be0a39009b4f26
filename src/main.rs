use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use basic_ecs::scenario::ScenarioLoader;

#[derive(Debug, Parser)]
#[command(author, version, about = "Runs an entity registry scenario")]
struct Cli {
    /// Path to the scenario YAML file
    #[arg(long, default_value = "scenarios/arena.yaml")]
    scenario: PathBuf,

    /// Log filter (falls back to RUST_LOG, then the scenario's level)
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let loader = ScenarioLoader::new(".");
    let scenario = loader.load(&cli.scenario)?;

    let filter = match cli.log_level.as_deref() {
        Some(level) => EnvFilter::try_new(level)?,
        None => EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&scenario.logging.level))?,
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let report = scenario.run()?;
    println!(
        "Scenario '{}' completed. Live entities: {}",
        scenario.name,
        report.manager.entity_count()
    );
    for (class_name, ids) in &report.holders {
        println!("  {class_name}: {ids:?}");
    }
    Ok(())
}
