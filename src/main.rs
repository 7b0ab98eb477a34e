use std::sync::Arc;

use beverage_dispenser::cli::{self, Command};
use beverage_dispenser::config::DispenserConfig;
use beverage_dispenser::lifecycle::{setup_tracing, ScenarioRunner};
use beverage_dispenser::model::Scenario;
use beverage_dispenser::reporting::ConsoleReporter;
use beverage_dispenser::AppError;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    setup_tracing();

    let input_files = match cli::parse_args(std::env::args().skip(1))? {
        Command::Help => {
            println!("{}", cli::USAGE);
            return Ok(());
        }
        Command::Run { input_files } => input_files,
    };

    let config = DispenserConfig::from_env()?;
    info!(?config, files = input_files.len(), "Starting dispenser");
    let runner = ScenarioRunner::new(config, Arc::new(ConsoleReporter::new()))?;

    // One scenario at a time; each gets a fresh inventory
    for path in &input_files {
        let scenario = Scenario::load(path).await?;
        runner.run(scenario).await?;
    }

    info!("All scenarios processed");
    Ok(())
}
