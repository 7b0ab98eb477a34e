use std::sync::Arc;

use tokio::task::JoinSet;
use tracing::{error, info, info_span, Instrument};

use crate::config::{validate_outlets, ConfigError, DispenserConfig};
use crate::dispenser::{Dispenser, PreparationOutcome};
use crate::inventory::Inventory;
use crate::model::{LowStock, Scenario};
use crate::reporting::Reporter;

/// Runs scenarios end-to-end, one after the other.
///
/// For each scenario the runner:
/// 1. Builds a fresh [`Inventory`] from the ingredient totals, drawing one
///    threshold per ingredient from the configured policy
/// 2. Creates a [`Dispenser`] with the scenario's outlet count (or the
///    configured default)
/// 3. Spawns one Tokio task per requested beverage
/// 4. Waits for every task to finish
/// 5. Reports the ingredients running low
///
/// # Example
///
/// ```ignore
/// let runner = ScenarioRunner::new(DispenserConfig::default(), Arc::new(ConsoleReporter))?;
/// let report = runner.run(Scenario::load(path).await?).await?;
/// println!("{} prepared", report.prepared().count());
/// ```
pub struct ScenarioRunner {
    config: DispenserConfig,
    reporter: Arc<dyn Reporter>,
}

impl ScenarioRunner {
    /// Creates a runner after validating `config`.
    pub fn new(config: DispenserConfig, reporter: Arc<dyn Reporter>) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config, reporter })
    }

    /// Runs one scenario to completion.
    ///
    /// # Errors
    ///
    /// Only a scenario whose outlet count cannot back an outlet pool (zero,
    /// or more than a semaphore can hold) is rejected, before anything is
    /// prepared. Failed preparations are part of the report, not errors.
    pub async fn run(&self, scenario: Scenario) -> Result<ScenarioReport, ConfigError> {
        let span = info_span!("scenario", name = %scenario.name());
        self.run_scenario(scenario).instrument(span).await
    }

    /// Runs scenarios sequentially, each with its own inventory and dispenser.
    pub async fn run_all<I>(&self, scenarios: I) -> Result<Vec<ScenarioReport>, ConfigError>
    where
        I: IntoIterator<Item = Scenario>,
    {
        let mut reports = Vec::new();
        for scenario in scenarios {
            reports.push(self.run(scenario).await?);
        }
        Ok(reports)
    }

    async fn run_scenario(&self, scenario: Scenario) -> Result<ScenarioReport, ConfigError> {
        let outlets = scenario.outlet_count().unwrap_or(self.config.outlets);
        validate_outlets(outlets)?;

        self.reporter.scenario_started(scenario.name());
        info!(outlets, "Machine warming up");

        let inventory = Inventory::from_totals(scenario.ingredient_totals(), &self.config.threshold);
        let dispenser = Arc::new(
            Dispenser::new(inventory, outlets)
                .with_outlet_wait_timeout(self.config.outlet_wait_timeout)
                .with_reporter(self.reporter.clone()),
        );

        self.reporter.serving_started();
        let recipes = scenario.recipes();
        info!(beverages = recipes.len(), "Serving");

        let mut tasks = JoinSet::new();
        for recipe in recipes {
            let dispenser = dispenser.clone();
            tasks.spawn(async move { dispenser.prepare(&recipe).await }.in_current_span());
        }

        let mut outcomes = Vec::with_capacity(tasks.len());
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(outcome) => outcomes.push(outcome),
                // A panicking preparation only loses its own beverage
                Err(e) => error!(error = %e, "Preparation task failed"),
            }
        }

        let low_running = dispenser.inventory().low_running_snapshot();
        self.reporter.low_running(&low_running);

        let report = ScenarioReport {
            name: scenario.name().to_string(),
            outlets,
            peak_outlets_in_use: dispenser.outlets().peak(),
            outcomes,
            low_running,
            stock_levels: dispenser.inventory().stock_levels(),
        };
        info!(
            prepared = report.prepared().count(),
            failed = report.failed().count(),
            low_running = report.low_running.len(),
            "Scenario complete"
        );
        Ok(report)
    }
}

/// Everything one scenario run produced.
#[derive(Debug, Clone)]
pub struct ScenarioReport {
    pub name: String,
    pub outlets: usize,
    /// Highest number of outlets held at once during the run.
    pub peak_outlets_in_use: usize,
    /// Outcomes in completion order.
    pub outcomes: Vec<PreparationOutcome>,
    pub low_running: Vec<LowStock>,
    /// Final quantity of every ingredient, sorted by name.
    pub stock_levels: Vec<(String, u32)>,
}

impl ScenarioReport {
    /// Names of the beverages that were prepared.
    pub fn prepared(&self) -> impl Iterator<Item = &str> {
        self.outcomes
            .iter()
            .filter(|outcome| outcome.is_prepared())
            .map(|outcome| outcome.beverage())
    }

    pub fn failed(&self) -> impl Iterator<Item = &PreparationOutcome> {
        self.outcomes.iter().filter(|outcome| !outcome.is_prepared())
    }

    pub fn outcome_for(&self, beverage: &str) -> Option<&PreparationOutcome> {
        self.outcomes
            .iter()
            .find(|outcome| outcome.beverage() == beverage)
    }

    /// Final quantity of `ingredient`, if it was stocked.
    pub fn stock_of(&self, ingredient: &str) -> Option<u32> {
        self.stock_levels
            .iter()
            .find(|(name, _)| name == ingredient)
            .map(|(_, quantity)| *quantity)
    }

    pub fn is_running_low(&self, ingredient: &str) -> bool {
        self.low_running
            .iter()
            .any(|item| item.ingredient == ingredient)
    }
}
