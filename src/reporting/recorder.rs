//! # Recording Reporter & Testing Guide
//!
//! [`RecordingReporter`] implements [`Reporter`] entirely in memory. Attach it
//! to a [`Dispenser`](crate::dispenser::Dispenser) or a
//! [`ScenarioRunner`](crate::lifecycle::ScenarioRunner) and assert on what was
//! reported afterwards.
//!
//! ## Writing Deterministic Tests
//!
//! Which of two beverages wins a contested ingredient is up to the scheduler.
//! Assert on totals (how many succeeded, what is left) rather than on which
//! beverage won, and pin thresholds with
//! [`ThresholdPolicy::Fixed`](crate::config::ThresholdPolicy::Fixed).
//!
//! ```rust
//! use std::sync::Arc;
//! use beverage_dispenser::config::{DispenserConfig, ThresholdPolicy};
//! use beverage_dispenser::lifecycle::ScenarioRunner;
//! use beverage_dispenser::model::Scenario;
//! use beverage_dispenser::reporting::RecordingReporter;
//!
//! #[tokio::main]
//! async fn main() {
//!     let reporter = Arc::new(RecordingReporter::new());
//!     let config = DispenserConfig::default().with_threshold(ThresholdPolicy::Fixed(10));
//!     let runner = ScenarioRunner::new(config, reporter.clone()).unwrap();
//!
//!     let scenario = Scenario::new("tea-time")
//!         .with_ingredient("hot_water", 150)
//!         .with_beverage("tea", [("hot_water", 100)])
//!         .with_beverage("tea", [("hot_water", 100)]);
//!     runner.run(scenario).await.unwrap();
//!
//!     // Exactly one tea fits, whichever task got there first
//!     assert_eq!(reporter.prepared_count(), 1);
//!     assert_eq!(reporter.failed_count(), 1);
//! }
//! ```

use parking_lot::Mutex;

use super::Reporter;
use crate::dispenser::PreparationOutcome;
use crate::model::LowStock;

#[derive(Debug, Default)]
pub struct RecordingReporter {
    scenarios: Mutex<Vec<String>>,
    outcomes: Mutex<Vec<PreparationOutcome>>,
    low_running: Mutex<Vec<Vec<LowStock>>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scenario names in the order they started.
    pub fn scenarios(&self) -> Vec<String> {
        self.scenarios.lock().clone()
    }

    /// Every outcome, in the order the outlets reported them.
    pub fn outcomes(&self) -> Vec<PreparationOutcome> {
        self.outcomes.lock().clone()
    }

    pub fn outcomes_for(&self, beverage: &str) -> Vec<PreparationOutcome> {
        self.outcomes
            .lock()
            .iter()
            .filter(|outcome| outcome.beverage() == beverage)
            .cloned()
            .collect()
    }

    pub fn prepared_count(&self) -> usize {
        self.outcomes.lock().iter().filter(|o| o.is_prepared()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes.lock().iter().filter(|o| !o.is_prepared()).count()
    }

    /// One low-stock snapshot per finished scenario.
    pub fn low_running_reports(&self) -> Vec<Vec<LowStock>> {
        self.low_running.lock().clone()
    }
}

impl Reporter for RecordingReporter {
    fn scenario_started(&self, scenario: &str) {
        self.scenarios.lock().push(scenario.to_string());
    }

    fn outcome(&self, outcome: &PreparationOutcome) {
        self.outcomes.lock().push(outcome.clone());
    }

    fn low_running(&self, items: &[LowStock]) {
        self.low_running.lock().push(items.to_vec());
    }
}
