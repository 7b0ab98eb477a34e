//! # Reporting Hook
//!
//! The dispenser core never prints. It hands every [`PreparationOutcome`] and
//! the post-scenario low-stock snapshot to a [`Reporter`], and the reporter
//! decides what to do with them.
//!
//! | Reporter | Use |
//! |----------|-----|
//! | [`ConsoleReporter`] | The `dispenser` binary: customer-facing lines on stdout |
//! | [`RecordingReporter`] | Tests: keeps everything in memory for assertions |
//! | [`NoopReporter`] | Default for a bare [`Dispenser`](crate::dispenser::Dispenser) |
//!
//! Reporters are called concurrently from every outlet, so they must be
//! `Send + Sync`.

pub mod recorder;

pub use recorder::RecordingReporter;

use crate::dispenser::PreparationOutcome;
use crate::model::LowStock;

/// Receives everything a scenario run produces.
///
/// # Provided Methods
/// [`scenario_started`](Reporter::scenario_started) and
/// [`serving_started`](Reporter::serving_started) default to doing nothing.
pub trait Reporter: Send + Sync {
    /// Called once before the inventory for `scenario` is built.
    fn scenario_started(&self, _scenario: &str) {}

    /// Called once the dispenser is ready and before any beverage is submitted.
    fn serving_started(&self) {}

    /// Called once per preparation attempt, from the task that ran it.
    fn outcome(&self, outcome: &PreparationOutcome);

    /// Called once after every preparation of a scenario has finished.
    /// `items` may be empty.
    fn low_running(&self, items: &[LowStock]);
}

/// Writes the customer-facing messages to stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleReporter;

impl ConsoleReporter {
    pub fn new() -> Self {
        Self
    }
}

impl Reporter for ConsoleReporter {
    fn scenario_started(&self, scenario: &str) {
        println!("Processing input : {}", scenario);
        println!("machine warming up!");
    }

    fn serving_started(&self) {
        println!("ready to serve you some hot beverage!");
    }

    fn outcome(&self, outcome: &PreparationOutcome) {
        println!("{}", outcome);
    }

    fn low_running(&self, items: &[LowStock]) {
        if items.is_empty() {
            return;
        }
        println!("running low on the following ingredients! please stock up!");
        println!("ingredient | quantity left");
        for item in items {
            println!("{}", item);
        }
    }
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopReporter;

impl Reporter for NoopReporter {
    fn outcome(&self, _outcome: &PreparationOutcome) {}

    fn low_running(&self, _items: &[LowStock]) {}
}
