//! # Scenario Lifecycle & Orchestration
//!
//! This module drives whole scenarios: it builds the inventory, wires the
//! dispenser to its reporter, fans every requested beverage out to its own
//! Tokio task and waits for all of them before reporting low stock.
//!
//! ## Concurrency Contract
//!
//! A scenario has exactly two places where work waits:
//!
//! 1. **Outlet admission** - inside [`Dispenser::prepare`](crate::dispenser::Dispenser::prepare),
//!    at most `outlets` beverages hold an outlet at once; the rest queue.
//! 2. **The join** - [`ScenarioRunner::run`] returns only after every
//!    beverage task has finished.
//!
//! The low-stock snapshot is taken after the join, so it sees the final
//! quantities. Scenarios never overlap: [`ScenarioRunner::run_all`] finishes
//! one before building the next.
//!
//! ## Failure Isolation
//!
//! A beverage that fails (missing ingredient, not enough stock, no outlet)
//! only produces a failed outcome. Even a panicking task is logged and
//! dropped from the report without stopping its siblings.
//!
//! ## Observability
//!
//! See the [`tracing`] module for the log layout and `RUST_LOG` usage.

pub mod scenario_runner;
pub mod tracing;

pub use scenario_runner::*;
pub use self::tracing::*;
