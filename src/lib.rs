//! # Beverage Dispenser
//!
//! > **A multi-outlet beverage machine serving concurrent orders from one shared inventory.**
//!
//! Every requested beverage runs as its own Tokio task. A fixed number of
//! *outlets* bounds how many of them prepare at the same time, and all of them
//! draw from the same ingredient stock. The crate guarantees that no two
//! concurrent preparations can over-consume an ingredient, and that the
//! ingredients running low are reported once a scenario has finished.
//!
//! ## 🏗️ Design Philosophy
//!
//! ### Atomic stock, bounded admission
//!
//! - **Inventory**: each ingredient's quantity is an atomic counter changed by a
//!   single compare-and-update, so check-and-decrement is indivisible.
//! - **Outlets**: a semaphore with one permit per outlet. Waiting for an outlet
//!   is the only place a preparation suspends.
//! - **Reporting**: the core never prints; it hands outcomes to a
//!   [`Reporter`](reporting::Reporter).
//!
//! ### What is deliberately *not* guaranteed
//!
//! - Which of two beverages wins a contested ingredient.
//! - That a failed recipe gives back what it already consumed. Ingredients
//!   are taken in declaration order and a later failure does not roll the
//!   earlier ones back.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Data ([`model`])
//! [`BeverageRecipe`](model::BeverageRecipe), [`IngredientStock`](model::IngredientStock)
//! and the [`Scenario`](model::Scenario) input format.
//!
//! ### 2. The Stock ([`inventory`])
//! The concurrent [`Inventory`](inventory::Inventory) with per-ingredient thresholds.
//!
//! ### 3. The Machine ([`dispenser`])
//! [`Dispenser`](dispenser::Dispenser) and its [`OutletPool`](dispenser::OutletPool).
//!
//! ### 4. The Orchestrator ([`lifecycle`])
//! [`ScenarioRunner`](lifecycle::ScenarioRunner) fans beverages out, joins them
//! and reports low stock. Also home of [`setup_tracing`](lifecycle::setup_tracing).
//!
//! ### 5. The Edges ([`reporting`], [`config`], [`cli`])
//! Console and in-memory reporters, runtime settings, argument parsing.
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! RUST_LOG=info cargo run -- --input-file scenario.json
//! ```
//!
//! ### Running Tests
//!
//! ```bash
//! cargo test
//! ```

pub mod cli;
pub mod config;
pub mod dispenser;
pub mod error;
pub mod inventory;
pub mod lifecycle;
pub mod model;
pub mod reporting;

pub use error::AppError;
