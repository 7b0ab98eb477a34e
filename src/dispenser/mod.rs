//! # Beverage Dispenser
//!
//! The [`Dispenser`] owns one [`Inventory`] and one [`OutletPool`] and runs a
//! single preparation attempt per call to [`Dispenser::prepare`].
//!
//! ## Preparation Flow
//!
//! 1. Wait for an outlet (unbounded unless a wait timeout is configured).
//! 2. Holding the outlet, check that every ingredient of the recipe is
//!    registered. An unknown ingredient fails the recipe before anything is
//!    consumed.
//! 3. Walk the recipe in declaration order, consuming each ingredient
//!    atomically and failing if there is not enough left.
//! 4. Release the outlet.
//! 5. Report the outcome.
//!
//! The walk stops at the first short ingredient. Ingredients consumed
//! earlier in the same recipe are **not** given back: a cold coffee that runs
//! out of milk has still used its hot water.
//!
//! ## Structure
//!
//! - [`outlet`] - [`OutletPool`] admission gate
//! - [`error`] - [`PreparationError`] taxonomy
//! - [`outcome`] - [`PreparationOutcome`] reported per beverage
//!
//! ## Usage
//!
//! ```rust
//! use beverage_dispenser::dispenser::Dispenser;
//! use beverage_dispenser::inventory::Inventory;
//! use beverage_dispenser::model::BeverageRecipe;
//!
//! #[tokio::main]
//! async fn main() {
//!     let inventory = Inventory::new();
//!     inventory.add_with_threshold("hot_water", 500, 10);
//!     inventory.add_with_threshold("ginger_syrup", 100, 10);
//!
//!     let dispenser = Dispenser::new(inventory, 3);
//!     let recipe = BeverageRecipe::new("ginger_tea", [("hot_water", 200), ("ginger_syrup", 30)]);
//!
//!     let outcome = dispenser.prepare(&recipe).await;
//!     assert!(outcome.is_prepared());
//!     assert_eq!(dispenser.inventory().get("hot_water").unwrap().quantity(), 300);
//! }
//! ```

pub mod error;
pub mod outcome;
pub mod outlet;

pub use error::*;
pub use outcome::*;
pub use outlet::*;

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, instrument, warn};

use crate::inventory::Inventory;
use crate::model::BeverageRecipe;
use crate::reporting::{NoopReporter, Reporter};

pub struct Dispenser {
    inventory: Inventory,
    outlets: OutletPool,
    outlet_wait_timeout: Option<Duration>,
    reporter: Arc<dyn Reporter>,
}

impl Dispenser {
    /// Creates a dispenser with `outlets` parallel outlets.
    ///
    /// Outcomes are not reported anywhere until a reporter is attached with
    /// [`with_reporter`](Self::with_reporter).
    pub fn new(inventory: Inventory, outlets: usize) -> Self {
        Self {
            inventory,
            outlets: OutletPool::new(outlets),
            outlet_wait_timeout: None,
            reporter: Arc::new(NoopReporter),
        }
    }

    pub fn with_reporter(mut self, reporter: Arc<dyn Reporter>) -> Self {
        self.reporter = reporter;
        self
    }

    /// Gives up on a preparation if no outlet frees up within `timeout`.
    pub fn with_outlet_wait_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.outlet_wait_timeout = timeout;
        self
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn outlets(&self) -> &OutletPool {
        &self.outlets
    }

    /// Attempts to prepare one beverage.
    ///
    /// Never fails: every problem is turned into a
    /// [`PreparationOutcome::Failed`] for this beverage only, reported and
    /// returned.
    #[instrument(skip(self, recipe), fields(beverage = %recipe.name()))]
    pub async fn prepare(&self, recipe: &BeverageRecipe) -> PreparationOutcome {
        let result = match self.outlets.acquire_within(self.outlet_wait_timeout).await {
            Ok(permit) => {
                let result = self.dispense(recipe);
                permit.release();
                result
            }
            Err(source) => Err(PreparationError::InterruptedWait {
                beverage: recipe.name().to_string(),
                source,
            }),
        };

        let outcome = match result {
            Ok(()) => {
                info!("Prepared");
                PreparationOutcome::Prepared {
                    beverage: recipe.name().to_string(),
                }
            }
            Err(error) => {
                warn!(error = %error, "Preparation failed");
                PreparationOutcome::Failed(error)
            }
        };

        self.reporter.outcome(&outcome);
        outcome
    }

    /// Consumes the recipe's ingredients in order, stopping at the first
    /// failure. Must be called while holding an outlet.
    fn dispense(&self, recipe: &BeverageRecipe) -> Result<(), PreparationError> {
        let mut stocks = Vec::with_capacity(recipe.ingredients().len());
        for (ingredient, required) in recipe.ingredients() {
            let Some(stock) = self.inventory.get(ingredient) else {
                return Err(PreparationError::IngredientNotRegistered {
                    beverage: recipe.name().to_string(),
                    ingredient: ingredient.clone(),
                });
            };
            stocks.push((ingredient, *required, stock));
        }

        for (ingredient, required, stock) in stocks {
            match stock.try_consume(required) {
                Ok(remaining) => debug!(%ingredient, required, remaining, "Consumed"),
                Err(quantity_left) => {
                    return Err(PreparationError::InsufficientQuantity {
                        beverage: recipe.name().to_string(),
                        ingredient: ingredient.clone(),
                        quantity_left,
                        quantity_required: required,
                    });
                }
            }
        }
        Ok(())
    }
}
