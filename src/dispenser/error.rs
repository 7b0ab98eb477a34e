//! Error types for a single preparation attempt.
//!
//! None of these escape [`Dispenser::prepare`](super::Dispenser::prepare):
//! each one fails exactly one beverage and is reported as that beverage's
//! outcome. The `Display` text is the message shown to the customer.

use thiserror::Error;

use super::outlet::OutletWaitError;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PreparationError {
    /// The recipe names an ingredient the inventory has never stocked.
    #[error("beverage {beverage} cannot be prepared because ingredient {ingredient} is not available")]
    IngredientNotRegistered { beverage: String, ingredient: String },

    /// The ingredient is stocked but not in the required amount.
    #[error(
        "beverage {beverage} cannot be prepared because amount of item {ingredient} left is \
         {quantity_left}, whereas required quantity is {quantity_required}"
    )]
    InsufficientQuantity {
        beverage: String,
        ingredient: String,
        quantity_left: u32,
        quantity_required: u32,
    },

    /// The wait for an outlet ended before one was free.
    #[error("beverage {beverage} cannot be prepared because {source}")]
    InterruptedWait {
        beverage: String,
        #[source]
        source: OutletWaitError,
    },
}

impl PreparationError {
    pub fn beverage(&self) -> &str {
        match self {
            Self::IngredientNotRegistered { beverage, .. }
            | Self::InsufficientQuantity { beverage, .. }
            | Self::InterruptedWait { beverage, .. } => beverage,
        }
    }

    /// The ingredient that failed the recipe, if the failure was about one.
    pub fn ingredient(&self) -> Option<&str> {
        match self {
            Self::IngredientNotRegistered { ingredient, .. }
            | Self::InsufficientQuantity { ingredient, .. } => Some(ingredient),
            Self::InterruptedWait { .. } => None,
        }
    }
}
