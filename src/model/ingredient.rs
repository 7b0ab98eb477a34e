//! Ingredient stock records shared by every concurrent preparation.

use std::fmt::Display;
use std::sync::atomic::{AtomicU32, Ordering};

/// Mutable stock record for one named ingredient.
///
/// # Concurrency
/// The quantity lives in an [`AtomicU32`] and is only ever changed through
/// [`try_consume`](Self::try_consume) (a single compare-and-update loop) or
/// [`refill`](Self::refill). A decrement that would go below zero is rejected
/// and leaves the quantity untouched, so the stock can never go negative no
/// matter how many outlets race on it.
///
/// The minimum threshold is fixed when the record is created.
#[derive(Debug)]
pub struct IngredientStock {
    name: String,
    quantity: AtomicU32,
    minimum_threshold: u32,
}

impl IngredientStock {
    /// Creates a new stock record.
    ///
    /// # Arguments
    /// * `name` - Unique ingredient name (the inventory key)
    /// * `quantity` - Initial quantity on hand
    /// * `minimum_threshold` - Quantity below which the ingredient is running low
    pub fn new(name: impl Into<String>, quantity: u32, minimum_threshold: u32) -> Self {
        Self {
            name: name.into(),
            quantity: AtomicU32::new(quantity),
            minimum_threshold,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current quantity on hand.
    pub fn quantity(&self) -> u32 {
        self.quantity.load(Ordering::SeqCst)
    }

    pub fn minimum_threshold(&self) -> u32 {
        self.minimum_threshold
    }

    /// True when the quantity is strictly below the minimum threshold.
    pub fn is_running_low(&self) -> bool {
        self.quantity() < self.minimum_threshold
    }

    /// Atomically takes `amount` out of the stock if enough is left.
    ///
    /// Returns `Ok(remaining)` on success, or `Err(current)` with the quantity
    /// observed at the moment of the rejected update.
    pub fn try_consume(&self, amount: u32) -> Result<u32, u32> {
        self.quantity
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |current| {
                current.checked_sub(amount)
            })
            .map(|previous| previous - amount)
    }

    /// Unconditionally resets the quantity.
    pub fn refill(&self, quantity: u32) {
        self.quantity.store(quantity, Ordering::SeqCst);
    }

    /// Point-in-time copy used for low-stock reporting.
    pub fn snapshot(&self) -> LowStock {
        LowStock {
            ingredient: self.name.clone(),
            quantity_left: self.quantity(),
        }
    }
}

/// An `(ingredient, quantity left)` pair reported after a scenario.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LowStock {
    pub ingredient: String,
    pub quantity_left: u32,
}

impl Display for LowStock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} | {}", self.ingredient, self.quantity_left)
    }
}
