//! # Ingredient Inventory
//!
//! Concurrent store of [`IngredientStock`] records keyed by ingredient name.
//!
//! ## Concurrency Model
//!
//! The name → stock map sits behind a [`parking_lot::RwLock`], but the lock
//! only guards *membership*. Lookups clone an `Arc<IngredientStock>` out and
//! release the lock immediately; quantities are then changed through the
//! stock's own atomic operations. Two outlets consuming different ingredients
//! never contend, and two outlets consuming the same ingredient serialize on a
//! single compare-and-update, never on a lock held across a read and a write.
//!
//! ## Thresholds
//!
//! Every ingredient carries exactly one minimum threshold, fixed when it is
//! first registered. Registering a name twice is a no-op, so the first-seen
//! quantity and threshold win.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, trace};

use crate::config::ThresholdPolicy;
use crate::model::{IngredientStock, LowStock};

#[derive(Debug, Default)]
pub struct Inventory {
    stocks: RwLock<HashMap<String, Arc<IngredientStock>>>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an inventory from ingredient totals, drawing one threshold per
    /// ingredient from `policy`.
    pub fn from_totals(totals: &[(String, u32)], policy: &ThresholdPolicy) -> Self {
        let inventory = Self::new();
        let mut rng = rand::thread_rng();
        for (name, quantity) in totals {
            let threshold = policy.draw(&mut rng);
            inventory.add_with_threshold(name.clone(), *quantity, threshold);
        }
        inventory
    }

    /// Registers an ingredient with a threshold of zero.
    pub fn add(&self, name: impl Into<String>, quantity: u32) -> bool {
        self.add_with_threshold(name, quantity, 0)
    }

    /// Registers an ingredient if it is not already known.
    ///
    /// Returns `true` when the ingredient was inserted, `false` when the name
    /// was already registered (the existing record is left untouched).
    pub fn add_with_threshold(
        &self,
        name: impl Into<String>,
        quantity: u32,
        minimum_threshold: u32,
    ) -> bool {
        let name = name.into();
        let mut stocks = self.stocks.write();
        if stocks.contains_key(&name) {
            trace!(ingredient = %name, "Already registered");
            return false;
        }
        debug!(ingredient = %name, quantity, minimum_threshold, "Registered");
        let stock = IngredientStock::new(name.clone(), quantity, minimum_threshold);
        stocks.insert(name, Arc::new(stock));
        true
    }

    pub fn get(&self, name: &str) -> Option<Arc<IngredientStock>> {
        self.stocks.read().get(name).cloned()
    }

    /// True iff the ingredient is registered, whatever its quantity.
    pub fn is_available(&self, name: &str) -> bool {
        self.stocks.read().contains_key(name)
    }

    /// Atomically consumes `amount` of an ingredient.
    ///
    /// Returns `false` when there is not enough left, or when the ingredient
    /// is not registered. Callers that need to tell those apart check
    /// [`is_available`](Self::is_available) first.
    pub fn try_consume(&self, name: &str, amount: u32) -> bool {
        self.get(name)
            .is_some_and(|stock| stock.try_consume(amount).is_ok())
    }

    /// Resets an ingredient's quantity. Unknown ingredients are ignored.
    pub fn refill(&self, name: &str, quantity: u32) {
        if let Some(stock) = self.get(name) {
            stock.refill(quantity);
            debug!(ingredient = %name, quantity, "Refilled");
        }
    }

    pub fn remove(&self, name: &str) -> Option<Arc<IngredientStock>> {
        self.stocks.write().remove(name)
    }

    /// Names of every registered ingredient.
    pub fn available_ingredients(&self) -> BTreeSet<String> {
        self.stocks.read().keys().cloned().collect()
    }

    /// Every ingredient whose quantity is strictly below its threshold at
    /// call time. The order is whatever the backing map yields.
    pub fn low_running_ingredients(&self) -> Vec<Arc<IngredientStock>> {
        self.stocks
            .read()
            .values()
            .filter(|stock| stock.is_running_low())
            .cloned()
            .collect()
    }

    /// [`low_running_ingredients`](Self::low_running_ingredients) as plain
    /// `(ingredient, quantity left)` values.
    pub fn low_running_snapshot(&self) -> Vec<LowStock> {
        self.low_running_ingredients()
            .iter()
            .map(|stock| stock.snapshot())
            .collect()
    }

    /// Current quantity of every ingredient, sorted by name.
    pub fn stock_levels(&self) -> Vec<(String, u32)> {
        let mut levels: Vec<(String, u32)> = self
            .stocks
            .read()
            .values()
            .map(|stock| (stock.name().to_string(), stock.quantity()))
            .collect();
        levels.sort();
        levels
    }

    pub fn len(&self) -> usize {
        self.stocks.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.stocks.read().is_empty()
    }
}
