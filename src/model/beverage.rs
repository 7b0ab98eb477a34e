/// Immutable recipe for one requested beverage.
///
/// Ingredients keep the order in which they were declared. The dispenser walks
/// them in that order and stops at the first one it cannot serve, so the order
/// decides which ingredients were already consumed when a recipe fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BeverageRecipe {
    name: String,
    ingredients: Vec<(String, u32)>,
}

impl BeverageRecipe {
    /// Creates a recipe from `(ingredient, required quantity)` pairs.
    ///
    /// # Arguments
    /// * `name` - Beverage name used in every outcome record
    /// * `ingredients` - Required ingredients in declaration order
    pub fn new<I, S>(name: impl Into<String>, ingredients: I) -> Self
    where
        I: IntoIterator<Item = (S, u32)>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            ingredients: ingredients
                .into_iter()
                .map(|(ingredient, quantity)| (ingredient.into(), quantity))
                .collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Required ingredients in declaration order.
    pub fn ingredients(&self) -> &[(String, u32)] {
        &self.ingredients
    }

    pub fn required(&self, ingredient: &str) -> Option<u32> {
        self.ingredients
            .iter()
            .find(|(name, _)| name == ingredient)
            .map(|(_, quantity)| *quantity)
    }
}
