//! Scenario input: outlets, ingredient totals and the requested beverages.
//!
//! The JSON layout is the one the dispenser has always accepted:
//!
//! ```json
//! {
//!   "machine": {
//!     "outlets": { "count_n": 3 },
//!     "total_items_quantity": { "hot_water": 500, "hot_milk": 500 },
//!     "beverages": {
//!       "hot_tea": { "hot_water": 200, "hot_milk": 100 }
//!     }
//!   }
//! }
//! ```
//!
//! `outlets` may be omitted. Maps are read in document order so that recipe
//! ingredient order matches what the input declares. A key repeated within one
//! map keeps its first position and takes the last value, as a JSON object
//! would.

use std::fmt;
use std::marker::PhantomData;
use std::path::Path;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

use crate::error::AppError;
use crate::model::BeverageRecipe;

#[derive(Debug, Clone, Deserialize)]
struct ScenarioFile {
    machine: Scenario,
}

/// Outlet section of a scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Outlets {
    pub count_n: usize,
}

/// Ingredient requirements of one beverage, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Requirements(pub Vec<(String, u32)>);

impl<'de> Deserialize<'de> for Requirements {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        ordered_pairs(deserializer).map(Requirements)
    }
}

/// One complete input description, processed end-to-end before the next one.
///
/// Parsed input names each beverage once. The [`with_beverage`](Self::with_beverage)
/// builder appends instead, so the same beverage can be requested many times.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Scenario {
    #[serde(skip)]
    name: String,
    #[serde(default)]
    outlets: Option<Outlets>,
    #[serde(deserialize_with = "ordered_pairs")]
    total_items_quantity: Vec<(String, u32)>,
    #[serde(deserialize_with = "ordered_pairs")]
    beverages: Vec<(String, Requirements)>,
}

impl Scenario {
    /// Creates an empty scenario; fill it with the `with_*` builders.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Parses a scenario from its JSON representation.
    pub fn from_json(name: impl Into<String>, raw: &str) -> Result<Self, serde_json::Error> {
        let file: ScenarioFile = serde_json::from_str(raw)?;
        Ok(Self {
            name: name.into(),
            ..file.machine
        })
    }

    /// Reads and parses a scenario file. The path becomes the scenario name.
    pub async fn load(path: &Path) -> Result<Self, AppError> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| AppError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_json(path.display().to_string(), &raw).map_err(|source| AppError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn with_outlets(mut self, count: usize) -> Self {
        self.outlets = Some(Outlets { count_n: count });
        self
    }

    pub fn with_ingredient(mut self, name: impl Into<String>, quantity: u32) -> Self {
        self.total_items_quantity.push((name.into(), quantity));
        self
    }

    pub fn with_beverage<I, S>(mut self, name: impl Into<String>, ingredients: I) -> Self
    where
        I: IntoIterator<Item = (S, u32)>,
        S: Into<String>,
    {
        let requirements = ingredients
            .into_iter()
            .map(|(ingredient, quantity)| (ingredient.into(), quantity))
            .collect();
        self.beverages.push((name.into(), Requirements(requirements)));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Outlet count declared by the input, if any.
    pub fn outlet_count(&self) -> Option<usize> {
        self.outlets.map(|outlets| outlets.count_n)
    }

    /// Total quantity per ingredient, in declaration order.
    pub fn ingredient_totals(&self) -> &[(String, u32)] {
        &self.total_items_quantity
    }

    /// One recipe per requested beverage, in declaration order.
    pub fn recipes(&self) -> Vec<BeverageRecipe> {
        self.beverages
            .iter()
            .map(|(name, requirements)| {
                BeverageRecipe::new(name.clone(), requirements.0.iter().cloned())
            })
            .collect()
    }
}

/// Deserializes a JSON object into `(key, value)` pairs without losing order.
fn ordered_pairs<'de, D, V>(deserializer: D) -> Result<Vec<(String, V)>, D::Error>
where
    D: Deserializer<'de>,
    V: Deserialize<'de>,
{
    struct OrderedPairs<V>(PhantomData<V>);

    impl<'de, V: Deserialize<'de>> Visitor<'de> for OrderedPairs<V> {
        type Value = Vec<(String, V)>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map of names to values")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            let mut pairs = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((key, value)) = map.next_entry::<String, V>()? {
                match pairs.iter_mut().find(|(existing, _)| *existing == key) {
                    Some(pair) => pair.1 = value,
                    None => pairs.push((key, value)),
                }
            }
            Ok(pairs)
        }
    }

    deserializer.deserialize_map(OrderedPairs(PhantomData))
}
