//! Pure data structures: recipes, stock records and scenario input.

pub mod beverage;
pub mod ingredient;
pub mod scenario;

pub use beverage::*;
pub use ingredient::*;
pub use scenario::*;
