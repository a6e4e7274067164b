mod difficulty;
mod recipe;

pub use difficulty::Difficulty;
pub use recipe::{Ingredient, Recipe};
