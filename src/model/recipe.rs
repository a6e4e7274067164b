use super::Difficulty;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single recipe as returned by the recipe API.
///
/// Recipes are plain values: once fetched they are never mutated, only
/// filtered, sliced and rendered. `ingredients` and `steps` keep the order
/// chosen by the author.
///
/// # Examples
///
/// ```
/// use gastronogeek::Recipe;
///
/// let recipe: Recipe = serde_json::from_str(r#"{
///     "slug": "tarte-tatin",
///     "title": "Tarte Tatin",
///     "commonTitle": "Upside-down apple tart",
///     "category": "Dessert",
///     "license": "Star Wars",
///     "type": "Film",
///     "difficulty": 2,
///     "defaultPersons": 6,
///     "prepTime": "30 min"
/// }"#)?;
///
/// assert_eq!(recipe.difficulty_level().label(), "Medium");
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    /// Unique, URL-safe identifier
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub common_title: String,
    pub category: String,
    pub license: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub difficulty: u8,
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    pub dressing: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    #[serde(default)]
    pub steps: Vec<String>,
    /// Number of persons the ingredient quantities are written for
    pub default_persons: u32,
    #[serde(default)]
    pub prep_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cooking_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rest_time: Option<String>,
}

impl Recipe {
    pub fn difficulty_level(&self) -> Difficulty {
        Difficulty::from(self.difficulty)
    }

    /// Returns the first image, used as the card and header picture.
    pub fn cover_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    /// Returns the ingredient list adjusted for `persons` people.
    ///
    /// Quantities are multiplied by `persons / default_persons`. Ingredients
    /// without a quantity are returned as-is. If the recipe declares zero
    /// default persons, nothing is scaled.
    pub fn scaled_ingredients(&self, persons: u32) -> Vec<Ingredient> {
        if self.default_persons == 0 {
            return self.ingredients.clone();
        }
        let factor = f64::from(persons) / f64::from(self.default_persons);
        self.ingredients
            .iter()
            .map(|ingredient| ingredient.scaled(factor))
            .collect()
    }

    /// Case-insensitive title match. `needle` must already be lowercase.
    pub(crate) fn title_contains(&self, needle: &str) -> bool {
        needle.is_empty()
            || self.title.to_lowercase().contains(needle)
            || self.common_title.to_lowercase().contains(needle)
    }
}

/// One line of a recipe's ingredient list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    #[serde(default)]
    pub quantity: Option<f64>,
    #[serde(default)]
    pub unit: Option<String>,
    pub name: String,
}

impl Ingredient {
    fn scaled(&self, factor: f64) -> Self {
        Ingredient {
            quantity: self.quantity.map(|quantity| quantity * factor),
            unit: self.unit.clone(),
            name: self.name.clone(),
        }
    }
}

impl fmt::Display for Ingredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(quantity) = self.quantity.filter(|q| *q != 0.0) {
            write!(f, "{quantity} ")?;
        }
        if let Some(unit) = self.unit.as_deref().filter(|u| !u.is_empty()) {
            write!(f, "{unit} ")?;
        }
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    const TARTE_TATIN: &str = indoc! {r#"
        {
            "slug": "tarte-tatin",
            "title": "La tarte Tatin de Tante Béru",
            "commonTitle": "Tarte Tatin",
            "category": "Dessert",
            "license": "Star Wars",
            "type": "Film",
            "difficulty": 2,
            "defaultPersons": 4,
            "prepTime": "30 min",
            "cookingTime": "45 min",
            "images": ["https://img.example/tatin-1.jpg", "https://img.example/tatin-2.jpg"],
            "ingredients": [
                {"quantity": 6, "unit": null, "name": "pommes"},
                {"quantity": 100, "unit": "g", "name": "beurre"},
                {"quantity": null, "unit": null, "name": "cannelle"}
            ],
            "steps": ["Caraméliser", "Disposer les pommes", "Enfourner"]
        }
    "#};

    fn tarte_tatin() -> Recipe {
        serde_json::from_str(TARTE_TATIN).unwrap()
    }

    #[test]
    fn test_deserialize_camel_case() {
        let recipe = tarte_tatin();
        assert_eq!(recipe.slug, "tarte-tatin");
        assert_eq!(recipe.common_title, "Tarte Tatin");
        assert_eq!(recipe.kind, "Film");
        assert_eq!(recipe.default_persons, 4);
        assert_eq!(recipe.cooking_time.as_deref(), Some("45 min"));
        assert!(recipe.rest_time.is_none());
        assert!(recipe.desc.is_empty());
        assert_eq!(recipe.difficulty_level(), Difficulty::Medium);
    }

    #[test]
    fn test_order_is_preserved() {
        let recipe = tarte_tatin();
        let names: Vec<_> = recipe.ingredients.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["pommes", "beurre", "cannelle"]);
        assert_eq!(recipe.steps[2], "Enfourner");
    }

    #[test]
    fn test_cover_image() {
        let mut recipe = tarte_tatin();
        assert_eq!(recipe.cover_image(), Some("https://img.example/tatin-1.jpg"));
        recipe.images.clear();
        assert_eq!(recipe.cover_image(), None);
    }

    #[test]
    fn test_scaled_ingredients() {
        let recipe = tarte_tatin();
        let scaled = recipe.scaled_ingredients(2);
        assert_eq!(scaled[0].quantity, Some(3.0));
        assert_eq!(scaled[1].quantity, Some(50.0));
        assert_eq!(scaled[1].unit.as_deref(), Some("g"));
        assert_eq!(scaled[2].quantity, None);
        assert_eq!(scaled[2].name, "cannelle");
    }

    #[test]
    fn test_scaled_ingredients_without_baseline() {
        let mut recipe = tarte_tatin();
        recipe.default_persons = 0;
        assert_eq!(recipe.scaled_ingredients(8), recipe.ingredients);
    }

    #[test]
    fn test_ingredient_display() {
        let recipe = tarte_tatin();
        let lines: Vec<String> = recipe.ingredients.iter().map(|i| i.to_string()).collect();
        assert_eq!(lines, ["6 pommes", "100 g beurre", "cannelle"]);

        let half = Ingredient {
            quantity: Some(0.5),
            unit: Some("l".to_string()),
            name: "lait".to_string(),
        };
        assert_eq!(half.to_string(), "0.5 l lait");
    }

    #[test]
    fn test_title_contains() {
        let recipe = tarte_tatin();
        assert!(recipe.title_contains(""));
        assert!(recipe.title_contains("béru"));
        assert!(recipe.title_contains("tatin"));
        assert!(!recipe.title_contains("crumble"));
    }
}
