//! Derived, read-only views over a fetched recipe collection.
//!
//! Everything here is a pure function of the collection: nothing is fetched
//! again and the collection order is never changed.

use crate::Recipe;
use url::form_urlencoded;

mod live;
mod model;

pub use live::{LiveSearch, DEFAULT_DEBOUNCE};
pub use model::SearchPreview;

/// Maximum number of recipes returned by [`similar_recipes`].
pub const SIMILAR_LIMIT: usize = 3;
/// Number of recipes featured on the home page.
pub const HIGHLIGHT_LIMIT: usize = 3;
/// Number of matches shown in a [`SearchPreview`].
pub const PREVIEW_LIMIT: usize = 3;

/// Returns the recipes whose title or common title contains `query`,
/// ignoring case. An empty query matches every recipe.
pub fn search_by_title<'a>(query: &str, recipes: &'a [Recipe]) -> Vec<&'a Recipe> {
    let needle = query.to_lowercase();
    recipes
        .iter()
        .filter(|recipe| recipe.title_contains(&needle))
        .collect()
}

/// Returns up to three other recipes sharing the target's license or type.
///
/// The target itself (matched by slug) is never included. Results follow the
/// collection order.
pub fn similar_recipes<'a>(target: &Recipe, recipes: &'a [Recipe]) -> Vec<&'a Recipe> {
    recipes
        .iter()
        .filter(|recipe| recipe.slug != target.slug)
        .filter(|recipe| recipe.license == target.license || recipe.kind == target.kind)
        .take(SIMILAR_LIMIT)
        .collect()
}

/// Returns the recipes featured on the home page.
pub fn highlights(recipes: &[Recipe]) -> &[Recipe] {
    &recipes[..recipes.len().min(HIGHLIGHT_LIMIT)]
}

/// Builds the header search dropdown for `query`.
pub fn search_preview<'a>(query: &str, recipes: &'a [Recipe]) -> SearchPreview<'a> {
    let mut results = search_by_title(query, recipes);
    let total = results.len();
    results.truncate(PREVIEW_LIMIT);

    let see_all_url = format!(
        "/recipes?{}",
        form_urlencoded::Serializer::new(String::new())
            .append_pair("q", query)
            .finish()
    );

    SearchPreview {
        results,
        total,
        see_all_url,
    }
}

/// State of the search page: a title query plus one optional chip.
///
/// A chip value matches a recipe when it equals the recipe's category,
/// license, type or difficulty. Selecting the active chip again clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuickSearch {
    term: String,
    selected: Option<String>,
}

impl QuickSearch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn set_term(&mut self, term: impl Into<String>) {
        self.term = term.into();
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn toggle(&mut self, value: &str) {
        if self.selected.as_deref() == Some(value) {
            self.selected = None;
        } else {
            self.selected = Some(value.to_string());
        }
    }

    pub fn results<'a>(&self, recipes: &'a [Recipe]) -> Vec<&'a Recipe> {
        let needle = self.term.to_lowercase();
        recipes
            .iter()
            .filter(|recipe| recipe.title_contains(&needle))
            .filter(|recipe| match self.selected.as_deref() {
                None => true,
                Some(value) => {
                    recipe.category == value
                        || recipe.license == value
                        || recipe.kind == value
                        || recipe.difficulty.to_string() == value
                }
            })
            .collect()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn recipe(slug: &str, title: &str, category: &str, license: &str, kind: &str) -> Recipe {
        Recipe {
            slug: slug.to_string(),
            title: title.to_string(),
            common_title: String::new(),
            category: category.to_string(),
            license: license.to_string(),
            kind: kind.to_string(),
            difficulty: 1,
            desc: String::new(),
            dressing: String::new(),
            images: Vec::new(),
            ingredients: Vec::new(),
            steps: Vec::new(),
            default_persons: 4,
            prep_time: "10 min".to_string(),
            cooking_time: None,
            rest_time: None,
        }
    }

    pub(crate) fn collection() -> Vec<Recipe> {
        let mut tatin = recipe("tarte-tatin", "Tarte Tatin", "Dessert", "Star Wars", "Film");
        tatin.common_title = "Upside-down Star Tart".to_string();
        tatin.difficulty = 2;
        let mut lembas = recipe("lembas", "Lembas", "Boulangerie", "Le Seigneur des Anneaux", "Film");
        lembas.difficulty = 1;
        let mut bantha = recipe("lait-bleu", "Lait de Bantha", "Boisson", "Star Wars", "Film");
        bantha.difficulty = 1;
        let mut ramen = recipe("ramen-naruto", "Ramen d'Ichiraku", "Plat", "Naruto", "Anime");
        ramen.difficulty = 3;
        let mut cake = recipe("portal-cake", "The cake is a lie", "Dessert", "Portal", "Jeu vidéo");
        cake.difficulty = 2;
        vec![tatin, lembas, bantha, ramen, cake]
    }

    fn slugs(recipes: &[&Recipe]) -> Vec<String> {
        recipes.iter().map(|r| r.slug.clone()).collect()
    }

    #[test]
    fn test_search_empty_query_matches_all() {
        let recipes = collection();
        assert_eq!(search_by_title("", &recipes).len(), recipes.len());
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let recipes = collection();
        let upper = search_by_title("STAR", &recipes);
        let lower = search_by_title("star", &recipes);
        assert_eq!(upper, lower);
        assert_eq!(slugs(&lower), ["tarte-tatin"]);
    }

    #[test]
    fn test_search_keeps_collection_order() {
        let recipes = collection();
        let results = search_by_title("a", &recipes);
        assert_eq!(
            slugs(&results),
            ["tarte-tatin", "lembas", "lait-bleu", "ramen-naruto", "portal-cake"]
        );
    }

    #[test]
    fn test_search_no_matches() {
        let recipes = collection();
        assert!(search_by_title("sushi", &recipes).is_empty());
        assert!(search_by_title("tatin", &[]).is_empty());
    }

    #[test]
    fn test_similar_recipes_by_license() {
        let recipes = collection();
        let similar = similar_recipes(&recipes[0], &recipes);
        assert!(similar.iter().any(|r| r.slug == "lait-bleu"));
        assert!(similar.iter().all(|r| r.slug != "tarte-tatin"));
    }

    #[test]
    fn test_similar_recipes_limit_and_order() {
        let recipes = collection();
        // Lembas shares "Film" with tarte-tatin and lait-bleu
        let similar = similar_recipes(&recipes[1], &recipes);
        assert_eq!(slugs(&similar), ["tarte-tatin", "lait-bleu"]);

        let mut many = collection();
        for i in 0..5 {
            many.push(recipe(&format!("extra-{i}"), "Extra", "Plat", "Naruto", "Anime"));
        }
        let similar = similar_recipes(&many[3], &many);
        assert_eq!(similar.len(), SIMILAR_LIMIT);
        assert_eq!(slugs(&similar), ["extra-0", "extra-1", "extra-2"]);
    }

    #[test]
    fn test_similar_recipes_none() {
        let recipes = collection();
        let loner = recipe("loner", "Loner", "Plat", "Nothing", "Livre");
        assert!(similar_recipes(&loner, &recipes).is_empty());
    }

    #[test]
    fn test_highlights() {
        let recipes = collection();
        assert_eq!(highlights(&recipes).len(), HIGHLIGHT_LIMIT);
        assert_eq!(highlights(&recipes)[0].slug, "tarte-tatin");
        assert!(highlights(&[]).is_empty());
        assert_eq!(highlights(&recipes[..1]).len(), 1);
    }

    #[test]
    fn test_search_preview() {
        let recipes = collection();
        let preview = search_preview("a", &recipes);
        assert_eq!(preview.results.len(), PREVIEW_LIMIT);
        assert_eq!(preview.total, 5);
        assert!(preview.has_more());
        assert_eq!(preview.see_all_url, "/recipes?q=a");

        let preview = search_preview("tarte tatin", &recipes);
        assert!(!preview.has_more());
        assert_eq!(preview.see_all_url, "/recipes?q=tarte+tatin");

        let preview = search_preview("sushi", &recipes);
        assert!(preview.is_empty());
    }

    #[test]
    fn test_quick_search_chip() {
        let recipes = collection();
        let mut search = QuickSearch::new();
        assert_eq!(search.results(&recipes).len(), 5);

        search.toggle("Star Wars");
        assert_eq!(search.selected(), Some("Star Wars"));
        assert_eq!(slugs(&search.results(&recipes)), ["tarte-tatin", "lait-bleu"]);

        search.toggle("2");
        assert_eq!(slugs(&search.results(&recipes)), ["tarte-tatin", "portal-cake"]);

        search.set_term("cake");
        assert_eq!(slugs(&search.results(&recipes)), ["portal-cake"]);

        search.toggle("2");
        assert_eq!(search.selected(), None);
        assert_eq!(search.term(), "cake");
    }
}
