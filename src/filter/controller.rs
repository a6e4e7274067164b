use super::{derive_facet_vocabulary, matching, Facet, FacetVocabulary, FilterState};
use crate::Recipe;
use tracing::debug;

/// Where URL rewrites go.
///
/// Rewrites are fire-and-forget: the controller never waits on them and has
/// nothing to roll back if one fails.
pub trait History {
    fn replace(&self, url: &str);
}

/// Owns the filter state of one listing page.
///
/// Between calls the controller is idle: the state matches the last URL it
/// wrote or restored. Each mutation runs to completion under `&mut self`,
/// recomputing the visible subset synchronously before handing the new URL
/// to the [`History`] sink, so no intermediate state is observable.
#[derive(Debug)]
pub struct FilterController<H> {
    recipes: Vec<Recipe>,
    pathname: String,
    state: FilterState,
    vocabulary: FacetVocabulary,
    visible: Vec<usize>,
    history: H,
}

impl<H: History> FilterController<H> {
    /// Creates a controller for `pathname`, initialized from the page's
    /// query string. No URL is written on creation.
    pub fn new(recipes: Vec<Recipe>, pathname: impl Into<String>, query: &str, history: H) -> Self {
        let mut controller = Self {
            vocabulary: derive_facet_vocabulary(&recipes),
            recipes,
            pathname: pathname.into(),
            state: FilterState::from_query(query),
            visible: Vec::new(),
            history,
        };
        controller.recompute();
        controller
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn vocabulary(&self) -> &FacetVocabulary {
        &self.vocabulary
    }

    pub fn history(&self) -> &H {
        &self.history
    }

    /// The recipes passing the current filters, in collection order.
    pub fn visible(&self) -> Vec<&Recipe> {
        self.visible.iter().map(|&index| &self.recipes[index]).collect()
    }

    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }

    /// The shareable URL for the current state.
    pub fn url(&self) -> String {
        let query = self.state.to_query();
        if query.is_empty() {
            self.pathname.clone()
        } else {
            format!("{}?{}", self.pathname, query)
        }
    }

    pub fn toggle_facet(&mut self, facet: Facet, value: &str) {
        self.update(|state| state.toggle_facet(facet, value));
    }

    pub fn toggle_difficulty(&mut self, value: &str) {
        self.update(|state| state.toggle_difficulty(value));
    }

    pub fn remove_filter(&mut self, facet: Facet, value: &str) {
        self.update(|state| state.remove(facet, value));
    }

    /// Clears every facet. The query is kept; use [`clear_query`](Self::clear_query)
    /// to reset it.
    pub fn clear_all(&mut self) {
        self.update(FilterState::clear_all);
    }

    pub fn set_query(&mut self, query: &str) {
        self.update(|state| state.query = query.to_string());
    }

    pub fn clear_query(&mut self) {
        self.update(FilterState::clear_query);
    }

    pub fn active_filters(&self) -> Vec<(Facet, String)> {
        self.state.active_filters()
    }

    /// Re-reads the state from a URL, as on back/forward navigation.
    ///
    /// The URL already reflects the state, so nothing is written back.
    pub fn restore(&mut self, query: &str) {
        self.state = FilterState::from_query(query);
        self.recompute();
    }

    /// Replaces the collection, re-deriving the vocabulary and visible subset.
    pub fn set_recipes(&mut self, recipes: Vec<Recipe>) {
        self.vocabulary = derive_facet_vocabulary(&recipes);
        self.recipes = recipes;
        self.recompute();
    }

    fn update<F>(&mut self, mutate: F)
    where
        F: FnOnce(&mut FilterState),
    {
        let before = self.state.clone();
        mutate(&mut self.state);

        if self.state != before {
            self.recompute();
            let url = self.url();
            debug!(%url, visible = self.visible.len(), "filters changed");
            self.history.replace(&url);
        }
    }

    fn recompute(&mut self) {
        self.visible = matching(&self.recipes, &self.state)
            .map(|(index, _)| index)
            .collect();
    }
}
