//! Facet filtering of the recipe listing.
//!
//! [`FilterState`] is the selection, [`apply_filters`] the pure predicate over
//! a collection, and [`FilterController`] ties both to the page URL.

use crate::{Difficulty, Recipe};
use std::collections::HashSet;
use std::hash::Hash;

mod controller;
mod state;

pub use controller::{FilterController, History};
pub use state::{Facet, FilterState, QUERY_PARAM, QUERY_PARAM_ALIAS};

/// The distinct facet values present in a collection, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FacetVocabulary {
    pub categories: Vec<String>,
    pub licenses: Vec<String>,
    pub types: Vec<String>,
    pub difficulties: Vec<u8>,
}

/// A selectable value in the filter sidebar or on the search page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacetChip {
    pub facet: Facet,
    /// Value as it appears in the URL and in [`FilterState`]
    pub value: String,
    pub label: String,
}

impl FacetVocabulary {
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
            && self.licenses.is_empty()
            && self.types.is_empty()
            && self.difficulties.is_empty()
    }

    /// Flattens the vocabulary into chips: categories, licenses, types, then
    /// difficulties labelled by level.
    pub fn chips(&self) -> Vec<FacetChip> {
        let text = |facet: Facet, values: &[String]| {
            values
                .iter()
                .map(move |value| FacetChip {
                    facet,
                    value: value.clone(),
                    label: value.clone(),
                })
                .collect::<Vec<_>>()
        };

        let mut chips = text(Facet::Category, &self.categories);
        chips.extend(text(Facet::License, &self.licenses));
        chips.extend(text(Facet::Type, &self.types));
        chips.extend(self.difficulties.iter().map(|&difficulty| FacetChip {
            facet: Facet::Difficulty,
            value: difficulty.to_string(),
            label: Difficulty::from(difficulty).label().to_string(),
        }));
        chips
    }
}

/// Collects the distinct values of every facet observed in `recipes`.
pub fn derive_facet_vocabulary(recipes: &[Recipe]) -> FacetVocabulary {
    let mut vocabulary = FacetVocabulary::default();
    let mut categories = HashSet::new();
    let mut licenses = HashSet::new();
    let mut types = HashSet::new();
    let mut difficulties = HashSet::new();

    for recipe in recipes {
        push_distinct(&mut categories, &mut vocabulary.categories, &recipe.category);
        push_distinct(&mut licenses, &mut vocabulary.licenses, &recipe.license);
        push_distinct(&mut types, &mut vocabulary.types, &recipe.kind);
        push_distinct(&mut difficulties, &mut vocabulary.difficulties, &recipe.difficulty);
    }

    vocabulary
}

fn push_distinct<T: Eq + Hash + Clone>(seen: &mut HashSet<T>, out: &mut Vec<T>, value: &T) {
    if seen.insert(value.clone()) {
        out.push(value.clone());
    }
}

/// Returns the recipes matching `state`, in collection order.
pub fn apply_filters<'a>(recipes: &'a [Recipe], state: &FilterState) -> Vec<&'a Recipe> {
    matching(recipes, state).map(|(_, recipe)| recipe).collect()
}

fn matching<'a: 's, 's>(
    recipes: &'a [Recipe],
    state: &'s FilterState,
) -> impl Iterator<Item = (usize, &'a Recipe)> + 's {
    let needle = state.query.to_lowercase();
    recipes
        .iter()
        .enumerate()
        .filter(move |(_, recipe)| state.matches_lowered(recipe, &needle))
}
