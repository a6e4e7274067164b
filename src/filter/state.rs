use crate::Recipe;
use std::collections::BTreeSet;
use std::fmt;
use url::form_urlencoded;

/// A classification dimension recipes can be narrowed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Facet {
    Category,
    License,
    Type,
    Difficulty,
}

impl Facet {
    pub const ALL: [Facet; 4] = [Facet::Category, Facet::License, Facet::Type, Facet::Difficulty];

    /// Name of the URL query parameter carrying this facet.
    pub fn param(self) -> &'static str {
        match self {
            Facet::Category => "categories",
            Facet::License => "licenses",
            Facet::Type => "types",
            Facet::Difficulty => "difficulty",
        }
    }

    pub fn from_param(param: &str) -> Option<Self> {
        Facet::ALL.into_iter().find(|facet| facet.param() == param)
    }

    /// Multi-select facets accept several values at once.
    pub fn is_multi_select(self) -> bool {
        !matches!(self, Facet::Difficulty)
    }
}

impl fmt::Display for Facet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.param())
    }
}

/// Query parameter holding the free-text search.
pub const QUERY_PARAM: &str = "q";
/// Older links use `search` instead of `q`.
pub const QUERY_PARAM_ALIAS: &str = "search";

/// The current selection on the recipe listing.
///
/// Within one multi-select facet the selected values are OR'ed; facets, the
/// difficulty and the query are AND'ed together. An empty selection places no
/// constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub query: String,
    pub categories: BTreeSet<String>,
    pub licenses: BTreeSet<String>,
    pub types: BTreeSet<String>,
    /// Difficulty in its string form (`"1"`, `"2"`, ...)
    pub difficulty: Option<String>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses the state from a URL query string, with or without leading `?`.
    ///
    /// Unknown parameters are ignored. Values are kept even if they do not
    /// exist in the current collection; they simply match nothing.
    pub fn from_query(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut state = Self::default();
        let mut alias = None;

        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                QUERY_PARAM => state.query = value.into_owned(),
                QUERY_PARAM_ALIAS => alias = Some(value.into_owned()),
                param => match Facet::from_param(param) {
                    Some(Facet::Difficulty) => {
                        state.difficulty = Some(value.into_owned()).filter(|v| !v.is_empty());
                    }
                    Some(facet) => {
                        if let Some(selection) = state.selection_mut(facet) {
                            *selection = split_values(&value);
                        }
                    }
                    None => {}
                },
            }
        }

        if state.query.is_empty() {
            if let Some(alias) = alias {
                state.query = alias;
            }
        }

        state
    }

    /// Serializes the state into a URL query string (without leading `?`).
    ///
    /// Empty dimensions are omitted, so the empty state yields `""`.
    /// Selected values are comma-joined; a value that itself contains a comma
    /// is split apart again by [`from_query`](Self::from_query).
    pub fn to_query(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        if !self.query.is_empty() {
            serializer.append_pair(QUERY_PARAM, &self.query);
        }
        for facet in [Facet::Category, Facet::License, Facet::Type] {
            if let Some(selection) = self.selection(facet).filter(|s| !s.is_empty()) {
                let joined: Vec<&str> = selection.iter().map(String::as_str).collect();
                serializer.append_pair(facet.param(), &joined.join(","));
            }
        }
        if let Some(difficulty) = &self.difficulty {
            serializer.append_pair(Facet::Difficulty.param(), difficulty);
        }
        serializer.finish()
    }

    pub fn selection(&self, facet: Facet) -> Option<&BTreeSet<String>> {
        match facet {
            Facet::Category => Some(&self.categories),
            Facet::License => Some(&self.licenses),
            Facet::Type => Some(&self.types),
            Facet::Difficulty => None,
        }
    }

    fn selection_mut(&mut self, facet: Facet) -> Option<&mut BTreeSet<String>> {
        match facet {
            Facet::Category => Some(&mut self.categories),
            Facet::License => Some(&mut self.licenses),
            Facet::Type => Some(&mut self.types),
            Facet::Difficulty => None,
        }
    }

    /// Adds `value` to the facet selection, or removes it if already there.
    ///
    /// Toggling the difficulty facet behaves like [`toggle_difficulty`](Self::toggle_difficulty).
    /// An empty value is ignored.
    pub fn toggle_facet(&mut self, facet: Facet, value: &str) {
        let Some(selection) = self.selection_mut(facet) else {
            self.toggle_difficulty(value);
            return;
        };
        if value.is_empty() {
            return;
        }
        if !selection.remove(value) {
            selection.insert(value.to_string());
        }
    }

    /// Selects `value`, or clears the difficulty if `value` is already selected.
    /// An empty value clears the difficulty.
    pub fn toggle_difficulty(&mut self, value: &str) {
        if value.is_empty() || self.difficulty.as_deref() == Some(value) {
            self.difficulty = None;
        } else {
            self.difficulty = Some(value.to_string());
        }
    }

    /// Removes a single active filter.
    pub fn remove(&mut self, facet: Facet, value: &str) {
        match self.selection_mut(facet) {
            Some(selection) => {
                selection.remove(value);
            }
            None => {
                if self.difficulty.as_deref() == Some(value) {
                    self.difficulty = None;
                }
            }
        }
    }

    /// Clears every facet and the difficulty. The query is left untouched.
    pub fn clear_all(&mut self) {
        self.categories.clear();
        self.licenses.clear();
        self.types.clear();
        self.difficulty = None;
    }

    pub fn clear_query(&mut self) {
        self.query.clear();
    }

    /// Returns the active facet filters, one entry per selected value.
    pub fn active_filters(&self) -> Vec<(Facet, String)> {
        let mut active: Vec<(Facet, String)> = [Facet::Category, Facet::License, Facet::Type]
            .into_iter()
            .flat_map(move |facet| {
                self.selection(facet)
                    .into_iter()
                    .flatten()
                    .map(move |value| (facet, value.clone()))
            })
            .collect();
        if let Some(difficulty) = &self.difficulty {
            active.push((Facet::Difficulty, difficulty.clone()));
        }
        active
    }

    /// Returns true when no facet is selected. The query is not considered.
    pub fn has_no_facets(&self) -> bool {
        self.categories.is_empty()
            && self.licenses.is_empty()
            && self.types.is_empty()
            && self.difficulty.is_none()
    }

    /// Returns true when `recipe` satisfies every active constraint.
    pub fn matches(&self, recipe: &Recipe) -> bool {
        self.matches_lowered(recipe, &self.query.to_lowercase())
    }

    pub(crate) fn matches_lowered(&self, recipe: &Recipe, needle: &str) -> bool {
        recipe.title_contains(needle)
            && selected(&self.categories, &recipe.category)
            && selected(&self.licenses, &recipe.license)
            && selected(&self.types, &recipe.kind)
            && self
                .difficulty
                .as_deref()
                .map_or(true, |difficulty| recipe.difficulty.to_string() == difficulty)
    }
}

fn selected(selection: &BTreeSet<String>, value: &str) -> bool {
    selection.is_empty() || selection.contains(value)
}

fn split_values(raw: &str) -> BTreeSet<String> {
    raw.split(',')
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .collect()
}
