//! UniFFI bindings for cross-platform support (iOS, Android).
//!
//! This module provides FFI-safe types and functions for use with UniFFI.
//! Recipes cross the boundary as plain records; stateful pieces (the API
//! client, the filter controller, the transition store) are exported as
//! objects.

use crate::config::{ClientConfig, ConfigError};
use crate::fetcher::{FetchError, RecipeClient};
use crate::filter::{
    apply_filters as apply_filters_internal, derive_facet_vocabulary as derive_vocabulary_internal,
    Facet, FacetChip, FacetVocabulary, FilterController, FilterState, History,
};
use crate::model::{Ingredient, Recipe};
use crate::search;
use crate::transition::{TransitionSnapshot, TransitionStore};
use std::cell::Cell;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// FFI-safe error type that wraps all possible errors.
#[derive(Debug, uniffi::Error, thiserror::Error)]
pub enum GastronogeekError {
    #[error("Recipe not found: {message}")]
    NotFound { message: String },

    #[error("Network error: {message}")]
    Network { message: String },

    #[error("Decode error: {message}")]
    Decode { message: String },

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl From<FetchError> for GastronogeekError {
    fn from(e: FetchError) -> Self {
        let message = e.to_string();
        match e {
            FetchError::NotFound { .. } => GastronogeekError::NotFound { message },
            FetchError::Network(_) | FetchError::Status { .. } => {
                GastronogeekError::Network { message }
            }
            FetchError::Decode(_) => GastronogeekError::Decode { message },
            FetchError::InvalidSlug(_) | FetchError::InvalidUrl(_) => {
                GastronogeekError::InvalidInput { message }
            }
        }
    }
}

impl From<ConfigError> for GastronogeekError {
    fn from(e: ConfigError) -> Self {
        GastronogeekError::Config {
            message: e.to_string(),
        }
    }
}

/// FFI-safe representation of an ingredient line.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct FfiIngredient {
    pub quantity: Option<f64>,
    pub unit: Option<String>,
    pub name: String,
    /// Ready-to-display line, e.g. "100 g beurre"
    pub display: String,
}

impl From<&Ingredient> for FfiIngredient {
    fn from(i: &Ingredient) -> Self {
        FfiIngredient {
            quantity: i.quantity,
            unit: i.unit.clone(),
            name: i.name.clone(),
            display: i.to_string(),
        }
    }
}

impl From<FfiIngredient> for Ingredient {
    fn from(i: FfiIngredient) -> Self {
        Ingredient {
            quantity: i.quantity,
            unit: i.unit,
            name: i.name,
        }
    }
}

/// FFI-safe representation of a recipe.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct FfiRecipe {
    pub slug: String,
    pub title: String,
    pub common_title: String,
    pub category: String,
    pub license: String,
    pub kind: String,
    pub difficulty: u8,
    pub difficulty_label: String,
    pub desc: String,
    pub dressing: String,
    pub images: Vec<String>,
    pub ingredients: Vec<FfiIngredient>,
    pub steps: Vec<String>,
    pub default_persons: u32,
    pub prep_time: String,
    pub cooking_time: Option<String>,
    pub rest_time: Option<String>,
}

impl From<&Recipe> for FfiRecipe {
    fn from(r: &Recipe) -> Self {
        FfiRecipe {
            slug: r.slug.clone(),
            title: r.title.clone(),
            common_title: r.common_title.clone(),
            category: r.category.clone(),
            license: r.license.clone(),
            kind: r.kind.clone(),
            difficulty: r.difficulty,
            difficulty_label: r.difficulty_level().label().to_string(),
            desc: r.desc.clone(),
            dressing: r.dressing.clone(),
            images: r.images.clone(),
            ingredients: r.ingredients.iter().map(FfiIngredient::from).collect(),
            steps: r.steps.clone(),
            default_persons: r.default_persons,
            prep_time: r.prep_time.clone(),
            cooking_time: r.cooking_time.clone(),
            rest_time: r.rest_time.clone(),
        }
    }
}

impl From<FfiRecipe> for Recipe {
    fn from(r: FfiRecipe) -> Self {
        Recipe {
            slug: r.slug,
            title: r.title,
            common_title: r.common_title,
            category: r.category,
            license: r.license,
            kind: r.kind,
            difficulty: r.difficulty,
            desc: r.desc,
            dressing: r.dressing,
            images: r.images,
            ingredients: r.ingredients.into_iter().map(Ingredient::from).collect(),
            steps: r.steps,
            default_persons: r.default_persons,
            prep_time: r.prep_time,
            cooking_time: r.cooking_time,
            rest_time: r.rest_time,
        }
    }
}

fn to_recipes(recipes: Vec<FfiRecipe>) -> Vec<Recipe> {
    recipes.into_iter().map(Recipe::from).collect()
}

fn to_ffi<'a>(recipes: impl IntoIterator<Item = &'a Recipe>) -> Vec<FfiRecipe> {
    recipes.into_iter().map(FfiRecipe::from).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum FfiFacet {
    Category,
    License,
    Type,
    Difficulty,
}

impl From<FfiFacet> for Facet {
    fn from(f: FfiFacet) -> Self {
        match f {
            FfiFacet::Category => Facet::Category,
            FfiFacet::License => Facet::License,
            FfiFacet::Type => Facet::Type,
            FfiFacet::Difficulty => Facet::Difficulty,
        }
    }
}

impl From<Facet> for FfiFacet {
    fn from(f: Facet) -> Self {
        match f {
            Facet::Category => FfiFacet::Category,
            Facet::License => FfiFacet::License,
            Facet::Type => FfiFacet::Type,
            Facet::Difficulty => FfiFacet::Difficulty,
        }
    }
}

/// A selected (facet, value) pair, rendered as a removable chip.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct FfiActiveFilter {
    pub facet: FfiFacet,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct FfiFacetChip {
    pub facet: FfiFacet,
    pub value: String,
    pub label: String,
}

impl From<FacetChip> for FfiFacetChip {
    fn from(c: FacetChip) -> Self {
        FfiFacetChip {
            facet: c.facet.into(),
            value: c.value,
            label: c.label,
        }
    }
}

#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct FfiFacetVocabulary {
    pub categories: Vec<String>,
    pub licenses: Vec<String>,
    pub types: Vec<String>,
    pub difficulties: Vec<u8>,
}

impl From<&FacetVocabulary> for FfiFacetVocabulary {
    fn from(v: &FacetVocabulary) -> Self {
        FfiFacetVocabulary {
            categories: v.categories.clone(),
            licenses: v.licenses.clone(),
            types: v.types.clone(),
            difficulties: v.difficulties.clone(),
        }
    }
}

// ============================================================================
// API client
// ============================================================================

#[derive(uniffi::Object)]
pub struct FfiRecipeClient {
    inner: RecipeClient,
}

#[uniffi::export(async_runtime = "tokio")]
impl FfiRecipeClient {
    /// Creates a client. Without `base_url`, settings come from the environment.
    #[uniffi::constructor]
    pub fn new(base_url: Option<String>) -> Result<Arc<Self>, GastronogeekError> {
        let config = match base_url {
            Some(url) => ClientConfig::new(&url)?,
            None => ClientConfig::from_env()?,
        };
        Ok(Arc::new(FfiRecipeClient {
            inner: RecipeClient::new(config)?,
        }))
    }

    pub async fn fetch_all_recipes(&self) -> Result<Vec<FfiRecipe>, GastronogeekError> {
        let recipes = self.inner.fetch_all_recipes().await?;
        Ok(to_ffi(&recipes))
    }

    pub async fn fetch_recipe(&self, slug: String) -> Result<FfiRecipe, GastronogeekError> {
        let recipe = self.inner.fetch_recipe_by_slug(&slug).await?;
        Ok(FfiRecipe::from(&recipe))
    }
}

// ============================================================================
// Filter controller
// ============================================================================

/// Receives the URL every time the filter state changes.
#[uniffi::export(with_foreign)]
pub trait UrlSink: Send + Sync {
    fn on_url_change(&self, url: String);
}

/// Holds the latest URL rewrite until the controller lock is released.
#[derive(Default)]
struct PendingUrl(Cell<Option<String>>);

impl History for PendingUrl {
    fn replace(&self, url: &str) {
        self.0.set(Some(url.to_string()));
    }
}

#[derive(uniffi::Object)]
pub struct FfiFilterController {
    inner: Mutex<FilterController<PendingUrl>>,
    sink: Arc<dyn UrlSink>,
}

impl FfiFilterController {
    fn lock(&self) -> MutexGuard<'_, FilterController<PendingUrl>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Applies `mutate`, then reports the rewritten URL with the lock released
    /// so the sink may call back into the controller.
    fn update(&self, mutate: impl FnOnce(&mut FilterController<PendingUrl>)) {
        let url = {
            let mut controller = self.lock();
            mutate(&mut controller);
            controller.history().0.take()
        };
        if let Some(url) = url {
            self.sink.on_url_change(url);
        }
    }
}

#[uniffi::export]
impl FfiFilterController {
    /// Creates a controller for a listing page from its recipes and current
    /// query string.
    #[uniffi::constructor]
    pub fn new(
        recipes: Vec<FfiRecipe>,
        pathname: String,
        query: String,
        sink: Arc<dyn UrlSink>,
    ) -> Arc<Self> {
        let controller =
            FilterController::new(to_recipes(recipes), pathname, &query, PendingUrl::default());
        Arc::new(FfiFilterController {
            inner: Mutex::new(controller),
            sink,
        })
    }

    pub fn toggle_facet(&self, facet: FfiFacet, value: String) {
        self.update(|c| c.toggle_facet(facet.into(), &value));
    }

    pub fn toggle_difficulty(&self, value: String) {
        self.update(|c| c.toggle_difficulty(&value));
    }

    pub fn remove_filter(&self, facet: FfiFacet, value: String) {
        self.update(|c| c.remove_filter(facet.into(), &value));
    }

    /// Clears every facet but keeps the query.
    pub fn clear_all(&self) {
        self.update(|c| c.clear_all());
    }

    pub fn set_query(&self, query: String) {
        self.update(|c| c.set_query(&query));
    }

    pub fn clear_query(&self) {
        self.update(|c| c.clear_query());
    }

    /// Re-reads the state after back/forward navigation.
    pub fn restore(&self, query: String) {
        self.lock().restore(&query);
    }

    pub fn query(&self) -> String {
        self.lock().state().query.clone()
    }

    pub fn url(&self) -> String {
        self.lock().url()
    }

    pub fn visible(&self) -> Vec<FfiRecipe> {
        to_ffi(self.lock().visible())
    }

    pub fn visible_count(&self) -> u64 {
        self.lock().visible_count() as u64
    }

    pub fn active_filters(&self) -> Vec<FfiActiveFilter> {
        self.lock()
            .active_filters()
            .into_iter()
            .map(|(facet, value)| FfiActiveFilter {
                facet: facet.into(),
                value,
            })
            .collect()
    }

    pub fn vocabulary(&self) -> FfiFacetVocabulary {
        FfiFacetVocabulary::from(self.lock().vocabulary())
    }

    pub fn chips(&self) -> Vec<FfiFacetChip> {
        self.lock()
            .vocabulary()
            .chips()
            .into_iter()
            .map(FfiFacetChip::from)
            .collect()
    }
}

// ============================================================================
// Transition store
// ============================================================================

#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct FfiTransitionSnapshot {
    pub is_transition_active: bool,
    pub is_first_load: bool,
    pub last_pathname: String,
}

impl From<TransitionSnapshot> for FfiTransitionSnapshot {
    fn from(s: TransitionSnapshot) -> Self {
        FfiTransitionSnapshot {
            is_transition_active: s.is_transition_active,
            is_first_load: s.is_first_load,
            last_pathname: s.last_pathname,
        }
    }
}

#[derive(uniffi::Object)]
pub struct FfiTransitionStore {
    inner: TransitionStore,
}

#[uniffi::export(async_runtime = "tokio")]
impl FfiTransitionStore {
    #[uniffi::constructor]
    pub fn new() -> Arc<Self> {
        Arc::new(FfiTransitionStore {
            inner: TransitionStore::new(),
        })
    }

    pub fn snapshot(&self) -> FfiTransitionSnapshot {
        self.inner.snapshot().into()
    }

    /// Starts a transition and resolves to the URL once the cover animation
    /// has had time to run. Resolves to `None` if a transition is running.
    pub async fn navigate(&self, url: String) -> Option<String> {
        match self.inner.begin(&url) {
            Some(pending) => Some(pending.ready().await),
            None => None,
        }
    }

    pub fn finish(&self, covered: bool) {
        self.inner.finish(covered);
    }

    pub fn set_last_pathname(&self, pathname: String) {
        self.inner.set_last_pathname(&pathname);
    }
}

// ============================================================================
// Exported FFI Functions
// ============================================================================

/// Returns the recipes whose title or common title contains `query`.
#[uniffi::export]
pub fn search_by_title(query: String, recipes: Vec<FfiRecipe>) -> Vec<FfiRecipe> {
    let recipes = to_recipes(recipes);
    to_ffi(search::search_by_title(&query, &recipes))
}

/// Returns up to three recipes sharing the target's license or type.
#[uniffi::export]
pub fn similar_recipes(target: FfiRecipe, recipes: Vec<FfiRecipe>) -> Vec<FfiRecipe> {
    let target = Recipe::from(target);
    let recipes = to_recipes(recipes);
    to_ffi(search::similar_recipes(&target, &recipes))
}

/// Returns the recipes featured on the home page.
#[uniffi::export]
pub fn highlights(recipes: Vec<FfiRecipe>) -> Vec<FfiRecipe> {
    let recipes = to_recipes(recipes);
    to_ffi(search::highlights(&recipes))
}

/// Applies the filters encoded in a URL query string.
#[uniffi::export]
pub fn apply_filters(recipes: Vec<FfiRecipe>, query: String) -> Vec<FfiRecipe> {
    let recipes = to_recipes(recipes);
    let state = FilterState::from_query(&query);
    to_ffi(apply_filters_internal(&recipes, &state))
}

/// Returns the distinct facet values present in `recipes`.
#[uniffi::export]
pub fn derive_facet_vocabulary(recipes: Vec<FfiRecipe>) -> FfiFacetVocabulary {
    let recipes = to_recipes(recipes);
    FfiFacetVocabulary::from(&derive_vocabulary_internal(&recipes))
}

/// Returns the ingredient list adjusted for `persons` people.
#[uniffi::export]
pub fn scale_ingredients(recipe: FfiRecipe, persons: u32) -> Vec<FfiIngredient> {
    Recipe::from(recipe)
        .scaled_ingredients(persons)
        .iter()
        .map(FfiIngredient::from)
        .collect()
}

/// Installs the default log subscriber. Returns false if one was already set.
#[uniffi::export]
pub fn init_logging() -> bool {
    crate::logging::init_logging()
}

/// Returns the library version.
#[uniffi::export]
pub fn library_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
