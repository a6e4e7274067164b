pub mod config;
pub mod fetcher;
pub mod ffi;
pub mod filter;
pub mod logging;
pub mod model;
pub mod search;
pub mod transition;

pub use config::ClientConfig;
pub use fetcher::{FetchError, RecipeClient};
pub use filter::{apply_filters, derive_facet_vocabulary, Facet, FilterController, FilterState};
pub use logging::init_logging;
pub use model::*;
pub use search::{search_by_title, similar_recipes};
pub use transition::TransitionStore;

uniffi::setup_scaffolding!();
