use crate::Recipe;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use super::search_by_title;

/// Delay between the last keystroke and the search actually running.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Debounced title search for search-as-you-type inputs.
///
/// Every call to [`submit`](LiveSearch::submit) supersedes the previous ones.
/// Only the latest submission still current once the delay has elapsed
/// produces results; older submissions resolve to `None`.
#[derive(Debug)]
pub struct LiveSearch {
    recipes: Arc<[Recipe]>,
    delay: Duration,
    generation: AtomicU64,
}

impl LiveSearch {
    pub fn new(recipes: impl Into<Arc<[Recipe]>>) -> Self {
        Self {
            recipes: recipes.into(),
            delay: DEFAULT_DEBOUNCE,
            generation: AtomicU64::new(0),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub async fn submit(&self, term: &str) -> Option<Vec<Recipe>> {
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        tokio::time::sleep(self.delay).await;

        if self.generation.load(Ordering::SeqCst) != ticket {
            debug!(term, "live search superseded");
            return None;
        }

        Some(
            search_by_title(term, &self.recipes)
                .into_iter()
                .cloned()
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::tests::collection;

    #[tokio::test(start_paused = true)]
    async fn test_single_submission_runs() {
        let live = LiveSearch::new(collection());
        let results = live.submit("lembas").await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].slug, "lembas");
    }

    #[tokio::test(start_paused = true)]
    async fn test_only_last_keystroke_runs() {
        let live = LiveSearch::new(collection());

        let (first, second) = tokio::join!(live.submit("l"), async {
            tokio::time::sleep(Duration::from_millis(50)).await;
            live.submit("lembas").await
        });

        assert!(first.is_none());
        let second = second.unwrap();
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].slug, "lembas");
    }

    #[tokio::test(start_paused = true)]
    async fn test_spaced_submissions_both_run() {
        let live = LiveSearch::new(collection()).with_delay(Duration::from_millis(100));
        assert!(live.submit("tatin").await.is_some());
        assert!(live.submit("ramen").await.is_some());
        assert_eq!(live.delay(), Duration::from_millis(100));
    }
}
