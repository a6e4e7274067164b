//! Page transition flags shared across the component tree.
//!
//! The overlay animation itself belongs to the UI. This store only records
//! whether a transition is running so that a second click cannot start
//! another navigation halfway through the first one.

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tracing::debug;

/// How long the cover animation runs before the route actually changes.
pub const TRANSITION_DELAY: Duration = Duration::from_millis(600);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionSnapshot {
    pub is_transition_active: bool,
    pub is_first_load: bool,
    pub last_pathname: String,
}

impl Default for TransitionSnapshot {
    fn default() -> Self {
        Self {
            is_transition_active: false,
            is_first_load: true,
            last_pathname: String::new(),
        }
    }
}

/// A navigation accepted by [`TransitionStore::begin`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingNavigation {
    pub url: String,
    pub delay: Duration,
}

impl PendingNavigation {
    /// Waits out the cover animation and returns the URL to navigate to.
    pub async fn ready(self) -> String {
        tokio::time::sleep(self.delay).await;
        self.url
    }
}

/// Explicit context object holding the transition flags.
///
/// Share it between components with an `Arc`.
#[derive(Debug, Default)]
pub struct TransitionStore {
    inner: Mutex<TransitionSnapshot>,
}

impl TransitionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> TransitionSnapshot {
        self.lock().clone()
    }

    /// Starts a transition towards `url`.
    ///
    /// Returns `None` if a transition is already running.
    pub fn begin(&self, url: &str) -> Option<PendingNavigation> {
        let mut inner = self.lock();
        if inner.is_transition_active {
            debug!(url, "transition already active, ignoring navigation");
            return None;
        }
        inner.is_transition_active = true;

        Some(PendingNavigation {
            url: url.to_string(),
            delay: TRANSITION_DELAY,
        })
    }

    /// Marks the running animation as complete.
    ///
    /// `covered` is true when the overlay finished covering the page and false
    /// when it finished revealing the new page. Revealing ends the first load.
    pub fn finish(&self, covered: bool) {
        let mut inner = self.lock();
        inner.is_transition_active = false;
        if !covered {
            inner.is_first_load = false;
        }
    }

    pub fn set_last_pathname(&self, pathname: &str) {
        self.lock().last_pathname = pathname.to_string();
    }

    fn lock(&self) -> MutexGuard<'_, TransitionSnapshot> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
