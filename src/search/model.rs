use crate::Recipe;

/// The dropdown shown under the header search box.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchPreview<'a> {
    /// At most [`PREVIEW_LIMIT`](super::PREVIEW_LIMIT) matches, in collection order
    pub results: Vec<&'a Recipe>,
    /// Number of matches before truncation
    pub total: usize,
    /// Link to the full listing filtered by the same query
    pub see_all_url: String,
}

impl SearchPreview<'_> {
    pub fn has_more(&self) -> bool {
        self.total > self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}
