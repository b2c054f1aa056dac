//! Construction-time options for list models.

/// Options controlling which operations a [`SortableList`](super::SortableList)
/// accepts and whether it notifies observers.
///
/// # Example
///
/// ```
/// use keylist::ListOptions;
///
/// let options = ListOptions::new()
///     .with_searching(false)
///     .with_change_events(false);
/// assert!(options.allow_sort);
/// assert!(!options.allow_search);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListOptions {
    /// `apply_sort` is accepted.
    pub allow_sort: bool,
    /// `find` is accepted.
    pub allow_search: bool,
    /// Changes are emitted on `list_changed`.
    pub raise_change_events: bool,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            allow_sort: true,
            allow_search: true,
            raise_change_events: true,
        }
    }
}

impl ListOptions {
    /// Creates options with everything enabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options for a list that neither sorts nor searches.
    pub fn plain() -> Self {
        Self {
            allow_sort: false,
            allow_search: false,
            ..Default::default()
        }
    }

    /// Sets whether sorting is accepted.
    pub fn with_sorting(mut self, allow: bool) -> Self {
        self.allow_sort = allow;
        self
    }

    /// Sets whether searching is accepted.
    pub fn with_searching(mut self, allow: bool) -> Self {
        self.allow_search = allow;
        self
    }

    /// Sets whether change notifications are emitted.
    pub fn with_change_events(mut self, raise: bool) -> Self {
        self.raise_change_events = raise;
        self
    }
}
