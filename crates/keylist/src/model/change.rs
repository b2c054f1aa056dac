//! Change notifications emitted by list models.

use keylist_core::Signal;

/// A single change to a list, as seen by observers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListChange {
    /// Arbitrary positions may have changed; observers should treat the whole
    /// view as stale.
    Reset,
    /// An item was inserted at `index`.
    ItemAdded {
        /// Position of the new item.
        index: usize,
    },
    /// The item at `index` was removed.
    ItemDeleted {
        /// Position the item occupied.
        index: usize,
    },
    /// A member of the item at `index` changed without moving it.
    ItemChanged {
        /// Position of the item.
        index: usize,
        /// Name of the member that changed.
        attribute: String,
    },
    /// One item moved; every other item kept its relative order.
    ItemMoved {
        /// Position before the move.
        old_index: usize,
        /// Position after the move. Equal to `old_index` when the item stayed put.
        new_index: usize,
    },
}

impl ListChange {
    /// Returns `true` for [`ListChange::Reset`].
    pub fn is_reset(&self) -> bool {
        matches!(self, ListChange::Reset)
    }
}

/// Collection of signals emitted by list models.
///
/// Views connect to these signals to stay synchronized with the list.
pub struct ListSignals {
    /// Emitted after every structural or content change.
    pub list_changed: Signal<ListChange>,
}

impl Default for ListSignals {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ListSignals {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListSignals")
            .field("list_changed", &self.list_changed)
            .finish()
    }
}

impl ListSignals {
    /// Creates a new set of list signals.
    pub fn new() -> Self {
        Self {
            list_changed: Signal::new(),
        }
    }

    // -------------------------------------------------------------------------
    // Convenience methods for emitting signals
    // -------------------------------------------------------------------------

    /// Emits a bulk reset.
    pub fn emit_reset(&self) {
        self.list_changed.emit(ListChange::Reset);
    }

    /// Emits an insertion at `index`.
    pub fn emit_item_added(&self, index: usize) {
        self.list_changed.emit(ListChange::ItemAdded { index });
    }

    /// Emits a removal at `index`.
    pub fn emit_item_deleted(&self, index: usize) {
        self.list_changed.emit(ListChange::ItemDeleted { index });
    }

    /// Emits an in-place member change.
    pub fn emit_item_changed(&self, index: usize, attribute: impl Into<String>) {
        self.list_changed.emit(ListChange::ItemChanged {
            index,
            attribute: attribute.into(),
        });
    }

    /// Emits a single-item move.
    pub fn emit_item_moved(&self, old_index: usize, new_index: usize) {
        self.list_changed.emit(ListChange::ItemMoved {
            old_index,
            new_index,
        });
    }
}
