//! Prelude module for keylist.
//!
//! ```ignore
//! use keylist::prelude::*;
//! ```
//!
//! This provides access to the list, its element trait (and derive), the
//! value and ordering types, and the change notifications.

// ============================================================================
// List Model
// ============================================================================

pub use crate::model::{ListOptions, SortableList};

// ============================================================================
// Element Capability
// ============================================================================

pub use crate::model::{Comparator, Members, Value, ValueKind};

#[cfg(feature = "derive")]
pub use keylist_macros::Members;

// ============================================================================
// Sorting
// ============================================================================

pub use crate::model::{SortDescriptor, SortDirection};

// ============================================================================
// Notifications
// ============================================================================

pub use crate::model::{ListChange, ListSignals};
pub use keylist_core::{ConnectionGuard, ConnectionId, Signal};

// ============================================================================
// Errors
// ============================================================================

pub use crate::error::{ListError, Result};
