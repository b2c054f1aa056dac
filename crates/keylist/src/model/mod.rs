//! List model for keylist.
//!
//! This module provides the reactively sortable list and the types it is
//! built from:
//!
//! - `Value` / `ValueKind`: Type-erased member values
//! - `Members`: The element capability, name-based member lookup
//! - `Comparator` / `MemberComparer`: Value ordering and per-member sorting
//! - `SortableList`: The list itself
//! - `ListChange` / `ListSignals`: Change notifications for observers
//!
//! # Architecture Overview
//!
//! ```text
//! ┌──────────────┐  member_value   ┌──────────────┐
//! │ SortableList │────────────────>│  T: Members  │
//! │              │<────────────────│              │
//! └──────────────┘  member_comparer└──────────────┘
//!        │
//!        │ list_changed
//!        v
//! ┌──────────────┐
//! │  Observers   │
//! └──────────────┘
//! ```
//!
//! Observers report member changes back through
//! [`SortableList::on_member_changed`], which keeps a sorted list sorted.

mod change;
mod comparer;
mod members;
mod options;
mod sortable_list;
mod value;

pub use change::{ListChange, ListSignals};
pub use comparer::{CompareFn, Comparator, MemberComparer, SortDescriptor, SortDirection};
pub use members::Members;
pub use options::ListOptions;
pub use sortable_list::SortableList;
pub use value::{Value, ValueKind};
