//! keylist: reactively sortable, searchable ordered collections.
//!
//! A [`SortableList`] holds items whose members can be looked up by name at
//! runtime (the [`Members`] trait, usually derived). The list can be sorted by
//! any member in either direction, keeps itself sorted when an item's sort
//! member changes, and finds the first item whose member equals a key.
//! Observers learn about every change through [`ListSignals::list_changed`].
//!
//! # Example
//!
//! ```
//! use keylist::prelude::*;
//!
//! #[derive(Members, Clone, Debug)]
//! struct Person {
//!     name: String,
//!     age: u32,
//! }
//!
//! let people = SortableList::new(vec![
//!     Person { name: "Bob".into(), age: 30 },
//!     Person { name: "Al".into(), age: 30 },
//!     Person { name: "Cy".into(), age: 20 },
//! ]);
//!
//! people.signals().list_changed.connect(|change| {
//!     println!("list changed: {:?}", change);
//! });
//!
//! people.apply_sort("age", SortDirection::Ascending)?;
//!
//! // Cy turns 40 and moves to the end.
//! let (_, index) = people.modify(0, "age", |p| p.age = 40)?;
//! assert_eq!(index, 2);
//!
//! assert_eq!(people.find("name", &Value::from("Cy"))?, Some(2));
//! # Ok::<(), keylist::ListError>(())
//! ```
//!
//! # Logging
//!
//! keylist logs through `tracing`; see [`keylist_core::logging`] for the
//! targets and span names.

// Lets `#[derive(Members)]` expand to `::keylist::...` inside this crate too.
extern crate self as keylist;

mod error;
pub mod model;
pub mod prelude;

pub use error::{ListError, Result};
pub use model::{
    CompareFn, Comparator, ListChange, ListOptions, ListSignals, MemberComparer, Members,
    SortDescriptor, SortDirection, SortableList, Value, ValueKind,
};

#[cfg(feature = "derive")]
pub use keylist_macros::Members;

pub use keylist_core::{
    keylist_debug, keylist_trace, logging, ConnectionGuard, ConnectionId, PerfSpan,
    Signal, SignalError,
};
