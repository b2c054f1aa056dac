//! The element capability: named member lookup.
//!
//! A [`SortableList`](super::SortableList) never knows the shape of its
//! element type. Instead the element type implements [`Members`], which maps
//! a member name chosen at runtime (a column header the user clicked, a
//! search field) to the member's current [`Value`], and hands out the
//! [`Comparator`] to use for values of a given kind.
//!
//! Most types derive the implementation:
//!
//! ```
//! use keylist::Members;
//!
//! #[derive(Members)]
//! struct Person {
//!     name: String,
//!     age: u32,
//!     #[member(skip)]
//!     notes: Vec<String>,
//! }
//!
//! assert_eq!(Person::member_names(), &["name", "age"]);
//! ```

use std::rc::Rc;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

use super::comparer::Comparator;
use super::value::{Value, ValueKind};
use crate::error::Result;

/// Trait for items whose members can be looked up by name.
///
/// # Example
///
/// ```
/// use keylist::{Comparator, ListError, Members, Value, ValueKind};
///
/// struct Track {
///     title: String,
///     plays: u64,
/// }
///
/// impl Members for Track {
///     fn member_names() -> &'static [&'static str] {
///         &["title", "plays"]
///     }
///
///     fn member_value(&self, name: &str) -> keylist::Result<Value> {
///         match name {
///             "title" => Ok(Value::from(self.title.as_str())),
///             "plays" => Ok(Value::from(self.plays)),
///             _ => Err(ListError::attribute_not_found(name)),
///         }
///     }
///
///     fn member_comparer(&self, kind: ValueKind) -> Comparator {
///         match kind {
///             ValueKind::String => Comparator::case_insensitive(),
///             _ => Comparator::natural(),
///         }
///     }
/// }
/// ```
pub trait Members {
    /// Every member name this type resolves.
    fn member_names() -> &'static [&'static str]
    where
        Self: Sized;

    /// Returns the current value of the named member.
    ///
    /// Fails with [`ListError::AttributeNotFound`](crate::ListError::AttributeNotFound)
    /// for unknown names.
    fn member_value(&self, name: &str) -> Result<Value>;

    /// Returns the comparator to use for values of `kind`.
    ///
    /// The default is [`Comparator::natural`].
    fn member_comparer(&self, _kind: ValueKind) -> Comparator {
        Comparator::natural()
    }

    /// Returns `true` if `name` is one of [`member_names`](Self::member_names).
    fn has_member(name: &str) -> bool
    where
        Self: Sized,
    {
        Self::member_names().contains(&name)
    }
}

macro_rules! forward_members {
    ($($ptr:ident),*) => {
        $(impl<T: Members> Members for $ptr<T> {
            fn member_names() -> &'static [&'static str] {
                T::member_names()
            }

            fn member_value(&self, name: &str) -> Result<Value> {
                (**self).member_value(name)
            }

            fn member_comparer(&self, kind: ValueKind) -> Comparator {
                (**self).member_comparer(kind)
            }
        })*
    };
}

forward_members!(Box, Rc, Arc);

impl<T: Members> Members for &T {
    fn member_names() -> &'static [&'static str] {
        T::member_names()
    }

    fn member_value(&self, name: &str) -> Result<Value> {
        (**self).member_value(name)
    }

    fn member_comparer(&self, kind: ValueKind) -> Comparator {
        (**self).member_comparer(kind)
    }
}

// Shared, externally mutable elements. The lock is held only for the lookup.
impl<T: Members> Members for RwLock<T> {
    fn member_names() -> &'static [&'static str] {
        T::member_names()
    }

    fn member_value(&self, name: &str) -> Result<Value> {
        self.read().member_value(name)
    }

    fn member_comparer(&self, kind: ValueKind) -> Comparator {
        self.read().member_comparer(kind)
    }
}

impl<T: Members> Members for Mutex<T> {
    fn member_names() -> &'static [&'static str] {
        T::member_names()
    }

    fn member_value(&self, name: &str) -> Result<Value> {
        self.lock().member_value(name)
    }

    fn member_comparer(&self, kind: ValueKind) -> Comparator {
        self.lock().member_comparer(kind)
    }
}
