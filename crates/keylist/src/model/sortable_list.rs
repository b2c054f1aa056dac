//! Reactively sortable, searchable list model.
//!
//! `SortableList<T>` holds items that implement [`Members`]. It can be sorted
//! by any member named at runtime, keeps itself sorted when the sort member
//! of a single item changes, and finds items by member value.

use std::fmt;

use keylist_core::logging::span_names;
use keylist_core::PerfSpan;
use parking_lot::RwLock;

use super::change::ListSignals;
use super::comparer::{Comparator, MemberComparer, SortDescriptor, SortDirection};
use super::members::Members;
use super::options::ListOptions;
use super::value::Value;
use crate::error::{ListError, Result};
use crate::{keylist_debug, keylist_trace};

/// A list that can be sorted and searched by named members.
///
/// # Sorting
///
/// [`apply_sort`](Self::apply_sort) performs a stable sort and records the
/// member and direction. While that record exists the list keeps itself
/// sorted: reporting a change of the sort member through
/// [`on_member_changed`](Self::on_member_changed) (or mutating through
/// [`modify`](Self::modify)) moves the item to its new position and emits
/// a single [`ListChange::ItemMoved`](super::ListChange::ItemMoved).
///
/// [`remove_sort`](Self::remove_sort) clears the record but leaves the
/// items where the last sort put them.
///
/// Items added with [`push`](Self::push) or [`insert`](Self::insert) land
/// where they are put, even while the list is sorted.
///
/// # Example
///
/// ```
/// use keylist::{Members, SortDirection, SortableList, Value};
///
/// #[derive(Members, Clone)]
/// struct Person {
///     name: String,
///     age: u32,
/// }
///
/// let people = SortableList::new(vec![
///     Person { name: "Bob".into(), age: 30 },
///     Person { name: "Al".into(), age: 30 },
///     Person { name: "Cy".into(), age: 20 },
/// ]);
///
/// people.apply_sort("age", SortDirection::Ascending).unwrap();
/// let names: Vec<_> = people.items().iter().map(|p| p.name.clone()).collect();
/// assert_eq!(names, ["Cy", "Bob", "Al"]);
///
/// assert_eq!(people.find("name", &Value::from("Al")).unwrap(), Some(2));
/// ```
pub struct SortableList<T> {
    items: RwLock<Vec<T>>,
    sort: RwLock<Option<SortDescriptor>>,
    options: ListOptions,
    signals: ListSignals,
}

static_assertions::assert_impl_all!(SortableList<String>: Send, Sync);

impl<T: Members> SortableList<T> {
    /// Creates a list from an initial sequence, in that order.
    pub fn new(items: Vec<T>) -> Self {
        Self::with_options(items, ListOptions::default())
    }

    /// Creates an empty list.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Creates a list with explicit options.
    pub fn with_options(items: Vec<T>, options: ListOptions) -> Self {
        let signals = ListSignals::new();
        signals.list_changed.set_blocked(!options.raise_change_events);
        Self {
            items: RwLock::new(items),
            sort: RwLock::new(None),
            options,
            signals,
        }
    }

    /// Returns the signals for this list.
    pub fn signals(&self) -> &ListSignals {
        &self.signals
    }

    /// Returns the options the list was created with.
    pub fn options(&self) -> ListOptions {
        self.options
    }

    /// Turns change notifications on or off.
    pub fn set_raise_change_events(&self, raise: bool) {
        self.signals.list_changed.set_blocked(!raise);
    }

    /// Returns `true` if change notifications are emitted.
    pub fn raises_change_events(&self) -> bool {
        !self.signals.list_changed.is_blocked()
    }

    // -------------------------------------------------------------------------
    // Sort state
    // -------------------------------------------------------------------------

    /// Returns `true` if sorting is accepted.
    pub fn supports_sorting(&self) -> bool {
        self.options.allow_sort
    }

    /// Returns `true` if searching is accepted.
    pub fn supports_searching(&self) -> bool {
        self.options.allow_search
    }

    /// Returns `true` while a sort is recorded.
    pub fn is_sorted(&self) -> bool {
        self.sort.read().is_some()
    }

    /// The recorded sort, if any.
    pub fn sort_descriptor(&self) -> Option<SortDescriptor> {
        self.sort.read().clone()
    }

    /// The member the list is sorted by, if any.
    pub fn sort_attribute(&self) -> Option<String> {
        self.sort.read().as_ref().map(|d| d.attribute.clone())
    }

    /// The direction the list is sorted in, if sorted.
    pub fn sort_direction(&self) -> Option<SortDirection> {
        self.sort.read().as_ref().map(|d| d.direction)
    }

    /// Stable-sorts the list by `attribute` and records the sort.
    ///
    /// Equal items keep the relative order they had before the call in both
    /// directions. Emits one [`ListChange::Reset`](super::ListChange::Reset).
    ///
    /// # Errors
    ///
    /// - [`ListError::SortingNotSupported`] if the options disable sorting.
    /// - [`ListError::AttributeNotFound`] if `attribute` is not a member of
    ///   `T` or some item fails to resolve it. The list and its sort state
    ///   are left untouched.
    ///
    /// # Panics
    ///
    /// Panics if the element comparator is asked to compare values of
    /// incompatible kinds (see [`Comparator`]).
    #[tracing::instrument(skip(self), target = "keylist::model", level = "debug")]
    pub fn apply_sort(&self, attribute: &str, direction: SortDirection) -> Result<()> {
        if !self.options.allow_sort {
            return Err(ListError::SortingNotSupported);
        }

        {
            let mut items = self.items.write();
            if let Err(err) = sort_items(&mut items, attribute, direction) {
                keylist_debug!(attribute, %err, "sort rejected");
                return Err(err);
            }
            *self.sort.write() = Some(SortDescriptor::new(attribute, direction));
        }

        self.signals.emit_reset();
        Ok(())
    }

    /// Clears the recorded sort.
    ///
    /// The items stay in their current (last sorted) order; only the record is
    /// dropped, so later member changes no longer move items. Emits one
    /// [`ListChange::Reset`](super::ListChange::Reset).
    pub fn remove_sort(&self) {
        let previous = self.sort.write().take();
        keylist_debug!(?previous, "sort removed");
        self.signals.emit_reset();
    }

    /// Reports that member `attribute` of the item at `index` changed.
    ///
    /// If the list is sorted by `attribute`, the list is re-sorted and a single
    /// [`ListChange::ItemMoved`](super::ListChange::ItemMoved) carrying the
    /// item's old and new positions is emitted (the two are equal if the item
    /// did not move). Otherwise nothing moves and the change is forwarded as
    /// [`ListChange::ItemChanged`](super::ListChange::ItemChanged).
    ///
    /// Returns the item's position after the call.
    ///
    /// # Errors
    ///
    /// - [`ListError::IndexOutOfRange`] if `index` is not in the list.
    /// - [`ListError::AttributeNotFound`] if the re-sort cannot resolve the
    ///   sort member; the order is left untouched.
    pub fn on_member_changed(&self, index: usize, attribute: &str) -> Result<usize> {
        let moved = {
            let mut items = self.items.write();
            if index >= items.len() {
                return Err(ListError::index_out_of_range(index, items.len()));
            }

            match self.sort.read().as_ref() {
                Some(sort) if sort.attribute == attribute => {
                    let permutation = sort_items(&mut items, &sort.attribute, sort.direction)?;
                    // Identity lookup: the slot that now holds the old index.
                    let new_index = permutation
                        .iter()
                        .position(|&old| old == index)
                        .unwrap_or(index);
                    Some(new_index)
                }
                _ => None,
            }
        };

        match moved {
            Some(new_index) => {
                keylist_trace!(attribute, old_index = index, new_index, "item re-sorted");
                self.signals.emit_item_moved(index, new_index);
                Ok(new_index)
            }
            None => {
                self.signals.emit_item_changed(index, attribute);
                Ok(index)
            }
        }
    }

    /// Mutates the item at `index` in place and reports the change of `attribute`.
    ///
    /// Returns the closure's result and the item's position afterwards.
    ///
    /// # Errors
    ///
    /// Same as [`on_member_changed`](Self::on_member_changed).
    pub fn modify<F, R>(&self, index: usize, attribute: &str, f: F) -> Result<(R, usize)>
    where
        F: FnOnce(&mut T) -> R,
    {
        let result = {
            let mut items = self.items.write();
            let len = items.len();
            let item = items
                .get_mut(index)
                .ok_or(ListError::index_out_of_range(index, len))?;
            f(item)
        };
        let new_index = self.on_member_changed(index, attribute)?;
        Ok((result, new_index))
    }

    /// Finds the first item whose member `attribute` equals `key`.
    ///
    /// Scans in current order. The comparator comes from the first item, for
    /// the kind of `key`, and is reused for the rest of the scan.
    ///
    /// # Errors
    ///
    /// - [`ListError::SearchingNotSupported`] if the options disable searching.
    /// - [`ListError::AttributeNotFound`] if `attribute` is not a member of `T`.
    ///
    /// # Panics
    ///
    /// Panics if the element comparator is asked to compare values of
    /// incompatible kinds (see [`Comparator`]).
    #[tracing::instrument(skip(self), target = "keylist::model", level = "trace")]
    pub fn find(&self, attribute: &str, key: &Value) -> Result<Option<usize>> {
        if !self.options.allow_search {
            return Err(ListError::SearchingNotSupported);
        }
        if !T::has_member(attribute) {
            keylist_debug!(attribute, "find on unknown attribute");
            return Err(ListError::attribute_not_found(attribute));
        }

        let items = self.items.read();
        let _perf = PerfSpan::with_len(span_names::FIND, items.len());
        let mut comparator: Option<Comparator> = None;

        for (index, item) in items.iter().enumerate() {
            let value = item.member_value(attribute)?;
            let comparator = comparator.get_or_insert_with(|| match key.kind() {
                Some(kind) => item.member_comparer(kind),
                None => Comparator::natural(),
            });
            if comparator.equals(&value, key) {
                return Ok(Some(index));
            }
        }

        Ok(None)
    }

    // -------------------------------------------------------------------------
    // Backing sequence
    // -------------------------------------------------------------------------

    /// Returns the number of items in the list.
    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    /// Returns `true` if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }

    /// Appends an item to the end of the list.
    ///
    /// The item is not moved into sorted position.
    pub fn push(&self, item: T) -> usize {
        let index = {
            let mut items = self.items.write();
            items.push(item);
            items.len() - 1
        };
        self.signals.emit_item_added(index);
        index
    }

    /// Inserts an item at `index`.
    ///
    /// # Errors
    ///
    /// [`ListError::IndexOutOfRange`] if `index > len()`.
    pub fn insert(&self, index: usize, item: T) -> Result<()> {
        {
            let mut items = self.items.write();
            if index > items.len() {
                return Err(ListError::index_out_of_range(index, items.len()));
            }
            items.insert(index, item);
        }
        self.signals.emit_item_added(index);
        Ok(())
    }

    /// Removes and returns the item at `index`.
    ///
    /// # Errors
    ///
    /// [`ListError::IndexOutOfRange`] if `index >= len()`.
    pub fn remove(&self, index: usize) -> Result<T> {
        let removed = {
            let mut items = self.items.write();
            if index >= items.len() {
                return Err(ListError::index_out_of_range(index, items.len()));
            }
            items.remove(index)
        };
        self.signals.emit_item_deleted(index);
        Ok(removed)
    }

    /// Removes all items. The sort record is kept.
    pub fn clear(&self) {
        self.items.write().clear();
        self.signals.emit_reset();
    }

    /// Replaces all items. The sort record is kept but not re-applied.
    pub fn set_items(&self, items: Vec<T>) {
        *self.items.write() = items;
        self.signals.emit_reset();
    }

    /// Returns a read guard over the items.
    ///
    /// Do not call mutating list methods while holding the guard.
    pub fn items(&self) -> impl std::ops::Deref<Target = Vec<T>> + '_ {
        self.items.read()
    }

    /// Reads the item at `index` through a closure.
    pub fn with_item<F, R>(&self, index: usize, f: F) -> Option<R>
    where
        F: FnOnce(&T) -> R,
    {
        self.items.read().get(index).map(f)
    }

    /// Consumes the list, returning the items in their current order.
    pub fn into_items(self) -> Vec<T> {
        self.items.into_inner()
    }
}

impl<T: Members + Clone> SortableList<T> {
    /// Returns a clone of the item at `index`.
    pub fn get(&self, index: usize) -> Option<T> {
        self.items.read().get(index).cloned()
    }

    /// Returns a clone of all items in current order.
    pub fn to_vec(&self) -> Vec<T> {
        self.items.read().clone()
    }
}

impl<T: Members> Default for SortableList<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: Members> From<Vec<T>> for SortableList<T> {
    fn from(items: Vec<T>) -> Self {
        Self::new(items)
    }
}

impl<T: Members> FromIterator<T> for SortableList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<T: fmt::Debug> fmt::Debug for SortableList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SortableList")
            .field("items", &*self.items.read())
            .field("sort", &*self.sort.read())
            .field("options", &self.options)
            .finish()
    }
}

/// Stable-sorts `items` by `attribute`, returning the applied permutation.
///
/// Nothing is reordered if any key fails to resolve.
fn sort_items<T: Members>(
    items: &mut Vec<T>,
    attribute: &str,
    direction: SortDirection,
) -> Result<Vec<usize>> {
    let _perf = PerfSpan::with_len(span_names::SORT, items.len());
    let (comparer, keys) = MemberComparer::resolve(attribute, direction, items)?;
    let permutation = comparer.sort_permutation(&keys);
    keylist_trace!(
        attribute,
        ?direction,
        comparator = comparer.comparator().name(),
        len = items.len(),
        "sorted"
    );

    let mut slots: Vec<Option<T>> = items.drain(..).map(Some).collect();
    items.extend(permutation.iter().filter_map(|&old| slots[old].take()));
    Ok(permutation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::change::ListChange;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[derive(Debug, Clone, PartialEq)]
    struct Person {
        name: String,
        age: i64,
    }

    impl Members for Person {
        fn member_names() -> &'static [&'static str] {
            &["name", "age"]
        }

        fn member_value(&self, name: &str) -> Result<Value> {
            match name {
                "name" => Ok(Value::from(self.name.as_str())),
                "age" => Ok(Value::from(self.age)),
                _ => Err(ListError::attribute_not_found(name)),
            }
        }
    }

    fn person(name: &str, age: i64) -> Person {
        Person {
            name: name.into(),
            age,
        }
    }

    fn names(list: &SortableList<Person>) -> Vec<String> {
        list.items().iter().map(|p| p.name.clone()).collect()
    }

    fn record(list: &SortableList<Person>) -> Arc<Mutex<Vec<ListChange>>> {
        let events = Arc::new(Mutex::new(Vec::new()));
        let recv = events.clone();
        list.signals()
            .list_changed
            .connect(move |change| recv.lock().push(change.clone()));
        events
    }

    #[test]
    fn test_sort_emits_single_reset() {
        let list = SortableList::new(vec![person("b", 2), person("a", 1)]);
        let events = record(&list);

        list.apply_sort("name", SortDirection::Ascending).unwrap();

        assert_eq!(names(&list), ["a", "b"]);
        assert_eq!(*events.lock(), vec![ListChange::Reset]);
        assert_eq!(
            list.sort_descriptor(),
            Some(SortDescriptor::new("name", SortDirection::Ascending))
        );
    }

    #[test]
    fn test_sort_disabled() {
        let list = SortableList::with_options(vec![person("a", 1)], ListOptions::plain());
        assert_eq!(
            list.apply_sort("name", SortDirection::Ascending),
            Err(ListError::SortingNotSupported)
        );
        assert_eq!(
            list.find("name", &"a".into()),
            Err(ListError::SearchingNotSupported)
        );
        assert!(!list.is_sorted());
    }

    #[test]
    fn test_unknown_attribute_on_empty_list() {
        let list = SortableList::<Person>::empty();
        assert_eq!(
            list.apply_sort("height", SortDirection::Ascending),
            Err(ListError::attribute_not_found("height"))
        );
        assert_eq!(
            list.find("height", &Value::Int(1)),
            Err(ListError::attribute_not_found("height"))
        );
    }

    #[derive(Debug, Clone)]
    struct Reading {
        id: i64,
        corrupt: bool,
    }

    impl Members for Reading {
        fn member_names() -> &'static [&'static str] {
            &["id"]
        }

        fn member_value(&self, name: &str) -> Result<Value> {
            match name {
                "id" if !self.corrupt => Ok(Value::from(self.id)),
                _ => Err(ListError::attribute_not_found(name)),
            }
        }
    }

    fn reading(id: i64, corrupt: bool) -> Reading {
        Reading { id, corrupt }
    }

    fn ids(list: &SortableList<Reading>) -> Vec<i64> {
        list.items().iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_element_lookup_failure_leaves_list_untouched() {
        let list = SortableList::new(vec![reading(3, false), reading(1, true), reading(2, false)]);
        let events = Arc::new(Mutex::new(Vec::new()));
        let recv = events.clone();
        list.signals()
            .list_changed
            .connect(move |change| recv.lock().push(change.clone()));

        assert_eq!(
            list.apply_sort("id", SortDirection::Ascending),
            Err(ListError::attribute_not_found("id"))
        );
        assert_eq!(ids(&list), [3, 1, 2]);
        assert!(!list.is_sorted());

        assert_eq!(
            list.find("id", &Value::Int(2)),
            Err(ListError::attribute_not_found("id"))
        );
        assert!(events.lock().is_empty());
    }

    #[test]
    fn test_failed_resort_does_not_move_items() {
        let list = SortableList::new(vec![reading(3, false), reading(1, false), reading(2, false)]);
        list.apply_sort("id", SortDirection::Ascending).unwrap();
        let events = Arc::new(Mutex::new(Vec::new()));
        let recv = events.clone();
        list.signals()
            .list_changed
            .connect(move |change| recv.lock().push(change.clone()));

        let result = list.modify(0, "id", |r| {
            r.id = 10;
            r.corrupt = true;
        });

        assert_eq!(result, Err(ListError::attribute_not_found("id")));
        assert_eq!(ids(&list), [10, 2, 3]);
        assert!(list.is_sorted());
        assert_eq!(
            list.on_member_changed(0, "id"),
            Err(ListError::attribute_not_found("id"))
        );
        assert!(events.lock().is_empty());
    }

    #[test]
    fn test_member_change_without_sort_is_forwarded() {
        let list = SortableList::new(vec![person("a", 1), person("b", 2)]);
        let events = record(&list);

        let (_, index) = list.modify(0, "age", |p| p.age = 10).unwrap();

        assert_eq!(index, 0);
        assert_eq!(names(&list), ["a", "b"]);
        assert_eq!(
            *events.lock(),
            vec![ListChange::ItemChanged {
                index: 0,
                attribute: "age".into()
            }]
        );
    }

    #[test]
    fn test_change_of_other_member_does_not_resort() {
        let list = SortableList::new(vec![person("a", 1), person("b", 2)]);
        list.apply_sort("age", SortDirection::Ascending).unwrap();
        let events = record(&list);

        list.modify(0, "name", |p| p.name = "z".into()).unwrap();

        assert_eq!(names(&list), ["z", "b"]);
        assert!(matches!(events.lock()[0], ListChange::ItemChanged { index: 0, .. }));
    }

    #[test]
    fn test_member_change_out_of_range() {
        let list = SortableList::new(vec![person("a", 1)]);
        assert_eq!(
            list.on_member_changed(3, "age"),
            Err(ListError::index_out_of_range(3, 1))
        );
        assert!(list.modify(1, "age", |p| p.age = 0).is_err());
    }

    #[test]
    fn test_push_insert_remove_signals() {
        let list = SortableList::new(vec![person("a", 1)]);
        let events = record(&list);

        assert_eq!(list.push(person("c", 3)), 1);
        list.insert(1, person("b", 2)).unwrap();
        assert!(list.insert(9, person("x", 0)).is_err());
        let removed = list.remove(0).unwrap();

        assert_eq!(removed.name, "a");
        assert_eq!(names(&list), ["b", "c"]);
        assert_eq!(
            *events.lock(),
            vec![
                ListChange::ItemAdded { index: 1 },
                ListChange::ItemAdded { index: 1 },
                ListChange::ItemDeleted { index: 0 },
            ]
        );
    }

    #[test]
    fn test_push_while_sorted_keeps_sort_record() {
        let list = SortableList::new(vec![person("b", 2), person("a", 1)]);
        list.apply_sort("age", SortDirection::Ascending).unwrap();

        list.push(person("first", 0));

        assert!(list.is_sorted());
        assert_eq!(names(&list), ["a", "b", "first"]);
    }

    #[test]
    fn test_clear_and_set_items_reset() {
        let list = SortableList::new(vec![person("a", 1)]);
        list.apply_sort("age", SortDirection::Descending).unwrap();
        let events = record(&list);

        list.set_items(vec![person("x", 5), person("y", 9)]);
        assert_eq!(names(&list), ["x", "y"]);
        list.clear();

        assert!(list.is_empty());
        assert_eq!(list.sort_direction(), Some(SortDirection::Descending));
        assert_eq!(*events.lock(), vec![ListChange::Reset, ListChange::Reset]);
    }

    #[test]
    fn test_events_can_be_silenced() {
        let list = SortableList::with_options(
            vec![person("b", 2), person("a", 1)],
            ListOptions::new().with_change_events(false),
        );
        let events = record(&list);

        list.apply_sort("name", SortDirection::Ascending).unwrap();
        assert!(events.lock().is_empty());
        assert!(!list.raises_change_events());

        list.set_raise_change_events(true);
        list.remove_sort();
        assert_eq!(*events.lock(), vec![ListChange::Reset]);
    }

    #[test]
    fn test_slot_can_read_list_during_emit() {
        let list = Arc::new(SortableList::new(vec![person("b", 2), person("a", 1)]));
        let seen = Arc::new(Mutex::new(Vec::new()));

        let weak = Arc::downgrade(&list);
        let seen_clone = seen.clone();
        list.signals().list_changed.connect(move |_| {
            if let Some(list) = weak.upgrade() {
                seen_clone.lock().push(list.get(0).map(|p| p.name));
            }
        });

        list.apply_sort("name", SortDirection::Ascending).unwrap();
        assert_eq!(*seen.lock(), vec![Some("a".to_string())]);
    }

    #[test]
    fn test_accessors() {
        let list: SortableList<Person> = vec![person("a", 1), person("b", 2)].into_iter().collect();
        assert_eq!(list.len(), 2);
        assert_eq!(list.with_item(1, |p| p.age), Some(2));
        assert_eq!(list.with_item(2, |p| p.age), None);
        assert_eq!(list.sort_attribute(), None);
        assert!(list.supports_sorting());
        assert!(list.supports_searching());
        assert_eq!(list.to_vec().len(), 2);
        assert_eq!(list.into_items()[0].name, "a");
    }
}
