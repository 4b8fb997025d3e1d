//! Observable list of items.
//!
//! `ObservableList<T>` is an ordered, mutable container that reports every
//! change through its [`collection_changed`](ObservableList::collection_changed)
//! signal. The order of items is the order of rows.
//!
//! Each mutating call applies the change, releases the lock, and only then
//! emits exactly one [`CollectionChange`]. Slots can therefore read the list
//! (or mutate it again) from inside the notification.

use std::ops::Range;

use autobind_core::Signal;
use parking_lot::RwLock;

use crate::error::{AdapterError, Result};

/// The kind of structural change a collection went through.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    /// Items were inserted; the range covers the new items.
    Insert,
    /// Items were removed; the range covers their former positions.
    Remove,
    /// Items were replaced in place; the range covers the touched positions.
    Replace,
    /// The whole collection changed; the range covers the old contents.
    Reset,
}

/// A structured change notification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CollectionChange {
    /// What happened.
    pub kind: ChangeKind,
    /// The affected positions.
    pub range: Range<usize>,
}

impl CollectionChange {
    /// Creates a change descriptor.
    pub fn new(kind: ChangeKind, range: Range<usize>) -> Self {
        Self { kind, range }
    }

    /// Number of positions covered by the change.
    pub fn len(&self) -> usize {
        self.range.len()
    }

    /// Returns `true` if the change covers no positions.
    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }
}

/// Signal type emitted by [`ObservableList`]; the sender is the list itself.
pub type CollectionChangedSignal<T> = Signal<ObservableList<T>, CollectionChange>;

/// An ordered list that emits a [`CollectionChange`] whenever it is mutated.
///
/// All methods take `&self`; the items live behind a `RwLock` so the list can
/// be shared with the adapter that observes it.
///
/// # Example
///
/// ```
/// use autobind::model::{ChangeKind, ObservableList};
/// use std::sync::{Arc, Mutex};
///
/// let list = ObservableList::new();
/// let seen = Arc::new(Mutex::new(Vec::new()));
///
/// let seen_clone = seen.clone();
/// list.collection_changed().connect(move |_, change| {
///     seen_clone.lock().unwrap().push(change.clone());
/// });
///
/// list.push("one");
/// list.extend(["two", "three"]);
///
/// let seen = seen.lock().unwrap();
/// assert_eq!(seen[0].kind, ChangeKind::Insert);
/// assert_eq!(seen[1].range, 1..3);
/// ```
pub struct ObservableList<T> {
    items: RwLock<Vec<T>>,
    collection_changed: CollectionChangedSignal<T>,
}

impl<T> Default for ObservableList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for ObservableList<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObservableList")
            .field("items", &*self.items.read())
            .field("collection_changed", &self.collection_changed)
            .finish()
    }
}

impl<T> ObservableList<T> {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::from_items(Vec::new())
    }

    /// Creates a list holding `items`. No notification is emitted.
    pub fn from_items(items: Vec<T>) -> Self {
        Self {
            items: RwLock::new(items),
            collection_changed: Signal::new(),
        }
    }

    /// The change notification channel.
    pub fn collection_changed(&self) -> &CollectionChangedSignal<T> {
        &self.collection_changed
    }

    /// Returns the number of items.
    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    /// Returns `true` if the list holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }

    /// Returns a read guard over the items.
    ///
    /// Do not mutate the list while holding the guard.
    pub fn items(&self) -> impl std::ops::Deref<Target = Vec<T>> + '_ {
        self.items.read()
    }

    /// Calls `f` with a reference to the item at `index`, if there is one.
    pub fn with_item<R>(&self, index: usize, f: impl FnOnce(&T) -> R) -> Option<R> {
        self.items.read().get(index).map(f)
    }

    /// Appends an item to the end of the list.
    pub fn push(&self, item: T) {
        let row = {
            let mut items = self.items.write();
            items.push(item);
            items.len() - 1
        };
        self.notify(ChangeKind::Insert, row..row + 1);
    }

    /// Appends every item from `iter`.
    ///
    /// Emits a single insert covering the appended range, or nothing if the
    /// iterator was empty. The iterator is drained before the list is locked,
    /// so it may read the list.
    pub fn extend<I>(&self, iter: I)
    where
        I: IntoIterator<Item = T>,
    {
        let new_items: Vec<T> = iter.into_iter().collect();
        let range = {
            let mut items = self.items.write();
            let start = items.len();
            items.extend(new_items);
            start..items.len()
        };
        if !range.is_empty() {
            self.notify(ChangeKind::Insert, range);
        }
    }

    /// Inserts an item at `index`, shifting later items back.
    ///
    /// Fails with [`AdapterError::OutOfRange`] if `index > len()`.
    pub fn insert(&self, index: usize, item: T) -> Result<()> {
        {
            let mut items = self.items.write();
            if index > items.len() {
                return Err(AdapterError::out_of_range(index, items.len()));
            }
            items.insert(index, item);
        }
        self.notify(ChangeKind::Insert, index..index + 1);
        Ok(())
    }

    /// Removes and returns the item at `index`.
    pub fn remove(&self, index: usize) -> Result<T> {
        let removed = {
            let mut items = self.items.write();
            if index >= items.len() {
                return Err(AdapterError::out_of_range(index, items.len()));
            }
            items.remove(index)
        };
        self.notify(ChangeKind::Remove, index..index + 1);
        Ok(removed)
    }

    /// Replaces the item at `index`, returning the previous one.
    pub fn replace(&self, index: usize, item: T) -> Result<T> {
        let previous = {
            let mut items = self.items.write();
            let len = items.len();
            let slot = items
                .get_mut(index)
                .ok_or(AdapterError::out_of_range(index, len))?;
            std::mem::replace(slot, item)
        };
        self.notify(ChangeKind::Replace, index..index + 1);
        Ok(previous)
    }

    /// Provides mutable access to an item via a closure.
    ///
    /// Emits a replace notification after `f` returns. Returns `None` without
    /// notifying if `index` is out of range.
    pub fn modify<F, R>(&self, index: usize, f: F) -> Option<R>
    where
        F: FnOnce(&mut T) -> R,
    {
        let result = {
            let mut items = self.items.write();
            f(items.get_mut(index)?)
        };
        self.notify(ChangeKind::Replace, index..index + 1);
        Some(result)
    }

    /// Swaps two items.
    ///
    /// The notification is a replace covering both positions.
    pub fn swap(&self, a: usize, b: usize) -> Result<()> {
        {
            let mut items = self.items.write();
            let len = items.len();
            if let Some(&index) = [a, b].iter().find(|&&i| i >= len) {
                return Err(AdapterError::out_of_range(index, len));
            }
            items.swap(a, b);
        }
        self.notify(ChangeKind::Replace, a.min(b)..a.max(b) + 1);
        Ok(())
    }

    /// Sorts the list using the provided comparator. Emits a reset.
    pub fn sort_by<F>(&self, compare: F)
    where
        F: FnMut(&T, &T) -> std::cmp::Ordering,
    {
        let len = {
            let mut items = self.items.write();
            items.sort_by(compare);
            items.len()
        };
        self.notify(ChangeKind::Reset, 0..len);
    }

    /// Removes all items. Emits a reset even if the list was already empty.
    pub fn clear(&self) {
        let old_len = {
            let mut items = self.items.write();
            let len = items.len();
            items.clear();
            len
        };
        self.notify(ChangeKind::Reset, 0..old_len);
    }

    /// Replaces all items. Emits a reset covering the old contents.
    pub fn set_items(&self, new_items: Vec<T>) {
        let old_len = {
            let mut items = self.items.write();
            std::mem::replace(&mut *items, new_items).len()
        };
        self.notify(ChangeKind::Reset, 0..old_len);
    }

    fn notify(&self, kind: ChangeKind, range: Range<usize>) {
        tracing::debug!(target: "autobind::model", ?kind, ?range, "collection changed");
        self.collection_changed
            .emit(self, &CollectionChange::new(kind, range));
    }
}

impl<T: Clone> ObservableList<T> {
    /// Returns a clone of the item at `index`.
    ///
    /// Fails with [`AdapterError::OutOfRange`] outside `[0, len)`.
    pub fn get(&self, index: usize) -> Result<T> {
        let items = self.items.read();
        items
            .get(index)
            .cloned()
            .ok_or(AdapterError::out_of_range(index, items.len()))
    }

    /// Returns a clone of the item at `index`, or `None` if there is none.
    pub fn get_or_none(&self, index: usize) -> Option<T> {
        self.items.read().get(index).cloned()
    }

    /// Returns a snapshot of all items.
    pub fn to_vec(&self) -> Vec<T> {
        self.items.read().clone()
    }
}

impl<T: PartialEq> ObservableList<T> {
    /// Returns `true` if the list contains `item`.
    pub fn contains(&self, item: &T) -> bool {
        self.items.read().contains(item)
    }

    /// Returns the index of the first item equal to `item`.
    pub fn position(&self, item: &T) -> Option<usize> {
        self.items.read().iter().position(|x| x == item)
    }

    /// Removes the first item equal to `item`. Returns `true` if one was removed.
    pub fn remove_item(&self, item: &T) -> bool {
        let index = {
            let mut items = self.items.write();
            match items.iter().position(|x| x == item) {
                Some(index) => {
                    items.remove(index);
                    index
                }
                None => return false,
            }
        };
        self.notify(ChangeKind::Remove, index..index + 1);
        true
    }
}

impl<T> FromIterator<T> for ObservableList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_items(iter.into_iter().collect())
    }
}
