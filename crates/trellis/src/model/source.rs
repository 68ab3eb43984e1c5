//! Item sources: where the engine's data comes from.
//!
//! An [`ItemSource`] exposes a flat sequence of items, optionally organized
//! into groups. Mutations are reported through a single `changed` signal;
//! the engine responds by re-flattening everything, so sources never need
//! to describe *what* changed.
//!
//! # Example
//!
//! ```
//! use trellis::model::{ItemSource, VecSource};
//!
//! let source = VecSource::from(vec!["alpha", "beta"]);
//! assert_eq!(source.len(), 2);
//! source.push("gamma");
//! assert_eq!(source.get(2), Some("gamma"));
//! ```

use parking_lot::RwLock;

use trellis_core::Signal;

/// Change notifications emitted by an item source.
///
/// Add, remove, replace and reset all collapse to `changed`: any mutation
/// means the consumer must rebuild its flattened slot list.
#[derive(Default)]
pub struct SourceSignals {
    /// Emitted after any mutation of the source's contents.
    pub changed: Signal<()>,
}

impl SourceSignals {
    /// Create a fresh signal set.
    pub fn new() -> Self {
        Self::default()
    }
}

/// A sequence of items the engine can flatten and display.
///
/// Items are handed out by value (`T: Clone`); sources that store something
/// heavier wrap it in `Arc`.
///
/// The grouped accessors have inert defaults so flat sources only implement
/// `len`/`get`. A grouped source returns `true` from
/// [`is_grouped`](Self::is_grouped) and exposes its structure through the
/// `group_*` methods; `len`/`get` must still see the items in flattened
/// group order, since selection and scroll-to address items flatly.
pub trait ItemSource<T>: Send + Sync {
    /// Total number of items across all groups.
    fn len(&self) -> usize;

    /// Whether the source has no items.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The item at a flat index.
    fn get(&self, index: usize) -> Option<T>;

    /// Whether the source is organized into groups.
    fn is_grouped(&self) -> bool {
        false
    }

    /// Number of groups. Zero for flat sources.
    fn group_count(&self) -> usize {
        0
    }

    /// The group object for a group index.
    fn group(&self, _group: usize) -> Option<T> {
        None
    }

    /// Number of items in a group.
    fn group_len(&self, _group: usize) -> usize {
        0
    }

    /// The item at an index within a group.
    fn group_item(&self, _group: usize, _index: usize) -> Option<T> {
        None
    }

    /// The source's change notifications.
    fn signals(&self) -> &SourceSignals;
}

// =========================================================================
// VecSource
// =========================================================================

/// A flat, in-memory item source backed by a `Vec`.
///
/// Every mutation emits `signals().changed`.
pub struct VecSource<T> {
    items: RwLock<Vec<T>>,
    signals: SourceSignals,
}

impl<T: Clone + Send + Sync> VecSource<T> {
    /// Create an empty source.
    pub fn new() -> Self {
        Self {
            items: RwLock::new(Vec::new()),
            signals: SourceSignals::new(),
        }
    }

    /// Append an item.
    pub fn push(&self, item: T) {
        self.items.write().push(item);
        self.signals.changed.emit(());
    }

    /// Insert an item at an index.
    ///
    /// Indices past the end append instead.
    pub fn insert(&self, index: usize, item: T) {
        let mut items = self.items.write();
        let index = index.min(items.len());
        items.insert(index, item);
        drop(items);
        self.signals.changed.emit(());
    }

    /// Remove and return the item at an index.
    pub fn remove(&self, index: usize) -> Option<T> {
        let mut items = self.items.write();
        if index >= items.len() {
            return None;
        }
        let item = items.remove(index);
        drop(items);
        self.signals.changed.emit(());
        Some(item)
    }

    /// Replace the entire contents.
    pub fn set_items(&self, items: Vec<T>) {
        *self.items.write() = items;
        self.signals.changed.emit(());
    }

    /// Remove all items.
    pub fn clear(&self) {
        self.items.write().clear();
        self.signals.changed.emit(());
    }
}

impl<T: Clone + Send + Sync> Default for VecSource<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Send + Sync> From<Vec<T>> for VecSource<T> {
    fn from(items: Vec<T>) -> Self {
        Self {
            items: RwLock::new(items),
            signals: SourceSignals::new(),
        }
    }
}

impl<T: Clone + Send + Sync> ItemSource<T> for VecSource<T> {
    fn len(&self) -> usize {
        self.items.read().len()
    }

    fn get(&self, index: usize) -> Option<T> {
        self.items.read().get(index).cloned()
    }

    fn signals(&self) -> &SourceSignals {
        &self.signals
    }
}

// =========================================================================
// GroupedVecSource
// =========================================================================

/// One group in a [`GroupedVecSource`]: a group object plus its items.
#[derive(Clone)]
pub struct Group<T> {
    /// The object shown in group header/footer slots.
    pub key: T,
    /// The group's items.
    pub items: Vec<T>,
}

impl<T> Group<T> {
    /// Create a group.
    pub fn new(key: T, items: Vec<T>) -> Self {
        Self { key, items }
    }
}

/// A grouped, in-memory item source.
///
/// The group object and the items share the item type, matching the flat
/// slot list where group header/footer slots carry the group object in the
/// same `content` field items use.
pub struct GroupedVecSource<T> {
    groups: RwLock<Vec<Group<T>>>,
    signals: SourceSignals,
}

impl<T: Clone + Send + Sync> GroupedVecSource<T> {
    /// Create an empty grouped source.
    pub fn new() -> Self {
        Self {
            groups: RwLock::new(Vec::new()),
            signals: SourceSignals::new(),
        }
    }

    /// Append a group.
    pub fn push_group(&self, group: Group<T>) {
        self.groups.write().push(group);
        self.signals.changed.emit(());
    }

    /// Replace the entire contents.
    pub fn set_groups(&self, groups: Vec<Group<T>>) {
        *self.groups.write() = groups;
        self.signals.changed.emit(());
    }

    /// Remove all groups.
    pub fn clear(&self) {
        self.groups.write().clear();
        self.signals.changed.emit(());
    }
}

impl<T: Clone + Send + Sync> Default for GroupedVecSource<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Send + Sync> From<Vec<Group<T>>> for GroupedVecSource<T> {
    fn from(groups: Vec<Group<T>>) -> Self {
        Self {
            groups: RwLock::new(groups),
            signals: SourceSignals::new(),
        }
    }
}

impl<T: Clone + Send + Sync> ItemSource<T> for GroupedVecSource<T> {
    fn len(&self) -> usize {
        self.groups.read().iter().map(|g| g.items.len()).sum()
    }

    fn get(&self, index: usize) -> Option<T> {
        let groups = self.groups.read();
        let mut remaining = index;
        for group in groups.iter() {
            if remaining < group.items.len() {
                return Some(group.items[remaining].clone());
            }
            remaining -= group.items.len();
        }
        None
    }

    fn is_grouped(&self) -> bool {
        true
    }

    fn group_count(&self) -> usize {
        self.groups.read().len()
    }

    fn group(&self, group: usize) -> Option<T> {
        self.groups.read().get(group).map(|g| g.key.clone())
    }

    fn group_len(&self, group: usize) -> usize {
        self.groups.read().get(group).map_or(0, |g| g.items.len())
    }

    fn group_item(&self, group: usize, index: usize) -> Option<T> {
        self.groups
            .read()
            .get(group)
            .and_then(|g| g.items.get(index).cloned())
    }

    fn signals(&self) -> &SourceSignals {
        &self.signals
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_vec_source_access() {
        let source = VecSource::from(vec![10, 20, 30]);
        assert_eq!(source.len(), 3);
        assert_eq!(source.get(0), Some(10));
        assert_eq!(source.get(2), Some(30));
        assert_eq!(source.get(3), None);
        assert!(!source.is_grouped());
    }

    #[test]
    fn test_vec_source_mutations_emit_changed() {
        let source = VecSource::<i32>::new();
        let count = Arc::new(AtomicUsize::new(0));

        let count_clone = count.clone();
        source.signals().changed.connect(move |_| {
            count_clone.fetch_add(1, Ordering::SeqCst);
        });

        source.push(1);
        source.insert(0, 2);
        source.remove(1);
        source.set_items(vec![5, 6]);
        source.clear();

        assert_eq!(count.load(Ordering::SeqCst), 5);
    }

    #[test]
    fn test_vec_source_remove_out_of_range() {
        let source = VecSource::from(vec![1]);
        let count = Arc::new(AtomicUsize::new(0));

        let count_clone = count.clone();
        source.signals().changed.connect(move |_| {
            count_clone.fetch_add(1, Ordering::SeqCst);
        });

        assert_eq!(source.remove(5), None);
        // No mutation, no notification
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_grouped_source_structure() {
        let source = GroupedVecSource::from(vec![
            Group::new("fruit", vec!["apple", "pear"]),
            Group::new("veg", vec!["leek"]),
        ]);

        assert!(source.is_grouped());
        assert_eq!(source.group_count(), 2);
        assert_eq!(source.group(0), Some("fruit"));
        assert_eq!(source.group_len(0), 2);
        assert_eq!(source.group_item(1, 0), Some("leek"));
        assert_eq!(source.group_item(1, 1), None);
    }

    #[test]
    fn test_grouped_source_flat_access() {
        let source = GroupedVecSource::from(vec![
            Group::new(0, vec![1, 2]),
            Group::new(0, vec![3]),
        ]);

        assert_eq!(source.len(), 3);
        assert_eq!(source.get(0), Some(1));
        assert_eq!(source.get(2), Some(3));
        assert_eq!(source.get(3), None);
    }
}
