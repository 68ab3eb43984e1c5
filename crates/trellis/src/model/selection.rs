//! Selection tracking over flat slot indices.
//!
//! [`SelectionTracker`] holds which slot indices are selected and applies
//! the mode rules for taps. It knows nothing about views or highlights;
//! `CollectionView` listens to `selection_changed` and paints highlights on
//! whatever live views the changed indices have.
//!
//! # Example
//!
//! ```
//! use trellis::model::{SelectionMode, SelectionTracker};
//!
//! let mut selection = SelectionTracker::new();
//! selection.set_mode(SelectionMode::Single);
//! selection.tap(2);
//! selection.tap(5);
//! assert_eq!(selection.selected_indices(), vec![5]);
//! ```

use std::collections::BTreeSet;

use trellis_core::Signal;

/// How many items can be selected at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
    /// Selection gestures are inert (default).
    #[default]
    None,
    /// At most one item; tapping moves the selection.
    Single,
    /// Tapping toggles membership.
    Multiple,
}

/// Selection state for one collection view.
///
/// Indices are flat slot indices; only Item-role slots are ever passed in
/// by the engine. A `BTreeSet` keeps `selected_indices` in ascending order,
/// which is the order selected items are published in.
pub struct SelectionTracker {
    mode: SelectionMode,
    selected: BTreeSet<usize>,

    /// Emitted with `(selected, deselected)` index lists after every
    /// effective change.
    pub selection_changed: Signal<(Vec<usize>, Vec<usize>)>,
}

impl Default for SelectionTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionTracker {
    /// Create a tracker with [`SelectionMode::None`] and nothing selected.
    pub fn new() -> Self {
        Self {
            mode: SelectionMode::None,
            selected: BTreeSet::new(),
            selection_changed: Signal::new(),
        }
    }

    /// The current mode.
    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    /// Change the mode, clearing any existing selection.
    ///
    /// A selection made under one mode is meaningless under another, so the
    /// indices are dropped along with the highlights.
    pub fn set_mode(&mut self, mode: SelectionMode) {
        if self.mode == mode {
            return;
        }
        self.mode = mode;
        self.clear();
    }

    /// Whether an index is selected.
    pub fn is_selected(&self, index: usize) -> bool {
        self.selected.contains(&index)
    }

    /// Selected indices in ascending order.
    pub fn selected_indices(&self) -> Vec<usize> {
        self.selected.iter().copied().collect()
    }

    /// Apply a tap on a slot index under the current mode's rules.
    pub fn tap(&mut self, index: usize) {
        match self.mode {
            SelectionMode::None => {}
            SelectionMode::Single => {
                if self.is_selected(index) {
                    return;
                }
                let deselected: Vec<usize> = self.selected.iter().copied().collect();
                self.selected.clear();
                self.selected.insert(index);
                tracing::trace!(
                    target: "trellis::selection",
                    index,
                    "single selection moved"
                );
                self.selection_changed.emit((vec![index], deselected));
            }
            SelectionMode::Multiple => {
                if self.selected.remove(&index) {
                    self.selection_changed.emit((Vec::new(), vec![index]));
                } else {
                    self.selected.insert(index);
                    self.selection_changed.emit((vec![index], Vec::new()));
                }
            }
        }
    }

    /// Select an index programmatically.
    ///
    /// Under `Single` this replaces the current selection; under `None` it
    /// is ignored.
    pub fn select(&mut self, index: usize) {
        match self.mode {
            SelectionMode::None => {}
            SelectionMode::Single => {
                if !self.is_selected(index) {
                    let deselected: Vec<usize> = self.selected.iter().copied().collect();
                    self.selected.clear();
                    self.selected.insert(index);
                    self.selection_changed.emit((vec![index], deselected));
                }
            }
            SelectionMode::Multiple => {
                if self.selected.insert(index) {
                    self.selection_changed.emit((vec![index], Vec::new()));
                }
            }
        }
    }

    /// Deselect an index programmatically.
    pub fn deselect(&mut self, index: usize) {
        if self.selected.remove(&index) {
            self.selection_changed.emit((Vec::new(), vec![index]));
        }
    }

    /// Clear the selection.
    pub fn clear(&mut self) {
        if self.selected.is_empty() {
            return;
        }
        let deselected: Vec<usize> = self.selected.iter().copied().collect();
        self.selected.clear();
        self.selection_changed.emit((Vec::new(), deselected));
    }

    /// Drop indices that no longer exist after a reload.
    ///
    /// `valid` decides, per index, whether the slot survived. Indices a
    /// rebuilt slot list cannot account for are silently deselected.
    pub fn retain<F: Fn(usize) -> bool>(&mut self, valid: F) {
        let dropped: Vec<usize> = self
            .selected
            .iter()
            .copied()
            .filter(|&i| !valid(i))
            .collect();
        if dropped.is_empty() {
            return;
        }
        for index in &dropped {
            self.selected.remove(index);
        }
        self.selection_changed.emit((Vec::new(), dropped));
    }

    /// Resolve the selected data items against a source-backed index map.
    ///
    /// `item_of` maps a slot index to its item (the engine supplies the
    /// slot lookup); indices without an item are skipped.
    pub fn selected_items<T, F>(&self, item_of: F) -> Vec<T>
    where
        F: Fn(usize) -> Option<T>,
    {
        self.selected.iter().filter_map(|&i| item_of(i)).collect()
    }
}
