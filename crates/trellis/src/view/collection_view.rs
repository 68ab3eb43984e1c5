//! The collection-view orchestrator.
//!
//! [`CollectionView`] owns the flat slot list, the live-view map, the
//! recycle pools and the selection tracker, and wires them into the reload
//! and materialization passes. The host feeds it scroll offsets, taps and
//! viewport sizes; it drives [`ItemView`] instances and emits signals the
//! host binds its property surface to.
//!
//! # Passes
//!
//! A **reload** rebuilds everything: flatten the source, drop all live
//! views and pools, recalculate positions, materialize the viewport. It
//! runs when the source, templates, accessories or layout change, and when
//! the source reports a mutation. A **materialization** pass is the cheap
//! per-scroll path: diff visibility against the live-view map, recycle
//! what left, bind what entered, measure first appearances, and reposition.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use trellis_core::signal::ConnectionId;
use trellis_core::{Point, Rect, Signal, Size};

use crate::error::{ViewError, ViewResult};
use crate::model::{
    ItemSource, ItemView, SelectionMode, SelectionTracker, TemplateId, TemplateSource,
    ViewTemplate,
};
use crate::view::empty::{EmptySource, EmptyState};
use crate::view::layout::{self, LayoutConfig, Orientation};
use crate::view::recycle::RecyclePool;
use crate::view::scroll::{resolve_scroll_offset, ScrollAlignment};
use crate::view::slot::{flatten, Accessory, FlattenConfig, Slot};
use crate::{DEFAULT_OVERSCAN, MAX_SANE_EXTENT, MEASURE_EPSILON};

/// What the engine is currently doing.
///
/// Reload and layout passes refuse to nest: an attempt to start one while
/// another is running is suppressed and logged, never queued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EngineState {
    /// Between passes; all entry points accepted.
    #[default]
    Idle,
    /// A full reload (flatten, recalculate) is in progress.
    Reloading,
    /// A materialization pass is assigning frames.
    LayingOut,
}

/// A virtualized collection view over an [`ItemSource`].
///
/// # Signals
///
/// - `scroll_changed((offset, animate))`: the engine wants the host's
///   scroll surface moved (scroll-to requests). Host-initiated scrolling
///   reported through [`set_scroll_offset`](Self::set_scroll_offset) is
///   not echoed back.
/// - `selected_item_changed(Option<T>)`: Single-mode selection changed
///   via a tap.
/// - `selected_items_changed(Vec<T>)`: Multiple-mode selection changed
///   via a tap.
/// - `content_extent_changed(f32)`: total scrollable extent changed; the
///   host resizes its content area.
pub struct CollectionView<T: Clone + PartialEq + 'static> {
    // Data
    source: Option<Arc<dyn ItemSource<T>>>,
    source_connection: Option<ConnectionId>,
    source_dirty: Arc<AtomicBool>,
    flatten_cfg: FlattenConfig<T>,

    // Layout
    layout: LayoutConfig,
    overscan: f32,
    viewport_size: Size,
    scroll_offset: f32,
    content_extent: f32,

    // Slot list and live views
    slots: Vec<Slot<T>>,
    live: BTreeMap<usize, Box<dyn ItemView<T>>>,
    pool: RecyclePool<T>,

    // Selection and empty state
    selection: SelectionTracker,
    empty_state: EmptyState<T>,

    state: EngineState,

    // Signals
    /// Emitted when the engine initiates a scroll; `(offset, animate)`.
    pub scroll_changed: Signal<(f32, bool)>,
    /// Emitted after tap-driven changes in Single mode.
    pub selected_item_changed: Signal<Option<T>>,
    /// Emitted after tap-driven changes in Multiple mode.
    pub selected_items_changed: Signal<Vec<T>>,
    /// Emitted when the total scrollable extent changes.
    pub content_extent_changed: Signal<f32>,
}

impl<T: Clone + PartialEq + 'static> CollectionView<T> {
    /// Create a collection view.
    ///
    /// `fallback_template` is the host's plain-label template; it renders
    /// string content (string headers/footers, the string empty
    /// placeholder) and any slot with no configured template.
    pub fn new(fallback_template: Arc<dyn ViewTemplate<T>>) -> Self {
        let layout = LayoutConfig::default();
        Self {
            source: None,
            source_connection: None,
            source_dirty: Arc::new(AtomicBool::new(false)),
            flatten_cfg: FlattenConfig {
                item_templates: None,
                group_header_template: None,
                group_footer_template: None,
                header: None,
                footer: None,
                fallback: fallback_template,
                estimated_extent: layout.estimated_extent,
            },
            layout,
            overscan: DEFAULT_OVERSCAN,
            viewport_size: Size::ZERO,
            scroll_offset: 0.0,
            content_extent: 0.0,
            slots: Vec::new(),
            live: BTreeMap::new(),
            pool: RecyclePool::new(),
            selection: SelectionTracker::new(),
            empty_state: EmptyState::new(),
            state: EngineState::Idle,
            scroll_changed: Signal::new(),
            selected_item_changed: Signal::new(),
            selected_items_changed: Signal::new(),
            content_extent_changed: Signal::new(),
        }
    }

    /// Sets the item template using builder pattern.
    pub fn with_item_template(mut self, template: Arc<dyn ViewTemplate<T>>) -> Self {
        self.flatten_cfg.item_templates = Some(TemplateSource::Single(template));
        self
    }

    /// Sets a per-item template selector using builder pattern.
    pub fn with_template_selector<F>(mut self, select: F) -> Self
    where
        F: Fn(&T) -> Arc<dyn ViewTemplate<T>> + Send + Sync + 'static,
    {
        self.flatten_cfg.item_templates = Some(TemplateSource::Selector(Box::new(select)));
        self
    }

    /// Sets the layout using builder pattern.
    pub fn with_layout(mut self, layout: LayoutConfig) -> Self {
        self.flatten_cfg.estimated_extent = layout.estimated_extent;
        self.layout = layout;
        self
    }

    /// Sets the overscan margin using builder pattern.
    pub fn with_overscan(mut self, overscan: f32) -> Self {
        self.overscan = overscan;
        self
    }

    /// Sets the header using builder pattern.
    pub fn with_header(mut self, header: Accessory<T>) -> Self {
        self.flatten_cfg.header = Some(header);
        self
    }

    /// Sets the footer using builder pattern.
    pub fn with_footer(mut self, footer: Accessory<T>) -> Self {
        self.flatten_cfg.footer = Some(footer);
        self
    }

    /// Sets the group-header template using builder pattern.
    pub fn with_group_header_template(mut self, template: Arc<dyn ViewTemplate<T>>) -> Self {
        self.flatten_cfg.group_header_template = Some(template);
        self
    }

    /// Sets the group-footer template using builder pattern.
    pub fn with_group_footer_template(mut self, template: Arc<dyn ViewTemplate<T>>) -> Self {
        self.flatten_cfg.group_footer_template = Some(template);
        self
    }

    /// Sets the empty placeholder using builder pattern.
    pub fn with_empty_source(mut self, source: EmptySource<T>) -> Self {
        self.empty_state.set_source(Some(source));
        self
    }

    /// Sets the selection mode using builder pattern.
    pub fn with_selection_mode(mut self, mode: SelectionMode) -> Self {
        self.selection.set_mode(mode);
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The current layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// The current overscan margin.
    pub fn overscan(&self) -> f32 {
        self.overscan
    }

    /// The current viewport size.
    pub fn viewport_size(&self) -> Size {
        self.viewport_size
    }

    /// The current scroll offset along the scroll axis.
    pub fn scroll_offset(&self) -> f32 {
        self.scroll_offset
    }

    /// Total scrollable extent of the content.
    pub fn content_extent(&self) -> f32 {
        self.content_extent
    }

    /// The flat slot list. Read-only; positions and extents reflect the
    /// last calculation pass.
    pub fn slots(&self) -> &[Slot<T>] {
        &self.slots
    }

    /// Number of flattened slots.
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Whether a slot currently has a live view.
    pub fn is_live(&self, index: usize) -> bool {
        self.live.contains_key(&index)
    }

    /// Indices of all slots with live views, ascending.
    pub fn live_indices(&self) -> Vec<usize> {
        self.live.keys().copied().collect()
    }

    /// Whether the empty placeholder is currently shown.
    pub fn is_empty_showing(&self) -> bool {
        self.empty_state.is_showing()
    }

    /// The item carried by an Item-role slot.
    pub fn item_at(&self, index: usize) -> Option<T> {
        let slot = self.slots.get(index)?;
        if !slot.role.is_item() {
            return None;
        }
        slot.content.value().cloned()
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// Swap the item source.
    ///
    /// Unsubscribes from the previous source's change signal, subscribes to
    /// the new one, and reloads.
    pub fn set_source(&mut self, source: Option<Arc<dyn ItemSource<T>>>) {
        self.disconnect_source();
        if let Some(source) = &source {
            let dirty = self.source_dirty.clone();
            let id = source.signals().changed.connect(move |_| {
                dirty.store(true, Ordering::SeqCst);
            });
            self.source_connection = Some(id);
        }
        self.source = source;
        self.source_dirty.store(false, Ordering::SeqCst);
        self.reload();
    }

    /// Use one template for every item, and reload.
    pub fn set_item_template(&mut self, template: Option<Arc<dyn ViewTemplate<T>>>) {
        self.flatten_cfg.item_templates = template.map(TemplateSource::Single);
        self.reload();
    }

    /// Use a per-item template source, and reload.
    pub fn set_template_source(&mut self, templates: Option<TemplateSource<T>>) {
        self.flatten_cfg.item_templates = templates;
        self.reload();
    }

    /// Configure the sequence header, and reload.
    pub fn set_header(&mut self, header: Option<Accessory<T>>) {
        self.flatten_cfg.header = header;
        self.reload();
    }

    /// Configure the sequence footer, and reload.
    pub fn set_footer(&mut self, footer: Option<Accessory<T>>) {
        self.flatten_cfg.footer = footer;
        self.reload();
    }

    /// Configure the group-header template, and reload.
    pub fn set_group_header_template(&mut self, template: Option<Arc<dyn ViewTemplate<T>>>) {
        self.flatten_cfg.group_header_template = template;
        self.reload();
    }

    /// Configure the group-footer template, and reload.
    pub fn set_group_footer_template(&mut self, template: Option<Arc<dyn ViewTemplate<T>>>) {
        self.flatten_cfg.group_footer_template = template;
        self.reload();
    }

    /// Configure the empty placeholder.
    pub fn set_empty_source(&mut self, source: Option<EmptySource<T>>) {
        self.empty_state.set_source(source);
        self.sync_empty();
    }

    /// Replace the layout configuration, and reload.
    pub fn set_layout(&mut self, layout: LayoutConfig) -> ViewResult<()> {
        layout.validate()?;
        self.flatten_cfg.estimated_extent = layout.estimated_extent;
        self.layout = layout;
        self.reload();
        Ok(())
    }

    /// Change the overscan margin.
    pub fn set_overscan(&mut self, overscan: f32) -> ViewResult<()> {
        if !overscan.is_finite() || overscan < 0.0 {
            return Err(ViewError::InvalidOverscan(overscan));
        }
        self.overscan = overscan;
        self.materialize();
        Ok(())
    }

    /// Report a new viewport size.
    pub fn set_viewport_size(&mut self, size: Size) {
        self.viewport_size = size;
        if !self.flush_pending() {
            self.materialize();
        }
        self.sync_empty();
    }

    // =========================================================================
    // Scrolling
    // =========================================================================

    /// Report the host's current scroll offset. The cheap path: only the
    /// materializer runs.
    pub fn set_scroll_offset(&mut self, offset: f32) {
        self.scroll_offset = offset;
        if !self.flush_pending() {
            self.materialize();
        }
    }

    /// Scroll so a slot index satisfies an alignment policy.
    ///
    /// Out-of-range indices are a silent no-op. On success the offset is
    /// applied, `scroll_changed` fires with the animate flag, and the
    /// destination is materialized immediately so an animating host is
    /// already backed by live views.
    pub fn scroll_to_index(&mut self, index: usize, alignment: ScrollAlignment, animate: bool) {
        self.flush_pending();
        let offset = resolve_scroll_offset(
            &self.slots,
            index,
            alignment,
            self.scroll_offset,
            self.viewport_extent(),
            self.content_extent,
        );
        match offset {
            Some(offset) => {
                if offset != self.scroll_offset {
                    self.scroll_offset = offset;
                    self.scroll_changed.emit((offset, animate));
                }
                self.materialize();
            }
            None => {
                tracing::debug!(
                    target: "trellis::view",
                    index,
                    slots = self.slots.len(),
                    "scroll-to target out of range, ignoring"
                );
            }
        }
    }

    /// Scroll to the first Item slot whose item equals `item`. Absent
    /// items are a silent no-op.
    pub fn scroll_to_item(&mut self, item: &T, alignment: ScrollAlignment, animate: bool) {
        self.flush_pending();
        match self.index_of_item(item) {
            Some(index) => self.scroll_to_index(index, alignment, animate),
            None => {
                tracing::debug!(target: "trellis::view", "scroll-to item not found, ignoring");
            }
        }
    }

    /// The flat index of the first Item slot carrying an equal item.
    pub fn index_of_item(&self, item: &T) -> Option<usize> {
        self.slots
            .iter()
            .position(|slot| slot.role.is_item() && slot.content.value() == Some(item))
    }

    /// Hit-test a point in viewport coordinates against the slot frames.
    pub fn slot_at(&self, point: Point) -> Option<usize> {
        let content_point = match self.layout.orientation {
            Orientation::Vertical => Point::new(point.x, point.y + self.scroll_offset),
            Orientation::Horizontal => Point::new(point.x + self.scroll_offset, point.y),
        };
        self.slots.iter().position(|slot| {
            Self::frame_for(&self.layout, self.viewport_size, slot).contains(content_point)
        })
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// The current selection mode.
    pub fn selection_mode(&self) -> SelectionMode {
        self.selection.mode()
    }

    /// Change the selection mode. Clears the selection and all highlights.
    pub fn set_selection_mode(&mut self, mode: SelectionMode) {
        self.suppressed(|view| {
            view.apply_selection_op(|selection| selection.set_mode(mode));
        });
    }

    /// Selected slot indices, ascending.
    pub fn selected_indices(&self) -> Vec<usize> {
        self.selection.selected_indices()
    }

    /// The single selected item, if any.
    pub fn selected_item(&self) -> Option<T> {
        let index = *self.selection.selected_indices().first()?;
        self.item_at(index)
    }

    /// All selected items, in ascending slot order.
    pub fn selected_items(&self) -> Vec<T> {
        self.selection.selected_items(|index| self.item_at(index))
    }

    /// Programmatically select an item (or clear with `None`).
    ///
    /// Outbound selection signals are suppressed so the write does not echo
    /// back through the host's property binding. Items not present in the
    /// slot list leave the selection untouched.
    pub fn set_selected_item(&mut self, item: Option<T>) {
        self.flush_pending();
        self.suppressed(|view| match item {
            None => {
                view.apply_selection_op(|selection| selection.clear());
            }
            Some(item) => {
                if let Some(index) = view.index_of_item(&item) {
                    view.apply_selection_op(|selection| selection.select(index));
                }
            }
        });
    }

    /// Programmatically replace the selected set. Suppressed like
    /// [`set_selected_item`](Self::set_selected_item).
    pub fn set_selected_items(&mut self, items: &[T]) {
        self.flush_pending();
        let indices: Vec<usize> = items.iter().filter_map(|i| self.index_of_item(i)).collect();
        self.suppressed(|view| {
            view.apply_selection_op(|selection| {
                selection.clear();
                for index in indices {
                    selection.select(index);
                }
            });
        });
    }

    /// Clear the selection programmatically.
    pub fn clear_selection(&mut self) {
        self.set_selected_item(None);
    }

    /// Handle a tap on a slot index.
    ///
    /// Non-Item slots are inert. Publishes the selection through
    /// `selected_item_changed` / `selected_items_changed` per the current
    /// mode.
    pub fn tap(&mut self, index: usize) {
        self.flush_pending();
        let is_item = self
            .slots
            .get(index)
            .is_some_and(|slot| slot.role.is_item());
        if !is_item {
            return;
        }
        let (selected, deselected) = self.apply_selection_op(|selection| selection.tap(index));
        if selected.is_empty() && deselected.is_empty() {
            return;
        }
        match self.selection.mode() {
            SelectionMode::None => {}
            SelectionMode::Single => {
                self.selected_item_changed.emit(self.selected_item());
            }
            SelectionMode::Multiple => {
                self.selected_items_changed.emit(self.selected_items());
            }
        }
    }

    /// Handle a tap at a point in viewport coordinates.
    pub fn tap_at(&mut self, point: Point) {
        self.flush_pending();
        if let Some(index) = self.slot_at(point) {
            self.tap(index);
        }
    }

    // =========================================================================
    // Reload and materialization
    // =========================================================================

    /// Rebuild everything from the source: flatten, recalculate,
    /// materialize, reconcile the empty placeholder.
    pub fn reload(&mut self) {
        if self.state != EngineState::Idle {
            tracing::warn!(
                target: "trellis::view",
                state = ?self.state,
                "re-entrant reload suppressed"
            );
            return;
        }
        self.state = EngineState::Reloading;
        self.source_dirty.store(false, Ordering::SeqCst);

        for (_, mut view) in std::mem::take(&mut self.live) {
            view.unmount();
        }
        // Slot-to-template assignments may have changed; pooled views are
        // not reusable across a reload.
        self.pool.clear();

        self.slots = match &self.source {
            Some(source) => flatten(source.as_ref(), &self.flatten_cfg),
            None => Vec::new(),
        };

        let slots = &self.slots;
        self.selection
            .retain(|index| slots.get(index).is_some_and(|slot| slot.role.is_item()));

        let total = layout::calculate(&mut self.slots, &self.layout);
        if total != self.content_extent {
            self.content_extent = total;
            self.content_extent_changed.emit(total);
        }

        tracing::debug!(
            target: "trellis::view",
            slots = self.slots.len(),
            total,
            "reload complete"
        );

        self.state = EngineState::Idle;
        self.materialize();
        self.sync_empty();
    }

    /// Run the materializer against the current scroll offset. Also
    /// applies any pending source change first.
    pub fn update_visible(&mut self) {
        if !self.flush_pending() {
            self.materialize();
        }
    }

    /// Apply a pending source change, if one was reported. Returns whether
    /// a reload ran (which includes its own materialization).
    fn flush_pending(&mut self) -> bool {
        if self.source_dirty.swap(false, Ordering::SeqCst) {
            self.reload();
            true
        } else {
            false
        }
    }

    fn materialize(&mut self) {
        if self.state != EngineState::Idle {
            tracing::warn!(
                target: "trellis::view",
                state = ?self.state,
                "re-entrant layout suppressed"
            );
            return;
        }
        self.state = EngineState::LayingOut;

        let viewport_extent = self.viewport_extent();
        let lower = (self.scroll_offset - self.overscan).max(0.0);
        let upper = self.scroll_offset + viewport_extent + self.overscan;
        let visible =
            |slot: &Slot<T>| -> bool { slot.end() >= lower && slot.position <= upper };

        // Detach slots that left the padded viewport.
        let leaving: Vec<usize> = self
            .live
            .keys()
            .copied()
            .filter(|&index| self.slots.get(index).map_or(true, |slot| !visible(slot)))
            .collect();
        for index in leaving {
            if let Some(mut view) = self.live.remove(&index) {
                view.unmount();
                if let Some(slot) = self.slots.get(index) {
                    // Accessory views are structurally unique; only item
                    // views go back to the pool.
                    if slot.role.is_item() {
                        self.pool.release(TemplateId::of(&slot.template), view);
                    }
                }
            }
        }

        // Attach slots that entered, measuring first appearances.
        let mut extent_changed = false;
        let entering: Vec<usize> = (0..self.slots.len())
            .filter(|&index| visible(&self.slots[index]) && !self.live.contains_key(&index))
            .collect();
        for index in entering {
            let cross = self.cross_extent_for(index);
            let estimate = self.layout.estimated_extent;
            let orientation = self.layout.orientation;
            let highlighted = self.selection.is_selected(index);

            let slot = &mut self.slots[index];
            let template_id = TemplateId::of(&slot.template);
            let mut view = match self.pool.acquire(template_id) {
                Some(view) => view,
                None => slot.template.instantiate(),
            };
            view.bind(&slot.content);
            view.mount();

            if !slot.measured {
                let constraint = match orientation {
                    Orientation::Vertical => Size::new(cross, f32::INFINITY),
                    Orientation::Horizontal => Size::new(f32::INFINITY, cross),
                };
                let measured = view.measure(constraint);
                let measured_extent = match orientation {
                    Orientation::Vertical => measured.height,
                    Orientation::Horizontal => measured.width,
                };
                let sane = sanitize_extent(measured_extent, estimate);
                if (sane - slot.extent).abs() > MEASURE_EPSILON {
                    slot.extent = sane;
                    extent_changed = true;
                }
                slot.measured = true;
            }

            if slot.role.is_item() && highlighted {
                view.set_highlighted(true);
            }
            self.live.insert(index, view);
        }

        // One bounded recalculation when measurements invalidated the
        // estimates; live views are repositioned, never re-materialized.
        if extent_changed {
            let total = layout::calculate(&mut self.slots, &self.layout);
            if total != self.content_extent {
                self.content_extent = total;
                self.content_extent_changed.emit(total);
            }
        }

        for (&index, view) in self.live.iter_mut() {
            if let Some(slot) = self.slots.get(index) {
                view.set_frame(Self::frame_for(&self.layout, self.viewport_size, slot));
            }
        }

        tracing::trace!(
            target: "trellis::view",
            live = self.live.len(),
            offset = self.scroll_offset,
            recalculated = extent_changed,
            "materialization pass"
        );

        self.state = EngineState::Idle;
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn disconnect_source(&mut self) {
        if let (Some(source), Some(id)) = (&self.source, self.source_connection.take()) {
            source.signals().changed.disconnect(id);
        }
    }

    fn sync_empty(&mut self) {
        let item_count = self
            .slots
            .iter()
            .filter(|slot| slot.role.is_item())
            .count();
        self.empty_state
            .sync(item_count, self.viewport_size, &self.flatten_cfg.fallback);
    }

    /// Run a selection mutation, then reconcile live-view highlights with
    /// the resulting diff. Returns `(selected, deselected)` indices.
    fn apply_selection_op<F>(&mut self, op: F) -> (Vec<usize>, Vec<usize>)
    where
        F: FnOnce(&mut SelectionTracker),
    {
        let before: BTreeSet<usize> = self.selection.selected_indices().into_iter().collect();
        op(&mut self.selection);
        let after: BTreeSet<usize> = self.selection.selected_indices().into_iter().collect();

        let selected: Vec<usize> = after.difference(&before).copied().collect();
        let deselected: Vec<usize> = before.difference(&after).copied().collect();

        for &index in &deselected {
            if let Some(view) = self.live.get_mut(&index) {
                view.set_highlighted(false);
            }
        }
        for &index in &selected {
            if let Some(view) = self.live.get_mut(&index) {
                view.set_highlighted(true);
            }
        }

        (selected, deselected)
    }

    /// Run a programmatic selection write with the outbound selection
    /// signals blocked, so the change does not echo back through the
    /// host's property binding.
    fn suppressed<F: FnOnce(&mut Self)>(&mut self, op: F) {
        self.selected_item_changed.set_blocked(true);
        self.selected_items_changed.set_blocked(true);
        op(self);
        self.selected_item_changed.set_blocked(false);
        self.selected_items_changed.set_blocked(false);
    }

    fn viewport_extent(&self) -> f32 {
        match self.layout.orientation {
            Orientation::Vertical => self.viewport_size.height,
            Orientation::Horizontal => self.viewport_size.width,
        }
    }

    fn viewport_cross(&self) -> f32 {
        match self.layout.orientation {
            Orientation::Vertical => self.viewport_size.width,
            Orientation::Horizontal => self.viewport_size.height,
        }
    }

    /// Cross-axis extent available to a slot: a lane for grid items, the
    /// full cross axis for everything else.
    fn cross_extent_for(&self, index: usize) -> f32 {
        let is_grid_item = self.layout.span > 1
            && self
                .slots
                .get(index)
                .is_some_and(|slot| slot.role.is_item());
        if is_grid_item {
            self.layout.lane_cross_extent(self.viewport_cross())
        } else {
            self.viewport_cross()
        }
    }

    /// A slot's frame in content coordinates.
    fn frame_for(layout: &LayoutConfig, viewport: Size, slot: &Slot<T>) -> Rect {
        match layout.orientation {
            Orientation::Vertical => {
                let (x, width) = if layout.span > 1 && slot.role.is_item() {
                    let lane = layout.lane_cross_extent(viewport.width);
                    (slot.lane as f32 * (lane + layout.item_spacing), lane)
                } else {
                    (0.0, viewport.width)
                };
                Rect::new(x, slot.position, width, slot.extent)
            }
            Orientation::Horizontal => {
                let (y, height) = if layout.span > 1 && slot.role.is_item() {
                    let lane = layout.lane_cross_extent(viewport.height);
                    (slot.lane as f32 * (lane + layout.item_spacing), lane)
                } else {
                    (0.0, viewport.height)
                };
                Rect::new(slot.position, y, slot.extent, height)
            }
        }
    }
}

impl<T: Clone + PartialEq + 'static> Drop for CollectionView<T> {
    fn drop(&mut self) {
        self.disconnect_source();
    }
}

/// Replace degenerate measurements with the estimate so bad geometry never
/// corrupts downstream offsets.
fn sanitize_extent(measured: f32, estimate: f32) -> f32 {
    if !measured.is_finite() || measured <= 0.0 || measured > MAX_SANE_EXTENT {
        tracing::warn!(
            target: "trellis::layout",
            measured,
            estimate,
            "degenerate measurement, using estimate"
        );
        estimate
    } else {
        measured
    }
}
