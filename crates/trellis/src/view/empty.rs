//! Empty-state placeholder.
//!
//! When the flattened slot list has no Item-role slots the viewport shows
//! a placeholder instead: a configured template, or plain text rendered by
//! the fallback label template. Header/Footer slots do not count as
//! content.

use std::sync::Arc;

use trellis_core::{Rect, Size};

use crate::model::{ItemView, SlotContent, ViewTemplate};

/// What to show when the collection has no items.
pub enum EmptySource<T> {
    /// A plain string, rendered by the fallback label template.
    Text(String),
    /// A template instantiated fresh each time the placeholder appears.
    Template(Arc<dyn ViewTemplate<T>>),
}

/// Mounts and unmounts the placeholder as the item count crosses zero.
pub struct EmptyState<T> {
    source: Option<EmptySource<T>>,
    placeholder: Option<Box<dyn ItemView<T>>>,
}

impl<T> Default for EmptyState<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> EmptyState<T> {
    /// Create a controller with nothing configured.
    pub fn new() -> Self {
        Self {
            source: None,
            placeholder: None,
        }
    }

    /// Configure the placeholder. Takes effect at the next
    /// [`sync`](Self::sync).
    pub fn set_source(&mut self, source: Option<EmptySource<T>>) {
        // A live placeholder built from the old source is stale
        if let Some(mut placeholder) = self.placeholder.take() {
            placeholder.unmount();
        }
        self.source = source;
    }

    /// Whether the placeholder is currently mounted.
    pub fn is_showing(&self) -> bool {
        self.placeholder.is_some()
    }

    /// Reconcile the placeholder with the current item count and viewport.
    ///
    /// `fallback` renders string sources. The placeholder fills the
    /// viewport and follows viewport resizes while shown.
    pub fn sync(&mut self, item_count: usize, viewport: Size, fallback: &Arc<dyn ViewTemplate<T>>) {
        let frame = Rect::new(0.0, 0.0, viewport.width, viewport.height);

        if item_count > 0 || self.source.is_none() {
            if let Some(mut placeholder) = self.placeholder.take() {
                placeholder.unmount();
                tracing::debug!(target: "trellis::view", "empty placeholder removed");
            }
            return;
        }

        if let Some(placeholder) = self.placeholder.as_mut() {
            placeholder.set_frame(frame);
            return;
        }

        let mut placeholder = match self.source.as_ref() {
            Some(EmptySource::Template(template)) => {
                let mut view = template.instantiate();
                view.bind(&SlotContent::Text(String::new()));
                view
            }
            Some(EmptySource::Text(text)) => {
                let mut view = fallback.instantiate();
                view.bind(&SlotContent::Text(text.clone()));
                view
            }
            None => return,
        };
        placeholder.mount();
        placeholder.set_frame(frame);
        self.placeholder = Some(placeholder);
        tracing::debug!(target: "trellis::view", "empty placeholder shown");
    }
}
