//! Per-template recycle pools for detached views.
//!
//! Views are expensive to construct, so the materializer parks each
//! detached Item view here instead of dropping it. Pools are keyed by
//! template identity; a release beyond the per-template cap drops the view.

use std::collections::HashMap;

use crate::model::{ItemView, TemplateId};
use crate::POOL_CAPACITY;

/// Detached views kept alive for reuse, keyed by template identity.
pub struct RecyclePool<T> {
    pools: HashMap<TemplateId, Vec<Box<dyn ItemView<T>>>>,
}

impl<T> Default for RecyclePool<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> RecyclePool<T> {
    /// Create an empty pool set.
    pub fn new() -> Self {
        Self {
            pools: HashMap::new(),
        }
    }

    /// Take the most recently released view for a template, if any.
    ///
    /// The caller must rebind the view before mounting it.
    pub fn acquire(&mut self, template: TemplateId) -> Option<Box<dyn ItemView<T>>> {
        self.pools.get_mut(&template).and_then(Vec::pop)
    }

    /// Park a detached view for later reuse.
    ///
    /// Views beyond the per-template cap are dropped to bound memory.
    pub fn release(&mut self, template: TemplateId, view: Box<dyn ItemView<T>>) {
        let pool = self.pools.entry(template).or_default();
        if pool.len() < POOL_CAPACITY {
            pool.push(view);
        } else {
            tracing::trace!(
                target: "trellis::view",
                ?template,
                "pool at capacity, dropping view"
            );
        }
    }

    /// Number of views currently pooled for a template.
    pub fn len(&self, template: TemplateId) -> usize {
        self.pools.get(&template).map_or(0, Vec::len)
    }

    /// Whether no views are pooled at all.
    pub fn is_empty(&self) -> bool {
        self.pools.values().all(Vec::is_empty)
    }

    /// Drop every pooled view. Called on full reloads, since slot-to-
    /// template assignments may have changed.
    pub fn clear(&mut self) {
        self.pools.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{SlotContent, ViewTemplate};
    use crate::POOL_CAPACITY;
    use std::sync::Arc;
    use trellis_core::{Rect, Size};

    use parking_lot::Mutex;

    struct TaggedView {
        tag: u32,
        bind_log: Arc<Mutex<Vec<(u32, i32)>>>,
    }

    impl TaggedView {
        fn new(tag: u32) -> Self {
            Self {
                tag,
                bind_log: Arc::new(Mutex::new(Vec::new())),
            }
        }
    }

    impl ItemView<i32> for TaggedView {
        fn bind(&mut self, content: &SlotContent<i32>) {
            if let Some(&item) = content.value() {
                self.bind_log.lock().push((self.tag, item));
            }
        }
        fn measure(&mut self, available: Size) -> Size {
            available
        }
        fn set_frame(&mut self, _frame: Rect) {}
        fn mount(&mut self) {}
        fn unmount(&mut self) {}
        fn set_highlighted(&mut self, _highlighted: bool) {}
    }

    struct NullTemplate;

    impl ViewTemplate<i32> for NullTemplate {
        fn instantiate(&self) -> Box<dyn ItemView<i32>> {
            Box::new(TaggedView::new(0))
        }
    }

    fn template() -> Arc<dyn ViewTemplate<i32>> {
        Arc::new(NullTemplate)
    }

    #[test]
    fn test_acquire_empty_pool() {
        let mut pool = RecyclePool::<i32>::new();
        assert!(pool.acquire(TemplateId::of(&template())).is_none());
    }

    #[test]
    fn test_lifo_reuse_and_rebind() {
        let mut pool = RecyclePool::<i32>::new();
        let template = template();
        let id = TemplateId::of(&template);
        let log = Arc::new(Mutex::new(Vec::new()));

        let mut first = TaggedView::new(1);
        first.bind_log = log.clone();
        let mut second = TaggedView::new(2);
        second.bind_log = log.clone();

        pool.release(id, Box::new(first));
        pool.release(id, Box::new(second));

        // Most recently released comes back first, bound to the new item
        let mut view = pool.acquire(id).unwrap();
        view.bind(&SlotContent::Item(99));
        assert_eq!(log.lock().last(), Some(&(2, 99)));
    }

    #[test]
    fn test_pools_keyed_by_template() {
        let mut pool = RecyclePool::<i32>::new();
        // Both handles stay alive so the two ids cannot alias
        let first = template();
        let second = template();
        let a = TemplateId::of(&first);
        let b = TemplateId::of(&second);

        pool.release(a, Box::new(TaggedView::new(1)));

        assert!(pool.acquire(b).is_none());
        assert!(pool.acquire(a).is_some());
    }

    #[test]
    fn test_capacity_cap() {
        let mut pool = RecyclePool::<i32>::new();
        let template = template();
        let id = TemplateId::of(&template);

        for i in 0..(POOL_CAPACITY as u32 + 5) {
            pool.release(id, Box::new(TaggedView::new(i)));
        }

        assert_eq!(pool.len(id), POOL_CAPACITY);
    }

    #[test]
    fn test_clear() {
        let mut pool = RecyclePool::<i32>::new();
        let template = template();
        let id = TemplateId::of(&template);
        pool.release(id, Box::new(TaggedView::new(1)));

        pool.clear();

        assert!(pool.is_empty());
        assert!(pool.acquire(id).is_none());
    }
}
