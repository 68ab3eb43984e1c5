//! View templates and the view objects they instantiate.
//!
//! A [`ViewTemplate`] is the host's factory for one kind of view; the engine
//! asks it to [`instantiate`](ViewTemplate::instantiate) and then drives the
//! resulting [`ItemView`] through bind/measure/frame/mount calls. Recycled
//! views are keyed by [`TemplateId`], the template's pointer identity.

use std::sync::Arc;

/// What a slot carries and hands to [`ItemView::bind`].
#[derive(Debug, Clone, PartialEq)]
pub enum SlotContent<T> {
    /// A regular item from the source.
    Item(T),
    /// A group object, shown in group header/footer slots.
    Group(T),
    /// Literal text, used for string headers/footers and the string
    /// empty-state placeholder.
    Text(String),
}

impl<T> SlotContent<T> {
    /// The carried value, if this content wraps one.
    pub fn value(&self) -> Option<&T> {
        match self {
            SlotContent::Item(v) | SlotContent::Group(v) => Some(v),
            SlotContent::Text(_) => None,
        }
    }
}

/// A view instance the engine positions inside the scrollable container.
///
/// This is the seam to the host platform: implementations wrap whatever
/// native object actually renders. The engine guarantees `bind` is called
/// before `mount`, and that a view is never mounted twice without an
/// intervening `unmount`.
pub trait ItemView<T> {
    /// Rebind the view to new content. Called on fresh views and again on
    /// every reuse from the recycle pool.
    fn bind(&mut self, content: &SlotContent<T>);

    /// Measure the view's preferred size under a constraint. The engine
    /// only reads the scroll-axis component.
    fn measure(&mut self, available: trellis_core::Size) -> trellis_core::Size;

    /// Position the view, in content coordinates.
    fn set_frame(&mut self, frame: trellis_core::Rect);

    /// Attach the view to the visual tree.
    fn mount(&mut self);

    /// Detach the view from the visual tree.
    fn unmount(&mut self);

    /// Toggle the selection highlight.
    fn set_highlighted(&mut self, highlighted: bool);
}

/// A factory for one kind of [`ItemView`].
pub trait ViewTemplate<T>: Send + Sync {
    /// Create a fresh, unbound view.
    fn instantiate(&self) -> Box<dyn ItemView<T>>;
}

/// Pool key for a template: `Arc` pointer identity.
///
/// Two templates never share recycled views even if they would produce
/// identical output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TemplateId(usize);

impl TemplateId {
    /// The identity of a template handle.
    pub fn of<T>(template: &Arc<dyn ViewTemplate<T>>) -> Self {
        Self(Arc::as_ptr(template) as *const () as usize)
    }
}

/// How item slots resolve their template.
pub enum TemplateSource<T> {
    /// One template for every item.
    Single(Arc<dyn ViewTemplate<T>>),
    /// A per-item chooser, invoked once per slot at flatten time.
    #[allow(clippy::type_complexity)]
    Selector(Box<dyn Fn(&T) -> Arc<dyn ViewTemplate<T>> + Send + Sync>),
}

impl<T> TemplateSource<T> {
    /// Resolve the template for an item.
    pub fn resolve(&self, item: &T) -> Arc<dyn ViewTemplate<T>> {
        match self {
            TemplateSource::Single(template) => template.clone(),
            TemplateSource::Selector(select) => select(item),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_core::{Rect, Size};

    struct NullView;

    impl ItemView<i32> for NullView {
        fn bind(&mut self, _content: &SlotContent<i32>) {}
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
            Box::new(NullView)
        }
    }

    #[test]
    fn test_template_id_identity() {
        let a: Arc<dyn ViewTemplate<i32>> = Arc::new(NullTemplate);
        let b: Arc<dyn ViewTemplate<i32>> = Arc::new(NullTemplate);
        let a2 = a.clone();

        assert_eq!(TemplateId::of(&a), TemplateId::of(&a2));
        assert_ne!(TemplateId::of(&a), TemplateId::of(&b));
    }

    #[test]
    fn test_template_source_selector() {
        let even: Arc<dyn ViewTemplate<i32>> = Arc::new(NullTemplate);
        let odd: Arc<dyn ViewTemplate<i32>> = Arc::new(NullTemplate);

        let even_clone = even.clone();
        let odd_clone = odd.clone();
        let source = TemplateSource::Selector(Box::new(move |item: &i32| {
            if item % 2 == 0 {
                even_clone.clone()
            } else {
                odd_clone.clone()
            }
        }));

        assert_eq!(TemplateId::of(&source.resolve(&4)), TemplateId::of(&even));
        assert_eq!(TemplateId::of(&source.resolve(&3)), TemplateId::of(&odd));
    }

    #[test]
    fn test_slot_content_value() {
        assert_eq!(SlotContent::Item(7).value(), Some(&7));
        assert_eq!(SlotContent::Group(9).value(), Some(&9));
        assert_eq!(SlotContent::<i32>::Text("x".into()).value(), None);
    }
}
