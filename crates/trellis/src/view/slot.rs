//! Flattening: item source + templates → one ordered slot sequence.
//!
//! Everything downstream (layout, materialization, selection, scroll-to)
//! addresses content by flat slot index, so flattening runs first on every
//! reload and nothing else ever consults the source's group structure.

use std::sync::Arc;

use crate::model::{ItemSource, SlotContent, TemplateSource, ViewTemplate};

/// What a slot is, structurally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotRole {
    /// A regular item; selectable and recyclable.
    Item,
    /// A per-group header carrying the group object.
    GroupHeader,
    /// A per-group footer carrying the group object.
    GroupFooter,
    /// The single leading header of the whole sequence.
    Header,
    /// The single trailing footer of the whole sequence.
    Footer,
}

impl SlotRole {
    /// Whether this is a regular item slot.
    pub fn is_item(self) -> bool {
        self == SlotRole::Item
    }
}

/// One flattened position in the scrollable sequence.
///
/// `position` and `extent` are along the scroll axis. `extent` starts as
/// the configured estimate and becomes authoritative once `measured` is
/// set by the materializer. `lane` is assigned by the position calculator
/// for grid layouts and stays 0 otherwise.
pub struct Slot<T> {
    pub content: SlotContent<T>,
    pub template: Arc<dyn ViewTemplate<T>>,
    pub role: SlotRole,
    pub position: f32,
    pub extent: f32,
    pub measured: bool,
    pub lane: usize,
}

impl<T> Slot<T> {
    fn new(
        content: SlotContent<T>,
        template: Arc<dyn ViewTemplate<T>>,
        role: SlotRole,
        estimated_extent: f32,
    ) -> Self {
        Self {
            content,
            template,
            role,
            position: 0.0,
            extent: estimated_extent,
            measured: false,
            lane: 0,
        }
    }

    /// The scroll-axis interval end of this slot.
    pub fn end(&self) -> f32 {
        self.position + self.extent
    }
}

/// Content for a header or footer slot.
#[derive(Debug, Clone)]
pub enum AccessoryContent<T> {
    /// Literal text, rendered by the fallback label template unless an
    /// explicit template is configured.
    Text(String),
    /// A data value handed to the accessory's template.
    Value(T),
}

/// A configured header or footer: content plus an optional template.
///
/// With no template the content falls back to the engine's label template.
/// A raw view is expressed as a template with empty text content.
pub struct Accessory<T> {
    pub content: AccessoryContent<T>,
    pub template: Option<Arc<dyn ViewTemplate<T>>>,
}

impl<T> Accessory<T> {
    /// A plain-text accessory rendered by the fallback label template.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: AccessoryContent::Text(text.into()),
            template: None,
        }
    }

    /// A data value rendered by the fallback label template.
    pub fn value(value: T) -> Self {
        Self {
            content: AccessoryContent::Value(value),
            template: None,
        }
    }

    /// A data value rendered by a specific template.
    pub fn templated(value: T, template: Arc<dyn ViewTemplate<T>>) -> Self {
        Self {
            content: AccessoryContent::Value(value),
            template: Some(template),
        }
    }

    /// A self-contained view: a template with no content of its own.
    pub fn view(template: Arc<dyn ViewTemplate<T>>) -> Self {
        Self {
            content: AccessoryContent::Text(String::new()),
            template: Some(template),
        }
    }

    fn to_slot(&self, role: SlotRole, fallback: &Arc<dyn ViewTemplate<T>>, estimate: f32) -> Slot<T>
    where
        T: Clone,
    {
        let content = match &self.content {
            AccessoryContent::Text(text) => SlotContent::Text(text.clone()),
            AccessoryContent::Value(value) => SlotContent::Item(value.clone()),
        };
        let template = self.template.clone().unwrap_or_else(|| fallback.clone());
        Slot::new(content, template, role, estimate)
    }
}

/// Template and accessory configuration consumed by [`flatten`].
pub struct FlattenConfig<T> {
    /// Template resolution for Item slots. `None` sends every item to the
    /// fallback label template.
    pub item_templates: Option<TemplateSource<T>>,
    /// Template for GroupHeader slots; no template, no slots.
    pub group_header_template: Option<Arc<dyn ViewTemplate<T>>>,
    /// Template for GroupFooter slots; no template, no slots.
    pub group_footer_template: Option<Arc<dyn ViewTemplate<T>>>,
    /// Leading header for the whole sequence.
    pub header: Option<Accessory<T>>,
    /// Trailing footer for the whole sequence.
    pub footer: Option<Accessory<T>>,
    /// Label template used when nothing more specific is configured.
    pub fallback: Arc<dyn ViewTemplate<T>>,
    /// Initial extent for every slot until measured.
    pub estimated_extent: f32,
}

impl<T> FlattenConfig<T> {
    fn item_template(&self, item: &T) -> Arc<dyn ViewTemplate<T>> {
        match &self.item_templates {
            Some(source) => source.resolve(item),
            None => self.fallback.clone(),
        }
    }
}

/// Build the flat slot sequence for a source.
///
/// Order: Header, then per group (GroupHeader, items, GroupFooter) or the
/// plain item run for flat sources, then Footer. Group header/footer slots
/// appear only when their template is configured; Header/Footer only when
/// the accessory is. An empty source still yields the configured
/// Header/Footer slots.
pub fn flatten<T: Clone>(source: &dyn ItemSource<T>, config: &FlattenConfig<T>) -> Vec<Slot<T>> {
    let estimate = config.estimated_extent;
    let mut slots = Vec::with_capacity(source.len() + 4);

    if let Some(header) = &config.header {
        slots.push(header.to_slot(SlotRole::Header, &config.fallback, estimate));
    }

    if source.is_grouped() {
        for g in 0..source.group_count() {
            if let Some(template) = &config.group_header_template {
                if let Some(key) = source.group(g) {
                    slots.push(Slot::new(
                        SlotContent::Group(key),
                        template.clone(),
                        SlotRole::GroupHeader,
                        estimate,
                    ));
                }
            }
            for i in 0..source.group_len(g) {
                if let Some(item) = source.group_item(g, i) {
                    let template = config.item_template(&item);
                    slots.push(Slot::new(
                        SlotContent::Item(item),
                        template,
                        SlotRole::Item,
                        estimate,
                    ));
                }
            }
            if let Some(template) = &config.group_footer_template {
                if let Some(key) = source.group(g) {
                    slots.push(Slot::new(
                        SlotContent::Group(key),
                        template.clone(),
                        SlotRole::GroupFooter,
                        estimate,
                    ));
                }
            }
        }
    } else {
        for i in 0..source.len() {
            if let Some(item) = source.get(i) {
                let template = config.item_template(&item);
                slots.push(Slot::new(
                    SlotContent::Item(item),
                    template,
                    SlotRole::Item,
                    estimate,
                ));
            }
        }
    }

    if let Some(footer) = &config.footer {
        slots.push(footer.to_slot(SlotRole::Footer, &config.fallback, estimate));
    }

    tracing::debug!(
        target: "trellis::source",
        slots = slots.len(),
        grouped = source.is_grouped(),
        "flattened source"
    );

    slots
}
