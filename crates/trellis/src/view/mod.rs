//! View layer: flattening, layout, materialization and recycling.
//!
//! [`CollectionView`] is the orchestrator; the other modules are the pure
//! pieces it composes: [`slot`] builds the flat sequence, [`layout`]
//! positions it, [`recycle`] keeps detached views for reuse, [`scroll`]
//! resolves scroll-to requests and [`empty`] owns the zero-item
//! placeholder.

pub mod collection_view;
pub mod empty;
pub mod layout;
pub mod recycle;
pub mod scroll;
pub mod slot;

pub use collection_view::{CollectionView, EngineState};
pub use empty::{EmptySource, EmptyState};
pub use layout::{LayoutConfig, Orientation};
pub use recycle::RecyclePool;
pub use scroll::{resolve_scroll_offset, ScrollAlignment};
pub use slot::{flatten, Accessory, AccessoryContent, FlattenConfig, Slot, SlotRole};
