//! Trellis: a virtualized collection-view engine.
//!
//! Trellis flattens a (possibly grouped) item source into an ordered slot
//! sequence, lays the slots out along a scroll axis (linear or N-lane grid),
//! materializes views only around the visible viewport, and recycles view
//! instances per template. Selection, scroll-to and an empty-state
//! placeholder are layered on top of the same flat slot list.
//!
//! The engine never draws or opens windows. It drives host-supplied view
//! objects through the [`ItemView`](model::ItemView) trait and learns about
//! data through [`ItemSource`](model::ItemSource); everything else (scroll
//! gestures, rendering, gesture recognition) stays on the host's side of
//! those seams.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use trellis::model::VecSource;
//! use trellis::view::{CollectionView, LayoutConfig};
//! use trellis_core::Size;
//!
//! let source = Arc::new(VecSource::from(vec!["a", "b", "c"]));
//! let mut view = CollectionView::new(fallback_template)
//!     .with_item_template(row_template)
//!     .with_layout(LayoutConfig::vertical());
//! view.set_viewport_size(Size::new(320.0, 480.0));
//! view.set_source(Some(source));
//! ```

pub mod error;
pub mod model;
pub mod view;

pub use error::{ViewError, ViewResult};

/// Default extent assumed for a slot before its view has been measured.
pub const DEFAULT_ESTIMATED_EXTENT: f32 = 44.0;

/// Default margin beyond the viewport within which slots stay materialized.
pub const DEFAULT_OVERSCAN: f32 = 200.0;

/// Maximum number of detached views retained per template.
pub const POOL_CAPACITY: usize = 20;

/// Minimum cross-axis extent of a grid lane.
pub const MIN_LANE_EXTENT: f32 = 20.0;

/// Measured extents within this distance of the estimate do not trigger a
/// recalculation.
pub const MEASURE_EPSILON: f32 = 1.0;

/// Measured extents above this are treated as degenerate and replaced with
/// the estimate.
pub const MAX_SANE_EXTENT: f32 = 100_000.0;
