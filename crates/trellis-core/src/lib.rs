//! Core systems for Trellis.
//!
//! This crate provides the foundation the view engine is built on:
//!
//! - [`Signal`] - a type-safe signal/slot mechanism for change notification
//! - [`geometry`] - basic 2D geometry types ([`Point`], [`Size`], [`Rect`])
//! - [`logging`] - `tracing` target constants for log filtering
//!
//! Everything here is UI-toolkit-agnostic; the `trellis` crate layers the
//! virtualized collection-view engine on top.

pub mod geometry;
pub mod logging;
pub mod signal;

pub use geometry::{Point, Rect, Size};
pub use signal::{ConnectionGuard, ConnectionId, Signal};
