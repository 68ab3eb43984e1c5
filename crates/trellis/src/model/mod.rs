//! Model layer: item sources, view templates, and selection.
//!
//! The model layer is everything the engine consumes from the host
//! application: where the items come from ([`ItemSource`]), how a slot
//! becomes a view ([`ViewTemplate`] / [`ItemView`]), and which slots are
//! selected ([`SelectionTracker`]).

pub mod selection;
pub mod source;
pub mod template;

pub use selection::{SelectionMode, SelectionTracker};
pub use source::{Group, GroupedVecSource, ItemSource, SourceSignals, VecSource};
pub use template::{ItemView, SlotContent, TemplateId, TemplateSource, ViewTemplate};
