//! Logging facilities for Trellis.
//!
//! Trellis uses the `tracing` crate for instrumentation. To see logs,
//! install a subscriber in your application:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt::init();
//!     // Your application code...
//! }
//! ```
//!
//! Reload and layout work is logged at `debug`, per-scroll materialization
//! at `trace`, and degenerate inputs (non-finite extents, invalid indices)
//! at `warn`.

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core crate target.
    pub const CORE: &str = "trellis_core";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "trellis_core::signal";
    /// View orchestration target (reload, materialization).
    pub const VIEW: &str = "trellis::view";
    /// Position calculation target.
    pub const LAYOUT: &str = "trellis::layout";
    /// Selection tracking target.
    pub const SELECTION: &str = "trellis::selection";
    /// Item source / flattening target.
    pub const SOURCE: &str = "trellis::source";
}
