//! Scroll-to resolution.
//!
//! Pure offset arithmetic: given a target slot and an alignment policy,
//! compute where the viewport should scroll. The orchestrator applies the
//! offset and re-materializes.

use crate::view::slot::Slot;

/// Where a scroll-to target should land in the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollAlignment {
    /// Target's start flush with the viewport's start.
    Start,
    /// Target centered.
    Center,
    /// Target's end flush with the viewport's end.
    End,
    /// Scroll the minimum distance that makes the target fully visible;
    /// no scroll if it already is (default).
    #[default]
    MakeVisible,
}

/// Compute the scroll offset that satisfies an alignment request for a
/// target slot.
///
/// Returns `None` when `target` is out of range (the caller treats that as
/// a silent no-op). The result is clamped to `[0, total_extent −
/// viewport_extent]`, so a `MakeVisible` request for an already-visible
/// slot returns the current offset unchanged.
pub fn resolve_scroll_offset<T>(
    slots: &[Slot<T>],
    target: usize,
    alignment: ScrollAlignment,
    current_offset: f32,
    viewport_extent: f32,
    total_extent: f32,
) -> Option<f32> {
    let slot = slots.get(target)?;

    let raw = match alignment {
        ScrollAlignment::Start => slot.position,
        ScrollAlignment::Center => slot.position - (viewport_extent - slot.extent) / 2.0,
        ScrollAlignment::End => slot.position - viewport_extent + slot.extent,
        ScrollAlignment::MakeVisible => {
            if slot.position < current_offset {
                slot.position
            } else if slot.end() > current_offset + viewport_extent {
                slot.end() - viewport_extent
            } else {
                current_offset
            }
        }
    };

    let max_scroll = (total_extent - viewport_extent).max(0.0);
    Some(raw.clamp(0.0, max_scroll))
}
