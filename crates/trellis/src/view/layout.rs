//! Position calculation along the scroll axis.
//!
//! [`calculate`] is a pure function of the slots' extents and the layout
//! configuration: re-running it with unchanged extents produces identical
//! positions, so scroll-driven materialization never needs to run it
//! speculatively.

use crate::error::{ViewError, ViewResult};
use crate::view::slot::Slot;
use crate::{DEFAULT_ESTIMATED_EXTENT, MIN_LANE_EXTENT};

/// Scroll axis direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    /// Scrolls along y; grid lanes are columns.
    #[default]
    Vertical,
    /// Scrolls along x; grid lanes are rows.
    Horizontal,
}

/// Layout parameters for one collection view.
#[derive(Debug, Clone)]
pub struct LayoutConfig {
    /// Scroll axis.
    pub orientation: Orientation,
    /// Number of parallel lanes. 1 is a plain list.
    pub span: usize,
    /// Gap between slots along the scroll axis (span 1) or between lanes
    /// across it (span > 1).
    pub item_spacing: f32,
    /// Gap between grid lines along the scroll axis (span > 1).
    pub line_spacing: f32,
    /// Extent assumed for unmeasured slots.
    pub estimated_extent: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self::vertical()
    }
}

impl LayoutConfig {
    /// A vertical single-column list.
    pub fn vertical() -> Self {
        Self {
            orientation: Orientation::Vertical,
            span: 1,
            item_spacing: 0.0,
            line_spacing: 0.0,
            estimated_extent: DEFAULT_ESTIMATED_EXTENT,
        }
    }

    /// A horizontal single-row list.
    pub fn horizontal() -> Self {
        Self {
            orientation: Orientation::Horizontal,
            ..Self::vertical()
        }
    }

    /// An N-lane grid.
    pub fn grid(orientation: Orientation, span: usize) -> Self {
        Self {
            orientation,
            span,
            ..Self::vertical()
        }
    }

    /// Sets the scroll-axis spacing using builder pattern.
    pub fn with_item_spacing(mut self, spacing: f32) -> Self {
        self.item_spacing = spacing;
        self
    }

    /// Sets the grid line spacing using builder pattern.
    pub fn with_line_spacing(mut self, spacing: f32) -> Self {
        self.line_spacing = spacing;
        self
    }

    /// Sets the unmeasured-slot extent using builder pattern.
    pub fn with_estimated_extent(mut self, extent: f32) -> Self {
        self.estimated_extent = extent;
        self
    }

    /// Check the configuration for degenerate values.
    pub fn validate(&self) -> ViewResult<()> {
        if self.span == 0 {
            return Err(ViewError::ZeroSpan);
        }
        if !self.estimated_extent.is_finite() || self.estimated_extent <= 0.0 {
            return Err(ViewError::InvalidEstimatedExtent(self.estimated_extent));
        }
        if !self.item_spacing.is_finite() || self.item_spacing < 0.0 {
            return Err(ViewError::InvalidSpacing(self.item_spacing));
        }
        if !self.line_spacing.is_finite() || self.line_spacing < 0.0 {
            return Err(ViewError::InvalidSpacing(self.line_spacing));
        }
        Ok(())
    }

    /// Cross-axis extent of one grid lane, given the viewport's cross-axis
    /// extent. Clamped to a minimum so tiny viewports never collapse lanes
    /// to zero.
    pub fn lane_cross_extent(&self, viewport_cross: f32) -> f32 {
        let span = self.span.max(1) as f32;
        let lane = (viewport_cross - self.item_spacing * (span - 1.0)) / span;
        lane.max(MIN_LANE_EXTENT)
    }
}

/// Assign every slot's `position` (and `lane`, for grids) and return the
/// total scrollable extent.
///
/// Linear layout (span 1) is a single walk with `item_spacing` between
/// slots. Grid layout runs the Item slots round-robin across `span` lanes,
/// each lane advancing independently; every non-Item slot is a full-span
/// band that flushes all lanes and restarts the round-robin, so between
/// bands an item's lane equals its ordinal modulo `span`.
pub fn calculate<T>(slots: &mut [Slot<T>], config: &LayoutConfig) -> f32 {
    let total = if config.span <= 1 {
        calculate_linear(slots, config.item_spacing)
    } else {
        calculate_grid(slots, config.span, config.line_spacing)
    };
    tracing::debug!(
        target: "trellis::layout",
        slots = slots.len(),
        span = config.span,
        total,
        "positions calculated"
    );
    total
}

fn calculate_linear<T>(slots: &mut [Slot<T>], item_spacing: f32) -> f32 {
    let mut offset = 0.0_f32;
    let mut total = 0.0_f32;
    for slot in slots.iter_mut() {
        slot.position = offset;
        slot.lane = 0;
        total = slot.end();
        offset = slot.end() + item_spacing;
    }
    total
}

// Lanes advance independently in both orientations: a line of N items is
// not synchronized to its largest member, so lanes with shorter items run
// ahead until the next full-span band flushes them.
fn calculate_grid<T>(slots: &mut [Slot<T>], span: usize, line_spacing: f32) -> f32 {
    let mut lane_offsets = vec![0.0_f32; span];
    let mut item_ordinal = 0usize;
    let mut total = 0.0_f32;

    for slot in slots.iter_mut() {
        if slot.role.is_item() {
            let lane = item_ordinal % span;
            item_ordinal += 1;
            slot.lane = lane;
            slot.position = lane_offsets[lane];
            lane_offsets[lane] = slot.end() + line_spacing;
        } else {
            // Full-span band: starts past every lane, flushes them all.
            let band_start = lane_offsets.iter().copied().fold(0.0_f32, f32::max);
            slot.lane = 0;
            slot.position = band_start;
            let next = slot.end() + line_spacing;
            for offset in lane_offsets.iter_mut() {
                *offset = next;
            }
            item_ordinal = 0;
        }
        total = total.max(slot.end());
    }

    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{SlotContent, ViewTemplate};
    use crate::view::slot::SlotRole;
    use std::sync::Arc;

    struct NullTemplate;

    impl ViewTemplate<i32> for NullTemplate {
        fn instantiate(&self) -> Box<dyn crate::model::ItemView<i32>> {
            unreachable!("layout tests never instantiate views")
        }
    }

    fn slot(role: SlotRole, extent: f32) -> Slot<i32> {
        Slot {
            content: SlotContent::Item(0),
            template: Arc::new(NullTemplate),
            role,
            position: 0.0,
            extent,
            measured: false,
            lane: 0,
        }
    }

    fn items(n: usize, extent: f32) -> Vec<Slot<i32>> {
        (0..n).map(|_| slot(SlotRole::Item, extent)).collect()
    }

    #[test]
    fn test_linear_positions_and_total() {
        let mut slots = items(30, 44.0);
        let total = calculate(&mut slots, &LayoutConfig::vertical());

        assert_eq!(slots[0].position, 0.0);
        assert_eq!(slots[1].position, 44.0);
        assert_eq!(slots[29].position, 1276.0);
        assert_eq!(total, 1320.0);
    }

    #[test]
    fn test_linear_spacing() {
        let mut slots = items(3, 10.0);
        let config = LayoutConfig::vertical().with_item_spacing(5.0);
        let total = calculate(&mut slots, &config);

        assert_eq!(slots[1].position, 15.0);
        assert_eq!(slots[2].position, 30.0);
        // No trailing spacing after the last slot
        assert_eq!(total, 40.0);
    }

    #[test]
    fn test_linear_monotonicity_with_mixed_extents() {
        let mut slots = items(4, 44.0);
        slots[1].extent = 90.0;
        slots[2].extent = 12.0;
        calculate(&mut slots, &LayoutConfig::vertical());

        for pair in slots.windows(2) {
            assert!(pair[1].position >= pair[0].end());
        }
    }

    #[test]
    fn test_linear_idempotent() {
        let mut slots = items(5, 44.0);
        slots[2].extent = 60.0;
        let config = LayoutConfig::vertical().with_item_spacing(4.0);

        let total1 = calculate(&mut slots, &config);
        let positions: Vec<f32> = slots.iter().map(|s| s.position).collect();
        let total2 = calculate(&mut slots, &config);

        assert_eq!(total1, total2);
        assert_eq!(positions, slots.iter().map(|s| s.position).collect::<Vec<_>>());
    }

    #[test]
    fn test_grid_round_robin_lanes() {
        let mut slots = items(7, 44.0);
        let config = LayoutConfig::grid(Orientation::Vertical, 3);
        calculate(&mut slots, &config);

        assert_eq!(slots[5].lane, 2);
        assert_eq!(slots[6].lane, 0);
        // Second row of lane 0 sits below the first
        assert_eq!(slots[3].lane, 0);
        assert_eq!(slots[3].position, 44.0);
        assert_eq!(slots[0].position, 0.0);
    }

    #[test]
    fn test_grid_lane_no_overlap() {
        let mut slots = items(9, 30.0);
        slots[1].extent = 70.0;
        slots[4].extent = 55.0;
        let config = LayoutConfig::grid(Orientation::Vertical, 3).with_line_spacing(6.0);
        calculate(&mut slots, &config);

        for lane in 0..3 {
            let lane_slots: Vec<&Slot<i32>> =
                slots.iter().filter(|s| s.lane == lane).collect();
            for pair in lane_slots.windows(2) {
                assert!(pair[1].position >= pair[0].end());
            }
        }
    }

    #[test]
    fn test_grid_lanes_advance_independently() {
        let mut slots = items(4, 30.0);
        slots[0].extent = 100.0;
        let config = LayoutConfig::grid(Orientation::Horizontal, 2);
        calculate(&mut slots, &config);

        // Lane 1 is not held back by lane 0's larger first item
        assert_eq!(slots[2].position, 100.0);
        assert_eq!(slots[3].position, 30.0);
    }

    #[test]
    fn test_grid_total_is_longest_lane() {
        let mut slots = items(4, 40.0);
        slots[1].extent = 100.0; // Lane 1 dominates
        let config = LayoutConfig::grid(Orientation::Vertical, 3);
        let total = calculate(&mut slots, &config);

        assert_eq!(total, 100.0);
    }

    #[test]
    fn test_grid_band_flushes_lanes() {
        let mut slots = vec![
            slot(SlotRole::Header, 50.0),
            slot(SlotRole::Item, 44.0),
            slot(SlotRole::Item, 44.0),
            slot(SlotRole::Item, 44.0),
            slot(SlotRole::Item, 44.0),
        ];
        let config = LayoutConfig::grid(Orientation::Vertical, 3);
        calculate(&mut slots, &config);

        // Band occupies its own full-width strip at the start
        assert_eq!(slots[0].position, 0.0);
        // Round-robin restarts after the band
        assert_eq!(slots[1].lane, 0);
        assert_eq!(slots[1].position, 50.0);
        assert_eq!(slots[3].lane, 2);
        // Fourth item wraps under the first
        assert_eq!(slots[4].lane, 0);
        assert_eq!(slots[4].position, 94.0);
    }

    #[test]
    fn test_lane_cross_extent() {
        let config = LayoutConfig::grid(Orientation::Vertical, 3).with_item_spacing(8.0);
        let lane = config.lane_cross_extent(300.0);
        assert!((lane - (300.0 - 16.0) / 3.0).abs() < 0.01);

        // Clamped for tiny viewports
        assert_eq!(config.lane_cross_extent(10.0), MIN_LANE_EXTENT);
    }

    #[test]
    fn test_validate_rejects_degenerate_configs() {
        assert!(LayoutConfig::vertical().validate().is_ok());

        let mut config = LayoutConfig::vertical();
        config.span = 0;
        assert!(matches!(config.validate(), Err(ViewError::ZeroSpan)));

        let config = LayoutConfig::vertical().with_estimated_extent(0.0);
        assert!(matches!(
            config.validate(),
            Err(ViewError::InvalidEstimatedExtent(_))
        ));

        let config = LayoutConfig::vertical().with_item_spacing(-1.0);
        assert!(matches!(config.validate(), Err(ViewError::InvalidSpacing(_))));

        let config = LayoutConfig::vertical().with_line_spacing(f32::NAN);
        assert!(matches!(config.validate(), Err(ViewError::InvalidSpacing(_))));
    }
}
