// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! View configuration.

use kurbo::Size;

/// Direction in which items are placed inside a block.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Flow {
    /// Items wrap along the main axis, producing a two-dimensional grid inside each block.
    #[default]
    LeftToRight,
    /// Items stack single file; every item spans the full available width.
    TopToBottom,
}

/// Writing direction. Right-to-left mirrors horizontal item placement.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LayoutDirection {
    /// Items start at the left edge.
    #[default]
    LeftToRight,
    /// Items start at the right edge.
    RightToLeft,
}

impl LayoutDirection {
    /// Maps a logical (left-to-right) `x` of an item `width` wide into this direction,
    /// within the horizontal span `[left, left + available)`.
    ///
    /// The mapping is its own inverse.
    #[must_use]
    pub fn place_x(self, x: f64, width: f64, left: f64, available: f64) -> f64 {
        match self {
            Self::LeftToRight => x,
            Self::RightToLeft => 2.0 * left + available - x - width,
        }
    }
}

/// Geometry and presentation options of a [`CategorizedView`](crate::CategorizedView).
///
/// All lengths are in the same logical units as the viewport and item size hints.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewConfig {
    /// Spacing between blocks, and between the viewport edges and blocks.
    pub category_spacing: f64,
    /// Spacing between items of variable-size layouts.
    pub spacing: f64,
    /// Whether consecutive blocks report alternating colors.
    pub alternating_block_colors: bool,
    /// Whether blocks may be collapsed.
    pub collapsible_blocks: bool,
    /// Fixed cell size. `None`, or an empty size, disables grid layout.
    pub grid_size: Option<Size>,
    /// Whether every item shares the size hint of the first row.
    pub uniform_item_sizes: bool,
    /// Item flow inside a block.
    pub flow: Flow,
    /// Writing direction.
    pub direction: LayoutDirection,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            category_spacing: 0.0,
            spacing: 0.0,
            alternating_block_colors: false,
            collapsible_blocks: false,
            grid_size: None,
            uniform_item_sizes: false,
            flow: Flow::LeftToRight,
            direction: LayoutDirection::LeftToRight,
        }
    }
}

impl ViewConfig {
    /// Returns the grid cell size if grid layout is active.
    #[must_use]
    pub fn grid(&self) -> Option<Size> {
        self.grid_size
            .filter(|size| size.width > 0.0 && size.height > 0.0)
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Size;

    use super::{LayoutDirection, ViewConfig};

    #[test]
    fn empty_grid_size_disables_grid() {
        let mut config = ViewConfig::default();
        assert_eq!(config.grid(), None);
        config.grid_size = Some(Size::new(0.0, 20.0));
        assert_eq!(config.grid(), None);
        config.grid_size = Some(Size::new(32.0, 20.0));
        assert_eq!(config.grid(), Some(Size::new(32.0, 20.0)));
    }

    #[test]
    fn right_to_left_mirrors_within_span() {
        let rtl = LayoutDirection::RightToLeft;
        // Span [10, 110): an item at the left edge lands flush with the right edge.
        assert_eq!(rtl.place_x(10.0, 20.0, 10.0, 100.0), 90.0);
        assert_eq!(rtl.place_x(90.0, 20.0, 10.0, 100.0), 10.0);
        let ltr = LayoutDirection::LeftToRight;
        assert_eq!(ltr.place_x(42.0, 5.0, 0.0, 100.0), 42.0);
    }
}
