// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Collaborator traits: the sorted list model and the category header drawer.

use core::fmt::Debug;
use core::hash::Hash;

use kurbo::{Point, Rect, Size};

bitflags::bitflags! {
    /// Per-row interaction flags reported by a [`CategoryModel`].
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct RowFlags: u8 {
        /// Row can be hovered and hit by [`CategorizedView::index_at`](crate::CategorizedView::index_at).
        const ENABLED    = 0b0000_0001;
        /// Row participates in rectangular selection.
        const SELECTABLE = 0b0000_0010;
    }
}

impl Default for RowFlags {
    fn default() -> Self {
        Self::ENABLED | Self::SELECTABLE
    }
}

/// A sorted (and possibly filtered) list of rows, each tagged with a category key.
///
/// Rows are addressed by their current position `0..row_count()`. Positions shift when
/// rows are inserted or removed; the view is told about such changes through
/// [`CategorizedView::rows_inserted`](crate::CategorizedView::rows_inserted) and
/// [`CategorizedView::rows_about_to_be_removed`](crate::CategorizedView::rows_about_to_be_removed).
///
/// Rows sharing a key are expected to be contiguous, which holds whenever the model is
/// sorted by the category column.
pub trait CategoryModel {
    /// Category key type. [`Default::default`] is used as the "empty" key for rows whose
    /// category data is unavailable.
    type Key: Clone + Eq + Hash + Default + Debug;

    /// Returns `false` if the model is not currently grouping rows into categories.
    ///
    /// An uncategorized model turns every query into a neutral result.
    fn is_categorized(&self) -> bool {
        true
    }

    /// Number of rows.
    fn row_count(&self) -> usize;

    /// Category key of `row`, or `None` if the row's source data is unavailable.
    fn category(&self, row: usize) -> Option<Self::Key>;

    /// Natural size of the row's visual representation.
    fn size_hint(&self, row: usize) -> Size;

    /// Interaction flags of `row`.
    fn flags(&self, _row: usize) -> RowFlags {
        RowFlags::default()
    }
}

/// Renders category headers and reacts to pointer activity over them.
///
/// Every callback receives the *representative* row of the category (its first row) and
/// the category rectangle in viewport coordinates, header and body included.
pub trait CategoryDrawer {
    /// Height of the header drawn above the category whose first row is `representative`.
    fn category_height(&self, representative: usize) -> f64;

    /// Extra space reserved to the left of every block.
    fn left_margin(&self) -> f64 {
        0.0
    }

    /// Extra space reserved to the right of every block.
    fn right_margin(&self) -> f64 {
        0.0
    }

    /// The pointer moved within a category that was already hovered.
    fn mouse_moved(&mut self, _representative: usize, _rect: Rect, _pos: Point) {}

    /// A button was pressed over a category. Return `true` to consume the press.
    fn mouse_pressed(&mut self, _representative: usize, _rect: Rect, _pos: Point) -> bool {
        false
    }

    /// A button was released over a category. Return `true` to consume the release.
    fn mouse_released(&mut self, _representative: usize, _rect: Rect, _pos: Point) -> bool {
        false
    }

    /// The pointer left a previously hovered category.
    fn mouse_left(&mut self, _representative: usize, _rect: Rect) {}
}

impl<D: CategoryDrawer + ?Sized> CategoryDrawer for &mut D {
    fn category_height(&self, representative: usize) -> f64 {
        (**self).category_height(representative)
    }

    fn left_margin(&self) -> f64 {
        (**self).left_margin()
    }

    fn right_margin(&self) -> f64 {
        (**self).right_margin()
    }

    fn mouse_moved(&mut self, representative: usize, rect: Rect, pos: Point) {
        (**self).mouse_moved(representative, rect, pos);
    }

    fn mouse_pressed(&mut self, representative: usize, rect: Rect, pos: Point) -> bool {
        (**self).mouse_pressed(representative, rect, pos)
    }

    fn mouse_released(&mut self, representative: usize, rect: Rect, pos: Point) -> bool {
        (**self).mouse_released(representative, rect, pos)
    }

    fn mouse_left(&mut self, representative: usize, rect: Rect) {
        (**self).mouse_left(representative, rect);
    }
}

/// A header drawer with a fixed header height and no margins or pointer behavior.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedHeaderDrawer {
    /// Height of every category header.
    pub height: f64,
}

impl FixedHeaderDrawer {
    /// Creates a drawer whose headers are all `height` tall.
    #[must_use]
    pub const fn new(height: f64) -> Self {
        Self { height }
    }
}

impl CategoryDrawer for FixedHeaderDrawer {
    fn category_height(&self, _representative: usize) -> f64 {
        self.height
    }
}
