// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Item placement inside a block.
//!
//! Placement is a pure function of the row's position within its block, the items
//! already placed before it in the same block, and the row's natural size. Positions
//! are produced in content-space `x` and block-relative `y`.
//!
//! Two axes of variation are supported:
//!
//! - [`Sizing`]: fixed grid cells, one shared item size, or per-item sizes packed with
//!   row wrapping.
//! - [`Flow`]: wrapping along the main axis (a 2D arrangement per block) or stacking
//!   single file along the cross axis (every item spans the available width).
//!
//! Right-to-left placement is derived from the left-to-right one by mirroring `x`
//! within the available span, see [`LayoutDirection::place_x`].

use kurbo::{Point, Rect, Size};

use crate::cache::Item;
use crate::config::{Flow, LayoutDirection};

/// How item sizes are determined.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Sizing {
    /// Every item occupies one cell of this size.
    Grid(Size),
    /// Every item has this size.
    Uniform(Size),
    /// Items use their own size hint.
    Variable,
}

/// Parameters shared by every placement within one layout pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Placement {
    pub(crate) flow: Flow,
    pub(crate) sizing: Sizing,
    pub(crate) direction: LayoutDirection,
    /// Content-space `x` where the available span starts.
    pub(crate) left: f64,
    /// Width of the available span.
    pub(crate) available: f64,
    pub(crate) spacing: f64,
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "Counts are clamped to at least one; negative and NaN ratios saturate to zero"
)]
pub(crate) fn whole_fits(extent: f64, unit: f64) -> usize {
    if unit <= 0.0 {
        return 1;
    }
    ((extent / unit) as usize).max(1)
}

#[allow(
    clippy::cast_precision_loss,
    reason = "Row and column counts stay far below f64's exact integer range"
)]
pub(crate) fn to_f64(n: usize) -> f64 {
    n as f64
}

impl Placement {
    /// Number of items per visual row, for layouts where that number is fixed.
    pub(crate) fn items_per_row(&self) -> Option<usize> {
        if self.flow == Flow::TopToBottom {
            return Some(1);
        }
        match self.sizing {
            Sizing::Grid(cell) => Some(whole_fits(self.available, cell.width)),
            Sizing::Uniform(size) => {
                let slot = size.width + self.spacing;
                Some(whole_fits(self.available - self.spacing, slot))
            }
            Sizing::Variable => None,
        }
    }

    /// Natural size of an item given its size hint.
    pub(crate) fn natural_size(&self, hint: impl FnOnce() -> Size) -> Size {
        match self.sizing {
            Sizing::Uniform(size) => size,
            _ => hint(),
        }
    }

    /// Places the item at block-relative index `rel`.
    ///
    /// `earlier` holds the already placed items `0..rel` of the same block.
    pub(crate) fn place(&self, rel: usize, earlier: &[Item], natural: Size) -> Item {
        debug_assert_eq!(earlier.len(), rel, "placement needs every earlier sibling");
        match self.flow {
            Flow::LeftToRight => self.place_main(rel, earlier, natural),
            Flow::TopToBottom => self.place_cross(rel, earlier, natural),
        }
    }

    fn place_main(&self, rel: usize, earlier: &[Item], natural: Size) -> Item {
        match self.sizing {
            Sizing::Grid(cell) => {
                let per_row = self.items_per_row().unwrap_or(1);
                let x = self.left + to_f64(rel % per_row) * cell.width;
                let y = to_f64(rel / per_row) * cell.height;
                Item::new(Point::new(self.mirror(x, cell.width), y), natural)
            }
            Sizing::Uniform(size) => {
                let per_row = self.items_per_row().unwrap_or(1);
                let x = self.left + to_f64(rel % per_row) * size.width;
                let y = to_f64(rel / per_row) * size.height;
                Item::new(Point::new(self.mirror(x, size.width), y), size)
            }
            Sizing::Variable => {
                let s = self.spacing;
                let (x, y) = match earlier.last().and_then(|prev| self.logical_rect(prev)) {
                    None => (self.left + s, s),
                    Some(prev) => {
                        let right_edge = self.left + self.available - s;
                        if prev.x1 + s + natural.width > right_edge {
                            // Wrap below the tallest item of the previous visual row.
                            (self.left + s, row_bottom(earlier) + s)
                        } else {
                            (prev.x1 + s, prev.y0)
                        }
                    }
                };
                Item::new(Point::new(self.mirror(x, natural.width), y), natural)
            }
        }
    }

    fn place_cross(&self, rel: usize, earlier: &[Item], natural: Size) -> Item {
        let width = self.available;
        let (x, size) = match self.sizing {
            Sizing::Grid(_) => (self.left, Size::new(width, natural.height)),
            Sizing::Uniform(size) => (self.left, Size::new(width, size.height)),
            Sizing::Variable => (self.left + self.spacing, Size::new(width, natural.height)),
        };
        let y = match self.sizing {
            Sizing::Grid(cell) => to_f64(rel) * cell.height,
            Sizing::Uniform(size) => to_f64(rel) * size.height,
            Sizing::Variable => earlier
                .last()
                .and_then(Item::rect)
                .map_or(self.spacing, |prev| prev.y1 + self.spacing),
        };
        Item::new(Point::new(self.mirror(x, width), y), size)
    }

    fn mirror(&self, x: f64, width: f64) -> f64 {
        self.direction.place_x(x, width, self.left, self.available)
    }

    /// The item's rectangle as it would be in a left-to-right layout.
    fn logical_rect(&self, item: &Item) -> Option<Rect> {
        let rect = item.rect()?;
        let x = self.mirror(rect.x0, rect.width());
        Some(Rect::from_origin_size((x, rect.y0), rect.size()))
    }

    /// Block-relative rectangle that is actually displayed for `item`.
    ///
    /// In grid mode the size hint is bounded by the cell and centered horizontally in it.
    pub(crate) fn display_rect(&self, item: &Item) -> Option<Rect> {
        let rect = item.rect()?;
        match self.sizing {
            Sizing::Grid(cell) => {
                let size = rect.size().clamp(Size::ZERO, cell);
                let x = rect.x0 + (cell.width - size.width) / 2.0;
                Some(Rect::from_origin_size((x, rect.y0), size))
            }
            _ => Some(rect),
        }
    }

    /// Body height of a block made of `items`, all of which must be placed.
    pub(crate) fn body_height(&self, items: &[Item]) -> f64 {
        let (Some(first), Some(last)) = (
            items.first().and_then(|item| item.position),
            items.last().and_then(|item| item.position),
        ) else {
            return 0.0;
        };
        let last_extent = match self.sizing {
            Sizing::Grid(cell) => cell.height,
            Sizing::Uniform(_) => items[items.len() - 1].size.height,
            Sizing::Variable => tallest_in_last_row(items) + 2.0 * self.spacing,
        };
        last.y + last_extent - first.y
    }
}

/// Height of the tallest item in the final visual row of `items`.
///
/// Items of one visual row share their top; the row ends where the top decreases.
pub(crate) fn tallest_in_last_row(items: &[Item]) -> f64 {
    let mut rects = items.iter().rev().filter_map(Item::rect);
    let Some(last) = rects.next() else {
        return 0.0;
    };
    rects
        .take_while(|rect| rect.y0 >= last.y0)
        .fold(last.height(), |tallest, rect| tallest.max(rect.height()))
}

/// Bottom edge of the tallest item in the final visual row of `items`.
fn row_bottom(items: &[Item]) -> f64 {
    let mut rects = items.iter().rev().filter_map(Item::rect);
    let Some(last) = rects.next() else {
        return 0.0;
    };
    rects
        .take_while(|rect| rect.y0 >= last.y0)
        .fold(last.y1, |bottom, rect| bottom.max(rect.y1))
}
