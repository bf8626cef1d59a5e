// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Spatial queries: range intersection, hit testing, selection and paint plans.
//!
//! Row tops are non-decreasing in row order for every sizing and flow combination, and
//! a row's bottom never reaches past the top of the next visual row. Searches therefore
//! binary-search on tops and then walk the run of rows sharing the found top.

use alloc::vec::Vec;
use core::ops::RangeInclusive;

use kurbo::{Point, Rect};

use crate::model::{CategoryDrawer, CategoryModel, RowFlags};
use crate::view::CategorizedView;

/// Half-open overlap test. Empty rectangles overlap nothing.
pub(crate) fn intersects(a: Rect, b: Rect) -> bool {
    a.x0 < b.x1 && b.x0 < a.x1 && a.y0 < b.y1 && b.y0 < a.y1
}

/// Paint instructions for one row.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ItemPaint {
    /// Row in the model.
    pub row: usize,
    /// Row rectangle in viewport coordinates.
    pub rect: Rect,
    /// Odd rows of a block, for alternating row colors.
    pub alternate: bool,
    /// Row is enabled.
    pub enabled: bool,
    /// Row is selectable.
    pub selectable: bool,
    /// Row is enabled and under the pointer.
    pub hovered: bool,
}

/// Paint instructions for one category header and body background.
#[derive(Clone, Debug, PartialEq)]
pub struct CategoryPaint<K> {
    /// Category key.
    pub key: K,
    /// First row of the category.
    pub representative: usize,
    /// Header and body rectangle in viewport coordinates.
    pub rect: Rect,
    /// Drawn with the alternate block color.
    pub alternate: bool,
    /// Block is expanded.
    pub open: bool,
    /// Pointer is over the category.
    pub hovered: bool,
}

impl<M: CategoryModel, D: CategoryDrawer> CategorizedView<M, D> {
    /// Top of `row` in viewport coordinates. Rows without geometry sort last.
    fn row_top(&mut self, row: usize) -> f64 {
        self.visual_rect(row).map_or(f64::INFINITY, |rect| rect.y0)
    }

    /// Number of leading rows whose top satisfies `pred`, which must hold for a prefix.
    fn partition_rows(&mut self, mut pred: impl FnMut(f64) -> bool) -> usize {
        let (mut lo, mut hi) = (0, self.model.row_count());
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            if pred(self.row_top(mid)) {
                lo = mid + 1;
            } else {
                hi = mid;
            }
        }
        lo
    }

    /// First row of the visual row that ends just before row `end`.
    fn visual_row_start(&mut self, end: usize) -> usize {
        let Some(last) = end.checked_sub(1) else {
            return 0;
        };
        let top = self.row_top(last);
        let mut first = last;
        while first > 0 && self.row_top(first - 1) == top {
            first -= 1;
        }
        first
    }

    fn row_intersects(&mut self, row: usize, rect: Rect) -> bool {
        self.visual_rect(row)
            .is_some_and(|item| intersects(item, rect))
    }

    /// Smallest contiguous range of rows that contains every row intersecting `rect`.
    ///
    /// `rect` is in viewport coordinates and may be unnormalized. Both ends of the
    /// returned range intersect `rect`.
    pub fn intersecting(&mut self, rect: Rect) -> Option<(usize, usize)> {
        if !self.is_categorized() || self.model.row_count() == 0 {
            return None;
        }
        let rect = rect.abs();

        let below_top = self.partition_rows(|top| top < rect.y0);
        let mut first = self.visual_row_start(below_top);
        let mut last = self.partition_rows(|top| top < rect.y1).checked_sub(1)?;

        while first <= last && !self.row_intersects(first, rect) {
            first += 1;
        }
        while last > first && !self.row_intersects(last, rect) {
            last -= 1;
        }
        (first <= last && self.row_intersects(first, rect)).then_some((first, last))
    }

    /// Enabled row whose rectangle contains `point`, in viewport coordinates.
    pub fn index_at(&mut self, point: Point) -> Option<usize> {
        if !self.is_categorized() {
            return None;
        }
        let end = self.partition_rows(|top| top <= point.y);
        let first = self.visual_row_start(end);
        for row in (first..end).rev() {
            if self
                .visual_rect(row)
                .is_some_and(|rect| rect.contains(point))
            {
                return self
                    .model
                    .flags(row)
                    .contains(RowFlags::ENABLED)
                    .then_some(row);
            }
        }
        None
    }

    /// Rows selected by a rubber band covering `rect`, as maximal runs of selectable rows.
    ///
    /// A degenerate `rect` selects the row under its origin.
    pub fn selection_ranges(&mut self, rect: Rect) -> Vec<RangeInclusive<usize>> {
        let mut ranges = Vec::new();
        let rect = rect.abs();
        if rect.width() == 0.0 && rect.height() == 0.0 {
            if let Some(row) = self.index_at(rect.origin())
                && self.model.flags(row).contains(RowFlags::SELECTABLE)
            {
                ranges.push(row..=row);
            }
            return ranges;
        }

        let Some((first, last)) = self.intersecting(rect) else {
            return ranges;
        };
        let mut run: Option<(usize, usize)> = None;
        for row in first..=last {
            let hit = self.row_intersects(row, rect)
                && self.model.flags(row).contains(RowFlags::SELECTABLE);
            run = match (run, hit) {
                (Some((start, _)), true) => Some((start, row)),
                (None, true) => Some((row, row)),
                (Some((start, end)), false) => {
                    ranges.push(start..=end);
                    None
                }
                (None, false) => None,
            };
        }
        if let Some((start, end)) = run {
            ranges.push(start..=end);
        }
        ranges
    }

    /// Rows to paint for the viewport region `clip`, skipping collapsed categories.
    ///
    /// Only rows whose rectangle overlaps `clip` are listed.
    pub fn visible_items(&mut self, clip: Rect) -> Vec<ItemPaint> {
        let mut items = Vec::new();
        let clip = clip.abs();
        let Some((first, last)) = self.intersecting(clip) else {
            return items;
        };
        for row in first..=last {
            let key = self.category_for_row(row);
            let Some(block) = self.blocks.get(&key) else {
                continue;
            };
            if block.collapsed {
                continue;
            }
            let alternate = (row - block.first_row) % 2 == 1;
            let Some(rect) = self.visual_rect(row) else {
                continue;
            };
            if !intersects(rect, clip) {
                continue;
            }
            let flags = self.model.flags(row);
            let enabled = flags.contains(RowFlags::ENABLED);
            items.push(ItemPaint {
                row,
                rect,
                alternate,
                enabled,
                selectable: flags.contains(RowFlags::SELECTABLE),
                hovered: enabled && self.hovered_row == Some(row),
            });
        }
        items
    }

    /// Categories whose rectangle overlaps the viewport region `clip`, in row order.
    pub fn visible_categories(&mut self, clip: Rect) -> Vec<CategoryPaint<M::Key>> {
        let mut categories = Vec::new();
        if !self.is_categorized() {
            return categories;
        }
        let clip = clip.abs();
        for (key, representative) in self.blocks.ordered() {
            let Some(rect) = self.category_rect(&key) else {
                continue;
            };
            if !intersects(rect, clip) {
                continue;
            }
            let collapsed = self.is_collapsed(&key);
            categories.push(CategoryPaint {
                representative,
                rect,
                alternate: self.is_alternate(&key),
                open: !self.config.collapsible_blocks || !collapsed,
                hovered: self.hovered_category.as_ref() == Some(&key),
                key,
            });
        }
        categories
    }

    /// Category whose header or body contains `point`, in viewport coordinates.
    pub fn category_at(&mut self, point: Point) -> Option<M::Key> {
        if !self.is_categorized() {
            return None;
        }
        self.blocks
            .ordered()
            .into_iter()
            .map(|(key, _)| key)
            .find(|key| self.category_rect(key).is_some_and(|r| r.contains(point)))
    }
}
