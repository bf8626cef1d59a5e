// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Structural and data change notifications.
//!
//! The view mirrors the model's row positions. Every change to the model must be
//! reported here, with inclusive row ranges, before the next query:
//!
//! - insertions *after* the model has inserted the rows,
//! - removals *before* the model drops them, while their categories are still readable.

use smallvec::SmallVec;

use crate::cache::Item;
use crate::model::{CategoryDrawer, CategoryModel};
use crate::view::CategorizedView;

type Touched<K> = SmallVec<[K; 4]>;

fn push_unique<K: PartialEq>(keys: &mut Touched<K>, key: K) {
    if !keys.contains(&key) {
        keys.push(key);
    }
}

impl<M: CategoryModel, D: CategoryDrawer> CategorizedView<M, D> {
    /// Clamps an inclusive range to the model's rows.
    fn clamp_rows(&self, start: usize, end: usize) -> Option<(usize, usize)> {
        let count = self.model.row_count();
        if end < start || start >= count {
            return None;
        }
        Some((start, end.min(count - 1)))
    }

    /// Rows `start..=end` were inserted into the model.
    ///
    /// Ignored while the model is uncategorized; call [`CategorizedView::layout_changed`]
    /// when categorization is switched back on.
    pub fn rows_inserted(&mut self, start: usize, end: usize) {
        if !self.is_categorized() {
            return;
        }
        let Some((start, end)) = self.clamp_rows(start, end) else {
            return;
        };
        let count = end - start + 1;
        tracing::trace!(start, end, "rows inserted");

        if self.config.uniform_item_sizes && start == 0 && self.uniform_size.is_some() {
            // The shared item size comes from row 0, which just changed.
            self.relayout();
        }

        self.blocks.shift_for_insert(start, count);
        if let Some(hovered) = self.hovered_row.as_mut()
            && *hovered >= start
        {
            *hovered += count;
        }

        let mut touched: Touched<M::Key> = SmallVec::new();
        for row in start..=end {
            let key = match self.model.category(row) {
                Some(key) => key,
                None => {
                    tracing::warn!(row, "row has no category data");
                    M::Key::default()
                }
            };
            let block = self.blocks.get_or_create(key.clone(), row);
            if block.items.is_empty() || row < block.first_row {
                block.first_row = row;
            }
            let rel = row - block.first_row;
            debug_assert!(
                rel <= block.items.len(),
                "row {row} is not contiguous with its category"
            );
            let at = rel.min(block.items.len());
            block.items.insert(at, Item::default());
            block.height = None;
            push_unique(&mut touched, key);
        }

        let mut lowest = usize::MAX;
        for key in &touched {
            if let Some(block) = self.blocks.get_mut(key) {
                block.quarantine.reset_to(block.first_row);
                lowest = lowest.min(block.first_row);
            }
        }
        self.blocks
            .refresh_after_mutation(lowest.saturating_add(1), lowest);
    }

    /// Rows `start..=end` are about to be removed from the model.
    ///
    /// Must be called while the model still holds the rows.
    pub fn rows_about_to_be_removed(&mut self, start: usize, end: usize) {
        if !self.is_categorized() {
            return;
        }
        let Some((start, end)) = self.clamp_rows(start, end) else {
            return;
        };
        let count = end - start + 1;
        tracing::trace!(start, end, "rows about to be removed");

        self.hovered_row = match self.hovered_row {
            Some(row) if row > end => Some(row - count),
            Some(row) if row >= start => None,
            other => other,
        };

        if start == 0 && count == self.model.row_count() {
            tracing::debug!("every row removed; clearing the category index");
            self.blocks.clear();
            self.uniform_size = None;
            self.hovered_category = None;
            return;
        }
        if self.config.uniform_item_sizes && start == 0 {
            // Row 0 is going away; the shared size is re-read from its successor.
            self.relayout();
        }

        let mut touched: Touched<M::Key> = SmallVec::new();
        for row in start..=end {
            let key = self.category_for_row(row);
            let Some(block) = self.blocks.get_mut(&key) else {
                continue;
            };
            // Earlier rows of this pass have already left the block, so the next removed
            // item always sits where the removed range enters the block.
            let rel = start.max(block.first_row) - block.first_row;
            if rel < block.items.len() {
                block.items.remove(rel);
            }
            push_unique(&mut touched, key);
        }

        for key in &touched {
            let Some(block) = self.blocks.get_mut(key) else {
                continue;
            };
            if block.items.is_empty() {
                tracing::trace!(first_row = block.first_row, "dropping empty block");
                self.blocks.remove(key);
                if self.hovered_category.as_ref() == Some(key) {
                    self.hovered_category = None;
                }
                continue;
            }
            if (start..=end).contains(&block.first_row) {
                block.first_row = end + 1;
            }
            block.height = None;
            block.quarantine.reset_to(block.first_row);
        }

        self.blocks.shift_for_remove(start, end);
        self.blocks.refresh_after_mutation(start, start);
    }

    /// The data of rows `start..=end` changed without any structural change.
    ///
    /// Cached geometry of each touched block is recomputed from its first changed row.
    pub fn data_changed(&mut self, start: usize, end: usize) {
        if !self.is_categorized() {
            return;
        }
        let Some((start, end)) = self.clamp_rows(start, end) else {
            return;
        };
        if self.config.uniform_item_sizes && start == 0 {
            self.relayout();
            return;
        }

        let mut lowest = usize::MAX;
        for row in start..=end {
            let key = self.category_for_row(row);
            let Some(block) = self.blocks.get_mut(&key) else {
                continue;
            };
            block.quarantine.extend_to(row);
            block.height = None;
            lowest = lowest.min(block.first_row);
        }
        self.blocks
            .refresh_after_mutation(lowest.saturating_add(1), usize::MAX);
    }

    /// The model was reset or reordered. Rebuilds the category index from scratch.
    pub fn layout_changed(&mut self) {
        self.reset();
        let count = self.model.row_count();
        tracing::debug!(rows = count, "rebuilding category index");
        if count > 0 {
            self.rows_inserted(0, count - 1);
        }
    }

    /// Forgets every category and all pointer state.
    pub fn reset(&mut self) {
        self.blocks.clear();
        self.uniform_size = None;
        self.hovered_row = None;
        self.hovered_category = None;
        self.pressed_position = None;
        self.rubber_band = None;
    }

    /// Discards all cached geometry while keeping category membership.
    ///
    /// Called by every geometry-affecting setter. Call it directly when header heights or
    /// drawer margins change.
    pub fn relayout(&mut self) {
        tracing::debug!(blocks = self.blocks.len(), "relayout");
        for block in self.blocks.blocks_mut() {
            block.invalidate();
        }
        self.uniform_size = None;
    }

    /// Inserts rows `start..=end` through `insert` and reports them to the view.
    pub fn insert_rows(&mut self, start: usize, end: usize, insert: impl FnOnce(&mut M)) {
        insert(&mut self.model);
        self.rows_inserted(start, end);
    }

    /// Reports rows `start..=end` to the view and then removes them through `remove`.
    pub fn remove_rows(&mut self, start: usize, end: usize, remove: impl FnOnce(&mut M)) {
        self.rows_about_to_be_removed(start, end);
        remove(&mut self.model);
    }
}
