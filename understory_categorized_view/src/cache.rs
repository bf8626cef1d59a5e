// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cached per-row and per-category geometry records.

use alloc::vec::Vec;

use kurbo::{Point, Rect, Size};

use crate::quarantine::Quarantine;

/// Cached geometry of one row.
///
/// `position.x` is in content space; `position.y` is relative to the owning block's
/// origin. A `None` position means the item has never been laid out.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct Item {
    pub(crate) position: Option<Point>,
    pub(crate) size: Size,
}

impl Item {
    pub(crate) const fn new(position: Point, size: Size) -> Self {
        Self {
            position: Some(position),
            size,
        }
    }

    /// Block-relative rectangle, if the item has been laid out.
    pub(crate) fn rect(&self) -> Option<Rect> {
        self.position
            .map(|origin| Rect::from_origin_size(origin, self.size))
    }
}

/// Cached geometry of one category.
///
/// The block owns rows `first_row..first_row + items.len()` in current row order.
#[derive(Clone, Debug)]
pub(crate) struct Block {
    /// Top-left of the block body in content space. `None` until computed, and again
    /// whenever a preceding block may have changed height.
    pub(crate) origin: Option<Point>,
    /// Body height. `None` when unknown.
    pub(crate) height: Option<f64>,
    pub(crate) first_row: usize,
    pub(crate) items: Vec<Item>,
    pub(crate) quarantine: Quarantine,
    pub(crate) alternate: bool,
    pub(crate) collapsed: bool,
}

impl Block {
    pub(crate) fn new(first_row: usize) -> Self {
        Self {
            origin: None,
            height: None,
            first_row,
            items: Vec::new(),
            quarantine: Quarantine::DirtyFrom(first_row),
            alternate: false,
            collapsed: false,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.items.len()
    }

    /// Last row of the block. Only meaningful for non-empty blocks.
    pub(crate) fn last_row(&self) -> usize {
        debug_assert!(!self.items.is_empty(), "empty blocks have no last row");
        self.first_row + self.items.len().saturating_sub(1)
    }

    pub(crate) fn contains_row(&self, row: usize) -> bool {
        row >= self.first_row && row - self.first_row < self.items.len()
    }

    /// Forgets every cached position and size, keeping row membership.
    pub(crate) fn invalidate(&mut self) {
        self.origin = None;
        self.height = None;
        self.quarantine.reset_to(self.first_row);
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Rect, Size};

    use super::{Block, Item};
    use crate::quarantine::Quarantine;

    #[test]
    fn unplaced_items_have_no_rect() {
        assert_eq!(Item::default().rect(), None);
        let item = Item::new(Point::new(4.0, 2.0), Size::new(10.0, 5.0));
        assert_eq!(item.rect(), Some(Rect::new(4.0, 2.0, 14.0, 7.0)));
    }

    #[test]
    fn block_row_membership() {
        let mut block = Block::new(3);
        block.items.resize(2, Item::default());
        assert_eq!(block.last_row(), 4);
        assert!(block.contains_row(3));
        assert!(block.contains_row(4));
        assert!(!block.contains_row(2));
        assert!(!block.contains_row(5));

        block.quarantine = Quarantine::Clean;
        block.height = Some(12.0);
        block.invalidate();
        assert_eq!(block.height, None);
        assert_eq!(block.quarantine, Quarantine::DirtyFrom(3));
    }
}
