// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer tracking, keyboard navigation and scrolling.

use kurbo::{Point, Rect};
use smallvec::SmallVec;

use crate::layout::{Sizing, tallest_in_last_row, to_f64, whole_fits};
use crate::model::{CategoryDrawer, CategoryModel};
use crate::view::CategorizedView;

/// Viewport rectangles that need repainting after a pointer event.
pub type Damage = SmallVec<[Rect; 2]>;

/// Result of a pointer press or release.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointerResponse {
    /// The category drawer consumed the event.
    pub consumed: bool,
    /// Regions to repaint.
    pub damage: Damage,
}

/// Keyboard cursor movement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CursorMove {
    /// Previous row, if it shares the visual row.
    Left,
    /// Next row, if it shares the visual row.
    Right,
    /// One visual row up, possibly into the previous category.
    Up,
    /// One visual row down, possibly into the next category.
    Down,
}

/// Vertical scroll range derived from the current layout.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollMetrics {
    /// Largest meaningful scroll offset.
    pub max_offset: f64,
    /// Offset change of one step, the height of the last visual row.
    pub single_step: f64,
    /// Offset change of one page, a whole number of steps.
    pub page_step: f64,
}

impl<M: CategoryModel, D: CategoryDrawer> CategorizedView<M, D> {
    /// Enabled row under the pointer, if any.
    #[must_use]
    pub const fn hovered_row(&self) -> Option<usize> {
        self.hovered_row
    }

    /// Category under the pointer, if any.
    #[must_use]
    pub const fn hovered_category(&self) -> Option<&M::Key> {
        self.hovered_category.as_ref()
    }

    /// Active rubber band in viewport coordinates.
    #[must_use]
    pub fn rubber_band(&self) -> Option<Rect> {
        self.rubber_band.map(|band| self.to_viewport(band))
    }

    /// Representative row and viewport rectangle of category `key`.
    fn header_target(&mut self, key: &M::Key) -> Option<(usize, Rect)> {
        let representative = self.block(key)?.start;
        let rect = self.category_rect(key)?;
        Some((representative, rect))
    }

    /// The pointer moved to `point`, in viewport coordinates.
    pub fn pointer_moved(&mut self, point: Point) -> Damage {
        let mut damage = Damage::new();

        let row = self.index_at(point);
        if row != self.hovered_row {
            for changed in [self.hovered_row, row].into_iter().flatten() {
                damage.extend(self.visual_rect(changed));
            }
            self.hovered_row = row;
        }

        if let Some(pressed) = self.pressed_position {
            let band = Rect::from_points(pressed, self.to_content(point));
            let covered = self.rubber_band.map_or(band, |old| old.union(band));
            damage.push(self.to_viewport(covered));
            self.rubber_band = Some(band);
        }

        let category = self.category_at(point);
        if category.is_some() && category == self.hovered_category {
            if let Some(key) = category
                && let Some((representative, rect)) = self.header_target(&key)
            {
                self.drawer.mouse_moved(representative, rect, point);
                damage.push(rect);
            }
            return damage;
        }

        if let Some(old) = self.hovered_category.take()
            && let Some((representative, rect)) = self.header_target(&old)
        {
            self.drawer.mouse_left(representative, rect);
            damage.push(rect);
        }
        if let Some(key) = &category {
            damage.extend(self.category_rect(key));
        }
        self.hovered_category = category;
        damage
    }

    /// The primary button was pressed at `point`, in viewport coordinates.
    ///
    /// Starts a rubber band and forwards the press to the category under the pointer.
    pub fn pointer_pressed(&mut self, point: Point) -> PointerResponse {
        self.pressed_position = Some(self.to_content(point));
        self.rubber_band = None;

        let mut response = PointerResponse::default();
        if let Some(key) = self.category_at(point)
            && let Some((representative, rect)) = self.header_target(&key)
        {
            response.consumed = self.drawer.mouse_pressed(representative, rect, point);
            response.damage.push(rect);
        }
        response
    }

    /// The primary button was released at `point`, in viewport coordinates.
    ///
    /// Ends the rubber band and forwards the release to the category under the pointer.
    pub fn pointer_released(&mut self, point: Point) -> PointerResponse {
        self.pressed_position = None;
        let mut response = PointerResponse::default();
        if let Some(band) = self.rubber_band.take() {
            response.damage.push(self.to_viewport(band));
        }
        if let Some(key) = self.category_at(point)
            && let Some((representative, rect)) = self.header_target(&key)
        {
            response.consumed = self.drawer.mouse_released(representative, rect, point);
            response.damage.push(rect);
        }
        response
    }

    /// The pointer left the viewport.
    pub fn pointer_left(&mut self) -> Damage {
        let mut damage = Damage::new();
        if let Some(row) = self.hovered_row.take() {
            damage.extend(self.visual_rect(row));
        }
        if let Some(key) = self.hovered_category.take()
            && let Some((representative, rect)) = self.header_target(&key)
        {
            self.drawer.mouse_left(representative, rect);
            damage.push(rect);
        }
        damage
    }

    /// Row the keyboard cursor lands on when moving from `current`.
    ///
    /// Without a current row the cursor goes to row 0. Vertical movement is only defined
    /// for grid and uniform layouts, and skips collapsed categories.
    pub fn move_cursor(&mut self, current: Option<usize>, movement: CursorMove) -> Option<usize> {
        let row_count = self.model.row_count();
        if !self.is_categorized() || row_count == 0 {
            return None;
        }
        let Some(current) = current.filter(|&row| row < row_count) else {
            return Some(0);
        };
        let top = self.visual_rect(current)?.y0;

        match movement {
            CursorMove::Left => {
                let previous = current.checked_sub(1)?;
                (self.visual_rect(previous)?.y0 == top).then_some(previous)
            }
            CursorMove::Right => {
                let next = current + 1;
                if next >= row_count {
                    return None;
                }
                (self.visual_rect(next)?.y0 == top).then_some(next)
            }
            CursorMove::Up => self.move_vertically(current, false),
            CursorMove::Down => self.move_vertically(current, true),
        }
    }

    fn move_vertically(&mut self, current: usize, down: bool) -> Option<usize> {
        let placement = self.placement();
        if placement.sizing == Sizing::Variable {
            return None;
        }
        let per_row = placement.items_per_row()?;
        let block = self.block_of_row(current)?;
        let rel = current - block.start;
        let column = rel % per_row;

        if down && rel + per_row < block.len() {
            return Some(current + per_row);
        }
        if !down && rel >= per_row {
            return Some(current - per_row);
        }
        if down && rel / per_row < (block.len() - 1) / per_row {
            // Last visual row is shorter than this column.
            return Some(block.end - 1);
        }

        let mut neighbor = block;
        loop {
            let probe = if down {
                neighbor.end
            } else {
                neighbor.start.checked_sub(1)?
            };
            neighbor = self.block_of_row(probe)?;
            let key = self.category_for_row(probe);
            if !self.is_collapsed(&key) {
                break;
            }
        }

        // Land in the same column of the nearest visual row of the neighbor.
        let row_start = if down {
            0
        } else {
            (neighbor.len() - 1) / per_row * per_row
        };
        let last = neighbor.len() - 1;
        Some(neighbor.start + (row_start + column).min(last))
    }

    /// Vertical scroll range for the current layout and viewport.
    pub fn scroll_metrics(&mut self) -> ScrollMetrics {
        let row_count = self.model.row_count();
        if !self.is_categorized() || row_count == 0 {
            return ScrollMetrics::default();
        }
        let last = row_count - 1;
        let Some(rect) = self.visual_rect(last) else {
            return ScrollMetrics::default();
        };
        let key = self.category_for_row(last);
        let extent = if self.is_collapsed(&key) {
            0.0
        } else {
            match self.placement().sizing {
                Sizing::Grid(cell) => rect.height().max(cell.height),
                Sizing::Uniform(size) => size.height + self.config.spacing,
                Sizing::Variable => {
                    let tallest = self
                        .blocks
                        .get(&key)
                        .map_or(rect.height(), |block| tallest_in_last_row(&block.items));
                    tallest + self.config.spacing
                }
            }
        };

        let bottom = rect.y0 + self.scroll_offset + extent;
        let max_offset = (bottom - self.viewport.height).max(0.0);
        let page_step = if extent > 0.0 {
            to_f64(whole_fits(self.viewport.height, extent)) * extent
        } else {
            self.viewport.height
        };
        ScrollMetrics {
            max_offset,
            single_step: extent,
            page_step,
        }
    }

    /// Clamps the scroll offset into the range reported by
    /// [`CategorizedView::scroll_metrics`].
    pub fn clamp_scroll_to_content(&mut self) {
        let max_offset = self.scroll_metrics().max_offset;
        self.scroll_offset = self.scroll_offset.clamp(0.0, max_offset);
    }
}
