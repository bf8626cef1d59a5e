// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The categorized view controller: owned collaborators, configuration, and lazily
//! computed block and item geometry.

use alloc::vec::Vec;
use core::ops::Range;

use kurbo::{Point, Rect, Size, Vec2};

use crate::cache::Item;
use crate::config::{Flow, LayoutDirection, ViewConfig};
use crate::index::BlockIndex;
use crate::layout::{Placement, Sizing};
use crate::model::{CategoryDrawer, CategoryModel};

/// Layout and lookup engine for a list whose rows are grouped into categories.
///
/// The view owns a [`CategoryModel`] and a [`CategoryDrawer`], keeps one block per
/// category, and computes item and header geometry lazily: a query only lays out what it
/// needs, and a mutation only invalidates what it affects.
///
/// All rectangles and points exchanged with the view are in viewport coordinates, that
/// is, content coordinates shifted up by [`CategorizedView::scroll_offset`].
///
/// Queries take `&mut self` because they may fill caches.
pub struct CategorizedView<M: CategoryModel, D: CategoryDrawer> {
    pub(crate) model: M,
    pub(crate) drawer: D,
    pub(crate) config: ViewConfig,
    pub(crate) viewport: Size,
    pub(crate) scroll_offset: f64,
    pub(crate) blocks: BlockIndex<M::Key>,
    /// Size shared by every item when `uniform_item_sizes` is on; taken from row 0.
    pub(crate) uniform_size: Option<Size>,
    pub(crate) hovered_row: Option<usize>,
    pub(crate) hovered_category: Option<M::Key>,
    /// Content-space position of the active press, if any.
    pub(crate) pressed_position: Option<Point>,
    /// Content-space rubber band of the active press, if any.
    pub(crate) rubber_band: Option<Rect>,
}

impl<M: CategoryModel, D: CategoryDrawer> core::fmt::Debug for CategorizedView<M, D> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CategorizedView")
            .field("config", &self.config)
            .field("viewport", &self.viewport)
            .field("scroll_offset", &self.scroll_offset)
            .field("blocks", &self.blocks.len())
            .field("hovered_row", &self.hovered_row)
            .field("hovered_category", &self.hovered_category)
            .finish_non_exhaustive()
    }
}

impl<M: CategoryModel, D: CategoryDrawer> CategorizedView<M, D> {
    /// Creates a view over `model` with the default [`ViewConfig`].
    ///
    /// Rows already present in the model are indexed immediately.
    pub fn new(model: M, drawer: D, viewport: Size) -> Self {
        Self::with_config(model, drawer, viewport, ViewConfig::default())
    }

    /// Creates a view over `model` with an explicit configuration.
    pub fn with_config(model: M, drawer: D, viewport: Size, config: ViewConfig) -> Self {
        let mut view = Self {
            model,
            drawer,
            config,
            viewport,
            scroll_offset: 0.0,
            blocks: BlockIndex::default(),
            uniform_size: None,
            hovered_row: None,
            hovered_category: None,
            pressed_position: None,
            rubber_band: None,
        };
        view.layout_changed();
        view
    }

    /// Returns a shared reference to the model.
    #[must_use]
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Returns a mutable reference to the model.
    ///
    /// Structural changes must be reported through the mutation methods, for example
    /// [`CategorizedView::rows_inserted`], or wrapped with [`CategorizedView::insert_rows`]
    /// and [`CategorizedView::remove_rows`].
    pub fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    /// Replaces the model, rebuilding every block. Returns the previous model.
    pub fn replace_model(&mut self, model: M) -> M {
        let previous = core::mem::replace(&mut self.model, model);
        self.layout_changed();
        previous
    }

    /// Returns a shared reference to the header drawer.
    #[must_use]
    pub fn drawer(&self) -> &D {
        &self.drawer
    }

    /// Returns a mutable reference to the header drawer.
    ///
    /// Call [`CategorizedView::relayout`] if header heights or margins change.
    pub fn drawer_mut(&mut self) -> &mut D {
        &mut self.drawer
    }

    /// Returns `true` if both the model and the view can produce categorized geometry.
    #[must_use]
    pub fn is_categorized(&self) -> bool {
        self.model.is_categorized()
    }

    /// Returns the current configuration.
    #[must_use]
    pub const fn config(&self) -> &ViewConfig {
        &self.config
    }

    /// Number of categories currently indexed. Zero for uncategorized models.
    #[must_use]
    pub fn category_count(&self) -> usize {
        if !self.is_categorized() {
            return 0;
        }
        self.blocks.len()
    }

    /// Returns the viewport size.
    #[must_use]
    pub const fn viewport(&self) -> Size {
        self.viewport
    }

    /// Resizes the viewport. A width change relays out every block.
    pub fn set_viewport(&mut self, viewport: Size) {
        let width_changed = viewport.width != self.viewport.width;
        self.viewport = viewport;
        if width_changed {
            self.relayout();
        }
    }

    /// Returns the vertical scroll offset.
    #[must_use]
    pub const fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    /// Sets the vertical scroll offset. Negative offsets are clamped to zero.
    pub fn set_scroll_offset(&mut self, offset: f64) {
        self.scroll_offset = offset.max(0.0);
    }

    /// Adjusts the vertical scroll offset by `delta`.
    pub fn scroll_by(&mut self, delta: f64) {
        self.set_scroll_offset(self.scroll_offset + delta);
    }

    /// Sets the spacing between blocks.
    pub fn set_category_spacing(&mut self, spacing: f64) {
        if self.config.category_spacing != spacing {
            self.config.category_spacing = spacing;
            self.relayout();
        }
    }

    /// Sets the spacing between items of variable-size layouts.
    pub fn set_spacing(&mut self, spacing: f64) {
        if self.config.spacing != spacing {
            self.config.spacing = spacing;
            self.relayout();
        }
    }

    /// Enables or disables alternating block colors. Geometry is unaffected.
    pub fn set_alternating_block_colors(&mut self, enable: bool) {
        self.config.alternating_block_colors = enable;
    }

    /// Enables or disables collapsible blocks. Disabling expands every collapsed block.
    pub fn set_collapsible_blocks(&mut self, enable: bool) {
        if self.config.collapsible_blocks == enable {
            return;
        }
        self.config.collapsible_blocks = enable;
        if !enable {
            let mut any_expanded = false;
            for block in self.blocks.blocks_mut() {
                any_expanded |= core::mem::take(&mut block.collapsed);
            }
            if any_expanded {
                self.blocks.refresh_after_mutation(0, usize::MAX);
            }
        }
    }

    /// Sets or clears the grid cell size.
    pub fn set_grid_size(&mut self, grid_size: Option<Size>) {
        if self.config.grid_size != grid_size {
            self.config.grid_size = grid_size;
            self.relayout();
        }
    }

    /// Enables or disables uniform item sizes.
    pub fn set_uniform_item_sizes(&mut self, enable: bool) {
        if self.config.uniform_item_sizes != enable {
            self.config.uniform_item_sizes = enable;
            self.relayout();
        }
    }

    /// Sets the item flow.
    pub fn set_flow(&mut self, flow: Flow) {
        if self.config.flow != flow {
            self.config.flow = flow;
            self.relayout();
        }
    }

    /// Sets the writing direction.
    pub fn set_direction(&mut self, direction: LayoutDirection) {
        if self.config.direction != direction {
            self.config.direction = direction;
            self.relayout();
        }
    }

    /// Replaces the whole configuration, relaying out if any geometry-affecting field
    /// changed.
    pub fn set_config(&mut self, config: ViewConfig) {
        if !config.collapsible_blocks {
            self.set_collapsible_blocks(false);
        }
        let geometry_changed = ViewConfig {
            alternating_block_colors: config.alternating_block_colors,
            collapsible_blocks: config.collapsible_blocks,
            ..self.config
        } != config;
        self.config = config;
        if geometry_changed {
            self.relayout();
        }
    }

    /// Width available to items inside a block.
    pub(crate) fn available_width(&self) -> f64 {
        self.viewport.width
            - self.config.category_spacing * 2.0
            - self.drawer.left_margin()
            - self.drawer.right_margin()
    }

    /// Category of `row`, or the empty key when the row carries no category data.
    ///
    /// Missing data is reported once, when the row is indexed.
    pub(crate) fn category_for_row(&self, row: usize) -> M::Key {
        self.model.category(row).unwrap_or_default()
    }

    pub(crate) fn placement(&mut self) -> Placement {
        let sizing = if let Some(cell) = self.config.grid() {
            Sizing::Grid(cell)
        } else if self.config.uniform_item_sizes {
            let size = match self.uniform_size {
                Some(size) => size,
                None => {
                    let size = if self.model.row_count() > 0 {
                        self.model.size_hint(0)
                    } else {
                        Size::ZERO
                    };
                    self.uniform_size = Some(size);
                    size
                }
            };
            Sizing::Uniform(size)
        } else {
            Sizing::Variable
        };
        Placement {
            flow: self.config.flow,
            sizing,
            direction: self.config.direction,
            left: self.config.category_spacing + self.drawer.left_margin(),
            available: self.available_width(),
            spacing: self.config.spacing,
        }
    }

    /// Returns the placed item at block-relative index `rel`, laying out stale items of
    /// the block in row order up to it.
    pub(crate) fn resolve_item(&mut self, key: &M::Key, rel: usize) -> Option<Item> {
        let placement = self.placement();
        let model = &self.model;
        let block = self.blocks.get_mut(key)?;
        let cached = *block.items.get(rel)?;
        let first_row = block.first_row;
        let target = first_row + rel;

        let start = match block.quarantine.frontier() {
            Some(frontier) if block.quarantine.contains(target) => {
                debug_assert!(
                    frontier >= first_row,
                    "quarantine frontier {frontier} precedes block start {first_row}"
                );
                frontier.saturating_sub(first_row)
            }
            _ if cached.position.is_none() => rel,
            _ => return Some(cached),
        };

        let last_row = block.last_row();
        for r in start..=rel {
            let row = first_row + r;
            let natural = placement.natural_size(|| model.size_hint(row));
            let (earlier, rest) = block.items.split_at_mut(r);
            rest[0] = placement.place(r, earlier, natural);
            block.quarantine.advance_past(row, last_row);
        }
        block.items.get(rel).copied()
    }

    /// Top-left of the body of the block for `key`, in content space.
    ///
    /// The body starts below the category header. Computing one origin also caches the
    /// origins of every block before it.
    pub(crate) fn block_position(&mut self, key: &M::Key) -> Option<Point> {
        let block = self.blocks.get(key)?;
        if let Some(origin) = block.origin {
            return Some(origin);
        }
        let target_first = block.first_row;
        let spacing = self.config.category_spacing;

        let mut y = 0.0;
        for (other, first_row) in self.blocks.ordered() {
            if first_row > target_first {
                break;
            }
            y += self.drawer.category_height(first_row) + spacing;
            let origin = Point::new(spacing, y);
            if let Some(block) = self.blocks.get_mut(&other) {
                block.origin = Some(origin);
            }
            if first_row == target_first {
                return Some(origin);
            }
            y += self.block_height(&other);
        }
        None
    }

    /// Body height of the block for `key`. Zero while collapsed.
    pub(crate) fn block_height(&mut self, key: &M::Key) -> f64 {
        let Some(block) = self.blocks.get(key) else {
            return 0.0;
        };
        if block.collapsed {
            return 0.0;
        }
        if let Some(height) = block.height {
            return height;
        }
        let len = block.len();
        if len == 0 || self.resolve_item(key, len - 1).is_none() {
            return 0.0;
        }
        let placement = self.placement();
        let Some(block) = self.blocks.get_mut(key) else {
            return 0.0;
        };
        let height = placement.body_height(&block.items);
        block.height = Some(height);
        height
    }

    pub(crate) fn to_viewport(&self, rect: Rect) -> Rect {
        rect - Vec2::new(0.0, self.scroll_offset)
    }

    pub(crate) fn to_content(&self, point: Point) -> Point {
        point + Vec2::new(0.0, self.scroll_offset)
    }

    /// Rectangle of `row` in viewport coordinates.
    ///
    /// Returns `None` for rows outside the model, rows the view has not been told about,
    /// and uncategorized models. Rows of collapsed blocks get a zero-height rectangle
    /// placed left of the viewport at the top of their block.
    pub fn visual_rect(&mut self, row: usize) -> Option<Rect> {
        if !self.is_categorized() || row >= self.model.row_count() {
            return None;
        }
        let key = self.category_for_row(row);
        let block = self.blocks.get(&key)?;
        if !block.contains_row(row) {
            return None;
        }
        let rel = row - block.first_row;
        let origin = self.block_position(&key)?;
        let item = self.resolve_item(&key, rel)?;
        let collapsed = self.blocks.get(&key)?.collapsed;

        let placement = self.placement();
        let rect = placement.display_rect(&item)?;
        let rect = if collapsed {
            Rect::new(-rect.width(), origin.y, 0.0, origin.y)
        } else {
            rect + Vec2::new(0.0, origin.y)
        };
        Some(self.to_viewport(rect))
    }

    /// Rows of the category `key`, in row order.
    pub fn block(&self, key: &M::Key) -> Option<Range<usize>> {
        if !self.is_categorized() {
            return None;
        }
        let block = self.blocks.get(key)?;
        Some(block.first_row..block.first_row + block.len())
    }

    /// Rows of the category that `representative` belongs to.
    pub fn block_of_row(&self, representative: usize) -> Option<Range<usize>> {
        if !self.is_categorized() {
            return None;
        }
        let key = self.blocks.key_of_row(representative)?;
        self.block(key)
    }

    /// Category keys in row order. Empty for uncategorized models.
    pub fn categories(&self) -> impl Iterator<Item = M::Key> {
        let ordered = if self.is_categorized() {
            self.blocks.ordered()
        } else {
            Vec::new()
        };
        ordered.into_iter().map(|(key, _)| key)
    }

    /// Top-left of the body of category `key` (below its header), in viewport coordinates.
    pub fn category_position(&mut self, key: &M::Key) -> Option<Point> {
        if !self.is_categorized() {
            return None;
        }
        let origin = self.block_position(key)?;
        Some(origin - Vec2::new(0.0, self.scroll_offset))
    }

    /// Body height of category `key`, excluding its header. Zero while collapsed.
    pub fn category_height(&mut self, key: &M::Key) -> Option<f64> {
        if !self.is_categorized() || self.blocks.get(key).is_none() {
            return None;
        }
        Some(self.block_height(key))
    }

    /// Rectangle covering the header and body of category `key`, in viewport coordinates.
    pub fn category_rect(&mut self, key: &M::Key) -> Option<Rect> {
        if !self.is_categorized() {
            return None;
        }
        let representative = self.blocks.get(key)?.first_row;
        let origin = self.block_position(key)?;
        let header = self.drawer.category_height(representative);
        let body = self.block_height(key);
        let width = self.viewport.width - 2.0 * self.config.category_spacing;
        let rect = Rect::from_origin_size((origin.x, origin.y - header), (width, header + body));
        Some(self.to_viewport(rect))
    }

    /// Returns `true` if category `key` is collapsed.
    #[must_use]
    pub fn is_collapsed(&self, key: &M::Key) -> bool {
        self.is_categorized() && self.blocks.get(key).is_some_and(|block| block.collapsed)
    }

    /// Collapses or expands category `key`.
    ///
    /// Has no effect unless collapsible blocks are enabled. Returns `true` if the state
    /// changed. Cached item geometry survives, so expanding restores prior positions.
    pub fn set_collapsed(&mut self, key: &M::Key, collapsed: bool) -> bool {
        if !self.config.collapsible_blocks || !self.is_categorized() {
            return false;
        }
        let Some(block) = self.blocks.get_mut(key) else {
            return false;
        };
        if block.collapsed == collapsed {
            return false;
        }
        block.collapsed = collapsed;
        let following = block.first_row + 1;
        self.blocks.refresh_after_mutation(following, usize::MAX);
        true
    }

    /// Flips the collapsed state of category `key`. Returns `true` if the state changed.
    pub fn toggle_collapsed(&mut self, key: &M::Key) -> bool {
        let collapsed = self.is_collapsed(key);
        self.set_collapsed(key, !collapsed)
    }

    /// Returns `true` if category `key` is drawn with the alternate block color.
    #[must_use]
    pub fn is_alternate(&self, key: &M::Key) -> bool {
        self.config.alternating_block_colors
            && self.is_categorized()
            && self.blocks.get(key).is_some_and(|block| block.alternate)
    }
}
