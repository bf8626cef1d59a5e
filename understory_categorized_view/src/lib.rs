// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_categorized_view --heading-base-level=0

//! Understory Categorized View: layout and lookup for lists grouped into categories.
//!
//! This crate lays out the rows of a sorted list as a vertical sequence of *blocks*, one
//! per category, each topped by a header. It is renderer-agnostic: hosts supply the rows
//! through a [`CategoryModel`] and header metrics through a [`CategoryDrawer`], and get
//! back rectangles, hit-test results, and paint plans.
//!
//! The core concepts are:
//!
//! - [`CategorizedView`]: the controller. It owns the model, the drawer, a
//!   [`ViewConfig`], the viewport size, and the vertical scroll offset, and caches
//!   block and item geometry.
//! - Lazy geometry: queries only lay out what they touch. Each block tracks a stale
//!   frontier; rows before it reuse cached positions, rows at or after it are
//!   recomputed in order as queries reach them.
//! - Incremental mutation: [`CategorizedView::rows_inserted`],
//!   [`CategorizedView::rows_about_to_be_removed`] and
//!   [`CategorizedView::data_changed`] keep the category index in step with the model
//!   and invalidate only the affected blocks.
//! - Layout modes: fixed grid cells, uniform item sizes, or per-item sizes with row
//!   wrapping, each along the main axis ([`Flow::LeftToRight`]) or stacked
//!   ([`Flow::TopToBottom`]), in either [`LayoutDirection`].
//!
//! Every rectangle and point exchanged with the view is in viewport coordinates.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Size};
//! use understory_categorized_view::{CategorizedView, CategoryModel, FixedHeaderDrawer};
//!
//! struct Files(Vec<(&'static str, f64)>);
//!
//! impl CategoryModel for Files {
//!     type Key = &'static str;
//!
//!     fn row_count(&self) -> usize {
//!         self.0.len()
//!     }
//!
//!     fn category(&self, row: usize) -> Option<&'static str> {
//!         self.0.get(row).map(|(kind, _)| *kind)
//!     }
//!
//!     fn size_hint(&self, row: usize) -> Size {
//!         Size::new(80.0, self.0[row].1)
//!     }
//! }
//!
//! let files = Files(vec![("docs", 20.0), ("docs", 20.0), ("images", 30.0)]);
//! let drawer = FixedHeaderDrawer::new(16.0);
//! let mut view = CategorizedView::new(files, drawer, Size::new(80.0, 120.0));
//!
//! assert_eq!(view.block(&"images"), Some(2..3));
//! // "images" starts below two headers and the two "docs" rows.
//! let rect = view.visual_rect(2).unwrap();
//! assert_eq!(rect.y0, 16.0 + 40.0 + 16.0);
//! assert_eq!(view.index_at(Point::new(10.0, rect.y0 + 1.0)), Some(2));
//!
//! // Rows are reported to the view as the model changes.
//! view.remove_rows(0, 1, |files| {
//!     files.0.drain(0..2);
//! });
//! assert_eq!(view.block(&"images"), Some(0..1));
//! assert_eq!(view.block(&"docs"), None);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod cache;
mod config;
mod index;
mod interaction;
mod layout;
mod model;
mod mutation;
mod quarantine;
mod query;
mod view;

#[cfg(test)]
mod test_util;

pub use config::{Flow, LayoutDirection, ViewConfig};
pub use interaction::{CursorMove, Damage, PointerResponse, ScrollMetrics};
pub use model::{CategoryDrawer, CategoryModel, FixedHeaderDrawer, RowFlags};
pub use query::{CategoryPaint, ItemPaint};
pub use view::CategorizedView;
