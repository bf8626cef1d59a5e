// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared list model and view builders for integration tests.

#![allow(dead_code, reason = "Not every test binary uses every helper")]

use kurbo::Size;
use understory_categorized_view::{
    CategorizedView, CategoryModel, FixedHeaderDrawer, Flow, LayoutDirection, RowFlags,
    ViewConfig,
};

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Row {
    pub(crate) category: u8,
    pub(crate) size: Size,
    pub(crate) flags: RowFlags,
}

impl Row {
    pub(crate) fn new(category: u8, width: f64, height: f64) -> Self {
        Self {
            category,
            size: Size::new(width, height),
            flags: RowFlags::default(),
        }
    }
}

/// A list sorted by category.
#[derive(Clone, Debug, Default)]
pub(crate) struct ListModel {
    pub(crate) rows: Vec<Row>,
}

impl ListModel {
    /// Builds a model from per-category row lists; category `i` gets key `i + 1`.
    pub(crate) fn from_groups(groups: &[Vec<Row>]) -> Self {
        let mut rows = Vec::new();
        for (index, group) in groups.iter().enumerate() {
            let key = u8::try_from(index + 1).unwrap();
            rows.extend(group.iter().map(|row| Row {
                category: key,
                ..row.clone()
            }));
        }
        Self { rows }
    }
}

impl CategoryModel for ListModel {
    type Key = u8;

    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn category(&self, row: usize) -> Option<u8> {
        self.rows.get(row).map(|row| row.category)
    }

    fn size_hint(&self, row: usize) -> Size {
        self.rows[row].size
    }

    fn flags(&self, row: usize) -> RowFlags {
        self.rows[row].flags
    }
}

pub(crate) type View = CategorizedView<ListModel, FixedHeaderDrawer>;

pub(crate) const VIEWPORT: Size = Size::new(200.0, 150.0);
pub(crate) const GRID_CELL: Size = Size::new(40.0, 30.0);

/// Sizing mode selector: 0 grid, 1 uniform, anything else variable.
pub(crate) fn config(
    sizing: u8,
    cross: bool,
    rtl: bool,
    spacing: u8,
    category_spacing: u8,
) -> ViewConfig {
    ViewConfig {
        category_spacing: f64::from(category_spacing),
        spacing: f64::from(spacing),
        grid_size: (sizing == 0).then_some(GRID_CELL),
        uniform_item_sizes: sizing == 1,
        flow: if cross {
            Flow::TopToBottom
        } else {
            Flow::LeftToRight
        },
        direction: if rtl {
            LayoutDirection::RightToLeft
        } else {
            LayoutDirection::LeftToRight
        },
        ..ViewConfig::default()
    }
}

pub(crate) fn view(model: ListModel, header: f64, config: ViewConfig) -> View {
    CategorizedView::with_config(model, FixedHeaderDrawer::new(header), VIEWPORT, config)
}
