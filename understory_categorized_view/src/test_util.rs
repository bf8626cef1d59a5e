// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory model shared by unit tests.

use alloc::vec::Vec;

use kurbo::Size;

use crate::model::{CategoryModel, RowFlags};

#[derive(Clone, Debug)]
pub(crate) struct TestRow {
    pub(crate) category: Option<&'static str>,
    pub(crate) size: Size,
    pub(crate) flags: RowFlags,
}

#[derive(Clone, Debug)]
pub(crate) struct TestModel {
    pub(crate) rows: Vec<TestRow>,
    pub(crate) categorized: bool,
}

impl TestModel {
    pub(crate) fn new(rows: &[(&'static str, Size)]) -> Self {
        Self {
            rows: rows
                .iter()
                .map(|&(category, size)| TestRow {
                    category: Some(category),
                    size,
                    flags: RowFlags::default(),
                })
                .collect(),
            categorized: true,
        }
    }

    /// Rows 100 wide with the given heights.
    pub(crate) fn with_heights(rows: &[(&'static str, f64)]) -> Self {
        let rows: Vec<_> = rows
            .iter()
            .map(|&(category, height)| (category, Size::new(100.0, height)))
            .collect();
        Self::new(&rows)
    }

    pub(crate) fn row(category: &'static str, size: Size) -> TestRow {
        TestRow {
            category: Some(category),
            size,
            flags: RowFlags::default(),
        }
    }
}

impl CategoryModel for TestModel {
    type Key = &'static str;

    fn is_categorized(&self) -> bool {
        self.categorized
    }

    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn category(&self, row: usize) -> Option<Self::Key> {
        self.rows.get(row).and_then(|row| row.category)
    }

    fn size_hint(&self, row: usize) -> Size {
        self.rows.get(row).map_or(Size::ZERO, |row| row.size)
    }

    fn flags(&self, row: usize) -> RowFlags {
        self.rows.get(row).map_or(RowFlags::empty(), |r| r.flags)
    }
}
