// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Category key to block mapping.

use alloc::vec::Vec;
use core::hash::Hash;

use hashbrown::HashMap;

use crate::cache::Block;

/// Maps category keys to their [`Block`].
///
/// Iteration order of the map is unrelated to row order. Anything that depends on row
/// order goes through [`BlockIndex::ordered`], which sorts a snapshot by first row.
#[derive(Clone, Debug)]
pub(crate) struct BlockIndex<K> {
    blocks: HashMap<K, Block>,
}

impl<K> Default for BlockIndex<K> {
    fn default() -> Self {
        Self {
            blocks: HashMap::new(),
        }
    }
}

impl<K: Clone + Eq + Hash> BlockIndex<K> {
    pub(crate) fn len(&self) -> usize {
        self.blocks.len()
    }

    pub(crate) fn clear(&mut self) {
        self.blocks.clear();
    }

    pub(crate) fn get(&self, key: &K) -> Option<&Block> {
        self.blocks.get(key)
    }

    pub(crate) fn get_mut(&mut self, key: &K) -> Option<&mut Block> {
        self.blocks.get_mut(key)
    }

    /// Returns the block for `key`, creating an empty one anchored at `row` on first touch.
    pub(crate) fn get_or_create(&mut self, key: K, row: usize) -> &mut Block {
        self.blocks.entry(key).or_insert_with(|| {
            tracing::trace!(row, "creating category block");
            Block::new(row)
        })
    }

    pub(crate) fn remove(&mut self, key: &K) -> Option<Block> {
        self.blocks.remove(key)
    }

    pub(crate) fn blocks_mut(&mut self) -> impl Iterator<Item = &mut Block> {
        self.blocks.values_mut()
    }

    /// Snapshot of `(key, first_row)` pairs in row order.
    pub(crate) fn ordered(&self) -> Vec<(K, usize)> {
        let mut order: Vec<(K, usize)> = self
            .blocks
            .iter()
            .map(|(key, block)| (key.clone(), block.first_row))
            .collect();
        order.sort_by_key(|&(_, first_row)| first_row);
        order
    }

    /// Key of the block owning `row`, if any.
    pub(crate) fn key_of_row(&self, row: usize) -> Option<&K> {
        self.blocks
            .iter()
            .find(|(_, block)| block.contains_row(row))
            .map(|(key, _)| key)
    }

    /// Shifts first rows and quarantine frontiers for `count` rows inserted at `start`.
    pub(crate) fn shift_for_insert(&mut self, start: usize, count: usize) {
        for block in self.blocks.values_mut() {
            if block.first_row >= start {
                block.first_row += count;
            }
            block.quarantine.shift_for_insert(start, count);
        }
    }

    /// Shifts first rows and quarantine frontiers for rows `start..=end` having been removed.
    ///
    /// Blocks must no longer start inside the removed range.
    pub(crate) fn shift_for_remove(&mut self, start: usize, end: usize) {
        let count = end - start + 1;
        for block in self.blocks.values_mut() {
            debug_assert!(
                block.first_row < start || block.first_row > end,
                "block anchored at removed row {}",
                block.first_row
            );
            if block.first_row > end {
                block.first_row -= count;
            }
            block.quarantine.shift_for_remove(start, end);
        }
    }

    /// Drops cached origins of blocks starting at or after `origin_from`, and recomputes
    /// the alternation flag of blocks starting at or after `alternation_from`.
    pub(crate) fn refresh_after_mutation(&mut self, origin_from: usize, alternation_from: usize) {
        let order = self.ordered();
        for (position, (key, first_row)) in order.iter().enumerate() {
            let Some(block) = self.blocks.get_mut(key) else {
                continue;
            };
            if *first_row >= origin_from {
                block.origin = None;
            }
            if *first_row >= alternation_from {
                block.alternate = position % 2 == 1;
            }
        }
    }
}
