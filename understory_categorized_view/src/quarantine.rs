// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-block stale-geometry frontier.

/// Tracks which rows of a block have trustworthy cached item geometry.
///
/// Rows before the frontier reuse their cached relative position; rows at or after it
/// must be recomputed, in row order, before being trusted. Each recomputation of the
/// frontier row advances the frontier by one, so every row pays for its layout once per
/// invalidation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) enum Quarantine {
    /// Every cached item is valid.
    #[default]
    Clean,
    /// Items for rows `>= row` are stale.
    DirtyFrom(usize),
}

impl Quarantine {
    /// First stale row, if any.
    pub(crate) const fn frontier(self) -> Option<usize> {
        match self {
            Self::Clean => None,
            Self::DirtyFrom(row) => Some(row),
        }
    }

    /// Returns `true` if `row` must be recomputed before its geometry is used.
    pub(crate) const fn contains(self, row: usize) -> bool {
        match self {
            Self::Clean => false,
            Self::DirtyFrom(start) => row >= start,
        }
    }

    /// Moves the frontier to exactly `row`, discarding any previous frontier.
    pub(crate) fn reset_to(&mut self, row: usize) {
        *self = Self::DirtyFrom(row);
    }

    /// Moves the frontier back to `row` if that is earlier than the current one.
    pub(crate) fn extend_to(&mut self, row: usize) {
        *self = match *self {
            Self::DirtyFrom(start) if start <= row => Self::DirtyFrom(start),
            _ => Self::DirtyFrom(row),
        };
    }

    /// Records that `row` has been recomputed.
    ///
    /// If `row` is the frontier it advances to the next row, or clears when `row` is the
    /// block's `last_row`.
    pub(crate) fn advance_past(&mut self, row: usize, last_row: usize) {
        if *self == Self::DirtyFrom(row) {
            *self = if row >= last_row {
                Self::Clean
            } else {
                Self::DirtyFrom(row + 1)
            };
        }
    }

    /// Adjusts the frontier for `count` rows inserted at `start`.
    pub(crate) fn shift_for_insert(&mut self, start: usize, count: usize) {
        if let Self::DirtyFrom(row) = self
            && *row >= start
        {
            *row += count;
        }
    }

    /// Adjusts the frontier for the rows `start..=end` being removed.
    ///
    /// A frontier inside the removed range only covered the removed tail of the block,
    /// so it clears.
    pub(crate) fn shift_for_remove(&mut self, start: usize, end: usize) {
        if let Self::DirtyFrom(row) = *self {
            if row > end {
                *self = Self::DirtyFrom(row - (end - start + 1));
            } else if row >= start {
                *self = Self::Clean;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Quarantine;

    #[test]
    fn advancing_walks_the_frontier_to_clean() {
        let mut q = Quarantine::Clean;
        q.reset_to(4);
        assert!(q.contains(4));
        assert!(q.contains(9));
        assert!(!q.contains(3));

        // Recomputing a row past the frontier does not move it.
        q.advance_past(6, 6);
        assert_eq!(q, Quarantine::DirtyFrom(4));

        q.advance_past(4, 6);
        q.advance_past(5, 6);
        assert_eq!(q.frontier(), Some(6));
        q.advance_past(6, 6);
        assert_eq!(q, Quarantine::Clean);
    }

    #[test]
    fn extend_keeps_the_earlier_frontier() {
        let mut q = Quarantine::Clean;
        q.extend_to(7);
        assert_eq!(q, Quarantine::DirtyFrom(7));
        q.extend_to(9);
        assert_eq!(q, Quarantine::DirtyFrom(7));
        q.extend_to(2);
        assert_eq!(q, Quarantine::DirtyFrom(2));
    }

    #[test]
    fn mutations_shift_the_frontier() {
        let mut q = Quarantine::DirtyFrom(5);
        q.shift_for_insert(6, 3);
        assert_eq!(q, Quarantine::DirtyFrom(5));
        q.shift_for_insert(5, 3);
        assert_eq!(q, Quarantine::DirtyFrom(8));

        q.shift_for_remove(0, 1);
        assert_eq!(q, Quarantine::DirtyFrom(6));
        q.shift_for_remove(6, 10);
        assert_eq!(q, Quarantine::Clean);
    }
}
