// SPDX-License-Identifier: AGPL-3.0-or-later

//! Ordered set for the sweep line status, based on the `BTreeSet` of the
//! standard library.
//!
//! Entries are erased by value, so no positional handles have to be kept
//! consistent across structural changes.

use std::collections::BTreeSet;
use std::ops::Bound;

/// Data structure for the scan line.
#[derive(Debug)]
pub struct ScanLine<K> {
    content: BTreeSet<K>,
}

impl<K: Ord> ScanLine<K> {
    pub fn new() -> ScanLine<K> {
        ScanLine {
            content: BTreeSet::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn contains(&self, value: &K) -> bool {
        self.content.contains(value)
    }

    /// Entry directly above `value`.
    pub fn next(&self, value: &K) -> Option<&K> {
        self.content
            .range((Bound::Excluded(value), Bound::Unbounded))
            .next()
    }

    /// Entry directly below `value`.
    pub fn prev(&self, value: &K) -> Option<&K> {
        self.content
            .range((Bound::Unbounded, Bound::Excluded(value)))
            .next_back()
    }

    pub fn insert(&mut self, value: K) -> bool {
        self.content.insert(value)
    }

    pub fn remove(&mut self, value: &K) -> bool {
        self.content.remove(value)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn insert_and_navigate() {
        let mut t = ScanLine::new();
        t.insert(1);
        t.insert(3);
        t.insert(2);

        assert_eq!(t.len(), 3);

        assert_eq!(t.next(&1), Some(&2));
        assert_eq!(t.next(&2), Some(&3));
        assert_eq!(t.next(&3), None);

        assert_eq!(t.prev(&1), None);
        assert_eq!(t.prev(&2), Some(&1));
        assert_eq!(t.prev(&3), Some(&2));

        assert!(t.remove(&2));
        assert_eq!(t.next(&1), Some(&3));
        assert!(!t.contains(&2));
    }
}
