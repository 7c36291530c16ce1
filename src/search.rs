//! Three-point binary search
//!
//! Every iteration compares the needle against both ends of the current
//! range and then its midpoint, and only the midpoint comparison narrows the
//! range. The endpoint checks are redundant for correctness but decide which
//! comparisons run, so they are kept exactly.

use std::cmp::Ordering;

/// Bounds of the live search window, as signed indices so that `end` may
/// drop below `front` (or below zero) when the window empties.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchRange {
    pub front: isize,
    pub end: isize,
}

impl SearchRange {
    /// Window covering a list of `len` items
    pub fn covering(len: usize) -> Self {
        Self {
            front: 0,
            end: len as isize - 1,
        }
    }

    /// Distance between the endpoints; below 1 means nothing is left to
    /// narrow
    #[inline]
    pub fn range(&self) -> isize {
        self.end - self.front
    }

    #[inline]
    pub fn mid(&self) -> isize {
        self.front + self.range() / 2
    }
}

/// Search a sorted slice for `needle` using byte-wise comparison.
///
/// Returns the index of a matching element, or `None`. With duplicates,
/// any of their positions may be returned.
pub fn three_point_search<T: AsRef<[u8]>>(items: &[T], needle: &[u8]) -> Option<usize> {
    if items.is_empty() {
        return None;
    }

    let compare = |index: isize| needle.cmp(items[index as usize].as_ref());

    let mut window = SearchRange::covering(items.len());
    let mut position: Option<isize> = None;

    // The first iteration always runs so a single-element list is checked
    loop {
        let mid = window.mid();
        log::trace!(
            "search front:{} mid:{} end:{}",
            window.front,
            mid,
            window.end
        );

        if compare(window.front) == Ordering::Equal {
            position = Some(window.front);
        }

        if compare(window.end) == Ordering::Equal {
            position = Some(window.end);
        }

        match compare(mid) {
            Ordering::Equal => position = Some(mid),
            Ordering::Less => window.end = mid - 1,
            Ordering::Greater => window.front = mid + 1,
        }

        if position.is_some() || window.range() < 1 {
            break;
        }
    }

    position.map(|p| p as usize)
}
