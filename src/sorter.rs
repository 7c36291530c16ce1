//! Lexical sorting of the reserved-word list
//!
//! The list holds at most a few dozen short words, so a bubble sort with a
//! shrinking upper bound is enough. Neighbors swap only when strictly out of
//! order, which keeps equal words in their load order.

/// Work done by one call to [`bubble_sort`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortReport {
    /// Number of passes over the live prefix
    pub passes: usize,
    /// Number of neighbor swaps performed
    pub swaps: usize,
}

/// Sort `items` ascending in place.
///
/// Each pass scans adjacent pairs up to the current bound, swapping any pair
/// where the left element compares greater, then lowers the bound by one. A
/// pass without swaps ends the sort.
pub fn bubble_sort<T: Ord>(items: &mut [T]) -> SortReport {
    let mut report = SortReport::default();
    let mut bound = items.len();
    let mut swapped = true;

    while swapped && bound > 1 {
        swapped = false;
        report.passes += 1;

        for i in 0..bound - 1 {
            if items[i] > items[i + 1] {
                items.swap(i, i + 1);
                report.swaps += 1;
                swapped = true;
            }
        }

        bound -= 1;
    }

    log::debug!(
        "Sorted {} items in {} passes ({} swaps)",
        items.len(),
        report.passes,
        report.swaps
    );

    report
}

/// Check the non-decreasing order invariant
pub fn is_sorted<T: Ord>(items: &[T]) -> bool {
    items.windows(2).all(|pair| pair[0] <= pair[1])
}
