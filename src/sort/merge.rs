use crate::{foundation::core::Color, sort::compare::Comparator};

/// Bottom-up merge sort of one span, in place.
///
/// Runs of width 1, 2, 4, ... are merged from `span` into a scratch copy which is then copied
/// back. When two keys tie the right-hand run wins the slot.
///
/// With `crush` set, elements taken from the right-hand run are stored at the left cursor
/// instead of the output cursor. That overwrites already merged output and leaves stale
/// scratch values behind, so the result is no longer a permutation. The store index never
/// leaves the span: the left cursor is at most the run boundary, which is below the run end
/// whenever a right-hand element is still pending.
pub fn sort_span(span: &mut [Color], cmp: Comparator, crush: bool) {
    let n = span.len();
    if n < 2 {
        return;
    }

    let mut scratch = span.to_vec();
    let mut width = 1usize;
    while width < n {
        let mut left = 0usize;
        while left < n {
            let mid = (left + width).min(n);
            let end = (left + 2 * width).min(n);
            merge_runs(span, left, mid, end, &mut scratch, cmp, crush);
            left += 2 * width;
        }
        span.copy_from_slice(&scratch);
        width *= 2;
    }
}

/// Merge `src[left..mid]` and `src[mid..end]` into `dst[left..end]`.
fn merge_runs(
    src: &[Color],
    left: usize,
    mid: usize,
    end: usize,
    dst: &mut [Color],
    cmp: Comparator,
    crush: bool,
) {
    let (mut i, mut j) = (left, mid);
    for k in left..end {
        let take_left = i < mid && (j >= end || cmp.less(src[i], src[j]));
        if take_left {
            dst[k] = src[i];
            i += 1;
        } else {
            let slot = if crush { i } else { k };
            dst[slot] = src[j];
            j += 1;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sort/merge.rs"]
mod tests;
