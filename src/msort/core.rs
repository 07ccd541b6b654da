/// Largest range handed to the non-recursive fallback sort instead of
/// recursing further. Below this size the scratch allocation and call
/// overhead of merging cost more than they save, and cutting recursion
/// off here bounds stack depth: a 10M-element input recurses ~16 levels
/// instead of ~24.
pub const FALLBACK_THRESHOLD: usize = 256;

/// Merge two sorted slices into a freshly allocated buffer.
///
/// Ties take from `left`, so the result is stable with respect to the
/// left-hand range. Inputs are not mutated; the caller copies the result
/// back over the original range. Either side may be empty.
pub fn merge<T: Ord + Copy>(left: &[T], right: &[T]) -> Vec<T> {
    let mut out = Vec::with_capacity(left.len() + right.len());
    let (mut l, mut r) = (0, 0);

    while l < left.len() && r < right.len() {
        if left[l] <= right[r] {
            out.push(left[l]);
            l += 1;
        } else {
            out.push(right[r]);
            r += 1;
        }
    }

    // At most one of these is non-empty.
    out.extend_from_slice(&left[l..]);
    out.extend_from_slice(&right[r..]);

    out
}

/// Sort a range in place with top-down merge sort.
///
/// Ranges of at most [`FALLBACK_THRESHOLD`] elements go straight to
/// `sort_unstable` (pdqsort). Larger ranges split at `len / 2`, sort each
/// half, then merge through a scratch buffer that is copied back over the
/// range. Each recursive call touches only its own sub-range, so disjoint
/// calls are independent.
pub fn merge_sort<T: Ord + Copy>(data: &mut [T]) {
    let size = data.len();
    if size <= FALLBACK_THRESHOLD {
        data.sort_unstable();
        return;
    }

    let mid = size / 2;
    {
        let (left, right) = data.split_at_mut(mid);
        merge_sort(left);
        merge_sort(right);
    }

    let merged = merge(&data[..mid], &data[mid..]);
    data.copy_from_slice(&merged);
}
