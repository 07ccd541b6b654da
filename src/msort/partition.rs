/// One worker's contiguous share of the sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Partition {
    /// Ordinal of the worker this partition belongs to.
    pub index: usize,
    /// Start position in the sequence.
    pub offset: usize,
    /// Number of elements.
    pub len: usize,
}

impl Partition {
    /// One past the last element covered by this partition.
    #[inline]
    pub fn end(&self) -> usize {
        self.offset + self.len
    }
}

/// Split `element_count` elements into `workers` contiguous partitions.
///
/// Every partition gets `element_count / workers` elements and the first
/// `element_count % workers` partitions one extra, so no two lengths
/// differ by more than one. Offsets are the running sum of the preceding
/// lengths: the partitions tile the sequence exactly — disjoint, in index
/// order, lengths summing to `element_count`.
///
/// Callers guarantee `workers >= 1`; the engine rejects a zero worker
/// count before partitioning.
pub fn split_even(element_count: usize, workers: usize) -> Vec<Partition> {
    debug_assert!(workers >= 1);

    let base = element_count / workers;
    let remainder = element_count % workers;

    let mut partitions = Vec::with_capacity(workers);
    let mut offset = 0;
    for index in 0..workers {
        let len = base + usize::from(index < remainder);
        partitions.push(Partition { index, offset, len });
        offset += len;
    }
    debug_assert_eq!(offset, element_count);

    partitions
}
