use std::io;
use std::mem;
use std::thread;
use std::time::{Duration, Instant};

use thiserror::Error;

use super::core::merge_sort;
use super::partition::{Partition, split_even};

/// Failures of a sort run. Sorting valid in-memory data cannot fail, so
/// everything here is configuration or thread lifecycle.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Worker count 0 — rejected up front rather than dividing by zero
    /// in the partitioner.
    #[error("worker count must be at least 1")]
    NoWorkers,

    /// The OS refused to create a worker thread. The run is aborted:
    /// no partial sort result, no timing.
    #[error("failed to spawn worker {index}: {source}")]
    Spawn {
        index: usize,
        #[source]
        source: io::Error,
    },

    /// A worker terminated abnormally instead of returning.
    #[error("worker {index} terminated abnormally")]
    Worker { index: usize },
}

/// Context for one sort run: the worker count is fixed at construction
/// and nothing outlives the run.
#[derive(Debug, Clone)]
pub struct SortRun {
    workers: usize,
}

impl SortRun {
    /// Create a run context. `workers` must be at least 1.
    pub fn new(workers: usize) -> Result<Self, EngineError> {
        if workers == 0 {
            return Err(EngineError::NoWorkers);
        }
        Ok(SortRun { workers })
    }

    /// Number of worker threads this run will use.
    #[inline]
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Sort `data` ascending in place and return the wall-clock time of
    /// the sort phase. Partitioning and all I/O sit outside the timed
    /// window.
    ///
    /// With a single worker, or at least as many workers as elements, the
    /// whole sequence is sorted by one sequential pass and no threads are
    /// spawned. Otherwise each worker merge-sorts its own partition
    /// concurrently; after all of them join, the partitions are combined
    /// by running the merge sort once more over the entire sequence in
    /// the calling thread.
    pub fn execute<T: Ord + Copy + Send>(&self, data: &mut [T]) -> Result<Duration, EngineError> {
        let partitions = split_even(data.len(), self.workers);

        let start = Instant::now();

        if self.workers == 1 || self.workers >= data.len() {
            // Too few elements to share out (this also covers the empty
            // sequence): skip the parallel phase entirely.
            merge_sort(data);
            return Ok(start.elapsed());
        }

        sort_partitions(data, &partitions)?;
        merge_sort(data);

        Ok(start.elapsed())
    }
}

/// Spawn one scoped worker per partition and block until all have finished.
///
/// Each worker gets an exclusive `&mut` chunk carved off the sequence with
/// `split_at_mut`, so concurrent in-place sorting needs no locks — the
/// chunks cannot overlap. On spawn failure the error propagates after
/// scope teardown has joined whatever was already running; the caller
/// never proceeds to the final pass.
fn sort_partitions<T: Ord + Copy + Send>(
    data: &mut [T],
    partitions: &[Partition],
) -> Result<(), EngineError> {
    thread::scope(|scope| {
        let mut handles = Vec::with_capacity(partitions.len());
        let mut rest = data;

        for partition in partitions {
            let (chunk, tail) = mem::take(&mut rest).split_at_mut(partition.len);
            rest = tail;

            let handle = thread::Builder::new()
                .name(format!("fmsort-worker-{}", partition.index))
                .spawn_scoped(scope, move || merge_sort(chunk))
                .map_err(|source| EngineError::Spawn {
                    index: partition.index,
                    source,
                })?;
            handles.push(handle);
        }
        debug_assert!(rest.is_empty());

        for (index, handle) in handles.into_iter().enumerate() {
            handle.join().map_err(|_| EngineError::Worker { index })?;
        }

        Ok(())
    })
}
