/// Use mimalloc as the global allocator.
/// The merge phase allocates one scratch buffer per merge step across all
/// worker threads at once; mimalloc's thread-local caching keeps those
/// allocations off a shared lock.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

pub mod common;
pub mod dataset;
pub mod msort;
