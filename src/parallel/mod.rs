pub mod batch;
pub mod pool;

pub use batch::{batches, Batches};
pub use pool::WorkerPool;
