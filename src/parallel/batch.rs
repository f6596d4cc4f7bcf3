//! Batch distribution for parallel evaluation.
//!
//! Work is drawn from a lazy source in fixed-size batches so a search never
//! materializes its whole candidate space; each batch is then fanned out over
//! the worker pool.

/// Lazily regroups an iterator into `Vec`s of at most `size` items.
#[derive(Debug, Clone)]
pub struct Batches<I> {
    source: I,
    size: usize,
}

/// Batch `source` into chunks of `size` (a size of 0 is treated as 1).
///
/// # Example
/// ```
/// # use unkillable::parallel::batches;
/// let chunks: Vec<Vec<u32>> = batches(0..5u32, 2).collect();
/// assert_eq!(chunks, vec![vec![0, 1], vec![2, 3], vec![4]]);
/// ```
pub fn batches<I: Iterator>(source: I, size: usize) -> Batches<I> {
    Batches {
        source,
        size: size.max(1),
    }
}

impl<I: Iterator> Iterator for Batches<I> {
    type Item = Vec<I::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        let batch: Vec<I::Item> = self.source.by_ref().take(self.size).collect();
        if batch.is_empty() {
            None
        } else {
            Some(batch)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batches_pull_lazily_from_source() {
        let mut pulled = 0;
        let source = (0..100).inspect(|_| pulled += 1);
        let first = batches(source, 8).next();
        assert_eq!(first.map(|b| b.len()), Some(8));
        assert_eq!(pulled, 8);
    }

    #[test]
    fn zero_size_is_clamped() {
        let chunks: Vec<Vec<i32>> = batches(vec![1, 2].into_iter(), 0).collect();
        assert_eq!(chunks, vec![vec![1], vec![2]]);
    }
}
