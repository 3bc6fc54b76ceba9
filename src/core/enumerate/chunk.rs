//! Chunk partitioning for the fetch worker pool

/// Splits `items` into at most `workers` contiguous chunks
///
/// Every chunk holds `ceil(items.len() / workers)` elements except possibly
/// the last, which holds the remainder; concatenating the chunks reproduces
/// the input exactly. An empty input yields no chunks.
///
/// # Panics
///
/// Panics if `workers` is zero.
///
/// # Examples
///
/// ```
/// use marcexport::core::enumerate::chunk::chunk_items;
///
/// let chunks = chunk_items((1..=10).collect::<Vec<u32>>(), 4);
/// assert_eq!(chunks.len(), 4);
/// assert_eq!(chunks[0], vec![1, 2, 3]);
/// assert_eq!(chunks[3], vec![10]);
/// ```
pub fn chunk_items<T>(items: Vec<T>, workers: usize) -> Vec<Vec<T>> {
    assert!(workers > 0, "worker count must be positive");

    if items.is_empty() {
        return Vec::new();
    }

    let chunk_size = (items.len() + workers - 1) / workers;
    let mut chunks = Vec::with_capacity(workers);
    let mut current = Vec::with_capacity(chunk_size);

    for item in items {
        current.push(item);
        if current.len() == chunk_size {
            chunks.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}
