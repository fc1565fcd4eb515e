use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Reference bound on queued items per direction.
pub const DEFAULT_QUEUE_CAPACITY: usize = 100;

/// Fixed-capacity, mutex-guarded FIFO between a worker thread and the
/// control thread.
///
/// Backpressure policy: at capacity, `push` silently drops the new item
/// instead of blocking. Liveness of the producer loop wins over
/// completeness of historical messages. No operation blocks waiting for
/// items; absence is just `None`/empty.
#[derive(Debug)]
pub struct BoundedQueue<T> {
    buf: Mutex<VecDeque<T>>,
    capacity: usize,
}

impl<T> BoundedQueue<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            buf: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
        }
    }

    // The queue holds plain data, so a producer/consumer that panicked
    // mid-push cannot have left the buffer in a torn state.
    fn lock(&self) -> MutexGuard<'_, VecDeque<T>> {
        self.buf.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append `item` unless the queue is full. Returns whether the item
    /// was enqueued; a drop is not an error.
    pub fn push(&self, item: T) -> bool {
        let mut buf = self.lock();
        if buf.len() >= self.capacity {
            return false;
        }
        buf.push_back(item);
        true
    }

    /// Take at most one item.
    pub fn try_pop(&self) -> Option<T> {
        self.lock().pop_front()
    }

    /// Atomically remove and return every queued item in insertion
    /// order, leaving the queue empty.
    ///
    /// Intended for a single timer-driven consumer; two back-to-back
    /// calls never return the same item twice.
    pub fn drain_all(&self) -> Vec<T> {
        self.lock().drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overflow_drops_newest() {
        let queue = BoundedQueue::new(3);
        for i in 0..5 {
            let accepted = queue.push(i);
            assert_eq!(accepted, i < 3);
        }

        assert_eq!(queue.drain_all(), vec![0, 1, 2]);
    }

    #[test]
    fn drain_preserves_insertion_order_and_empties() {
        let queue = BoundedQueue::new(DEFAULT_QUEUE_CAPACITY);
        for i in 0..10 {
            queue.push(i);
        }

        assert_eq!(queue.drain_all(), (0..10).collect::<Vec<_>>());
        assert!(queue.drain_all().is_empty());
    }

    #[test]
    fn try_pop_takes_one_in_fifo_order() {
        let queue = BoundedQueue::new(4);
        queue.push("a");
        queue.push("b");

        assert_eq!(queue.try_pop(), Some("a"));
        assert_eq!(queue.try_pop(), Some("b"));
        assert_eq!(queue.try_pop(), None);
    }

    #[test]
    fn drain_never_exceeds_capacity() {
        let queue = BoundedQueue::new(DEFAULT_QUEUE_CAPACITY);
        for i in 0..DEFAULT_QUEUE_CAPACITY * 2 {
            queue.push(i);
        }

        assert_eq!(queue.drain_all().len(), DEFAULT_QUEUE_CAPACITY);
    }
}
