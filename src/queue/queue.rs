use std::collections::VecDeque;
use std::sync::Mutex;

/// A thread-safe FIFO of pending work items.
///
/// `enqueue` and `try_dequeue` are individually atomic and never block
/// beyond the internal lock. There is no fairness guarantee between racing
/// consumers: a consumer may find the queue already drained by another, in
/// which case it simply gets `None`.
pub(crate) struct ActionQueue<T> {
    items: Mutex<VecDeque<T>>,
}

impl<T> ActionQueue<T> {
    pub fn new() -> Self {
        Self {
            items: Mutex::new(VecDeque::new()),
        }
    }

    /// Append an item at the tail.
    pub fn enqueue(&self, item: T) {
        self.items.lock().unwrap().push_back(item);
    }

    /// Remove and return the head item, or `None` if the queue is empty.
    pub fn try_dequeue(&self) -> Option<T> {
        self.items.lock().unwrap().pop_front()
    }

    /// Number of items currently queued.
    pub fn len(&self) -> usize {
        self.items.lock().unwrap().len()
    }
}
