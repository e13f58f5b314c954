use std::cmp::Ordering;
use std::collections::VecDeque;

/// Frontier of a graph search: plain FIFO, or selection by a caller-supplied key.
///
/// The priority variant scans the whole queue on every removal instead of keeping a heap.
/// Keys are read at removal time, so an item whose cost was lowered in place after it was
/// enqueued is still selected correctly.
#[derive(Debug)]
pub struct Queue<T> {
    items: VecDeque<T>,
}

impl<T> Queue<T> {
    pub fn new() -> Self {
        Queue {
            items: VecDeque::new(),
        }
    }

    pub fn enqueue(&mut self, item: T) {
        self.items.push_back(item);
    }

    /// Removes the oldest item.
    pub fn dequeue(&mut self) -> Option<T> {
        self.items.pop_front()
    }

    /// Removes the item with the smallest key. Among equal keys the oldest item wins.
    pub fn priority_dequeue<K, F>(&mut self, mut key: F) -> Option<T>
    where
        K: PartialOrd,
        F: FnMut(&T) -> K,
    {
        let mut best: Option<(usize, K)> = None;
        for (i, item) in self.items.iter().enumerate() {
            let k = key(item);
            let better = match &best {
                None => true,
                Some((_, best_key)) => k.partial_cmp(best_key) == Some(Ordering::Less),
            };
            if better {
                best = Some((i, k));
            }
        }
        best.and_then(|(i, _)| self.items.remove(i))
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl<T> Default for Queue<T> {
    fn default() -> Self {
        Queue::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_in_first_out() {
        let mut queue = Queue::new();
        queue.enqueue('a');
        queue.enqueue('b');
        queue.enqueue('c');
        assert_eq!(queue.dequeue(), Some('a'));
        assert_eq!(queue.dequeue(), Some('b'));
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.dequeue(), Some('c'));
        assert_eq!(queue.dequeue(), None);
    }

    #[test]
    fn test_priority_dequeue_takes_smallest_key() {
        let mut queue = Queue::new();
        for v in [5, 1, 4, 2, 3] {
            queue.enqueue(v);
        }
        let order: Vec<i32> =
            std::iter::from_fn(|| queue.priority_dequeue(|&v| v)).collect();
        assert_eq!(order, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_priority_ties_resolve_in_insertion_order() {
        let mut queue = Queue::new();
        queue.enqueue(("first", 1.0f32));
        queue.enqueue(("second", 1.0));
        queue.enqueue(("cheap", 0.5));
        assert_eq!(queue.priority_dequeue(|item| item.1).map(|i| i.0), Some("cheap"));
        assert_eq!(queue.priority_dequeue(|item| item.1).map(|i| i.0), Some("first"));
        assert_eq!(queue.priority_dequeue(|item| item.1).map(|i| i.0), Some("second"));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_priority_reads_live_keys() {
        // Items point into a side table, the way frontier items point at vertex costs
        let mut costs = vec![3u32, 7, 5];
        let mut queue = Queue::new();
        for i in 0..costs.len() {
            queue.enqueue(i);
        }
        costs[1] = 1;
        assert_eq!(queue.priority_dequeue(|&i| costs[i]), Some(1));
    }

    #[test]
    fn test_priority_dequeue_on_empty_queue() {
        let mut queue: Queue<u8> = Queue::new();
        assert_eq!(queue.priority_dequeue(|&v| v), None);
    }
}
