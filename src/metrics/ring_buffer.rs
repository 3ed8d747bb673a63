use serde::Serialize;
use std::collections::VecDeque;

/// Fixed-length history for chart rendering.
///
/// Created full of placeholder values, so the length is always the
/// capacity; every push evicts exactly the oldest value.
#[derive(Debug, Clone, Serialize)]
pub struct RingBuffer<T: Clone> {
    buffer: VecDeque<T>,
    capacity: usize,
}

impl<T: Clone> RingBuffer<T> {
    pub fn filled(capacity: usize, value: T) -> Self {
        let mut buffer = VecDeque::with_capacity(capacity);
        buffer.resize(capacity, value);
        Self { buffer, capacity }
    }

    pub fn push(&mut self, item: T) {
        if self.capacity == 0 {
            return;
        }
        if self.buffer.len() >= self.capacity {
            self.buffer.pop_front();
        }
        self.buffer.push_back(item);
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.buffer.iter()
    }

    pub fn to_vec(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}
