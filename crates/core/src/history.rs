use crate::error::{GuardError, Result};
use crate::state::Sample;
use std::collections::VecDeque;

/// Rolling, capacity-bounded history of samples, oldest first.
///
/// `len() <= capacity()` always holds; appending past capacity evicts exactly
/// one sample from the head.  Retained samples are never mutated or reordered.
#[derive(Debug, Clone)]
pub struct History {
    samples:  VecDeque<Sample>,
    capacity: usize,
}

impl History {
    /// Create an empty history.  A zero capacity is bumped to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Push a new sample, evicting the oldest if at capacity.
    ///
    /// Samples older than the newest retained one are rejected so the
    /// sequence stays time-ordered; the history is left unchanged.
    pub fn append(&mut self, sample: Sample) -> Result<()> {
        if let Some(newest) = self.samples.back() {
            if sample.timestamp < newest.timestamp {
                return Err(GuardError::History(format!(
                    "non-monotonic timestamp {} (newest is {})",
                    sample.timestamp.format("%H:%M:%S"),
                    newest.timestamp.format("%H:%M:%S"),
                )));
            }
        }

        self.samples.push_back(sample);
        if self.samples.len() > self.capacity {
            self.samples.pop_front();
        }
        Ok(())
    }

    /// An owned copy of the current sequence, oldest first.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Sample> {
        self.samples.iter().cloned().collect()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Sample> + ExactSizeIterator {
        self.samples.iter()
    }

    pub fn newest(&self) -> Option<&Sample> {
        self.samples.back()
    }

    pub fn oldest(&self) -> Option<&Sample> {
        self.samples.front()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
