//! In-memory FIFO queue with deadline awareness.

use std::collections::VecDeque;

use crate::core::SchedulerError;
use crate::core::{ScheduledTask, TaskMetadata, TaskQueue};

/// In-memory queue storing scheduled tasks in submission order.
pub struct InMemoryQueue<P> {
    max_depth: usize,
    tasks: VecDeque<ScheduledTask<P>>,
}

impl<P> InMemoryQueue<P> {
    /// Create a new in-memory queue with a maximum depth.
    #[must_use]
    pub fn new(max_depth: usize) -> Self {
        Self {
            max_depth,
            tasks: VecDeque::with_capacity(max_depth.min(1024)),
        }
    }
}

impl<P> TaskQueue<P> for InMemoryQueue<P> {
    fn enqueue(&mut self, task: ScheduledTask<P>) -> Result<(), SchedulerError> {
        if self.len() >= self.max_depth() {
            return Err(SchedulerError::QueueFull("max queue depth reached".into()));
        }
        self.tasks.push_back(task);
        Ok(())
    }

    fn dequeue(&mut self) -> Option<ScheduledTask<P>> {
        self.tasks.pop_front()
    }

    fn prune_expired(&mut self, now_ms: u128) -> Vec<TaskMetadata> {
        let mut pruned = Vec::new();
        self.tasks.retain(|t| {
            if t.meta.is_expired(now_ms) {
                pruned.push(t.meta.clone());
                false
            } else {
                true
            }
        });
        pruned
    }

    fn max_depth(&self) -> usize {
        self.max_depth
    }

    fn len(&self) -> usize {
        self.tasks.len()
    }
}
