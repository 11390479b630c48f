//! Pool statistics counters.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Statistics about pool utilization and task outcomes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolStats {
    /// Total tasks accepted by `submit`.
    pub submitted: u64,
    /// Submissions refused (queue full or shut down).
    pub rejected: u64,
    /// Currently executing tasks.
    pub in_flight: u64,
    /// Tasks waiting in the queue.
    pub queued: u64,
    /// Tasks whose executor returned `Ok`.
    pub completed: u64,
    /// Tasks whose executor returned `Err`.
    pub failed: u64,
    /// Tasks cut off by the pool's task timeout.
    pub timed_out: u64,
    /// Queued tasks dropped after their TTL passed.
    pub expired: u64,
}

impl PoolStats {
    /// Tasks that reached a terminal state after being accepted.
    #[must_use]
    pub const fn finished(&self) -> u64 {
        self.completed + self.failed + self.timed_out + self.expired
    }
}

/// Internal counters for pool statistics (thread-safe).
#[derive(Debug, Default)]
pub(crate) struct PoolCounters {
    pub submitted: AtomicU64,
    pub rejected: AtomicU64,
    pub in_flight: AtomicU64,
    pub queued: AtomicU64,
    pub completed: AtomicU64,
    pub failed: AtomicU64,
    pub timed_out: AtomicU64,
    pub expired: AtomicU64,
}

impl PoolCounters {
    /// Get a snapshot of current statistics.
    pub fn snapshot(&self) -> PoolStats {
        PoolStats {
            submitted: self.submitted.load(Ordering::Relaxed),
            rejected: self.rejected.load(Ordering::Relaxed),
            in_flight: self.in_flight.load(Ordering::Relaxed),
            queued: self.queued.load(Ordering::Relaxed),
            completed: self.completed.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
            timed_out: self.timed_out.load(Ordering::Relaxed),
            expired: self.expired.load(Ordering::Relaxed),
        }
    }

    pub fn incr(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn decr(counter: &AtomicU64) {
        counter.fetch_sub(1, Ordering::Relaxed);
    }
}
