//! Delayed task scheduling
//!
//! Tasks are plain data queued against a virtual millisecond clock. Nothing
//! here reads wall time: callers move the clock forward and collect whatever
//! fell due, which keeps every delay deterministic under test.

mod clock;

pub use clock::{Clock, ManualClock, SystemClock};

use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashSet};

/// Handle for cancelling a scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

#[derive(Debug)]
struct Scheduled<T> {
    due_ms: u64,
    seq: u64,
    task: T,
}

// Ordered by due time, then by insertion so equal delays fire FIFO.
impl<T> PartialEq for Scheduled<T> {
    fn eq(&self, other: &Self) -> bool {
        self.due_ms == other.due_ms && self.seq == other.seq
    }
}

impl<T> Eq for Scheduled<T> {}

impl<T> PartialOrd for Scheduled<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Scheduled<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.due_ms, self.seq).cmp(&(other.due_ms, other.seq))
    }
}

pub struct Scheduler<T> {
    now_ms: u64,
    next_seq: u64,
    queue: BinaryHeap<Reverse<Scheduled<T>>>,
    cancelled: HashSet<u64>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Scheduler {
            now_ms: 0,
            next_seq: 0,
            queue: BinaryHeap::new(),
            cancelled: HashSet::new(),
        }
    }

    /// Current virtual time.
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn schedule_at(&mut self, due_ms: u64, task: T) -> TaskId {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(Reverse(Scheduled {
            due_ms: due_ms.max(self.now_ms),
            seq,
            task,
        }));
        TaskId(seq)
    }

    pub fn schedule_in(&mut self, delay_ms: u64, task: T) -> TaskId {
        self.schedule_at(self.now_ms.saturating_add(delay_ms), task)
    }

    /// Returns false if the task already fired or was cancelled.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        let pending = self.queue.iter().any(|Reverse(s)| s.seq == id.0);
        pending && self.cancelled.insert(id.0)
    }

    /// Pop the earliest task due at or before `until_ms`, moving the clock to
    /// its due time.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<T> {
        loop {
            let due_ms = self.queue.peek()?.0.due_ms;
            if due_ms > until_ms {
                return None;
            }
            let Reverse(scheduled) = self.queue.pop()?;
            if self.cancelled.remove(&scheduled.seq) {
                continue;
            }
            self.now_ms = self.now_ms.max(scheduled.due_ms);
            return Some(scheduled.task);
        }
    }

    /// Move the clock forward without running anything.
    pub fn advance_to(&mut self, ms: u64) {
        self.now_ms = self.now_ms.max(ms);
    }

    pub fn next_due_ms(&self) -> Option<u64> {
        self.queue
            .iter()
            .filter(|Reverse(s)| !self.cancelled.contains(&s.seq))
            .map(|Reverse(s)| s.due_ms)
            .min()
    }

    /// Earliest due time among live tasks matching `pred`.
    pub fn next_due_where<F>(&self, pred: F) -> Option<u64>
    where
        F: Fn(&T) -> bool,
    {
        self.queue
            .iter()
            .filter(|Reverse(s)| !self.cancelled.contains(&s.seq) && pred(&s.task))
            .map(|Reverse(s)| s.due_ms)
            .min()
    }

    /// Number of live (not cancelled) tasks.
    pub fn len(&self) -> usize {
        self.queue.len() - self.cancelled.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every pending task.
    pub fn clear(&mut self) {
        self.queue.clear();
        self.cancelled.clear();
    }
}
