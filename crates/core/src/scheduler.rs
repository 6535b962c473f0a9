//! Deferred work for the resolution state machine.
//!
//! The session never sleeps. Rollback delays and cascade pauses are queued on a
//! [`Scheduler`] and run when the host advances the clock, which keeps the whole
//! engine on one thread and lets tests drive time explicitly.
//!
//! Ordering: a task never runs before its due time; tasks due at the same
//! instant run in the order they were scheduled.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use crate::types::Coord;

/// A step the session will perform later
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduledTask {
    /// Undo a swap that produced no match
    Revert { a: Coord, b: Coord },
    /// Apply gravity after matched cells were emptied
    Collapse,
    /// Clear the matches left behind by the previous collapse
    ClearMatches,
}

/// Timer service injected into the session
pub trait Scheduler {
    /// Current virtual time in milliseconds
    fn now_ms(&self) -> u64;

    /// Queue a task to run `delay_ms` after the current time
    fn schedule(&mut self, delay_ms: u32, task: ScheduledTask);

    /// Move the clock forward
    fn advance(&mut self, elapsed_ms: u32);

    /// Remove and return the next task whose due time has passed
    fn pop_due(&mut self) -> Option<ScheduledTask>;

    /// Number of queued tasks
    fn pending(&self) -> usize;
}

#[derive(Debug, Clone)]
struct Entry {
    due_ms: u64,
    seq: u64,
    task: ScheduledTask,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.due_ms == other.due_ms && self.seq == other.seq
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.due_ms, self.seq).cmp(&(other.due_ms, other.seq))
    }
}

/// Single-queue virtual clock
#[derive(Debug, Clone, Default)]
pub struct TimerQueue {
    now_ms: u64,
    next_seq: u64,
    heap: BinaryHeap<Reverse<Entry>>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Due time of the earliest queued task
    pub fn next_due_ms(&self) -> Option<u64> {
        self.heap.peek().map(|Reverse(entry)| entry.due_ms)
    }
}

impl Scheduler for TimerQueue {
    fn now_ms(&self) -> u64 {
        self.now_ms
    }

    fn schedule(&mut self, delay_ms: u32, task: ScheduledTask) {
        let entry = Entry {
            due_ms: self.now_ms + delay_ms as u64,
            seq: self.next_seq,
            task,
        };
        self.next_seq += 1;
        self.heap.push(Reverse(entry));
    }

    fn advance(&mut self, elapsed_ms: u32) {
        self.now_ms += elapsed_ms as u64;
    }

    fn pop_due(&mut self) -> Option<ScheduledTask> {
        match self.heap.peek() {
            Some(Reverse(entry)) if entry.due_ms <= self.now_ms => {
                self.heap.pop().map(|Reverse(entry)| entry.task)
            }
            _ => None,
        }
    }

    fn pending(&self) -> usize {
        self.heap.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_waits_for_due_time() {
        let mut q = TimerQueue::new();
        q.schedule(200, ScheduledTask::Collapse);

        q.advance(199);
        assert_eq!(q.pop_due(), None);
        q.advance(1);
        assert_eq!(q.pop_due(), Some(ScheduledTask::Collapse));
        assert_eq!(q.pending(), 0);
    }

    #[test]
    fn test_equal_due_runs_in_schedule_order() {
        let mut q = TimerQueue::new();
        let a = Coord::new(0, 0);
        let b = Coord::new(1, 0);
        q.schedule(100, ScheduledTask::ClearMatches);
        q.schedule(100, ScheduledTask::Revert { a, b });
        q.schedule(100, ScheduledTask::Collapse);

        q.advance(100);
        assert_eq!(q.pop_due(), Some(ScheduledTask::ClearMatches));
        assert_eq!(q.pop_due(), Some(ScheduledTask::Revert { a, b }));
        assert_eq!(q.pop_due(), Some(ScheduledTask::Collapse));
        assert_eq!(q.pop_due(), None);
    }

    #[test]
    fn test_shorter_delay_runs_first() {
        let mut q = TimerQueue::new();
        q.schedule(300, ScheduledTask::Collapse);
        q.schedule(100, ScheduledTask::ClearMatches);
        assert_eq!(q.next_due_ms(), Some(100));

        q.advance(500);
        assert_eq!(q.pop_due(), Some(ScheduledTask::ClearMatches));
        assert_eq!(q.pop_due(), Some(ScheduledTask::Collapse));
    }

    #[test]
    fn test_zero_delay_is_due_immediately() {
        let mut q = TimerQueue::new();
        q.schedule(0, ScheduledTask::Collapse);
        assert_eq!(q.pop_due(), Some(ScheduledTask::Collapse));
    }
}
