//! Deterministic tick queue
//!
//! `TickQueue` stores deferred tasks in FIFO order and only runs them when the
//! owner calls [`TickQueue::tick`] or [`TickQueue::run_until_idle`]. A tick
//! runs exactly the tasks that were queued when it started; anything deferred
//! while the tick is running waits for the following tick.
//!
//! Panics raised by a task propagate out of `tick`. The panicking task has
//! already been dequeued, later tasks stay queued.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

use tracing::trace;

use super::{Scheduler, Task};

#[derive(Clone, Default)]
pub struct TickQueue {
    tasks: Rc<RefCell<VecDeque<Task>>>,
}

impl TickQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tasks waiting for a tick.
    pub fn pending(&self) -> usize {
        self.tasks.borrow().len()
    }

    /// Runs one turn of the queue and returns how many tasks ran.
    pub fn tick(&self) -> usize {
        let due = self.pending();
        for _ in 0..due {
            // The borrow must end before the task runs: tasks may defer more work.
            let task = self.tasks.borrow_mut().pop_front();
            match task {
                Some(task) => task(),
                None => break,
            }
        }
        if due > 0 {
            trace!(ran = due, left = self.pending(), "tick completed");
        }
        due
    }

    /// Ticks until no tasks remain and returns the total number run.
    pub fn run_until_idle(&self) -> usize {
        let mut total = 0;
        loop {
            let ran = self.tick();
            if ran == 0 {
                return total;
            }
            total += ran;
        }
    }
}

impl Scheduler for TickQueue {
    fn defer(&self, task: Task) {
        self.tasks.borrow_mut().push_back(task);
    }
}

impl fmt::Debug for TickQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TickQueue")
            .field("pending", &self.pending())
            .finish()
    }
}
