use std::rc::Rc;

use tokio::task::LocalSet;

use super::{Scheduler, Task};

/// Defers tasks onto a tokio `LocalSet` owned by the scheduler.
///
/// `defer` only queues the task on the set, so it works whether or not the
/// caller is running inside that set. Tasks run once the host drives the set,
/// e.g. `scheduler.local_set().run_until(fut).await`. A panicking task is
/// reported through tokio's task machinery and does not affect other tasks.
/// Clones share the same set.
#[derive(Debug, Clone, Default)]
pub struct LocalScheduler {
    set: Rc<LocalSet>,
}

impl LocalScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// The set deferred tasks are spawned on. The host must drive it.
    pub fn local_set(&self) -> &LocalSet {
        &self.set
    }
}

impl Scheduler for LocalScheduler {
    fn defer(&self, task: Task) {
        self.set.spawn_local(async move { task() });
    }
}
