//! The `scheduler` module supplies the "run on the next tick" primitive the
//! registry uses to make delivery asynchronous relative to `publish`.
//!
//! The registry never runs callbacks itself during `publish`; it hands a
//! [`Task`] to a [`Scheduler`] and returns. Two schedulers are provided:
//!
//! - [`TickQueue`]: a deterministic in-memory queue driven explicitly by the
//!   host (or a test) through [`TickQueue::tick`].
//! - [`LocalScheduler`]: spawns tasks on a tokio `LocalSet` it owns; the host
//!   drives that set.

pub mod local;
pub mod queue;

use serde::Deserialize;
use tokio::task::LocalSet;

pub use local::LocalScheduler;
pub use queue::TickQueue;

/// A unit of deferred work. Tasks run on the scheduler's single logical thread.
pub type Task = Box<dyn FnOnce() + 'static>;

/// Defers a task to the next turn of a single-threaded cooperative scheduler.
///
/// Implementations must never run the task synchronously inside `defer`.
pub trait Scheduler {
    fn defer(&self, task: Task);
}

/// Selects which scheduler a host builds from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchedulerKind {
    /// Explicitly ticked in-memory queue.
    #[default]
    Queue,
    /// Owned tokio `LocalSet` via `LocalSet::spawn_local`.
    Local,
}

/// A scheduler chosen at runtime from [`SchedulerKind`].
#[derive(Debug, Clone)]
pub enum HostScheduler {
    Queue(TickQueue),
    Local(LocalScheduler),
}

impl HostScheduler {
    /// The tick queue backing this scheduler, if it is one. Hosts using the
    /// queue need it to drive ticks.
    pub fn queue(&self) -> Option<&TickQueue> {
        match self {
            HostScheduler::Queue(queue) => Some(queue),
            HostScheduler::Local(_) => None,
        }
    }

    /// The `LocalSet` backing this scheduler, if it is one. Hosts using it
    /// drive deliveries with `run_until`.
    pub fn local_set(&self) -> Option<&LocalSet> {
        match self {
            HostScheduler::Queue(_) => None,
            HostScheduler::Local(local) => Some(local.local_set()),
        }
    }
}

impl From<SchedulerKind> for HostScheduler {
    fn from(kind: SchedulerKind) -> Self {
        match kind {
            SchedulerKind::Queue => HostScheduler::Queue(TickQueue::new()),
            SchedulerKind::Local => HostScheduler::Local(LocalScheduler::new()),
        }
    }
}

impl Scheduler for HostScheduler {
    fn defer(&self, task: Task) {
        match self {
            HostScheduler::Queue(queue) => queue.defer(task),
            HostScheduler::Local(local) => local.defer(task),
        }
    }
}

#[cfg(test)]
mod tests;
