use std::cell::RefCell;
use std::rc::Rc;

use super::{HostScheduler, LocalScheduler, Scheduler, SchedulerKind, TickQueue};

#[test]
fn test_defer_does_not_run_synchronously() {
    let queue = TickQueue::new();
    let ran = Rc::new(RefCell::new(false));

    let flag = ran.clone();
    queue.defer(Box::new(move || *flag.borrow_mut() = true));

    assert!(!*ran.borrow());
    assert_eq!(queue.pending(), 1);

    assert_eq!(queue.tick(), 1);
    assert!(*ran.borrow());
    assert_eq!(queue.pending(), 0);
}

#[test]
fn test_tick_runs_tasks_in_fifo_order() {
    let queue = TickQueue::new();
    let order = Rc::new(RefCell::new(Vec::new()));

    for i in 0..3 {
        let order = order.clone();
        queue.defer(Box::new(move || order.borrow_mut().push(i)));
    }

    queue.tick();
    assert_eq!(*order.borrow(), vec![0, 1, 2]);
}

#[test]
fn test_tasks_deferred_during_tick_wait_for_next_tick() {
    let queue = TickQueue::new();
    let order = Rc::new(RefCell::new(Vec::new()));

    let inner_queue = queue.clone();
    let inner_order = order.clone();
    queue.defer(Box::new(move || {
        inner_order.borrow_mut().push("outer");
        let order = inner_order.clone();
        inner_queue.defer(Box::new(move || order.borrow_mut().push("inner")));
    }));

    assert_eq!(queue.tick(), 1);
    assert_eq!(*order.borrow(), vec!["outer"]);
    assert_eq!(queue.pending(), 1);

    assert_eq!(queue.tick(), 1);
    assert_eq!(*order.borrow(), vec!["outer", "inner"]);
}

#[test]
fn test_run_until_idle_drains_chained_tasks() {
    let queue = TickQueue::new();
    let count = Rc::new(RefCell::new(0));

    let chained_queue = queue.clone();
    let chained_count = count.clone();
    queue.defer(Box::new(move || {
        *chained_count.borrow_mut() += 1;
        let count = chained_count.clone();
        chained_queue.defer(Box::new(move || *count.borrow_mut() += 1));
    }));

    assert_eq!(queue.run_until_idle(), 2);
    assert_eq!(*count.borrow(), 2);
    assert_eq!(queue.tick(), 0);
}

#[test]
fn test_panicking_task_leaves_later_tasks_queued() {
    let queue = TickQueue::new();
    let ran = Rc::new(RefCell::new(false));

    queue.defer(Box::new(|| panic!("boom")));
    let flag = ran.clone();
    queue.defer(Box::new(move || *flag.borrow_mut() = true));

    let tick_queue = queue.clone();
    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| tick_queue.tick()));
    assert!(result.is_err());
    assert_eq!(queue.pending(), 1);

    queue.tick();
    assert!(*ran.borrow());
}

#[test]
fn test_scheduler_kind_deserializes_lowercase() {
    let kind: SchedulerKind = serde_json::from_str("\"local\"").unwrap();
    assert_eq!(kind, SchedulerKind::Local);
    assert_eq!(SchedulerKind::default(), SchedulerKind::Queue);
}

#[tokio::test(flavor = "current_thread")]
async fn test_local_scheduler_runs_when_set_is_driven() {
    let scheduler = LocalScheduler::new();
    let ran = Rc::new(RefCell::new(false));

    // Deferred from outside the set: queued, not run and not a panic.
    let flag = ran.clone();
    scheduler.defer(Box::new(move || *flag.borrow_mut() = true));
    assert!(!*ran.borrow());

    scheduler.local_set().run_until(tokio::task::yield_now()).await;
    assert!(*ran.borrow());
}

#[test]
fn test_host_scheduler_exposes_backing_primitive() {
    let queue = HostScheduler::from(SchedulerKind::Queue);
    assert!(queue.queue().is_some());
    assert!(queue.local_set().is_none());

    let local = HostScheduler::from(SchedulerKind::Local);
    assert!(local.queue().is_none());
    assert!(local.local_set().is_some());
}
