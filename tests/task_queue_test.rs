//! Task queue ordering, scheduling and lifecycle hooks

use std::cell::Cell;
use std::rc::Rc;

use slide_blocks::core::{Step, Task, TaskQueue};
use slide_blocks::types::TaskKind;

fn task(kind: TaskKind, payload: u32) -> Task<u32> {
    Task::new(kind, 0, payload)
}

fn drain(queue: &mut TaskQueue<u32>) -> Vec<u32> {
    let mut ran = Vec::new();
    loop {
        queue.run_next();
        match queue.step() {
            Step::Run(t) => ran.push(t.payload),
            Step::Drained | Step::Idle => return ran,
        }
    }
}

#[test]
fn test_normal_lane_runs_before_low_priority() {
    let mut queue = TaskQueue::new();
    queue.enqueue_low_priority_task(task(TaskKind::AddNewRow, 1));
    queue.enqueue(task(TaskKind::ApplyGravity, 2));
    queue.enqueue_low_priority_task(task(TaskKind::AddNewRow, 3));
    queue.enqueue(task(TaskKind::RemoveCompletedRows, 4));

    assert_eq!(drain(&mut queue), vec![2, 4, 1, 3]);
}

#[test]
fn test_count_tasks_of_type_spans_both_lanes() {
    let mut queue = TaskQueue::new();
    queue.enqueue(task(TaskKind::AddNewRow, 0));
    queue.enqueue_low_priority_task(task(TaskKind::AddNewRow, 1));
    queue.enqueue(task(TaskKind::ApplyGravity, 2));

    assert_eq!(queue.count_tasks_of_type(TaskKind::AddNewRow), 2);
    assert_eq!(queue.count_tasks_of_type(TaskKind::ApplyGravity), 1);
    assert_eq!(queue.count_tasks_of_type(TaskKind::RemoveCompletedRows), 0);
}

#[test]
fn test_nothing_runs_without_run_next() {
    let mut queue = TaskQueue::new();
    queue.enqueue(task(TaskKind::ApplyGravity, 1));
    assert_eq!(queue.step(), Step::Idle);
    assert_eq!(queue.len(), 1);

    queue.run_next();
    assert!(queue.has_scheduled_step());
    assert_eq!(queue.step(), Step::Run(task(TaskKind::ApplyGravity, 1)));
    assert!(!queue.has_scheduled_step());
}

#[test]
fn test_filled_and_drained_fire_once_per_cycle() {
    let filled = Rc::new(Cell::new(0));
    let drained = Rc::new(Cell::new(0));

    let mut queue = TaskQueue::new();
    let f = filled.clone();
    queue.register_on_filled(move || f.set(f.get() + 1));
    let d = drained.clone();
    queue.register_on_drained(move || d.set(d.get() + 1));

    for round in 1..=3 {
        assert!(queue.enqueue(task(TaskKind::AddNewRow, 0)));
        assert!(!queue.enqueue(task(TaskKind::ApplyGravity, 1)));
        assert!(!queue.enqueue_low_priority_task(task(TaskKind::AddNewRow, 2)));
        assert_eq!(filled.get(), round);

        drain(&mut queue);
        assert_eq!(drained.get(), round);
        assert!(queue.is_drained());

        // A second empty step does not report drained again.
        queue.run_next();
        assert_eq!(queue.step(), Step::Idle);
        assert_eq!(drained.get(), round);
    }
}

#[test]
fn test_unregistered_hooks_stop_firing() {
    let count = Rc::new(Cell::new(0));
    let mut queue: TaskQueue<u32> = TaskQueue::new();
    let c = count.clone();
    let id = queue.register_on_filled(move || c.set(c.get() + 1));

    queue.enqueue(task(TaskKind::AddNewRow, 0));
    drain(&mut queue);
    assert!(queue.unregister_on_filled(id));
    assert!(!queue.unregister_on_filled(id));

    queue.enqueue(task(TaskKind::AddNewRow, 0));
    assert_eq!(count.get(), 1);
}

#[test]
fn test_flush_drops_tasks_and_scheduled_steps() {
    let mut queue = TaskQueue::new();
    queue.enqueue(task(TaskKind::ApplyGravity, 1));
    queue.enqueue_low_priority_task(task(TaskKind::AddNewRow, 2));
    queue.run_next();
    queue.run_next();

    assert_eq!(queue.flush(), 2);
    assert!(queue.is_empty());
    assert!(!queue.has_scheduled_step());
    assert_eq!(queue.step(), Step::Idle);
}
