//! Task queue - serializes simulation phases
//!
//! Two FIFO lanes (normal and low priority) feed a single run slot. Nothing
//! runs on its own: [`TaskQueue::run_next`] only schedules one step, and the
//! owner executes scheduled steps one at a time with [`TaskQueue::step`]
//! (from its event-loop tick). A running phase continues the chain by
//! scheduling the next step itself, either immediately or once its visual
//! transition has finished.
//!
//! The queue is an owned value, one per game session. Lifecycle hooks report
//! the empty -> non-empty ("filled") and non-empty -> empty ("drained") edges
//! exactly once each.

use std::collections::VecDeque;
use std::fmt;

use crate::types::TaskKind;

/// One unit of deferred work.
///
/// The payload carries everything the handler needs (the block snapshot it
/// operates on); `epoch` identifies the game session that queued it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task<P> {
    pub kind: TaskKind,
    pub epoch: u32,
    pub payload: P,
}

impl<P> Task<P> {
    pub fn new(kind: TaskKind, epoch: u32, payload: P) -> Self {
        Self {
            kind,
            epoch,
            payload,
        }
    }
}

/// Outcome of executing one scheduled step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step<P> {
    /// A task was dequeued; the caller must run it
    Run(Task<P>),
    /// Both lanes were empty and the queue just became drained
    Drained,
    /// No step was scheduled, or the queue was already drained
    Idle,
}

/// Handle returned by hook registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HookId(u32);

type Hook = Box<dyn FnMut()>;

pub struct TaskQueue<P> {
    tasks: VecDeque<Task<P>>,
    low_priority_tasks: VecDeque<Task<P>>,
    /// Steps requested by `run_next` and not yet executed
    scheduled: usize,
    is_drained: bool,
    on_filled: Vec<(HookId, Hook)>,
    on_drained: Vec<(HookId, Hook)>,
    next_hook_id: u32,
}

impl<P> TaskQueue<P> {
    pub fn new() -> Self {
        Self {
            tasks: VecDeque::new(),
            low_priority_tasks: VecDeque::new(),
            scheduled: 0,
            is_drained: true,
            on_filled: Vec::new(),
            on_drained: Vec::new(),
            next_hook_id: 0,
        }
    }

    /// Append to the normal lane.
    ///
    /// Returns true when this call moved the queue out of the drained state
    /// (the filled hooks have fired).
    pub fn enqueue(&mut self, task: Task<P>) -> bool {
        self.tasks.push_back(task);
        self.on_enqueue()
    }

    /// Append to the low-priority lane; same fill rule as [`Self::enqueue`].
    pub fn enqueue_low_priority_task(&mut self, task: Task<P>) -> bool {
        self.low_priority_tasks.push_back(task);
        self.on_enqueue()
    }

    fn on_enqueue(&mut self) -> bool {
        // Filled fires once per drained -> non-empty edge.
        let filled = self.is_drained;
        if filled {
            tracing::trace!("task queue filled");
            for (_, hook) in self.on_filled.iter_mut() {
                hook();
            }
        }
        self.is_drained = false;
        filled
    }

    /// Pending tasks of `kind` across both lanes
    pub fn count_tasks_of_type(&self, kind: TaskKind) -> usize {
        self.tasks
            .iter()
            .chain(self.low_priority_tasks.iter())
            .filter(|task| task.kind == kind)
            .count()
    }

    /// Schedule exactly one step for the next [`Self::step`] call.
    pub fn run_next(&mut self) {
        self.scheduled += 1;
    }

    pub fn has_scheduled_step(&self) -> bool {
        self.scheduled > 0
    }

    /// Execute one scheduled step.
    ///
    /// Normal-lane tasks always win over low-priority ones regardless of
    /// arrival order. With both lanes empty the drained hooks fire, once.
    pub fn step(&mut self) -> Step<P> {
        if self.scheduled == 0 {
            return Step::Idle;
        }
        self.scheduled -= 1;

        if let Some(task) = self.tasks.pop_front() {
            return Step::Run(task);
        }
        if let Some(task) = self.low_priority_tasks.pop_front() {
            return Step::Run(task);
        }
        if !self.is_drained {
            self.is_drained = true;
            tracing::trace!("task queue drained");
            for (_, hook) in self.on_drained.iter_mut() {
                hook();
            }
            return Step::Drained;
        }
        Step::Idle
    }

    /// Drop every pending task and scheduled step.
    ///
    /// The drained flag is left alone: a queue that was busy stays busy until
    /// the next step finds both lanes empty.
    pub fn flush(&mut self) -> usize {
        let dropped = self.len();
        self.tasks.clear();
        self.low_priority_tasks.clear();
        self.scheduled = 0;
        dropped
    }

    pub fn len(&self) -> usize {
        self.tasks.len() + self.low_priority_tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True once a step has found both lanes empty and nothing was queued since
    pub fn is_drained(&self) -> bool {
        self.is_drained
    }

    /// Kinds of the pending tasks in execution order
    pub fn pending_kinds(&self) -> impl Iterator<Item = TaskKind> + '_ {
        self.tasks
            .iter()
            .chain(self.low_priority_tasks.iter())
            .map(|task| task.kind)
    }

    pub fn register_on_filled(&mut self, hook: impl FnMut() + 'static) -> HookId {
        let id = self.allocate_hook_id();
        self.on_filled.push((id, Box::new(hook)));
        id
    }

    pub fn register_on_drained(&mut self, hook: impl FnMut() + 'static) -> HookId {
        let id = self.allocate_hook_id();
        self.on_drained.push((id, Box::new(hook)));
        id
    }

    /// Returns false when the hook was not registered
    pub fn unregister_on_filled(&mut self, id: HookId) -> bool {
        let before = self.on_filled.len();
        self.on_filled.retain(|(hook_id, _)| *hook_id != id);
        self.on_filled.len() != before
    }

    /// Returns false when the hook was not registered
    pub fn unregister_on_drained(&mut self, id: HookId) -> bool {
        let before = self.on_drained.len();
        self.on_drained.retain(|(hook_id, _)| *hook_id != id);
        self.on_drained.len() != before
    }

    fn allocate_hook_id(&mut self) -> HookId {
        let id = HookId(self.next_hook_id);
        self.next_hook_id = self.next_hook_id.wrapping_add(1);
        id
    }
}

impl<P> Default for TaskQueue<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> fmt::Debug for TaskQueue<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskQueue")
            .field("tasks", &self.tasks.len())
            .field("low_priority_tasks", &self.low_priority_tasks.len())
            .field("scheduled", &self.scheduled)
            .field("is_drained", &self.is_drained)
            .field("on_filled", &self.on_filled.len())
            .field("on_drained", &self.on_drained.len())
            .finish()
    }
}
