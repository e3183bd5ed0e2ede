//! Task store for the open project.
//!
//! The store hands out immutable [`TaskSnapshot`]s. Every effective mutation
//! installs a fresh snapshot, while no-op mutations keep the current one, so
//! consumers can detect change with [`TaskSnapshot::ptr_eq`].

use crate::board::domain::{Task, TaskId, TaskStatus};
use std::sync::{Arc, PoisonError, RwLock, RwLockWriteGuard, Weak};

/// Immutable, cheaply cloneable view of the store's task list.
#[derive(Debug, Clone)]
pub struct TaskSnapshot(Arc<[Task]>);

impl TaskSnapshot {
    fn new(tasks: Vec<Task>) -> Self {
        Self(Arc::from(tasks))
    }

    /// Returns `true` when both snapshots are the same allocation.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Returns the tasks in store order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.0
    }

    /// Iterates over the tasks in store order.
    pub fn iter(&self) -> std::slice::Iter<'_, Task> {
        self.0.iter()
    }

    /// Returns the number of tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when the snapshot holds no tasks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Finds a task by identifier.
    #[must_use]
    pub fn get(&self, task_id: &str) -> Option<&Task> {
        self.0.iter().find(|task| task.id().as_str() == task_id)
    }

    /// Returns the store position of a task.
    #[must_use]
    pub fn position(&self, task_id: &str) -> Option<usize> {
        self.0.iter().position(|task| task.id().as_str() == task_id)
    }
}

impl Default for TaskSnapshot {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<'a> IntoIterator for &'a TaskSnapshot {
    type Item = &'a Task;
    type IntoIter = std::slice::Iter<'a, Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Result of an optimistic status write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusWrite {
    /// Task as it was before the write.
    pub previous: Task,
    /// Task as it is now shown.
    pub current: Task,
}

/// Shared handle to the task list of the open project.
///
/// Clones share the same list. All operations are total: updating or
/// removing an unknown task is a no-op.
#[derive(Debug, Clone, Default)]
pub struct TaskStore {
    inner: Arc<RwLock<TaskSnapshot>>,
}

impl TaskStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding `tasks`.
    #[must_use]
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(TaskSnapshot::new(tasks))),
        }
    }

    /// Returns the current snapshot.
    #[must_use]
    pub fn snapshot(&self) -> TaskSnapshot {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns a copy of a task.
    #[must_use]
    pub fn get(&self, task_id: &TaskId) -> Option<Task> {
        self.snapshot().get(task_id.as_str()).cloned()
    }

    /// Returns the store position of a task.
    #[must_use]
    pub fn position(&self, task_id: &TaskId) -> Option<usize> {
        self.snapshot().position(task_id.as_str())
    }

    /// Returns the number of tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    /// Returns `true` when the store holds no tasks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshot().is_empty()
    }

    /// Returns a handle that does not keep the store alive.
    #[must_use]
    pub fn downgrade(&self) -> WeakTaskStore {
        WeakTaskStore {
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// Replaces the whole list, typically after a fetch.
    pub fn replace_all(&self, tasks: Vec<Task>) {
        *self.write() = TaskSnapshot::new(tasks);
    }

    /// Appends a task, typically after creation.
    pub fn append(&self, task: Task) {
        let mut guard = self.write();
        let mut tasks = guard.tasks().to_vec();
        tasks.push(task);
        *guard = TaskSnapshot::new(tasks);
    }

    /// Replaces the task with the same identifier, keeping its position.
    ///
    /// Returns `false` and keeps the current snapshot when the task is absent.
    pub fn update(&self, task: Task) -> bool {
        self.modify(|tasks| {
            let position = tasks.iter().position(|entry| entry.id() == task.id())?;
            let mut next = tasks.to_vec();
            next.splice(position..=position, [task]);
            Some(next)
        })
    }

    /// Replaces a task only while the store still holds `expected` for it.
    pub fn update_if(&self, expected: &Task, replacement: Task) -> bool {
        self.modify(|tasks| {
            let position = tasks.iter().position(|entry| entry == expected)?;
            let mut next = tasks.to_vec();
            next.splice(position..=position, [replacement]);
            Some(next)
        })
    }

    /// Removes a task, typically after deletion was confirmed.
    ///
    /// Returns `false` and keeps the current snapshot when the task is absent.
    pub fn remove(&self, task_id: &TaskId) -> bool {
        self.modify(|tasks| {
            tasks.iter().any(|entry| entry.id() == task_id).then(|| {
                tasks
                    .iter()
                    .filter(|entry| entry.id() != task_id)
                    .cloned()
                    .collect()
            })
        })
    }

    /// Sets a task's status without touching any other field.
    ///
    /// Returns the task before and after the write, or `None` when the task
    /// is absent.
    pub fn set_status(&self, task_id: &TaskId, status: TaskStatus) -> Option<StatusWrite> {
        let mut guard = self.write();
        let position = guard.position(task_id.as_str())?;
        let mut next = guard.tasks().to_vec();
        let entry = next.get_mut(position)?;
        let previous = entry.clone();
        *entry = previous.with_status(status);
        let current = entry.clone();
        *guard = TaskSnapshot::new(next);
        Some(StatusWrite { previous, current })
    }

    /// Moves `task_id` to the position currently held by `target_id`,
    /// shifting the entries in between by one.
    ///
    /// Returns the `(from, to)` positions, or `None` when either task is
    /// absent.
    pub fn move_task(&self, task_id: &TaskId, target_id: &TaskId) -> Option<(usize, usize)> {
        let mut guard = self.write();
        let from = guard.position(task_id.as_str())?;
        let to = guard.position(target_id.as_str())?;
        if from != to {
            let mut next = guard.tasks().to_vec();
            let moved = next.remove(from);
            next.insert(to, moved);
            *guard = TaskSnapshot::new(next);
        }
        Some((from, to))
    }

    fn write(&self) -> RwLockWriteGuard<'_, TaskSnapshot> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Installs the list produced by `change`, or keeps the current snapshot
    /// when it yields `None`.
    fn modify(&self, change: impl FnOnce(&[Task]) -> Option<Vec<Task>>) -> bool {
        let mut guard = self.write();
        match change(guard.tasks()) {
            Some(next) => {
                *guard = TaskSnapshot::new(next);
                true
            }
            None => false,
        }
    }
}

/// Non-owning store handle held by in-flight reconciliations.
#[derive(Debug, Clone, Default)]
pub struct WeakTaskStore {
    inner: Weak<RwLock<TaskSnapshot>>,
}

impl WeakTaskStore {
    /// Returns the store if its owner still holds it.
    #[must_use]
    pub fn upgrade(&self) -> Option<TaskStore> {
        self.inner.upgrade().map(|inner| TaskStore { inner })
    }
}
