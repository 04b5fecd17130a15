//! Task group that joins its tasks in spawn order, and a single task handle
//! that cancels its task when dropped.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::task::{JoinError, JoinHandle};

use crate::errors::ChartError;

/// A group of spawned tasks whose results come back in spawn order.
///
/// Each task gets a slot index at spawn time and its output is returned in
/// that slot, however the tasks interleave. Tasks still running when the
/// group is dropped are aborted.
pub struct OrderedTaskGroup<T> {
    handles: Vec<JoinHandle<T>>,
}

impl<T: Send + 'static> OrderedTaskGroup<T> {
    /// Creates an empty group.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            handles: Vec::new(),
        }
    }

    /// Creates an empty group with room for `capacity` tasks.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            handles: Vec::with_capacity(capacity),
        }
    }

    /// Spawns a task and returns its slot index.
    pub fn spawn<Fut>(&mut self, task: Fut) -> usize
    where
        Fut: Future<Output = T> + Send + 'static,
    {
        self.handles.push(tokio::spawn(task));
        self.handles.len() - 1
    }

    /// Returns the number of spawned tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// Returns true if no task was spawned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Waits for every task; `result[i]` is the output of slot `i`.
    ///
    /// A task that panicked yields [`ChartError::Join`] in its slot without
    /// affecting the others.
    pub async fn join_all(mut self) -> Vec<Result<T, ChartError>> {
        let handles = std::mem::take(&mut self.handles);
        futures::future::join_all(handles)
            .await
            .into_iter()
            .map(|joined| joined.map_err(ChartError::from))
            .collect()
    }
}

impl<T: Send + 'static> Default for OrderedTaskGroup<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for OrderedTaskGroup<T> {
    fn drop(&mut self) {
        for handle in &self.handles {
            handle.abort();
        }
    }
}

impl<T> std::fmt::Debug for OrderedTaskGroup<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderedTaskGroup")
            .field("task_count", &self.handles.len())
            .finish()
    }
}

/// A spawned task that is aborted when its handle is dropped.
///
/// Awaiting it yields the task's output like a [`JoinHandle`]. Dropping it
/// early, e.g. because the enclosing task was itself aborted, stops the task.
pub struct ScopedTask<T> {
    handle: JoinHandle<T>,
}

impl<T: Send + 'static> ScopedTask<T> {
    /// Spawns `task` on the runtime.
    pub fn spawn<Fut>(task: Fut) -> Self
    where
        Fut: Future<Output = T> + Send + 'static,
    {
        Self {
            handle: tokio::spawn(task),
        }
    }

    /// Returns true once the task has finished.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl<T> Future for ScopedTask<T> {
    type Output = Result<T, JoinError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.handle).poll(cx)
    }
}

impl<T> Drop for ScopedTask<T> {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

impl<T> std::fmt::Debug for ScopedTask<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScopedTask")
            .field("finished", &self.handle.is_finished())
            .finish()
    }
}
