//! # Live set: bookkeeping for in-flight tasks.
//!
//! [`LiveSet`] tracks every admitted task from admission until its handle is
//! removed by the worker runner or the reaper. The map, the id counter, and
//! the closed flag live behind a single mutex; the admission gate's
//! test-and-register step is one lock acquisition ([`LiveSet::admit`]).
//!
//! ## Rules
//! - Ids are allocated from a monotonically increasing counter and never
//!   reused within a process lifetime.
//! - The closed flag shares the mutex with the map, so an admission racing
//!   [`close`](LiveSet::close) observes either the open or the closed state,
//!   never a half-shut gate.
//! - `remove` is idempotent; both the runner and the reaper may race to
//!   remove the same id.
//! - `snapshot` hands out cheap handle clones; iterating a snapshot never
//!   holds the lock.
//! - Draining the set wakes `wait_empty` callers (shutdown's grace wait).

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::{Mutex, Notify};
use tokio_util::sync::CancellationToken;

/// Unique identifier of an admitted task.
///
/// Unique within one [`Budget`](crate::Budget) for the process lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Bookkeeping record for one admitted task.
///
/// Owns the cancellation token handed to the body and the done flag flipped
/// when the body returns. Clones share the same underlying state.
#[derive(Clone)]
pub(crate) struct TaskHandle {
    id: TaskId,
    name: Arc<str>,
    cancel: CancellationToken,
    done: Arc<AtomicBool>,
}

impl TaskHandle {
    pub(crate) fn id(&self) -> TaskId {
        self.id
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    /// Requests the task to stop. Idempotent.
    pub(crate) fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Token the body observes for cooperative cancellation.
    pub(crate) fn token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// True once the body has returned on any path.
    pub(crate) fn is_done(&self) -> bool {
        self.done.load(Ordering::Acquire)
    }

    /// Flips the done flag. Returns `true` only for the call that flipped it.
    pub(crate) fn mark_done(&self) -> bool {
        !self.done.swap(true, Ordering::AcqRel)
    }
}

/// Outcome of the gate's critical section.
pub(crate) enum Admit {
    /// Registered below the limit.
    Admitted(TaskHandle),
    /// The live count is at the limit.
    Full,
    /// The set has been closed by shutdown.
    Closed,
}

struct Inner {
    live: HashMap<TaskId, TaskHandle>,
    next_id: u64,
    closed: bool,
}

/// Mutex-guarded set of live task handles.
pub(crate) struct LiveSet {
    inner: Mutex<Inner>,
    drained: Notify,
}

impl LiveSet {
    pub(crate) fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                live: HashMap::new(),
                next_id: 0,
                closed: false,
            }),
            drained: Notify::new(),
        }
    }

    /// The gate's critical section: admit if open and below `limit`.
    ///
    /// Returns [`Admit::Closed`] once the set has been closed and
    /// [`Admit::Full`] when the live count is at or above the limit, touching
    /// the set in neither case. Otherwise allocates a fresh id, registers a
    /// handle, and returns it. The closed check, the size check, and the
    /// insert are atomic with respect to every other operation on the set.
    pub(crate) async fn admit(
        &self,
        limit: usize,
        name: &str,
        cancel: CancellationToken,
    ) -> Admit {
        let mut g = self.inner.lock().await;
        if g.closed {
            return Admit::Closed;
        }
        if g.live.len() >= limit {
            return Admit::Full;
        }

        let id = TaskId(g.next_id);
        g.next_id += 1;

        let handle = TaskHandle {
            id,
            name: Arc::from(name),
            cancel,
            done: Arc::new(AtomicBool::new(false)),
        };
        g.live.insert(id, handle.clone());
        Admit::Admitted(handle)
    }

    /// Closes the set: every subsequent [`admit`](LiveSet::admit) resolves to
    /// [`Admit::Closed`]. Idempotent.
    pub(crate) async fn close(&self) {
        self.inner.lock().await.closed = true;
    }

    /// Removes the entry if present; no-op otherwise.
    pub(crate) async fn remove(&self, id: TaskId) {
        let mut g = self.inner.lock().await;
        g.live.remove(&id);
        let empty = g.live.is_empty();
        drop(g);

        if empty {
            self.drained.notify_waiters();
        }
    }

    /// Current number of live tasks.
    pub(crate) async fn size(&self) -> usize {
        self.inner.lock().await.live.len()
    }

    /// Consistent view of the current handles.
    pub(crate) async fn snapshot(&self) -> Vec<TaskHandle> {
        self.inner.lock().await.live.values().cloned().collect()
    }

    /// Cancels every live task. Does not wait for them to stop.
    pub(crate) async fn cancel_all(&self) {
        for handle in self.snapshot().await {
            handle.cancel();
        }
    }

    /// Resolves once the set is empty.
    ///
    /// Registers for the drain notification before checking emptiness, so a
    /// removal racing this call is never missed.
    pub(crate) async fn wait_empty(&self) {
        loop {
            let notified = self.drained.notified();
            if self.inner.lock().await.live.is_empty() {
                return;
            }
            notified.await;
        }
    }
}
