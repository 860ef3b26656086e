//! Budget core: admission, bookkeeping, and lifecycle.
//!
//! This module contains the embedded implementation of the admission
//! controller. The public API re-exported from here is [`Budget`],
//! [`Admission`], [`TaskId`], [`Reaper`], and [`ReaperHandle`]; everything
//! else is an internal building block the budget wires together.
//!
//! ## Files & responsibilities
//! - **budget.rs**: public facade; owns the live set, the logger port, and
//!   the root cancellation token; decides admissions under a single critical
//!   section; drives graceful shutdown.
//! - **live.rs**: the live set — id allocation, the closed flag, handle
//!   bookkeeping, snapshot, cancel-all, and emptiness notification, all
//!   behind one mutex.
//! - **runner.rs**: detached execution of one admitted body; flips the done
//!   flag and removes the handle on every termination path, swallowing
//!   failures and panics.
//! - **reaper.rs**: periodic scan removing entries whose task already
//!   terminated, plus the live-count gauge export.
//!
//! ## Wiring (module-level flow)
//! ```text
//! caller ──► Budget::try_run(task)
//!               │ single critical section over the live set
//!               ├─ closed?            → Rejected (no record)
//!               ├─ size >= limit      → Rejected + one "out of budget" record
//!               └─ insert TaskHandle  → spawn worker (outside the lock)
//!                                           │
//!                                           ▼
//!                              runner: body(ctx).await
//!                                ├─ Ok / Err / panic / cancelled
//!                                ├─ handle.mark_done()
//!                                └─ live.remove(id)
//!
//! Reaper (every reaper_interval, via the Clock port):
//!   snapshot ──► remove entries with done set ──► gauge thread_budget.live
//!
//! Budget::shutdown():
//!   set closed ──► cancel root token ──► cancel_all ──► wait_empty (≤ grace)
//! ```
//!
//! ## Rules
//! - The live count never exceeds the configured limit at any observable
//!   moment; the check and the insert happen under one lock acquisition.
//! - The critical section is O(1) and is never held across a spawn or a port
//!   call.
//! - Removal is idempotent: the runner's completion path and the reaper may
//!   both try to remove the same id.
//! - Port calls are panic-isolated; bookkeeping never depends on a port.

mod budget;
mod live;
mod reaper;
mod runner;

pub use budget::{Admission, Budget};
pub use live::TaskId;
pub use reaper::{Reaper, ReaperHandle, LIVE_GAUGE};
