//! # Example: budgeted push deliveries

use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use taskbudget::{
    Admission, Budget, Clock, Config, NullMetrics, Reaper, StdoutLogger, TaskError, TaskFn,
    TaskRef, TokioClock,
};

/// A delivery that blocks on a (simulated) external server.
fn delivery(work_ms: u64) -> TaskRef {
    TaskFn::arc("delivery", move |ctx: CancellationToken| async move {
        tokio::select! {
            _ = ctx.cancelled() => Err(TaskError::Canceled),
            _ = tokio::time::sleep(Duration::from_millis(work_ms)) => Ok(()),
        }
    })
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let clock = Arc::new(TokioClock);
    let started = clock.now();

    let mut cfg = Config::default();
    cfg.limit = 2;
    cfg.reaper_interval = Duration::from_millis(20);

    let budget = Budget::new(cfg, Arc::new(StdoutLogger));
    let reaper = Reaper::spawn(&budget, Arc::new(NullMetrics), clock);

    // Two admissions fit the budget; the rest are dropped with a record.
    for n in 0..4 {
        match budget.try_run(delivery(300)).await {
            Admission::Admitted(id) => println!("[main] delivery {n} admitted, id={id}"),
            Admission::Rejected => println!("[main] delivery {n} dropped"),
        }
    }

    // Let the first wave finish; the slots free up again.
    tokio::time::sleep(Duration::from_millis(400)).await;
    println!("[main] live={} elapsed={:?}", budget.size().await, started.elapsed());

    match budget.try_run(delivery(300)).await {
        Admission::Admitted(id) => println!("[main] retry admitted, id={id}"),
        Admission::Rejected => println!("[main] retry dropped"),
    }

    budget.shutdown().await;
    reaper.stopped().await;
    println!("[main] finished");
}
