//! Burst admission scenarios under a paused clock.
//!
//! Each scenario drives the budget with virtual time (`tokio::time::advance`)
//! and observes state through the recording ports instead of sleeping.

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::*;
use taskbudget::{Budget, Config, Reaper, TokioClock};

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn test_config(limit: usize) -> Config {
    Config {
        limit,
        reaper_interval: ms(10),
        grace: ms(1000),
    }
}

#[tokio::test(start_paused = true)]
async fn burst_admissions_follow_the_budget() {
    let logger = RecordingLogger::arc();
    let metrics = RecordingMetrics::arc();
    let budget = Budget::new(test_config(5), logger.clone());
    let reaper = Reaper::spawn(&budget, metrics.clone(), Arc::new(TokioClock));

    // A burst of five fills the budget exactly; nothing is logged.
    for _ in 0..5 {
        assert!(budget.try_run(sleeper(ms(1000))).await.is_admitted());
    }
    settle().await;
    tokio::time::advance(ms(100)).await;
    settle().await;
    assert_eq!(budget.size().await, 5);
    assert_eq!(logger.non_debug_count(), 0);

    // Three more while full: all dropped, one record each.
    for _ in 0..3 {
        assert!(!budget.try_run(sleeper(ms(1000))).await.is_admitted());
    }
    tokio::time::advance(ms(100)).await;
    settle().await;
    assert_eq!(budget.size().await, 5);
    assert_eq!(logger.out_of_budget_count(), 3);

    // And again.
    for _ in 0..3 {
        assert!(!budget.try_run(sleeper(ms(1000))).await.is_admitted());
    }
    tokio::time::advance(ms(100)).await;
    settle().await;
    assert_eq!(budget.size().await, 5);
    assert_eq!(logger.out_of_budget_count(), 6);

    // The originals terminate; a fresh burst of three is admitted in full.
    tokio::time::advance(ms(800)).await;
    settle().await;
    tokio::time::advance(ms(200)).await;
    settle().await;
    wait_for_size(&budget, 0).await;
    for _ in 0..3 {
        assert!(budget.try_run(sleeper(ms(1000))).await.is_admitted());
    }
    settle().await;
    tokio::time::advance(ms(100)).await;
    settle().await;
    assert_eq!(budget.size().await, 3);
    assert_eq!(logger.out_of_budget_count(), 6);

    // Two of the next three fit, the last is dropped.
    let mut admitted = 0;
    let mut rejected = 0;
    for _ in 0..3 {
        if budget.try_run(sleeper(ms(1000))).await.is_admitted() {
            admitted += 1;
        } else {
            rejected += 1;
        }
    }
    settle().await;
    tokio::time::advance(ms(100)).await;
    settle().await;
    assert_eq!((admitted, rejected), (2, 1));
    assert_eq!(budget.size().await, 5);
    assert_eq!(logger.out_of_budget_count(), 7);
    assert_eq!(logger.non_debug_count(), 7);

    budget.shutdown().await;
    reaper.stopped().await;
}

#[tokio::test(start_paused = true)]
async fn concurrent_burst_never_exceeds_limit() {
    let logger = RecordingLogger::arc();
    let budget = Budget::new(test_config(5), logger.clone());

    let calls = (0..20).map(|_| budget.try_run(sleeper(ms(50))));
    let outcomes = futures::future::join_all(calls).await;

    let admitted = outcomes.iter().filter(|a| a.is_admitted()).count();
    assert_eq!(admitted, 5);
    assert_eq!(logger.out_of_budget_count(), 15);
    assert!(budget.size().await <= 5);

    budget.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn completion_reclaims_budget() {
    let logger = RecordingLogger::arc();
    let budget = Budget::new(test_config(1), logger.clone());

    assert!(budget.try_run(sleeper(ms(50))).await.is_admitted());
    assert!(!budget.try_run(sleeper(ms(50))).await.is_admitted());

    settle().await;
    tokio::time::advance(ms(50)).await;
    wait_for_size(&budget, 0).await;

    // The slot is free again without any reaper involvement.
    assert!(budget.try_run(sleeper(ms(50))).await.is_admitted());
    assert_eq!(logger.out_of_budget_count(), 1);

    budget.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn failing_body_releases_its_slot() {
    let logger = RecordingLogger::arc();
    let budget = Budget::new(test_config(1), logger.clone());

    assert!(budget.try_run(failing()).await.is_admitted());
    wait_for_size(&budget, 0).await;

    // The failure is swallowed: nothing above debug, slot reusable.
    assert_eq!(logger.non_debug_count(), 0);
    assert!(logger.debug_contains("task_failed"));
    assert!(budget.try_run(sleeper(ms(10))).await.is_admitted());

    budget.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn panicking_body_releases_its_slot() {
    let logger = RecordingLogger::arc();
    let budget = Budget::new(test_config(1), logger.clone());

    assert!(budget.try_run(panicking()).await.is_admitted());
    wait_for_size(&budget, 0).await;

    assert_eq!(logger.non_debug_count(), 0);
    assert!(logger.debug_contains("panicked"));
    assert!(budget.try_run(sleeper(ms(10))).await.is_admitted());

    budget.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn rejection_record_names_the_task() {
    let logger = RecordingLogger::arc();
    let budget = Budget::new(test_config(1), logger.clone());

    assert!(budget.try_run(sleeper(ms(100))).await.is_admitted());
    assert!(!budget.try_run(sleeper(ms(100))).await.is_admitted());

    let records = logger.records();
    let (level, msg) = records
        .iter()
        .find(|(_, msg)| msg.contains("out of budget"))
        .expect("rejection record present");
    assert!(!level.is_debug());
    assert!(msg.contains("task=sleeper"));
    assert!(msg.contains("limit=1"));

    budget.shutdown().await;
}
