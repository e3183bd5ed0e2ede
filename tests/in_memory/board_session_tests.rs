//! In-memory integration tests for board sessions.

use super::helpers::{PROJECT, gateway, ids, seeded_at};
use rstest::{fixture, rstest};
use std::sync::Arc;
use taskboard::board::{
    adapters::memory::InMemoryTaskGateway,
    domain::{NewTask, ProjectId, TaskId, TaskStatus},
    ports::TaskGateway,
    services::{BoardError, BoardSession, DropOutcome, ReconcileError, ReconcileOutcome},
};
use taskboard::config::ReconcilePolicy;

type TestSession = BoardSession<InMemoryTaskGateway>;

fn open(gateway: &Arc<InMemoryTaskGateway>, policy: ReconcilePolicy) -> TestSession {
    BoardSession::new(ProjectId::from_raw(PROJECT), Arc::clone(gateway), policy)
}

#[fixture]
fn session(gateway: Arc<InMemoryTaskGateway>) -> TestSession {
    open(&gateway, ReconcilePolicy::default())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn lane_drop_is_persisted_to_backend(gateway: Arc<InMemoryTaskGateway>) {
    let mut session = open(&gateway, ReconcilePolicy::default());
    session.load().await.expect("load should succeed");

    session.begin_drag("t1");
    session
        .drop_task("t1", Some("inReview"))
        .await
        .expect("drop should succeed");

    let stored = gateway
        .get(&TaskId::from_raw("t1"))
        .await
        .expect("task should exist");
    assert_eq!(stored.status(), TaskStatus::InReview);
    assert_eq!(session.store().get(stored.id()), Some(stored));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn task_drop_across_lanes_moves_and_persists(gateway: Arc<InMemoryTaskGateway>) {
    let mut session = open(&gateway, ReconcilePolicy::default());
    session.load().await.expect("load should succeed");

    session.begin_drag("t1");
    let outcome = session
        .drop_task("t1", Some("t3"))
        .await
        .expect("drop should succeed");

    assert!(matches!(outcome, DropOutcome::Reordered { from: 0, to: 2, .. }));
    assert_eq!(ids(session.snapshot().tasks()), ["t2", "t3", "t1", "t4"]);
    let view = session.view();
    assert_eq!(view.lane_task_ids("inProgress"), ["t3", "t1"]);
    let stored = gateway
        .get(&TaskId::from_raw("t1"))
        .await
        .expect("task should exist");
    assert_eq!(stored.status(), TaskStatus::InProgress);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reorder_is_local_only(mut session: TestSession) {
    session.load().await.expect("load should succeed");

    session.begin_drag("t2");
    let outcome = session
        .drop_task("t2", Some("t1"))
        .await
        .expect("drop should succeed");
    assert_eq!(outcome.pending(), None);
    assert_eq!(ids(session.snapshot().tasks()), ["t2", "t1", "t3", "t4"]);

    session.load().await.expect("reload should succeed");
    assert_eq!(ids(session.snapshot().tasks()), ["t1", "t2", "t3", "t4"]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn hardened_policy_rolls_back_failed_drop(gateway: Arc<InMemoryTaskGateway>) {
    let mut session = open(&gateway, ReconcilePolicy::hardened());
    session.load().await.expect("load should succeed");
    gateway
        .delete(&TaskId::from_raw("t4"))
        .await
        .expect("delete should succeed");

    session.begin_drag("t4");
    let result = session.drop_task("t4", Some("todo")).await;

    assert!(matches!(
        result,
        Err(BoardError::Reconcile(ReconcileError::Failed {
            rolled_back: true,
            ..
        }))
    ));
    let local = session
        .store()
        .get(&TaskId::from_raw("t4"))
        .expect("task stays on the board");
    assert_eq!(local.status(), TaskStatus::Done);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn faithful_policy_keeps_optimistic_status_on_failure(gateway: Arc<InMemoryTaskGateway>) {
    let mut session = open(&gateway, ReconcilePolicy::faithful());
    session.load().await.expect("load should succeed");
    gateway
        .delete(&TaskId::from_raw("t4"))
        .await
        .expect("delete should succeed");

    session.begin_drag("t4");
    let result = session.drop_task("t4", Some("todo")).await;

    assert!(result.is_err());
    assert_eq!(
        session
            .store()
            .get(&TaskId::from_raw("t4"))
            .map(|task| task.status()),
        Some(TaskStatus::Todo)
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn spawned_reconciliation_lands_after_drop(mut session: TestSession) {
    session.load().await.expect("load should succeed");

    session.begin_drag("t2");
    let outcome = session.end_drag("t2", Some("done"));
    let change = outcome.pending().cloned().expect("lane drop needs persisting");
    let handle = tokio::spawn(session.reconcile(change));

    let reconciled = handle
        .await
        .expect("task should not panic")
        .expect("reconciliation should succeed");
    assert!(matches!(reconciled, ReconcileOutcome::Applied(_)));
    assert_eq!(session.view().lane_task_ids("done"), ["t2", "t4"]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn edits_flow_through_to_the_board(session: TestSession) {
    session.load().await.expect("load should succeed");

    let created = session
        .create_task(NewTask::new("Triage bugs", seeded_at()).with_status(TaskStatus::InReview))
        .await
        .expect("create should succeed");
    assert_eq!(session.view().lane_task_ids("inReview"), [created.id().as_str()]);

    session
        .delete_task(created.id())
        .await
        .expect("delete should succeed");
    assert_eq!(session.analytics().for_status(TaskStatus::InReview).total(), 0);
    assert_eq!(session.snapshot().len(), 4);
}
