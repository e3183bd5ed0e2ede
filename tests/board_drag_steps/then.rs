//! Then steps for board drag BDD scenarios.

use super::world::BoardDragWorld;
use rstest_bdd_macros::then;
use taskboard::board::{
    domain::{TaskId, TaskStatus},
    services::DragState,
};

#[then(r#"the status of "{name}" is "{status}""#)]
fn status_is(world: &BoardDragWorld, name: String, status: String) -> Result<(), eyre::Report> {
    let expected = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid expected status in scenario: {err}"))?;

    let task = world
        .session
        .store()
        .get(&TaskId::from_raw(name.as_str()))
        .ok_or_else(|| eyre::eyre!("task {name} is not on the board"))?;

    eyre::ensure!(
        task.status() == expected,
        "expected status {}, found {}",
        expected.as_str(),
        task.status().as_str()
    );
    Ok(())
}

#[then(r#"the board order is "{order}""#)]
fn board_order_is(world: &BoardDragWorld, order: String) -> Result<(), eyre::Report> {
    let expected: Vec<&str> = order.split(',').map(str::trim).collect();
    let snapshot = world.session.snapshot();
    let actual: Vec<&str> = snapshot.iter().map(|task| task.id().as_str()).collect();

    eyre::ensure!(
        actual == expected,
        "expected order {expected:?}, found {actual:?}"
    );
    Ok(())
}

#[then("the task API received {count:usize} status updates")]
fn status_updates_sent(world: &BoardDragWorld, count: usize) -> Result<(), eyre::Report> {
    let sent = world.gateway.status_updates();
    eyre::ensure!(sent == count, "expected {count} status updates, found {sent}");

    if let Some(Err(err)) = &world.last_drop {
        return Err(eyre::eyre!("drop failed unexpectedly: {err}"));
    }
    Ok(())
}

#[then("the drag session is idle")]
fn drag_session_idle(world: &BoardDragWorld) -> Result<(), eyre::Report> {
    eyre::ensure!(
        world.session.drag_state() == &DragState::Idle,
        "expected idle drag session, found {:?}",
        world.session.drag_state()
    );
    Ok(())
}
