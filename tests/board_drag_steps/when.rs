//! When steps for board drag BDD scenarios.

use super::world::{BoardDragWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::when;

#[when(r#""{dragged}" is dropped on "{target}""#)]
fn drop_on_target(world: &mut BoardDragWorld, dragged: String, target: String) {
    world.session.begin_drag(&dragged);
    let result = run_async(world.session.drop_task(&dragged, Some(&target)));
    world.last_drop = Some(result);
}

#[when(r#""{dragged}" is released outside the board"#)]
fn release_outside(world: &mut BoardDragWorld, dragged: String) {
    world.session.begin_drag(&dragged);
    let result = run_async(world.session.drop_task(&dragged, None));
    world.last_drop = Some(result);
}

#[when("the board is reloaded")]
fn reload_board(world: &mut BoardDragWorld) -> Result<(), eyre::Report> {
    run_async(world.session.load()).wrap_err("reload board in scenario")?;
    Ok(())
}
