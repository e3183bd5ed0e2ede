//! Given steps for board drag BDD scenarios.

use super::world::{BoardDragWorld, PROJECT, run_async};
use chrono::Utc;
use eyre::WrapErr;
use rstest_bdd_macros::given;
use taskboard::board::domain::{ProjectId, Task, TaskData, TaskId, TaskPriority, TaskStatus};

#[given(r#"a "{status}" task "{name}""#)]
fn task_in_status(
    world: &mut BoardDragWorld,
    status: String,
    name: String,
) -> Result<(), eyre::Report> {
    let parsed = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid status in scenario: {err}"))?;
    let now = Utc::now();
    world.gateway.seed(Task::from_data(TaskData {
        id: TaskId::from_raw(name.clone()),
        project_id: ProjectId::from_raw(PROJECT),
        name,
        description: String::new(),
        status: parsed,
        priority: TaskPriority::Medium,
        due_date: now,
        created_at: now,
        updated_at: now,
    }));
    run_async(world.session.load()).wrap_err("load board after seeding")?;
    Ok(())
}
