//! Then steps for board move BDD scenarios.

use super::world::BoardMoveWorld;
use rstest_bdd_macros::then;
use taskboard::board::{domain::TaskStatus, services::MoveOutcome};

fn group_ids(world: &BoardMoveWorld, key: &str) -> Result<Vec<String>, eyre::Report> {
    let status = TaskStatus::from_group_key(key)
        .ok_or_else(|| eyre::eyre!("invalid group key in scenario: {key}"))?;
    let board = world.session()?.board();
    Ok(board
        .tasks_for_status(&status)
        .iter()
        .map(|task| task.id().to_string())
        .collect())
}

fn last_outcome(world: &BoardMoveWorld) -> Result<&MoveOutcome, eyre::Report> {
    world
        .last_outcome
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing move outcome"))
}

#[then("the move is confirmed")]
fn move_confirmed(world: &BoardMoveWorld) -> Result<(), eyre::Report> {
    let outcome = last_outcome(world)?;
    if !matches!(outcome, MoveOutcome::Confirmed { .. }) {
        return Err(eyre::eyre!("expected confirmed move, got {outcome:?}"));
    }
    Ok(())
}

#[then("the move is rolled back")]
fn move_rolled_back(world: &BoardMoveWorld) -> Result<(), eyre::Report> {
    let outcome = last_outcome(world)?;
    if !matches!(outcome, MoveOutcome::RolledBack { .. }) {
        return Err(eyre::eyre!("expected rolled back move, got {outcome:?}"));
    }
    Ok(())
}

#[then(r#"group "{key}" holds "{task}""#)]
fn group_holds(world: &BoardMoveWorld, key: String, task: String) -> Result<(), eyre::Report> {
    let ids = group_ids(world, &key)?;
    if ids != [task.clone()] {
        return Err(eyre::eyre!("expected group {key} to hold [{task}], found {ids:?}"));
    }
    Ok(())
}

#[then(r#"group "{key}" is empty"#)]
fn group_empty(world: &BoardMoveWorld, key: String) -> Result<(), eyre::Report> {
    let ids = group_ids(world, &key)?;
    if !ids.is_empty() {
        return Err(eyre::eyre!("expected group {key} to be empty, found {ids:?}"));
    }
    Ok(())
}

#[then("no notice is shown")]
fn no_notice(world: &BoardMoveWorld) -> Result<(), eyre::Report> {
    let notices = world.view.notices();
    if !notices.is_empty() {
        return Err(eyre::eyre!("expected no notices, found {notices:?}"));
    }
    Ok(())
}

#[then("{count:usize} notice is shown")]
fn notices_shown(world: &BoardMoveWorld, count: usize) -> Result<(), eyre::Report> {
    let shown = world.view.notices().len();
    if shown != count {
        return Err(eyre::eyre!("expected {count} notices, found {shown}"));
    }
    Ok(())
}

#[then("the board is unchanged")]
fn board_unchanged(world: &BoardMoveWorld) -> Result<(), eyre::Report> {
    let before = world
        .board_before_drop
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing board captured before the drop"))?;
    if world.session()?.board() != *before {
        return Err(eyre::eyre!("board changed after the drop"));
    }
    Ok(())
}

#[then("no status write was sent")]
fn no_status_write(world: &BoardMoveWorld) -> Result<(), eyre::Report> {
    let calls = world.store.update_calls();
    if calls != 0 {
        return Err(eyre::eyre!("expected no status writes, found {calls}"));
    }
    Ok(())
}
