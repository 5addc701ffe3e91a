use log::{debug, warn};

use crate::error::PuzzleError;
use crate::render::Intent;
use crate::state::{parse_step_interval, SharedState, Status};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    /// The matching control is disabled in the current state.
    Disabled,
    /// The input could not be used; nothing changed.
    Ignored,
}

/// Applies a UI intent to the shared state, honoring which controls are
/// enabled. `Intent::Quit` is left to the caller and reported as ignored.
pub fn apply(shared: &SharedState, intent: Intent) -> Result<Outcome, PuzzleError> {
    let status = shared.status();

    debug!("Intent {:?} while {}", intent, status.state_label());

    match intent {
        Intent::Select(name) => select(shared, &status, &name),
        Intent::SelectNext => match neighbor(shared, &status, 1) {
            Some(name) => select(shared, &status, &name),
            None => Ok(Outcome::Ignored),
        },
        Intent::SelectPrevious => match neighbor(shared, &status, -1) {
            Some(name) => select(shared, &status, &name),
            None => Ok(Outcome::Ignored),
        },
        Intent::ToggleRunning => {
            if !status.can_toggle_running() {
                return Ok(Outcome::Disabled);
            }

            shared.set_running(!status.running);
            Ok(Outcome::Applied)
        }
        Intent::Step => {
            if !status.can_step() {
                return Ok(Outcome::Disabled);
            }

            shared.request_step();
            Ok(Outcome::Applied)
        }
        Intent::RunToCompletion => {
            if !status.can_run_to_completion() {
                return Ok(Outcome::Disabled);
            }

            shared.request_run_to_completion();
            Ok(Outcome::Applied)
        }
        Intent::Reset => {
            shared.reset()?;
            Ok(Outcome::Applied)
        }
        Intent::SetScale(scale) => {
            shared.set_scale(scale);
            Ok(Outcome::Applied)
        }
        Intent::ScaleBy(delta) => {
            shared.set_scale(status.scale + delta);
            Ok(Outcome::Applied)
        }
        Intent::SetStepInterval(text) => {
            if !status.can_edit_interval() {
                return Ok(Outcome::Disabled);
            }

            match parse_step_interval(&text) {
                Some(interval) => {
                    shared.set_step_interval(interval);
                    Ok(Outcome::Applied)
                }
                None => {
                    warn!("Ignoring step interval {:?}", text);
                    Ok(Outcome::Ignored)
                }
            }
        }
        Intent::Quit => Ok(Outcome::Ignored),
    }
}

fn select(shared: &SharedState, status: &Status, name: &str) -> Result<Outcome, PuzzleError> {
    if !status.can_select() {
        return Ok(Outcome::Disabled);
    }

    if shared.select(name)? {
        Ok(Outcome::Applied)
    } else {
        Ok(Outcome::Disabled)
    }
}

/// Registry name `offset` places away from the selected one, wrapping.
fn neighbor(shared: &SharedState, status: &Status, offset: isize) -> Option<String> {
    let names = shared.registry().names();

    if names.is_empty() {
        return None;
    }

    let current = names.iter().position(|&name| name == status.selected).unwrap_or(0);
    let count = names.len() as isize;
    let index = (current as isize + offset).rem_euclid(count) as usize;

    Some(names[index].to_string())
}
