use racetrack_env::{Action, ActionId, Car, Coord, Velocity};
use serde::Serialize;

use crate::tabular::{
    error::SolverError,
    table::{StateIndex, StateShape},
};

/// Position and velocity of the car at one point of a trajectory.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct CarState {
    pub position: Coord,
    pub velocity: Velocity,
}

impl CarState {
    pub fn of(car: &Car<'_>) -> Self {
        CarState {
            position: car.position(),
            velocity: car.velocity(),
        }
    }
}

/// One `(state, action, next_state)` step.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct Transition {
    pub state: CarState,
    pub action: Action,
    pub next_state: CarState,
}

/// The path a policy drives from a fresh start.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Trajectory {
    transitions: Vec<Transition>,
    finished: bool,
}

impl Trajectory {
    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    pub fn steps(&self) -> usize {
        self.transitions.len()
    }

    /// Whether the finish was reached before the step cap.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Restart the car and follow `policy` until the finish or `step_cap` steps.
///
/// The policy only sees the discretized state and must return an id inside
/// the car's action set.
pub fn rollout<FPolicy>(
    car: &mut Car<'_>,
    shape: &StateShape,
    step_cap: usize,
    mut policy: FPolicy,
) -> Result<Trajectory, SolverError>
where
    FPolicy: FnMut(StateIndex) -> Result<ActionId, SolverError>,
{
    let actions = car.track().actions();
    let mut trajectory = Trajectory::default();
    car.reset();

    for _ in 0..step_cap {
        let state = CarState::of(car);
        let action_id = policy(shape.index_of(state.position, state.velocity)?)?;
        let action = actions
            .get(action_id)
            .ok_or(SolverError::ActionOutOfBounds {
                action_id,
                num_actions: actions.len(),
            })?;

        car.step(action);
        trajectory.transitions.push(Transition {
            state,
            action,
            next_state: CarState::of(car),
        });

        if car.is_finished() {
            trajectory.finished = true;
            break;
        }
    }

    Ok(trajectory)
}
