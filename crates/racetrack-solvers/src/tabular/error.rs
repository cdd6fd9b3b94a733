use std::fmt;

use racetrack_env::{ActionId, Coord, Velocity};

/// Error type for table access, training and evaluation.
///
/// Every variant signals a defect in how tables were sized or used; none is
/// an expected runtime condition and none is retried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolverError {
    /// A position or velocity outside the allocated table dimensions.
    StateOutOfBounds { position: Coord, velocity: Velocity },
    /// An action id outside `[0, num_actions)`.
    ActionOutOfBounds {
        action_id: ActionId,
        num_actions: usize,
    },
    /// Action selection was asked to choose from an empty row.
    NoActions,
    /// `test` was called before `train` produced a table.
    NotTrained,
}

impl fmt::Display for SolverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolverError::StateOutOfBounds { position, velocity } => write!(
                f,
                "state at ({}, {}) with velocity ({}, {}) is outside the table",
                position.x, position.y, velocity.x, velocity.y
            ),
            SolverError::ActionOutOfBounds {
                action_id,
                num_actions,
            } => write!(
                f,
                "action {} is outside the action set of {} actions",
                action_id.index(),
                num_actions
            ),
            SolverError::NoActions => write!(f, "no actions to choose from"),
            SolverError::NotTrained => write!(f, "solver has not been trained"),
        }
    }
}

impl std::error::Error for SolverError {}
