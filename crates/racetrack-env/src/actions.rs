use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{EnvError, IntRange};

/// An acceleration applied to the car for one step.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Action {
    pub ax: i32,
    pub ay: i32,
}

impl Action {
    pub const IDLE: Action = Action { ax: 0, ay: 0 };

    pub const fn new(ax: i32, ay: i32) -> Self {
        Action { ax, ay }
    }
}

/// A wrapper for an integer index into the action enumeration.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActionId(usize);

impl ActionId {
    /// Get the underlying index without exposing the field.
    pub fn index(&self) -> usize {
        self.0
    }
}

impl From<usize> for ActionId {
    fn from(value: usize) -> Self {
        ActionId(value)
    }
}

/// Fixed enumeration of every acceleration pair, built once from the
/// acceleration range. The position in the list is the Q-table action axis.
#[derive(Debug, Clone)]
pub struct ActionSet {
    actions: Vec<Action>,
    action_to_id: HashMap<Action, ActionId>,
    idle: ActionId,
}

impl ActionSet {
    /// Enumerate `(ax, ay)` with `ay` as the outer loop and `ax` as the inner loop.
    pub fn from_range(range: IntRange) -> Result<Self, EnvError> {
        range.validate("acceleration")?;

        let mut actions = Vec::with_capacity(range.width() * range.width());
        let mut action_to_id = HashMap::with_capacity(range.width() * range.width());

        for ay in range.values() {
            for ax in range.values() {
                let action = Action::new(ax, ay);
                action_to_id.insert(action, ActionId::from(actions.len()));
                actions.push(action);
            }
        }

        // Zero is in range after validation, so the idle action was enumerated.
        let idle = action_to_id
            .get(&Action::IDLE)
            .copied()
            .ok_or(EnvError::RangeMissingZero {
                name: "acceleration",
                min: range.min,
                max: range.max,
            })?;

        Ok(ActionSet {
            actions,
            action_to_id,
            idle,
        })
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn get(&self, id: ActionId) -> Option<Action> {
        self.actions.get(id.index()).copied()
    }

    /// Reverse lookup from an acceleration pair to its id.
    pub fn id_of(&self, action: Action) -> Option<ActionId> {
        self.action_to_id.get(&action).copied()
    }

    /// Id of the no-acceleration action.
    pub fn idle(&self) -> ActionId {
        self.idle
    }

    pub fn iter(&self) -> impl Iterator<Item = (ActionId, Action)> + '_ {
        self.actions
            .iter()
            .enumerate()
            .map(|(idx, action)| (ActionId::from(idx), *action))
    }
}
