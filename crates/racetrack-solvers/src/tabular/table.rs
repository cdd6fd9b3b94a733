use racetrack_env::{ActionId, Car, Coord, IntRange, Racetrack, Velocity};
use rand::Rng;
use serde::Serialize;

use crate::tabular::error::SolverError;

/// Discretized state used as a table key: grid cell plus velocity bins.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct StateIndex {
    pub x: usize,
    pub y: usize,
    pub vx: usize,
    pub vy: usize,
}

/// Table dimensions `[width, height, vx_width, vy_width]` plus the action count.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct StateShape {
    width: usize,
    height: usize,
    x_velocity: IntRange,
    y_velocity: IntRange,
    num_actions: usize,
}

impl StateShape {
    pub fn from_racetrack(track: &Racetrack) -> Self {
        StateShape {
            width: track.map().width(),
            height: track.map().height(),
            x_velocity: track.x_velocity_range(),
            y_velocity: track.y_velocity_range(),
            num_actions: track.actions().len(),
        }
    }

    pub fn dims(&self) -> [usize; 4] {
        [
            self.width,
            self.height,
            self.x_velocity.width(),
            self.y_velocity.width(),
        ]
    }

    pub fn state_count(&self) -> usize {
        self.dims().iter().product()
    }

    pub fn num_actions(&self) -> usize {
        self.num_actions
    }

    /// Discretize a position and velocity.
    pub fn index_of(&self, position: Coord, velocity: Velocity) -> Result<StateIndex, SolverError> {
        let out_of_bounds = SolverError::StateOutOfBounds { position, velocity };
        let x = usize::try_from(position.x).map_err(|_| out_of_bounds.clone())?;
        let y = usize::try_from(position.y).map_err(|_| out_of_bounds.clone())?;
        if x >= self.width || y >= self.height {
            return Err(out_of_bounds);
        }
        let vx = self.x_velocity.bin(velocity.x).ok_or(out_of_bounds.clone())?;
        let vy = self.y_velocity.bin(velocity.y).ok_or(out_of_bounds)?;
        Ok(StateIndex { x, y, vx, vy })
    }

    /// Discretize the car's current state.
    pub fn observe(&self, car: &Car<'_>) -> Result<StateIndex, SolverError> {
        self.index_of(car.position(), car.velocity())
    }

    pub fn position_of(&self, state: StateIndex) -> Coord {
        Coord::new(state.x as i32, state.y as i32)
    }

    pub fn velocity_of(&self, state: StateIndex) -> Velocity {
        Velocity::new(
            self.x_velocity.min + state.vx as i32,
            self.y_velocity.min + state.vy as i32,
        )
    }

    /// Row-major offset of a state in axis order `[x, y, vx, vy]`.
    pub fn offset(&self, state: StateIndex) -> Result<usize, SolverError> {
        let [width, height, vx_width, vy_width] = self.dims();
        if state.x >= width || state.y >= height || state.vx >= vx_width || state.vy >= vy_width {
            return Err(SolverError::StateOutOfBounds {
                position: self.position_of(state),
                velocity: self.velocity_of(state),
            });
        }
        Ok(((state.x * height + state.y) * vx_width + state.vx) * vy_width + state.vy)
    }

    pub fn check_action(&self, action_id: ActionId) -> Result<(), SolverError> {
        if action_id.index() >= self.num_actions {
            return Err(SolverError::ActionOutOfBounds {
                action_id,
                num_actions: self.num_actions,
            });
        }
        Ok(())
    }

    /// Every state in offset order.
    pub fn indices(&self) -> impl Iterator<Item = StateIndex> + use<> {
        let [width, height, vx_width, vy_width] = self.dims();
        (0..width).flat_map(move |x| {
            (0..height).flat_map(move |y| {
                (0..vx_width)
                    .flat_map(move |vx| (0..vy_width).map(move |vy| StateIndex { x, y, vx, vy }))
            })
        })
    }
}

/// State values `V(s)`.
#[derive(Debug, Clone)]
pub struct ValueTable {
    shape: StateShape,
    values: Vec<f64>,
}

impl ValueTable {
    pub fn zeros(shape: StateShape) -> Self {
        ValueTable {
            shape,
            values: vec![0.0; shape.state_count()],
        }
    }

    pub fn shape(&self) -> StateShape {
        self.shape
    }

    pub fn get(&self, state: StateIndex) -> Result<f64, SolverError> {
        Ok(self.values[self.shape.offset(state)?])
    }

    pub fn set(&mut self, state: StateIndex, value: f64) -> Result<(), SolverError> {
        let offset = self.shape.offset(state)?;
        self.values[offset] = value;
        Ok(())
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }
}

/// Action values `Q(s, a)`, one row of `num_actions` entries per state.
#[derive(Debug, Clone)]
pub struct QTable {
    shape: StateShape,
    values: Vec<f64>,
}

impl QTable {
    pub fn zeros(shape: StateShape) -> Self {
        QTable {
            shape,
            values: vec![0.0; shape.state_count() * shape.num_actions()],
        }
    }

    /// Fill every entry uniformly from `[0, 1)`.
    pub fn random<R: Rng + ?Sized>(shape: StateShape, rng: &mut R) -> Self {
        let values = (0..shape.state_count() * shape.num_actions())
            .map(|_| rng.gen_range(0.0..1.0))
            .collect();
        QTable { shape, values }
    }

    pub fn shape(&self) -> StateShape {
        self.shape
    }

    fn row_start(&self, state: StateIndex) -> Result<usize, SolverError> {
        Ok(self.shape.offset(state)? * self.shape.num_actions())
    }

    pub fn row(&self, state: StateIndex) -> Result<&[f64], SolverError> {
        let start = self.row_start(state)?;
        Ok(&self.values[start..start + self.shape.num_actions()])
    }

    pub fn row_mut(&mut self, state: StateIndex) -> Result<&mut [f64], SolverError> {
        let start = self.row_start(state)?;
        let end = start + self.shape.num_actions();
        Ok(&mut self.values[start..end])
    }

    pub fn get(&self, state: StateIndex, action_id: ActionId) -> Result<f64, SolverError> {
        self.shape.check_action(action_id)?;
        Ok(self.row(state)?[action_id.index()])
    }

    pub fn set(
        &mut self,
        state: StateIndex,
        action_id: ActionId,
        value: f64,
    ) -> Result<(), SolverError> {
        self.shape.check_action(action_id)?;
        self.row_mut(state)?[action_id.index()] = value;
        Ok(())
    }
}

/// Chosen action per state; `None` until a sweep visits the state.
#[derive(Debug, Clone)]
pub struct PolicyTable {
    shape: StateShape,
    actions: Vec<Option<ActionId>>,
}

impl PolicyTable {
    pub fn new(shape: StateShape) -> Self {
        PolicyTable {
            shape,
            actions: vec![None; shape.state_count()],
        }
    }

    pub fn get(&self, state: StateIndex) -> Result<Option<ActionId>, SolverError> {
        Ok(self.actions[self.shape.offset(state)?])
    }

    pub fn set(&mut self, state: StateIndex, action_id: ActionId) -> Result<(), SolverError> {
        self.shape.check_action(action_id)?;
        let offset = self.shape.offset(state)?;
        self.actions[offset] = Some(action_id);
        Ok(())
    }
}
