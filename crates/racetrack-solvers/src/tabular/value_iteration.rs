use racetrack_env::{ActionId, Car};
use tracing::{debug, info};

use crate::tabular::{
    config::{SolverConfig, SolverConfigError},
    error::SolverError,
    report::{StopReason, SweepMetrics, TrainingReport},
    rollout::{Trajectory, rollout},
    solver::Solver,
    table::{PolicyTable, QTable, StateIndex, StateShape, ValueTable},
};

/// Full-sweep dynamic-programming planner.
///
/// Lookahead probes the transition model by placing the owned car at each
/// state and stepping it, so crash and finish handling match live episodes.
/// The car is therefore only used for evaluation once training returns.
#[derive(Debug, Clone)]
pub struct ValueIteration<'a> {
    car: Car<'a>,
    shape: StateShape,
    discount_rate: f64,
    convergence_threshold: f64,
    max_iterations: usize,
    test_step_cap: usize,
    values: Option<ValueTable>,
    q_values: Option<QTable>,
    policy: Option<PolicyTable>,
}

impl<'a> ValueIteration<'a> {
    /// Fails when `config` does not validate.
    pub fn new(car: Car<'a>, config: &SolverConfig) -> Result<Self, SolverConfigError> {
        config.validate()?;
        let shape = StateShape::from_racetrack(car.track());
        Ok(ValueIteration {
            car,
            shape,
            discount_rate: config.discount_rate,
            convergence_threshold: config.convergence_threshold,
            max_iterations: config.max_iterations,
            test_step_cap: config.test_step_cap,
            values: None,
            q_values: None,
            policy: None,
        })
    }

    pub fn shape(&self) -> StateShape {
        self.shape
    }

    pub fn values(&self) -> Option<&ValueTable> {
        self.values.as_ref()
    }

    /// Action values computed during the last sweep.
    pub fn q_values(&self) -> Option<&QTable> {
        self.q_values.as_ref()
    }

    pub fn policy(&self) -> Option<&PolicyTable> {
        self.policy.as_ref()
    }

    /// Sweep until the largest value change is at most the threshold or the
    /// sweep cap is hit, invoking `on_sweep` after every sweep.
    pub fn train_with_hook<FHook>(
        &mut self,
        mut on_sweep: FHook,
    ) -> Result<TrainingReport<SweepMetrics>, SolverError>
    where
        FHook: FnMut(&SweepMetrics),
    {
        let mut values = ValueTable::zeros(self.shape);
        let mut q_values = QTable::zeros(self.shape);
        let mut policy = PolicyTable::new(self.shape);
        let mut records = Vec::new();
        let mut stop_reason = StopReason::IterationCap;

        for sweep in 0..self.max_iterations {
            let max_delta = self.sweep(&mut values, &mut q_values, &mut policy)?;
            let metrics = SweepMetrics { sweep, max_delta };
            debug!(sweep, max_delta, "value iteration sweep");

            on_sweep(&metrics);
            records.push(metrics);

            if max_delta <= self.convergence_threshold {
                stop_reason = StopReason::Converged;
                break;
            }
        }

        info!(
            sweeps = records.len(),
            converged = stop_reason == StopReason::Converged,
            "value iteration finished"
        );

        self.values = Some(values);
        self.q_values = Some(q_values);
        self.policy = Some(policy);
        Ok(TrainingReport::new(records, stop_reason))
    }

    /// One in-place pass over every state. Returns the largest `|V_old - V_new|`.
    fn sweep(
        &mut self,
        values: &mut ValueTable,
        q_values: &mut QTable,
        policy: &mut PolicyTable,
    ) -> Result<f64, SolverError> {
        let mut max_delta = 0.0_f64;

        for state in self.shape.indices() {
            let old_value = values.get(state)?;
            let Some((best_action, best_value)) = self.lookahead(state, values, q_values)? else {
                continue;
            };

            values.set(state, best_value)?;
            policy.set(state, best_action)?;
            max_delta = max_delta.max((old_value - best_value).abs());
        }

        Ok(max_delta)
    }

    /// Value every action from `state` and return the first maximizer.
    fn lookahead(
        &mut self,
        state: StateIndex,
        values: &ValueTable,
        q_values: &mut QTable,
    ) -> Result<Option<(ActionId, f64)>, SolverError> {
        let track = self.car.track();
        let position = self.shape.position_of(state);
        let velocity = self.shape.velocity_of(state);
        let mut best: Option<(ActionId, f64)> = None;

        for (action_id, action) in track.actions().iter() {
            self.car.place(position, velocity);
            self.car.step(action);

            let finished = self.car.is_finished();
            let next_value = if finished {
                0.0
            } else {
                values.get(self.shape.observe(&self.car)?)?
            };
            let q = track.reward(finished) + self.discount_rate * next_value;
            q_values.set(state, action_id, q)?;

            if best.is_none_or(|(_, best_q)| q > best_q) {
                best = Some((action_id, q));
            }
        }

        Ok(best)
    }
}

impl Solver for ValueIteration<'_> {
    type Metrics = SweepMetrics;

    fn train(&mut self) -> Result<TrainingReport<SweepMetrics>, SolverError> {
        self.train_with_hook(|_| {})
    }

    fn test(&mut self) -> Result<Trajectory, SolverError> {
        let policy = self.policy.as_ref().ok_or(SolverError::NotTrained)?;
        rollout(&mut self.car, &self.shape, self.test_step_cap, |state| {
            policy.get(state)?.ok_or(SolverError::NotTrained)
        })
    }
}
