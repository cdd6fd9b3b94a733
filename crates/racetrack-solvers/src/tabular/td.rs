use racetrack_env::{ActionId, Car};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use crate::tabular::{
    config::{SolverConfig, SolverConfigError},
    error::SolverError,
    policy::{ActionSelector, greedy, max_value},
    report::{EpisodeMetrics, StopReason, TrainingReport},
    rollout::{Trajectory, rollout},
    table::{QTable, StateIndex, StateShape},
};

/// How the bootstrap value of the next state is formed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TdTarget {
    /// `max_a' Q(s', a')` (Q-learning).
    MaxNext,
    /// `Q(s', a')` for the action the behaviour policy picks next (SARSA).
    SelectedNext,
}

impl TdTarget {
    fn name(self) -> &'static str {
        match self {
            TdTarget::MaxNext => "q-learning",
            TdTarget::SelectedNext => "sarsa",
        }
    }
}

/// Episode loop, action selection and decay shared by the TD solvers.
#[derive(Debug, Clone)]
pub(crate) struct TdLearner<'a> {
    car: Car<'a>,
    shape: StateShape,
    selector: ActionSelector,
    rng: ChaCha8Rng,
    config: SolverConfig,
    q_values: Option<QTable>,
}

impl<'a> TdLearner<'a> {
    pub(crate) fn new(car: Car<'a>, config: &SolverConfig) -> Result<Self, SolverConfigError> {
        config.validate()?;
        let shape = StateShape::from_racetrack(car.track());
        let selector = ActionSelector::from_racetrack(car.track());
        Ok(TdLearner {
            car,
            shape,
            selector,
            rng: config.rng(),
            config: config.clone(),
            q_values: None,
        })
    }

    pub(crate) fn shape(&self) -> StateShape {
        self.shape
    }

    pub(crate) fn q_values(&self) -> Option<&QTable> {
        self.q_values.as_ref()
    }

    pub(crate) fn train_with_hook<FHook>(
        &mut self,
        target: TdTarget,
        mut on_episode: FHook,
    ) -> Result<TrainingReport<EpisodeMetrics>, SolverError>
    where
        FHook: FnMut(&EpisodeMetrics),
    {
        let mut q_values = QTable::random(self.shape, &mut self.rng);
        let mut explore_probability = self.config.explore_probability;
        let mut learning_rate = self.config.learning_rate;
        let mut records = Vec::with_capacity(self.config.episodes);

        for episode in 0..self.config.episodes {
            let metrics = self.run_episode(
                &mut q_values,
                target,
                episode,
                explore_probability,
                learning_rate,
            )?;
            debug!(
                solver = target.name(),
                episode,
                steps = metrics.steps,
                finished = metrics.finished,
                total_reward = metrics.total_reward,
                "episode finished"
            );

            on_episode(&metrics);
            records.push(metrics);

            explore_probability *= self.config.decay_rate;
            if learning_rate > self.config.min_learning_rate {
                learning_rate =
                    (learning_rate * self.config.decay_rate).max(self.config.min_learning_rate);
            }
        }

        let report = TrainingReport::new(records, StopReason::EpisodesCompleted);
        info!(
            solver = target.name(),
            episodes = report.len(),
            mean_steps = report.mean_steps().unwrap_or(0.0),
            "training finished"
        );

        self.q_values = Some(q_values);
        Ok(report)
    }

    fn run_episode(
        &mut self,
        q_values: &mut QTable,
        target: TdTarget,
        episode: usize,
        explore_probability: f64,
        learning_rate: f64,
    ) -> Result<EpisodeMetrics, SolverError> {
        let track = self.car.track();
        let actions = track.actions();
        let discount_rate = self.config.discount_rate;

        self.car.reset();
        let mut state = self.shape.observe(&self.car)?;
        let mut action_id = self.select(q_values, state, explore_probability)?;
        let mut steps = 0;
        let mut total_reward = 0.0;
        let mut finished = false;

        while steps < self.config.max_episode_steps {
            let action = actions
                .get(action_id)
                .ok_or(SolverError::ActionOutOfBounds {
                    action_id,
                    num_actions: actions.len(),
                })?;
            self.car.step(action);
            steps += 1;

            finished = self.car.is_finished();
            let reward = track.reward(finished);
            total_reward += reward;
            let current = q_values.get(state, action_id)?;

            // The finish is terminal: no bootstrap.
            if finished {
                q_values.set(state, action_id, current + learning_rate * (reward - current))?;
                break;
            }

            let next_state = self.shape.observe(&self.car)?;
            let next_action = match target {
                TdTarget::SelectedNext => {
                    Some(self.select(q_values, next_state, explore_probability)?)
                }
                TdTarget::MaxNext => None,
            };
            let bootstrap = match next_action {
                Some(next) => q_values.get(next_state, next)?,
                None => max_value(q_values.row(next_state)?).ok_or(SolverError::NoActions)?,
            };

            let td_target = reward + discount_rate * bootstrap;
            q_values.set(
                state,
                action_id,
                current + learning_rate * (td_target - current),
            )?;

            action_id = match next_action {
                Some(next) => next,
                None => self.select(q_values, next_state, explore_probability)?,
            };
            state = next_state;
        }

        Ok(EpisodeMetrics {
            episode,
            steps,
            total_reward,
            finished,
            explore_probability,
            learning_rate,
        })
    }

    fn select(
        &mut self,
        q_values: &QTable,
        state: StateIndex,
        explore_probability: f64,
    ) -> Result<ActionId, SolverError> {
        self.selector
            .select(q_values.row(state)?, explore_probability, &mut self.rng)
            .ok_or(SolverError::NoActions)
    }

    /// Greedy evaluation of the learned Q-table.
    pub(crate) fn test(&mut self) -> Result<Trajectory, SolverError> {
        let q_values = self.q_values.as_ref().ok_or(SolverError::NotTrained)?;
        rollout(&mut self.car, &self.shape, self.config.test_step_cap, |state| {
            greedy(q_values.row(state)?).ok_or(SolverError::NoActions)
        })
    }
}
