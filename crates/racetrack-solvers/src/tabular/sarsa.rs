use racetrack_env::Car;

use crate::tabular::{
    config::{SolverConfig, SolverConfigError},
    error::SolverError,
    report::{EpisodeMetrics, TrainingReport},
    rollout::Trajectory,
    solver::Solver,
    table::{QTable, StateShape},
    td::{TdLearner, TdTarget},
};

/// On-policy TD control: bootstraps from the action the behaviour policy
/// actually takes next, then executes that same action.
#[derive(Debug, Clone)]
pub struct Sarsa<'a> {
    learner: TdLearner<'a>,
}

impl<'a> Sarsa<'a> {
    /// Fails when `config` does not validate.
    pub fn new(car: Car<'a>, config: &SolverConfig) -> Result<Self, SolverConfigError> {
        Ok(Sarsa {
            learner: TdLearner::new(car, config)?,
        })
    }

    pub fn shape(&self) -> StateShape {
        self.learner.shape()
    }

    pub fn q_values(&self) -> Option<&QTable> {
        self.learner.q_values()
    }

    pub fn train_with_hook<FHook>(
        &mut self,
        on_episode: FHook,
    ) -> Result<TrainingReport<EpisodeMetrics>, SolverError>
    where
        FHook: FnMut(&EpisodeMetrics),
    {
        self.learner
            .train_with_hook(TdTarget::SelectedNext, on_episode)
    }
}

impl Solver for Sarsa<'_> {
    type Metrics = EpisodeMetrics;

    fn train(&mut self) -> Result<TrainingReport<EpisodeMetrics>, SolverError> {
        self.train_with_hook(|_| {})
    }

    fn test(&mut self) -> Result<Trajectory, SolverError> {
        self.learner.test()
    }
}
