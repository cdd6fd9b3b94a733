mod tabular;

pub use tabular::config::{SolverConfig, SolverConfigError};
pub use tabular::error::SolverError;
pub use tabular::policy::{ActionSelector, epsilon_greedy, greedy, max_value};
pub use tabular::report::{EpisodeMetrics, StopReason, SweepMetrics, TrainingReport};
pub use tabular::rollout::{CarState, Trajectory, Transition, rollout};
pub use tabular::solver::Solver;
pub use tabular::table::{PolicyTable, QTable, StateIndex, StateShape, ValueTable};
pub use tabular::{QLearning, Sarsa, ValueIteration};
