use crate::tabular::{error::SolverError, report::TrainingReport, rollout::Trajectory};

/// Entry points an experiment driver uses; hyperparameters are fixed at construction.
pub trait Solver {
    /// Per-sweep or per-episode record type.
    type Metrics;

    /// Allocate fresh tables and learn a policy.
    fn train(&mut self) -> Result<TrainingReport<Self::Metrics>, SolverError>;

    /// Drive the learned policy greedily from a fresh start. Tables are not modified.
    fn test(&mut self) -> Result<Trajectory, SolverError>;
}
