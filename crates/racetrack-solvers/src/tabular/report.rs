use serde::Serialize;

/// Why a training run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// The largest value change of a sweep fell to the threshold.
    Converged,
    /// The sweep cap was hit before the threshold was reached.
    IterationCap,
    /// Every configured episode ran.
    EpisodesCompleted,
}

/// Metrics for one value-iteration sweep.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SweepMetrics {
    pub sweep: usize,
    pub max_delta: f64,
}

/// Metrics for one temporal-difference training episode.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct EpisodeMetrics {
    pub episode: usize,
    /// Steps until the finish or the episode cap.
    pub steps: usize,
    pub total_reward: f64,
    pub finished: bool,
    /// Exploration probability in effect during the episode.
    pub explore_probability: f64,
    /// Learning rate in effect during the episode.
    pub learning_rate: f64,
}

/// Ordered per-sweep or per-episode records of a training run.
#[derive(Debug, Clone, Serialize)]
pub struct TrainingReport<M> {
    pub records: Vec<M>,
    pub stop_reason: StopReason,
}

impl<M> TrainingReport<M> {
    pub fn new(records: Vec<M>, stop_reason: StopReason) -> Self {
        TrainingReport {
            records,
            stop_reason,
        }
    }

    /// True only when value iteration met its threshold.
    pub fn converged(&self) -> bool {
        self.stop_reason == StopReason::Converged
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<M: Serialize> TrainingReport<M> {
    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl TrainingReport<SweepMetrics> {
    pub fn final_delta(&self) -> Option<f64> {
        self.records.last().map(|record| record.max_delta)
    }
}

impl TrainingReport<EpisodeMetrics> {
    /// Episode lengths in episode order.
    pub fn steps(&self) -> Vec<usize> {
        self.records.iter().map(|record| record.steps).collect()
    }

    pub fn mean_steps(&self) -> Option<f64> {
        if self.records.is_empty() {
            return None;
        }
        let total: usize = self.records.iter().map(|record| record.steps).sum();
        Some(total as f64 / self.records.len() as f64)
    }
}
